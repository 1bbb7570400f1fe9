pub mod comunicado;
pub mod entidade;
pub mod evento;
pub mod membro;
pub mod pagamento;
pub mod painel;
pub mod pedido_oracao;
pub mod sessao;

pub use comunicado::{Comunicado, Prioridade};
pub use entidade::Entidade;
pub use evento::Evento;
pub use membro::{Igreja, Membro};
pub use pagamento::{Pagamento, TipoPagamento};
pub use painel::{
    Atividade, MetricasIgreja, PainelIgreja, PainelMembro, ResumoPagamentos, TipoAtividade,
};
pub use pedido_oracao::{PedidoOracao, StatusPedido};
pub use sessao::{Papel, Sessao, SESSION_KEY};
