pub mod area_transferencia;
pub mod formularios;
pub mod membros_service;
pub mod modal;
pub mod oracao_service;
pub mod pagina;
pub mod painel_service;
pub mod sessao_service;
pub mod toast;

pub use membros_service::MembrosService;
pub use oracao_service::OracaoService;
pub use pagina::{ConfigPagina, EstadoPagina, PaginaCrud};
pub use painel_service::PainelService;
pub use sessao_service::{SessaoService, SessionGuard};
pub use toast::ToastNotifier;
