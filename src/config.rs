// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{
    db::{FileStorage, LocalStorage, MemoryStorage},
    models::Papel,
    services::{
        formularios::{ComunicadoForm, EventoForm, PagamentoForm, PedidoForm},
        pagina::{ConfigPagina, PaginaCrud},
        toast::ATRASO_PADRAO,
        MembrosService, OracaoService, PainelService, SessaoService,
    },
};

const ARMAZENAMENTO_PADRAO: &str = "dados/congrega_fiel.json";
const ENDERECO_PADRAO: &str = "127.0.0.1:3000";
/// Valor de `CF_ARMAZENAMENTO` que usa um armazenamento só em memória.
pub const ARMAZENAMENTO_MEMORIA: &str = ":memoria:";

// --- Páginas de CRUD ---

pub const PAGINA_COMUNICADOS: ConfigPagina = ConfigPagina {
    papel: Papel::Igreja,
    caminho: "/igreja/comunicados",
    titulo: "Comunicados",
    msg_criado: "Comunicado publicado!",
    msg_excluido: "Comunicado excluído.",
};

pub const PAGINA_EVENTOS: ConfigPagina = ConfigPagina {
    papel: Papel::Igreja,
    caminho: "/igreja/eventos",
    titulo: "Eventos",
    msg_criado: "Evento criado!",
    msg_excluido: "Evento excluído.",
};

pub const PAGINA_PAGAMENTOS: ConfigPagina = ConfigPagina {
    papel: Papel::Igreja,
    caminho: "/igreja/pagamentos",
    titulo: "Pagamentos",
    msg_criado: "Pagamento registrado!",
    msg_excluido: "Pagamento excluído.",
};

pub const PAGINA_MEUS_PEDIDOS: ConfigPagina = ConfigPagina {
    papel: Papel::Membro,
    caminho: "/membros/pedidos-oracao",
    titulo: "Pedidos de Oração",
    msg_criado: "Pedido enviado! A igreja vai orar por você.",
    msg_excluido: "Pedido excluído.",
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn LocalStorage>,
    pub endereco: String,
    pub atraso_toast: Duration,

    pub sessao_service: SessaoService,
    pub painel_service: PainelService,
    pub oracao_service: OracaoService,
    pub membros_service: MembrosService,

    pub comunicados: PaginaCrud<ComunicadoForm>,
    pub eventos: PaginaCrud<EventoForm>,
    pub pagamentos: PaginaCrud<PagamentoForm>,
    pub meus_pedidos: PaginaCrud<PedidoForm>,
}

impl AppState {
    /// Lê `.env` e as variáveis `CF_*` e monta o estado.
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let caminho =
            env::var("CF_ARMAZENAMENTO").unwrap_or_else(|_| ARMAZENAMENTO_PADRAO.to_string());
        let endereco = env::var("CF_ENDERECO").unwrap_or_else(|_| ENDERECO_PADRAO.to_string());
        let atraso_toast = match env::var("CF_TOAST_MS") {
            Ok(ms) => Duration::from_millis(
                ms.trim()
                    .parse()
                    .with_context(|| format!("CF_TOAST_MS inválido: {:?}", ms))?,
            ),
            Err(_) => ATRASO_PADRAO,
        };

        let storage: Arc<dyn LocalStorage> = if caminho == ARMAZENAMENTO_MEMORIA {
            tracing::info!("🧠 Armazenamento em memória (nada será gravado em disco)");
            Arc::new(MemoryStorage::new())
        } else {
            let storage = FileStorage::open(&caminho)
                .with_context(|| format!("Falha ao abrir o armazenamento em {}", caminho))?;
            tracing::info!("✅ Armazenamento aberto em {}", caminho);
            Arc::new(storage)
        };

        Ok(Self::com_storage(storage, endereco, atraso_toast))
    }

    /// Monta o gráfico de dependências sobre um armazenamento já aberto.
    pub fn com_storage(
        storage: Arc<dyn LocalStorage>,
        endereco: impl Into<String>,
        atraso_toast: Duration,
    ) -> Self {
        Self {
            sessao_service: SessaoService::new(storage.clone()),
            painel_service: PainelService::new(storage.clone()),
            oracao_service: OracaoService::new(storage.clone()),
            membros_service: MembrosService::new(storage.clone()),
            comunicados: PaginaCrud::new(PAGINA_COMUNICADOS, storage.clone(), atraso_toast),
            eventos: PaginaCrud::new(PAGINA_EVENTOS, storage.clone(), atraso_toast),
            pagamentos: PaginaCrud::new(PAGINA_PAGAMENTOS, storage.clone(), atraso_toast),
            meus_pedidos: PaginaCrud::new(PAGINA_MEUS_PEDIDOS, storage.clone(), atraso_toast),
            storage,
            endereco: endereco.into(),
            atraso_toast,
        }
    }
}
