// src/services/oracao_service.rs

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    common::relogio::Momento,
    db::{LocalStorage, Repository},
    models::{PedidoOracao, Sessao, StatusPedido},
    services::{pagina::MSG_FALHA_GRAVACAO, toast::ToastNotifier},
};

/// Aba selecionada na lista de pedidos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FiltroPedidos {
    #[default]
    Todos,
    Status(StatusPedido),
}

impl FiltroPedidos {
    /// `?filtro=` da URL; valor desconhecido mostra todos.
    pub fn from_query(valor: Option<&str>) -> Self {
        valor
            .and_then(StatusPedido::from_slug)
            .map(FiltroPedidos::Status)
            .unwrap_or_default()
    }

    pub fn slug(self) -> &'static str {
        match self {
            FiltroPedidos::Todos => "todos",
            FiltroPedidos::Status(s) => s.slug(),
        }
    }

    pub fn aceita(self, pedido: &PedidoOracao) -> bool {
        match self {
            FiltroPedidos::Todos => true,
            FiltroPedidos::Status(s) => pedido.status == s,
        }
    }
}

pub fn filtrar(pedidos: &[PedidoOracao], filtro: FiltroPedidos) -> Vec<PedidoOracao> {
    pedidos.iter().filter(|p| filtro.aceita(p)).cloned().collect()
}

pub fn contar(pedidos: &[PedidoOracao], status: StatusPedido) -> usize {
    pedidos.iter().filter(|p| p.status == status).count()
}

#[derive(Clone)]
pub struct OracaoService {
    repo: Repository<PedidoOracao>,
}

impl OracaoService {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            repo: Repository::new(storage),
        }
    }

    pub fn listar(&self, igreja_id: &str, hoje: NaiveDate) -> Vec<PedidoOracao> {
        self.repo.load_for_tenant(igreja_id, hoje)
    }

    /// Avança pendente → orado → respondido → pendente.
    /// Id desconhecido ou de outra igreja é ignorado em silêncio.
    pub fn alternar_status(
        &self,
        sessao: &Sessao,
        id: &str,
        momento: &Momento,
        toast: &mut ToastNotifier,
    ) -> Option<PedidoOracao> {
        let pedido = self.repo.find_by_id(id)?;
        if pedido.igreja_id != sessao.igreja_id {
            tracing::debug!("Pedido {} não é da igreja {}", id, sessao.igreja_id);
            return None;
        }

        match self.repo.update_field(id, |p| p.status = p.status.proximo()) {
            Ok(Some(atualizado)) => {
                toast.sucesso(
                    format!("Status alterado para \"{}\"", atualizado.status.rotulo()),
                    momento.instante,
                );
                Some(atualizado)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!("Falha ao atualizar pedido {}: {}", id, e);
                toast.erro(MSG_FALHA_GRAVACAO, momento.instante);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStorage;
    use crate::models::Papel;
    use chrono::{TimeZone, Utc};
    use serde_json::Map;

    fn sessao(igreja: &str) -> Sessao {
        Sessao {
            id: None,
            igreja_id: igreja.into(),
            tipo: Papel::Igreja,
            nome: "Pastor".into(),
            nome_igreja: "Central".into(),
            email: None,
            codigo_igreja: None,
            logado_em: None,
            extras: Map::new(),
        }
    }

    fn pedido(id: &str, status: StatusPedido) -> PedidoOracao {
        PedidoOracao {
            id: id.into(),
            igreja_id: "igr_1".into(),
            membro_id: None,
            membro_nome: "Ana".into(),
            pedido: "Saúde".into(),
            status,
            criado_em: Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap(),
        }
    }

    fn momento() -> Momento {
        Momento::em(
            Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        )
    }

    #[test]
    fn filtro_desconhecido_mostra_todos() {
        assert_eq!(FiltroPedidos::from_query(Some("orado")), FiltroPedidos::Status(StatusPedido::Orado));
        assert_eq!(FiltroPedidos::from_query(Some("xyz")), FiltroPedidos::Todos);
        assert_eq!(FiltroPedidos::from_query(None).slug(), "todos");
    }

    #[test]
    fn filtrar_e_contar() {
        let pedidos = vec![
            pedido("a", StatusPedido::Pendente),
            pedido("b", StatusPedido::Orado),
            pedido("c", StatusPedido::Pendente),
        ];
        let pendentes = filtrar(&pedidos, FiltroPedidos::Status(StatusPedido::Pendente));
        assert_eq!(pendentes.len(), 2);
        assert_eq!(filtrar(&pedidos, FiltroPedidos::Todos).len(), 3);
        assert_eq!(contar(&pedidos, StatusPedido::Respondido), 0);
    }

    #[test]
    fn alternar_status_da_a_volta_completa() {
        let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::new());
        let service = OracaoService::new(storage.clone());
        Repository::<PedidoOracao>::new(storage)
            .create(&pedido("p1", StatusPedido::Pendente))
            .unwrap();
        let m = momento();
        let mut toast = ToastNotifier::default();

        let esperados = [StatusPedido::Orado, StatusPedido::Respondido, StatusPedido::Pendente];
        for esperado in esperados {
            let atualizado = service.alternar_status(&sessao("igr_1"), "p1", &m, &mut toast).unwrap();
            assert_eq!(atualizado.status, esperado);
        }
        assert_eq!(
            toast.visivel(m.instante).unwrap().mensagem,
            "Status alterado para \"Pendente\""
        );
    }

    #[test]
    fn pedido_de_outra_igreja_nao_muda() {
        let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::new());
        let service = OracaoService::new(storage.clone());
        Repository::<PedidoOracao>::new(storage)
            .create(&pedido("p1", StatusPedido::Pendente))
            .unwrap();
        let mut toast = ToastNotifier::default();

        assert!(service.alternar_status(&sessao("igr_2"), "p1", &momento(), &mut toast).is_none());
        assert!(service.alternar_status(&sessao("igr_1"), "nao-existe", &momento(), &mut toast).is_none());
        assert_eq!(service.listar("igr_1", momento().hoje)[0].status, StatusPedido::Pendente);
        assert!(toast.visivel(momento().instante).is_none());
    }
}
