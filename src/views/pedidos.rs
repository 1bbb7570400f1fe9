// src/views/pedidos.rs

use chrono::{Local, NaiveDate};

use crate::{
    common::{
        formato::{formatar_data_hora, plural},
        html::{escape_html, iniciais},
        relogio::Momento,
    },
    models::{PedidoOracao, Sessao, StatusPedido},
    services::{
        formularios::{ErrosFormulario, PedidoForm},
        oracao_service::{contar, filtrar, FiltroPedidos},
        toast::ToastNotifier,
    },
    views::{
        crud::{campo_textarea, VisaoCrud},
        layout::{toast_html, Layout},
        lista::{EstadoVazio, ItemLista, ListRenderer},
    },
};

pub const CAMINHO_IGREJA: &str = "/igreja/pedidos-oracao";

#[derive(Debug, Clone, PartialEq)]
pub struct PedidoVm {
    pub id: String,
    pub membro: String,
    pub iniciais: String,
    pub pedido: String,
    pub status: &'static str,
    pub classe_status: &'static str,
    pub proximo_status: &'static str,
    pub criado_em: String,
}

impl ItemLista for PedidoVm {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn to_view_model(p: &PedidoOracao) -> PedidoVm {
    let membro = if p.membro_nome.trim().is_empty() {
        "Anônimo".to_string()
    } else {
        p.membro_nome.clone()
    };
    PedidoVm {
        id: p.id.clone(),
        iniciais: iniciais(&membro),
        membro,
        pedido: p.pedido.clone(),
        status: p.status.rotulo(),
        classe_status: p.status.slug(),
        proximo_status: p.status.proximo().rotulo(),
        criado_em: formatar_data_hora(p.criado_em.with_timezone(&Local).naive_local()),
    }
}

pub fn item(vm: &PedidoVm) -> String {
    format!(
        r#"<span class="avatar">{iniciais}</span>
<div class="corpo">
    <h3>{membro} <span class="badge {classe}">{status}</span></h3>
    <p>{pedido}</p>
    <small>{data}</small>
</div>"#,
        iniciais = escape_html(&vm.iniciais),
        membro = escape_html(&vm.membro),
        classe = vm.classe_status,
        status = vm.status,
        pedido = escape_html(&vm.pedido),
        data = vm.criado_em,
    )
}

// Botão que avança o status
fn item_com_acao(vm: &PedidoVm, filtro: FiltroPedidos) -> String {
    format!(
        r#"{item}
<form method="post" action="{CAMINHO_IGREJA}/status">
    <input type="hidden" name="id" value="{id}">
    <input type="hidden" name="filtro" value="{filtro}">
    <button class="botao secundario" type="submit" title="Marcar como {proximo}">{proximo}</button>
</form>"#,
        item = item(vm),
        id = escape_html(&vm.id),
        filtro = filtro.slug(),
        proximo = vm.proximo_status,
    )
}

fn abas(pedidos: &[PedidoOracao], filtro: FiltroPedidos) -> String {
    let mut abas = vec![(FiltroPedidos::Todos, "Todos".to_string(), pedidos.len())];
    abas.extend(
        StatusPedido::TODOS
            .iter()
            .map(|s| (FiltroPedidos::Status(*s), s.rotulo().to_string(), contar(pedidos, *s))),
    );

    let links: String = abas
        .into_iter()
        .map(|(aba, rotulo, n)| {
            format!(
                r#"<a href="{CAMINHO_IGREJA}?filtro={slug}"{ativa}>{rotulo} ({n})</a>"#,
                slug = aba.slug(),
                ativa = if aba == filtro { r#" class="ativa""# } else { "" },
            )
        })
        .collect();
    format!(r#"<nav class="abas">{links}</nav>"#)
}

/// Página da igreja: abas de filtro, contagem total e botão de status.
pub fn pagina_igreja(
    pedidos: &[PedidoOracao],
    filtro: FiltroPedidos,
    sessao: &Sessao,
    toast: &ToastNotifier,
    momento: &Momento,
) -> String {
    let visiveis: Vec<PedidoVm> = filtrar(pedidos, filtro).iter().map(to_view_model).collect();
    let vazio = match filtro {
        FiltroPedidos::Todos => EstadoVazio::new(
            "Nenhum pedido de oração",
            "Os pedidos enviados pelos membros aparecem aqui.",
        ),
        FiltroPedidos::Status(s) => EstadoVazio::new(
            format!("Nenhum pedido {}", s.rotulo().to_lowercase()),
            "Escolha outra aba para ver os demais pedidos.",
        ),
    };
    let lista = ListRenderer::new("lista-pedidos")
        .render(&visiveis, |vm| item_com_acao(vm, filtro), &vazio);

    let conteudo = format!(
        r#"<p class="contagem">{total}</p>
{abas}
{lista}"#,
        // O total ignora o filtro
        total = plural(pedidos.len(), "pedido", "pedidos"),
        abas = abas(pedidos, filtro),
    );

    Layout {
        titulo: "Pedidos de Oração",
        sessao,
        ativo: CAMINHO_IGREJA,
        rolagem_travada: false,
        menu_aberto: false,
    }
    .render(&conteudo, &toast_html(toast, momento.instante))
}

pub fn vazio_membro() -> EstadoVazio {
    EstadoVazio::new(
        "Você ainda não fez pedidos",
        "Compartilhe um pedido e a igreja vai orar por você.",
    )
}

impl VisaoCrud for PedidoForm {
    type Vm = PedidoVm;

    const CONTAINER: &'static str = "lista-meus-pedidos";
    const ROTULO_NOVO: &'static str = "Novo pedido";

    fn to_view_model(entidade: &PedidoOracao, _hoje: NaiveDate) -> PedidoVm {
        to_view_model(entidade)
    }

    fn item(vm: &PedidoVm) -> String {
        item(vm)
    }

    fn campos(&self, erros: &ErrosFormulario, foco: Option<&str>) -> String {
        campo_textarea("pedido", "Seu pedido", &self.pedido, erros, foco)
    }

    fn vazio() -> EstadoVazio {
        vazio_membro()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Papel;
    use chrono::Utc;
    use serde_json::Map;

    fn pedido(id: &str, status: StatusPedido) -> PedidoOracao {
        PedidoOracao {
            id: id.into(),
            igreja_id: "igr_1".into(),
            membro_id: None,
            membro_nome: String::new(),
            pedido: "Pela família".into(),
            status,
            criado_em: Utc::now(),
        }
    }

    #[test]
    fn pedido_sem_nome_e_anonimo() {
        let vm = to_view_model(&pedido("p1", StatusPedido::Orado));
        assert_eq!(vm.membro, "Anônimo");
        assert_eq!(vm.iniciais, "A");
        assert_eq!(vm.proximo_status, "Respondido");
    }

    #[test]
    fn filtro_nao_muda_o_total_e_botao_leva_o_filtro() {
        let pedidos = vec![
            pedido("p1", StatusPedido::Pendente),
            pedido("p2", StatusPedido::Orado),
            pedido("p3", StatusPedido::Orado),
        ];
        let sessao = Sessao {
            id: None,
            igreja_id: "igr_1".into(),
            tipo: Papel::Igreja,
            nome: "Pastor".into(),
            nome_igreja: "Central".into(),
            email: None,
            codigo_igreja: None,
            logado_em: None,
            extras: Map::new(),
        };

        let html = pagina_igreja(
            &pedidos,
            FiltroPedidos::Status(StatusPedido::Orado),
            &sessao,
            &ToastNotifier::default(),
            &Momento::agora(),
        );

        assert!(html.contains("3 pedidos"));
        assert!(html.contains(r#"data-id="p2""#));
        assert!(!html.contains(r#"data-id="p1""#));
        assert!(html.contains(r#"<input type="hidden" name="filtro" value="orado">"#));
        assert!(html.contains(r#"class="ativa">Orado (2)</a>"#));
        assert!(html.contains("Pendente (1)"));
    }
}
