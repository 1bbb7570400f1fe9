// src/views/painel.rs

use crate::{
    common::{
        formato::{data_por_extenso, formatar_brl, tempo_relativo},
        html::{escape_html, primeiro_nome},
        relogio::Momento,
    },
    models::{Atividade, PainelIgreja, PainelMembro, Sessao, TipoAtividade},
    services::toast::ToastNotifier,
    views::{
        comunicados, eventos,
        layout::{toast_html, Layout},
        lista::{EstadoVazio, ItemLista, ListRenderer},
        pagamentos, pedidos,
    },
};

fn card(rotulo: &str, valor: &str) -> String {
    format!(r#"<div class="card"><span>{rotulo}</span><strong>{valor}</strong></div>"#)
}

fn secao(titulo: &str, link: &str, lista: &str) -> String {
    format!(
        r#"<section class="secao"><div class="topo"><h2>{titulo}</h2><a href="{link}">Ver todos</a></div>{lista}</section>"#
    )
}

fn saudacao(sessao: &Sessao, momento: &Momento) -> String {
    format!(
        r#"<p class="saudacao">Bem-vindo, {nome}! <small>{data}</small></p>"#,
        nome = escape_html(primeiro_nome(&sessao.nome)),
        data = data_por_extenso(momento.hoje),
    )
}

impl ItemLista for Atividade {
    fn id(&self) -> &str {
        &self.id
    }
}

fn atividade(a: &Atividade, momento: &Momento) -> String {
    let destaque = escape_html(&a.destaque);
    let texto = match a.tipo {
        TipoAtividade::Membro => format!("<strong>{destaque}</strong> foi cadastrado(a) como fiel."),
        TipoAtividade::Pagamento => match &a.detalhe {
            Some(tipo) => format!(
                "Pagamento de <strong>{destaque}</strong> registrado ({}).",
                escape_html(tipo)
            ),
            None => format!("Pagamento de <strong>{destaque}</strong> registrado."),
        },
        TipoAtividade::Pedido => format!("Novo pedido de oração de <strong>{destaque}</strong>."),
    };
    format!(
        r#"<span class="ponto ponto-{slug}"></span><div class="corpo"><p>{texto}</p><small class="quando">{quando}</small></div>"#,
        slug = a.tipo.slug(),
        quando = tempo_relativo(a.quando, momento.agora),
    )
}

pub fn pagina_igreja(
    painel: &PainelIgreja,
    sessao: &Sessao,
    toast: &ToastNotifier,
    momento: &Momento,
) -> String {
    let m = &painel.metricas;
    let cards = [
        card("Fiéis", &m.fieis.to_string()),
        card("Eventos no mês", &m.eventos_no_mes.to_string()),
        card("Arrecadado no mês", &formatar_brl(m.pagamentos_no_mes)),
        card("Pedidos de oração", &m.pedidos_oracao.to_string()),
    ]
    .concat();

    let eventos_vm: Vec<_> = painel
        .proximos_eventos
        .iter()
        .map(|e| eventos::to_view_model(e, momento.hoje))
        .collect();
    let comunicados_vm: Vec<_> = painel
        .ultimos_comunicados
        .iter()
        .map(comunicados::to_view_model)
        .collect();

    let conteudo = format!(
        r#"{saudacao}
<div class="cards">{cards}</div>
{eventos}
{comunicados}
{atividade}"#,
        saudacao = saudacao(sessao, momento),
        eventos = secao(
            "Próximos eventos",
            "/igreja/eventos",
            &ListRenderer::new("painel-eventos").render(
                &eventos_vm,
                eventos::item,
                &EstadoVazio::new("Nenhum evento agendado", "Crie um evento para ele aparecer aqui."),
            ),
        ),
        comunicados = secao(
            "Últimos comunicados",
            "/igreja/comunicados",
            &ListRenderer::new("painel-comunicados").render(
                &comunicados_vm,
                comunicados::item,
                &comunicados::vazio(),
            ),
        ),
        atividade = format!(
            r#"<section class="secao"><div class="topo"><h2>Atividade recente</h2></div>{}</section>"#,
            ListRenderer::new("atividade-recente").render(
                &painel.atividade_recente,
                |a| atividade(a, momento),
                &EstadoVazio::new(
                    "Nenhuma atividade ainda",
                    "Cadastros, pagamentos e pedidos de oração aparecem aqui.",
                ),
            ),
        ),
    );

    Layout {
        titulo: "Painel",
        sessao,
        ativo: "/igreja/painel",
        rolagem_travada: false,
        menu_aberto: false,
    }
    .render(&conteudo, &toast_html(toast, momento.instante))
}

pub fn pagina_membro(
    painel: &PainelMembro,
    sessao: &Sessao,
    toast: &ToastNotifier,
    momento: &Momento,
) -> String {
    let cards = [
        card("Próximos eventos", &painel.eventos_proximos.to_string()),
        card("Minhas contribuições", &formatar_brl(painel.total_contribuido)),
        card("Comunicados", &painel.comunicados.to_string()),
        card("Meus pedidos", &painel.meus_pedidos.to_string()),
    ]
    .concat();

    let eventos_vm: Vec<_> = painel
        .proximos_eventos
        .iter()
        .map(|e| eventos::to_view_model(e, momento.hoje))
        .collect();
    let comunicados_vm: Vec<_> = painel
        .ultimos_comunicados
        .iter()
        .map(comunicados::to_view_model)
        .collect();
    let pagamentos_vm: Vec<_> = painel
        .ultimos_pagamentos
        .iter()
        .map(pagamentos::to_view_model)
        .collect();
    let pedidos_vm: Vec<_> = painel.ultimos_pedidos.iter().map(pedidos::to_view_model).collect();

    let conteudo = [
        saudacao(sessao, momento),
        format!(r#"<div class="cards">{cards}</div>"#),
        secao(
            "Próximos eventos",
            "/membros/eventos",
            &ListRenderer::new("painel-eventos").render(
                &eventos_vm,
                eventos::item,
                &EstadoVazio::new("Nenhum evento agendado", "Fique de olho nos próximos cultos."),
            ),
        ),
        secao(
            "Comunicados",
            "/membros/comunicados",
            &ListRenderer::new("painel-comunicados").render(
                &comunicados_vm,
                comunicados::item,
                &comunicados::vazio(),
            ),
        ),
        secao(
            "Minhas contribuições",
            "/membros/pagamentos",
            &ListRenderer::new("painel-pagamentos").render(
                &pagamentos_vm,
                pagamentos::item,
                &pagamentos::vazio(),
            ),
        ),
        secao(
            "Meus pedidos de oração",
            "/membros/pedidos-oracao",
            &ListRenderer::new("painel-pedidos").render(
                &pedidos_vm,
                pedidos::item,
                &pedidos::vazio_membro(),
            ),
        ),
    ]
    .concat();

    Layout {
        titulo: "Painel",
        sessao,
        ativo: "/membros/painel",
        rolagem_travada: false,
        menu_aberto: false,
    }
    .render(&conteudo, &toast_html(toast, momento.instante))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetricasIgreja, Papel};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use serde_json::Map;

    #[test]
    fn painel_da_igreja_mostra_a_atividade_recente() {
        let agora = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let momento = Momento::em(agora, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        let sessao = Sessao {
            id: None,
            igreja_id: "igr_1".into(),
            tipo: Papel::Igreja,
            nome: "Pastor".into(),
            nome_igreja: "Central".into(),
            email: None,
            codigo_igreja: Some("ABC123".into()),
            logado_em: None,
            extras: Map::new(),
        };
        let painel = PainelIgreja {
            metricas: MetricasIgreja::default(),
            proximos_eventos: vec![],
            ultimos_comunicados: vec![],
            atividade_recente: vec![
                Atividade {
                    id: "mbr_1".into(),
                    tipo: TipoAtividade::Membro,
                    destaque: "Ana <Lima>".into(),
                    detalhe: None,
                    quando: agora - Duration::hours(3),
                },
                Atividade {
                    id: "pag_1".into(),
                    tipo: TipoAtividade::Pagamento,
                    destaque: "R$ 150,00".into(),
                    detalhe: Some("Dízimo".into()),
                    quando: agora - Duration::days(1),
                },
            ],
        };

        let html = pagina_igreja(&painel, &sessao, &ToastNotifier::default(), &momento);
        assert!(html.contains("Atividade recente"));
        assert!(html.contains("<strong>Ana &lt;Lima&gt;</strong> foi cadastrado(a) como fiel."));
        assert!(html.contains("Há 3h"));
        assert!(html.contains("Pagamento de <strong>R$ 150,00</strong> registrado (Dízimo)."));
        assert!(html.contains("Ontem"));
        assert!(html.contains(r#"class="ponto ponto-info""#));

        let vazio = PainelIgreja {
            atividade_recente: vec![],
            ..painel
        };
        let html = pagina_igreja(&vazio, &sessao, &ToastNotifier::default(), &momento);
        assert!(html.contains("Nenhuma atividade ainda"));
    }
}
