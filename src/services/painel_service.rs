// src/services/painel_service.rs

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::{
    common::formato::{formatar_brl, mesmo_mes},
    db::{LocalStorage, Repository},
    models::{
        Atividade, Comunicado, Evento, Membro, Pagamento, PainelIgreja, PainelMembro,
        PedidoOracao, MetricasIgreja, ResumoPagamentos, Sessao, TipoAtividade, TipoPagamento,
    },
};

const ITENS_NO_PAINEL: usize = 4;
const ATIVIDADES_POR_TIPO: usize = 2;
const MAX_ATIVIDADES: usize = 6;

// Os `n` mais recentes, do mais novo para o mais antigo
fn mais_recentes<T>(mut itens: Vec<(DateTime<Utc>, T)>, n: usize) -> Vec<(DateTime<Utc>, T)> {
    itens.sort_by(|a, b| b.0.cmp(&a.0));
    itens.truncate(n);
    itens
}

/// Feed do painel da igreja: os últimos fiéis cadastrados, pagamentos e
/// pedidos de oração (dois de cada), do mais novo para o mais antigo.
///
/// Fiéis sem data de cadastro ficam de fora. O pagamento conta pela data
/// do lançamento, à meia-noite UTC.
pub fn atividade_recente(
    membros: &[Membro],
    pagamentos: &[Pagamento],
    pedidos: &[PedidoOracao],
) -> Vec<Atividade> {
    let novos_membros: Vec<_> = membros
        .iter()
        .filter_map(|m| m.criado_em.map(|quando| (quando, m)))
        .collect();
    let novos_pagamentos: Vec<_> = pagamentos
        .iter()
        .filter_map(|p| p.data.and_hms_opt(0, 0, 0).map(|d| (Utc.from_utc_datetime(&d), p)))
        .collect();
    let novos_pedidos: Vec<_> = pedidos.iter().map(|p| (p.criado_em, p)).collect();

    let mut feed: Vec<Atividade> = mais_recentes(novos_membros, ATIVIDADES_POR_TIPO)
        .into_iter()
        .map(|(quando, m)| Atividade {
            id: m.id.clone(),
            tipo: TipoAtividade::Membro,
            destaque: nome_ou(&m.nome_completo, "Novo membro"),
            detalhe: None,
            quando,
        })
        .chain(
            mais_recentes(novos_pagamentos, ATIVIDADES_POR_TIPO)
                .into_iter()
                .map(|(quando, p)| Atividade {
                    id: p.id.clone(),
                    tipo: TipoAtividade::Pagamento,
                    destaque: formatar_brl(p.valor),
                    detalhe: Some(p.tipo.rotulo().to_string()),
                    quando,
                }),
        )
        .chain(
            mais_recentes(novos_pedidos, ATIVIDADES_POR_TIPO)
                .into_iter()
                .map(|(quando, p)| Atividade {
                    id: p.id.clone(),
                    tipo: TipoAtividade::Pedido,
                    destaque: nome_ou(&p.membro_nome, "Anônimo"),
                    detalhe: None,
                    quando,
                }),
        )
        .collect();

    // Estável: no empate, fiéis antes de pagamentos antes de pedidos
    feed.sort_by(|a, b| b.quando.cmp(&a.quando));
    feed.truncate(MAX_ATIVIDADES);
    feed
}

fn nome_ou(nome: &str, padrao: &str) -> String {
    let nome = nome.trim();
    if nome.is_empty() {
        padrao.to_string()
    } else {
        nome.to_string()
    }
}

/// Soma os pagamentos do mês de `hoje`, por tipo.
pub fn resumo_do_mes(pagamentos: &[Pagamento], hoje: NaiveDate) -> ResumoPagamentos {
    let mut resumo = ResumoPagamentos::default();
    for pag in pagamentos.iter().filter(|p| mesmo_mes(p.data, hoje)) {
        resumo.total += pag.valor;
        resumo.quantidade += 1;
        match pag.tipo {
            TipoPagamento::Dizimo => resumo.dizimos += pag.valor,
            TipoPagamento::Oferta => resumo.ofertas += pag.valor,
            TipoPagamento::Outro => resumo.outros += pag.valor,
        }
    }
    resumo
}

/// Pagamentos lançados em nome do membro da sessão.
pub fn pagamentos_do_membro(pagamentos: Vec<Pagamento>, sessao: &Sessao) -> Vec<Pagamento> {
    let nome = sessao.nome.trim().to_lowercase();
    pagamentos
        .into_iter()
        .filter(|p| p.membro.trim().to_lowercase() == nome)
        .collect()
}

/// Pedidos feitos pelo membro da sessão.
pub fn pedidos_do_membro(pedidos: Vec<PedidoOracao>, sessao: &Sessao) -> Vec<PedidoOracao> {
    pedidos
        .into_iter()
        .filter(|p| p.membro_id.is_some() && p.membro_id == sessao.id)
        .collect()
}

pub fn total(pagamentos: &[Pagamento]) -> Decimal {
    pagamentos.iter().map(|p| p.valor).sum()
}

#[derive(Clone)]
pub struct PainelService {
    comunicados: Repository<Comunicado>,
    eventos: Repository<Evento>,
    pagamentos: Repository<Pagamento>,
    pedidos: Repository<PedidoOracao>,
    membros: Repository<Membro>,
}

impl PainelService {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            comunicados: Repository::new(storage.clone()),
            eventos: Repository::new(storage.clone()),
            pagamentos: Repository::new(storage.clone()),
            pedidos: Repository::new(storage.clone()),
            membros: Repository::new(storage),
        }
    }

    pub fn painel_igreja(&self, igreja_id: &str, hoje: NaiveDate) -> PainelIgreja {
        let eventos = self.eventos.load_for_tenant(igreja_id, hoje);
        let pagamentos = self.pagamentos.load_for_tenant(igreja_id, hoje);
        let membros = self.membros.load_for_tenant(igreja_id, hoje);
        let pedidos = self.pedidos.load_for_tenant(igreja_id, hoje);

        let metricas = MetricasIgreja {
            fieis: membros.len(),
            eventos_no_mes: eventos.iter().filter(|e| mesmo_mes(e.data, hoje)).count(),
            pagamentos_no_mes: resumo_do_mes(&pagamentos, hoje).total,
            pedidos_oracao: pedidos.len(),
        };

        PainelIgreja {
            metricas,
            // A ordem de eventos já põe os próximos na frente
            proximos_eventos: eventos
                .into_iter()
                .filter(|e| e.eh_proximo(hoje))
                .take(ITENS_NO_PAINEL)
                .collect(),
            ultimos_comunicados: self
                .comunicados
                .load_for_tenant(igreja_id, hoje)
                .into_iter()
                .take(ITENS_NO_PAINEL)
                .collect(),
            atividade_recente: atividade_recente(&membros, &pagamentos, &pedidos),
        }
    }

    pub fn painel_membro(&self, sessao: &Sessao, hoje: NaiveDate) -> PainelMembro {
        let igreja_id = sessao.igreja_id.as_str();

        let proximos: Vec<Evento> = self
            .eventos
            .load_for_tenant(igreja_id, hoje)
            .into_iter()
            .filter(|e| e.eh_proximo(hoje))
            .collect();
        let comunicados = self.comunicados.load_for_tenant(igreja_id, hoje);
        let pagamentos =
            pagamentos_do_membro(self.pagamentos.load_for_tenant(igreja_id, hoje), sessao);
        let pedidos = pedidos_do_membro(self.pedidos.load_for_tenant(igreja_id, hoje), sessao);

        PainelMembro {
            eventos_proximos: proximos.len(),
            total_contribuido: total(&pagamentos),
            comunicados: comunicados.len(),
            meus_pedidos: pedidos.len(),
            proximos_eventos: proximos.into_iter().take(ITENS_NO_PAINEL).collect(),
            ultimos_comunicados: comunicados.into_iter().take(ITENS_NO_PAINEL).collect(),
            ultimos_pagamentos: pagamentos.into_iter().take(ITENS_NO_PAINEL).collect(),
            ultimos_pedidos: pedidos.into_iter().take(ITENS_NO_PAINEL).collect(),
        }
    }
}
