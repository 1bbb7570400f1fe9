// src/models/painel.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Comunicado, Evento, Pagamento, PedidoOracao};

// 1. Resumo financeiro do mês (somas exatas em Decimal)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumoPagamentos {
    pub total: Decimal,
    pub dizimos: Decimal,
    pub ofertas: Decimal,
    pub outros: Decimal,
    pub quantidade: usize,
}

// 2. Cards do topo do painel da igreja
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricasIgreja {
    pub fieis: usize,
    pub eventos_no_mes: usize,
    pub pagamentos_no_mes: Decimal,
    pub pedidos_oracao: usize,
}

// 3. Atividade recente do painel da igreja
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoAtividade {
    Membro,
    Pagamento,
    Pedido,
}

impl TipoAtividade {
    /// Classe do marcador colorido da linha.
    pub fn slug(self) -> &'static str {
        match self {
            TipoAtividade::Membro => "sucesso",
            TipoAtividade::Pagamento => "info",
            TipoAtividade::Pedido => "aviso",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Atividade {
    // Id do registro de origem
    pub id: String,
    pub tipo: TipoAtividade,
    // Nome do fiel ou valor do pagamento, em negrito
    pub destaque: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detalhe: Option<String>,
    pub quando: DateTime<Utc>,
}

// 4. Painel da igreja: métricas + listas curtas
#[derive(Debug, Clone)]
pub struct PainelIgreja {
    pub metricas: MetricasIgreja,
    pub proximos_eventos: Vec<Evento>,
    pub ultimos_comunicados: Vec<Comunicado>,
    pub atividade_recente: Vec<Atividade>,
}

// 5. Painel do membro
#[derive(Debug, Clone)]
pub struct PainelMembro {
    pub eventos_proximos: usize,
    pub total_contribuido: Decimal,
    pub comunicados: usize,
    pub meus_pedidos: usize,
    pub proximos_eventos: Vec<Evento>,
    pub ultimos_comunicados: Vec<Comunicado>,
    pub ultimos_pagamentos: Vec<Pagamento>,
    pub ultimos_pedidos: Vec<PedidoOracao>,
}
