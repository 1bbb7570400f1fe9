// src/models/pagamento.rs

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::entidade::Entidade;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoPagamento {
    Dizimo,
    Oferta,
    Outro,
}

impl TipoPagamento {
    pub const TODOS: [TipoPagamento; 3] =
        [TipoPagamento::Dizimo, TipoPagamento::Oferta, TipoPagamento::Outro];

    pub fn rotulo(self) -> &'static str {
        match self {
            TipoPagamento::Dizimo => "Dízimo",
            TipoPagamento::Oferta => "Oferta",
            TipoPagamento::Outro => "Outro",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            TipoPagamento::Dizimo => "dizimo",
            TipoPagamento::Oferta => "oferta",
            TipoPagamento::Outro => "outro",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::TODOS.into_iter().find(|t| t.slug() == slug)
    }
}

// Qualquer tipo desconhecido entra nos totais como "outro"
impl<'de> Deserialize<'de> for TipoPagamento {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let slug = String::deserialize(deserializer)?;
        Ok(TipoPagamento::from_slug(&slug).unwrap_or(TipoPagamento::Outro))
    }
}

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagamento {
    pub id: String,
    pub igreja_id: String,

    // Nome do membro, como digitado no formulário
    pub membro: String,
    pub tipo: TipoPagamento,
    pub valor: Decimal,
    pub data: NaiveDate,
    #[serde(default)]
    pub descricao: String,

    pub criado_em: DateTime<Utc>,
}

impl Entidade for Pagamento {
    const STORAGE_KEY: &'static str = "cf_pagamentos";
    const PREFIXO_ID: &'static str = "pag";

    fn id(&self) -> &str {
        &self.id
    }

    fn igreja_id(&self) -> &str {
        &self.igreja_id
    }

    // Pela data do pagamento, mais recentes primeiro
    fn ordenar(a: &Self, b: &Self, _hoje: NaiveDate) -> Ordering {
        b.data.cmp(&a.data)
    }
}
