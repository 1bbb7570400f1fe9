// src/models/pedido_oracao.rs

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::entidade::Entidade;

/// Ciclo fixo: pendente → orado → respondido → pendente.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPedido {
    #[default]
    Pendente,
    Orado,
    Respondido,
}

impl StatusPedido {
    pub const TODOS: [StatusPedido; 3] =
        [StatusPedido::Pendente, StatusPedido::Orado, StatusPedido::Respondido];

    pub fn proximo(self) -> Self {
        match self {
            StatusPedido::Pendente => StatusPedido::Orado,
            StatusPedido::Orado => StatusPedido::Respondido,
            StatusPedido::Respondido => StatusPedido::Pendente,
        }
    }

    pub fn rotulo(self) -> &'static str {
        match self {
            StatusPedido::Pendente => "Pendente",
            StatusPedido::Orado => "Orado",
            StatusPedido::Respondido => "Respondido",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            StatusPedido::Pendente => "pendente",
            StatusPedido::Orado => "orado",
            StatusPedido::Respondido => "respondido",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::TODOS.into_iter().find(|s| s.slug() == slug)
    }
}

// Status fora do ciclo (ex.: "atendido" de versões antigas) volta a ser pendente
impl<'de> Deserialize<'de> for StatusPedido {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let slug = Option::<String>::deserialize(deserializer)?;
        Ok(slug
            .as_deref()
            .and_then(StatusPedido::from_slug)
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedidoOracao {
    pub id: String,
    pub igreja_id: String,

    // Quem pediu. Pedidos antigos não têm o id do membro.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membro_id: Option<String>,
    #[serde(default)]
    pub membro_nome: String,

    pub pedido: String,
    #[serde(default)]
    pub status: StatusPedido,

    pub criado_em: DateTime<Utc>,
}

impl Entidade for PedidoOracao {
    const STORAGE_KEY: &'static str = "cf_pedidos_oracao";
    const PREFIXO_ID: &'static str = "ped";

    fn id(&self) -> &str {
        &self.id
    }

    fn igreja_id(&self) -> &str {
        &self.igreja_id
    }

    fn ordenar(a: &Self, b: &Self, _hoje: NaiveDate) -> Ordering {
        b.criado_em.cmp(&a.criado_em)
    }
}
