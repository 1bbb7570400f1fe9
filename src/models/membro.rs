// src/models/membro.rs

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::entidade::Entidade;

// ---
// 1. Igreja (o "tenant")
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Igreja {
    pub id: String,
    pub nome: String,
    // Código curto que os fiéis digitam para entrar
    pub codigo: String,
    pub criado_em: DateTime<Utc>,
}

impl Entidade for Igreja {
    const STORAGE_KEY: &'static str = "cf_igrejas";
    const PREFIXO_ID: &'static str = "igr";

    fn id(&self) -> &str {
        &self.id
    }

    // A igreja é o próprio tenant
    fn igreja_id(&self) -> &str {
        &self.id
    }

    fn ordenar(a: &Self, b: &Self, _hoje: NaiveDate) -> Ordering {
        a.nome.cmp(&b.nome)
    }
}

// ---
// 2. Membro (o "fiel")
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MembroGravado")]
pub struct Membro {
    pub id: String,
    pub igreja_id: String,

    pub nome_completo: String,
    #[serde(default)]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criado_em: Option<DateTime<Utc>>,
}

// Registros antigos trazem `nome`; alguns trazem os dois campos.
// Lidos separadamente, `nomeCompleto` vence.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MembroGravado {
    id: String,
    igreja_id: String,
    #[serde(default)]
    nome_completo: Option<String>,
    #[serde(default)]
    nome: Option<String>,
    #[serde(default)]
    email: String,
    #[serde(default)]
    criado_em: Option<DateTime<Utc>>,
}

impl From<MembroGravado> for Membro {
    fn from(g: MembroGravado) -> Self {
        Membro {
            id: g.id,
            igreja_id: g.igreja_id,
            nome_completo: g.nome_completo.or(g.nome).unwrap_or_default(),
            email: g.email,
            criado_em: g.criado_em,
        }
    }
}

impl Membro {
    /// Busca do rol: substring sem diferenciar maiúsculas, no nome ou no e-mail.
    /// `consulta` já deve vir em minúsculas.
    pub fn corresponde(&self, consulta: &str) -> bool {
        self.nome_completo.to_lowercase().contains(consulta)
            || self.email.to_lowercase().contains(consulta)
    }
}

impl Entidade for Membro {
    const STORAGE_KEY: &'static str = "cf_membros";
    const PREFIXO_ID: &'static str = "mbr";

    fn id(&self) -> &str {
        &self.id
    }

    fn igreja_id(&self) -> &str {
        &self.igreja_id
    }

    // Ordem de cadastro
    fn ordenar(a: &Self, b: &Self, _hoje: NaiveDate) -> Ordering {
        a.criado_em.cmp(&b.criado_em)
    }
}
