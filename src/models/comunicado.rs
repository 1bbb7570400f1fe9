// src/models/comunicado.rs

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::entidade::Entidade;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prioridade {
    #[default]
    Normal,
    Urgente,
}

impl Prioridade {
    pub fn rotulo(self) -> &'static str {
        match self {
            Prioridade::Normal => "Normal",
            Prioridade::Urgente => "Urgente",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Prioridade::Normal => "normal",
            Prioridade::Urgente => "urgente",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ComunicadoGravado")]
pub struct Comunicado {
    pub id: String,
    pub igreja_id: String,

    pub titulo: String,
    pub conteudo: String,
    pub prioridade: Prioridade,

    pub criado_em: DateTime<Utc>,
}

// Versões antigas gravavam o texto em "mensagem"
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComunicadoGravado {
    id: String,
    igreja_id: String,
    titulo: String,
    #[serde(default)]
    conteudo: Option<String>,
    #[serde(default)]
    mensagem: Option<String>,
    #[serde(default)]
    prioridade: Prioridade,
    criado_em: DateTime<Utc>,
}

impl From<ComunicadoGravado> for Comunicado {
    fn from(g: ComunicadoGravado) -> Self {
        Comunicado {
            id: g.id,
            igreja_id: g.igreja_id,
            titulo: g.titulo,
            conteudo: g.conteudo.or(g.mensagem).unwrap_or_default(),
            prioridade: g.prioridade,
            criado_em: g.criado_em,
        }
    }
}

impl Entidade for Comunicado {
    const STORAGE_KEY: &'static str = "cf_comunicados";
    const PREFIXO_ID: &'static str = "com";

    fn id(&self) -> &str {
        &self.id
    }

    fn igreja_id(&self) -> &str {
        &self.igreja_id
    }

    // Mais recentes primeiro
    fn ordenar(a: &Self, b: &Self, _hoje: NaiveDate) -> Ordering {
        b.criado_em.cmp(&a.criado_em)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aceita_mensagem_legada_e_prefere_conteudo() {
        let legado = r#"{"id":"c1","igrejaId":"igr_1","titulo":"Aviso",
            "mensagem":"Culto às 19h","criadoEm":"2026-10-01T12:00:00Z"}"#;
        let c: Comunicado = serde_json::from_str(legado).unwrap();
        assert_eq!(c.conteudo, "Culto às 19h");
        assert_eq!(c.prioridade, Prioridade::Normal);

        let ambos = r#"{"id":"c2","igrejaId":"igr_1","titulo":"Aviso","conteudo":"Novo",
            "mensagem":"Antigo","prioridade":"urgente","criadoEm":"2026-10-01T12:00:00Z"}"#;
        let c: Comunicado = serde_json::from_str(ambos).unwrap();
        assert_eq!(c.conteudo, "Novo");
        assert_eq!(c.prioridade, Prioridade::Urgente);
    }
}
