// src/models/sessao.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

pub const SESSION_KEY: &str = "cf_sessao";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Papel {
    Igreja,
    Membro,
}

/// O registro de sessão guardado em `cf_sessao`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sessao {
    // Id do membro (ausente para o administrador da igreja)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub igreja_id: String,
    pub tipo: Papel,

    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub nome_igreja: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codigo_igreja: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logado_em: Option<DateTime<Utc>>,

    // Campos que não conhecemos continuam na sessão ao regravá-la
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

// Dados do formulário de entrada (nomes de campo iguais aos do HTML)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct EntradaPayload {
    #[serde(default)]
    pub tipo: String,

    #[validate(length(min = 2, message = "Informe seu nome."))]
    #[serde(default)]
    pub nome: String,

    #[serde(default)]
    pub email: String,

    // Só para a igreja
    #[serde(default)]
    pub nome_igreja: String,

    // Só para o membro
    #[serde(default)]
    pub codigo_igreja: String,
}
