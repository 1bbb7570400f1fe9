// src/models/entidade.rs

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};

/// O que todo registro persistido precisa ter para passar pelo `Repository`.
pub trait Entidade: Serialize + DeserializeOwned + Clone {
    /// Chave do armazenamento onde fica o array com todas as igrejas misturadas.
    const STORAGE_KEY: &'static str;

    /// Prefixo dos ids gerados ("com", "evt", ...).
    const PREFIXO_ID: &'static str;

    fn id(&self) -> &str;

    fn igreja_id(&self) -> &str;

    /// Ordem de exibição das listas da igreja. `hoje` só importa para eventos.
    fn ordenar(a: &Self, b: &Self, hoje: NaiveDate) -> Ordering;
}
