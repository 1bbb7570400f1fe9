// src/common/relogio.rs

use std::time::Instant;

use chrono::{DateTime, Local, NaiveDate, Utc};

/// O "agora" de uma ação, lido uma vez e repassado adiante.
#[derive(Debug, Clone, Copy)]
pub struct Momento {
    // Carimbo gravado nos registros
    pub agora: DateTime<Utc>,
    // Data local usada em "próximo", "este mês" e ordenação
    pub hoje: NaiveDate,
    // Relógio monotônico dos toasts
    pub instante: Instant,
}

impl Momento {
    pub fn agora() -> Self {
        Self {
            agora: Utc::now(),
            hoje: Local::now().date_naive(),
            instante: Instant::now(),
        }
    }

    /// Momento fixo, para testes e para reconstituir uma data conhecida.
    pub fn em(agora: DateTime<Utc>, hoje: NaiveDate) -> Self {
        Self {
            agora,
            hoje,
            instante: Instant::now(),
        }
    }
}
