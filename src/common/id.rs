// src/common/id.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// Sufixo aleatório em base 36, tirado dos bits de um UUID v4
fn sufixo_aleatorio(tamanho: usize) -> String {
    let mut n = Uuid::new_v4().as_u128();
    let mut out = String::with_capacity(tamanho);
    for _ in 0..tamanho {
        out.push(BASE36[(n % 36) as usize] as char);
        n /= 36;
    }
    out
}

/// Gera um id no formato `<prefixo>_<milissegundos>_<6 caracteres>`.
pub fn gerar_id(prefixo: &str, agora: DateTime<Utc>) -> String {
    format!("{}_{}_{}", prefixo, agora.timestamp_millis(), sufixo_aleatorio(6))
}

/// Como `gerar_id`, mas sorteia de novo enquanto o id já existir na coleção.
pub fn gerar_id_unico<F>(prefixo: &str, agora: DateTime<Utc>, ja_existe: F) -> String
where
    F: Fn(&str) -> bool,
{
    loop {
        let id = gerar_id(prefixo, agora);
        if !ja_existe(&id) {
            return id;
        }
        tracing::debug!("Colisão de id {}, sorteando outro", id);
    }
}

/// Código curto que os membros usam para entrar na igreja (ex.: "K7Q2XA").
pub fn gerar_codigo_igreja() -> String {
    sufixo_aleatorio(6).to_uppercase()
}
