// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::common::html::escape_html;
use crate::services::sessao_service::LOGIN_URL;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    Validacao(#[from] validator::ValidationErrors),

    // Sessão ausente, corrompida ou de outro papel
    #[error("Sessão inválida")]
    SessaoInvalida,

    // Falha ao gravar/ler o arquivo que faz o papel do localStorage
    #[error("Erro de armazenamento: {0}")]
    Armazenamento(#[from] std::io::Error),

    #[error("Erro de serialização: {0}")]
    Serializacao(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno: {0}")]
    Interno(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, mensagem) = match self {
            // Sessão inválida nunca mostra mensagem: só redireciona.
            AppError::SessaoInvalida => return Redirect::to(LOGIN_URL).into_response(),

            AppError::Validacao(errors) => {
                let mut campos: Vec<String> = errors
                    .field_errors()
                    .into_iter()
                    .map(|(campo, _)| campo.to_string())
                    .collect();
                campos.sort();
                let body = format!(
                    "Um ou mais campos são inválidos: {}",
                    escape_html(&campos.join(", "))
                );
                (StatusCode::BAD_REQUEST, body)
            }

            // Todos os outros erros viram 500; o detalhe fica só no log.
            ref e => {
                tracing::error!("Erro interno: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Html(format!(
            r#"<!DOCTYPE html><html lang="pt-BR"><body><main class="erro"><p>{}</p></main></body></html>"#,
            mensagem
        ));
        (status, body).into_response()
    }
}
