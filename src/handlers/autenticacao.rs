// src/handlers/autenticacao.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Utc;
use serde_json::json;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{sessao::EntradaPayload, Papel},
    services::{formularios::ErrosFormulario, sessao_service::LOGIN_URL},
    views,
};

/// Painel inicial de cada papel.
pub fn painel_de(papel: Papel) -> &'static str {
    match papel {
        Papel::Igreja => "/igreja/painel",
        Papel::Membro => "/membros/painel",
    }
}

pub async fn inicio() -> Redirect {
    Redirect::to(LOGIN_URL)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn pagina_entrada() -> Html<String> {
    Html(views::entrada::pagina(
        &EntradaPayload::default(),
        &ErrosFormulario::default(),
    ))
}

// ---
// Handler: Entrar (igreja ou membro)
// ---
pub async fn entrar(
    State(app_state): State<AppState>,
    Form(payload): Form<EntradaPayload>,
) -> Result<Response, AppError> {
    match app_state.sessao_service.entrar(payload.clone(), Utc::now()) {
        Ok(sessao) => Ok(Redirect::to(painel_de(sessao.tipo)).into_response()),

        // Erros de formulário voltam para a mesma página, campo a campo
        Err(AppError::Validacao(errors)) => {
            let html = views::entrada::pagina(&payload, &ErrosFormulario::from(&errors));
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }

        Err(e) => Err(e),
    }
}

pub async fn sair(State(app_state): State<AppState>) -> Result<Redirect, AppError> {
    app_state.sessao_service.sair()?;
    Ok(Redirect::to(LOGIN_URL))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::handlers::testes::{app, get, post};
    use crate::services::sessao_service::LOGIN_URL;

    #[tokio::test]
    async fn raiz_redireciona_para_entrada() {
        let app = app();
        let resp = get(&app, "/").await;
        assert_eq!(resp.status, StatusCode::SEE_OTHER);
        assert_eq!(resp.location.as_deref(), Some(LOGIN_URL));
    }

    #[tokio::test]
    async fn igreja_entra_e_cai_no_painel() {
        let app = app();
        let resp = post(
            &app,
            LOGIN_URL,
            "tipo=igreja&nome=Pastor+Jo%C3%A3o&nome_igreja=Igreja+Central",
        )
        .await;
        assert_eq!(resp.status, StatusCode::SEE_OTHER);
        assert_eq!(resp.location.as_deref(), Some("/igreja/painel"));

        let painel = get(&app, "/igreja/painel").await;
        assert_eq!(painel.status, StatusCode::OK);
        assert!(painel.corpo.contains("Bem-vindo, Pastor!"));
    }

    #[tokio::test]
    async fn codigo_desconhecido_volta_com_erro_no_campo() {
        let app = app();
        let resp = post(
            &app,
            LOGIN_URL,
            "tipo=membro&nome=Ana&email=ana%40ex.com&codigo_igreja=ZZZZZZ",
        )
        .await;
        assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(resp.corpo.contains("Nenhuma igreja encontrada com esse código."));
        assert!(resp.corpo.contains(r#"value="ZZZZZZ""#));
    }

    #[tokio::test]
    async fn sair_apaga_a_sessao() {
        let app = app();
        post(&app, LOGIN_URL, "tipo=igreja&nome=Ana&nome_igreja=Central").await;

        let resp = post(&app, "/sair", "").await;
        assert_eq!(resp.location.as_deref(), Some(LOGIN_URL));

        let painel = get(&app, "/igreja/painel").await;
        assert_eq!(painel.status, StatusCode::SEE_OTHER);
        assert_eq!(painel.location.as_deref(), Some(LOGIN_URL));
    }

    #[tokio::test]
    async fn health_responde_ok() {
        let resp = get(&app(), "/health").await;
        assert_eq!(resp.status, StatusCode::OK);
        assert!(resp.corpo.contains("ok"));
    }
}
