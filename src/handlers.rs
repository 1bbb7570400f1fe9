// src/handlers.rs

use axum::{
    routing::{get, post},
    Router,
};

use crate::{config::AppState, services::sessao_service::LOGIN_URL};

pub mod autenticacao;
pub mod crud;
pub mod igreja;
pub mod membros;

/// Todas as rotas da aplicação.
pub fn router(app_state: AppState) -> Router {
    // --- Rotas públicas ---
    let publicas = Router::new()
        .route("/", get(autenticacao::inicio))
        .route("/health", get(autenticacao::health))
        .route(
            LOGIN_URL,
            get(autenticacao::pagina_entrada).post(autenticacao::entrar),
        )
        .route("/sair", post(autenticacao::sair));

    // --- Área da igreja ---
    let rotas_igreja = Router::new()
        .route("/painel", get(igreja::painel))
        .route(
            "/comunicados",
            get(igreja::comunicados).post(igreja::criar_comunicado),
        )
        .route("/comunicados/excluir", post(igreja::excluir_comunicado))
        .route("/eventos", get(igreja::eventos).post(igreja::criar_evento))
        .route("/eventos/excluir", post(igreja::excluir_evento))
        .route(
            "/pagamentos",
            get(igreja::pagamentos).post(igreja::criar_pagamento),
        )
        .route("/pagamentos/excluir", post(igreja::excluir_pagamento))
        .route("/pedidos-oracao", get(igreja::pedidos))
        .route(
            "/pedidos-oracao/status",
            post(igreja::alternar_status_pedido),
        )
        .route("/fieis", get(igreja::fieis));

    // --- Área do membro ---
    let rotas_membros = Router::new()
        .route("/painel", get(membros::painel))
        .route("/comunicados", get(membros::comunicados))
        .route("/eventos", get(membros::eventos))
        .route("/pagamentos", get(membros::pagamentos))
        .route(
            "/pedidos-oracao",
            get(membros::pedidos).post(membros::enviar_pedido),
        )
        .route(
            "/perfil",
            get(membros::perfil).post(membros::salvar_perfil),
        );

    publicas
        .nest("/igreja", rotas_igreja)
        .nest("/membros", rotas_membros)
        .with_state(app_state)
}

#[cfg(test)]
pub(crate) mod testes {
    use std::{sync::Arc, time::Duration};

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;

    use crate::{config::AppState, db::MemoryStorage};

    pub struct Resposta {
        pub status: StatusCode,
        pub location: Option<String>,
        pub corpo: String,
    }

    pub fn app() -> Router {
        let state = AppState::com_storage(
            Arc::new(MemoryStorage::new()),
            "127.0.0.1:0",
            Duration::from_millis(3000),
        );
        super::router(state)
    }

    async fn enviar(app: &Router, req: Request<Body>) -> Resposta {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        Resposta {
            status,
            location,
            corpo: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    pub async fn get(app: &Router, uri: &str) -> Resposta {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        enviar(app, req).await
    }

    pub async fn post(app: &Router, uri: &str, corpo: &str) -> Resposta {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(corpo.to_string()))
            .unwrap();
        enviar(app, req).await
    }

    /// Lê o código de entrada no cartão da página de fiéis (sessão de igreja).
    pub async fn codigo_da_igreja(app: &Router) -> String {
        let resp = get(app, "/igreja/fieis").await;
        let marca = r#"id="codigo-igreja">"#;
        let inicio = resp.corpo.find(marca).expect("cartão com o código") + marca.len();
        let fim = resp.corpo[inicio..].find('<').expect("código sem fim");
        resp.corpo[inicio..inicio + fim].to_string()
    }
}
