// src/main.rs

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use congrega_fiel::{config::AppState, handlers};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Nível de log vem de RUST_LOG; sem ele, "info".
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new().context("Falha ao inicializar o estado da aplicação.")?;
    let endereco = app_state.endereco.clone();

    let app = handlers::router(app_state);

    let listener = TcpListener::bind(&endereco)
        .await
        .with_context(|| format!("Falha ao escutar em {}", endereco))?;
    tracing::info!("🚀 Congrega Fiel em http://{}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;
    Ok(())
}
