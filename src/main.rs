use axum::Router;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use campusrent_ai::services::gemini::GeminiClient;
use campusrent_ai::{config, modules, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let gemini = GeminiClient::new()?;
    let state = AppState { gemini };

    let app = Router::new()
        .merge(modules::ai::routes::routes())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = config::server::bind_addr();
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
