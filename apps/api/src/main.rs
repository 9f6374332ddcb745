mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod render;
mod resumes;
mod routes;
mod state;
mod suggestions;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::llm_client::{CompletionService, DisabledCompletions, LlmClient};
use crate::render::PageGeometry;
use crate::resumes::PgResumeStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CVForge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and the resumes table
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;
    let store = Arc::new(PgResumeStore::new(db));

    // Initialize completion service (disabled without an API key)
    let completions: Arc<dyn CompletionService> = match &config.openai_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(client)
        }
        None => {
            warn!("OPENAI_API_KEY not set; AI suggestion endpoints will return 503");
            Arc::new(DisabledCompletions)
        }
    };

    let page_geometry = PageGeometry::a4();
    info!(
        "PDF export: {}x{}pt page, render timeout {}s",
        page_geometry.width, page_geometry.height, config.render_timeout_secs
    );

    // Build app state
    let state = AppState {
        store,
        completions,
        page_geometry,
        render_timeout: Duration::from_secs(config.render_timeout_secs),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
