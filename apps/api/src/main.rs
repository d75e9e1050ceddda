mod analysis;
mod config;
mod errors;
mod extract;
mod learning;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;
mod store;
mod templates;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::MatchAnalyzer;
use crate::analysis::remote_scorer::{LlmMatchScorer, MatchScorer};
use crate::config::Config;
use crate::learning::VideoRecommender;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::file_store::FileResultStore;
use crate::store::session::SessionStore;

const VIDEO_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ProfileMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Remote scorer only when a real OpenAI key is configured
    let remote: Option<Arc<dyn MatchScorer>> = match &config.openai_api_key {
        Some(key) => {
            let llm = LlmClient::new(
                key.clone(),
                config.openai_base_url.clone(),
                config.remote_timeout,
            )?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(LlmMatchScorer(llm)))
        }
        None => None,
    };
    let analyzer = MatchAnalyzer::new(remote, config.remote_timeout);
    if !analyzer.has_remote() {
        warn!("OPENAI_API_KEY not set; every analysis uses the keyword scorer");
    }

    let videos = VideoRecommender::new(config.youtube_api_key.clone(), VIDEO_SEARCH_TIMEOUT)?;
    if config.youtube_api_key.is_none() {
        info!("YOUTUBE_API_KEY not set; learning resources use search-link placeholders");
    }

    let results = Arc::new(FileResultStore::new(config.results_dir.clone()));
    info!("Saving analyses under {}", results.dir().display());

    let state = AppState {
        analyzer,
        results,
        session_results: Arc::new(SessionStore::default()),
        videos,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the front-end host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
