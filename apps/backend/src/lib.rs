pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use listening_core::{Catalog, SpeechSynthesizer};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::sessions::{spawn_idle_sweep, SessionStore};
use crate::services::speech::GoogleTranslateTts;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub catalog: Arc<Catalog>,
    pub speech: Arc<dyn SpeechSynthesizer>,
}

impl AppState {
    pub fn new(catalog: Catalog, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new()),
            catalog: Arc::new(catalog),
            speech,
        }
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    let session_routes = Router::new()
        .route("/api/sessions", post(routes::sessions::start))
        .route(
            "/api/sessions/:id",
            get(routes::sessions::get).delete(routes::sessions::finish),
        )
        .route("/api/sessions/:id/level", put(routes::sessions::update_level))
        .route("/api/sessions/:id/history", get(routes::sessions::history))
        .route("/api/sessions/:id/attempts", post(routes::sessions::record_attempt))
        // Drill routes
        .route("/api/sessions/:id/sentence/next", post(routes::drills::next_sentence))
        .route("/api/sessions/:id/sentence/check", post(routes::drills::check_sentence))
        .route("/api/sessions/:id/phonetic/next", post(routes::drills::next_word))
        .route("/api/sessions/:id/phonetic/check", post(routes::drills::check_word));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/score", post(routes::scoring::score))
        .route("/api/diff", post(routes::scoring::diff))
        .route("/api/catalog/:level", get(routes::catalog::get_level))
        .route("/api/speech", post(routes::speech::synthesize))
        .merge(session_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let catalog = match &config.catalog_path {
        Some(path) => {
            tracing::info!("Loading catalog from {}", path.display());
            Catalog::load(path)?
        }
        None => {
            tracing::info!("Using bundled catalog");
            Catalog::builtin()?
        }
    };

    let speech = Arc::new(GoogleTranslateTts::new(config.tts.clone()));
    tracing::info!("Speech provider: {}", speech.name());

    let state = AppState::new(catalog, speech);
    if let Some(max_idle) = config.session_idle() {
        tracing::info!("Sessions expire after {}s idle", max_idle.as_secs());
        spawn_idle_sweep(state.sessions.clone(), max_idle);
    }

    let app = router(state);

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
