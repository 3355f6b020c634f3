mod api;
mod auth;
mod config;
mod dashboard;
mod errors;
mod http_client;
mod models;
mod pages;
mod progress;
mod recommendation;
mod recommender;
mod resource;
mod routes;
mod session;
mod state;
mod sync;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::RestApi;
use crate::config::Config;
use crate::http_client::HttpClient;
use crate::recommender::RecommenderClient;
use crate::routes::build_router;
use crate::session::{FileStorage, Session};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch web v{}", env!("CARGO_PKG_VERSION"));

    // Session storage (stands in for browser local storage)
    let storage = FileStorage::open(&config.session_file)?;
    let session = Session::new(Arc::new(storage));
    match session.current_user() {
        Some(user) => info!("Resuming session of user {}", user.id),
        None => info!("No stored session"),
    }

    // Upstream services
    let api_http = HttpClient::new(config.api_base_url.clone());
    info!("SkillMatch API at {}", api_http.base_url());
    let recommender_http = HttpClient::new(config.recommender_url.clone());
    info!("Recommendation service at {}", recommender_http.base_url());

    let api = RestApi::new(api_http);
    let recommender = RecommenderClient::new(recommender_http);

    let state = AppState::new(Arc::new(api), Arc::new(recommender), session);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("127.0.0.1:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
