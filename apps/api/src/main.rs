mod config;
mod db;
mod errors;
mod landing;
mod models;
mod routes;
mod schema;
mod state;
mod submission;
mod wizard;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::routes::build_router;
use crate::state::AppState;
use crate::submission::{InMemorySink, PgSink, SubmissionSink};

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

    info!("Starting Resumo API v{}", env!("CARGO_PKG_VERSION"));

    let sink: Arc<dyn SubmissionSink> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            info!("Submissions will be stored in PostgreSQL");
            Arc::new(PgSink::new(pool))
        }
        None => {
            info!("DATABASE_URL not set, submissions are kept in memory");
            Arc::new(InMemorySink::new())
        }
    };

    let app = build_router(AppState::new(sink))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
