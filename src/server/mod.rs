//! Web server exposing report section generation.
//!
//! A single POST endpoint accepts `{ section, context, customInstructions }`
//! and answers `{ section, sectionName, weatherData }`, or a 500 with
//! `{ error, details }`. OPTIONS is answered with permissive CORS headers.

mod handlers;
mod routes;

pub use routes::{create_router, MAX_BODY_BYTES};

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;
use crate::services::ReportService;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReportService>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::from_service(ReportService::from_config(config)?))
    }

    pub fn from_service(service: ReportService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Start the web server.
pub async fn serve(config: &Config, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(config)?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
