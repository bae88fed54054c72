//! This file defines the climate-api binary entry point.

use climate_api::app;
use climate_api::app_state::AppState;
use climate_api::cli;
use climate_api::metrics;
use climate_api::server;
use climate_api::tracing;

use std::process::exit;
use std::sync::Arc;

/// Application entry point
#[tokio::main]
async fn main() {
    let args = cli::parse();
    tracing::init_tracing();
    ::tracing::debug!(?args, "parsed arguments");
    metrics::register_metrics();
    let state = match AppState::load(&args) {
        Ok(state) => Arc::new(state),
        Err(err) => {
            ::tracing::error!("{}", err);
            if let Some(source) = std::error::Error::source(&err) {
                ::tracing::error!("Caused by: {}", source);
            }
            exit(1)
        }
    };
    let service = app::service(state);
    server::serve(&args, service).await;
}
