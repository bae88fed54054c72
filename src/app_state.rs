use crate::cli::CommandLineArgs;
use crate::error::ClimateError;
use crate::query::QueryEngine;
use crate::store::{InMemoryStore, ObservationStore};

use std::sync::Arc;

/// Shared application state passed to each request handler.
pub struct AppState {
    /// Query engine over the observation data loaded at startup.
    pub engine: QueryEngine<InMemoryStore>,
}

impl AppState {
    /// Create and return an [AppState] over an already loaded store.
    pub fn new(store: InMemoryStore) -> Self {
        Self {
            engine: QueryEngine::new(store),
        }
    }

    /// Load the observation data named by the command line arguments and return an [AppState].
    pub fn load(args: &CommandLineArgs) -> Result<Self, ClimateError> {
        let store = InMemoryStore::from_csv(&args.stations_file, &args.measurements_file)?;
        if store.all_measurements().is_empty() {
            tracing::warn!("no measurements loaded; queries will be unavailable");
        }
        Ok(Self::new(store))
    }
}

/// AppState wrapped in an Atomic Reference Count (Arc) to allow multiple references.
pub type SharedAppState = Arc<AppState>;
