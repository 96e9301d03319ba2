//! API server state

use std::sync::Arc;

use crate::database::DatabaseActor;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Persistence collaborator every handler delegates to
    pub db: Arc<dyn DatabaseActor>,
}

impl AppState {
    pub fn new(db: Arc<dyn DatabaseActor>) -> Self {
        Self { db }
    }
}
