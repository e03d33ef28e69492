// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::services::catalog::Catalog;
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub sessions: SessionManager,
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(session_ttl: Duration) -> Self {
        Self::with_catalog(session_ttl, Catalog::builtin())
    }

    pub fn with_catalog(session_ttl: Duration, catalog: Catalog) -> Self {
        Self { sessions: SessionManager::new(session_ttl), catalog }
    }
}
