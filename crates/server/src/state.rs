//! Shared application state

use std::sync::Arc;

use s3b_core::{Config, SessionManager, StoreConnector};

/// State cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state whose sessions connect through `connector`
    pub fn new(config: Config, connector: Arc<dyn StoreConnector>) -> Self {
        let sessions = SessionManager::new(connector, config.session.clone());
        Self {
            sessions: Arc::new(sessions),
            config: Arc::new(config),
        }
    }
}
