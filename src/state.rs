use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::OrmConn,
    services::auth_service::{self, CredentialVerifier},
    session::SessionKeys,
    views::{ShellRenderer, ViewRenderer},
};

#[derive(Clone)]
pub struct AppState {
    pub orm: OrmConn,
    pub sessions: SessionKeys,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub views: Arc<dyn ViewRenderer>,
}

impl AppState {
    pub fn new(orm: OrmConn, config: &AppConfig) -> Self {
        Self {
            orm,
            sessions: SessionKeys::new(&config.session_secret, config.session_ttl_hours),
            credentials: auth_service::verifier_from_config(config),
            views: Arc::new(ShellRenderer),
        }
    }
}
