// Application state (AppState)

use crate::core::config::Config;
use crate::stores::{audit_log::AuditLog, session_store::SessionStore, user_store::UserStore};
use anyhow::{Context, Result};
use std::sync::Arc;

/// Shared application state
///
/// Contains the stores accessed by request handlers. All fields are wrapped
/// in Arc for efficient cloning across threads.
#[derive(Clone)]
pub struct AppState {
    /// File-backed user list, reloadable via the reset endpoint
    pub user_store: Arc<UserStore>,

    /// Active sessions keyed by cookie token
    pub sessions: Arc<SessionStore>,

    /// Append-only audit log
    pub audit: Arc<AuditLog>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the state, loading the user file. A missing or unparseable file
    /// is an error; at startup that is fatal.
    pub fn new(config: Config) -> Result<Self> {
        let user_store = UserStore::load(&config.data.users_file)
            .context("User data file is required at startup")?;

        Ok(Self {
            user_store: Arc::new(user_store),
            sessions: Arc::new(SessionStore::new()),
            audit: Arc::new(AuditLog::new()),
            config: Arc::new(config),
        })
    }
}
