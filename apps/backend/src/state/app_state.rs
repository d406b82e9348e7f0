use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::services::MatchEngine;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    pub config: AppConfig,
    /// Shared by every worker so per-match locks are process-wide
    pub engine: MatchEngine,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            engine: MatchEngine::new(&config),
            db: Some(db),
            config,
        }
    }

    /// Create a new AppState without a database connection (for testing)
    pub fn new_without_db(config: AppConfig) -> Self {
        Self {
            engine: MatchEngine::new(&config),
            db: None,
            config,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
