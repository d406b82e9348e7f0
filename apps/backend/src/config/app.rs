use std::env;
use std::time::Duration;

use crate::error::AppError;

/// Default number of attempts for one move submission under optimistic conflicts.
pub const DEFAULT_SUBMIT_MAX_ATTEMPTS: u32 = 3;
/// Pause before retrying a conflicted submission.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(10);

/// Engine-level settings read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub submit_max_attempts: u32,
    pub retry_backoff: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            submit_max_attempts: DEFAULT_SUBMIT_MAX_ATTEMPTS,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();
        if let Ok(raw) = env::var("MATCH_SUBMIT_MAX_ATTEMPTS") {
            config.submit_max_attempts = parse_attempts(&raw)?;
        }
        Ok(config)
    }

    pub fn with_submit_max_attempts(mut self, attempts: u32) -> Self {
        self.submit_max_attempts = attempts.max(1);
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }
}

fn parse_attempts(raw: &str) -> Result<u32, AppError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(AppError::config(format!(
            "MATCH_SUBMIT_MAX_ATTEMPTS must be a positive integer, got '{raw}'"
        ))),
    }
}
