//! Serialized, retrying front door for move submission.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::match_flow;
use super::match_locks::MatchLocks;
use crate::config::AppConfig;
use crate::db::txn::with_txn;
use crate::domain::SubmitOutcome;
use crate::error::AppError;
use crate::repos::{MatchStore, PlayerRecords, SeaMatchStore, SeaPlayers};
use crate::state::app_state::AppState;

/// Runs submissions one-at-a-time per match and retries optimistic conflicts.
///
/// Each attempt starts from a fresh read; an attempt that fails for any
/// other reason is returned as-is.
#[derive(Clone)]
pub struct MatchEngine {
    locks: MatchLocks,
    max_attempts: u32,
    backoff: Duration,
}

impl MatchEngine {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            locks: MatchLocks::new(),
            max_attempts: config.submit_max_attempts.max(1),
            backoff: config.retry_backoff,
        }
    }

    pub fn locks(&self) -> &MatchLocks {
        &self.locks
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Hold `match_id`'s lock while running `attempt`, retrying on conflicts.
    pub async fn run_serialized<T, F, Fut>(&self, match_id: i64, mut attempt: F) -> Result<T, AppError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let _guard = self.locks.acquire(match_id).await;

        let mut tries = 1;
        loop {
            match attempt().await {
                Err(e) if e.is_optimistic_lock() && tries < self.max_attempts => {
                    warn!(
                        match_id,
                        attempt = tries,
                        max_attempts = self.max_attempts,
                        "Optimistic lock conflict; retrying submission"
                    );
                    tokio::time::sleep(self.backoff).await;
                    tries += 1;
                }
                other => return other,
            }
        }
    }

    /// Submit a move through the database, one transaction per attempt.
    pub async fn submit_move(
        &self,
        state: &AppState,
        match_id: i64,
        player_id: i64,
        raw_move: &str,
    ) -> Result<SubmitOutcome, AppError> {
        self.run_serialized(match_id, || {
            let raw_move = raw_move.to_owned();
            with_txn(state, move |txn| {
                Box::pin(async move {
                    let store = SeaMatchStore::new(txn);
                    let players = SeaPlayers::new(txn);
                    let outcome =
                        match_flow::submit_move(&store, &players, match_id, player_id, &raw_move)
                            .await?;
                    Ok(outcome)
                })
            })
        })
        .await
    }

    /// Submit a move against arbitrary store capabilities.
    pub async fn submit_move_with<S, P>(
        &self,
        store: &S,
        records: &P,
        match_id: i64,
        player_id: i64,
        raw_move: &str,
    ) -> Result<SubmitOutcome, AppError>
    where
        S: MatchStore + ?Sized,
        P: PlayerRecords + ?Sized,
    {
        self.run_serialized(match_id, || async move {
            let outcome =
                match_flow::submit_move(store, records, match_id, player_id, raw_move).await?;
            Ok(outcome)
        })
        .await
    }
}
