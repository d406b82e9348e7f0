//! In-process implementations of the repository capabilities.
//!
//! Backed by `DashMap`, so a single store can be shared across tasks. Used
//! by engine tests and anywhere a database would be overkill. Writes are not
//! transactional across calls; the SeaORM path gets that from `with_txn`.
//! Instead `create` enforces what the foreign keys enforce in SQL, and
//! `record_result` touches both counters or neither.

use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use time::OffsetDateTime;

use crate::domain::{Match, MatchStatus, Score};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::matches::MatchStore;
use crate::repos::players::{Player, PlayerDirectory, PlayerRecords};

#[derive(Default)]
struct Inner {
    matches: DashMap<i64, Match>,
    players: DashMap<i64, Player>,
    names: DashSet<String>,
    next_match_id: AtomicI64,
    next_player_id: AtomicI64,
    injected_conflicts: AtomicU32,
}

/// Shared in-memory store; clones see the same data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` saves fail with an optimistic-lock conflict.
    pub fn inject_save_conflicts(&self, n: u32) {
        self.inner.injected_conflicts.store(n, Ordering::SeqCst);
    }

    /// Current stored snapshot of a match, bypassing the trait.
    pub fn snapshot(&self, match_id: i64) -> Option<Match> {
        self.inner.matches.get(&match_id).map(|m| m.clone())
    }

    pub fn player(&self, player_id: i64) -> Option<Player> {
        self.inner.players.get(&player_id).map(|p| p.clone())
    }

    fn take_injected_conflict(&self) -> bool {
        self.inner
            .injected_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn require_player(&self, player_id: i64) -> Result<(), DomainError> {
        if self.inner.players.contains_key(&player_id) {
            Ok(())
        } else {
            Err(player_not_found(player_id))
        }
    }

    fn bump(&self, player_id: i64, f: impl FnOnce(&mut Player)) -> Result<(), DomainError> {
        let mut player = self
            .inner
            .players
            .get_mut(&player_id)
            .ok_or_else(|| player_not_found(player_id))?;
        f(&mut player);
        player.updated_at = OffsetDateTime::now_utc();
        Ok(())
    }
}

fn player_not_found(player_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Player, format!("Player {player_id} not found"))
}

#[async_trait]
impl MatchStore for InMemoryStore {
    async fn create(&self, player1_id: i64, player2_id: i64) -> Result<Match, DomainError> {
        if player1_id == player2_id {
            return Err(DomainError::validation(
                ValidationKind::SamePlayerMatch,
                "A player cannot play against themselves",
            ));
        }
        self.require_player(player1_id)?;
        self.require_player(player2_id)?;

        let id = self.inner.next_match_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = OffsetDateTime::now_utc();
        let m = Match {
            id,
            players: [player1_id, player2_id],
            rounds: Vec::new(),
            current_round: 1,
            score: Score::default(),
            status: MatchStatus::Playing,
            winner: None,
            created_at: now,
            updated_at: now,
            finished_at: None,
            lock_version: 1,
        };
        self.inner.matches.insert(id, m.clone());
        Ok(m)
    }

    async fn load(&self, match_id: i64) -> Result<Match, DomainError> {
        self.snapshot(match_id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found"))
        })
    }

    async fn save(&self, m: &Match) -> Result<Match, DomainError> {
        match self.inner.matches.entry(m.id) {
            Entry::Vacant(_) => Err(DomainError::not_found(
                NotFoundKind::Match,
                format!("Match {} not found", m.id),
            )),
            Entry::Occupied(mut slot) => {
                let stored = slot.get().lock_version;
                if stored != m.lock_version || self.take_injected_conflict() {
                    return Err(DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Match was modified concurrently (expected version {}, actual version {}). Please retry.",
                            m.lock_version, stored
                        ),
                    ));
                }
                let mut saved = m.clone();
                saved.lock_version = stored + 1;
                saved.updated_at = OffsetDateTime::now_utc();
                slot.insert(saved.clone());
                Ok(saved)
            }
        }
    }
}

#[async_trait]
impl PlayerDirectory for InMemoryStore {
    async fn register(&self, name: &str) -> Result<Player, DomainError> {
        // Claiming the name is the uniqueness check
        if !self.inner.names.insert(name.to_string()) {
            return Err(DomainError::conflict(
                ConflictKind::UniquePlayerName,
                "Player name already taken",
            ));
        }
        let id = self.inner.next_player_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = OffsetDateTime::now_utc();
        let player = Player {
            id,
            name: name.to_string(),
            wins: 0,
            losses: 0,
            created_at: now,
            updated_at: now,
        };
        self.inner.players.insert(id, player.clone());
        Ok(player)
    }

    async fn find(&self, player_id: i64) -> Result<Option<Player>, DomainError> {
        Ok(self.player(player_id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Player>, DomainError> {
        Ok(self
            .inner
            .players
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.clone()))
    }
}

#[async_trait]
impl PlayerRecords for InMemoryStore {
    async fn increment_wins(&self, player_id: i64) -> Result<(), DomainError> {
        self.bump(player_id, |p| p.wins += 1)
    }

    async fn increment_losses(&self, player_id: i64) -> Result<(), DomainError> {
        self.bump(player_id, |p| p.losses += 1)
    }

    async fn record_result(&self, winner_id: i64, loser_id: i64) -> Result<(), DomainError> {
        // Players are never removed, so both bumps succeed once both exist
        self.require_player(winner_id)?;
        self.require_player(loser_id)?;
        self.bump(winner_id, |p| p.wins += 1)?;
        self.bump(loser_id, |p| p.losses += 1)
    }
}
