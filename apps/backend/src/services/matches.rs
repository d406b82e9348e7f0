//! Match creation and lookup.

use tracing::info;

use crate::domain::Match;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::{MatchStore, PlayerDirectory};

pub struct MatchService<'a, S: ?Sized, D: ?Sized> {
    store: &'a S,
    players: &'a D,
}

impl<'a, S, D> MatchService<'a, S, D>
where
    S: MatchStore + ?Sized,
    D: PlayerDirectory + ?Sized,
{
    pub fn new(store: &'a S, players: &'a D) -> Self {
        Self { store, players }
    }

    /// Start a best-of-five match between two distinct, existing players.
    pub async fn create_match(&self, player1_id: i64, player2_id: i64) -> Result<Match, DomainError> {
        if player1_id == player2_id {
            return Err(DomainError::validation(
                ValidationKind::SamePlayerMatch,
                "A player cannot play against themselves",
            ));
        }

        for player_id in [player1_id, player2_id] {
            if self.players.find(player_id).await?.is_none() {
                return Err(DomainError::not_found(
                    NotFoundKind::Player,
                    format!("Player {player_id} not found"),
                ));
            }
        }

        let m = self.store.create(player1_id, player2_id).await?;
        info!(match_id = m.id, player1_id, player2_id, "Match created");
        Ok(m)
    }

    pub async fn get_match(&self, match_id: i64) -> Result<Match, DomainError> {
        self.store.load(match_id).await
    }
}
