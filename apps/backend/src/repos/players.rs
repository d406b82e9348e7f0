//! Player repository: registry lookups and the win/loss aggregate updates.

use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::players_sea as players_adapter;
use crate::entities::players;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Player domain model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl TryFrom<players::Model> for Player {
    type Error = DomainError;

    fn try_from(row: players::Model) -> Result<Self, Self::Error> {
        let counter = |v: i32| {
            u32::try_from(v).map_err(|_| {
                DomainError::infra(
                    InfraErrorKind::DataCorruption,
                    format!("Negative win/loss counter for player {}", row.id),
                )
            })
        };
        Ok(Self {
            id: row.id,
            wins: counter(row.wins)?,
            losses: counter(row.losses)?,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Registration and lookup of players by id or normalized name.
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    /// Insert a player; `name` must already be normalized.
    async fn register(&self, name: &str) -> Result<Player, DomainError>;

    async fn find(&self, player_id: i64) -> Result<Option<Player>, DomainError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Player>, DomainError>;
}

/// Per-player aggregate counters touched when a match finishes.
///
/// Each call adds exactly one; implementations must not lose increments
/// under concurrent finishes of different matches.
#[async_trait]
pub trait PlayerRecords: Send + Sync {
    async fn increment_wins(&self, player_id: i64) -> Result<(), DomainError>;

    async fn increment_losses(&self, player_id: i64) -> Result<(), DomainError>;

    /// Book a finished match: one win and one loss.
    ///
    /// Either both counters move or neither does. The default leans on the
    /// caller's transaction for that; stores without one must override it.
    async fn record_result(&self, winner_id: i64, loser_id: i64) -> Result<(), DomainError> {
        self.increment_wins(winner_id).await?;
        self.increment_losses(loser_id).await
    }
}

/// Player capabilities over any SeaORM connection or transaction.
pub struct SeaPlayers<'c, C> {
    conn: &'c C,
}

impl<'c, C> SeaPlayers<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C: ConnectionTrait + Send + Sync> PlayerDirectory for SeaPlayers<'_, C> {
    async fn register(&self, name: &str) -> Result<Player, DomainError> {
        let row =
            players_adapter::create_player(self.conn, players_adapter::PlayerCreate::new(name))
                .await?;
        Player::try_from(row)
    }

    async fn find(&self, player_id: i64) -> Result<Option<Player>, DomainError> {
        players_adapter::find_by_id(self.conn, player_id)
            .await?
            .map(Player::try_from)
            .transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Player>, DomainError> {
        players_adapter::find_by_name(self.conn, name)
            .await?
            .map(Player::try_from)
            .transpose()
    }
}

#[async_trait]
impl<C: ConnectionTrait + Send + Sync> PlayerRecords for SeaPlayers<'_, C> {
    async fn increment_wins(&self, player_id: i64) -> Result<(), DomainError> {
        players_adapter::increment_wins(self.conn, player_id).await?;
        Ok(())
    }

    async fn increment_losses(&self, player_id: i64) -> Result<(), DomainError> {
        players_adapter::increment_losses(self.conn, player_id).await?;
        Ok(())
    }
}
