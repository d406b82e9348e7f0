//! Player domain service.

use serde::Serialize;
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::players::{Player, PlayerDirectory};

pub const MIN_NAME_CHARS: usize = 2;
pub const MAX_NAME_CHARS: usize = 50;

/// Trim, NFKC-normalize and lowercase a requested player name.
pub fn normalize_player_name(raw: &str) -> Result<String, DomainError> {
    let name: String = raw.trim().nfkc().collect::<String>().to_lowercase();
    let len = name.chars().count();
    if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&len) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerName,
            format!(
                "Player name must be between {MIN_NAME_CHARS} and {MAX_NAME_CHARS} characters"
            ),
        ));
    }
    Ok(name)
}

/// Win percentage rounded to two decimals; 0 for a player with no finished matches.
pub fn win_rate(wins: u32, losses: u32) -> f64 {
    let total = u64::from(wins) + u64::from(losses);
    if total == 0 {
        return 0.0;
    }
    let pct = wins as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player: Player,
    pub total_matches: u32,
    pub win_rate: f64,
}

/// Player domain service.
pub struct PlayerService<'a, D: ?Sized> {
    directory: &'a D,
}

impl<'a, D: PlayerDirectory + ?Sized> PlayerService<'a, D> {
    pub fn new(directory: &'a D) -> Self {
        Self { directory }
    }

    pub async fn create_player(&self, raw_name: &str) -> Result<Player, DomainError> {
        let name = normalize_player_name(raw_name)?;
        if self.directory.find_by_name(&name).await?.is_some() {
            return Err(DomainError::conflict(
                ConflictKind::UniquePlayerName,
                format!("Player name '{name}' is already taken"),
            ));
        }

        let player = self.directory.register(&name).await?;
        info!(player_id = player.id, "Player registered");
        Ok(player)
    }

    pub async fn get_player(&self, player_id: i64) -> Result<Player, DomainError> {
        debug!(player_id, "Loading player");
        self.directory.find(player_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Player, format!("Player {player_id} not found"))
        })
    }

    pub async fn player_stats(&self, player_id: i64) -> Result<PlayerStats, DomainError> {
        let player = self.get_player(player_id).await?;
        Ok(PlayerStats {
            total_matches: player.wins.saturating_add(player.losses),
            win_rate: win_rate(player.wins, player.losses),
            player,
        })
    }
}
