//! DTOs for matches_sea adapter.

use time::OffsetDateTime;

use crate::entities::match_rounds::MoveKind;
use crate::entities::matches::MatchStatus;

/// DTO for creating a new match between two existing players.
#[derive(Debug, Clone)]
pub struct MatchCreate {
    pub player1_id: i64,
    pub player2_id: i64,
}

impl MatchCreate {
    pub fn new(player1_id: i64, player2_id: i64) -> Self {
        Self {
            player1_id,
            player2_id,
        }
    }
}

/// Full rewrite of the mutable match columns, guarded by `expected_version`.
///
/// All columns are written together with a single version increment.
#[derive(Debug, Clone)]
pub struct MatchUpdate {
    pub id: i64,
    pub current_round: i32,
    pub score_player1: i32,
    pub score_player2: i32,
    pub status: MatchStatus,
    pub winner_id: Option<i64>,
    pub finished_at: Option<OffsetDateTime>,
    pub expected_version: i32,
}

/// Insert-or-update payload for one round row, keyed by (match_id, round_no).
#[derive(Debug, Clone)]
pub struct RoundUpsert {
    pub match_id: i64,
    pub round_no: i32,
    pub player1_move: Option<MoveKind>,
    pub player1_moved_at: Option<OffsetDateTime>,
    pub player2_move: Option<MoveKind>,
    pub player2_moved_at: Option<OffsetDateTime>,
    pub winner_id: Option<i64>,
    pub result: Option<String>,
    pub created_at: OffsetDateTime,
}
