//! Match repository: the `MatchStore` capability and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::adapters::matches_sea as matches_adapter;
use crate::domain::{Match, MatchStatus, Move, PlayerMove, Resolution, Round, RoundOutcome, Score};
use crate::entities::match_rounds::{self, MoveKind};
use crate::entities::matches::{self, MatchStatus as DbMatchStatus};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

/// Load/save access to match state.
///
/// `save` is conditional on `Match::lock_version` still matching what is
/// stored; a stale write fails with `ConflictKind::OptimisticLock` and
/// leaves storage untouched. The returned match carries the new version.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn create(&self, player1_id: i64, player2_id: i64) -> Result<Match, DomainError>;

    async fn load(&self, match_id: i64) -> Result<Match, DomainError>;

    async fn save(&self, m: &Match) -> Result<Match, DomainError>;
}

/// `MatchStore` over any SeaORM connection or transaction.
pub struct SeaMatchStore<'c, C> {
    conn: &'c C,
}

impl<'c, C> SeaMatchStore<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<C: ConnectionTrait + Send + Sync> MatchStore for SeaMatchStore<'_, C> {
    async fn create(&self, player1_id: i64, player2_id: i64) -> Result<Match, DomainError> {
        let row = matches_adapter::create_match(
            self.conn,
            matches_adapter::MatchCreate::new(player1_id, player2_id),
        )
        .await?;
        match_from_rows(row, Vec::new())
    }

    async fn load(&self, match_id: i64) -> Result<Match, DomainError> {
        let row = matches_adapter::find_by_id(self.conn, match_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found"))
            })?;
        let rounds = matches_adapter::find_rounds(self.conn, match_id).await?;
        match_from_rows(row, rounds)
    }

    async fn save(&self, m: &Match) -> Result<Match, DomainError> {
        // Version check first: a losing writer must not touch the round row.
        let row = matches_adapter::update_match(self.conn, match_update(m)?).await?;

        if let Some(round) = m.latest_round() {
            matches_adapter::upsert_round(self.conn, round_upsert(m, round)?).await?;
        }

        let rounds = matches_adapter::find_rounds(self.conn, m.id).await?;
        match_from_rows(row, rounds)
    }
}

fn corrupt(what: &str, match_id: i64) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("Stored {what} out of range for match {match_id}"),
    )
}

fn to_i32<T: TryInto<i32>>(value: T, what: &str, match_id: i64) -> Result<i32, DomainError> {
    value.try_into().map_err(|_| corrupt(what, match_id))
}

pub(crate) fn move_to_db(mv: Move) -> MoveKind {
    match mv {
        Move::Rock => MoveKind::Rock,
        Move::Paper => MoveKind::Paper,
        Move::Scissors => MoveKind::Scissors,
    }
}

pub(crate) fn move_from_db(kind: MoveKind) -> Move {
    match kind {
        MoveKind::Rock => Move::Rock,
        MoveKind::Paper => Move::Paper,
        MoveKind::Scissors => Move::Scissors,
    }
}

fn status_to_db(status: MatchStatus) -> DbMatchStatus {
    match status {
        MatchStatus::Waiting => DbMatchStatus::Waiting,
        MatchStatus::Playing => DbMatchStatus::Playing,
        MatchStatus::Finished => DbMatchStatus::Finished,
    }
}

fn status_from_db(status: DbMatchStatus) -> MatchStatus {
    match status {
        DbMatchStatus::Waiting => MatchStatus::Waiting,
        DbMatchStatus::Playing => MatchStatus::Playing,
        DbMatchStatus::Finished => MatchStatus::Finished,
    }
}

fn match_update(m: &Match) -> Result<matches_adapter::MatchUpdate, DomainError> {
    Ok(matches_adapter::MatchUpdate {
        id: m.id,
        current_round: to_i32(m.current_round, "current_round", m.id)?,
        score_player1: i32::from(m.score.player1),
        score_player2: i32::from(m.score.player2),
        status: status_to_db(m.status),
        winner_id: m.winner,
        finished_at: m.finished_at,
        expected_version: m.lock_version,
    })
}

fn round_upsert(m: &Match, round: &Round) -> Result<matches_adapter::RoundUpsert, DomainError> {
    let [first, second] = &round.moves;
    Ok(matches_adapter::RoundUpsert {
        match_id: m.id,
        round_no: to_i32(round.round_no, "round_no", m.id)?,
        player1_move: first.as_ref().map(|pm| move_to_db(pm.mv)),
        player1_moved_at: first.as_ref().map(|pm| pm.moved_at),
        player2_move: second.as_ref().map(|pm| move_to_db(pm.mv)),
        player2_moved_at: second.as_ref().map(|pm| pm.moved_at),
        winner_id: m.round_winner(round),
        result: round.resolution.as_ref().map(|r| r.result.clone()),
        created_at: round.created_at,
    })
}

fn player_move(
    mv: Option<MoveKind>,
    moved_at: Option<time::OffsetDateTime>,
    fallback_at: time::OffsetDateTime,
) -> Option<PlayerMove> {
    mv.map(|kind| PlayerMove {
        mv: move_from_db(kind),
        moved_at: moved_at.unwrap_or(fallback_at),
    })
}

fn round_from_row(row: match_rounds::Model, players: [i64; 2]) -> Result<Round, DomainError> {
    let round_no = u32::try_from(row.round_no).map_err(|_| corrupt("round_no", row.match_id))?;
    let moves = [
        player_move(row.player1_move, row.player1_moved_at, row.created_at),
        player_move(row.player2_move, row.player2_moved_at, row.created_at),
    ];

    let resolution = match (&moves, row.result) {
        ([Some(_), Some(_)], Some(result)) => {
            let outcome = match row.winner_id {
                None => RoundOutcome::Tie,
                Some(id) if id == players[0] => RoundOutcome::FirstWins,
                Some(id) if id == players[1] => RoundOutcome::SecondWins,
                Some(_) => return Err(corrupt("round winner", row.match_id)),
            };
            Some(Resolution { outcome, result })
        }
        _ => None,
    };

    Ok(Round {
        round_no,
        moves,
        resolution,
        created_at: row.created_at,
    })
}

/// Rebuild the domain match from its row and round rows.
pub fn match_from_rows(
    row: matches::Model,
    rounds: Vec<match_rounds::Model>,
) -> Result<Match, DomainError> {
    let players = [row.player1_id, row.player2_id];
    let score = Score {
        player1: u8::try_from(row.score_player1).map_err(|_| corrupt("score", row.id))?,
        player2: u8::try_from(row.score_player2).map_err(|_| corrupt("score", row.id))?,
    };
    let current_round =
        u32::try_from(row.current_round).map_err(|_| corrupt("current_round", row.id))?;
    let rounds = rounds
        .into_iter()
        .map(|r| round_from_row(r, players))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Match {
        id: row.id,
        players,
        rounds,
        current_round,
        score,
        status: status_from_db(row.status),
        winner: row.winner_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
        finished_at: row.finished_at,
        lock_version: row.lock_version,
    })
}
