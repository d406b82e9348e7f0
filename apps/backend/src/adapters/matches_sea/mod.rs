//! SeaORM adapter for matches and their rounds - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{match_rounds, matches};
use crate::infra::db_errors::{MATCH_NOT_FOUND_PREFIX, OPTIMISTIC_LOCK_PREFIX};

pub mod dto;

pub use dto::{MatchCreate, MatchUpdate, RoundUpsert};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

fn match_not_found(match_id: i64) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!("{MATCH_NOT_FOUND_PREFIX}{match_id}"))
}

/// Apply an update guarded by lock_version, then refetch.
///
/// rows_affected == 0 means either the match is gone or someone else bumped
/// the version first; a follow-up lookup tells the two apart.
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    current_lock_version: i32,
    configure_update: F,
) -> Result<matches::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<matches::Entity>) -> sea_orm::UpdateMany<matches::Entity>,
{
    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(matches::Entity::update_many())
        .col_expr(matches::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            matches::Column::LockVersion,
            Expr::col(matches::Column::LockVersion).add(1),
        )
        .filter(matches::Column::Id.eq(id))
        .filter(matches::Column::LockVersion.eq(current_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let current = matches::Entity::find_by_id(id).one(conn).await?;
        return match current {
            Some(row) => Err(sea_orm::DbErr::Custom(format!(
                "{OPTIMISTIC_LOCK_PREFIX}{{\"expected\":{},\"actual\":{}}}",
                current_lock_version, row.lock_version
            ))),
            None => Err(match_not_found(id)),
        };
    }

    require_match(conn, id).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find_by_id(match_id).one(conn).await
}

/// Find match by ID or fail with a structured MATCH_NOT_FOUND error.
pub async fn require_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<matches::Model, sea_orm::DbErr> {
    find_by_id(conn, match_id)
        .await?
        .ok_or_else(|| match_not_found(match_id))
}

/// All rounds of a match in ascending round order.
pub async fn find_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<match_rounds::Model>, sea_orm::DbErr> {
    match_rounds::Entity::find()
        .filter(match_rounds::Column::MatchId.eq(match_id))
        .order_by_asc(match_rounds::Column::RoundNo)
        .all(conn)
        .await
}

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchCreate,
) -> Result<matches::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = matches::ActiveModel {
        id: NotSet,
        player1_id: Set(dto.player1_id),
        player2_id: Set(dto.player2_id),
        current_round: Set(1),
        score_player1: Set(0),
        score_player2: Set(0),
        status: Set(matches::MatchStatus::Playing),
        winner_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        finished_at: Set(None),
        lock_version: Set(1),
    };

    active.insert(conn).await
}

pub async fn update_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchUpdate,
) -> Result<matches::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, dto.id, dto.expected_version, |update| {
        update
            .col_expr(
                matches::Column::CurrentRound,
                Expr::val(dto.current_round).into(),
            )
            .col_expr(
                matches::Column::ScorePlayer1,
                Expr::val(dto.score_player1).into(),
            )
            .col_expr(
                matches::Column::ScorePlayer2,
                Expr::val(dto.score_player2).into(),
            )
            .col_expr(
                matches::Column::Status,
                Expr::val(dto.status.to_value()).into(),
            )
            .col_expr(matches::Column::WinnerId, Expr::val(dto.winner_id).into())
            .col_expr(
                matches::Column::FinishedAt,
                Expr::val(dto.finished_at).into(),
            )
    })
    .await
}

/// Write one round row, inserting it the first time it is seen.
///
/// Callers hold the match version; the unique (match_id, round_no) index
/// catches a concurrent first insert.
pub async fn upsert_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundUpsert,
) -> Result<match_rounds::Model, sea_orm::DbErr> {
    let existing = match_rounds::Entity::find()
        .filter(match_rounds::Column::MatchId.eq(dto.match_id))
        .filter(match_rounds::Column::RoundNo.eq(dto.round_no))
        .one(conn)
        .await?;

    match existing {
        Some(row) => {
            let mut active: match_rounds::ActiveModel = row.into();
            active.player1_move = Set(dto.player1_move);
            active.player1_moved_at = Set(dto.player1_moved_at);
            active.player2_move = Set(dto.player2_move);
            active.player2_moved_at = Set(dto.player2_moved_at);
            active.winner_id = Set(dto.winner_id);
            active.result = Set(dto.result);
            active.update(conn).await
        }
        None => {
            let active = match_rounds::ActiveModel {
                id: NotSet,
                match_id: Set(dto.match_id),
                round_no: Set(dto.round_no),
                player1_move: Set(dto.player1_move),
                player1_moved_at: Set(dto.player1_moved_at),
                player2_move: Set(dto.player2_move),
                player2_moved_at: Set(dto.player2_moved_at),
                winner_id: Set(dto.winner_id),
                result: Set(dto.result),
                created_at: Set(dto.created_at),
            };
            active.insert(conn).await
        }
    }
}
