//! SeaORM adapter for players - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::players;
use crate::infra::db_errors::PLAYER_NOT_FOUND_PREFIX;

pub mod dto;

pub use dto::PlayerCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

fn player_not_found(player_id: i64) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!("{PLAYER_NOT_FOUND_PREFIX}{player_id}"))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::Name.eq(name))
        .one(conn)
        .await
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerCreate,
) -> Result<players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = players::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        wins: Set(0),
        losses: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };

    active.insert(conn).await
}

/// Add one to a counter column in place so concurrent matches never lose an update.
async fn bump_counter<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    column: players::Column,
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = players::Entity::update_many()
        .col_expr(column, Expr::col(column).add(1))
        .col_expr(players::Column::UpdatedAt, Expr::val(now).into())
        .filter(players::Column::Id.eq(player_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(player_not_found(player_id));
    }
    Ok(())
}

pub async fn increment_wins<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<(), sea_orm::DbErr> {
    bump_counter(conn, player_id, players::Column::Wins).await
}

pub async fn increment_losses<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<(), sea_orm::DbErr> {
    bump_counter(conn, player_id, players::Column::Losses).await
}
