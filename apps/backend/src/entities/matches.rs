use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum MatchStatus {
    #[sea_orm(string_value = "waiting")]
    Waiting,
    #[sea_orm(string_value = "playing")]
    Playing,
    #[sea_orm(string_value = "finished")]
    Finished,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "player1_id")]
    pub player1_id: i64,
    #[sea_orm(column_name = "player2_id")]
    pub player2_id: i64,
    #[sea_orm(column_name = "current_round")]
    pub current_round: i32,
    #[sea_orm(column_name = "score_player1")]
    pub score_player1: i32,
    #[sea_orm(column_name = "score_player2")]
    pub score_player2: i32,
    pub status: MatchStatus,
    #[sea_orm(column_name = "winner_id")]
    pub winner_id: Option<i64>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "finished_at")]
    pub finished_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::match_rounds::Entity")]
    MatchRounds,
}

impl Related<super::match_rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatchRounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
