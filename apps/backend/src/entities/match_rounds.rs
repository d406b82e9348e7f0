use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum MoveKind {
    #[sea_orm(string_value = "rock")]
    Rock,
    #[sea_orm(string_value = "paper")]
    Paper,
    #[sea_orm(string_value = "scissors")]
    Scissors,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "match_rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "match_id")]
    pub match_id: i64,
    #[sea_orm(column_name = "round_no")]
    pub round_no: i32,
    #[sea_orm(column_name = "player1_move")]
    pub player1_move: Option<MoveKind>,
    #[sea_orm(column_name = "player1_moved_at")]
    pub player1_moved_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "player2_move")]
    pub player2_move: Option<MoveKind>,
    #[sea_orm(column_name = "player2_moved_at")]
    pub player2_moved_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "winner_id")]
    pub winner_id: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub result: Option<String>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id"
    )]
    Match,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Match.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
