use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Players {
    Table,
    Id,
    Name,
    Wins,
    Losses,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
    Player1Id,
    Player2Id,
    CurrentRound,
    ScorePlayer1,
    ScorePlayer2,
    Status,
    WinnerId,
    CreatedAt,
    UpdatedAt,
    FinishedAt,
    LockVersion,
}

#[derive(Iden)]
enum MatchRounds {
    Table,
    Id,
    MatchId,
    RoundNo,
    Player1Move,
    Player1MovedAt,
    Player2Move,
    Player2MovedAt,
    WinnerId,
    Result,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // players
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Players::Name).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Players::Wins)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Players::Losses)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Players::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("players_name_key")
                    .table(Players::Table)
                    .col(Players::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // matches
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Matches::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Matches::Player1Id).big_integer().not_null())
                    .col(ColumnDef::new(Matches::Player2Id).big_integer().not_null())
                    .col(
                        ColumnDef::new(Matches::CurrentRound)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Matches::ScorePlayer1)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Matches::ScorePlayer2)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Matches::Status)
                            .string_len(16)
                            .not_null()
                            .default("playing"),
                    )
                    .col(ColumnDef::new(Matches::WinnerId).big_integer().null())
                    .col(
                        ColumnDef::new(Matches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::FinishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Matches::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_player1_id")
                            .from(Matches::Table, Matches::Player1Id)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_player2_id")
                            .from(Matches::Table, Matches::Player2Id)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_winner_id")
                            .from(Matches::Table, Matches::WinnerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_matches_status")
                    .table(Matches::Table)
                    .col(Matches::Status)
                    .to_owned(),
            )
            .await?;

        // match_rounds
        manager
            .create_table(
                Table::create()
                    .table(MatchRounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MatchRounds::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(MatchRounds::MatchId).big_integer().not_null())
                    .col(ColumnDef::new(MatchRounds::RoundNo).integer().not_null())
                    .col(ColumnDef::new(MatchRounds::Player1Move).string_len(16).null())
                    .col(
                        ColumnDef::new(MatchRounds::Player1MovedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(MatchRounds::Player2Move).string_len(16).null())
                    .col(
                        ColumnDef::new(MatchRounds::Player2MovedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(MatchRounds::WinnerId).big_integer().null())
                    .col(ColumnDef::new(MatchRounds::Result).text().null())
                    .col(
                        ColumnDef::new(MatchRounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_rounds_match_id")
                            .from(MatchRounds::Table, MatchRounds::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("match_rounds_match_id_round_no_key")
                    .table(MatchRounds::Table)
                    .col(MatchRounds::MatchId)
                    .col(MatchRounds::RoundNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("match_rounds_match_id_round_no_key")
                    .table(MatchRounds::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(MatchRounds::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_matches_status")
                    .table(Matches::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Matches::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("players_name_key")
                    .table(Players::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await?;

        Ok(())
    }
}
