// Repository-level tests for the matches adapter.
//
// Each test runs inside a single `with_txn`, so nothing leaks between
// tests even when the suite points at a shared database.

use rps_backend::adapters::matches_sea::{self, MatchCreate, MatchUpdate, RoundUpsert};
use rps_backend::adapters::players_sea::{self, PlayerCreate};
use rps_backend::db::txn::with_txn;
use rps_backend::entities::match_rounds::MoveKind;
use rps_backend::entities::matches::MatchStatus;
use rps_backend::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use rps_backend::AppError;
use rps_test_support::unique_helpers::unique_str;
use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;

use crate::support::test_state::build_test_state;

async fn seed_match(txn: &DatabaseTransaction) -> Result<(i64, i64, i64), AppError> {
    let p1 = players_sea::create_player(txn, PlayerCreate::new(unique_str("p1").to_lowercase()))
        .await?;
    let p2 = players_sea::create_player(txn, PlayerCreate::new(unique_str("p2").to_lowercase()))
        .await?;
    let m = matches_sea::create_match(txn, MatchCreate::new(p1.id, p2.id)).await?;
    Ok((m.id, p1.id, p2.id))
}

fn bump(id: i64, expected_version: i32, current_round: i32) -> MatchUpdate {
    MatchUpdate {
        id,
        current_round,
        score_player1: 0,
        score_player2: 0,
        status: MatchStatus::Playing,
        winner_id: None,
        finished_at: None,
        expected_version,
    }
}

fn round(match_id: i64, round_no: i32) -> RoundUpsert {
    RoundUpsert {
        match_id,
        round_no,
        player1_move: None,
        player1_moved_at: None,
        player2_move: None,
        player2_moved_at: None,
        winner_id: None,
        result: None,
        created_at: OffsetDateTime::now_utc(),
    }
}

#[tokio::test]
async fn created_match_starts_playing_at_version_one() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let (match_id, p1, p2) = seed_match(txn).await?;
            let row = matches_sea::require_match(txn, match_id).await?;

            assert_eq!((row.player1_id, row.player2_id), (p1, p2));
            assert_eq!(row.status, MatchStatus::Playing);
            assert_eq!(row.current_round, 1);
            assert_eq!((row.score_player1, row.score_player2), (0, 0));
            assert_eq!(row.lock_version, 1);
            assert!(row.winner_id.is_none());
            assert!(matches_sea::find_rounds(txn, match_id).await?.is_empty());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_bumps_version_and_stale_update_conflicts() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let (match_id, _, _) = seed_match(txn).await?;

            let updated = matches_sea::update_match(txn, bump(match_id, 1, 2)).await?;
            assert_eq!(updated.lock_version, 2);
            assert_eq!(updated.current_round, 2);

            let err = matches_sea::update_match(txn, bump(match_id, 1, 7))
                .await
                .unwrap_err();
            match DomainError::from(err) {
                DomainError::Conflict(ConflictKind::OptimisticLock, detail) => {
                    assert!(detail.contains("expected version 1"), "{detail}");
                    assert!(detail.contains("actual version 2"), "{detail}");
                }
                other => panic!("expected OptimisticLock, got: {other:?}"),
            }

            // The losing write left the row alone
            let row = matches_sea::require_match(txn, match_id).await?;
            assert_eq!((row.current_round, row.lock_version), (2, 2));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_of_missing_match_is_not_found() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let err = matches_sea::update_match(txn, bump(999_999_999, 1, 2))
                .await
                .unwrap_err();
            assert_eq!(
                DomainError::from(err),
                DomainError::not_found(NotFoundKind::Match, "Match 999999999 not found")
            );

            let err = matches_sea::require_match(txn, 999_999_999).await.unwrap_err();
            assert!(matches!(
                DomainError::from(err),
                DomainError::NotFound(NotFoundKind::Match, _)
            ));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn finishing_update_persists_winner() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let (match_id, p1, _) = seed_match(txn).await?;
            let now = OffsetDateTime::now_utc();
            let dto = MatchUpdate {
                score_player1: 3,
                status: MatchStatus::Finished,
                winner_id: Some(p1),
                finished_at: Some(now),
                ..bump(match_id, 1, 3)
            };
            let row = matches_sea::update_match(txn, dto).await?;

            assert_eq!(row.status, MatchStatus::Finished);
            assert_eq!(row.winner_id, Some(p1));
            assert_eq!(row.score_player1, 3);
            assert!(row.finished_at.is_some());
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn round_upsert_inserts_then_updates_in_place() -> Result<(), AppError> {
    let state = build_test_state().await?;

    with_txn(&state, |txn| {
        Box::pin(async move {
            let (match_id, _, p2) = seed_match(txn).await?;
            let now = OffsetDateTime::now_utc();

            let first = matches_sea::upsert_round(
                txn,
                RoundUpsert {
                    player2_move: Some(MoveKind::Paper),
                    player2_moved_at: Some(now),
                    ..round(match_id, 1)
                },
            )
            .await?;
            assert_eq!(first.player1_move, None);
            assert_eq!(first.player2_move, Some(MoveKind::Paper));

            let second = matches_sea::upsert_round(
                txn,
                RoundUpsert {
                    player1_move: Some(MoveKind::Rock),
                    player1_moved_at: Some(now),
                    player2_move: Some(MoveKind::Paper),
                    player2_moved_at: Some(now),
                    winner_id: Some(p2),
                    result: Some("Paper covers Rock".into()),
                    ..round(match_id, 1)
                },
            )
            .await?;
            assert_eq!(second.id, first.id, "same row updated");
            assert_eq!(second.winner_id, Some(p2));

            matches_sea::upsert_round(txn, round(match_id, 2)).await?;

            let rounds = matches_sea::find_rounds(txn, match_id).await?;
            let numbers: Vec<i32> = rounds.iter().map(|r| r.round_no).collect();
            assert_eq!(numbers, vec![1, 2]);
            assert_eq!(rounds[0].result.as_deref(), Some("Paper covers Rock"));
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn match_with_unknown_players_violates_foreign_key() -> Result<(), AppError> {
    let state = build_test_state().await?;

    let result = with_txn(&state, |txn| {
        Box::pin(async move {
            matches_sea::create_match(txn, MatchCreate::new(888_001, 888_002)).await?;
            Ok(())
        })
    })
    .await;

    let err = result.expect_err("foreign keys reject unknown players");
    assert_eq!(err.status().as_u16(), 422);
    Ok(())
}
