// Concurrent submissions: per-match serialization, optimistic retries and
// aggregate counters under parallel finishes.

use std::time::Duration;

use rps_backend::config::AppConfig;
use rps_backend::domain::Slot;
use rps_backend::errors::ErrorCode;
use rps_backend::repos::{InMemoryStore, MatchStore, PlayerDirectory};
use rps_backend::services::MatchEngine;
use rps_backend::{AppError, MatchStatus, Move, SubmitOutcome};

use crate::support::factory::{create_match_with_players, load_match};
use crate::support::test_state::build_test_state;

fn engine(attempts: u32) -> MatchEngine {
    MatchEngine::new(
        &AppConfig::default()
            .with_submit_max_attempts(attempts)
            .with_retry_backoff(Duration::ZERO),
    )
}

/// Memory store with two registered players and one match between them.
async fn memory_match() -> (InMemoryStore, i64, i64, i64) {
    let store = InMemoryStore::new();
    let alice = store.register("alice").await.unwrap();
    let bob = store.register("bob").await.unwrap();
    let m = store.create(alice.id, bob.id).await.unwrap();
    (store, m.id, alice.id, bob.id)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn double_submit_by_one_participant_stores_exactly_one_move() {
    let (store, match_id, alice, _bob) = memory_match().await;
    let engine = engine(3);

    let spawn = |mv: &'static str| {
        let (store, engine) = (store.clone(), engine.clone());
        tokio::spawn(async move {
            engine
                .submit_move_with(&store, &store, match_id, alice, mv)
                .await
        })
    };
    let (a, b) = (spawn("rock"), spawn("paper"));
    let results = [a.await.unwrap(), b.await.unwrap()];

    let waiting = results
        .iter()
        .filter(|r| matches!(r, Ok(SubmitOutcome::Waiting)))
        .count();
    let already_moved = results
        .iter()
        .filter(|r| matches!(r, Err(e) if e.code() == ErrorCode::AlreadyMoved))
        .count();
    assert_eq!((waiting, already_moved), (1, 1), "results: {results:?}");

    let m = store.snapshot(match_id).unwrap();
    assert_eq!(m.current_round, 1);
    assert_eq!(m.lock_version, 2, "exactly one save landed");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_participants_resolve_the_round_once() {
    let (store, match_id, alice, bob) = memory_match().await;
    let engine = engine(3);

    let spawn = |player_id: i64, mv: &'static str| {
        let (store, engine) = (store.clone(), engine.clone());
        tokio::spawn(async move {
            engine
                .submit_move_with(&store, &store, match_id, player_id, mv)
                .await
        })
    };
    let (a, b) = (spawn(alice, "rock"), spawn(bob, "scissors"));
    let results = [a.await.unwrap().unwrap(), b.await.unwrap().unwrap()];

    let resolved: Vec<_> = results.iter().filter_map(SubmitOutcome::result).collect();
    assert_eq!(resolved.len(), 1, "results: {results:?}");
    assert_eq!(resolved[0].winner, Some(alice));
    assert_eq!(resolved[0].result, "Rock crushes Scissors");

    let m = store.snapshot(match_id).unwrap();
    assert_eq!(m.current_round, 2);
    assert_eq!(m.score.player1, 1);
    assert!(engine.locks().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_finishes_never_lose_aggregate_increments() {
    let store = InMemoryStore::new();
    let alice = store.register("alice").await.unwrap();
    let bob = store.register("bob").await.unwrap();
    let engine = engine(3);

    const MATCHES: usize = 8;
    let mut handles = Vec::new();
    for _ in 0..MATCHES {
        let m = store.create(alice.id, bob.id).await.unwrap();
        let (store, engine) = (store.clone(), engine.clone());
        let (a, b) = (alice.id, bob.id);
        handles.push(tokio::spawn(async move {
            for _ in 0..3 {
                engine.submit_move_with(&store, &store, m.id, a, "paper").await?;
                engine.submit_move_with(&store, &store, m.id, b, "rock").await?;
            }
            Ok::<_, AppError>(m.id)
        }));
    }
    for h in handles {
        let match_id = h.await.unwrap().unwrap();
        assert_eq!(store.snapshot(match_id).unwrap().status, MatchStatus::Finished);
    }

    let alice = store.player(alice.id).unwrap();
    let bob = store.player(bob.id).unwrap();
    assert_eq!((alice.wins, alice.losses), (MATCHES as u32, 0));
    assert_eq!((bob.wins, bob.losses), (0, MATCHES as u32));
}

#[tokio::test]
async fn conflicts_are_retried_until_attempts_run_out() {
    let (store, match_id, alice, _bob) = memory_match().await;

    store.inject_save_conflicts(2);
    let outcome = engine(3)
        .submit_move_with(&store, &store, match_id, alice, "rock")
        .await
        .unwrap();
    assert!(outcome.is_waiting());

    let (store, match_id, alice, _bob) = memory_match().await;
    store.inject_save_conflicts(3);
    let err = engine(3)
        .submit_move_with(&store, &store, match_id, alice, "rock")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::OptimisticLock);
    assert_eq!(err.status().as_u16(), 409);
    assert_eq!(store.snapshot(match_id).unwrap().lock_version, 1);
}

#[tokio::test]
async fn conflicted_finish_leaves_aggregates_untouched() {
    let (store, match_id, alice, bob) = memory_match().await;
    let engine = engine(1);
    for _ in 0..2 {
        engine.submit_move_with(&store, &store, match_id, alice, "rock").await.unwrap();
        engine.submit_move_with(&store, &store, match_id, bob, "scissors").await.unwrap();
    }
    engine.submit_move_with(&store, &store, match_id, alice, "rock").await.unwrap();

    store.inject_save_conflicts(1);
    let err = engine
        .submit_move_with(&store, &store, match_id, bob, "scissors")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::OptimisticLock);

    assert_eq!(store.snapshot(match_id).unwrap().status, MatchStatus::Playing);
    assert_eq!(store.player(alice).unwrap().wins, 0);
    assert_eq!(store.player(bob).unwrap().losses, 0);

    // The retry from a fresh read finishes the match normally
    let outcome = engine
        .submit_move_with(&store, &store, match_id, bob, "scissors")
        .await
        .unwrap();
    assert_eq!(outcome.result().unwrap().match_winner, Some(alice));
    assert_eq!(store.player(alice).unwrap().wins, 1);
    assert_eq!(store.player(bob).unwrap().losses, 1);
}

#[tokio::test]
async fn racing_participants_on_the_database_resolve_once() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (m, alice, bob) = create_match_with_players(&state).await?;

    let (a, b) = tokio::join!(
        state.engine.submit_move(&state, m.id, alice.id, "paper"),
        state.engine.submit_move(&state, m.id, bob.id, "rock"),
    );
    let (a, b) = (a?, b?);
    assert_ne!(a.is_waiting(), b.is_waiting(), "exactly one side waits");

    let stored = load_match(&state, m.id).await?;
    assert_eq!(stored.current_round, 2);
    assert_eq!(stored.score.player1, 1);
    assert_eq!(stored.rounds.len(), 1);
    assert!(state.engine.locks().is_empty());
    Ok(())
}

#[tokio::test]
async fn double_submit_on_the_database_keeps_first_move() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let (m, alice, _bob) = create_match_with_players(&state).await?;

    let (a, b) = tokio::join!(
        state.engine.submit_move(&state, m.id, alice.id, "rock"),
        state.engine.submit_move(&state, m.id, alice.id, "paper"),
    );
    let stored = load_match(&state, m.id).await?;
    let kept = stored
        .open_round()
        .and_then(|r| r.move_of(Slot::First))
        .expect("one move stored");
    match (a, b) {
        (Ok(SubmitOutcome::Waiting), Err(e)) => {
            assert_eq!(e.code(), ErrorCode::AlreadyMoved);
            assert_eq!(kept, Move::Rock);
        }
        (Err(e), Ok(SubmitOutcome::Waiting)) => {
            assert_eq!(e.code(), ErrorCode::AlreadyMoved);
            assert_eq!(kept, Move::Paper);
        }
        other => panic!("expected one waiting and one AlreadyMoved, got {other:?}"),
    }
    assert_eq!(stored.lock_version, m.lock_version + 1);
    Ok(())
}
