//! Seed data for integration tests.
//!
//! Names go through the real normalization rules, so callers get back the
//! stored (lowercased) form.

use rps_backend::db::txn::with_txn;
use rps_backend::domain::Match;
use rps_backend::repos::players::Player;
use rps_backend::repos::{MatchStore, PlayerDirectory, SeaMatchStore, SeaPlayers};
use rps_backend::services::PlayerService;
use rps_backend::state::app_state::AppState;
use rps_backend::AppError;
use rps_test_support::unique_helpers::unique_str;

/// Register a player with a unique name derived from `prefix`.
pub async fn create_player(state: &AppState, prefix: &str) -> Result<Player, AppError> {
    let name = unique_str(prefix);
    with_txn(state, |txn| {
        Box::pin(async move {
            let players = SeaPlayers::new(txn);
            Ok(PlayerService::new(&players).create_player(&name).await?)
        })
    })
    .await
}

/// Two fresh players and a match between them, in slot order.
pub async fn create_match_with_players(
    state: &AppState,
) -> Result<(Match, Player, Player), AppError> {
    let alice = create_player(state, "alice").await?;
    let bob = create_player(state, "bob").await?;
    let (p1, p2) = (alice.id, bob.id);
    let m = with_txn(state, |txn| {
        Box::pin(async move { Ok(SeaMatchStore::new(txn).create(p1, p2).await?) })
    })
    .await?;
    Ok((m, alice, bob))
}

pub async fn load_match(state: &AppState, match_id: i64) -> Result<Match, AppError> {
    with_txn(state, |txn| {
        Box::pin(async move { Ok(SeaMatchStore::new(txn).load(match_id).await?) })
    })
    .await
}

/// Re-read a player row; panics if it vanished.
pub async fn reload_player(state: &AppState, player_id: i64) -> Result<Player, AppError> {
    let found = with_txn(state, |txn| {
        Box::pin(async move { Ok(SeaPlayers::new(txn).find(player_id).await?) })
    })
    .await?;
    Ok(found.unwrap_or_else(|| panic!("player {player_id} should exist")))
}
