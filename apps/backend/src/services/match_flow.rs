//! One move-submission attempt against a store.
//!
//! Order of checks: move text, match lookup, then the engine's own checks
//! (finished, participant, already moved). Nothing is written unless every
//! check passes. The match row is saved before player aggregates are
//! touched, so a stale save leaves the aggregates alone. A finish books both
//! aggregates through `PlayerRecords::record_result`, which stores guarantee
//! cannot half-apply.

use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::{advance, register_move, Move, Progression, Registration, RoundResult, SubmitOutcome};
use crate::errors::domain::DomainError;
use crate::repos::{MatchStore, PlayerRecords};

pub async fn submit_move<S, P>(
    store: &S,
    records: &P,
    match_id: i64,
    player_id: i64,
    raw_move: &str,
) -> Result<SubmitOutcome, DomainError>
where
    S: MatchStore + ?Sized,
    P: PlayerRecords + ?Sized,
{
    let mv: Move = raw_move.parse()?;
    let mut m = store.load(match_id).await?;
    let now = OffsetDateTime::now_utc();

    debug!(
        match_id,
        player_id,
        round_no = m.current_round,
        lock_version = m.lock_version,
        "Registering move"
    );

    let resolved = match register_move(&mut m, player_id, mv, now)? {
        Registration::Waiting => {
            store.save(&m).await?;
            debug!(match_id, player_id, "Move stored; waiting for opponent");
            return Ok(SubmitOutcome::Waiting);
        }
        Registration::Complete(resolved) => resolved,
    };

    let progression = advance(&mut m, &resolved, now);
    let saved = store.save(&m).await?;

    info!(
        match_id,
        round_no = resolved.round_no,
        outcome = ?resolved.outcome,
        score_player1 = saved.score.player1,
        score_player2 = saved.score.player2,
        "Round resolved"
    );

    if let Progression::Finished { winner, loser } = progression {
        records.record_result(winner, loser).await?;
        info!(match_id, winner, loser, "Match finished");
    }

    Ok(SubmitOutcome::Resolved(RoundResult::from_resolution(
        &saved, &resolved,
    )))
}
