//! Match progression after a resolved round.

use time::OffsetDateTime;

use super::match_state::{Match, MatchStatus};
use super::resolver::ResolvedRound;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progression {
    /// Match continues; the next round is open.
    Continued { next_round: u32 },
    /// Threshold reached. Aggregates must record exactly one win and one loss.
    Finished { winner: i64, loser: i64 },
}

/// Apply a resolved round to the score and status.
///
/// Only call this once per resolved round, right after `register_move`
/// returned `Registration::Complete`.
pub fn advance(m: &mut Match, round: &ResolvedRound, now: OffsetDateTime) -> Progression {
    if let Some(slot) = round.winning_slot() {
        m.score.increment(slot);
    }
    m.updated_at = now;

    match m.score.leader_at_threshold() {
        Some(slot) => {
            let winner = m.participant(slot);
            let loser = m.participant(slot.other());
            m.status = MatchStatus::Finished;
            m.winner = Some(winner);
            m.finished_at = Some(now);
            Progression::Finished { winner, loser }
        }
        None => {
            m.current_round += 1;
            Progression::Continued {
                next_round: m.current_round,
            }
        }
    }
}
