//! Move registration and round resolution.
//!
//! `register_move` is the single entry point that mutates a round. It checks
//! the submission against the match state, stores the move in the
//! submitter's slot and, once both slots are filled, fixes the round's
//! outcome. Parsing the move and loading the match happen before this is
//! called, so the error order seen by callers is: invalid move, not found,
//! already finished, not a participant, already moved.

use time::OffsetDateTime;

use super::match_state::{Match, PlayerMove, Resolution, Round, Slot};
use super::moves::{describe_round, resolve_round, Move, RoundOutcome};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Both moves of a round plus its fixed outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRound {
    pub round_no: u32,
    pub first: Move,
    pub second: Move,
    pub outcome: RoundOutcome,
    pub result: String,
}

impl ResolvedRound {
    pub fn winning_slot(&self) -> Option<Slot> {
        match self.outcome {
            RoundOutcome::FirstWins => Some(Slot::First),
            RoundOutcome::SecondWins => Some(Slot::Second),
            RoundOutcome::Tie => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// Stored; the other participant has not moved yet.
    Waiting,
    /// Stored and the round is now resolved.
    Complete(ResolvedRound),
}

/// Compute the resolution for a round with both moves present.
///
/// Returns `None` while a slot is still empty.
pub fn resolve_round_state(round: &Round) -> Option<ResolvedRound> {
    let first = round.move_of(Slot::First)?;
    let second = round.move_of(Slot::Second)?;
    Some(ResolvedRound {
        round_no: round.round_no,
        first,
        second,
        outcome: resolve_round(first, second),
        result: describe_round(first, second),
    })
}

pub fn register_move(
    m: &mut Match,
    player_id: i64,
    mv: Move,
    now: OffsetDateTime,
) -> Result<Registration, DomainError> {
    if m.is_finished() {
        return Err(DomainError::conflict(
            ConflictKind::MatchFinished,
            format!("Match {} is already finished", m.id),
        ));
    }

    let slot = m.slot_of(player_id).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::NotAParticipant,
            format!("Player {player_id} is not a participant in match {}", m.id),
        )
    })?;

    let match_id = m.id;
    let round = m.open_round_mut(now);

    if round.has_moved(slot) {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyMoved,
            format!(
                "Player {player_id} already made a move in round {} of match {match_id}",
                round.round_no
            ),
        ));
    }

    round.moves[slot.index()] = Some(PlayerMove { mv, moved_at: now });

    if !round.has_moved(slot.other()) {
        return Ok(Registration::Waiting);
    }

    match resolve_round_state(round) {
        Some(resolved) => {
            round.resolution = Some(Resolution {
                outcome: resolved.outcome,
                result: resolved.result.clone(),
            });
            Ok(Registration::Complete(resolved))
        }
        None => Ok(Registration::Waiting),
    }
}
