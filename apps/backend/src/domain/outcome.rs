//! What `submit` hands back to its caller.

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use super::match_state::{Match, MatchStatus, Score, Slot};
use super::moves::Move;
use super::resolver::ResolvedRound;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotMove {
    pub player_id: i64,
    #[serde(rename = "move")]
    pub mv: Move,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundMoves {
    pub player1: SlotMove,
    pub player2: SlotMove,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub round_number: u32,
    pub moves: RoundMoves,
    /// `None` for a tie.
    pub winner: Option<i64>,
    pub result: String,
    pub score: Score,
    pub match_status: MatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_winner: Option<i64>,
}

impl RoundResult {
    /// Build from the match state after progression has been applied.
    pub fn from_resolution(m: &Match, round: &ResolvedRound) -> Self {
        Self {
            round_number: round.round_no,
            moves: RoundMoves {
                player1: SlotMove {
                    player_id: m.participant(Slot::First),
                    mv: round.first,
                },
                player2: SlotMove {
                    player_id: m.participant(Slot::Second),
                    mv: round.second,
                },
            },
            winner: round.winning_slot().map(|slot| m.participant(slot)),
            result: round.result.clone(),
            score: m.score,
            match_status: m.status,
            match_winner: m.winner,
        }
    }
}

/// `{"waiting": true}` or `{"waiting": false, "result": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Waiting,
    Resolved(RoundResult),
}

impl SubmitOutcome {
    pub fn is_waiting(&self) -> bool {
        matches!(self, SubmitOutcome::Waiting)
    }

    pub fn result(&self) -> Option<&RoundResult> {
        match self {
            SubmitOutcome::Waiting => None,
            SubmitOutcome::Resolved(r) => Some(r),
        }
    }
}

impl Serialize for SubmitOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SubmitOutcome::Waiting => {
                let mut s = serializer.serialize_struct("SubmitOutcome", 1)?;
                s.serialize_field("waiting", &true)?;
                s.end()
            }
            SubmitOutcome::Resolved(result) => {
                let mut s = serializer.serialize_struct("SubmitOutcome", 2)?;
                s.serialize_field("waiting", &false)?;
                s.serialize_field("result", result)?;
                s.end()
            }
        }
    }
}
