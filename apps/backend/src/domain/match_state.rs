//! Match aggregate: two positional slots, the rounds played so far,
//! the running score and the status.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::moves::{Move, RoundOutcome};

/// Rounds a participant must win to take the match.
pub const ROUNDS_TO_WIN: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// Reserved pre-match lobby state; never assigned by the engine.
    Waiting,
    Playing,
    Finished,
}

impl MatchStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            MatchStatus::Waiting => "waiting",
            MatchStatus::Playing => "playing",
            MatchStatus::Finished => "finished",
        }
    }
}

/// Positional role within a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    pub const fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
        }
    }

    pub const fn other(self) -> Slot {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub player1: u8,
    pub player2: u8,
}

impl Score {
    pub fn get(&self, slot: Slot) -> u8 {
        match slot {
            Slot::First => self.player1,
            Slot::Second => self.player2,
        }
    }

    pub fn increment(&mut self, slot: Slot) {
        match slot {
            Slot::First => self.player1 += 1,
            Slot::Second => self.player2 += 1,
        }
    }

    /// Slot that has reached the win threshold, if any.
    pub fn leader_at_threshold(&self) -> Option<Slot> {
        if self.player1 >= ROUNDS_TO_WIN {
            Some(Slot::First)
        } else if self.player2 >= ROUNDS_TO_WIN {
            Some(Slot::Second)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerMove {
    pub mv: Move,
    pub moved_at: OffsetDateTime,
}

/// Fixed once both moves are in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: RoundOutcome,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub round_no: u32,
    pub moves: [Option<PlayerMove>; 2],
    pub resolution: Option<Resolution>,
    pub created_at: OffsetDateTime,
}

impl Round {
    pub fn new(round_no: u32, now: OffsetDateTime) -> Self {
        Self {
            round_no,
            moves: [None, None],
            resolution: None,
            created_at: now,
        }
    }

    pub fn move_of(&self, slot: Slot) -> Option<Move> {
        self.moves[slot.index()].map(|pm| pm.mv)
    }

    pub fn has_moved(&self, slot: Slot) -> bool {
        self.moves[slot.index()].is_some()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: i64,
    /// `[first, second]`; always distinct.
    pub players: [i64; 2],
    /// Ordered by `round_no`.
    pub rounds: Vec<Round>,
    pub current_round: u32,
    pub score: Score,
    pub status: MatchStatus,
    pub winner: Option<i64>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub finished_at: Option<OffsetDateTime>,
    pub lock_version: i32,
}

impl Match {
    pub fn slot_of(&self, player_id: i64) -> Option<Slot> {
        if self.players[0] == player_id {
            Some(Slot::First)
        } else if self.players[1] == player_id {
            Some(Slot::Second)
        } else {
            None
        }
    }

    pub fn participant(&self, slot: Slot) -> i64 {
        self.players[slot.index()]
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }

    /// Round currently accepting moves, if it has been materialized.
    pub fn open_round(&self) -> Option<&Round> {
        self.rounds
            .iter()
            .find(|r| r.round_no == self.current_round)
    }

    pub fn round(&self, round_no: u32) -> Option<&Round> {
        self.rounds.iter().find(|r| r.round_no == round_no)
    }

    /// Round id of the winner, or `None` for a tie / unresolved round.
    pub fn round_winner(&self, round: &Round) -> Option<i64> {
        match round.resolution.as_ref()?.outcome {
            RoundOutcome::FirstWins => Some(self.participant(Slot::First)),
            RoundOutcome::SecondWins => Some(self.participant(Slot::Second)),
            RoundOutcome::Tie => None,
        }
    }

    /// Last round touched by a submission.
    pub fn latest_round(&self) -> Option<&Round> {
        self.rounds.iter().max_by_key(|r| r.round_no)
    }

    pub(crate) fn open_round_mut(&mut self, now: OffsetDateTime) -> &mut Round {
        let current = self.current_round;
        let pos = match self.rounds.iter().position(|r| r.round_no == current) {
            Some(pos) => pos,
            None => {
                self.rounds.push(Round::new(current, now));
                self.rounds.len() - 1
            }
        };
        &mut self.rounds[pos]
    }
}
