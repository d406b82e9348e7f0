//! Rule table: the three moves, who beats whom, and how a round reads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// The move this one defeats.
    pub const fn beats(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }

    /// Wire/storage symbol.
    pub const fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Move {
    type Err = DomainError;

    /// Only the exact lowercase symbols are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            other => Err(DomainError::validation(
                ValidationKind::InvalidMove,
                format!("Invalid move '{other}': must be one of rock, paper, scissors"),
            )),
        }
    }
}

/// Outcome of one round from the first slot's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    FirstWins,
    SecondWins,
    Tie,
}

impl RoundOutcome {
    /// Same round seen with the slots swapped.
    pub const fn flipped(self) -> RoundOutcome {
        match self {
            RoundOutcome::FirstWins => RoundOutcome::SecondWins,
            RoundOutcome::SecondWins => RoundOutcome::FirstWins,
            RoundOutcome::Tie => RoundOutcome::Tie,
        }
    }
}

pub fn resolve_round(first: Move, second: Move) -> RoundOutcome {
    if first == second {
        RoundOutcome::Tie
    } else if first.beats() == second {
        RoundOutcome::FirstWins
    } else {
        RoundOutcome::SecondWins
    }
}

/// Phrase for a decisive round. Pairs without a canned line read
/// "<winner> beats <loser>" in move symbols.
fn decisive_phrase(winner: Move, loser: Move) -> String {
    match (winner, loser) {
        (Move::Rock, Move::Scissors) => "Rock crushes Scissors".to_string(),
        (Move::Paper, Move::Rock) => "Paper covers Rock".to_string(),
        (Move::Scissors, Move::Paper) => "Scissors cuts Paper".to_string(),
        _ => format!("{winner} beats {loser}"),
    }
}

/// Human-readable result line for a round.
pub fn describe_round(first: Move, second: Move) -> String {
    match resolve_round(first, second) {
        RoundOutcome::Tie => format!("Tie - both played {first}"),
        RoundOutcome::FirstWins => decisive_phrase(first, second),
        RoundOutcome::SecondWins => decisive_phrase(second, first),
    }
}
