//! Domain layer: the pure match engine.
//!
//! Nothing here touches storage or HTTP. Services load a `Match`, run it
//! through `resolver::register_move` and `progression::advance`, and persist
//! the result.

pub mod match_state;
pub mod moves;
pub mod outcome;
pub mod progression;
pub mod resolver;


// Re-exports for ergonomics
pub use match_state::{
    Match, MatchStatus, PlayerMove, Resolution, Round, Score, Slot, ROUNDS_TO_WIN,
};
pub use moves::{describe_round, resolve_round, Move, RoundOutcome};
pub use outcome::{RoundResult, SubmitOutcome};
pub use progression::{advance, Progression};
pub use resolver::{register_move, Registration, ResolvedRound};
