//! Services orchestrate the domain engine over repository capabilities.

pub mod match_engine;
pub mod match_flow;
pub mod match_locks;
pub mod matches;
pub mod players;

pub use match_engine::MatchEngine;
pub use match_locks::MatchLocks;
pub use matches::MatchService;
pub use players::{PlayerService, PlayerStats};
