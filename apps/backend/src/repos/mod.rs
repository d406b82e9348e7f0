//! Repository capabilities for the domain layer.

pub mod matches;
pub mod memory;
pub mod players;

pub use matches::{MatchStore, SeaMatchStore};
pub use memory::InMemoryStore;
pub use players::{Player, PlayerDirectory, PlayerRecords, SeaPlayers};
