//! Adapters for external dependencies.

pub mod matches_sea;
pub mod players_sea;
