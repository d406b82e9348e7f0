pub mod match_rounds;
pub mod matches;
pub mod players;

pub use match_rounds::Entity as MatchRounds;
pub use match_rounds::Model as MatchRound;
pub use matches::Entity as Matches;
pub use matches::Model as MatchRow;
pub use players::Entity as Players;
pub use players::Model as PlayerRow;
