pub mod path_ids;
pub mod validated_json;

pub use path_ids::{MatchId, PlayerId};
pub use validated_json::ValidatedJson;
