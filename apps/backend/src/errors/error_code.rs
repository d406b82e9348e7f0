//! Error codes for the match backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Move is not rock, paper or scissors
    InvalidMove,
    /// Player name fails normalization rules
    InvalidPlayerName,
    /// Both match slots name the same player
    SamePlayerMatch,
    /// Invalid match id in path
    InvalidMatchId,
    /// Invalid player id in path
    InvalidPlayerId,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Authorization
    /// Submitter is not one of the match participants
    NotAParticipant,

    // Resource Not Found
    MatchNotFound,
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Move submitted after the match finished
    MatchAlreadyFinished,
    /// Second move by the same participant in one round
    AlreadyMoved,
    UniquePlayerName,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,
    DataCorruption,
    InternalError,
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Request Validation
            Self::InvalidMove => "INVALID_MOVE",
            Self::InvalidPlayerName => "INVALID_PLAYER_NAME",
            Self::SamePlayerMatch => "SAME_PLAYER_MATCH",
            Self::InvalidMatchId => "INVALID_MATCH_ID",
            Self::InvalidPlayerId => "INVALID_PLAYER_ID",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Authorization
            Self::NotAParticipant => "NOT_A_PARTICIPANT",

            // Resource Not Found
            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::MatchAlreadyFinished => "MATCH_ALREADY_FINISHED",
            Self::AlreadyMoved => "ALREADY_MOVED",
            Self::UniquePlayerName => "UNIQUE_PLAYER_NAME",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
