//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos and services convert it into
//! `crate::errors::domain::DomainError` here, and higher layers then map
//! `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

/// Prefix for structured "match missing" errors raised by adapters.
pub const MATCH_NOT_FOUND_PREFIX: &str = "MATCH_NOT_FOUND:";
/// Prefix for structured "player missing" errors raised by adapters.
pub const PLAYER_NOT_FOUND_PREFIX: &str = "PLAYER_NOT_FOUND:";
/// Prefix for structured optimistic-lock payloads raised by adapters.
pub const OPTIMISTIC_LOCK_PREFIX: &str = "OPTIMISTIC_LOCK:";

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column" error messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..]
        .split(|c: char| c.is_whitespace() || c == '"' || c == ',')
        .next()
}

/// Map SQLite table.column format to domain-specific conflict errors.
fn map_sqlite_table_column_to_conflict(table_column: &str) -> Option<(ConflictKind, &'static str)> {
    match table_column {
        "players.name" => Some((ConflictKind::UniquePlayerName, "Player name already taken")),
        "match_rounds.match_id" | "match_rounds.round_no" => Some((
            ConflictKind::OptimisticLock,
            "Round was written concurrently; please retry",
        )),
        _ => None,
    }
}

/// Map PostgreSQL constraint names to domain-specific conflict errors.
fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("players_name_key") {
        return Some((ConflictKind::UniquePlayerName, "Player name already taken"));
    }
    if error_msg.contains("match_rounds_match_id_round_no_key") {
        return Some((
            ConflictKind::OptimisticLock,
            "Round was written concurrently; please retry",
        ));
    }
    None
}

fn parse_id(msg: &str, prefix: &str) -> Option<i64> {
    msg.strip_prefix(prefix)?.trim().parse::<i64>().ok()
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(MATCH_NOT_FOUND_PREFIX) => {
            return match parse_id(msg, MATCH_NOT_FOUND_PREFIX) {
                Some(match_id) => {
                    warn!(trace_id = %trace_id, match_id, "Match not found");
                    DomainError::not_found(NotFoundKind::Match, format!("Match {match_id} not found"))
                }
                None => DomainError::not_found(NotFoundKind::Match, "Match not found"),
            };
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(PLAYER_NOT_FOUND_PREFIX) => {
            return match parse_id(msg, PLAYER_NOT_FOUND_PREFIX) {
                Some(player_id) => {
                    warn!(trace_id = %trace_id, player_id, "Player not found");
                    DomainError::not_found(
                        NotFoundKind::Player,
                        format!("Player {player_id} not found"),
                    )
                }
                None => DomainError::not_found(NotFoundKind::Player, "Player not found"),
            };
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(OPTIMISTIC_LOCK_PREFIX) => {
            if let Some(json_str) = msg.strip_prefix(OPTIMISTIC_LOCK_PREFIX) {
                #[derive(serde::Deserialize)]
                struct LockInfo {
                    expected: i32,
                    actual: i32,
                }

                if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                    warn!(
                        trace_id = %trace_id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );

                    return DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Match was modified concurrently (expected version {}, actual version {}). Please retry.",
                            info.expected, info.actual
                        ),
                    );
                }
            }

            warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Match was modified by another transaction; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unique constraint violation");

        if let Some(table_column) = extract_sqlite_table_column(&error_msg) {
            if let Some((kind, detail)) = map_sqlite_table_column_to_conflict(table_column) {
                return DomainError::conflict(kind, detail);
            }
        }

        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23514") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Check constraint violation");
        return DomainError::validation_other("Check constraint violation");
    }

    if error_msg.contains("timeout")
        || error_msg.contains("pool")
        || error_msg.contains("unavailable")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
