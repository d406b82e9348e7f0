//! Positive integer ids taken from route path segments.
//!
//! These only check shape; whether the row exists is the service's call,
//! which keeps error precedence (e.g. an invalid move before a missing
//! match) in one place.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

fn parse_positive_id(
    req: &HttpRequest,
    param: &str,
    label: &str,
    code: ErrorCode,
) -> Result<i64, AppError> {
    let raw = req
        .match_info()
        .get(param)
        .ok_or_else(|| AppError::bad_request(code, format!("Missing {param} parameter")))?;

    let id = raw
        .parse::<i64>()
        .map_err(|_| AppError::bad_request(code, format!("Invalid {label} id: {raw}")))?;

    if id <= 0 {
        return Err(AppError::bad_request(
            code,
            format!("{label} id must be positive, got: {id}"),
        ));
    }
    Ok(id)
}

/// `{match_id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchId(pub i64);

impl FromRequest for MatchId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_positive_id(req, "match_id", "Match", ErrorCode::InvalidMatchId).map(MatchId))
    }
}

/// `{player_id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerId(pub i64);

impl FromRequest for PlayerId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            parse_positive_id(req, "player_id", "Player", ErrorCode::InvalidPlayerId)
                .map(PlayerId),
        )
    }
}
