//! Match routes: creation, lookup and move submission.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::domain::{Match, MatchStatus, Move, Round, Score, Slot};
use crate::error::AppError;
use crate::extractors::{MatchId, ValidatedJson};
use crate::repos::{SeaMatchStore, SeaPlayers};
use crate::services::MatchService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    pub player1_id: i64,
    pub player2_id: i64,
}

/// `move` stays a string here so an unknown move surfaces as INVALID_MOVE
/// rather than a generic body error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMoveRequest {
    pub player_id: i64,
    #[serde(rename = "move")]
    pub mv: String,
}

/// One round as shown to clients. Moves stay hidden until the round resolves.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundView {
    pub round_number: u32,
    pub player1_moved: bool,
    pub player2_moved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player1_move: Option<Move>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player2_move: Option<Move>,
    pub winner_id: Option<i64>,
    pub result: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub id: i64,
    pub player1_id: i64,
    pub player2_id: i64,
    pub current_round: u32,
    pub score: Score,
    pub status: MatchStatus,
    pub winner_id: Option<i64>,
    pub rounds: Vec<RoundView>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub finished_at: Option<OffsetDateTime>,
}

impl RoundView {
    fn new(m: &Match, round: &Round) -> Self {
        let revealed = round.is_resolved();
        let shown = |slot: Slot| round.move_of(slot).filter(|_| revealed);
        Self {
            round_number: round.round_no,
            player1_moved: round.has_moved(Slot::First),
            player2_moved: round.has_moved(Slot::Second),
            player1_move: shown(Slot::First),
            player2_move: shown(Slot::Second),
            winner_id: m.round_winner(round),
            result: round.resolution.as_ref().map(|r| r.result.clone()),
        }
    }
}

impl From<&Match> for MatchView {
    fn from(m: &Match) -> Self {
        let mut rounds: Vec<RoundView> = m.rounds.iter().map(|r| RoundView::new(m, r)).collect();
        rounds.sort_by_key(|r| r.round_number);
        Self {
            id: m.id,
            player1_id: m.participant(Slot::First),
            player2_id: m.participant(Slot::Second),
            current_round: m.current_round,
            score: m.score,
            status: m.status,
            winner_id: m.winner,
            rounds,
            created_at: m.created_at,
            updated_at: m.updated_at,
            finished_at: m.finished_at,
        }
    }
}

/// POST /api/matches
async fn create_match(
    body: ValidatedJson<CreateMatchRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CreateMatchRequest {
        player1_id,
        player2_id,
    } = body.into_inner();

    let created = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let store = SeaMatchStore::new(txn);
            let players = SeaPlayers::new(txn);
            Ok(MatchService::new(&store, &players)
                .create_match(player1_id, player2_id)
                .await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(MatchView::from(&created)))
}

/// GET /api/matches/{match_id}
async fn get_match(
    match_id: MatchId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = match_id.0;
    let found = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let store = SeaMatchStore::new(txn);
            let players = SeaPlayers::new(txn);
            Ok(MatchService::new(&store, &players).get_match(id).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(MatchView::from(&found)))
}

/// POST /api/matches/{match_id}/move
///
/// `{"waiting": true}` until both players have moved, then the round result.
async fn submit_move(
    match_id: MatchId,
    body: ValidatedJson<SubmitMoveRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let SubmitMoveRequest { player_id, mv } = body.into_inner();

    let outcome = app_state
        .engine
        .submit_move(&app_state, match_id.0, player_id, &mv)
        .await?;

    Ok(HttpResponse::Ok().json(outcome))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_match))
        .route("/{match_id}", web::get().to(get_match))
        .route("/{match_id}/move", web::post().to(submit_move));
}
