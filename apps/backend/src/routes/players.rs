//! Player registration and lookup routes.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{PlayerId, ValidatedJson};
use crate::repos::SeaPlayers;
use crate::services::PlayerService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub name: String,
}

/// POST /api/players
async fn create_player(
    body: ValidatedJson<CreatePlayerRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CreatePlayerRequest { name } = body.into_inner();

    let player = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let players = SeaPlayers::new(txn);
            Ok(PlayerService::new(&players).create_player(&name).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(player))
}

/// GET /api/players/{player_id}
async fn get_player(
    player_id: PlayerId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = player_id.0;
    let player = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let players = SeaPlayers::new(txn);
            Ok(PlayerService::new(&players).get_player(id).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(player))
}

/// GET /api/players/{player_id}/stats
async fn get_player_stats(
    player_id: PlayerId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = player_id.0;
    let stats = with_txn(&app_state, |txn| {
        Box::pin(async move {
            let players = SeaPlayers::new(txn);
            Ok(PlayerService::new(&players).player_stats(id).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(stats))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_player))
        .route("/{player_id}", web::get().to(get_player))
        .route("/{player_id}/stats", web::get().to(get_player_stats));
}
