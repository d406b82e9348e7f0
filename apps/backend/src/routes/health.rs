use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::db::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migrations: String,
    time: String,
}

/// Probe the database and report the latest applied migration.
async fn check_db(app_state: &AppState) -> (&'static str, Option<String>, String) {
    let db = match require_db(app_state) {
        Ok(db) => db,
        Err(e) => return ("error", Some(format!("DB unavailable: {e}")), "unknown".into()),
    };

    let probe = Statement::from_string(db.get_database_backend(), "SELECT 1 AS health_check");
    if let Err(e) = db.query_one(probe).await {
        return ("error", Some(format!("DB query failed: {e}")), "unknown".into());
    }

    let migrations = match get_latest_migration_version(db).await {
        Ok(Some(version)) => version,
        Ok(None) => "no_migrations".to_string(),
        Err(_) => "unknown".to_string(),
    };
    ("ok", None, migrations)
}

/// GET /health
///
/// Always 200 while the process is serving; `db` tells whether storage is usable.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let (db, db_error, migrations) = check_db(&app_state).await;
    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db,
        db_error,
        migrations,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(health));
}
