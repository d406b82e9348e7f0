use actix_web::{web, App, HttpServer};
use rps_backend::config::db::db_kind_from_env;
use rps_backend::config::AppConfig;
use rps_backend::infra::state::build_state;
use rps_backend::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use rps_backend::routes;
use rps_backend::{AppError, AppState};
use tracing::{error, info};

mod telemetry;

async fn build_app_state() -> Result<AppState, AppError> {
    let db_kind = db_kind_from_env()?;
    let config = AppConfig::from_env()?;
    build_state().with_db(db_kind).with_config(config).build().await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables come from the runtime (docker env_file, or an
    // exported .env for local runs).
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let app_state = match build_app_state().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        %host,
        port,
        submit_max_attempts = app_state.config.submit_max_attempts,
        "Starting rock/paper/scissors backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
