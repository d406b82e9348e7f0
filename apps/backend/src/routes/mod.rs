use actix_web::web;

pub mod health;
pub mod matches;
pub mod players;

/// Register every route; shared by `main.rs` and the test app builder.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Players: /api/players/**
    cfg.service(web::scope("/api/players").configure(players::configure_routes));

    // Matches: /api/matches/**
    cfg.service(web::scope("/api/matches").configure(matches::configure_routes));
}
