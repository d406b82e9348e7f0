use actix_web::http::StatusCode;
use actix_web::test;
use rps_backend::config::AppConfig;
use rps_backend::state::app_state::AppState;
use rps_backend::AppError;
use serde_json::json;

use crate::common::assert_problem;
use crate::support::app_builder::create_test_app;

#[actix_web::test]
async fn missing_database_is_503_with_retry_after() -> Result<(), AppError> {
    let state = AppState::new_without_db(AppConfig::default());
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/api/players/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get("retry-after").and_then(|v| v.to_str().ok()),
        Some("1")
    );
    assert_problem(resp, StatusCode::SERVICE_UNAVAILABLE, "DB_UNAVAILABLE", None).await;

    let req = test::TestRequest::post()
        .uri("/api/matches/1/move")
        .set_json(json!({ "playerId": 1, "move": "rock" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::SERVICE_UNAVAILABLE, "DB_UNAVAILABLE", None).await;
    Ok(())
}

#[actix_web::test]
async fn every_response_carries_a_request_id() -> Result<(), AppError> {
    let state = AppState::new_without_db(AppConfig::default());
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/api/players/nope").to_request();
    let resp = test::call_service(&app, req).await;
    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("x-request-id header");
    let trace_id = resp
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("x-trace-id header");
    // Both headers name the same request
    assert_eq!(request_id, trace_id);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().contains_key("x-request-id"));
    Ok(())
}

#[actix_web::test]
async fn unknown_route_is_plain_404() -> Result<(), AppError> {
    let state = AppState::new_without_db(AppConfig::default());
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/api/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}
