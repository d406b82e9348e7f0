use actix_web::http::StatusCode;
use actix_web::test;
use rps_backend::config::AppConfig;
use rps_backend::state::app_state::AppState;
use rps_backend::AppError;

use crate::common::expect_json;
use crate::support::app_builder::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn health_reports_db_and_migrations() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().contains_key("x-request-id"));
    let body = expect_json(resp, StatusCode::OK).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body.get("db_error").is_none());
    assert_ne!(body["migrations"], "unknown");
    assert_ne!(body["migrations"], "no_migrations");
    assert!(body["app_version"].as_str().is_some_and(|v| !v.is_empty()));
    assert!(body["time"].as_str().is_some());
    Ok(())
}

#[actix_web::test]
async fn health_without_db_still_answers() -> Result<(), AppError> {
    let state = AppState::new_without_db(AppConfig::default());
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = expect_json(test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "error");
    assert!(body["db_error"].as_str().is_some());
    assert_eq!(body["migrations"], "unknown");
    Ok(())
}
