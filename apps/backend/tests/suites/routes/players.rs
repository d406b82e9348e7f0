use actix_web::http::StatusCode;
use actix_web::test;
use rps_backend::AppError;
use rps_test_support::unique_helpers::unique_str;
use serde_json::json;

use crate::common::{assert_problem, expect_json};
use crate::support::app_builder::create_test_app;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn create_then_fetch_player() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let name = unique_str("Ivan");

    let req = test::TestRequest::post()
        .uri("/api/players")
        .set_json(json!({ "name": format!("  {name} ") }))
        .to_request();
    let created = expect_json(test::call_service(&app, req).await, StatusCode::CREATED).await;

    assert_eq!(created["name"], name.to_lowercase());
    assert_eq!(created["wins"], 0);
    assert_eq!(created["losses"], 0);
    assert!(created["createdAt"].as_str().is_some());
    let id = created["id"].as_i64().expect("numeric id");

    let req = test::TestRequest::get()
        .uri(&format!("/api/players/{id}"))
        .to_request();
    let fetched = expect_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["name"], created["name"]);

    let req = test::TestRequest::get()
        .uri(&format!("/api/players/{id}/stats"))
        .to_request();
    let stats = expect_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(stats["player"]["id"], id);
    assert_eq!(stats["totalMatches"], 0);
    assert_eq!(stats["winRate"], 0.0);
    Ok(())
}

#[actix_web::test]
async fn duplicate_name_is_conflict() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;
    let name = unique_str("judy");

    let req = test::TestRequest::post()
        .uri("/api/players")
        .set_json(json!({ "name": name }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/players")
        .set_json(json!({ "name": name.to_uppercase() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::CONFLICT, "UNIQUE_PLAYER_NAME", Some("already taken")).await;
    Ok(())
}

#[actix_web::test]
async fn invalid_names_and_ids_are_rejected() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/players")
        .set_json(json!({ "name": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "INVALID_PLAYER_NAME", None).await;

    let req = test::TestRequest::get().uri("/api/players/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "INVALID_PLAYER_ID", Some("abc")).await;

    let req = test::TestRequest::get().uri("/api/players/0").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "INVALID_PLAYER_ID", Some("positive")).await;

    let req = test::TestRequest::get().uri("/api/players/424242").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(
        resp,
        StatusCode::NOT_FOUND,
        "PLAYER_NOT_FOUND",
        Some("Player 424242 not found"),
    )
    .await;
    Ok(())
}
