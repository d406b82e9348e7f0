use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use rps_backend::AppError;
use serde_json::{json, Value};

use crate::common::{assert_problem, expect_json};
use crate::support::app_builder::create_test_app;
use crate::support::factory::create_player;
use crate::support::test_state::build_test_state;

fn move_request(match_id: i64, player_id: i64, mv: &str) -> Request {
    test::TestRequest::post()
        .uri(&format!("/api/matches/{match_id}/move"))
        .set_json(json!({ "playerId": player_id, "move": mv }))
        .to_request()
}

async fn submit<S>(app: &S, match_id: i64, player_id: i64, mv: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, move_request(match_id, player_id, mv)).await;
    expect_json(resp, StatusCode::OK).await
}

async fn get_match<S>(app: &S, match_id: i64) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::get()
        .uri(&format!("/api/matches/{match_id}"))
        .to_request();
    expect_json(test::call_service(app, req).await, StatusCode::OK).await
}

#[actix_web::test]
async fn full_match_over_http() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let alice = create_player(&state, "alice").await?;
    let bob = create_player(&state, "bob").await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/matches")
        .set_json(json!({ "player1Id": alice.id, "player2Id": bob.id }))
        .to_request();
    let created = expect_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(created["player1Id"], alice.id);
    assert_eq!(created["player2Id"], bob.id);
    assert_eq!(created["status"], "playing");
    assert_eq!(created["currentRound"], 1);
    assert_eq!(created["score"], json!({ "player1": 0, "player2": 0 }));
    assert_eq!(created["winnerId"], Value::Null);
    assert_eq!(created["rounds"], json!([]));
    let match_id = created["id"].as_i64().expect("numeric id");

    // Round 1: rock crushes scissors
    let first = submit(&app, match_id, alice.id, "rock").await;
    assert_eq!(first, json!({ "waiting": true }));

    let second = submit(&app, match_id, bob.id, "scissors").await;
    assert_eq!(second["waiting"], false);
    let result = &second["result"];
    assert_eq!(result["roundNumber"], 1);
    assert_eq!(result["moves"]["player1"], json!({ "playerId": alice.id, "move": "rock" }));
    assert_eq!(result["moves"]["player2"], json!({ "playerId": bob.id, "move": "scissors" }));
    assert_eq!(result["winner"], alice.id);
    assert_eq!(result["result"], "Rock crushes Scissors");
    assert_eq!(result["score"], json!({ "player1": 1, "player2": 0 }));
    assert_eq!(result["matchStatus"], "playing");
    assert!(result.get("matchWinner").is_none());

    // Rounds 2 and 3 finish it
    for _ in 0..2 {
        submit(&app, match_id, bob.id, "paper").await;
        let last = submit(&app, match_id, alice.id, "scissors").await;
        assert_eq!(last["result"]["result"], "Scissors cuts Paper");
    }

    let view = get_match(&app, match_id).await;
    assert_eq!(view["status"], "finished");
    assert_eq!(view["winnerId"], alice.id);
    assert_eq!(view["score"], json!({ "player1": 3, "player2": 0 }));
    assert!(view["finishedAt"].as_str().is_some());
    let rounds = view["rounds"].as_array().expect("rounds array");
    assert_eq!(rounds.len(), 3);
    assert_eq!(rounds[2]["roundNumber"], 3);
    assert_eq!(rounds[2]["player1Move"], "scissors");
    assert_eq!(rounds[2]["winnerId"], alice.id);

    // Terminal: further moves are refused
    let resp = test::call_service(&app, move_request(match_id, bob.id, "rock")).await;
    assert_problem(resp, StatusCode::CONFLICT, "MATCH_ALREADY_FINISHED", None).await;

    // Aggregates recorded once
    let req = test::TestRequest::get()
        .uri(&format!("/api/players/{}/stats", alice.id))
        .to_request();
    let stats = expect_json(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(stats["player"]["wins"], 1);
    assert_eq!(stats["totalMatches"], 1);
    assert_eq!(stats["winRate"], 100.0);
    Ok(())
}

#[actix_web::test]
async fn pending_moves_stay_hidden() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let alice = create_player(&state, "alice").await?;
    let bob = create_player(&state, "bob").await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/matches")
        .set_json(json!({ "player1Id": alice.id, "player2Id": bob.id }))
        .to_request();
    let created = expect_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
    let match_id = created["id"].as_i64().expect("numeric id");

    submit(&app, match_id, bob.id, "paper").await;
    let view = get_match(&app, match_id).await;
    let round = &view["rounds"][0];
    assert_eq!(round["roundNumber"], 1);
    assert_eq!(round["player1Moved"], false);
    assert_eq!(round["player2Moved"], true);
    assert!(round.get("player2Move").is_none(), "unresolved move leaked: {round}");
    assert_eq!(round["result"], Value::Null);
    Ok(())
}

#[actix_web::test]
async fn move_errors_map_to_problem_details() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let alice = create_player(&state, "alice").await?;
    let bob = create_player(&state, "bob").await?;
    let outsider = create_player(&state, "eve").await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/matches")
        .set_json(json!({ "player1Id": alice.id, "player2Id": bob.id }))
        .to_request();
    let created = expect_json(test::call_service(&app, req).await, StatusCode::CREATED).await;
    let match_id = created["id"].as_i64().expect("numeric id");

    let resp = test::call_service(&app, move_request(match_id, alice.id, "lizard")).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "INVALID_MOVE", Some("lizard")).await;

    let resp = test::call_service(&app, move_request(match_id, outsider.id, "rock")).await;
    assert_problem(resp, StatusCode::FORBIDDEN, "NOT_A_PARTICIPANT", None).await;

    submit(&app, match_id, alice.id, "rock").await;
    let resp = test::call_service(&app, move_request(match_id, alice.id, "paper")).await;
    assert_problem(resp, StatusCode::CONFLICT, "ALREADY_MOVED", None).await;

    let resp = test::call_service(&app, move_request(987_654, alice.id, "rock")).await;
    assert_problem(
        resp,
        StatusCode::NOT_FOUND,
        "MATCH_NOT_FOUND",
        Some("Match 987654 not found"),
    )
    .await;

    // Invalid move wins over a missing match
    let resp = test::call_service(&app, move_request(987_654, alice.id, "spock")).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "INVALID_MOVE", None).await;

    let resp = test::call_service(&app, move_request(-3, alice.id, "rock")).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "INVALID_MATCH_ID", None).await;
    Ok(())
}

#[actix_web::test]
async fn match_creation_errors() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let alice = create_player(&state, "alice").await?;
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/matches")
        .set_json(json!({ "player1Id": alice.id, "player2Id": alice.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "SAME_PLAYER_MATCH", None).await;

    let req = test::TestRequest::post()
        .uri("/api/matches")
        .set_json(json!({ "player1Id": alice.id, "player2Id": 555_555 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(
        resp,
        StatusCode::NOT_FOUND,
        "PLAYER_NOT_FOUND",
        Some("Player 555555 not found"),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/matches")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"player1Id\": 1,")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST", None).await;

    let req = test::TestRequest::post()
        .uri("/api/matches")
        .set_json(json!({ "player1Id": "one", "player2Id": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST", None).await;
    Ok(())
}
