use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use tennis_players_api::db::{self, InMemoryPlayerStore, SqlitePlayerStore};
use tennis_players_api::{router, PlayerService};

fn app() -> Router {
    router(PlayerService::new(Arc::new(InMemoryPlayerStore::new())))
}

async fn sqlite_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::init_schema(&pool).await.unwrap();
    router(PlayerService::new(Arc::new(SqlitePlayerStore::new(pool))))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

fn player(first_name: &str, last_name: &str, points: i32) -> Value {
    json!({
        "firstName": first_name,
        "lastName": last_name,
        "birthDate": "1986-06-03",
        "points": points,
    })
}

fn standings(players: &Value) -> Vec<(String, u64)> {
    players
        .as_array()
        .unwrap()
        .iter()
        .map(|p| {
            (
                p["lastName"].as_str().unwrap().to_string(),
                p["rank"]["position"].as_u64().unwrap(),
            )
        })
        .collect()
}

#[tokio::test]
async fn health_check_reports_ok() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_then_fetch_player() {
    let app = app();

    let nadal = player("Rafael", "Nadal", 5000);
    let (status, created) = send(&app, Method::POST, "/players", Some(nadal)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["rank"]["position"], 1);

    let id = created["identifier"].as_str().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/players/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["firstName"], "Rafael");
    assert_eq!(fetched["birthDate"], "1986-06-03");
    assert_eq!(fetched["rank"]["points"], 5000);
}

#[tokio::test]
async fn duplicate_player_is_a_bad_request() {
    let app = app();
    send(&app, Method::POST, "/players", Some(player("Rafael", "Nadal", 5000))).await;

    let duplicate = player("Rafael", "Nadal", 1);
    let (status, body) = send(&app, Method::POST, "/players", Some(duplicate)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Player with first name Rafael, last name Nadal and birth date 1986-06-03 already exists."
    );
}

#[tokio::test]
async fn invalid_body_is_rejected_before_the_service() {
    let app = app();

    let (status, _) = send(&app, Method::POST, "/players", Some(player(" ", "Nadal", 5000))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, players) = send(&app, Method::GET, "/players", None).await;
    assert_eq!(players, json!([]));
}

#[tokio::test]
async fn unknown_player_is_not_found() {
    let id = uuid::Uuid::new_v4();

    let (status, body) = send(&app(), Method::GET, &format!("/players/{id}"), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "404 Not Found");
    assert_eq!(
        body["message"],
        format!("Player with identifier {id} could not be found.")
    );
}

#[tokio::test]
async fn malformed_identifier_is_a_bad_request() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/players/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_recomputes_positions() {
    let app = app();
    let (_, nadal) = send(&app, Method::POST, "/players", Some(player("Rafael", "Nadal", 5000)))
        .await;
    send(&app, Method::POST, "/players", Some(player("Novak", "Djokovic", 4000))).await;
    send(&app, Method::POST, "/players", Some(player("Roger", "Federer", 3000))).await;

    let mut update = player("Rafael", "NadalTest", 1000);
    update["identifier"] = nadal["identifier"].clone();
    let (status, updated) = send(&app, Method::PUT, "/players", Some(update)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["identifier"], nadal["identifier"]);
    assert_eq!(updated["rank"]["position"], 3);

    let (_, players) = send(&app, Method::GET, "/players", None).await;
    assert_eq!(
        standings(&players),
        vec![
            ("Djokovic".to_string(), 1),
            ("Federer".to_string(), 2),
            ("NadalTest".to_string(), 3),
        ]
    );
}

#[tokio::test]
async fn update_of_unknown_player_is_not_found() {
    let mut update = player("John", "Doe", 1);
    update["identifier"] = json!(uuid::Uuid::new_v4().to_string());

    let (status, _) = send(&app(), Method::PUT, "/players", Some(update)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_keeps_sqlite_positions_dense() {
    let app = sqlite_app().await;
    send(&app, Method::POST, "/players", Some(player("Rafael", "NadalTest", 3000))).await;
    send(&app, Method::POST, "/players", Some(player("Roger", "FedererTest", 2000))).await;
    let djokovic = player("Novak", "DjokovicTest", 1000);
    let (_, djokovic) = send(&app, Method::POST, "/players", Some(djokovic)).await;

    let id = djokovic["identifier"].as_str().unwrap();
    let (status, body) = send(&app, Method::DELETE, &format!("/players/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (_, players) = send(&app, Method::GET, "/players", None).await;
    assert_eq!(
        standings(&players),
        vec![("NadalTest".to_string(), 1), ("FedererTest".to_string(), 2)]
    );

    let (status, _) = send(&app, Method::DELETE, &format!("/players/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sqlite_backed_players_share_positions_on_ties() {
    let app = sqlite_app().await;
    send(&app, Method::POST, "/players", Some(player("Rafael", "Nadal", 1000))).await;
    send(&app, Method::POST, "/players", Some(player("Roger", "Federer", 900))).await;
    send(&app, Method::POST, "/players", Some(player("Novak", "Djokovic", 1000))).await;

    let (status, players) = send(&app, Method::GET, "/players", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        standings(&players),
        vec![
            ("Djokovic".to_string(), 1),
            ("Nadal".to_string(), 1),
            ("Federer".to_string(), 2),
        ]
    );
}

#[tokio::test]
async fn sqlite_update_onto_another_players_key_is_a_bad_request() {
    let app = sqlite_app().await;
    send(&app, Method::POST, "/players", Some(player("Rafael", "Nadal", 5000))).await;
    let federer = player("Roger", "Federer", 3000);
    let (_, federer) = send(&app, Method::POST, "/players", Some(federer)).await;

    let mut update = player("Rafael", "Nadal", 3000);
    update["identifier"] = federer["identifier"].clone();
    let (status, body) = send(&app, Method::PUT, "/players", Some(update)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Player with first name Rafael, last name Nadal and birth date 1986-06-03 already exists."
    );

    let (_, players) = send(&app, Method::GET, "/players", None).await;
    assert_eq!(
        standings(&players),
        vec![("Nadal".to_string(), 1), ("Federer".to_string(), 2)]
    );
}
