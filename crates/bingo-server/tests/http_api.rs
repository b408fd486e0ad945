//! Router-level API tests: real router, real store, temp directories.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bingo_server::http;
use bingo_server::registry::SessionRegistry;
use bingo_server::state::AppState;
use bingo_server::websocket::broadcast::BroadcastHub;
use bingo_settings::BingoSettings;
use bingo_store::JsonFileStore;
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    _dirs: (tempfile::TempDir, tempfile::TempDir),
}

fn test_app() -> TestApp {
    let pools = tempfile::tempdir().unwrap();
    let storage = tempfile::tempdir().unwrap();
    let words = (0..12).map(|i| format!("w{i}\n")).collect::<String>();
    std::fs::write(pools.path().join("movies.txt"), words).unwrap();

    let mut settings = BingoSettings::default();
    settings.game.pools_dir = pools.path().to_string_lossy().into_owned();
    settings.game.total_rerolls = 2;
    settings.storage.path = storage.path().to_string_lossy().into_owned();

    let state = AppState::new(
        Arc::new(SessionRegistry::new()),
        Arc::new(BroadcastHub::new()),
        Arc::new(JsonFileStore::new(storage.path()).unwrap()),
        Arc::new(settings),
    );
    TestApp {
        router: http::router(state),
        _dirs: (pools, storage),
    }
}

async fn request(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(v) => builder.body(Body::from(v.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_session(router: &Router, board_size: usize) -> Value {
    let (status, body) = request(
        router,
        "POST",
        "/api/sessions",
        Some(json!({"kind": "movies", "ownerId": "owner1", "boardSize": board_size})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn create_session_returns_id_secret_and_words() {
    let app = test_app();
    let session = create_session(&app.router, 9).await;
    assert_eq!(session["id"].as_str().unwrap().len(), 16);
    assert_eq!(session["secret"].as_str().unwrap().len(), 8);
    assert_eq!(session["kind"], "movies");
    assert_eq!(session["boardSize"], 9);
    assert_eq!(session["words"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn create_session_unknown_kind_is_404() {
    let app = test_app();
    let (status, body) = request(
        &app.router,
        "POST",
        "/api/sessions",
        Some(json!({"kind": "missing", "ownerId": "o"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "POOL_UNAVAILABLE");
}

#[tokio::test]
async fn create_session_rejects_traversal_kind() {
    let app = test_app();
    let (status, body) = request(
        &app.router,
        "POST",
        "/api/sessions",
        Some(json!({"kind": "../movies", "ownerId": "o"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "POOL_UNAVAILABLE");
}

#[tokio::test]
async fn create_session_rejects_non_square_board() {
    let app = test_app();
    let (status, body) = request(
        &app.router,
        "POST",
        "/api/sessions",
        Some(json!({"kind": "movies", "ownerId": "o", "boardSize": 24})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INVALID_BOARD_SIZE");
}

#[tokio::test]
async fn create_session_rejects_board_larger_than_pool() {
    let app = test_app();
    let (status, body) = request(
        &app.router,
        "POST",
        "/api/sessions",
        Some(json!({"kind": "movies", "ownerId": "o", "boardSize": 25})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "INSUFFICIENT_POOL");
}

#[tokio::test]
async fn get_unknown_session_is_404() {
    let app = test_app();
    let (status, body) = request(&app.router, "GET", "/api/sessions/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn get_session_shows_completion_map() {
    let app = test_app();
    let session = create_session(&app.router, 9).await;
    let id = session["id"].as_str().unwrap();

    let (status, body) = request(&app.router, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ownerId"], "owner1");
    let completed = body["completed"].as_object().unwrap();
    assert_eq!(completed.len(), 12);
    assert!(completed.values().all(|v| v == false));
}

#[tokio::test]
async fn board_issuance_is_idempotent() {
    let app = test_app();
    let session = create_session(&app.router, 9).await;
    let id = session["id"].as_str().unwrap();
    let uri = format!("/api/sessions/{id}/boards");
    let req = json!({"participantId": "u1", "displayName": "User One"});

    let (status, first) = request(&app.router, "POST", &uri, Some(req.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["id"], "u1");
    assert_eq!(first["content"].as_array().unwrap().len(), 9);
    assert_eq!(first["rerolls"], 2, "budget defaults from settings");
    assert!(!first["secret"].as_str().unwrap().is_empty());

    let (_, second) = request(&app.router, "POST", &uri, Some(req)).await;
    assert_eq!(second, first);
}

#[tokio::test]
async fn board_list_never_leaks_secrets() {
    let app = test_app();
    let session = create_session(&app.router, 9).await;
    let id = session["id"].as_str().unwrap();
    let uri = format!("/api/sessions/{id}/boards");
    for user in ["zeta", "alpha"] {
        let _ = request(
            &app.router,
            "POST",
            &uri,
            Some(json!({"participantId": user, "displayName": user})),
        )
        .await;
    }

    let (status, body) = request(&app.router, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let boards = body.as_array().unwrap();
    assert_eq!(boards.len(), 2);
    // Ordered by board id.
    assert_eq!(boards[0]["id"], "alpha");
    assert_eq!(boards[1]["id"], "zeta");
    for board in boards {
        assert!(board.get("secret").is_none(), "secret leaked: {board}");
        assert!(board.get("content").is_none());
    }
}

#[tokio::test]
async fn board_view_marks_completed_cells() {
    let app = test_app();
    let session = create_session(&app.router, 9).await;
    let id = session["id"].as_str().unwrap();
    let secret = session["secret"].as_str().unwrap();
    let (_, board) = request(
        &app.router,
        "POST",
        &format!("/api/sessions/{id}/boards"),
        Some(json!({"participantId": "u1", "displayName": "U"})),
    )
    .await;
    let word = board["content"][0].as_str().unwrap();

    let (status, _) = request(
        &app.router,
        "POST",
        &format!("/api/sessions/{id}/completed"),
        Some(json!({"secret": secret, "word": word})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, view) = request(
        &app.router,
        "GET",
        &format!("/api/sessions/{id}/boards/u1"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(view.get("secret").is_none());
    let cells = view["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 9);
    assert_eq!(cells[0]["word"], *word);
    assert_eq!(cells[0]["completed"], true);
    assert!(cells[1..].iter().all(|c| c["completed"] == false));
}

#[tokio::test]
async fn toggle_requires_session_secret() {
    let app = test_app();
    let session = create_session(&app.router, 9).await;
    let id = session["id"].as_str().unwrap();
    let word = session["words"][0].as_str().unwrap();

    let (status, body) = request(
        &app.router,
        "POST",
        &format!("/api/sessions/{id}/completed"),
        Some(json!({"secret": "wrong", "word": word})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn toggle_unknown_word_is_400() {
    let app = test_app();
    let session = create_session(&app.router, 9).await;
    let id = session["id"].as_str().unwrap();
    let secret = session["secret"].as_str().unwrap();

    let (status, body) = request(
        &app.router,
        "POST",
        &format!("/api/sessions/{id}/completed"),
        Some(json!({"secret": secret, "word": "zzz"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "UNKNOWN_WORD");
}

#[tokio::test]
async fn toggle_alternates() {
    let app = test_app();
    let session = create_session(&app.router, 9).await;
    let id = session["id"].as_str().unwrap();
    let secret = session["secret"].as_str().unwrap();
    let word = session["words"][0].as_str().unwrap();
    let uri = format!("/api/sessions/{id}/completed");
    let req = json!({"secret": secret, "word": word});

    let (_, first) = request(&app.router, "POST", &uri, Some(req.clone())).await;
    assert_eq!(first["completed"], true);
    let (_, second) = request(&app.router, "POST", &uri, Some(req)).await;
    assert_eq!(second["completed"], false);
}

#[tokio::test]
async fn reroll_flow_decrements_and_replaces() {
    let app = test_app();
    let session = create_session(&app.router, 9).await;
    let id = session["id"].as_str().unwrap();
    let (_, board) = request(
        &app.router,
        "POST",
        &format!("/api/sessions/{id}/boards"),
        Some(json!({"participantId": "u1", "displayName": "U"})),
    )
    .await;
    let board_secret = board["secret"].as_str().unwrap();
    let target = board["content"][0].as_str().unwrap();
    let uri = format!("/api/sessions/{id}/boards/u1/reroll");

    let (status, body) = request(
        &app.router,
        "POST",
        &uri,
        Some(json!({"secret": "wrong", "word": target})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{body}");

    let (status, outcome) = request(
        &app.router,
        "POST",
        &uri,
        Some(json!({"secret": board_secret, "word": target})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["remainingRerolls"], 1);
    let new_word = outcome["newWord"].as_str().unwrap();
    assert_ne!(new_word, target);
    assert!(!board["content"].as_array().unwrap().iter().any(|w| w == new_word));
}

#[tokio::test]
async fn reroll_with_exhausted_budget_is_409() {
    let app = test_app();
    let session = create_session(&app.router, 9).await;
    let id = session["id"].as_str().unwrap();
    let (_, board) = request(
        &app.router,
        "POST",
        &format!("/api/sessions/{id}/boards"),
        Some(json!({"participantId": "u1", "displayName": "U", "rerolls": 0})),
    )
    .await;
    let (status, body) = request(
        &app.router,
        "POST",
        &format!("/api/sessions/{id}/boards/u1/reroll"),
        Some(json!({
            "secret": board["secret"].as_str().unwrap(),
            "word": board["content"][0].as_str().unwrap(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "NO_REROLLS_REMAINING");
}

#[tokio::test]
async fn reroll_unknown_board_is_404() {
    let app = test_app();
    let session = create_session(&app.router, 9).await;
    let id = session["id"].as_str().unwrap();
    let (status, body) = request(
        &app.router,
        "POST",
        &format!("/api/sessions/{id}/boards/ghost/reroll"),
        Some(json!({"secret": "x", "word": "w0"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "BOARD_NOT_FOUND");
}
