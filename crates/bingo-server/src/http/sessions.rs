//! Session lifecycle and completion handlers.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use bingo_core::GameError;
use bingo_core::events::{GameEvent, Winner};
use bingo_core::pool::WordPool;
use bingo_core::session::{Session, validate_board_size};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::http::errors::ApiError;
use crate::registry::SessionHandle;
use crate::state::AppState;
use crate::websocket::events::Notification;

/// Body of `POST /api/sessions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Word-pool kind to draw from (`<poolsDir>/<kind>.txt`).
    pub kind: String,
    /// The creating user.
    pub owner_id: String,
    /// Optional group/guild the session belongs to.
    #[serde(default)]
    pub guild_id: Option<String>,
    /// Cells per board; defaults from settings. Must be a perfect square.
    #[serde(default)]
    pub board_size: Option<usize>,
}

/// Response to a successful session create.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    /// Generated session id.
    pub id: String,
    /// Session-wide mutation secret; returned only here.
    pub secret: String,
    /// Word-pool kind the session was created from.
    pub kind: String,
    /// Cells per board.
    pub board_size: usize,
    /// The full pool.
    pub words: Vec<String>,
}

/// Public session view; never contains the session secret.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// Session id.
    pub id: String,
    /// Word-pool kind.
    pub kind: String,
    /// The creating user.
    pub owner_id: String,
    /// Optional group/guild the session belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    /// Cells per board.
    pub board_size: usize,
    /// The full pool, in pool order.
    pub words: Vec<String>,
    /// Session-wide completion map.
    pub completed: HashMap<String, bool>,
}

/// Body of `POST /api/sessions/{id}/completed`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    /// Session secret.
    pub secret: String,
    /// Pool word to toggle.
    pub word: String,
}

/// Outcome of a completion toggle.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    /// The toggled word.
    pub word: String,
    /// Its new completion value.
    pub completed: bool,
}

/// Resolve a session handle or fail with 404.
pub(crate) async fn resolve(state: &AppState, id: &str) -> Result<SessionHandle, ApiError> {
    state
        .registry
        .get(id)
        .await
        .ok_or_else(|| GameError::SessionNotFound { id: id.to_string() }.into())
}

/// `POST /api/sessions`
#[instrument(skip(state, req), fields(kind = %req.kind))]
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), ApiError> {
    let board_size = req
        .board_size
        .unwrap_or(state.settings.game.default_board_size);
    validate_board_size(board_size)?;

    let pools_dir = std::path::Path::new(&state.settings.game.pools_dir);
    let pool = WordPool::load(pools_dir, &req.kind)?;
    let session = Session::new(req.kind, req.owner_id, req.guild_id, board_size, pool)?;

    let response = CreateSessionResponse {
        id: session.id().to_string(),
        secret: session.secret().to_string(),
        kind: session.kind().to_string(),
        board_size: session.board_size(),
        words: session.words().to_vec(),
    };
    info!(session_id = %response.id, words = response.words.len(), "session created");
    state.persist(&session);
    let _handle = state.registry.insert(session).await;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /api/sessions/{id}`
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let handle = resolve(&state, &id).await?;
    let session = handle.read().await;
    Ok(Json(SessionView {
        id: session.id().to_string(),
        kind: session.kind().to_string(),
        owner_id: session.owner_id().to_string(),
        guild_id: session.guild_id().map(String::from),
        board_size: session.board_size(),
        words: session.words().to_vec(),
        completed: session.completed().clone(),
    }))
}

/// `POST /api/sessions/{id}/completed`
///
/// Toggles one word under the session secret, then broadcasts the change
/// and, when the toggle pushes boards over the line, the finish event.
#[instrument(skip(state, req), fields(session_id = %id))]
pub async fn toggle_completion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let handle = resolve(&state, &id).await?;
    let mut session = handle.write().await;
    session.verify_secret(&req.secret)?;

    let winners_before: Vec<String> = session
        .finished_boards()
        .iter()
        .map(|b| b.id.clone())
        .collect();
    let completed = session.toggle_completion(&req.word)?;
    let new_winners: Vec<Winner> = session
        .finished_boards()
        .iter()
        .filter(|b| !winners_before.contains(&b.id))
        .map(|b| Winner {
            board_id: b.id.clone(),
            display_name: b.display_name.clone(),
        })
        .collect();

    state.persist(&session);
    drop(session);

    state
        .hub
        .publish(&Notification::new(
            &id,
            GameEvent::CompletionToggled {
                word: req.word.clone(),
                completed,
            },
        ))
        .await;
    if !new_winners.is_empty() {
        info!(winners = new_winners.len(), "session finished");
        state
            .hub
            .publish(&Notification::new(
                &id,
                GameEvent::SessionFinished { winners: new_winners },
            ))
            .await;
    }

    Ok(Json(ToggleResponse {
        word: req.word,
        completed,
    }))
}
