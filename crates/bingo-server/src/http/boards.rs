//! Board issuance, views, and rerolls.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use bingo_core::GameError;
use bingo_core::board::Board;
use bingo_core::events::GameEvent;
use bingo_core::session::RerollOutcome;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::http::errors::ApiError;
use crate::http::sessions::resolve;
use crate::state::AppState;
use crate::websocket::events::Notification;

/// Body of `POST /api/sessions/{id}/boards`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    /// Participant identity; doubles as the board id.
    pub participant_id: String,
    /// Display name shown to other participants.
    pub display_name: String,
    /// Reroll budget; defaults from settings. Ignored if the participant
    /// already holds a board.
    #[serde(default)]
    pub rerolls: Option<u32>,
}

/// Board view for everyone except the board owner: no secret.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    /// Board id (participant identity).
    pub id: String,
    /// Display name shown to other participants.
    pub display_name: String,
    /// Remaining reroll budget.
    pub rerolls: u32,
}

impl From<&Board> for BoardSummary {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id.clone(),
            display_name: board.display_name.clone(),
            rerolls: board.rerolls,
        }
    }
}

/// One board cell with its session-wide completion mark.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// The cell's word.
    pub word: String,
    /// Whether the word is completed session-wide.
    pub completed: bool,
}

/// Single-board view: summary plus marked cells.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    /// The board's public summary.
    #[serde(flatten)]
    pub summary: BoardSummary,
    /// Cells in row-major order, marked from the completion map.
    pub cells: Vec<Cell>,
}

/// Body of `POST /api/sessions/{id}/boards/{boardId}/reroll`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RerollRequest {
    /// Board secret, not the session secret.
    pub secret: String,
    /// Board word to replace.
    pub word: String,
}

/// `POST /api/sessions/{id}/boards`
///
/// Get-or-create: the full board, secret included, goes only to the
/// participant making this call.
#[instrument(skip(state, req), fields(session_id = %id, participant = %req.participant_id))]
pub async fn create_board(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CreateBoardRequest>,
) -> Result<(StatusCode, Json<Board>), ApiError> {
    let budget = req.rerolls.unwrap_or(state.settings.game.total_rerolls);
    let handle = resolve(&state, &id).await?;
    let mut session = handle.write().await;
    let board = {
        let mut rng = rand::rng();
        session.get_or_create_board(&req.participant_id, &req.display_name, budget, &mut rng)?
    };
    state.persist(&session);
    Ok((StatusCode::CREATED, Json(board)))
}

/// `GET /api/sessions/{id}/boards`
pub async fn list_boards(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<BoardSummary>>, ApiError> {
    let handle = resolve(&state, &id).await?;
    let session = handle.read().await;
    let summaries = session.boards().into_iter().map(BoardSummary::from).collect();
    Ok(Json(summaries))
}

/// `GET /api/sessions/{id}/boards/{boardId}`
pub async fn get_board(
    State(state): State<AppState>,
    Path((id, board_id)): Path<(String, String)>,
) -> Result<Json<BoardView>, ApiError> {
    let handle = resolve(&state, &id).await?;
    let session = handle.read().await;
    let board = session
        .board(&board_id)
        .ok_or(GameError::BoardNotFound { id: board_id })?;
    let cells = board
        .content
        .iter()
        .map(|word| Cell {
            word: word.clone(),
            completed: session.completed().get(word).copied().unwrap_or(false),
        })
        .collect();
    Ok(Json(BoardView {
        summary: BoardSummary::from(board),
        cells,
    }))
}

/// `POST /api/sessions/{id}/boards/{boardId}/reroll`
#[instrument(skip(state, req), fields(session_id = %id, board_id = %board_id))]
pub async fn reroll_board(
    State(state): State<AppState>,
    Path((id, board_id)): Path<(String, String)>,
    Json(req): Json<RerollRequest>,
) -> Result<Json<RerollOutcome>, ApiError> {
    let handle = resolve(&state, &id).await?;
    let mut session = handle.write().await;
    let outcome = {
        let mut rng = rand::rng();
        session.reroll(&board_id, &req.secret, &req.word, &mut rng)?
    };
    state.persist(&session);
    drop(session);

    state
        .hub
        .publish(&Notification::new(&id, GameEvent::BoardRerolled { board_id }))
        .await;
    Ok(Json(outcome))
}
