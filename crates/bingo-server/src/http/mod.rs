//! REST API surface.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `errors` | Typed [`errors::ApiError`] with status mapping and wire form |
//! | `sessions` | Create/view sessions, toggle completions |
//! | `boards` | Issue boards, board views, rerolls |

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::websocket::connection::ws_handler;

pub mod boards;
pub mod errors;
pub mod sessions;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/sessions", post(sessions::create_session))
        .route("/api/sessions/{id}", get(sessions::get_session))
        .route(
            "/api/sessions/{id}/completed",
            post(sessions::toggle_completion),
        )
        .route(
            "/api/sessions/{id}/boards",
            post(boards::create_board).get(boards::list_boards),
        )
        .route(
            "/api/sessions/{id}/boards/{boardId}",
            get(boards::get_board),
        )
        .route(
            "/api/sessions/{id}/boards/{boardId}/reroll",
            post(boards::reroll_board),
        )
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
