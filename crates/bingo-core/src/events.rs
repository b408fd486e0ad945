//! Change notifications fanned out to live viewers.
//!
//! Completion toggles carry the toggled word so dependent views can update
//! a single cell. Rerolls are board-private, so `board.rerolled` carries
//! only the board id; it exists to prompt viewers to refresh. Board
//! issuance emits no event at all.

use serde::{Deserialize, Serialize};

/// A state-change notification for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A pool word was toggled; visible on every board in the session.
    #[serde(rename = "completion.toggled")]
    CompletionToggled {
        /// The toggled word.
        word: String,
        /// Its new completion value.
        completed: bool,
    },

    /// One board swapped a word; no payload beyond the board id.
    #[serde(rename = "board.rerolled")]
    BoardRerolled {
        /// The rerolled board.
        #[serde(rename = "boardId")]
        board_id: String,
    },

    /// One or more boards newly completed a line. Consumed by the chat
    /// integration to announce the result.
    #[serde(rename = "session.finished")]
    SessionFinished {
        /// The newly winning boards.
        winners: Vec<Winner>,
    },
}

/// A board that completed a line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    /// Winning board id.
    pub board_id: String,
    /// The board owner's display name.
    pub display_name: String,
}
