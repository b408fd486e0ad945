//! Wire envelope for broadcast notifications.

use bingo_core::events::GameEvent;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A [`GameEvent`] stamped with its session and publish time.
///
/// Serializes flat: `{"type": "completion.toggled", "sessionId": …,
/// "timestamp": …, "word": …, "completed": …}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// The session the change belongs to.
    pub session_id: String,
    /// RFC 3339 publish timestamp (millisecond precision).
    pub timestamp: String,
    /// The change itself.
    #[serde(flatten)]
    pub event: GameEvent,
}

impl Notification {
    /// Stamp an event with its session and the current time.
    pub fn new(session_id: impl Into<String>, event: GameEvent) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            event,
        }
    }
}
