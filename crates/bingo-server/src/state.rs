//! Shared server state injected into every handler.

use std::sync::Arc;

use bingo_core::session::Session;
use bingo_settings::BingoSettings;
use bingo_store::SnapshotStore;
use tracing::warn;

use crate::registry::SessionRegistry;
use crate::websocket::broadcast::BroadcastHub;

/// Axum application state: the registry, the fan-out hub, the snapshot
/// store, and a settings snapshot taken at startup.
#[derive(Clone)]
pub struct AppState {
    /// Session id → session handle map.
    pub registry: Arc<SessionRegistry>,
    /// Change-event fan-out to connected viewers.
    pub hub: Arc<BroadcastHub>,
    /// Snapshot persistence.
    pub store: Arc<dyn SnapshotStore>,
    /// Configuration snapshot.
    pub settings: Arc<BingoSettings>,
}

impl AppState {
    /// Assemble the server state.
    pub fn new(
        registry: Arc<SessionRegistry>,
        hub: Arc<BroadcastHub>,
        store: Arc<dyn SnapshotStore>,
        settings: Arc<BingoSettings>,
    ) -> Self {
        Self {
            registry,
            hub,
            store,
            settings,
        }
    }

    /// Schedule a fire-and-forget snapshot write for a mutated session.
    ///
    /// The in-memory mutation is the source of truth; the caller is never
    /// blocked on the durable write. A write failure is logged, not
    /// propagated, and never rolls back state.
    pub fn persist(&self, session: &Session) {
        let snapshot = session.clone();
        let store = Arc::clone(&self.store);
        let _task = tokio::task::spawn_blocking(move || {
            if let Err(e) = store.save(&snapshot) {
                warn!(
                    session_id = snapshot.id(),
                    error = %e,
                    "failed to persist session snapshot"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bingo_core::pool::WordPool;
    use bingo_store::JsonFileStore;

    fn make_state(dir: &std::path::Path) -> AppState {
        AppState::new(
            Arc::new(SessionRegistry::new()),
            Arc::new(BroadcastHub::new()),
            Arc::new(JsonFileStore::new(dir).unwrap()),
            Arc::new(BingoSettings::default()),
        )
    }

    #[tokio::test]
    async fn persist_writes_snapshot_in_background() {
        let dir = tempfile::tempdir().unwrap();
        let state = make_state(dir.path());
        let session = Session::new(
            "test".into(),
            "owner".into(),
            None,
            4,
            WordPool::parse("a\nb\nc\nd\ne\n"),
        )
        .unwrap();

        state.persist(&session);

        // The write is async; poll briefly for the file to appear.
        let expected = dir.path().join(format!("test_{}.json", session.id()));
        for _ in 0..50 {
            if expected.exists() {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!("snapshot file never appeared");
    }
}
