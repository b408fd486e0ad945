//! Process-wide session registry.
//!
//! Maps session ids to live session handles. Initialized empty at startup
//! and optionally rehydrated from persisted snapshots. Injected into
//! handlers via axum state rather than accessed as a global.
//!
//! Each session sits behind its own `tokio::sync::RwLock`: that lock is
//! the per-session exclusion mechanism required for every mutation, while
//! reads for rendering may run concurrently. Distinct sessions never
//! contend with each other, and the registry's outer lock is held only
//! long enough to resolve a handle.

use std::collections::HashMap;
use std::sync::Arc;

use bingo_core::session::Session;
use bingo_store::SnapshotStore;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Shared handle to one session.
pub type SessionHandle = Arc<RwLock<Session>>;

/// Process-scoped mapping from session id to session.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session and return its handle.
    ///
    /// Session ids are generated with enough entropy that collisions do
    /// not occur in practice; a duplicate id is logged and replaced.
    pub async fn insert(&self, session: Session) -> SessionHandle {
        let id = session.id().to_string();
        let handle: SessionHandle = Arc::new(RwLock::new(session));
        let mut sessions = self.sessions.write().await;
        if sessions.insert(id.clone(), Arc::clone(&handle)).is_some() {
            warn!(session_id = %id, "replaced existing session with duplicate id");
        }
        handle
    }

    /// Resolve a session handle by id.
    pub async fn get(&self, id: &str) -> Option<SessionHandle> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned()
    }

    /// Number of registered sessions.
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    /// All registered session ids.
    pub async fn session_ids(&self) -> Vec<String> {
        let sessions = self.sessions.read().await;
        sessions.keys().cloned().collect()
    }

    /// Restore every persisted session at process start.
    ///
    /// Returns the number of sessions restored. A store failure leaves the
    /// registry empty; the process still starts and serves new sessions.
    pub async fn hydrate(&self, store: &dyn SnapshotStore) -> usize {
        match store.load_all() {
            Ok(snapshots) => {
                let count = snapshots.len();
                for session in snapshots {
                    let _handle = self.insert(session).await;
                }
                info!(count, "restored sessions from snapshots");
                count
            }
            Err(e) => {
                warn!(error = %e, "failed to load session snapshots, starting empty");
                0
            }
        }
    }
}
