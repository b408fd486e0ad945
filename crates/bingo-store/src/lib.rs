//! # bingo-store
//!
//! Session snapshot persistence. The core engine depends only on the
//! abstract [`SnapshotStore`] capability; this crate provides the
//! production implementation, [`JsonFileStore`]: one pretty-printed JSON
//! file per session under a storage directory, named `<kind>_<id>.json`.
//!
//! Snapshots are the serialized [`Session`] itself: saving is a full
//! rewrite, restoring is plain deserialization with identifiers and
//! secrets preserved verbatim.

#![deny(unsafe_code)]

pub mod errors;

pub use errors::{Result, StoreError};

use std::path::{Path, PathBuf};

use bingo_core::session::Session;
use tracing::{debug, warn};

/// Abstract snapshot persistence, injected into the server.
pub trait SnapshotStore: Send + Sync {
    /// Persist one session snapshot, replacing any previous one.
    fn save(&self, session: &Session) -> Result<()>;

    /// Load every persisted session (process-start rehydration).
    fn load_all(&self) -> Result<Vec<Session>>;
}

/// JSON-file-per-session store.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Snapshot file for a session.
    fn session_path(&self, session: &Session) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", session.kind(), session.id()))
    }

    /// The storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SnapshotStore for JsonFileStore {
    fn save(&self, session: &Session) -> Result<()> {
        let path = self.session_path(session);
        let json = serde_json::to_vec_pretty(session)?;
        std::fs::write(&path, json)?;
        debug!(session_id = session.id(), ?path, "session snapshot written");
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Session>> {
        let mut sessions = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let text = std::fs::read_to_string(&path)?;
            match serde_json::from_str::<Session>(&text) {
                Ok(session) => sessions.push(session),
                // One corrupt file must not block process start.
                Err(e) => warn!(?path, error = %e, "skipping unreadable snapshot"),
            }
        }
        Ok(sessions)
    }
}
