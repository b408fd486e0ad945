//! WebSocket subscriptions and change-event fan-out.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `broadcast` | Fan-out hub: register/unregister, bounded buffers, slow-viewer eviction |
//! | `connection` | WebSocket upgrade, subscribe frame, per-connection write loop |
//! | `events` | Wire envelope around [`bingo_core::events::GameEvent`] |
//!
//! ## Data Flow
//!
//! HTTP mutation handlers publish through `broadcast`; each registered
//! viewer's `connection` write loop forwards buffered messages to its
//! socket until the client disconnects or falls too far behind.

pub mod broadcast;
pub mod connection;
pub mod events;
