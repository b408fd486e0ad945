//! # bingo-server
//!
//! HTTP API, WebSocket subscriptions, and the process-wide session
//! registry for the bingo service.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `registry` | Session id → session handle map, startup rehydration |
//! | `state` | Shared axum state: registry, hub, store, settings |
//! | `http` | REST routes for sessions, boards, toggles, rerolls |
//! | `websocket` | Subscription endpoint and change-event fan-out |
//!
//! ## Data Flow
//!
//! An HTTP handler resolves a session from `registry`, takes that
//! session's write lock, mutates, publishes a notification through the
//! `websocket` hub, and schedules a fire-and-forget snapshot write.

#![deny(unsafe_code)]

pub mod http;
pub mod registry;
pub mod state;
pub mod websocket;
