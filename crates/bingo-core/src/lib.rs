//! # bingo-core
//!
//! Foundation crate for the bingo service: the session/board state engine
//! shared by the HTTP server and any other caller.
//!
//! - **Ids**: [`ids::token`] for opaque session/board/secret tokens
//! - **Word pools**: [`pool::WordPool`], parsed from plain-text word lists
//! - **Boards**: [`board::Board`] and the partial-shuffle generator
//! - **Win detection**: [`win::is_winner`] over rows, columns, diagonals
//! - **Sessions**: [`session::Session`] for completion state, board issuance,
//!   the reroll engine, and snapshot (de)serialization
//! - **Events**: [`events::GameEvent`] change notifications for fan-out
//! - **Errors**: [`errors::GameError`] hierarchy via `thiserror`
//!
//! ## Crate Position
//!
//! Foundation crate. Pure logic: no IO, no async. Callers are responsible
//! for locking (one writer per session), persistence, and broadcast.

#![deny(unsafe_code)]

pub mod board;
pub mod errors;
pub mod events;
pub mod ids;
pub mod pool;
pub mod session;
pub mod win;

pub use errors::{GameError, Result};
