//! Error taxonomy for session and board operations.
//!
//! All variants are returned to the immediate caller as typed failures;
//! none are fatal to the process. Rejected operations leave session state
//! unchanged.

use thiserror::Error;

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors produced by session and board operations.
#[derive(Debug, Error)]
pub enum GameError {
    /// No session with the given id is registered.
    #[error("session '{id}' not found")]
    SessionNotFound {
        /// The unknown session id.
        id: String,
    },

    /// No board with the given id exists in the session.
    #[error("board '{id}' not found")]
    BoardNotFound {
        /// The unknown board id.
        id: String,
    },

    /// A submitted secret did not match the stored one.
    #[error("secret mismatch")]
    Unauthorized,

    /// The word is not a member of the session's pool.
    #[error("word '{word}' is not in the pool")]
    UnknownWord {
        /// The unknown word.
        word: String,
    },

    /// The reroll target is not on the board.
    #[error("word '{word}' is not on the board")]
    WordNotOnBoard {
        /// The missing word.
        word: String,
    },

    /// The board's reroll budget is used up.
    #[error("no rerolls remaining")]
    NoRerollsRemaining,

    /// Every eligible replacement word is taken or completed.
    #[error("no replacement words left in the pool")]
    PoolExhausted,

    /// The pool is too small for the requested board size.
    #[error("pool holds {available} words, board needs {required}")]
    InsufficientPool {
        /// Words required to fill one board.
        required: usize,
        /// Words available in the pool.
        available: usize,
    },

    /// The board size is not a perfect square, so the win geometry is
    /// undefined.
    #[error("board size {size} is not a perfect square")]
    InvalidBoardSize {
        /// The rejected size.
        size: usize,
    },

    /// The word list file for a pool kind could not be read.
    #[error("word pool '{kind}' unavailable")]
    PoolUnavailable {
        /// The requested pool kind.
        kind: String,
        /// Underlying read failure.
        #[source]
        source: std::io::Error,
    },
}
