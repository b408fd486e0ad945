//! Sessions: the shared state of one bingo game.
//!
//! A session owns the word pool, the global completion map, and every
//! issued board. All mutations go through the methods here; callers hold
//! one write lock per session (see the server's registry) and are
//! responsible for persistence and broadcast after a successful mutation.
//!
//! The serialized form of [`Session`] is the persisted snapshot: restoring
//! is plain deserialization, with ids and secrets preserved verbatim.

use std::collections::HashMap;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::errors::GameError;
use crate::ids;
use crate::pool::WordPool;
use crate::win;

/// Reject board sizes whose row/column/diagonal geometry is undefined.
///
/// Configuration-time check, applied where sessions are created from
/// caller input. Test fixtures may build smaller non-square sessions
/// directly.
pub fn validate_board_size(size: usize) -> Result<(), GameError> {
    let side = size.isqrt();
    if size == 0 || side * side != size {
        return Err(GameError::InvalidBoardSize { size });
    }
    Ok(())
}

/// Outcome of a successful reroll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RerollOutcome {
    /// The replacement word now on the board.
    pub new_word: String,
    /// Rerolls left after this one.
    pub remaining_rerolls: u32,
}

/// One bingo game: a word pool, the global completion state, and the set
/// of issued boards.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    id: String,
    secret: String,
    owner_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    guild_id: Option<String>,
    kind: String,
    board_size: usize,
    pool: WordPool,
    completed: HashMap<String, bool>,
    boards: HashMap<String, Board>,
}

impl Session {
    /// Create a fresh session with a generated id and secret. Every pool
    /// word starts uncompleted.
    pub fn new(
        kind: String,
        owner_id: String,
        guild_id: Option<String>,
        board_size: usize,
        pool: WordPool,
    ) -> Result<Self, GameError> {
        if board_size > pool.len() {
            return Err(GameError::InsufficientPool {
                required: board_size,
                available: pool.len(),
            });
        }
        let completed = pool
            .words()
            .iter()
            .map(|w| (w.clone(), false))
            .collect();
        Ok(Self {
            id: ids::token(ids::SESSION_ID_LEN),
            secret: ids::token(ids::SECRET_LEN),
            owner_id,
            guild_id,
            kind,
            board_size,
            pool,
            completed,
            boards: HashMap::new(),
        })
    }

    /// Session id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Session-wide mutation secret.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// The creating user.
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Optional group/guild the session belongs to.
    pub fn guild_id(&self) -> Option<&str> {
        self.guild_id.as_deref()
    }

    /// The word-pool kind this session was created from.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Cells per board.
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// The pool words, in pool order.
    pub fn words(&self) -> &[String] {
        self.pool.words()
    }

    /// The global completion map (key set equals the pool).
    pub fn completed(&self) -> &HashMap<String, bool> {
        &self.completed
    }

    /// Look up a board by id.
    pub fn board(&self, board_id: &str) -> Option<&Board> {
        self.boards.get(board_id)
    }

    /// All boards, ordered by board id for stable rendering.
    pub fn boards(&self) -> Vec<&Board> {
        let mut boards: Vec<&Board> = self.boards.values().collect();
        boards.sort_by(|a, b| a.id.cmp(&b.id));
        boards
    }

    /// Compare a submitted session secret verbatim.
    pub fn verify_secret(&self, submitted: &str) -> Result<(), GameError> {
        if submitted == self.secret {
            Ok(())
        } else {
            Err(GameError::Unauthorized)
        }
    }

    /// Flip the completion flag for `word` and return the new value.
    pub fn toggle_completion(&mut self, word: &str) -> Result<bool, GameError> {
        if !self.pool.contains(word) {
            return Err(GameError::UnknownWord {
                word: word.to_string(),
            });
        }
        let flag = self.completed.entry(word.to_string()).or_insert(false);
        *flag = !*flag;
        debug!(session_id = %self.id, word, completed = *flag, "completion toggled");
        Ok(*flag)
    }

    /// Return the participant's board, creating it on first call.
    ///
    /// Repeat calls return the stored board unchanged; `display_name` and
    /// `reroll_budget` are ignored once a board exists.
    pub fn get_or_create_board<R: Rng + ?Sized>(
        &mut self,
        participant: &str,
        display_name: &str,
        reroll_budget: u32,
        rng: &mut R,
    ) -> Result<Board, GameError> {
        if let Some(existing) = self.boards.get(participant) {
            return Ok(existing.clone());
        }
        let board = Board::new(
            participant.to_string(),
            display_name.to_string(),
            &self.pool,
            self.board_size,
            reroll_budget,
            rng,
        )?;
        debug!(session_id = %self.id, board_id = participant, "board issued");
        let _prev = self.boards.insert(participant.to_string(), board.clone());
        Ok(board)
    }

    /// Swap `target_word` on a board for a random eligible replacement.
    ///
    /// Eligible words are pool words that are neither completed (a
    /// completed replacement would be a free win) nor already on this
    /// board (the no-duplicate invariant). A failed reroll leaves the
    /// board untouched.
    pub fn reroll<R: Rng + ?Sized>(
        &mut self,
        board_id: &str,
        secret: &str,
        target_word: &str,
        rng: &mut R,
    ) -> Result<RerollOutcome, GameError> {
        let board = self.boards.get(board_id).ok_or_else(|| GameError::BoardNotFound {
            id: board_id.to_string(),
        })?;
        if board.secret != secret {
            return Err(GameError::Unauthorized);
        }
        if board.rerolls == 0 {
            return Err(GameError::NoRerollsRemaining);
        }
        let position = board
            .content
            .iter()
            .position(|w| w == target_word)
            .ok_or_else(|| GameError::WordNotOnBoard {
                word: target_word.to_string(),
            })?;

        let candidates: Vec<&String> = self
            .pool
            .words()
            .iter()
            .filter(|w| !self.completed.get(*w).copied().unwrap_or(false))
            .filter(|w| !board.content.contains(w))
            .collect();
        let new_word = (*candidates.choose(rng).ok_or(GameError::PoolExhausted)?).clone();

        let Some(board) = self.boards.get_mut(board_id) else {
            return Err(GameError::BoardNotFound {
                id: board_id.to_string(),
            });
        };
        board.content[position] = new_word.clone();
        board.rerolls -= 1;
        debug!(
            session_id = %self.id,
            board_id,
            remaining = board.rerolls,
            "board rerolled"
        );
        Ok(RerollOutcome {
            new_word,
            remaining_rerolls: board.rerolls,
        })
    }

    /// Boards currently winning under the completion state.
    pub fn finished_boards(&self) -> Vec<&Board> {
        self.boards()
            .into_iter()
            .filter(|b| win::is_winner(&b.content, &self.completed))
            .collect()
    }
}
