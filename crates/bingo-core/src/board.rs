//! Participant boards and board generation.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::ids;
use crate::pool::WordPool;

/// One participant's personal arrangement of pool words.
///
/// The board id doubles as the participant identity (one board per
/// participant). The secret authorizes board-private mutations (reroll)
/// and must not appear in views rendered for other participants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Board id == participant identity.
    pub id: String,
    /// Display name shown to other participants.
    pub display_name: String,
    /// Board cells in row-major order; no duplicates, all from the pool.
    pub content: Vec<String>,
    /// Remaining reroll budget.
    pub rerolls: u32,
    /// Opaque credential for board-private mutations.
    pub secret: String,
}

impl Board {
    /// Create a board for `participant` with freshly generated content and
    /// a fresh secret.
    pub fn new<R: Rng + ?Sized>(
        participant: String,
        display_name: String,
        pool: &WordPool,
        board_size: usize,
        rerolls: u32,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        Ok(Self {
            id: participant,
            display_name,
            content: generate(pool, board_size, rng)?,
            rerolls,
            secret: ids::token(ids::SECRET_LEN),
        })
    }
}

/// Draw `board_size` distinct words from the pool, uniformly at random and
/// in random order.
///
/// Partial Fisher–Yates shuffle: cost is linear in the pool even when the
/// board consumes the whole pool, unlike rejection sampling.
pub fn generate<R: Rng + ?Sized>(
    pool: &WordPool,
    board_size: usize,
    rng: &mut R,
) -> Result<Vec<String>, GameError> {
    if board_size > pool.len() {
        return Err(GameError::InsufficientPool {
            required: board_size,
            available: pool.len(),
        });
    }
    let mut words: Vec<String> = pool.words().to_vec();
    let (picked, _rest) = words.partial_shuffle(rng, board_size);
    Ok(picked.to_vec())
}
