//! Opaque identifier and secret generation.
//!
//! Sessions, boards, and their secrets are plain alphanumeric tokens. The
//! core treats them as opaque credentials: it issues them once and later
//! compares them verbatim.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of generated session identifiers.
pub const SESSION_ID_LEN: usize = 16;

/// Length of generated session and board secrets.
pub const SECRET_LEN: usize = 8;

/// Generate a random alphanumeric token of the given length.
pub fn token(len: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
