//! Win detection over rows, columns, and diagonals.

use std::collections::HashMap;

/// Whether a board wins under the given completion state.
///
/// For a square board of side `s`, cell `(r, c)` is `content[r * s + c]`.
/// A board wins iff any full row, any full column, or either full diagonal
/// consists entirely of completed words. No partial lines, no bonus
/// patterns. Words missing from the completion map count as not completed.
pub fn is_winner(content: &[String], completed: &HashMap<String, bool>) -> bool {
    let side = content.len().isqrt();
    if side * side != content.len() || side == 0 {
        return false;
    }

    let done: Vec<bool> = content
        .iter()
        .map(|w| completed.get(w).copied().unwrap_or(false))
        .collect();

    for r in 0..side {
        if (0..side).all(|c| done[r * side + c]) {
            return true;
        }
    }
    for c in 0..side {
        if (0..side).all(|r| done[r * side + c]) {
            return true;
        }
    }
    if (0..side).all(|i| done[i * side + i]) {
        return true;
    }
    (0..side).all(|i| done[i * side + (side - 1 - i)])
}
