//! Likeness scoring between a guess and the password
//!
//! Likeness is the count of index positions where the two words carry the same
//! character. It is the only feedback a wrong guess produces, so the whole
//! deduction game rests on this one number.

use super::Word;

/// Count the positions where `a` and `b` match
///
/// Positions are compared up to the shorter of the two words, so the score is
/// well-defined even for mismatched lengths (stale UI state must not panic).
///
/// # Properties
/// - Symmetric: `likeness(a, b) == likeness(b, a)`
/// - Identity: `likeness(a, a) == a.len()`
///
/// # Examples
/// ```
/// use termlink::core::{Word, likeness};
///
/// let guess = Word::new("COLD").unwrap();
/// let password = Word::new("CORE").unwrap();
/// assert_eq!(likeness(&guess, &password), 2); // C and O match
/// ```
#[must_use]
pub fn likeness(a: &Word, b: &Word) -> usize {
    a.as_bytes()
        .iter()
        .zip(b.as_bytes())
        .filter(|(x, y)| x == y)
        .count()
}
