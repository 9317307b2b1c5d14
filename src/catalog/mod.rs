//! Word catalog partitioned by length
//!
//! The catalog is built once from the embedded master list (no runtime I/O)
//! and is read-only afterwards. It supplies the candidate pool for a puzzle:
//! exact-length words when enough exist, otherwise words within one character
//! of the requested length, normalized by truncation or padding.

mod builtin;

pub use builtin::{WORDS, WORDS_COUNT};

use crate::core::Word;
use rustc_hash::{FxHashMap, FxHashSet};

/// Minimum number of exact-length words before the ±1 fallback kicks in
pub const MIN_EXACT_MATCHES: usize = 12;

/// Master list of candidate words, indexed by length
#[derive(Debug, Clone)]
pub struct Catalog {
    by_length: FxHashMap<usize, Vec<Word>>,
    total: usize,
}

impl Catalog {
    /// Build the catalog from the embedded master list
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_slice(WORDS)
    }

    /// Build a catalog from raw strings, skipping any invalid entries
    ///
    /// Insertion order within each length bucket follows the input order, so
    /// the catalog is deterministic for a given input.
    #[must_use]
    pub fn from_slice(words: &[&str]) -> Self {
        let mut by_length: FxHashMap<usize, Vec<Word>> = FxHashMap::default();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut total = 0;

        for raw in words {
            let Ok(word) = Word::new(*raw) else { continue };
            if !seen.insert(word.text().to_string()) {
                continue;
            }
            by_length.entry(word.len()).or_default().push(word);
            total += 1;
        }

        Self { by_length, total }
    }

    /// Words usable at exactly length `n`
    ///
    /// Returns the exact-length bucket when it holds at least
    /// [`MIN_EXACT_MATCHES`] words. Otherwise the buckets at `n-1` and `n+1`
    /// are folded in, each word normalized to exactly `n` characters via
    /// [`Word::fitted`]. Duplicates introduced by normalization are dropped.
    #[must_use]
    pub fn words_of_length(&self, n: usize) -> Vec<Word> {
        let mut words = self.by_length.get(&n).cloned().unwrap_or_default();

        if words.len() >= MIN_EXACT_MATCHES {
            return words;
        }

        let mut seen: FxHashSet<String> =
            words.iter().map(|w| w.text().to_string()).collect();

        let neighbors = [n.checked_sub(1), n.checked_add(1)];
        for neighbor in neighbors.into_iter().flatten() {
            let Some(bucket) = self.by_length.get(&neighbor) else {
                continue;
            };
            for word in bucket {
                let Ok(fitted) = Word::fitted(word.text(), n) else {
                    continue;
                };
                if seen.insert(fitted.text().to_string()) {
                    words.push(fitted);
                }
            }
        }

        words
    }

    /// Total number of words in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.total
    }

    /// Whether the catalog holds no words at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), WORDS_COUNT);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn builtin_words_are_valid() {
        for &word in WORDS {
            assert!(
                word.chars().all(|c| c.is_ascii_uppercase()),
                "Word '{word}' contains non-uppercase chars"
            );
            assert!(
                (4..=8).contains(&word.len()),
                "Word '{word}' has unexpected length"
            );
        }
    }

    #[test]
    fn exact_length_bucket_returned_when_large_enough() {
        let catalog = Catalog::builtin();
        let words = catalog.words_of_length(4);

        assert!(words.len() >= MIN_EXACT_MATCHES);
        assert!(words.iter().all(|w| w.len() == 4));
        // No padded words: bucket was large enough on its own
        assert!(words.iter().all(|w| !w.text().contains('_')));
    }

    #[test]
    fn fallback_normalizes_neighbors() {
        let catalog = Catalog::builtin();
        // Only ten 8-letter words are embedded, so the 7-letter bucket folds in
        let words = catalog.words_of_length(8);

        assert!(words.len() >= MIN_EXACT_MATCHES);
        assert!(words.iter().all(|w| w.len() == 8));
        assert!(words.iter().any(|w| w.text().ends_with('_')));
    }

    #[test]
    fn fallback_is_deterministic() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.words_of_length(8), catalog.words_of_length(8));
    }

    #[test]
    fn unknown_length_yields_nothing_useful() {
        let catalog = Catalog::builtin();
        // No 11/12/13-letter words exist, so nothing can be folded in either
        assert!(catalog.words_of_length(12).is_empty());
    }

    #[test]
    fn from_slice_skips_invalid_and_duplicate_entries() {
        let catalog = Catalog::from_slice(&["IRON", "iron", "N0DE", "", "COLD"]);
        assert_eq!(catalog.len(), 2);

        let words = catalog.words_of_length(4);
        assert!(words.iter().any(|w| w.text() == "IRON"));
        assert!(words.iter().any(|w| w.text() == "COLD"));
    }

    #[test]
    fn from_slice_preserves_input_order() {
        let catalog = Catalog::from_slice(&["COLD", "ABLE", "IRON"]);
        let words = catalog.words_of_length(4);
        let texts: Vec<&str> = words.iter().map(Word::text).collect();
        assert_eq!(texts, vec!["COLD", "ABLE", "IRON"]);
    }
}
