//! Candidate word representation
//!
//! A Word is an uppercase token drawn from the catalog. Words are normalized to
//! the puzzle's target length before they enter a session and are immutable
//! afterwards.

use std::fmt;

/// Filler character used when a shorter word is padded to the target length
pub const PAD_CHAR: char = '_';

/// Minimum accepted word length
const MIN_LEN: usize = 2;

/// Maximum accepted word length
const MAX_LEN: usize = 16;

/// An uppercase candidate word
///
/// Stores the normalized text. Equality is byte equality, so `"IRON"` and a
/// padded `"ION_"` are distinct candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    InvalidLength(usize),
    NonAscii,
    InvalidCharacters,
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "Word length must be {MIN_LEN}-{MAX_LEN}, got {len}")
            }
            Self::NonAscii => write!(f, "Word must contain only ASCII letters"),
            Self::InvalidCharacters => write!(f, "Word contains invalid characters"),
        }
    }
}

impl std::error::Error for WordError {}

impl Word {
    /// Create a new Word from a string
    ///
    /// The text is normalized to uppercase.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Length is outside 2-16
    /// - Contains non-ASCII characters
    /// - Contains non-alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use termlink::core::Word;
    ///
    /// let word = Word::new("iron").unwrap();
    /// assert_eq!(word.text(), "IRON");
    ///
    /// assert!(Word::new("N0DE").is_err());
    /// assert!(Word::new("X").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into().to_uppercase();

        if !(MIN_LEN..=MAX_LEN).contains(&text.len()) {
            return Err(WordError::InvalidLength(text.len()));
        }

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        if !text.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(WordError::InvalidCharacters);
        }

        Ok(Self { text })
    }

    /// Create a Word normalized to exactly `target_len`
    ///
    /// Longer words are truncated; shorter words are padded with [`PAD_CHAR`].
    /// Deterministic for a given input.
    ///
    /// # Errors
    /// Returns `WordError` if the source text is not a valid word or
    /// `target_len` is outside the accepted range.
    ///
    /// # Examples
    /// ```
    /// use termlink::core::Word;
    ///
    /// assert_eq!(Word::fitted("reactor", 4).unwrap().text(), "REAC");
    /// assert_eq!(Word::fitted("iron", 5).unwrap().text(), "IRON_");
    /// ```
    pub fn fitted(text: impl Into<String>, target_len: usize) -> Result<Self, WordError> {
        let word = Self::new(text)?;

        if !(MIN_LEN..=MAX_LEN).contains(&target_len) {
            return Err(WordError::InvalidLength(target_len));
        }

        if word.len() == target_len {
            return Ok(word);
        }

        let mut text = word.text;
        if text.len() > target_len {
            text.truncate(target_len);
        } else {
            while text.len() < target_len {
                text.push(PAD_CHAR);
            }
        }

        Ok(Self { text })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word as bytes
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Length of the word in characters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the word is empty (never true for a constructed Word)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
