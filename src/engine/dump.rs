//! Memory dump generation
//!
//! The dump is a grid of fixed-width rows: noise characters, at most one
//! embedded candidate word per row, and occasional bracket-pair bonus tokens.
//! Generation is best-effort placement followed by a mandatory repair pass
//! that forces every candidate into the grid, overwriting earlier placements
//! if it must. The repair pass is the intended algorithm, not a fallback for
//! a bug: bonus tokens may legitimately vanish under it.
//!
//! The dump is a derived, disposable view. It can be regenerated whenever the
//! candidate set changes and never feeds back into session state.

use crate::core::Word;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

/// Default number of dump rows (the original renders 32 addressed lines)
pub const DEFAULT_ROWS: usize = 32;

/// Default characters per row
pub const DEFAULT_ROW_WIDTH: usize = 12;

/// Default noise alphabet: digits and punctuation, brackets excluded so that
/// bonus tokens are only ever deliberate stamps
pub const DEFAULT_NOISE_ALPHABET: &str = "0123456789!@#$%^&*-_=+.,:;?/|\\'\"~";

/// Per-row probability of stamping a bracket-pair bonus token
const TOKEN_PROBABILITY: f64 = 0.3;

/// Bounded attempts to place a word into a row before moving on
const PLACEMENT_ATTEMPTS: usize = 3;

/// Randomized repair passes before the deterministic last resort
const REPAIR_PASSES: usize = 4;

/// A matched pair of bracket characters usable as a bonus token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketPair {
    Square,
    Curly,
    Round,
    Angle,
}

impl BracketPair {
    /// All supported pairs
    pub const ALL: [Self; 4] = [Self::Square, Self::Curly, Self::Round, Self::Angle];

    /// Opening character
    #[must_use]
    pub const fn open(self) -> char {
        match self {
            Self::Square => '[',
            Self::Curly => '{',
            Self::Round => '(',
            Self::Angle => '<',
        }
    }

    /// Closing character
    #[must_use]
    pub const fn close(self) -> char {
        match self {
            Self::Square => ']',
            Self::Curly => '}',
            Self::Round => ')',
            Self::Angle => '>',
        }
    }
}

/// Logical offsets of an embedded word within a row
///
/// Offsets are character positions in the row text (`end` exclusive). The
/// engine knows nothing about pixels; hit-testing against rendered text is
/// the presentation layer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpan {
    pub word: Word,
    pub start: usize,
    pub end: usize,
}

/// Logical offsets of a bonus token within a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub pair: BracketPair,
    pub start: usize,
    pub end: usize,
}

/// One generated row: text plus the spans the presentation layer can hit-test
#[derive(Debug, Clone)]
pub struct DumpRow {
    text: String,
    word_spans: Vec<WordSpan>,
    token_span: Option<TokenSpan>,
}

impl DumpRow {
    /// Row text, exactly `width` characters
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Words embedded in this row
    #[must_use]
    pub fn word_spans(&self) -> &[WordSpan] {
        &self.word_spans
    }

    /// Bonus token embedded in this row, if any survived generation
    #[must_use]
    pub fn token_span(&self) -> Option<&TokenSpan> {
        self.token_span.as_ref()
    }
}

/// A generated memory dump: fixed-width rows with hit-test spans
#[derive(Debug, Clone)]
pub struct MemoryDump {
    rows: Vec<DumpRow>,
    width: usize,
}

impl MemoryDump {
    /// All rows in display order
    #[must_use]
    pub fn rows(&self) -> &[DumpRow] {
        &self.rows
    }

    /// Characters per row
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Whether `word` appears as a contiguous substring of some row
    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.rows.iter().any(|row| row.text.contains(word.text()))
    }

    /// Number of surviving bonus tokens
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.rows.iter().filter(|r| r.token_span.is_some()).count()
    }
}

/// Working buffer for one row during generation
struct RowBuf {
    chars: Vec<u8>,
    word_spans: Vec<WordSpan>,
    token_span: Option<TokenSpan>,
}

impl RowBuf {
    fn stamp_word(&mut self, word: &Word, start: usize) {
        let end = start + word.len();
        self.chars[start..end].copy_from_slice(word.as_bytes());

        // A forced stamp may clobber earlier placements; drop their spans
        self.word_spans
            .retain(|span| span.end <= start || span.start >= end);
        if let Some(token) = self.token_span
            && token.start < end
            && token.end > start
        {
            self.token_span = None;
        }

        self.word_spans.push(WordSpan {
            word: word.clone(),
            start,
            end,
        });
    }

    fn contains(&self, word: &Word) -> bool {
        self.chars
            .windows(word.len())
            .any(|window| window == word.as_bytes())
    }
}

/// Generate a dump for the current candidate set
///
/// Caller guarantees: the alphabet is non-empty and the grid capacity covers
/// the candidate set (the engine validates before calling).
///
/// Layered guarantees, in order:
/// 1. every cell starts as uniform noise from `alphabet`
/// 2. best-effort: ~30% of rows get a bracket-pair token
/// 3. best-effort: at most one candidate word per row, ≤3 offsets tried
/// 4. mandatory: every candidate appears somewhere, forced in if missing
pub(crate) fn generate<R: Rng>(
    candidates: &[Word],
    rows: usize,
    width: usize,
    alphabet: &str,
    rng: &mut R,
) -> MemoryDump {
    let alpha: Vec<u8> = alphabet.bytes().collect();

    let mut bufs: Vec<RowBuf> = (0..rows)
        .map(|_| {
            let chars = (0..width)
                .map(|_| alpha[rng.random_range(0..alpha.len())])
                .collect();
            let mut buf = RowBuf {
                chars,
                word_spans: Vec::new(),
                token_span: None,
            };
            if width >= 2 && rng.random_bool(TOKEN_PROBABILITY) {
                stamp_token(&mut buf, width, rng);
            }
            buf
        })
        .collect();

    // Walk rows in random order handing out candidates from a shuffled queue.
    // A word that fails all its placement attempts stays queued for a later
    // row; anything still queued afterwards is caught by the repair pass.
    let mut queue: VecDeque<&Word> = {
        let mut order: Vec<&Word> = candidates.iter().collect();
        order.shuffle(rng);
        order.into()
    };
    let mut row_order: Vec<usize> = (0..rows).collect();
    row_order.shuffle(rng);

    for &row in &row_order {
        let Some(&word) = queue.front() else { break };
        if word.len() > width {
            queue.pop_front();
            continue;
        }

        let placed = (0..PLACEMENT_ATTEMPTS).any(|_| {
            let start = rng.random_range(0..=width - word.len());
            let end = start + word.len();
            let collides = bufs[row]
                .token_span
                .is_some_and(|t| t.start < end && t.end > start);
            if collides {
                return false;
            }
            bufs[row].stamp_word(word, start);
            true
        });

        if placed {
            queue.pop_front();
        }
    }

    repair(candidates, &mut bufs, width, rng);

    let rows = bufs
        .into_iter()
        .map(|buf| DumpRow {
            text: buf.chars.iter().map(|&b| b as char).collect(),
            word_spans: buf.word_spans,
            token_span: buf.token_span,
        })
        .collect();

    MemoryDump { rows, width }
}

fn stamp_token<R: Rng>(buf: &mut RowBuf, width: usize, rng: &mut R) {
    let pair = BracketPair::ALL[rng.random_range(0..BracketPair::ALL.len())];
    let start = rng.random_range(0..=width - 2);
    buf.chars[start] = pair.open() as u8;
    buf.chars[start + 1] = pair.close() as u8;
    buf.token_span = Some(TokenSpan {
        pair,
        start,
        end: start + 2,
    });
}

/// Force every missing candidate into the grid
///
/// Randomized passes first, preferring rows without embedded words so a fix
/// rarely destroys another placement. If words are still missing after that
/// (only possible when rows are scarce relative to candidates), every
/// candidate is re-stamped into consecutive non-overlapping slots, row-major.
/// The packing fits whenever the grid capacity covers the candidate set,
/// which the engine validates up front.
fn repair<R: Rng>(candidates: &[Word], bufs: &mut [RowBuf], width: usize, rng: &mut R) {
    for _ in 0..REPAIR_PASSES {
        let missing = missing_words(candidates, bufs);
        if missing.is_empty() {
            return;
        }

        for word in missing {
            if word.len() > width {
                continue;
            }
            let empty_rows: Vec<usize> = (0..bufs.len())
                .filter(|&i| bufs[i].word_spans.is_empty())
                .collect();
            let row = if empty_rows.is_empty() {
                rng.random_range(0..bufs.len())
            } else {
                empty_rows[rng.random_range(0..empty_rows.len())]
            };
            let start = rng.random_range(0..=width - word.len());
            bufs[row].stamp_word(word, start);
        }
    }

    if missing_words(candidates, bufs).is_empty() {
        return;
    }

    // Deterministic last resort: greedy row-major packing. Slots never
    // overlap, so no stamp in this pass clobbers another.
    let mut row = 0;
    let mut offset = 0;
    for word in candidates {
        if word.len() > width {
            continue;
        }
        if offset + word.len() > width {
            row += 1;
            offset = 0;
        }
        if row >= bufs.len() {
            return;
        }
        bufs[row].stamp_word(word, offset);
        offset += word.len();
    }
}

fn missing_words<'a>(candidates: &'a [Word], bufs: &[RowBuf]) -> Vec<&'a Word> {
    candidates
        .iter()
        .filter(|word| !bufs.iter().any(|buf| buf.contains(word)))
        .collect()
}
