//! Formatting utilities for terminal output

use crate::engine::{GuessOutcome, GuessRecord, MAX_ATTEMPTS};

/// Address column step between dump rows
const ADDRESS_STEP: u16 = 0x10;

/// Default base for the dump address column
pub const DEFAULT_ADDRESS_BASE: u16 = 0xF000;

/// Generate the hex address column for a dump
///
/// One address per row, stepping by `0x10` from `base`, wrapping on overflow.
///
/// # Examples
/// ```
/// use termlink::output::hex_addresses;
///
/// let addrs = hex_addresses(3, 0xF000);
/// assert_eq!(addrs, vec!["0xF000", "0xF010", "0xF020"]);
/// ```
#[must_use]
pub fn hex_addresses(count: usize, base: u16) -> Vec<String> {
    (0..count)
        .map(|i| {
            let addr = base.wrapping_add(ADDRESS_STEP.wrapping_mul(i as u16));
            format!("0x{addr:04X}")
        })
        .collect()
}

/// Render the attempts meter as filled blocks padded to the maximum
///
/// # Examples
/// ```
/// use termlink::output::attempts_meter;
///
/// assert_eq!(attempts_meter(3), "■ ■ ■ .");
/// assert_eq!(attempts_meter(0), ". . . .");
/// ```
#[must_use]
pub fn attempts_meter(attempts: u8) -> String {
    let mut parts = Vec::with_capacity(MAX_ATTEMPTS as usize);
    for i in 0..MAX_ATTEMPTS {
        parts.push(if i < attempts { "■" } else { "." });
    }
    parts.join(" ")
}

/// One-line rendering of a history record, terminal style
#[must_use]
pub fn outcome_line(record: &GuessRecord) -> String {
    match record.outcome {
        GuessOutcome::Correct => format!(">{} :: ACCESS GRANTED", record.word),
        GuessOutcome::Likeness(n) => {
            format!(">{} :: ENTRY DENIED. LIKENESS={n}", record.word)
        }
    }
}
