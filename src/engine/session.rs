//! Session lifecycle and guess evaluation
//!
//! `NotStarted -> InProgress -> {Won, Lost}`, with an explicit `reset()` back
//! to `NotStarted`. The engine owns the catalog, a single session-scoped RNG,
//! and at most one live session. Every operation either fully applies or
//! fully no-ops; no failure leaves the session corrupted.

use super::difficulty::Difficulty;
use super::dump::{self, MemoryDump};
use crate::catalog::Catalog;
use crate::core::{Word, likeness};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, seq::index};
use std::fmt;

/// Attempts granted at session start
pub const MAX_ATTEMPTS: u8 = 4;

/// Lifecycle state of the active session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Won,
    Lost,
}

/// Result of a successful guess call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess was the password
    Correct,
    /// Wrong guess; count of positions matching the password
    Likeness(usize),
}

/// One entry in the session's display-only history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRecord {
    pub word: Word,
    pub outcome: GuessOutcome,
}

/// Effect of activating a bonus token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenEffect {
    /// A wrong candidate was removed from play
    DudRemoved(Word),
    /// Attempts were reset to the session maximum
    AttemptsRestored,
}

/// Engine error kinds; all recoverable by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Guessed text is not an active candidate
    InvalidGuess,
    /// Operation attempted outside an in-progress session
    InvalidState,
    /// Only the password remains; nothing to remove
    NoDudAvailable,
    /// Too few words at the requested difficulty, even after catalog fallback
    InsufficientCatalog { length: usize, available: usize },
    /// Requested dump cannot hold the session's words
    InvalidDumpRequest { rows: usize, width: usize, required: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGuess => write!(f, "Guess is not an active candidate"),
            Self::InvalidState => write!(f, "No session in progress"),
            Self::NoDudAvailable => write!(f, "No removable candidate remains"),
            Self::InsufficientCatalog { length, available } => write!(
                f,
                "Catalog holds only {available} usable words of length {length} (need at least 2)"
            ),
            Self::InvalidDumpRequest {
                rows,
                width,
                required,
            } => write!(
                f,
                "A {rows}x{width} dump cannot hold {required}-character words"
            ),
        }
    }
}

impl std::error::Error for EngineError {}

/// Snapshot of one live puzzle
///
/// Owned by the engine; callers read it through accessors and never mutate it
/// directly. Invariant held for the whole lifetime: the password is always a
/// member of the candidate set.
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    difficulty: Difficulty,
    target_length: usize,
    candidates: Vec<Word>,
    password: Word,
    attempts: u8,
    history: Vec<GuessRecord>,
    status: SessionStatus,
}

impl PuzzleSession {
    /// Difficulty the session was started at
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Word length fixed for this session
    #[must_use]
    pub const fn target_length(&self) -> usize {
        self.target_length
    }

    /// Candidates still in play, in sampling order
    #[must_use]
    pub fn candidates(&self) -> &[Word] {
        &self.candidates
    }

    /// The secret password
    ///
    /// Exposed for simulation and testing; a fair presentation layer keeps it
    /// to itself.
    #[must_use]
    pub const fn password(&self) -> &Word {
        &self.password
    }

    /// Attempts remaining
    #[must_use]
    pub const fn attempts(&self) -> u8 {
        self.attempts
    }

    /// Display-only guess log, oldest first
    #[must_use]
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    /// Current lifecycle state
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Whether guesses are still accepted
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.status == SessionStatus::InProgress
    }
}

/// The puzzle engine: catalog + session-scoped RNG + at most one session
pub struct PuzzleEngine {
    catalog: Catalog,
    rng: StdRng,
    session: Option<PuzzleSession>,
}

impl PuzzleEngine {
    /// Create an engine seeded from OS entropy
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            rng: StdRng::from_os_rng(),
            session: None,
        }
    }

    /// Create an engine with a fixed seed, for deterministic play and tests
    #[must_use]
    pub fn with_seed(catalog: Catalog, seed: u64) -> Self {
        Self {
            catalog,
            rng: StdRng::seed_from_u64(seed),
            session: None,
        }
    }

    /// The current session, if one was started
    #[must_use]
    pub fn session(&self) -> Option<&PuzzleSession> {
        self.session.as_ref()
    }

    /// Discard the current session and return to `NotStarted`
    ///
    /// Attempt count, history, and any generated dump state are all dropped;
    /// nothing leaks into the next session.
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Start a fresh session at the given difficulty
    ///
    /// Samples the candidate set without replacement and picks the password
    /// uniformly among the candidates. Any previous session is discarded.
    ///
    /// # Errors
    /// `InsufficientCatalog` if fewer than two usable words exist at the
    /// difficulty's word length, even after catalog fallback.
    pub fn start_session(
        &mut self,
        difficulty: Difficulty,
    ) -> Result<&PuzzleSession, EngineError> {
        let target_length = difficulty.word_length();
        let pool = self.catalog.words_of_length(target_length);

        if pool.len() < 2 {
            return Err(EngineError::InsufficientCatalog {
                length: target_length,
                available: pool.len(),
            });
        }

        let count = difficulty.candidate_count().min(pool.len());
        let candidates: Vec<Word> = index::sample(&mut self.rng, pool.len(), count)
            .iter()
            .map(|i| pool[i].clone())
            .collect();
        let password = candidates[self.rng.random_range(0..candidates.len())].clone();

        let session = PuzzleSession {
            difficulty,
            target_length,
            candidates,
            password,
            attempts: MAX_ATTEMPTS,
            history: Vec::new(),
            status: SessionStatus::InProgress,
        };

        Ok(&*self.session.insert(session))
    }

    /// Evaluate a guess against the password
    ///
    /// # Errors
    /// - `InvalidState` outside an in-progress session (pure no-op)
    /// - `InvalidGuess` if the text is not an active candidate; attempts are
    ///   untouched, so stale UI state cannot cost the player anything
    pub fn guess(&mut self, text: &str) -> Result<GuessOutcome, EngineError> {
        let session = active_mut(&mut self.session)?;

        let normalized = text.trim().to_uppercase();
        let Some(word) = session
            .candidates
            .iter()
            .find(|w| w.text() == normalized)
            .cloned()
        else {
            return Err(EngineError::InvalidGuess);
        };

        if word == session.password {
            session.status = SessionStatus::Won;
            session.history.push(GuessRecord {
                word,
                outcome: GuessOutcome::Correct,
            });
            return Ok(GuessOutcome::Correct);
        }

        let score = likeness(&word, &session.password);
        session.history.push(GuessRecord {
            word,
            outcome: GuessOutcome::Likeness(score),
        });
        session.attempts = session.attempts.saturating_sub(1);
        if session.attempts == 0 {
            session.status = SessionStatus::Lost;
        }

        Ok(GuessOutcome::Likeness(score))
    }

    /// Remove one wrong candidate, chosen uniformly at random
    ///
    /// Never removes the password.
    ///
    /// # Errors
    /// - `InvalidState` outside an in-progress session
    /// - `NoDudAvailable` when only the password remains; candidates unchanged
    pub fn remove_dud(&mut self) -> Result<Word, EngineError> {
        let session = active_mut(&mut self.session)?;

        let dud_indices: Vec<usize> = session
            .candidates
            .iter()
            .enumerate()
            .filter(|(_, w)| **w != session.password)
            .map(|(i, _)| i)
            .collect();

        if dud_indices.is_empty() {
            return Err(EngineError::NoDudAvailable);
        }

        let pick = dud_indices[self.rng.random_range(0..dud_indices.len())];
        let removed = session.candidates.remove(pick);
        debug_assert!(session.candidates.contains(&session.password));

        Ok(removed)
    }

    /// Reset attempts to the session maximum
    ///
    /// Unconditional; already being at the maximum is a silent no-op.
    ///
    /// # Errors
    /// `InvalidState` outside an in-progress session.
    pub fn restore_attempts(&mut self) -> Result<(), EngineError> {
        let session = active_mut(&mut self.session)?;
        session.attempts = MAX_ATTEMPTS;
        Ok(())
    }

    /// Resolve a bonus token: fair coin between dud removal and restoration
    ///
    /// When the coin lands on removal but only the password remains, the
    /// token falls back to restoring attempts rather than fizzling.
    ///
    /// # Errors
    /// `InvalidState` outside an in-progress session.
    pub fn activate_token(&mut self) -> Result<TokenEffect, EngineError> {
        active_mut(&mut self.session)?;

        if self.rng.random_bool(0.5) {
            match self.remove_dud() {
                Ok(word) => return Ok(TokenEffect::DudRemoved(word)),
                Err(EngineError::NoDudAvailable) => {}
                Err(e) => return Err(e),
            }
        }

        self.restore_attempts()?;
        Ok(TokenEffect::AttemptsRestored)
    }

    /// Generate a fresh memory dump for the current candidate set
    ///
    /// Allowed in any session state (finished sessions may still be redrawn).
    /// The dump is derived and disposable; regenerate after any candidate
    /// change.
    ///
    /// # Errors
    /// - `InvalidState` before the first session starts
    /// - `InvalidDumpRequest` if the alphabet is empty or the shape's
    ///   capacity cannot hold every candidate (each row fits
    ///   `width / target_length` words)
    pub fn generate_dump(
        &mut self,
        rows: usize,
        width: usize,
        alphabet: &str,
    ) -> Result<MemoryDump, EngineError> {
        let Some(session) = self.session.as_ref() else {
            return Err(EngineError::InvalidState);
        };

        // Capacity is zero whenever rows == 0 or width < target_length
        let capacity = rows * (width / session.target_length);
        if alphabet.is_empty() || capacity < session.candidates.len() {
            return Err(EngineError::InvalidDumpRequest {
                rows,
                width,
                required: session.target_length,
            });
        }

        Ok(dump::generate(
            &session.candidates,
            rows,
            width,
            alphabet,
            &mut self.rng,
        ))
    }
}

/// The in-progress session, or `InvalidState`
fn active_mut(session: &mut Option<PuzzleSession>) -> Result<&mut PuzzleSession, EngineError> {
    match session.as_mut() {
        Some(s) if s.status == SessionStatus::InProgress => Ok(s),
        _ => Err(EngineError::InvalidState),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dump::DEFAULT_NOISE_ALPHABET;

    fn engine(seed: u64) -> PuzzleEngine {
        PuzzleEngine::with_seed(Catalog::builtin(), seed)
    }

    fn started(seed: u64, difficulty: Difficulty) -> PuzzleEngine {
        let mut e = engine(seed);
        e.start_session(difficulty).unwrap();
        e
    }

    /// A candidate that is not the password
    fn some_dud(engine: &PuzzleEngine) -> Word {
        let session = engine.session().unwrap();
        session
            .candidates()
            .iter()
            .find(|w| *w != session.password())
            .cloned()
            .unwrap()
    }

    #[test]
    fn start_session_shapes_match_difficulty() {
        for difficulty in Difficulty::ALL {
            let e = started(1, difficulty);
            let session = e.session().unwrap();

            assert_eq!(session.difficulty(), difficulty);
            assert_eq!(session.target_length(), difficulty.word_length());
            assert_eq!(session.candidates().len(), difficulty.candidate_count());
            assert_eq!(session.attempts(), MAX_ATTEMPTS);
            assert!(session.history().is_empty());
            assert_eq!(session.status(), SessionStatus::InProgress);
            assert!(
                session
                    .candidates()
                    .iter()
                    .all(|w| w.len() == difficulty.word_length())
            );
        }
    }

    #[test]
    fn candidates_are_distinct() {
        for seed in 0..20 {
            let e = started(seed, Difficulty::Master);
            let candidates = e.session().unwrap().candidates();
            for (i, a) in candidates.iter().enumerate() {
                assert!(candidates[i + 1..].iter().all(|b| b != a));
            }
        }
    }

    #[test]
    fn password_is_always_a_candidate() {
        for seed in 0..20 {
            let mut e = started(seed, Difficulty::Novice);
            let check = |e: &PuzzleEngine| {
                let s = e.session().unwrap();
                assert!(s.candidates().contains(s.password()));
            };
            check(&e);

            let dud = some_dud(&e);
            e.guess(dud.text()).unwrap();
            check(&e);

            while e.remove_dud().is_ok() {
                check(&e);
            }
        }
    }

    #[test]
    fn guessing_password_wins_regardless_of_history() {
        let mut e = started(2, Difficulty::Novice);
        let dud = some_dud(&e);
        e.guess(dud.text()).unwrap();

        let password = e.session().unwrap().password().clone();
        assert_eq!(e.guess(password.text()), Ok(GuessOutcome::Correct));
        assert_eq!(e.session().unwrap().status(), SessionStatus::Won);
        assert_eq!(
            e.session().unwrap().history().last().unwrap().outcome,
            GuessOutcome::Correct
        );
    }

    #[test]
    fn wrong_guess_scores_likeness_and_costs_an_attempt() {
        let mut e = started(3, Difficulty::Novice);
        let session = e.session().unwrap();
        let password = session.password().clone();
        let dud = some_dud(&e);
        let expected = likeness(&dud, &password);

        assert_eq!(e.guess(dud.text()), Ok(GuessOutcome::Likeness(expected)));
        assert_eq!(e.session().unwrap().attempts(), MAX_ATTEMPTS - 1);
        assert_eq!(
            e.session().unwrap().history(),
            &[GuessRecord {
                word: dud,
                outcome: GuessOutcome::Likeness(expected),
            }]
        );
    }

    #[test]
    fn non_candidate_guess_is_rejected_without_cost() {
        let mut e = started(4, Difficulty::Novice);

        assert_eq!(e.guess("ZZZZ"), Err(EngineError::InvalidGuess));
        assert_eq!(e.session().unwrap().attempts(), MAX_ATTEMPTS);
        assert!(e.session().unwrap().history().is_empty());
    }

    #[test]
    fn guess_matching_is_case_insensitive() {
        let mut e = started(5, Difficulty::Novice);
        let password = e.session().unwrap().password().clone();

        let lowered = password.text().to_lowercase();
        assert_eq!(e.guess(&lowered), Ok(GuessOutcome::Correct));
    }

    #[test]
    fn attempts_never_go_below_zero_and_exhaustion_loses() {
        let mut e = started(6, Difficulty::Novice);

        for _ in 0..MAX_ATTEMPTS {
            if !e.session().unwrap().is_in_progress() {
                break;
            }
            let dud = some_dud(&e);
            e.guess(dud.text()).unwrap();
        }

        let session = e.session().unwrap();
        assert_eq!(session.attempts(), 0);
        assert_eq!(session.status(), SessionStatus::Lost);
    }

    #[test]
    fn guessing_after_game_over_is_invalid_state() {
        let mut e = started(7, Difficulty::Novice);
        let password = e.session().unwrap().password().clone();
        e.guess(password.text()).unwrap();

        let dud = some_dud(&e);
        assert_eq!(e.guess(dud.text()), Err(EngineError::InvalidState));
        assert_eq!(e.guess(password.text()), Err(EngineError::InvalidState));
    }

    #[test]
    fn guessing_without_a_session_is_invalid_state() {
        let mut e = engine(8);
        assert_eq!(e.guess("ABLE"), Err(EngineError::InvalidState));
        assert_eq!(e.remove_dud().unwrap_err(), EngineError::InvalidState);
        assert_eq!(e.restore_attempts(), Err(EngineError::InvalidState));
        assert_eq!(e.activate_token().unwrap_err(), EngineError::InvalidState);
    }

    #[test]
    fn remove_dud_shrinks_candidates_and_spares_password() {
        let mut e = started(9, Difficulty::Novice);
        let password = e.session().unwrap().password().clone();
        let before = e.session().unwrap().candidates().len();

        let removed = e.remove_dud().unwrap();
        let session = e.session().unwrap();

        assert_ne!(&removed, &password);
        assert_eq!(session.candidates().len(), before - 1);
        assert!(!session.candidates().contains(&removed));
        assert!(session.candidates().contains(&password));
    }

    #[test]
    fn remove_dud_fails_cleanly_when_only_password_remains() {
        let mut e = started(10, Difficulty::Novice);
        let count = e.session().unwrap().candidates().len();

        for _ in 0..count - 1 {
            e.remove_dud().unwrap();
        }

        let before: Vec<Word> = e.session().unwrap().candidates().to_vec();
        assert_eq!(before.len(), 1);
        assert_eq!(e.remove_dud().unwrap_err(), EngineError::NoDudAvailable);
        assert_eq!(e.session().unwrap().candidates(), &before[..]);
    }

    #[test]
    fn restore_attempts_is_idempotent_at_max() {
        let mut e = started(11, Difficulty::Novice);

        e.restore_attempts().unwrap();
        assert_eq!(e.session().unwrap().attempts(), MAX_ATTEMPTS);

        let dud = some_dud(&e);
        e.guess(dud.text()).unwrap();
        assert_eq!(e.session().unwrap().attempts(), MAX_ATTEMPTS - 1);

        e.restore_attempts().unwrap();
        assert_eq!(e.session().unwrap().attempts(), MAX_ATTEMPTS);
    }

    #[test]
    fn last_attempt_loss_scenario() {
        let mut e = started(12, Difficulty::Novice);

        // Burn down to a single attempt
        for _ in 0..MAX_ATTEMPTS - 1 {
            let dud = some_dud(&e);
            e.guess(dud.text()).unwrap();
        }
        assert_eq!(e.session().unwrap().attempts(), 1);

        let dud = some_dud(&e);
        e.guess(dud.text()).unwrap();
        assert_eq!(e.session().unwrap().status(), SessionStatus::Lost);
        assert_eq!(e.guess(dud.text()), Err(EngineError::InvalidState));
    }

    #[test]
    fn activate_token_removes_dud_or_restores() {
        let mut e = started(13, Difficulty::Novice);
        let dud = some_dud(&e);
        e.guess(dud.text()).unwrap();

        for _ in 0..8 {
            if !e.session().unwrap().is_in_progress() {
                break;
            }
            let before = e.session().unwrap().candidates().len();
            match e.activate_token().unwrap() {
                TokenEffect::DudRemoved(word) => {
                    assert_ne!(&word, e.session().unwrap().password());
                    assert_eq!(e.session().unwrap().candidates().len(), before - 1);
                }
                TokenEffect::AttemptsRestored => {
                    assert_eq!(e.session().unwrap().attempts(), MAX_ATTEMPTS);
                }
            }
        }
    }

    #[test]
    fn activate_token_with_no_duds_restores_attempts() {
        let mut e = started(14, Difficulty::Novice);
        while e.remove_dud().is_ok() {}
        let dud_free_attempts = {
            // Spend an attempt so restoration is observable
            let password = e.session().unwrap().password().clone();
            let _ = e.guess(&format!("{password}X"));
            e.session().unwrap().attempts()
        };
        assert_eq!(dud_free_attempts, MAX_ATTEMPTS); // InvalidGuess costs nothing

        for _ in 0..4 {
            assert_eq!(
                e.activate_token().unwrap(),
                TokenEffect::AttemptsRestored
            );
        }
    }

    #[test]
    fn reset_clears_everything() {
        let mut e = started(15, Difficulty::Expert);
        let dud = some_dud(&e);
        e.guess(dud.text()).unwrap();

        e.reset();
        assert!(e.session().is_none());
        assert_eq!(e.guess("ACCESS"), Err(EngineError::InvalidState));

        // A new session starts clean
        e.start_session(Difficulty::Novice).unwrap();
        let session = e.session().unwrap();
        assert_eq!(session.attempts(), MAX_ATTEMPTS);
        assert!(session.history().is_empty());
    }

    #[test]
    fn generate_dump_covers_all_candidates() {
        let mut e = started(16, Difficulty::Advanced);
        let dump = e.generate_dump(32, 12, DEFAULT_NOISE_ALPHABET).unwrap();

        let session = e.session().unwrap();
        for word in session.candidates() {
            assert!(dump.contains(word));
        }
        assert!(dump.contains(session.password()));
    }

    #[test]
    fn generate_dump_reflects_dud_removal() {
        let mut e = started(17, Difficulty::Novice);
        let removed = e.remove_dud().unwrap();
        let dump = e.generate_dump(32, 12, DEFAULT_NOISE_ALPHABET).unwrap();

        for word in e.session().unwrap().candidates() {
            assert!(dump.contains(word));
        }
        // The removed dud may only appear by coincidence of noise; its span
        // must not exist
        for row in dump.rows() {
            assert!(row.word_spans().iter().all(|s| s.word != removed));
        }
    }

    #[test]
    fn generate_dump_validates_shape() {
        let mut e = started(18, Difficulty::Master);
        let required = e.session().unwrap().target_length();

        assert_eq!(
            e.generate_dump(0, 12, DEFAULT_NOISE_ALPHABET).unwrap_err(),
            EngineError::InvalidDumpRequest {
                rows: 0,
                width: 12,
                required,
            }
        );
        assert!(
            e.generate_dump(32, required - 1, DEFAULT_NOISE_ALPHABET)
                .is_err()
        );
        assert!(e.generate_dump(32, 12, "").is_err());
    }

    #[test]
    fn generate_dump_rejects_shapes_too_small_for_the_candidates() {
        let mut e = started(21, Difficulty::Novice);
        let session = e.session().unwrap();
        let required = session.target_length();
        let count = session.candidates().len();

        // One 12-wide row holds three 4-letter words; ten candidates cannot fit
        assert_eq!(
            e.generate_dump(1, 12, DEFAULT_NOISE_ALPHABET).unwrap_err(),
            EngineError::InvalidDumpRequest {
                rows: 1,
                width: 12,
                required,
            }
        );

        // The smallest accepted shape still carries every candidate
        let rows = count.div_ceil(12 / required);
        let dump = e.generate_dump(rows, 12, DEFAULT_NOISE_ALPHABET).unwrap();
        for word in e.session().unwrap().candidates() {
            assert!(dump.contains(word));
        }
    }

    #[test]
    fn generate_dump_without_session_is_invalid_state() {
        let mut e = engine(19);
        assert_eq!(
            e.generate_dump(32, 12, DEFAULT_NOISE_ALPHABET).unwrap_err(),
            EngineError::InvalidState
        );
    }

    #[test]
    fn seeded_engines_replay_identically() {
        let mut a = started(20, Difficulty::Advanced);
        let mut b = started(20, Difficulty::Advanced);

        assert_eq!(
            a.session().unwrap().candidates(),
            b.session().unwrap().candidates()
        );
        assert_eq!(a.session().unwrap().password(), b.session().unwrap().password());
        assert_eq!(a.remove_dud().unwrap(), b.remove_dud().unwrap());
    }
}
