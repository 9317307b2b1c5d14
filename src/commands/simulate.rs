//! Simulation command
//!
//! Autoplays many games with a likeness-consistency bot: guess a random
//! viable candidate, then keep only the candidates whose likeness to that
//! guess matches the reported score. The password is always consistent with
//! every observation, so the viable set never empties.

use crate::catalog::Catalog;
use crate::core::{Word, likeness};
use crate::engine::{Difficulty, GuessOutcome, PuzzleEngine};
use indicatif::ProgressBar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Decorrelates the bot's RNG stream from the engine's
const BOT_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Result of a simulation run
pub struct SimulationResult {
    pub games: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub average_guesses: f64,
    /// Guesses used per won game
    pub guess_distribution: HashMap<usize, usize>,
    pub duration: Duration,
    pub games_per_second: f64,
}

struct GameOutcome {
    won: bool,
    guesses: usize,
}

/// Play `games` sessions in parallel and aggregate the outcomes
///
/// Each game gets its own seeded engine (`base_seed + index`), so a run is
/// reproducible for a given base seed.
#[must_use]
pub fn run_simulation(difficulty: Difficulty, games: usize, base_seed: u64) -> SimulationResult {
    let catalog = Catalog::builtin();
    let start = Instant::now();
    let progress = ProgressBar::new(games as u64);

    let outcomes: Vec<GameOutcome> = (0..games)
        .into_par_iter()
        .map(|i| {
            let seed = base_seed.wrapping_add(i as u64);
            let outcome = play_one(catalog.clone(), difficulty, seed);
            progress.inc(1);
            outcome
        })
        .collect();
    progress.finish_and_clear();

    let duration = start.elapsed();
    let wins = outcomes.iter().filter(|o| o.won).count();
    let total_guesses: usize = outcomes.iter().map(|o| o.guesses).sum();

    let mut guess_distribution: HashMap<usize, usize> = HashMap::new();
    for outcome in outcomes.iter().filter(|o| o.won) {
        *guess_distribution.entry(outcome.guesses).or_insert(0) += 1;
    }

    SimulationResult {
        games,
        wins,
        win_rate: if games == 0 {
            0.0
        } else {
            wins as f64 / games as f64
        },
        average_guesses: if games == 0 {
            0.0
        } else {
            total_guesses as f64 / games as f64
        },
        guess_distribution,
        duration,
        games_per_second: games as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}

fn play_one(catalog: Catalog, difficulty: Difficulty, seed: u64) -> GameOutcome {
    let mut engine = PuzzleEngine::with_seed(catalog, seed);
    let mut rng = StdRng::seed_from_u64(seed ^ BOT_SEED_SALT);

    let Ok(session) = engine.start_session(difficulty) else {
        return GameOutcome {
            won: false,
            guesses: 0,
        };
    };

    let mut viable: Vec<Word> = session.candidates().to_vec();
    let mut guesses = 0;

    loop {
        guesses += 1;
        let pick = viable[rng.random_range(0..viable.len())].clone();

        match engine.guess(pick.text()) {
            Ok(GuessOutcome::Correct) => return GameOutcome { won: true, guesses },
            Ok(GuessOutcome::Likeness(score)) => {
                viable.retain(|w| *w != pick && likeness(w, &pick) == score);
                let still_playing = engine
                    .session()
                    .is_some_and(crate::engine::PuzzleSession::is_in_progress);
                if !still_playing {
                    return GameOutcome {
                        won: false,
                        guesses,
                    };
                }
            }
            Err(_) => {
                return GameOutcome {
                    won: false,
                    guesses,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MAX_ATTEMPTS;

    #[test]
    fn simulation_accounts_for_every_game() {
        let result = run_simulation(Difficulty::Novice, 40, 1);

        assert_eq!(result.games, 40);
        assert!(result.wins <= result.games);
        assert!((0.0..=1.0).contains(&result.win_rate));

        let distribution_sum: usize = result.guess_distribution.values().sum();
        assert_eq!(distribution_sum, result.wins);
    }

    #[test]
    fn guesses_stay_within_attempt_budget() {
        let result = run_simulation(Difficulty::Novice, 40, 2);

        assert!(result.average_guesses >= 1.0);
        assert!(result.average_guesses <= f64::from(MAX_ATTEMPTS));
        for &guesses in result.guess_distribution.keys() {
            assert!((1..=MAX_ATTEMPTS as usize).contains(&guesses));
        }
    }

    #[test]
    fn consistency_filtering_beats_blind_chance() {
        // 10 candidates, 4 attempts: blind guessing wins 40% of the time.
        // Likeness filtering should do clearly better over 200 games.
        let result = run_simulation(Difficulty::Novice, 200, 3);
        assert!(
            result.win_rate > 0.45,
            "win rate {:.2} not better than blind guessing",
            result.win_rate
        );
    }

    #[test]
    fn same_base_seed_reproduces_the_run() {
        let a = run_simulation(Difficulty::Advanced, 30, 7);
        let b = run_simulation(Difficulty::Advanced, 30, 7);

        assert_eq!(a.wins, b.wins);
        assert_eq!(a.guess_distribution, b.guess_distribution);
    }

    #[test]
    fn empty_simulation_is_well_defined() {
        let result = run_simulation(Difficulty::Novice, 0, 0);
        assert_eq!(result.games, 0);
        assert_eq!(result.wins, 0);
        assert!((result.win_rate - 0.0).abs() < f64::EPSILON);
    }
}
