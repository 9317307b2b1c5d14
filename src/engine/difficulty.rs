//! Difficulty tiers
//!
//! Four ordered tiers mapping to (word length, candidate count). The mapping
//! is a tuning table, not a structural law: longer words mean harder puzzles,
//! and the candidate pool grows with them.

use std::fmt;

/// Puzzle difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Difficulty {
    #[default]
    Novice,
    Advanced,
    Expert,
    Master,
}

/// Tuning table: (tier, word length, candidate count)
const TIERS: [(Difficulty, usize, usize); 4] = [
    (Difficulty::Novice, 4, 10),
    (Difficulty::Advanced, 5, 12),
    (Difficulty::Expert, 6, 13),
    (Difficulty::Master, 7, 15),
];

impl Difficulty {
    /// All tiers in ascending order
    pub const ALL: [Self; 4] = [Self::Novice, Self::Advanced, Self::Expert, Self::Master];

    /// Word length used at this tier
    #[must_use]
    pub fn word_length(self) -> usize {
        TIERS[self.index()].1
    }

    /// Number of candidate words sampled at this tier
    #[must_use]
    pub fn candidate_count(self) -> usize {
        TIERS[self.index()].2
    }

    /// Display label, terminal style
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Novice => "NOVICE",
            Self::Advanced => "ADVANCED",
            Self::Expert => "EXPERT",
            Self::Master => "MASTER",
        }
    }

    /// Parse a difficulty from a CLI name
    ///
    /// Accepts the tier name in any case, e.g. `"novice"` or `"MASTER"`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|d| d.label() == name)
    }

    /// Next tier, wrapping around (menu navigation)
    #[must_use]
    pub fn cycle_next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tier, wrapping around (menu navigation)
    #[must_use]
    pub fn cycle_prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        match self {
            Self::Novice => 0,
            Self::Advanced => 1,
            Self::Expert => 2,
            Self::Master => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_length_is_monotonic_in_tier() {
        let lengths: Vec<usize> = Difficulty::ALL.iter().map(|d| d.word_length()).collect();
        assert!(lengths.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn candidate_count_scales_with_length() {
        let counts: Vec<usize> = Difficulty::ALL
            .iter()
            .map(|d| d.candidate_count())
            .collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
        assert!(counts.iter().all(|&c| (10..=15).contains(&c)));
    }

    #[test]
    fn from_name_round_trips_labels() {
        for tier in Difficulty::ALL {
            assert_eq!(Difficulty::from_name(tier.label()), Some(tier));
            assert_eq!(
                Difficulty::from_name(&tier.label().to_lowercase()),
                Some(tier)
            );
        }
        assert_eq!(Difficulty::from_name("impossible"), None);
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        assert_eq!(Difficulty::Master.cycle_next(), Difficulty::Novice);
        assert_eq!(Difficulty::Novice.cycle_prev(), Difficulty::Master);

        let mut tier = Difficulty::Novice;
        for _ in 0..Difficulty::ALL.len() {
            tier = tier.cycle_next();
        }
        assert_eq!(tier, Difficulty::Novice);
    }

    #[test]
    fn default_is_lowest_tier() {
        assert_eq!(Difficulty::default(), Difficulty::Novice);
    }
}
