//! High score tracking
//!
//! Process-lifetime only: the best score is a one-way ratchet, and finished
//! runs are kept in a small session leaderboard for the menu screen.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;

/// One finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Final score
    pub score: u64,
    /// Ticks survived
    pub ticks: u64,
    /// Run number within this session (0-based)
    pub run: u32,
}

/// Session best plus leaderboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    best: u64,
    pub entries: Vec<RunRecord>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Best score seen this session. Never decreases.
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Raise the best score to `score` if higher. Returns true if it rose.
    pub fn ratchet(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Leaderboard rank of run `run` (1-indexed), None if it is not listed
    pub fn rank_of(&self, run: u32) -> Option<usize> {
        self.entries.iter().position(|e| e.run == run).map(|i| i + 1)
    }

    /// Record a finished run: ratchets the best score and inserts the run
    /// into the leaderboard if it qualifies. Returns the rank achieved.
    pub fn record_run(&mut self, score: u64, ticks: u64, run: u32) -> Option<usize> {
        self.ratchet(score);
        if !self.qualifies(score) {
            return None;
        }

        let entry = RunRecord { score, ticks, run };

        // Sorted descending by score; ties keep the earlier run first
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        log::debug!("Run {} recorded: score {} (rank {})", run, score, rank);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ratchet_never_lowers() {
        let mut hs = HighScores::new();
        assert!(hs.ratchet(5));
        assert!(!hs.ratchet(3));
        assert!(!hs.ratchet(5));
        assert_eq!(hs.best(), 5);
    }

    #[test]
    fn test_record_run_ranks_descending() {
        let mut hs = HighScores::new();
        assert_eq!(hs.record_run(10, 100, 0), Some(1));
        assert_eq!(hs.record_run(30, 300, 1), Some(1));
        assert_eq!(hs.record_run(20, 200, 2), Some(2));
        let scores: Vec<u64> = hs.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![30, 20, 10]);
        assert_eq!(hs.best(), 30);
        assert_eq!(hs.rank_of(1), Some(1));
        assert_eq!(hs.rank_of(0), Some(3));
    }

    #[test]
    fn test_zero_score_is_not_listed() {
        let mut hs = HighScores::new();
        assert_eq!(hs.record_run(0, 50, 0), None);
        assert!(hs.is_empty());
        assert_eq!(hs.rank_of(0), None);
    }

    #[test]
    fn test_leaderboard_is_capped() {
        let mut hs = HighScores::new();
        for run in 0..(MAX_HIGH_SCORES as u32 + 5) {
            hs.record_run(run as u64 + 1, 0, run);
        }
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
        assert!(!hs.qualifies(1));
        // The lowest runs fell off the board
        assert_eq!(hs.rank_of(0), None);
        assert_eq!(hs.rank_of(MAX_HIGH_SCORES as u32 + 4), Some(1));
    }

    proptest! {
        #[test]
        fn best_is_monotonic(scores in proptest::collection::vec(0u64..1000, 1..50)) {
            let mut hs = HighScores::new();
            let mut previous = 0;
            for (run, score) in scores.iter().enumerate() {
                hs.record_run(*score, 0, run as u32);
                prop_assert!(hs.best() >= previous);
                prop_assert!(hs.best() >= *score);
                previous = hs.best();
            }
        }
    }
}
