//! Obstacle spawn gating and the off-screen sweep

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Policy deciding when a new obstacle enters the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnGate {
    /// Independent draw every tick; expected gap is `1 / probability` ticks
    Chance { probability: f64 },
    /// Spawn once more than `period_ticks` have elapsed since the last spawn
    Interval { period_ticks: u64 },
}

impl SpawnGate {
    /// "One in `rate`" chance per tick
    pub fn one_in(rate: u32) -> Self {
        SpawnGate::Chance {
            probability: 1.0 / rate.max(1) as f64,
        }
    }
}

/// Spawn gate plus the timer state it needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    pub gate: SpawnGate,
    /// Tick of the most recent spawn (None until the first one)
    pub last_spawn_tick: Option<u64>,
}

impl Spawner {
    pub fn new(gate: SpawnGate) -> Self {
        Self {
            gate,
            last_spawn_tick: None,
        }
    }

    /// Decide whether to spawn on tick `now`. Records the spawn when true.
    pub fn poll(&mut self, now: u64, rng: &mut impl Rng) -> bool {
        let fire = match self.gate {
            SpawnGate::Chance { probability } => rng.random_bool(probability.clamp(0.0, 1.0)),
            SpawnGate::Interval { period_ticks } => match self.last_spawn_tick {
                None => true,
                Some(last) => now.saturating_sub(last) > period_ticks,
            },
        };
        if fire {
            self.last_spawn_tick = Some(now);
        }
        fire
    }
}

/// Rebuild `items` keeping only those for which `gone` is false.
///
/// The survivors are collected in a separate pass so nothing is removed
/// while the collection is being walked.
pub fn sweep<T>(items: &mut Vec<T>, gone: impl Fn(&T) -> bool) -> usize {
    let before = items.len();
    let survivors: Vec<T> = std::mem::take(items)
        .into_iter()
        .filter(|item| !gone(item))
        .collect();
    *items = survivors;
    before - items.len()
}
