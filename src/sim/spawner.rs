//! New block selection and spawn timing

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::color::ColorId;
use crate::consts::SPOKES;

/// Seeded source of spawn spokes and colors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Pick a uniformly random spoke and color
    pub fn roll(&mut self) -> (usize, ColorId) {
        let spoke = self.rng.random_range(0..SPOKES);
        let color = ColorId::random(&mut self.rng);
        (spoke, color)
    }
}

/// Fixed-interval spawn timer for callers that want one.
///
/// Time accumulates across frames; each full interval yields one spawn and
/// the remainder carries over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnClock {
    pub interval: f32,
    pub elapsed: f32,
}

impl SpawnClock {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Add `dt` and return how many spawns came due
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut due = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            due += 1;
        }
        due
    }
}
