//! Blocks in transit along a spoke
//!
//! A falling block has a continuous depth that shrinks by `speed * dt` each
//! advance. It stops when it reaches the hexagon or runs into an occupied
//! slot; the swept range between the old and new depth is checked slot by
//! slot so that a long frame cannot carry a block through a settled one.

use serde::{Deserialize, Serialize};

use super::color::ColorId;
use super::grid::{Coord, Grid};

/// Where a stopped block is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LandingRule {
    /// Settle directly outward of whatever it ran into.
    ///
    /// A block cannot pass a settled one, so a spoke whose outer slots are
    /// full loses even when an empty slot is left further in (a rotation can
    /// leave a spoke like that).
    #[default]
    SnapToCollision,
    /// Settle in the innermost empty slot of the spoke
    FirstOpenSlot,
}

/// Result of advancing one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Falling,
    Landed(Coord),
    /// No empty slot to settle into
    Lost,
}

/// A block sliding inward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingBlock {
    pub id: u32,
    pub spoke: usize,
    pub color: ColorId,
    /// Continuous depth in slots (N = just outside the rim)
    pub depth: f32,
}

impl FallingBlock {
    pub fn new(id: u32, spoke: usize, color: ColorId, depth: f32) -> Self {
        Self {
            id,
            spoke,
            color,
            depth,
        }
    }

    /// Move inward by `speed * dt` and report whether the block stopped.
    ///
    /// The grid is only read; writing the landed color is the caller's job.
    pub fn advance(&mut self, grid: &Grid, speed: f32, dt: f32, rule: LandingRule) -> Landing {
        let old = self.depth;
        let new = old - speed * dt;
        self.depth = new;

        let Some(hit) = sweep(grid, self.spoke, old, new) else {
            return Landing::Falling;
        };

        let target = match rule {
            LandingRule::SnapToCollision => grid.first_empty_from(self.spoke, hit),
            LandingRule::FirstOpenSlot => grid.first_empty_from(self.spoke, 0),
        };

        match target {
            Some(depth) => {
                self.depth = depth as f32;
                Landing::Landed(Coord::new(self.spoke, depth))
            }
            None => Landing::Lost,
        }
    }
}

/// Depth the block stops at (before searching for a free slot), or `None`
/// if it is still falling.
fn sweep(grid: &Grid, spoke: usize, old: f32, new: f32) -> Option<usize> {
    let slots = grid.slots();
    if slots == 0 {
        return Some(0);
    }

    let hi = (old.floor() as i64).min(slots as i64 - 1);
    let lo = (new.floor() as i64).max(0);

    for k in (lo..=hi).rev() {
        if grid.at(Coord::new(spoke, k as usize)).is_some() {
            return Some(k as usize + 1);
        }
    }

    (new <= 0.0).then_some(0)
}
