//! Ring rotation
//!
//! Turning the ring moves every settled slot one spoke over at every depth in
//! one step. Falling blocks live in screen space and keep their spoke. The
//! smooth on-screen turn is a separate cosmetic offset that eases back to
//! zero and never feeds into the grid.

use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::consts::{ROTATION_EASE_BASE, ROTATION_SNAP, ROTATION_STEP};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotateDir {
    Left,
    Right,
}

impl RotateDir {
    pub fn opposite(self) -> Self {
        match self {
            RotateDir::Left => RotateDir::Right,
            RotateDir::Right => RotateDir::Left,
        }
    }
}

/// Shift every ring of slots by one spoke.
///
/// Right: spoke `s` takes the contents of spoke `s + 1`.
/// Left: spoke `s` takes the contents of spoke `s - 1`.
pub fn rotate_grid(grid: &mut Grid, dir: RotateDir) {
    for row in grid.rows_mut() {
        match dir {
            RotateDir::Right => row.rotate_left(1),
            RotateDir::Left => row.rotate_right(1),
        }
    }
}

/// Visual rotation offset (radians) that eases toward zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationEase {
    pub offset: f32,
}

impl RotationEase {
    /// Record a discrete turn
    pub fn kick(&mut self, dir: RotateDir) {
        match dir {
            RotateDir::Right => self.offset -= ROTATION_STEP,
            RotateDir::Left => self.offset += ROTATION_STEP,
        }
    }

    /// Exponential decay, snapping tiny offsets to zero
    pub fn decay(&mut self, dt: f32) {
        self.offset *= ROTATION_EASE_BASE.powf(dt);
        if self.offset.abs() < ROTATION_SNAP {
            self.offset = 0.0;
        }
    }

    pub fn is_settled(&self) -> bool {
        self.offset == 0.0
    }
}
