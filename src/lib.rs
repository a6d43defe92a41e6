//! Hexfall - A radial match-elimination puzzle
//!
//! Six spokes radiate from a central hexagon. Colored blocks slide inward
//! along a spoke, settle, and clear when enough same-colored blocks touch.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, matching, cascades, rotation)
//! - `settings`: Tuning knobs injected at session construction
//! - `audio`: Sound cue selection from simulation events

pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Number of spokes around the ring (fixed)
    pub const SPOKES: usize = 6;
    /// Default number of slots along each spoke
    pub const DEFAULT_SLOTS: usize = 8;

    /// Fixed simulation timestep used by the driver (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Falling speed in slots per second
    pub const BLOCK_SPEED: f32 = 3.0;
    /// Seconds between spawns
    pub const SPAWN_INTERVAL: f32 = 3.0;
    /// Smallest connected group that clears
    pub const MIN_MATCH: usize = 3;

    /// Ring geometry (normalized device units)
    pub const HEX_SIZE: f32 = 0.2;
    pub const BLOCK_SIZE: f32 = 0.08;

    /// Angular size of one spoke step (radians)
    pub const ROTATION_STEP: f32 = std::f32::consts::FRAC_PI_3;
    /// Fraction of the rotation offset left after one second of easing
    pub const ROTATION_EASE_BASE: f32 = 0.003;
    /// Offsets smaller than this snap to zero
    pub const ROTATION_SNAP: f32 = 0.01;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
