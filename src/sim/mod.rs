//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied time steps only
//! - Seeded RNG only
//! - Stable iteration order (oldest block first)
//! - No rendering, audio, or platform dependencies

pub mod cascade;
pub mod color;
pub mod falling;
pub mod grid;
pub mod layout;
pub mod matching;
pub mod rotation;
pub mod spawner;
pub mod state;
pub mod tick;

pub use cascade::{Resolution, resolve};
pub use color::ColorId;
pub use falling::{FallingBlock, Landing, LandingRule};
pub use grid::{Coord, Grid, GridError};
pub use layout::{RingLayout, rotate_point};
pub use matching::{MatchRegion, flood};
pub use rotation::{RotateDir, RotationEase, rotate_grid};
pub use spawner::{SpawnClock, Spawner};
pub use state::{GameEvent, GamePhase, GameState, SessionError, Snapshot};
pub use tick::{TickInput, tick};
