//! Session state and the core state transitions
//!
//! All state that must be persisted for Continue/determinism lives here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cascade::resolve;
use super::color::ColorId;
use super::falling::{FallingBlock, Landing};
use super::grid::{Coord, Grid};
use super::matching::flood;
use super::rotation::{RotateDir, RotationEase, rotate_grid};
use super::spawner::{SpawnClock, Spawner};
use crate::consts::SPOKES;
use crate::settings::{Settings, SettingsError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid session json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("grid has {grid} slots per spoke but settings ask for {settings}")]
    SlotMismatch { grid: usize, settings: usize },
    #[error("block {block} is on spoke {spoke}, which does not exist")]
    BlockSpoke { block: u32, spoke: usize },
    #[error("cannot spawn at spoke {spoke}, depth {depth}")]
    BadSpawn { spoke: usize, depth: f32 },
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Blocks fall and the ring turns
    Playing,
    /// A block had nowhere to land; the session is over
    Lost,
}

/// Observable transitions, in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A block entered at the rim
    Spawned { block: u32, spoke: usize, color: ColorId },
    /// A block settled into the grid
    Landed {
        block: u32,
        spoke: usize,
        depth: usize,
        color: ColorId,
    },
    /// Region check after a landing; `cleared` if it reached the threshold
    Matched {
        coords: Vec<Coord>,
        count: usize,
        cleared: bool,
    },
    /// A settled block was lifted out above a cleared slot and falls again
    Released {
        block: u32,
        spoke: usize,
        depth: usize,
        color: ColorId,
    },
    /// A block found no free slot on its spoke
    Lost { block: u32, spoke: usize },
    /// The ring turned one spoke
    Rotated { dir: RotateDir },
}

/// Read-only copy of everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: Grid,
    pub falling: Vec<FallingBlock>,
    pub rotation_offset: f32,
    pub phase: GamePhase,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub(crate) grid: Grid,
    /// In-flight blocks, oldest first
    pub(crate) falling: Vec<FallingBlock>,
    pub(crate) phase: GamePhase,
    pub(crate) spawner: Spawner,
    /// Driver-side spawn timer
    pub spawn_clock: SpawnClock,
    /// Cosmetic rotation offset
    pub ease: RotationEase,
    /// Number of advances applied
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with default settings
    pub fn new(seed: u64) -> Self {
        Self::build(Settings::default(), seed)
    }

    /// Create a new session with custom settings
    pub fn with_settings(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::build(settings, seed))
    }

    fn build(settings: Settings, seed: u64) -> Self {
        Self {
            seed,
            grid: Grid::new(settings.slots),
            falling: Vec::new(),
            phase: GamePhase::Playing,
            spawner: Spawner::new(seed),
            spawn_clock: SpawnClock::new(settings.spawn_interval),
            ease: RotationEase::default(),
            time_ticks: 0,
            next_id: 1,
            settings,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for pre-seeding a board
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn falling(&self) -> &[FallingBlock] {
        &self.falling
    }

    pub fn block(&self, id: u32) -> Option<&FallingBlock> {
        self.falling.iter().find(|b| b.id == id)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_lost(&self) -> bool {
        self.phase == GamePhase::Lost
    }

    pub fn rotation_offset(&self) -> f32 {
        self.ease.offset
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid.clone(),
            falling: self.falling.clone(),
            rotation_offset: self.ease.offset,
            phase: self.phase,
        }
    }

    /// Add a block with a random spoke and color just outside the rim
    pub fn spawn(&mut self) -> u32 {
        let (spoke, color) = self.spawner.roll();
        let id = self.next_entity_id();
        self.falling.push(FallingBlock::new(
            id,
            spoke,
            color,
            self.grid.slots() as f32,
        ));
        log::debug!("Spawned block {} ({:?}) on spoke {}", id, color, spoke);
        id
    }

    /// Add a specific block at any finite depth
    pub fn spawn_at(
        &mut self,
        spoke: usize,
        color: ColorId,
        depth: f32,
    ) -> Result<u32, SessionError> {
        if spoke >= SPOKES || !depth.is_finite() {
            return Err(SessionError::BadSpawn { spoke, depth });
        }
        let id = self.next_entity_id();
        self.falling.push(FallingBlock::new(id, spoke, color, depth));
        Ok(id)
    }

    /// Turn the ring one spoke. No matching happens on rotation.
    pub fn rotate(&mut self, dir: RotateDir) -> Option<GameEvent> {
        if self.is_lost() {
            return None;
        }
        rotate_grid(&mut self.grid, dir);
        self.ease.kick(dir);
        log::trace!("Rotated {:?}", dir);
        Some(GameEvent::Rotated { dir })
    }

    /// Move every in-flight block, oldest first, fully resolving each
    /// landing (match check and clear) before the next block moves.
    ///
    /// Blocks released by a clear join the pool after this pass.
    pub fn advance(&mut self, dt: f32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.is_lost() {
            return events;
        }
        self.time_ticks += 1;

        let speed = self.settings.fall_speed;
        let rule = self.settings.landing_rule;
        let in_flight = std::mem::take(&mut self.falling);
        let mut still_falling = Vec::with_capacity(in_flight.len());
        let mut released = Vec::new();

        for mut block in in_flight {
            match block.advance(&self.grid, speed, dt, rule) {
                Landing::Falling => still_falling.push(block),
                Landing::Landed(at) => self.settle(&block, at, &mut events, &mut released),
                Landing::Lost => {
                    log::info!("Block {} has no room on spoke {}", block.id, block.spoke);
                    self.phase = GamePhase::Lost;
                    events.push(GameEvent::Lost {
                        block: block.id,
                        spoke: block.spoke,
                    });
                }
            }
        }

        still_falling.extend(released);
        self.falling = still_falling;
        events
    }

    fn settle(
        &mut self,
        block: &FallingBlock,
        at: Coord,
        events: &mut Vec<GameEvent>,
        released: &mut Vec<FallingBlock>,
    ) {
        self.grid.put(at, Some(block.color));
        log::debug!("Block {} landed at ({}, {})", block.id, at.spoke, at.depth);
        events.push(GameEvent::Landed {
            block: block.id,
            spoke: at.spoke,
            depth: at.depth,
            color: block.color,
        });

        let region = flood(&self.grid, at, block.color);
        let resolution = resolve(&mut self.grid, &region, self.settings.min_match);
        events.push(GameEvent::Matched {
            coords: region.members.iter().copied().collect(),
            count: region.count(),
            cleared: resolution.cleared,
        });

        for (c, color) in resolution.refalls {
            let id = self.next_entity_id();
            events.push(GameEvent::Released {
                block: id,
                spoke: c.spoke,
                depth: c.depth,
                color,
            });
            released.push(FallingBlock::new(id, c.spoke, color, c.depth as f32));
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore a saved session, rejecting anything `advance` could not run
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let state: Self = serde_json::from_str(json)?;
        state.settings.validate()?;
        if state.grid.slots() != state.settings.slots {
            return Err(SessionError::SlotMismatch {
                grid: state.grid.slots(),
                settings: state.settings.slots,
            });
        }
        if let Some(block) = state.falling.iter().find(|b| b.spoke >= SPOKES) {
            return Err(SessionError::BlockSpoke {
                block: block.id,
                spoke: block.spoke,
            });
        }
        Ok(state)
    }
}
