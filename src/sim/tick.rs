//! Frame driver
//!
//! Applies one frame of input and timing to a session: rotation first, then
//! the cosmetic ease, scheduled spawns, and finally the block advance.

use super::rotation::RotateDir;
use super::state::{GameEvent, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Turn the ring one spoke
    pub rotate: Option<RotateDir>,
    /// Spawn a block now, in addition to any the clock schedules
    pub spawn: bool,
}

/// Advance the game state by one frame and return what happened
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Don't tick once the session is lost
    if state.is_lost() {
        return events;
    }

    if let Some(dir) = input.rotate {
        events.extend(state.rotate(dir));
    }

    state.ease.decay(dt);

    let due = state.spawn_clock.advance(dt) + u32::from(input.spawn);
    for _ in 0..due {
        let id = state.spawn();
        if let Some(block) = state.block(id) {
            events.push(GameEvent::Spawned {
                block: id,
                spoke: block.spoke,
                color: block.color,
            });
        }
    }

    events.extend(state.advance(dt));
    events
}
