//! Sound cue selection
//!
//! The simulation never plays sound. An audio layer feeds each frame's
//! events through here and plays whatever cues come back.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Block settles into a slot
    Click,
    /// A region cleared
    Clear,
    /// Ring turned
    Rotate,
    /// Session lost
    GameOver,
}

impl SoundEffect {
    /// Cue for one event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Landed { .. } => Some(SoundEffect::Click),
            GameEvent::Matched { cleared: true, .. } => Some(SoundEffect::Clear),
            GameEvent::Rotated { .. } => Some(SoundEffect::Rotate),
            GameEvent::Lost { .. } => Some(SoundEffect::GameOver),
            GameEvent::Matched { .. } | GameEvent::Spawned { .. } | GameEvent::Released { .. } => {
                None
            }
        }
    }
}

/// Cues for a frame's events, in order
pub fn cues(events: &[GameEvent]) -> Vec<SoundEffect> {
    events.iter().filter_map(SoundEffect::for_event).collect()
}
