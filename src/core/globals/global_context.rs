//=========================================================================
// Global Context
//=========================================================================
//
// Shared data passed by reference into scenes and lifecycle hooks.
//
// Contains:
// - input: polled keyboard/mouse state for the current frame
// - state: window settings, timing, terminate flag, clear color
// - scene_transitions: scene change requests, applied after the tick
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::GameState;
use crate::core::input::StateTracker;
use crate::core::scene::TransitionQueue;

//=== GlobalContext =======================================================

/// Data scenes and lifecycle hooks may read and write during a frame.
pub struct GlobalContext {
    pub input: StateTracker,
    pub state: GameState,
    /// Requests queued here are applied once the active scene's tick
    /// has returned.
    pub scene_transitions: TransitionQueue,
}

impl GlobalContext {
    pub fn new(state: GameState) -> Self {
        Self {
            input: StateTracker::new(),
            state,
            scene_transitions: TransitionQueue::new(),
        }
    }
}
