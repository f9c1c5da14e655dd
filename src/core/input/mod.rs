//=========================================================================
// Input
//=========================================================================
//
// Explicitly owned input state. There are no process-wide key or mouse
// singletons: the `StateTracker` lives in the global context and is
// passed by reference to whatever needs to query it.
//
// Architecture:
//   InputEvent batches (from the platform channel)
//        ↓ apply_frame()
//   StateTracker  → is_key_pressed / is_key_down / mouse_position / ...
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use state_tracker::StateTracker;
