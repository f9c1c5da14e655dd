//=========================================================================
// Global Engine State
//=========================================================================
//
// Data threaded explicitly through the frame loop. Nothing here is a
// process-wide singleton.
//
// Architecture:
//   GlobalContext
//     ├─ StateTracker    (input)
//     ├─ GameState       (timing, terminate flag, clear color)
//     └─ TransitionQueue (pending scene changes)
//
//=========================================================================

//=== Module Declarations =================================================

mod game_state;
mod global_context;

//=== Public API ==========================================================

pub use game_state::GameState;
pub use global_context::GlobalContext;
