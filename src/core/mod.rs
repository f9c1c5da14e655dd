//=========================================================================
// Engine Core
//
// Everything the frame loop touches that is independent of the OS window.
//
// Responsibilities:
// - Scene graph: game objects and their components (`object`)
// - Batched sprite rendering over a GPU drawing interface (`render`)
// - Scene state machine and the built-in scenes (`scene`)
// - Input state, timing and the terminate flag (`input`, `globals`)
// - The channel contract with the platform layer (`platform_bridge`)
//
// Notes:
// Nothing here owns a window. GPU work goes through `GraphicsDevice`,
// input arrives as `PlatformEvent` batches.
//
//=========================================================================

pub mod error;
pub mod globals;
pub mod input;
pub mod object;
pub(crate) mod platform_bridge;
pub mod render;
pub mod scene;
