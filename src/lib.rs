//=========================================================================
// Poly Engine Library Root
//
// A 2D engine core: game objects with typed components, a batched sprite
// renderer and a two-scene state machine (level editor → level).
//
// Typical usage:
// ```no_run
// use poly_engine::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new().build().run().unwrap();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the scene graph, renderer, scenes and input state. It is
// public so games can write their own components and scenes.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` wraps Winit (window, event loop, input conversion) and is
// not part of the public API surface.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use crate::core::platform_bridge::TickControl;
pub use engine::{DefaultLifecycle, Engine, EngineBuilder, Game, GameLifecycle};
