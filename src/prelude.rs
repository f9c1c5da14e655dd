//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use poly_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{DefaultLifecycle, Engine, EngineBuilder, Game, GameLifecycle};
pub use crate::TickControl;

// Errors
pub use crate::core::error::{EngineError, PlatformError, RenderError};

// Global context
pub use crate::core::globals::{GameState, GlobalContext};

// Input
pub use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton, StateTracker};

// Scene graph
pub use crate::core::object::{Component, GameObject, ObjectId, SpriteRenderer, Transform};

// Rendering
pub use crate::core::render::{Camera, GraphicsDevice, HeadlessDevice, ShaderSource};

// Scene system
pub use crate::core::scene::{
    GridConfig, Scene, SceneConfig, SceneCore, SceneKind, SceneManager, SceneTransition,
};
