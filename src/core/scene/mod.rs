//=========================================================================
// Scene System
//=========================================================================
//
// Scenes own their objects, a renderer and a camera. The scene manager
// owns exactly one active scene and replaces it wholesale on transition.
//
// Architecture:
//   SceneManager
//     ├─ active: Box<dyn Scene>   (LevelEditorScene | LevelScene)
//     │    └─ SceneCore { objects, renderer, camera, running }
//     └─ state: SceneKind
//
// Per-scene state: NotStarted → Running (one-way).
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

//=== Internal Dependencies ===============================================

use crate::core::error::RenderError;
use crate::core::globals::GlobalContext;
use crate::core::render::GraphicsDevice;

//=== Module Declarations =================================================

mod config;
mod level;
mod level_editor;
mod scene_core;
mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use config::{GridConfig, SceneConfig, DEFAULT_FADE_DURATION};
pub use level::LevelScene;
pub use level_editor::{FadeStep, FadeTransition, LevelEditorScene};
pub use scene_core::SceneCore;
pub use scene_manager::SceneManager;
pub use transition_queue::{SceneTransition, TransitionQueue};

//=== SceneKind ===========================================================

/// The closed set of scene identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SceneKind {
    #[default]
    LevelEditor,
    Level,
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelEditor => f.write_str("LevelEditor"),
            Self::Level => f.write_str("Level"),
        }
    }
}

//=== SceneInstanceId =====================================================

/// Identity of one constructed scene. Every construction gets a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneInstanceId(u64);

impl SceneInstanceId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

//=== Scene Trait =========================================================

/// A concrete scene built on a shared [`SceneCore`].
///
/// Only `kind`, `core`, `core_mut` and `tick` are required. The default
/// `start` registers every held object with the renderer; the default
/// `dispose` releases the renderer's GPU objects.
///
/// ```rust
/// # use poly_engine::prelude::*;
/// struct Empty(SceneCore);
///
/// impl Scene for Empty {
///     fn kind(&self) -> SceneKind { SceneKind::Level }
///     fn core(&self) -> &SceneCore { &self.0 }
///     fn core_mut(&mut self) -> &mut SceneCore { &mut self.0 }
///
///     fn tick(
///         &mut self,
///         dt: f32,
///         _context: &mut GlobalContext,
///         device: &mut dyn GraphicsDevice,
///     ) -> Result<(), RenderError> {
///         self.0.tick_game_objects(dt);
///         self.0.render(device);
///         Ok(())
///     }
/// }
/// ```
pub trait Scene {
    fn kind(&self) -> SceneKind;

    fn core(&self) -> &SceneCore;

    fn core_mut(&mut self) -> &mut SceneCore;

    /// Starts every held object and registers it with the renderer.
    ///
    /// # Errors
    ///
    /// A batch's shader failed to compile or link.
    fn start(&mut self, device: &mut dyn GraphicsDevice) -> Result<(), RenderError> {
        self.core_mut().start(device)
    }

    /// Advances the scene by `dt` seconds and draws it.
    fn tick(
        &mut self,
        dt: f32,
        context: &mut GlobalContext,
        device: &mut dyn GraphicsDevice,
    ) -> Result<(), RenderError>;

    /// Releases the scene's GPU objects.
    fn dispose(&mut self, device: &mut dyn GraphicsDevice) {
        self.core_mut().dispose(device);
    }

    fn instance(&self) -> SceneInstanceId {
        self.core().instance()
    }

    fn is_running(&self) -> bool {
        self.core().is_running()
    }
}
