//=========================================================================
// Scene Manager
//=========================================================================
//
// State machine over scene identities: Uninitialized or one of
// `SceneKind`. Holds at most one active scene.
//
// change_scene() always builds a fresh instance (no caching), starts it,
// and only then disposes the previous scene. If the new scene fails to
// start it is disposed and the previous scene stays active.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use super::{
    LevelEditorScene, LevelScene, Scene, SceneConfig, SceneKind, SceneTransition,
};
use crate::core::error::RenderError;
use crate::core::globals::GlobalContext;
use crate::core::render::GraphicsDevice;

//=== SceneManager ========================================================

/// Owns the active scene and swaps it wholesale.
///
/// Invariant: `active_scene()` is `Some` exactly when `state()` is `Some`.
pub struct SceneManager {
    config: SceneConfig,
    active: Option<Box<dyn Scene>>,
    state: Option<SceneKind>,
}

impl SceneManager {
    //--- Construction -----------------------------------------------------

    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            active: None,
            state: None,
        }
    }

    fn build(&self, kind: SceneKind) -> Box<dyn Scene> {
        match kind {
            SceneKind::LevelEditor => Box::new(LevelEditorScene::new(&self.config)),
            SceneKind::Level => Box::new(LevelScene::new(&self.config)),
        }
    }

    //--- Transitions ------------------------------------------------------

    /// Builds, starts and activates a new scene of `kind`.
    ///
    /// # Errors
    ///
    /// The new scene failed to start; the previous scene remains active.
    pub fn change_scene(
        &mut self,
        kind: SceneKind,
        device: &mut dyn GraphicsDevice,
    ) -> Result<(), RenderError> {
        let mut scene = self.build(kind);

        if let Err(err) = scene.start(device) {
            error!(target: "scene", "Failed to start {} scene: {}", kind, err);
            scene.dispose(device);
            return Err(err);
        }

        let previous = self.state.replace(kind);
        if let Some(mut old) = self.active.replace(scene) {
            old.dispose(device);
        }

        match previous {
            Some(previous) => info!(target: "scene", "Switched to: {}, from {}", kind, previous),
            None => info!(target: "scene", "Switched to: {}, from none", kind),
        }
        Ok(())
    }

    /// Drops the active scene and returns to the uninitialized state.
    pub fn reset(&mut self, device: &mut dyn GraphicsDevice) {
        if let Some(mut scene) = self.active.take() {
            scene.dispose(device);
        }
        self.state = None;

        info!(target: "scene", "Reset: no active scene");
    }

    /// Applies every transition queued during the last tick, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first scene that fails to start.
    pub fn process_transitions(
        &mut self,
        context: &mut GlobalContext,
        device: &mut dyn GraphicsDevice,
    ) -> Result<(), RenderError> {
        for transition in context.scene_transitions.take() {
            debug!(target: "scene", "Processing transition {:?}", transition);

            match transition {
                SceneTransition::Change(kind) => self.change_scene(kind, device)?,
                SceneTransition::Clear => self.reset(device),
                SceneTransition::Empty => {}
            }
        }
        Ok(())
    }

    //--- Update -----------------------------------------------------------

    /// Ticks the active scene, if any.
    pub fn tick(
        &mut self,
        dt: f32,
        context: &mut GlobalContext,
        device: &mut dyn GraphicsDevice,
    ) -> Result<(), RenderError> {
        match self.active.as_mut() {
            Some(scene) => scene.tick(dt, context, device),
            None => Ok(()),
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn active_scene(&self) -> Option<&dyn Scene> {
        self.active.as_deref()
    }

    pub fn active_scene_mut(&mut self) -> Option<&mut (dyn Scene + 'static)> {
        self.active.as_deref_mut()
    }

    pub fn state(&self) -> Option<SceneKind> {
        self.state
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
