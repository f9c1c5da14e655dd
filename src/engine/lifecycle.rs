//=========================================================================
// Game Lifecycle
//=========================================================================
//
// Application hooks run by the frame loop around the active scene.
//
// Order per run:
//   init()     once, before the first frame (queue the first scene here)
//   tick()     every frame, after the active scene ticked
//   cleanup()  once, after the loop exits
//
//=========================================================================

use log::info;

use crate::core::globals::GlobalContext;
use crate::core::input::KeyCode;
use crate::core::scene::{SceneKind, SceneTransition};

//=== GameLifecycle =======================================================

/// Hooks the application plugs into the frame loop.
///
/// Scene changes requested here go through
/// `context.scene_transitions` like any other.
pub trait GameLifecycle {
    fn init(&mut self, context: &mut GlobalContext);

    fn tick(&mut self, context: &mut GlobalContext);

    fn cleanup(&mut self, context: &GlobalContext);
}

//=== DefaultLifecycle ====================================================

/// Opens `initial_scene` and quits while Escape is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultLifecycle {
    initial_scene: SceneKind,
}

impl DefaultLifecycle {
    pub const QUIT_KEY: KeyCode = KeyCode::Escape;

    pub fn new(initial_scene: SceneKind) -> Self {
        Self { initial_scene }
    }

    pub fn initial_scene(&self) -> SceneKind {
        self.initial_scene
    }
}

impl Default for DefaultLifecycle {
    fn default() -> Self {
        Self::new(SceneKind::default())
    }
}

impl GameLifecycle for DefaultLifecycle {
    fn init(&mut self, context: &mut GlobalContext) {
        info!(target: "engine", "Starting '{}' in {}", context.state.title, self.initial_scene);
        context
            .scene_transitions
            .push(SceneTransition::Change(self.initial_scene));
    }

    fn tick(&mut self, context: &mut GlobalContext) {
        if context.input.is_key_down(Self::QUIT_KEY) {
            context.state.terminate();
        }
    }

    fn cleanup(&mut self, context: &GlobalContext) {
        let state = &context.state;
        info!(
            target: "engine",
            "Cleanup: last frame {:.4}s ({:.1} fps)",
            state.dt,
            state.fps
        );
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
