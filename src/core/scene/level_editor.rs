//=========================================================================
// Level Editor Scene
//=========================================================================
//
// Fills the screen with a grid of tinted sprites and, when Space is
// pressed, fades the clear color to black before switching to the level.
//
// Fade sub-state machine:
//   Idle ──Space pressed──▶ Fading (timer counts down, RGB decays)
//     ▲                        │ timer <= 0
//     └──── switch to Level, RGB reset to 1 ◀──┘
//
//=========================================================================

//=== External Crates =====================================================

use glam::{Vec2, Vec4};
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{GridConfig, Scene, SceneConfig, SceneCore, SceneKind, SceneTransition};
use crate::core::error::RenderError;
use crate::core::globals::GlobalContext;
use crate::core::input::KeyCode;
use crate::core::object::{GameObject, SpriteRenderer, Transform};
use crate::core::render::GraphicsDevice;

/// Key that starts the fade.
pub const FADE_TRIGGER: KeyCode = KeyCode::Space;

//=== FadeTransition ======================================================

/// Outcome of one [`FadeTransition::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeStep {
    Idle,
    Fading,
    Finished,
}

/// Timed fade of the clear color towards black.
///
/// Each step while the timer is positive lowers R, G and B by
/// `dt / duration`, clamped at 0. The step after the timer runs out
/// restores RGB to 1 and reports [`FadeStep::Finished`]. Alpha is never
/// touched.
#[derive(Debug, Clone, PartialEq)]
pub struct FadeTransition {
    duration: f32,
    remaining: f32,
    fading: bool,
}

impl FadeTransition {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: duration,
            fading: false,
        }
    }

    /// Begins fading. Returns `false` if a fade is already running.
    pub fn trigger(&mut self) -> bool {
        if self.fading {
            return false;
        }
        self.fading = true;
        true
    }

    pub fn step(&mut self, dt: f32, color: &mut Vec4) -> FadeStep {
        if !self.fading {
            return FadeStep::Idle;
        }

        if self.remaining > 0.0 {
            self.remaining -= dt;
            let decay = dt / self.duration;
            color.x = (color.x - decay).max(0.0);
            color.y = (color.y - decay).max(0.0);
            color.z = (color.z - decay).max(0.0);
            return FadeStep::Fading;
        }

        self.fading = false;
        self.remaining = self.duration;
        color.x = 1.0;
        color.y = 1.0;
        color.z = 1.0;
        FadeStep::Finished
    }

    pub fn is_fading(&self) -> bool {
        self.fading
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }
}

//=== LevelEditorScene ====================================================

pub struct LevelEditorScene {
    core: SceneCore,
    fade: FadeTransition,
}

impl LevelEditorScene {
    /// Builds the scene with its full sprite grid (not yet started).
    pub fn new(config: &SceneConfig) -> Self {
        let mut core = SceneCore::from_config(config);
        for object in grid_objects(&config.grid) {
            core.stage(object);
        }

        debug!(target: "scene", "Level editor built with {} grid objects", config.grid.cell_count());

        Self {
            core,
            fade: FadeTransition::new(config.fade_duration),
        }
    }

    pub fn fade(&self) -> &FadeTransition {
        &self.fade
    }
}

impl Scene for LevelEditorScene {
    fn kind(&self) -> SceneKind {
        SceneKind::LevelEditor
    }

    fn core(&self) -> &SceneCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SceneCore {
        &mut self.core
    }

    fn tick(
        &mut self,
        dt: f32,
        context: &mut GlobalContext,
        device: &mut dyn GraphicsDevice,
    ) -> Result<(), RenderError> {
        self.core.tick_game_objects(dt);
        self.core.render(device);

        if context.input.is_key_pressed(FADE_TRIGGER) && self.fade.trigger() {
            info!(target: "scene", "Fading out over {:.1}s", self.fade.duration());
        }

        if self.fade.step(dt, &mut context.state.clear_color) == FadeStep::Finished {
            context
                .scene_transitions
                .push(SceneTransition::Change(SceneKind::Level));
        }

        Ok(())
    }
}

//=== Grid Construction ===================================================

/// One unit-scaled sprite per grid cell, placed at the cell's corner and
/// tinted by its normalized position: `R = x / columns`, `G = y / rows`,
/// `B = A = 1`.
pub(crate) fn grid_objects(grid: &GridConfig) -> impl Iterator<Item = GameObject> + '_ {
    let cell = grid.cell_size();

    (0..grid.columns).flat_map(move |x| {
        (0..grid.rows).map(move |y| {
            let position = grid.origin + Vec2::new(x as f32 * cell.x, y as f32 * cell.y);
            let tint = Vec4::new(
                x as f32 / grid.columns as f32,
                y as f32 / grid.rows as f32,
                1.0,
                1.0,
            );

            let mut object =
                GameObject::with_transform(format!("Obj{x}{y}"), Transform::at(position));
            object.add_component(SpriteRenderer::new(tint));
            object
        })
    })
}

//=========================================================================
// Unit Tests
//=========================================================================
