//=========================================================================
// Level Scene
//=========================================================================

use super::{Scene, SceneConfig, SceneCore, SceneKind};
use crate::core::error::RenderError;
use crate::core::globals::GlobalContext;
use crate::core::render::GraphicsDevice;

/// The playable level. Starts empty; objects are added at runtime.
pub struct LevelScene {
    core: SceneCore,
}

impl LevelScene {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            core: SceneCore::from_config(config),
        }
    }
}

impl Scene for LevelScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Level
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
        _context: &mut GlobalContext,
        device: &mut dyn GraphicsDevice,
    ) -> Result<(), RenderError> {
        self.core.tick_game_objects(dt);
        self.core.render(device);
        Ok(())
    }
}
