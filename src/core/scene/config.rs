//=========================================================================
// Scene Configuration
//=========================================================================
//
// Settings every scene is built from, assembled by the engine builder
// and handed to the scene manager.
//
//=========================================================================

use std::sync::Arc;

use glam::Vec2;

use crate::core::render::camera::DEFAULT_VIEWPORT;
use crate::core::render::{ShaderSource, DEFAULT_MAX_BATCH_SIZE};

/// Seconds the editor takes to fade to black before switching scenes.
pub const DEFAULT_FADE_DURATION: f32 = 2.0;

//=== GridConfig ==========================================================

/// Layout of the editor's sprite grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub columns: u32,
    pub rows: u32,
    /// World position of the bottom-left cell.
    pub origin: Vec2,
    /// World size covered by the whole grid.
    pub area: Vec2,
}

impl GridConfig {
    /// World-space spacing between neighboring grid sprites.
    pub fn cell_size(&self) -> Vec2 {
        self.area / Vec2::new(self.columns as f32, self.rows as f32)
    }

    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 100,
            rows: 100,
            origin: Vec2::new(10.0, 10.0),
            area: Vec2::new(600.0, 300.0),
        }
    }
}

//=== SceneConfig =========================================================

#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub max_batch_size: usize,
    pub shader: Arc<ShaderSource>,
    pub grid: GridConfig,
    pub fade_duration: f32,
    pub viewport: Vec2,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            shader: Arc::new(ShaderSource::sprite_default()),
            grid: GridConfig::default(),
            fade_duration: DEFAULT_FADE_DURATION,
            viewport: DEFAULT_VIEWPORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_cells() {
        let grid = GridConfig::default();

        assert_eq!(grid.cell_count(), 10_000);
        assert_eq!(grid.cell_size(), Vec2::new(6.0, 3.0));
    }
}
