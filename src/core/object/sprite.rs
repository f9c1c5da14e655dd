//=========================================================================
// Sprite Renderer
//=========================================================================
//
// The only renderable component: a color tint plus fixed texture
// coordinates. The renderer reads it when the owning object is
// registered with a batch.
//
//=========================================================================

use std::any::Any;

use glam::{Vec2, Vec4};

use super::Component;

/// Visual component carrying a 4-channel color tint.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteRenderer {
    color: Vec4,
    tex_coords: [Vec2; 4],
}

impl SpriteRenderer {
    pub fn new(color: Vec4) -> Self {
        Self {
            color,
            tex_coords: [
                Vec2::new(1.0, 1.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(0.0, 0.0),
            ],
        }
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    pub fn tex_coords(&self) -> &[Vec2; 4] {
        &self.tex_coords
    }
}

impl Component for SpriteRenderer {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
