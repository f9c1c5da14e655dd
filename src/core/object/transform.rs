//=========================================================================
// Transform
//=========================================================================

use glam::Vec2;

/// Position and scale of a scene object in world units.
///
/// Owned exclusively by its [`GameObject`](super::GameObject).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub scale: Vec2,
}

impl Transform {
    pub fn new(position: Vec2, scale: Vec2) -> Self {
        Self { position, scale }
    }

    /// Transform at `position` with unit scale.
    pub fn at(position: Vec2) -> Self {
        Self::new(position, Vec2::ONE)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_origin_with_unit_scale() {
        let transform = Transform::default();
        assert_eq!(transform.position, Vec2::ZERO);
        assert_eq!(transform.scale, Vec2::ONE);
    }

    #[test]
    fn at_keeps_unit_scale() {
        let transform = Transform::at(Vec2::new(3.0, 4.0));
        assert_eq!(transform.position, Vec2::new(3.0, 4.0));
        assert_eq!(transform.scale, Vec2::ONE);
    }
}
