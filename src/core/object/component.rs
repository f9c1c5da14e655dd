//=========================================================================
// Component
//=========================================================================
//
// Attachable behaviour/data unit owned by exactly one GameObject.
//
// Components are stored type-erased and recovered through `as_any`, so
// every implementation must return `self` from both accessors.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::any::Any;

//=== Component Trait =====================================================

/// Capability attachable to a [`GameObject`](super::GameObject).
///
/// Only the `as_any` accessors are required; lifecycle hooks default to
/// doing nothing.
///
/// ```rust
/// # use std::any::Any;
/// # use poly_engine::core::object::Component;
/// struct Spin {
///     angle: f32,
/// }
///
/// impl Component for Spin {
///     fn tick(&mut self, dt: f32) {
///         self.angle += dt;
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn as_any_mut(&mut self) -> &mut dyn Any {
///         self
///     }
/// }
/// ```
pub trait Component: Any {
    /// Called once when the owning object is started by its scene.
    fn start(&mut self) {}

    /// Called every frame with the elapsed time in seconds.
    fn tick(&mut self, _dt: f32) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
