//=========================================================================
// Object Model
//=========================================================================
//
// Scene objects and the components attached to them.
//
// Architecture:
//   GameObject
//     ├─ Transform (position, scale)
//     └─ components: type → [Component]
//           └─ SpriteRenderer (the only renderable component)
//
//=========================================================================

//=== Module Declarations =================================================

mod component;
mod game_object;
mod sprite;
mod transform;

//=== Public API ==========================================================

pub use component::Component;
pub use game_object::{GameObject, ObjectId};
pub use sprite::SpriteRenderer;
pub use transform::Transform;
