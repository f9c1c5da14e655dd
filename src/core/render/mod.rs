//=========================================================================
// Rendering
//=========================================================================
//
// Sprite batching on top of an abstract GPU interface.
//
// Architecture:
//   Renderer
//     └─ RenderBatch × N  (first-fit, creation order = draw order)
//          ├─ Shader      (one program per batch)
//          └─ VAO / VBO / EBO
//
//   GraphicsDevice  (trait)  ← HeadlessDevice (recording backend)
//
//=========================================================================

//=== Module Declarations =================================================

pub mod batch;
pub mod camera;
pub mod gpu;
pub mod headless;
pub mod renderer;
pub mod shader;

//=== Public API ==========================================================

pub use batch::RenderBatch;
pub use camera::Camera;
pub use gpu::GraphicsDevice;
pub use headless::HeadlessDevice;
pub use renderer::{Renderer, DEFAULT_MAX_BATCH_SIZE};
pub use shader::{Shader, ShaderSource};
