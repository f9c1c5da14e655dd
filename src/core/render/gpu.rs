//=========================================================================
// GPU Drawing Interface
//=========================================================================
//
// Abstract contract between the renderer and the graphics backend.
//
// The renderer only ever talks to the GPU through this trait: buffer
// allocation and upload, vertex attribute layout, shader programs,
// uniforms and indexed draws. Backends (a GL context, the headless
// recorder used by tests and the demo binary) implement it.
//
// Binding model follows the classic bind-then-operate style: uploads
// and attribute pointers act on whatever buffer is currently bound to
// the relevant target.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== External Crates =====================================================

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

//=== Handles =============================================================

/// Vertex array object handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayId(pub u32);

/// Buffer object handle (vertex or index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

/// Compiled shader stage handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

/// Linked program handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

//=== Enumerations ========================================================

/// Binding point of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    Vertex,
    Index,
}

/// Update-frequency hint given at allocation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Contents are rewritten every frame.
    Dynamic,
    /// Contents are written once.
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

//=== VertexAttribute =====================================================

/// Layout of one float attribute stream inside an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub index: u32,
    pub components: u32,
    pub stride_bytes: usize,
    pub offset_bytes: usize,
}

//=== UniformValue ========================================================

/// Value uploaded to a named shader uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Mat4(Mat4),
    Mat3(Mat3),
    Vec4(Vec4),
    Vec3(Vec3),
    Vec2(Vec2),
    Float(f32),
    Int(i32),
}

//=== GraphicsDevice ======================================================

/// GPU drawing interface consumed by the renderer.
pub trait GraphicsDevice {
    //--- Frame ------------------------------------------------------------

    /// Clears the color and depth buffers.
    fn clear(&mut self, color: Vec4);

    /// Presents the finished frame.
    fn present(&mut self);

    //--- Vertex Arrays ----------------------------------------------------

    fn create_vertex_array(&mut self) -> VertexArrayId;

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>);

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId);

    //--- Buffers ----------------------------------------------------------

    fn create_buffer(&mut self) -> BufferId;

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferId>);

    /// Allocates storage for the buffer bound to `target`.
    fn allocate_buffer(&mut self, target: BufferTarget, size_bytes: usize, usage: BufferUsage);

    /// Writes floats into the bound vertex buffer starting at `offset_bytes`.
    fn upload_vertex_sub_data(&mut self, offset_bytes: usize, data: &[f32]);

    /// Writes the full contents of the bound index buffer (static usage).
    fn upload_indices(&mut self, indices: &[u32]);

    fn delete_buffer(&mut self, buffer: BufferId);

    //--- Vertex Layout ----------------------------------------------------

    fn vertex_attrib_pointer(&mut self, attribute: VertexAttribute);

    fn set_vertex_attrib_enabled(&mut self, index: u32, enabled: bool);

    //--- Drawing ----------------------------------------------------------

    /// Issues one indexed triangle draw for `index_count` indices.
    fn draw_indexed_triangles(&mut self, index_count: usize);

    //--- Shader Programs --------------------------------------------------

    /// Compiles one stage. The error carries the driver's diagnostic log.
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, String>;

    /// Links two compiled stages. The error carries the link log.
    fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId) -> Result<ProgramId, String>;

    /// Releases a compiled stage. A linked program keeps working after
    /// its stages are deleted.
    fn delete_shader(&mut self, shader: ShaderId);

    fn use_program(&mut self, program: Option<ProgramId>);

    fn delete_program(&mut self, program: ProgramId);

    fn set_uniform(&mut self, program: ProgramId, name: &str, value: UniformValue);
}
