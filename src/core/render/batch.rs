//=========================================================================
// Render Batch
//=========================================================================
//
// Fixed-capacity sprite batch backed by one dynamic vertex buffer and one
// static index buffer. Every sprite in the batch is drawn by a single
// indexed draw call.
//
// Vertex layout (interleaved, 6 floats / 24 bytes):
//
//   | pos.x | pos.y | r | g | b | a |
//   0       4       8              24   (byte offsets)
//
// Each sprite owns 4 consecutive vertices, one per corner, in the order
// top-right, bottom-right, bottom-left, top-left. The index buffer splits
// every quad into the triangles (3, 2, 0) and (0, 2, 1).
//
// Batches are append-only: sprites are never removed or moved.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;

//=== External Crates =====================================================

use glam::Vec2;
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::camera::Camera;
use super::gpu::{
    BufferId, BufferTarget, BufferUsage, GraphicsDevice, VertexArrayId, VertexAttribute,
};
use super::shader::{Shader, ShaderSource};
use crate::core::error::RenderError;
use crate::core::object::{ObjectId, SpriteRenderer, Transform};

//=== Layout Constants ====================================================

pub const POS_SIZE: usize = 2;
pub const COLOR_SIZE: usize = 4;
pub const VERTEX_SIZE: usize = POS_SIZE + COLOR_SIZE;
pub const VERTEX_SIZE_BYTES: usize = VERTEX_SIZE * std::mem::size_of::<f32>();

pub const VERTICES_PER_SPRITE: usize = 4;
pub const INDICES_PER_SPRITE: usize = 6;

const POS_OFFSET_BYTES: usize = 0;
const COLOR_OFFSET_BYTES: usize = POS_OFFSET_BYTES + POS_SIZE * std::mem::size_of::<f32>();

const FLOATS_PER_SPRITE: usize = VERTICES_PER_SPRITE * VERTEX_SIZE;

/// Unit offsets of the 4 quad corners, scaled by the object's scale.
pub const CORNER_OFFSETS: [Vec2; VERTICES_PER_SPRITE] = [
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 1.0),
];

//=== Index Generation ====================================================

/// Builds the static index buffer for `capacity` quads.
pub fn generate_indices(capacity: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(capacity * INDICES_PER_SPRITE);

    for slot in 0..capacity {
        let o = (slot * VERTICES_PER_SPRITE) as u32;
        indices.extend_from_slice(&[o + 3, o + 2, o, o, o + 2, o + 1]);
    }

    indices
}

//=== GPU Handles =========================================================

#[derive(Debug, Clone, Copy)]
struct BatchHandles {
    vao: VertexArrayId,
    vbo: BufferId,
    ebo: BufferId,
}

//=== RenderBatch =========================================================

/// Up to `capacity` sprites packed into one vertex buffer.
pub struct RenderBatch {
    capacity: usize,
    vertices: Vec<f32>,
    sprites: Vec<ObjectId>,
    shader: Shader,
    handles: Option<BatchHandles>,
}

impl RenderBatch {
    /// Creates an empty batch. No GPU work happens until [`start`](Self::start).
    pub fn new(capacity: usize, shader: Arc<ShaderSource>) -> Self {
        Self {
            capacity,
            vertices: vec![0.0; capacity * FLOATS_PER_SPRITE],
            sprites: Vec::with_capacity(capacity),
            shader: Shader::new(shader),
            handles: None,
        }
    }

    //--- GPU Setup --------------------------------------------------------

    /// Compiles the batch's program and allocates its GPU buffers.
    ///
    /// # Errors
    ///
    /// Shader compile or link failure. Nothing is allocated in that case.
    pub fn start(&mut self, device: &mut dyn GraphicsDevice) -> Result<(), RenderError> {
        if self.handles.is_some() {
            return Ok(());
        }

        self.shader.compile_and_link(device)?;

        let vao = device.create_vertex_array();
        device.bind_vertex_array(Some(vao));

        let vbo = device.create_buffer();
        device.bind_buffer(BufferTarget::Vertex, Some(vbo));
        device.allocate_buffer(
            BufferTarget::Vertex,
            self.vertices.len() * std::mem::size_of::<f32>(),
            BufferUsage::Dynamic,
        );

        let ebo = device.create_buffer();
        let indices = generate_indices(self.capacity);
        device.bind_buffer(BufferTarget::Index, Some(ebo));
        device.allocate_buffer(
            BufferTarget::Index,
            indices.len() * std::mem::size_of::<u32>(),
            BufferUsage::Static,
        );
        device.upload_indices(&indices);

        device.vertex_attrib_pointer(VertexAttribute {
            index: 0,
            components: POS_SIZE as u32,
            stride_bytes: VERTEX_SIZE_BYTES,
            offset_bytes: POS_OFFSET_BYTES,
        });
        device.set_vertex_attrib_enabled(0, true);

        device.vertex_attrib_pointer(VertexAttribute {
            index: 1,
            components: COLOR_SIZE as u32,
            stride_bytes: VERTEX_SIZE_BYTES,
            offset_bytes: COLOR_OFFSET_BYTES,
        });
        device.set_vertex_attrib_enabled(1, true);

        device.bind_vertex_array(None);

        debug!(
            target: "render",
            "Batch started: capacity {}, vao {:?}, vbo {:?}, ebo {:?}",
            self.capacity,
            vao,
            vbo,
            ebo
        );

        self.handles = Some(BatchHandles { vao, vbo, ebo });
        Ok(())
    }

    //--- Sprite Packing ---------------------------------------------------

    /// Packs one sprite into the next free slot.
    ///
    /// Returns `false` and leaves the batch untouched when it is full.
    pub fn add_sprite(
        &mut self,
        owner: ObjectId,
        transform: &Transform,
        sprite: &SpriteRenderer,
    ) -> bool {
        if !self.has_room() {
            warn!(target: "render", "Sprite of {} rejected: batch is full", owner);
            return false;
        }

        let slot = self.sprites.len();
        self.sprites.push(owner);

        let color = sprite.color().to_array();
        let mut offset = slot * FLOATS_PER_SPRITE;

        for corner in CORNER_OFFSETS {
            let position = transform.position + corner * transform.scale;

            self.vertices[offset] = position.x;
            self.vertices[offset + 1] = position.y;
            self.vertices[offset + POS_SIZE..offset + VERTEX_SIZE].copy_from_slice(&color);

            offset += VERTEX_SIZE;
        }

        true
    }

    //--- Drawing ----------------------------------------------------------

    /// Uploads the live vertices and draws every sprite in one call.
    ///
    /// Leaves no vertex array, attribute stream or program bound.
    pub fn render(&mut self, device: &mut dyn GraphicsDevice, camera: &Camera) {
        let Some(handles) = self.handles else {
            warn!(target: "render", "Render called on a batch that was never started");
            return;
        };

        device.bind_buffer(BufferTarget::Vertex, Some(handles.vbo));
        device.upload_vertex_sub_data(0, self.live_vertices());

        self.shader.use_program(device);
        self.shader.upload_mat4(device, "uProjection", camera.projection_matrix());
        self.shader.upload_mat4(device, "uView", camera.view_matrix());

        device.bind_vertex_array(Some(handles.vao));
        device.set_vertex_attrib_enabled(0, true);
        device.set_vertex_attrib_enabled(1, true);

        device.draw_indexed_triangles(self.sprites.len() * INDICES_PER_SPRITE);

        device.set_vertex_attrib_enabled(0, false);
        device.set_vertex_attrib_enabled(1, false);
        device.bind_vertex_array(None);
        self.shader.detach(device);
    }

    //--- Accessors --------------------------------------------------------

    pub fn has_room(&self) -> bool {
        self.sprites.len() < self.capacity
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Owners of the packed sprites, in slot order.
    pub fn sprites(&self) -> &[ObjectId] {
        &self.sprites
    }

    pub fn contains(&self, owner: ObjectId) -> bool {
        self.sprites.contains(&owner)
    }

    /// The populated prefix of the vertex array.
    pub fn live_vertices(&self) -> &[f32] {
        &self.vertices[..self.sprites.len() * FLOATS_PER_SPRITE]
    }

    pub fn is_started(&self) -> bool {
        self.handles.is_some()
    }

    pub fn vertex_buffer(&self) -> Option<BufferId> {
        self.handles.map(|h| h.vbo)
    }

    pub fn index_buffer(&self) -> Option<BufferId> {
        self.handles.map(|h| h.ebo)
    }

    //--- Disposal ---------------------------------------------------------

    /// Releases the batch's buffers, vertex array and program.
    pub fn dispose(&mut self, device: &mut dyn GraphicsDevice) {
        if let Some(handles) = self.handles.take() {
            device.delete_buffer(handles.vbo);
            device.delete_buffer(handles.ebo);
            device.delete_vertex_array(handles.vao);
        }
        self.shader.dispose(device);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::gpu::ShaderStage;
    use crate::core::render::headless::{GpuCommand, HeadlessDevice};
    use glam::Vec4;

    //--- Test Helpers -----------------------------------------------------

    fn started(device: &mut HeadlessDevice, capacity: usize) -> RenderBatch {
        let mut batch = RenderBatch::new(capacity, Arc::new(ShaderSource::sprite_default()));
        batch.start(device).unwrap();
        batch
    }

    fn sprite(batch: &mut RenderBatch, x: f32) -> bool {
        let transform = Transform::at(Vec2::new(x, 0.0));
        batch.add_sprite(ObjectId::from_raw(x as u64), &transform, &SpriteRenderer::new(Vec4::ONE))
    }

    //=====================================================================
    // Index Generation
    //=====================================================================

    #[test]
    fn indices_follow_fixed_winding() {
        let indices = generate_indices(3);

        assert_eq!(indices.len(), 18);
        for (slot, quad) in indices.chunks(INDICES_PER_SPRITE).enumerate() {
            let o = 4 * slot as u32;
            assert_eq!(quad, [o + 3, o + 2, o, o, o + 2, o + 1]);
        }
    }

    #[test]
    fn start_uploads_full_index_buffer() {
        let mut device = HeadlessDevice::new();
        let batch = started(&mut device, 10);

        let ebo = batch.index_buffer().unwrap();
        assert_eq!(device.index_data(ebo), Some(&generate_indices(10)[..]));

        let vbo = batch.vertex_buffer().unwrap();
        assert_eq!(device.vertex_data(vbo).map(<[f32]>::len), Some(10 * 4 * 6));
    }

    #[test]
    fn start_declares_interleaved_layout() {
        let mut device = HeadlessDevice::new();
        started(&mut device, 1);

        let pointers: Vec<VertexAttribute> = device
            .commands()
            .iter()
            .filter_map(|c| match c {
                GpuCommand::VertexAttribPointer(attr) => Some(*attr),
                _ => None,
            })
            .collect();

        assert_eq!(
            pointers,
            vec![
                VertexAttribute { index: 0, components: 2, stride_bytes: 24, offset_bytes: 0 },
                VertexAttribute { index: 1, components: 4, stride_bytes: 24, offset_bytes: 8 },
            ]
        );
    }

    //=====================================================================
    // Sprite Packing
    //=====================================================================

    #[test]
    fn vertices_follow_corner_order() {
        let mut batch = RenderBatch::new(1, Arc::new(ShaderSource::sprite_default()));
        let transform = Transform::new(Vec2::new(10.0, 20.0), Vec2::new(3.0, 4.0));
        let tint = SpriteRenderer::new(Vec4::new(0.1, 0.2, 0.3, 0.4));

        assert!(batch.add_sprite(ObjectId::from_raw(7), &transform, &tint));

        #[rustfmt::skip]
        let expected = [
            13.0, 24.0, 0.1, 0.2, 0.3, 0.4,
            13.0, 20.0, 0.1, 0.2, 0.3, 0.4,
            10.0, 20.0, 0.1, 0.2, 0.3, 0.4,
            10.0, 24.0, 0.1, 0.2, 0.3, 0.4,
        ];
        assert_eq!(batch.live_vertices(), &expected[..]);
    }

    #[test]
    fn has_room_until_capacity_reached() {
        let mut batch = RenderBatch::new(3, Arc::new(ShaderSource::sprite_default()));

        for n in 0..3 {
            assert!(batch.has_room());
            assert!(sprite(&mut batch, n as f32));
        }

        assert!(!batch.has_room());
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn add_to_full_batch_is_noop() {
        let mut batch = RenderBatch::new(2, Arc::new(ShaderSource::sprite_default()));
        sprite(&mut batch, 1.0);
        sprite(&mut batch, 2.0);
        let before = batch.live_vertices().to_vec();

        assert!(!sprite(&mut batch, 3.0));

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.live_vertices(), &before[..]);
        assert!(!batch.contains(ObjectId::from_raw(3)));
    }

    //=====================================================================
    // Drawing
    //=====================================================================

    #[test]
    fn render_uploads_only_live_portion() {
        let mut device = HeadlessDevice::new();
        let mut batch = started(&mut device, 100);
        sprite(&mut batch, 1.0);
        sprite(&mut batch, 2.0);
        device.take_commands();

        batch.render(&mut device, &Camera::default());

        let commands = device.commands();
        assert!(commands.contains(&GpuCommand::UploadVertices { offset_bytes: 0, floats: 48 }));
        assert!(commands.contains(&GpuCommand::DrawIndexed { index_count: 12 }));

        let vbo = batch.vertex_buffer().unwrap();
        let uploaded = device.vertex_data(vbo).unwrap();
        assert_eq!(&uploaded[..48], batch.live_vertices());
    }

    #[test]
    fn render_sets_camera_uniforms_and_unbinds() {
        let mut device = HeadlessDevice::new();
        let mut batch = started(&mut device, 4);
        sprite(&mut batch, 1.0);
        let camera = Camera::new(Vec2::new(5.0, 5.0));

        batch.render(&mut device, &camera);

        let program = batch.shader.program().unwrap();
        assert_eq!(
            device.uniform(program, "uView"),
            Some(crate::core::render::gpu::UniformValue::Mat4(camera.view_matrix()))
        );
        assert!(device.uniform(program, "uProjection").is_some());
        assert_eq!(device.active_program(), None);
        assert_eq!(device.commands().last(), Some(&GpuCommand::UseProgram(None)));
    }

    #[test]
    fn render_is_read_only() {
        let mut device = HeadlessDevice::new();
        let mut batch = started(&mut device, 4);
        sprite(&mut batch, 1.0);
        let before = batch.live_vertices().to_vec();

        batch.render(&mut device, &Camera::default());
        batch.render(&mut device, &Camera::default());

        assert_eq!(batch.live_vertices(), &before[..]);
        assert_eq!(device.current_frame().draw_calls, 2);
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn shader_failure_allocates_nothing() {
        let mut device = HeadlessDevice::failing_compile(ShaderStage::Vertex);
        let mut batch = RenderBatch::new(4, Arc::new(ShaderSource::sprite_default()));

        assert!(batch.start(&mut device).is_err());
        assert!(!batch.is_started());
        assert_eq!(device.live_buffer_count(), 0);
        assert_eq!(device.live_shader_count(), 0);
    }

    #[test]
    fn fragment_failure_releases_compiled_vertex_stage() {
        let mut device = HeadlessDevice::failing_compile(ShaderStage::Fragment);
        let mut batch = RenderBatch::new(4, Arc::new(ShaderSource::sprite_default()));

        assert!(batch.start(&mut device).is_err());
        assert_eq!(device.live_shader_count(), 0);
        assert_eq!(device.live_program_count(), 0);
    }

    #[test]
    fn dispose_releases_gpu_objects() {
        let mut device = HeadlessDevice::new();
        let mut batch = started(&mut device, 4);

        batch.dispose(&mut device);

        assert_eq!(device.live_buffer_count(), 0);
        assert_eq!(device.live_vertex_array_count(), 0);
        assert_eq!(device.live_program_count(), 0);
        assert_eq!(device.live_shader_count(), 0);
        assert!(!batch.is_started());
    }
}
