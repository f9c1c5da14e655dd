//=========================================================================
// Headless Device
//=========================================================================
//
// Recording implementation of the GPU drawing interface.
//
// Nothing is rasterized. Every call is appended to a command log and
// the data uploaded to buffers is kept so it can be inspected, which
// makes the renderer fully observable without a graphics context.
//
// Architecture:
//   GraphicsDevice call → GpuCommand log (cleared on present)
//                       → buffer contents (vertex floats, indices)
//                       → live handle sets (disposal tracking)
//
// Failure injection (`failing_compile`, `failing_link`) exercises the
// fatal shader path.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::{HashMap, HashSet};

//=== External Crates =====================================================

use glam::Vec4;
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::gpu::{
    BufferId, BufferTarget, BufferUsage, GraphicsDevice, ProgramId, ShaderId, ShaderStage,
    UniformValue, VertexArrayId, VertexAttribute,
};

//=== GpuCommand ==========================================================

/// One recorded call on the device.
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCommand {
    Clear(Vec4),
    Present,
    CreateVertexArray(VertexArrayId),
    BindVertexArray(Option<VertexArrayId>),
    DeleteVertexArray(VertexArrayId),
    CreateBuffer(BufferId),
    BindBuffer {
        target: BufferTarget,
        buffer: Option<BufferId>,
    },
    AllocateBuffer {
        target: BufferTarget,
        size_bytes: usize,
        usage: BufferUsage,
    },
    UploadVertices {
        offset_bytes: usize,
        floats: usize,
    },
    UploadIndices {
        count: usize,
    },
    DeleteBuffer(BufferId),
    VertexAttribPointer(VertexAttribute),
    SetVertexAttribEnabled {
        index: u32,
        enabled: bool,
    },
    DrawIndexed {
        index_count: usize,
    },
    CompileShader(ShaderStage),
    DeleteShader(ShaderId),
    LinkProgram(ProgramId),
    UseProgram(Option<ProgramId>),
    DeleteProgram(ProgramId),
    SetUniform {
        program: ProgramId,
        name: String,
    },
}

//=== FrameStats ==========================================================

/// Draw statistics for one presented frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draw_calls: usize,
    pub indices: usize,
}

//=== HeadlessDevice ======================================================

/// [`GraphicsDevice`] that records instead of drawing.
#[derive(Default)]
pub struct HeadlessDevice {
    next_handle: u32,
    commands: Vec<GpuCommand>,

    bound_vertex_buffer: Option<BufferId>,
    bound_index_buffer: Option<BufferId>,
    active_program: Option<ProgramId>,

    vertex_data: HashMap<BufferId, Vec<f32>>,
    index_data: HashMap<BufferId, Vec<u32>>,
    uniforms: HashMap<(ProgramId, String), UniformValue>,

    live_buffers: HashSet<BufferId>,
    live_vertex_arrays: HashSet<VertexArrayId>,
    live_programs: HashSet<ProgramId>,
    live_shaders: HashSet<ShaderId>,

    fail_stage: Option<ShaderStage>,
    fail_link: bool,

    current_frame: FrameStats,
    last_frame: FrameStats,
    frames_presented: u64,
}

impl HeadlessDevice {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    /// Device whose compiler rejects every shader of `stage`.
    pub fn failing_compile(stage: ShaderStage) -> Self {
        Self {
            fail_stage: Some(stage),
            ..Self::default()
        }
    }

    /// Device whose linker rejects every program.
    pub fn failing_link() -> Self {
        Self {
            fail_link: true,
            ..Self::default()
        }
    }

    //--- Inspection -------------------------------------------------------

    /// Commands recorded since the last present.
    pub fn commands(&self) -> &[GpuCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the log empty.
    pub fn take_commands(&mut self) -> Vec<GpuCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn vertex_data(&self, buffer: BufferId) -> Option<&[f32]> {
        self.vertex_data.get(&buffer).map(Vec::as_slice)
    }

    pub fn index_data(&self, buffer: BufferId) -> Option<&[u32]> {
        self.index_data.get(&buffer).map(Vec::as_slice)
    }

    pub fn uniform(&self, program: ProgramId, name: &str) -> Option<UniformValue> {
        self.uniforms.get(&(program, name.to_string())).copied()
    }

    pub fn active_program(&self) -> Option<ProgramId> {
        self.active_program
    }

    pub fn live_buffer_count(&self) -> usize {
        self.live_buffers.len()
    }

    pub fn live_vertex_array_count(&self) -> usize {
        self.live_vertex_arrays.len()
    }

    pub fn live_program_count(&self) -> usize {
        self.live_programs.len()
    }

    /// Compiled stages not yet released with `delete_shader`.
    pub fn live_shader_count(&self) -> usize {
        self.live_shaders.len()
    }

    /// Draw statistics accumulated since the last present.
    pub fn current_frame(&self) -> FrameStats {
        self.current_frame
    }

    /// Draw statistics of the most recently presented frame.
    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    //--- Internal Helpers -------------------------------------------------

    fn next_handle(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }

    fn bound(&self, target: BufferTarget) -> Option<BufferId> {
        match target {
            BufferTarget::Vertex => self.bound_vertex_buffer,
            BufferTarget::Index => self.bound_index_buffer,
        }
    }
}

//=== GraphicsDevice Implementation =======================================

impl GraphicsDevice for HeadlessDevice {
    fn clear(&mut self, color: Vec4) {
        self.commands.push(GpuCommand::Clear(color));
    }

    fn present(&mut self) {
        self.frames_presented += 1;
        self.last_frame = std::mem::take(&mut self.current_frame);
        self.commands.clear();

        trace!(
            target: "render",
            "Frame {} presented: {} draw calls, {} indices",
            self.frames_presented,
            self.last_frame.draw_calls,
            self.last_frame.indices
        );
    }

    fn create_vertex_array(&mut self) -> VertexArrayId {
        let id = VertexArrayId(self.next_handle());
        self.live_vertex_arrays.insert(id);
        self.commands.push(GpuCommand::CreateVertexArray(id));
        id
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>) {
        self.commands.push(GpuCommand::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId) {
        self.live_vertex_arrays.remove(&vertex_array);
        self.commands.push(GpuCommand::DeleteVertexArray(vertex_array));
    }

    fn create_buffer(&mut self) -> BufferId {
        let id = BufferId(self.next_handle());
        self.live_buffers.insert(id);
        self.commands.push(GpuCommand::CreateBuffer(id));
        id
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<BufferId>) {
        match target {
            BufferTarget::Vertex => self.bound_vertex_buffer = buffer,
            BufferTarget::Index => self.bound_index_buffer = buffer,
        }
        self.commands.push(GpuCommand::BindBuffer { target, buffer });
    }

    fn allocate_buffer(&mut self, target: BufferTarget, size_bytes: usize, usage: BufferUsage) {
        match (target, self.bound(target)) {
            (BufferTarget::Vertex, Some(id)) => {
                let floats = size_bytes / std::mem::size_of::<f32>();
                self.vertex_data.insert(id, vec![0.0; floats]);
            }
            (BufferTarget::Index, Some(id)) => {
                let count = size_bytes / std::mem::size_of::<u32>();
                self.index_data.insert(id, vec![0; count]);
            }
            (_, None) => warn!(target: "render", "Allocation with no {:?} buffer bound", target),
        }
        self.commands.push(GpuCommand::AllocateBuffer { target, size_bytes, usage });
    }

    fn upload_vertex_sub_data(&mut self, offset_bytes: usize, data: &[f32]) {
        self.commands.push(GpuCommand::UploadVertices {
            offset_bytes,
            floats: data.len(),
        });

        let Some(store) = self
            .bound_vertex_buffer
            .and_then(|id| self.vertex_data.get_mut(&id))
        else {
            warn!(target: "render", "Vertex upload with no allocated buffer bound");
            return;
        };

        let start = offset_bytes / std::mem::size_of::<f32>();
        let end = start + data.len();
        if end > store.len() {
            warn!(
                target: "render",
                "Vertex upload of {} floats at {} overflows buffer of {}",
                data.len(),
                start,
                store.len()
            );
            return;
        }
        store[start..end].copy_from_slice(data);
    }

    fn upload_indices(&mut self, indices: &[u32]) {
        self.commands.push(GpuCommand::UploadIndices { count: indices.len() });

        match self.bound_index_buffer {
            Some(id) => {
                self.index_data.insert(id, indices.to_vec());
            }
            None => warn!(target: "render", "Index upload with no index buffer bound"),
        }
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.live_buffers.remove(&buffer);
        self.vertex_data.remove(&buffer);
        self.index_data.remove(&buffer);
        self.commands.push(GpuCommand::DeleteBuffer(buffer));
    }

    fn vertex_attrib_pointer(&mut self, attribute: VertexAttribute) {
        self.commands.push(GpuCommand::VertexAttribPointer(attribute));
    }

    fn set_vertex_attrib_enabled(&mut self, index: u32, enabled: bool) {
        self.commands.push(GpuCommand::SetVertexAttribEnabled { index, enabled });
    }

    fn draw_indexed_triangles(&mut self, index_count: usize) {
        self.current_frame.draw_calls += 1;
        self.current_frame.indices += index_count;
        self.commands.push(GpuCommand::DrawIndexed { index_count });
    }

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, String> {
        self.commands.push(GpuCommand::CompileShader(stage));

        if self.fail_stage == Some(stage) {
            return Err(format!("0:1({}): error: injected {} failure", source.len(), stage));
        }
        if source.trim().is_empty() {
            return Err(format!("empty {} source", stage));
        }
        let id = ShaderId(self.next_handle());
        self.live_shaders.insert(id);
        Ok(id)
    }

    fn link_program(&mut self, _vertex: ShaderId, _fragment: ShaderId) -> Result<ProgramId, String> {
        let id = ProgramId(self.next_handle());
        self.commands.push(GpuCommand::LinkProgram(id));

        if self.fail_link {
            return Err("error: injected link failure".to_string());
        }
        self.live_programs.insert(id);
        Ok(id)
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.live_shaders.remove(&shader);
        self.commands.push(GpuCommand::DeleteShader(shader));
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        self.active_program = program;
        self.commands.push(GpuCommand::UseProgram(program));
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.live_programs.remove(&program);
        if self.active_program == Some(program) {
            self.active_program = None;
        }
        self.commands.push(GpuCommand::DeleteProgram(program));
    }

    fn set_uniform(&mut self, program: ProgramId, name: &str, value: UniformValue) {
        self.uniforms.insert((program, name.to_string()), value);
        self.commands.push(GpuCommand::SetUniform {
            program,
            name: name.to_string(),
        });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
