//=========================================================================
// Shader Program
//=========================================================================
//
// Source handling and GPU program lifecycle for the sprite renderer.
//
// Architecture:
//   ShaderSource (vertex + fragment text, shared via Arc)
//        ↓ compile_and_link()
//   Shader (owns one ProgramId, tracks whether it is bound)
//
// A combined source file marks its stages with `#type vertex` and
// `#type fragment` header lines.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::Arc;

//=== External Crates =====================================================

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use log::{error, info, warn};

//=== Internal Dependencies ===============================================

use super::gpu::{GraphicsDevice, ProgramId, ShaderStage, UniformValue};
use crate::core::error::RenderError;

//=== Built-in Sprite Shader ==============================================

const SPRITE_VERTEX: &str = r#"#version 330 core
layout (location = 0) in vec2 aPos;
layout (location = 1) in vec4 aColor;

uniform mat4 uProjection;
uniform mat4 uView;

out vec4 fColor;

void main()
{
    fColor = aColor;
    gl_Position = uProjection * uView * vec4(aPos, 0.0, 1.0);
}"#;

const SPRITE_FRAGMENT: &str = r#"#version 330 core
in vec4 fColor;

out vec4 color;

void main()
{
    color = fColor;
}"#;

//=== ShaderSource ========================================================

/// Vertex and fragment source text for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    name: String,
    vertex: String,
    fragment: String,
}

impl ShaderSource {
    pub fn new(
        name: impl Into<String>,
        vertex: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// The built-in position + color sprite program.
    pub fn sprite_default() -> Self {
        Self::new("sprite_default", SPRITE_VERTEX, SPRITE_FRAGMENT)
    }

    /// Splits a combined source on its `#type <stage>` header lines.
    ///
    /// Lines before the first header and sections of unknown type are
    /// ignored. Both stages must end up non-empty.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, RenderError> {
        let name = name.into();
        let mut vertex = String::new();
        let mut fragment = String::new();
        let mut current: Option<&str> = None;

        for line in text.lines() {
            if let Some(kind) = line.strip_prefix("#type") {
                current = Some(kind.trim());
                continue;
            }

            let section = match current {
                Some("vertex") => &mut vertex,
                Some("fragment") => &mut fragment,
                _ => continue,
            };
            section.push_str(line);
            section.push('\n');
        }

        let vertex = vertex.trim().to_string();
        let fragment = fragment.trim().to_string();

        if vertex.is_empty() || fragment.is_empty() {
            return Err(RenderError::ShaderParse {
                name,
                reason: "vertex or fragment section is missing".to_string(),
            });
        }

        Ok(Self { name, vertex, fragment })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex(&self) -> &str {
        &self.vertex
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

//=== Shader ==============================================================

/// A compiled and linked GPU program.
///
/// `use_program` is idempotent: binding an already active program issues
/// no GPU call.
pub struct Shader {
    source: Arc<ShaderSource>,
    program: Option<ProgramId>,
    active: bool,
}

impl Shader {
    pub fn new(source: Arc<ShaderSource>) -> Self {
        Self {
            source,
            program: None,
            active: false,
        }
    }

    //--- Compilation ------------------------------------------------------

    /// Compiles both stages and links them.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ShaderCompile`] or [`RenderError::ShaderLink`]
    /// with the driver's diagnostic; the diagnostic is also logged.
    pub fn compile_and_link(&mut self, device: &mut dyn GraphicsDevice) -> Result<(), RenderError> {
        info!(target: "render::shader", "Compiling shader '{}'", self.source.name());

        let vertex = self.compile(device, ShaderStage::Vertex)?;
        let fragment = match self.compile(device, ShaderStage::Fragment) {
            Ok(fragment) => fragment,
            Err(err) => {
                device.delete_shader(vertex);
                return Err(err);
            }
        };

        info!(target: "render::shader", "Linking shader '{}'", self.source.name());

        let linked = device.link_program(vertex, fragment);
        device.delete_shader(vertex);
        device.delete_shader(fragment);

        let program = linked.map_err(|log| {
            error!(target: "render::shader", "({}): program linking FAILED!", self.source.name());
            error!(target: "render::shader", "{}", log);
            RenderError::ShaderLink {
                shader: self.source.name().to_string(),
                log,
            }
        })?;

        self.program = Some(program);
        Ok(())
    }

    fn compile(
        &self,
        device: &mut dyn GraphicsDevice,
        stage: ShaderStage,
    ) -> Result<super::gpu::ShaderId, RenderError> {
        let text = match stage {
            ShaderStage::Vertex => self.source.vertex(),
            ShaderStage::Fragment => self.source.fragment(),
        };

        device.compile_shader(stage, text).map_err(|log| {
            error!(
                target: "render::shader",
                "'{}': ({}) shader compilation FAILED!",
                stage,
                self.source.name()
            );
            error!(target: "render::shader", "{}", log);
            RenderError::ShaderCompile {
                shader: self.source.name().to_string(),
                stage,
                log,
            }
        })
    }

    //--- Binding ----------------------------------------------------------

    pub fn use_program(&mut self, device: &mut dyn GraphicsDevice) {
        if self.active {
            return;
        }
        let Some(program) = self.program else {
            warn!(target: "render::shader", "Shader '{}' used before linking", self.source.name());
            return;
        };

        device.use_program(Some(program));
        self.active = true;
    }

    pub fn detach(&mut self, device: &mut dyn GraphicsDevice) {
        device.use_program(None);
        self.active = false;
    }

    pub fn program(&self) -> Option<ProgramId> {
        self.program
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    //--- Uniform Upload ---------------------------------------------------

    /// Binds the program if needed and sets the named uniform.
    pub fn upload(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: UniformValue) {
        let Some(program) = self.program else {
            warn!(
                target: "render::shader",
                "Uniform '{}' ignored: shader '{}' is not linked",
                name,
                self.source.name()
            );
            return;
        };

        self.use_program(device);
        device.set_uniform(program, name, value);
    }

    pub fn upload_mat4(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: Mat4) {
        self.upload(device, name, UniformValue::Mat4(value));
    }

    pub fn upload_mat3(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: Mat3) {
        self.upload(device, name, UniformValue::Mat3(value));
    }

    pub fn upload_vec4(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: Vec4) {
        self.upload(device, name, UniformValue::Vec4(value));
    }

    pub fn upload_vec3(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: Vec3) {
        self.upload(device, name, UniformValue::Vec3(value));
    }

    pub fn upload_vec2(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: Vec2) {
        self.upload(device, name, UniformValue::Vec2(value));
    }

    pub fn upload_float(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: f32) {
        self.upload(device, name, UniformValue::Float(value));
    }

    pub fn upload_int(&mut self, device: &mut dyn GraphicsDevice, name: &str, value: i32) {
        self.upload(device, name, UniformValue::Int(value));
    }

    /// Points a sampler uniform at texture unit `slot`.
    pub fn upload_texture(&mut self, device: &mut dyn GraphicsDevice, name: &str, slot: i32) {
        self.upload_int(device, name, slot);
    }

    //--- Disposal ---------------------------------------------------------

    pub fn dispose(&mut self, device: &mut dyn GraphicsDevice) {
        if let Some(program) = self.program.take() {
            if self.active {
                device.use_program(None);
                self.active = false;
            }
            device.delete_program(program);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::headless::{GpuCommand, HeadlessDevice};

    const COMBINED: &str = "\
#type vertex
#version 330 core
void main() { gl_Position = vec4(0.0); }

#type fragment
#version 330 core
out vec4 color;
void main() { color = vec4(1.0); }
";

    //=====================================================================
    // ShaderSource Tests
    //=====================================================================

    #[test]
    fn parse_splits_sections() {
        let source = ShaderSource::parse("combined", COMBINED).unwrap();

        assert!(source.vertex().starts_with("#version 330 core"));
        assert!(source.vertex().contains("gl_Position"));
        assert!(!source.vertex().contains("color ="));
        assert!(source.fragment().contains("color = vec4(1.0)"));
        assert_eq!(source.name(), "combined");
    }

    #[test]
    fn parse_rejects_missing_stage() {
        let err = ShaderSource::parse("broken", "#type vertex\nvoid main() {}\n").unwrap_err();
        assert!(matches!(err, RenderError::ShaderParse { .. }));
    }

    #[test]
    fn default_sprite_declares_camera_uniforms() {
        let source = ShaderSource::sprite_default();
        assert!(source.vertex().contains("uProjection"));
        assert!(source.vertex().contains("uView"));
    }

    //=====================================================================
    // Shader Tests
    //=====================================================================

    #[test]
    fn compile_and_link_produces_program() {
        let mut device = HeadlessDevice::new();
        let mut shader = Shader::new(Arc::new(ShaderSource::sprite_default()));

        shader.compile_and_link(&mut device).unwrap();

        assert!(shader.program().is_some());
        assert_eq!(device.live_program_count(), 1);
        assert_eq!(device.live_shader_count(), 0, "stages are released after linking");
    }

    #[test]
    fn compile_failure_reports_stage() {
        let mut device = HeadlessDevice::failing_compile(ShaderStage::Fragment);
        let mut shader = Shader::new(Arc::new(ShaderSource::sprite_default()));

        let err = shader.compile_and_link(&mut device).unwrap_err();

        assert!(matches!(
            err,
            RenderError::ShaderCompile { stage: ShaderStage::Fragment, .. }
        ));
        assert!(shader.program().is_none());
        assert_eq!(device.live_shader_count(), 0, "compiled vertex stage is released");
    }

    #[test]
    fn link_failure_is_reported() {
        let mut device = HeadlessDevice::failing_link();
        let mut shader = Shader::new(Arc::new(ShaderSource::sprite_default()));

        let err = shader.compile_and_link(&mut device).unwrap_err();
        assert!(matches!(err, RenderError::ShaderLink { .. }));
        assert_eq!(device.live_shader_count(), 0);
        assert_eq!(device.live_program_count(), 0);
    }

    #[test]
    fn repeated_use_binds_once() {
        let mut device = HeadlessDevice::new();
        let mut shader = Shader::new(Arc::new(ShaderSource::sprite_default()));
        shader.compile_and_link(&mut device).unwrap();
        device.take_commands();

        shader.use_program(&mut device);
        shader.use_program(&mut device);
        shader.upload_float(&mut device, "uTime", 1.0);

        let binds = device
            .commands()
            .iter()
            .filter(|c| matches!(c, GpuCommand::UseProgram(Some(_))))
            .count();
        assert_eq!(binds, 1);

        shader.detach(&mut device);
        assert!(!shader.is_active());
        assert_eq!(device.active_program(), None);
    }

    #[test]
    fn uniform_upload_before_link_is_ignored() {
        let mut device = HeadlessDevice::new();
        let mut shader = Shader::new(Arc::new(ShaderSource::sprite_default()));

        shader.upload_mat4(&mut device, "uView", Mat4::IDENTITY);

        assert!(device.commands().is_empty());
    }

    #[test]
    fn dispose_releases_program() {
        let mut device = HeadlessDevice::new();
        let mut shader = Shader::new(Arc::new(ShaderSource::sprite_default()));
        shader.compile_and_link(&mut device).unwrap();
        shader.use_program(&mut device);

        shader.dispose(&mut device);

        assert_eq!(device.live_program_count(), 0);
        assert_eq!(device.live_shader_count(), 0);
        assert!(shader.program().is_none());
        assert!(!shader.is_active());
    }
}
