//=========================================================================
// Engine Errors
//=========================================================================
//
// Error taxonomy for the engine core.
//
// Only unrecoverable conditions are represented here: GPU program
// failures and platform failures. Recoverable situations (a full batch,
// a missing component) are reported through return values instead.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::render::gpu::ShaderStage;

//=== RenderError =========================================================

/// Failures raised while preparing GPU programs for the renderer.
///
/// All variants are fatal for the owning run.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A shader stage failed to compile.
    #[error("'{stage}' shader compilation failed for '{shader}': {log}")]
    ShaderCompile {
        shader: String,
        stage: ShaderStage,
        log: String,
    },

    /// The compiled stages failed to link into a program.
    #[error("program linking failed for '{shader}': {log}")]
    ShaderLink { shader: String, log: String },

    /// The combined shader source could not be split into stages.
    #[error("failed to parse shader '{name}': {reason}")]
    ShaderParse { name: String, reason: String },
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are typically fatal - if the event loop or window can't be
/// created, the engine cannot run.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error.
    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),

    /// The OS refused to create the game window.
    #[error("Window creation failed: {0}")]
    WindowCreation(String),
}

//=== EngineError =========================================================

/// Top-level error returned by the engine facade.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

//=========================================================================
// Unit Tests
//=========================================================================
