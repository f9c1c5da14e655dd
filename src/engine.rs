//=========================================================================
// Poly Engine
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_title()/size()     ├─ creates channel
//         ├─ with_max_batch_size()   ├─ builds Game<HeadlessDevice>
//         ├─ with_initial_scene()    ├─ runs platform (blocks)
//         ├─ with_grid()/fade…()     └─ Game::shutdown()
//         └─ with_lifecycle()
// ```
//
//=========================================================================

//=== Submodules ==========================================================

mod game;
mod lifecycle;

pub use game::Game;
pub use lifecycle::{DefaultLifecycle, GameLifecycle};

//=== Standard Library Imports ============================================

use std::sync::Arc;

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::info;

//=== Internal Dependencies ===============================================

use crate::core::error::EngineError;
use crate::core::globals::GameState;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::render::{HeadlessDevice, ShaderSource};
use crate::core::scene::{GridConfig, SceneConfig, SceneKind};
use crate::platform::{Platform, WindowSettings};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Window**: "Mario", 1280x720
/// - **Batch size**: 1000 sprites
/// - **Initial scene**: [`SceneKind::LevelEditor`]
/// - **Fade**: 2.0 seconds
/// - **Grid**: 100x100 cells over 600x300 at (10, 10)
/// - **Channel capacity**: 128 events
///
/// # Examples
///
/// ```no_run
/// use poly_engine::EngineBuilder;
/// use poly_engine::core::scene::SceneKind;
///
/// EngineBuilder::new()
///     .with_title("Editor")
///     .with_max_batch_size(500)
///     .with_initial_scene(SceneKind::Level)
///     .build()
///     .run()
///     .expect("engine failed");
/// ```
pub struct EngineBuilder {
    title: String,
    width: u32,
    height: u32,
    scene_config: SceneConfig,
    initial_scene: SceneKind,
    channel_capacity: usize,
    lifecycle: Option<Box<dyn GameLifecycle>>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Mario".to_string(),
            width: 1280,
            height: 720,
            scene_config: SceneConfig::default(),
            initial_scene: SceneKind::default(),
            channel_capacity: 128,
            lifecycle: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the window's inner size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Window size must be positive, got {}x{}",
            width,
            height
        );
        self.width = width;
        self.height = height;
        self
    }

    /// Sets how many sprites one render batch holds.
    ///
    /// Default: 1000
    ///
    /// # Panics
    ///
    /// Panics if `size == 0`.
    pub fn with_max_batch_size(mut self, size: usize) -> Self {
        assert!(size > 0, "Batch size must be positive");
        self.scene_config.max_batch_size = size;
        self
    }

    /// Scene opened by the default lifecycle. Ignored when a custom
    /// lifecycle is installed.
    pub fn with_initial_scene(mut self, kind: SceneKind) -> Self {
        self.initial_scene = kind;
        self
    }

    /// Sets the level editor's fade-out duration in seconds.
    ///
    /// # Panics
    ///
    /// Panics if `seconds <= 0.0`.
    pub fn with_fade_duration(mut self, seconds: f32) -> Self {
        assert!(seconds > 0.0, "Fade duration must be positive, got {}", seconds);
        self.scene_config.fade_duration = seconds;
        self
    }

    /// # Panics
    ///
    /// Panics if the grid has no columns or no rows.
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        assert!(
            grid.columns > 0 && grid.rows > 0,
            "Grid must have at least one column and one row, got {}x{}",
            grid.columns,
            grid.rows
        );
        self.scene_config.grid = grid;
        self
    }

    /// Replaces the sprite shader shared by every batch.
    pub fn with_shader(mut self, shader: ShaderSource) -> Self {
        self.scene_config.shader = Arc::new(shader);
        self
    }

    /// Sets the channel capacity for platform → frame loop messages.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Installs custom lifecycle hooks in place of [`DefaultLifecycle`].
    pub fn with_lifecycle(mut self, lifecycle: impl GameLifecycle + 'static) -> Self {
        self.lifecycle = Some(Box::new(lifecycle));
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            target: "engine",
            "Building engine ('{}' {}x{}, batch: {}, channel: {})",
            self.title,
            self.width,
            self.height,
            self.scene_config.max_batch_size,
            self.channel_capacity
        );

        let initial_scene = self.initial_scene;
        let lifecycle = self
            .lifecycle
            .unwrap_or_else(|| Box::new(DefaultLifecycle::new(initial_scene)));

        Engine {
            window: WindowSettings {
                title: self.title,
                width: self.width,
                height: self.height,
            },
            scene_config: self.scene_config,
            channel_capacity: self.channel_capacity,
            lifecycle,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Poly engine runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   └─► Platform (Winit event loop)
///         ├─► Window, Input Polling
///         └─► Game::frame(dt) on every redraw
///               └─► SceneManager → Scene → Renderer → GraphicsDevice
///
/// Communication: crossbeam channel (PlatformEvent)
/// ```
///
/// # Output
///
/// Frames are drawn through [`HeadlessDevice`], which records GPU commands
/// in memory. The window opens and receives input, but its surface stays
/// blank. Driving a real GPU means building a [`Game`] around another
/// [`GraphicsDevice`](crate::core::render::GraphicsDevice).
pub struct Engine {
    window: WindowSettings,
    scene_config: SceneConfig,
    channel_capacity: usize,
    lifecycle: Box<dyn GameLifecycle>,
}

impl Engine {
    /// Runs until the window closes or the game terminates.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the channel for platform → frame loop communication
    /// 2. Builds the [`Game`] around a [`HeadlessDevice`]
    /// 3. Runs the platform event loop (blocks here)
    /// 4. Shuts the game down, releasing the active scene
    ///
    /// # Errors
    ///
    /// [`EngineError::Platform`] if the event loop or window could not be
    /// created, or the loop failed while running.
    ///
    /// [`EngineError::Render`] with the first render error that terminated
    /// the game, returned after shutdown.
    pub fn run(self) -> Result<(), EngineError> {
        info!(target: "engine", "Starting engine runtime");

        //--- 1. Create communication channel -----------------------------
        // The producer and consumer share this thread, so the platform only
        // ever uses try_send and drops messages when the channel is full.
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        //--- 2. Build the game -------------------------------------------
        let state = GameState::new(
            self.window.title.clone(),
            self.window.width,
            self.window.height,
        );
        let game = Game::new(
            rx,
            state,
            self.scene_config,
            HeadlessDevice::new(),
            self.lifecycle,
        );

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, game, self.window);
        let mut game = platform.run()?;

        info!(target: "engine", "Platform event loop exited");

        //--- 4. Cleanup ---------------------------------------------------
        game.shutdown();

        info!(target: "engine", "Engine shutdown complete");
        match game.take_fatal_error() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::globals::GlobalContext;
    use glam::Vec2;

    struct QuietLifecycle;

    impl GameLifecycle for QuietLifecycle {
        fn init(&mut self, _context: &mut GlobalContext) {}
        fn tick(&mut self, _context: &mut GlobalContext) {}
        fn cleanup(&mut self, _context: &GlobalContext) {}
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.title, "Mario");
        assert_eq!((builder.width, builder.height), (1280, 720));
        assert_eq!(builder.scene_config.max_batch_size, 1000);
        assert_eq!(builder.scene_config.fade_duration, 2.0);
        assert_eq!(builder.initial_scene, SceneKind::LevelEditor);
        assert_eq!(builder.channel_capacity, 128);
        assert!(builder.lifecycle.is_none());
    }

    #[test]
    fn builder_with_max_batch_size() {
        let builder = EngineBuilder::new().with_max_batch_size(64);
        assert_eq!(builder.scene_config.max_batch_size, 64);
    }

    #[test]
    #[should_panic(expected = "Batch size must be positive")]
    fn builder_with_max_batch_size_panics_on_zero() {
        EngineBuilder::new().with_max_batch_size(0);
    }

    #[test]
    #[should_panic(expected = "Fade duration must be positive")]
    fn builder_with_fade_duration_panics_on_zero() {
        EngineBuilder::new().with_fade_duration(0.0);
    }

    #[test]
    #[should_panic(expected = "Fade duration must be positive")]
    fn builder_with_fade_duration_panics_on_negative() {
        EngineBuilder::new().with_fade_duration(-1.0);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn builder_with_size_panics_on_zero() {
        EngineBuilder::new().with_size(0, 720);
    }

    #[test]
    #[should_panic(expected = "Grid must have at least one column and one row")]
    fn builder_with_empty_grid_panics() {
        EngineBuilder::new().with_grid(GridConfig {
            columns: 0,
            rows: 10,
            origin: Vec2::ZERO,
            area: Vec2::ONE,
        });
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_with_custom_shader() {
        let shader = ShaderSource::new("custom", "void main() {}", "void main() {}");
        let builder = EngineBuilder::new().with_shader(shader);
        assert_eq!(builder.scene_config.shader.name(), "custom");
    }

    #[test]
    fn builder_with_lifecycle() {
        let builder = EngineBuilder::new().with_lifecycle(QuietLifecycle);
        assert!(builder.lifecycle.is_some());
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = EngineBuilder::new()
            .with_title("Editor")
            .with_size(800, 600)
            .with_max_batch_size(250)
            .with_fade_duration(1.0)
            .with_initial_scene(SceneKind::Level)
            .with_channel_capacity(256)
            .build();

        assert_eq!(engine.window.title, "Editor");
        assert_eq!((engine.window.width, engine.window.height), (800, 600));
        assert_eq!(engine.scene_config.max_batch_size, 250);
        assert_eq!(engine.scene_config.fade_duration, 1.0);
        assert_eq!(engine.channel_capacity, 256);
    }
}
