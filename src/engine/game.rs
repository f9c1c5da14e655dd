//=========================================================================
// Game Frame Loop
//=========================================================================
//
// Runs one frame per redraw on the event-loop thread.
//
// Frame order:
//   1. Drain platform events (window closed → Exit)
//   2. Apply input to the StateTracker
//   3. Update timing
//   4. Clear with GameState::clear_color
//   5. Tick the active scene
//   6. Lifecycle tick
//   7. Apply queued scene transitions
//   8. Present
//   9. Exit if the terminate flag is up
//
// Errors from scenes or transitions are logged and raise the terminate
// flag. The first one is kept for `take_fatal_error`.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Receiver;
use log::{error, info};

//=== Internal Dependencies ===============================================

use super::lifecycle::GameLifecycle;
use crate::core::error::RenderError;
use crate::core::globals::{GameState, GlobalContext};
use crate::core::platform_bridge::{EventCollector, PlatformEvent, TickControl};
use crate::core::render::GraphicsDevice;
use crate::core::scene::{SceneConfig, SceneManager};
use crate::platform::FrameHandler;

//=== Game ================================================================

/// Owns everything a frame touches: input, state, scenes and the device.
pub struct Game<D: GraphicsDevice> {
    collector: EventCollector,
    context: GlobalContext,
    scenes: SceneManager,
    device: D,
    lifecycle: Box<dyn GameLifecycle>,
    initialized: bool,
    fatal: Option<RenderError>,
}

impl<D: GraphicsDevice> Game<D> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        receiver: Receiver<PlatformEvent>,
        state: GameState,
        config: SceneConfig,
        device: D,
        lifecycle: Box<dyn GameLifecycle>,
    ) -> Self {
        Self {
            collector: EventCollector::new(receiver),
            context: GlobalContext::new(state),
            scenes: SceneManager::new(config),
            device,
            lifecycle,
            initialized: false,
            fatal: None,
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Runs the lifecycle `init` hook and applies the scene it queued.
    ///
    /// Called automatically by the first [`frame`](Self::frame).
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        self.lifecycle.init(&mut self.context);
        let result = self
            .scenes
            .process_transitions(&mut self.context, &mut self.device);
        self.fail_on(result);
    }

    /// Runs one full frame of `dt` seconds.
    pub fn frame(&mut self, dt: f32) -> TickControl {
        self.init();

        if self.collector.collect_frame() == TickControl::Exit {
            info!(target: "engine", "Platform closed, leaving frame loop");
            return TickControl::Exit;
        }
        self.context.input.apply_frame(self.collector.events());

        self.context.state.update_timing(dt);
        self.device.clear(self.context.state.clear_color);

        let ticked = self.scenes.tick(dt, &mut self.context, &mut self.device);
        self.fail_on(ticked);

        self.lifecycle.tick(&mut self.context);

        let switched = self
            .scenes
            .process_transitions(&mut self.context, &mut self.device);
        self.fail_on(switched);

        self.device.present();
        self.context.state.roll_over_second();

        if self.context.state.should_terminate() {
            TickControl::Exit
        } else {
            TickControl::Continue
        }
    }

    /// Runs the `cleanup` hook and disposes the active scene.
    pub fn shutdown(&mut self) {
        self.lifecycle.cleanup(&self.context);
        self.scenes.reset(&mut self.device);
        info!(target: "engine", "Game shut down");
    }

    fn fail_on(&mut self, result: Result<(), RenderError>) {
        if let Err(err) = result {
            error!(target: "engine", "Fatal render error: {}", err);
            self.context.state.terminate();
            self.fatal.get_or_insert(err);
        }
    }

    /// The first render error that terminated the game, if any.
    pub fn take_fatal_error(&mut self) -> Option<RenderError> {
        self.fatal.take()
    }

    //--- Accessors --------------------------------------------------------

    pub fn context(&self) -> &GlobalContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut GlobalContext {
        &mut self.context
    }

    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}

impl<D: GraphicsDevice> FrameHandler for Game<D> {
    fn frame(&mut self, dt: f32) -> TickControl {
        Game::frame(self, dt)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, Modifiers};
    use crate::core::render::gpu::ShaderStage;
    use crate::core::render::HeadlessDevice;
    use crate::core::scene::{GridConfig, SceneKind};
    use crate::engine::lifecycle::DefaultLifecycle;
    use crossbeam_channel::{unbounded, Sender};
    use glam::{Vec2, Vec4};

    //--- Test Helpers -----------------------------------------------------

    fn config() -> SceneConfig {
        SceneConfig {
            max_batch_size: 8,
            grid: GridConfig {
                columns: 4,
                rows: 4,
                origin: Vec2::ZERO,
                area: Vec2::new(40.0, 40.0),
            },
            ..SceneConfig::default()
        }
    }

    fn game_with(device: HeadlessDevice) -> (Sender<PlatformEvent>, Game<HeadlessDevice>) {
        let (tx, rx) = unbounded();
        let game = Game::new(
            rx,
            GameState::new("test", 1280, 720),
            config(),
            device,
            Box::new(DefaultLifecycle::default()),
        );
        (tx, game)
    }

    fn game() -> (Sender<PlatformEvent>, Game<HeadlessDevice>) {
        game_with(HeadlessDevice::new())
    }

    fn send_key(tx: &Sender<PlatformEvent>, key: KeyCode) {
        tx.send(PlatformEvent::Inputs {
            discrete: vec![InputEvent::KeyDown { key, modifiers: Modifiers::NONE }],
            continuous: vec![],
        })
        .unwrap();
    }

    //=====================================================================
    // Frame Flow
    //=====================================================================

    #[test]
    fn first_frame_opens_initial_scene_and_draws() {
        let (_tx, mut game) = game();

        assert_eq!(game.frame(0.016), TickControl::Continue);

        assert_eq!(game.scenes().state(), Some(SceneKind::LevelEditor));
        assert_eq!(game.device().frames_presented(), 1);
        assert_eq!(game.device().last_frame().draw_calls, 2);
        assert_eq!(game.context().state.frame_count, 1);
    }

    #[test]
    fn init_runs_once() {
        let (_tx, mut game) = game();
        game.init();
        let instance = game.scenes().active_scene().map(|s| s.instance());

        game.frame(0.016);
        game.frame(0.016);

        assert_eq!(game.scenes().active_scene().map(|s| s.instance()), instance);
    }

    #[test]
    fn escape_exits() {
        let (tx, mut game) = game();
        game.frame(0.016);

        send_key(&tx, KeyCode::Escape);

        assert_eq!(game.frame(0.016), TickControl::Exit);
        assert!(game.context().state.should_terminate());
    }

    #[test]
    fn window_closed_exits_before_ticking() {
        let (tx, mut game) = game();
        game.frame(0.016);

        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(game.frame(0.016), TickControl::Exit);
        assert_eq!(game.device().frames_presented(), 1);
    }

    #[test]
    fn dropped_sender_exits() {
        let (tx, mut game) = game();
        drop(tx);

        assert_eq!(game.frame(0.016), TickControl::Exit);
    }

    #[test]
    fn fade_switches_to_level_after_timer() {
        let (tx, mut game) = game();
        game.frame(0.016);

        send_key(&tx, KeyCode::Space);
        game.frame(0.5);
        assert_eq!(game.context().state.clear_color.x, 0.75);

        for _ in 0..3 {
            game.frame(0.5);
        }
        assert_eq!(game.scenes().state(), Some(SceneKind::LevelEditor));

        game.frame(0.5);

        assert_eq!(game.scenes().state(), Some(SceneKind::Level));
        assert_eq!(game.context().state.clear_color, Vec4::ONE);
        assert_eq!(game.device().live_buffer_count(), 0);
    }

    //=====================================================================
    // Failure & Shutdown
    //=====================================================================

    #[test]
    fn failed_initial_scene_terminates() {
        let (_tx, mut game) = game_with(HeadlessDevice::failing_compile(ShaderStage::Fragment));

        assert_eq!(game.frame(0.016), TickControl::Exit);
        assert!(game.scenes().state().is_none());
        assert!(matches!(
            game.take_fatal_error(),
            Some(RenderError::ShaderCompile { stage: ShaderStage::Fragment, .. })
        ));
        assert!(game.take_fatal_error().is_none());
    }

    #[test]
    fn clean_run_has_no_fatal_error() {
        let (_tx, mut game) = game();
        game.frame(0.016);
        game.shutdown();
        assert!(game.take_fatal_error().is_none());
    }

    #[test]
    fn shutdown_releases_scene() {
        let (_tx, mut game) = game();
        game.frame(0.016);
        assert!(game.device().live_buffer_count() > 0);

        game.shutdown();

        assert!(game.scenes().state().is_none());
        assert_eq!(game.device().live_buffer_count(), 0);
        assert_eq!(game.device().live_program_count(), 0);
    }
}
