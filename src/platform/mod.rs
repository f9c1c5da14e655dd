//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the game frame loop.
//
// Architecture:
// ```text
//  Main Thread (single):
//  ┌────────────────────────────────────────────────────┐
//  │  Winit Event Loop                                  │
//  │   ↓                                                │
//  │  InputTranslator  (winit types → InputEvent)       │
//  │   ↓                                                │
//  │  InputBuffer      (discrete: Vec, continuous: Set) │
//  │   ↓                                                │
//  │  RedrawRequested                                   │
//  │   ├─ flush buffer → channel → EventCollector       │
//  │   └─ FrameHandler::frame(dt) → TickControl         │
//  └────────────────────────────────────────────────────┘
// ```
//
// Frame boundary is RedrawRequested: everything buffered since the last
// redraw is sent in one PlatformEvent::Inputs, then the frame runs.
// Modifier state is sticky until the next ModifiersChanged.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod translate;

//=== Standard Library Imports ============================================

use std::time::Instant;

//=== External Crates =====================================================

use crossbeam_channel::{Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::error::PlatformError;
use crate::core::platform_bridge::{PlatformEvent, TickControl};
use input_buffer::InputBuffer;
use translate::{InputTranslator, Routed};

//=== FrameHandler ========================================================

/// Whatever runs once per redraw.
pub(crate) trait FrameHandler {
    fn frame(&mut self, dt: f32) -> TickControl;
}

//=== WindowSettings ======================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== Platform ============================================================

/// Window owner and input aggregator; drives `H` once per redraw.
///
/// # Lifecycle
///
/// 1. `Platform::new(sender, handler, settings)`
/// 2. `run()` enters the event loop
/// 3. Window created lazily in `resumed()`
/// 4. Close request or `TickControl::Exit` ends the loop; `run()` hands the
///    handler back for shutdown
pub(crate) struct Platform<H: FrameHandler> {
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,
    settings: WindowSettings,

    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    translator: InputTranslator,

    handler: H,
    /// Start of the previous frame; `None` before the first redraw.
    last_frame: Option<Instant>,
    /// Set when the window could not be created; returned from `run()`.
    fatal: Option<PlatformError>,
}

impl<H: FrameHandler> Platform<H> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(event_sender: Sender<PlatformEvent>, handler: H, settings: WindowSettings) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            settings,
            buffer: InputBuffer::new(),
            event_sender,
            translator: InputTranslator::new(),
            handler,
            last_frame: None,
            fatal: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes or the handler
    /// asks to exit, then returns the handler.
    ///
    /// # Errors
    ///
    /// [`PlatformError`] if the event loop cannot be created, fails while
    /// running, or the window cannot be created.
    pub(crate) fn run(mut self) -> Result<H, PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        debug!(target: "platform", "Winit event loop returned");
        match self.fatal.take() {
            Some(err) => Err(err),
            None => Ok(self.handler),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Queues a message without blocking. The consumer runs on this thread,
    /// so a full channel drops the message instead of waiting.
    fn send(&self, event: PlatformEvent) -> bool {
        match self.event_sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(target: "platform", "Channel full, dropping {:?}", event);
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "platform", "Channel disconnected");
                false
            }
        }
    }

    /// Sends everything buffered since the last redraw as one message.
    ///
    /// A full or disconnected channel drops the events with a warning.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            let discrete_count = discrete.len();
            let continuous_count = continuous.len();

            trace!(
                target: "platform::input",
                "Flushing {} discrete + {} continuous events",
                discrete_count,
                continuous_count
            );

            if !self.send(PlatformEvent::Inputs { discrete, continuous }) {
                warn!(
                    target: "platform::input",
                    "Dropped {} input events",
                    discrete_count + continuous_count
                );
            }
        }
    }

    /// Seconds since the previous frame started (0 on the first frame).
    fn measure_dt(&mut self) -> f32 {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map(|previous| now.duration_since(previous).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        dt
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.flush_input_buffer();

        let dt = self.measure_dt();
        if self.handler.frame(dt) == TickControl::Exit {
            info!(target: "platform", "Frame loop requested exit");
            event_loop.exit();
            return;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl<H: FrameHandler> ApplicationHandler for Platform<H> {
    /// Creates the window on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                let err = PlatformError::WindowCreation(e.to_string());
                error!(target: "platform", "{}", err);
                self.fatal = Some(err);
                self.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => match self.translator.translate(&event) {
                Some(Routed::Discrete(input)) => self.buffer.push_discrete(input),
                Some(Routed::Continuous(input)) => self.buffer.push_continuous(input),
                None => {}
            },
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::InputEvent;
    use crate::core::input::{KeyCode, Modifiers};
    use crossbeam_channel::{bounded, unbounded};

    //--- Test Helpers -----------------------------------------------------

    struct CountingHandler {
        frames: usize,
    }

    impl FrameHandler for CountingHandler {
        fn frame(&mut self, _dt: f32) -> TickControl {
            self.frames += 1;
            TickControl::Continue
        }
    }

    fn settings() -> WindowSettings {
        WindowSettings {
            title: "test".to_string(),
            width: 640,
            height: 480,
        }
    }

    fn platform(tx: Sender<PlatformEvent>) -> Platform<CountingHandler> {
        Platform::new(tx, CountingHandler { frames: 0 }, settings())
    }

    fn space() -> InputEvent {
        InputEvent::KeyDown {
            key: KeyCode::Space,
            modifiers: Modifiers::NONE,
        }
    }

    //=====================================================================
    // Platform Tests
    //=====================================================================

    #[test]
    fn platform_creation() {
        let (tx, _rx) = unbounded();
        let platform = platform(tx);
        assert!(platform.window().is_none(), "Window should be created lazily");
        assert_eq!(platform.handler.frames, 0);
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);

        platform.flush_input_buffer();

        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_events() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);

        platform.buffer.push_discrete(space());
        platform.buffer.push_continuous(InputEvent::MouseMoved { x: 1.0, y: 2.0 });
        platform.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                assert_eq!(discrete.len(), 1, "Should have 1 discrete event");
                assert_eq!(continuous.len(), 1, "Should have 1 continuous event");
            }
            other => panic!("Expected Inputs event, got {:?}", other),
        }
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);
        platform.buffer.push_discrete(space());

        drop(rx);

        platform.flush_input_buffer();
        assert!(platform.buffer.is_empty());
    }

    #[test]
    fn multiple_flushes_clear_buffer() {
        let (tx, rx) = unbounded();
        let mut platform = platform(tx);
        platform.buffer.push_discrete(space());

        platform.flush_input_buffer();
        platform.flush_input_buffer();

        assert!(rx.try_recv().is_ok(), "First flush should send");
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let (tx, rx) = bounded(1);
        let mut platform = platform(tx);

        platform.buffer.push_discrete(space());
        platform.flush_input_buffer();
        platform.buffer.push_discrete(space());
        platform.flush_input_buffer();

        assert!(!platform.send(PlatformEvent::WindowClosed));
        assert_eq!(rx.len(), 1);
        assert!(platform.buffer.is_empty());
    }

    #[test]
    fn first_frame_has_zero_dt() {
        let (tx, _rx) = unbounded();
        let mut platform = platform(tx);

        assert_eq!(platform.measure_dt(), 0.0);
        assert!(platform.measure_dt() >= 0.0);
        assert!(platform.last_frame.is_some());
    }
}
