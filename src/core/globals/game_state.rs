//=========================================================================
// Game State
//=========================================================================
//
// Per-run values shared between the frame loop and scenes: window
// settings, frame timing, the terminate flag and the clear color.
//
//=========================================================================

use glam::Vec4;
use log::info;

/// Frame timing, window settings and the terminate flag.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub title: String,
    pub width: u32,
    pub height: u32,

    /// Seconds elapsed during the previous frame.
    pub dt: f32,
    pub fps: f32,
    /// Seconds accumulated since the last one-second rollover.
    pub elapsed_time: f32,
    /// Frames counted since the last one-second rollover.
    pub frame_count: u32,

    terminate: bool,

    /// Color the framebuffer is cleared to at the start of every frame.
    pub clear_color: Vec4,
}

impl GameState {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            dt: 0.0,
            fps: 0.0,
            elapsed_time: 0.0,
            frame_count: 0,
            terminate: false,
            clear_color: Vec4::ONE,
        }
    }

    /// Records the duration of the frame that just ended.
    pub fn update_timing(&mut self, dt: f32) {
        self.dt = dt;
        self.fps = (1.0 / (f64::from(dt) + 1e-9)) as f32;
        self.frame_count += 1;
        self.elapsed_time += dt;
    }

    /// Resets the per-second counters once a full second has accumulated.
    pub fn roll_over_second(&mut self) {
        if self.elapsed_time >= 1.0 {
            self.frame_count = 0;
            self.elapsed_time = 0.0;
        }
    }

    /// Raises the terminate flag. The frame loop exits on its next check.
    pub fn terminate(&mut self) {
        if !self.terminate {
            info!(target: "engine", "Termination requested");
        }
        self.terminate = true;
    }

    pub fn should_terminate(&self) -> bool {
        self.terminate
    }
}
