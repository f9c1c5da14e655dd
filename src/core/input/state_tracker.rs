//=========================================================================
// State Tracker
//=========================================================================
//
// Polled keyboard and mouse state, owned by the global context and read
// by scenes and lifecycle hooks.
//
// Frame lifecycle: clear() → process_events() → finalize_frame() → query
//
// Persistent state (keys/buttons held, cursor position, dragging)
// survives frame boundaries; pressed/released sets, scroll and cursor
// delta only describe the last frame.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== External Crates =====================================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== StateTracker ========================================================

/// Keyboard and mouse state with per-frame transitions.
#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State -------------------------------------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    modifiers: Modifiers,
    cursor: Vec2,
    dragging: bool,

    //--- Frame Deltas -----------------------------------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    previous_cursor: Vec2,
    cursor_delta: Vec2,
    scroll: Vec2,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Applies one frame worth of events in a single step.
    pub(crate) fn apply_frame<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a InputEvent>,
    {
        self.clear();
        for event in events {
            self.process_event(event);
        }
        self.finalize_frame();
    }

    /// Drops last frame's transitions and remembers the cursor position.
    pub(crate) fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.scroll = Vec2::ZERO;
        self.previous_cursor = self.cursor;
    }

    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    pub(crate) fn finalize_frame(&mut self) {
        self.cursor_delta = self.cursor - self.previous_cursor;
    }

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = modifiers;
                if self.keys_down.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }

            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = modifiers;
                if self.keys_down.remove(&key) {
                    self.keys_released.insert(key);
                }
            }

            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = modifiers;
                if self.buttons_down.insert(button) {
                    self.buttons_pressed.insert(button);
                }
            }

            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = modifiers;
                if self.buttons_down.remove(&button) {
                    self.buttons_released.insert(button);
                }
                if self.buttons_down.is_empty() {
                    self.dragging = false;
                }
            }

            InputEvent::MouseMoved { x, y } => {
                self.cursor = Vec2::new(x, y);
                self.dragging = !self.buttons_down.is_empty();
            }

            InputEvent::MouseScrolled { dx, dy } => {
                self.scroll += Vec2::new(dx, dy);
            }

            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// `true` only on the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// `true` only on the frame the key went up.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    /// Cursor position in window pixels.
    pub fn mouse_position(&self) -> Vec2 {
        self.cursor
    }

    /// Cursor position at the start of the last frame.
    pub fn previous_mouse_position(&self) -> Vec2 {
        self.previous_cursor
    }

    pub fn mouse_delta(&self) -> Vec2 {
        self.cursor_delta
    }

    /// Scroll accumulated during the last frame.
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// A button is held and the cursor has moved since it went down.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    //=====================================================================
    // Query API - Modifiers
    //=====================================================================

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn shift_held(&self) -> bool {
        self.modifiers.shift
    }

    pub fn ctrl_held(&self) -> bool {
        self.modifiers.ctrl
    }

    pub fn alt_held(&self) -> bool {
        self.modifiers.alt
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
