//=========================================================================
// Input Events
//=========================================================================
//
// Engine-side representation of keyboard and mouse input.
//
// Flow:
//   winit → InputTranslator → InputEvent → InputBuffer → channel
//         → EventCollector → StateTracker (queried by scenes)
//
// Continuous events (cursor moves, scrolling) compare equal to any other
// event of the same kind so the platform buffer can keep only the latest
// one per frame.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Side or vendor-specific buttons.
    Other,
}

//=== KeyCode =============================================================

/// Physical key location, independent of keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Digits -----------------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Letters ----------------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrows -----------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Editing & Control ------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    ShiftLeft,
    ControlLeft,

    /// Any key without a mapping above.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Shift / Ctrl / Alt state attached to discrete events.
///
/// Left and right variants are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };

    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

//=== InputEvent ==========================================================

/// One input occurrence reported by the platform layer.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    KeyDown { key: KeyCode, modifiers: Modifiers },
    KeyUp { key: KeyCode, modifiers: Modifiers },
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },

    /// Cursor position in window pixels, top-left origin.
    MouseMoved { x: f32, y: f32 },

    /// Scroll offset reported this frame (lines or pixels, as the OS gives it).
    MouseScrolled { dx: f32, dy: f32 },

    Unidentified,
}

impl InputEvent {
    /// Continuous events are coalesced per frame; discrete ones are queued.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MouseMoved { .. } | Self::MouseScrolled { .. })
    }
}

//--- Trait Implementations -----------------------------------------------

// Continuous variants ignore their payload so a HashSet keeps one per kind.
impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a, modifiers: ma }, KeyDown { key: b, modifiers: mb })
            | (KeyUp { key: a, modifiers: ma }, KeyUp { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (
                MouseButtonDown { button: a, modifiers: ma },
                MouseButtonDown { button: b, modifiers: mb },
            )
            | (
                MouseButtonUp { button: a, modifiers: ma },
                MouseButtonUp { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (MouseMoved { .. }, MouseMoved { .. })
            | (MouseScrolled { .. }, MouseScrolled { .. })
            | (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Self::KeyDown { key, modifiers } | Self::KeyUp { key, modifiers } => {
                key.hash(state);
                modifiers.hash(state);
            }
            Self::MouseButtonDown { button, modifiers }
            | Self::MouseButtonUp { button, modifiers } => {
                button.hash(state);
                modifiers.hash(state);
            }
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    //=====================================================================
    // Equality & Hashing
    //=====================================================================

    #[test]
    fn discrete_events_compare_payload() {
        assert_eq!(key_down(KeyCode::Space), key_down(KeyCode::Space));
        assert_ne!(key_down(KeyCode::Space), key_down(KeyCode::Enter));
        assert_ne!(
            key_down(KeyCode::KeyS),
            InputEvent::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::CTRL }
        );
        assert_ne!(
            key_down(KeyCode::KeyA),
            InputEvent::KeyUp { key: KeyCode::KeyA, modifiers: Modifiers::NONE }
        );
    }

    #[test]
    fn continuous_events_ignore_payload() {
        let a = InputEvent::MouseMoved { x: 1.0, y: 2.0 };
        let b = InputEvent::MouseMoved { x: 300.0, y: 400.0 };

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, InputEvent::MouseScrolled { dx: 0.0, dy: 1.0 });
    }

    #[test]
    fn hash_set_keeps_one_move() {
        let mut set = HashSet::new();
        set.replace(InputEvent::MouseMoved { x: 1.0, y: 1.0 });
        set.replace(InputEvent::MouseMoved { x: 9.0, y: 9.0 });

        assert_eq!(set.len(), 1);
        assert!(matches!(
            set.iter().next(),
            Some(InputEvent::MouseMoved { x, .. }) if *x == 9.0
        ));
    }

    #[test]
    fn classifies_continuous_events() {
        assert!(InputEvent::MouseMoved { x: 0.0, y: 0.0 }.is_continuous());
        assert!(InputEvent::MouseScrolled { dx: 0.0, dy: 0.0 }.is_continuous());
        assert!(!key_down(KeyCode::KeyA).is_continuous());
    }

    #[test]
    fn modifiers_default_to_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        assert!(!Modifiers::NONE.any());
        assert!(Modifiers::ALT.any());
    }
}
