//=========================================================================
// Input Translation
//=========================================================================
//
// Turns winit window events into this engine's InputEvent, tagged with
// the buffer queue they belong in.
//
//   KeyboardInput / MouseInput  → Routed::Discrete  (modifiers attached)
//   CursorMoved / MouseWheel    → Routed::Continuous
//   ModifiersChanged            → cached, nothing routed
//
// Keys outside KeyCode's set are dropped here rather than forwarded as
// Unidentified.
//
//=========================================================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

use crate::core::input::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== Routed ==============================================================

/// A translated event and the queue it goes to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Routed {
    Discrete(InputEvent),
    Continuous(InputEvent),
}

//=== InputTranslator =====================================================

/// Stateful winit → [`InputEvent`] translation. Modifier state is sticky
/// until the next `ModifiersChanged`.
#[derive(Debug, Default)]
pub(crate) struct InputTranslator {
    modifiers: Modifiers,
}

impl InputTranslator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Translates one window event, or returns `None` when it carries no
    /// input for the engine.
    pub(crate) fn translate(&mut self, event: &WindowEvent) -> Option<Routed> {
        match event {
            WindowEvent::ModifiersChanged(state) => {
                self.set_modifiers(state.state());
                None
            }
            WindowEvent::KeyboardInput { event, .. } => self.key(event).map(Routed::Discrete),
            WindowEvent::MouseInput { state, button, .. } => {
                Some(Routed::Discrete(self.button(*button, *state)))
            }
            WindowEvent::CursorMoved { position, .. } => Some(Routed::Continuous(
                InputEvent::MouseMoved { x: position.x as f32, y: position.y as f32 },
            )),
            WindowEvent::MouseWheel { delta, .. } => Some(Routed::Continuous(scroll(*delta))),
            _ => None,
        }
    }

    fn set_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = Modifiers {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        };
    }

    fn key(&self, event: &KeyEvent) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        self.key_code(code, event.state)
    }

    fn key_code(&self, code: WinitKeyCode, state: ElementState) -> Option<InputEvent> {
        let key = map_key(code)?;
        let modifiers = self.modifiers;

        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        })
    }

    fn button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        };
        let modifiers = self.modifiers;

        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }
}

//=== Conversions =========================================================

/// Line and pixel deltas are passed through unscaled.
fn scroll(delta: MouseScrollDelta) -> InputEvent {
    let (dx, dy) = match delta {
        MouseScrollDelta::LineDelta(dx, dy) => (dx, dy),
        MouseScrollDelta::PixelDelta(position) => (position.x as f32, position.y as f32),
    };
    InputEvent::MouseScrolled { dx, dy }
}

// Engine key names match winit's physical key names one to one.
macro_rules! key_map {
    ($code:expr => $($key:ident)*) => {
        match $code {
            $(WinitKeyCode::$key => Some(KeyCode::$key),)*
            _ => None,
        }
    };
}

fn map_key(code: WinitKeyCode) -> Option<KeyCode> {
    key_map!(code =>
        Digit0 Digit1 Digit2 Digit3 Digit4 Digit5 Digit6 Digit7 Digit8 Digit9
        KeyA KeyB KeyC KeyD KeyE KeyF KeyG KeyH KeyI KeyJ KeyK KeyL KeyM
        KeyN KeyO KeyP KeyQ KeyR KeyS KeyT KeyU KeyV KeyW KeyX KeyY KeyZ
        ArrowDown ArrowLeft ArrowRight ArrowUp
        Space Enter Escape Tab Backspace Delete ShiftLeft ControlLeft
    )
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn translator_with(modifiers: ModifiersState) -> InputTranslator {
        let mut translator = InputTranslator::new();
        translator.set_modifiers(modifiers);
        translator
    }

    #[test]
    fn engine_keys_are_mapped() {
        assert_eq!(map_key(WinitKeyCode::Space), Some(KeyCode::Space));
        assert_eq!(map_key(WinitKeyCode::Escape), Some(KeyCode::Escape));
        assert_eq!(map_key(WinitKeyCode::ShiftLeft), Some(KeyCode::ShiftLeft));
        assert_eq!(map_key(WinitKeyCode::KeyZ), Some(KeyCode::KeyZ));
    }

    #[test]
    fn foreign_keys_are_dropped() {
        let translator = InputTranslator::new();

        assert_eq!(map_key(WinitKeyCode::F13), None);
        assert_eq!(map_key(WinitKeyCode::ShiftRight), None);
        assert!(translator.key_code(WinitKeyCode::NumpadAdd, ElementState::Pressed).is_none());
    }

    #[test]
    fn keys_carry_cached_modifiers() {
        let translator = translator_with(ModifiersState::CONTROL | ModifiersState::SHIFT);

        let event = translator.key_code(WinitKeyCode::KeyS, ElementState::Released);

        assert_eq!(
            event,
            Some(InputEvent::KeyUp {
                key: KeyCode::KeyS,
                modifiers: Modifiers { shift: true, ctrl: true, alt: false },
            })
        );
    }

    #[test]
    fn buttons_carry_cached_modifiers() {
        let translator = translator_with(ModifiersState::ALT);

        assert_eq!(
            translator.button(WinitMouseButton::Left, ElementState::Pressed),
            InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::ALT }
        );
        assert_eq!(
            translator.button(WinitMouseButton::Back, ElementState::Released),
            InputEvent::MouseButtonUp { button: MouseButton::Other, modifiers: Modifiers::ALT }
        );
    }

    #[test]
    fn scroll_passes_deltas_through() {
        match scroll(MouseScrollDelta::LineDelta(0.0, -2.0)) {
            InputEvent::MouseScrolled { dx, dy } => assert_eq!((dx, dy), (0.0, -2.0)),
            other => panic!("Expected MouseScrolled, got {:?}", other),
        }
    }

    #[test]
    fn modifier_change_routes_nothing() {
        let mut translator = InputTranslator::new();
        let event = WindowEvent::ModifiersChanged(ModifiersState::SHIFT.into());

        assert!(translator.translate(&event).is_none());
        assert!(translator.modifiers.shift);
    }
}
