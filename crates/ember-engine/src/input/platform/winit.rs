use winit::event::{ElementState, KeyEvent, MouseButton as WinitButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::input::{
    InputEvent, InputState, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent,
};

/// Maps a winit window event onto an [`InputEvent`], or `None` if input
/// does not care about it.
///
/// `state` must not include `event` yet: relative motion and button
/// positions come from the pointer position it remembers.
pub(crate) fn translate_window_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    let ev = match event {
        WindowEvent::CloseRequested => InputEvent::CloseRequested,
        WindowEvent::Focused(focused) => InputEvent::Focused(*focused),
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,

        WindowEvent::CursorMoved { position, .. } => {
            let at = position.to_logical::<f32>(window.scale_factor());
            let (px, py) = state.pointer_pos.unwrap_or((at.x, at.y));
            InputEvent::PointerMoved(PointerMoveEvent {
                x: at.x,
                y: at.y,
                dx: at.x - px,
                dy: at.y - py,
            })
        }

        WindowEvent::MouseInput { state: pressed, button, .. } => {
            let (x, y) = state.pointer_pos.unwrap_or_default();
            InputEvent::PointerButton(PointerButtonEvent {
                button: mouse_button(*button),
                state: match pressed {
                    ElementState::Pressed => MouseButtonState::Pressed,
                    ElementState::Released => MouseButtonState::Released,
                },
                x,
                y,
            })
        }

        WindowEvent::KeyboardInput { event, .. } => key_event(event),

        _ => return None,
    };
    Some(ev)
}

fn key_event(event: &KeyEvent) -> InputEvent {
    let key = match event.physical_key {
        PhysicalKey::Code(code) => key_for(code),
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    };
    let state = if event.state.is_pressed() { KeyState::Pressed } else { KeyState::Released };
    InputEvent::Key { key, state, repeat: event.repeat }
}

fn mouse_button(button: WinitButton) -> MouseButton {
    match button {
        WinitButton::Left => MouseButton::Left,
        WinitButton::Right => MouseButton::Right,
        WinitButton::Middle => MouseButton::Middle,
        WinitButton::Back => MouseButton::Back,
        WinitButton::Forward => MouseButton::Forward,
        WinitButton::Other(n) => MouseButton::Other(n),
    }
}

/// Physical key codes with an engine [`Key`]. Everything else is `Unknown`.
#[rustfmt::skip]
const KEYMAP: &[(KeyCode, Key)] = {
    use KeyCode as C;
    &[
        (C::Escape, Key::Escape), (C::Enter, Key::Enter), (C::NumpadEnter, Key::Enter),
        (C::Tab, Key::Tab), (C::Backspace, Key::Backspace), (C::Space, Key::Space),
        (C::CapsLock, Key::CapsLock),
        (C::Insert, Key::Insert), (C::Delete, Key::Delete), (C::Home, Key::Home),
        (C::End, Key::End), (C::PageUp, Key::PageUp), (C::PageDown, Key::PageDown),
        (C::ArrowUp, Key::ArrowUp), (C::ArrowDown, Key::ArrowDown),
        (C::ArrowLeft, Key::ArrowLeft), (C::ArrowRight, Key::ArrowRight),
        (C::ShiftLeft, Key::ShiftLeft), (C::ShiftRight, Key::ShiftRight),
        (C::ControlLeft, Key::ControlLeft), (C::ControlRight, Key::ControlRight),
        (C::AltLeft, Key::AltLeft), (C::AltRight, Key::AltRight),
        (C::SuperLeft, Key::SuperLeft), (C::SuperRight, Key::SuperRight),
        (C::Minus, Key::Minus), (C::Equal, Key::Equal), (C::BracketLeft, Key::BracketLeft),
        (C::BracketRight, Key::BracketRight), (C::Backslash, Key::Backslash),
        (C::Semicolon, Key::Semicolon), (C::Quote, Key::Quote), (C::Backquote, Key::Backquote),
        (C::Comma, Key::Comma), (C::Period, Key::Period), (C::Slash, Key::Slash),
        (C::KeyA, Key::A), (C::KeyB, Key::B), (C::KeyC, Key::C), (C::KeyD, Key::D),
        (C::KeyE, Key::E), (C::KeyF, Key::F), (C::KeyG, Key::G), (C::KeyH, Key::H),
        (C::KeyI, Key::I), (C::KeyJ, Key::J), (C::KeyK, Key::K), (C::KeyL, Key::L),
        (C::KeyM, Key::M), (C::KeyN, Key::N), (C::KeyO, Key::O), (C::KeyP, Key::P),
        (C::KeyQ, Key::Q), (C::KeyR, Key::R), (C::KeyS, Key::S), (C::KeyT, Key::T),
        (C::KeyU, Key::U), (C::KeyV, Key::V), (C::KeyW, Key::W), (C::KeyX, Key::X),
        (C::KeyY, Key::Y), (C::KeyZ, Key::Z),
        (C::Digit0, Key::Digit0), (C::Digit1, Key::Digit1), (C::Digit2, Key::Digit2),
        (C::Digit3, Key::Digit3), (C::Digit4, Key::Digit4), (C::Digit5, Key::Digit5),
        (C::Digit6, Key::Digit6), (C::Digit7, Key::Digit7), (C::Digit8, Key::Digit8),
        (C::Digit9, Key::Digit9),
        (C::F1, Key::F1), (C::F2, Key::F2), (C::F3, Key::F3), (C::F4, Key::F4),
        (C::F5, Key::F5), (C::F6, Key::F6), (C::F7, Key::F7), (C::F8, Key::F8),
        (C::F9, Key::F9), (C::F10, Key::F10), (C::F11, Key::F11), (C::F12, Key::F12),
    ]
};

fn key_for(code: KeyCode) -> Key {
    KEYMAP
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(Key::Unknown(code as u32), |&(_, key)| key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_enter_keys_are_return() {
        assert_eq!(key_for(KeyCode::Enter).name(), "Return");
        assert_eq!(key_for(KeyCode::NumpadEnter).name(), "Return");
    }

    #[test]
    fn unmapped_codes_have_no_name() {
        assert_eq!(key_for(KeyCode::F24).name(), "");
        assert_eq!(key_for(KeyCode::KeyQ), Key::Q);
    }

    #[test]
    fn every_mapped_key_has_a_name() {
        for &(code, key) in KEYMAP {
            assert!(!key.name().is_empty(), "{code:?}");
        }
    }
}
