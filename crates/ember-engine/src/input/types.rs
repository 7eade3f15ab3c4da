use std::fmt;

/// Physical keyboard key.
///
/// Variants name positions on a US layout; [`Key::name`] gives the label
/// scripts see.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,
    CapsLock,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    SuperLeft,
    SuperRight,

    Minus,
    Equal,
    BracketLeft,
    BracketRight,
    Backslash,
    Semicolon,
    Quote,
    Backquote,
    Comma,
    Period,
    Slash,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    /// Key without a stable name.
    Unknown(u32),
}

impl Key {
    /// Human-readable key label (`"A"`, `"Space"`, `"Left Shift"`, ...).
    ///
    /// Arrow keys are `"Up"`, `"Down"`, `"Left"` and `"Right"`. Unknown keys
    /// map to the empty string.
    pub fn name(self) -> &'static str {
        use Key::*;
        match self {
            Escape => "Escape",
            Enter => "Return",
            Tab => "Tab",
            Backspace => "Backspace",
            Space => "Space",
            CapsLock => "CapsLock",

            Insert => "Insert",
            Delete => "Delete",
            Home => "Home",
            End => "End",
            PageUp => "PageUp",
            PageDown => "PageDown",

            ArrowUp => "Up",
            ArrowDown => "Down",
            ArrowLeft => "Left",
            ArrowRight => "Right",

            ShiftLeft => "Left Shift",
            ShiftRight => "Right Shift",
            ControlLeft => "Left Ctrl",
            ControlRight => "Right Ctrl",
            AltLeft => "Left Alt",
            AltRight => "Right Alt",
            SuperLeft => "Left GUI",
            SuperRight => "Right GUI",

            Minus => "-",
            Equal => "=",
            BracketLeft => "[",
            BracketRight => "]",
            Backslash => "\\",
            Semicolon => ";",
            Quote => "'",
            Backquote => "`",
            Comma => ",",
            Period => ".",
            Slash => "/",

            A => "A", B => "B", C => "C", D => "D", E => "E", F => "F", G => "G",
            H => "H", I => "I", J => "J", K => "K", L => "L", M => "M", N => "N",
            O => "O", P => "P", Q => "Q", R => "R", S => "S", T => "T", U => "U",
            V => "V", W => "W", X => "X", Y => "Y", Z => "Z",

            Digit0 => "0", Digit1 => "1", Digit2 => "2", Digit3 => "3", Digit4 => "4",
            Digit5 => "5", Digit6 => "6", Digit7 => "7", Digit8 => "8", Digit9 => "9",

            F1 => "F1", F2 => "F2", F3 => "F3", F4 => "F4", F5 => "F5", F6 => "F6",
            F7 => "F7", F8 => "F8", F9 => "F9", F10 => "F10", F11 => "F11", F12 => "F12",

            Unknown(_) => "",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

impl MouseButton {
    /// Script-facing label. Buttons beyond the three standard ones report `"Left"`.
    pub fn name(self) -> &'static str {
        match self {
            MouseButton::Right => "Right",
            MouseButton::Middle => "Middle",
            _ => "Left",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

impl MouseButtonState {
    pub fn name(self) -> &'static str {
        match self {
            MouseButtonState::Pressed => "Pressed",
            MouseButtonState::Released => "Released",
        }
    }
}

/// Pointer move event in logical pixels.
///
/// `dx`/`dy` are relative to the previous pointer position (zero for the
/// first event after the pointer enters the window).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
}

/// Pointer button event at the last known pointer position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),

    /// The user asked the window to close.
    CloseRequested,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            "" => write!(f, "{:?}", self),
            name => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_follow_scancode_labels() {
        assert_eq!(Key::A.name(), "A");
        assert_eq!(Key::Digit1.name(), "1");
        assert_eq!(Key::Enter.name(), "Return");
        assert_eq!(Key::ArrowLeft.name(), "Left");
        assert_eq!(Key::ShiftLeft.name(), "Left Shift");
        assert_eq!(Key::F5.name(), "F5");
        assert_eq!(Key::Unknown(77).name(), "");
    }

    #[test]
    fn extra_mouse_buttons_report_left() {
        assert_eq!(MouseButton::Middle.name(), "Middle");
        assert_eq!(MouseButton::Back.name(), "Left");
        assert_eq!(MouseButton::Other(9).name(), "Left");
    }
}
