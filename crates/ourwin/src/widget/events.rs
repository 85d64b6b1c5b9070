//! Input events delivered to windows and widgets.
//!
//! The platform layer produces one [`Event`] at a time. Mouse positions are
//! window-local when the event enters [`Window::handle_event`] and are
//! rewritten into each widget's local space as the event descends the tree.
//!
//! [`Window::handle_event`]: crate::window::Window::handle_event

use ourwin_render::Point;

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
    Other(u8),
}

/// A mouse press, release or move.
///
/// A move has neither `pressed` nor `released` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Position in the receiver's local coordinates.
    pub pos: Point,
    pub pressed: bool,
    pub released: bool,
    pub button: MouseButton,
}

impl MouseEvent {
    /// A button press at `pos`.
    pub fn press(pos: impl Into<Point>, button: MouseButton) -> Self {
        Self {
            pos: pos.into(),
            pressed: true,
            released: false,
            button,
        }
    }

    /// A button release at `pos`.
    pub fn release(pos: impl Into<Point>, button: MouseButton) -> Self {
        Self {
            pos: pos.into(),
            pressed: false,
            released: true,
            button,
        }
    }

    /// Pointer motion to `pos`.
    pub fn moved(pos: impl Into<Point>) -> Self {
        Self {
            pos: pos.into(),
            pressed: false,
            released: false,
            button: MouseButton::Left,
        }
    }

    /// Check if this is pointer motion rather than a button change.
    #[inline]
    pub fn is_move(&self) -> bool {
        !self.pressed && !self.released
    }

    /// The same event at another position.
    #[inline]
    pub fn at(&self, pos: Point) -> Self {
        Self { pos, ..*self }
    }
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyboardModifiers {
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Check if no modifiers are held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Keys the toolkit gives meaning to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Tab,
    Enter,
    Escape,
    Space,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Control,
    Shift,
    /// A key that produces a character.
    Character(char),
    /// Any other platform keycode.
    Other(u32),
}

/// A key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub pressed: bool,
    pub released: bool,
    pub key: Key,
    /// Character produced by the key, if any.
    pub charcode: Option<char>,
    pub modifiers: KeyboardModifiers,
}

impl KeyEvent {
    /// A key press without modifiers.
    pub fn press(key: Key) -> Self {
        Self {
            pressed: true,
            released: false,
            key,
            charcode: match key {
                Key::Character(c) => Some(c),
                _ => None,
            },
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// A key release without modifiers.
    pub fn release(key: Key) -> Self {
        Self {
            pressed: false,
            released: true,
            ..Self::press(key)
        }
    }

    /// The same event with `modifiers` held.
    pub fn with_modifiers(mut self, modifiers: KeyboardModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Text input, either committed or still being composed by an input method.
///
/// `composition` holds the text. When `selection_len` is zero and
/// `cursor_pos` is `-1` the text is committed; otherwise it is a preedit
/// string with the given caret and selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextEvent {
    pub composition: String,
    pub cursor_pos: i32,
    pub selection_len: i32,
}

impl TextEvent {
    /// Committed text.
    pub fn commit(text: impl Into<String>) -> Self {
        Self {
            composition: text.into(),
            cursor_pos: -1,
            selection_len: 0,
        }
    }

    /// Check if this is committed text rather than a preedit update.
    #[inline]
    pub fn is_commit(&self) -> bool {
        self.cursor_pos < 0 && self.selection_len == 0
    }
}

/// An event delivered by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The window became visible.
    WindowShown,
    /// The window's client area changed size.
    WindowResized { width: i32, height: i32 },
    Mouse(MouseEvent),
    Key(KeyEvent),
    Text(TextEvent),
}

impl From<MouseEvent> for Event {
    fn from(event: MouseEvent) -> Self {
        Event::Mouse(event)
    }
}

impl From<KeyEvent> for Event {
    fn from(event: KeyEvent) -> Self {
        Event::Key(event)
    }
}

impl From<TextEvent> for Event {
    fn from(event: TextEvent) -> Self {
        Event::Text(event)
    }
}
