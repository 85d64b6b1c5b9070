//! Mouse cursor shapes.
//!
//! Widgets ask for a cursor through [`EventCx::set_cursor`]; the window keeps
//! the current shape and the manager forwards changes to the platform as a
//! [`CursorIcon`].
//!
//! [`EventCx::set_cursor`]: super::EventCx::set_cursor

use cursor_icon::CursorIcon;

/// The shape of the mouse cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    /// Standard arrow.
    #[default]
    Arrow,
    /// Text insertion bar.
    IBeam,
    /// Pointing hand, for clickable items.
    Hand,
    /// Horizontal resize, used on vertical gutters and column edges.
    SizeWE,
    /// Vertical resize, used on horizontal gutters and row edges.
    SizeNS,
}

impl CursorShape {
    /// Convert to the platform-neutral cursor icon.
    pub fn to_cursor_icon(self) -> CursorIcon {
        match self {
            CursorShape::Arrow => CursorIcon::Default,
            CursorShape::IBeam => CursorIcon::Text,
            CursorShape::Hand => CursorIcon::Pointer,
            CursorShape::SizeWE => CursorIcon::EwResize,
            CursorShape::SizeNS => CursorIcon::NsResize,
        }
    }

    /// Check if this is one of the resize cursors.
    pub fn is_resize_cursor(self) -> bool {
        matches!(self, CursorShape::SizeWE | CursorShape::SizeNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_shape_default() {
        assert_eq!(CursorShape::default(), CursorShape::Arrow);
        assert_eq!(CursorShape::Arrow.to_cursor_icon(), CursorIcon::Default);
    }

    #[test]
    fn test_cursor_shape_is_resize() {
        assert!(CursorShape::SizeWE.is_resize_cursor());
        assert!(CursorShape::SizeNS.is_resize_cursor());
        assert!(!CursorShape::IBeam.is_resize_cursor());
    }
}
