//! Error types for structural widget operations.
//!
//! Event dispatch never surfaces these to the platform layer; they are
//! returned by tree-building APIs where a caller passed a bad handle.

use crate::handle::{WidgetId, WindowId};

/// Errors raised by widget tree and window operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The handle does not name a live widget.
    #[error("widget {0:?} does not exist")]
    WidgetNotFound(WidgetId),

    /// The widget exists but cannot hold children.
    #[error("widget {0:?} is not a container")]
    NotAContainer(WidgetId),

    /// The widget is not of the kind the caller asked for.
    #[error("widget {id:?} is not a {expected}")]
    WrongWidgetKind {
        /// The widget that was looked up.
        id: WidgetId,
        /// Name of the expected widget kind.
        expected: &'static str,
    },

    /// The widget is not on the popup stack.
    #[error("popup {0:?} is not open")]
    PopupNotFound(WidgetId),

    /// A popup must be a floating root, not attached to a parent.
    #[error("widget {0:?} has a parent and cannot be shown as a popup")]
    NotFloating(WidgetId),

    /// The handle does not name a registered window.
    #[error("window {0:?} does not exist")]
    WindowNotFound(WindowId),

    /// Attaching the widget here would make it its own ancestor.
    #[error("widget {0:?} cannot be added below itself")]
    CyclicParent(WidgetId),
}

/// Result alias for ourwin operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_error_display() {
        let mut ids = SlotMap::<WidgetId, ()>::with_key();
        let id = ids.insert(());

        let err = Error::WrongWidgetKind {
            id,
            expected: "Grid",
        };
        assert!(err.to_string().ends_with("is not a Grid"));
        assert!(Error::NotAContainer(id).to_string().contains("not a container"));
    }
}
