//! Mouse grab state.
//!
//! While a widget holds the grab, pointer motion and the next button release
//! go to it directly instead of through hit testing. The grab records what
//! the drag is for as a [`DragKind`], so the widget can match on it when the
//! motion arrives rather than keeping callbacks around.

use ourwin_core::WidgetId;
use ourwin_render::Point;

use super::events::MouseButton;

/// What a mouse grab is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// A button held down on a clickable widget.
    Press(MouseButton),
    /// Moving a splitter gutter that sat at `split_at_grab`.
    SplitGutter { split_at_grab: i32 },
    /// Resizing a grid column, or the row header band when `index` is `None`.
    ResizeColumn {
        index: Option<usize>,
        thickness_at_grab: i32,
    },
    /// Resizing a grid row, or the column header band when `index` is `None`.
    ResizeRow {
        index: Option<usize>,
        thickness_at_grab: i32,
    },
}

/// A drag in progress, as seen by the grabbing widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drag {
    pub kind: DragKind,
    /// Press position, local to the grabbing widget.
    pub origin: Point,
}

impl Drag {
    /// Movement since the press.
    #[inline]
    pub fn delta(&self, pos: Point) -> Point {
        pos - self.origin
    }
}

/// The window's record of the current grab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseGrab {
    pub widget: WidgetId,
    pub drag: Drag,
    /// Window position of the grabbing widget's origin when the grab began.
    pub offset: Point,
}

impl MouseGrab {
    /// Convert a window position into the grabbing widget's space.
    #[inline]
    pub fn local(&self, window_pos: Point) -> Point {
        window_pos - self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_grab_translates_consistently() {
        let mut ids = SlotMap::<WidgetId, ()>::with_key();
        let grab = MouseGrab {
            widget: ids.insert(()),
            drag: Drag {
                kind: DragKind::SplitGutter { split_at_grab: 200 },
                origin: Point::new(200, 10),
            },
            offset: Point::new(50, 40),
        };

        let p1 = grab.local(Point::new(260, 50));
        let p2 = grab.local(Point::new(300, 90));
        assert_eq!(grab.drag.delta(p1), Point::new(10, 0));
        assert_eq!(grab.drag.delta(p2), Point::new(50, 40));
        assert_eq!(grab.drag.origin, Point::new(200, 10));
    }
}
