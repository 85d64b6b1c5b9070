//! Two-pane splitter.
//!
//! A splitter holds exactly two pane containers separated by a gutter of
//! fixed thickness. The gutter's center sits at the split position, measured
//! along the split axis from the splitter's left or top edge. Pane rectangles
//! are derived from the split position every time the splitter is resized or
//! the gutter is dragged, so they never drift.
//!
//! # Orientation
//!
//! [`Orientation::Horizontal`] places the panes side by side with a vertical
//! gutter between them; [`Orientation::Vertical`] stacks them with a
//! horizontal gutter.
//!
//! # Example
//!
//! ```ignore
//! use ourwin::widget::layout::Orientation;
//! use ourwin::widget::widgets::Splitter;
//!
//! let splitter = Splitter::new(Rect::new(0, 0, 400, 300), Orientation::Horizontal, 4);
//! let panes = Splitter::install(&mut tree, root, splitter)?;
//! tree.add_child(panes.one, Button::new(tree.shaper(), "left"))?;
//! ```

use ourwin_core::logging::targets;
use ourwin_core::{Result, WidgetId};
use ourwin_render::{Point, Rect};

use crate::widget::base::{Style, WidgetBase};
use crate::widget::context::EventCx;
use crate::widget::cursor::CursorShape;
use crate::widget::events::{Event, MouseButton};
use crate::widget::layout::{LayoutKind, Orientation};
use crate::widget::mouse::{Drag, DragKind};
use crate::widget::traits::Widget;
use crate::widget::tree::WidgetTree;

use super::Container;

/// Handles of an installed splitter and its panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitterPanes {
    pub splitter: WidgetId,
    /// Left or top pane.
    pub one: WidgetId,
    /// Right or bottom pane.
    pub two: WidgetId,
}

/// A container split into two resizable panes.
#[derive(Debug)]
pub struct Splitter {
    base: WidgetBase,
    orientation: Orientation,
    /// Center of the gutter along the split axis.
    split_position: i32,
    /// Gutter width along the split axis.
    thickness: i32,
}

impl Splitter {
    /// Create a splitter with the gutter centered.
    pub fn new(rect: Rect, orientation: Orientation, thickness: i32) -> Self {
        let mut splitter = Self {
            base: WidgetBase::new(rect, Style::container()),
            orientation,
            split_position: 0,
            thickness: thickness.max(1),
        };
        splitter.split_position = splitter.clamp_split(splitter.extent() / 2);
        splitter
    }

    /// Set the initial split position using builder pattern.
    pub fn with_split_position(mut self, position: i32) -> Self {
        self.split_position = self.clamp_split(position);
        self
    }

    /// Insert `splitter` under `parent` together with its two panes.
    pub fn install(tree: &mut WidgetTree, parent: WidgetId, splitter: Splitter) -> Result<SplitterPanes> {
        let id = tree.add_child(parent, splitter)?;
        let one = tree.add_child(id, Container::new(Rect::ZERO))?;
        let two = tree.add_child(id, Container::new(Rect::ZERO))?;
        tree.rearrange(id);
        Ok(SplitterPanes {
            splitter: id,
            one,
            two,
        })
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn split_position(&self) -> i32 {
        self.split_position
    }

    pub fn thickness(&self) -> i32 {
        self.thickness
    }

    /// Move the gutter. The position is clamped so neither pane goes
    /// negative. Returns `true` if the position changed.
    ///
    /// The panes are re-derived on the next rearrange of the splitter.
    pub fn set_split_position(&mut self, position: i32) -> bool {
        let position = self.clamp_split(position);
        if position == self.split_position {
            return false;
        }
        self.split_position = position;
        self.base.mark_dirty();
        true
    }

    /// Extent along the split axis.
    fn extent(&self) -> i32 {
        match self.orientation {
            Orientation::Horizontal => self.base.size().width,
            Orientation::Vertical => self.base.size().height,
        }
    }

    fn clamp_split(&self, position: i32) -> i32 {
        let half = self.thickness / 2;
        let max = (self.extent() - (self.thickness - half)).max(half);
        position.clamp(half, max)
    }

    fn along(&self, pos: Point) -> i32 {
        match self.orientation {
            Orientation::Horizontal => pos.x,
            Orientation::Vertical => pos.y,
        }
    }

    /// Check if `pos` lies on the gutter.
    pub fn is_on_gutter(&self, pos: Point) -> bool {
        let half = self.thickness / 2;
        (self.along(pos) - self.split_position).abs() <= half
            && Rect::from_size(self.base.size()).contains(pos)
    }

    fn resize_cursor(&self) -> CursorShape {
        match self.orientation {
            Orientation::Horizontal => CursorShape::SizeWE,
            Orientation::Vertical => CursorShape::SizeNS,
        }
    }

    fn drag_to(&mut self, drag: &Drag, pos: Point, cx: &mut EventCx<'_>) {
        let DragKind::SplitGutter { split_at_grab } = drag.kind else {
            return;
        };
        let delta = self.along(drag.delta(pos));
        if self.set_split_position(split_at_grab + delta) {
            tracing::trace!(
                target: targets::LAYOUT,
                split = self.split_position,
                "splitter gutter moved"
            );
            cx.request_relayout();
        }
        cx.set_cursor(self.resize_cursor());
    }
}

impl Widget for Splitter {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn default_layout(&self) -> Option<LayoutKind> {
        Some(LayoutKind::Manual)
    }

    fn child_rects(&self) -> Option<Vec<Rect>> {
        let size = self.base.size();
        let half = self.thickness / 2;
        let first_end = (self.split_position - half).max(0);
        let second_start = self.split_position + (self.thickness - half);
        let rects = match self.orientation {
            Orientation::Horizontal => vec![
                Rect::new(0, 0, first_end, size.height),
                Rect::new(second_start, 0, (size.width - second_start).max(0), size.height),
            ],
            Orientation::Vertical => vec![
                Rect::new(0, 0, size.width, first_end),
                Rect::new(0, second_start, size.width, (size.height - second_start).max(0)),
            ],
        };
        Some(rects)
    }

    fn on_size_set(&mut self) {
        self.split_position = self.clamp_split(self.split_position);
    }

    fn handle_event(&mut self, event: &Event, cx: &mut EventCx<'_>) -> bool {
        let Event::Mouse(mouse) = event else {
            return false;
        };
        if !self.is_on_gutter(mouse.pos) {
            return false;
        }
        if mouse.pressed && mouse.button == MouseButton::Left {
            cx.grab_mouse(
                DragKind::SplitGutter {
                    split_at_grab: self.split_position,
                },
                mouse.pos,
            );
        }
        cx.set_cursor(self.resize_cursor());
        true
    }

    fn drag(&mut self, drag: &Drag, pos: Point, cx: &mut EventCx<'_>) {
        self.drag_to(drag, pos, cx);
    }

    fn ungrab(&mut self, drag: &Drag, pos: Point, cx: &mut EventCx<'_>) {
        self.drag_to(drag, pos, cx);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use ourwin_render::MonospaceShaper;

    use super::*;

    #[test]
    fn test_pane_rects_follow_split() {
        let splitter = Splitter::new(Rect::new(0, 0, 400, 300), Orientation::Horizontal, 4)
            .with_split_position(200);
        let rects = splitter.child_rects().unwrap();
        assert_eq!(rects[0], Rect::new(0, 0, 198, 300));
        assert_eq!(rects[1], Rect::new(202, 0, 198, 300));
    }

    #[test]
    fn test_split_position_is_clamped() {
        let mut splitter = Splitter::new(Rect::new(0, 0, 100, 50), Orientation::Vertical, 6);
        assert_eq!(splitter.split_position(), 25);
        splitter.set_split_position(-40);
        assert_eq!(splitter.split_position(), 3);
        splitter.set_split_position(500);
        assert_eq!(splitter.split_position(), 47);
        let rects = splitter.child_rects().unwrap();
        assert_eq!(rects[1].height(), 0);
    }

    #[test]
    fn test_narrower_than_gutter_keeps_panes_empty() {
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            let splitter = Splitter::new(Rect::new(0, 0, 2, 2), orientation, 4);
            let rects = splitter.child_rects().unwrap();
            for rect in rects {
                assert!(rect.width() >= 0 && rect.height() >= 0, "{rect:?}");
            }
        }
    }

    #[test]
    fn test_install_lays_out_panes() {
        let mut tree = WidgetTree::new(Rc::new(MonospaceShaper::new(8, 16)));
        let root = tree.insert(Container::new(Rect::new(0, 0, 500, 500)));
        let splitter = Splitter::new(Rect::new(50, 50, 400, 200), Orientation::Horizontal, 4);
        let panes = Splitter::install(&mut tree, root, splitter).unwrap();

        assert_eq!(tree.rect(panes.one), Some(Rect::new(0, 0, 198, 200)));
        assert_eq!(tree.rect(panes.two), Some(Rect::new(202, 0, 198, 200)));

        tree.set_width(panes.splitter, 300);
        assert_eq!(tree.rect(panes.two), Some(Rect::new(202, 0, 98, 200)));
    }
}
