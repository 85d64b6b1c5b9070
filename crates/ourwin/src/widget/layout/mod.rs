//! Layout strategies for containers.
//!
//! A container's children are arranged by the [`LayoutKind`] stored with the
//! container in the widget tree. Layouts are policy only: they hold no
//! widget state, read child sizes through the tree, and write child
//! rectangles back through the tree's sizing operations.
//!
//! # Built-in Layouts
//!
//! - [`LayoutKind::Manual`]: children keep the rectangles they were given
//! - [`BoxLayout`]: children stacked vertically or horizontally, with an
//!   [`Alignment`] and a [`Sizing`] policy on each axis
//!
//! # Contract
//!
//! [`LayoutKind::rearrange`] is idempotent. Running it twice over unchanged
//! inputs leaves every child where it was and reports no change the second
//! time, so callers can skip redundant repaints.

mod box_layout;

pub use box_layout::BoxLayout;

use ourwin_core::WidgetId;

use super::tree::WidgetTree;

/// Stacking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

impl Orientation {
    /// The perpendicular orientation.
    #[inline]
    pub fn cross(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Where the block of children sits along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Leave positions on this axis alone. On the stacking axis this
    /// behaves like [`Alignment::Start`].
    None,
    /// Centered in the leftover space.
    Center,
    /// Against the left or top edge.
    #[default]
    Start,
    /// Against the right or bottom edge.
    End,
}

/// How children are sized along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sizing {
    /// Leave sizes on this axis alone.
    None,
    /// Every child takes its own packed size.
    #[default]
    Pack,
    /// Every child takes the largest packed size among its siblings.
    Justify,
    /// Children share the container's extent. Children that opt out of
    /// filling keep their packed size.
    Fill,
}

/// Alignment and sizing for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AxisPolicy {
    pub alignment: Alignment,
    pub sizing: Sizing,
}

impl AxisPolicy {
    pub const fn new(alignment: Alignment, sizing: Sizing) -> Self {
        Self { alignment, sizing }
    }
}

/// The layout strategy of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutKind {
    /// Children are positioned by hand.
    #[default]
    Manual,
    /// Children are stacked along one axis.
    Box(BoxLayout),
}

impl LayoutKind {
    /// Create a horizontal box layout.
    pub fn horizontal() -> Self {
        Self::Box(BoxLayout::horizontal())
    }

    /// Create a vertical box layout.
    pub fn vertical() -> Self {
        Self::Box(BoxLayout::vertical())
    }

    /// Arrange the container's children. Returns whether any child moved or
    /// changed size.
    pub fn rearrange(&self, tree: &mut WidgetTree, container: WidgetId) -> bool {
        match self {
            LayoutKind::Manual => false,
            LayoutKind::Box(layout) => layout.rearrange(tree, container),
        }
    }

    /// Width the container would take if packed.
    pub fn width_packed(&self, tree: &WidgetTree, container: WidgetId) -> i32 {
        match self {
            LayoutKind::Manual => manual_extent(tree, container, Orientation::Horizontal),
            LayoutKind::Box(layout) => layout.packed_extent(tree, container, Orientation::Horizontal),
        }
    }

    /// Height the container would take if packed.
    pub fn height_packed(&self, tree: &WidgetTree, container: WidgetId) -> i32 {
        match self {
            LayoutKind::Manual => manual_extent(tree, container, Orientation::Vertical),
            LayoutKind::Box(layout) => layout.packed_extent(tree, container, Orientation::Vertical),
        }
    }
}

/// Bounding extent of hand-placed children plus the container's frame.
fn manual_extent(tree: &WidgetTree, container: WidgetId, axis: Orientation) -> i32 {
    let frame = tree
        .base(container)
        .map(|b| b.style().frame_extent())
        .unwrap_or(0);
    let far = tree
        .children(container)
        .iter()
        .filter_map(|&child| tree.rect(child))
        .map(|r| match axis {
            Orientation::Horizontal => r.right(),
            Orientation::Vertical => r.bottom(),
        })
        .max()
        .unwrap_or(frame);
    far + frame
}
