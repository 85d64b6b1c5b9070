//! Stacking layout.
//!
//! [`BoxLayout`] places children one after another along its orientation
//! (the stacking axis) and aligns them on the perpendicular (cross) axis.
//! Each axis has its own [`AxisPolicy`].
//!
//! # Algorithm
//!
//! 1. Resolve every child's size on both axes from the sizing policies.
//!    Applying a size may re-run a child container's own layout.
//! 2. Walk the children in order along the stacking axis. The walk starts
//!    at an offset given by the stacking alignment and advances by each
//!    child's extent plus the container's inter-child padding. Cross-axis
//!    positions come from the cross alignment.
//! 3. Report whether any child rectangle changed.
//!
//! With [`Sizing::Fill`] on the stacking axis, the space left after every
//! child's packed extent and the paddings is split evenly among children that
//! can fill; the integer remainder goes one pixel at a time to the first of
//! them, so the block exactly covers the content extent.

use ourwin_core::WidgetId;
use ourwin_core::logging::targets;
use ourwin_render::{Point, Size};

use super::{Alignment, AxisPolicy, Orientation, Sizing};
use crate::widget::tree::WidgetTree;

/// Children stacked along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxLayout {
    orientation: Orientation,
    horizontal: AxisPolicy,
    vertical: AxisPolicy,
}

impl Default for BoxLayout {
    fn default() -> Self {
        Self::vertical()
    }
}

impl BoxLayout {
    /// Create a layout stacking along `orientation`, packing and
    /// start-aligning on both axes.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            horizontal: AxisPolicy::default(),
            vertical: AxisPolicy::default(),
        }
    }

    /// Children side by side, left to right.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// Children stacked top to bottom.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Set the horizontal alignment and sizing.
    pub fn with_horizontal(mut self, alignment: Alignment, sizing: Sizing) -> Self {
        self.horizontal = AxisPolicy::new(alignment, sizing);
        self
    }

    /// Set the vertical alignment and sizing.
    pub fn with_vertical(mut self, alignment: Alignment, sizing: Sizing) -> Self {
        self.vertical = AxisPolicy::new(alignment, sizing);
        self
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Policy for one axis.
    #[inline]
    pub fn policy(&self, axis: Orientation) -> AxisPolicy {
        match axis {
            Orientation::Horizontal => self.horizontal,
            Orientation::Vertical => self.vertical,
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Extent the container would take along `axis` if packed.
    pub(crate) fn packed_extent(&self, tree: &WidgetTree, container: WidgetId, axis: Orientation) -> i32 {
        let Some(base) = tree.base(container) else {
            return 0;
        };
        let frame = base.style().frame_extent();
        let inter = base.style().inter_padding;
        let children = tree.children(container);
        if children.is_empty() {
            return 2 * frame;
        }

        let natural: Vec<i32> = children
            .iter()
            .map(|&child| self.natural_extent(tree, child, axis))
            .collect();
        let largest = natural.iter().copied().max().unwrap_or(0);

        let content = if axis == self.orientation {
            let n = natural.len() as i32;
            let sum = match self.policy(axis).sizing {
                Sizing::Justify => largest * n,
                _ => natural.iter().sum(),
            };
            sum + inter * (n - 1)
        } else {
            largest
        };
        content + 2 * frame
    }

    fn natural_extent(&self, tree: &WidgetTree, child: WidgetId, axis: Orientation) -> i32 {
        match self.policy(axis).sizing {
            Sizing::None => tree.rect(child).map(|r| along(r.size, axis)).unwrap_or(0),
            _ => packed(tree, child, axis),
        }
    }

    // =========================================================================
    // Arrangement
    // =========================================================================

    /// Arrange the children of `container`.
    pub(crate) fn rearrange(&self, tree: &mut WidgetTree, container: WidgetId) -> bool {
        let Some(base) = tree.base(container) else {
            return false;
        };
        let size = base.size();
        let frame = base.style().frame_extent();
        let inter = base.style().inter_padding;
        let children: Vec<WidgetId> = tree.children(container).to_vec();
        if children.is_empty() {
            return false;
        }

        let primary = self.orientation;
        let cross = primary.cross();
        let content_primary = (along(size, primary) - 2 * frame).max(0);
        let content_cross = (along(size, cross) - 2 * frame).max(0);

        let primary_sizes = self.resolve_sizes(tree, &children, primary, content_primary, inter);
        let cross_sizes = self.resolve_sizes(tree, &children, cross, content_cross, inter);

        let mut changed = false;
        for (i, &child) in children.iter().enumerate() {
            let size = compose_size(primary, primary_sizes[i], cross_sizes[i]);
            changed |= tree.set_size(child, size);
        }

        let n = children.len() as i32;
        let total: i32 = primary_sizes.iter().sum::<i32>() + inter * (n - 1);
        let leftover = content_primary - total;
        let mut offset = frame
            + match self.policy(primary).alignment {
                Alignment::None | Alignment::Start => 0,
                Alignment::Center => leftover / 2,
                Alignment::End => leftover,
            };

        for (i, &child) in children.iter().enumerate() {
            let current = tree.rect(child).map(|r| along_point(r.origin, cross)).unwrap_or(0);
            let cross_pos = match self.policy(cross).alignment {
                Alignment::None => current,
                Alignment::Start => frame,
                Alignment::Center => frame + (content_cross - cross_sizes[i]) / 2,
                Alignment::End => frame + content_cross - cross_sizes[i],
            };
            changed |= tree.set_position(child, compose_point(primary, offset, cross_pos));
            offset += primary_sizes[i] + inter;
        }

        tracing::trace!(
            target: targets::LAYOUT,
            ?container,
            ?primary,
            children = children.len(),
            changed,
            "box layout rearranged"
        );
        changed
    }

    /// Sizes of every child along `axis`.
    fn resolve_sizes(
        &self,
        tree: &WidgetTree,
        children: &[WidgetId],
        axis: Orientation,
        content: i32,
        inter: i32,
    ) -> Vec<i32> {
        let packed: Vec<i32> = children.iter().map(|&c| packed(tree, c, axis)).collect();
        let stacking = axis == self.orientation;

        match self.policy(axis).sizing {
            Sizing::None => children
                .iter()
                .map(|&c| tree.rect(c).map(|r| along(r.size, axis)).unwrap_or(0))
                .collect(),
            Sizing::Pack => packed,
            Sizing::Justify => {
                let largest = packed.iter().copied().max().unwrap_or(0);
                vec![largest; children.len()]
            }
            Sizing::Fill if !stacking => children
                .iter()
                .zip(&packed)
                .map(|(&c, &p)| if tree.can_fill(c, axis) { content } else { p })
                .collect(),
            Sizing::Fill => {
                let eligible: Vec<bool> = children.iter().map(|&c| tree.can_fill(c, axis)).collect();
                let fillers = eligible.iter().filter(|&&e| e).count() as i32;
                if fillers == 0 {
                    return packed;
                }

                let n = children.len() as i32;
                let used: i32 = packed.iter().sum::<i32>() + inter * (n - 1);
                let extra = (content - used).max(0);
                let share = extra / fillers;
                let mut remainder = extra % fillers;

                packed
                    .iter()
                    .zip(&eligible)
                    .map(|(&p, &can_fill)| {
                        if !can_fill {
                            return p;
                        }
                        let bonus = if remainder > 0 {
                            remainder -= 1;
                            1
                        } else {
                            0
                        };
                        p + share + bonus
                    })
                    .collect()
            }
        }
    }
}

fn packed(tree: &WidgetTree, child: WidgetId, axis: Orientation) -> i32 {
    match axis {
        Orientation::Horizontal => tree.width_packed(child),
        Orientation::Vertical => tree.height_packed(child),
    }
}

#[inline]
fn along(size: Size, axis: Orientation) -> i32 {
    match axis {
        Orientation::Horizontal => size.width,
        Orientation::Vertical => size.height,
    }
}

#[inline]
fn along_point(point: Point, axis: Orientation) -> i32 {
    match axis {
        Orientation::Horizontal => point.x,
        Orientation::Vertical => point.y,
    }
}

#[inline]
fn compose_size(primary: Orientation, on_axis: i32, cross: i32) -> Size {
    match primary {
        Orientation::Horizontal => Size::new(on_axis, cross),
        Orientation::Vertical => Size::new(cross, on_axis),
    }
}

#[inline]
fn compose_point(primary: Orientation, on_axis: i32, cross: i32) -> Point {
    match primary {
        Orientation::Horizontal => Point::new(on_axis, cross),
        Orientation::Vertical => Point::new(cross, on_axis),
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use ourwin_render::{MonospaceShaper, Rect};

    use super::*;
    use crate::widget::base::Style;
    use crate::widget::layout::LayoutKind;
    use crate::widget::widgets::{Container, Label};

    fn tree() -> WidgetTree {
        WidgetTree::new(Rc::new(MonospaceShaper::new(8, 16)))
    }

    fn sized_child(tree: &mut WidgetTree, parent: WidgetId, w: i32, h: i32) -> WidgetId {
        let label = Label::new(tree.shaper(), "").with_preferred_size(Size::new(w, h));
        tree.add_child(parent, label).expect("parent is a container")
    }

    fn container(tree: &mut WidgetTree, layout: BoxLayout, w: i32, h: i32) -> WidgetId {
        let id = tree.insert(Container::new(Rect::new(0, 0, w, h)));
        tree.set_layout(id, LayoutKind::Box(layout)).expect("container");
        id
    }

    #[test]
    fn test_box_layout_fill_column() {
        let mut tree = tree();
        let layout = BoxLayout::vertical().with_vertical(Alignment::Start, Sizing::Fill);
        let c = container(&mut tree, layout, 50, 120);
        let kids = [
            sized_child(&mut tree, c, 10, 10),
            sized_child(&mut tree, c, 10, 20),
            sized_child(&mut tree, c, 10, 30),
        ];

        tree.rearrange(c);

        let heights: Vec<i32> = kids.iter().map(|&k| tree.rect(k).unwrap().height()).collect();
        assert_eq!(heights, vec![30, 40, 50]);
        assert_eq!(tree.rect(kids[1]).unwrap().y(), 30);
        assert_eq!(tree.rect(kids[2]).unwrap().y(), 70);
    }

    #[test]
    fn test_box_layout_fill_distributes_remainder() {
        let mut tree = tree();
        let layout = BoxLayout::horizontal().with_horizontal(Alignment::Start, Sizing::Fill);
        let c = container(&mut tree, layout, 100, 20);
        tree.update_base(c, |b| {
            b.set_style(Style::container().with_border_padding(2).with_inter_padding(3))
        });
        let kids: Vec<WidgetId> = (0..3).map(|_| sized_child(&mut tree, c, 0, 10)).collect();

        tree.rearrange(c);

        let widths: Vec<i32> = kids.iter().map(|&k| tree.rect(k).unwrap().width()).collect();
        // 100 - 2*2 frame - 2*3 padding = 90
        assert_eq!(widths.iter().sum::<i32>() + 2 * 3, 96);
        assert_eq!(widths, vec![30, 30, 30]);

        tree.set_width(c, 101);
        let widths: Vec<i32> = kids.iter().map(|&k| tree.rect(k).unwrap().width()).collect();
        assert_eq!(widths, vec![31, 30, 30]);
        let last = tree.rect(kids[2]).unwrap();
        assert_eq!(last.right(), 101 - 2);
    }

    #[test]
    fn test_box_layout_rearrange_is_idempotent() {
        let mut tree = tree();
        let layout = BoxLayout::vertical()
            .with_vertical(Alignment::Center, Sizing::Justify)
            .with_horizontal(Alignment::End, Sizing::Pack);
        let c = container(&mut tree, layout, 80, 80);
        sized_child(&mut tree, c, 10, 5);
        sized_child(&mut tree, c, 20, 15);

        let first = tree.rearrange(c);
        let snapshot: Vec<Rect> = tree.children(c).iter().map(|&k| tree.rect(k).unwrap()).collect();
        let second = tree.rearrange(c);
        let again: Vec<Rect> = tree.children(c).iter().map(|&k| tree.rect(k).unwrap()).collect();

        assert!(first);
        assert!(!second);
        assert_eq!(snapshot, again);
    }

    #[test]
    fn test_box_layout_alignment_end_and_center() {
        let mut tree = tree();
        let layout = BoxLayout::vertical()
            .with_vertical(Alignment::End, Sizing::Pack)
            .with_horizontal(Alignment::Center, Sizing::Pack);
        let c = container(&mut tree, layout, 100, 100);
        let a = sized_child(&mut tree, c, 20, 10);
        let b = sized_child(&mut tree, c, 40, 30);

        tree.rearrange(c);

        assert_eq!(tree.rect(a).unwrap(), Rect::new(40, 60, 20, 10));
        assert_eq!(tree.rect(b).unwrap(), Rect::new(30, 70, 40, 30));
    }

    #[test]
    fn test_box_layout_cross_fill_respects_opt_out() {
        let mut tree = tree();
        let layout = BoxLayout::vertical().with_horizontal(Alignment::Start, Sizing::Fill);
        let c = container(&mut tree, layout, 90, 90);
        let stretched = sized_child(&mut tree, c, 10, 10);
        let bar = tree
            .add_child(c, crate::widget::widgets::MenuBar::new())
            .expect("container");
        let item = tree
            .add_child(bar, crate::widget::widgets::MenuItem::new(tree.shaper(), "File"))
            .expect("menu bar is a container");

        tree.rearrange(c);

        assert_eq!(tree.rect(stretched).unwrap().width(), 90);
        // menu bars opt out of horizontal fill
        assert_eq!(tree.rect(bar).unwrap().width(), tree.width_packed(bar));
        assert_eq!(tree.rect(item).unwrap().width(), tree.width_packed(item));
        assert!(tree.width_packed(bar) < 90);
    }

    #[test]
    fn test_box_layout_packed_extent() {
        let mut tree = tree();
        let layout = BoxLayout::horizontal();
        let c = container(&mut tree, layout, 0, 0);
        tree.update_base(c, |b| {
            b.set_style(Style::container().with_border_width(1).with_inter_padding(4))
        });
        sized_child(&mut tree, c, 10, 7);
        sized_child(&mut tree, c, 15, 9);

        assert_eq!(tree.width_packed(c), 10 + 4 + 15 + 2);
        assert_eq!(tree.height_packed(c), 9 + 2);
    }
}
