//! The widget arena.
//!
//! A [`WidgetTree`] owns every widget of a window. Widgets refer to each
//! other through [`WidgetId`] handles; the tree records each widget's parent,
//! its ordered children and, for containers, its layout. Child order is both
//! paint order (later children are drawn on top) and stacking order for box
//! layouts.
//!
//! Widgets with no parent are roots. A window has one main root and may
//! have any number of floating roots, which is how popup menus are kept:
//! their rectangles are in window coordinates.
//!
//! # Sizing
//!
//! [`set_size`](WidgetTree::set_size) and friends are no-ops when nothing
//! changes. Otherwise they resize the widget's surface, call its
//! `on_size_set` hook, re-arrange its children if it is a container, and
//! mark it and its ancestors dirty.

use ourwin_core::logging::{span_names, targets};
use ourwin_core::{Error, Result, WidgetId};
use ourwin_render::{Point, Rect, SharedShaper, Size, Surface};
use slotmap::SlotMap;

use super::base::WidgetBase;
use super::context::{EventCx, Request};
use super::events::Event;
use super::layout::{LayoutKind, Orientation};
use super::mouse::Drag;
use super::widgets::{WidgetCast, WidgetKind};

struct Node {
    /// `None` while the widget is detached for dispatch.
    widget: Option<WidgetKind>,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    layout: Option<LayoutKind>,
}

/// Arena of widgets belonging to one window.
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, Node>,
    shaper: SharedShaper,
}

impl std::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetTree")
            .field("widgets", &self.nodes.len())
            .finish()
    }
}

impl WidgetTree {
    /// Create an empty tree whose widgets measure text with `shaper`.
    pub fn new(shaper: SharedShaper) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            shaper,
        }
    }

    /// The text shaper shared by this tree's widgets.
    pub fn shaper(&self) -> SharedShaper {
        self.shaper.clone()
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Insert a widget without a parent.
    pub fn insert(&mut self, widget: impl Into<WidgetKind>) -> WidgetId {
        let widget = widget.into();
        let layout = widget.as_widget().default_layout();
        let id = self.nodes.insert(Node {
            widget: Some(widget),
            parent: None,
            children: Vec::new(),
            layout,
        });
        tracing::trace!(target: targets::TREE, ?id, "widget inserted");
        id
    }

    /// Insert a widget as the last child of `parent`.
    pub fn add_child(&mut self, parent: WidgetId, widget: impl Into<WidgetKind>) -> Result<WidgetId> {
        self.check_container(parent)?;
        let id = self.insert(widget);
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Make an existing widget the last child of `parent`, detaching it from
    /// its previous parent.
    pub fn attach(&mut self, parent: WidgetId, child: WidgetId) -> Result<()> {
        self.check_container(parent)?;
        if !self.nodes.contains_key(child) {
            return Err(Error::WidgetNotFound(child));
        }
        if self.ancestors(parent).any(|a| a == child) || parent == child {
            return Err(Error::CyclicParent(child));
        }

        self.detach(child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        self.mark_dirty(parent);
        Ok(())
    }

    /// Remove a widget and its whole subtree.
    pub fn remove(&mut self, id: WidgetId) -> Result<()> {
        if !self.nodes.contains_key(id) {
            return Err(Error::WidgetNotFound(id));
        }
        let parent = self.parent(id);
        self.detach(id);

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
            }
        }
        if let Some(parent) = parent {
            self.mark_dirty(parent);
        }
        Ok(())
    }

    fn detach(&mut self, child: WidgetId) {
        let Some(old_parent) = self.nodes.get_mut(child).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(old_parent) {
            node.children.retain(|&c| c != child);
        }
        self.mark_dirty(old_parent);
    }

    fn check_container(&self, id: WidgetId) -> Result<()> {
        match self.nodes.get(id) {
            None => Err(Error::WidgetNotFound(id)),
            Some(node) if node.layout.is_none() => Err(Error::NotAContainer(id)),
            Some(_) => Ok(()),
        }
    }

    /// Replace a container's layout.
    pub fn set_layout(&mut self, id: WidgetId, layout: LayoutKind) -> Result<()> {
        self.check_container(id)?;
        if let Some(node) = self.nodes.get_mut(id) {
            node.layout = Some(layout);
        }
        self.rearrange(id);
        self.mark_dirty(id);
        Ok(())
    }

    /// The container's layout, or `None` for leaves.
    pub fn layout(&self, id: WidgetId) -> Option<LayoutKind> {
        self.nodes.get(id).and_then(|n| n.layout)
    }

    #[inline]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Children in paint order. Empty for leaves and unknown handles.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Walk from `id`'s parent up to its root.
    pub fn ancestors(&self, id: WidgetId) -> impl Iterator<Item = WidgetId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Check if `id` is `ancestor` or lies below it.
    pub fn is_descendant_of(&self, id: WidgetId, ancestor: WidgetId) -> bool {
        id == ancestor || self.ancestors(id).any(|a| a == ancestor)
    }

    // =========================================================================
    // Widget access
    // =========================================================================

    pub fn get(&self, id: WidgetId) -> Option<&WidgetKind> {
        self.nodes.get(id).and_then(|n| n.widget.as_ref())
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetKind> {
        self.nodes.get_mut(id).and_then(|n| n.widget.as_mut())
    }

    /// Borrow a widget as its concrete kind.
    pub fn get_as<T: WidgetCast>(&self, id: WidgetId) -> Result<&T> {
        let kind = self.get(id).ok_or(Error::WidgetNotFound(id))?;
        T::cast(kind).ok_or(Error::WrongWidgetKind {
            id,
            expected: T::NAME,
        })
    }

    /// Mutably borrow a widget as its concrete kind.
    ///
    /// Prefer [`update`](Self::update), which also marks the widget dirty.
    pub fn get_as_mut<T: WidgetCast>(&mut self, id: WidgetId) -> Result<&mut T> {
        let kind = self.get_mut(id).ok_or(Error::WidgetNotFound(id))?;
        T::cast_mut(kind).ok_or(Error::WrongWidgetKind {
            id,
            expected: T::NAME,
        })
    }

    /// Mutate a widget of a known kind, then mark it and its ancestors dirty.
    pub fn update<T: WidgetCast, R>(&mut self, id: WidgetId, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        let result = f(self.get_as_mut::<T>(id)?);
        self.mark_dirty(id);
        Ok(result)
    }

    pub fn base(&self, id: WidgetId) -> Option<&WidgetBase> {
        self.get(id).map(|w| w.as_widget().base())
    }

    /// Mutate a widget's base state, then mark it and its ancestors dirty.
    pub fn update_base<R>(&mut self, id: WidgetId, f: impl FnOnce(&mut WidgetBase) -> R) -> Option<R> {
        let result = f(self.get_mut(id)?.as_widget_mut().base_mut());
        self.mark_dirty(id);
        Some(result)
    }

    pub fn rect(&self, id: WidgetId) -> Option<Rect> {
        self.base(id).map(WidgetBase::rect)
    }

    pub fn has_focus(&self, id: WidgetId) -> bool {
        self.base(id).is_some_and(WidgetBase::has_focus)
    }

    pub fn is_focusable(&self, id: WidgetId) -> bool {
        self.get(id).is_some_and(|w| w.as_widget().focusable())
    }

    // =========================================================================
    // Dirty tracking
    // =========================================================================

    /// Flag `id` and every ancestor for repaint.
    pub fn mark_dirty(&mut self, id: WidgetId) {
        let mut current = Some(id);
        while let Some(next) = current {
            let Some(node) = self.nodes.get_mut(next) else {
                break;
            };
            if let Some(widget) = node.widget.as_mut() {
                widget.as_widget_mut().base_mut().mark_dirty();
            }
            current = node.parent;
        }
    }

    pub fn is_dirty(&self, id: WidgetId) -> bool {
        self.base(id).is_some_and(WidgetBase::is_dirty)
    }

    // =========================================================================
    // Size negotiation
    // =========================================================================

    /// Width `id` would take if packed.
    pub fn width_packed(&self, id: WidgetId) -> i32 {
        self.packed(id, Orientation::Horizontal)
    }

    /// Height `id` would take if packed.
    pub fn height_packed(&self, id: WidgetId) -> i32 {
        self.packed(id, Orientation::Vertical)
    }

    fn packed(&self, id: WidgetId, axis: Orientation) -> i32 {
        let Some(node) = self.nodes.get(id) else {
            return 0;
        };
        let Some(widget) = node.widget.as_ref().map(WidgetKind::as_widget) else {
            return 0;
        };
        if let Some(preferred) = widget.base().preferred_size() {
            return match axis {
                Orientation::Horizontal => preferred.width,
                Orientation::Vertical => preferred.height,
            };
        }
        match (node.layout, widget.child_rects().is_some(), axis) {
            (Some(layout), false, Orientation::Horizontal) => layout.width_packed(self, id),
            (Some(layout), false, Orientation::Vertical) => layout.height_packed(self, id),
            (_, _, Orientation::Horizontal) => widget.width_packed(),
            (_, _, Orientation::Vertical) => widget.height_packed(),
        }
    }

    /// Whether a layout may stretch `id` along `axis`.
    pub fn can_fill(&self, id: WidgetId, axis: Orientation) -> bool {
        self.get(id).is_some_and(|w| match axis {
            Orientation::Horizontal => w.as_widget().can_hfill(),
            Orientation::Vertical => w.as_widget().can_vfill(),
        })
    }

    /// Resize to the packed size on both axes.
    pub fn pack(&mut self, id: WidgetId) -> bool {
        let size = Size::new(self.width_packed(id), self.height_packed(id));
        self.set_size(id, size)
    }

    /// Resize to the packed width.
    pub fn hpack(&mut self, id: WidgetId) -> bool {
        let width = self.width_packed(id);
        self.set_width(id, width)
    }

    /// Resize to the packed height.
    pub fn vpack(&mut self, id: WidgetId) -> bool {
        let height = self.height_packed(id);
        self.set_height(id, height)
    }

    pub fn set_width(&mut self, id: WidgetId, width: i32) -> bool {
        let Some(rect) = self.rect(id) else {
            return false;
        };
        self.set_size(id, Size::new(width, rect.height()))
    }

    pub fn set_height(&mut self, id: WidgetId, height: i32) -> bool {
        let Some(rect) = self.rect(id) else {
            return false;
        };
        self.set_size(id, Size::new(rect.width(), height))
    }

    /// Resize a widget. Returns `false` if the size was already `size`.
    pub fn set_size(&mut self, id: WidgetId, size: Size) -> bool {
        let Some(widget) = self.get_mut(id) else {
            return false;
        };
        let widget = widget.as_widget_mut();
        if !widget.base_mut().resize(size) {
            return false;
        }
        widget.on_size_set();
        tracing::trace!(target: targets::TREE, ?id, ?size, "widget resized");

        self.rearrange(id);
        self.mark_dirty(id);
        true
    }

    /// Move a widget inside its parent.
    pub fn set_position(&mut self, id: WidgetId, pos: Point) -> bool {
        let Some(widget) = self.get_mut(id) else {
            return false;
        };
        if !widget.as_widget_mut().base_mut().set_position(pos) {
            return false;
        }
        match self.parent(id) {
            Some(parent) => self.mark_dirty(parent),
            None => self.mark_dirty(id),
        }
        true
    }

    /// Move and resize a widget.
    pub fn set_rect(&mut self, id: WidgetId, rect: Rect) -> bool {
        let moved = self.set_position(id, rect.origin);
        let resized = self.set_size(id, rect.size);
        moved || resized
    }

    /// Re-derive the geometry of `id`'s children.
    ///
    /// Composites that position their own children win over the layout.
    /// Returns whether any child moved or changed size.
    pub fn rearrange(&mut self, id: WidgetId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        let own_rects = node.widget.as_ref().and_then(|w| w.as_widget().child_rects());
        if let Some(rects) = own_rects {
            let children = node.children.clone();
            let mut changed = false;
            for (child, rect) in children.into_iter().zip(rects) {
                changed |= self.set_rect(child, rect);
            }
            return changed;
        }
        match node.layout {
            Some(layout) => layout.rearrange(self, id),
            None => false,
        }
    }

    // =========================================================================
    // Hit testing
    // =========================================================================

    /// The child of `id` under `pos`, given in `id`'s local coordinates.
    ///
    /// Children are tested front-most first, so the last-added child wins
    /// where siblings overlap.
    pub fn find_widget_at(&self, id: WidgetId, pos: Point) -> Option<WidgetId> {
        self.children(id)
            .iter()
            .rev()
            .copied()
            .find(|&child| self.rect(child).is_some_and(|r| r.contains(pos)))
    }

    /// Position of `id`'s origin in its root's coordinate space.
    pub fn absolute_origin(&self, id: WidgetId) -> Point {
        let own = self.rect(id).map(|r| r.origin).unwrap_or(Point::ZERO);
        self.ancestors(id)
            .filter_map(|a| self.rect(a))
            .fold(own, |acc, r| acc + r.origin)
    }

    /// Focusable widgets below `root` in depth-first paint order.
    pub fn tab_order(&self, root: WidgetId) -> Vec<WidgetId> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if self.is_focusable(id) {
                order.push(id);
            }
            stack.extend(self.children(id).iter().rev());
        }
        order
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Run `f` on a detached widget with an event context, then reattach it
    /// and apply the invalidation the widget asked for.
    fn with_cx<R>(
        &mut self,
        id: WidgetId,
        requests: &mut Vec<Request>,
        f: impl FnOnce(&mut WidgetKind, &mut EventCx<'_>) -> R,
    ) -> Option<R> {
        let Some(mut widget) = self.nodes.get_mut(id).and_then(|n| n.widget.take()) else {
            tracing::debug!(target: targets::EVENT, ?id, "dispatch to missing or busy widget");
            return None;
        };

        let (result, paint, relayout) = {
            let mut cx = EventCx::new(self, id, requests);
            let result = f(&mut widget, &mut cx);
            (result, cx.wants_paint(), cx.wants_relayout())
        };

        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
        if relayout {
            self.rearrange(id);
        }
        if paint || relayout {
            self.mark_dirty(id);
        }
        Some(result)
    }

    /// Deliver `event` to one widget. Returns whether it was handled.
    pub(crate) fn dispatch(&mut self, id: WidgetId, event: &Event, requests: &mut Vec<Request>) -> bool {
        self.with_cx(id, requests, |w, cx| w.as_widget_mut().handle_event(event, cx))
            .unwrap_or(false)
    }

    /// Deliver grabbed pointer motion.
    pub(crate) fn dispatch_drag(&mut self, id: WidgetId, drag: &Drag, pos: Point, requests: &mut Vec<Request>) {
        self.with_cx(id, requests, |w, cx| w.as_widget_mut().drag(drag, pos, cx));
    }

    /// Deliver the release that ends a grab.
    pub(crate) fn dispatch_ungrab(&mut self, id: WidgetId, drag: &Drag, pos: Point, requests: &mut Vec<Request>) {
        self.with_cx(id, requests, |w, cx| w.as_widget_mut().ungrab(drag, pos, cx));
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Lay out and repaint the dirty part of the subtree at `id`.
    ///
    /// Clean subtrees keep their cached surfaces. Returns whether anything
    /// was painted.
    pub fn redraw(&mut self, id: WidgetId) -> bool {
        if !self.is_dirty(id) {
            return false;
        }
        let _span = tracing::trace_span!(target: targets::TREE, span_names::REDRAW, ?id).entered();

        self.rearrange(id);
        let children = self.children(id).to_vec();

        let Some(widget) = self.get_mut(id) else {
            return false;
        };
        widget.as_widget_mut().paint();

        if !children.is_empty() {
            let mut surface = widget.as_widget_mut().base_mut().take_surface();
            for child in children {
                self.redraw(child);
                if let Some(base) = self.base(child) {
                    surface.copy_from(base.surface(), base.position(), None);
                }
            }
            if let Some(widget) = self.get_mut(id) {
                widget.as_widget_mut().base_mut().restore_surface(surface);
            }
        }

        if let Some(widget) = self.get_mut(id) {
            let widget = widget.as_widget_mut();
            widget.paint_over();
            widget.base_mut().clear_dirty();
        }
        true
    }
}
