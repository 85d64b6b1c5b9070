//! The widget trait.
//!
//! Every widget kind implements [`Widget`]. The trait is deliberately small:
//! sizing hooks for the layouts, painting hooks for the redraw pass, and the
//! event hooks the window calls during routing. Everything that crosses
//! widget boundaries (focus, mouse grabs, popups, cursor changes) goes
//! through the [`EventCx`] handed to the event hooks.

use ourwin_render::{Point, Rect};

use super::context::EventCx;
use super::events::Event;
use super::layout::LayoutKind;
use super::mouse::Drag;
use super::base::WidgetBase;

/// Behavior shared by all widget kinds.
pub trait Widget {
    /// Shared widget state.
    fn base(&self) -> &WidgetBase;

    /// Shared widget state, mutably.
    fn base_mut(&mut self) -> &mut WidgetBase;

    // =========================================================================
    // Size negotiation
    // =========================================================================

    /// Width this widget would take if packed.
    ///
    /// Containers with a layout are measured by the layout instead; this is
    /// only consulted for leaves and layout-less composites.
    fn width_packed(&self) -> i32 {
        self.base().size().width
    }

    /// Height this widget would take if packed.
    fn height_packed(&self) -> i32 {
        self.base().size().height
    }

    /// Whether a layout may stretch this widget horizontally.
    fn can_hfill(&self) -> bool {
        true
    }

    /// Whether a layout may stretch this widget vertically.
    fn can_vfill(&self) -> bool {
        true
    }

    /// Whether the widget accepts keyboard focus.
    fn focusable(&self) -> bool {
        false
    }

    /// Layout installed when the widget is inserted.
    ///
    /// Returning `Some` makes the widget a container that accepts children.
    fn default_layout(&self) -> Option<LayoutKind> {
        None
    }

    /// Child rectangles derived by the widget itself, in child order.
    ///
    /// Composites that position their own children (a splitter's panes)
    /// return `Some`; the tree applies the rectangles instead of running the
    /// layout.
    fn child_rects(&self) -> Option<Vec<Rect>> {
        None
    }

    /// Called after the widget's size changed.
    fn on_size_set(&mut self) {}

    // =========================================================================
    // Painting
    // =========================================================================

    /// Paint the widget's own content, before children are composited.
    fn paint(&mut self) {
        self.base_mut().clear_background();
    }

    /// Paint on top of the composited children.
    fn paint_over(&mut self) {}

    // =========================================================================
    // Events
    // =========================================================================

    /// Handle an event. Mouse positions are local to this widget.
    ///
    /// Returns `true` if the event was consumed; unhandled mouse events
    /// bubble to the parent.
    fn handle_event(&mut self, _event: &Event, _cx: &mut EventCx<'_>) -> bool {
        false
    }

    /// Pointer moved while this widget holds the mouse grab.
    ///
    /// `pos` is local to this widget, in the same space as `drag.origin`.
    fn drag(&mut self, _drag: &Drag, _pos: Point, _cx: &mut EventCx<'_>) {}

    /// The button was released while this widget held the mouse grab.
    fn ungrab(&mut self, _drag: &Drag, _pos: Point, _cx: &mut EventCx<'_>) {}
}
