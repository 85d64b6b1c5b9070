//! Windows and event routing.
//!
//! A [`Window`] owns a [`WidgetTree`] with one root container, and the three
//! pieces of routing state that decide where input goes:
//!
//! - the focused widget, which receives key and text events
//! - the mouse grab, which receives pointer motion and the next release
//! - the popup stack, which is hit-tested before the window content
//!
//! # Mouse Routing
//!
//! For each mouse event, in order:
//!
//! 1. While a widget holds the grab, motion and releases go to it, in its
//!    own coordinates. A release ends the grab. The grab comes before popup
//!    hit testing, so a release over a popup still ends a drag that began
//!    outside it.
//! 2. Popups are hit-tested from the most recently opened down. A press on a
//!    popup closes the popups opened after it. The event is delivered into
//!    the popup and goes no further.
//! 3. A press that misses every open popup closes them all and is consumed.
//! 4. Otherwise the event descends the tree by hit testing and is delivered
//!    to the deepest widget under the pointer. Unhandled events bubble to
//!    its ancestors, translated into each ancestor's coordinates.
//!
//! Widgets never touch this state directly. They record requests on their
//! [`EventCx`](crate::widget::EventCx); the window applies them after the
//! handler returns, then runs a redraw pass if anything is dirty.
//!
//! # Example
//!
//! ```ignore
//! use ourwin::window::{Window, WindowConfig};
//!
//! let mut window = Window::new(WindowConfig::new("Demo").with_size(400, 300), shaper);
//! let root = window.root();
//! let ok = window.tree_mut().add_child(root, Button::new(window.tree().shaper(), "OK"))?;
//! window.handle_event(&Event::Mouse(MouseEvent::press((10, 10), MouseButton::Left)));
//! ```

mod manager;
mod window_config;

pub use manager::{Manager, Platform};
pub use window_config::WindowConfig;

use ourwin_core::logging::{span_names, targets};
use ourwin_core::{Error, Result, WidgetId};
use ourwin_render::{PixelSurface, Point, Rect, SharedShaper, Size, Surface};

use crate::widget::{
    Container, CursorShape, Drag, Event, FocusManager, Key, MouseEvent, MouseGrab, PopupAnchor,
    Request, Style, WidgetTree,
};

/// A top-level window: a widget tree plus input routing state.
#[derive(Debug)]
pub struct Window {
    title: String,
    tree: WidgetTree,
    root: WidgetId,
    focus: FocusManager,
    grab: Option<MouseGrab>,
    /// Open popups, oldest first.
    popups: Vec<WidgetId>,
    cursor: CursorShape,
    cursor_changed: bool,
    /// Root content with popups composited on top.
    frame: PixelSurface,
    /// The frame must be recomposed even if no widget is dirty.
    frame_stale: bool,
    /// A composed frame is waiting to be presented.
    frame_ready: bool,
}

impl Window {
    /// Create a window with an empty root container.
    pub fn new(config: WindowConfig, shaper: SharedShaper) -> Self {
        let mut tree = WidgetTree::new(shaper);
        let size = config.size();
        let root = tree.insert(
            Container::new(Rect::from_size(size))
                .with_style(Style::container().with_background(config.background())),
        );
        tracing::debug!(target: targets::TREE, title = config.title(), ?size, "window created");
        Self {
            title: config.title().to_owned(),
            tree,
            root,
            focus: FocusManager::new(),
            grab: None,
            popups: Vec::new(),
            cursor: CursorShape::Arrow,
            cursor_changed: false,
            frame: PixelSurface::new(size),
            frame_stale: true,
            frame_ready: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The root container.
    #[inline]
    pub fn root(&self) -> WidgetId {
        self.root
    }

    #[inline]
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    #[inline]
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    pub fn size(&self) -> Size {
        self.tree.rect(self.root).map(|r| r.size).unwrap_or(Size::ZERO)
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// The widget receiving key and text events.
    pub fn focused(&self) -> Option<WidgetId> {
        self.focus.focused()
    }

    /// Give keyboard focus to `id`. Returns `false` if it cannot take focus.
    pub fn set_focus(&mut self, id: WidgetId) -> bool {
        self.focus.set_focus(&mut self.tree, id)
    }

    pub fn clear_focus(&mut self) {
        self.focus.clear_focus(&mut self.tree);
    }

    // =========================================================================
    // Mouse grab
    // =========================================================================

    /// The current mouse grab, if any.
    pub fn grab(&self) -> Option<&MouseGrab> {
        self.grab.as_ref()
    }

    fn set_grab(&mut self, widget: WidgetId, drag: Drag) {
        if let Some(old) = self.grab.take() {
            self.tree.update_base(old.widget, |b| b.set_grabbed(false));
        }
        let offset = self.tree.absolute_origin(widget);
        self.tree.update_base(widget, |b| b.set_grabbed(true));
        self.grab = Some(MouseGrab {
            widget,
            drag,
            offset,
        });
        tracing::trace!(target: targets::EVENT, ?widget, kind = ?drag.kind, "mouse grabbed");
    }

    fn release_grab(&mut self) {
        if let Some(old) = self.grab.take() {
            self.tree.update_base(old.widget, |b| b.set_grabbed(false));
            tracing::trace!(target: targets::EVENT, widget = ?old.widget, "mouse released");
        }
    }

    // =========================================================================
    // Popups
    // =========================================================================

    /// Open popups, oldest first.
    pub fn popups(&self) -> &[WidgetId] {
        &self.popups
    }

    /// Show `popup` with its top-left corner at `pos` in window coordinates.
    ///
    /// The popup must be a floating root of this window's tree. It is packed
    /// to its content and pushed on top of the stack; if it was already open
    /// it moves to the top.
    pub fn add_popup(&mut self, popup: WidgetId, pos: Point) -> Result<()> {
        if !self.tree.contains(popup) {
            return Err(Error::WidgetNotFound(popup));
        }
        if popup == self.root || self.tree.parent(popup).is_some() {
            return Err(Error::NotFloating(popup));
        }
        self.popups.retain(|&p| p != popup);
        self.tree.pack(popup);
        self.tree.set_position(popup, pos);
        self.tree.mark_dirty(popup);
        self.popups.push(popup);
        self.frame_stale = true;
        tracing::debug!(target: targets::POPUP, ?popup, ?pos, depth = self.popups.len(), "popup opened");
        Ok(())
    }

    /// Close `popup` and every popup opened after it.
    pub fn close_popup(&mut self, popup: WidgetId) -> Result<()> {
        let index = self
            .popups
            .iter()
            .position(|&p| p == popup)
            .ok_or(Error::PopupNotFound(popup))?;
        self.truncate_popups(index);
        Ok(())
    }

    /// Close every popup.
    pub fn clear_popups(&mut self) {
        self.truncate_popups(0);
    }

    fn truncate_popups(&mut self, len: usize) {
        if len >= self.popups.len() {
            return;
        }
        tracing::debug!(
            target: targets::POPUP,
            closed = self.popups.len() - len,
            remaining = len,
            "popups closed"
        );
        self.popups.truncate(len);
        self.frame_stale = true;
    }

    fn popup_position(&self, anchor_widget: WidgetId, anchor: PopupAnchor) -> Point {
        let origin = self.tree.absolute_origin(anchor_widget);
        let size = self.tree.rect(anchor_widget).map(|r| r.size).unwrap_or(Size::ZERO);
        match anchor {
            PopupAnchor::Below => origin.offset(0, size.height),
            PopupAnchor::Right => origin.offset(size.width, 0),
        }
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    /// The cursor shape last requested by a widget.
    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    /// Return the cursor shape if it changed since the last call.
    pub fn take_cursor_change(&mut self) -> Option<CursorShape> {
        std::mem::take(&mut self.cursor_changed).then_some(self.cursor)
    }

    fn set_cursor(&mut self, shape: CursorShape) {
        if shape != self.cursor {
            self.cursor = shape;
            self.cursor_changed = true;
        }
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    /// Route one platform event, apply what the widgets asked for, and
    /// redraw if anything became dirty.
    ///
    /// Returns whether some widget handled the event.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let _span = tracing::trace_span!(target: targets::EVENT, span_names::HANDLE_EVENT).entered();
        let mut requests = Vec::new();

        let handled = match event {
            Event::WindowShown => {
                self.tree.mark_dirty(self.root);
                self.frame_stale = true;
                true
            }
            Event::WindowResized { width, height } => {
                let size = Size::new((*width).max(0), (*height).max(0));
                self.tree.set_size(self.root, size);
                self.frame_stale = true;
                true
            }
            Event::Mouse(mouse) => self.route_mouse(mouse, &mut requests),
            Event::Key(key) => {
                let handled = match self.focus.focused() {
                    Some(id) => self.tree.dispatch(id, event, &mut requests),
                    None => false,
                };
                if handled || !key.pressed {
                    handled
                } else {
                    match key.key {
                        Key::Tab if key.modifiers.shift => self.focus.focus_previous(&mut self.tree, self.root),
                        Key::Tab => self.focus.focus_next(&mut self.tree, self.root),
                        Key::Escape if !self.popups.is_empty() => {
                            self.clear_popups();
                            true
                        }
                        _ => false,
                    }
                }
            }
            Event::Text(_) => match self.focus.focused() {
                Some(id) => self.tree.dispatch(id, event, &mut requests),
                None => false,
            },
        };

        self.apply_requests(requests);
        self.focus.prune(&self.tree);
        self.redraw();
        handled
    }

    fn route_mouse(&mut self, mouse: &MouseEvent, requests: &mut Vec<Request>) -> bool {
        if let Some(grab) = self.grab {
            if mouse.released {
                self.release_grab();
                self.tree
                    .dispatch_ungrab(grab.widget, &grab.drag, grab.local(mouse.pos), requests);
                return true;
            }
            if mouse.is_move() {
                self.tree
                    .dispatch_drag(grab.widget, &grab.drag, grab.local(mouse.pos), requests);
                return true;
            }
        }

        let hit_popup = self.popups.iter().rposition(|&p| {
            self.tree.rect(p).is_some_and(|r| r.contains(mouse.pos))
        });
        if let Some(index) = hit_popup {
            if mouse.pressed {
                self.truncate_popups(index + 1);
            }
            let popup = self.popups[index];
            return self.deliver(popup, mouse, requests);
        }
        if mouse.pressed && !self.popups.is_empty() {
            self.clear_popups();
            return true;
        }

        if mouse.is_move() {
            self.set_cursor(CursorShape::Arrow);
        }
        self.deliver(self.root, mouse, requests)
    }

    /// Hit-test down from `top` and dispatch to the deepest widget, bubbling
    /// up to `top` until some widget handles the event.
    fn deliver(&mut self, top: WidgetId, mouse: &MouseEvent, requests: &mut Vec<Request>) -> bool {
        let origin = self.tree.rect(top).map(|r| r.origin).unwrap_or(Point::ZERO);
        let mut path = vec![(top, mouse.pos - origin)];
        let mut current = top;
        let mut local = mouse.pos - origin;
        while let Some(child) = self.tree.find_widget_at(current, local) {
            let child_origin = self.tree.rect(child).map(|r| r.origin).unwrap_or(Point::ZERO);
            local = local - child_origin;
            current = child;
            path.push((current, local));
        }

        for &(id, pos) in path.iter().rev() {
            let event = Event::Mouse(mouse.at(pos));
            if self.tree.dispatch(id, &event, requests) {
                tracing::trace!(target: targets::EVENT, widget = ?id, ?pos, "mouse event handled");
                return true;
            }
        }
        false
    }

    fn apply_requests(&mut self, requests: Vec<Request>) {
        for request in requests {
            match request {
                Request::TakeFocus(id) => {
                    self.focus.set_focus(&mut self.tree, id);
                }
                Request::GrabMouse {
                    widget,
                    kind,
                    origin,
                } => self.set_grab(widget, Drag { kind, origin }),
                Request::ReleaseMouse(id) => {
                    if self.grab.is_some_and(|g| g.widget == id) {
                        self.release_grab();
                    } else {
                        tracing::debug!(target: targets::EVENT, ?id, "release by widget without the grab");
                    }
                }
                Request::OpenPopup {
                    popup,
                    anchor_widget,
                    anchor,
                } => {
                    let pos = self.popup_position(anchor_widget, anchor);
                    if let Err(error) = self.add_popup(popup, pos) {
                        tracing::warn!(target: targets::POPUP, ?popup, %error, "cannot open popup");
                    }
                }
                Request::ClosePopups => self.clear_popups(),
                Request::SetCursor(shape) => self.set_cursor(shape),
            }
        }
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Check if a redraw pass would paint anything.
    pub fn needs_redraw(&self) -> bool {
        self.frame_stale
            || self.tree.is_dirty(self.root)
            || self.popups.iter().any(|&p| self.tree.is_dirty(p))
    }

    /// Lay out and paint dirty widgets, then compose the frame.
    ///
    /// Returns whether the frame changed.
    pub fn redraw(&mut self) -> bool {
        let mut painted = self.tree.redraw(self.root);
        for &popup in &self.popups {
            painted |= self.tree.redraw(popup);
        }
        if !painted && !self.frame_stale {
            return false;
        }

        let size = self.size();
        if self.frame.size() != size {
            self.frame.resize(size);
        }
        if let Some(base) = self.tree.base(self.root) {
            self.frame.copy_from(base.surface(), Point::ZERO, None);
        }
        for &popup in &self.popups {
            if let Some(base) = self.tree.base(popup) {
                self.frame.copy_from(base.surface(), base.position(), None);
            }
        }
        self.frame_stale = false;
        self.frame_ready = true;
        true
    }

    /// The last composed frame.
    pub fn frame(&self) -> &PixelSurface {
        &self.frame
    }

    /// Return `true` once per newly composed frame.
    pub fn take_frame_ready(&mut self) -> bool {
        std::mem::take(&mut self.frame_ready)
    }
}
