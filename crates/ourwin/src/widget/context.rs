//! The context handed to widget event hooks.
//!
//! A widget handling an event cannot reach the window that owns it. It
//! records what it wants on the [`EventCx`] instead: take focus, grab the
//! mouse, open a popup, change the cursor. The window applies these
//! requests in order once the handler returns, which keeps focus and grab
//! changes out of the middle of dispatch.
//!
//! The context also gives access to the rest of the widget tree, so a
//! widget can forward an event to a linked widget (the grid and its formula
//! editor) while it is itself being dispatched.

use ourwin_core::WidgetId;
use ourwin_render::Point;

use super::cursor::CursorShape;
use super::events::Event;
use super::mouse::DragKind;
use super::tree::WidgetTree;
use super::widgets::TextEdit;

/// Where a popup opens relative to the widget that opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAnchor {
    /// Below the widget, left edges aligned (menu bar items).
    Below,
    /// To the right of the widget, top edges aligned (submenu items).
    Right,
}

/// Something a widget asked the window to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Request {
    TakeFocus(WidgetId),
    GrabMouse {
        widget: WidgetId,
        kind: DragKind,
        origin: Point,
    },
    ReleaseMouse(WidgetId),
    OpenPopup {
        popup: WidgetId,
        anchor_widget: WidgetId,
        anchor: PopupAnchor,
    },
    ClosePopups,
    SetCursor(CursorShape),
}

/// Per-dispatch context for a single widget.
pub struct EventCx<'a> {
    tree: &'a mut WidgetTree,
    widget: WidgetId,
    requests: &'a mut Vec<Request>,
    paint: bool,
    relayout: bool,
}

impl<'a> EventCx<'a> {
    pub(crate) fn new(
        tree: &'a mut WidgetTree,
        widget: WidgetId,
        requests: &'a mut Vec<Request>,
    ) -> Self {
        Self {
            tree,
            widget,
            requests,
            paint: false,
            relayout: false,
        }
    }

    /// The widget being dispatched to.
    #[inline]
    pub fn widget_id(&self) -> WidgetId {
        self.widget
    }

    /// Read-only access to the rest of the tree.
    ///
    /// The widget being dispatched to is detached while its hook runs and
    /// does not resolve here.
    #[inline]
    pub fn tree(&self) -> &WidgetTree {
        self.tree
    }

    // =========================================================================
    // Requests to the window
    // =========================================================================

    /// Ask for keyboard focus.
    pub fn take_focus(&mut self) {
        self.requests.push(Request::TakeFocus(self.widget));
    }

    /// Grab the mouse until the button is released.
    ///
    /// `origin` is the press position in this widget's local space.
    pub fn grab_mouse(&mut self, kind: DragKind, origin: Point) {
        self.requests.push(Request::GrabMouse {
            widget: self.widget,
            kind,
            origin,
        });
    }

    /// Release the mouse grab early. A no-op if this widget does not hold it.
    pub fn release_mouse(&mut self) {
        self.requests.push(Request::ReleaseMouse(self.widget));
    }

    /// Open `popup` next to this widget.
    pub fn open_popup(&mut self, popup: WidgetId, anchor: PopupAnchor) {
        self.requests.push(Request::OpenPopup {
            popup,
            anchor_widget: self.widget,
            anchor,
        });
    }

    /// Close every open popup.
    pub fn close_popups(&mut self) {
        self.requests.push(Request::ClosePopups);
    }

    /// Change the mouse cursor.
    pub fn set_cursor(&mut self, shape: CursorShape) {
        self.requests.push(Request::SetCursor(shape));
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Repaint this widget (and its ancestors) on the next redraw.
    #[inline]
    pub fn request_paint(&mut self) {
        self.paint = true;
    }

    /// Re-derive child geometry after the handler returns.
    #[inline]
    pub fn request_relayout(&mut self) {
        self.relayout = true;
    }

    #[inline]
    pub(crate) fn wants_paint(&self) -> bool {
        self.paint
    }

    #[inline]
    pub(crate) fn wants_relayout(&self) -> bool {
        self.relayout
    }

    // =========================================================================
    // Linked widgets
    // =========================================================================

    /// Dispatch `event` to another widget, as if it had been routed there.
    ///
    /// Requests made by the target are queued with this widget's requests.
    pub fn forward(&mut self, target: WidgetId, event: &Event) -> bool {
        if target == self.widget {
            return false;
        }
        self.tree.dispatch(target, event, self.requests)
    }

    /// Current text of an edit field.
    pub fn text_of(&self, target: WidgetId) -> Option<String> {
        self.tree
            .get_as::<TextEdit>(target)
            .ok()
            .map(|edit| edit.text().to_owned())
    }

    /// Replace the text of an edit field and mark it dirty.
    pub fn set_text_of(&mut self, target: WidgetId, text: &str) -> bool {
        self.tree
            .update::<TextEdit, _>(target, |edit| edit.set_text(text))
            .unwrap_or(false)
    }
}
