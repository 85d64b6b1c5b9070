//! Keyboard focus for a widget tree.
//!
//! [`FocusManager`] tracks the single widget of a window that receives key
//! and text events. Focus moves when a widget asks for it through
//! [`EventCx::take_focus`](super::EventCx::take_focus), or by Tab and
//! Shift+Tab navigation.
//!
//! # Tab Order
//!
//! Tab order is the depth-first pre-order of the tree, keeping only
//! focusable widgets: parents before children, siblings in insertion order.

use ourwin_core::WidgetId;
use ourwin_core::logging::targets;

use super::tree::WidgetTree;

/// Tracks which widget holds keyboard focus.
///
/// Only one widget has focus at a time: focusing a widget first clears the
/// focus flag of the previous holder.
#[derive(Debug, Default)]
pub struct FocusManager {
    focused: Option<WidgetId>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The focused widget, if any.
    #[inline]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    #[inline]
    pub fn has_focus(&self, id: WidgetId) -> bool {
        self.focused == Some(id)
    }

    /// Give focus to `id`.
    ///
    /// Returns `false` and leaves focus unchanged if the widget does not
    /// exist or is not focusable.
    pub fn set_focus(&mut self, tree: &mut WidgetTree, id: WidgetId) -> bool {
        if !tree.is_focusable(id) {
            tracing::debug!(target: targets::FOCUS, ?id, "widget cannot take focus");
            return false;
        }
        if self.focused == Some(id) {
            return true;
        }

        if let Some(old) = self.focused.take() {
            tree.update_base(old, |b| b.set_focused(false));
        }
        tree.update_base(id, |b| b.set_focused(true));
        self.focused = Some(id);
        tracing::trace!(target: targets::FOCUS, ?id, "focus changed");
        true
    }

    /// Take focus away from every widget.
    pub fn clear_focus(&mut self, tree: &mut WidgetTree) {
        if let Some(old) = self.focused.take() {
            tree.update_base(old, |b| b.set_focused(false));
        }
    }

    /// Forget the focused widget if it is no longer in the tree.
    pub fn prune(&mut self, tree: &WidgetTree) {
        if self.focused.is_some_and(|id| !tree.contains(id)) {
            self.focused = None;
        }
    }

    /// Move focus to the next widget in tab order, wrapping at the end.
    ///
    /// With nothing focused, the first focusable widget gets focus.
    pub fn focus_next(&mut self, tree: &mut WidgetTree, root: WidgetId) -> bool {
        let order = tree.tab_order(root);
        let next = match self.focused.and_then(|f| order.iter().position(|&id| id == f)) {
            Some(pos) => order.get((pos + 1) % order.len()),
            None => order.first(),
        };
        match next.copied() {
            Some(id) => self.set_focus(tree, id),
            None => false,
        }
    }

    /// Move focus to the previous widget in tab order, wrapping at the start.
    ///
    /// With nothing focused, the last focusable widget gets focus.
    pub fn focus_previous(&mut self, tree: &mut WidgetTree, root: WidgetId) -> bool {
        let order = tree.tab_order(root);
        let prev = match self.focused.and_then(|f| order.iter().position(|&id| id == f)) {
            Some(0) => order.last(),
            Some(pos) => order.get(pos - 1),
            None => order.last(),
        };
        match prev.copied() {
            Some(id) => self.set_focus(tree, id),
            None => false,
        }
    }
}
