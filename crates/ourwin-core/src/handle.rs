//! Stable handles for widgets and windows.
//!
//! Widgets live in an arena owned by their window. Parents, focus holders,
//! mouse grabs and popup stacks all refer to widgets through a [`WidgetId`]
//! rather than a reference, so a stale handle simply fails to resolve.

use slotmap::new_key_type;

new_key_type! {
    /// Handle of a widget inside its window's arena.
    ///
    /// A `WidgetId` stays valid until the widget is removed. Looking up a
    /// removed widget yields `None` instead of touching freed memory.
    pub struct WidgetId;

    /// Handle of a window registered with a manager.
    pub struct WindowId;
}

static_assertions::assert_impl_all!(WidgetId: Copy, Send, Sync, Ord, std::hash::Hash);
static_assertions::assert_impl_all!(WindowId: Copy, Send, Sync);
