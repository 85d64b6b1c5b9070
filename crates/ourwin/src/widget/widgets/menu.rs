//! Menu bar, menu items and popup menus.
//!
//! A [`MenuBar`] is a horizontal strip of [`MenuItem`]s. A [`PopupMenu`] is
//! a vertical stack of items that lives as a floating root in the widget
//! tree and is shown by pushing it on the window's popup stack.
//!
//! An item either carries a submenu or is a leaf:
//!
//! - pressing an item with a submenu opens the submenu below the item when
//!   the item sits in a menu bar, and to its right otherwise
//! - pressing a leaf emits [`MenuItem::triggered`] and closes every popup
//!
//! # Example
//!
//! ```ignore
//! use ourwin::widget::widgets::{MenuBar, MenuItem, PopupMenu};
//!
//! let bar = tree.add_child(root, MenuBar::new())?;
//! let file_menu = tree.insert(PopupMenu::new());
//! let quit = MenuItem::new(tree.shaper(), "Quit");
//! quit.triggered.connect(|()| std::process::exit(0));
//! tree.add_child(file_menu, quit)?;
//! tree.add_child(bar, MenuItem::new(tree.shaper(), "File").with_submenu(file_menu))?;
//! ```

use ourwin_core::logging::targets;
use ourwin_core::{Signal, WidgetId};
use ourwin_render::{Color, Rect, SharedShaper, Size, TextAlign, TextLayout};

use crate::widget::base::{Style, WidgetBase};
use crate::widget::context::{EventCx, PopupAnchor};
use crate::widget::events::{Event, MouseButton};
use crate::widget::layout::{Alignment, BoxLayout, LayoutKind, Sizing};
use crate::widget::traits::Widget;

/// Padding around item captions.
const ITEM_PADDING: i32 = 4;

// =============================================================================
// MenuBar
// =============================================================================

/// A horizontal strip of menu items.
///
/// The bar is never stretched horizontally by its parent's layout; it keeps
/// the width of its items.
#[derive(Debug)]
pub struct MenuBar {
    base: WidgetBase,
}

impl MenuBar {
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(Rect::ZERO, Style::container()),
        }
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for MenuBar {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn can_hfill(&self) -> bool {
        false
    }

    fn default_layout(&self) -> Option<LayoutKind> {
        Some(LayoutKind::Box(
            BoxLayout::horizontal().with_vertical(Alignment::Start, Sizing::Fill),
        ))
    }
}

// =============================================================================
// PopupMenu
// =============================================================================

/// A vertical stack of menu items shown above the window content.
///
/// Insert it as a floating root with [`WidgetTree::insert`] and hand its
/// handle to a [`MenuItem`] or to [`Window::add_popup`]. Its items share the
/// width of the widest one.
///
/// [`WidgetTree::insert`]: crate::widget::WidgetTree::insert
/// [`Window::add_popup`]: crate::window::Window::add_popup
#[derive(Debug)]
pub struct PopupMenu {
    base: WidgetBase,
}

impl PopupMenu {
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(Rect::ZERO, Style::popup()),
        }
    }
}

impl Default for PopupMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for PopupMenu {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn default_layout(&self) -> Option<LayoutKind> {
        Some(LayoutKind::Box(
            BoxLayout::vertical().with_horizontal(Alignment::Start, Sizing::Justify),
        ))
    }

    fn paint(&mut self) {
        self.base.clear_background();
        self.base.draw_border();
    }

    fn handle_event(&mut self, event: &Event, _cx: &mut EventCx<'_>) -> bool {
        // Presses on the border or padding must not fall through to the
        // window content below.
        matches!(event, Event::Mouse(_))
    }
}

// =============================================================================
// MenuItem
// =============================================================================

/// An entry in a menu bar or popup menu.
#[derive(Debug)]
pub struct MenuItem {
    /// Widget base for common functionality.
    base: WidgetBase,

    /// The caption and its cached metrics.
    caption: TextLayout,

    /// Popup opened by this item, if any.
    submenu: Option<WidgetId>,

    /// Signal emitted when a leaf item is activated.
    pub triggered: Signal<()>,
}

impl MenuItem {
    pub fn new(shaper: SharedShaper, caption: impl Into<String>) -> Self {
        let caption = TextLayout::new(shaper, caption);
        let size = Size::new(
            caption.size().width + 2 * ITEM_PADDING,
            caption.size().height + 2 * ITEM_PADDING,
        );
        Self {
            base: WidgetBase::new(Rect::from_size(size), Style::default()),
            caption,
            submenu: None,
            triggered: Signal::new(),
        }
    }

    /// Attach a popup menu using builder pattern.
    pub fn with_submenu(mut self, popup: WidgetId) -> Self {
        self.submenu = Some(popup);
        self
    }

    pub fn set_submenu(&mut self, popup: Option<WidgetId>) {
        self.submenu = popup;
    }

    pub fn submenu(&self) -> Option<WidgetId> {
        self.submenu
    }

    pub fn text(&self) -> &str {
        self.caption.text()
    }

    /// Activate the item as if it had been clicked.
    fn activate(&self, cx: &mut EventCx<'_>) {
        match self.submenu {
            Some(popup) => {
                let in_bar = cx
                    .tree()
                    .parent(cx.widget_id())
                    .is_some_and(|parent| cx.tree().get_as::<MenuBar>(parent).is_ok());
                let anchor = if in_bar {
                    PopupAnchor::Below
                } else {
                    PopupAnchor::Right
                };
                tracing::debug!(
                    target: targets::POPUP,
                    caption = self.caption.text(),
                    ?anchor,
                    "opening submenu"
                );
                cx.open_popup(popup, anchor);
            }
            None => {
                tracing::debug!(target: targets::POPUP, caption = self.caption.text(), "menu item triggered");
                self.triggered.emit(());
                cx.close_popups();
            }
        }
    }
}

impl Widget for MenuItem {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn width_packed(&self) -> i32 {
        self.caption.size().width + 2 * ITEM_PADDING
    }

    fn height_packed(&self) -> i32 {
        self.caption.size().height + 2 * ITEM_PADDING
    }

    fn paint(&mut self) {
        self.base.clear_background();
        let rect = Rect::from_size(self.base.size()).inset(ITEM_PADDING);
        self.caption
            .draw_in_rect(self.base.surface_mut(), rect, TextAlign::Left, Color::BLACK);
    }

    fn handle_event(&mut self, event: &Event, cx: &mut EventCx<'_>) -> bool {
        match event {
            Event::Mouse(mouse) if mouse.pressed && mouse.button == MouseButton::Left => {
                self.activate(cx);
                true
            }
            _ => false,
        }
    }
}
