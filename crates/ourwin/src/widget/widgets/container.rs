//! Generic container widget.
//!
//! A container paints its background and border and leaves everything else
//! to its children. Its layout lives in the widget tree; it starts out
//! manual and is changed with [`WidgetTree::set_layout`].
//!
//! [`WidgetTree::set_layout`]: crate::widget::WidgetTree::set_layout

use ourwin_render::Rect;

use crate::widget::base::{Style, WidgetBase};
use crate::widget::layout::LayoutKind;
use crate::widget::traits::Widget;

/// A widget that holds other widgets.
#[derive(Debug)]
pub struct Container {
    base: WidgetBase,
    layout: LayoutKind,
}

impl Container {
    /// Create a container with a manual layout.
    pub fn new(rect: Rect) -> Self {
        Self {
            base: WidgetBase::new(rect, Style::container()),
            layout: LayoutKind::Manual,
        }
    }

    /// Install `layout` when the container is inserted into a tree.
    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.base.set_style(style);
        self
    }
}

impl Widget for Container {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn default_layout(&self) -> Option<LayoutKind> {
        Some(self.layout)
    }

    fn paint(&mut self) {
        self.base.clear_background();
        self.base.draw_border();
    }
}
