//! Label widget for static text.
//!
//! # Example
//!
//! ```ignore
//! use ourwin::widget::widgets::Label;
//! use ourwin::render::TextAlign;
//!
//! let label = Label::new(tree.shaper(), "Name:")
//!     .with_alignment(TextAlign::Right);
//! let id = tree.add_child(form, label)?;
//! ```

use ourwin_render::{Color, Rect, SharedShaper, Size, TextAlign, TextLayout};

use crate::widget::base::{Style, WidgetBase};
use crate::widget::traits::Widget;

/// A widget that displays one line of text.
///
/// A label packs to its caption plus its frame. It never takes focus and
/// ignores input, so mouse events over it bubble to its parent.
#[derive(Debug)]
pub struct Label {
    /// Widget base for common functionality.
    base: WidgetBase,

    /// The caption and its cached metrics.
    caption: TextLayout,

    /// Horizontal placement of the caption in the content area.
    alignment: TextAlign,

    /// Caption color.
    text_color: Color,
}

impl Label {
    /// Create a label sized to its text.
    pub fn new(shaper: SharedShaper, text: impl Into<String>) -> Self {
        let caption = TextLayout::new(shaper, text);
        let style = Style::default();
        let size = packed_size(&caption, &style);
        Self {
            base: WidgetBase::new(Rect::from_size(size), style),
            caption,
            alignment: TextAlign::Left,
            text_color: Color::BLACK,
        }
    }

    /// Set the caption alignment using builder pattern.
    pub fn with_alignment(mut self, alignment: TextAlign) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the caption color using builder pattern.
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Set the style using builder pattern. The label is resized to fit.
    pub fn with_style(mut self, style: Style) -> Self {
        self.base.set_style(style);
        self.base.resize(packed_size(&self.caption, &style));
        self
    }

    /// Pack to `size` regardless of the caption.
    pub fn with_preferred_size(mut self, size: Size) -> Self {
        self.base.set_preferred_size(Some(size));
        self
    }

    pub fn text(&self) -> &str {
        self.caption.text()
    }

    /// Replace the caption. Returns `true` if it changed.
    ///
    /// The label keeps its current size; the owning layout re-packs it on
    /// the next redraw.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let changed = self.caption.set_text(text);
        if changed {
            self.base.mark_dirty();
        }
        changed
    }

    pub fn alignment(&self) -> TextAlign {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: TextAlign) {
        if self.alignment != alignment {
            self.alignment = alignment;
            self.base.mark_dirty();
        }
    }
}

fn packed_size(caption: &TextLayout, style: &Style) -> Size {
    let frame = 2 * style.frame_extent();
    Size::new(caption.size().width + frame, caption.size().height + frame)
}

impl Widget for Label {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn width_packed(&self) -> i32 {
        packed_size(&self.caption, self.base.style()).width
    }

    fn height_packed(&self) -> i32 {
        packed_size(&self.caption, self.base.style()).height
    }

    fn paint(&mut self) {
        self.base.clear_background();
        self.base.draw_border();
        let content = self.base.content_rect();
        self.caption
            .draw_in_rect(self.base.surface_mut(), content, self.alignment, self.text_color);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use ourwin_render::{MonospaceShaper, Surface};

    use super::*;

    fn shaper() -> SharedShaper {
        Rc::new(MonospaceShaper::new(8, 16))
    }

    #[test]
    fn test_label_packs_to_caption_and_frame() {
        let label = Label::new(shaper(), "abc").with_style(Style::button());
        assert_eq!(label.width_packed(), 3 * 8 + 6);
        assert_eq!(label.height_packed(), 16 + 6);
        assert_eq!(label.base().size(), Size::new(30, 22));
    }

    #[test]
    fn test_label_set_text_reports_change() {
        let mut label = Label::new(shaper(), "a");
        label.base_mut().clear_dirty();
        assert!(!label.set_text("a"));
        assert!(!label.base().is_dirty());
        assert!(label.set_text("ab"));
        assert!(label.base().is_dirty());
        assert_eq!(label.width_packed(), 16);
    }

    #[test]
    fn test_label_paints_caption() {
        let mut label = Label::new(shaper(), "x");
        label.paint();
        let surface = label.base().surface();
        assert_eq!(surface.pixel(0, 0), Some(Color::gray(196)));
        assert_eq!(surface.pixel(4, 8), Some(Color::BLACK));
    }
}
