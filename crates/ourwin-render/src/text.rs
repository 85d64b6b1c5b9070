//! Text measurement and drawing.
//!
//! Fonts are a backend concern. Widgets only need to know how large a
//! string is, which character sits under a pixel offset and where a caret
//! goes, which is what [`TextShaper`] provides. All indices are grapheme
//! cluster indices, never byte offsets.
//!
//! [`TextLayout`] pairs a string with a shared shaper and caches its size,
//! giving labels, buttons and edit fields a single object to hold.

use std::fmt;
use std::rc::Rc;

use unicode_segmentation::UnicodeSegmentation;

use crate::surface::{PixelSurface, Surface};
use crate::types::{Color, Point, Rect, Size};

/// Measures and draws strings.
pub trait TextShaper {
    /// Pixel size of `text` on one line.
    fn measure(&self, text: &str) -> Size;

    /// Index of the grapheme boundary nearest to pixel offset `x`.
    fn char_index_at(&self, text: &str, x: i32) -> usize;

    /// Pixel offset of the boundary before grapheme `index`.
    fn char_pixel_offset(&self, text: &str, index: usize) -> i32;

    /// Draw `text` with its top-left corner at `origin`.
    fn draw(&self, surface: &mut dyn Surface, text: &str, origin: Point, color: Color);
}

/// Shaper handle shared by every widget of a window.
pub type SharedShaper = Rc<dyn TextShaper>;

/// Number of grapheme clusters in `text`.
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Byte offset of grapheme boundary `index`, clamped to the end of `text`.
pub fn grapheme_byte_offset(text: &str, index: usize) -> usize {
    text.grapheme_indices(true)
        .nth(index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// A fixed-advance shaper.
///
/// Every grapheme is `advance` pixels wide and lines are `line_height`
/// pixels tall. Glyphs are drawn as solid boxes, which is enough for
/// layout, hit testing and tests that inspect pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceShaper {
    advance: i32,
    line_height: i32,
}

impl Default for MonospaceShaper {
    fn default() -> Self {
        Self::new(8, 16)
    }
}

impl MonospaceShaper {
    /// Create a shaper with the given glyph advance and line height.
    pub fn new(advance: i32, line_height: i32) -> Self {
        Self {
            advance: advance.max(1),
            line_height: line_height.max(1),
        }
    }

    #[inline]
    pub fn advance(&self) -> i32 {
        self.advance
    }

    #[inline]
    pub fn line_height(&self) -> i32 {
        self.line_height
    }
}

impl TextShaper for MonospaceShaper {
    fn measure(&self, text: &str) -> Size {
        Size::new(grapheme_count(text) as i32 * self.advance, self.line_height)
    }

    fn char_index_at(&self, text: &str, x: i32) -> usize {
        if x <= 0 {
            return 0;
        }
        let nearest = ((x + self.advance / 2) / self.advance) as usize;
        nearest.min(grapheme_count(text))
    }

    fn char_pixel_offset(&self, text: &str, index: usize) -> i32 {
        index.min(grapheme_count(text)) as i32 * self.advance
    }

    fn draw(&self, surface: &mut dyn Surface, text: &str, origin: Point, color: Color) {
        let inset = (self.advance / 8).max(1);
        for (i, grapheme) in text.graphemes(true).enumerate() {
            if grapheme.chars().all(char::is_whitespace) {
                continue;
            }
            let x = origin.x + i as i32 * self.advance;
            surface.fill_rect(
                Rect::new(
                    x + inset,
                    origin.y + 2 * inset,
                    self.advance - 2 * inset,
                    self.line_height - 4 * inset,
                ),
                color,
            );
        }
    }
}

/// Horizontal placement of text inside a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// A string with cached metrics.
#[derive(Clone)]
pub struct TextLayout {
    text: String,
    size: Size,
    shaper: SharedShaper,
}

impl fmt::Debug for TextLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextLayout")
            .field("text", &self.text)
            .field("size", &self.size)
            .finish()
    }
}

impl TextLayout {
    /// Create a layout for `text`.
    pub fn new(shaper: SharedShaper, text: impl Into<String>) -> Self {
        let text = text.into();
        let size = shaper.measure(&text);
        Self { text, size, shaper }
    }

    /// Replace the text. Returns `true` if it differs from the old one.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.size = self.shaper.measure(&text);
        self.text = text;
        true
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Rendered size of the text.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Number of graphemes.
    pub fn len(&self) -> usize {
        grapheme_count(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Grapheme index nearest to pixel offset `x`.
    pub fn char_index_at(&self, x: i32) -> usize {
        self.shaper.char_index_at(&self.text, x)
    }

    /// Pixel offset of the boundary before grapheme `index`.
    pub fn char_pixel_offset(&self, index: usize) -> i32 {
        self.shaper.char_pixel_offset(&self.text, index)
    }

    /// Draw the text at `origin`.
    pub fn draw(&self, surface: &mut dyn Surface, origin: Point, color: Color) {
        self.shaper.draw(surface, &self.text, origin, color);
    }

    /// Draw the text inside `rect`, placed per `h_align` and centered
    /// vertically, without spilling outside the rectangle.
    pub fn draw_in_rect(
        &self,
        surface: &mut dyn Surface,
        rect: Rect,
        h_align: TextAlign,
        color: Color,
    ) {
        if rect.is_empty() {
            return;
        }
        let x = match h_align {
            TextAlign::Left => 1,
            TextAlign::Center => (rect.width() - self.size.width) / 2,
            TextAlign::Right => rect.width() - self.size.width - 1,
        };
        let y = (rect.height() - self.size.height) / 2;

        let mut scratch = PixelSurface::new(rect.size);
        self.shaper.draw(&mut scratch, &self.text, Point::new(x, y), color);
        surface.copy_from(&scratch, rect.origin, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shaper() -> SharedShaper {
        Rc::new(MonospaceShaper::new(8, 16))
    }

    #[test]
    fn test_measure_counts_graphemes() {
        let s = MonospaceShaper::new(8, 16);
        assert_eq!(s.measure("abc"), Size::new(24, 16));
        // e + combining acute is one grapheme
        assert_eq!(s.measure("e\u{301}x"), Size::new(16, 16));
    }

    #[test]
    fn test_char_index_rounds_to_nearest_boundary() {
        let s = MonospaceShaper::new(8, 16);
        assert_eq!(s.char_index_at("abcd", -5), 0);
        assert_eq!(s.char_index_at("abcd", 3), 0);
        assert_eq!(s.char_index_at("abcd", 4), 1);
        assert_eq!(s.char_index_at("abcd", 100), 4);
        assert_eq!(s.char_pixel_offset("abcd", 2), 16);
    }

    #[test]
    fn test_grapheme_byte_offset() {
        assert_eq!(grapheme_byte_offset("h\u{e9}llo", 2), 3);
        assert_eq!(grapheme_byte_offset("abc", 10), 3);
    }

    #[test]
    fn test_layout_set_text_reports_change() {
        let mut layout = TextLayout::new(shaper(), "ab");
        assert!(!layout.set_text("ab"));
        assert!(layout.set_text("abcd"));
        assert_eq!(layout.size().width, 32);
    }

    #[test]
    fn test_draw_in_rect_stays_inside() {
        let layout = TextLayout::new(shaper(), "wide text here");
        let mut surface = PixelSurface::new(Size::new(40, 20));
        surface.fill(Color::WHITE);
        layout.draw_in_rect(&mut surface, Rect::new(0, 0, 20, 20), TextAlign::Left, Color::BLACK);
        for y in 0..20 {
            for x in 20..40 {
                assert_eq!(surface.pixel(x, y), Some(Color::WHITE));
            }
        }
        assert!(surface.pixels().iter().any(|c| *c == Color::BLACK));
    }
}
