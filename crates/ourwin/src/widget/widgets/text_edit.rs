//! Single-line text edit widget.
//!
//! The caret is a grapheme index, so combining sequences and emoji move and
//! delete as one unit. Characters arrive either as [`Key::Character`] key
//! presses or as committed [`TextEvent`]s from an input method; preedit text
//! is ignored.
//!
//! [`TextEvent`]: crate::widget::events::TextEvent

use ourwin_core::Signal;
use ourwin_render::text::{grapheme_byte_offset, grapheme_count};
use ourwin_render::{Color, Point, Rect, SharedShaper, Size, Surface, TextAlign, TextLayout};

use crate::widget::base::{Style, WidgetBase};
use crate::widget::context::EventCx;
use crate::widget::cursor::CursorShape;
use crate::widget::events::{Event, Key, MouseButton};
use crate::widget::traits::Widget;

/// Width of an empty edit field, in pixels of content.
const DEFAULT_CONTENT_WIDTH: i32 = 120;

/// An editable line of text.
#[derive(Debug)]
pub struct TextEdit {
    /// Widget base for common functionality.
    base: WidgetBase,

    /// The current text and its cached metrics.
    layout: TextLayout,

    /// Caret position as a grapheme index.
    caret: usize,

    /// Signal emitted when the text changes through editing.
    pub text_changed: Signal<String>,
}

impl TextEdit {
    pub fn new(shaper: SharedShaper) -> Self {
        let layout = TextLayout::new(shaper, "");
        let style = Style::text_edit();
        let frame = 2 * style.frame_extent();
        let size = Size::new(DEFAULT_CONTENT_WIDTH + frame, layout.size().height + frame);
        Self {
            base: WidgetBase::new(Rect::from_size(size), style),
            layout,
            caret: 0,
            text_changed: Signal::new(),
        }
    }

    /// Set the initial text using builder pattern.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn text(&self) -> &str {
        self.layout.text()
    }

    /// Replace the text and move the caret to its end.
    ///
    /// Returns `true` if the text changed. Programmatic changes do not emit
    /// `text_changed`.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let changed = self.layout.set_text(text);
        self.caret = self.layout.len();
        if changed {
            self.base.mark_dirty();
        }
        changed
    }

    /// Caret position as a grapheme index.
    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn set_caret(&mut self, caret: usize) {
        let caret = caret.min(self.layout.len());
        if caret != self.caret {
            self.caret = caret;
            self.base.mark_dirty();
        }
    }

    /// Insert `s` at the caret.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let mut text = self.layout.text().to_owned();
        let at = grapheme_byte_offset(&text, self.caret);
        text.insert_str(at, s);
        let before = grapheme_count(&text[..at + s.len()]);
        self.replace(text, before);
    }

    /// Delete the grapheme before the caret.
    pub fn backspace(&mut self) {
        if self.caret == 0 {
            return;
        }
        let text = self.layout.text();
        let start = grapheme_byte_offset(text, self.caret - 1);
        let end = grapheme_byte_offset(text, self.caret);
        let mut text = text.to_owned();
        text.replace_range(start..end, "");
        self.replace(text, self.caret - 1);
    }

    /// Delete the grapheme after the caret.
    pub fn delete(&mut self) {
        if self.caret >= self.layout.len() {
            return;
        }
        let text = self.layout.text();
        let start = grapheme_byte_offset(text, self.caret);
        let end = grapheme_byte_offset(text, self.caret + 1);
        let mut text = text.to_owned();
        text.replace_range(start..end, "");
        self.replace(text, self.caret);
    }

    fn replace(&mut self, text: String, caret: usize) {
        if self.layout.set_text(text) {
            self.text_changed.emit(self.layout.text().to_owned());
        }
        self.caret = caret.min(self.layout.len());
        self.base.mark_dirty();
    }

    fn text_origin(&self) -> Point {
        let content = self.base.content_rect();
        let y = content.y() + (content.height() - self.layout.size().height) / 2;
        Point::new(content.x(), y)
    }

    fn handle_key(&mut self, key: Key) -> bool {
        match key {
            Key::Backspace => self.backspace(),
            Key::Delete => self.delete(),
            Key::Left => self.set_caret(self.caret.saturating_sub(1)),
            Key::Right => self.set_caret(self.caret + 1),
            Key::Home => self.set_caret(0),
            Key::End => self.set_caret(self.layout.len()),
            Key::Character(c) if !c.is_control() => self.insert_str(c.encode_utf8(&mut [0; 4])),
            _ => return false,
        }
        true
    }
}

impl Widget for TextEdit {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn width_packed(&self) -> i32 {
        DEFAULT_CONTENT_WIDTH.max(self.layout.size().width) + 2 * self.base.style().frame_extent()
    }

    fn height_packed(&self) -> i32 {
        self.layout.size().height + 2 * self.base.style().frame_extent()
    }

    fn can_vfill(&self) -> bool {
        false
    }

    fn focusable(&self) -> bool {
        true
    }

    fn paint(&mut self) {
        self.base.clear_background();
        self.base.draw_border();

        let content = self.base.content_rect();
        let origin = self.text_origin();
        let text_rect = Rect::new(origin.x, origin.y, content.width(), self.layout.size().height);
        self.layout
            .draw_in_rect(self.base.surface_mut(), text_rect, TextAlign::Left, Color::BLACK);

        if self.base.has_focus() {
            let x = origin.x + self.layout.char_pixel_offset(self.caret);
            let height = self.layout.size().height;
            self.base
                .surface_mut()
                .draw_line(Point::new(x, origin.y), Point::new(x, origin.y + height - 1), Color::BLACK);
        }
    }

    fn handle_event(&mut self, event: &Event, cx: &mut EventCx<'_>) -> bool {
        match event {
            Event::Mouse(mouse) if mouse.pressed && mouse.button == MouseButton::Left => {
                let x = mouse.pos.x - self.text_origin().x;
                self.set_caret(self.layout.char_index_at(x));
                cx.take_focus();
                cx.request_paint();
                true
            }
            Event::Mouse(mouse) if mouse.is_move() => {
                cx.set_cursor(CursorShape::IBeam);
                true
            }
            Event::Key(key) if key.pressed && !key.modifiers.control && !key.modifiers.alt => {
                let handled = self.handle_key(key.key);
                if handled {
                    cx.request_paint();
                }
                handled
            }
            Event::Text(text) if text.is_commit() => {
                self.insert_str(&text.composition);
                cx.request_paint();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::Arc;

    use ourwin_render::MonospaceShaper;
    use parking_lot::Mutex;

    use super::*;

    fn edit() -> TextEdit {
        TextEdit::new(Rc::new(MonospaceShaper::new(8, 16)))
    }

    #[test]
    fn test_insert_and_caret_movement() {
        let mut e = edit();
        e.insert_str("hllo");
        e.set_caret(1);
        e.insert_str("e");
        assert_eq!(e.text(), "hello");
        assert_eq!(e.caret(), 2);

        e.handle_key(Key::End);
        assert_eq!(e.caret(), 5);
        e.handle_key(Key::Right);
        assert_eq!(e.caret(), 5);
        e.handle_key(Key::Home);
        e.handle_key(Key::Left);
        assert_eq!(e.caret(), 0);
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut e = edit().with_text("ae\u{301}b");
        assert_eq!(e.caret(), 3);
        e.handle_key(Key::Left);
        e.handle_key(Key::Backspace);
        assert_eq!(e.text(), "ab");
        assert_eq!(e.caret(), 1);

        e.handle_key(Key::Delete);
        assert_eq!(e.text(), "a");
        e.handle_key(Key::Delete);
        assert_eq!(e.text(), "a");
    }

    #[test]
    fn test_text_changed_only_for_edits() {
        let mut e = edit();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        e.text_changed.connect(move |text: &String| sink.lock().push(text.clone()));

        e.set_text("abc");
        e.handle_key(Key::Backspace);
        e.handle_key(Key::Character('d'));
        e.handle_key(Key::Home);
        e.handle_key(Key::Backspace);

        assert_eq!(*seen.lock(), vec!["ab".to_owned(), "abd".to_owned()]);
    }
}
