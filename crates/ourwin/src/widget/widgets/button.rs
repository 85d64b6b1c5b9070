//! Push button widget.
//!
//! A press grabs the mouse so the button keeps tracking the pointer after it
//! leaves the button's rectangle. The button looks pressed only while the
//! pointer is over it, and `clicked` fires only if the button is released
//! there. Enter and Space click a focused button.
//!
//! # Example
//!
//! ```ignore
//! use ourwin::widget::widgets::Button;
//!
//! let button = Button::new(tree.shaper(), "OK");
//! button.clicked.connect(|()| println!("accepted"));
//! let id = tree.add_child(dialog, button)?;
//! ```

use ourwin_core::Signal;
use ourwin_core::logging::targets;
use ourwin_render::{Color, Point, Rect, SharedShaper, Size, TextAlign, TextLayout};

use crate::widget::base::{Style, WidgetBase};
use crate::widget::context::EventCx;
use crate::widget::cursor::CursorShape;
use crate::widget::events::{Event, Key, MouseButton};
use crate::widget::mouse::{Drag, DragKind};
use crate::widget::traits::Widget;

/// A clickable button with a text caption.
#[derive(Debug)]
pub struct Button {
    /// Widget base for common functionality.
    base: WidgetBase,

    /// The caption and its cached metrics.
    caption: TextLayout,

    /// Whether the button is drawn pushed in.
    pressed: bool,

    /// Signal emitted when the button is clicked.
    pub clicked: Signal<()>,
}

impl Button {
    /// Create a button sized to its caption.
    pub fn new(shaper: SharedShaper, caption: impl Into<String>) -> Self {
        let caption = TextLayout::new(shaper, caption);
        let style = Style::button();
        let frame = 2 * style.frame_extent();
        let size = Size::new(caption.size().width + frame, caption.size().height + frame);
        Self {
            base: WidgetBase::new(Rect::from_size(size), style),
            caption,
            pressed: false,
            clicked: Signal::new(),
        }
    }

    pub fn text(&self) -> &str {
        self.caption.text()
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let changed = self.caption.set_text(text);
        if changed {
            self.base.mark_dirty();
        }
        changed
    }

    /// Whether the button is currently drawn pushed in.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Emit `clicked` as if the user clicked the button.
    pub fn click(&self) {
        tracing::debug!(target: targets::EVENT, caption = self.caption.text(), "button clicked");
        self.clicked.emit(());
    }

    fn set_pressed(&mut self, pressed: bool, cx: &mut EventCx<'_>) {
        if self.pressed != pressed {
            self.pressed = pressed;
            cx.request_paint();
        }
    }

    fn contains_local(&self, pos: Point) -> bool {
        Rect::from_size(self.base.size()).contains(pos)
    }
}

impl Widget for Button {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn width_packed(&self) -> i32 {
        self.caption.size().width + 2 * self.base.style().frame_extent()
    }

    fn height_packed(&self) -> i32 {
        self.caption.size().height + 2 * self.base.style().frame_extent()
    }

    fn focusable(&self) -> bool {
        true
    }

    fn paint(&mut self) {
        self.base.clear_background();
        let style = *self.base.style();
        if self.pressed {
            self.base.draw_border_with(style.color_dark, style.color_light);
        } else if self.base.has_focus() {
            self.base.draw_border_with(style.color_light, Color::BLACK);
        } else {
            self.base.draw_border();
        }

        let mut content = self.base.content_rect();
        if self.pressed {
            content = content.translated(1, 1);
        }
        self.caption
            .draw_in_rect(self.base.surface_mut(), content, TextAlign::Center, Color::BLACK);
    }

    fn handle_event(&mut self, event: &Event, cx: &mut EventCx<'_>) -> bool {
        match event {
            Event::Mouse(mouse) if mouse.pressed && mouse.button == MouseButton::Left => {
                self.set_pressed(true, cx);
                cx.take_focus();
                cx.grab_mouse(DragKind::Press(MouseButton::Left), mouse.pos);
                true
            }
            Event::Mouse(mouse) if mouse.is_move() => {
                cx.set_cursor(CursorShape::Hand);
                true
            }
            Event::Key(key) if key.pressed && matches!(key.key, Key::Enter | Key::Space) => {
                self.click();
                true
            }
            _ => false,
        }
    }

    fn drag(&mut self, _drag: &Drag, pos: Point, cx: &mut EventCx<'_>) {
        let inside = self.contains_local(pos);
        self.set_pressed(inside, cx);
    }

    fn ungrab(&mut self, _drag: &Drag, pos: Point, cx: &mut EventCx<'_>) {
        self.set_pressed(false, cx);
        if self.contains_local(pos) {
            self.click();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use ourwin_render::MonospaceShaper;

    use super::*;

    #[test]
    fn test_button_packs_caption_with_frame() {
        let button = Button::new(Rc::new(MonospaceShaper::new(8, 16)), "OK");
        // caption 16x16, border 1 + padding 2 on each side
        assert_eq!(button.width_packed(), 22);
        assert_eq!(button.height_packed(), 22);
        assert_eq!(button.base().size(), Size::new(22, 22));
        assert!(button.focusable());
    }

    #[test]
    fn test_button_click_emits_signal() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        let button = Button::new(Rc::new(MonospaceShaper::new(8, 16)), "OK");
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        button.clicked.connect(move |()| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        button.click();
        button.click();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
