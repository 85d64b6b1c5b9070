//! State shared by every widget.
//!
//! [`WidgetBase`] holds the parts of a widget the tree, the layouts and the
//! window need to see without knowing the widget's kind: its rectangle, its
//! surface, its [`Style`], and the dirty/focus/grab flags.

use ourwin_render::{Color, PixelSurface, Point, Rect, Size, Surface};

/// Border, padding and color settings.
///
/// The content area of a widget is its rectangle inset by
/// `border_width + border_padding` on every side. Layouts place children
/// `inter_padding` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub border_width: i32,
    pub sunken: bool,
    pub border_padding: i32,
    pub inter_padding: i32,
    pub color_bg: Color,
    pub color_light: Color,
    pub color_dark: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            border_width: 0,
            sunken: false,
            border_padding: 0,
            inter_padding: 0,
            color_bg: Color::gray(196),
            color_light: Color::gray(220),
            color_dark: Color::gray(64),
        }
    }
}

impl Style {
    /// Plain containers: no border, gray background.
    pub fn container() -> Self {
        Self::default()
    }

    /// Push buttons: raised one pixel border, two pixels of padding.
    pub fn button() -> Self {
        Self {
            border_width: 1,
            border_padding: 2,
            color_bg: Color::gray(192),
            ..Self::default()
        }
    }

    /// Edit fields: sunken border on white.
    pub fn text_edit() -> Self {
        Self {
            border_width: 1,
            sunken: true,
            border_padding: 5,
            color_bg: Color::WHITE,
            ..Self::default()
        }
    }

    /// Popup menus: raised border around a vertical stack.
    pub fn popup() -> Self {
        Self {
            border_width: 1,
            border_padding: 1,
            color_bg: Color::gray(210),
            ..Self::default()
        }
    }

    pub fn with_border_width(mut self, width: i32) -> Self {
        self.border_width = width.max(0);
        self
    }

    pub fn with_sunken(mut self, sunken: bool) -> Self {
        self.sunken = sunken;
        self
    }

    pub fn with_border_padding(mut self, padding: i32) -> Self {
        self.border_padding = padding.max(0);
        self
    }

    pub fn with_inter_padding(mut self, padding: i32) -> Self {
        self.inter_padding = padding.max(0);
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.color_bg = color;
        self
    }

    pub fn with_bevel(mut self, light: Color, dark: Color) -> Self {
        self.color_light = light;
        self.color_dark = dark;
        self
    }

    /// Space taken by border and padding on one side.
    #[inline]
    pub fn frame_extent(&self) -> i32 {
        self.border_width + self.border_padding
    }
}

/// Geometry, surface, style and state flags of a widget.
#[derive(Debug, Clone)]
pub struct WidgetBase {
    rect: Rect,
    surface: PixelSurface,
    style: Style,
    preferred: Option<Size>,
    dirty: bool,
    focused: bool,
    grabbed: bool,
}

impl WidgetBase {
    /// Create a base with the given rectangle and style.
    ///
    /// New widgets start dirty so the first redraw paints them.
    pub fn new(rect: Rect, style: Style) -> Self {
        Self {
            rect,
            surface: PixelSurface::new(rect.size),
            style,
            preferred: None,
            dirty: true,
            focused: false,
            grabbed: false,
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Rectangle relative to the parent's origin.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.rect.size
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.rect.origin
    }

    /// Resize the widget and its surface.
    ///
    /// Returns `false` and does nothing if the size is unchanged.
    pub fn resize(&mut self, size: Size) -> bool {
        if size == self.rect.size {
            return false;
        }
        self.rect.size = size;
        self.surface.resize(size);
        self.dirty = true;
        true
    }

    /// Move the widget inside its parent.
    ///
    /// Moving does not dirty the widget itself, only the parent that
    /// composites it.
    pub fn set_position(&mut self, pos: Point) -> bool {
        if pos == self.rect.origin {
            return false;
        }
        self.rect.origin = pos;
        true
    }

    /// Size a layout packs this widget to, overriding what the widget
    /// computes from its content.
    #[inline]
    pub fn preferred_size(&self) -> Option<Size> {
        self.preferred
    }

    pub fn set_preferred_size(&mut self, size: Option<Size>) {
        self.preferred = size;
    }

    /// Content area in local coordinates.
    pub fn content_rect(&self) -> Rect {
        Rect::from_size(self.rect.size).inset(self.style.frame_extent())
    }

    // =========================================================================
    // Style
    // =========================================================================

    #[inline]
    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn set_style(&mut self, style: Style) {
        if style != self.style {
            self.style = style;
            self.dirty = true;
        }
    }

    // =========================================================================
    // Flags
    // =========================================================================

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag the widget for repaint. Ancestors are flagged by the tree.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.dirty = true;
        }
    }

    #[inline]
    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    pub(crate) fn set_grabbed(&mut self, grabbed: bool) {
        self.grabbed = grabbed;
    }

    // =========================================================================
    // Painting
    // =========================================================================

    #[inline]
    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut PixelSurface {
        &mut self.surface
    }

    pub(crate) fn take_surface(&mut self) -> PixelSurface {
        std::mem::take(&mut self.surface)
    }

    pub(crate) fn restore_surface(&mut self, surface: PixelSurface) {
        self.surface = surface;
    }

    /// Fill the surface with the background color.
    pub fn clear_background(&mut self) {
        self.surface.fill(self.style.color_bg);
    }

    /// Draw the style's bevelled border.
    pub fn draw_border(&mut self) {
        self.draw_border_with(self.style.color_light, self.style.color_dark);
    }

    /// Draw the border with explicit bevel colors.
    pub fn draw_border_with(&mut self, light: Color, dark: Color) {
        let full = Rect::from_size(self.rect.size);
        for i in 0..self.style.border_width {
            self.surface
                .draw_3d_rect(full.inset(i), light, dark, self.style.sunken);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_keeps_surface_in_sync() {
        let mut base = WidgetBase::new(Rect::new(5, 5, 10, 10), Style::default());
        base.clear_dirty();

        assert!(!base.resize(Size::new(10, 10)));
        assert!(!base.is_dirty());

        assert!(base.resize(Size::new(20, 7)));
        assert_eq!(base.surface().size(), Size::new(20, 7));
        assert!(base.is_dirty());
        assert_eq!(base.position(), Point::new(5, 5));
    }

    #[test]
    fn test_content_rect_excludes_frame() {
        let base = WidgetBase::new(Rect::new(0, 0, 40, 20), Style::button());
        assert_eq!(base.content_rect(), Rect::new(3, 3, 34, 14));
    }

    #[test]
    fn test_draw_border_sunken() {
        let style = Style::text_edit();
        let mut base = WidgetBase::new(Rect::new(0, 0, 6, 6), style);
        base.clear_background();
        base.draw_border();
        assert_eq!(base.surface().pixel(2, 0), Some(style.color_dark));
        assert_eq!(base.surface().pixel(5, 3), Some(style.color_light));
        assert_eq!(base.surface().pixel(2, 2), Some(Color::WHITE));
    }
}
