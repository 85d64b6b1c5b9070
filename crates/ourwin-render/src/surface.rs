//! Drawing surfaces.
//!
//! Every widget owns one surface the size of its rectangle. Widgets paint
//! into their own surface; containers then composite child surfaces into
//! theirs, and the window presents the root's surface.
//!
//! [`Surface`] is the backend-facing contract. The only required operations
//! are pixel access, resizing and presentation; the drawing primitives have
//! default implementations in terms of those. [`PixelSurface`] is the
//! in-memory RGBA implementation used by widgets.

use crate::types::{Color, Point, Rect, Size};

/// A pixel buffer with basic drawing primitives.
pub trait Surface {
    /// Current size in pixels.
    fn size(&self) -> Size;

    /// Read one pixel. Returns `None` outside the surface.
    fn pixel(&self, x: i32, y: i32) -> Option<Color>;

    /// Write one pixel, ignoring coordinates outside the surface.
    fn put_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Resize the surface. Contents are cleared.
    fn resize(&mut self, size: Size);

    /// Hand the finished frame to the backend.
    fn present(&mut self);

    /// Blend one pixel over the existing content.
    fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if color.is_opaque() {
            self.put_pixel(x, y, color);
        } else if let Some(dst) = self.pixel(x, y) {
            self.put_pixel(x, y, color.over(dst));
        }
    }

    /// Fill the whole surface.
    fn fill(&mut self, color: Color) {
        let size = self.size();
        self.fill_rect(Rect::from_size(size), color);
    }

    /// Fill a rectangle, clipped to the surface. Translucent colors blend.
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clipped) = rect.intersect(&Rect::from_size(self.size())) else {
            return;
        };
        for y in clipped.y()..clipped.bottom() {
            for x in clipped.x()..clipped.right() {
                self.blend_pixel(x, y, color);
            }
        }
    }

    /// Draw a line between two points, both inclusive.
    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        // Bresenham
        let (mut x, mut y) = (from.x, from.y);
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.blend_pixel(x, y, color);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Outline a rectangle. The outline lies inside `rect`.
    fn draw_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        let (l, t) = (rect.x(), rect.y());
        let (r, b) = (rect.right() - 1, rect.bottom() - 1);
        self.draw_line(Point::new(l, t), Point::new(r, t), color);
        self.draw_line(Point::new(l, b), Point::new(r, b), color);
        self.draw_line(Point::new(l, t), Point::new(l, b), color);
        self.draw_line(Point::new(r, t), Point::new(r, b), color);
    }

    /// Outline a rectangle with a bevel.
    ///
    /// Raised bevels have the light edge on the top and left; `sunken` swaps
    /// the two colors.
    fn draw_3d_rect(&mut self, rect: Rect, light: Color, dark: Color, sunken: bool) {
        if rect.is_empty() {
            return;
        }
        let (top_left, bottom_right) = if sunken { (dark, light) } else { (light, dark) };
        let (l, t) = (rect.x(), rect.y());
        let (r, b) = (rect.right() - 1, rect.bottom() - 1);
        self.draw_line(Point::new(l, t), Point::new(r, t), top_left);
        self.draw_line(Point::new(l, t), Point::new(l, b), top_left);
        self.draw_line(Point::new(r, t), Point::new(r, b), bottom_right);
        self.draw_line(Point::new(l, b), Point::new(r, b), bottom_right);
    }

    /// Copy `src` so that its origin lands at `dest` in this surface.
    ///
    /// `clip` limits how much of `src` is copied, measured from its origin.
    /// Source pixels blend over the destination.
    fn copy_from(&mut self, src: &dyn Surface, dest: Point, clip: Option<Size>) {
        let src_size = src.size();
        let (w, h) = match clip {
            Some(c) => (c.width.min(src_size.width), c.height.min(src_size.height)),
            None => (src_size.width, src_size.height),
        };
        let area = Rect::new(dest.x, dest.y, w, h);
        let Some(visible) = area.intersect(&Rect::from_size(self.size())) else {
            return;
        };
        for y in visible.y()..visible.bottom() {
            for x in visible.x()..visible.right() {
                if let Some(color) = src.pixel(x - dest.x, y - dest.y) {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }
}

/// An in-memory RGBA surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PixelSurface {
    size: Size,
    pixels: Vec<Color>,
    presented_frames: u64,
}

impl PixelSurface {
    /// Create a transparent surface of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![Color::TRANSPARENT; size.area()],
            presented_frames: 0,
        }
    }

    /// Raw pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// How many times [`Surface::present`] was called.
    #[inline]
    pub fn presented_frames(&self) -> u64 {
        self.presented_frames
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }
}

impl Surface for PixelSurface {
    #[inline]
    fn size(&self) -> Size {
        self.size
    }

    #[inline]
    fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    #[inline]
    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn resize(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.pixels.clear();
        self.pixels.resize(size.area(), Color::TRANSPARENT);
    }

    fn present(&mut self) {
        self.presented_frames += 1;
        tracing::trace!(frame = self.presented_frames, "surface presented");
    }

    fn fill(&mut self, color: Color) {
        if color.is_opaque() {
            self.pixels.fill(color);
        } else {
            for px in &mut self.pixels {
                *px = color.over(*px);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut s = PixelSurface::new(Size::new(4, 4));
        s.fill_rect(Rect::new(2, 2, 10, 10), Color::RED);
        assert_eq!(s.pixel(3, 3), Some(Color::RED));
        assert_eq!(s.pixel(1, 1), Some(Color::TRANSPARENT));
        assert_eq!(s.pixel(4, 4), None);
    }

    #[test]
    fn test_draw_line_endpoints_inclusive() {
        let mut s = PixelSurface::new(Size::new(5, 5));
        s.draw_line(Point::new(0, 0), Point::new(4, 0), Color::BLACK);
        for x in 0..5 {
            assert_eq!(s.pixel(x, 0), Some(Color::BLACK));
        }
        assert_eq!(s.pixel(0, 1), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_draw_3d_rect_sunken_swaps_colors() {
        let light = Color::gray(220);
        let dark = Color::gray(64);
        let mut s = PixelSurface::new(Size::new(4, 4));
        s.draw_3d_rect(Rect::new(0, 0, 4, 4), light, dark, true);
        assert_eq!(s.pixel(1, 0), Some(dark));
        assert_eq!(s.pixel(3, 2), Some(light));
    }

    #[test]
    fn test_copy_from_offsets_and_clips() {
        let mut child = PixelSurface::new(Size::new(3, 3));
        child.fill(Color::RED);
        let mut parent = PixelSurface::new(Size::new(4, 4));
        parent.fill(Color::WHITE);

        parent.copy_from(&child, Point::new(2, 2), None);
        assert_eq!(parent.pixel(2, 2), Some(Color::RED));
        assert_eq!(parent.pixel(3, 3), Some(Color::RED));
        assert_eq!(parent.pixel(1, 1), Some(Color::WHITE));

        let mut clipped = PixelSurface::new(Size::new(4, 4));
        clipped.fill(Color::WHITE);
        clipped.copy_from(&child, Point::ZERO, Some(Size::new(1, 1)));
        assert_eq!(clipped.pixel(0, 0), Some(Color::RED));
        assert_eq!(clipped.pixel(1, 0), Some(Color::WHITE));
    }

    #[test]
    fn test_resize_clears() {
        let mut s = PixelSurface::new(Size::new(2, 2));
        s.fill(Color::BLACK);
        s.resize(Size::new(3, 1));
        assert_eq!(s.size(), Size::new(3, 1));
        assert_eq!(s.pixels().len(), 3);
        assert!(s.pixels().iter().all(|c| *c == Color::TRANSPARENT));
    }
}
