//! Window configuration and builder.

use ourwin_render::{Color, Size};

/// Configuration for creating a [`Window`](super::Window).
///
/// # Example
///
/// ```ignore
/// use ourwin::window::WindowConfig;
///
/// let config = WindowConfig::new("Sheet")
///     .with_size(800, 600)
///     .with_background(Color::gray(200));
/// let id = manager.make_window(config);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Window title.
    title: String,
    /// Initial client area size in pixels.
    size: Size,
    /// Background of the root container.
    background: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            size: Size::new(1280, 1024),
            background: Color::gray(196),
        }
    }
}

impl WindowConfig {
    /// Create a configuration with default settings and the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the initial size in pixels. Negative sizes are clamped to zero.
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.size = Size::new(width.max(0), height.max(0));
        self
    }

    /// Set the background color of the root container.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn background(&self) -> Color {
        self.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = WindowConfig::new("Sheet")
            .with_size(320, -5)
            .with_background(Color::WHITE);
        assert_eq!(config.title(), "Sheet");
        assert_eq!(config.size(), Size::new(320, 0));
        assert_eq!(config.background(), Color::WHITE);
        assert_eq!(WindowConfig::default().size(), Size::new(1280, 1024));
    }
}
