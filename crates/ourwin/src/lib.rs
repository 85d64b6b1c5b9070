//! ourwin - a small retained-mode GUI toolkit with a spreadsheet grid.
//!
//! Widgets live in a per-window [`WidgetTree`](widget::WidgetTree) arena and
//! are laid out by their containers, painted onto cached surfaces and
//! recomposed only where something changed. A [`Window`](window::Window)
//! routes platform input through focus, the mouse grab and its popup stack;
//! see [`Window::handle_event`](crate::window::Window::handle_event).
//!
//! The [`sheet`] module holds the spreadsheet model: cells, formulas, the
//! dependency graph and the selection. [`Grid`](widget::Grid) puts it on
//! screen.
//!
//! # Example
//!
//! ```ignore
//! use ourwin::prelude::*;
//!
//! let mut manager = Manager::new(platform, Rc::new(MonospaceShaper::new(8, 16)));
//! let id = manager.make_window(WindowConfig::new("Sheet").with_size(800, 600));
//! let window = manager.window_mut(id)?;
//! let root = window.root();
//! let grid = Grid::new(window.tree().shaper(), GridConfig::default());
//! window.tree_mut().add_child(root, grid)?;
//! manager.run();
//! ```

pub use ourwin_core::*;

/// Graphics primitives.
pub mod render {
    pub use ourwin_render::*;
}

pub mod debug;
pub mod prelude;
pub mod sheet;
pub mod widget;
pub mod window;
