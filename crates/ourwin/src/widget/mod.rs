//! Widget system for ourwin.
//!
//! This module provides the retained widget tree and everything that runs
//! on it:
//!
//! - [`Widget`] trait: sizing, painting and event hooks shared by all kinds
//! - [`WidgetBase`]: rectangle, surface, [`Style`] and state flags
//! - [`WidgetTree`]: the arena that owns every widget of a window
//! - [`layout`]: how containers place their children
//! - [`widgets`]: the built-in widget kinds
//!
//! # Widget Tree
//!
//! Widgets live in a [`WidgetTree`] and are addressed by [`WidgetId`]
//! handles. A widget whose kind provides a layout is a container and can
//! have children; its children are composited onto its surface in child
//! order during [`WidgetTree::redraw`].
//!
//! ```ignore
//! use ourwin::widget::{WidgetTree, widgets::{Button, Container}};
//!
//! let mut tree = WidgetTree::new(shaper);
//! let root = tree.insert(Container::new(Rect::new(0, 0, 640, 480)));
//! let ok = tree.add_child(root, Button::new(tree.shaper(), "OK"))?;
//! ```
//!
//! # Coordinate Systems
//!
//! A widget's rectangle is relative to its parent. Mouse events reach a
//! widget in its local coordinates, with the origin at its top-left corner.
//! [`WidgetTree::absolute_origin`] maps a widget's origin to window
//! coordinates.
//!
//! [`WidgetId`]: ourwin_core::WidgetId

mod base;
mod context;
pub mod cursor;
mod events;
mod focus;
pub mod layout;
pub mod mouse;
mod traits;
mod tree;
pub mod widgets;

pub use base::{Style, WidgetBase};
pub use context::{EventCx, PopupAnchor};
pub(crate) use context::Request;
pub use cursor::CursorShape;
pub use events::{Event, Key, KeyEvent, KeyboardModifiers, MouseButton, MouseEvent, TextEvent};
pub use focus::FocusManager;
pub use layout::{Alignment, AxisPolicy, BoxLayout, LayoutKind, Orientation, Sizing};
pub use mouse::{Drag, DragKind, MouseGrab};
pub use traits::Widget;
pub use tree::WidgetTree;
pub use widgets::{
    Button, Container, Grid, GridConfig, Label, MenuBar, MenuItem, PopupMenu, Splitter,
    SplitterPanes, TextEdit, WidgetCast, WidgetKind,
};
