//! Prelude module for ourwin.
//!
//! ```ignore
//! use ourwin::prelude::*;
//! ```

// ============================================================================
// Core
// ============================================================================

pub use ourwin_core::{ConnectionId, Error, Result, Signal, WidgetId, WindowId};

// ============================================================================
// Geometry and drawing
// ============================================================================

pub use ourwin_render::{
    Color, MonospaceShaper, PixelSurface, Point, Rect, SharedShaper, Size, Surface, TextShaper,
};

// ============================================================================
// Widgets and layout
// ============================================================================

pub use crate::widget::{
    Alignment, BoxLayout, Button, Container, CursorShape, Event, Grid, GridConfig, Key, KeyEvent,
    Label, LayoutKind, MenuBar, MenuItem, MouseButton, MouseEvent, Orientation, PopupMenu, Sizing,
    Splitter, Style, TextEdit, TextEvent, Widget, WidgetTree,
};

// ============================================================================
// Windows
// ============================================================================

pub use crate::window::{Manager, Platform, Window, WindowConfig};

// ============================================================================
// Spreadsheet
// ============================================================================

pub use crate::sheet::{CellCoord, Selection, Sheet, Value};
