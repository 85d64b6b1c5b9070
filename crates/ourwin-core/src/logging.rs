//! Logging facilities for ourwin.
//!
//! ourwin is instrumented with the `tracing` crate. Nothing is printed unless
//! the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("ourwin::event=trace,ourwin::sheet=debug")
//!     .init();
//! ```
//!
//! The constants below name the targets and spans used across the crates so
//! filters can be written against stable strings.

/// Span names used throughout ourwin for tracing.
pub mod span_names {
    /// One call to `Window::handle_event`.
    pub const HANDLE_EVENT: &str = "ourwin::handle_event";
    /// A layout and paint pass over dirty widgets.
    pub const REDRAW: &str = "ourwin::redraw";
    /// Recalculation of a cell and its dependents.
    pub const RECALC: &str = "ourwin::recalc";
}

/// Target names for log filtering.
pub mod targets {
    /// Widget tree structure and sizing.
    pub const TREE: &str = "ourwin::tree";
    /// Layout strategies.
    pub const LAYOUT: &str = "ourwin::layout";
    /// Event routing, hit testing and mouse grabs.
    pub const EVENT: &str = "ourwin::event";
    /// Keyboard focus.
    pub const FOCUS: &str = "ourwin::focus";
    /// Popup menu stack.
    pub const POPUP: &str = "ourwin::popup";
    /// Spreadsheet model and recalculation.
    pub const SHEET: &str = "ourwin::sheet";
    /// Signal emission.
    pub const SIGNAL: &str = "ourwin_core::signal";
    /// Window manager loop.
    pub const MANAGER: &str = "ourwin::manager";
}
