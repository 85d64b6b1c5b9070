//! Core systems for ourwin.
//!
//! This crate provides the pieces every other ourwin crate builds on:
//!
//! - **Handles**: [`WidgetId`] and [`WindowId`], stable slotmap keys into the
//!   per-window widget arena
//! - **Signal/Slot System**: [`Signal`], the notification mechanism widgets use
//!   to report clicks, text edits and cell changes
//! - **Errors**: [`Error`] and [`Result`] for structural operations
//! - **Logging**: tracing target and span names in [`logging`]
//!
//! # Signal/Slot Example
//!
//! ```
//! use ourwin_core::Signal;
//!
//! let clicked = Signal::<u32>::new();
//! let id = clicked.connect(|count| println!("clicked {count} times"));
//! clicked.emit(3);
//! clicked.disconnect(id);
//! ```

pub mod error;
pub mod handle;
pub mod logging;
pub mod signal;

pub use error::{Error, Result};
pub use handle::{WidgetId, WindowId};
pub use signal::{ConnectionId, Signal};
