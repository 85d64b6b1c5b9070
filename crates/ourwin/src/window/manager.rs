//! The boundary between windows and the platform.
//!
//! [`Manager`] keeps the registry of open windows and drives the event loop.
//! Everything that talks to a real window system sits behind [`Platform`]:
//! the manager pulls events from it, routes them to the addressed window and
//! hands back finished frames and cursor changes.

use cursor_icon::CursorIcon;
use ourwin_core::logging::targets;
use ourwin_core::{Error, Result, Signal, WindowId};
use ourwin_render::{PixelSurface, SharedShaper};
use slotmap::SlotMap;

use super::{Window, WindowConfig};
use crate::widget::Event;

/// A window system backend.
pub trait Platform {
    /// Wait for the next event. `None` ends the event loop.
    fn poll_event(&mut self) -> Option<(WindowId, Event)>;

    /// Show a newly composed frame.
    fn present(&mut self, window: WindowId, frame: &PixelSurface);

    /// Change the mouse cursor over a window.
    fn set_cursor(&mut self, window: WindowId, cursor: CursorIcon);
}

/// Owns the windows and runs the event loop.
pub struct Manager<P> {
    windows: SlotMap<WindowId, Window>,
    platform: P,
    shaper: SharedShaper,

    /// Signal emitted after a window is created.
    pub window_created: Signal<WindowId>,
    /// Signal emitted after a window is closed.
    pub window_closed: Signal<WindowId>,
}

impl<P: Platform> Manager<P> {
    pub fn new(platform: P, shaper: SharedShaper) -> Self {
        Self {
            windows: SlotMap::with_key(),
            platform,
            shaper,
            window_created: Signal::new(),
            window_closed: Signal::new(),
        }
    }

    /// Create and register a window.
    pub fn make_window(&mut self, config: WindowConfig) -> WindowId {
        let window = Window::new(config, self.shaper.clone());
        let id = self.windows.insert(window);
        tracing::debug!(target: targets::MANAGER, ?id, "window registered");
        self.window_created.emit(id);
        id
    }

    /// Unregister and drop a window.
    pub fn close_window(&mut self, id: WindowId) -> Result<()> {
        self.windows.remove(id).ok_or(Error::WindowNotFound(id))?;
        tracing::debug!(target: targets::MANAGER, ?id, "window closed");
        self.window_closed.emit(id);
        Ok(())
    }

    pub fn window(&self, id: WindowId) -> Result<&Window> {
        self.windows.get(id).ok_or(Error::WindowNotFound(id))
    }

    pub fn window_mut(&mut self, id: WindowId) -> Result<&mut Window> {
        self.windows.get_mut(id).ok_or(Error::WindowNotFound(id))
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Route one event to its window and flush the results to the platform.
    ///
    /// Returns whether a widget handled the event. Events for unknown
    /// windows are dropped.
    pub fn dispatch(&mut self, id: WindowId, event: &Event) -> bool {
        let Some(window) = self.windows.get_mut(id) else {
            tracing::debug!(target: targets::MANAGER, ?id, "event for unknown window dropped");
            return false;
        };
        let handled = window.handle_event(event);

        if window.take_frame_ready() {
            self.platform.present(id, window.frame());
        }
        if let Some(shape) = window.take_cursor_change() {
            self.platform.set_cursor(id, shape.to_cursor_icon());
        }
        handled
    }

    /// Pump events until the platform runs dry.
    pub fn run(&mut self) {
        tracing::debug!(target: targets::MANAGER, windows = self.windows.len(), "event loop started");
        while let Some((id, event)) = self.platform.poll_event() {
            self.dispatch(id, &event);
        }
        tracing::debug!(target: targets::MANAGER, "event loop finished");
    }
}

impl<P> std::fmt::Debug for Manager<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("windows", &self.windows.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use ourwin_render::{MonospaceShaper, Point, Size, Surface};

    use super::*;
    use crate::widget::{Button, MouseButton, MouseEvent};

    #[derive(Default)]
    struct Recorder {
        events: VecDeque<(WindowId, Event)>,
        presented: Vec<(WindowId, Size)>,
        cursors: Vec<(WindowId, CursorIcon)>,
    }

    impl Platform for Recorder {
        fn poll_event(&mut self) -> Option<(WindowId, Event)> {
            self.events.pop_front()
        }

        fn present(&mut self, window: WindowId, frame: &PixelSurface) {
            self.presented.push((window, frame.size()));
        }

        fn set_cursor(&mut self, window: WindowId, cursor: CursorIcon) {
            self.cursors.push((window, cursor));
        }
    }

    fn manager() -> Manager<Recorder> {
        Manager::new(Recorder::default(), Rc::new(MonospaceShaper::new(8, 16)))
    }

    #[test]
    fn test_run_presents_frames_and_cursor_changes() {
        let mut manager = manager();
        let id = manager.make_window(WindowConfig::new("one").with_size(120, 80));
        {
            let window = manager.window_mut(id).unwrap();
            let root = window.root();
            let shaper = window.tree().shaper();
            let button = window.tree_mut().add_child(root, Button::new(shaper, "go")).unwrap();
            window.tree_mut().set_position(button, Point::new(10, 10));
        }

        let events = &mut manager.platform_mut().events;
        events.push_back((id, Event::WindowShown));
        events.push_back((id, MouseEvent::moved((12, 12)).into()));
        events.push_back((id, Event::WindowResized { width: 60, height: 40 }));
        manager.run();

        let recorder = manager.platform();
        assert_eq!(recorder.presented.first(), Some(&(id, Size::new(120, 80))));
        assert_eq!(recorder.presented.last(), Some(&(id, Size::new(60, 40))));
        assert_eq!(recorder.cursors, vec![(id, CursorIcon::Pointer)]);
    }

    #[test]
    fn test_unknown_window_is_dropped() {
        let mut manager = manager();
        let id = manager.make_window(WindowConfig::default());
        manager.close_window(id).unwrap();

        assert!(!manager.dispatch(id, &MouseEvent::press((1, 1), MouseButton::Left).into()));
        assert_eq!(manager.close_window(id), Err(Error::WindowNotFound(id)));
        assert!(manager.window(id).is_err());
        assert!(manager.platform().presented.is_empty());
    }

    #[test]
    fn test_window_signals() {
        let mut manager = manager();
        let created = Arc::new(AtomicUsize::new(0));
        let closed = Arc::new(AtomicUsize::new(0));
        let c = created.clone();
        manager.window_created.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        let c = closed.clone();
        manager.window_closed.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        let a = manager.make_window(WindowConfig::new("a"));
        manager.make_window(WindowConfig::new("b"));
        manager.close_window(a).unwrap();

        assert_eq!(created.load(Ordering::SeqCst), 2);
        assert_eq!(closed.load(Ordering::SeqCst), 1);
        assert_eq!(manager.window_count(), 1);
    }
}
