//! Editing a grid through window events.

use std::rc::Rc;

use ourwin::prelude::*;
use ourwin::widget::TextEvent;

struct Fixture {
    window: Window,
    grid: WidgetId,
    editor: WidgetId,
}

const GRID_ORIGIN: Point = Point::new(0, 30);

/// Show ourwin logs with `RUST_LOG=ourwin=trace cargo test`.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fixture() -> Fixture {
    init_logging();
    let mut window = Window::new(
        WindowConfig::new("sheet").with_size(600, 400),
        Rc::new(MonospaceShaper::new(8, 16)),
    );
    let root = window.root();
    let tree = window.tree_mut();
    let editor = tree.add_child(root, TextEdit::new(tree.shaper())).unwrap();
    tree.set_rect(editor, Rect::new(0, 0, 600, 28));
    let grid = Grid::new(tree.shaper(), GridConfig::new().with_dimensions(6, 12)).with_editor(editor);
    let grid = tree.add_child(root, grid).unwrap();
    tree.set_rect(grid, Rect::new(GRID_ORIGIN.x, GRID_ORIGIN.y, 600, 370));
    window.handle_event(&Event::WindowShown);
    Fixture {
        window,
        grid,
        editor,
    }
}

/// Window position of the middle of a cell, with default sizes.
fn cell_center(col: i32, row: i32) -> Point {
    GRID_ORIGIN.offset(40 + col * 50 + 25, 18 + row * 18 + 9)
}

impl Fixture {
    fn click(&mut self, pos: Point) {
        self.window.handle_event(&MouseEvent::press(pos, MouseButton::Left).into());
        self.window.handle_event(&MouseEvent::release(pos, MouseButton::Left).into());
    }

    fn key(&mut self, key: Key) {
        self.window.handle_event(&KeyEvent::press(key).into());
        self.window.handle_event(&KeyEvent::release(key).into());
    }

    fn type_text(&mut self, text: &str) {
        self.window.handle_event(&TextEvent::commit(text).into());
    }

    fn frame(&self) -> Vec<Color> {
        self.window.frame().pixels().to_vec()
    }

    fn grid(&self) -> &Grid {
        self.window.tree().get_as::<Grid>(self.grid).unwrap()
    }

    fn editor_text(&self) -> &str {
        self.window.tree().get_as::<TextEdit>(self.editor).unwrap().text()
    }

    fn shown(&self, name: &str) -> &str {
        self.grid().sheet().visible_text(CellCoord::parse(name).unwrap())
    }
}

#[test]
fn typing_and_enter_fill_cells() {
    let mut f = fixture();
    f.click(cell_center(0, 0));
    assert_eq!(f.window.focused(), Some(f.grid));

    f.type_text("3");
    f.key(Key::Enter);
    f.type_text("=A0*4");
    f.key(Key::Right);

    assert_eq!(f.shown("A0"), "3");
    assert_eq!(f.shown("A1"), "12");
    assert_eq!(f.grid().active_cell(), CellCoord::new(1, 1));
    assert_eq!(f.editor_text(), "");
}

#[test]
fn editing_a_source_recalculates_dependents() {
    let mut f = fixture();
    f.click(cell_center(0, 0));
    f.type_text("3");
    f.key(Key::Enter);
    f.type_text("=A0*4");
    f.key(Key::Enter);
    f.type_text("=A1+1");
    f.key(Key::Enter);
    assert_eq!(f.shown("A2"), "13");

    f.click(cell_center(0, 0));
    assert_eq!(f.editor_text(), "3");
    f.key(Key::Backspace);
    f.type_text("5");
    f.click(cell_center(2, 2));

    assert_eq!(f.shown("A1"), "20");
    assert_eq!(f.shown("A2"), "21");
}

#[test]
fn cycle_shows_error_text() {
    let mut f = fixture();
    f.click(cell_center(0, 0));
    f.type_text("=B0");
    f.key(Key::Right);
    f.type_text("=A0");
    f.key(Key::Right);

    assert_eq!(f.shown("B0"), "Error");
    // the frame shows the grid after the edit
    assert!(!f.window.needs_redraw());
}

#[test]
fn header_drag_resizes_column() {
    let mut f = fixture();
    // right edge of column 0 in the column header band
    let edge = GRID_ORIGIN.offset(40 + 50, 5);
    f.window.handle_event(&MouseEvent::moved(edge).into());
    assert_eq!(f.window.cursor(), CursorShape::SizeWE);

    f.window.handle_event(&MouseEvent::press(edge, MouseButton::Left).into());
    let before = f.frame();
    f.window.handle_event(&MouseEvent::moved(edge.offset(30, 40)).into());
    // the live drag reaches the window frame
    assert!(!f.window.tree().is_dirty(f.window.root()));
    assert_ne!(f.frame(), before);
    f.window.handle_event(&MouseEvent::release(edge.offset(30, 40), MouseButton::Left).into());

    assert_eq!(f.grid().column_width(0), Some(80));
    assert_eq!(f.window.cursor(), CursorShape::Arrow);
    assert!(f.window.grab().is_none());
}

#[test]
fn ctrl_click_toggles_rows() {
    let mut f = fixture();
    let row_header = |row: i32| GRID_ORIGIN.offset(20, 18 + row * 18 + 9);

    f.click(row_header(2));
    f.window.handle_event(&KeyEvent::press(Key::Control).into());
    f.click(row_header(4));
    f.window.handle_event(&KeyEvent::release(Key::Control).into());

    let selection = f.grid().selection();
    assert!(selection.is_row_selected(2));
    assert!(selection.is_row_selected(4));
    assert!(selection.is_cell_selected(CellCoord::new(3, 4)));
    assert!(!selection.is_row_selected(3));
}

#[test]
fn deselecting_the_active_row_repaints() {
    let mut f = fixture();
    let row_header = GRID_ORIGIN.offset(20, 18 + 5 * 18 + 9);
    f.click(row_header);
    assert!(f.grid().selection().is_row_selected(5));
    let selected = f.frame();

    f.window.handle_event(&KeyEvent::press(Key::Control).into());
    f.click(row_header);
    f.window.handle_event(&KeyEvent::release(Key::Control).into());

    assert!(!f.grid().selection().is_row_selected(5));
    assert_eq!(f.grid().active_cell(), CellCoord::new(0, 5));
    assert!(!f.window.needs_redraw());
    assert_ne!(f.frame(), selected);
}
