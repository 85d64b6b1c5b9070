//! Window-level routing: popups, focus, mouse grabs and layout passes.

use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ourwin::prelude::*;
use ourwin::widget::{KeyboardModifiers, SplitterPanes};

/// Show ourwin logs with `RUST_LOG=ourwin=trace cargo test`.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn window(width: i32, height: i32) -> Window {
    init_logging();
    Window::new(
        WindowConfig::new("routing").with_size(width, height),
        Rc::new(MonospaceShaper::new(8, 16)),
    )
}

/// Window position of the middle of a widget.
fn center_of(window: &Window, id: WidgetId) -> Point {
    let origin = window.tree().absolute_origin(id);
    let size = window.tree().rect(id).unwrap().size;
    origin.offset(size.width / 2, size.height / 2)
}

fn click(window: &mut Window, pos: Point) -> bool {
    let handled = window.handle_event(&MouseEvent::press(pos, MouseButton::Left).into());
    window.handle_event(&MouseEvent::release(pos, MouseButton::Left).into());
    handled
}

fn click_on(window: &mut Window, id: WidgetId) -> bool {
    let pos = center_of(window, id);
    click(window, pos)
}

struct Menus {
    file: WidgetId,
    recent: WidgetId,
    open: WidgetId,
    file_popup: WidgetId,
    recent_popup: WidgetId,
}

/// A menu bar with File > {Recent > {a.txt}, Open}.
fn menus(window: &mut Window) -> Menus {
    let root = window.root();
    let tree = window.tree_mut();
    let shaper = tree.shaper();

    let recent_popup = tree.insert(PopupMenu::new());
    tree.add_child(recent_popup, MenuItem::new(shaper.clone(), "a.txt")).unwrap();

    let file_popup = tree.insert(PopupMenu::new());
    let recent = tree
        .add_child(file_popup, MenuItem::new(shaper.clone(), "Recent").with_submenu(recent_popup))
        .unwrap();
    let open = tree.add_child(file_popup, MenuItem::new(shaper.clone(), "Open")).unwrap();

    let bar = tree.add_child(root, MenuBar::new()).unwrap();
    let file = tree
        .add_child(bar, MenuItem::new(shaper, "File").with_submenu(file_popup))
        .unwrap();
    tree.pack(bar);

    Menus {
        file,
        recent,
        open,
        file_popup,
        recent_popup,
    }
}

fn open_both(window: &mut Window, m: &Menus) {
    click_on(window, m.file);
    assert_eq!(window.popups(), &[m.file_popup]);
    click_on(window, m.recent);
    assert_eq!(window.popups(), &[m.file_popup, m.recent_popup]);
}

#[test]
fn popups_open_at_their_anchors() {
    let mut window = window(400, 300);
    let m = menus(&mut window);
    open_both(&mut window, &m);

    let file_rect = window.tree().rect(m.file).unwrap();
    assert_eq!(
        window.tree().rect(m.file_popup).unwrap().origin,
        Point::new(file_rect.x(), file_rect.bottom())
    );

    let recent_origin = window.tree().absolute_origin(m.recent);
    let recent_width = window.tree().rect(m.recent).unwrap().width();
    assert_eq!(
        window.tree().rect(m.recent_popup).unwrap().origin,
        recent_origin.offset(recent_width, 0)
    );
}

#[test]
fn click_outside_all_popups_closes_them() {
    let mut window = window(400, 300);
    let m = menus(&mut window);
    open_both(&mut window, &m);

    // consumed by the dismissal
    assert!(click(&mut window, Point::new(390, 290)));
    assert!(window.popups().is_empty());
}

#[test]
fn click_in_outer_popup_closes_only_inner() {
    let mut window = window(400, 300);
    let m = menus(&mut window);
    open_both(&mut window, &m);

    // the outer popup's border, clear of its items and of the submenu
    let corner = window.tree().rect(m.file_popup).unwrap().origin;
    assert!(click(&mut window, corner));
    assert_eq!(window.popups(), &[m.file_popup]);
}

#[test]
fn leaf_item_triggers_and_closes_menus() {
    let mut window = window(400, 300);
    let m = menus(&mut window);
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    window
        .tree()
        .get_as::<MenuItem>(m.open)
        .unwrap()
        .triggered
        .connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    click_on(&mut window, m.file);
    click_on(&mut window, m.open);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(window.popups().is_empty());
}

#[test]
fn escape_closes_popups() {
    let mut window = window(400, 300);
    let m = menus(&mut window);
    open_both(&mut window, &m);
    assert!(window.handle_event(&KeyEvent::press(Key::Escape).into()));
    assert!(window.popups().is_empty());
}

#[test]
fn focus_is_exclusive() {
    let mut window = window(300, 200);
    let root = window.root();
    window
        .tree_mut()
        .set_layout(root, LayoutKind::Box(BoxLayout::vertical()))
        .unwrap();
    let shaper = window.tree().shaper();
    let a = window.tree_mut().add_child(root, TextEdit::new(shaper.clone())).unwrap();
    let b = window.tree_mut().add_child(root, TextEdit::new(shaper)).unwrap();
    window.redraw();

    click_on(&mut window, a);
    assert_eq!(window.focused(), Some(a));
    click_on(&mut window, b);
    assert_eq!(window.focused(), Some(b));
    assert!(!window.tree().has_focus(a));

    window.handle_event(&KeyEvent::press(Key::Tab).with_modifiers(KeyboardModifiers::SHIFT).into());
    assert_eq!(window.focused(), Some(a));
    assert!(!window.tree().has_focus(b));

    let focused = [a, b].iter().filter(|&&id| window.tree().has_focus(id)).count();
    assert_eq!(focused, 1);
}

fn splitter(window: &mut Window) -> SplitterPanes {
    let root = window.root();
    let splitter = Splitter::new(Rect::new(50, 40, 400, 300), Orientation::Horizontal, 4)
        .with_split_position(200);
    Splitter::install(window.tree_mut(), root, splitter).unwrap()
}

#[test]
fn splitter_drag_moves_gutter() {
    let mut window = window(500, 400);
    let panes = splitter(&mut window);
    assert_eq!(window.tree().rect(panes.one).unwrap().width(), 198);
    assert_eq!(window.tree().rect(panes.two).unwrap().width(), 198);

    window.handle_event(&MouseEvent::press((250, 50), MouseButton::Left).into());
    assert_eq!(window.grab().map(|g| g.widget), Some(panes.splitter));
    window.handle_event(&MouseEvent::moved((300, 60)).into());
    window.handle_event(&MouseEvent::release((300, 60), MouseButton::Left).into());
    assert!(window.grab().is_none());

    assert_eq!(window.tree().get_as::<Splitter>(panes.splitter).unwrap().split_position(), 250);
    assert_eq!(window.tree().rect(panes.one).unwrap().width(), 248);
    let two = window.tree().rect(panes.two).unwrap();
    assert_eq!((two.x(), two.width()), (252, 148));
}

#[test]
fn grab_origin_is_stable_during_drag() {
    let mut window = window(500, 400);
    let panes = splitter(&mut window);

    window.handle_event(&MouseEvent::press((250, 50), MouseButton::Left).into());
    let origin = window.grab().unwrap().drag.origin;
    assert_eq!(origin, Point::new(200, 10));

    for (x, expected) in [(260, 210), (230, 180), (280, 230)] {
        window.handle_event(&MouseEvent::moved((x, 70)).into());
        assert_eq!(window.grab().unwrap().drag.origin, origin);
        let split = window.tree().get_as::<Splitter>(panes.splitter).unwrap().split_position();
        assert_eq!(split, expected);
    }
    assert_eq!(window.cursor(), CursorShape::SizeWE);
}

#[test]
fn nested_change_dirties_root() {
    let mut window = window(200, 100);
    let root = window.root();
    let tree = window.tree_mut();
    let outer = tree.add_child(root, Container::new(Rect::new(0, 0, 150, 80))).unwrap();
    let inner = tree.add_child(outer, Container::new(Rect::new(5, 5, 100, 50))).unwrap();
    let label = tree.add_child(inner, Label::new(tree.shaper(), "before")).unwrap();
    window.redraw();
    assert!(!window.needs_redraw());

    window
        .tree_mut()
        .update::<Label, _>(label, |l| l.set_text("after"))
        .unwrap();
    assert!(window.tree().is_dirty(root));
    assert!(window.needs_redraw());
    assert!(window.redraw());
    assert!(!window.redraw());
}

#[test]
fn fill_column_shares_extra_space() {
    let mut window = window(200, 200);
    let root = window.root();
    let tree = window.tree_mut();
    let column = tree.add_child(root, Container::new(Rect::new(0, 0, 50, 120))).unwrap();
    tree.set_layout(
        column,
        LayoutKind::Box(BoxLayout::vertical().with_vertical(Alignment::Start, Sizing::Fill)),
    )
    .unwrap();
    let kids: Vec<WidgetId> = [10, 20, 30]
        .into_iter()
        .map(|h| {
            let label = Label::new(tree.shaper(), "").with_preferred_size(Size::new(10, h));
            tree.add_child(column, label).unwrap()
        })
        .collect();
    window.redraw();

    let heights: Vec<i32> = kids
        .iter()
        .map(|&k| window.tree().rect(k).unwrap().height())
        .collect();
    assert_eq!(heights, vec![30, 40, 50]);
    assert!(!window.tree_mut().rearrange(column));
}
