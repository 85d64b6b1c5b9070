//! Spreadsheet grid widget.
//!
//! The grid draws a [`Sheet`] as rows and columns under a column header band
//! (`A`, `B`, ...) and beside a row header band (`0`, `1`, ...). It owns the
//! sheet, a [`Selection`] and the active cell; the formula of the active cell
//! is edited in a linked [`TextEdit`](super::TextEdit) elsewhere in the tree.
//!
//! # Interaction
//!
//! - Clicking a cell makes it active. The old active cell is committed from
//!   the editor first, then the editor is loaded with the new cell's formula.
//! - Clicking a header selects its row or column, the corner selects all.
//!   Ctrl toggles instead of replacing; Shift selects the rectangle between
//!   the active cell and the clicked cell.
//! - Pressing on a header edge starts a resize drag of that row or column,
//!   or of the header band itself.
//! - Arrow keys and Enter move the active cell; other keys and text input go
//!   to the editor.
//!
//! # Example
//!
//! ```ignore
//! let editor = tree.add_child(root, TextEdit::new(tree.shaper()))?;
//! let grid = Grid::new(tree.shaper(), GridConfig::default()).with_editor(editor);
//! let grid = tree.add_child(root, grid)?;
//! tree.update::<Grid, _>(grid, |g| g.set_formula(CellCoord::new(0, 0), "=1+2"))?;
//! ```

use ourwin_core::logging::targets;
use ourwin_core::{Signal, WidgetId};
use ourwin_render::{Color, Point, Rect, SharedShaper, Surface, TextAlign, TextLayout};

use crate::sheet::{CellCoord, Selection, Sheet, ValueType, column_name};
use crate::widget::base::{Style, WidgetBase};
use crate::widget::context::EventCx;
use crate::widget::cursor::CursorShape;
use crate::widget::events::{Event, Key, MouseButton, MouseEvent};
use crate::widget::mouse::{Drag, DragKind};
use crate::widget::traits::Widget;

const COLOR_BG: Color = Color::gray(160);
const COLOR_CELL_BG: Color = Color::WHITE;
const COLOR_HEADER_BG: Color = Color::gray(210);
const COLOR_HEADER_TEXT: Color = Color::gray(32);
const COLOR_SELECTED: Color = Color::from_rgba8(128, 200, 128, 96);
const COLOR_ACTIVE_CELL: Color = Color::BLACK;
const COLOR_ERROR_TEXT: Color = Color::RED;

/// Distance from a header edge, in pixels, that still counts as the edge.
const EDGE_GRIP: i32 = 2;

/// Initial dimensions of a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub columns: usize,
    pub rows: usize,
    pub column_width: i32,
    pub row_height: i32,
    /// Width of the row header band on the left.
    pub header_column_width: i32,
    /// Height of the column header band on top.
    pub header_row_height: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 50,
            rows: 100,
            column_width: 50,
            row_height: 18,
            header_column_width: 40,
            header_row_height: 18,
        }
    }
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of columns and rows using builder pattern.
    pub fn with_dimensions(mut self, columns: usize, rows: usize) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    /// Set the default cell size using builder pattern.
    pub fn with_cell_size(mut self, column_width: i32, row_height: i32) -> Self {
        self.column_width = column_width.max(1);
        self.row_height = row_height.max(1);
        self
    }

    /// Set the header band sizes using builder pattern.
    pub fn with_headers(mut self, header_column_width: i32, header_row_height: i32) -> Self {
        self.header_column_width = header_column_width.max(1);
        self.header_row_height = header_row_height.max(1);
        self
    }
}

/// Where a coordinate falls along one axis of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Header,
    At(usize),
    Beyond,
}

/// A spreadsheet view with selection and formula editing.
pub struct Grid {
    base: WidgetBase,
    sheet: Sheet,
    selection: Selection,
    config: GridConfig,

    thickness_cols: Vec<i32>,
    thickness_rows: Vec<i32>,
    /// Height of the column header band.
    header_cols_height: i32,
    /// Width of the row header band.
    header_rows_width: i32,

    active_cell: CellCoord,
    key_ctrl: bool,
    key_shift: bool,

    /// Edit field holding the active cell's formula.
    editor: Option<WidgetId>,
    shaper: SharedShaper,

    /// Emitted for every cell whose visible text changed after an edit.
    pub cell_changed: Signal<CellCoord>,
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grid")
            .field("base", &self.base)
            .field("sheet", &self.sheet)
            .field("active_cell", &self.active_cell)
            .field("editor", &self.editor)
            .finish_non_exhaustive()
    }
}

impl Grid {
    /// Create a grid with an empty sheet.
    pub fn new(shaper: SharedShaper, config: GridConfig) -> Self {
        let style = Style::default().with_background(COLOR_BG);
        Self {
            base: WidgetBase::new(Rect::new(0, 0, 200, 200), style),
            sheet: Sheet::new(config.columns, config.rows),
            selection: Selection::new(),
            config,
            thickness_cols: vec![config.column_width; config.columns],
            thickness_rows: vec![config.row_height; config.rows],
            header_cols_height: config.header_row_height,
            header_rows_width: config.header_column_width,
            active_cell: CellCoord::default(),
            key_ctrl: false,
            key_shift: false,
            editor: None,
            shaper,
            cell_changed: Signal::new(),
        }
    }

    /// Link the edit field that shows the active cell's formula using
    /// builder pattern.
    pub fn with_editor(mut self, editor: WidgetId) -> Self {
        self.editor = Some(editor);
        self
    }

    pub fn set_editor(&mut self, editor: Option<WidgetId>) {
        self.editor = editor;
    }

    pub fn editor(&self) -> Option<WidgetId> {
        self.editor
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        self.base.mark_dirty();
        &mut self.selection
    }

    pub fn active_cell(&self) -> CellCoord {
        self.active_cell
    }

    pub fn col_count(&self) -> usize {
        self.thickness_cols.len()
    }

    pub fn row_count(&self) -> usize {
        self.thickness_rows.len()
    }

    pub fn column_width(&self, col: usize) -> Option<i32> {
        self.thickness_cols.get(col).copied()
    }

    pub fn row_height(&self, row: usize) -> Option<i32> {
        self.thickness_rows.get(row).copied()
    }

    /// Height of the column header band.
    pub fn header_row_height(&self) -> i32 {
        self.header_cols_height
    }

    /// Width of the row header band.
    pub fn header_column_width(&self) -> i32 {
        self.header_rows_width
    }

    /// Raw input of a cell.
    pub fn formula(&self, coord: CellCoord) -> &str {
        self.sheet.formula(coord)
    }

    /// Store new input for a cell and recalculate its dependents.
    ///
    /// Emits [`cell_changed`](Self::cell_changed) for every cell whose
    /// visible text changed, and returns those cells.
    pub fn set_formula(&mut self, coord: CellCoord, text: &str) -> Vec<CellCoord> {
        let changed = self.sheet.set_formula(coord, text);
        if !changed.is_empty() {
            self.base.mark_dirty();
        }
        for &cell in &changed {
            self.cell_changed.emit(cell);
        }
        changed
    }

    /// Insert rows before `before`. Returns `false` if `before` is past the
    /// last row.
    pub fn insert_rows(&mut self, count: usize, before: usize) -> bool {
        debug_assert!(self.has_integrity());
        if !self.sheet.insert_rows(count, before) {
            return false;
        }
        self.thickness_rows
            .splice(before..before, std::iter::repeat_n(self.config.row_height, count));
        self.selection.shift_rows(before, count);
        if self.active_cell.row >= before && self.active_cell.row + count < self.row_count() {
            self.active_cell.row += count;
        }
        self.base.mark_dirty();
        debug_assert!(self.has_integrity());
        true
    }

    /// Insert columns before `before`. Returns `false` if `before` is past
    /// the last column.
    pub fn insert_columns(&mut self, count: usize, before: usize) -> bool {
        debug_assert!(self.has_integrity());
        if !self.sheet.insert_columns(count, before) {
            return false;
        }
        self.thickness_cols
            .splice(before..before, std::iter::repeat_n(self.config.column_width, count));
        self.selection.shift_cols(before, count);
        if self.active_cell.col >= before && self.active_cell.col + count < self.col_count() {
            self.active_cell.col += count;
        }
        self.base.mark_dirty();
        debug_assert!(self.has_integrity());
        true
    }

    /// Check that the sheet and the row and column geometry agree.
    pub fn has_integrity(&self) -> bool {
        self.sheet.has_integrity()
            && self.sheet.row_count() == self.thickness_rows.len()
            && self.sheet.col_count() == self.thickness_cols.len()
            && (self.row_count() == 0 || self.active_cell.row < self.row_count())
            && (self.col_count() == 0 || self.active_cell.col < self.col_count())
    }

    /// Total width of headers and columns.
    pub fn total_width(&self) -> i32 {
        self.header_rows_width + self.thickness_cols.iter().sum::<i32>()
    }

    /// Total height of headers and rows.
    pub fn total_height(&self) -> i32 {
        self.header_cols_height + self.thickness_rows.iter().sum::<i32>()
    }

    // =========================================================================
    // Hit testing
    // =========================================================================

    fn band_at(pos: i32, header: i32, thickness: &[i32]) -> Band {
        if pos < header {
            return Band::Header;
        }
        let mut end = header;
        for (i, t) in thickness.iter().enumerate() {
            end += t;
            if pos < end {
                return Band::At(i);
            }
        }
        Band::Beyond
    }

    fn col_at(&self, x: i32) -> Band {
        Self::band_at(x, self.header_rows_width, &self.thickness_cols)
    }

    fn row_at(&self, y: i32) -> Band {
        Self::band_at(y, self.header_cols_height, &self.thickness_rows)
    }

    /// Find the header edge at `along`, if any.
    ///
    /// `Some(None)` is the far edge of the header band, `Some(Some(i))` the
    /// far edge of row or column `i`.
    fn edge_at(along: i32, header: i32, thickness: &[i32], limit: i32) -> Option<Option<usize>> {
        let mut edge = header;
        let mut index = None;
        for (i, t) in std::iter::once(&0).chain(thickness.iter()).enumerate() {
            edge += t;
            if i > 0 {
                index = Some(i - 1);
            }
            if (along - edge).abs() <= EDGE_GRIP {
                return Some(index);
            }
            if edge >= limit {
                break;
            }
        }
        None
    }

    /// Row edge under `pos`; only the row header band has row edges.
    fn row_edge_at(&self, pos: Point) -> Option<Option<usize>> {
        if pos.x > self.header_rows_width + EDGE_GRIP {
            return None;
        }
        Self::edge_at(
            pos.y,
            self.header_cols_height,
            &self.thickness_rows,
            self.base.size().height,
        )
    }

    /// Column edge under `pos`; only the column header band has column
    /// edges.
    fn col_edge_at(&self, pos: Point) -> Option<Option<usize>> {
        if pos.y >= self.header_cols_height + EDGE_GRIP {
            return None;
        }
        Self::edge_at(
            pos.x,
            self.header_rows_width,
            &self.thickness_cols,
            self.base.size().width,
        )
    }

    fn row_thickness(&self, index: Option<usize>) -> i32 {
        match index {
            None => self.header_cols_height,
            Some(i) => self.thickness_rows.get(i).copied().unwrap_or(0),
        }
    }

    fn col_thickness(&self, index: Option<usize>) -> i32 {
        match index {
            None => self.header_rows_width,
            Some(i) => self.thickness_cols.get(i).copied().unwrap_or(0),
        }
    }

    fn set_row_thickness(&mut self, index: Option<usize>, thickness: i32, cx: &mut EventCx<'_>) {
        let thickness = thickness.max(1);
        match index {
            None => self.header_cols_height = thickness,
            Some(i) => {
                if let Some(t) = self.thickness_rows.get_mut(i) {
                    *t = thickness;
                }
            }
        }
        self.base.mark_dirty();
        cx.request_paint();
    }

    fn set_col_thickness(&mut self, index: Option<usize>, thickness: i32, cx: &mut EventCx<'_>) {
        let thickness = thickness.max(1);
        match index {
            None => self.header_rows_width = thickness,
            Some(i) => {
                if let Some(t) = self.thickness_cols.get_mut(i) {
                    *t = thickness;
                }
            }
        }
        self.base.mark_dirty();
        cx.request_paint();
    }

    // =========================================================================
    // Active cell
    // =========================================================================

    /// Move the active cell, committing the editor into the old one and
    /// loading the new one's formula into the editor.
    fn move_active_cell(&mut self, to: CellCoord, cx: &mut EventCx<'_>) {
        if to == self.active_cell || !self.sheet.contains(to) {
            return;
        }
        if let Some(editor) = self.editor {
            if let Some(text) = cx.text_of(editor) {
                self.set_formula(self.active_cell, &text);
            }
            cx.set_text_of(editor, self.sheet.formula(to));
        }
        tracing::trace!(target: targets::SHEET, from = %self.active_cell, %to, "active cell moved");
        self.active_cell = to;
        self.base.mark_dirty();
        cx.request_paint();
    }

    fn step_active_cell(&mut self, key: Key, cx: &mut EventCx<'_>) {
        let CellCoord { col, row } = self.active_cell;
        let to = match key {
            Key::Up => CellCoord::new(col, row.saturating_sub(1)),
            Key::Down | Key::Enter => CellCoord::new(col, (row + 1).min(self.row_count().saturating_sub(1))),
            Key::Left => CellCoord::new(col.saturating_sub(1), row),
            Key::Right => CellCoord::new((col + 1).min(self.col_count().saturating_sub(1)), row),
            _ => return,
        };
        self.move_active_cell(to, cx);
    }

    // =========================================================================
    // Events
    // =========================================================================

    fn handle_press(&mut self, mouse: &MouseEvent, cx: &mut EventCx<'_>) -> bool {
        let col = self.col_at(mouse.pos.x);
        let row = self.row_at(mouse.pos.y);
        if col == Band::Beyond || row == Band::Beyond {
            return false;
        }

        let anchor = self.active_cell;
        if !self.key_shift {
            let to = CellCoord::new(
                if let Band::At(c) = col { c } else { 0 },
                if let Band::At(r) = row { r } else { 0 },
            );
            self.move_active_cell(to, cx);
        }
        cx.take_focus();

        if let Some(index) = self.row_edge_at(mouse.pos) {
            cx.set_cursor(CursorShape::SizeNS);
            cx.grab_mouse(
                DragKind::ResizeRow {
                    index,
                    thickness_at_grab: self.row_thickness(index),
                },
                mouse.pos,
            );
            return true;
        }
        if let Some(index) = self.col_edge_at(mouse.pos) {
            cx.set_cursor(CursorShape::SizeWE);
            cx.grab_mouse(
                DragKind::ResizeColumn {
                    index,
                    thickness_at_grab: self.col_thickness(index),
                },
                mouse.pos,
            );
            return true;
        }

        let as_index = |band: Band| match band {
            Band::At(i) => Some(i),
            _ => None,
        };
        let changed = match (self.key_shift, col, row) {
            (true, Band::At(c), Band::At(r)) => {
                if !self.key_ctrl {
                    self.selection.clear();
                }
                self.selection.add_region(anchor, CellCoord::new(c, r), true);
                true
            }
            _ => self
                .selection
                .apply_click(as_index(col), as_index(row), self.key_ctrl),
        };
        if changed {
            self.base.mark_dirty();
            cx.request_paint();
        }
        true
    }

    fn resize_to(&mut self, drag: &Drag, pos: Point, cx: &mut EventCx<'_>) {
        let delta = drag.delta(pos);
        match drag.kind {
            DragKind::ResizeRow {
                index,
                thickness_at_grab,
            } => self.set_row_thickness(index, thickness_at_grab + delta.y, cx),
            DragKind::ResizeColumn {
                index,
                thickness_at_grab,
            } => self.set_col_thickness(index, thickness_at_grab + delta.x, cx),
            _ => {}
        }
    }

    // =========================================================================
    // Painting
    // =========================================================================

    fn cell_alignment(value_type: ValueType) -> TextAlign {
        match value_type {
            ValueType::Number => TextAlign::Right,
            ValueType::Bool => TextAlign::Center,
            ValueType::Empty | ValueType::Text => TextAlign::Left,
        }
    }

    fn paint_headers(&mut self) {
        let size = self.base.size();

        let mut x = self.header_rows_width;
        for (col, &t) in self.thickness_cols.iter().enumerate() {
            if x > size.width {
                break;
            }
            let rect = Rect::new(x, 0, t - 1, self.header_cols_height - 1);
            let surface = self.base.surface_mut();
            surface.fill_rect(rect, COLOR_HEADER_BG);
            if self.selection.does_col_have_selection(col) {
                surface.fill_rect(rect, COLOR_SELECTED);
            }
            TextLayout::new(self.shaper.clone(), column_name(col)).draw_in_rect(
                surface,
                rect,
                TextAlign::Center,
                COLOR_HEADER_TEXT,
            );
            x += t;
        }

        let mut y = self.header_cols_height;
        for (row, &t) in self.thickness_rows.iter().enumerate() {
            if y > size.height {
                break;
            }
            let rect = Rect::new(0, y, self.header_rows_width - 1, t - 1);
            let surface = self.base.surface_mut();
            surface.fill_rect(rect, COLOR_HEADER_BG);
            if self.selection.does_row_have_selection(row) {
                surface.fill_rect(rect, COLOR_SELECTED);
            }
            TextLayout::new(self.shaper.clone(), row.to_string()).draw_in_rect(
                surface,
                rect,
                TextAlign::Center,
                COLOR_HEADER_TEXT,
            );
            y += t;
        }
    }

    fn paint_cells(&mut self) {
        let size = self.base.size();

        let mut y = self.header_cols_height;
        for (row, &th) in self.thickness_rows.iter().enumerate() {
            if y > size.height {
                break;
            }
            let mut x = self.header_rows_width;
            for (col, &tw) in self.thickness_cols.iter().enumerate() {
                if x > size.width {
                    break;
                }
                let coord = CellCoord::new(col, row);
                let rect = Rect::new(x, y, tw - 1, th - 1);
                let surface = self.base.surface_mut();
                let bg = if self.selection.is_cell_selected(coord) {
                    COLOR_SELECTED
                } else {
                    COLOR_CELL_BG
                };
                surface.fill_rect(rect, bg);

                if let Some(cell) = self.sheet.cell(coord).filter(|c| !c.formula().is_empty()) {
                    let (color, align) = if cell.has_error() {
                        (COLOR_ERROR_TEXT, TextAlign::Left)
                    } else {
                        (Color::BLACK, Self::cell_alignment(cell.value_type()))
                    };
                    TextLayout::new(self.shaper.clone(), cell.visible_text())
                        .draw_in_rect(surface, rect, align, color);
                }

                if coord == self.active_cell {
                    surface.draw_rect(rect, COLOR_ACTIVE_CELL);
                }
                x += tw;
            }
            y += th;
        }
    }
}

impl Widget for Grid {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn width_packed(&self) -> i32 {
        0
    }

    fn height_packed(&self) -> i32 {
        0
    }

    fn focusable(&self) -> bool {
        true
    }

    fn paint(&mut self) {
        self.base.clear_background();
        self.paint_headers();
        self.paint_cells();
        self.base.draw_border();
    }

    fn handle_event(&mut self, event: &Event, cx: &mut EventCx<'_>) -> bool {
        match event {
            Event::Mouse(mouse) if mouse.pressed && mouse.button == MouseButton::Left => {
                self.handle_press(mouse, cx)
            }
            Event::Mouse(mouse) if mouse.is_move() => {
                let shape = if self.row_edge_at(mouse.pos).is_some() {
                    CursorShape::SizeNS
                } else if self.col_edge_at(mouse.pos).is_some() {
                    CursorShape::SizeWE
                } else {
                    CursorShape::Arrow
                };
                cx.set_cursor(shape);
                true
            }
            Event::Key(key) => match key.key {
                Key::Control => {
                    self.key_ctrl = key.pressed;
                    true
                }
                Key::Shift => {
                    self.key_shift = key.pressed;
                    true
                }
                _ if !key.pressed => false,
                Key::Up | Key::Down | Key::Enter | Key::Left | Key::Right => {
                    self.step_active_cell(key.key, cx);
                    true
                }
                _ => match self.editor {
                    Some(editor) => cx.forward(editor, event),
                    None => false,
                },
            },
            Event::Text(_) => match self.editor {
                Some(editor) => cx.forward(editor, event),
                None => false,
            },
            _ => false,
        }
    }

    fn drag(&mut self, drag: &Drag, pos: Point, cx: &mut EventCx<'_>) {
        self.resize_to(drag, pos, cx);
    }

    fn ungrab(&mut self, drag: &Drag, pos: Point, cx: &mut EventCx<'_>) {
        self.resize_to(drag, pos, cx);
        cx.set_cursor(CursorShape::Arrow);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use ourwin_render::MonospaceShaper;

    use super::*;
    use crate::widget::context::Request;
    use crate::widget::events::{KeyEvent, TextEvent};
    use crate::widget::tree::WidgetTree;
    use crate::widget::widgets::{Container, TextEdit};

    fn setup() -> (WidgetTree, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new(Rc::new(MonospaceShaper::new(8, 16)));
        let root = tree.insert(Container::new(Rect::new(0, 0, 600, 400)));
        let editor = tree.add_child(root, TextEdit::new(tree.shaper())).unwrap();
        let grid = Grid::new(tree.shaper(), GridConfig::new().with_dimensions(5, 10)).with_editor(editor);
        let grid = tree.add_child(root, grid).unwrap();
        tree.set_rect(grid, Rect::new(0, 30, 400, 300));
        (tree, grid, editor)
    }

    fn send(tree: &mut WidgetTree, id: WidgetId, event: Event) -> Vec<Request> {
        let mut requests = Vec::new();
        tree.dispatch(id, &event, &mut requests);
        requests
    }

    /// Local position of the middle of a cell, with default sizes.
    fn cell_pos(col: i32, row: i32) -> Point {
        Point::new(40 + col * 50 + 25, 18 + row * 18 + 9)
    }

    #[test]
    fn test_bands() {
        let grid = Grid::new(Rc::new(MonospaceShaper::new(8, 16)), GridConfig::new().with_dimensions(3, 3));
        assert_eq!(grid.col_at(10), Band::Header);
        assert_eq!(grid.col_at(40), Band::At(0));
        assert_eq!(grid.col_at(139), Band::At(1));
        assert_eq!(grid.col_at(190), Band::Beyond);
        assert_eq!(grid.row_at(17), Band::Header);
        assert_eq!(grid.row_at(18 * 3 + 17), Band::At(2));
    }

    #[test]
    fn test_header_edges() {
        let grid = Grid::new(Rc::new(MonospaceShaper::new(8, 16)), GridConfig::new().with_dimensions(3, 3));
        // bottom of the column header band
        assert_eq!(grid.row_edge_at(Point::new(10, 19)), Some(None));
        // bottom of row 0
        assert_eq!(grid.row_edge_at(Point::new(10, 36)), Some(Some(0)));
        assert_eq!(grid.row_edge_at(Point::new(10, 27)), None);
        // row edges only live in the row header
        assert_eq!(grid.row_edge_at(Point::new(100, 36)), None);
        // right edge of column 1
        assert_eq!(grid.col_edge_at(Point::new(141, 5)), Some(Some(1)));
        assert_eq!(grid.col_edge_at(Point::new(41, 5)), Some(None));
    }

    #[test]
    fn test_click_commits_editor_and_loads_next_formula() {
        let (mut tree, grid, editor) = setup();
        tree.update::<Grid, _>(grid, |g| g.set_formula(CellCoord::new(1, 1), "=2*3")).unwrap();

        tree.update::<TextEdit, _>(editor, |e| e.set_text("42")).unwrap();
        let requests = send(&mut tree, grid, Event::Mouse(MouseEvent::press(cell_pos(1, 1), MouseButton::Left)));
        assert!(requests.contains(&Request::TakeFocus(grid)));

        let g = tree.get_as::<Grid>(grid).unwrap();
        assert_eq!(g.active_cell(), CellCoord::new(1, 1));
        assert_eq!(g.sheet().visible_text(CellCoord::new(0, 0)), "42");
        assert_eq!(tree.get_as::<TextEdit>(editor).unwrap().text(), "=2*3");
    }

    #[test]
    fn test_arrow_keys_move_and_typing_reaches_editor() {
        let (mut tree, grid, editor) = setup();
        send(&mut tree, grid, Event::Text(TextEvent::commit("=1+1")));
        assert_eq!(tree.get_as::<TextEdit>(editor).unwrap().text(), "=1+1");

        send(&mut tree, grid, Event::Key(KeyEvent::press(Key::Enter)));
        let g = tree.get_as::<Grid>(grid).unwrap();
        assert_eq!(g.active_cell(), CellCoord::new(0, 1));
        assert_eq!(g.sheet().visible_text(CellCoord::new(0, 0)), "2");
        assert_eq!(tree.get_as::<TextEdit>(editor).unwrap().text(), "");

        send(&mut tree, grid, Event::Key(KeyEvent::press(Key::Up)));
        send(&mut tree, grid, Event::Key(KeyEvent::press(Key::Up)));
        send(&mut tree, grid, Event::Key(KeyEvent::press(Key::Left)));
        let g = tree.get_as::<Grid>(grid).unwrap();
        assert_eq!(g.active_cell(), CellCoord::new(0, 0));
        assert_eq!(tree.get_as::<TextEdit>(editor).unwrap().text(), "=1+1");
    }

    #[test]
    fn test_header_clicks_select() {
        let (mut tree, grid, _) = setup();
        send(&mut tree, grid, Event::Mouse(MouseEvent::press((20, 18 + 2 * 18 + 9), MouseButton::Left)));
        let g = tree.get_as::<Grid>(grid).unwrap();
        assert!(g.selection().is_row_selected(2));
        assert!(g.selection().is_cell_selected(CellCoord::new(4, 2)));

        send(&mut tree, grid, Event::Key(KeyEvent::press(Key::Control)));
        send(&mut tree, grid, Event::Mouse(MouseEvent::press((40 + 3 * 50 + 25, 9), MouseButton::Left)));
        let g = tree.get_as::<Grid>(grid).unwrap();
        assert!(g.selection().is_row_selected(2));
        assert!(g.selection().is_col_selected(3));

        send(&mut tree, grid, Event::Key(KeyEvent::release(Key::Control)));
        send(&mut tree, grid, Event::Mouse(MouseEvent::press((5, 5), MouseButton::Left)));
        assert!(tree.get_as::<Grid>(grid).unwrap().selection().is_all_selected());
    }

    #[test]
    fn test_shift_click_selects_region_from_active_cell() {
        let (mut tree, grid, _) = setup();
        send(&mut tree, grid, Event::Mouse(MouseEvent::press(cell_pos(1, 1), MouseButton::Left)));
        send(&mut tree, grid, Event::Key(KeyEvent::press(Key::Shift)));
        send(&mut tree, grid, Event::Mouse(MouseEvent::press(cell_pos(3, 4), MouseButton::Left)));

        let g = tree.get_as::<Grid>(grid).unwrap();
        assert_eq!(g.active_cell(), CellCoord::new(1, 1));
        assert!(g.selection().is_cell_selected(CellCoord::new(2, 3)));
        assert!(!g.selection().is_cell_selected(CellCoord::new(0, 3)));
    }

    #[test]
    fn test_edge_press_grabs_and_drag_resizes() {
        let (mut tree, grid, _) = setup();
        let requests = send(&mut tree, grid, Event::Mouse(MouseEvent::press((90, 5), MouseButton::Left)));
        let grab = requests.iter().find_map(|r| match r {
            Request::GrabMouse { kind, origin, .. } => Some((*kind, *origin)),
            _ => None,
        });
        let (kind, origin) = grab.unwrap();
        assert_eq!(
            kind,
            DragKind::ResizeColumn {
                index: Some(0),
                thickness_at_grab: 50
            }
        );

        let drag = Drag { kind, origin };
        let mut requests = Vec::new();
        tree.dispatch_drag(grid, &drag, Point::new(110, 5), &mut requests);
        assert_eq!(tree.get_as::<Grid>(grid).unwrap().column_width(0), Some(70));
        tree.dispatch_ungrab(grid, &drag, Point::new(0, 5), &mut requests);
        assert_eq!(tree.get_as::<Grid>(grid).unwrap().column_width(0), Some(1));
    }

    #[test]
    fn test_click_beyond_last_cell_is_ignored() {
        let (mut tree, grid, _) = setup();
        let requests = send(&mut tree, grid, Event::Mouse(MouseEvent::press((390, 100), MouseButton::Left)));
        assert!(requests.is_empty());
        assert_eq!(tree.get_as::<Grid>(grid).unwrap().active_cell(), CellCoord::new(0, 0));
    }

    #[test]
    fn test_insert_keeps_geometry_in_step() {
        let (mut tree, grid, _) = setup();
        tree.update::<Grid, _>(grid, |g| {
            assert!(g.insert_rows(2, 0));
            assert!(g.insert_columns(1, 5));
            assert!(!g.insert_columns(1, 7));
            assert!(g.has_integrity());
            assert_eq!(g.row_count(), 12);
            assert_eq!(g.col_count(), 6);
        })
        .unwrap();
    }

    #[test]
    fn test_cell_changed_signal() {
        use std::sync::Arc;

        use parking_lot::Mutex;

        let mut grid = Grid::new(Rc::new(MonospaceShaper::new(8, 16)), GridConfig::new().with_dimensions(3, 3));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        grid.cell_changed.connect(move |cell| sink.lock().push(*cell));

        grid.set_formula(CellCoord::new(0, 0), "1");
        grid.set_formula(CellCoord::new(1, 0), "=A0+1");
        grid.set_formula(CellCoord::new(0, 0), "5");
        assert_eq!(
            *seen.lock(),
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(0, 0),
                CellCoord::new(1, 0)
            ]
        );
    }

    #[test]
    fn test_paint_marks_active_cell_and_errors() {
        let mut grid = Grid::new(Rc::new(MonospaceShaper::new(8, 16)), GridConfig::new().with_dimensions(3, 3));
        grid.set_formula(CellCoord::new(1, 0), "=1/0");
        grid.paint();
        let surface = grid.base().surface();
        // active cell outline at the top-left corner of A0
        assert_eq!(surface.pixel(40, 18), Some(COLOR_ACTIVE_CELL));
        // column header background
        assert_eq!(surface.pixel(45, 1), Some(COLOR_HEADER_BG));
        // gridline between cells shows the widget background
        assert_eq!(surface.pixel(89, 25), Some(COLOR_BG));
    }
}
