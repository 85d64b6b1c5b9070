//! Which cells of a grid are selected.
//!
//! A selection is built from layers. From highest to lowest priority:
//!
//! 1. explicit per-cell overrides (selected or unselected),
//! 2. rectangular regions, most recently added first,
//! 3. whole selected rows and columns,
//! 4. the select-all flag, minus unselected rows and columns.
//!
//! [`Selection::is_cell_selected`] resolves a cell by asking each layer in
//! turn; the first layer with an opinion wins.

use std::collections::{BTreeSet, VecDeque};

use super::cell::CellCoord;

/// A rectangle of cells that is selected or deselected as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRegion {
    pub from: CellCoord,
    pub to: CellCoord,
    /// `false` carves the rectangle out of whatever lies beneath.
    pub selected: bool,
}

impl SelectionRegion {
    pub fn new(from: CellCoord, to: CellCoord, selected: bool) -> Self {
        Self { from, to, selected }
    }

    /// Check if `cell` lies inside the rectangle, corners in any order.
    pub fn contains(&self, cell: CellCoord) -> bool {
        let (c0, c1) = min_max(self.from.col, self.to.col);
        let (r0, r1) = min_max(self.from.row, self.to.row);
        (c0..=c1).contains(&cell.col) && (r0..=r1).contains(&cell.row)
    }
}

fn min_max(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Layered cell selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected_cols: BTreeSet<usize>,
    selected_rows: BTreeSet<usize>,
    unselected_cols: BTreeSet<usize>,
    unselected_rows: BTreeSet<usize>,
    selected_cells: BTreeSet<CellCoord>,
    unselected_cells: BTreeSet<CellCoord>,
    /// Most recent first.
    regions: VecDeque<SelectionRegion>,
    selected_all: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing is selected at any layer.
    pub fn is_empty(&self) -> bool {
        !self.selected_all
            && self.selected_cols.is_empty()
            && self.selected_rows.is_empty()
            && self.selected_cells.is_empty()
            && self.regions.iter().all(|r| !r.selected)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_all_selected(&self) -> bool {
        self.selected_all
    }

    pub fn select_all(&mut self) {
        self.clear();
        self.selected_all = true;
    }

    pub fn regions(&self) -> impl Iterator<Item = &SelectionRegion> {
        self.regions.iter()
    }

    /// Layer a rectangle on top of the current selection.
    pub fn add_region(&mut self, from: CellCoord, to: CellCoord, selected: bool) {
        self.regions.push_front(SelectionRegion::new(from, to, selected));
    }

    /// Resolve whether a single cell is selected.
    pub fn is_cell_selected(&self, cell: CellCoord) -> bool {
        if self.selected_cells.contains(&cell) {
            return true;
        }
        if self.unselected_cells.contains(&cell) {
            return false;
        }
        if let Some(region) = self.regions.iter().find(|r| r.contains(cell)) {
            return region.selected;
        }
        self.bulk_selected(cell)
    }

    /// Row, column and select-all layers only.
    fn bulk_selected(&self, cell: CellCoord) -> bool {
        if self.selected_rows.contains(&cell.row) || self.selected_cols.contains(&cell.col) {
            return true;
        }
        self.selected_all
            && !self.unselected_rows.contains(&cell.row)
            && !self.unselected_cols.contains(&cell.col)
    }

    pub fn is_col_selected(&self, col: usize) -> bool {
        self.selected_cols.contains(&col)
    }

    pub fn is_row_selected(&self, row: usize) -> bool {
        self.selected_rows.contains(&row)
    }

    pub fn is_col_unselected(&self, col: usize) -> bool {
        self.unselected_cols.contains(&col)
    }

    pub fn is_row_unselected(&self, row: usize) -> bool {
        self.unselected_rows.contains(&row)
    }

    /// Check if any cell of the column may be selected; used to tint the
    /// column header.
    pub fn does_col_have_selection(&self, col: usize) -> bool {
        (self.selected_all && !self.unselected_cols.contains(&col))
            || self.selected_cols.contains(&col)
            || self.selected_cells.iter().any(|c| c.col == col)
            || self.regions.iter().any(|r| {
                let (c0, c1) = min_max(r.from.col, r.to.col);
                r.selected && (c0..=c1).contains(&col)
            })
    }

    /// Check if any cell of the row may be selected.
    pub fn does_row_have_selection(&self, row: usize) -> bool {
        (self.selected_all && !self.unselected_rows.contains(&row))
            || self.selected_rows.contains(&row)
            || self.selected_cells.iter().any(|c| c.row == row)
            || self.regions.iter().any(|r| {
                let (r0, r1) = min_max(r.from.row, r.to.row);
                r.selected && (r0..=r1).contains(&row)
            })
    }

    /// Flip the row in the selected set. Returns `true` if it was selected.
    pub fn toggle_selected_row(&mut self, row: usize) -> bool {
        toggle(&mut self.selected_rows, row)
    }

    /// Flip the column in the selected set. Returns `true` if it was
    /// selected.
    pub fn toggle_selected_col(&mut self, col: usize) -> bool {
        toggle(&mut self.selected_cols, col)
    }

    /// Flip the row in the unselected set. Returns `true` if it was
    /// unselected.
    pub fn toggle_unselected_row(&mut self, row: usize) -> bool {
        toggle(&mut self.unselected_rows, row)
    }

    /// Flip the column in the unselected set. Returns `true` if it was
    /// unselected.
    pub fn toggle_unselected_col(&mut self, col: usize) -> bool {
        toggle(&mut self.unselected_cols, col)
    }

    pub fn clear_selected_cells_in_row(&mut self, row: usize) {
        self.selected_cells.retain(|c| c.row != row);
    }

    pub fn clear_selected_cells_in_col(&mut self, col: usize) {
        self.selected_cells.retain(|c| c.col != col);
    }

    /// Drop unselected-cell overrides in the row, except those that punch
    /// holes in a selected column.
    pub fn clear_unselected_cells_in_row(&mut self, row: usize) {
        let cols = &self.selected_cols;
        self.unselected_cells
            .retain(|c| c.row != row || cols.contains(&c.col));
    }

    /// Drop unselected-cell overrides in the column, except those that punch
    /// holes in a selected row.
    pub fn clear_unselected_cells_in_col(&mut self, col: usize) {
        let rows = &self.selected_rows;
        self.unselected_cells
            .retain(|c| c.col != col || rows.contains(&c.row));
    }

    /// Flip a single cell.
    ///
    /// Any override for the cell is dropped first; an override is then
    /// added only if the layers beneath disagree with the new state.
    pub fn toggle_selected_cell(&mut self, cell: CellCoord) {
        let want = !self.is_cell_selected(cell);
        self.selected_cells.remove(&cell);
        self.unselected_cells.remove(&cell);

        let beneath = self.is_cell_selected(cell);
        if beneath != want {
            if want {
                self.selected_cells.insert(cell);
            } else {
                self.unselected_cells.insert(cell);
            }
        }
    }

    /// Apply a plain or Ctrl click.
    ///
    /// `None` for a coordinate means the header band: `(None, None)` is the
    /// corner, `(None, Some(row))` a row header and `(Some(col), None)` a
    /// column header. Returns whether the selection changed.
    pub fn apply_click(&mut self, col: Option<usize>, row: Option<usize>, ctrl: bool) -> bool {
        if !ctrl {
            let had_selection = !self.is_empty();
            self.clear();
            return match (col, row) {
                (None, None) => {
                    self.selected_all = true;
                    true
                }
                (None, Some(row)) => {
                    self.selected_rows.insert(row);
                    true
                }
                (Some(col), None) => {
                    self.selected_cols.insert(col);
                    true
                }
                (Some(_), Some(_)) => had_selection,
            };
        }

        match (col, row) {
            (None, None) => {
                let changed = !self.selected_all;
                self.select_all();
                changed
            }
            (None, Some(row)) => {
                if self.selected_all {
                    if self.toggle_unselected_row(row) {
                        self.clear_selected_cells_in_row(row);
                    } else {
                        self.clear_unselected_cells_in_row(row);
                    }
                } else if self.toggle_selected_row(row) {
                    self.clear_unselected_cells_in_row(row);
                } else {
                    self.clear_selected_cells_in_row(row);
                }
                true
            }
            (Some(col), None) => {
                if self.selected_all {
                    if self.toggle_unselected_col(col) {
                        self.clear_selected_cells_in_col(col);
                    } else {
                        self.clear_unselected_cells_in_col(col);
                    }
                } else if self.toggle_selected_col(col) {
                    self.clear_unselected_cells_in_col(col);
                } else {
                    self.clear_selected_cells_in_col(col);
                }
                true
            }
            (Some(col), Some(row)) => {
                self.toggle_selected_cell(CellCoord::new(col, row));
                true
            }
        }
    }

    /// Move row indices at or after `from` down by `by` once rows have been
    /// inserted.
    pub(crate) fn shift_rows(&mut self, from: usize, by: usize) {
        let shift = |r: usize| if r >= from { r + by } else { r };
        self.selected_rows = self.selected_rows.iter().map(|&r| shift(r)).collect();
        self.unselected_rows = self.unselected_rows.iter().map(|&r| shift(r)).collect();
        let shift_cell = |c: &CellCoord| CellCoord::new(c.col, shift(c.row));
        self.selected_cells = self.selected_cells.iter().map(shift_cell).collect();
        self.unselected_cells = self.unselected_cells.iter().map(shift_cell).collect();
        for region in &mut self.regions {
            region.from.row = shift(region.from.row);
            region.to.row = shift(region.to.row);
        }
    }

    pub(crate) fn shift_cols(&mut self, from: usize, by: usize) {
        let shift = |c: usize| if c >= from { c + by } else { c };
        self.selected_cols = self.selected_cols.iter().map(|&c| shift(c)).collect();
        self.unselected_cols = self.unselected_cols.iter().map(|&c| shift(c)).collect();
        let shift_cell = |c: &CellCoord| CellCoord::new(shift(c.col), c.row);
        self.selected_cells = self.selected_cells.iter().map(shift_cell).collect();
        self.unselected_cells = self.unselected_cells.iter().map(shift_cell).collect();
        for region in &mut self.regions {
            region.from.col = shift(region.from.col);
            region.to.col = shift(region.to.col);
        }
    }
}

fn toggle(set: &mut BTreeSet<usize>, idx: usize) -> bool {
    let was = set.remove(&idx);
    if !was {
        set.insert(idx);
    }
    was
}
