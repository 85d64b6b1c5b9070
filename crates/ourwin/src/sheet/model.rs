//! The cell table and its dependency graph.
//!
//! Every formula edit goes through [`Sheet::set_formula`], which keeps the
//! dependency graph consistent and recalculates everything downstream of the
//! edited cell.
//!
//! # Recalculation
//!
//! After a cell is re-evaluated, the set of cells that transitively depend
//! on it is recalculated in topological order (Kahn's algorithm over the
//! dependency edges inside that set), so each cell is evaluated once and
//! only after everything it reads. Cells left over once no cell with zero
//! in-degree remains sit on or behind a cycle. Cycle members are put in the
//! circular-dependency state; the rest are evaluated afterwards in their own
//! topological order and pick up an upstream error.
//!
//! # Cycle detection
//!
//! When a formula is (re-)evaluated its new edges are inserted first. The
//! formula is rejected as circular if the cell can reach itself by following
//! dependency edges. Edges to cells that no longer exist are ignored.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use ourwin_core::logging::{span_names, targets};

use super::cell::{CellCoord, CellData, Value};
use super::error::{CellError, EvalError};
use super::evaluator::{ArithmeticEvaluator, CellLookup, Evaluator};

/// Prefix that marks input as a formula.
pub const FORMULA_PREFIX: char = '=';

/// A table of cells with formula recalculation.
pub struct Sheet {
    /// Row-major cell storage; every row has `col_count` cells.
    cells: Vec<Vec<CellData>>,
    col_count: usize,
    evaluator: Box<dyn Evaluator>,
}

impl std::fmt::Debug for Sheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sheet")
            .field("cols", &self.col_count)
            .field("rows", &self.cells.len())
            .finish()
    }
}

struct Cells<'a>(&'a [Vec<CellData>]);

impl CellLookup for Cells<'_> {
    fn value(&self, coord: CellCoord) -> Option<Value> {
        self.0
            .get(coord.row)
            .and_then(|row| row.get(coord.col))
            .map(|cell| cell.value.clone())
    }

    fn contains(&self, coord: CellCoord) -> bool {
        self.0.get(coord.row).is_some_and(|row| coord.col < row.len())
    }
}

impl Sheet {
    /// Create an empty sheet using [`ArithmeticEvaluator`].
    pub fn new(cols: usize, rows: usize) -> Self {
        Self::with_evaluator(cols, rows, Box::new(ArithmeticEvaluator))
    }

    /// Create an empty sheet with a custom formula language.
    pub fn with_evaluator(cols: usize, rows: usize, evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            cells: vec![vec![CellData::default(); cols]; rows],
            col_count: cols,
            evaluator,
        }
    }

    #[inline]
    pub fn col_count(&self) -> usize {
        self.col_count
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row < self.row_count() && coord.col < self.col_count
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&CellData> {
        self.cells.get(coord.row).and_then(|row| row.get(coord.col))
    }

    fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut CellData> {
        self.cells.get_mut(coord.row).and_then(|row| row.get_mut(coord.col))
    }

    /// Raw input of a cell; empty outside the sheet.
    pub fn formula(&self, coord: CellCoord) -> &str {
        self.cell(coord).map(CellData::formula).unwrap_or("")
    }

    /// What the grid shows for a cell; empty outside the sheet.
    pub fn visible_text(&self, coord: CellCoord) -> &str {
        self.cell(coord).map(CellData::visible_text).unwrap_or("")
    }

    /// Iterate over every cell with non-empty input.
    pub fn filled_cells(&self) -> impl Iterator<Item = (CellCoord, &CellData)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| !cell.formula.is_empty())
                .map(move |(col, cell)| (CellCoord::new(col, row), cell))
        })
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Store new input for a cell and recalculate what depends on it.
    ///
    /// Returns the cells whose visible text changed, the edited cell first
    /// and its dependents in recalculation order. Setting a cell to the text
    /// it already holds, or addressing a cell outside the sheet, does
    /// nothing.
    pub fn set_formula(&mut self, coord: CellCoord, text: &str) -> Vec<CellCoord> {
        let Some(cell) = self.cell(coord) else {
            tracing::debug!(target: targets::SHEET, %coord, "set_formula outside the sheet");
            return Vec::new();
        };
        if cell.formula == text {
            return Vec::new();
        }
        let _span = tracing::debug_span!(target: targets::SHEET, span_names::RECALC, %coord).entered();

        self.unlink(coord);
        if let Some(cell) = self.cell_mut(coord) {
            cell.formula = text.to_owned();
        }

        let mut changed = Vec::new();
        if self.reevaluate(coord) {
            changed.push(coord);
        }

        let mut downstream = self.transitive_dependents(coord);
        downstream.remove(&coord);
        changed.extend(self.recalculate_set(downstream));

        debug_assert!(self.has_integrity());
        changed
    }

    /// Re-evaluate every cell, in dependency order.
    ///
    /// The dependency graph is rebuilt from the formulas first. Returns the
    /// cells whose visible text changed.
    pub fn recalculate_all(&mut self) -> Vec<CellCoord> {
        let _span = tracing::debug_span!(target: targets::SHEET, span_names::RECALC, all = true).entered();

        for row in &mut self.cells {
            for cell in row {
                cell.dependencies.clear();
                cell.dependents.clear();
            }
        }

        let filled: BTreeSet<CellCoord> = self.filled_cells().map(|(coord, _)| coord).collect();
        for &coord in &filled {
            let Some(formula) = self.cell(coord).map(|c| c.formula.clone()) else {
                continue;
            };
            let Some(expr) = formula.strip_prefix(FORMULA_PREFIX) else {
                continue;
            };
            if let Ok(names) = self.evaluator.parse_references(expr, &Cells(&self.cells)) {
                for dep in names.iter().filter_map(|n| CellCoord::parse(n)) {
                    self.link(coord, dep);
                }
            }
        }

        let changed = self.recalculate_set(filled);
        debug_assert!(self.has_integrity());
        changed
    }

    /// Re-evaluate a single cell from its stored input.
    ///
    /// The cell's outgoing edges are rebuilt from the formula. Dependents are
    /// not touched. Returns whether the visible text changed.
    pub fn reevaluate(&mut self, coord: CellCoord) -> bool {
        let Some(cell) = self.cell(coord) else {
            return false;
        };
        let old_visible = cell.visible_text().to_owned();
        let formula = cell.formula.clone();

        self.unlink(coord);
        let outcome = match formula.strip_prefix(FORMULA_PREFIX) {
            None => self
                .evaluator
                .parse_literal(&formula)
                .map_err(CellError::from),
            Some(expr) => self.evaluate_formula(coord, expr),
        };

        let Some(cell) = self.cell_mut(coord) else {
            return false;
        };
        match outcome {
            Ok(value) => cell.set_value(value),
            Err(error) => {
                tracing::debug!(target: targets::SHEET, %coord, %error, "cell in error");
                cell.set_error(error);
            }
        }
        cell.visible_text() != old_visible
    }

    fn evaluate_formula(&mut self, coord: CellCoord, expr: &str) -> Result<Value, CellError> {
        let names = self.evaluator.parse_references(expr, &Cells(&self.cells))?;

        let mut error = None;
        for name in names {
            let Some(dep) = CellCoord::parse(&name).filter(|&c| self.contains(c)) else {
                error.get_or_insert(CellError::Evaluation(EvalError::UnknownReference(name)));
                continue;
            };
            if dep != coord && self.cell(dep).is_some_and(CellData::has_error) {
                error.get_or_insert(CellError::UpstreamError(dep));
            }
            self.link(coord, dep);
        }

        if self.reaches_itself(coord) {
            tracing::warn!(target: targets::SHEET, %coord, "circular dependency");
            return Err(CellError::CircularDependency);
        }
        if let Some(error) = error {
            return Err(error);
        }

        Ok(self.evaluator.evaluate(expr, &Cells(&self.cells))?)
    }

    // =========================================================================
    // Graph maintenance
    // =========================================================================

    /// Record that `cell` reads `dep`.
    fn link(&mut self, cell: CellCoord, dep: CellCoord) {
        if !self.contains(dep) {
            return;
        }
        if let Some(c) = self.cell_mut(cell) {
            c.dependencies.insert(dep);
        }
        if let Some(d) = self.cell_mut(dep) {
            d.dependents.insert(cell);
        }
    }

    /// Remove every outgoing edge of `coord`, and the matching reverse edges.
    fn unlink(&mut self, coord: CellCoord) {
        let Some(cell) = self.cell_mut(coord) else {
            return;
        };
        let old = std::mem::take(&mut cell.dependencies);
        for dep in old {
            if let Some(d) = self.cell_mut(dep) {
                d.dependents.remove(&coord);
            }
        }
    }

    /// Check if `coord` can reach itself along dependency edges.
    fn reaches_itself(&self, coord: CellCoord) -> bool {
        let mut visited = BTreeSet::new();
        let mut stack: Vec<CellCoord> = self
            .cell(coord)
            .map(|c| c.dependencies.iter().copied().collect())
            .unwrap_or_default();

        while let Some(next) = stack.pop() {
            if next == coord {
                return true;
            }
            if !visited.insert(next) {
                continue;
            }
            if let Some(cell) = self.cell(next) {
                stack.extend(cell.dependencies.iter().copied());
            }
        }
        false
    }

    /// Every cell reachable from `coord` along dependent edges.
    fn transitive_dependents(&self, coord: CellCoord) -> BTreeSet<CellCoord> {
        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<CellCoord> = self
            .cell(coord)
            .map(|c| c.dependents.iter().copied().collect())
            .unwrap_or_default();

        while let Some(next) = queue.pop_front() {
            if !seen.insert(next) {
                continue;
            }
            if let Some(cell) = self.cell(next) {
                queue.extend(cell.dependents.iter().copied());
            }
        }
        seen
    }

    /// Topological order of `nodes` over the dependency edges between them.
    ///
    /// Returns the ordered nodes and the ones that could not be ordered.
    fn kahn_order(&self, nodes: &BTreeSet<CellCoord>) -> (Vec<CellCoord>, BTreeSet<CellCoord>) {
        let mut in_degree: BTreeMap<CellCoord, usize> = nodes
            .iter()
            .map(|&n| {
                let degree = self
                    .cell(n)
                    .map(|c| c.dependencies.iter().filter(|d| nodes.contains(d)).count())
                    .unwrap_or(0);
                (n, degree)
            })
            .collect();

        let mut ready: VecDeque<CellCoord> = in_degree
            .iter()
            .filter(|&(_, &d)| d == 0)
            .map(|(&n, _)| n)
            .collect();
        let mut order = Vec::with_capacity(nodes.len());

        while let Some(node) = ready.pop_front() {
            order.push(node);
            let Some(cell) = self.cell(node) else {
                continue;
            };
            for dependent in &cell.dependents {
                if let Some(degree) = in_degree.get_mut(dependent) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 {
                        ready.push_back(*dependent);
                    }
                }
            }
        }

        let ordered: BTreeSet<CellCoord> = order.iter().copied().collect();
        let leftover = nodes.difference(&ordered).copied().collect();
        (order, leftover)
    }

    /// Re-evaluate `nodes` so that every cell runs after the cells it reads.
    fn recalculate_set(&mut self, nodes: BTreeSet<CellCoord>) -> Vec<CellCoord> {
        let (order, leftover) = self.kahn_order(&nodes);
        let mut changed: Vec<CellCoord> = order.into_iter().filter(|&c| self.reevaluate(c)).collect();
        if leftover.is_empty() {
            return changed;
        }

        let (cyclic, behind): (BTreeSet<CellCoord>, BTreeSet<CellCoord>) =
            leftover.into_iter().partition(|&c| self.reaches_itself(c));
        tracing::warn!(
            target: targets::SHEET,
            cyclic = cyclic.len(),
            downstream = behind.len(),
            "recalculation found cycles"
        );

        for &coord in &cyclic {
            let Some(cell) = self.cell_mut(coord) else {
                continue;
            };
            let old_visible = cell.visible_text().to_owned();
            cell.set_error(CellError::CircularDependency);
            if cell.visible_text() != old_visible {
                changed.push(coord);
            }
        }

        let (order, _) = self.kahn_order(&behind);
        changed.extend(order.into_iter().filter(|&c| self.reevaluate(c)));
        changed
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Insert empty rows before row `before`, then recalculate everything.
    ///
    /// Formulas are kept as typed and are not rewritten. Returns `false` if
    /// `before` is past the last row.
    pub fn insert_rows(&mut self, count: usize, before: usize) -> bool {
        debug_assert!(self.has_integrity());
        if before > self.row_count() {
            return false;
        }
        let blank = vec![CellData::default(); self.col_count];
        self.cells
            .splice(before..before, std::iter::repeat_n(blank, count));
        self.recalculate_all();
        true
    }

    /// Insert empty columns before column `before`, then recalculate
    /// everything.
    pub fn insert_columns(&mut self, count: usize, before: usize) -> bool {
        debug_assert!(self.has_integrity());
        if before > self.col_count {
            return false;
        }
        for row in &mut self.cells {
            row.splice(before..before, std::iter::repeat_n(CellData::default(), count));
        }
        self.col_count += count;
        self.recalculate_all();
        true
    }

    /// Check the structural invariants: rectangular storage, and dependency
    /// edges that are mutual inverses pointing inside the sheet.
    pub fn has_integrity(&self) -> bool {
        if self.cells.iter().any(|row| row.len() != self.col_count) {
            return false;
        }
        self.cells.iter().enumerate().all(|(r, row)| {
            row.iter().enumerate().all(|(c, cell)| {
                let here = CellCoord::new(c, r);
                cell.dependencies
                    .iter()
                    .all(|d| self.cell(*d).is_some_and(|dc| dc.dependents.contains(&here)))
                    && cell
                        .dependents
                        .iter()
                        .all(|d| self.cell(*d).is_some_and(|dc| dc.dependencies.contains(&here)))
            })
        })
    }
}
