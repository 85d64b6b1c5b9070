//! Spreadsheet model behind the [`Grid`](crate::widget::Grid) widget.
//!
//! [`Sheet`] stores the cells and their dependency graph and recalculates
//! formulas in topological order. Formula syntax lives behind the
//! [`Evaluator`] trait; [`ArithmeticEvaluator`] is the bundled language.
//! [`Selection`] tracks which cells are selected.

mod cell;
mod error;
mod evaluator;
mod model;
mod selection;

pub use cell::{CellCoord, CellData, ERROR_TEXT, Value, ValueType, column_name};
pub use error::{CellError, EvalError};
pub use evaluator::{ArithmeticEvaluator, CellLookup, Evaluator};
pub use model::{FORMULA_PREFIX, Sheet};
pub use selection::{Selection, SelectionRegion};
