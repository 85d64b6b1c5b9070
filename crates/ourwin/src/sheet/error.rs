//! Error types for the spreadsheet model.

use thiserror::Error;

use super::cell::CellCoord;

/// A failure reported by an [`Evaluator`](super::Evaluator).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The expression could not be parsed.
    #[error("syntax error at {position}: {message}")]
    Parse { position: usize, message: String },

    /// A name that is neither a function nor a cell inside the sheet.
    #[error("unknown reference `{0}`")]
    UnknownReference(String),

    /// An operand had the wrong type.
    #[error("type error: {0}")]
    Type(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    /// A function was called with the wrong number of arguments.
    #[error("{name} expects {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: &'static str,
        got: usize,
    },
}

/// Why a cell shows an error instead of a value.
///
/// The `Display` output is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CellError {
    /// The evaluator rejected the formula or literal.
    #[error("{0}")]
    Evaluation(#[from] EvalError),

    /// The cell depends on itself, directly or through other cells.
    #[error("circular dependency")]
    CircularDependency,

    /// A cell this one reads is in error.
    #[error("{0} has an error")]
    UpstreamError(CellCoord),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_error_messages() {
        let upstream = CellError::UpstreamError(CellCoord::new(1, 12));
        assert_eq!(upstream.to_string(), "B12 has an error");

        let eval: CellError = EvalError::DivisionByZero.into();
        assert_eq!(eval.to_string(), "division by zero");
        assert_eq!(CellError::CircularDependency.to_string(), "circular dependency");
    }
}
