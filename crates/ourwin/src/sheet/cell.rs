//! Cell coordinates, values and per-cell state.

use std::collections::BTreeSet;
use std::fmt;

use super::error::CellError;

/// Position of a cell, zero-based.
///
/// The display name joins the column letters (`A`..`Z`, `AA`, ...) with the
/// zero-based row number, so the top-left cell is `A0` and column 1 of
/// row 12 is `B12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CellCoord {
    pub col: usize,
    pub row: usize,
}

impl CellCoord {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// The cell's display name, such as `B12`.
    pub fn name(&self) -> String {
        format!("{}{}", column_name(self.col), self.row)
    }

    /// Parse a cell name. Column letters may be lowercase.
    ///
    /// Returns `None` for anything that is not letters followed by digits.
    pub fn parse(name: &str) -> Option<Self> {
        let split = name.find(|c: char| !c.is_ascii_alphabetic())?;
        let (letters, digits) = name.split_at(split);
        if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let mut col: usize = 0;
        for b in letters.bytes() {
            let v = (b.to_ascii_uppercase() - b'A') as usize + 1;
            col = col.checked_mul(26)?.checked_add(v)?;
        }
        let row = digits.parse().ok()?;
        Some(Self::new(col - 1, row))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_name(self.col), self.row)
    }
}

/// Letters naming column `col`: `A`..`Z`, then `AA`, `AB`, ...
pub fn column_name(col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Type of an evaluated cell, used for default alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    #[default]
    Empty,
    Number,
    Text,
    Bool,
}

/// An evaluated cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Empty => ValueType::Empty,
            Value::Number(_) => ValueType::Number,
            Value::Text(_) => ValueType::Text,
            Value::Bool(_) => ValueType::Bool,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }
}

impl fmt::Display for Value {
    /// Whole numbers print without a fractional part; booleans print as
    /// `TRUE` and `FALSE`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::Bool(true) => f.write_str("TRUE"),
            Value::Bool(false) => f.write_str("FALSE"),
        }
    }
}

/// Everything the sheet knows about one cell.
///
/// `dependencies` are the cells this one reads; `dependents` are the cells
/// that read this one. Across a sheet the two are mutual inverses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellData {
    pub(crate) formula: String,
    pub(crate) display: String,
    pub(crate) value: Value,
    pub(crate) error: Option<CellError>,
    pub(crate) dependencies: BTreeSet<CellCoord>,
    pub(crate) dependents: BTreeSet<CellCoord>,
}

/// Text shown in place of a value when a cell is in error.
pub const ERROR_TEXT: &str = "Error";

impl CellData {
    /// The raw text the user entered.
    pub fn formula(&self) -> &str {
        &self.formula
    }

    /// Check if the raw text is a formula rather than a literal.
    pub fn is_formula(&self) -> bool {
        self.formula.starts_with('=')
    }

    /// The rendered value, ignoring any error.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// What the grid shows for this cell.
    pub fn visible_text(&self) -> &str {
        if self.error.is_some() {
            ERROR_TEXT
        } else {
            &self.display
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_type(&self) -> ValueType {
        self.value.value_type()
    }

    pub fn error(&self) -> Option<&CellError> {
        self.error.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Human-readable error message, if the cell is in error.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Cells this one reads.
    pub fn dependencies(&self) -> &BTreeSet<CellCoord> {
        &self.dependencies
    }

    /// Cells that read this one.
    pub fn dependents(&self) -> &BTreeSet<CellCoord> {
        &self.dependents
    }

    pub(crate) fn set_value(&mut self, value: Value) {
        self.display = value.to_string();
        self.value = value;
        self.error = None;
    }

    pub(crate) fn set_error(&mut self, error: CellError) {
        self.display.clear();
        self.value = Value::Empty;
        self.error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn test_cell_names() {
        assert_eq!(CellCoord::new(1, 12).name(), "B12");
        assert_eq!(CellCoord::parse("B12"), Some(CellCoord::new(1, 12)));
        assert_eq!(CellCoord::parse("aa0"), Some(CellCoord::new(26, 0)));
        assert_eq!(CellCoord::parse("A"), None);
        assert_eq!(CellCoord::parse("12"), None);
        assert_eq!(CellCoord::parse("A1B"), None);
        assert_eq!(CellCoord::new(27, 3).to_string(), "AB3");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Number(10.0).to_string(), "10");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-3.0).to_string(), "-3");
        assert_eq!(Value::Bool(true).to_string(), "TRUE");
        assert_eq!(Value::Empty.to_string(), "");
    }

    #[test]
    fn test_visible_text_masks_error() {
        let mut cell = CellData::default();
        cell.set_value(Value::Number(4.0));
        assert_eq!(cell.visible_text(), "4");
        cell.set_error(CellError::CircularDependency);
        assert_eq!(cell.visible_text(), ERROR_TEXT);
        assert_eq!(cell.error_message().as_deref(), Some("circular dependency"));
    }
}
