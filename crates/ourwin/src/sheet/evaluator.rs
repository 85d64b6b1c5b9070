//! Formula evaluation.
//!
//! The sheet does not interpret formulas itself. It talks to an
//! [`Evaluator`] through three operations: extract the cell names an
//! expression reads, evaluate an expression against the current cell
//! values, and coerce literal input such as `"42"` into a typed value.
//!
//! [`ArithmeticEvaluator`] is the bundled implementation. It understands:
//!
//! - numbers, `"strings"`, `TRUE` and `FALSE`
//! - cell references such as `B12` and ranges such as `A0:B3`
//! - `+ - * / ^` on numbers, `&` string concatenation
//! - comparisons `= <> < <= > >=`
//! - the functions `SUM MIN MAX AVERAGE ABS IF LEN TODAY`
//!
//! Ranges are only accepted as function arguments.

use std::collections::BTreeSet;

use super::cell::{CellCoord, Value};
use super::error::EvalError;

/// Read access to cell values during evaluation.
pub trait CellLookup {
    /// The value of `coord`, or `None` if it lies outside the sheet.
    fn value(&self, coord: CellCoord) -> Option<Value>;

    /// Whether `coord` lies inside the sheet.
    fn contains(&self, coord: CellCoord) -> bool {
        self.value(coord).is_some()
    }
}

/// The formula language used by a sheet.
pub trait Evaluator {
    /// Names of the cells `expr` reads, without evaluating it.
    ///
    /// Ranges are expanded to every cell they cover. A range with a corner
    /// outside `cells` is rejected before it is expanded.
    fn parse_references(&self, expr: &str, cells: &dyn CellLookup) -> Result<BTreeSet<String>, EvalError>;

    /// Evaluate `expr` with the current cell values.
    fn evaluate(&self, expr: &str, cells: &dyn CellLookup) -> Result<Value, EvalError>;

    /// Coerce literal (non-formula) input into a value.
    fn parse_literal(&self, text: &str) -> Result<Value, EvalError>;
}

/// Evaluator for a small spreadsheet expression language.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticEvaluator;

impl ArithmeticEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for ArithmeticEvaluator {
    fn parse_references(&self, expr: &str, cells: &dyn CellLookup) -> Result<BTreeSet<String>, EvalError> {
        let ast = parse(expr)?;
        let mut names = BTreeSet::new();
        ast.collect_references(cells, &mut names)?;
        Ok(names)
    }

    fn evaluate(&self, expr: &str, cells: &dyn CellLookup) -> Result<Value, EvalError> {
        let ast = parse(expr)?;
        eval(&ast, cells)
    }

    fn parse_literal(&self, text: &str) -> Result<Value, EvalError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Value::Empty);
        }
        if let Some(n) = trimmed.parse::<f64>().ok().filter(|n| n.is_finite()) {
            return Ok(Value::Number(n));
        }
        if trimmed.eq_ignore_ascii_case("TRUE") {
            return Ok(Value::Bool(true));
        }
        if trimmed.eq_ignore_ascii_case("FALSE") {
            return Ok(Value::Bool(false));
        }
        Ok(Value::Text(text.to_owned()))
    }
}

// =============================================================================
// Tokenizer
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Str(String),
    Ident(String),
    Op(&'static str),
    LParen,
    RParen,
    Comma,
    Colon,
}

const OPERATORS: [&str; 12] = ["<=", ">=", "<>", "+", "-", "*", "/", "^", "&", "=", "<", ">"];

fn tokenize(src: &str) -> Result<Vec<(usize, Token)>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let start = pos;
            let mut end = pos;
            while let Some(&(i, d)) = chars.peek() {
                if d.is_ascii_digit() || d == '.' {
                    end = i + d.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let text = &src[start..end];
            let n = text.parse::<f64>().map_err(|_| EvalError::Parse {
                position: start,
                message: format!("invalid number `{text}`"),
            })?;
            tokens.push((start, Token::Number(n)));
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let start = pos;
            let mut end = pos;
            while let Some(&(i, d)) = chars.peek() {
                if d.is_alphanumeric() || d == '_' {
                    end = i + d.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push((start, Token::Ident(src[start..end].to_owned())));
            continue;
        }

        if c == '"' {
            chars.next();
            let mut text = String::new();
            let mut closed = false;
            while let Some((_, d)) = chars.next() {
                if d == '"' {
                    // "" inside a string is an escaped quote
                    if chars.peek().is_some_and(|&(_, e)| e == '"') {
                        chars.next();
                        text.push('"');
                        continue;
                    }
                    closed = true;
                    break;
                }
                text.push(d);
            }
            if !closed {
                return Err(EvalError::Parse {
                    position: pos,
                    message: "unterminated string".into(),
                });
            }
            tokens.push((pos, Token::Str(text)));
            continue;
        }

        let single = match c {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            ',' | ';' => Some(Token::Comma),
            ':' => Some(Token::Colon),
            _ => None,
        };
        if let Some(token) = single {
            chars.next();
            tokens.push((pos, token));
            continue;
        }

        let rest = &src[pos..];
        let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) else {
            return Err(EvalError::Parse {
                position: pos,
                message: format!("unexpected character `{c}`"),
            });
        };
        for _ in 0..op.chars().count() {
            chars.next();
        }
        tokens.push((pos, Token::Op(*op)));
    }

    Ok(tokens)
}

// =============================================================================
// Parser
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Literal(Value),
    Ref(CellCoord),
    Range(CellCoord, CellCoord),
    Neg(Box<Expr>),
    Binary(&'static str, Box<Expr>, Box<Expr>),
    Call(String, Vec<Expr>),
}

impl Expr {
    fn collect_references(&self, cells: &dyn CellLookup, names: &mut BTreeSet<String>) -> Result<(), EvalError> {
        match self {
            Expr::Literal(_) => {}
            Expr::Ref(coord) => {
                names.insert(coord.name());
            }
            Expr::Range(a, b) => {
                for coord in checked_range_cells(cells, *a, *b)? {
                    names.insert(coord.name());
                }
            }
            Expr::Neg(inner) => inner.collect_references(cells, names)?,
            Expr::Binary(_, lhs, rhs) => {
                lhs.collect_references(cells, names)?;
                rhs.collect_references(cells, names)?;
            }
            Expr::Call(_, args) => {
                for arg in args {
                    arg.collect_references(cells, names)?;
                }
            }
        }
        Ok(())
    }
}

/// Every cell in the rectangle spanned by `a` and `b`, row by row.
fn range_cells(a: CellCoord, b: CellCoord) -> impl Iterator<Item = CellCoord> {
    let (c0, c1) = (a.col.min(b.col), a.col.max(b.col));
    let (r0, r1) = (a.row.min(b.row), a.row.max(b.row));
    (r0..=r1).flat_map(move |row| (c0..=c1).map(move |col| CellCoord::new(col, row)))
}

/// Like [`range_cells`], but fails on the first corner outside `cells`.
///
/// Both corners inside means every cell between them is inside.
fn checked_range_cells(
    cells: &dyn CellLookup,
    a: CellCoord,
    b: CellCoord,
) -> Result<impl Iterator<Item = CellCoord>, EvalError> {
    for corner in [a, b] {
        if !cells.contains(corner) {
            return Err(EvalError::UnknownReference(corner.name()));
        }
    }
    Ok(range_cells(a, b))
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    len: usize,
}

fn parse(src: &str) -> Result<Expr, EvalError> {
    let mut parser = Parser {
        tokens: tokenize(src)?,
        pos: 0,
        len: src.len(),
    };
    let expr = parser.comparison()?;
    if let Some((at, token)) = parser.tokens.get(parser.pos) {
        return Err(EvalError::Parse {
            position: *at,
            message: format!("unexpected {token:?}"),
        });
    }
    Ok(expr)
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, t)| t)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.pos).map(|(p, _)| *p).unwrap_or(self.len)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(_, t)| t.clone());
        self.pos += 1;
        token
    }

    fn error(&self, message: impl Into<String>) -> EvalError {
        EvalError::Parse {
            position: self.position(),
            message: message.into(),
        }
    }

    fn eat_op(&mut self, ops: &[&'static str]) -> Option<&'static str> {
        match self.peek() {
            Some(Token::Op(op)) if ops.contains(op) => {
                let op = *op;
                self.pos += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn comparison(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.concat()?;
        while let Some(op) = self.eat_op(&["=", "<>", "<", "<=", ">", ">="]) {
            let rhs = self.concat()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn concat(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.additive()?;
        while let Some(op) = self.eat_op(&["&"]) {
            let rhs = self.additive()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn additive(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.term()?;
        while let Some(op) = self.eat_op(&["+", "-"]) {
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.eat_op(&["*", "/"]) {
            let rhs = self.unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, EvalError> {
        match self.eat_op(&["-", "+"]) {
            Some("-") => Ok(Expr::Neg(Box::new(self.unary()?))),
            Some(_) => self.unary(),
            None => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, EvalError> {
        let base = self.primary()?;
        if self.eat_op(&["^"]).is_some() {
            // right associative
            let exponent = self.unary()?;
            return Ok(Expr::Binary("^", Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        let at = self.position();
        match self.next() {
            Some(Token::Number(n)) => Ok(Expr::Literal(Value::Number(n))),
            Some(Token::Str(s)) => Ok(Expr::Literal(Value::Text(s))),
            Some(Token::LParen) => {
                let inner = self.comparison()?;
                match self.next() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(self.error("expected `)`")),
                }
            }
            Some(Token::Ident(name)) => self.identifier(name, at),
            Some(token) => Err(EvalError::Parse {
                position: at,
                message: format!("unexpected {token:?}"),
            }),
            None => Err(self.error("unexpected end of formula")),
        }
    }

    fn identifier(&mut self, name: String, at: usize) -> Result<Expr, EvalError> {
        if self.peek() == Some(&Token::LParen) {
            self.pos += 1;
            let args = self.arguments()?;
            return Ok(Expr::Call(name.to_ascii_uppercase(), args));
        }
        if name.eq_ignore_ascii_case("TRUE") {
            return Ok(Expr::Literal(Value::Bool(true)));
        }
        if name.eq_ignore_ascii_case("FALSE") {
            return Ok(Expr::Literal(Value::Bool(false)));
        }

        let start = CellCoord::parse(&name).ok_or(EvalError::UnknownReference(name))?;
        if self.peek() != Some(&Token::Colon) {
            return Ok(Expr::Ref(start));
        }
        self.pos += 1;
        match self.next() {
            Some(Token::Ident(end)) => {
                let end = CellCoord::parse(&end).ok_or(EvalError::UnknownReference(end))?;
                Ok(Expr::Range(start, end))
            }
            _ => Err(EvalError::Parse {
                position: at,
                message: "incomplete range".into(),
            }),
        }
    }

    fn arguments(&mut self) -> Result<Vec<Expr>, EvalError> {
        let mut args = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            args.push(self.comparison()?);
            match self.next() {
                Some(Token::Comma) => continue,
                Some(Token::RParen) => return Ok(args),
                _ => return Err(self.error("expected `,` or `)`")),
            }
        }
    }
}

// =============================================================================
// Evaluation
// =============================================================================

fn eval(expr: &Expr, cells: &dyn CellLookup) -> Result<Value, EvalError> {
    match expr {
        Expr::Literal(v) => Ok(v.clone()),
        Expr::Ref(coord) => lookup(cells, *coord),
        Expr::Range(..) => Err(EvalError::Type("a range can only be used as a function argument".into())),
        Expr::Neg(inner) => Ok(Value::Number(-as_number(&eval(inner, cells)?)?)),
        Expr::Binary(op, lhs, rhs) => {
            let lhs = eval(lhs, cells)?;
            let rhs = eval(rhs, cells)?;
            binary(op, lhs, rhs)
        }
        Expr::Call(name, args) => call(name, args, cells),
    }
}

fn lookup(cells: &dyn CellLookup, coord: CellCoord) -> Result<Value, EvalError> {
    cells
        .value(coord)
        .ok_or_else(|| EvalError::UnknownReference(coord.name()))
}

fn as_number(value: &Value) -> Result<f64, EvalError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Empty => Ok(0.0),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| EvalError::Type(format!("`{s}` is not a number"))),
    }
}

fn binary(op: &str, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    match op {
        "&" => Ok(Value::Text(format!("{lhs}{rhs}"))),
        "+" | "-" | "*" | "/" | "^" => {
            let (a, b) = (as_number(&lhs)?, as_number(&rhs)?);
            let n = match op {
                "+" => a + b,
                "-" => a - b,
                "*" => a * b,
                "/" if b == 0.0 => return Err(EvalError::DivisionByZero),
                "/" => a / b,
                _ => a.powf(b),
            };
            if n.is_finite() {
                Ok(Value::Number(n))
            } else {
                Err(EvalError::Type("result is not a finite number".into()))
            }
        }
        _ => {
            let ordering = match (as_number(&lhs), as_number(&rhs)) {
                (Ok(a), Ok(b)) if !matches!((&lhs, &rhs), (Value::Text(_), Value::Text(_))) => {
                    a.partial_cmp(&b)
                }
                _ => Some(lhs.to_string().cmp(&rhs.to_string())),
            };
            let Some(ordering) = ordering else {
                return Ok(Value::Bool(false));
            };
            let result = match op {
                "=" => ordering.is_eq(),
                "<>" => ordering.is_ne(),
                "<" => ordering.is_lt(),
                "<=" => ordering.is_le(),
                ">" => ordering.is_gt(),
                _ => ordering.is_ge(),
            };
            Ok(Value::Bool(result))
        }
    }
}

/// Numbers among the arguments, with ranges expanded.
///
/// Inside ranges, cells that are not numbers are skipped; direct arguments
/// must coerce to numbers.
fn numeric_args(args: &[Expr], cells: &dyn CellLookup) -> Result<Vec<f64>, EvalError> {
    let mut numbers = Vec::new();
    for arg in args {
        match arg {
            Expr::Range(a, b) => {
                for coord in checked_range_cells(cells, *a, *b)? {
                    if let Value::Number(n) = lookup(cells, coord)? {
                        numbers.push(n);
                    }
                }
            }
            other => numbers.push(as_number(&eval(other, cells)?)?),
        }
    }
    Ok(numbers)
}

fn expect_arity(name: &str, args: &[Expr], expected: &'static str, ok: bool) -> Result<(), EvalError> {
    if ok {
        Ok(())
    } else {
        Err(EvalError::Arity {
            name: name.to_owned(),
            expected,
            got: args.len(),
        })
    }
}

fn call(name: &str, args: &[Expr], cells: &dyn CellLookup) -> Result<Value, EvalError> {
    match name {
        "SUM" => Ok(Value::Number(numeric_args(args, cells)?.iter().sum())),
        "MIN" | "MAX" => {
            let numbers = numeric_args(args, cells)?;
            let folded = if name == "MIN" {
                numbers.iter().copied().reduce(f64::min)
            } else {
                numbers.iter().copied().reduce(f64::max)
            };
            Ok(Value::Number(folded.unwrap_or(0.0)))
        }
        "AVERAGE" => {
            let numbers = numeric_args(args, cells)?;
            if numbers.is_empty() {
                return Err(EvalError::DivisionByZero);
            }
            Ok(Value::Number(numbers.iter().sum::<f64>() / numbers.len() as f64))
        }
        "ABS" => {
            expect_arity(name, args, "1", args.len() == 1)?;
            Ok(Value::Number(as_number(&eval(&args[0], cells)?)?.abs()))
        }
        "IF" => {
            expect_arity(name, args, "2 or 3", matches!(args.len(), 2 | 3))?;
            let condition = match eval(&args[0], cells)? {
                Value::Bool(b) => b,
                Value::Text(s) => !s.is_empty(),
                other => as_number(&other)? != 0.0,
            };
            match (condition, args.get(2)) {
                (true, _) => eval(&args[1], cells),
                (false, Some(otherwise)) => eval(otherwise, cells),
                (false, None) => Ok(Value::Bool(false)),
            }
        }
        "LEN" => {
            expect_arity(name, args, "1", args.len() == 1)?;
            let text = eval(&args[0], cells)?.to_string();
            Ok(Value::Number(text.chars().count() as f64))
        }
        "TODAY" => {
            expect_arity(name, args, "0", args.is_empty())?;
            Ok(Value::Text(chrono::Local::now().format("%Y-%m-%d").to_string()))
        }
        _ => Err(EvalError::UnknownFunction(name.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct Cells(HashMap<CellCoord, Value>);

    impl CellLookup for Cells {
        fn value(&self, coord: CellCoord) -> Option<Value> {
            if coord.col >= 10 || coord.row >= 10 {
                return None;
            }
            Some(self.0.get(&coord).cloned().unwrap_or_default())
        }
    }

    fn cells(entries: &[(&str, Value)]) -> Cells {
        Cells(
            entries
                .iter()
                .map(|(name, v)| (CellCoord::parse(name).unwrap(), v.clone()))
                .collect(),
        )
    }

    fn eval_str(expr: &str, cells: &Cells) -> Result<Value, EvalError> {
        ArithmeticEvaluator.evaluate(expr, cells)
    }

    #[test]
    fn test_arithmetic_precedence() {
        let empty = cells(&[]);
        assert_eq!(eval_str("1+2*3", &empty), Ok(Value::Number(7.0)));
        assert_eq!(eval_str("(1+2)*3", &empty), Ok(Value::Number(9.0)));
        assert_eq!(eval_str("-2^2", &empty), Ok(Value::Number(-4.0)));
        assert_eq!(eval_str("2^3^2", &empty), Ok(Value::Number(512.0)));
        assert_eq!(eval_str("7/0", &empty), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_references_and_ranges() {
        let sheet = cells(&[
            ("A0", Value::Number(5.0)),
            ("A1", Value::Number(7.0)),
            ("B0", Value::Text("x".into())),
        ]);
        assert_eq!(eval_str("A0*2", &sheet), Ok(Value::Number(10.0)));
        assert_eq!(eval_str("SUM(A0:B1)", &sheet), Ok(Value::Number(12.0)));
        assert_eq!(eval_str("AVERAGE(A0:A1)", &sheet), Ok(Value::Number(6.0)));
        assert_eq!(eval_str("MAX(A0, A1, 3)", &sheet), Ok(Value::Number(7.0)));
        assert_eq!(eval_str("B0 & A0", &sheet), Ok(Value::Text("x5".into())));
        assert_eq!(eval_str("C9 + 1", &sheet), Ok(Value::Number(1.0)));
        assert_eq!(
            eval_str("Z99", &sheet),
            Err(EvalError::UnknownReference("Z99".into()))
        );
        assert!(matches!(eval_str("A0:A1", &sheet), Err(EvalError::Type(_))));
    }

    #[test]
    fn test_parse_references_expands_ranges() {
        let empty = cells(&[]);
        let names = ArithmeticEvaluator.parse_references("SUM(A0:B1) + c3", &empty).unwrap();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["A0", "A1", "B0", "B1", "C3"]);

        assert!(matches!(
            ArithmeticEvaluator.parse_references("1 +", &empty),
            Err(EvalError::Parse { .. })
        ));
        assert_eq!(
            ArithmeticEvaluator.parse_references("foo + 1", &empty),
            Err(EvalError::UnknownReference("foo".into()))
        );
    }

    #[test]
    fn test_range_past_the_sheet_is_not_expanded() {
        let empty = cells(&[]);
        assert_eq!(
            ArithmeticEvaluator.parse_references("SUM(B0:B99999999)", &empty),
            Err(EvalError::UnknownReference("B99999999".into()))
        );
        assert_eq!(
            ArithmeticEvaluator.parse_references("SUM(ZZZZ0:A0)", &empty),
            Err(EvalError::UnknownReference("ZZZZ0".into()))
        );
        assert_eq!(
            eval_str("SUM(A0:A99999999)", &empty),
            Err(EvalError::UnknownReference("A99999999".into()))
        );
    }

    #[test]
    fn test_functions() {
        let empty = cells(&[]);
        assert_eq!(eval_str("IF(1 < 2, \"yes\", \"no\")", &empty), Ok(Value::Text("yes".into())));
        assert_eq!(eval_str("IF(FALSE, 1)", &empty), Ok(Value::Bool(false)));
        assert_eq!(eval_str("ABS(-3)", &empty), Ok(Value::Number(3.0)));
        assert_eq!(eval_str("LEN(\"abc\")", &empty), Ok(Value::Number(3.0)));
        assert!(matches!(eval_str("ABS(1, 2)", &empty), Err(EvalError::Arity { got: 2, .. })));
        assert_eq!(
            eval_str("NOPE(1)", &empty),
            Err(EvalError::UnknownFunction("NOPE".into()))
        );

        let Ok(Value::Text(today)) = eval_str("TODAY()", &empty) else {
            panic!("TODAY returns text");
        };
        assert_eq!(today.len(), 10);
        assert_eq!(today.as_bytes()[4], b'-');
    }

    #[test]
    fn test_comparisons() {
        let empty = cells(&[]);
        assert_eq!(eval_str("2 = 2", &empty), Ok(Value::Bool(true)));
        assert_eq!(eval_str("\"a\" <> \"b\"", &empty), Ok(Value::Bool(true)));
        assert_eq!(eval_str("3 >= 4", &empty), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_parse_literal() {
        let e = ArithmeticEvaluator;
        assert_eq!(e.parse_literal("42"), Ok(Value::Number(42.0)));
        assert_eq!(e.parse_literal(" 2.5 "), Ok(Value::Number(2.5)));
        assert_eq!(e.parse_literal("true"), Ok(Value::Bool(true)));
        assert_eq!(e.parse_literal(""), Ok(Value::Empty));
        assert_eq!(e.parse_literal("hello"), Ok(Value::Text("hello".into())));
    }
}
