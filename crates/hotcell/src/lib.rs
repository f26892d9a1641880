//! # hotcell
//!
//! A spreadsheet-style formula engine.
//!
//! Formulas are evaluated by an [`Engine`]; anything a formula refers to
//! (cells, ranges, `@named` cells, variables, functions) is resolved through
//! hooks, registries and a built-in function library. Failures never escape
//! as Rust errors: every call returns an [`Evaluation`] carrying either a
//! value or one of the eight spreadsheet [`ErrorCode`]s.
//!
//! ## Example
//!
//! ```rust
//! use hotcell::prelude::*;
//!
//! let sheet = Sheet::new();
//! sheet.set_cell("A1", 10).unwrap();
//! sheet.set_cell("A2", 32).unwrap();
//! sheet.set_named("rate", 0.5);
//!
//! let mut engine = Engine::new();
//! sheet.attach(&mut engine);
//!
//! assert_eq!(engine.evaluate("SUM(A1:A2) * @rate").result, Some(Value::from(21)));
//! assert_eq!(engine.evaluate("A1 / 0").error, Some(ErrorCode::Div0));
//! assert_eq!(engine.evaluate("").result, None);
//! ```

pub mod prelude;
pub mod sheet;

pub use sheet::Sheet;

// Re-export core types
pub use hotcell_core::{
    CellAddress, CellBounds, CellCoord, CoordKind, Error, ErrorCode, Result, Value, MAX_COLS,
    MAX_ROWS,
};

// Re-export formula types
pub use hotcell_formula::{
    evaluate, parse_formula, parse_formula_with, BuiltinLibrary, CustomFunction, Engine,
    EvaluationContext, Evaluation, FormulaError, FormulaExpr, FormulaResult, FunctionLibrary,
    ParserOptions,
};
