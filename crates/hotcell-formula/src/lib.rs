//! # hotcell-formula
//!
//! Formula parser and evaluator for hotcell.
//!
//! This crate provides:
//! - Formula lexing and parsing (text → AST)
//! - Formula evaluation (AST → value) through an [`EvaluationContext`]
//! - The [`Engine`]: variable and function registries, resolution hooks and
//!   translation of failures into spreadsheet error codes
//! - A small library of built-in functions
//!
//! ## Example
//!
//! ```rust
//! use hotcell_formula::{Engine, ErrorCode, Value};
//!
//! let mut engine = Engine::new();
//! engine.set_variable("foo", 7);
//!
//! assert_eq!(engine.evaluate("SUM(foo, 3)").result, Some(Value::from(10)));
//! assert_eq!(engine.evaluate("1/0").error, Some(ErrorCode::Div0));
//! assert_eq!(engine.evaluate("bar").error, Some(ErrorCode::Name));
//! ```

pub mod ast;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod hooks;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod reference;
pub mod registry;

pub use ast::{BinaryOperator, FormulaExpr, Reference, UnaryOperator};
pub use engine::{Engine, Evaluation};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, EvaluationContext};
pub use functions::{BuiltinLibrary, FunctionLibrary};
pub use hooks::Hooks;
pub use options::{ParserOptions, DEFAULT_MAX_DEPTH};
pub use parser::{parse_formula, parse_formula_with};
pub use reference::ReferenceResolver;
pub use registry::{CustomFunction, FunctionRegistry, VariableRegistry};

pub use hotcell_core::{CellCoord, ErrorCode, Value};
