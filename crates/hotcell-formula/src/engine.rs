//! The formula engine
//!
//! [`Engine`] owns the variable and function registries, the resolution hooks
//! and the fallback function library, and turns formula strings into
//! [`Evaluation`]s. It is the only place where failure signals are caught.

use crate::error::FormulaResult;
use crate::evaluator::{evaluate, EvaluationContext};
use crate::functions::{BuiltinLibrary, FunctionLibrary};
use crate::hooks::Hooks;
use crate::options::ParserOptions;
use crate::parser::parse_formula_with;
use crate::reference::ReferenceResolver;
use crate::registry::{CustomFunction, FunctionRegistry, VariableRegistry};
use hotcell_core::{CellCoord, ErrorCode, Value};
use std::cell::Cell;

/// Outcome of [`Engine::evaluate`].
///
/// Exactly one side carries information on failure. On success `result` may
/// hold `Null`, `false`, `0` or `""`; none of those are errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub error: Option<ErrorCode>,
    pub result: Option<Value>,
}

impl Evaluation {
    pub fn ok(value: Value) -> Self {
        Self {
            error: None,
            result: Some(value),
        }
    }

    pub fn err(code: ErrorCode) -> Self {
        Self {
            error: Some(code),
            result: None,
        }
    }

    /// Neither error nor value, returned for an empty formula
    pub fn nothing() -> Self {
        Self {
            error: None,
            result: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }
}

impl From<FormulaResult<Value>> for Evaluation {
    fn from(result: FormulaResult<Value>) -> Self {
        match result {
            Ok(value) => Evaluation::ok(value),
            Err(err) => {
                let code = err.code();
                log::debug!("formula failed: {} -> {}", err, code);
                Evaluation::err(code)
            }
        }
    }
}

/// Formula engine
///
/// # Example
/// ```rust
/// use hotcell_formula::{Engine, Value};
///
/// let mut engine = Engine::new();
/// engine.set_variable("rate", 0.5);
/// engine.on_call_reference_value(|coord| {
///     (coord.label == "A1").then(|| Value::from(10))
/// });
///
/// let outcome = engine.evaluate("A1 * rate");
/// assert_eq!(outcome.result, Some(Value::from(5)));
/// ```
pub struct Engine {
    options: ParserOptions,
    variables: VariableRegistry,
    functions: FunctionRegistry,
    hooks: Hooks,
    library: Box<dyn FunctionLibrary>,
    grammar_invocations: Cell<u64>,
}

impl Engine {
    /// Create an engine with default options and the built-in library
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            options,
            variables: VariableRegistry::new(),
            functions: FunctionRegistry::new(),
            hooks: Hooks::new(),
            library: Box::new(BuiltinLibrary::shared()),
            grammar_invocations: Cell::new(0),
        }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut ParserOptions {
        &mut self.options
    }

    /// Evaluate a formula. Never fails: errors come back as codes.
    pub fn evaluate(&self, expression: &str) -> Evaluation {
        if expression.is_empty() {
            return Evaluation::nothing();
        }

        self.grammar_invocations
            .set(self.grammar_invocations.get() + 1);
        self.run(expression).into()
    }

    fn run(&self, expression: &str) -> FormulaResult<Value> {
        let expr = parse_formula_with(expression, &self.options)?;
        evaluate(&expr, &Scope { engine: self })
    }

    /// How many times the lexer/parser/evaluator pipeline has run
    pub fn grammar_invocations(&self) -> u64 {
        self.grammar_invocations.get()
    }

    // === Variables ===

    /// Register or overwrite a variable
    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.set(name, value);
    }

    /// Same as [`Engine::set_variable`]
    pub fn set_constant(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.set_variable(name, value);
    }

    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    // === Functions ===

    /// Register or replace a custom function.
    ///
    /// Calls are matched on the upper-cased name written in the formula, so
    /// register names in upper case to make them callable.
    pub fn set_function<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&[Value]) -> FormulaResult<Value> + 'static,
    {
        self.functions.set(name, function);
    }

    pub fn get_function(&self, name: &str) -> Option<CustomFunction> {
        self.functions.get(name)
    }

    /// Replace the library consulted after hooks and custom functions
    pub fn set_function_library<L: FunctionLibrary + 'static>(&mut self, library: L) {
        self.library = Box::new(library);
    }

    // === Hooks ===

    pub fn on_call_variable<F>(&mut self, hook: F)
    where
        F: Fn(&str) -> Option<Value> + 'static,
    {
        self.hooks.set_call_variable(hook);
    }

    pub fn on_call_function<F>(&mut self, hook: F)
    where
        F: Fn(&str, &[Value]) -> Option<Value> + 'static,
    {
        self.hooks.set_call_function(hook);
    }

    pub fn on_call_reference_value<F>(&mut self, hook: F)
    where
        F: Fn(&CellCoord) -> Option<Value> + 'static,
    {
        self.hooks.set_call_reference_value(hook);
    }

    pub fn on_call_range_value<F>(&mut self, hook: F)
    where
        F: Fn(&CellCoord, &CellCoord) -> Option<Vec<Vec<Value>>> + 'static,
    {
        self.hooks.set_call_range_value(hook);
    }

    /// Remove every hook handler
    pub fn clear_hooks(&mut self) {
        self.hooks.clear();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("options", &self.options)
            .field("variables", &self.variables)
            .field("functions", &self.functions)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

/// Lookups for one evaluation
struct Scope<'a> {
    engine: &'a Engine,
}

impl EvaluationContext for Scope<'_> {
    fn variable(&self, name: &str) -> FormulaResult<Value> {
        self.engine.variables.resolve(&self.engine.hooks, name)
    }

    fn function(&self, name: &str, args: &[Value]) -> FormulaResult<Value> {
        let library: Option<&dyn FunctionLibrary> = if self.engine.options.builtin_functions {
            Some(&*self.engine.library)
        } else {
            None
        };
        self.engine
            .functions
            .resolve(&self.engine.hooks, library, name, args)
    }

    fn reference(&self, label: &str) -> FormulaResult<Value> {
        Ok(ReferenceResolver::new(&self.engine.hooks).resolve_reference(label))
    }

    fn range(&self, start: &str, end: &str) -> FormulaResult<Value> {
        Ok(ReferenceResolver::new(&self.engine.hooks).resolve_range(start, end))
    }
}
