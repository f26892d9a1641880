//! Variable and function registries
//!
//! Both registries are plain name tables owned by an engine. Resolution walks
//! the hook first, then the table, then (for functions) the fallback library,
//! and raises `#NAME?` when nothing answers.

use crate::error::{FormulaError, FormulaResult};
use crate::functions::FunctionLibrary;
use crate::hooks::Hooks;
use ahash::AHashMap;
use hotcell_core::{ErrorCode, Value};
use std::rc::Rc;

/// A user-registered function
pub type CustomFunction = Rc<dyn Fn(&[Value]) -> FormulaResult<Value>>;

/// Name → value table, seeded with `TRUE`, `FALSE` and `NULL`
#[derive(Debug, Clone)]
pub struct VariableRegistry {
    values: AHashMap<String, Value>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        let mut values = AHashMap::new();
        values.insert("TRUE".to_string(), Value::Boolean(true));
        values.insert("FALSE".to_string(), Value::Boolean(false));
        values.insert("NULL".to_string(), Value::Null);
        Self { values }
    }

    /// Register or overwrite a variable
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Registered value, names are exact-case
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolve a bare identifier: hook, then table, then `#NAME?`
    pub fn resolve(&self, hooks: &Hooks, name: &str) -> FormulaResult<Value> {
        if let Some(value) = hooks.call_variable(name) {
            return Ok(value);
        }
        self.get(name)
            .cloned()
            .ok_or(FormulaError::Signal(ErrorCode::Name))
    }
}

impl Default for VariableRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Name → custom function table
#[derive(Default, Clone)]
pub struct FunctionRegistry {
    functions: AHashMap<String, CustomFunction>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a custom function
    pub fn set<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&[Value]) -> FormulaResult<Value> + 'static,
    {
        self.functions.insert(name.into(), Rc::new(function));
    }

    pub fn get(&self, name: &str) -> Option<CustomFunction> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Resolve a call with already-evaluated arguments.
    ///
    /// Order: function hook, custom function, `library` (when given), then
    /// `#NAME?`.
    pub fn resolve(
        &self,
        hooks: &Hooks,
        library: Option<&dyn FunctionLibrary>,
        name: &str,
        args: &[Value],
    ) -> FormulaResult<Value> {
        if let Some(value) = hooks.call_function(name, args) {
            return Ok(value);
        }

        if let Some(function) = self.functions.get(name) {
            return function(args);
        }

        if let Some(result) = library.and_then(|lib| lib.call(name, args)) {
            return result;
        }

        Err(FormulaError::signal(ErrorCode::Name))
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("FunctionRegistry")
            .field("functions", &names)
            .finish()
    }
}
