//! Resolution hooks
//!
//! Each hook slot holds at most one handler. Handlers run synchronously and
//! return `None` when they have nothing to contribute, in which case
//! resolution falls through to the engine's own registries.

use hotcell_core::{CellCoord, Value};

/// Handler for bare identifiers
pub type VariableHook = Box<dyn Fn(&str) -> Option<Value>>;

/// Handler for function calls, given the upper-cased name and evaluated arguments
pub type FunctionHook = Box<dyn Fn(&str, &[Value]) -> Option<Value>>;

/// Handler for single references
pub type ReferenceHook = Box<dyn Fn(&CellCoord) -> Option<Value>>;

/// Handler for ranges, returning rows of cells
pub type RangeHook = Box<dyn Fn(&CellCoord, &CellCoord) -> Option<Vec<Vec<Value>>>>;

/// The four hook slots of an engine
#[derive(Default)]
pub struct Hooks {
    call_variable: Option<VariableHook>,
    call_function: Option<FunctionHook>,
    call_reference_value: Option<ReferenceHook>,
    call_range_value: Option<RangeHook>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_call_variable<F>(&mut self, hook: F)
    where
        F: Fn(&str) -> Option<Value> + 'static,
    {
        self.call_variable = Some(Box::new(hook));
    }

    pub fn set_call_function<F>(&mut self, hook: F)
    where
        F: Fn(&str, &[Value]) -> Option<Value> + 'static,
    {
        self.call_function = Some(Box::new(hook));
    }

    pub fn set_call_reference_value<F>(&mut self, hook: F)
    where
        F: Fn(&CellCoord) -> Option<Value> + 'static,
    {
        self.call_reference_value = Some(Box::new(hook));
    }

    pub fn set_call_range_value<F>(&mut self, hook: F)
    where
        F: Fn(&CellCoord, &CellCoord) -> Option<Vec<Vec<Value>>> + 'static,
    {
        self.call_range_value = Some(Box::new(hook));
    }

    /// Remove every handler
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn call_variable(&self, name: &str) -> Option<Value> {
        let hook = self.call_variable.as_ref()?;
        log::debug!("callVariable({})", name);
        hook(name)
    }

    pub fn call_function(&self, name: &str, args: &[Value]) -> Option<Value> {
        let hook = self.call_function.as_ref()?;
        log::debug!("callFunction({}, {} args)", name, args.len());
        hook(name, args)
    }

    pub fn call_reference_value(&self, coord: &CellCoord) -> Option<Value> {
        let hook = self.call_reference_value.as_ref()?;
        log::debug!("callReferenceValue({})", coord);
        hook(coord)
    }

    pub fn call_range_value(&self, start: &CellCoord, end: &CellCoord) -> Option<Vec<Vec<Value>>> {
        let hook = self.call_range_value.as_ref()?;
        log::debug!("callRangeValue({}, {})", start, end);
        hook(start, end)
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("call_variable", &self.call_variable.is_some())
            .field("call_function", &self.call_function.is_some())
            .field("call_reference_value", &self.call_reference_value.is_some())
            .field("call_range_value", &self.call_range_value.is_some())
            .finish()
    }
}
