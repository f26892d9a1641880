//! Reference resolution
//!
//! Turns reference labels into [`CellCoord`]s and asks the reference hooks
//! for their values. Labels go out exactly as written; ordering or geometry
//! is the provider's business.

use crate::hooks::Hooks;
use hotcell_core::{CellCoord, Value};

/// Resolves references through the engine's hooks
pub struct ReferenceResolver<'a> {
    hooks: &'a Hooks,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(hooks: &'a Hooks) -> Self {
        Self { hooks }
    }

    /// Value of a single reference, or [`Value::Empty`] when nobody supplies one
    pub fn resolve_reference(&self, label: &str) -> Value {
        let coord = CellCoord::new(label);
        self.hooks
            .call_reference_value(&coord)
            .unwrap_or(Value::Empty)
    }

    /// Rows of a range, or an empty array when nobody supplies them
    pub fn resolve_range(&self, start_label: &str, end_label: &str) -> Value {
        let start = CellCoord::new(start_label);
        let end = CellCoord::new(end_label);
        let rows = self
            .hooks
            .call_range_value(&start, &end)
            .unwrap_or_default();
        Value::block(rows)
    }
}
