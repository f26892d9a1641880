//! Prelude module - common imports for hotcell users
//!
//! ```rust
//! use hotcell::prelude::*;
//! ```

pub use crate::{
    // Coordinates
    CellBounds,
    CellCoord,
    // Engine
    Engine,
    // Errors
    ErrorCode,
    Evaluation,
    FormulaError,
    FormulaResult,
    FunctionLibrary,
    ParserOptions,
    // Providers
    Sheet,
    // Values
    Value,
};
