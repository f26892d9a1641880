//! # hotcell-core
//!
//! Core types shared by the hotcell formula engine:
//! - [`Value`] - Values flowing through evaluation (numbers, strings, booleans, arrays)
//! - [`ErrorCode`] - The closed set of spreadsheet error codes and message classification
//! - [`CellCoord`], [`CellAddress`], [`CellBounds`] - Reference labels and grid addressing
//!
//! ## Example
//!
//! ```rust
//! use hotcell_core::{CellCoord, ErrorCode, Value};
//!
//! let coord = CellCoord::new("a1");
//! assert_eq!(coord.label, "a1");
//! assert_eq!(ErrorCode::from_message("#REF!"), ErrorCode::Ref);
//! assert_eq!(Value::from(2).as_number(), Some(2.0));
//! ```

pub mod coord;
pub mod error;
pub mod error_code;
pub mod value;

pub use coord::{CellAddress, CellBounds, CellCoord, CoordKind};
pub use error::{Error, Result};
pub use error_code::ErrorCode;
pub use value::Value;

/// Maximum number of rows addressable by an A1-style label
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns addressable by an A1-style label
pub const MAX_COLS: u16 = 16_384;
