//! Spreadsheet error codes
//!
//! [`ErrorCode`] is the closed set of codes a formula can evaluate to. Failure
//! messages that do not carry a code directly are classified with
//! [`ErrorCode::from_message`], which scans a fixed, ordered substring table.

use std::fmt;

/// Spreadsheet error values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    /// #ERROR! - Generic failure, also the fallback for unrecognized messages
    Error,
    /// #DIV/0! - Division by zero
    Div0,
    /// #NAME? - Unrecognized variable or function name
    Name,
    /// #N/A - Value not available
    Na,
    /// #NULL! - Incorrect range operator
    Null,
    /// #NUM! - Invalid numeric value
    Num,
    /// #REF! - Invalid cell reference
    Ref,
    /// #VALUE! - Wrong type of argument or operand
    Value,
}

/// Message fragments checked, in this order, by [`ErrorCode::from_message`].
///
/// `DIV/0` precedes the others and the generic `ERROR` entry is last, so the
/// first hit is always the most specific one.
const MESSAGE_TABLE: [(&str, ErrorCode); 8] = [
    ("DIV/0", ErrorCode::Div0),
    ("NAME", ErrorCode::Name),
    ("N/A", ErrorCode::Na),
    ("NULL", ErrorCode::Null),
    ("NUM", ErrorCode::Num),
    ("REF", ErrorCode::Ref),
    ("VALUE", ErrorCode::Value),
    ("ERROR", ErrorCode::Error),
];

impl ErrorCode {
    /// All codes, in translation-table order
    pub const ALL: [ErrorCode; 8] = [
        ErrorCode::Div0,
        ErrorCode::Name,
        ErrorCode::Na,
        ErrorCode::Null,
        ErrorCode::Num,
        ErrorCode::Ref,
        ErrorCode::Value,
        ErrorCode::Error,
    ];

    /// Get the display string for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Error => "#ERROR!",
            ErrorCode::Div0 => "#DIV/0!",
            ErrorCode::Name => "#NAME?",
            ErrorCode::Na => "#N/A",
            ErrorCode::Null => "#NULL!",
            ErrorCode::Num => "#NUM!",
            ErrorCode::Ref => "#REF!",
            ErrorCode::Value => "#VALUE!",
        }
    }

    /// The message fragment that identifies this code
    pub fn keyword(&self) -> &'static str {
        match self {
            ErrorCode::Error => "ERROR",
            ErrorCode::Div0 => "DIV/0",
            ErrorCode::Name => "NAME",
            ErrorCode::Na => "N/A",
            ErrorCode::Null => "NULL",
            ErrorCode::Num => "NUM",
            ErrorCode::Ref => "REF",
            ErrorCode::Value => "VALUE",
        }
    }

    /// Parse an error literal such as `#DIV/0!` (case insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "#ERROR!" => Some(ErrorCode::Error),
            "#DIV/0!" => Some(ErrorCode::Div0),
            "#NAME?" => Some(ErrorCode::Name),
            "#N/A" => Some(ErrorCode::Na),
            "#NULL!" => Some(ErrorCode::Null),
            "#NUM!" => Some(ErrorCode::Num),
            "#REF!" => Some(ErrorCode::Ref),
            "#VALUE!" => Some(ErrorCode::Value),
            _ => None,
        }
    }

    /// Classify a failure message.
    ///
    /// Returns the code of the first table entry whose fragment occurs in
    /// `message`, or [`ErrorCode::Error`] when none does.
    ///
    /// ```
    /// use hotcell_core::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::from_message("#DIV/0!"), ErrorCode::Div0);
    /// assert_eq!(ErrorCode::from_message("bad NUM input"), ErrorCode::Num);
    /// assert_eq!(ErrorCode::from_message("something broke"), ErrorCode::Error);
    /// ```
    pub fn from_message(message: &str) -> Self {
        MESSAGE_TABLE
            .iter()
            .find(|(fragment, _)| message.contains(fragment))
            .map(|(_, code)| *code)
            .unwrap_or(ErrorCode::Error)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
