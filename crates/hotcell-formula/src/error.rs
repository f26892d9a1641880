//! Formula error types
//!
//! [`FormulaError`] is the failure signal carried through lexing, parsing and
//! evaluation with `?`. It is only ever turned into an [`ErrorCode`] at the
//! engine boundary, via [`FormulaError::code`].

use hotcell_core::ErrorCode;
use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula lexing, parsing or evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Input contains a character sequence the lexer does not recognize
    #[error("Lex error at offset {position}: {message}")]
    Lex { position: usize, message: String },

    /// Tokens do not form a valid expression
    #[error("Parse error: {0}")]
    Parse(String),

    /// Expression nesting exceeds the configured limit
    #[error("Expression nested deeper than {0} levels")]
    DepthExceeded(usize),

    /// A spreadsheet error code raised by the engine
    #[error("{0}")]
    Signal(ErrorCode),

    /// Free-form failure, typically from a custom function.
    /// Classified by message content.
    #[error("{0}")]
    Other(String),
}

impl FormulaError {
    /// Raise one of the spreadsheet error codes
    pub fn signal(code: ErrorCode) -> Self {
        FormulaError::Signal(code)
    }

    /// Free-form failure message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        FormulaError::Other(msg.into())
    }

    /// Error code reported to callers for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            FormulaError::Lex { .. } | FormulaError::Parse(_) | FormulaError::DepthExceeded(_) => {
                ErrorCode::Error
            }
            FormulaError::Signal(code) => *code,
            FormulaError::Other(msg) => ErrorCode::from_message(msg),
        }
    }
}

impl From<ErrorCode> for FormulaError {
    fn from(code: ErrorCode) -> Self {
        FormulaError::Signal(code)
    }
}
