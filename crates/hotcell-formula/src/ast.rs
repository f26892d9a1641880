//! Formula Abstract Syntax Tree types

use hotcell_core::ErrorCode;

/// Formula expression AST
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaExpr {
    // === Literals ===
    /// Numeric literal
    Number(f64),
    /// String literal
    String(String),
    /// Error literal, raised when evaluated
    Error(ErrorCode),

    // === References ===
    /// Single reference, A1-style or named
    Reference(Reference),
    /// Two references of the same kind joined by `:`
    Range { start: Reference, end: Reference },
    /// Bare identifier, resolved as a variable
    Name(String),

    // === Operators ===
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<FormulaExpr>,
        right: Box<FormulaExpr>,
    },
    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<FormulaExpr>,
    },

    // === Function call ===
    /// Call with its name upper-cased
    Function {
        name: String,
        args: Vec<FormulaExpr>,
    },

    // === Array ===
    Array(Vec<Vec<FormulaExpr>>),
}

/// A reference token, label kept exactly as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// `A1`, `b7`, `$C$3`
    Cell(String),
    /// `@name`
    Named(String),
}

impl Reference {
    pub fn label(&self) -> &str {
        match self {
            Reference::Cell(label) | Reference::Named(label) => label,
        }
    }

    /// Whether two references may form a range
    pub fn same_kind(&self, other: &Reference) -> bool {
        matches!(
            (self, other),
            (Reference::Cell(_), Reference::Cell(_)) | (Reference::Named(_), Reference::Named(_))
        )
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,

    // Comparison
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,

    // Text
    Concat,

    /// `:` between operands that cannot form a range
    Range,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Plus,
    Percent,
}
