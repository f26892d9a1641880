//! Formula evaluator
//!
//! Walks a parsed [`FormulaExpr`] and produces a [`Value`]. Everything outside
//! the expression itself (variables, functions, references) is looked up
//! through an [`EvaluationContext`].

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use hotcell_core::{ErrorCode, Value};
use std::cmp::Ordering;

/// Name and reference lookups used during evaluation
pub trait EvaluationContext {
    /// Value of a bare identifier
    fn variable(&self, name: &str) -> FormulaResult<Value>;

    /// Result of calling `name` with evaluated arguments
    fn function(&self, name: &str, args: &[Value]) -> FormulaResult<Value>;

    /// Value of a single reference
    fn reference(&self, label: &str) -> FormulaResult<Value>;

    /// Block of values between two references
    fn range(&self, start: &str, end: &str) -> FormulaResult<Value>;
}

/// Evaluate a formula expression
pub fn evaluate<C: EvaluationContext + ?Sized>(expr: &FormulaExpr, ctx: &C) -> FormulaResult<Value> {
    match expr {
        // === Literals ===
        FormulaExpr::Number(n) => finite(*n),
        FormulaExpr::String(s) => Ok(Value::String(s.clone())),
        FormulaExpr::Error(code) => Err(FormulaError::signal(*code)),

        // === References ===
        FormulaExpr::Reference(reference) => ctx.reference(reference.label()),
        FormulaExpr::Range { start, end } => ctx.range(start.label(), end.label()),
        FormulaExpr::Name(name) => ctx.variable(name),

        // === Operators ===
        FormulaExpr::BinaryOp { op, left, right } => evaluate_binary_op(*op, left, right, ctx),
        FormulaExpr::UnaryOp { op, operand } => evaluate_unary_op(*op, operand, ctx),

        // === Functions ===
        FormulaExpr::Function { name, args } => {
            let mut evaluated_args = Vec::with_capacity(args.len());
            for arg in args {
                evaluated_args.push(evaluate(arg, ctx)?);
            }
            ctx.function(name, &evaluated_args)
        }

        // === Arrays ===
        FormulaExpr::Array(rows) => {
            let mut result_rows = Vec::with_capacity(rows.len());
            for row in rows {
                let mut result_row = Vec::with_capacity(row.len());
                for expr in row {
                    result_row.push(evaluate(expr, ctx)?);
                }
                result_rows.push(result_row);
            }
            Ok(Value::block(result_rows))
        }
    }
}

fn to_number(value: &Value) -> FormulaResult<f64> {
    value
        .as_number()
        .ok_or(FormulaError::Signal(ErrorCode::Value))
}

/// Overflow and NaN become `#NUM!`
pub(crate) fn finite(n: f64) -> FormulaResult<Value> {
    if n.is_finite() {
        Ok(Value::Number(n))
    } else {
        Err(FormulaError::signal(ErrorCode::Num))
    }
}

/// Evaluate a binary operation
fn evaluate_binary_op<C: EvaluationContext + ?Sized>(
    op: BinaryOperator,
    left: &FormulaExpr,
    right: &FormulaExpr,
    ctx: &C,
) -> FormulaResult<Value> {
    let apply: fn(&Value, &Value) -> FormulaResult<Value> = match op {
        // A `:` that could not form a range never resolves its operands
        BinaryOperator::Range => return Err(FormulaError::signal(ErrorCode::Value)),

        // Arithmetic operators
        BinaryOperator::Add => |l, r| finite(to_number(l)? + to_number(r)?),
        BinaryOperator::Subtract => |l, r| finite(to_number(l)? - to_number(r)?),
        BinaryOperator::Multiply => |l, r| finite(to_number(l)? * to_number(r)?),
        BinaryOperator::Divide => |l, r| {
            let dividend = to_number(l)?;
            let divisor = to_number(r)?;
            if divisor == 0.0 {
                return Err(FormulaError::signal(ErrorCode::Div0));
            }
            finite(dividend / divisor)
        },
        BinaryOperator::Power => |l, r| {
            let base = to_number(l)?;
            let exponent = to_number(r)?;
            if base == 0.0 && exponent == 0.0 {
                return Err(FormulaError::signal(ErrorCode::Num));
            }
            finite(base.powf(exponent))
        },

        // Comparison operators
        BinaryOperator::Equal => |l, r| compare(l, r, Ordering::is_eq),
        BinaryOperator::NotEqual => |l, r| compare(l, r, Ordering::is_ne),
        BinaryOperator::LessThan => |l, r| compare(l, r, Ordering::is_lt),
        BinaryOperator::LessEqual => |l, r| compare(l, r, Ordering::is_le),
        BinaryOperator::GreaterThan => |l, r| compare(l, r, Ordering::is_gt),
        BinaryOperator::GreaterEqual => |l, r| compare(l, r, Ordering::is_ge),

        // Concatenation
        BinaryOperator::Concat => |l, r| {
            if l.is_array() || r.is_array() {
                return Err(FormulaError::signal(ErrorCode::Value));
            }
            Ok(Value::String(l.as_text() + &r.as_text()))
        },
    };

    let left_val = evaluate(left, ctx)?;
    let right_val = evaluate(right, ctx)?;
    apply(&left_val, &right_val)
}

fn compare(left: &Value, right: &Value, test: fn(Ordering) -> bool) -> FormulaResult<Value> {
    if left.is_array() || right.is_array() {
        return Err(FormulaError::signal(ErrorCode::Value));
    }
    Ok(Value::Boolean(test(compare_values(left, right))))
}

/// Spreadsheet ordering: number < string < boolean.
///
/// Empty and null take the blank value of whatever they are compared with.
fn compare_values(left: &Value, right: &Value) -> Ordering {
    let blank_for = |other: &Value| match other {
        Value::String(_) => Value::String(String::new()),
        Value::Boolean(_) => Value::Boolean(false),
        _ => Value::Number(0.0),
    };
    let is_blank = |v: &Value| matches!(v, Value::Empty | Value::Null);

    let left_owned;
    let right_owned;
    let (left, right) = match (is_blank(left), is_blank(right)) {
        (true, true) => return Ordering::Equal,
        (true, false) => {
            left_owned = blank_for(right);
            (&left_owned, right)
        }
        (false, true) => {
            right_owned = blank_for(left);
            (left, &right_owned)
        }
        (false, false) => (left, right),
    };

    fn rank(v: &Value) -> u8 {
        match v {
            Value::Number(_) => 0,
            Value::String(_) => 1,
            _ => 2,
        }
    }

    match (left, right) {
        (Value::Number(l), Value::Number(r)) => l.partial_cmp(r).unwrap_or(Ordering::Equal),
        (Value::String(l), Value::String(r)) => l.to_lowercase().cmp(&r.to_lowercase()),
        (Value::Boolean(l), Value::Boolean(r)) => l.cmp(r),
        (l, r) => rank(l).cmp(&rank(r)),
    }
}

/// Evaluate a unary operation
fn evaluate_unary_op<C: EvaluationContext + ?Sized>(
    op: UnaryOperator,
    operand: &FormulaExpr,
    ctx: &C,
) -> FormulaResult<Value> {
    let val = evaluate(operand, ctx)?;

    match op {
        UnaryOperator::Plus => Ok(val),
        UnaryOperator::Negate => finite(-to_number(&val)?),
        UnaryOperator::Percent => finite(to_number(&val)? / 100.0),
    }
}
