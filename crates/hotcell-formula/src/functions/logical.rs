//! Logical functions

use crate::error::{FormulaError, FormulaResult};
use hotcell_core::{ErrorCode, Value};

/// Truth values contributed by AND/OR/XOR arguments.
///
/// Direct arguments must coerce to a boolean; inside arrays, text is skipped.
/// No truth values at all is `#VALUE!`.
fn collect_bools(args: &[Value]) -> FormulaResult<Vec<bool>> {
    let mut bools = Vec::new();
    for arg in args {
        match arg {
            Value::Array(_) => {
                bools.extend(arg.flatten().into_iter().filter_map(|v| match v {
                    Value::Boolean(b) => Some(*b),
                    Value::Number(n) => Some(*n != 0.0),
                    _ => None,
                }));
            }
            Value::Empty | Value::Null => {}
            other => bools.push(
                other
                    .as_bool()
                    .ok_or(FormulaError::Signal(ErrorCode::Value))?,
            ),
        }
    }

    if bools.is_empty() {
        return Err(FormulaError::signal(ErrorCode::Value));
    }
    Ok(bools)
}

/// IF(condition, if_true, [if_false])
pub fn fn_if(args: &[Value]) -> FormulaResult<Value> {
    let condition = args
        .first()
        .and_then(Value::as_bool)
        .ok_or(FormulaError::Signal(ErrorCode::Value))?;

    if condition {
        Ok(args.get(1).cloned().unwrap_or(Value::Boolean(true)))
    } else {
        Ok(args.get(2).cloned().unwrap_or(Value::Boolean(false)))
    }
}

/// AND function
pub fn fn_and(args: &[Value]) -> FormulaResult<Value> {
    let bools = collect_bools(args)?;
    Ok(Value::Boolean(bools.iter().all(|b| *b)))
}

/// OR function
pub fn fn_or(args: &[Value]) -> FormulaResult<Value> {
    let bools = collect_bools(args)?;
    Ok(Value::Boolean(bools.iter().any(|b| *b)))
}

/// XOR function - true when an odd number of arguments are true
pub fn fn_xor(args: &[Value]) -> FormulaResult<Value> {
    let bools = collect_bools(args)?;
    Ok(Value::Boolean(bools.iter().filter(|b| **b).count() % 2 == 1))
}

/// NOT function
pub fn fn_not(args: &[Value]) -> FormulaResult<Value> {
    let b = args
        .first()
        .and_then(Value::as_bool)
        .ok_or(FormulaError::Signal(ErrorCode::Value))?;
    Ok(Value::Boolean(!b))
}
