//! Text functions

use super::{number_arg, text_arg};
use crate::error::{FormulaError, FormulaResult};
use hotcell_core::{ErrorCode, Value};

/// Character count argument; negative counts are `#VALUE!`
fn count_arg(args: &[Value], index: usize) -> FormulaResult<usize> {
    let n = number_arg(args, index, 1.0)?.trunc();
    if n < 0.0 {
        return Err(FormulaError::signal(ErrorCode::Value));
    }
    Ok(n as usize)
}

/// CONCATENATE(text, ...) - array arguments contribute all their cells
pub fn fn_concatenate(args: &[Value]) -> FormulaResult<Value> {
    let mut out = String::new();
    for arg in args {
        for leaf in arg.flatten() {
            out.push_str(&leaf.as_text());
        }
    }
    Ok(Value::String(out))
}

/// LEN(text)
pub fn fn_len(args: &[Value]) -> FormulaResult<Value> {
    let s = text_arg(args, 0)?;
    Ok(Value::Number(s.chars().count() as f64))
}

/// LEFT(text, [num_chars])
pub fn fn_left(args: &[Value]) -> FormulaResult<Value> {
    let s = text_arg(args, 0)?;
    let n = count_arg(args, 1)?;
    Ok(Value::String(s.chars().take(n).collect()))
}

/// RIGHT(text, [num_chars])
pub fn fn_right(args: &[Value]) -> FormulaResult<Value> {
    let s = text_arg(args, 0)?;
    let n = count_arg(args, 1)?;
    let len = s.chars().count();
    Ok(Value::String(s.chars().skip(len.saturating_sub(n)).collect()))
}

/// UPPER(text)
pub fn fn_upper(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::String(text_arg(args, 0)?.to_uppercase()))
}

/// LOWER(text)
pub fn fn_lower(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::String(text_arg(args, 0)?.to_lowercase()))
}

/// TRIM(text) - strips both ends and collapses inner runs of spaces
pub fn fn_trim(args: &[Value]) -> FormulaResult<Value> {
    let s = text_arg(args, 0)?;
    Ok(Value::String(
        s.split(' ')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    ))
}
