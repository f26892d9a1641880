//! Math functions

use super::{collect_numbers, number_arg};
use crate::error::{FormulaError, FormulaResult};
use hotcell_core::{ErrorCode, Value};

/// SUM function
pub fn fn_sum(args: &[Value]) -> FormulaResult<Value> {
    let numbers = collect_numbers(args)?;
    Ok(Value::Number(numbers.iter().sum()))
}

/// PRODUCT function
pub fn fn_product(args: &[Value]) -> FormulaResult<Value> {
    let numbers = collect_numbers(args)?;
    if numbers.is_empty() {
        return Ok(Value::Number(0.0));
    }
    Ok(Value::Number(numbers.iter().product()))
}

/// AVERAGE function
pub fn fn_average(args: &[Value]) -> FormulaResult<Value> {
    let numbers = collect_numbers(args)?;
    if numbers.is_empty() {
        return Err(FormulaError::signal(ErrorCode::Div0));
    }
    Ok(Value::Number(
        numbers.iter().sum::<f64>() / numbers.len() as f64,
    ))
}

/// MIN function
pub fn fn_min(args: &[Value]) -> FormulaResult<Value> {
    let numbers = collect_numbers(args)?;
    let min = numbers.into_iter().reduce(f64::min);
    Ok(Value::Number(min.unwrap_or(0.0)))
}

/// MAX function
pub fn fn_max(args: &[Value]) -> FormulaResult<Value> {
    let numbers = collect_numbers(args)?;
    let max = numbers.into_iter().reduce(f64::max);
    Ok(Value::Number(max.unwrap_or(0.0)))
}

/// COUNT function - counts numbers, never fails on text
pub fn fn_count(args: &[Value]) -> FormulaResult<Value> {
    let count: usize = args
        .iter()
        .map(|arg| match arg {
            Value::Array(_) => arg
                .flatten()
                .into_iter()
                .filter(|v| matches!(v, Value::Number(_)))
                .count(),
            Value::Number(_) => 1,
            Value::String(_) if arg.as_number().is_some() => 1,
            _ => 0,
        })
        .sum();
    Ok(Value::Number(count as f64))
}

/// ABS function
pub fn fn_abs(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Number(number_arg(args, 0, 0.0)?.abs()))
}

/// ROUND(number, [digits]) - halves round away from zero
pub fn fn_round(args: &[Value]) -> FormulaResult<Value> {
    let n = number_arg(args, 0, 0.0)?;
    let digits = number_arg(args, 1, 0.0)?.trunc().clamp(-308.0, 308.0) as i32;
    let factor = 10f64.powi(digits);
    let scaled = n * factor;
    if !scaled.is_finite() {
        // Already more precise than `digits`
        return Ok(Value::Number(n));
    }
    Ok(Value::Number(scaled.round() / factor))
}

/// INT function - rounds down
pub fn fn_int(args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Number(number_arg(args, 0, 0.0)?.floor()))
}

/// MOD function - result takes the sign of the divisor
pub fn fn_mod(args: &[Value]) -> FormulaResult<Value> {
    let n = number_arg(args, 0, 0.0)?;
    let d = number_arg(args, 1, 0.0)?;
    if d == 0.0 {
        return Err(FormulaError::signal(ErrorCode::Div0));
    }
    Ok(Value::Number(n - d * (n / d).floor()))
}

/// SQRT function
pub fn fn_sqrt(args: &[Value]) -> FormulaResult<Value> {
    let n = number_arg(args, 0, 0.0)?;
    if n < 0.0 {
        return Err(FormulaError::signal(ErrorCode::Num));
    }
    Ok(Value::Number(n.sqrt()))
}

/// POWER function
pub fn fn_power(args: &[Value]) -> FormulaResult<Value> {
    let base = number_arg(args, 0, 0.0)?;
    let exp = number_arg(args, 1, 1.0)?;
    let result = base.powf(exp);
    if result.is_finite() {
        Ok(Value::Number(result))
    } else {
        Err(FormulaError::signal(ErrorCode::Num))
    }
}

/// PI function
pub fn fn_pi(_args: &[Value]) -> FormulaResult<Value> {
    Ok(Value::Number(std::f64::consts::PI))
}
