//! Built-in functions
//!
//! The engine consults a [`FunctionLibrary`] as the last step of function
//! resolution. [`BuiltinLibrary`] is the default one; embedders can swap in
//! their own through `Engine::set_function_library`.

pub mod logical;
pub mod math;
pub mod text;

use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::finite;
use ahash::AHashMap;
use hotcell_core::{ErrorCode, Value};
use once_cell::sync::Lazy;

/// Function implementation signature
pub type FunctionImpl = fn(&[Value]) -> FormulaResult<Value>;

/// Name → function capability consulted after hooks and custom functions
pub trait FunctionLibrary {
    /// Call `name` if this library provides it, `None` otherwise
    fn call(&self, name: &str, args: &[Value]) -> Option<FormulaResult<Value>>;

    /// Whether this library provides `name`
    fn contains(&self, name: &str) -> bool;
}

impl<L: FunctionLibrary + ?Sized> FunctionLibrary for &L {
    fn call(&self, name: &str, args: &[Value]) -> Option<FormulaResult<Value>> {
        (**self).call(name, args)
    }

    fn contains(&self, name: &str) -> bool {
        (**self).contains(name)
    }
}

/// Function definition
pub struct FunctionDef {
    /// Function name (uppercase)
    pub name: &'static str,
    /// Minimum arguments
    pub min_args: usize,
    /// Maximum arguments (None = unlimited)
    pub max_args: Option<usize>,
    /// Implementation
    pub implementation: FunctionImpl,
}

static BUILTINS: Lazy<BuiltinLibrary> = Lazy::new(BuiltinLibrary::new);

/// The standard function set
pub struct BuiltinLibrary {
    functions: AHashMap<&'static str, FunctionDef>,
}

impl BuiltinLibrary {
    /// Create a new library with all built-in functions
    pub fn new() -> Self {
        let mut library = Self {
            functions: AHashMap::new(),
        };

        library.register_math_functions();
        library.register_logical_functions();
        library.register_text_functions();

        library
    }

    /// Process-wide shared instance
    pub fn shared() -> &'static BuiltinLibrary {
        &BUILTINS
    }

    /// Look up a function by name
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name.to_uppercase().as_str())
    }

    /// Names of all registered functions, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name, def);
    }

    fn define(
        &mut self,
        name: &'static str,
        min_args: usize,
        max_args: Option<usize>,
        f: FunctionImpl,
    ) {
        self.register(FunctionDef {
            name,
            min_args,
            max_args,
            implementation: f,
        });
    }

    fn register_math_functions(&mut self) {
        self.define("SUM", 1, None, math::fn_sum);
        self.define("PRODUCT", 1, None, math::fn_product);
        self.define("AVERAGE", 1, None, math::fn_average);
        self.define("MIN", 1, None, math::fn_min);
        self.define("MAX", 1, None, math::fn_max);
        self.define("COUNT", 1, None, math::fn_count);
        self.define("ABS", 1, Some(1), math::fn_abs);
        self.define("ROUND", 1, Some(2), math::fn_round);
        self.define("INT", 1, Some(1), math::fn_int);
        self.define("MOD", 2, Some(2), math::fn_mod);
        self.define("SQRT", 1, Some(1), math::fn_sqrt);
        self.define("POWER", 2, Some(2), math::fn_power);
        self.define("PI", 0, Some(0), math::fn_pi);
    }

    fn register_logical_functions(&mut self) {
        self.define("IF", 2, Some(3), logical::fn_if);
        self.define("AND", 1, None, logical::fn_and);
        self.define("OR", 1, None, logical::fn_or);
        self.define("XOR", 1, None, logical::fn_xor);
        self.define("NOT", 1, Some(1), logical::fn_not);
    }

    fn register_text_functions(&mut self) {
        self.define("CONCATENATE", 1, None, text::fn_concatenate);
        self.define("LEN", 1, Some(1), text::fn_len);
        self.define("LEFT", 1, Some(2), text::fn_left);
        self.define("RIGHT", 1, Some(2), text::fn_right);
        self.define("UPPER", 1, Some(1), text::fn_upper);
        self.define("LOWER", 1, Some(1), text::fn_lower);
        self.define("TRIM", 1, Some(1), text::fn_trim);
    }
}

impl Default for BuiltinLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionLibrary for BuiltinLibrary {
    fn call(&self, name: &str, args: &[Value]) -> Option<FormulaResult<Value>> {
        let def = self.get(name)?;

        // Check argument count
        let too_few = args.len() < def.min_args;
        let too_many = def.max_args.map_or(false, |max| args.len() > max);
        if too_few || too_many {
            log::debug!(
                "{} called with {} arguments (expected {}..{:?})",
                def.name,
                args.len(),
                def.min_args,
                def.max_args
            );
            return Some(Err(FormulaError::signal(ErrorCode::Value)));
        }

        Some((def.implementation)(args).and_then(|value| match value {
            Value::Number(n) => finite(n),
            other => Ok(other),
        }))
    }

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

// === Argument helpers shared by the function modules ===

/// Coerce a scalar argument to a number, `#VALUE!` otherwise
pub(crate) fn to_number(value: &Value) -> FormulaResult<f64> {
    value
        .as_number()
        .ok_or(FormulaError::Signal(ErrorCode::Value))
}

/// Numeric argument at `index`, or `default` when omitted
pub(crate) fn number_arg(args: &[Value], index: usize, default: f64) -> FormulaResult<f64> {
    match args.get(index) {
        Some(v) => to_number(v),
        None => Ok(default),
    }
}

/// Text of a scalar argument; arrays are `#VALUE!`
pub(crate) fn text_arg(args: &[Value], index: usize) -> FormulaResult<String> {
    match args.get(index) {
        Some(Value::Array(_)) => Err(FormulaError::signal(ErrorCode::Value)),
        Some(v) => Ok(v.as_text()),
        None => Ok(String::new()),
    }
}

/// Numbers contributed by aggregate arguments.
///
/// Direct arguments are coerced (a non-numeric string is `#VALUE!`); inside
/// arrays only actual numbers count. Empty and null values are skipped.
pub(crate) fn collect_numbers(args: &[Value]) -> FormulaResult<Vec<f64>> {
    let mut numbers = Vec::new();
    for arg in args {
        match arg {
            Value::Array(_) => {
                numbers.extend(arg.flatten().into_iter().filter_map(|v| match v {
                    Value::Number(n) => Some(*n),
                    _ => None,
                }));
            }
            Value::Empty | Value::Null => {}
            other => numbers.push(to_number(other)?),
        }
    }
    Ok(numbers)
}
