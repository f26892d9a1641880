//! Tests for evaluation, error translation and the variable/function registries

use hotcell::prelude::*;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

fn fails_with(message: &'static str) -> Engine {
    let mut engine = Engine::new();
    engine.set_function("FOO", move |_| Err(FormulaError::other(message)));
    engine
}

#[test]
fn test_empty_string_never_reaches_the_grammar() {
    let engine = Engine::new();

    assert_eq!(engine.evaluate(""), Evaluation::nothing());
    assert_eq!(engine.grammar_invocations(), 0);
}

#[test]
fn test_unknown_failure_is_generic_error() {
    assert_eq!(
        fails_with("some error").evaluate("FOO()"),
        Evaluation::err(ErrorCode::Error)
    );
}

#[test]
fn test_failure_messages_are_translated() {
    let cases = [
        ("#ERROR!", ErrorCode::Error),
        ("#DIV/0!", ErrorCode::Div0),
        ("#NAME?", ErrorCode::Name),
        ("#N/A", ErrorCode::Na),
        ("#NULL!", ErrorCode::Null),
        ("#NUM!", ErrorCode::Num),
        ("#REF!", ErrorCode::Ref),
        ("#VALUE!", ErrorCode::Value),
    ];

    for (message, code) in cases {
        let outcome = fails_with(message).evaluate("FOO()");
        assert_eq!(outcome, Evaluation::err(code), "{}", message);
        assert_eq!(outcome.error.map(|c| c.to_string()).as_deref(), Some(message));
    }
}

#[test]
fn test_error_literals_raise_their_code() {
    let engine = Engine::new();
    for code in ErrorCode::ALL {
        assert_eq!(engine.evaluate(code.as_str()), Evaluation::err(code));
    }
}

#[test]
fn test_error_like_strings_are_values() {
    let mut engine = Engine::new();
    engine.set_function("FOO", |_| Ok(Value::from("ERROR")));
    engine.set_function("BAR", |_| Ok(Value::from("#ERROR!")));

    assert_eq!(engine.evaluate("FOO()"), Evaluation::ok(Value::from("ERROR")));
    assert_eq!(engine.evaluate("BAR()"), Evaluation::ok(Value::from("#ERROR!")));
    assert_eq!(
        engine.evaluate("\"#ERROR!\""),
        Evaluation::ok(Value::from("#ERROR!"))
    );
}

#[test]
fn test_falsy_results_are_not_errors() {
    let engine = Engine::new();

    assert_eq!(engine.evaluate("NULL"), Evaluation::ok(Value::Null));
    assert_eq!(engine.evaluate("FALSE"), Evaluation::ok(Value::Boolean(false)));
    assert_eq!(engine.evaluate("0"), Evaluation::ok(Value::from(0)));
    assert_eq!(engine.evaluate("\"\""), Evaluation::ok(Value::from("")));
    assert!(engine.evaluate("0").is_ok());
}

#[test]
fn test_default_variables() {
    let engine = Engine::new();

    assert_eq!(engine.get_variable("TRUE"), Some(&Value::Boolean(true)));
    assert_eq!(engine.get_variable("FALSE"), Some(&Value::Boolean(false)));
    assert_eq!(engine.get_variable("NULL"), Some(&Value::Null));
    assert_eq!(engine.get_variable("foo"), None);
}

#[test]
fn test_custom_variables() {
    let mut engine = Engine::new();
    engine.set_constant("foo", 1234);
    engine.set_constant("bar", "1234");
    engine.set_constant("baz", vec![1, 2]);
    engine.set_variable("nested", vec![Value::from(vec![1, 2]), Value::from("x")]);

    assert_eq!(engine.get_variable("foo"), Some(&Value::from(1234)));
    assert_eq!(engine.get_variable("bar"), Some(&Value::from("1234")));
    assert_eq!(
        engine.get_variable("baz"),
        Some(&Value::Array(vec![Value::from(1), Value::from(2)]))
    );
    assert_eq!(
        engine.get_variable("nested"),
        Some(&Value::Array(vec![
            Value::Array(vec![Value::from(1), Value::from(2)]),
            Value::from("x"),
        ]))
    );

    assert_eq!(engine.evaluate("foo + bar"), Evaluation::ok(Value::from(2468)));
    assert_eq!(engine.evaluate("SUM(baz)"), Evaluation::ok(Value::from(3)));
}

#[test]
fn test_unset_names_are_name_errors() {
    let engine = Engine::new();

    assert_eq!(engine.evaluate("foo"), Evaluation::err(ErrorCode::Name));
    assert_eq!(engine.evaluate("NOT_DEFINED()"), Evaluation::err(ErrorCode::Name));
    // Variable names are exact-case
    assert_eq!(engine.evaluate("true"), Evaluation::err(ErrorCode::Name));
}

#[test]
fn test_variable_hook_takes_priority() {
    let mut engine = Engine::new();
    engine.set_variable("bar", "registry");
    engine.set_variable("barrr", "baz");
    engine.on_call_variable(|name| (name == "bar").then(|| Value::from("foo")));

    assert_eq!(engine.evaluate("bar"), Evaluation::ok(Value::from("foo")));
    assert_eq!(engine.evaluate("barrr"), Evaluation::ok(Value::from("baz")));
}

#[test]
fn test_custom_functions() {
    let mut engine = Engine::new();
    engine.set_function("FOO", |_| Ok(Value::from(1234)));
    engine.set_function("BAR", |args| {
        let a = args.first().and_then(Value::as_number).unwrap_or(0.0);
        let b = args.get(1).and_then(Value::as_number).unwrap_or(0.0);
        Ok(Value::from(a + b))
    });

    let foo = engine.get_function("FOO").unwrap();
    assert_eq!(foo(&[]), Ok(Value::from(1234)));
    let bar = engine.get_function("BAR").unwrap();
    assert_eq!(bar(&[Value::from(1), Value::from(2)]), Ok(Value::from(3)));
    assert!(engine.get_function("BAZ").is_none());

    // Call sites are upper-cased before lookup
    assert_eq!(engine.evaluate("bar(1, 2)"), Evaluation::ok(Value::from(3)));
}

#[test]
fn test_builtin_fallback() {
    let engine = Engine::new();

    assert_eq!(engine.evaluate("SUM(1, 2)"), Evaluation::ok(Value::from(3)));
    assert_eq!(engine.evaluate("sum(1, 2)"), Evaluation::ok(Value::from(3)));
    assert_eq!(
        engine.evaluate("IF(1>0, \"Yes\", \"No\")"),
        Evaluation::ok(Value::from("Yes"))
    );
}

#[test]
fn test_function_resolution_priority() {
    let mut engine = Engine::new();
    engine.set_function("ADD_1", |args| {
        let n = args.first().and_then(Value::as_number).unwrap_or(0.0);
        Ok(Value::from(n + 1.0))
    });
    engine.set_function("OVERRIDDEN", |_| Ok(Value::from("custom")));
    engine.set_function("SUM", |_| Ok(Value::from("shadowed")));
    engine.on_call_function(|name, args| {
        if name != "OVERRIDDEN" {
            return None;
        }
        let n = args.first().and_then(Value::as_number).unwrap_or(0.0);
        Some(Value::from(n + 2.0))
    });

    assert_eq!(engine.evaluate("ADD_1(2)"), Evaluation::ok(Value::from(3)));
    assert_eq!(engine.evaluate("OVERRIDDEN(2)"), Evaluation::ok(Value::from(4)));
    assert_eq!(engine.evaluate("SUM(2)"), Evaluation::ok(Value::from("shadowed")));
}

#[test]
fn test_hooks_run_once_per_occurrence_in_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut engine = Engine::new();

    let sink = Rc::clone(&seen);
    engine.on_call_variable(move |name| {
        sink.borrow_mut().push(name.to_string());
        Some(Value::from(1))
    });

    assert_eq!(engine.evaluate("a + b * a"), Evaluation::ok(Value::from(2)));
    assert_eq!(*seen.borrow(), vec!["a", "b", "a"]);
}

#[test]
fn test_expressions() {
    let engine = Engine::new();

    assert_eq!(engine.evaluate("=1+2*3"), Evaluation::ok(Value::from(7)));
    assert_eq!(
        engine.evaluate("\"Hello \"&\"World\""),
        Evaluation::ok(Value::from("Hello World"))
    );
    assert_eq!(engine.evaluate("5>3"), Evaluation::ok(Value::Boolean(true)));
    assert_eq!(engine.evaluate("1/0"), Evaluation::err(ErrorCode::Div0));
    assert_eq!(engine.evaluate("1/0+5"), Evaluation::err(ErrorCode::Div0));
    assert_eq!(engine.evaluate("SQRT(-1)"), Evaluation::err(ErrorCode::Num));
    assert_eq!(engine.evaluate("\"a\"*2"), Evaluation::err(ErrorCode::Value));
    assert_eq!(
        engine.evaluate("{1,2;3,4}"),
        Evaluation::ok(Value::block(vec![
            vec![Value::from(1), Value::from(2)],
            vec![Value::from(3), Value::from(4)],
        ]))
    );
}

#[test]
fn test_non_finite_numbers_are_never_results() {
    let engine = Engine::new();

    assert_eq!(engine.evaluate("\"NaN\"+1"), Evaluation::err(ErrorCode::Value));
    assert_eq!(engine.evaluate("\"inf\"*0"), Evaluation::err(ErrorCode::Value));
    assert_eq!(engine.evaluate("SUM(\"infinity\")"), Evaluation::err(ErrorCode::Value));
    assert_eq!(engine.evaluate("1e308*10"), Evaluation::err(ErrorCode::Num));
    assert_eq!(engine.evaluate("SUM(1e308, 1e308)"), Evaluation::err(ErrorCode::Num));
    assert_eq!(engine.evaluate("ROUND(1, 400)"), Evaluation::ok(Value::from(1)));
    assert_eq!(engine.evaluate("0^0"), Evaluation::err(ErrorCode::Num));
}

#[test]
fn test_long_operator_runs_hit_the_depth_limit() {
    let engine = Engine::new();

    let sum = vec!["1"; 20_000].join("+");
    assert_eq!(engine.evaluate(&sum), Evaluation::err(ErrorCode::Error));

    let product = vec!["2"; 20_000].join("*");
    assert_eq!(engine.evaluate(&product), Evaluation::err(ErrorCode::Error));

    let percents = format!("1{}", "%".repeat(20_000));
    assert_eq!(engine.evaluate(&percents), Evaluation::err(ErrorCode::Error));

    // Shorter chains still evaluate
    let short = vec!["1"; 100].join("+");
    assert_eq!(engine.evaluate(&short), Evaluation::ok(Value::from(100)));
}

#[test]
fn test_malformed_formulas_are_generic_errors() {
    let engine = Engine::new();

    for formula in ["1+", "(1", "1)", "SUM(1,", "*2", "'open", "#WHAT?"] {
        assert_eq!(
            engine.evaluate(formula),
            Evaluation::err(ErrorCode::Error),
            "{}",
            formula
        );
    }
}
