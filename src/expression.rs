#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use rhai::{AST, Dynamic, Engine, EvalAltResult, FLOAT, INT, OptimizationLevel, Scope};
use tracing::trace;

use crate::{
    config::Config,
    error::RuntimeError,
    value::{Bindings, DataType, Value},
};

/// Creates and returns a new `Engine` for evaluating assignment expressions,
/// with the limits from `config` applied.
///
/// `/` on two integers is overridden to stay exact, so built-in operator fast
/// paths and constant folding are both turned off.
pub fn create_engine(config: &Config) -> Engine {
    let mut engine = Engine::new();
    engine
        .set_max_operations(config.max_operations())
        .set_max_expr_depths(config.max_expr_depth(), config.max_expr_depth())
        .set_fast_operators(false)
        .set_optimization_level(OptimizationLevel::None)
        .disable_symbol("eval");
    engine.register_fn("/", divide);
    engine.on_print(|_| {});
    engine.on_debug(|_, _, _| {});
    engine
}

/// Integer division that stays exact: an `Integer` when `b` divides `a`, a
/// `Real` otherwise.
fn divide(a: INT, b: INT) -> Result<Dynamic, Box<EvalAltResult>> {
    if b == 0 {
        return Err(format!("Division by zero: {a} / {b}").into());
    }
    match a.checked_rem(b) {
        Some(0) => a
            .checked_div(b)
            .map(Dynamic::from_int)
            .ok_or_else(|| format!("Division overflow: {a} / {b}").into()),
        Some(_) => Ok(Dynamic::from_float(a as FLOAT / b as FLOAT)),
        None => Err(format!("Division overflow: {a} / {b}").into()),
    }
}

/// Compiles an expression, returning the engine's message on failure.
pub fn compile(engine: &Engine, expression: &str) -> Result<AST, String> {
    engine
        .compile_expression(expression)
        .map_err(|e| e.to_string())
}

/// Evaluates `ast` against every assigned binding and converts the result to
/// the type of `target`.
pub fn evaluate(
    engine: &Engine,
    ast: &AST,
    bindings: &Bindings,
    target: &str,
    target_type: DataType,
) -> Result<Value, RuntimeError> {
    let mut scope = Scope::new();
    for binding in bindings.iter() {
        let Some(value) = &binding.value else {
            continue;
        };
        if binding.constant {
            scope.push_constant_dynamic(binding.name.as_str(), to_dynamic(value));
        } else {
            scope.push_dynamic(binding.name.as_str(), to_dynamic(value));
        }
    }

    let result = engine
        .eval_ast_with_scope::<Dynamic>(&mut scope, ast)
        .map_err(|e| RuntimeError::Eval(e.to_string()))?;
    trace!("{target} <- {result:?}");

    coerce(result, target, target_type)
}

/// Wraps a value for the expression engine.
fn to_dynamic(value: &Value) -> Dynamic {
    match value {
        Value::Integer(i) => Dynamic::from_int(*i),
        Value::Real(r) => Dynamic::from_float(*r),
        Value::String(s) => Dynamic::from(s.clone()),
    }
}

/// Converts an engine result into a value of `target_type`. Integers widen to
/// `Real`; every other mismatch is an error.
fn coerce(result: Dynamic, target: &str, target_type: DataType) -> Result<Value, RuntimeError> {
    let found = type_label(&result);
    let wrong_type = |_| RuntimeError::WrongDataType {
        name: target.to_string(),
        expected: target_type,
        found: found.clone(),
    };

    match target_type {
        DataType::Integer => result.as_int().map(Value::Integer).map_err(wrong_type),
        DataType::Real => result
            .as_float()
            .or_else(|_| result.as_int().map(|i| i as f64))
            .map(Value::Real)
            .map_err(wrong_type),
        DataType::String => result
            .into_string()
            .map(Value::String)
            .map_err(wrong_type),
    }
}

/// Names an engine value using Algo type names where one applies.
fn type_label(value: &Dynamic) -> String {
    if value.is_int() {
        DataType::Integer.to_string()
    } else if value.is_float() {
        DataType::Real.to_string()
    } else if value.is_string() {
        DataType::String.to_string()
    } else {
        value.type_name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Binding;

    fn eval(
        expression: &str,
        bindings: &Bindings,
        target_type: DataType,
    ) -> Result<Value, RuntimeError> {
        let engine = create_engine(&Config::default());
        let ast = compile(&engine, expression).expect("compile expression");
        evaluate(&engine, &ast, bindings, "target", target_type)
    }

    #[test]
    fn integer_result_widens_to_real() {
        let mut bindings = Bindings::new();
        bindings.declare(Binding::variable("a", DataType::Integer, Some(Value::Integer(7))));
        let value = eval("a * 2", &bindings, DataType::Real).expect("evaluate");
        assert_eq!(value, Value::Real(14.0));
    }

    #[test]
    fn real_result_does_not_fit_integer() {
        let bindings = Bindings::new();
        let err = eval("1.5 + 1.0", &bindings, DataType::Integer).expect_err("type mismatch");
        assert!(matches!(err, RuntimeError::WrongDataType { ref found, .. } if found == "Real"));
    }

    #[test]
    fn integer_division_is_exact() {
        let bindings = Bindings::new();
        assert_eq!(eval("7 / 2", &bindings, DataType::Real).expect("evaluate"), Value::Real(3.5));
        assert_eq!(eval("8 / 2", &bindings, DataType::Integer).expect("evaluate"), Value::Integer(4));
        assert!(matches!(
            eval("7 / 2", &bindings, DataType::Integer),
            Err(RuntimeError::WrongDataType { .. })
        ));
        assert!(matches!(eval("1 / 0", &bindings, DataType::Integer), Err(RuntimeError::Eval(_))));
    }

    #[test]
    fn statements_are_not_expressions() {
        let engine = create_engine(&Config::default());
        assert!(compile(&engine, "x = 3").is_err());
    }
}
