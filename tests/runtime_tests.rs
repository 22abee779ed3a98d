use std::io::Cursor;

use algo::{Bindings, Config, InterpretError, Interpreter, Value, error::RuntimeError};

/// Checks and runs `code` with `input` on stdin, returning the final bindings
/// and everything written.
fn run_with(interpreter: &Interpreter, code: &str, input: &str) -> (Result<Bindings, InterpretError>, String) {
    let mut output = Vec::new();
    let result = interpreter.run_str(code, Cursor::new(input.to_string()), &mut output);
    (result, String::from_utf8(output).expect("utf-8 output"))
}

fn run(code: &str, input: &str) -> (Result<Bindings, InterpretError>, String) {
    run_with(&Interpreter::default(), code, input)
}

fn runtime_error(code: &str, input: &str) -> (usize, RuntimeError) {
    let (result, _) = run(code, input);
    match result.expect_err("program should fail at runtime") {
        InterpretError::Runtime { line, error, .. } => (line, error),
        other => panic!("expected a runtime error, got {other:?}"),
    }
}

#[test]
fn greets_by_name() {
    let code = r#"Algorithm Hello;
Variables
    name: String;
Begin
    Write("Name? ");
    Read(name);
    Write("Hello, ", name, "!\n");
End"#;
    let (result, output) = run(code, "Ada Lovelace\n");
    let bindings = result.expect("runs");
    assert_eq!(output, "Name? Hello, Ada Lovelace!\n");
    assert_eq!(bindings.value("name"), Some(&Value::String("Ada Lovelace".into())));
}

#[test]
fn reads_numbers_across_lines() {
    let code = r#"Algorithm Sum;
Variables
    a: Integer;
    b: Integer;
    r: Real;
    s: Integer;
Begin
    Read(a, b);
    Read(r);
    s = a + b;
    Write(s, " ", r);
End"#;
    let (result, output) = run(code, "3\n  4\n2.5\n");
    result.expect("runs");
    assert_eq!(output, "7 2.5");
}

#[test]
fn string_read_after_number_takes_rest_of_line() {
    let code = r#"Algorithm Mixed;
Variables
    n: Integer;
    s: String;
    t: String;
Begin
    Read(n, s, t);
End"#;
    let (result, _) = run(code, "5 apples\npears\n");
    let bindings = result.expect("runs");
    assert_eq!(bindings.value("n"), Some(&Value::Integer(5)));
    assert_eq!(bindings.value("s"), Some(&Value::String("apples".into())));
    assert_eq!(bindings.value("t"), Some(&Value::String("pears".into())));
}

#[test]
fn exact_integer_division_stays_integer() {
    let code = "Algorithm A;\nVariables\n    q = 8: Integer;\n    m: Integer;\nBegin\n    m = q % \
                3;\n    q = q / 2;\n    Write(q, \",\", m);\nEnd";
    let (result, output) = run(code, "");
    assert_eq!(result.expect("runs").value("q"), Some(&Value::Integer(4)));
    assert_eq!(output, "4,2");
}

#[test]
fn inexact_integer_division_gives_a_real() {
    let code = r#"Algorithm Mean;
Variables
    a: Integer;
    b: Integer;
    avg: Real;
Begin
    Read(a, b);
    avg = (a + b) / 2;
    Write(avg);
End"#;
    let (result, output) = run(code, "3 4\n");
    result.expect("runs");
    assert_eq!(output, "3.5");
}

#[test]
fn inexact_integer_division_does_not_fit_integer() {
    let code = "Algorithm A;\nVariables\n    n = 7: Integer;\nBegin\n    n = n / 2;\nEnd";
    let (line, error) = runtime_error(code, "");
    assert_eq!(line, 5);
    assert_eq!(
        error.to_string(),
        "Wrong data type, cannot assign Real to Integer variable 'n'"
    );
}

#[test]
fn integer_results_widen_into_reals() {
    let code = "Algorithm A;\nVariables\n    r: Real;\nBegin\n    r = 2 * 3;\n    Write(r);\nEnd";
    let (result, output) = run(code, "");
    assert_eq!(result.expect("runs").value("r"), Some(&Value::Real(6.0)));
    assert_eq!(output, "6.0");
}

#[test]
fn constants_are_visible_to_expressions() {
    let code = r#"Algorithm Area;
Constants
    SIDE = 1.5: Real;
Variables
    area: Real;
Begin
    area = SIDE * SIDE;
    Write(area);
End"#;
    let (result, output) = run(code, "");
    result.expect("runs");
    assert_eq!(output, "2.25");
}

#[test]
fn strings_can_be_assigned_and_concatenated() {
    let code = r#"Algorithm Shout;
Variables
    s = "hey": String;
Begin
    s = s + "!";
    s = s + s;
    Write(s);
End"#;
    let (result, output) = run(code, "");
    result.expect("runs");
    assert_eq!(output, "hey!hey!");
}

#[test]
fn repeated_statements_run_every_time() {
    let code = "Algorithm A;\nVariables\n    n = 0: Integer;\nBegin\n    n = n + 1;\n    n = n + \
                1;\n    Write(n);\n    Write(n);\nEnd";
    let (result, output) = run(code, "");
    result.expect("runs");
    assert_eq!(output, "22");
}

#[test]
fn writing_an_unassigned_variable_fails() {
    let code = "Algorithm A;\nVariables\n    x: Integer;\nBegin\n    Write(\"x is \", x);\nEnd";
    let (line, error) = runtime_error(code, "");
    assert_eq!(line, 5);
    assert!(matches!(error, RuntimeError::Unassigned(ref name) if name == "x"));
}

#[test]
fn expressions_need_assigned_operands() {
    let code = "Algorithm A;\nVariables\n    x: Integer;\n    y: Integer;\nBegin\n    y = x + \
                1;\nEnd";
    let (line, error) = runtime_error(code, "");
    assert_eq!(line, 6);
    assert!(matches!(error, RuntimeError::Unassigned(ref name) if name == "x"));
}

#[test]
fn real_result_cannot_be_stored_in_integer() {
    let code = "Algorithm A;\nVariables\n    n: Integer;\nBegin\n    n = 1.5 * 2.0;\nEnd";
    let (_, error) = runtime_error(code, "");
    assert!(matches!(
        error,
        RuntimeError::WrongDataType { ref name, ref found, .. } if name == "n" && found == "Real"
    ));
}

#[test]
fn number_cannot_be_stored_in_string() {
    let code = "Algorithm A;\nVariables\n    s: String;\nBegin\n    s = 40 + 2;\nEnd";
    let (_, error) = runtime_error(code, "");
    assert_eq!(
        error.to_string(),
        "Wrong data type, cannot assign Integer to String variable 's'"
    );
}

#[test]
fn division_by_zero_is_reported() {
    let code = "Algorithm A;\nVariables\n    n = 0: Integer;\nBegin\n    n = 10 / n;\nEnd";
    let (line, error) = runtime_error(code, "");
    assert_eq!(line, 5);
    assert!(matches!(error, RuntimeError::Eval(_)));
}

#[test]
fn bad_input_is_reported() {
    let code = "Algorithm A;\nVariables\n    n: Integer;\nBegin\n    Read(n);\nEnd";
    let (_, error) = runtime_error(code, "twelve\n");
    assert_eq!(error.to_string(), "Expected Integer for 'n' but read 'twelve'");
}

#[test]
fn running_out_of_input_is_reported() {
    let code = "Algorithm A;\nVariables\n    a: Real;\n    b: Real;\nBegin\n    Read(a, b);\nEnd";
    let (_, error) = runtime_error(code, "1.0\n");
    assert!(matches!(error, RuntimeError::EndOfInput(ref name) if name == "b"));
}

#[test]
fn output_before_a_failure_is_kept() {
    let code = "Algorithm A;\nVariables\n    x: Integer;\nBegin\n    Write(\"before\");\n    \
                Write(x);\n    Write(\"after\");\nEnd";
    let (result, output) = run(code, "");
    let err = result.expect_err("x is unassigned");
    assert_eq!(output, "before");
    assert_eq!(
        err.to_string(),
        "Runtime error in line 6: Variable 'x' has no value assigned\nWrite(x);"
    );
}

#[test]
fn operation_budget_is_enforced() {
    let interpreter = Interpreter::new(Config::builder().max_operations(2).build());
    let code = "Algorithm A;\nVariables\n    n = 1: Integer;\nBegin\n    n = n + n + n + n + n + n \
                + n + n + n + n;\nEnd";
    let (result, _) = run_with(&interpreter, code, "");
    assert!(matches!(
        result,
        Err(InterpretError::Runtime {
            error: RuntimeError::Eval(_),
            ..
        })
    ));
}

#[test]
fn checked_algorithm_can_run_twice() {
    let interpreter = Interpreter::default();
    let algorithm = interpreter
        .check_str("Algorithm A;\nVariables\n    n: Integer;\nBegin\n    Read(n);\n    n = n * n;\nEnd")
        .expect("valid program");

    let first = interpreter
        .run(&algorithm, Cursor::new("3"), Vec::new())
        .expect("first run");
    let second = interpreter
        .run(&algorithm, Cursor::new("5"), Vec::new())
        .expect("second run");

    assert_eq!(first.value("n"), Some(&Value::Integer(9)));
    assert_eq!(second.value("n"), Some(&Value::Integer(25)));
    assert!(algorithm.bindings().value("n").is_none());
}
