use std::fs;

use numera::{
    Diagnostic, ErrorKind, Interpreter, get_result, interpreter::lexer::MAX_NESTING,
    util::num::format_result,
};
use walkdir::WalkDir;

/// Runs every `tests/sessions/*.session` file as one interpreter session.
///
/// Each non-blank line that does not start with `#` has the form
/// `input => expected`, where `expected` is the formatted result, `ok` for a
/// definition, or `error <Kind> @ <position>`.
#[test]
fn session_files_replay() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/sessions").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "session")
                                      })
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let mut interpreter = Interpreter::new();

        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            count += 1;

            let (input, expected) =
                line.rsplit_once(" => ")
                    .unwrap_or_else(|| panic!("{path:?}:{}: missing ' => '", number + 1));
            let outcome = interpreter.run(input, false);
            let actual = match (outcome.result, outcome.error) {
                (_, Some(error)) => format!("error {} @ {}", error.kind, error.position),
                (Some(value), None) => format_result(value),
                (None, None) => "ok".to_string(),
            };

            assert_eq!(actual,
                       expected.trim(),
                       "{path:?}:{}: unexpected outcome of '{input}'",
                       number + 1);
        }
    }

    assert!(count > 0, "No session lines found in tests/sessions");
}

fn assert_value(src: &str, expected: f64) {
    match get_result(src, false) {
        Ok(Some(value)) => assert!((value - expected).abs() < 1e-9,
                                   "'{src}' gave {value}, expected {expected}"),
        other => panic!("Script '{src}' did not produce a value: {other:?}"),
    }
}

fn assert_error(src: &str, kind: ErrorKind, position: usize) {
    let error = expect_error(src, kind);
    assert_eq!(error.position, position, "'{src}': {error}");
}

fn expect_error(src: &str, kind: ErrorKind) -> Diagnostic {
    match get_result(src, false) {
        Err(error) => {
            assert_eq!(error.kind, kind, "'{src}': {error}");
            error
        },
        Ok(value) => panic!("Script '{src}' succeeded with {value:?} but was expected to fail"),
    }
}

#[test]
fn repeated_pure_expressions_are_idempotent() {
    let mut interpreter = Interpreter::new();
    let first = interpreter.run("sin(1) * 3 + 2 ^ 0.5", false);
    let second = interpreter.run("sin(1) * 3 + 2 ^ 0.5", false);
    assert!(first.result.is_some());
    assert_eq!(first, second);
}

#[test]
fn define_then_read() {
    assert_value("x = 5\nx", 5.0);
}

#[test]
fn redefinition_updates_in_place() {
    let mut interpreter = Interpreter::new();
    interpreter.run("x = 5", false);
    interpreter.run("x = 7", false);

    assert_eq!(interpreter.run("x", false).result, Some(7.0));
    assert_eq!(interpreter.definitions(), vec!["x = 7"]);
}

#[test]
fn overloads_are_distinguished_by_arity() {
    assert_value("f(a) = a + 1\nf(a, b) = a + b\nf(3)", 4.0);
    assert_value("f(a) = a + 1\nf(a, b) = a + b\nf(3, 4)", 7.0);
    assert_error("f(a) = a + 1\nf(a, b) = a + b\nf(1, 2, 3)", ErrorKind::Arity, 0);
}

#[test]
fn division_by_zero_points_at_the_operator() {
    assert_error("1/0", ErrorKind::DivisionByZero, 1);
    assert_error("4 % (2 - 2)", ErrorKind::DivisionByZero, 2);
}

#[test]
fn logical_operators_short_circuit() {
    assert_value("0 && (1/0)", 0.0);
    assert_value("1 || (1/0)", 1.0);
    assert_value("if(1, 5, 1/0)", 5.0);
}

#[test]
fn undefined_symbols() {
    assert_error("y", ErrorKind::UndefinedSymbol, 0);
    assert_error("1 + y", ErrorKind::UndefinedSymbol, 4);
    assert_error("nope(1)", ErrorKind::UndefinedSymbol, 0);
}

#[test]
fn precedence_and_associativity() {
    assert_value("2 + 3 * 4", 14.0);
    assert_value("2 ^ 3 ^ 2", 512.0);
    assert_value("10 - 4 - 3", 3.0);
    assert_value("2 * 3 % 4", 2.0);
    assert_value("1 + 1 == 2 && 3 > 2", 1.0);
    assert_value("-2 ^ 2", -4.0);
}

#[test]
fn builtins_cannot_be_redefined() {
    assert_error("PI = 1", ErrorKind::Redefinition, 3);
    assert_error("sqrt(v) = v", ErrorKind::Redefinition, 8);
}

#[test]
fn lexing_boundaries() {
    assert_value("1.5e-3 * 1000", 1.5);
    assert_error("1.", ErrorKind::Lexical, 1);
    assert_error("3 # 4", ErrorKind::Lexical, 2);

    let error = Interpreter::new().run("", false).error.unwrap();
    assert_eq!(error.kind, ErrorKind::Syntax);
    assert_eq!(error.position, 0);
}

#[test]
fn strict_mode_requires_booleans() {
    let mut interpreter = Interpreter::new();
    assert_eq!(interpreter.run("2 && 1", false).result, Some(1.0));

    let error = interpreter.run("2 && 1", true).error.unwrap();
    assert_eq!(error.kind, ErrorKind::Type);
    assert_eq!(error.position, 2);
    assert_eq!(interpreter.run("(2 > 1) && !(1 == 0)", true).result, Some(1.0));
}

#[test]
fn failed_lines_leave_definitions_unchanged() {
    let mut interpreter = Interpreter::new();
    interpreter.run("g(x) = x * 2", false);
    let before = interpreter.definitions();

    assert!(interpreter.run("g(x) = x * missing", false).error.is_some());
    assert!(interpreter.run("g(x) = ", false).error.is_some());
    assert_eq!(interpreter.definitions(), before);
    assert_eq!(interpreter.run("g(21)", false).result, Some(42.0));
}

#[test]
fn recursion_is_bounded() {
    assert_value("fib(n) = if(n < 2, n, fib(n - 1) + fib(n - 2))\nfib(15)", 610.0);
    expect_error("down(n) = down(n - 1)\ndown(3)", ErrorKind::RecursionLimit);
    expect_error("loop(n) = loop(n + 1)\nloop(0)", ErrorKind::RecursionLimit);
}

#[test]
fn deep_recursion_below_the_limit() {
    let factorial = get_result("fact(n) = if(n <= 1, 1, n * fact(n - 1))\nfact(170)", false);
    let Ok(Some(value)) = factorial else {
        panic!("fact(170) failed: {factorial:?}");
    };
    assert!(value.is_finite());
    assert!((value / 7.257_415_615_307_994e306 - 1.0).abs() < 1e-9);
}

#[test]
fn long_chains_of_lazy_variables() {
    let mut src = String::from("v0 = 0");
    for k in 1..=500 {
        src.push_str(&format!("\nv{k} = v{} + 1", k - 1));
    }
    src.push_str("\nv500");
    assert_value(&src, 500.0);
}

#[test]
fn failed_lines_do_not_cache_lazy_values() {
    let mut interpreter = Interpreter::new();
    interpreter.run("b = 5", false);
    interpreter.run("x = b * 2", false);

    let error = interpreter.run("x + 1/0", false).error.unwrap();
    assert_eq!(error.kind, ErrorKind::DivisionByZero);
    assert_eq!(interpreter.definitions(), vec!["b = 5", "x = b * 2"]);

    interpreter.run("b = 7", false);
    assert_eq!(interpreter.run("x", false).result, Some(14.0));
    assert_eq!(interpreter.definitions(), vec!["b = 7", "x = 14"]);
}

#[test]
fn polynomial_roots() {
    assert_value("quadroots(1, -3, 2)", 2.0);
    assert_value("quadroot(1, -3, 2, 1)", 1.0);
    assert_value("cubicroots(1, 0, -1, 0)", 3.0);
    assert_value("cubicroot(1, 0, -1, 0, 1)", -1.0);
    assert_value("cubicroot(1, -3, 3, -1, 1)", 1.0);
    assert_value("isnan(quadroot(1, 0, 1, 1))", 1.0);
}

#[test]
fn negative_base_fractional_exponent_takes_the_real_part() {
    assert_value("(-8) ^ (1 / 3)", 1.0);
    assert_value("isnan(0 ^ 0)", 1.0);
}

#[test]
fn nesting_is_limited_by_the_parser() {
    let parens = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    assert_value(&parens, 1.0);

    let parens = format!("{}1{}", "(".repeat(3000), ")".repeat(3000));
    assert_error(&parens, ErrorKind::Syntax, MAX_NESTING);

    assert_value(&format!("{}1", "-".repeat(100)), 1.0);
    assert_error(&format!("{}1", "-".repeat(5000)), ErrorKind::Syntax, MAX_NESTING);
    assert_error(&format!("{}1", "!".repeat(5000)), ErrorKind::Syntax, MAX_NESTING);
    expect_error(&format!("2{}", " ^ 2".repeat(3000)), ErrorKind::Syntax);
}
