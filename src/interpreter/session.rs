use std::thread;

use crate::{
    error::{Diagnostic, ErrorKind},
    interpreter::{
        evaluator::{core::Context, symbol_table::SymbolTable},
        parser::parse_source,
    },
};

/// Stack size of the thread every line is parsed and evaluated on.
///
/// Sized for the nesting limit of the parser and for
/// [`MAX_EVAL_DEPTH`](crate::interpreter::evaluator::core::MAX_EVAL_DEPTH)
/// nested evaluations.
pub const EVAL_STACK_SIZE: usize = 256 * 1024 * 1024;

/// The result of one [`Interpreter::run`] call.
///
/// At most one of `result` and `error` is set. A successful definition sets
/// neither.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// The value of an expression statement.
    pub result: Option<f64>,
    /// Why the run failed.
    pub error:  Option<Diagnostic>,
}

impl Outcome {
    /// Whether the run succeeded.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// One line previously given to [`Interpreter::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The input text.
    pub source:    String,
    /// Whether running it failed.
    pub was_error: bool,
}

/// An interpreter session.
///
/// The session owns the symbol table. Every successful definition persists
/// into later runs until [`Interpreter::reset`] is called.
///
/// ## Example
/// ```
/// use numera::{error::ErrorKind, interpreter::session::Interpreter};
///
/// let mut interpreter = Interpreter::new();
///
/// assert!(interpreter.run("f(a) = a + 1", false).is_ok());
/// assert!(interpreter.run("f(a, b) = a + b", false).is_ok());
/// assert_eq!(interpreter.run("f(3)", false).result, Some(4.0));
/// assert_eq!(interpreter.run("f(3, 4)", false).result, Some(7.0));
///
/// let outcome = interpreter.run("1 / 0", false);
/// let error = outcome.error.unwrap();
/// assert_eq!(error.kind, ErrorKind::DivisionByZero);
/// assert_eq!(error.position, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    context: Context,
    history: Vec<HistoryEntry>,
}

impl Interpreter {
    /// Creates a session holding only the built-ins.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and evaluates one line.
    ///
    /// With `type_checking` set, logical operands and conditions must be
    /// exactly `0` or `1`. Errors never escape: they are returned inside the
    /// [`Outcome`], and a failed line leaves the definitions unchanged.
    ///
    /// The line is handled on a worker thread with an [`EVAL_STACK_SIZE`]
    /// stack, so the depth limits are reached long before the stack is.
    pub fn run(&mut self, source: &str, type_checking: bool) -> Outcome {
        self.context.type_checking = type_checking;

        let worker = thread::scope(|scope| {
            let context = &mut self.context;
            thread::Builder::new().name("numera-eval".to_string())
                                  .stack_size(EVAL_STACK_SIZE)
                                  .spawn_scoped(scope, move || evaluate(context, source))
                                  .map(|handle| handle.join())
        });

        let evaluated = match worker {
            Ok(Ok(evaluated)) => evaluated,
            Ok(Err(_)) => {
                self.context.abandon();
                Err(internal_error("Evaluation aborted unexpectedly.".to_string()))
            },
            Err(error) => Err(internal_error(format!("Could not start the evaluator: {error}."))),
        };

        let outcome = match evaluated {
            Ok(result) => Outcome { result,
                                    error: None },
            Err(error) => Outcome { result: None,
                                    error:  Some(error), },
        };

        self.history.push(HistoryEntry { source:    source.to_string(),
                                         was_error: outcome.error.is_some(), });
        outcome
    }

    /// Every line run so far, in order.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// The user-defined identifiers rendered as source lines that recreate
    /// them.
    ///
    /// Lines come in definition order, except that a definition always
    /// follows the definitions it refers to, so [`Interpreter::restore`] can
    /// replay them.
    #[must_use]
    pub fn definitions(&self) -> Vec<String> {
        self.context
            .symbols
            .dependency_order()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    /// The symbol table of the session, built-ins included.
    #[must_use]
    pub const fn symbols(&self) -> &SymbolTable {
        &self.context.symbols
    }

    /// Forgets every user definition and the history. Built-ins stay.
    pub fn reset(&mut self) {
        self.context.symbols.clear_user_defined();
        self.history.clear();
    }

    /// Resets the session and replays `lines`, as produced by
    /// [`Interpreter::definitions`].
    ///
    /// Every line is run even if an earlier one fails. The diagnostics of the
    /// failed lines are returned.
    pub fn restore<I, S>(&mut self, lines: I) -> Vec<Diagnostic>
        where I: IntoIterator<Item = S>,
              S: AsRef<str>
    {
        self.reset();
        lines.into_iter()
             .filter_map(|line| self.run(line.as_ref(), false).error)
             .collect()
    }
}

fn evaluate(context: &mut Context, source: &str) -> Result<Option<f64>, Diagnostic> {
    let statement = parse_source(source)?;
    Ok(context.eval_statement(&statement)?)
}

fn internal_error(message: String) -> Diagnostic {
    Diagnostic { kind: ErrorKind::Unknown,
                 message,
                 position: 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn history_records_failures() {
        let mut interpreter = Interpreter::new();
        interpreter.run("1 + 1", false);
        interpreter.run("y", false);

        let flags: Vec<_> = interpreter.history().iter().map(|h| h.was_error).collect();
        assert_eq!(flags, vec![false, true]);
        assert_eq!(interpreter.history()[1].source, "y");
    }

    #[test]
    fn definitions_render_back_to_source() {
        let mut interpreter = Interpreter::new();
        interpreter.run("x = 5", false);
        interpreter.run("area(w, h) = w * h", false);
        interpreter.run("y = (x + 1) * 2", false);
        interpreter.run("y", false);

        assert_eq!(interpreter.definitions(), vec!["x = 5", "area(w, h) = w * h", "y = 12"]);
    }

    #[test]
    fn restore_replays_definitions() {
        let mut first = Interpreter::new();
        first.run("r = 2", false);
        first.run("circle(r) = PI * r ^ 2", false);
        first.run("s = r + 1", false);
        let saved = first.definitions();

        let mut second = Interpreter::new();
        second.run("junk = 1", false);
        assert!(second.restore(&saved).is_empty());
        assert_eq!(second.definitions(), saved);
        assert_eq!(second.run("s", false).result, Some(3.0));
        assert_eq!(second.run("junk", false).error.map(|e| e.kind),
                   Some(ErrorKind::UndefinedSymbol));
    }

    #[test]
    fn restore_after_redefining_in_terms_of_a_later_name() {
        let mut first = Interpreter::new();
        first.run("a = 1", false);
        first.run("c = 5", false);
        first.run("a = c + 1", false);
        first.run("x = 1", false);
        first.run("f(n) = n + x", false);
        first.run("x = c * 2", false);
        let saved = first.definitions();
        assert_eq!(saved, vec!["c = 5", "a = c + 1", "x = c * 2", "f(n) = n + x"]);

        let mut second = Interpreter::new();
        assert!(second.restore(&saved).is_empty());
        assert_eq!(second.run("a", false).result, Some(6.0));
        assert_eq!(second.run("f(1)", false).result, Some(11.0));
    }

    #[test]
    fn reset_keeps_builtins() {
        let mut interpreter = Interpreter::new();
        interpreter.run("x = 1", false);
        interpreter.reset();

        assert!(interpreter.history().is_empty());
        assert!(interpreter.definitions().is_empty());
        assert_eq!(interpreter.run("round(PI)", false).result, Some(3.0));
    }

    #[test]
    fn parse_errors_become_diagnostics() {
        let mut interpreter = Interpreter::new();
        let error = interpreter.run("3 $ 4", false).error.unwrap();
        assert_eq!(error.kind, ErrorKind::Lexical);
        assert_eq!(error.position, 2);

        let error = interpreter.run("   ", false).error.unwrap();
        assert_eq!(error.kind, ErrorKind::Syntax);
        assert_eq!(error.position, 0);
    }
}
