use std::{
    fs,
    io::{self, BufRead, Write},
};

use clap::Parser;
use numera::{Diagnostic, Interpreter, util::num::format_result};

/// numera is a small expression language for numeric mathematics. Every line
/// is a statement: an expression to evaluate or a variable or function
/// definition.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells numera to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Requires the operands of `&&`, `||`, `!` and `if(...)` conditions to be
    /// exactly 0 or 1.
    #[arg(short, long)]
    strict: bool,

    /// The script (or with `--file`, its path). Without it, an interactive
    /// session reads lines from standard input.
    contents: Option<String>,
}

fn main() {
    let args = Args::parse();
    let mut interpreter = Interpreter::new();

    let Some(contents) = args.contents else {
        repl(&mut interpreter, args.strict);
        return;
    };

    let script = if args.file {
        fs::read_to_string(&contents).unwrap_or_else(|_| {
                                         eprintln!("Failed to read the input file '{contents}'. \
                                                    Perhaps this file does not exist?");
                                         std::process::exit(1);
                                     })
    } else {
        contents
    };

    for line in script.lines().filter(|line| !line.trim().is_empty()) {
        if !run_line(&mut interpreter, line, args.strict) {
            std::process::exit(1);
        }
    }
}

/// Reads and runs lines from standard input until it is closed.
fn repl(interpreter: &mut Interpreter, strict: bool) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            return;
        }
        let Some(Ok(line)) = lines.next() else {
            return;
        };
        if !line.trim().is_empty() {
            run_line(interpreter, &line, strict);
        }
    }
}

/// Runs one line, printing its result or its error. Returns whether it
/// succeeded.
fn run_line(interpreter: &mut Interpreter, line: &str, strict: bool) -> bool {
    let outcome = interpreter.run(line, strict);
    if let Some(error) = outcome.error {
        report(line, &error);
        return false;
    }
    if let Some(value) = outcome.result {
        println!("{}", format_result(value));
    }
    true
}

/// Prints a diagnostic with a caret under the offending position.
fn report(line: &str, error: &Diagnostic) {
    let column = line.get(..error.position)
                     .map_or(error.position, |prefix| prefix.chars().count());
    eprintln!("{line}");
    eprintln!("{}^", " ".repeat(column));
    eprintln!("{}: {}", error.kind, error.message);
}
