//! Runs the whole pipeline over one source text.
//!
//! Static analysis (scan → parse → resolve) collects every error it can into a
//! [`Diagnostics`]; only a clean analysis reaches the interpreter.  The
//! [`Outcome`] tells the caller what happened and which exit code fits.

use log::info;

use crate::ast::Stmt;
use crate::error::{Diagnostics, HydError};
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::{Bindings, Resolver};
use crate::scanner::scan_tokens;

/// Exit code for a usage error.
pub const EXIT_USAGE: i32 = 64;
/// Exit code when static analysis reported errors.
pub const EXIT_STATIC_ERROR: i32 = 65;
/// Exit code when execution hit a runtime error.
pub const EXIT_RUNTIME_ERROR: i32 = 70;

/// A statically valid program, ready to run.
#[derive(Debug)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub bindings: Bindings,
}

/// Result of running a source text.
#[derive(Debug)]
pub enum Outcome {
    Completed,
    /// Nothing was executed.
    StaticErrors(Diagnostics),
    RuntimeError(HydError),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Completed => 0,
            Outcome::StaticErrors(_) => EXIT_STATIC_ERROR,
            Outcome::RuntimeError(_) => EXIT_RUNTIME_ERROR,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

/// Scan and parse only.  Returns the statements or every static error.
pub fn parse_source(source: &str) -> Result<Vec<Stmt>, Diagnostics> {
    let mut diagnostics = Diagnostics::new();

    let tokens = scan_tokens(source, &mut diagnostics);
    let statements = Parser::new(tokens).parse(&mut diagnostics);

    if diagnostics.has_errors() {
        Err(diagnostics)
    } else {
        Ok(statements)
    }
}

/// Scan, parse and resolve.  Every stage runs even after an earlier one
/// reported errors, so one call surfaces as many independent errors as
/// possible.
pub fn analyze(source: &str) -> Result<Program, Diagnostics> {
    let mut diagnostics = Diagnostics::new();

    let tokens = scan_tokens(source, &mut diagnostics);
    let statements = Parser::new(tokens).parse(&mut diagnostics);
    let bindings = Resolver::new().resolve(&statements, &mut diagnostics);

    if diagnostics.has_errors() {
        info!("Static analysis failed with {} error(s)", diagnostics.len());
        return Err(diagnostics);
    }

    Ok(Program {
        statements,
        bindings,
    })
}

/// Analyze `source` and, if it is clean, execute it on `interpreter`.
pub fn run(source: &str, interpreter: &mut Interpreter) -> Outcome {
    let program = match analyze(source) {
        Ok(program) => program,
        Err(diagnostics) => return Outcome::StaticErrors(diagnostics),
    };

    interpreter.load_bindings(program.bindings);

    match interpreter.interpret(&program.statements) {
        Ok(()) => Outcome::Completed,
        Err(e) => Outcome::RuntimeError(e),
    }
}
