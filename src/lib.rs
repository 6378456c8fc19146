//! `hyd`: lexer, parser, resolver and tree‑walking interpreter for the Hyd
//! scripting language.
//!
//! ```no_run
//! use hyd::driver::{run, Outcome};
//! use hyd::interpreter::Interpreter;
//!
//! let mut interpreter = Interpreter::new();
//! let outcome: Outcome = run("print 1 + 2;", &mut interpreter);
//! assert_eq!(outcome.exit_code(), 0);
//! ```

pub mod ast;
pub mod ast_printer;
pub mod callable;
pub mod driver;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod token;
pub mod value;
