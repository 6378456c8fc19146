use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser as ClapParser, ValueEnum};
use env_logger::Builder;
use log::{debug, info};

use hyd::ast_printer::AstPrinter;
use hyd::driver::{self, Outcome, EXIT_STATIC_ERROR, EXIT_USAGE};
use hyd::interpreter::Interpreter;
use hyd::scanner::Scanner;

#[derive(ClapParser, Debug)]
#[command(version, about = "Hyd language interpreter", long_about = None)]
pub struct Cli {
    /// Script to run; without one an interactive prompt starts
    script: Option<PathBuf>,

    /// Dump an intermediate form of the script instead of running it
    #[arg(long, value_enum, requires = "script")]
    emit: Option<Emit>,

    /// Enable logging to hyd.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Emit {
    /// One token per line
    Tokens,
    /// Parenthesised syntax tree, one statement per line
    Ast,
    /// Syntax tree as JSON
    Json,
}

/// Reads the contents of a file into a String
fn read_file(filename: &PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    String::from_utf8(buf).context(format!("{:?} is not valid UTF-8", filename))
}

fn init_logger() -> Result<()> {
    let log_file = File::create("hyd.log").context("Failed to create hyd.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'hyd::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("hyd::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // RUST_LOG below overrides this
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to hyd.log");
    Ok(())
}

/// Print an outcome's diagnostics to stderr.
fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Completed => {}
        Outcome::StaticErrors(diagnostics) => {
            for error in diagnostics.errors() {
                eprintln!("{}", error);
            }
        }
        Outcome::RuntimeError(error) => eprintln!("{}", error),
    }
}

fn run_file(path: &PathBuf) -> Result<i32> {
    let source = read_file(path)?;
    let mut interpreter = Interpreter::new();

    let outcome = driver::run(&source, &mut interpreter);
    report(&outcome);

    debug!("Run finished: {:?}", outcome);

    Ok(outcome.exit_code())
}

fn run_prompt() -> Result<i32> {
    info!("Starting interactive prompt");

    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        // Errors are reported and the session carries on.
        let outcome = driver::run(&line, &mut interpreter);
        report(&outcome);
    }

    Ok(0)
}

fn emit(path: &PathBuf, mode: Emit) -> Result<i32> {
    let source = read_file(path)?;

    if mode == Emit::Tokens {
        let mut failed = false;

        for result in Scanner::new(&source) {
            match result {
                Ok(token) => println!("{}", token),
                Err(e) => {
                    failed = true;
                    eprintln!("{}", e);
                }
            }
        }

        return Ok(if failed { EXIT_STATIC_ERROR } else { 0 });
    }

    let statements = match driver::parse_source(&source) {
        Ok(statements) => statements,
        Err(diagnostics) => {
            report(&Outcome::StaticErrors(diagnostics));
            return Ok(EXIT_STATIC_ERROR);
        }
    };

    match mode {
        Emit::Ast => {
            for stmt in &statements {
                println!("{}", AstPrinter::print_stmt(stmt));
            }
        }
        Emit::Json => {
            let json = serde_json::to_string_pretty(&statements)
                .context("Failed to serialize syntax tree")?;
            println!("{}", json);
        }
        Emit::Tokens => {}
    }

    Ok(0)
}

fn main() -> Result<()> {
    let args: Cli = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_USAGE,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if args.log {
        init_logger()?;
    } else {
        // Minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let code = match (&args.script, args.emit) {
        (Some(path), Some(mode)) => emit(path, mode)?,
        (Some(path), None) => run_file(path)?,
        (None, _) => run_prompt()?,
    };

    io::stdout().flush()?;

    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
