#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use hyd::driver::{self, Outcome};
use hyd::interpreter::Interpreter;

/// Output sink the test keeps a handle to after the interpreter owns a clone.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("output is UTF-8")
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn capturing_interpreter() -> (Interpreter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    (Interpreter::with_output(buffer.clone()), buffer)
}

/// Run `source` end to end, returning the outcome and printed lines.
pub fn run_source(source: &str) -> (Outcome, Vec<String>) {
    let (mut interpreter, buffer) = capturing_interpreter();
    let outcome = driver::run(source, &mut interpreter);
    (outcome, buffer.lines())
}

/// Run `source`, asserting success, and return printed lines.
pub fn output_of(source: &str) -> Vec<String> {
    let (outcome, lines) = run_source(source);
    assert!(outcome.is_success(), "unexpected outcome: {:?}", outcome);
    lines
}

/// Message of the runtime error `source` fails with.
pub fn runtime_error_of(source: &str) -> String {
    match run_source(source).0 {
        Outcome::RuntimeError(e) => e.to_string(),
        other => panic!("expected runtime error, got {:?}", other),
    }
}

/// Rendered static errors for `source`.
pub fn static_errors_of(source: &str) -> Vec<String> {
    match run_source(source).0 {
        Outcome::StaticErrors(diagnostics) => {
            diagnostics.errors().iter().map(|e| e.to_string()).collect()
        }
        other => panic!("expected static errors, got {:?}", other),
    }
}
