//! Callable values: the capability every function value offers the
//! interpreter, and its two implementations.
//!
//! * [`HydFunction`]: a user declaration plus the frame it closed over.
//! * [`NativeFunction`]: a host function pointer (`clock` is the only one).

use std::fmt;
use std::rc::Rc;

use chrono::Utc;
use log::debug;

use crate::ast::FunctionDecl;
use crate::environment::{Environment, SharedEnv};
use crate::error::Result;
use crate::interpreter::{Interpreter, Interrupt};
use crate::value::Value;

pub trait Callable: fmt::Display {
    fn name(&self) -> &str;

    /// Number of arguments a call must supply.
    fn arity(&self) -> usize;

    /// Run the callable.  The interpreter has already checked the argument
    /// count against [`arity`](Callable::arity).
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value>;
}

/// A function declared in Hyd source.
pub struct HydFunction {
    declaration: Rc<FunctionDecl>,
    closure: SharedEnv,
}

impl HydFunction {
    pub fn new(declaration: Rc<FunctionDecl>, closure: SharedEnv) -> Self {
        Self {
            declaration,
            closure,
        }
    }
}

impl Callable for HydFunction {
    fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value> {
        // Parent is the closure, not the caller's frame: lexical scoping.
        let mut frame = Environment::with_enclosing(Rc::clone(&self.closure));

        for (param, arg) in self.declaration.params.iter().zip(arguments) {
            debug!("Binding parameter '{}' to {}", param.lexeme, arg);
            frame.define(&param.lexeme, arg);
        }

        match interpreter.execute_block(&self.declaration.body, frame.shared()) {
            Ok(()) => Ok(Value::Nil),
            Err(Interrupt::Return(value)) => {
                debug!("Function '{}' returned: {}", self.name(), value);
                Ok(value)
            }
            Err(Interrupt::Error(e)) => Err(e),
        }
    }
}

impl fmt::Display for HydFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

impl fmt::Debug for HydFunction {
    // The closure may (indirectly) contain this function; never print it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HydFunction")
            .field("name", &self.declaration.name.lexeme)
            .field("arity", &self.arity())
            .finish()
    }
}

/// Host functions are infallible; argument count is checked by the caller.
pub type NativeFn = fn(&[Value]) -> Value;

/// A function provided by the host.
#[derive(Debug, Clone)]
pub struct NativeFunction {
    name: &'static str,
    arity: usize,
    func: NativeFn,
}

impl NativeFunction {
    pub fn new(name: &'static str, arity: usize, func: NativeFn) -> Self {
        Self { name, arity, func }
    }
}

impl Callable for NativeFunction {
    fn name(&self) -> &str {
        self.name
    }

    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, _interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value> {
        debug!("Calling native function '{}'", self.name);

        Ok((self.func)(&arguments))
    }
}

impl fmt::Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

/// `clock()`: wall‑clock seconds since the Unix epoch, as a float.
fn clock(_args: &[Value]) -> Value {
    let micros: i64 = Utc::now().timestamp_micros();

    Value::Number(micros as f64 / 1_000_000.0)
}

/// Every native the global frame starts with.
pub fn natives() -> Vec<NativeFunction> {
    vec![NativeFunction::new("clock", 0, clock)]
}
