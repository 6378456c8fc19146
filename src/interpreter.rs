//! Tree‑walking evaluator.
//!
//! Statements and expressions are executed by exhaustive `match` over the AST
//! variants.  The only mutable state is the *current* frame pointer, which is
//! swapped in [`Interpreter::execute_block`] and restored on every exit path.
//!
//! `return` travels as [`Interrupt::Return`], a control signal distinct from
//! errors; it is consumed at the function‑call boundary in
//! [`HydFunction::call`](crate::callable::HydFunction) and never escapes the
//! public API.

use std::io::{self, Write};
use std::rc::Rc;

use log::{debug, info};

use crate::ast::{Expr, ExprId, LiteralValue, Stmt};
use crate::callable::{natives, Callable, HydFunction};
use crate::environment::{Environment, SharedEnv};
use crate::error::{HydError, Result, RuntimeError};
use crate::resolver::Bindings;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// Why statement execution stopped early.
#[derive(Debug)]
pub(crate) enum Interrupt {
    /// A real error; aborts the program.
    Error(HydError),

    /// `return` unwinding to the nearest call.
    Return(Value),
}

impl From<HydError> for Interrupt {
    fn from(e: HydError) -> Self {
        Interrupt::Error(e)
    }
}

impl From<RuntimeError> for Interrupt {
    fn from(e: RuntimeError) -> Self {
        Interrupt::Error(e.into())
    }
}

impl From<io::Error> for Interrupt {
    fn from(e: io::Error) -> Self {
        Interrupt::Error(e.into())
    }
}

type Exec = std::result::Result<(), Interrupt>;
type Eval = std::result::Result<Value, Interrupt>;

pub struct Interpreter {
    globals: SharedEnv,
    environment: SharedEnv,
    bindings: Bindings,
    out: Box<dyn Write>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Interpreter printing to stdout.
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }

    /// Interpreter printing to `out`; the global frame starts with the
    /// native functions.
    pub fn with_output<W: Write + 'static>(out: W) -> Self {
        info!("Initializing Interpreter");

        let globals: SharedEnv = Environment::new().shared();

        for native in natives() {
            debug!("Defining native function '{}'", native);

            let name: String = native.name().to_string();
            globals
                .borrow_mut()
                .define(&name, Value::Callable(Rc::new(native)));
        }

        Self {
            environment: Rc::clone(&globals),
            globals,
            bindings: Bindings::new(),
            out: Box::new(out),
        }
    }

    /// Install the resolver's output.  Tables from successive runs (prompt
    /// lines) accumulate.
    pub fn load_bindings(&mut self, bindings: Bindings) {
        debug!("Loading {} binding(s)", bindings.len());

        self.bindings.merge(bindings);
    }

    /// Runs a program.  Stops at, and returns, the first runtime error.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        debug!("Interpreting {} statements", statements.len());

        let mut outcome: Result<()> = Ok(());

        for stmt in statements {
            match self.execute(stmt) {
                Ok(()) => {}
                Err(Interrupt::Error(e)) => {
                    debug!("Runtime error: {}", e);
                    outcome = Err(e);
                    break;
                }
                // Rejected statically; if it ever gets here the program ends.
                Err(Interrupt::Return(value)) => {
                    debug!("Top-level return with {}", value);
                    break;
                }
            }
        }

        self.out.flush()?;

        if outcome.is_ok() {
            info!("Interpretation completed successfully");
        }

        outcome
    }

    // ───────────────────────────── statements ─────────────────────────────

    fn execute(&mut self, stmt: &Stmt) -> Exec {
        match stmt {
            Stmt::Block(statements) => {
                let frame = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(statements, frame.shared())
            }

            Stmt::Expression(expr) => {
                self.eval(expr)?;
                Ok(())
            }

            Stmt::Function(decl) => {
                debug!("Defining function '{}'", decl.name.lexeme);

                // Capture the frame active *now* as the closure.
                let function = HydFunction::new(Rc::clone(decl), Rc::clone(&self.environment));
                self.environment
                    .borrow_mut()
                    .define(&decl.name.lexeme, Value::Callable(Rc::new(function)));
                Ok(())
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_stmt) = else_branch {
                    self.execute(else_stmt)
                } else {
                    Ok(())
                }
            }

            Stmt::Print(expr) => {
                let value: Value = self.eval(expr)?;
                writeln!(self.out, "{}", value)?;
                Ok(())
            }

            Stmt::Return { value, .. } => {
                let value: Value = match value {
                    Some(e) => self.eval(e)?,
                    None => Value::Nil,
                };
                Err(Interrupt::Return(value))
            }

            Stmt::Var { name, initializer } => {
                let value: Value = match initializer {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                debug!("Defining variable '{}' = {}", name.lexeme, value);

                self.environment.borrow_mut().define(&name.lexeme, value);
                Ok(())
            }

            Stmt::While { condition, body } => {
                while self.eval(condition)?.is_truthy() {
                    self.execute(body)?;
                }
                Ok(())
            }
        }
    }

    /// Run `statements` with `frame` as the current frame, restoring the
    /// previous frame however execution ends.
    pub(crate) fn execute_block(&mut self, statements: &[Stmt], frame: SharedEnv) -> Exec {
        let previous: SharedEnv = std::mem::replace(&mut self.environment, frame);

        let mut result: Exec = Ok(());
        for stmt in statements {
            result = self.execute(stmt);
            if result.is_err() {
                break;
            }
        }

        self.environment = previous;
        result
    }

    // ───────────────────────────── expressions ────────────────────────────

    fn eval(&mut self, expr: &Expr) -> Eval {
        match expr {
            Expr::Assign { id, name, value } => {
                let value: Value = self.eval(value)?;

                match self.bindings.depth(*id) {
                    Some(distance) => {
                        Environment::assign_at(&self.environment, distance, name, value.clone())?
                    }
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }

                Ok(value)
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left: Value = self.eval(left)?;
                let right: Value = self.eval(right)?;
                Ok(binary(operator, left, right)?)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee: Value = self.eval(callee)?;

                let mut args: Vec<Value> = Vec::with_capacity(arguments.len());
                for arg in arguments {
                    args.push(self.eval(arg)?);
                }

                let Value::Callable(function) = callee else {
                    return Err(RuntimeError::new(paren, "Can only call functions.").into());
                };

                if args.len() != function.arity() {
                    return Err(RuntimeError::new(
                        paren,
                        format!(
                            "Expected {} arguments but got {}.",
                            function.arity(),
                            args.len()
                        ),
                    )
                    .into());
                }

                debug!("Calling '{}' with {} argument(s)", function.name(), args.len());

                Ok(function.call(self, args)?)
            }

            Expr::Grouping(inner) => self.eval(inner),

            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::String(s.clone()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left: Value = self.eval(left)?;

                let short_circuit: bool = if operator.token_type == TokenType::OR {
                    left.is_truthy()
                } else {
                    !left.is_truthy()
                };

                if short_circuit {
                    Ok(left)
                } else {
                    self.eval(right)
                }
            }

            Expr::Unary { operator, right } => {
                let right: Value = self.eval(right)?;

                match (&operator.token_type, right) {
                    (TokenType::BANG, value) => Ok(Value::Bool(!value.is_truthy())),
                    (TokenType::MINUS, Value::Number(n)) => Ok(Value::Number(-n)),
                    _ => Err(RuntimeError::new(operator, "Operand must be a number.").into()),
                }
            }

            Expr::Variable { id, name } => Ok(self.look_up_variable(*id, name)?),
        }
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> std::result::Result<Value, RuntimeError> {
        match self.bindings.depth(id) {
            Some(distance) => Environment::get_at(&self.environment, distance, name),
            None => self.globals.borrow().get(name),
        }
    }
}

/// Arithmetic, comparison and equality.  Only `+` accepts non‑numbers (two
/// strings); division follows IEEE‑754, so `1 / 0` is `inf`.
fn binary(operator: &Token, left: Value, right: Value) -> std::result::Result<Value, RuntimeError> {
    match operator.token_type {
        TokenType::EQUAL_EQUAL => return Ok(Value::Bool(left == right)),
        TokenType::BANG_EQUAL => return Ok(Value::Bool(left != right)),
        TokenType::PLUS => {
            return match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                _ => Err(RuntimeError::new(
                    operator,
                    "Operands must be two numbers or two strings.",
                )),
            };
        }
        _ => {}
    }

    let (Value::Number(a), Value::Number(b)) = (left, right) else {
        return Err(RuntimeError::new(operator, "Operands must be numbers."));
    };

    Ok(match operator.token_type {
        TokenType::MINUS => Value::Number(a - b),
        TokenType::STAR => Value::Number(a * b),
        TokenType::SLASH => Value::Number(a / b),
        TokenType::GREATER => Value::Bool(a > b),
        TokenType::GREATER_EQUAL => Value::Bool(a >= b),
        TokenType::LESS => Value::Bool(a < b),
        TokenType::LESS_EQUAL => Value::Bool(a <= b),
        _ => {
            return Err(RuntimeError::new(
                operator,
                format!("Unknown operator '{}'.", operator.lexeme),
            ))
        }
    })
}
