mod expr;
mod interp_errors;
mod stmt;

use std::io::{self, Stdout, Write};

use tools::errors::{ErrorReporter, ReportCodeErr};
use tracing::trace;

pub use interp_errors::{EvalError, RuntimeError, UnsupportedError};

use super::environment::{create_global_env, Env};
use super::values::RuntimeVal;
use frontend::ast::ASTNode;


// Nested user function calls allowed before giving up
pub const MAX_CALL_DEPTH: usize = 200;

// Evaluates programs against one environment that lives as long as the
// interpreter, so successive programs (REPL lines) share their definitions.
pub struct Interpreter<W: Write = Stdout> {
    environment: Env,
    out: W,
    call_depth: usize,
}

impl Interpreter<Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Interpreter<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    // Everything 'print' produces goes to 'out'
    pub fn with_output(out: W) -> Self {
        Self {
            environment: create_global_env(),
            out,
            call_depth: 0,
        }
    }

    pub fn environment(&self) -> &Env {
        &self.environment
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    // Runs every node and gives back the value of the last one
    pub fn execute_program(&mut self, nodes: &[ASTNode]) -> Result<RuntimeVal, EvalError> {
        let mut result = RuntimeVal::Nil;

        for n in nodes {
            trace!(line = n.line + 1, "executing statement");
            result = self.execute(&n.node)?;
        }

        Ok(result)
    }

    // Runtime faults are given to the reporter and stop the program, the
    // interpreter stays usable. Unsupported constructs are returned.
    pub fn interpret(
        &mut self,
        nodes: &[ASTNode],
        reporter: &mut dyn ErrorReporter,
    ) -> Result<(), UnsupportedError> {
        for n in nodes {
            trace!(line = n.line + 1, "executing statement");

            match self.execute(&n.node) {
                Ok(_) => {}
                Err(EvalError::Runtime(e)) => {
                    reporter.report(e.to_glob_err(e.line()));
                    break;
                }
                Err(EvalError::Unsupported(e)) => return Err(e),
                Err(e @ EvalError::Output(_)) => {
                    reporter.report(e.to_glob_err(n.line));
                    break;
                }
            }
        }

        Ok(())
    }
}
