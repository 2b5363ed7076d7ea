use std::io::Write;
use std::mem;
use std::rc::Rc;

use tracing::{debug, trace};

use super::interp_errors::{EvalError, UnsupportedError};
use super::Interpreter;
use crate::environment::Env;
use crate::values::{Function, RuntimeVal};
use frontend::ast::{FnDeclaration, StatementKind};


impl<W: Write> Interpreter<W> {
    // Every statement has a value so blocks and function bodies can give
    // back their last one
    pub(super) fn execute(&mut self, stmt: &StatementKind) -> Result<RuntimeVal, EvalError> {
        match stmt {
            StatementKind::Expression { expression } => self.evaluate(expression),
            StatementKind::Print { expression } => {
                let value = self.evaluate(expression)?;

                writeln!(self.out, "{}", value).map_err(|e| EvalError::Output(e.to_string()))?;
                Ok(RuntimeVal::Nil)
            }
            StatementKind::VarDeclaration { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => RuntimeVal::Nil,
                };

                self.environment.define(&name.value, value);
                Ok(RuntimeVal::Nil)
            }
            StatementKind::Block { statements } => {
                let env = self.environment.enclosed();
                self.execute_block(statements, env)
            }
            StatementKind::If { condition, then_branch, else_branch } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(branch) = else_branch {
                    self.execute(branch)
                } else {
                    Ok(RuntimeVal::Nil)
                }
            }
            StatementKind::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    self.execute(body)?;
                }

                Ok(RuntimeVal::Nil)
            }
            StatementKind::For { keyword, .. } => {
                debug!(line = keyword.line + 1, "refusing to run 'for' loop");
                Err(UnsupportedError::ForLoop { line: keyword.line }.into())
            }
            StatementKind::FnDeclaration(declaration) => {
                self.declare_function(declaration);
                Ok(RuntimeVal::Nil)
            }
        }
    }

    // Runs the statements in 'env', the current environment is restored
    // whatever the outcome
    pub(crate) fn execute_block(
        &mut self,
        statements: &[StatementKind],
        env: Env,
    ) -> Result<RuntimeVal, EvalError> {
        trace!(statements = statements.len(), "entering block");

        let previous = mem::replace(&mut self.environment, env);
        let result = self.execute_statements(statements);
        self.environment = previous;

        result
    }

    fn execute_statements(&mut self, statements: &[StatementKind]) -> Result<RuntimeVal, EvalError> {
        let mut last = RuntimeVal::Nil;

        for stmt in statements {
            last = self.execute(stmt)?;
        }

        Ok(last)
    }

    fn declare_function(&mut self, declaration: &Rc<FnDeclaration>) {
        debug!(name = declaration.name.value.as_str(), params = declaration.params.len(), "declaring function");

        // Snapshot taken before the name is bound, the call frame binds it
        let function = Function::new(Rc::clone(declaration), self.environment.clone());
        self.environment
            .define(&declaration.name.value, RuntimeVal::Function(Rc::new(function)));
    }
}
