use std::io::Write;

use tracing::debug;

use super::interp_errors::{EvalError, RuntimeError, UnsupportedError};
use super::{Interpreter, MAX_CALL_DEPTH};
use crate::values::RuntimeVal;
use frontend::ast::ExpressionKind;
use frontend::lexer::{Token, TokenKind};


impl<W: Write> Interpreter<W> {
    pub(super) fn evaluate(&mut self, expr: &ExpressionKind) -> Result<RuntimeVal, EvalError> {
        match expr {
            ExpressionKind::Literal { value } => Ok(RuntimeVal::from(value)),
            ExpressionKind::Grouping { expression } => self.evaluate(expression),
            ExpressionKind::Variable { name } => Ok(self
                .environment
                .get(&name.value)
                .map_err(|e| RuntimeError::from_env(e, name))?),
            ExpressionKind::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.environment
                    .assign(&name.value, value.clone())
                    .map_err(|e| RuntimeError::from_env(e, name))?;

                Ok(value)
            }
            ExpressionKind::Logical { left, operator, right } => {
                self.evaluate_logical(left, operator, right)
            }
            ExpressionKind::Conditional { condition, then_branch, else_branch } => {
                match self.evaluate(condition)?.is_truthy() {
                    true => self.evaluate(then_branch),
                    false => self.evaluate(else_branch),
                }
            }
            ExpressionKind::Unary { operator, right } => self.evaluate_unary(operator, right),
            ExpressionKind::Binary { left, operator, right } => {
                // Operands are evaluated left to right before the operator is checked
                let lhs = self.evaluate(left)?;
                let rhs = self.evaluate(right)?;

                Ok(lhs
                    .calculate(&rhs, operator.kind)
                    .map_err(|e| RuntimeError::from_value(e, operator))?)
            }
            ExpressionKind::Call { callee, paren, args } => self.evaluate_call(callee, paren, args),
        }
    }

    // The operand value itself is the result, not a bool
    fn evaluate_logical(
        &mut self,
        left: &ExpressionKind,
        operator: &Token,
        right: &ExpressionKind,
    ) -> Result<RuntimeVal, EvalError> {
        let left = self.evaluate(left)?;

        let short_circuit = match operator.kind {
            TokenKind::Or => left.is_truthy(),
            _ => !left.is_truthy(),
        };

        match short_circuit {
            true => Ok(left),
            false => self.evaluate(right),
        }
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &ExpressionKind) -> Result<RuntimeVal, EvalError> {
        let value = self.evaluate(right)?;

        match operator.kind {
            TokenKind::Bang => Ok(RuntimeVal::Bool(!value.is_truthy())),
            _ => Ok(value.negate().map_err(|e| RuntimeError::from_value(e, operator))?),
        }
    }

    fn evaluate_call(
        &mut self,
        callee: &ExpressionKind,
        paren: &Token,
        args: &[ExpressionKind],
    ) -> Result<RuntimeVal, EvalError> {
        let callee = self.evaluate(callee)?;

        match callee {
            RuntimeVal::Function(function) => {
                let args = self.evaluate_fn_args_value(args)?;
                check_arity(function.name(), function.arity(), args.len(), paren)?;

                if self.call_depth >= MAX_CALL_DEPTH {
                    return Err(UnsupportedError::RecursionLimit {
                        limit: MAX_CALL_DEPTH,
                        line: paren.line,
                    }
                    .into());
                }

                debug!(function = function.name(), args = args.len(), depth = self.call_depth, "calling function");

                self.call_depth += 1;
                let result = function.call(self, args);
                self.call_depth -= 1;

                result
            }
            RuntimeVal::NativeFunction { name, arity, func } => {
                let args = self.evaluate_fn_args_value(args)?;
                check_arity(name, arity, args.len(), paren)?;

                debug!(function = name, "calling native function");
                Ok(func(args.as_slice()))
            }
            other => Err(RuntimeError::NotCallable {
                found: other.to_string(),
                line: paren.line,
            }
            .into()),
        }
    }

    fn evaluate_fn_args_value(&mut self, args: &[ExpressionKind]) -> Result<Vec<RuntimeVal>, EvalError> {
        let mut values: Vec<RuntimeVal> = vec![];

        for arg in args {
            values.push(self.evaluate(arg)?);
        }

        Ok(values)
    }
}

fn check_arity(callee: &str, expected: usize, found: usize, paren: &Token) -> Result<(), UnsupportedError> {
    if expected != found {
        return Err(UnsupportedError::ArityMismatch {
            callee: callee.to_string(),
            expected,
            found,
            line: paren.line,
        });
    }

    Ok(())
}
