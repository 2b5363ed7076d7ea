use colored::*;
use thiserror::Error;

use frontend::lexer::Token;
use tools::errors::ReportCodeErr;

use crate::environment::EnvError;
use crate::values::ValueError;

// Faults of the evaluated program
#[derive(Error, Debug, PartialEq)]
pub enum RuntimeError {
    #[error("{} undefined variable: '{name}'.", "Error".red().bold())]
    UndefinedVariable { name: String, line: u64 },

    #[error("{} with operator '{operator}': {message}", "Error".red().bold())]
    TypeError {
        operator: String,
        message: String,
        line: u64,
    },

    #[error("{} can only call functions, found: -{found}-.", "Error".red().bold())]
    NotCallable { found: String, line: u64 },

    #[error("{} with operator '/': cannot divide by zero.", "Error".red().bold())]
    DivisionByZero { line: u64 },
}

impl RuntimeError {
    pub fn line(&self) -> u64 {
        match self {
            RuntimeError::UndefinedVariable { line, .. }
            | RuntimeError::TypeError { line, .. }
            | RuntimeError::NotCallable { line, .. }
            | RuntimeError::DivisionByZero { line } => *line,
        }
    }

    pub fn from_env(err: EnvError, name: &Token) -> Self {
        match err {
            EnvError::UndefinedVariable(name_str) => RuntimeError::UndefinedVariable {
                name: name_str,
                line: name.line,
            },
        }
    }

    pub fn from_value(err: ValueError, operator: &Token) -> Self {
        match err {
            ValueError::DivisionByZero => RuntimeError::DivisionByZero { line: operator.line },
            ValueError::UndefinedOperator(op) => RuntimeError::TypeError {
                operator: operator.value.clone(),
                message: format!("operator unknown: {}", op),
                line: operator.line,
            },
            ValueError::InvalidAddOperands(lhs, rhs) => RuntimeError::TypeError {
                operator: operator.value.clone(),
                message: format!("operands must be two numbers or contain a string, found -{}- and -{}-.", lhs, rhs),
                line: operator.line,
            },
            ValueError::NonNumericOperands(lhs, rhs) => RuntimeError::TypeError {
                operator: operator.value.clone(),
                message: format!("operands must be numbers, found -{}- and -{}-.", lhs, rhs),
                line: operator.line,
            },
            ValueError::NonNumericOperand(found) => RuntimeError::TypeError {
                operator: operator.value.clone(),
                message: format!("operand must be a number, found -{}-.", found),
                line: operator.line,
            },
        }
    }
}

// Valid programs using behavior the interpreter doesn't provide
#[derive(Error, Debug, PartialEq)]
pub enum UnsupportedError {
    #[error("{} 'for' loops are not supported by the interpreter.", "Unsupported".yellow().bold())]
    ForLoop { line: u64 },

    #[error("{} function '{callee}' expects {expected} arguments but {found} were given.", "Unsupported".yellow().bold())]
    ArityMismatch {
        callee: String,
        expected: usize,
        found: usize,
        line: u64,
    },

    #[error("{} call depth went over {limit} nested calls.", "Unsupported".yellow().bold())]
    RecursionLimit { limit: usize, line: u64 },
}

impl UnsupportedError {
    pub fn line(&self) -> u64 {
        match self {
            UnsupportedError::ForLoop { line }
            | UnsupportedError::ArityMismatch { line, .. }
            | UnsupportedError::RecursionLimit { line, .. } => *line,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum EvalError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Unsupported(#[from] UnsupportedError),

    #[error("{} while writing program output: {0}", "Error".red().bold())]
    Output(String),
}

// Implement global trait for final error
impl ReportCodeErr for RuntimeError {}
impl ReportCodeErr for UnsupportedError {}
impl ReportCodeErr for EvalError {}
