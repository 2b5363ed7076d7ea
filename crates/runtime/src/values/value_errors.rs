use colored::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    // Operations
    #[error("{} while computing value. Operator unknown: {0}", "Error".red().bold())]
    UndefinedOperator(String),

    #[error("{} while computing value. Operands must be two numbers or contain a string, found -{0}- and -{1}-.", "Error".red().bold())]
    InvalidAddOperands(String, String),

    #[error("{} while computing value. Operands must be numbers, found -{0}- and -{1}-.", "Error".red().bold())]
    NonNumericOperands(String, String),

    #[error("{} while computing value. Operand must be a number, found -{0}-.", "Error".red().bold())]
    NonNumericOperand(String),

    #[error("{} while computing value. Cannot divide by zero.", "Error".red().bold())]
    DivisionByZero,
}
