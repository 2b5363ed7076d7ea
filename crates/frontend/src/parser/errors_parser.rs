use colored::*;
use thiserror::*;

use super::TokenKind;
use tools::errors::ReportCodeErr;

#[derive(Error, Debug, PartialEq)]
pub enum ParserError {
    // Token
    #[error("{} expected token: -{0:?}-, token found: -{1}-", "Error".red().bold())]
    FoundWrongToken(TokenKind, String),

    #[error("Tryed to use non existant token")]
    EmptyTokenBufferUsed,

    #[error("{} expected expression, found: -{0}-", "Error".red().bold())]
    UnrecognizedToken(String),

    #[error("{} while parsing number literal: -{0}-", "Error".red().bold())]
    InvalidNumber(String),

    // Variables
    #[error("{} expected variable name after 'var' keyword, found: -{0}-.", "Error".red().bold())]
    ExpectedVarNameAfterKw(String),

    #[error("{} while parsing variable declaration, expected ';' after declaration.", "Error".red().bold())]
    MissingVarSemicolon,

    #[error("{} invalid assignment target: only variables can be assigned, found: -{0}-", "Error".red().bold())]
    InvalidAssignTarget(String),

    // Functions declaration
    #[error("{} while parsing function declaration: expected identifier after 'fun' keyword.", "Error".red().bold())]
    MissingIdentifierAfterFn,

    #[error("{} while parsing function. Expected '(' after function name.", "Error".red().bold())]
    MissingFnOpenParen,

    #[error("{} while parsing function. Expected ')' after arguments list.", "Error".red().bold())]
    MissingFnCloseParen,

    #[error("{} while parsing function declaration: parameters must be identifiers, found: -{0}-", "Error".red().bold())]
    FnDeclArgsNotIdent(String),

    #[error("{} while parsing function arguments declaration: expected ',' between two arguments.", "Error".red().bold())]
    MissingCommaBetweenArgs,

    #[error("{} while parsing function declaration: expected '{{' to start function body", "Error".red().bold())]
    MissingFnOpenBrace,

    // Blocks and statements
    #[error("{} while parsing block: expected '}}' to end the block", "Error".red().bold())]
    MissingCloseBrace,

    #[error("{} expected ';' after {0}.", "Error".red().bold())]
    MissingSemicolon(String),

    #[error("{} while parsing '{0}': expected '(' after keyword.", "Error".red().bold())]
    MissingOpenParen(String),

    #[error("{} while parsing '{0}': expected ')' after condition.", "Error".red().bold())]
    MissingCloseParen(String),

    #[error("{} while parsing conditional expression: expected ':' after then branch.", "Error".red().bold())]
    MissingConditionalColon,
}

// Implement global trait for final error
impl ReportCodeErr for ParserError {}
