use std::rc::Rc;

use super::errors_parser::ParserError;
use super::Parser;

use super::{Token, TokenKind};
use super::{ExpressionKind, StatementKind};
use crate::ast::FnDeclaration;

impl Parser {
    // Function declaration. The syntax is:
    // fun add(x, y) {
    //    var z = x + y;
    //    z * 2;
    // }
    // There is no return keyword, a call evaluates to the value of the last
    // statement executed in the body
    pub(super) fn parse_fn_declaration(&mut self) -> Result<StatementKind, ParserError> {
        // We eat the 'fun' keyword
        self.expect_token(TokenKind::Fun)?;

        // We get the function name
        let name = self
            .expect_token(TokenKind::Identifier)
            .map_err(|_| ParserError::MissingIdentifierAfterFn)?;

        self.expect_token(TokenKind::OpenParen)
            .map_err(|_| ParserError::MissingFnOpenParen)?;

        let params = self.parse_fn_decl_params()?;

        self.expect_token(TokenKind::CloseParen)
            .map_err(|_| ParserError::MissingFnCloseParen)?;

        // We expect function body starting with '{'
        if self.at().kind != TokenKind::OpenBrace {
            return Err(ParserError::MissingFnOpenBrace);
        }

        let body = self.parse_block()?;

        Ok(StatementKind::FnDeclaration(Rc::new(FnDeclaration {
            name,
            params,
            body,
        })))
    }

    // Parse parameters in prototype like:
    //  fun a(x, y, z)
    fn parse_fn_decl_params(&mut self) -> Result<Vec<Token>, ParserError> {
        let mut params = vec![];

        // If we are at an close paren, there is no arguments
        if self.at().kind == TokenKind::CloseParen {
            return Ok(params);
        }

        loop {
            if self.at().kind != TokenKind::Identifier {
                return Err(ParserError::FnDeclArgsNotIdent(self.at().value.clone()));
            }
            params.push(self.eat()?);

            match self.at().kind {
                TokenKind::Comma => {
                    self.eat()?;
                }
                TokenKind::CloseParen => break,
                // Can't do fun a(x y) without comma
                _ => return Err(ParserError::MissingCommaBetweenArgs),
            }
        }

        Ok(params)
    }

    // Calls can be chained: make_adder(1)(2)
    pub(super) fn parse_call_expr(&mut self) -> Result<ExpressionKind, ParserError> {
        let mut expr = self.parse_primary_expr()?;

        while self.at().kind == TokenKind::OpenParen {
            self.eat()?;
            let args = self.parse_fn_call_args()?;

            let paren = self
                .expect_token(TokenKind::CloseParen)
                .map_err(|_| ParserError::MissingFnCloseParen)?;

            expr = ExpressionKind::Call {
                callee: Box::new(expr),
                paren,
                args,
            };
        }

        Ok(expr)
    }

    fn parse_fn_call_args(&mut self) -> Result<Vec<ExpressionKind>, ParserError> {
        // If we are at an close paren, there is no arguments
        if self.at().kind == TokenKind::CloseParen {
            return Ok(Vec::new());
        }

        let mut args = vec![self.parse_expression()?];

        while self.at().kind == TokenKind::Comma {
            // We eat the comma
            self.eat()?;
            args.push(self.parse_expression()?);
        }

        Ok(args)
    }
}
