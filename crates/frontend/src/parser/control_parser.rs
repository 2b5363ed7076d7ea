use super::errors_parser::ParserError;
use super::Parser;

use super::TokenKind;
use super::{ExpressionKind, StatementKind};

impl Parser {
    // print <expr>;
    pub(super) fn parse_print_statement(&mut self) -> Result<StatementKind, ParserError> {
        self.expect_token(TokenKind::Print)?;
        let expression = self.parse_expression()?;

        self.expect_token(TokenKind::Semicolon)
            .map_err(|_| ParserError::MissingSemicolon("print value".into()))?;

        Ok(StatementKind::Print { expression })
    }

    // Statements between braces, shared by blocks and function bodies
    pub(super) fn parse_block(&mut self) -> Result<Vec<StatementKind>, ParserError> {
        self.expect_token(TokenKind::OpenBrace)?;

        let mut statements = vec![];
        while self.at().kind != TokenKind::CloseBrace && !self.is_eof() {
            statements.push(self.parse_statement()?);
        }

        self.expect_token(TokenKind::CloseBrace)
            .map_err(|_| ParserError::MissingCloseBrace)?;

        Ok(statements)
    }

    // if (cond) stmt else stmt
    // The else is attached to the nearest if
    pub(super) fn parse_if_statement(&mut self) -> Result<StatementKind, ParserError> {
        self.expect_token(TokenKind::If)?;
        let condition = self.parse_paren_condition("if")?;

        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = match self.at().kind {
            TokenKind::Else => {
                self.eat()?;
                Some(Box::new(self.parse_statement()?))
            }
            _ => None,
        };

        Ok(StatementKind::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    pub(super) fn parse_while_statement(&mut self) -> Result<StatementKind, ParserError> {
        self.expect_token(TokenKind::While)?;
        let condition = self.parse_paren_condition("while")?;
        let body = Box::new(self.parse_statement()?);

        Ok(StatementKind::While { condition, body })
    }

    // for (init; cond; incr) stmt
    // Each of the three clauses can be omitted
    pub(super) fn parse_for_statement(&mut self) -> Result<StatementKind, ParserError> {
        let keyword = self.expect_token(TokenKind::For)?;

        self.expect_token(TokenKind::OpenParen)
            .map_err(|_| ParserError::MissingOpenParen("for".into()))?;

        let initializer = match self.at().kind {
            TokenKind::Semicolon => {
                self.eat()?;
                None
            }
            TokenKind::Var => Some(Box::new(self.parse_var_declaration()?)),
            _ => Some(Box::new(self.parse_expression_statement()?)),
        };

        let condition = self.parse_optional_clause(TokenKind::Semicolon)?;
        self.expect_token(TokenKind::Semicolon)
            .map_err(|_| ParserError::MissingSemicolon("loop condition".into()))?;

        let increment = self.parse_optional_clause(TokenKind::CloseParen)?;
        self.expect_token(TokenKind::CloseParen)
            .map_err(|_| ParserError::MissingCloseParen("for".into()))?;

        let body = Box::new(self.parse_statement()?);

        Ok(StatementKind::For {
            keyword,
            initializer,
            condition,
            increment,
            body,
        })
    }

    fn parse_paren_condition(&mut self, keyword: &str) -> Result<ExpressionKind, ParserError> {
        self.expect_token(TokenKind::OpenParen)
            .map_err(|_| ParserError::MissingOpenParen(keyword.into()))?;

        let condition = self.parse_expression()?;

        self.expect_token(TokenKind::CloseParen)
            .map_err(|_| ParserError::MissingCloseParen(keyword.into()))?;

        Ok(condition)
    }

    fn parse_optional_clause(
        &mut self,
        terminator: TokenKind,
    ) -> Result<Option<ExpressionKind>, ParserError> {
        if self.at().kind == terminator {
            Ok(None)
        } else {
            Ok(Some(self.parse_expression()?))
        }
    }
}
