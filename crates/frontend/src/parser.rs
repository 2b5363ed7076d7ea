use std::collections::VecDeque;

mod control_parser;
mod errors_parser;
mod fn_parser;
mod var_parser;

pub use crate::ast::{ASTNode, ExpressionKind, LiteralValue, StatementKind};
pub use crate::lexer::{Token, TokenKind};
pub use self::errors_parser::ParserError;

use tools::errors::{CodeErr, ReportCodeErr};


pub struct Parser {
    tokens: VecDeque<Token>,
    // Returned by 'at' once the buffer is empty
    eof: Token,
    pub ast_nodes: Vec<ASTNode>,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            tokens: VecDeque::new(),
            eof: Token::new_eof(0),
            ast_nodes: Vec::new(),
        }
    }
}

impl Parser {
    pub fn build_ast(&mut self, tokens: VecDeque<Token>) -> Result<(), CodeErr> {
        self.ast_nodes.clear();
        self.eof = Token::new_eof(tokens.back().map_or(0, |t| t.line));
        self.tokens = tokens;

        while !self.is_eof() {
            let line = self.at().line;

            let stmt = self
                .parse_statement()
                .map_err(|e| e.to_glob_err(self.at().line))?;

            self.ast_nodes.push(ASTNode::new(stmt, line));
        }

        Ok(())
    }

    // Entry point of parsing
    fn parse_statement(&mut self) -> Result<StatementKind, ParserError> {
        match self.at().kind {
            TokenKind::Var => self.parse_var_declaration(),
            TokenKind::Fun => self.parse_fn_declaration(),
            TokenKind::Print => self.parse_print_statement(),
            TokenKind::OpenBrace => Ok(StatementKind::Block {
                statements: self.parse_block()?,
            }),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_expression_statement(&mut self) -> Result<StatementKind, ParserError> {
        let expression = self.parse_expression()?;

        self.expect_token(TokenKind::Semicolon)
            .map_err(|_| ParserError::MissingSemicolon("expression".into()))?;

        Ok(StatementKind::Expression { expression })
    }

    pub(crate) fn parse_expression(&mut self) -> Result<ExpressionKind, ParserError> {
        self.parse_assignment_expr()
    }

    fn parse_assignment_expr(&mut self) -> Result<ExpressionKind, ParserError> {
        // We get the identifier
        let left = self.parse_conditional_expr()?;

        if self.at().kind != TokenKind::Equal {
            return Ok(left);
        }

        let equals = self.eat()?;
        // Allows syntax like x = y = z
        let value = self.parse_assignment_expr()?;

        match left {
            ExpressionKind::Variable { name } => Ok(ExpressionKind::Assign {
                name,
                value: Box::new(value),
            }),
            _ => Err(ParserError::InvalidAssignTarget(equals.value)),
        }
    }

    // cond ? a : b, right associative
    fn parse_conditional_expr(&mut self) -> Result<ExpressionKind, ParserError> {
        let condition = self.parse_or_expr()?;

        if self.at().kind != TokenKind::Question {
            return Ok(condition);
        }

        self.eat()?;
        let then_branch = self.parse_expression()?;

        self.expect_token(TokenKind::Colon)
            .map_err(|_| ParserError::MissingConditionalColon)?;

        let else_branch = self.parse_conditional_expr()?;

        Ok(ExpressionKind::Conditional {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    fn parse_or_expr(&mut self) -> Result<ExpressionKind, ParserError> {
        let mut left = self.parse_and_expr()?;

        while self.at().kind == TokenKind::Or {
            let operator = self.eat()?;
            let right = self.parse_and_expr()?;

            left = ExpressionKind::Logical {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_and_expr(&mut self) -> Result<ExpressionKind, ParserError> {
        let mut left = self.parse_equality_expr()?;

        while self.at().kind == TokenKind::And {
            let operator = self.eat()?;
            let right = self.parse_equality_expr()?;

            left = ExpressionKind::Logical {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_equality_expr(&mut self) -> Result<ExpressionKind, ParserError> {
        self.parse_binary_level(
            &[TokenKind::EqualEqual, TokenKind::BangEqual],
            Self::parse_comparison_expr,
        )
    }

    fn parse_comparison_expr(&mut self) -> Result<ExpressionKind, ParserError> {
        self.parse_binary_level(
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::parse_additive_expr,
        )
    }

    fn parse_additive_expr(&mut self) -> Result<ExpressionKind, ParserError> {
        self.parse_binary_level(
            &[TokenKind::Plus, TokenKind::Minus],
            Self::parse_multiplicative_expr,
        )
    }

    fn parse_multiplicative_expr(&mut self) -> Result<ExpressionKind, ParserError> {
        self.parse_binary_level(
            &[TokenKind::Star, TokenKind::Slash],
            Self::parse_unary_expr,
        )
    }

    // Left associative chain of binary operators of the same precedence
    fn parse_binary_level(
        &mut self,
        operators: &[TokenKind],
        next_level: fn(&mut Self) -> Result<ExpressionKind, ParserError>,
    ) -> Result<ExpressionKind, ParserError> {
        let mut left = next_level(self)?;

        while operators.contains(&self.at().kind) {
            let operator = self.eat()?;
            let right = next_level(self)?;

            left = ExpressionKind::binary(left, operator, right);
        }

        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> Result<ExpressionKind, ParserError> {
        match self.at().kind {
            TokenKind::Bang | TokenKind::Minus => {
                let operator = self.eat()?;
                let right = self.parse_unary_expr()?;

                Ok(ExpressionKind::Unary {
                    operator,
                    right: Box::new(right),
                })
            }
            _ => self.parse_call_expr(),
        }
    }

    fn parse_primary_expr(&mut self) -> Result<ExpressionKind, ParserError> {
        match self.at().kind {
            TokenKind::Number => {
                let number = self.eat()?;
                let value = number
                    .value
                    .parse::<f64>()
                    .map_err(|_| ParserError::InvalidNumber(number.value.clone()))?;

                Ok(ExpressionKind::number(value))
            }
            TokenKind::Str => Ok(ExpressionKind::Literal {
                value: LiteralValue::Str(self.eat()?.value),
            }),
            TokenKind::True | TokenKind::False => Ok(ExpressionKind::Literal {
                value: LiteralValue::Bool(self.eat()?.kind == TokenKind::True),
            }),
            TokenKind::Nil => {
                self.eat()?;
                Ok(ExpressionKind::Literal { value: LiteralValue::Nil })
            }
            TokenKind::Identifier => Ok(ExpressionKind::variable(self.eat()?)),
            // Manages the beginning of paranthesis var a = 5 + (...
            TokenKind::OpenParen => {
                self.eat()?;
                let expression = self.parse_expression()?;
                self.expect_token(TokenKind::CloseParen)?;

                Ok(ExpressionKind::Grouping {
                    expression: Box::new(expression),
                })
            }
            _ => Err(ParserError::UnrecognizedToken(self.at().value.clone())),
        }
    }

    fn at(&self) -> &Token {
        self.tokens.front().unwrap_or(&self.eof)
    }

    fn eat(&mut self) -> Result<Token, ParserError> {
        match self.tokens.pop_front() {
            Some(tk) => Ok(tk),
            None => Err(ParserError::EmptyTokenBufferUsed),
        }
    }

    fn expect_token(&mut self, token_kind: TokenKind) -> Result<Token, ParserError> {
        if self.at().kind != token_kind {
            return Err(ParserError::FoundWrongToken(token_kind, self.at().value.clone()));
        }

        self.eat()
    }

    // Is end of file
    fn is_eof(&self) -> bool {
        self.at().kind == TokenKind::EOF
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use pretty_assertions::assert_eq;

    pub(super) fn parse(code: &str) -> Result<Vec<ASTNode>, CodeErr> {
        let mut lexer: Lexer = Default::default();
        let mut parser: Parser = Default::default();

        lexer.tokenize(code.to_string())?;
        parser.build_ast(lexer.tokens)?;

        Ok(parser.ast_nodes)
    }

    pub(super) fn parse_one(code: &str) -> StatementKind {
        let mut nodes = parse(code).expect("Should parse");
        assert_eq!(nodes.len(), 1);

        nodes.remove(0).node
    }

    fn op(kind: TokenKind, value: &str) -> Token {
        Token::new(kind, value.into(), 0)
    }

    #[test]
    fn parse_nested_binop() {
        assert_eq!(
            parse_one("1 - 2 + 3;"),
            StatementKind::from(ExpressionKind::binary(
                ExpressionKind::binary(
                    ExpressionKind::number(1.),
                    op(TokenKind::Minus, "-"),
                    ExpressionKind::number(2.),
                ),
                op(TokenKind::Plus, "+"),
                ExpressionKind::number(3.),
            ))
        );
    }

    #[test]
    fn parse_multiplication_precedence() {
        assert_eq!(
            parse_one("1 + 2 * 3;"),
            StatementKind::from(ExpressionKind::binary(
                ExpressionKind::number(1.),
                op(TokenKind::Plus, "+"),
                ExpressionKind::binary(
                    ExpressionKind::number(2.),
                    op(TokenKind::Star, "*"),
                    ExpressionKind::number(3.),
                ),
            ))
        );
    }

    #[test]
    fn parse_comparison_below_equality() {
        assert_eq!(
            parse_one("1 < 2 == true;"),
            StatementKind::from(ExpressionKind::binary(
                ExpressionKind::binary(
                    ExpressionKind::number(1.),
                    op(TokenKind::Less, "<"),
                    ExpressionKind::number(2.),
                ),
                op(TokenKind::EqualEqual, "=="),
                ExpressionKind::Literal { value: LiteralValue::Bool(true) },
            ))
        );
    }

    #[test]
    fn parse_chained_assignment() {
        let x = Token::new_identifier("x".into(), 0);
        let y = Token::new_identifier("y".into(), 0);

        assert_eq!(
            parse_one("x = y = 3;"),
            StatementKind::from(ExpressionKind::Assign {
                name: x,
                value: Box::new(ExpressionKind::Assign {
                    name: y,
                    value: Box::new(ExpressionKind::number(3.)),
                }),
            })
        );
    }

    #[test]
    fn parse_invalid_assign_target() {
        assert!(parse("1 + 2 = 3;").is_err());
        assert!(parse("f() = 3;").is_err());
    }

    #[test]
    fn parse_logical_and_conditional() {
        let a = Token::new_identifier("a".into(), 0);
        let b = Token::new_identifier("b".into(), 0);

        assert_eq!(
            parse_one("a or b and nil ? \"yes\" : \"no\";"),
            StatementKind::from(ExpressionKind::Conditional {
                condition: Box::new(ExpressionKind::Logical {
                    left: Box::new(ExpressionKind::variable(a)),
                    operator: op(TokenKind::Or, "or"),
                    right: Box::new(ExpressionKind::Logical {
                        left: Box::new(ExpressionKind::variable(b)),
                        operator: op(TokenKind::And, "and"),
                        right: Box::new(ExpressionKind::Literal { value: LiteralValue::Nil }),
                    }),
                }),
                then_branch: Box::new(ExpressionKind::string("yes")),
                else_branch: Box::new(ExpressionKind::string("no")),
            })
        );
    }

    #[test]
    fn parse_unary_and_grouping() {
        assert_eq!(
            parse_one("-(1);"),
            StatementKind::from(ExpressionKind::Unary {
                operator: op(TokenKind::Minus, "-"),
                right: Box::new(ExpressionKind::Grouping {
                    expression: Box::new(ExpressionKind::number(1.)),
                }),
            })
        );
    }

    #[test]
    fn missing_semicolon() {
        assert!(parse("1 + 2").is_err());
        assert!(parse("print 3").is_err());
    }

    #[test]
    fn nodes_keep_their_line() {
        let nodes = parse("var a = 1;\n\nprint a;").unwrap();

        assert_eq!(nodes.iter().map(|n| n.line).collect::<Vec<_>>(), vec![0, 2]);
    }
}
