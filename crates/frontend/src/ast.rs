use std::rc::Rc;

use crate::lexer::Token;

#[derive(Debug, PartialEq, Clone)]
pub struct ASTNode {
    pub node: StatementKind,
    pub line: u64,
}

impl ASTNode {
    pub fn new(node: StatementKind, line: u64) -> Self {
        Self { node, line }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum StatementKind {
    Expression {
        expression: ExpressionKind,
    },
    Print {
        expression: ExpressionKind,
    },
    VarDeclaration {
        name: Token,
        // None for declaration without value: var x;
        initializer: Option<ExpressionKind>,
    },
    Block {
        statements: Vec<StatementKind>,
    },
    If {
        condition: ExpressionKind,
        then_branch: Box<StatementKind>,
        else_branch: Option<Box<StatementKind>>,
    },
    While {
        condition: ExpressionKind,
        body: Box<StatementKind>,
    },
    // Parsed but never executed by the runtime
    For {
        keyword: Token,
        initializer: Option<Box<StatementKind>>,
        condition: Option<ExpressionKind>,
        increment: Option<ExpressionKind>,
        body: Box<StatementKind>,
    },
    // Rc because function values keep their declaration alive after the
    // statement has been executed
    FnDeclaration(Rc<FnDeclaration>),
}

#[derive(Debug, PartialEq)]
pub struct FnDeclaration {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<StatementKind>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum LiteralValue {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
}

#[derive(Debug, PartialEq, Clone)]
pub enum ExpressionKind {
    Literal {
        value: LiteralValue,
    },
    Grouping {
        expression: Box<ExpressionKind>,
    },
    Variable {
        name: Token,
    },
    // Assignment is an expression: x = y = 3
    Assign {
        name: Token,
        value: Box<ExpressionKind>,
    },
    // 'and' / 'or', kept apart from binary ops because of short-circuit
    Logical {
        left: Box<ExpressionKind>,
        operator: Token,
        right: Box<ExpressionKind>,
    },
    // cond ? a : b
    Conditional {
        condition: Box<ExpressionKind>,
        then_branch: Box<ExpressionKind>,
        else_branch: Box<ExpressionKind>,
    },
    Unary {
        operator: Token,
        right: Box<ExpressionKind>,
    },
    Binary {
        left: Box<ExpressionKind>,
        operator: Token,
        right: Box<ExpressionKind>,
    },
    // Paren is the closing one, used to locate errors
    Call {
        callee: Box<ExpressionKind>,
        paren: Token,
        args: Vec<ExpressionKind>,
    },
}

impl ExpressionKind {
    pub fn number(value: f64) -> Self {
        ExpressionKind::Literal { value: LiteralValue::Number(value) }
    }

    pub fn string(value: &str) -> Self {
        ExpressionKind::Literal { value: LiteralValue::Str(value.to_string()) }
    }

    pub fn variable(name: Token) -> Self {
        ExpressionKind::Variable { name }
    }

    pub fn binary(left: ExpressionKind, operator: Token, right: ExpressionKind) -> Self {
        ExpressionKind::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }
}

impl From<ExpressionKind> for StatementKind {
    fn from(expression: ExpressionKind) -> Self {
        StatementKind::Expression { expression }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    #[test]
    fn expression_into_statement() {
        let expr = ExpressionKind::binary(
            ExpressionKind::number(1.),
            Token::new(TokenKind::Plus, "+".into(), 0),
            ExpressionKind::string("a"),
        );

        assert_eq!(
            StatementKind::from(expr.clone()),
            StatementKind::Expression { expression: expr }
        );
    }
}
