use super::errors_parser::ParserError;
use super::Parser;

use super::TokenKind;
use super::StatementKind;

impl Parser {
    // Variable declaration. Possibilities:
    //  var x;
    //  var x = 5;
    // Without value, the variable is initialized to nil
    pub(crate) fn parse_var_declaration(&mut self) -> Result<StatementKind, ParserError> {
        // We eat the 'var' keyword
        self.expect_token(TokenKind::Var)?;

        // We get the identifier
        let name = self
            .expect_token(TokenKind::Identifier)
            .map_err(|_| ParserError::ExpectedVarNameAfterKw(self.at().value.clone()))?;

        let initializer = match self.at().kind {
            TokenKind::Equal => {
                self.eat()?;
                Some(self.parse_expression()?)
            }
            _ => None,
        };

        self.expect_token(TokenKind::Semicolon)
            .map_err(|_| ParserError::MissingVarSemicolon)?;

        Ok(StatementKind::VarDeclaration { name, initializer })
    }
}
