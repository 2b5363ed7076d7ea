use std::io::Write;
use std::rc::Rc;

use frontend::ast::FnDeclaration;

use super::RuntimeVal;
use crate::environment::Env;
use crate::interpreter::{EvalError, Interpreter};


// User defined function: its declaration and the scope it was defined in.
// The closure is taken before the function's own name is bound, the name is
// bound again in every call frame instead, so a function never holds itself.
#[derive(Debug)]
pub struct Function {
    declaration: Rc<FnDeclaration>,
    closure: Rc<Env>,
}

impl Function {
    pub fn new(declaration: Rc<FnDeclaration>, closure: Env) -> Self {
        Self {
            declaration,
            closure: Rc::new(closure),
        }
    }

    pub fn name(&self) -> &str {
        &self.declaration.name.value
    }

    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    // Arguments count must have been checked by the caller
    pub fn call<W: Write>(
        self: &Rc<Self>,
        interpreter: &mut Interpreter<W>,
        args: Vec<RuntimeVal>,
    ) -> Result<RuntimeVal, EvalError> {
        let mut env = Env::new(Some(Rc::clone(&self.closure)));

        // Recursive calls, parameters can still shadow it
        env.define(self.name(), RuntimeVal::Function(Rc::clone(self)));

        for (param, arg) in self.declaration.params.iter().zip(args) {
            env.define(&param.value, arg);
        }

        interpreter.execute_block(&self.declaration.body, env)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use frontend::lexer::{Token, TokenKind};

    fn declaration(name: &str, params: &[&str]) -> Rc<FnDeclaration> {
        Rc::new(FnDeclaration {
            name: Token::new(TokenKind::Identifier, name.into(), 0),
            params: params
                .iter()
                .map(|p| Token::new(TokenKind::Identifier, p.to_string(), 0))
                .collect(),
            body: vec![],
        })
    }

    #[test]
    fn name_and_arity() {
        let function = Function::new(declaration("add", &["a", "b"]), Env::default());

        assert_eq!(function.name(), "add");
        assert_eq!(function.arity(), 2);
        assert_eq!(RuntimeVal::Function(Rc::new(function)).to_string(), "<fn add>");
    }

    #[test]
    fn function_equality_is_identity() {
        let first = Rc::new(Function::new(declaration("f", &[]), Env::default()));
        let second = Rc::new(Function::new(declaration("f", &[]), Env::default()));

        assert_eq!(RuntimeVal::Function(first.clone()), RuntimeVal::Function(first.clone()));
        assert_ne!(RuntimeVal::Function(first), RuntimeVal::Function(second));
    }

    #[test]
    fn empty_body_returns_nil() {
        let function = Rc::new(Function::new(declaration("f", &["x"]), Env::default()));
        let mut interpreter = Interpreter::with_output(Vec::new());

        assert_eq!(
            function.call(&mut interpreter, vec![RuntimeVal::Number(1.)]),
            Ok(RuntimeVal::Nil)
        );
    }

    #[test]
    fn call_frame_releases_function() {
        let function = Rc::new(Function::new(declaration("f", &[]), Env::default()));
        let mut interpreter = Interpreter::with_output(Vec::new());

        function.call(&mut interpreter, vec![]).unwrap();

        assert_eq!(Rc::strong_count(&function), 1);
    }
}
