use std::cell::RefCell;
use std::rc::Rc;
use std::result::Result;
use thiserror::Error;

use super::native_functions::native_clock;
use super::values::RuntimeVal;


#[derive(Error, Debug, PartialEq)]
pub enum EnvError {
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),
}

pub fn create_global_env() -> Env {
    let mut env = Env::new(None);

    // Native functions
    env.define(
        "clock",
        RuntimeVal::NativeFunction {
            name: "clock",
            arity: 0,
            func: Rc::new(native_clock),
        },
    );

    env
}

// One link of a scope's binding list. Links are shared between every copy
// of the scope taken before a later definition, so the value cell is the
// only mutable part.
#[derive(Debug)]
struct Binding {
    name: String,
    value: RefCell<RuntimeVal>,
    next: Option<Rc<Binding>>,
}

// Long lists would otherwise be dropped recursively
impl Drop for Binding {
    fn drop(&mut self) {
        let mut next = self.next.take();

        while let Some(link) = next {
            match Rc::try_unwrap(link) {
                Ok(mut binding) => next = binding.next.take(),
                Err(_) => break,
            }
        }
    }
}

// Cloning an environment is a snapshot: definitions made afterwards in one
// copy are invisible to the other, assignments to shared bindings are seen
// by both.
#[derive(Debug, Clone, Default)]
pub struct Env {
    bindings: Option<Rc<Binding>>,
    enclosing: Option<Rc<Env>>,
}

impl Env {
    // Option allow to not have a parent (the global env)
    pub fn new(enclosing: Option<Rc<Env>>) -> Self {
        Self {
            bindings: None,
            enclosing,
        }
    }

    // New empty scope whose parent is a snapshot of this one
    pub fn enclosed(&self) -> Self {
        Env::new(Some(Rc::new(self.clone())))
    }

    pub fn enclosing(&self) -> Option<&Rc<Env>> {
        self.enclosing.as_ref()
    }

    // Always succeeds, redefining a name shadows the older binding
    pub fn define(&mut self, name: &str, value: RuntimeVal) {
        self.bindings = Some(Rc::new(Binding {
            name: name.to_string(),
            value: RefCell::new(value),
            next: self.bindings.take(),
        }));
    }

    pub fn get(&self, name: &str) -> Result<RuntimeVal, EnvError> {
        let binding = self.resolve(name)?;

        Ok(binding.value.borrow().clone())
    }

    // Mutates the nearest binding in place, every holder of that scope sees it
    pub fn assign(&self, name: &str, value: RuntimeVal) -> Result<(), EnvError> {
        let binding = self.resolve(name)?;
        *binding.value.borrow_mut() = value;

        Ok(())
    }

    // Recursivly check the enclosing environment to find the binding
    fn resolve(&self, name: &str) -> Result<&Binding, EnvError> {
        match self.lookup_local(name) {
            Some(binding) => Ok(binding),
            None => match &self.enclosing {
                Some(env) => env.resolve(name),
                None => Err(EnvError::UndefinedVariable(name.to_string())),
            },
        }
    }

    // Most recent definition first
    fn lookup_local(&self, name: &str) -> Option<&Binding> {
        let mut current = self.bindings.as_deref();

        while let Some(binding) = current {
            if binding.name == name {
                return Some(binding);
            }
            current = binding.next.as_deref();
        }

        None
    }
}
