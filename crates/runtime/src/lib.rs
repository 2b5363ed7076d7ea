pub mod environment;
pub mod interpreter;
mod native_functions;
pub mod values;

pub use environment::{create_global_env, Env, EnvError};
pub use interpreter::{EvalError, Interpreter, RuntimeError, UnsupportedError};
pub use values::RuntimeVal;
