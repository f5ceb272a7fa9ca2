pub mod builtins;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod registry;
pub mod special_forms;
pub mod stack;

pub use environment::Environment;
pub use error::{ErrorKind, InterpreterError};
pub use evaluator::{run, run_with_diagnostics, Interpreter, InterpreterBuilder};
pub use parser::{parse, ParseError, TokenParser};
pub use registry::Registry;
pub use special_forms::SpecialForm;
