//! Egg: a tiny expression language where everything is an application.
//!
//! ```
//! let value = egg::interpreter::run("do(define(x, 6), *(x, 7))").unwrap();
//! assert_eq!(value, egg::Value::Number(42.0));
//! ```

pub mod ast;
pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod format;
pub mod interpreter;
pub mod lexer;
pub mod token;
pub mod value;

pub use ast::{Expr, ExprKind};
pub use interpreter::{parse, Interpreter, InterpreterError};
pub use token::Token;
pub use value::Value;
