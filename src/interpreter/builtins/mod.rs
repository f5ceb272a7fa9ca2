//! Native functions bound into the global environment.
//!
//! Functions are organized into categories:
//! - **Math**: arithmetic and comparison operators (`+ - * / == < >`)
//! - **Array**: construction and access (`array`, `length`, `element`)
//! - **IO**: `print`, which writes to the interpreter's output sink
//!
//! Arity is declared per function and checked by the evaluator before the
//! native is invoked, so the functions below can index `args` directly.

mod array;
mod io;
mod math;

pub use array::*;
pub use io::*;
pub use math::*;

use crate::value::{Arity, NativeFn, NativeFunction};

macro_rules! with_array {
    ($value:expr, $name:expr, $body:expr) => {
        match $value {
            Value::Array(items) => $body(items),
            other => Err(InterpreterError::type_error(format!(
                "{} requires an array, got {}",
                $name,
                other.type_name()
            ))),
        }
    };
}

macro_rules! with_numbers {
    ($args:expr, $name:expr, $body:expr) => {
        match (&$args[0], &$args[1]) {
            (Value::Number(a), Value::Number(b)) => $body(*a, *b),
            (a, b) => Err(InterpreterError::type_error(format!(
                "{} requires two numbers, got {} and {}",
                $name,
                a.type_name(),
                b.type_name()
            ))),
        }
    };
}

pub(crate) use with_array;
pub(crate) use with_numbers;

const fn native(name: &'static str, arity: Arity, call: NativeFn) -> NativeFunction {
    NativeFunction { name, arity, call }
}

/// Every builtin, in the order they are bound.
pub fn standard() -> Vec<NativeFunction> {
    vec![
        native("+", Arity::Exact(2), builtin_add),
        native("-", Arity::Exact(2), builtin_sub),
        native("*", Arity::Exact(2), builtin_mul),
        native("/", Arity::Exact(2), builtin_div),
        native("==", Arity::Exact(2), builtin_eq),
        native("<", Arity::Exact(2), builtin_less),
        native(">", Arity::Exact(2), builtin_greater),
        native("print", Arity::Exact(1), builtin_print),
        native("array", Arity::Variadic, builtin_array),
        native("length", Arity::Exact(1), builtin_length),
        native("element", Arity::Exact(2), builtin_element),
    ]
}
