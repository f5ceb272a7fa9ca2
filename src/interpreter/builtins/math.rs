//! Arithmetic and comparison operators.

use crate::value::Value;
use super::super::error::InterpreterError;
use super::with_numbers;
use std::io::Write;
use std::rc::Rc;

macro_rules! binary_arith {
    ($name:ident, $op:tt) => {
        pub fn $name(args: &[Value], _out: &mut dyn Write) -> Result<Value, InterpreterError> {
            with_numbers!(args, stringify!($op), |a: f64, b: f64| Ok(Value::Number(a $op b)))
        }
    };
}

binary_arith!(builtin_sub, -);
binary_arith!(builtin_mul, *);
binary_arith!(builtin_div, /);

/// Adds numbers or concatenates strings.
pub fn builtin_add(args: &[Value], _out: &mut dyn Write) -> Result<Value, InterpreterError> {
    match (&args[0], &args[1]) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(a), Value::String(b)) => Ok(Value::String(Rc::from(format!("{}{}", a, b)))),
        (a, b) => Err(InterpreterError::type_error(format!(
            "+ requires two numbers or two strings, got {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

/// Scalars compare by value; arrays and functions by identity.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
        (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

pub fn builtin_eq(args: &[Value], _out: &mut dyn Write) -> Result<Value, InterpreterError> {
    Ok(Value::Bool(values_equal(&args[0], &args[1])))
}

macro_rules! comparison {
    ($name:ident, $op:tt) => {
        pub fn $name(args: &[Value], _out: &mut dyn Write) -> Result<Value, InterpreterError> {
            match (&args[0], &args[1]) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(a $op b)),
                (Value::String(a), Value::String(b)) => Ok(Value::Bool(a $op b)),
                (a, b) => Err(InterpreterError::type_error(format!(
                    "{} requires two numbers or two strings, got {} and {}",
                    stringify!($op),
                    a.type_name(),
                    b.type_name()
                ))),
            }
        }
    };
}

comparison!(builtin_less, <);
comparison!(builtin_greater, >);
