//! Array construction and access.

use crate::value::Value;
use super::super::error::InterpreterError;
use super::with_array;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

pub fn builtin_array(args: &[Value], _out: &mut dyn Write) -> Result<Value, InterpreterError> {
    Ok(Value::array(args.to_vec()))
}

pub fn builtin_length(args: &[Value], _out: &mut dyn Write) -> Result<Value, InterpreterError> {
    with_array!(&args[0], "length", |items: &Rc<RefCell<Vec<Value>>>| {
        Ok(Value::Number(items.borrow().len() as f64))
    })
}

/// Zero-based access. Anything but a whole number below the length is a range error.
pub fn builtin_element(args: &[Value], _out: &mut dyn Write) -> Result<Value, InterpreterError> {
    with_array!(&args[0], "element", |items: &Rc<RefCell<Vec<Value>>>| {
        let index = match &args[1] {
            Value::Number(n) => *n,
            other => {
                return Err(InterpreterError::type_error(format!(
                    "element index must be a number, got {}",
                    other.type_name()
                )))
            }
        };
        let items = items.borrow();
        if index < 0.0 || index.fract() != 0.0 || index >= items.len() as f64 {
            return Err(InterpreterError::index_out_of_range(index, items.len()));
        }
        Ok(items[index as usize].clone())
    })
}
