use std::cell::{Ref, RefCell};
use std::fmt;
use std::io::Write;
use std::mem;
use std::rc::Rc;

use crate::ast::Expr;
use crate::diagnostic::Span;
use crate::interpreter::environment::Environment;
use crate::interpreter::error::InterpreterError;
use crate::interpreter::stack::ensure_sufficient_stack;

#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    String(Rc<str>),
    Bool(bool),
    Array(Rc<RefCell<Vec<Value>>>),
    Function(Rc<Function>),
}

/// Structural equality for host code and tests: arrays compare by contents.
/// The language's own `==` compares arrays by identity instead, see
/// `builtins::values_equal`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(left), Value::Number(right)) => left == right,
            (Value::String(left), Value::String(right)) => left == right,
            (Value::Bool(left), Value::Bool(right)) => left == right,
            (Value::Array(left), Value::Array(right)) => {
                Rc::ptr_eq(left, right) || ensure_sufficient_stack(|| left == right)
            }
            (Value::Function(left), Value::Function(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }
}

// Nested arrays are freed from a worklist so dropping a deep one does not
// recurse once per level.
impl Drop for Value {
    fn drop(&mut self) {
        let Value::Array(items) = self else {
            return;
        };
        let Some(cell) = Rc::get_mut(items) else {
            return;
        };
        let mut pending = mem::take(cell.get_mut());
        while let Some(mut value) = pending.pop() {
            if let Value::Array(items) = &mut value {
                if let Some(cell) = Rc::get_mut(items) {
                    pending.append(cell.get_mut());
                }
            }
        }
    }
}

impl Value {
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn as_array(&self) -> Option<Ref<'_, Vec<Value>>> {
        if let Value::Array(items) = self {
            Some(items.borrow())
        } else {
            None
        }
    }

    pub fn as_function(&self) -> Option<&Rc<Function>> {
        if let Value::Function(func) = self {
            Some(func)
        } else {
            None
        }
    }

    /// Only the boolean `false` is falsy; `0` and `""` count as true.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Array(_) => "array",
            Value::Function(_) => "function",
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Rc::from(s))
    }
}

/// How many arguments a native function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Variadic,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => n == count,
            Arity::Variadic => true,
        }
    }
}

/// Signature of a builtin. The writer is the interpreter's output sink.
pub type NativeFn = fn(&[Value], &mut dyn Write) -> Result<Value, InterpreterError>;

#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: Arity,
    pub call: NativeFn,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// A user function created by `fun`.
#[derive(Clone)]
pub struct Closure {
    pub params: Vec<Rc<str>>,
    pub body: Rc<Expr>,
    /// The frame that was current when `fun` ran. Shared, never copied.
    pub env: Environment,
    /// Where the `fun(...)` expression was written.
    pub span: Span,
}

// The captured environment may hold this very closure, so it is left out.
impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum Function {
    Native(NativeFunction),
    Closure(Closure),
}
