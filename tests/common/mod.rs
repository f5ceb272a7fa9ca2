#![allow(dead_code)]

use egg::interpreter::{Interpreter, InterpreterError};
use egg::Value;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// An output sink that keeps everything written to it, shared with the test.
#[derive(Clone, Default)]
pub struct Captured(Rc<RefCell<Vec<u8>>>);

impl Captured {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn capturing_interpreter() -> (Interpreter, Captured) {
    let out = Captured::default();
    let interp = Interpreter::builder().output(out.clone()).build();
    (interp, out)
}

pub fn run_ok(source: &str) -> Value {
    egg::interpreter::run(source).unwrap_or_else(|e| panic!("{} failed: {}", source, e))
}

pub fn run_err(source: &str) -> InterpreterError {
    match egg::interpreter::run(source) {
        Ok(value) => panic!("{} should fail, got {}", source, value),
        Err(e) => e,
    }
}

/// Run a program and return its result along with everything it printed.
pub fn run_printing(source: &str) -> (Result<Value, InterpreterError>, String) {
    let (mut interp, out) = capturing_interpreter();
    let result = interp.run(&[source]);
    (result, out.text())
}

pub fn num(n: f64) -> Value {
    Value::Number(n)
}

pub fn string(s: &str) -> Value {
    Value::from(s)
}
