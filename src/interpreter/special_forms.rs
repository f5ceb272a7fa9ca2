//! Control constructs that receive their arguments unevaluated.
//!
//! A special form is looked up by the operator's name *before* normal
//! application, so these names always mean the construct when called, even if
//! a program binds a variable with the same name.

use crate::ast::Expr;
use crate::diagnostic::Span;
use crate::value::{Closure, Function, Value};
use super::environment::Environment;
use super::error::InterpreterError;
use super::evaluator::Interpreter;
use std::rc::Rc;

/// Handler for a special form: the interpreter, the raw argument nodes, the
/// environment of the call site, and the span of the whole application.
pub type SpecialForm =
    fn(&mut Interpreter, &[Rc<Expr>], &Environment, Span) -> Result<Value, InterpreterError>;

/// `if(cond, then, else)`. Anything except `false` takes the `then` branch.
pub fn form_if(
    interp: &mut Interpreter,
    args: &[Rc<Expr>],
    env: &Environment,
    span: Span,
) -> Result<Value, InterpreterError> {
    let [cond, then_branch, else_branch] = args else {
        return Err(InterpreterError::syntax_at("Bad number of args to if", span));
    };
    if interp.evaluate(cond, env)?.is_truthy() {
        interp.evaluate(then_branch, env)
    } else {
        interp.evaluate(else_branch, env)
    }
}

/// `while(cond, body)`. There is no unit value, so the loop yields `false`.
pub fn form_while(
    interp: &mut Interpreter,
    args: &[Rc<Expr>],
    env: &Environment,
    span: Span,
) -> Result<Value, InterpreterError> {
    let [cond, body] = args else {
        return Err(InterpreterError::syntax_at("Bad number of args to while", span));
    };
    while interp.evaluate(cond, env)?.is_truthy() {
        interp.evaluate(body, env)?;
    }
    Ok(Value::Bool(false))
}

pub fn form_do(
    interp: &mut Interpreter,
    args: &[Rc<Expr>],
    env: &Environment,
    _span: Span,
) -> Result<Value, InterpreterError> {
    let mut value = Value::Bool(false);
    for arg in args {
        value = interp.evaluate(arg, env)?;
    }
    Ok(value)
}

/// `define(name, value)` binds in the current frame only.
pub fn form_define(
    interp: &mut Interpreter,
    args: &[Rc<Expr>],
    env: &Environment,
    span: Span,
) -> Result<Value, InterpreterError> {
    let [target, value_expr] = args else {
        return Err(InterpreterError::syntax_at("Bad use of define", span));
    };
    let Some(name) = target.as_word() else {
        return Err(InterpreterError::syntax_at("Bad use of define", target.span));
    };
    let value = interp.evaluate(value_expr, env)?;
    env.define(name, value.clone());
    Ok(value)
}

/// `fun(param..., body)` closes over the environment it is evaluated in.
pub fn form_fun(
    _interp: &mut Interpreter,
    args: &[Rc<Expr>],
    env: &Environment,
    span: Span,
) -> Result<Value, InterpreterError> {
    let Some((body, params)) = args.split_last() else {
        return Err(InterpreterError::syntax_at("Functions need a body", span));
    };
    let params = params
        .iter()
        .map(|param| {
            param
                .as_word()
                .map(Rc::from)
                .ok_or_else(|| InterpreterError::syntax_at("Arg names must be words", param.span))
        })
        .collect::<Result<Vec<Rc<str>>, _>>()?;

    Ok(Value::Function(Rc::new(Function::Closure(Closure {
        params,
        body: Rc::clone(body),
        env: env.clone(),
        span,
    }))))
}

/// Every special form, by name.
pub fn standard() -> Vec<(&'static str, SpecialForm)> {
    vec![
        ("if", form_if as SpecialForm),
        ("while", form_while as SpecialForm),
        ("do", form_do as SpecialForm),
        ("define", form_define as SpecialForm),
        ("fun", form_fun as SpecialForm),
    ]
}
