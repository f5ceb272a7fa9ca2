use crate::ast::{Expr, ExprKind};
use crate::diagnostic::{Diagnostic, Span};
use crate::value::{Function, Value};
use super::environment::Environment;
use super::error::InterpreterError;
use super::parser::parse;
use super::registry::Registry;
use super::stack::{ensure_sufficient_stack, CallDepth, DEFAULT_MAX_DEPTH};
use std::io::{self, Write};
use std::rc::Rc;

/// A tree-walking interpreter.
///
/// Each interpreter owns its global environment, built from its registry, and
/// the sink that `print` writes to. Only one evaluation runs at a time.
pub struct Interpreter {
    registry: Rc<Registry>,
    global: Environment,
    output: Box<dyn Write>,
    calls: CallDepth,
}

pub struct InterpreterBuilder {
    registry: Option<Rc<Registry>>,
    output: Option<Box<dyn Write>>,
    max_depth: usize,
}

impl InterpreterBuilder {
    fn new() -> Self {
        Self {
            registry: None,
            output: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn registry(mut self, registry: Rc<Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Where `print` writes. Defaults to discarding output.
    pub fn output(mut self, output: impl Write + 'static) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> Interpreter {
        let registry = self.registry.unwrap_or_else(|| Rc::new(Registry::standard()));
        let global = registry.global_environment();
        Interpreter {
            registry,
            global,
            output: self.output.unwrap_or_else(|| Box::new(io::sink())),
            calls: CallDepth::new(self.max_depth),
        }
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn global(&self) -> &Environment {
        &self.global
    }

    /// Join the fragments with newlines and run them as one program in a
    /// fresh frame below the global one, so top-level definitions do not
    /// leak into the global environment.
    pub fn run(&mut self, fragments: &[&str]) -> Result<Value, InterpreterError> {
        let program = fragments.join("\n");
        let scope = Environment::with_parent(&self.global);
        self.run_in(&program, &scope)
    }

    /// Parse `source` and evaluate it in `env`.
    pub fn run_in(&mut self, source: &str, env: &Environment) -> Result<Value, InterpreterError> {
        let program = parse(source)?;
        let result = self.evaluate(&program, env);
        match &result {
            Ok(_) => tracing::debug!("program finished"),
            Err(err) => tracing::debug!(%err, "program failed"),
        }
        result
    }

    pub fn evaluate(&mut self, expr: &Expr, env: &Environment) -> Result<Value, InterpreterError> {
        ensure_sufficient_stack(|| self.evaluate_expr(expr, env))
    }

    fn evaluate_expr(&mut self, expr: &Expr, env: &Environment) -> Result<Value, InterpreterError> {
        match &expr.kind {
            ExprKind::Value(value) => Ok(value.clone()),
            ExprKind::Word(name) => env
                .get(name)
                .ok_or_else(|| InterpreterError::undefined_variable_at(name.as_ref(), expr.span)),
            ExprKind::Apply { operator, args } => {
                if let Some(name) = operator.as_word() {
                    if let Some(form) = self.registry.special_form(name) {
                        tracing::trace!(form = name, args = args.len(), "special form");
                        return form(self, args, env, expr.span);
                    }
                }

                let callee = self.evaluate(operator, env)?;
                let Value::Function(func) = &callee else {
                    return Err(InterpreterError::type_error_at("Applying a non-function", expr.span));
                };
                let values = args
                    .iter()
                    .map(|arg| self.evaluate(arg, env))
                    .collect::<Result<Vec<_>, _>>()?;
                self.call_function(func, &values, expr.span)
            }
        }
    }

    /// Invoke a function value with already evaluated arguments. `span` is the
    /// call site, used for errors raised by the call itself.
    pub fn call_function(
        &mut self,
        func: &Function,
        args: &[Value],
        span: Span,
    ) -> Result<Value, InterpreterError> {
        match func {
            Function::Native(native) => {
                if !native.arity.accepts(args.len()) {
                    return Err(InterpreterError::type_error_at("Wrong number of arguments", span));
                }
                tracing::trace!(name = native.name, "native call");
                (native.call)(args, self.output.as_mut()).map_err(|err| err.or_span(span))
            }
            Function::Closure(closure) => {
                if closure.params.len() != args.len() {
                    return Err(InterpreterError::arity_mismatch_at(
                        closure.params.len(),
                        args.len(),
                        span,
                        closure.span,
                    ));
                }
                self.calls.enter(span)?;
                tracing::trace!(depth = self.calls.depth(), params = closure.params.len(), "closure call");

                let frame = Environment::with_parent(&closure.env);
                for (param, arg) in closure.params.iter().zip(args) {
                    frame.define(Rc::clone(param), arg.clone());
                }
                let result = self.evaluate(&closure.body, &frame);

                self.calls.exit();
                result
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one program on a fresh interpreter whose output is discarded.
pub fn run(source: &str) -> Result<Value, InterpreterError> {
    Interpreter::new().run(&[source])
}

pub fn run_with_diagnostics(source: &str) -> Result<Value, Vec<Diagnostic>> {
    run(source).map_err(|err| vec![err.to_diagnostic()])
}
