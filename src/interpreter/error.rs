use thiserror::Error;

use crate::diagnostic::{Diagnostic, Label, Span};

/// Broad classification of a failure, mirroring the host language's error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Reference,
    Type,
    Range,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpreterError {
    #[error("SyntaxError: {message}")]
    Syntax { message: String, span: Span },

    #[error("ReferenceError: Undefined variable: {name}")]
    UndefinedVariable { name: String, span: Span },

    #[error("TypeError: {message}")]
    Type { message: String, span: Span },

    /// A closure called with the wrong number of arguments. `definition` is
    /// the `fun(...)` expression that created it.
    #[error("TypeError: Wrong number of arguments")]
    ArityMismatch { expected: usize, found: usize, span: Span, definition: Span },

    #[error("RangeError: Index {index} out of range for array of length {length}")]
    IndexOutOfRange { index: f64, length: usize, span: Span },

    #[error("RangeError: Maximum call depth of {limit} exceeded")]
    RecursionLimit { limit: usize, span: Span },
}

impl InterpreterError {
    // Builtins raise errors without knowing where they were called from;
    // the evaluator fills the span in afterwards with `or_span`.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax { message: message.into(), span: Span::dummy() }
    }

    pub fn undefined_variable(name: impl Into<String>) -> Self {
        Self::UndefinedVariable { name: name.into(), span: Span::dummy() }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::Type { message: message.into(), span: Span::dummy() }
    }

    pub fn index_out_of_range(index: f64, length: usize) -> Self {
        Self::IndexOutOfRange { index, length, span: Span::dummy() }
    }

    pub fn syntax_at(message: impl Into<String>, span: Span) -> Self {
        Self::Syntax { message: message.into(), span }
    }

    pub fn undefined_variable_at(name: impl Into<String>, span: Span) -> Self {
        Self::UndefinedVariable { name: name.into(), span }
    }

    pub fn type_error_at(message: impl Into<String>, span: Span) -> Self {
        Self::Type { message: message.into(), span }
    }

    pub fn arity_mismatch_at(expected: usize, found: usize, span: Span, definition: Span) -> Self {
        Self::ArityMismatch { expected, found, span, definition }
    }

    pub fn recursion_limit_at(limit: usize, span: Span) -> Self {
        Self::RecursionLimit { limit, span }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax { .. } => ErrorKind::Syntax,
            Self::UndefinedVariable { .. } => ErrorKind::Reference,
            Self::Type { .. } | Self::ArityMismatch { .. } => ErrorKind::Type,
            Self::IndexOutOfRange { .. } | Self::RecursionLimit { .. } => ErrorKind::Range,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Syntax { span, .. }
            | Self::UndefinedVariable { span, .. }
            | Self::Type { span, .. }
            | Self::ArityMismatch { span, .. }
            | Self::IndexOutOfRange { span, .. }
            | Self::RecursionLimit { span, .. } => *span,
        }
    }

    /// Attach `at` unless the error already points somewhere.
    pub fn or_span(mut self, at: Span) -> Self {
        let span = match &mut self {
            Self::Syntax { span, .. }
            | Self::UndefinedVariable { span, .. }
            | Self::Type { span, .. }
            | Self::ArityMismatch { span, .. }
            | Self::IndexOutOfRange { span, .. }
            | Self::RecursionLimit { span, .. } => span,
        };
        if span.is_dummy() {
            *span = at;
        }
        self
    }

    /// The message without the `KindError:` prefix.
    pub fn message(&self) -> String {
        let full = self.to_string();
        match full.split_once(": ") {
            Some((_, message)) => message.to_string(),
            None => full,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Syntax { message, span } => Diagnostic::error(format!("syntax error: {}", message))
                .with_code("E0101")
                .with_label(Label::primary(*span, "")),
            Self::UndefinedVariable { name, span } => {
                Diagnostic::error(format!("undefined variable `{}`", name))
                    .with_code("E0201")
                    .with_label(Label::primary(*span, "not found in this scope"))
                    .with_help(format!("bind it first with `define({}, ...)`", name))
            }
            Self::Type { message, span } => Diagnostic::error(format!("type error: {}", message))
                .with_code("E0202")
                .with_label(Label::primary(*span, "")),
            Self::ArityMismatch { expected, found, span, definition } => {
                Diagnostic::error("type error: Wrong number of arguments")
                    .with_code("E0202")
                    .with_label(Label::primary(
                        *span,
                        format!("expected {} {}, found {}", expected, plural(*expected, "argument"), found),
                    ))
                    .with_label(Label::secondary(*definition, "function defined here"))
            }
            Self::IndexOutOfRange { index, length, span } => Diagnostic::error(format!(
                "index out of range: index is {} but length is {}",
                crate::format::format_number(*index),
                length
            ))
            .with_code("E0203")
            .with_label(Label::primary(*span, "out of range")),
            Self::RecursionLimit { limit, span } => {
                Diagnostic::error(format!("maximum call depth of {} exceeded", limit))
                    .with_code("E0204")
                    .with_label(Label::primary(*span, "while calling this function"))
                    .with_note("the program recursed without reaching a base case")
            }
        }
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
