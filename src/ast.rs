use std::mem;
use std::rc::Rc;

use crate::diagnostic::Span;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A literal number or string.
    Value(Value),
    /// A name looked up in the environment.
    Word(Rc<str>),
    /// `operator(args...)`. The operator may itself be any expression, so
    /// `f(a)(b)` nests one `Apply` inside another.
    Apply { operator: Rc<Expr>, args: Vec<Rc<Expr>> },
}

/// A node of the syntax tree. Nodes are built once by the parser and shared
/// (never mutated) by closures that capture a body.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn value(value: Value, span: Span) -> Self {
        Self::new(ExprKind::Value(value), span)
    }

    pub fn word(name: impl Into<Rc<str>>, span: Span) -> Self {
        Self::new(ExprKind::Word(name.into()), span)
    }

    pub fn apply(operator: Expr, args: Vec<Expr>, span: Span) -> Self {
        Self::new(
            ExprKind::Apply {
                operator: Rc::new(operator),
                args: args.into_iter().map(Rc::new).collect(),
            },
            span,
        )
    }

    /// The name of a `Word` node.
    pub fn as_word(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Word(name) => Some(name),
            _ => None,
        }
    }
}

/// Move the children of an `Apply` node onto `pending`, leaving a leaf behind.
fn take_children(kind: &mut ExprKind, pending: &mut Vec<Rc<Expr>>) {
    if !matches!(kind, ExprKind::Apply { .. }) {
        return;
    }
    if let ExprKind::Apply { operator, args } = mem::replace(kind, ExprKind::Value(Value::Bool(false))) {
        pending.push(operator);
        pending.extend(args);
    }
}

// Programs nest as deep as their source does, so the tree is torn down from a
// worklist instead of one drop frame per level.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        take_children(&mut self.kind, &mut pending);
        while let Some(child) = pending.pop() {
            if let Ok(mut expr) = Rc::try_unwrap(child) {
                take_children(&mut expr.kind, &mut pending);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropping_deep_tree() {
        let mut expr = Expr::word("x", Span::new(0, 1));
        for _ in 0..200_000 {
            expr = Expr::apply(Expr::word("f", Span::new(0, 1)), vec![expr], Span::new(0, 1));
        }
        drop(expr);
    }

    #[test]
    fn test_shared_body_outlives_parent() {
        let body = Rc::new(Expr::word("x", Span::new(4, 5)));
        let parent = Expr::new(
            ExprKind::Apply { operator: Rc::clone(&body), args: vec![Rc::clone(&body)] },
            Span::new(0, 6),
        );
        drop(parent);
        assert_eq!(body.as_word(), Some("x"));
    }
}
