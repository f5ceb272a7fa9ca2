use crate::ast::Expr;
use crate::diagnostic::Span;
use crate::lexer::tokenize;
use crate::token::Token;
use crate::value::Value;
use super::error::InterpreterError;
use super::stack::ensure_sufficient_stack;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl From<ParseError> for InterpreterError {
    fn from(err: ParseError) -> Self {
        InterpreterError::syntax_at(err.message, err.span)
    }
}

/// Recursive-descent parser over the lexer's token stream.
///
/// ```text
/// program    := expression EOF
/// expression := (STRING | NUMBER | WORD) call*
/// call       := "(" (expression ("," expression)* ","?)? ")"
/// ```
pub struct TokenParser {
    tokens: Vec<SpannedToken>,
    current: usize,
    source_len: usize,
}

impl TokenParser {
    pub fn new(tokens: Vec<SpannedToken>, source_len: usize) -> Self {
        Self {
            tokens,
            current: 0,
            source_len,
        }
    }

    pub fn from_source(source: &str) -> Self {
        let tokens = tokenize(source)
            .into_iter()
            .map(|(token, span)| SpannedToken { token, span })
            .collect();
        Self::new(tokens, source.len())
    }

    fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current).map(|st| &st.token)
    }

    fn current_span(&self) -> Span {
        self.tokens
            .get(self.current)
            .map(|st| st.span)
            .unwrap_or_else(|| Span::new(self.source_len, self.source_len))
    }

    fn previous_span(&self) -> Span {
        if self.current > 0 {
            self.tokens[self.current - 1].span
        } else {
            Span::new(0, 0)
        }
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        let st = self.tokens.get(self.current).cloned()?;
        self.current += 1;
        Some(st)
    }

    fn check(&self, expected: &Token) -> bool {
        self.current_token() == Some(expected)
    }

    fn error_here(&self, message: &str) -> ParseError {
        if let Some(token) = self.current_token() {
            tracing::trace!(%token, message, "parse error");
        }
        ParseError::new(message, self.current_span())
    }

    /// Parse exactly one expression followed by nothing but whitespace.
    pub fn parse_program(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expression()?;
        if self.current_token().is_some() {
            return Err(self.error_here("Unexpected text after program"));
        }
        Ok(expr)
    }

    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let primary = self.parse_primary()?;
            self.parse_calls(primary)
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.current_span();
        let expr = match self.current_token() {
            Some(Token::String(s)) => Expr::value(Value::String(Rc::from(s.as_str())), span),
            Some(Token::Number(n)) => Expr::value(Value::Number(*n), span),
            Some(Token::Word(name)) => Expr::word(name.as_str(), span),
            _ => return Err(self.error_here("Unexpected syntax")),
        };
        self.advance();
        Ok(expr)
    }

    /// Wrap `expr` in one `Apply` per trailing argument list, so `f(a)(b)`
    /// applies the result of `f(a)` to `b`.
    fn parse_calls(&mut self, mut expr: Expr) -> Result<Expr, ParseError> {
        while self.check(&Token::LParen) {
            self.advance();
            let mut args = Vec::new();
            while !self.check(&Token::RParen) {
                args.push(self.parse_expression()?);
                if self.check(&Token::Comma) {
                    self.advance();
                } else if !self.check(&Token::RParen) {
                    return Err(self.error_here("Expected ',' or ')'"));
                }
            }
            self.advance();
            let span = expr.span.merge(self.previous_span());
            expr = Expr::apply(expr, args, span);
        }
        Ok(expr)
    }
}

/// Parse a complete program into its syntax tree.
pub fn parse(source: &str) -> Result<Expr, InterpreterError> {
    let expr = TokenParser::from_source(source).parse_program()?;
    tracing::debug!(bytes = source.len(), "parsed program");
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ExprKind;
    use pretty_assertions::assert_eq;

    fn parse_ok(source: &str) -> Expr {
        parse(source).unwrap_or_else(|e| panic!("{} failed to parse: {}", source, e))
    }

    fn parse_err(source: &str) -> InterpreterError {
        match parse(source) {
            Ok(expr) => panic!("{} should not parse, got {:?}", source, expr),
            Err(e) => e,
        }
    }

    fn word(name: &str, start: usize) -> Expr {
        Expr::word(name, Span::new(start, start + name.len()))
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse_ok("42"), Expr::value(Value::Number(42.0), Span::new(0, 2)));
        assert_eq!(parse_ok(" \"hi\" "), Expr::value(Value::from("hi"), Span::new(1, 5)));
        assert_eq!(parse_ok("x"), word("x", 0));
    }

    #[test]
    fn test_application() {
        let expected = Expr::apply(
            word("+", 0),
            vec![word("a", 2), Expr::value(Value::Number(10.0), Span::new(5, 7))],
            Span::new(0, 8),
        );
        assert_eq!(parse_ok("+(a, 10)"), expected);
    }

    #[test]
    fn test_nested_application() {
        let expr = parse_ok("do(define(x, 1), print(x))");
        let ExprKind::Apply { operator, args } = &expr.kind else {
            panic!("expected apply");
        };
        assert_eq!(operator.as_word(), Some("do"));
        assert_eq!(args.len(), 2);
        assert!(matches!(args[0].kind, ExprKind::Apply { .. }));
    }

    #[test]
    fn test_chained_calls_nest_left() {
        let expr = parse_ok("f(1)(2)");
        let ExprKind::Apply { operator, args } = &expr.kind else {
            panic!("expected apply");
        };
        assert_eq!(args.len(), 1);
        let ExprKind::Apply { operator: inner, .. } = &operator.kind else {
            panic!("operator should be an apply");
        };
        assert_eq!(inner.as_word(), Some("f"));
    }

    #[test]
    fn test_empty_and_trailing_comma_argument_lists() {
        let empty = parse_ok("f()");
        let ExprKind::Apply { args, .. } = &empty.kind else {
            panic!("expected apply");
        };
        assert!(args.is_empty());

        let trailing = parse_ok("f(1,)");
        let ExprKind::Apply { args, .. } = &trailing.kind else {
            panic!("expected apply");
        };
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_trailing_text() {
        let err = parse_err("1 1");
        assert_eq!(err.to_string(), "SyntaxError: Unexpected text after program");
        assert_eq!(err.span(), Span::new(2, 3));

        assert_eq!(parse_err("f(1))").message(), "Unexpected text after program");
        assert_eq!(parse_err("1 \"x").message(), "Unexpected text after program");
    }

    #[test]
    fn test_unexpected_syntax() {
        for source in ["", "   ", ")", ",", "\"open", "f(", "f(,)"] {
            assert_eq!(parse_err(source).message(), "Unexpected syntax", "source: {:?}", source);
        }
    }

    #[test]
    fn test_missing_separator() {
        for source in ["f(1 2)", "f(1", "+(12.5, 1)"] {
            assert_eq!(parse_err(source).message(), "Expected ',' or ')'", "source: {:?}", source);
        }
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let depth = 200_000;
        let source = format!("{}1{}", "f(".repeat(depth), ")".repeat(depth));
        let expr = parse(&source).unwrap();
        assert_eq!(expr.span, Span::new(0, source.len()));
        drop(expr);
    }
}
