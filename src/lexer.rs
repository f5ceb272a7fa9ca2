use chumsky::prelude::*;

use crate::diagnostic::Span;
use crate::token::Token;

/// Characters that may appear in a word: anything but whitespace, parens, commas and quotes.
fn is_word_char(c: &char) -> bool {
    !c.is_whitespace() && !matches!(c, '(' | ')' | ',' | '"')
}

/// A digit run only counts as a number when it ends on an ASCII word boundary.
fn continues_word(c: &char) -> bool {
    c.is_ascii_alphanumeric() || *c == '_'
}

pub fn lexer<'a>() -> impl Parser<'a, &'a str, Vec<(Token, SimpleSpan)>, extra::Err<Simple<'a, char>>> {
    let string = just('"')
        .ignore_then(none_of("\"").repeated().to_slice())
        .then_ignore(just('"'))
        .map(|s: &str| Token::String(s.to_string()));

    // A run of decimal digits always parses as f64 (overflowing to infinity).
    let number = text::digits(10)
        .to_slice()
        .then_ignore(any().filter(continues_word).not())
        .map(|s: &str| Token::Number(s.parse().unwrap_or(f64::INFINITY)));

    let word = any()
        .filter(is_word_char)
        .repeated()
        .at_least(1)
        .to_slice()
        .map(|s: &str| Token::Word(s.to_string()));

    let delimiter = choice((
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just(',').to(Token::Comma),
    ));

    let stray = any().map(Token::Stray);

    let token = choice((string, number, word, delimiter, stray))
        .map_with(|tok, e| (tok, e.span()))
        .padded();

    token.repeated().collect().padded().then_ignore(end())
}

/// Splits program text into spanned tokens.
///
/// This never fails: characters that cannot begin a token come back as
/// [`Token::Stray`] and are reported by the parser in context.
pub fn tokenize(source: &str) -> Vec<(Token, Span)> {
    lexer()
        .parse(source)
        .into_output()
        .unwrap_or_default()
        .into_iter()
        .map(|(token, span)| (token, Span::new(span.start, span.end)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex(source: &str) -> Vec<Token> {
        tokenize(source).into_iter().map(|(tok, _)| tok).collect()
    }

    fn word(name: &str) -> Token {
        Token::Word(name.to_string())
    }

    #[test]
    fn test_words() {
        assert_eq!(lex("define"), vec![word("define")]);
        assert_eq!(lex("+"), vec![word("+")]);
        assert_eq!(lex("=="), vec![word("==")]);
        assert_eq!(lex("a-b?"), vec![word("a-b?")]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(lex("42"), vec![Token::Number(42.0)]);
        assert_eq!(lex("0"), vec![Token::Number(0.0)]);
        assert_eq!(lex("007"), vec![Token::Number(7.0)]);
    }

    #[test]
    fn test_digits_followed_by_letters_form_a_word() {
        assert_eq!(lex("12abc"), vec![word("12abc")]);
        assert_eq!(lex("1_000"), vec![word("1_000")]);
    }

    #[test]
    fn test_digits_stop_at_non_word_character() {
        assert_eq!(lex("12.5"), vec![Token::Number(12.0), word(".5")]);
        assert_eq!(lex("3-1"), vec![Token::Number(3.0), word("-1")]);
    }

    #[test]
    fn test_strings_have_no_escapes() {
        assert_eq!(lex(r#""hello world""#), vec![Token::String("hello world".to_string())]);
        assert_eq!(lex(r#""""#), vec![Token::String(String::new())]);
        assert_eq!(lex(r#""a\n""#), vec![Token::String("a\\n".to_string())]);
    }

    #[test]
    fn test_unterminated_string_is_stray_quote() {
        assert_eq!(lex(r#""abc"#), vec![Token::Stray('"'), word("abc")]);
    }

    #[test]
    fn test_application() {
        assert_eq!(
            lex("+(a, 10)"),
            vec![
                word("+"),
                Token::LParen,
                word("a"),
                Token::Comma,
                Token::Number(10.0),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(lex(""), vec![]);
        assert_eq!(lex("  \n\t "), vec![]);
    }

    #[test]
    fn test_spans() {
        let spans: Vec<Span> = tokenize(" f(\"x\")").into_iter().map(|(_, span)| span).collect();
        assert_eq!(
            spans,
            vec![Span::new(1, 2), Span::new(2, 3), Span::new(3, 6), Span::new(6, 7)]
        );
    }
}
