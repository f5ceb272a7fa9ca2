use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals and words
    String(String),
    Number(f64),
    Word(String),

    // Delimiters
    LParen,
    RParen,
    Comma,

    /// A character that cannot start any token, such as an unterminated `"`.
    Stray(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::String(s) => write!(f, "string \"{}\"", s),
            Token::Number(n) => write!(f, "number {}", n),
            Token::Word(w) => write!(f, "word `{}`", w),
            Token::LParen => write!(f, "`(`"),
            Token::RParen => write!(f, "`)`"),
            Token::Comma => write!(f, "`,`"),
            Token::Stray(c) => write!(f, "`{}`", c),
        }
    }
}
