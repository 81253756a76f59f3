use std::fmt;

use logos::Logos;

/// A lexical token of an estimation expression.
///
/// The same token set is used twice: once over the raw user input to find
/// literals and ranges, and once over the rewritten expression to build the
/// evaluation tree. Whitespace is skipped; the extractor recovers it from
/// token spans.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Unsigned numeric literal such as `3`, `2.5` or `1.5e-3`. A sign is
    /// attached by the extractor, not by the lexer.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),
    /// Placeholder or builtin function name.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `**`
    #[token("**")]
    DoubleStar,
    /// `^`
    #[token("^")]
    Caret,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
}

impl Token {
    /// Whether a `-` following this token is a sign rather than subtraction.
    ///
    /// Only operands (numbers, names, closing parentheses) can be the left
    /// side of a binary minus.
    pub fn starts_operand_position(&self) -> bool {
        !matches!(
            self,
            Token::Number(_) | Token::Identifier(_) | Token::RParen
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Identifier(name) => write!(f, "{name}"),
            Token::DoubleStar => write!(f, "**"),
            Token::Caret => write!(f, "^"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
        }
    }
}
