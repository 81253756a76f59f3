use std::iter::Peekable;

use logos::Logos;

use crate::{
    error::EvalError,
    eval::ast::{BinaryOperator, Builtin, Expr, UnaryOperator},
    extract::lexer::Token,
};

pub type ParseResult<T> = Result<T, EvalError>;

/// Lexes `source` into tokens.
///
/// # Errors
/// `InvalidCharacter` for the first piece of input the lexer rejects.
pub fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push(tok),
            Err(()) => {
                return Err(EvalError::InvalidCharacter {
                    text: lexer.slice().to_string(),
                });
            }
        }
    }
    Ok(tokens)
}

/// Deepest nesting of parentheses, signs, powers and operator chains the
/// parser accepts.
pub const MAX_DEPTH: usize = 200;

/// Parses a complete expression.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// additive       := multiplicative (("+" | "-") multiplicative)*
/// multiplicative := unary (("*" | "/" | "%") unary)*
/// unary          := ("+" | "-") unary | power
/// power          := atom ("**" unary)?
/// atom           := NUMBER | NAME | NAME "(" additive ")" | "(" additive ")"
/// ```
///
/// `**` is right-associative and binds tighter than a unary minus on its
/// left, so `-2**2` is `-(2**2)`, while `2**-1` is allowed.
///
/// Every nested construct and every further operator in a chain counts one
/// level; past [`MAX_DEPTH`] parsing stops with `TooDeep`, which also bounds
/// the depth of the returned tree.
///
/// # Errors
/// `UnexpectedToken` for tokens left over after a full expression, `TooDeep`
/// for nesting beyond [`MAX_DEPTH`], plus anything raised by the sub-parsers.
pub fn parse(tokens: &[Token]) -> ParseResult<Expr> {
    let mut iter = tokens.iter().peekable();
    let expr = parse_additive(&mut iter, 0)?;
    match iter.next() {
        Some(token) => Err(EvalError::UnexpectedToken {
            token: token.to_string(),
        }),
        None => Ok(expr),
    }
}

fn descend(depth: usize) -> ParseResult<usize> {
    if depth >= MAX_DEPTH {
        Err(EvalError::TooDeep { limit: MAX_DEPTH })
    } else {
        Ok(depth + 1)
    }
}

fn parse_additive<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a Token>,
{
    let mut left = parse_multiplicative(tokens, depth)?;
    let mut level = depth;
    while let Some(op) = tokens.peek().and_then(|t| additive_operator(t)) {
        tokens.next();
        // Left-leaning chains grow the tree one level per operator
        level = descend(level)?;
        let right = parse_multiplicative(tokens, level)?;
        left = Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        };
    }
    Ok(left)
}

fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a Token>,
{
    let mut left = parse_unary(tokens, depth)?;
    let mut level = depth;
    while let Some(op) = tokens.peek().and_then(|t| multiplicative_operator(t)) {
        tokens.next();
        level = descend(level)?;
        let right = parse_unary(tokens, level)?;
        left = Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        };
    }
    Ok(left)
}

fn parse_unary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a Token>,
{
    let op = match tokens.peek() {
        Some(Token::Minus) => UnaryOperator::Neg,
        Some(Token::Plus) => UnaryOperator::Plus,
        _ => return parse_power(tokens, depth),
    };
    tokens.next();
    let operand = parse_unary(tokens, descend(depth)?)?;
    Ok(Expr::Unary {
        op,
        operand: Box::new(operand),
    })
}

fn parse_power<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a Token>,
{
    let base = parse_atom(tokens, depth)?;
    if let Some(Token::DoubleStar) = tokens.peek() {
        tokens.next();
        let exponent = parse_unary(tokens, descend(depth)?)?;
        return Ok(Expr::Binary {
            left: Box::new(base),
            op: BinaryOperator::Pow,
            right: Box::new(exponent),
        });
    }
    Ok(base)
}

fn parse_atom<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a Token>,
{
    match tokens.next() {
        Some(Token::Number(value)) => Ok(Expr::Number(*value)),
        Some(Token::Identifier(name)) => {
            if let Some(Token::LParen) = tokens.peek() {
                let function = Builtin::from_name(name)
                    .ok_or_else(|| EvalError::UnknownFunction { name: name.clone() })?;
                tokens.next();
                let argument = parse_parenthesized_rest(tokens, descend(depth)?)?;
                return Ok(Expr::Call {
                    function,
                    argument: Box::new(argument),
                });
            }
            Ok(Expr::Placeholder(name.clone()))
        }
        Some(Token::LParen) => parse_parenthesized_rest(tokens, descend(depth)?),
        Some(token) => Err(EvalError::UnexpectedToken {
            token: token.to_string(),
        }),
        None => Err(EvalError::UnexpectedEnd),
    }
}

/// Parses `additive ")"`, the opening parenthesis already consumed.
fn parse_parenthesized_rest<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
where
    I: Iterator<Item = &'a Token>,
{
    let inner = parse_additive(tokens, depth)?;
    match tokens.next() {
        Some(Token::RParen) => Ok(inner),
        Some(token) => Err(EvalError::UnexpectedToken {
            token: token.to_string(),
        }),
        None => Err(EvalError::UnexpectedEnd),
    }
}

fn additive_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        _ => None,
    }
}

fn multiplicative_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        _ => None,
    }
}
