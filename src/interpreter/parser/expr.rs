use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LiteralValue},
    error::ParseError,
    interpreter::{
        lexer::{Keyword, Token},
        parser::core::{ParseResult, parse_expression},
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles the left-associative additive phrases: `plus`, `added to`,
/// `minus`, `subtract`, and `subtracted from`. The swapped phrasings build
/// their node with the operands reversed, so `20 subtracted from 30` parses
/// as `30 - 20`.
///
/// The rule is: `additive := multiplicative (additive_op multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// An `Expr::BinaryOp` tree representing the parsed expression.
///
/// # Errors
/// Propagates errors from the operand parsers.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens)?;
    loop {
        if let Some((Token::Keyword(keyword), line)) = tokens.peek()
            && let Some((op, swapped)) = additive_operator(*keyword)
        {
            let line = *line;
            tokens.next();
            let right = parse_multiplicative(tokens)?;

            left = if swapped {
                Expr::BinaryOp { left: Box::new(right),
                                 op,
                                 right: Box::new(left),
                                 line }
            } else {
                Expr::BinaryOp { left: Box::new(left),
                                 op,
                                 right: Box::new(right),
                                 line }
            };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication and division expressions.
///
/// Handles the left-associative multiplicative phrases: `times`,
/// `multiplied by`, `over`, and `divided by`.
///
/// The rule is: `multiplicative := atom (multiplicative_op atom)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// A binary expression tree combining atoms.
///
/// # Errors
/// Propagates errors from the operand parsers.
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_atom(tokens)?;
    loop {
        if let Some((Token::Keyword(keyword), line)) = tokens.peek()
            && let Some(op) = multiplicative_operator(*keyword)
        {
            let line = *line;
            tokens.next();
            let right = parse_atom(tokens)?;

            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses an atomic expression.
///
/// Grammar: `atom := NUMBER | STRING | "true" | "false" | IDENT
///                 | "(" expression ")"`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// The parsed atom.
///
/// # Errors
/// - `UnexpectedToken` for a token that cannot start an atom.
/// - `UnexpectedEndOfInput` when the stream is exhausted.
pub fn parse_atom<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Integer(n), line)) => Ok(Expr::Literal { value: LiteralValue::Integer(*n),
                                                              line:  *line, }),

        Some((Token::Real(r), line)) => Ok(Expr::Literal { value: LiteralValue::Real(*r),
                                                           line:  *line, }),

        Some((Token::Str(s), line)) => Ok(Expr::Literal { value: LiteralValue::Str(s.clone()),
                                                          line:  *line, }),

        Some((Token::Ident(name), line)) => match name.as_str() {
            "true" => Ok(Expr::Literal { value: LiteralValue::Bool(true),
                                         line:  *line, }),
            "false" => Ok(Expr::Literal { value: LiteralValue::Bool(false),
                                          line:  *line, }),
            _ => Ok(Expr::Variable { name: name.clone(),
                                     line: *line, }),
        },

        Some((Token::LParen, line)) => {
            let inner = parse_expression(tokens)?;
            match tokens.next() {
                Some((Token::RParen, _)) => Ok(inner),
                Some((tok, l)) => {
                    Err(ParseError::UnexpectedToken { token: format!("Expected ')', found {tok:?}"),
                                                      line:  *l, })
                },
                None => Err(ParseError::UnexpectedEndOfInput { line: *line }),
            }
        },

        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected an expression, found {tok:?}"),
                                              line:  *line, })
        },

        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Maps a keyword to an additive operator.
///
/// The second tuple field reports whether the phrasing swaps its operands:
/// `a added to b` is `b + a`, `a subtracted from b` is `b - a`.
///
/// # Returns
/// `Some((operator, swapped))` for additive keywords, otherwise `None`.
#[must_use]
pub const fn additive_operator(keyword: Keyword) -> Option<(BinaryOperator, bool)> {
    match keyword {
        Keyword::Plus => Some((BinaryOperator::Add, false)),
        Keyword::AddedTo => Some((BinaryOperator::Add, true)),
        Keyword::Minus | Keyword::Subtract => Some((BinaryOperator::Sub, false)),
        Keyword::SubtractedFrom => Some((BinaryOperator::Sub, true)),
        _ => None,
    }
}

/// Maps a keyword to a multiplicative operator.
///
/// # Returns
/// `Some(operator)` for multiplicative keywords, otherwise `None`.
#[must_use]
pub const fn multiplicative_operator(keyword: Keyword) -> Option<BinaryOperator> {
    match keyword {
        Keyword::Times | Keyword::MultipliedBy => Some(BinaryOperator::Mul),
        Keyword::Over | Keyword::DividedBy => Some(BinaryOperator::Div),
        _ => None,
    }
}
