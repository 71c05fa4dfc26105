use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Keyword, Token},
        parser::core::{ParseResult, parse_expression},
    },
};

/// Consumes the next token, which must be an identifier, and returns its
/// name.
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `line`: Line of the enclosing construct, used when input ends.
///
/// # Errors
/// - `UnexpectedToken` if the next token is not an identifier.
/// - `UnexpectedEndOfInput` if there is no next token.
pub fn parse_identifier<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Ident(name), _)) => Ok(name.clone()),
        Some((tok, l)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected a name, found {tok:?}"),
                                              line:  *l, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Consumes the next token, which must equal `expected`.
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `expected`: The exact token that must come next.
/// - `description`: How to name the expectation in an error message.
/// - `line`: Line of the enclosing construct, used when input ends.
///
/// # Errors
/// - `UnexpectedToken` if the next token differs from `expected`.
/// - `UnexpectedEndOfInput` if there is no next token.
pub fn expect_token<'a, I>(tokens: &mut Peekable<I>,
                           expected: &Token,
                           description: &str,
                           line: usize)
                           -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((tok, _)) if tok == expected => Ok(()),
        Some((tok, l)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected {description}, found {tok:?}"),
                                              line:  *l, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line }),
    }
}

/// Consumes the next token, which must be the given keyword.
///
/// # Errors
/// Same as [`expect_token`].
pub fn expect_keyword<'a, I>(tokens: &mut Peekable<I>,
                             keyword: Keyword,
                             description: &str,
                             line: usize)
                             -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect_token(tokens, &Token::Keyword(keyword), description, line)
}

/// Parses the metadata tail of an anchor or relational declaration.
///
/// Grammar: `meta := IDENT "=" expression`
///
/// Entries on the declaration line are consumed directly; entries may also
/// continue on subsequent indented lines:
///
/// ```text
/// @anchor optimal = 75
///     unit = "celsius"
///     tolerance = 5
/// ```
///
/// The lookahead is conservative: an identifier is only treated as a
/// metadata key when it is immediately followed by `=`, so the next
/// statement is never swallowed.
///
/// # Returns
/// The metadata entries in declaration order (possibly empty).
///
/// # Errors
/// Propagates errors from the value expressions.
pub fn parse_metadata<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<(String, Expr)>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut metadata = Vec::new();

    loop {
        if let Some((Token::Ident(_), line)) = tokens.peek() {
            let line = *line;
            let mut lookahead = tokens.clone();
            lookahead.next();

            if !matches!(lookahead.peek(), Some((Token::Equals, _))) {
                break;
            }

            let key = parse_identifier(tokens, line)?;
            tokens.next(); // consume '='
            let value = parse_expression(tokens)?;
            metadata.push((key, value));
            continue;
        }

        // An indented continuation line only belongs to the declaration
        // when it starts another `key = value` entry.
        if let Some((Token::Line { indented: true }, _)) = tokens.peek() {
            let mut lookahead = tokens.clone();
            lookahead.next();

            if let Some((Token::Ident(_), _)) = lookahead.peek() {
                lookahead.next();
                if matches!(lookahead.peek(), Some((Token::Equals, _))) {
                    tokens.next(); // consume the line break
                    continue;
                }
            }
        }

        break;
    }

    Ok(metadata)
}

/// Skips tokens up to (but not including) the next line break.
///
/// Used for error recovery: after a statement fails to parse, the rest of
/// its line is discarded so the next statement can still be parsed.
pub fn skip_to_line_break<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    while let Some((token, _)) = tokens.peek() {
        if matches!(token, Token::Line { .. }) {
            break;
        }
        tokens.next();
    }
}
