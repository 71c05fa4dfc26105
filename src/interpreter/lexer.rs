use logos::{FilterResult, Logos};

use crate::error::ParseError;

/// Canonical keywords of the language.
///
/// Every synonymous surface phrasing folds to exactly one of these values, so
/// the parser never has to know that `inspect anchor` and `describe anchor`
/// are the same query or that `divided by` and `over` are the same operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `make` (assignment opener)
    Make,
    /// `set` (assignment opener)
    Set,
    /// `let` (assignment opener)
    Let,
    /// `be` (assignment connector)
    Be,
    /// `to` (assignment connector)
    To,
    /// `be equal to` (assignment connector)
    BeEqualTo,
    /// `plus`
    Plus,
    /// `added to` (operands swap: `a added to b` is `b + a`)
    AddedTo,
    /// `minus`
    Minus,
    /// `subtract`
    Subtract,
    /// `subtracted from` (operands swap: `a subtracted from b` is `b - a`)
    SubtractedFrom,
    /// `times`
    Times,
    /// `multiplied by`
    MultipliedBy,
    /// `over` (arithmetic division, distinct from the `"over"` qualifier
    /// string)
    Over,
    /// `divided by`
    DividedBy,
    /// `talk` (output)
    Talk,
    /// `show` (output)
    Show,
    /// `wetin be` (output)
    WetinBe,
    /// `@anchor`
    AnchorDecl,
    /// `list anchors`
    ListAnchors,
    /// `describe anchor` / `inspect anchor`
    DescribeAnchor,
    /// `relational`
    Relational,
    /// `relative to`
    RelativeTo,
    /// `when`
    When,
    /// `is`
    Is,
    /// `@action`
    Action,
    /// `stop` (REPL terminator)
    Stop,
}

/// Table of keyword phrases, longest phrase first.
///
/// Folding tries entries in order, so a multi-word phrase always wins over
/// its single-word prefix (`be equal to` over `be`). Words that do not
/// complete any phrase stay identifiers: `describe` alone is an identifier,
/// `describe anchor` is a keyword.
const KEYWORD_PHRASES: &[(&[&str], Keyword)] = &[(&["be", "equal", "to"], Keyword::BeEqualTo),
                                                 (&["added", "to"], Keyword::AddedTo),
                                                 (&["subtracted", "from"], Keyword::SubtractedFrom),
                                                 (&["multiplied", "by"], Keyword::MultipliedBy),
                                                 (&["divided", "by"], Keyword::DividedBy),
                                                 (&["list", "anchors"], Keyword::ListAnchors),
                                                 (&["describe", "anchor"], Keyword::DescribeAnchor),
                                                 (&["inspect", "anchor"], Keyword::DescribeAnchor),
                                                 (&["relative", "to"], Keyword::RelativeTo),
                                                 (&["wetin", "be"], Keyword::WetinBe),
                                                 (&["make"], Keyword::Make),
                                                 (&["set"], Keyword::Set),
                                                 (&["let"], Keyword::Let),
                                                 (&["be"], Keyword::Be),
                                                 (&["to"], Keyword::To),
                                                 (&["plus"], Keyword::Plus),
                                                 (&["minus"], Keyword::Minus),
                                                 (&["subtract"], Keyword::Subtract),
                                                 (&["times"], Keyword::Times),
                                                 (&["over"], Keyword::Over),
                                                 (&["talk"], Keyword::Talk),
                                                 (&["show"], Keyword::Show),
                                                 (&["relational"], Keyword::Relational),
                                                 (&["when"], Keyword::When),
                                                 (&["is"], Keyword::Is),
                                                 (&["stop"], Keyword::Stop)];

/// A token as seen by the parser.
///
/// This is the output of [`lex`]: raw lexemes with multi-word keyword
/// phrases already folded and string escapes already processed. Metadata
/// keys (`unit`, `tolerance`, `sensor_id`, ...) are ordinary identifiers;
/// the recognized subset acquires meaning in the evaluator, not here.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Integer literal, such as `42`.
    Integer(i64),
    /// Floating-point literal, such as `3.14`.
    Real(f64),
    /// String literal, stored unescaped and without quotes.
    Str(String),
    /// Identifier: variable, anchor, or metadata key name.
    Ident(String),
    /// A canonical keyword.
    Keyword(Keyword),
    /// `=`
    Equals,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// A line break. `indented` reports whether the following line starts
    /// with whitespace; this is the only indentation signal the language
    /// needs, and only `@action` bodies and metadata continuations read it.
    Line {
        /// Whether the next line begins with leading whitespace.
        indented: bool,
    },
}

/// Raw lexemes produced by the logos run, before keyword folding.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
enum Lexeme {
    /// Numeric literal tokens with a fractional part, such as `3.14`.
    #[regex(r"[0-9]+\.[0-9]+", parse_real)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Double-quoted string literal. Escapes are validated later, during
    /// folding; here the raw contents are kept as written.
    #[regex(r#""([^"\\]|\\.)*""#, lex_string)]
    Str(String),
    /// An identifier-shaped word; possibly the first word of a keyword
    /// phrase.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Word(String),
    /// `@anchor`
    #[token("@anchor")]
    AnchorDecl,
    /// `@action`
    #[token("@action")]
    Action,
    /// `=`
    #[token("=")]
    Equals,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `:`
    #[token(":")]
    Colon,
    /// `,`
    #[token(",")]
    Comma,
    /// A line break together with the next line's leading whitespace.
    #[regex(r"\r?\n[ \t]*", lex_line)]
    Line(bool),
    /// `*sidegist*` comments run to the end of the physical line.
    #[regex(r"\*sidegist\*[^\n]*", logos::skip)]
    LineComment,
    /// `*omo*` ... `*omo*` block comments, non-nestable, across lines.
    #[token("*omo*", lex_block_comment)]
    BlockComment,
    /// Tabs and feeds.
    #[regex(r"[ \t\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Parses a floating-point literal from the current token slice.
fn parse_real(lex: &logos::Lexer<Lexeme>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice. Values that do
/// not fit an `i64` fail the lex.
fn parse_integer(lex: &logos::Lexer<Lexeme>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Strips the quotes from a string literal and counts the lines it spans.
/// Escape sequences stay raw; [`unescape`] validates them during folding.
fn lex_string(lex: &mut logos::Lexer<Lexeme>) -> String {
    let slice = lex.slice();
    lex.extras.line += slice.matches('\n').count();
    slice[1..slice.len() - 1].to_string()
}

/// Consumes a line break and reports whether the next line is indented.
fn lex_line(lex: &mut logos::Lexer<Lexeme>) -> bool {
    lex.extras.line += 1;
    lex.slice().ends_with([' ', '\t'])
}

/// Skips a `*omo*` block comment, or fails the lex when the closing
/// delimiter is missing.
fn lex_block_comment(lex: &mut logos::Lexer<Lexeme>) -> FilterResult<(), ()> {
    match lex.remainder().find("*omo*") {
        Some(end) => {
            lex.extras.line += lex.remainder()[..end].matches('\n').count();
            lex.bump(end + "*omo*".len());
            FilterResult::Skip
        },
        None => FilterResult::Error(()),
    }
}

/// Tokenizes source text into `(Token, line)` pairs.
///
/// Runs the logos lexer and then folds identifier runs against the keyword
/// phrase table, greedily and longest-first, so that `be equal to` becomes a
/// single keyword token while a lone `be` inside `make x be 5` does too.
/// String escapes are validated here as well.
///
/// # Parameters
/// - `source`: UTF-8 source text.
///
/// # Errors
/// Returns a `ParseError` on the first malformed token: an invalid
/// character, an unterminated string or block comment, an oversized numeric
/// literal, or a disallowed string escape.
///
/// # Example
/// ```
/// use giant::interpreter::lexer::{Keyword, Token, lex};
///
/// let tokens = lex("make x be 5").unwrap();
/// let kinds: Vec<&Token> = tokens.iter().map(|(t, _)| t).collect();
///
/// assert_eq!(kinds,
///            vec![&Token::Keyword(Keyword::Make),
///                 &Token::Ident("x".to_string()),
///                 &Token::Keyword(Keyword::Be),
///                 &Token::Integer(5)]);
/// ```
pub fn lex(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut lexer = Lexeme::lexer_with_extras(source, LexerExtras { line: 1 });
    let mut raw = Vec::new();

    while let Some(item) = lexer.next() {
        match item {
            Ok(lexeme) => raw.push((lexeme, lexer.extras.line)),
            Err(()) => return Err(classify_lex_error(lexer.slice(), lexer.extras.line)),
        }
    }

    fold_keywords(raw)
}

/// Maps a failed lexer slice to a specific `ParseError`.
fn classify_lex_error(slice: &str, line: usize) -> ParseError {
    if slice.starts_with('"') {
        ParseError::UnterminatedString { line }
    } else if slice == "*omo*" {
        ParseError::UnterminatedBlockComment { line }
    } else if !slice.is_empty() && slice.bytes().all(|b| b.is_ascii_digit()) {
        ParseError::LiteralTooLarge { line }
    } else {
        ParseError::InvalidToken { token: slice.to_string(),
                                   line }
    }
}

/// Folds raw lexemes into parser tokens.
///
/// Word runs are matched against [`KEYWORD_PHRASES`]; the first (longest)
/// phrase whose words all line up is emitted as one keyword token carrying
/// the line of its first word. Anything else maps one-to-one.
fn fold_keywords(raw: Vec<(Lexeme, usize)>) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        let (lexeme, line) = &raw[i];

        let token = match lexeme {
            Lexeme::Word(word) => {
                if let Some((length, keyword)) = match_phrase(&raw[i..], word) {
                    i += length;
                    tokens.push((Token::Keyword(keyword), *line));
                    continue;
                }
                Token::Ident(word.clone())
            },
            Lexeme::Integer(n) => Token::Integer(*n),
            Lexeme::Real(r) => Token::Real(*r),
            Lexeme::Str(contents) => Token::Str(unescape(contents, *line)?),
            Lexeme::AnchorDecl => Token::Keyword(Keyword::AnchorDecl),
            Lexeme::Action => Token::Keyword(Keyword::Action),
            Lexeme::Equals => Token::Equals,
            Lexeme::LBracket => Token::LBracket,
            Lexeme::RBracket => Token::RBracket,
            Lexeme::LParen => Token::LParen,
            Lexeme::RParen => Token::RParen,
            Lexeme::Colon => Token::Colon,
            Lexeme::Comma => Token::Comma,
            Lexeme::Line(indented) => Token::Line { indented: *indented, },
            Lexeme::LineComment | Lexeme::BlockComment | Lexeme::Ignored => {
                i += 1;
                continue;
            },
        };

        tokens.push((token, *line));
        i += 1;
    }

    Ok(tokens)
}

/// Tries every keyword phrase whose first word matches, returning the number
/// of lexemes consumed and the canonical keyword. Phrase words must be
/// adjacent word lexemes; a line break between them ends the attempt.
fn match_phrase(rest: &[(Lexeme, usize)], first: &str) -> Option<(usize, Keyword)> {
    for (phrase, keyword) in KEYWORD_PHRASES {
        if phrase[0] != first {
            continue;
        }

        let tail_matches = phrase[1..].iter().enumerate().all(|(offset, expected)| {
                                                            matches!(rest.get(offset + 1),
                                       Some((Lexeme::Word(w), _)) if w == expected)
                                                        });

        if tail_matches {
            return Some((phrase.len(), *keyword));
        }
    }
    None
}

/// Processes the escape sequences of a raw string literal.
///
/// The only escapes in the language are `\"` and `\\`; anything else is a
/// lex error rather than being passed through silently.
fn unescape(raw: &str, line: usize) -> Result<String, ParseError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                return Err(ParseError::InvalidStringEscape { escape: format!("\\{other}"),
                                                             line });
            },
            None => {
                return Err(ParseError::InvalidStringEscape { escape: "\\".to_string(),
                                                             line });
            },
        }
    }

    Ok(out)
}
