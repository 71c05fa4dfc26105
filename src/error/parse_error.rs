#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The lexer could not recognize a token.
    InvalidToken {
        /// The offending source text.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A string literal was opened but never closed.
    UnterminatedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string literal used an escape other than `\"` or `\\`.
    InvalidStringEscape {
        /// The escape sequence that was rejected.
        escape: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A `*omo*` block comment was opened but never closed.
    UnterminatedBlockComment {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Found extra tokens after a complete statement.
    UnexpectedTrailingTokens {
        /// The extra/unexpected token.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A literal value was too large to be represented safely.
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidToken { token, line } => {
                write!(f, "Error on line {line}: Invalid token: {token}.")
            },

            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: Unterminated string literal.")
            },

            Self::InvalidStringEscape { escape, line } => write!(f,
                                                                 "Error on line {line}: Invalid string escape '{escape}'. Only \\\" and \\\\ are allowed."),

            Self::UnterminatedBlockComment { line } => write!(f,
                                                              "Error on line {line}: Block comment opened with *omo* but never closed."),

            Self::UnexpectedToken { token, line } => {
                write!(f, "Error on line {line}: Unexpected token: {token}.")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },

            Self::UnexpectedTrailingTokens { token, line } => write!(f,
                                                                     "Error on line {line}: Extra tokens after statement. Check your input: {token}"),

            Self::LiteralTooLarge { line } => {
                write!(f, "Error on line {line}: Literal is too large.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
