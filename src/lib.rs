//! # giant
//!
//! GIANT is a small interpreted language built around the *relational
//! value*: a number that carries, as part of its identity, its offsets from
//! one or more named reference points ("anchors"). Programs express
//! reactive rules like "when this value is over/under/near that anchor, do
//! X" rather than raw comparisons. The natural-language-flavored surface
//! syntax is a skin over a conventional statement-oriented core.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::{Error, ParseError},
    interpreter::{
        environment::Environment,
        evaluator::core::Context,
        lexer::{Token, lex},
        parser::{statement::parse_statement, utils::skip_to_line_break},
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Statement` and `Expr` enums that represent the
/// syntactic structure of source code as a tree. The AST is built by the
/// parser and traversed by the evaluator; every synonymous surface phrasing
/// lowers to a single canonical node.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source line numbers to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code. Every error carries the originating source line and
/// renders as `Error on line <N>: <message>`.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Wraps both phases in a single `Error` type for callers of
///   [`Interpreter::run`].
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, and the environment to provide a complete runtime for
/// GIANT programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Safely convert between `i64` and `f64` without silent data loss.
pub mod util;

/// A GIANT interpreter instance.
///
/// Owns the environment for the lifetime of a session: the REPL feeds every
/// prompt line through the same instance so bindings accumulate, while file
/// execution uses one instance per file. Nothing is process-wide; multiple
/// interpreters coexist independently.
pub struct Interpreter {
    context: Context,
}

#[allow(clippy::new_without_default)]
impl Interpreter {
    /// Creates an interpreter with an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self { context: Context::new(), }
    }

    /// Runs a source fragment, collecting output and errors.
    ///
    /// The source is lexed once; statements are then parsed and evaluated
    /// one at a time, so an error in any single statement, syntactic or
    /// runtime, is recorded and the following statements still run. A lex
    /// error is the only fatal case, since there is no token stream to
    /// continue with.
    ///
    /// # Parameters
    /// - `source`: Source text; one statement per line.
    /// - `out`: Sink receiving every output line the program produces.
    ///
    /// # Returns
    /// All errors encountered, in the order they were raised. An empty
    /// vector means the fragment ran cleanly.
    ///
    /// # Example
    /// ```
    /// use giant::Interpreter;
    ///
    /// let mut interpreter = Interpreter::new();
    /// let mut out = String::new();
    ///
    /// let errors = interpreter.run("make x be 10\ntalk x plus 5", &mut out);
    ///
    /// assert!(errors.is_empty());
    /// assert_eq!(out, "15\n");
    /// ```
    pub fn run(&mut self, source: &str, out: &mut String) -> Vec<Error> {
        let tokens = match lex(source) {
            Ok(tokens) => tokens,
            Err(e) => return vec![Error::Parse(e)],
        };

        let mut errors = Vec::new();
        let mut iter = tokens.iter().peekable();

        loop {
            while matches!(iter.peek(), Some((Token::Line { .. }, _))) {
                iter.next();
            }
            if iter.peek().is_none() {
                break;
            }

            match parse_statement(&mut iter) {
                Ok(statement) => match iter.peek() {
                    None | Some((Token::Line { .. }, _)) => {
                        if let Err(e) = self.context.eval_statement(&statement, out) {
                            errors.push(Error::Runtime(e));
                        }
                    },
                    Some((token, line)) => {
                        errors.push(Error::Parse(ParseError::UnexpectedTrailingTokens { token: format!("{token:?}"),
                                                                                        line:  *line, }));
                        skip_to_line_break(&mut iter);
                    },
                },
                Err(e) => {
                    errors.push(Error::Parse(e));
                    skip_to_line_break(&mut iter);
                },
            }
        }

        errors
    }

    /// Runs a source fragment against standard output and standard error.
    ///
    /// Program output goes to stdout; each error is reported on stderr as
    /// `Error on line <N>: <message>`. Errors never abort the run; this
    /// returns whether the fragment completed without any.
    ///
    /// # Parameters
    /// - `source`: Source text; one statement per line.
    ///
    /// # Returns
    /// `true` when every statement executed without error.
    pub fn execute(&mut self, source: &str) -> bool {
        let mut out = String::new();
        let errors = self.run(source, &mut out);

        print!("{out}");
        for error in &errors {
            eprintln!("{error}");
        }

        errors.is_empty()
    }

    /// Read access to the interpreter's binding store.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.context.environment
    }
}
