/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens with
/// line numbers. Multi-word keyword phrases (`be equal to`, `divided by`,
/// `list anchors`, ...) are folded into single canonical keyword tokens by a
/// table-driven pass, so every downstream stage works on one operator set.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line numbers.
/// - Handles numeric and string literals, identifiers, comments, and line
///   breaks with their indentation signal.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;

/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST representing the statements of the program. Synonymous
/// surface phrasings are already collapsed by the lexer, so each construct
/// parses into exactly one canonical node.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Parses `@action` bodies under `when` headers and metadata tails.
/// - Validates grammar, reporting errors with line information.
pub mod parser;

/// The evaluator module executes AST nodes and produces effects.
///
/// The evaluator traverses statements in source order, updates the
/// environment, performs arithmetic, computes anchor positions, and drives
/// when-clause dispatch. It is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Executes statements, writing output lines to a caller-supplied sink.
/// - Evaluates expressions and coerces values where arithmetic requires.
/// - Reports runtime errors such as unbound names or division by zero.
pub mod evaluator;

/// The value module defines the runtime data types for evaluation.
///
/// Declares the `Value` sum over scalars, anchors, and relational values,
/// together with the numeric scalar type, the position qualifier vocabulary,
/// and all display formatting.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements anchor and relational construction with metadata
///   validation.
/// - Renders every value kind in its canonical display form.
pub mod value;

/// The environment module stores named bindings.
///
/// A single flat, insertion-ordered mapping shared by the whole program; no
/// construct in the language introduces a nested scope.
pub mod environment;
