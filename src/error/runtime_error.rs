#[derive(Debug)]
/// Represents all errors that can be raised during evaluation.
pub enum RuntimeError {
    /// Tried to use an unbound name.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Referenced an anchor that is not defined.
    UnknownAnchor {
        /// The name of the anchor.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A name was used where an anchor was required, but it is bound to
    /// something else.
    NotAnAnchor {
        /// The name of the binding.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric value was expected, but not found.
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `when` subject was neither a numeric scalar nor a relational value.
    InvalidWhenSubject {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The qualifier string in a `when` clause is not recognized.
    UnknownQualifier {
        /// The qualifier that was rejected.
        qualifier: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// An anchor or relational value declared a negative tolerance.
    NegativeTolerance {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `confidence` metadata value fell outside `[0, 1]`.
    ConfidenceOutOfRange {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value had an unexpected or incompatible type.
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Attempted division by zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Arithmetic operation overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A literal value was too large to be represented safely.
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => {
                write!(f, "Error on line {line}: Unknown variable '{name}'.")
            },
            Self::UnknownAnchor { name, line } => {
                write!(f, "Error on line {line}: Anchor '{name}' is not defined.")
            },
            Self::NotAnAnchor { name, line } => {
                write!(f, "Error on line {line}: '{name}' is not an anchor.")
            },
            Self::ExpectedNumber { line } => write!(f, "Error on line {line}: Expected number."),
            Self::InvalidWhenSubject { line } => write!(f,
                                                        "Error on line {line}: A 'when' subject must be a number or a relational value."),

            Self::UnknownQualifier { qualifier, line } => write!(f,
                                                                 "Error on line {line}: Unknown qualifier '{qualifier}'. Expected 'over', 'under' or 'near'."),

            Self::NegativeTolerance { line } => {
                write!(f, "Error on line {line}: Tolerance must be non-negative.")
            },
            Self::ConfidenceOutOfRange { line } => {
                write!(f, "Error on line {line}: Confidence must be between 0 and 1.")
            },
            Self::TypeError { details, line } => {
                write!(f, "Error on line {line}: Type error: {details}.")
            },
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::Overflow { line } => write!(f,
                                              "Error on line {line}: Integer overflow while trying to compute result."),
            Self::LiteralTooLarge { line } => {
                write!(f, "Error on line {line}: Literal is too large.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
