use std::rc::Rc;

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{anchor::Anchor, relational::Relational},
    },
    util::num::i64_to_f64_checked,
};

/// A numeric scalar: either a 64-bit integer or a double precision real.
///
/// Anchors, relational values, offsets, and arithmetic all operate on this
/// subset of [`Value`]. Keeping integers and reals distinct is what lets the
/// renderer print `8` for an integer offset but `8.5` for a real one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating-point number.
    Real(f64),
}

impl Number {
    /// Converts the number to `f64`, failing when an integer is too large to
    /// be represented exactly.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: The value, losslessly converted.
    /// - `Err(RuntimeError::LiteralTooLarge)`: If the integer exceeds the
    ///   exactly-representable range.
    pub fn as_real(self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Integer(n) => i64_to_f64_checked(n, RuntimeError::LiteralTooLarge { line }),
            Self::Real(r) => Ok(r),
        }
    }

    /// Converts the number to `f64` without an exactness check.
    ///
    /// Used for position comparisons and offset computation, where a value
    /// beyond `2^53` can only shift a result that is already far outside any
    /// realistic tolerance.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn to_f64(self) -> f64 {
        match self {
            Self::Integer(n) => n as f64,
            Self::Real(r) => r,
        }
    }

    /// Computes the absolute offset between `self` and `other`.
    ///
    /// The offset is an integer when both operands are integers, a real
    /// otherwise. Integer differences that overflow fall back to the real
    /// representation.
    ///
    /// # Example
    /// ```
    /// use giant::interpreter::value::core::Number;
    ///
    /// assert_eq!(Number::Integer(108).offset_from(Number::Integer(100)),
    ///            Number::Integer(8));
    /// assert_eq!(Number::Real(78.5).offset_from(Number::Integer(75)),
    ///            Number::Real(3.5));
    /// ```
    #[must_use]
    pub fn offset_from(self, other: Self) -> Self {
        if let (Self::Integer(a), Self::Integer(b)) = (self, other)
            && let Some(difference) = a.checked_sub(b).and_then(i64::checked_abs)
        {
            return Self::Integer(difference);
        }

        Self::Real((self.to_f64() - other.to_f64()).abs())
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{}", real_repr(*r)),
        }
    }
}

/// Renders a real number, trimming trailing zeros but keeping at least one
/// fractional digit: `2.5` stays `2.5`, `5` becomes `5.0`.
#[must_use]
pub fn real_repr(value: f64) -> String {
    let repr = value.to_string();
    if repr.contains('.') || !value.is_finite() {
        repr
    } else {
        format!("{repr}.0")
    }
}

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// bindings, and `when` subjects. Anchors and relational values are tagged
/// variants rather than numeric subtypes; every evaluator site that cares
/// branches on the kind explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer value (64-bit).
    Integer(i64),
    /// A real value (double precision floating-point).
    Real(f64),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// An immutable string, printed verbatim without quotes.
    Str(String),
    /// A named anchor. Shared so relational values can snapshot it cheaply.
    Anchor(Rc<Anchor>),
    /// A relational value carrying its anchor positions.
    Relational(Rc<Relational>),
}

impl Value {
    /// Coerces the value to a [`Number`], or returns an error if it has no
    /// numeric reading.
    ///
    /// Anchors contribute their reference value and relational values their
    /// underlying number, so both can appear in arithmetic positions.
    /// Strings and booleans are rejected.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(Number)`: The numeric reading of the value.
    /// - `Err(RuntimeError::ExpectedNumber)`: If the value is not numeric.
    ///
    /// # Example
    /// ```
    /// use giant::interpreter::value::core::{Number, Value};
    ///
    /// assert_eq!(Value::Integer(10).as_number(1).unwrap(),
    ///            Number::Integer(10));
    /// assert!(Value::Str("ten".to_string()).as_number(1).is_err());
    /// ```
    pub fn as_number(&self, line: usize) -> EvalResult<Number> {
        match self {
            Self::Integer(n) => Ok(Number::Integer(*n)),
            Self::Real(r) => Ok(Number::Real(*r)),
            Self::Anchor(anchor) => Ok(anchor.value),
            Self::Relational(relational) => Ok(relational.value),
            Self::Bool(_) | Self::Str(_) => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Returns `true` if the value is a plain scalar (not an anchor or a
    /// relational value).
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self,
                 Self::Integer(..) | Self::Real(..) | Self::Bool(..) | Self::Str(..))
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Integer(n) => Self::Integer(*n),
            LiteralValue::Real(r) => Self::Real(*r),
            LiteralValue::Str(s) => Self::Str(s.clone()),
            LiteralValue::Bool(b) => Self::Bool(*b),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{}", real_repr(*r)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Anchor(anchor) => write!(f, "{anchor}"),
            Self::Relational(relational) => write!(f, "{relational}"),
        }
    }
}
