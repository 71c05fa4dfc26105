use indexmap::IndexMap;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::core::{Number, Value},
    },
};

/// A named, immutable numeric reference point.
///
/// Anchors are not just constants: they carry a tolerance that drives the
/// `over`/`under`/`near` position qualifiers and a metadata bag describing
/// where the reference point comes from. They are created by `@anchor`
/// declarations and never mutated afterwards; re-declaring a name binds a
/// fresh anchor.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    /// Name of the anchor, unique within the environment.
    pub name:      String,
    /// The reference value.
    pub value:     Number,
    /// Acceptable deviation around the value. Defaults to 0, which makes
    /// `near` a strict equality.
    pub tolerance: f64,
    /// Metadata entries in declaration order. The recognized keys (`unit`,
    /// `tolerance`, `description`, `context`, `confidence`) carry semantics;
    /// everything else is retained for display only.
    pub metadata:  IndexMap<String, Value>,
}

impl Anchor {
    /// Creates an anchor, validating the recognized metadata keys.
    ///
    /// # Parameters
    /// - `name`: The anchor name.
    /// - `value`: The evaluated reference value.
    /// - `metadata`: Evaluated metadata entries in declaration order.
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Errors
    /// - `RuntimeError::NegativeTolerance` for a tolerance below zero.
    /// - `RuntimeError::ConfidenceOutOfRange` for a confidence outside
    ///   `[0, 1]`.
    /// - `RuntimeError::TypeError` when `tolerance` or `confidence` is not
    ///   numeric.
    pub fn new(name: String,
               value: Number,
               metadata: IndexMap<String, Value>,
               line: usize)
               -> EvalResult<Self> {
        let tolerance = check_metadata(&metadata, line)?;

        Ok(Self { name,
                  value,
                  tolerance,
                  metadata })
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.name, self.value)?;

        for (key, value) in &self.metadata {
            if key == "tolerance" {
                write!(f, " [tolerance=±{value}]")?;
            } else {
                write!(f, " [{key}={value}]")?;
            }
        }

        Ok(())
    }
}

/// Validates the recognized metadata keys of an anchor or relational
/// declaration and returns the declared tolerance (0 when absent).
///
/// Unknown keys are deliberately left alone; they are descriptive only.
///
/// # Errors
/// - `RuntimeError::TypeError` when `tolerance` or `confidence` is not
///   numeric.
/// - `RuntimeError::NegativeTolerance` / `ConfidenceOutOfRange` when the
///   values fall outside their allowed ranges.
pub fn check_metadata(metadata: &IndexMap<String, Value>, line: usize) -> EvalResult<f64> {
    let mut tolerance = 0.0;

    if let Some(value) = metadata.get("tolerance") {
        tolerance = metadata_number("tolerance", value, line)?;
        if tolerance < 0.0 {
            return Err(RuntimeError::NegativeTolerance { line });
        }
    }

    if let Some(value) = metadata.get("confidence") {
        let confidence = metadata_number("confidence", value, line)?;
        if !(0.0..=1.0).contains(&confidence) {
            return Err(RuntimeError::ConfidenceOutOfRange { line });
        }
    }

    Ok(tolerance)
}

/// Reads a metadata value as a number, reporting the key on mismatch.
fn metadata_number(key: &str, value: &Value, line: usize) -> EvalResult<f64> {
    match value {
        Value::Integer(_) | Value::Real(_) => value.as_number(line)?.as_real(line),
        _ => Err(RuntimeError::TypeError { details: format!("Metadata key '{key}' must be a number"),
                                           line }),
    }
}
