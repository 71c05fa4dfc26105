use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{core::Value, relational::Qualifier},
    },
};

impl Context {
    /// Decides whether a `when` condition holds.
    ///
    /// The subject has two valid kinds:
    ///
    /// - A relational value. If the reference anchor appears in its anchor
    ///   list, the cached snapshot is used; otherwise the name is resolved
    ///   in the environment and the qualifier is computed against that
    ///   anchor directly (the reference list only controls display).
    /// - A numeric scalar. The reference name is resolved in the
    ///   environment and must be an anchor.
    ///
    /// # Parameters
    /// - `subject`: The evaluated subject value.
    /// - `qualifier`: The quoted qualifier string from the source.
    /// - `reference`: Name of the reference anchor.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// Whether the body of the clause should run.
    ///
    /// # Errors
    /// - `RuntimeError::UnknownQualifier` for a qualifier other than
    ///   `over`, `under`, or `near`.
    /// - `RuntimeError::InvalidWhenSubject` when the subject is neither a
    ///   number nor a relational value.
    /// - Anchor resolution errors when the reference must be looked up.
    pub fn when_condition_holds(&self,
                                subject: &Value,
                                qualifier: &str,
                                reference: &str,
                                line: usize)
                                -> EvalResult<bool> {
        let qualifier = Qualifier::parse(qualifier, line)?;

        match subject {
            Value::Relational(relational) => {
                let value = relational.value.to_f64();

                if let Some(position) = relational.position_for(reference) {
                    return Ok(qualifier.holds(value, &position.anchor));
                }

                let anchor = self.resolve_anchor(reference, line)?;
                Ok(qualifier.holds(value, &anchor))
            },

            Value::Integer(_) | Value::Real(_) => {
                let value = subject.as_number(line)?.to_f64();
                let anchor = self.resolve_anchor(reference, line)?;
                Ok(qualifier.holds(value, &anchor))
            },

            _ => Err(RuntimeError::InvalidWhenSubject { line }),
        }
    }
}
