use std::rc::Rc;

use indexmap::IndexMap;

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            anchor::{Anchor, check_metadata},
            core::Value,
            relational::Relational,
        },
    },
};

impl Context {
    /// Executes a single statement.
    ///
    /// Statements run strictly in source order; each one either updates the
    /// environment, appends to the output sink, or both. An error aborts the
    /// statement (including the rest of a `when` body) but any output or
    /// bindings already produced stay in place.
    ///
    /// # Parameters
    /// - `statement`: Statement to execute.
    /// - `out`: Output sink; `Print` and the anchor queries append complete
    ///   lines to it.
    ///
    /// # Errors
    /// Any `RuntimeError` raised while evaluating the statement.
    pub fn eval_statement(&mut self, statement: &Statement, out: &mut String) -> EvalResult<()> {
        match statement {
            Statement::Assign { name, value, .. } => {
                let value = self.eval(value)?;
                self.environment.bind(name, value);
                Ok(())
            },

            Statement::Print { expr, .. } => {
                let value = self.eval(expr)?;
                out.push_str(&value.to_string());
                out.push('\n');
                Ok(())
            },

            Statement::AnchorDecl { name,
                                    value,
                                    metadata,
                                    line, } => self.eval_anchor_decl(name, value, metadata, *line),

            Statement::RelationalDecl { name,
                                        value,
                                        anchors,
                                        metadata,
                                        line, } => {
                self.eval_relational_decl(name, value, anchors, metadata, *line)
            },

            Statement::ListAnchors { .. } => {
                for anchor in self.environment.iter_anchors() {
                    out.push_str(&anchor.to_string());
                    out.push('\n');
                }
                Ok(())
            },

            Statement::DescribeAnchor { name, line } => {
                let anchor = self.resolve_anchor(name, *line)?;
                out.push_str(&anchor.to_string());
                out.push('\n');
                Ok(())
            },

            Statement::When { subject,
                              qualifier,
                              reference,
                              body,
                              line, } => {
                let subject = self.eval(subject)?;

                if self.when_condition_holds(&subject, qualifier, reference, *line)? {
                    for statement in body {
                        self.eval_statement(statement, out)?;
                    }
                }
                Ok(())
            },
        }
    }

    /// Creates and binds an anchor.
    ///
    /// The value expression must yield a number. Re-declaring an existing
    /// anchor name rebinds it, consistent with variable re-binding.
    fn eval_anchor_decl(&mut self,
                        name: &str,
                        value: &Expr,
                        metadata: &[(String, Expr)],
                        line: usize)
                        -> EvalResult<()> {
        let value = self.eval(value)?.as_number(line)?;
        let metadata = self.eval_metadata(metadata, line)?;
        let anchor = Anchor::new(name.to_string(), value, metadata, line)?;

        self.environment.bind(name, Value::Anchor(Rc::new(anchor)));
        Ok(())
    }

    /// Creates and binds a relational value.
    ///
    /// Every referenced anchor must exist and be an anchor binding; offsets
    /// and qualifiers are snapshotted here, so later re-declarations of the
    /// anchors do not disturb this value.
    fn eval_relational_decl(&mut self,
                            name: &str,
                            value: &Expr,
                            anchors: &[String],
                            metadata: &[(String, Expr)],
                            line: usize)
                            -> EvalResult<()> {
        let value = self.eval(value)?.as_number(line)?;

        let mut resolved = Vec::with_capacity(anchors.len());
        for anchor_name in anchors {
            resolved.push(self.resolve_anchor(anchor_name, line)?);
        }

        let metadata = self.eval_metadata(metadata, line)?;
        check_metadata(&metadata, line)?;

        let relational = Relational::new(value, resolved, metadata);
        self.environment
            .bind(name, Value::Relational(Rc::new(relational)));
        Ok(())
    }

    /// Evaluates metadata entries into a value map, preserving declaration
    /// order. A duplicate key keeps its first position but takes the last
    /// value. Metadata values must be scalars.
    fn eval_metadata(&self,
                     metadata: &[(String, Expr)],
                     line: usize)
                     -> EvalResult<IndexMap<String, Value>> {
        let mut evaluated = IndexMap::with_capacity(metadata.len());

        for (key, expr) in metadata {
            let value = self.eval(expr)?;

            if !value.is_scalar() {
                return Err(RuntimeError::TypeError { details: format!("Metadata key '{key}' must be a scalar value"),
                                                     line });
            }

            evaluated.insert(key.clone(), value);
        }

        Ok(evaluated)
    }
}
