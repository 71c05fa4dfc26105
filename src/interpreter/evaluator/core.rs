use std::rc::Rc;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        value::{anchor::Anchor, core::Value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the single flat environment
/// shared by every statement, including `when` bodies. A `Context` is
/// created once per interpreter instance and owns nothing process-wide, so
/// multiple interpreters can coexist.
pub struct Context {
    /// The binding store for variables, anchors, and relational values.
    pub environment: Environment,
}

#[allow(clippy::new_without_default)]
impl Context {
    /// Creates a new evaluation context with an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self { environment: Environment::new(), }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Expressions
    /// never mutate the environment; only statements do.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The computed [`Value`].
    ///
    /// # Errors
    /// Propagates name lookup failures and arithmetic errors.
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Variable { name, line } => self.eval_variable(name, *line),
            Expr::BinaryOp { left, op, right, line } => {
                let lval = self.eval(left)?;
                let rval = self.eval(right)?;
                Self::eval_binary(*op, &lval, &rval, *line)
            },
        }
    }

    /// Looks up a binding by name.
    ///
    /// Scalars, anchors, and relational values share one namespace; whatever
    /// is bound under the name is returned as-is, and the caller branches on
    /// the kind where it matters.
    ///
    /// # Parameters
    /// - `name`: Binding name.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// Returns `RuntimeError::UnknownVariable` if the name is unbound.
    pub fn eval_variable(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.environment
            .lookup(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    /// Resolves a name that must be bound to an anchor.
    ///
    /// # Parameters
    /// - `name`: Anchor name.
    /// - `line`: Line number for error reporting.
    ///
    /// # Errors
    /// - `RuntimeError::UnknownAnchor` if the name is unbound.
    /// - `RuntimeError::NotAnAnchor` if the name is bound to something else.
    pub fn resolve_anchor(&self, name: &str, line: usize) -> EvalResult<Rc<Anchor>> {
        match self.environment.lookup(name) {
            Some(Value::Anchor(anchor)) => Ok(Rc::clone(anchor)),
            Some(_) => Err(RuntimeError::NotAnAnchor { name: name.to_string(),
                                                       line }),
            None => Err(RuntimeError::UnknownAnchor { name: name.to_string(),
                                                      line }),
        }
    }
}
