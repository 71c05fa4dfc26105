use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::{Number, Value},
    },
};

impl Context {
    /// Evaluates an arithmetic operation on two values.
    ///
    /// Integer operands stay integer for addition, subtraction, and
    /// multiplication (checked, so overflow is an error rather than a
    /// wrap). Division always yields a real, and mixing an integer with a
    /// real promotes the integer. Anchors and relational values contribute
    /// their numeric reading; strings and booleans are rejected.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed scalar.
    ///
    /// # Example
    /// ```
    /// use giant::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let x = Value::Integer(10);
    /// let y = Value::Integer(4);
    ///
    /// let sum = Context::eval_binary(BinaryOperator::Add, &x, &y, 1).unwrap();
    /// assert_eq!(sum, Value::Integer(14));
    ///
    /// // Division always yields a real.
    /// let quotient = Context::eval_binary(BinaryOperator::Div, &x, &y, 1).unwrap();
    /// assert_eq!(quotient, Value::Real(2.5));
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mul, Sub};

        let left = left.as_number(line)?;
        let right = right.as_number(line)?;

        if let (Number::Integer(a), Number::Integer(b)) = (left, right)
            && op != Div
        {
            let result = match op {
                Add => a.checked_add(b),
                Sub => a.checked_sub(b),
                Mul => a.checked_mul(b),
                Div => unreachable!(),
            };

            return result.map(Value::Integer)
                         .ok_or(RuntimeError::Overflow { line });
        }

        let a = left.as_real(line)?;
        let b = right.as_real(line)?;

        Ok(Value::Real(match op {
                           Add => a + b,
                           Sub => a - b,
                           Mul => a * b,
                           Div => {
                               if b == 0.0 {
                                   return Err(RuntimeError::DivisionByZero { line });
                               }
                               a / b
                           },
                       }))
    }
}
