use std::{cmp::Ordering, io::Write};

use crate::{
    ast::{BinaryOperator, Expression, Position, Type},
    error::RuntimeError,
    interpreter::{evaluator::core::{Context, EvalResult},
                  value::Value},
};

impl<W: Write> Context<W> {
    /// Evaluates a binary operation.
    ///
    /// `or` and `and` short-circuit: the right operand is evaluated only when
    /// the left side does not already decide the result. All other operators
    /// evaluate both sides eagerly.
    pub(crate) fn eval_binary(&mut self,
                              left: &Expression,
                              op: BinaryOperator,
                              right: &Expression,
                              position: Position)
                              -> EvalResult<Value> {
        match op {
            BinaryOperator::Or => self.eval_disjunction(left, right),
            BinaryOperator::And => self.eval_conjunction(left, right),
            BinaryOperator::Equal | BinaryOperator::NotEqual => {
                self.eval_equality(op, left, right, position)
            },
            BinaryOperator::Less
            | BinaryOperator::LessEqual
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEqual => self.eval_relation(op, left, right, position),
            BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide => self.eval_arithmetic(op, left, right, position),
        }
    }

    /// Both operands must be BOOL; the violation is reported for whichever
    /// side was actually evaluated.
    fn eval_disjunction(&mut self, left: &Expression, right: &Expression) -> EvalResult<Value> {
        if self.eval_condition(left)? {
            return Ok(Value::Bool(true));
        }
        Ok(Value::Bool(self.eval_condition(right)?))
    }

    fn eval_conjunction(&mut self, left: &Expression, right: &Expression) -> EvalResult<Value> {
        if !self.eval_condition(left)? {
            return Ok(Value::Bool(false));
        }
        Ok(Value::Bool(self.eval_condition(right)?))
    }

    /// Equality is defined for primitives of the same kind only.
    #[allow(clippy::float_cmp)]
    fn eval_equality(&mut self,
                     op: BinaryOperator,
                     left: &Expression,
                     right: &Expression,
                     position: Position)
                     -> EvalResult<Value> {
        let lhs = self.eval_value(left)?;
        let rhs = self.eval_value(right)?;

        let equal = match (&lhs, &rhs) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => {
                return Err(RuntimeError::TypeMismatch { expected: lhs.describe(),
                                                        actual:   rhs.describe(),
                                                        position, })
            },
        };

        if op == BinaryOperator::Equal {
            Ok(Value::Bool(equal))
        } else {
            Ok(Value::Bool(!equal))
        }
    }

    /// Ordering comparisons accept INT/INT or FLOAT/FLOAT operands.
    fn eval_relation(&mut self,
                     op: BinaryOperator,
                     left: &Expression,
                     right: &Expression,
                     position: Position)
                     -> EvalResult<Value> {
        let lhs = self.eval_value(left)?;
        let rhs = self.eval_value(right)?;

        let holds = match (&lhs, &rhs) {
            (Value::Int(a), Value::Int(b)) => relation_holds(op, a.partial_cmp(b)),
            (Value::Float(a), Value::Float(b)) => relation_holds(op, a.partial_cmp(b)),
            _ => return Err(numeric_mismatch(&lhs, &rhs, position)),
        };
        Ok(Value::Bool(holds))
    }

    /// Arithmetic accepts INT/INT or FLOAT/FLOAT operands; kinds never mix
    /// implicitly. Integer operations are overflow-checked and integer
    /// division by zero is an error, while float division follows IEEE 754.
    fn eval_arithmetic(&mut self,
                       op: BinaryOperator,
                       left: &Expression,
                       right: &Expression,
                       position: Position)
                       -> EvalResult<Value> {
        let lhs = self.eval_value(left)?;
        let rhs = self.eval_value(right)?;

        match (&lhs, &rhs) {
            (Value::Int(a), Value::Int(b)) => int_arithmetic(op, *a, *b, position),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(float_arithmetic(op, *a, *b))),
            _ => Err(numeric_mismatch(&lhs, &rhs, position)),
        }
    }
}

/// Decides whether an ordering operator holds for the comparison outcome.
/// An incomparable pair (a NaN operand) satisfies no ordering operator.
const fn relation_holds(op: BinaryOperator, ordering: Option<Ordering>) -> bool {
    matches!((op, ordering),
             (BinaryOperator::Less, Some(Ordering::Less))
             | (BinaryOperator::LessEqual, Some(Ordering::Less | Ordering::Equal))
             | (BinaryOperator::Greater, Some(Ordering::Greater))
             | (BinaryOperator::GreaterEqual, Some(Ordering::Greater | Ordering::Equal)))
}

fn int_arithmetic(op: BinaryOperator, a: i64, b: i64, position: Position) -> EvalResult<Value> {
    if op == BinaryOperator::Divide && b == 0 {
        return Err(RuntimeError::DivisionByZero { position });
    }
    let result = match op {
        BinaryOperator::Add => a.checked_add(b),
        BinaryOperator::Subtract => a.checked_sub(b),
        BinaryOperator::Multiply => a.checked_mul(b),
        _ => a.checked_div(b),
    };
    result.map(Value::Int)
          .ok_or(RuntimeError::Overflow { position })
}

fn float_arithmetic(op: BinaryOperator, a: f64, b: f64) -> f64 {
    match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Subtract => a - b,
        BinaryOperator::Multiply => a * b,
        _ => a / b,
    }
}

/// Reports a non-numeric or mixed-kind operand pair.
///
/// When the left side is not numeric the error names INT as the expected
/// kind; otherwise the right side failed to match the left side's kind.
fn numeric_mismatch(lhs: &Value, rhs: &Value, position: Position) -> RuntimeError {
    if matches!(lhs, Value::Int(_) | Value::Float(_)) {
        RuntimeError::TypeMismatch { expected: lhs.describe(),
                                     actual:   rhs.describe(),
                                     position, }
    } else {
        RuntimeError::TypeMismatch { expected: Type::Int.to_string(),
                                     actual:   lhs.describe(),
                                     position, }
    }
}
