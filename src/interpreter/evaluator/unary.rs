use std::io::Write;

use crate::{
    ast::{Expression, Position, Type, UnaryOperator},
    error::RuntimeError,
    interpreter::{evaluator::core::{Context, EvalResult},
                  value::Value},
};

impl<W: Write> Context<W> {
    /// Evaluates a unary operation.
    ///
    /// Sign change requires a numeric operand, logical negation a BOOL one.
    pub(crate) fn eval_unary(&mut self,
                             op: UnaryOperator,
                             expr: &Expression,
                             position: Position)
                             -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => self.eval_negation(expr, position),
            UnaryOperator::Not => {
                let value = self.eval_value(expr)?.as_bool(expr.position())?;
                Ok(Value::Bool(!value))
            },
        }
    }

    fn eval_negation(&mut self, expr: &Expression, position: Position) -> EvalResult<Value> {
        match self.eval_value(expr)? {
            Value::Int(value) => value.checked_neg()
                                      .map(Value::Int)
                                      .ok_or(RuntimeError::Overflow { position }),
            Value::Float(value) => Ok(Value::Float(-value)),
            value => Err(RuntimeError::TypeMismatch { expected: Type::Int.to_string(),
                                                      actual:   value.describe(),
                                                      position, }),
        }
    }

    /// Evaluates an `as` conversion.
    ///
    /// A variant operand is unwrapped to its active value first, and a
    /// conversion to the value's own runtime type is the identity. Together
    /// those make `as` the variant extraction operator: `v as int` yields
    /// the INT inside `v`, `v as P` the struct member. Beyond identity the
    /// defined pairings are INT to FLOAT, FLOAT to INT (truncating), and
    /// INT, FLOAT or BOOL to STR. Every other pairing is an
    /// `InvalidTypeConversion`.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub(crate) fn eval_conversion(&mut self,
                                  expr: &Expression,
                                  target: &Type,
                                  position: Position)
                                  -> EvalResult<Value> {
        let mut value = self.eval_value(expr)?;
        if let Value::Variant(variant) = value {
            value = *variant.value;
        }
        if value.runtime_type().as_ref() == Some(target) {
            return Ok(value);
        }

        let converted = match (&value, target) {
            (Value::Int(i), Type::Float) => Value::Float(*i as f64),
            (Value::Float(f), Type::Int) => Value::Int(*f as i64),
            (Value::Int(i), Type::Str) => Value::Str(i.to_string()),
            (Value::Float(f), Type::Str) => Value::Str(f.to_string()),
            (Value::Bool(b), Type::Str) => Value::Str(b.to_string()),
            _ => {
                return Err(RuntimeError::InvalidTypeConversion { from: value.describe(),
                                                                 to:   target.to_string(),
                                                                 position })
            },
        };
        Ok(converted)
    }

    /// Evaluates an `is` type check.
    ///
    /// The operand's runtime type must equal the named type exactly. A
    /// variant is transparent: the check sees its active member. Anonymous
    /// structs have no nameable type, so every check on one is `false`.
    /// `is` never raises a type error.
    pub(crate) fn eval_type_check(&mut self,
                                  expr: &Expression,
                                  target: &Type)
                                  -> EvalResult<Value> {
        let value = self.eval_value(expr)?;
        let matches = value.runtime_type().is_some_and(|t| t == *target);
        Ok(Value::Bool(matches))
    }
}
