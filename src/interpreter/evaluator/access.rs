use std::{io::Write, rc::Rc};

use crate::{
    ast::{Expression, LValue, Position},
    error::RuntimeError,
    interpreter::{evaluator::core::{Context, EvalResult},
                  value::{NamedStructObj, Value}},
};

impl<W: Write> Context<W> {
    /// Evaluates a field access expression.
    ///
    /// The base must evaluate to a named struct; the field name is resolved
    /// against that struct's definition.
    pub(crate) fn eval_field_access(&mut self,
                                    base: &Expression,
                                    field: &str,
                                    position: Position)
                                    -> EvalResult<Value> {
        let obj = match self.eval_value(base)? {
            Value::NamedStruct(obj) => obj,
            value => {
                return Err(RuntimeError::TypeMismatch { expected: "Struct".to_string(),
                                                        actual:   value.describe(),
                                                        position, })
            },
        };

        let index = obj.definition
                       .field_index(field)
                       .ok_or_else(|| RuntimeError::InvalidField { field: field.to_string(),
                                                                   position })?;
        Ok(obj.values[index].clone())
    }

    /// Assigns a value through an lvalue.
    ///
    /// A plain name rebinds the variable's slot; a field chain writes into
    /// the named struct stored in it. Either way the value is validated
    /// against the declared type of the written location.
    pub(crate) fn assign_lvalue(&mut self,
                                target: &LValue,
                                value: Value,
                                position: Position)
                                -> EvalResult<()> {
        match target {
            LValue::Variable(name) => self.assign_variable(name, value, position),
            LValue::Field { base, field } => self.assign_field(base, field, value, position),
        }
    }

    fn assign_variable(&mut self, name: &str, value: Value, position: Position) -> EvalResult<()> {
        let Some(variable) = self.get_variable(name) else {
            return Err(RuntimeError::SymbolNotFound { kind: "Variable",
                                                      name: name.to_string(),
                                                      position });
        };
        let declared = variable.declared.clone();
        let slot = Rc::clone(&variable.slot);

        let bound = self.bind_value(value, &declared, position)?;
        *slot.borrow_mut() = bound;
        Ok(())
    }

    /// Writes into a field chain rooted in a variable.
    ///
    /// The chain is walked through the stored value; every intermediate step
    /// must be a named struct. The written value is validated against the
    /// target field's declared type.
    fn assign_field(&mut self,
                    base: &LValue,
                    field: &str,
                    value: Value,
                    position: Position)
                    -> EvalResult<()> {
        let mut path = vec![field];
        let mut current = base;
        let name = loop {
            match current {
                LValue::Variable(name) => break name,
                LValue::Field { base, field } => {
                    path.push(field.as_str());
                    current = base;
                },
            }
        };
        path.reverse();

        let Some(variable) = self.get_variable(name) else {
            return Err(RuntimeError::SymbolNotFound { kind: "Variable",
                                                      name: name.clone(),
                                                      position });
        };
        let slot = Rc::clone(&variable.slot);
        let mut stored = slot.borrow_mut();

        let (last, steps) = path.split_last().expect("chain carries the assigned field");
        let mut target = &mut *stored;
        for step in steps {
            target = field_slot(target, step, position)?;
        }

        let obj = as_named_struct(target, position)?;
        let index = obj.definition
                       .field_index(last)
                       .ok_or_else(|| RuntimeError::InvalidField { field: (*last).to_string(),
                                                                   position })?;
        let declared = obj.definition.fields[index].declared_type.clone();

        let bound = self.bind_value(value, &declared, position)?;
        obj.values[index] = bound;
        Ok(())
    }
}

/// Resolves one step of a field chain to that field's storage.
fn field_slot<'a>(value: &'a mut Value,
                  field: &str,
                  position: Position)
                  -> EvalResult<&'a mut Value> {
    let obj = as_named_struct(value, position)?;
    let index = obj.definition
                   .field_index(field)
                   .ok_or_else(|| RuntimeError::InvalidField { field: field.to_string(),
                                                               position })?;
    Ok(&mut obj.values[index])
}

fn as_named_struct(value: &mut Value, position: Position) -> EvalResult<&mut NamedStructObj> {
    match value {
        Value::NamedStruct(obj) => Ok(obj),
        other => Err(RuntimeError::TypeMismatch { expected: "Struct".to_string(),
                                                  actual:   other.describe(),
                                                  position, }),
    }
}
