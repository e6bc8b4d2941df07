use std::{io::Write, rc::Rc};

use crate::{
    ast::{Position, StructDef, Type, VariantDef},
    error::RuntimeError,
    interpreter::{evaluator::core::{Context, EvalResult},
                  value::{NamedStructObj, Value, VariantObj}},
};

impl<W: Write> Context<W> {
    /// Validates a value against a declared type and produces the value to
    /// store.
    ///
    /// Primitives must match their kind exactly. For a declared struct type
    /// an anonymous struct is checked field by field and rewrapped as a
    /// named struct. For a declared variant type the value's type must equal
    /// exactly one member type and the value is wrapped into a variant.
    ///
    /// A variant operand is transparent: binding starts from its active
    /// value, which a variant target rewraps afterwards. Used on every
    /// variable definition, assignment, argument binding and returned value.
    pub(crate) fn bind_value(&self,
                             value: Value,
                             declared: &Type,
                             position: Position)
                             -> EvalResult<Value> {
        let value = match value {
            Value::Variant(variant) => *variant.value,
            other => other,
        };

        match declared {
            Type::Int if matches!(value, Value::Int(_)) => Ok(value),
            Type::Float if matches!(value, Value::Float(_)) => Ok(value),
            Type::Bool if matches!(value, Value::Bool(_)) => Ok(value),
            Type::Str if matches!(value, Value::Str(_)) => Ok(value),
            Type::Named(name) => self.bind_named(value, name, position),
            _ => Err(RuntimeError::TypeMismatch { expected: declared.to_string(),
                                                  actual:   value.describe(),
                                                  position, }),
        }
    }

    /// A user type name resolves to either a struct or a variant definition.
    fn bind_named(&self, value: Value, name: &str, position: Position) -> EvalResult<Value> {
        if let Some(def) = self.structs.get(name) {
            return self.bind_struct(value, def, position);
        }
        if let Some(def) = self.variants.get(name) {
            return self.bind_variant(value, def, position);
        }
        Err(RuntimeError::SymbolNotFound { kind: "Type",
                                           name: name.to_string(),
                                           position })
    }

    /// An anonymous struct binds by validating field count and then each
    /// field against the definition in order. A value already carrying the
    /// same definition passes through unchanged.
    fn bind_struct(&self,
                   value: Value,
                   def: &Rc<StructDef>,
                   position: Position)
                   -> EvalResult<Value> {
        match value {
            Value::NamedStruct(ref obj) if obj.definition.name == def.name => Ok(value),
            Value::Struct(values) => {
                if values.len() != def.fields.len() {
                    return Err(RuntimeError::InvalidFieldCount { expected: def.fields.len(),
                                                                 actual:   values.len(),
                                                                 position, });
                }

                let mut bound = Vec::with_capacity(values.len());
                for (value, field) in values.into_iter().zip(&def.fields) {
                    bound.push(self.bind_value(value, &field.declared_type, position)?);
                }
                Ok(Value::NamedStruct(NamedStructObj { definition: Rc::clone(def),
                                                       values:     bound, }))
            },
            _ => Err(RuntimeError::TypeMismatch { expected: def.name.clone(),
                                                  actual:   value.describe(),
                                                  position, }),
        }
    }

    /// A value binds to a variant when its runtime type equals exactly one
    /// member type. A member list with duplicates can never bind the
    /// duplicated member.
    fn bind_variant(&self,
                    value: Value,
                    def: &Rc<VariantDef>,
                    position: Position)
                    -> EvalResult<Value> {
        let runtime = value.runtime_type();
        let mut members = def.types.iter().filter(|t| runtime.as_ref() == Some(*t));

        match (members.next(), members.next()) {
            (Some(active), None) => Ok(Value::Variant(VariantObj { definition: Rc::clone(def),
                                                                   active:     active.clone(),
                                                                   value:      Box::new(value), })),
            _ => Err(RuntimeError::TypeMismatch { expected: def.name.clone(),
                                                  actual:   value.describe(),
                                                  position, }),
        }
    }
}
