use std::rc::Rc;

use crate::{
    ast::{Constant, Position, StructDef, Type, VariantDef},
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64 bit signed integer value.
    Int(i64),
    /// A double precision floating-point value.
    Float(f64),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators (`<`, `==`, `!=`, etc.) or logical
    /// operations (`not`). Used as the condition of `if` and `while`
    /// statements, where the condition must evaluate to `Bool`.
    Bool(bool),
    /// A string value.
    Str(String),
    /// An anonymous struct produced by a `{ a, b, c }` initializer.
    /// It carries field values in order but is not yet bound to any
    /// struct definition.
    Struct(Vec<Self>),
    /// A struct value bound to a registered struct definition.
    NamedStruct(NamedStructObj),
    /// A value bound to a variant type, active in exactly one member type.
    Variant(VariantObj),
}

/// An ordered sequence of field values tied to a struct definition.
///
/// Field names, types and order are looked up through the shared definition
/// rather than duplicated into every value.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedStructObj {
    /// The definition this struct value was validated against.
    pub definition: Rc<StructDef>,
    /// Field values, in the order the definition declares them.
    pub values:     Vec<Value>,
}

/// A value held by a variant-typed variable.
///
/// The wrapped value always matches `active`, which is one of the member
/// types of the definition.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantObj {
    /// The variant definition this value was bound against.
    pub definition: Rc<VariantDef>,
    /// The member type the value is currently active in.
    pub active:     Type,
    /// The wrapped value itself.
    pub value:      Box<Value>,
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<&Constant> for Value {
    fn from(constant: &Constant) -> Self {
        match constant {
            Constant::Int(v) => Self::Int(*v),
            Constant::Float(v) => Self::Float(*v),
            Constant::Bool(v) => Self::Bool(*v),
            Constant::Str(v) => Self::Str(v.clone()),
        }
    }
}

impl Value {
    /// Returns the type this value has at runtime, if it has a nameable one.
    ///
    /// A variant value answers with its *active member* type, so `is` checks
    /// and re-binding see through the wrapper. Anonymous structs have no
    /// nameable type and return `None`.
    ///
    /// # Example
    /// ```
    /// use strukta::{ast::Type, interpreter::value::Value};
    ///
    /// assert_eq!(Value::Int(3).runtime_type(), Some(Type::Int));
    /// assert_eq!(Value::Struct(vec![]).runtime_type(), None);
    /// ```
    #[must_use]
    pub fn runtime_type(&self) -> Option<Type> {
        match self {
            Self::Int(_) => Some(Type::Int),
            Self::Float(_) => Some(Type::Float),
            Self::Bool(_) => Some(Type::Bool),
            Self::Str(_) => Some(Type::Str),
            Self::Struct(_) => None,
            Self::NamedStruct(s) => Some(Type::Named(s.definition.name.clone())),
            Self::Variant(v) => Some(v.active.clone()),
        }
    }

    /// Describes the kind of this value for error messages.
    ///
    /// Unlike [`Self::runtime_type`], a variant value is described by its
    /// definition name, not its active member.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Int(_) => "INT".to_string(),
            Self::Float(_) => "FLOAT".to_string(),
            Self::Bool(_) => "BOOL".to_string(),
            Self::Str(_) => "STR".to_string(),
            Self::Struct(_) => "Anonymous struct".to_string(),
            Self::NamedStruct(s) => format!("Struct {}", s.definition.name),
            Self::Variant(v) => format!("Variant {}", v.definition.name),
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for `if`/`while` conditions and logical operations.
    ///
    /// # Parameters
    /// - `position`: Source position for error reporting.
    ///
    /// # Returns
    /// - `Ok(bool)`: The boolean value.
    /// - `Err(RuntimeError::TypeMismatch)`: If not boolean.
    pub fn as_bool(&self, position: Position) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(RuntimeError::TypeMismatch { expected: "BOOL".to_string(),
                                                      actual:   other.describe(),
                                                      position }),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
            Self::Struct(values) => {
                write!(f, "{{")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "}}")
            },
            Self::NamedStruct(s) => {
                write!(f, "{} {{", s.definition.name)?;
                for (i, value) in s.values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {value}", s.definition.fields[i].name)?;
                }
                write!(f, "}}")
            },
            Self::Variant(v) => write!(f, "{}", v.value),
        }
    }
}
