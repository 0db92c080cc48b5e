//! Typed view over parsed scene documents.
//!
//! Scene files are loosely shaped JSON. Instead of trusting the shape, every
//! accessor here answers two questions explicitly: does the key exist, and is
//! the value the kind we expect. Callers branch on the returned enums.

use serde_json::{Map, Number, Value};
use std::fmt;
use thiserror::Error;

/// Errors turning a parsed document into a [`SceneRecord`].
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Scene file must contain a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// A recognized scene field holds a value of the wrong JSON kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}' must be {expected}, found {found}")]
pub struct FieldTypeError {
    pub field: &'static str,
    pub expected: &'static str,
    pub found: &'static str,
}

/// One scene: a JSON object with recognized keys and arbitrary extras.
///
/// Borrows the parsed document, so the orchestrator can keep the original
/// value as the outcome snapshot without copying it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneRecord<'a> {
    root: &'a Value,
    fields: &'a Map<String, Value>,
}

/// A `duration` value that can be compared as seconds.
///
/// Booleans count as 0 and 1 seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationValue<'a> {
    Number(&'a Number),
    Boolean(bool),
}

/// State of the `elements` key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementsField<'a> {
    Absent,
    NotAList,
    List(&'a [Value]),
}

/// One entry of the `elements` sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementShape<'a> {
    Record(ElementRecord<'a>),
    NotARecord,
}

/// An element that is a JSON object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRecord<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> SceneRecord<'a> {
    /// Wrap a parsed document. The root must be an object.
    pub fn from_value(value: &'a Value) -> Result<Self, SceneError> {
        match value {
            Value::Object(fields) => Ok(SceneRecord { root: value, fields }),
            other => Err(SceneError::NotAnObject(kind_of(other))),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// `duration`, if present.
    pub fn duration(&self) -> Result<Option<DurationValue<'a>>, FieldTypeError> {
        match self.fields.get("duration") {
            None => Ok(None),
            Some(Value::Number(n)) => Ok(Some(DurationValue::Number(n))),
            Some(Value::Bool(b)) => Ok(Some(DurationValue::Boolean(*b))),
            Some(other) => Err(FieldTypeError {
                field: "duration",
                expected: "a number",
                found: kind_of(other),
            }),
        }
    }

    /// `name`, if present.
    pub fn name(&self) -> Result<Option<&'a str>, FieldTypeError> {
        match self.fields.get("name") {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldTypeError {
                field: "name",
                expected: "a string",
                found: kind_of(other),
            }),
        }
    }

    pub fn elements(&self) -> ElementsField<'a> {
        match self.fields.get("elements") {
            None => ElementsField::Absent,
            Some(Value::Array(items)) => ElementsField::List(items),
            Some(_) => ElementsField::NotAList,
        }
    }

    /// The whole document, for prompts.
    pub fn as_value(&self) -> &'a Value {
        self.root
    }
}

impl DurationValue<'_> {
    pub fn seconds(&self) -> Option<f64> {
        match self {
            DurationValue::Number(n) => n.as_f64(),
            DurationValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }
}

/// Prints the value as it reads in the scene file.
impl fmt::Display for DurationValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationValue::Number(n) => write!(f, "{}", n),
            DurationValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl<'a> ElementShape<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(fields) => ElementShape::Record(ElementRecord { fields }),
            _ => ElementShape::NotARecord,
        }
    }
}

impl<'a> ElementRecord<'a> {
    pub fn element_type(&self) -> Option<&'a Value> {
        self.fields.get("type")
    }

    pub fn has_id(&self) -> bool {
        self.fields.contains_key("id")
    }
}

/// Human name of a JSON value's kind, used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
