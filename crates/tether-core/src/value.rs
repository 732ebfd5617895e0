#![forbid(unsafe_code)]

//! Tagged property values and synchronizability classification.
//!
//! # Design
//!
//! [`Value`] is a closed sum type covering every shape a property can hold.
//! Classification questions ("can this be registered?", "can this be
//! linked?") are answered by matching on the tag, never by downcasting or
//! reflection.
//!
//! Only scalar kinds — strings and numbers — are eligible for live
//! forwarding. A scalar has no identity distinct from its value, so
//! forwarding it cannot alias shared structure; composite kinds would leave
//! deep-vs-shallow semantics undefined and are refused by the linker.

use std::fmt;

use crate::object::SyncObject;

/// A dynamically-kinded property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 text.
    Str(String),
    /// Double-precision number.
    Num(f64),
    /// Boolean flag.
    Bool(bool),
    /// Ordered list of values.
    List(Vec<Value>),
    /// A shared object handle. Equality is reference identity.
    Object(SyncObject),
    /// The absent value.
    Null,
}

/// The kind of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Str,
    Num,
    Bool,
    List,
    Object,
    Null,
}

impl Value {
    /// The kind tag for this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Str(_) => ValueKind::Str,
            Value::Num(_) => ValueKind::Num,
            Value::Bool(_) => ValueKind::Bool,
            Value::List(_) => ValueKind::List,
            Value::Object(_) => ValueKind::Object,
            Value::Null => ValueKind::Null,
        }
    }

    /// True when this value may participate in a live binding.
    ///
    /// Scalar kinds only: strings and numbers.
    #[must_use]
    pub fn is_synchronizable(&self) -> bool {
        matches!(self.kind(), ValueKind::Str | ValueKind::Num)
    }

    /// True when this value can carry an identity in a registry.
    ///
    /// Only structured objects qualify. The enum has no callable variant,
    /// so "not a function" holds by construction.
    #[must_use]
    pub fn is_registerable(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Borrow the object handle, if this is an object value.
    #[must_use]
    pub fn as_object(&self) -> Option<&SyncObject> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Borrow the string payload, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Copy the numeric payload, if this is a number value.
    #[must_use]
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Str => "string",
            ValueKind::Num => "number",
            ValueKind::Bool => "boolean",
            ValueKind::List => "list",
            ValueKind::Object => "object",
            ValueKind::Null => "null",
        };
        f.write_str(name)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Num(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<SyncObject> for Value {
    fn from(obj: SyncObject) -> Self {
        Value::Object(obj)
    }
}
