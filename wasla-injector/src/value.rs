//! Dynamically shaped dependency values.
//!
//! The registry maps names to [`Value`]s — loaded modules, host-seeded
//! objects, primitives, or factories. Module files evaluate to `Value`s,
//! and everything the injector hands back is a `Value`.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::Result;

/// Type alias for factory functions.
///
/// A factory receives its already-resolved arguments and produces a value.
///
/// # Why `Arc` and not `Box`?
/// Factories are shared between the registry and every caller that
/// retrieved them; `Arc` allows cloning without copying the closure.
pub type FactoryFn = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// A shareable factory handle.
///
/// Two factories compare equal only when they share the same underlying
/// closure (pointer identity) — there is no structural equality for code.
#[derive(Clone)]
pub struct Factory(FactoryFn);

impl Factory {
    /// Wraps a closure as a factory.
    pub fn new(f: impl Fn(&[Value]) -> Result<Value> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invokes the factory with the given arguments.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.0)(args)
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Factory(..)")
    }
}

impl PartialEq for Factory {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A dependency value.
///
/// Maps preserve insertion order — wildcard fan-out and `find` results
/// must be deterministic across runs.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
    Factory(Factory),
}

impl Value {
    /// Human-readable variant name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Factory(_) => "factory",
        }
    }

    /// Host-style truthiness: `null`, `false`, `0`, `0.0` and `""` are
    /// falsy; every other value (including empty lists and maps) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) | Value::Factory(_) => true,
        }
    }

    /// Returns the string slice if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the elements if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a `Map`.
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the factory handle if this is a `Factory`.
    pub fn as_factory(&self) -> Option<&Factory> {
        match self {
            Value::Factory(factory) => Some(factory),
            _ => None,
        }
    }

    /// Looks up a field if this is a `Map`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_map().and_then(|entries| entries.get(field))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
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

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

impl From<Factory> for Value {
    fn from(factory: Factory) -> Self {
        Value::Factory(factory)
    }
}
