//! Nested property access over loaded values.
//!
//! Property-path specs drill into an already-resolved dependency with a
//! dotted path (`routes.api`), optionally indexing along the way
//! (`servers[0].port`). Absence is a first-class outcome, not an error:
//! a missing field, a malformed segment, or an out-of-range index makes
//! the whole lookup absent, and the remaining segments are no-ops.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::value::Value;

static SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)(?:\[(\d*)\])?").unwrap());

/// Resolves `dot_path` against `root`.
///
/// The empty path returns `root` unchanged. Empty segments (`a..b`) are
/// skipped. Each segment is a field name with an optional `[index]`
/// suffix; the index is only followed when the field's value is truthy,
/// mirroring the engine's silently-stop-descending policy.
pub fn nested(root: &Value, dot_path: &str) -> Option<Value> {
    let mut current = root.clone();

    for segment in dot_path.split('.') {
        if segment.is_empty() {
            continue;
        }

        let caps = SEGMENT_RE.captures(segment)?;
        let field = &caps[1];

        current = match &current {
            Value::Map(entries) => entries.get(field).cloned()?,
            _ => return None,
        };

        if let Some(index) = caps.get(2) {
            if current.is_truthy() {
                current = index_into(&current, index.as_str())?;
            }
        }
    }

    Some(current)
}

/// The own properties of a value, in deterministic order.
///
/// Maps enumerate their entries in insertion order; lists enumerate
/// their indices in decimal. Scalars have no own properties.
pub(crate) fn own_properties(value: &Value) -> Vec<(String, Value)> {
    match value {
        Value::Map(entries) => entries
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect(),
        Value::List(items) => items
            .iter()
            .enumerate()
            .map(|(i, value)| (i.to_string(), value.clone()))
            .collect(),
        _ => Vec::new(),
    }
}

fn index_into(value: &Value, digits: &str) -> Option<Value> {
    // An empty `[]` suffix indexes nothing.
    let index: usize = digits.parse().ok()?;
    match value {
        Value::List(items) => items.get(index).cloned(),
        _ => None,
    }
}
