//! Sandboxed module loading.
//!
//! A module file is executed against an explicit injection context and
//! nothing else. The context is assembled from three layers, later
//! layers shadowing earlier ones:
//!
//! 1. host globals configured on the injector, with the module-system
//!    primitives (`require`, `module`, `global`) unconditionally
//!    withheld — loaded code declares its needs purely through names
//!    the registry resolves;
//! 2. a snapshot of the registry at the moment of this load;
//! 3. the synthetic bindings `__dirname` and `__filename`.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{InjectorError, ModuleEvalError, ModuleParseError, Result};
use crate::script::{self, ScriptError};
use crate::value::Value;

/// Bindings never exposed to loaded code, even if a host global
/// supplies them.
pub(crate) const RESERVED_BINDINGS: [&str; 3] = ["require", "module", "global"];

/// Reads and evaluates the module at `path`, returning its export.
///
/// Parse and evaluation errors propagate to the caller unchanged —
/// never caught, never retried.
pub(crate) fn load(
    path: &Path,
    globals: &IndexMap<String, Value>,
    snapshot: IndexMap<String, Value>,
) -> Result<Value> {
    let source = fs::read_to_string(path).map_err(|source| InjectorError::ModuleRead {
        path: path.to_path_buf(),
        source,
    })?;

    let context = build_context(path, globals, snapshot);
    debug!(
        file = %path.display(),
        bindings = context.len(),
        "Loading module",
    );

    script::eval_module(&source, &context).map_err(|err| match err {
        ScriptError::Parse { line, message } => {
            InjectorError::ModuleParse(ModuleParseError {
                path: path.to_path_buf(),
                line,
                message,
            })
        }
        ScriptError::Eval {
            message,
            suggestions,
        } => InjectorError::ModuleEval(ModuleEvalError {
            path: path.to_path_buf(),
            message,
            suggestions,
        }),
    })
}

fn build_context(
    path: &Path,
    globals: &IndexMap<String, Value>,
    snapshot: IndexMap<String, Value>,
) -> IndexMap<String, Value> {
    let mut context = IndexMap::new();

    for (name, value) in globals {
        if RESERVED_BINDINGS.contains(&name.as_str()) {
            continue;
        }
        context.insert(name.clone(), value.clone());
    }

    context.extend(snapshot);

    let dirname = path
        .parent()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();
    context.insert("__dirname".to_string(), Value::Str(dirname));
    context.insert(
        "__filename".to_string(),
        Value::Str(path.display().to_string()),
    );

    context
}
