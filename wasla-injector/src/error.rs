//! Error types for Wasla injector operations.
//!
//! Wasla provides detailed, actionable error messages.
//! No more `ENOENT` three stack frames away from the spec that caused it.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for all injector operations.
#[derive(Debug, thiserror::Error)]
pub enum InjectorError {
    /// The specification value has an unsupported shape.
    #[error("{}", .0)]
    InvalidSpecification(InvalidSpecificationError),

    /// A file-path or package root does not exist on the filesystem.
    #[error("{}", .0)]
    PathNotFound(PathNotFoundError),

    /// Traversal failed below an existing root.
    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A module file could not be read.
    #[error("failed to read module {}: {source}", .path.display())]
    ModuleRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A module file failed to parse.
    #[error("{}", .0)]
    ModuleParse(ModuleParseError),

    /// A module file failed while evaluating.
    #[error("{}", .0)]
    ModuleEval(ModuleEvalError),

    /// A `find` pattern string did not compile.
    #[error("invalid find pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A host-supplied factory reported failure.
    #[error("factory {name:?} failed: {source}")]
    ConstructionFailed {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Error for specification values that are not specs at all.
///
/// Only strings, factories, and sequences of those describe dependencies.
#[derive(Debug)]
pub struct InvalidSpecificationError {
    /// Variant name of the offending value.
    pub type_name: &'static str,
}

impl fmt::Display for InvalidSpecificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dependency specification must be a string, a factory, or a sequence",
        )?;
        write!(f, "\n  Got: {}", self.type_name)?;
        write!(
            f,
            "\n  Hint: pass a package id, a file path, a `::pkg/path` or `::pkg::prop` spec, or a factory"
        )
    }
}

/// Error for specification roots that do not exist.
#[derive(Debug)]
pub struct PathNotFoundError {
    /// The resolved path that was probed.
    pub path: PathBuf,
}

impl fmt::Display for PathNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path does not exist: {}", self.path.display())?;
        write!(
            f,
            "\n  Hint: file-path specs resolve against the injector's base directory"
        )
    }
}

/// Error for modules that fail to parse.
#[derive(Debug)]
pub struct ModuleParseError {
    pub path: PathBuf,
    /// 1-based line of the offending token.
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ModuleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error in {} (line {}): {}",
            self.path.display(),
            self.line,
            self.message,
        )
    }
}

/// Error for modules that fail during evaluation.
///
/// The most common cause is a reference to a binding missing from the
/// injection context, so the message carries "did you mean?" suggestions.
#[derive(Debug)]
pub struct ModuleEvalError {
    pub path: PathBuf,
    pub message: String,
    /// Close matches among the bindings that ARE in context.
    pub suggestions: Vec<String>,
}

impl fmt::Display for ModuleEvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Eval error in {}: {}", self.path.display(), self.message)?;

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n    - {suggestion}")?;
            }
        }

        write!(
            f,
            "\n  Hint: modules can only reference injected bindings; there is no import"
        )
    }
}

/// Convenient Result type for injector operations.
pub type Result<T> = std::result::Result<T, InjectorError>;
