//! Dependency specifications.
//!
//! A [`Spec`] describes what to resolve: a text spec in one of four
//! grammars, a ready-made factory, or a sequence combining both. Text
//! specs are classified exactly once, into a [`TextKind`], instead of
//! being re-matched at every dispatch site.
//!
//! # Text grammars
//! ```text
//! logger                   package id           (^\w+$)
//! ./modules  /srv/app/mod  file path            (leading /, ./ or ../)
//! ::webkit/./lib           package-relative     (::pkg/relative)
//! ::webkit::routes.api.*   package property     (::pkg::dot.path, optional .*)
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::value::{Factory, Value};

static PACKAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+$").unwrap());

static FILE_PATH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/|\./|\.\./)").unwrap());

static PACKAGE_RELATIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^::([~\w.-]+)/((\.|\w).*)$").unwrap());

static PACKAGE_PROPERTY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^::([~\w.-]+)::(\w+(?:\.\w+)*)(\.\*)?$").unwrap());

/// A specification of a dependency to retrieve or load.
#[derive(Debug, Clone)]
pub enum Spec {
    /// A text spec, classified further by [`classify`].
    Text(String),
    /// A ready-made factory — returned as-is, no resolution.
    Factory(Factory),
    /// Argument specs followed by a factory. Documented extension point:
    /// currently inert, resolution yields nothing.
    Seq(Vec<Spec>),
    /// Produced when converting a value that cannot describe a
    /// dependency; carries the offending type name.
    Invalid(&'static str),
}

impl From<&str> for Spec {
    fn from(text: &str) -> Self {
        Spec::Text(text.to_string())
    }
}

impl From<String> for Spec {
    fn from(text: String) -> Self {
        Spec::Text(text)
    }
}

impl From<Factory> for Spec {
    fn from(factory: Factory) -> Self {
        Spec::Factory(factory)
    }
}

impl From<Value> for Spec {
    fn from(value: Value) -> Self {
        match value {
            Value::Str(text) => Spec::Text(text),
            Value::Factory(factory) => Spec::Factory(factory),
            Value::List(items) => Spec::Seq(items.into_iter().map(Spec::from).collect()),
            other => Spec::Invalid(other.type_name()),
        }
    }
}

impl From<&Value> for Spec {
    fn from(value: &Value) -> Self {
        Spec::from(value.clone())
    }
}

/// Classification of a text spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TextKind {
    /// A bare package id.
    Package { package: String },
    /// An absolute or relative filesystem path, possibly a directory.
    FilePath { path: String },
    /// A path resolved relative to a named package's root.
    PackageRelative { package: String, path: String },
    /// A nested property inside a resolved package; `fan_out` when the
    /// spec ended in `.*`.
    PackageProperty {
        package: String,
        path: String,
        fan_out: bool,
    },
    /// No grammar matched; resolution yields nothing.
    Unrecognized,
}

/// Classifies a text spec into the first grammar that matches.
pub(crate) fn classify(text: &str) -> TextKind {
    if PACKAGE_RE.is_match(text) {
        return TextKind::Package {
            package: text.to_string(),
        };
    }

    if FILE_PATH_RE.is_match(text) {
        return TextKind::FilePath {
            path: text.to_string(),
        };
    }

    if let Some(caps) = PACKAGE_RELATIVE_RE.captures(text) {
        return TextKind::PackageRelative {
            package: caps[1].to_string(),
            path: caps[2].to_string(),
        };
    }

    if let Some(caps) = PACKAGE_PROPERTY_RE.captures(text) {
        return TextKind::PackageProperty {
            package: caps[1].to_string(),
            path: caps[2].to_string(),
            fan_out: caps.get(3).is_some(),
        };
    }

    TextKind::Unrecognized
}
