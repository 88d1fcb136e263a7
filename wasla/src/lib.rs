//! # Wasla — a name-keyed dependency injector for Rust
//!
//! Wasla resolves *specifications* — package ids, file paths,
//! package-relative paths, nested property paths, or ready-made
//! factories — into values cached in one flat name→value registry.
//! Module files are evaluated against an explicit injection context:
//! loaded code references its dependencies as plain identifiers and has
//! no import construct at all.

pub use wasla_injector::*;
pub use wasla_support::*;
