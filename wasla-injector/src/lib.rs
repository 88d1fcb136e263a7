//! Core engine for the Wasla injector.

pub mod access;
pub mod error;
pub mod injector;
pub mod loader;
pub mod naming;
pub mod registry;
pub mod script;
pub mod spec;
pub mod value;
pub mod walker;

pub use error::{InjectorError, Result};
pub use injector::{prelude, Injector, InjectorBuilder};
pub use naming::MODULE_EXT;
pub use spec::Spec;
pub use value::{Factory, FactoryFn, Value};
