//! # The Injector — heart of Wasla
//!
//! Resolves dependency specifications, loads module files, and caches
//! everything in one flat name→value registry.
//!
//! # Architecture
//! ```text
//! InjectorBuilder  ──build()──>  Injector
//!                                   │
//!                        get(spec, name?)
//!                                   │
//!              ┌────────────┬───────┴──────┬──────────────┐
//!              ▼            ▼              ▼              ▼
//!          registry      walker         loader         access
//!        (fast path)  (file trees)  (module files)  (prop. paths)
//! ```
//!
//! # Examples
//! ```rust
//! use wasla_injector::injector::Injector;
//! use wasla_injector::value::Value;
//!
//! let injector = Injector::builder()
//!     .seed("config/port", Value::Int(8080))
//!     .build();
//!
//! injector.register("config/host", "localhost");
//!
//! let port = injector.get("config/port", None).unwrap();
//! assert_eq!(port, Some(Value::Int(8080)));
//!
//! let all = injector.find("^config/", false).unwrap();
//! assert_eq!(
//!     all,
//!     Some(Value::List(vec![
//!         Value::Int(8080),
//!         Value::Str("localhost".into()),
//!     ])),
//! );
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use parking_lot::RwLock;
use regex::Regex;
use tracing::{debug, info, instrument, trace};

use wasla_support::paths;

use crate::access;
use crate::error::{
    InjectorError, InvalidSpecificationError, PathNotFoundError, Result,
};
use crate::loader;
use crate::naming::{self, MODULE_EXT};
use crate::registry::Registry;
use crate::spec::{classify, Spec, TextKind};
use crate::value::Value;
use crate::walker;

// ============================================================
// InjectorBuilder
// ============================================================

/// Builds an [`Injector`] with seeds and host configuration.
///
/// # Examples
/// ```rust,ignore
/// let injector = Injector::builder()
///     .seed("config", config_value)
///     .global("env", env_value)
///     .base_dir("/srv/app")
///     .packages_root("vendor")
///     .build();
/// ```
pub struct InjectorBuilder {
    seed: IndexMap<String, Value>,
    globals: IndexMap<String, Value>,
    base_dir: Option<PathBuf>,
    packages_root: PathBuf,
}

impl InjectorBuilder {
    fn new() -> Self {
        Self {
            seed: IndexMap::new(),
            globals: IndexMap::new(),
            base_dir: None,
            packages_root: PathBuf::from("packages"),
        }
    }

    /// Pre-registers a dependency.
    pub fn seed(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.seed.insert(name.into(), value.into());
        self
    }

    /// Exposes a host binding to every loaded module.
    ///
    /// The module-system primitives (`require`, `module`, `global`) are
    /// withheld from loaded code even if supplied here.
    pub fn global(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.globals.insert(name.into(), value.into());
        self
    }

    /// Directory that relative file-path specs resolve against.
    ///
    /// Defaults to the process working directory at resolution time.
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Directory that package specs resolve under. Defaults to
    /// `packages`, resolved against the base directory when relative.
    pub fn packages_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.packages_root = dir.into();
        self
    }

    /// Builds the injector with the registry pre-populated.
    pub fn build(self) -> Injector {
        info!(seeded = self.seed.len(), "Injector ready");

        let mut registry = Registry::new();
        for (name, value) in self.seed {
            registry.register(name, value);
        }

        Injector {
            registry: RwLock::new(registry),
            globals: self.globals,
            base_dir: self.base_dir,
            packages_root: self.packages_root,
        }
    }
}

// ═══════════════════════════════════════════
// Injector
// ═══════════════════════════════════════════

/// Thread-safe dependency injector over one flat registry.
///
/// Every resolution runs to completion before `get` returns; mutating
/// calls serialize behind the registry lock, which is never held across
/// a filesystem or evaluation step.
pub struct Injector {
    registry: RwLock<Registry>,
    globals: IndexMap<String, Value>,
    base_dir: Option<PathBuf>,
    packages_root: PathBuf,
}

impl Injector {
    /// Creates an injector with an empty registry and default directories.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new builder.
    pub fn builder() -> InjectorBuilder {
        InjectorBuilder::new()
    }

    /// Stores `value` under `name`, unconditionally (last write wins).
    pub fn register(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.registry.write().register(name, value.into());
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.read().contains(name)
    }

    /// Retrieves or loads the dependency described by `spec`.
    ///
    /// `name` overrides the first segment of derived names (file-path
    /// specs) or the registration prefix (package and property specs).
    ///
    /// Returns the resolved value, a [`Value::List`] when one spec
    /// produced several values, or `None` when nothing matched — a
    /// missing optional extension point is not an error.
    #[instrument(skip_all, name = "injector_get", fields(name = name.unwrap_or_default()))]
    pub fn get(&self, spec: impl Into<Spec>, name: Option<&str>) -> Result<Option<Value>> {
        match spec.into() {
            Spec::Text(text) => self.get_text(&text, name),

            Spec::Factory(factory) => {
                let value = Value::Factory(factory);
                if let Some(name) = name {
                    self.register(name, value.clone());
                }
                Ok(Some(value))
            }

            // Argument specs + factory. An extension point by design of
            // the original engine; resolution is inert.
            Spec::Seq(parts) => {
                debug!(parts = parts.len(), "Sequence spec resolution is inert");
                Ok(None)
            }

            Spec::Invalid(type_name) => Err(InjectorError::InvalidSpecification(
                InvalidSpecificationError { type_name },
            )),
        }
    }

    /// Searches registered names with a pattern string.
    ///
    /// The pattern compiles case-sensitively; see
    /// [`find_compiled`](Injector::find_compiled) for pre-built
    /// patterns. `single` returns the first match only; otherwise every
    /// match arrives as a [`Value::List`] in registration order. `None`
    /// when nothing matches.
    pub fn find(&self, pattern: &str, single: bool) -> Result<Option<Value>> {
        let compiled = Regex::new(pattern).map_err(|source| InjectorError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self.find_compiled(&compiled, single))
    }

    /// Searches registered names with a pre-built pattern.
    pub fn find_compiled(&self, pattern: &Regex, single: bool) -> Option<Value> {
        self.registry.read().find(pattern, single)
    }

    /// Resolves a dotted/indexed property path against a value.
    ///
    /// See [`access::nested`]; absence is `None`, never an error.
    pub fn nested_property(&self, root: &Value, dot_path: &str) -> Option<Value> {
        access::nested(root, dot_path)
    }

    // ── Text spec dispatch ──

    fn get_text(&self, text: &str, name: Option<&str>) -> Result<Option<Value>> {
        // Fast path: an exact, already-registered name never reloads.
        if let Some(value) = self.registry.read().get(text).cloned() {
            trace!(spec = %text, "Resolved from registry");
            return Ok(Some(value));
        }

        match classify(text) {
            TextKind::Package { package } => {
                let value = self.load_package(&package)?;
                let key = name.unwrap_or(&package);
                self.registry.write().register(key, value.clone());
                Ok(Some(value))
            }

            TextKind::FilePath { path } => {
                let root = paths::resolve(&self.base(), Path::new(&path));
                self.load_tree(&root, name)
            }

            TextKind::PackageRelative { package, path } => {
                let root = paths::resolve(&self.packages_dir().join(&package), Path::new(&path));
                self.load_tree(&root, name)
            }

            TextKind::PackageProperty {
                package,
                path,
                fan_out,
            } => self.package_property(&package, &path, fan_out, name),

            TextKind::Unrecognized => {
                debug!(spec = %text, "Specification matched no grammar");
                Ok(None)
            }
        }
    }

    /// Loads a package's entry module: `<root>/<pkg>.wsl`, falling back
    /// to `<root>/<pkg>/main.wsl`.
    fn load_package(&self, package: &str) -> Result<Value> {
        let root = self.packages_dir();

        let file = root.join(format!("{package}.{MODULE_EXT}"));
        let entry = if file.is_file() {
            file
        } else {
            let main = root.join(package).join(format!("main.{MODULE_EXT}"));
            if main.is_file() {
                main
            } else {
                return Err(InjectorError::PathNotFound(PathNotFoundError {
                    path: root.join(package),
                }));
            }
        };

        debug!(package = %package, entry = %entry.display(), "Loading package");
        loader::load(&entry, &self.globals, self.snapshot())
    }

    /// Walks `root`, loads every file found, and registers each under
    /// its derived name.
    ///
    /// A derived name that is already registered reuses the stored
    /// value without re-reading the file — the engine's only cache is
    /// "already registered under this exact name".
    fn load_tree(&self, root: &Path, name: Option<&str>) -> Result<Option<Value>> {
        let mut loaded = Vec::new();

        walker::walk(root, None, |path, metadata, depth| {
            if metadata.is_dir() {
                return Ok(());
            }

            let derived = naming::derive(path, depth, name);

            if let Some(existing) = self.registry.read().get(&derived).cloned() {
                trace!(name = %derived, "Module already registered; skipping load");
                loaded.push(existing);
                return Ok(());
            }

            // Re-snapshot before each file so later modules in the walk
            // can reference the ones registered before them.
            let value = loader::load(path, &self.globals, self.snapshot())?;
            debug!(name = %derived, file = %path.display(), "Loaded module");
            self.registry.write().register(&derived, value.clone());
            loaded.push(value);
            Ok(())
        })?;

        Ok(collapse(loaded))
    }

    /// Resolves `::pkg::dot.path` specs. Deliberately non-throwing on a
    /// missing package or property — a missing optional extension point
    /// is not an error.
    fn package_property(
        &self,
        package: &str,
        path: &str,
        fan_out: bool,
        name: Option<&str>,
    ) -> Result<Option<Value>> {
        let package_value = match self.get(package, None) {
            Ok(Some(value)) => value,
            Ok(None) => return Ok(None),
            Err(InjectorError::PathNotFound(_)) => {
                debug!(package = %package, "Missing package treated as silent miss");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        if !package_value.is_truthy() {
            return Ok(None);
        }

        let base = match access::nested(&package_value, path) {
            Some(value) if value.is_truthy() => value,
            _ => return Ok(None),
        };

        let prefix = format!("{}/{}", name.unwrap_or(package), path.replace('.', "/"));

        if fan_out {
            let properties = access::own_properties(&base);
            let mut values = Vec::with_capacity(properties.len());
            {
                let mut registry = self.registry.write();
                for (property, value) in properties {
                    registry.register(format!("{prefix}/{property}"), value.clone());
                    values.push(value);
                }
            }
            Ok(collapse(values))
        } else {
            self.registry.write().register(prefix, base.clone());
            Ok(Some(base))
        }
    }

    // ── Directories ──

    fn base(&self) -> PathBuf {
        self.base_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    fn packages_dir(&self) -> PathBuf {
        paths::resolve(&self.base(), &self.packages_root)
    }

    fn snapshot(&self) -> IndexMap<String, Value> {
        self.registry.read().snapshot()
    }
}

impl Default for Injector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Injector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injector")
            .field("registered", &self.registry.read().len())
            .finish()
    }
}

/// The engine's multi-result convention: nothing is `None`, one value
/// comes back unwrapped, several come back as a list.
fn collapse(values: Vec<Value>) -> Option<Value> {
    match values.len() {
        0 => None,
        1 => values.into_iter().next(),
        _ => Some(Value::List(values)),
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{Injector, InjectorBuilder};
    pub use crate::error::{InjectorError, Result};
    pub use crate::spec::Spec;
    pub use crate::value::{Factory, Value};
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Factory;
    use std::fs;

    /// Injector rooted in a tempdir with a `packages/` directory.
    fn sandboxed() -> (tempfile::TempDir, Injector) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("packages")).unwrap();
        let injector = Injector::builder().base_dir(dir.path()).build();
        (dir, injector)
    }

    fn write(dir: &Path, rel: &str, source: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, source).unwrap();
    }

    #[test]
    fn seeded_dependencies_are_retrievable() {
        let injector = Injector::builder().seed("dep1", "dep1").build();

        assert_eq!(
            injector.get("dep1", None).unwrap(),
            Some(Value::Str("dep1".into())),
        );
        assert!(injector.contains("dep1"));
    }

    #[test]
    fn register_then_get_and_contains() {
        let injector = Injector::new();
        injector.register("answer", 42i64);

        assert!(injector.contains("answer"));
        assert_eq!(injector.get("answer", None).unwrap(), Some(Value::Int(42)));
        assert!(!injector.contains("question"));
    }

    #[test]
    fn invalid_specification_shape_errors() {
        let injector = Injector::new();

        let err = injector.get(Value::Map(IndexMap::new()), None).unwrap_err();
        assert!(matches!(err, InjectorError::InvalidSpecification(_)));

        let err = injector.get(Value::Int(5), None).unwrap_err();
        assert!(matches!(err, InjectorError::InvalidSpecification(_)));
    }

    #[test]
    fn find_matches_names() {
        let injector = Injector::new();
        injector.register("dep1", "dep1");

        let all = injector.find("dep1", false).unwrap();
        assert_eq!(all, Some(Value::List(vec![Value::Str("dep1".into())])));

        let single = injector.find("dep", true).unwrap();
        assert_eq!(single, Some(Value::Str("dep1".into())));

        assert_eq!(injector.find("nothing", false).unwrap(), None);
    }

    #[test]
    fn find_single_equals_first_of_find_all() {
        let injector = Injector::new();
        injector.register("routes/a", 1i64);
        injector.register("routes/b", 2i64);

        let all = injector.find("^routes/", false).unwrap().unwrap();
        let single = injector.find("^routes/", true).unwrap().unwrap();
        assert_eq!(Some(&single), all.as_list().unwrap().first());
    }

    #[test]
    fn find_compiled_accepts_prebuilt_patterns() {
        let injector = Injector::new();
        injector.register("dep1", "dep1");

        let pattern = Regex::new("dep").unwrap();
        assert_eq!(
            injector.find_compiled(&pattern, true),
            Some(Value::Str("dep1".into())),
        );
    }

    #[test]
    fn find_rejects_invalid_patterns() {
        let injector = Injector::new();
        let err = injector.find("(unclosed", false).unwrap_err();
        assert!(matches!(err, InjectorError::InvalidPattern { .. }));
    }

    #[test]
    fn loads_and_names_a_single_module() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "simple-module.wsl", "{ prop1: \"prop1_value\" }");

        let module = injector
            .get("./simple-module.wsl", None)
            .unwrap()
            .expect("module loads");
        assert_eq!(
            module.get("prop1"),
            Some(&Value::Str("prop1_value".into())),
        );

        // Registered under its derived name.
        assert_eq!(
            injector.get("simple-module", None).unwrap(),
            Some(module.clone()),
        );
        assert_eq!(injector.find("simple-module", true).unwrap(), Some(module));
    }

    #[test]
    fn loads_from_an_absolute_path() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "abs.wsl", "1");

        let path = dir.path().join("abs.wsl");
        let module = injector
            .get(path.to_str().unwrap(), None)
            .unwrap()
            .expect("module loads");
        assert_eq!(module, Value::Int(1));
        assert!(injector.contains("abs"));
    }

    #[test]
    fn renames_a_module_with_an_explicit_name() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "simple-module.wsl", "{ prop1: \"prop1_value\" }");

        let module = injector
            .get("./simple-module.wsl", Some("different-name"))
            .unwrap()
            .expect("module loads");
        assert_eq!(
            injector.get("different-name", None).unwrap(),
            Some(module),
        );
        assert!(!injector.contains("simple-module"));
    }

    #[test]
    fn directory_load_derives_depth_names() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "modules/alpha.wsl", "1");
        write(dir.path(), "modules/web/routes.wsl", "2");

        let loaded = injector.get("./modules", None).unwrap().unwrap();
        assert_eq!(
            loaded,
            Value::List(vec![Value::Int(1), Value::Int(2)]),
        );

        assert_eq!(injector.get("alpha", None).unwrap(), Some(Value::Int(1)));
        assert_eq!(
            injector.get("web/routes", None).unwrap(),
            Some(Value::Int(2)),
        );
    }

    #[test]
    fn missing_file_path_root_errors() {
        let (_dir, injector) = sandboxed();
        let err = injector.get("./no-such-dir", None).unwrap_err();
        assert!(matches!(err, InjectorError::PathNotFound(_)));
    }

    #[test]
    fn empty_directory_resolves_to_none() {
        let (dir, injector) = sandboxed();
        fs::create_dir(dir.path().join("empty")).unwrap();
        assert_eq!(injector.get("./empty", None).unwrap(), None);
    }

    #[test]
    fn second_resolution_reuses_registered_modules() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "once/effect.wsl", "\"first\"");

        assert_eq!(
            injector.get("./once", None).unwrap(),
            Some(Value::Str("first".into())),
        );

        // Rewrite the file on disk; the registered value must win,
        // proving the file is not re-read.
        write(dir.path(), "once/effect.wsl", "\"second\"");
        assert_eq!(
            injector.get("./once", None).unwrap(),
            Some(Value::Str("first".into())),
        );
    }

    #[test]
    fn modules_later_in_a_walk_see_earlier_ones() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "tree/alpha.wsl", "{ greeting: \"hi\" }");
        write(dir.path(), "tree/beta.wsl", "alpha.greeting");

        injector.get("./tree", None).unwrap();
        assert_eq!(
            injector.get("beta", None).unwrap(),
            Some(Value::Str("hi".into())),
        );
    }

    #[test]
    fn loaded_modules_see_seeds_without_imports() {
        let (dir, injector) = sandboxed();
        injector.register("logger", "the-logger");
        write(dir.path(), "uses-logger.wsl", "{ log: logger }");

        let module = injector.get("./uses-logger.wsl", None).unwrap().unwrap();
        assert_eq!(module.get("log"), Some(&Value::Str("the-logger".into())));
    }

    #[test]
    fn withheld_require_fails_the_load() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "smuggler.wsl", "require");

        let err = injector.get("./smuggler.wsl", None).unwrap_err();
        assert!(matches!(err, InjectorError::ModuleEval(_)));
    }

    #[test]
    fn load_time_errors_propagate_unwrapped() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "broken.wsl", "let = 1");

        let err = injector.get("./broken.wsl", None).unwrap_err();
        assert!(matches!(err, InjectorError::ModuleParse(_)));
    }

    #[test]
    fn package_spec_loads_entry_file() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "packages/webkit.wsl", "{ title: \"Webkit\" }");

        let package = injector.get("webkit", None).unwrap().unwrap();
        assert_eq!(package.get("title"), Some(&Value::Str("Webkit".into())));
        assert!(injector.contains("webkit"));
    }

    #[test]
    fn package_spec_falls_back_to_main_module() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "packages/deep/main.wsl", "\"entry\"");

        assert_eq!(
            injector.get("deep", None).unwrap(),
            Some(Value::Str("entry".into())),
        );
    }

    #[test]
    fn missing_package_errors() {
        let (_dir, injector) = sandboxed();
        let err = injector.get("nowhere", None).unwrap_err();
        assert!(matches!(err, InjectorError::PathNotFound(_)));
    }

    #[test]
    fn aliased_package_load_registers_under_the_alias() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "packages/webkit.wsl", "\"wk\"");

        injector.get("webkit", Some("renamed")).unwrap();
        assert!(injector.contains("renamed"));
        assert!(!injector.contains("webkit"));

        // The fast path keys on the spec string, so an aliased load
        // misses it and re-registers every call.
        injector.get("webkit", Some("renamed2")).unwrap();
        assert!(injector.contains("renamed2"));
    }

    #[test]
    fn package_relative_path_loads_from_package_root() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "packages/webkit/lib/render.wsl", "\"render\"");

        let loaded = injector
            .get("::webkit/./lib", Some("wk"))
            .unwrap()
            .unwrap();
        assert_eq!(loaded, Value::Str("render".into()));
        assert_eq!(
            injector.get("wk", None).unwrap(),
            Some(Value::Str("render".into())),
        );
    }

    #[test]
    fn package_property_registers_under_slashed_path() {
        let (dir, injector) = sandboxed();
        write(
            dir.path(),
            "packages/webkit.wsl",
            "{ meta: { name: \"Webkit\" } }",
        );

        let value = injector.get("::webkit::meta.name", None).unwrap().unwrap();
        assert_eq!(value, Value::Str("Webkit".into()));
        assert_eq!(
            injector.get("webkit/meta/name", None).unwrap(),
            Some(Value::Str("Webkit".into())),
        );
    }

    #[test]
    fn package_property_honors_the_name_override() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "packages/webkit.wsl", "{ name: \"Webkit\" }");

        injector
            .get("::webkit::name", Some("wk"))
            .unwrap()
            .unwrap();
        assert!(injector.contains("wk/name"));
    }

    #[test]
    fn package_property_fan_out_registers_each_property() {
        let (dir, injector) = sandboxed();
        write(
            dir.path(),
            "packages/webkit.wsl",
            "{ exports: { render: 1, mount: 2 } }",
        );

        let values = injector.get("::webkit::exports.*", None).unwrap().unwrap();
        assert_eq!(
            values,
            Value::List(vec![Value::Int(1), Value::Int(2)]),
        );
        assert_eq!(
            injector.get("webkit/exports/render", None).unwrap(),
            Some(Value::Int(1)),
        );
        assert_eq!(
            injector.get("webkit/exports/mount", None).unwrap(),
            Some(Value::Int(2)),
        );
    }

    #[test]
    fn fan_out_over_one_property_unwraps() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "packages/webkit.wsl", "{ exports: { only: 7 } }");

        assert_eq!(
            injector.get("::webkit::exports.*", None).unwrap(),
            Some(Value::Int(7)),
        );
    }

    #[test]
    fn property_spec_on_missing_package_is_a_silent_miss() {
        let (_dir, injector) = sandboxed();
        assert_eq!(injector.get("::ghost::prop", None).unwrap(), None);
    }

    #[test]
    fn property_spec_on_missing_property_is_a_silent_miss() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "packages/webkit.wsl", "{ present: 1 }");

        assert_eq!(injector.get("::webkit::absent", None).unwrap(), None);
        assert_eq!(
            injector.get("::webkit::absent.deeper", None).unwrap(),
            None,
        );
    }

    #[test]
    fn falsy_property_is_a_silent_miss() {
        let (dir, injector) = sandboxed();
        write(dir.path(), "packages/webkit.wsl", "{ empty: \"\" }");

        assert_eq!(injector.get("::webkit::empty", None).unwrap(), None);
    }

    #[test]
    fn factory_specs_resolve_to_the_factory() {
        let injector = Injector::new();
        let factory = Factory::new(|_| Ok(Value::Int(1)));

        let resolved = injector.get(factory.clone(), Some("maker")).unwrap();
        assert_eq!(resolved, Some(Value::Factory(factory)));
        assert!(injector.contains("maker"));
    }

    #[test]
    fn sequence_specs_are_inert() {
        let injector = Injector::new();
        let spec = Value::List(vec![
            Value::Str("dep1".into()),
            Value::Factory(Factory::new(|_| Ok(Value::Null))),
        ]);
        assert_eq!(injector.get(spec, None).unwrap(), None);
    }

    #[test]
    fn unrecognized_text_resolves_to_none() {
        let injector = Injector::new();
        assert_eq!(injector.get("not a spec", None).unwrap(), None);
    }

    #[test]
    fn nested_property_delegates_to_the_accessor() {
        let injector = Injector::new();
        let root = Value::Map(IndexMap::from([(
            "root".to_string(),
            Value::Map(IndexMap::from([(
                "list".to_string(),
                Value::List(vec![Value::Int(10), Value::Int(20)]),
            )])),
        )]));

        assert_eq!(
            injector.nested_property(&root, "root.list[1]"),
            Some(Value::Int(20)),
        );
        assert_eq!(injector.nested_property(&root, ""), Some(root.clone()));
    }

    #[test]
    fn debug_shows_registration_count() {
        let injector = Injector::builder()
            .seed("a", 1i64)
            .seed("b", 2i64)
            .build();

        let debug = format!("{injector:?}");
        assert!(debug.contains("Injector"));
        assert!(debug.contains("2"));
    }
}
