//! Deterministic filesystem traversal.
//!
//! Pre-order walk of a subtree: the root itself first (depth 0), then
//! children in byte-lexicographic name order, one depth level per
//! directory descended. Every node — directories included — is handed to
//! the visitor; skipping directories is the caller's business. Downstream
//! name derivation depends on this order being stable across runs.

use std::fs::Metadata;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{InjectorError, PathNotFoundError, Result};

/// Walks the subtree under `root`, invoking `visit` for every node.
///
/// `max_depth` limits how far below the root the walk descends:
/// `Some(0)` visits the root only, `Some(n)` visits nodes at depth ≤ n,
/// `None` is unlimited. A `root` that does not exist fails with
/// [`InjectorError::PathNotFound`]; a visitor error aborts the walk.
pub(crate) fn walk<F>(root: &Path, max_depth: Option<usize>, mut visit: F) -> Result<()>
where
    F: FnMut(&Path, &Metadata, usize) -> Result<()>,
{
    if !root.exists() {
        return Err(InjectorError::PathNotFound(PathNotFoundError {
            path: root.to_path_buf(),
        }));
    }

    let mut walker = WalkDir::new(root).sort_by_file_name();
    if let Some(budget) = max_depth {
        walker = walker.max_depth(budget);
    }

    for entry in walker {
        let entry = entry.map_err(|source| walk_error(root, source))?;
        let metadata = entry
            .metadata()
            .map_err(|source| walk_error(root, source))?;
        visit(entry.path(), &metadata, entry.depth())?;
    }

    Ok(())
}

fn walk_error(root: &Path, source: walkdir::Error) -> InjectorError {
    let path = source
        .path()
        .unwrap_or(root)
        .to_path_buf();
    InjectorError::Walk { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Builds `{b.wsl, a.wsl, c/ca.wsl}` under a tempdir, creating the
    /// files in non-sorted order on purpose.
    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.wsl"), "2").unwrap();
        fs::write(dir.path().join("a.wsl"), "1").unwrap();
        fs::create_dir(dir.path().join("c")).unwrap();
        fs::write(dir.path().join("c/ca.wsl"), "3").unwrap();
        dir
    }

    fn visited(root: &Path, max_depth: Option<usize>) -> Vec<(String, usize, bool)> {
        let mut seen = Vec::new();
        walk(root, max_depth, |path, metadata, depth| {
            let name = path
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .into_owned();
            seen.push((name, depth, metadata.is_dir()));
            Ok(())
        })
        .unwrap();
        seen
    }

    #[test]
    fn missing_root_fails() {
        let err = walk(Path::new("/no/such/root"), None, |_, _, _| Ok(())).unwrap_err();
        assert!(matches!(err, InjectorError::PathNotFound(_)));
    }

    #[test]
    fn visits_root_first_at_depth_zero() {
        let dir = fixture();
        let seen = visited(dir.path(), None);
        assert_eq!(seen[0], (String::new(), 0, true));
    }

    #[test]
    fn children_in_lexicographic_order() {
        let dir = fixture();
        let names: Vec<String> = visited(dir.path(), None)
            .into_iter()
            .skip(1)
            .map(|(name, _, _)| name)
            .collect();
        assert_eq!(names, vec!["a.wsl", "b.wsl", "c", "c/ca.wsl"]);
    }

    #[test]
    fn depth_increments_per_level() {
        let dir = fixture();
        let seen = visited(dir.path(), None);
        let depth_of = |wanted: &str| {
            seen.iter()
                .find(|(name, _, _)| name == wanted)
                .map(|(_, depth, _)| *depth)
                .unwrap()
        };
        assert_eq!(depth_of("a.wsl"), 1);
        assert_eq!(depth_of("c"), 1);
        assert_eq!(depth_of("c/ca.wsl"), 2);
    }

    #[test]
    fn single_file_root_is_depth_zero() {
        let dir = fixture();
        let file = dir.path().join("a.wsl");
        let seen = visited(&file, None);
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1, 0);
        assert!(!seen[0].2);
    }

    #[test]
    fn depth_budget_zero_visits_root_only() {
        let dir = fixture();
        let seen = visited(dir.path(), Some(0));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn depth_budget_caps_descent() {
        let dir = fixture();
        let seen = visited(dir.path(), Some(1));
        assert!(seen.iter().all(|(_, depth, _)| *depth <= 1));
        assert!(seen.iter().any(|(name, _, _)| name == "c"));
        assert!(!seen.iter().any(|(name, _, _)| name == "c/ca.wsl"));
    }

    #[test]
    fn visitor_error_aborts_walk() {
        let dir = fixture();
        let mut count = 0;
        let result = walk(dir.path(), None, |_, _, _| {
            count += 1;
            if count == 2 {
                Err(InjectorError::PathNotFound(PathNotFoundError {
                    path: "stop".into(),
                }))
            } else {
                Ok(())
            }
        });
        assert!(result.is_err());
        assert_eq!(count, 2);
    }
}
