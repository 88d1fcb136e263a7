//! Registry name derivation.
//!
//! A module loaded from a directory walk is registered under the
//! slash-joined tail of its path: as many segments as its depth in the
//! walk, with the module extension stripped. A caller-supplied override
//! renames only the first segment, so subordinate modules loaded from
//! the same subtree keep their relative sub-names.

use std::path::{Component, Path};

/// Extension of module source files; stripped from derived names.
pub const MODULE_EXT: &str = "wsl";

/// Derives the registry key for `path` visited at `depth` in a walk.
///
/// A depth of 0 (a single file resolved directly, no recursion) still
/// yields the one-segment file name.
pub(crate) fn derive(path: &Path, depth: usize, override_name: Option<&str>) -> String {
    let segments: Vec<String> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if segments.is_empty() {
        return String::new();
    }

    let take = depth.max(1).min(segments.len());
    let mut tail: Vec<String> = segments[segments.len() - take..].to_vec();

    if let Some(last) = tail.last_mut() {
        if let Some(stem) = last.strip_suffix(&format!(".{MODULE_EXT}")) {
            *last = stem.to_string();
        }
    }

    if let Some(name) = override_name {
        tail[0] = name.to_string();
    }

    tail.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_counts_tail_segments() {
        assert_eq!(derive(Path::new("/srv/root/sub/mod.wsl"), 2, None), "sub/mod");
        assert_eq!(derive(Path::new("/srv/root/mod.wsl"), 1, None), "mod");
    }

    #[test]
    fn depth_zero_still_names_the_file() {
        assert_eq!(derive(Path::new("/srv/root/mod.wsl"), 0, None), "mod");
    }

    #[test]
    fn strips_only_the_module_extension() {
        assert_eq!(derive(Path::new("/a/notes.txt"), 1, None), "notes.txt");
        assert_eq!(derive(Path::new("/a/mod.wsl"), 1, None), "mod");
    }

    #[test]
    fn override_replaces_first_segment_only() {
        assert_eq!(
            derive(Path::new("/srv/root/sub/mod.wsl"), 2, Some("app")),
            "app/mod",
        );
        assert_eq!(
            derive(Path::new("/srv/root/mod.wsl"), 1, Some("app")),
            "app",
        );
    }

    #[test]
    fn depth_larger_than_path_is_clamped() {
        assert_eq!(derive(Path::new("mod.wsl"), 5, None), "mod");
    }

    #[test]
    fn dotted_file_names_survive() {
        assert_eq!(derive(Path::new("/a/jquery.min.wsl"), 1, None), "jquery.min");
    }
}
