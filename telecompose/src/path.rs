//! Host path resolution for manifest fields that point at the filesystem.
//!
//! Paths are resolved against the directory containing the manifest, with
//! `~` expanded to the user's home directory, and then cleaned up lexically.
//! Nothing here touches the filesystem, so paths do not need to exist.

use std::path::{Component, Path, PathBuf};

use resolve_path::PathResolveExt;
use snafu::{ResultExt, Snafu};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to resolve path {raw_path}, error: {source}"))]
    ResolvePath { raw_path: String, source: std::io::Error },
}

/// Resolves `raw_path` to an absolute, normalized path.
///
/// - `~` and `~/...` expand to the current user's home directory.
/// - Relative paths are joined onto `manifest_dir`.
/// - Absolute paths are only normalized.
///
/// `manifest_dir` is expected to be absolute.
///
/// # Errors
///
/// Returns an error when `raw_path` starts with `~` and the home directory
/// cannot be determined.
pub fn resolve_path<P>(raw_path: &str, manifest_dir: P) -> Result<PathBuf, Error>
where
    P: AsRef<Path>,
{
    let raw = Path::new(raw_path);
    let resolved =
        raw.try_resolve_in(manifest_dir.as_ref()).context(ResolvePathSnafu { raw_path })?;
    Ok(normalize_lexically(&resolved))
}

/// Collapses `.` and `..` components and drops trailing separators without
/// consulting the filesystem. `..` never climbs above the root.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    let _removed = normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(Component::ParentDir.as_os_str()),
            },
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(Component::CurDir.as_os_str());
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home_dir() -> PathBuf {
        directories::BaseDirs::new().expect("home directory is known").home_dir().to_path_buf()
    }

    #[test]
    fn test_relative_path_resolves_against_manifest_dir() {
        let path = resolve_path("./data", "/proj").unwrap();
        assert_eq!(path, PathBuf::from("/proj/data"));

        let path = resolve_path("config/app.env", "/proj").unwrap();
        assert_eq!(path, PathBuf::from("/proj/config/app.env"));
    }

    #[test]
    fn test_parent_components_are_collapsed() {
        let path = resolve_path("../shared/./cache/", "/proj/app").unwrap();
        assert_eq!(path, PathBuf::from("/proj/shared/cache"));
    }

    #[test]
    fn test_absolute_path_is_only_normalized() {
        let path = resolve_path("/var//lib/../log", "/proj").unwrap();
        assert_eq!(path, PathBuf::from("/var/log"));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let once = resolve_path("../x/y", "/proj/app").unwrap();
        let twice = resolve_path(once.to_str().unwrap(), "/somewhere/else").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_home_directory_is_expanded() {
        let path = resolve_path("~/data/../cache", "/proj").unwrap();
        assert_eq!(path, normalize_lexically(&home_dir().join("cache")));
        assert!(path.is_absolute());
    }

    #[test]
    fn test_normalize_does_not_climb_above_root() {
        assert_eq!(normalize_lexically(Path::new("/../../etc")), PathBuf::from("/etc"));
    }

    #[test]
    fn test_normalize_keeps_leading_parents_of_relative_paths() {
        assert_eq!(normalize_lexically(Path::new("../../a/./b/..")), PathBuf::from("../../a"));
        assert_eq!(normalize_lexically(Path::new("a/..")), PathBuf::from("."));
    }
}
