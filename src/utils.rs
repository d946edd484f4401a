use std::io;
use std::path::{Component, Path, PathBuf};

use directories::ProjectDirs;

use crate::constants::{APPLICATION, ORGANIZATION, QUALIFIER};
use crate::errors::{Result, generic_error};

/// Resolves `path` to an absolute form suitable for equality checks
///
/// Existing paths are canonicalised. For a path that does not exist yet the
/// longest existing ancestor is canonicalised and the rest is appended, so a
/// destination that has not been created compares correctly against a
/// canonical source.
pub fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    if absolute.exists() {
        return absolute.canonicalize();
    }

    let normalised = normalise_lexically(&absolute);
    for ancestor in normalised.ancestors().skip(1) {
        if ancestor.exists() {
            let rest = normalised
                .strip_prefix(ancestor)
                .map_err(io::Error::other)?;
            return Ok(ancestor.canonicalize()?.join(rest));
        }
    }

    Ok(normalised)
}

fn normalise_lexically(path: &Path) -> PathBuf {
    let mut normalised = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                normalised.pop();
            }
            Component::CurDir => {}
            other => normalised.push(other),
        }
    }
    normalised
}

pub(crate) fn find_project_folder() -> Result<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .ok_or_else(|| generic_error("Failed to determine project directories"))
}

/// Platform configuration directory, if one can be determined
pub fn project_config_dir() -> Option<PathBuf> {
    find_project_folder()
        .ok()
        .map(|folder| folder.config_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_existing_path() {
        let temp_dir = tempdir().unwrap();
        let resolved = resolve_path(temp_dir.path()).unwrap();
        assert_eq!(resolved, temp_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_resolve_missing_path() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("not").join("yet");

        let resolved = resolve_path(&missing).unwrap();
        let expected = temp_dir.path().canonicalize().unwrap().join("not").join("yet");
        assert_eq!(resolved, expected);
    }

    #[test]
    fn test_resolve_missing_path_with_parent_components() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("ghost").join("..").join("real");

        let resolved = resolve_path(&path).unwrap();
        let expected = temp_dir.path().canonicalize().unwrap().join("real");
        assert_eq!(resolved, expected);
    }
}
