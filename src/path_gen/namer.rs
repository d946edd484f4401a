//! Collision-free destination names
//!
//! Every name handed out is absent from both the registry of names assigned
//! earlier in the run and the destination directory. Names assigned earlier
//! may not have been written yet, which is why the registry is checked
//! first and both checks are always made.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::debug;

use crate::discovery::FileEntry;
use crate::errors::{Result, generic_error};
use crate::path_gen::FlatName;

/// Names assigned during the current run
///
/// The set only ever grows within a run.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    assigned: HashSet<OsString>,
}

impl NameRegistry {
    pub fn new() -> Self {
        NameRegistry::default()
    }

    pub fn contains(&self, name: &OsString) -> bool {
        self.assigned.contains(name)
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    fn register(&mut self, name: OsString) {
        self.assigned.insert(name);
    }
}

/// Resolves flat names against one destination directory
#[derive(Debug, Clone)]
pub struct Namer {
    destination: PathBuf,
    registry: NameRegistry,
}

impl Namer {
    /// Creates a namer with an empty registry for `destination`
    pub fn new(destination: &Path) -> Self {
        Namer {
            destination: destination.to_path_buf(),
            registry: NameRegistry::new(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn registry(&self) -> &NameRegistry {
        &self.registry
    }

    /// Assigns a destination path to a scanned file
    ///
    /// # Errors
    /// Returns an error when the entry has no relative path segments.
    pub fn assign(&mut self, entry: &FileEntry) -> Result<PathBuf> {
        let flat_name = FlatName::from_segments(&entry.segments()).ok_or_else(|| {
            generic_error(&format!(
                "Cannot derive a file name for {}",
                entry.path.display()
            ))
        })?;
        Ok(self.assign_name(&flat_name))
    }

    /// Picks the first free name for `flat_name` and registers it
    ///
    /// The base name is tried first, then `stem_1.ext`, `stem_2.ext` and so
    /// on. Each attempt costs one registry lookup and at most one existence
    /// check, so a name shared by n files needs O(n) attempts.
    pub fn assign_name(&mut self, flat_name: &FlatName) -> PathBuf {
        let base = flat_name.base();
        let mut candidate = base.clone();
        let mut counter = 0;

        while self.is_taken(&candidate) {
            counter += 1;
            candidate = flat_name.with_suffix(counter);
        }

        if counter > 0 {
            debug!(
                "Name {} is taken, using {}",
                base.to_string_lossy(),
                candidate.to_string_lossy()
            );
        }

        let path = self.destination.join(&candidate);
        self.registry.register(candidate);
        path
    }

    fn is_taken(&self, name: &OsString) -> bool {
        if self.registry.contains(name) {
            return true;
        }
        // Any entry counts, including directories and dangling symlinks
        self.destination.join(name).symlink_metadata().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{File, create_dir_all};
    use tempfile::tempdir;

    fn flat(relative: &str) -> FlatName {
        FlatName::from_relative_path(Path::new(relative)).unwrap()
    }

    fn file_name(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().into_owned()
    }

    #[test]
    fn test_unused_name_is_accepted() {
        let temp_dir = tempdir().unwrap();
        let mut namer = Namer::new(temp_dir.path());

        let path = namer.assign_name(&flat("dir1/file1.xlsx"));

        assert_eq!(path, temp_dir.path().join("dir1_file1.xlsx"));
        assert!(namer.registry().contains(&OsString::from("dir1_file1.xlsx")));
    }

    #[test]
    fn test_registry_collision() {
        let temp_dir = tempdir().unwrap();
        let mut namer = Namer::new(temp_dir.path());

        let first = namer.assign_name(&flat("dir1/file.xlsx"));
        let second = namer.assign_name(&flat("dir1_file.xlsx"));
        let third = namer.assign_name(&flat("dir1/file.xlsx"));

        assert_eq!(file_name(&first), "dir1_file.xlsx");
        assert_eq!(file_name(&second), "dir1_file_1.xlsx");
        assert_eq!(file_name(&third), "dir1_file_2.xlsx");
        assert_eq!(namer.registry().len(), 3);
    }

    #[test]
    fn test_existing_destination_files_are_avoided() {
        let temp_dir = tempdir().unwrap();
        File::create(temp_dir.path().join("report.xlsx")).unwrap();
        File::create(temp_dir.path().join("report_1.xlsx")).unwrap();

        let mut namer = Namer::new(temp_dir.path());
        let path = namer.assign_name(&flat("report.xlsx"));

        assert_eq!(file_name(&path), "report_2.xlsx");
    }

    #[test]
    fn test_existing_directory_counts_as_taken() {
        let temp_dir = tempdir().unwrap();
        create_dir_all(temp_dir.path().join("a_b.xls")).unwrap();

        let mut namer = Namer::new(temp_dir.path());
        let path = namer.assign_name(&flat("a/b.xls"));

        assert_eq!(file_name(&path), "a_b_1.xls");
    }

    #[test]
    fn test_generated_name_colliding_with_literal_source_name() {
        let temp_dir = tempdir().unwrap();
        let mut namer = Namer::new(temp_dir.path());

        let first = namer.assign_name(&flat("report.xlsx"));
        let second = namer.assign_name(&flat("report.xlsx"));
        let literal = namer.assign_name(&flat("report_1.xlsx"));

        assert_eq!(file_name(&first), "report.xlsx");
        assert_eq!(file_name(&second), "report_1.xlsx");
        // No attempt to continue the existing sequence
        assert_eq!(file_name(&literal), "report_1_1.xlsx");
    }

    #[test]
    fn test_many_identical_names_stay_distinct() {
        let temp_dir = tempdir().unwrap();
        let mut namer = Namer::new(temp_dir.path());

        let names: HashSet<PathBuf> = (0..50)
            .map(|_| namer.assign_name(&flat("same/name.ppt")))
            .collect();

        assert_eq!(names.len(), 50);
        assert!(names.contains(&temp_dir.path().join("same_name_49.ppt")));
    }

    #[test]
    fn test_assign_from_entry() {
        let temp_dir = tempdir().unwrap();
        let mut namer = Namer::new(temp_dir.path());
        let entry = FileEntry::new(
            Path::new("/src"),
            PathBuf::from("/src/dir2/sub/file2.pptx"),
        )
        .unwrap();

        let path = namer.assign(&entry).unwrap();

        assert_eq!(path, temp_dir.path().join("dir2_sub_file2.pptx"));
    }

    #[test]
    fn test_namer_does_not_touch_destination() {
        let temp_dir = tempdir().unwrap();
        let destination = temp_dir.path().join("not_created");
        let mut namer = Namer::new(&destination);

        namer.assign_name(&flat("a.xlsx"));

        assert!(!destination.exists());
    }
}
