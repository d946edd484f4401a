//! Flat file names
//!
//! A flat name encodes a file's relative path in a single file name by
//! joining the directory segments and the leaf's stem with [`JOIN_CHAR`].
//! The leaf's extension is kept apart so collision suffixes land in front of
//! it.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use crate::constants::JOIN_CHAR;

/// Candidate output file name, split into stem and extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatName {
    stem: OsString,
    extension: Option<OsString>,
}

impl FlatName {
    /// Builds the flat name for a relative path given as segments, leaf last
    ///
    /// Returns `None` for an empty segment list.
    pub fn from_segments<S: AsRef<OsStr>>(segments: &[S]) -> Option<Self> {
        let (leaf, directories) = segments.split_last()?;
        let leaf = Path::new(leaf.as_ref());

        let mut stem = OsString::new();
        for directory in directories {
            stem.push(directory.as_ref());
            stem.push(JOIN_CHAR);
        }
        // A leaf without an extension keeps its whole name as the stem
        stem.push(leaf.file_stem().unwrap_or(leaf.as_os_str()));

        Some(FlatName {
            stem,
            extension: leaf.extension().map(OsStr::to_os_string),
        })
    }

    /// Builds the flat name for a relative path
    pub fn from_relative_path(relative: &Path) -> Option<Self> {
        let segments: Vec<&OsStr> = relative.iter().collect();
        FlatName::from_segments(&segments)
    }

    /// The name without any collision suffix: `stem.ext`
    pub fn base(&self) -> OsString {
        self.compose(None)
    }

    /// The name with a collision suffix: `stem_N.ext`
    pub fn with_suffix(&self, counter: usize) -> OsString {
        self.compose(Some(counter))
    }

    pub fn stem(&self) -> &OsStr {
        &self.stem
    }

    pub fn extension(&self) -> Option<&OsStr> {
        self.extension.as_deref()
    }

    fn compose(&self, counter: Option<usize>) -> OsString {
        let mut name = self.stem.clone();
        if let Some(counter) = counter {
            name.push(format!("{JOIN_CHAR}{counter}"));
        }
        if let Some(extension) = &self.extension {
            name.push(".");
            name.push(extension);
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_path() {
        let name = FlatName::from_relative_path(Path::new("dir2/sub/file2.pptx")).unwrap();
        assert_eq!(name.base(), OsString::from("dir2_sub_file2.pptx"));
        assert_eq!(name.stem(), OsStr::new("dir2_sub_file2"));
        assert_eq!(name.extension(), Some(OsStr::new("pptx")));
    }

    #[test]
    fn test_top_level_file_keeps_its_name() {
        let name = FlatName::from_relative_path(Path::new("file.xlsx")).unwrap();
        assert_eq!(name.base(), OsString::from("file.xlsx"));
    }

    #[test]
    fn test_extension_case_is_preserved() {
        let name = FlatName::from_relative_path(Path::new("A/Report.XLSX")).unwrap();
        assert_eq!(name.base(), OsString::from("A_Report.XLSX"));
    }

    #[test]
    fn test_only_leaf_extension_is_split_off() {
        let name = FlatName::from_relative_path(Path::new("v1.2/data.backup.xls")).unwrap();
        assert_eq!(name.stem(), OsStr::new("v1.2_data.backup"));
        assert_eq!(name.with_suffix(1), OsString::from("v1.2_data.backup_1.xls"));
    }

    #[test]
    fn test_suffix_is_plain_concatenation() {
        let name = FlatName::from_relative_path(Path::new("report_1.xlsx")).unwrap();
        assert_eq!(name.with_suffix(1), OsString::from("report_1_1.xlsx"));
        assert_eq!(name.with_suffix(12), OsString::from("report_1_12.xlsx"));
    }

    #[test]
    fn test_leaf_without_extension() {
        let name = FlatName::from_segments(&["dir", "Makefile"]).unwrap();
        assert_eq!(name.base(), OsString::from("dir_Makefile"));
        assert_eq!(name.with_suffix(2), OsString::from("dir_Makefile_2"));
    }

    #[test]
    fn test_empty_segments() {
        let segments: [&str; 0] = [];
        assert!(FlatName::from_segments(&segments).is_none());
    }
}
