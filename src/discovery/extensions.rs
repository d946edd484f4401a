//! Target extension set
//!
//! Extensions are stored normalised: lowercase with a single leading dot.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use crate::constants::DEFAULT_TARGET_EXTENSIONS;

/// Case-insensitive set of file extensions selected for collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetExtensions {
    extensions: BTreeSet<String>,
}

impl Default for TargetExtensions {
    fn default() -> Self {
        TargetExtensions::new(DEFAULT_TARGET_EXTENSIONS)
    }
}

impl TargetExtensions {
    /// Builds a set from any list of extensions
    ///
    /// Items are trimmed, lowercased and given a leading dot when it is
    /// missing, so `"XLSX"`, `"xlsx"` and `".xlsx"` are the same entry.
    /// Blank items are dropped.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .filter_map(|ext| normalise_extension(ext.as_ref()))
            .collect();
        TargetExtensions { extensions }
    }

    /// Parses a comma-separated list such as `".xlsx, .pptx,csv"`
    pub fn parse_list(list: &str) -> Self {
        TargetExtensions::new(list.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Whether the normalised extension is part of the set
    pub fn contains(&self, extension: &str) -> bool {
        normalise_extension(extension).is_some_and(|ext| self.extensions.contains(&ext))
    }

    /// Whether the file's final extension is part of the set
    pub fn matches(&self, path: &Path) -> bool {
        lowercase_extension(path).is_some_and(|ext| self.extensions.contains(&ext))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl fmt::Display for TargetExtensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(", "))
    }
}

/// Returns the file's final extension, lowercased and with its leading dot
///
/// Dot files such as `.xlsx` have no extension, the same as a name without
/// any dot.
pub fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

fn normalise_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(".{}", trimmed.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set() {
        let extensions = TargetExtensions::default();
        assert_eq!(extensions.len(), 4);
        for ext in [".xlsx", ".xls", ".pptx", ".ppt"] {
            assert!(extensions.contains(ext), "{ext} should be collected by default");
        }
        assert!(!extensions.contains(".txt"));
    }

    #[test]
    fn test_normalisation() {
        let extensions = TargetExtensions::new(["XLSX", " .Csv ", "", "  ", "."]);
        assert_eq!(extensions.len(), 2);
        assert!(extensions.contains(".xlsx"));
        assert!(extensions.contains("csv"));
    }

    #[test]
    fn test_parse_list() {
        let extensions = TargetExtensions::parse_list(".custom, .DOCX,,");
        assert_eq!(extensions.iter().collect::<Vec<_>>(), vec![".custom", ".docx"]);
        assert!(TargetExtensions::parse_list(" , ").is_empty());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let extensions = TargetExtensions::default();
        assert!(extensions.matches(Path::new("dir/Report.XLSX")));
        assert!(extensions.matches(Path::new("slides.Ppt")));
        assert!(!extensions.matches(Path::new("notes.txt")));
        assert!(!extensions.matches(Path::new("README")));
    }

    #[test]
    fn test_only_final_extension_counts() {
        let extensions = TargetExtensions::default();
        assert!(!extensions.matches(Path::new("backup.xlsx.bak")));
        assert!(extensions.matches(Path::new("archive.2024.xls")));
    }

    #[test]
    fn test_dot_file_has_no_extension() {
        let extensions = TargetExtensions::default();
        assert!(!extensions.matches(Path::new(".xlsx")));
        assert_eq!(lowercase_extension(Path::new(".xlsx")), None);
        assert_eq!(
            lowercase_extension(Path::new("a/b.PPTX")),
            Some(".pptx".to_string())
        );
    }

    #[test]
    fn test_display() {
        let extensions = TargetExtensions::new([".xls", ".ppt"]);
        assert_eq!(extensions.to_string(), ".ppt, .xls");
    }
}
