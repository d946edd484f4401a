//! Settings file deserialisation helpers

use std::fmt;
use std::path::PathBuf;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use shellexpand::{full, tilde};

/// Expands `~` and `$VAR` references in a path
///
/// Falls back to tilde expansion alone when a variable is not set, leaving
/// the unknown reference untouched.
pub fn expand_path(path: &str) -> String {
    match full(path) {
        Ok(expanded) => expanded.to_string(),
        Err(_) => tilde(path).to_string(),
    }
}

/// Turns a bare drive segment such as `C:` into the drive root `C:\`
///
/// Only Windows has drive segments; elsewhere the path is returned as is.
pub fn handle_colon_end(mut path: String) -> String {
    if cfg!(windows) && path.ends_with(':') {
        path += "\\";
    };
    path
}

pub fn process_path<S: AsRef<str>>(path: S) -> String {
    let p = expand_path(path.as_ref());
    handle_colon_end(p)
}

/// Joins path segments after expanding each of them
pub fn path_from_segments<I, S>(segments: I) -> PathBuf
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments.into_iter().map(process_path).collect()
}

/// Deserialises an optional path written either as a string or as a list of segments
///
/// ```yaml
/// source: ~/Documents/reports
/// destination:
///   - "~"
///   - "Desktop"
///   - "collected"
/// ```
pub fn deserialize_optional_path<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PathVisitor;

    impl<'de> Visitor<'de> for PathVisitor {
        type Value = Option<PathBuf>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a path string or an array of path segments")
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> std::result::Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Self::Value, E> {
            Ok(Some(PathBuf::from(process_path(value))))
        }

        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut segments = Vec::new();
            while let Some(segment) = seq.next_element::<String>()? {
                segments.push(segment);
            }
            if segments.is_empty() {
                return Ok(None);
            }
            Ok(Some(path_from_segments(segments)))
        }
    }

    deserializer.deserialize_option(PathVisitor)
}

/// Deserialises an extension list written as a sequence or a comma-separated string
pub fn deserialize_extension_list<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ExtensionList {
        List(Vec<String>),
        Joined(String),
    }

    let list = Option::<ExtensionList>::deserialize(deserializer)?;
    Ok(list.map(|list| match list {
        ExtensionList::List(items) => items,
        ExtensionList::Joined(joined) => joined.split(',').map(str::to_string).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(windows)]
    #[test]
    fn test_handle_colon_end() {
        assert_eq!(handle_colon_end("C:".to_string()), "C:\\");
        assert_eq!(handle_colon_end("data".to_string()), "data");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_colon_end_is_kept_outside_windows() {
        assert_eq!(handle_colon_end("backup:".to_string()), "backup:");
        assert_eq!(process_path("/data/backup:"), "/data/backup:");
    }

    #[test]
    fn test_expand_path_without_references() {
        assert_eq!(expand_path("plain/relative"), "plain/relative");
    }

    #[test]
    fn test_path_from_segments() {
        let path = path_from_segments(["reports", "2024", "q1"]);
        assert_eq!(path, PathBuf::from("reports").join("2024").join("q1"));
    }
}
