//! Field conversion rules shared by the builders.
//!
//! IMDb writes `\N` for missing values. None of these functions fail: a
//! value that cannot be interpreted is normalized (absent, false, dropped,
//! truncated) instead.

use std::str::FromStr;
use tracing::debug;

/// The two-character missing-value marker used throughout the datasets
pub const SENTINEL: &str = "\\N";

/// Parse an optional base-10 integer.
///
/// The sentinel becomes `None`. So does anything else that fails to parse.
pub fn optional_int(value: &str) -> Option<i32> {
    if value == SENTINEL {
        return None;
    }
    match value.parse() {
        Ok(n) => Some(n),
        Err(e) => {
            debug!("Ignoring non-numeric value {:?}: {}", value, e);
            None
        }
    }
}

/// Parse a value the row cannot do without (ratings, orderings).
///
/// Returns `None` for the sentinel or an unparseable value; the caller
/// skips the row.
pub fn required<T: FromStr>(value: &str) -> Option<T> {
    if value == SENTINEL {
        return None;
    }
    value.parse().ok()
}

/// External id of the row's entity; empty or sentinel ids are unusable
pub fn required_id(value: &str) -> Option<String> {
    if value.is_empty() || value == SENTINEL {
        None
    } else {
        Some(value.to_string())
    }
}

/// Boolean stored as "0"/"1"; only the literal "1" is true
pub fn flag(value: &str) -> bool {
    value == "1"
}

/// Optional free text; the sentinel becomes `None`
pub fn optional_text(value: &str) -> Option<String> {
    if value == SENTINEL {
        None
    } else {
        Some(value.to_string())
    }
}

/// Free text where the sentinel is stored as an empty string
pub fn text_or_empty(value: &str) -> String {
    optional_text(value).unwrap_or_default()
}

/// Cut `value` to at most `max` characters
pub fn truncate_chars(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        Some((idx, _)) => value[..idx].to_string(),
        None => value.to_string(),
    }
}

/// Split a comma-separated list of codes, keeping those `resolve` knows.
///
/// Unknown codes and the sentinel are dropped; duplicates are kept once.
pub fn split_codes<T, F>(value: &str, resolve: F) -> Vec<T>
where
    T: PartialEq,
    F: Fn(&str) -> Option<T>,
{
    let mut out = Vec::new();
    for item in value.split(',').filter_map(&resolve) {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// Split a comma-separated list of external ids, dropping the sentinel
pub fn split_ids(value: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for id in value.split(',') {
        if id.is_empty() || id == SENTINEL {
            continue;
        }
        if !out.iter().any(|seen| seen == id) {
            out.push(id.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::Lookups;
    use crate::types::Genre;

    #[test]
    fn test_optional_int() {
        assert_eq!(optional_int("1894"), Some(1894));
        assert_eq!(optional_int("\\N"), None);
        assert_eq!(optional_int("-3"), Some(-3));
        assert_eq!(optional_int("12a"), None);
        assert_eq!(optional_int(""), None);
    }

    #[test]
    fn test_required() {
        assert_eq!(required::<f64>("5.7"), Some(5.7));
        assert_eq!(required::<i64>("1882"), Some(1882));
        assert_eq!(required::<i64>("\\N"), None);
        assert_eq!(required::<i64>("many"), None);
        assert_eq!(required_id("tt0000001"), Some("tt0000001".to_string()));
        assert_eq!(required_id("\\N"), None);
        assert_eq!(required_id(""), None);
    }

    #[test]
    fn test_flag() {
        assert!(flag("1"));
        assert!(!flag("0"));
        assert!(!flag("\\N"));
        assert!(!flag("true"));
        assert!(!flag(" 1"));
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("US"), Some("US".to_string()));
        assert_eq!(optional_text("\\N"), None);
        assert_eq!(text_or_empty("\\N"), "");
        assert_eq!(text_or_empty("director"), "director");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("", 3), "");
        // multi-byte characters count once
        assert_eq!(truncate_chars("ééééé", 2), "éé");
    }

    #[test]
    fn test_split_codes() {
        let lookups = Lookups::new();
        let genres = split_codes("Documentary,Short", |c| lookups.genre(c));
        assert_eq!(genres, vec![Genre::Documentary, Genre::Short]);

        let genres = split_codes("Drama,Unknown,Drama", |c| lookups.genre(c));
        assert_eq!(genres, vec![Genre::Drama]);

        let genres = split_codes("\\N", |c| lookups.genre(c));
        assert!(genres.is_empty());
    }

    #[test]
    fn test_split_ids() {
        assert_eq!(split_ids("nm0005690,nm0374658"), vec!["nm0005690", "nm0374658"]);
        assert!(split_ids("\\N").is_empty());
        assert_eq!(split_ids("nm1,\\N,,nm1"), vec!["nm1"]);
    }
}
