//! Tag string handling.
//!
//! The creation form carries all tags in a single space-separated field.

/// Split a raw tag field into tag names.
///
/// Runs of whitespace and leading/trailing whitespace never produce empty
/// tags. Repeated names are kept in submission order; storing them will fail
/// on the duplicate link.
pub fn parse_tag_string(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}
