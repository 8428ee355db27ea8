//! Comma-list normalization for array-typed catalog fields.
//!
//! Product colors, sizes, and tags are ordered lists of short strings. The
//! catalog backend has sent these both as JSON arrays and as a single
//! comma-joined string, and the edit form additionally projects them as an
//! editable comma-separated text field. Everything funnels through one
//! canonical form: trimmed, non-empty strings, none containing a comma, so
//! the list and its text projection always round-trip exactly.

use serde::{Deserialize, Deserializer};

/// Parse a comma-separated string into the canonical list form.
///
/// Splits on commas, trims each entry, and drops empties. Idempotent when
/// composed with [`join_comma_list`].
#[must_use]
pub fn normalize_comma_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Render a canonical list as its editable text projection, e.g. `a, b, c`.
#[must_use]
pub fn join_comma_list(items: &[String]) -> String {
    items.join(", ")
}

/// Boundary representation of an array-typed field.
///
/// Exists only at the deserialization boundary; call [`into_vec`](Self::into_vec)
/// immediately and never pass the union further.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    /// A single comma-joined string, e.g. `"Red, Blue"`.
    Text(String),
    /// An already-split sequence. Entries may still carry whitespace or
    /// embedded commas and are renormalized.
    List(Vec<String>),
}

impl TextOrList {
    /// Normalize into the canonical list form.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Text(text) => normalize_comma_list(&text),
            Self::List(items) => items
                .iter()
                .flat_map(|item| item.split(','))
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Serde adapter for fields that may arrive as string, sequence, or null.
///
/// Use with `#[serde(default, deserialize_with = "deserialize_comma_list")]`
/// so a missing field also becomes the empty list.
///
/// # Errors
///
/// Returns the deserializer's error if the value is neither a string, a
/// sequence of strings, nor null.
pub fn deserialize_comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrList>::deserialize(deserializer)?;
    Ok(value.map_or_else(Vec::new, TextOrList::into_vec))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_drops_empties() {
        assert_eq!(normalize_comma_list("a, b ,,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize_comma_list(""), Vec::<String>::new());
        assert_eq!(normalize_comma_list(" , ,"), Vec::<String>::new());
    }

    #[test]
    fn test_normalize_preserves_order() {
        assert_eq!(
            normalize_comma_list("Large, Small, Medium"),
            vec!["Large", "Small", "Medium"]
        );
    }

    #[test]
    fn test_normalize_idempotent() {
        let once = normalize_comma_list("Red,  Blue ,, Green");
        let twice = normalize_comma_list(&join_comma_list(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_join_is_display_form() {
        let items = vec!["Red".to_owned(), "Blue".to_owned()];
        assert_eq!(join_comma_list(&items), "Red, Blue");
    }

    #[test]
    fn test_union_from_string() {
        let value: TextOrList = serde_json::from_str("\"Red, Blue\"").unwrap();
        assert_eq!(value.into_vec(), vec!["Red", "Blue"]);
    }

    #[test]
    fn test_union_from_sequence() {
        let value: TextOrList = serde_json::from_str(r#"[" Red ", "Blue", ""]"#).unwrap();
        assert_eq!(value.into_vec(), vec!["Red", "Blue"]);
    }

    #[test]
    fn test_union_resplits_embedded_commas() {
        let value: TextOrList = serde_json::from_str(r#"["Red, Blue", "Green"]"#).unwrap();
        assert_eq!(value.into_vec(), vec!["Red", "Blue", "Green"]);
    }

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        #[serde(default, deserialize_with = "deserialize_comma_list")]
        colors: Vec<String>,
    }

    #[test]
    fn test_adapter_accepts_string_field() {
        let wrapper: Wrapper = serde_json::from_str(r#"{"colors": "Red, Blue"}"#).unwrap();
        assert_eq!(wrapper.colors, vec!["Red", "Blue"]);
    }

    #[test]
    fn test_adapter_accepts_sequence_field() {
        let wrapper: Wrapper = serde_json::from_str(r#"{"colors": ["Red", "Blue"]}"#).unwrap();
        assert_eq!(wrapper.colors, vec!["Red", "Blue"]);
    }

    #[test]
    fn test_adapter_null_and_missing_become_empty() {
        let wrapper: Wrapper = serde_json::from_str(r#"{"colors": null}"#).unwrap();
        assert!(wrapper.colors.is_empty());

        let wrapper: Wrapper = serde_json::from_str("{}").unwrap();
        assert!(wrapper.colors.is_empty());
    }
}
