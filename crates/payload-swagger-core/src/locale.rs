//! Localized admin strings.
//!
//! Collection descriptions and field labels are either a plain string or a
//! map of locale code to string. [`extract_by_locale`] picks the one to put
//! into the document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// A string that may be localized per locale code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    /// The same text for every locale.
    Plain(String),

    /// Text keyed by locale code, in declaration order.
    Localized(Map<String, Value>),

    /// Anything else the host accepts here (`false` disables a label).
    Other(Value),
}

impl LocalizedText {
    /// Resolve the text for `locale`.
    ///
    /// Falls back to the first entry of a localized map when the locale is
    /// missing. Empty strings resolve to nothing.
    #[must_use]
    pub fn resolve(&self, locale: &str) -> Option<&str> {
        let text = match self {
            Self::Plain(text) => Some(text.as_str()),
            Self::Localized(map) => map
                .get(locale)
                .or_else(|| map.values().next())
                .and_then(Value::as_str),
            Self::Other(_) => None,
        };
        text.filter(|text| !text.is_empty())
    }
}

impl From<&str> for LocalizedText {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_owned())
    }
}

/// Extract a human readable string from an optional localized value.
#[must_use]
pub fn extract_by_locale<'a>(input: Option<&'a LocalizedText>, locale: &str) -> Option<&'a str> {
    input.and_then(|text| text.resolve(locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn localized(value: Value) -> LocalizedText {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_absent_input_resolves_to_nothing() {
        assert_eq!(extract_by_locale(None, "en"), None);
    }

    #[test]
    fn test_plain_string_is_returned_unchanged() {
        let text = LocalizedText::from("Blog posts");
        assert_eq!(extract_by_locale(Some(&text), "de"), Some("Blog posts"));
    }

    #[test]
    fn test_preferred_locale_wins() {
        let text = localized(json!({"en": "Posts", "ru": "Записи"}));
        assert_eq!(text.resolve("ru"), Some("Записи"));
        assert_eq!(text.resolve("en"), Some("Posts"));
    }

    #[test]
    fn test_missing_locale_falls_back_to_first_entry() {
        let text = localized(json!({"ru": "Записи", "en": "Posts"}));
        assert_eq!(text.resolve("fr"), Some("Записи"));
    }

    #[test]
    fn test_empty_values_resolve_to_nothing() {
        assert_eq!(LocalizedText::from("").resolve("en"), None);
        assert_eq!(localized(json!({})).resolve("en"), None);
        assert_eq!(localized(json!(false)).resolve("en"), None);
    }

    #[test]
    fn test_deserializes_each_shape() {
        assert!(matches!(localized(json!("x")), LocalizedText::Plain(_)));
        assert!(matches!(
            localized(json!({"en": "x"})),
            LocalizedText::Localized(_)
        ));
        assert!(matches!(localized(json!(false)), LocalizedText::Other(_)));
    }
}
