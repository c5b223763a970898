//! Helpers for the multi-language JSONB payloads carried by most content
//! entities.
//!
//! A translations value is a JSON object keyed by language code
//! (`{"en": {...}, "bn": {...}}`). Reads resolve a requested language with
//! fallback to English; updates merge per language key so that submitting
//! one language never wipes the others.

use serde_json::{Map, Value};

use crate::error::CoreError;

/// Default language used as a fallback when a requested translation is
/// missing.
pub const DEFAULT_LANG: &str = "en";

/// Validate that a translations payload is a JSON object.
///
/// The object may be empty; values per language are free-form and validated
/// by the entity that owns them (e.g. the header requires a `menus` array).
pub fn validate(value: &Value) -> Result<(), CoreError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "translations must be a JSON object keyed by language code".into(),
        ))
    }
}

/// Resolve the translation block for `lang`, falling back to
/// [`DEFAULT_LANG`] and then to an empty object.
pub fn resolve<'a>(translations: &'a Value, lang: &str) -> &'a Value {
    static EMPTY: Value = Value::Null;
    translations
        .get(lang)
        .or_else(|| translations.get(DEFAULT_LANG))
        .unwrap_or(&EMPTY)
}

/// Merge `incoming` over `existing`, shallowly, per language key.
///
/// A language block present in `incoming` replaces the same block in
/// `existing` wholesale; languages absent from `incoming` are kept.
pub fn merge(existing: &Value, incoming: &Value) -> Value {
    let mut out: Map<String, Value> = existing
        .as_object()
        .cloned()
        .unwrap_or_default();
    if let Some(new) = incoming.as_object() {
        for (lang, block) in new {
            out.insert(lang.clone(), block.clone());
        }
    }
    Value::Object(out)
}

/// Copy the whole translation tree of `from` onto `to`, returning the new
/// payload. Errors if the source language has no content.
pub fn copy_language(translations: &Value, from: &str, to: &str) -> Result<Value, CoreError> {
    let source = translations
        .get(from)
        .cloned()
        .ok_or_else(|| CoreError::Validation(format!("no content for source language '{from}'")))?;

    let mut out = translations.as_object().cloned().unwrap_or_default();
    out.insert(to.to_string(), source);
    Ok(Value::Object(out))
}

/// Replace one named section inside one language block.
///
/// Creates the language block if it does not exist yet.
pub fn set_section(
    translations: &Value,
    lang: &str,
    section: &str,
    content: Value,
) -> Value {
    let mut out = translations.as_object().cloned().unwrap_or_default();
    let block = out
        .entry(lang.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !block.is_object() {
        *block = Value::Object(Map::new());
    }
    block
        .as_object_mut()
        .expect("block was just made an object")
        .insert(section.to_string(), content);
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validate_rejects_non_objects() {
        assert!(validate(&json!({"en": {}})).is_ok());
        assert!(validate(&json!("en")).is_err());
        assert!(validate(&json!([1, 2])).is_err());
    }

    #[test]
    fn resolve_falls_back_to_english() {
        let t = json!({"en": {"name": "Cardiology"}, "bn": {"name": "হৃদরোগ"}});
        assert_eq!(resolve(&t, "bn")["name"], "হৃদরোগ");
        assert_eq!(resolve(&t, "fr")["name"], "Cardiology");
        assert!(resolve(&json!({}), "en").is_null());
    }

    #[test]
    fn merge_replaces_per_language() {
        let existing = json!({"en": {"name": "Old"}, "bn": {"name": "পুরনো"}});
        let incoming = json!({"en": {"name": "New"}});
        let merged = merge(&existing, &incoming);
        assert_eq!(merged["en"]["name"], "New");
        assert_eq!(merged["bn"]["name"], "পুরনো");
    }

    #[test]
    fn copy_language_duplicates_tree() {
        let t = json!({"en": {"hero": {"title": "Welcome"}}});
        let copied = copy_language(&t, "en", "bn").unwrap();
        assert_eq!(copied["bn"]["hero"]["title"], "Welcome");
        assert_eq!(copied["en"]["hero"]["title"], "Welcome");

        assert!(copy_language(&t, "fr", "bn").is_err());
    }

    #[test]
    fn set_section_creates_missing_language() {
        let t = json!({"en": {"hero": {}}});
        let updated = set_section(&t, "bn", "hero", json!({"title": "শিরোনাম"}));
        assert_eq!(updated["bn"]["hero"]["title"], "শিরোনাম");
        assert_eq!(updated["en"], json!({"hero": {}}));
    }
}
