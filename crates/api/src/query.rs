//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;

use carelink_core::translations::DEFAULT_LANG;

/// Language selector (`?lang=`), defaulting to English.
///
/// Used by every read endpoint on a translated entity.
#[derive(Debug, Deserialize)]
pub struct LangParams {
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}
