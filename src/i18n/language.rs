//! Language record as stored in the `languages` table.

use serde::{Deserialize, Serialize};

/// Code of the language every entry is expected to carry.
///
/// Used as the final fallback when the active language has no value and
/// when the registry has no usable default.
pub const FALLBACK_LANGUAGE: &str = "en";

/// A supported storefront language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Short language code (e.g., "en", "sq")
    pub code: String,

    /// Display name shown in the language picker
    #[serde(rename = "name")]
    pub display_name: String,

    /// Flag identifier used by the picker (e.g., "gb", "al")
    #[serde(rename = "flag")]
    pub flag_identifier: String,

    /// Whether this language is selected when the visitor has no preference
    #[serde(default)]
    pub is_default: bool,
}

impl Language {
    pub fn new(code: &str, display_name: &str, flag_identifier: &str, is_default: bool) -> Self {
        Self {
            code: code.to_string(),
            display_name: display_name.to_string(),
            flag_identifier: flag_identifier.to_string(),
            is_default,
        }
    }
}
