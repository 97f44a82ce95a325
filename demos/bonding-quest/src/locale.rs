//! UI languages and the translation table.
//!
//! Lookups never fail: an unknown key renders as the key itself.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Embed the translation table at compile time.
const TRANSLATIONS_JSON: &str = include_str!("../data/translations.json");

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    /// Indonesian.
    Id,
}

impl Language {
    /// The other language.
    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Id,
            Self::Id => Self::En,
        }
    }

    /// Decode the numeric code sent by the UI (0 = en, 1 = id).
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::En),
            1 => Some(Self::Id),
            _ => None,
        }
    }
}

/// Key → string tables for every language.
#[derive(Debug, Clone, Deserialize)]
pub struct Translations {
    en: HashMap<String, String>,
    id: HashMap<String, String>,
}

impl Translations {
    /// Load the embedded table.
    pub fn load() -> Result<Self, serde_json::Error> {
        Self::from_json(TRANSLATIONS_JSON)
    }

    /// Parse a table from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn table(&self, language: Language) -> &HashMap<String, String> {
        match language {
            Language::En => &self.en,
            Language::Id => &self.id,
        }
    }

    /// Bind the table to a language.
    pub fn localizer(&self, language: Language) -> Localizer<'_> {
        Localizer {
            table: self,
            language,
        }
    }
}

/// Translation lookup for one language. Borrows its table, so it cannot
/// outlive the provider that created it.
#[derive(Debug, Clone, Copy)]
pub struct Localizer<'a> {
    table: &'a Translations,
    language: Language,
}

impl<'a> Localizer<'a> {
    pub fn language(&self) -> Language {
        self.language
    }

    /// Translate `key`, falling back to the key itself on a miss.
    pub fn translate<'k>(&self, key: &'k str) -> &'k str
    where
        'a: 'k,
    {
        match self.table.table(self.language).get(key) {
            Some(text) => text.as_str(),
            None => {
                log::debug!("missing {:?} translation for {}", self.language, key);
                key
            }
        }
    }
}
