//! Element catalog.
//!
//! Loads the playable elements from embedded JSON. The catalog is read-only
//! once built; lookups return borrows into it, never copies.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::locale::Language;

/// Embed the element table at compile time.
const ELEMENTS_JSON: &str = include_str!("../data/elements.json");

/// Element category, as used by the bond classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Metal,
    Nonmetal,
    Metalloid,
    NobleGas,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Metal,
        Category::Nonmetal,
        Category::Metalloid,
        Category::NobleGas,
    ];

    /// Decode the numeric filter code sent by the UI, in `ALL` order.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Translation key for the category legend.
    pub fn legend_key(&self) -> &'static str {
        match self {
            Self::Metal => "metals",
            Self::Nonmetal => "nonmetals",
            Self::Metalloid => "metalloids",
            Self::NobleGas => "nobleGases",
        }
    }
}

/// A chemical element as shipped in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub symbol: String,
    pub name: String,
    /// Indonesian name.
    pub name_id: String,
    pub atomic_number: u32,
    pub electron_configuration: String,
    pub valence_electrons: u8,
    /// Pauling scale; 0 for noble gases.
    pub electronegativity: f64,
    pub group: u8,
    pub period: u8,
    pub category: Category,
    /// Display hint for the UI. Opaque to game logic.
    pub color: String,
}

impl Element {
    /// Element name in the given language.
    pub fn display_name(&self, language: Language) -> &str {
        match language {
            Language::En => &self.name,
            Language::Id => &self.name_id,
        }
    }

    /// Case-insensitive substring match on symbol or either name.
    /// `term` must already be lowercase.
    fn matches(&self, term: &str) -> bool {
        self.symbol.to_lowercase().contains(term)
            || self.name.to_lowercase().contains(term)
            || self.name_id.to_lowercase().contains(term)
    }

    pub fn is_metal(&self) -> bool {
        self.category == Category::Metal
    }
}

/// Root structure for the JSON file.
#[derive(Debug, Deserialize)]
struct CatalogJSON {
    elements: Vec<Element>,
}

/// Why a catalog could not be built.
#[derive(Debug)]
pub enum CatalogError {
    Parse(serde_json::Error),
    DuplicateSymbol(String),
    DuplicateAtomicNumber(u32),
    ValenceOutOfRange { symbol: String, valence: u8 },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid element table: {}", err),
            Self::DuplicateSymbol(symbol) => write!(f, "duplicate element symbol {}", symbol),
            Self::DuplicateAtomicNumber(n) => write!(f, "duplicate atomic number {}", n),
            Self::ValenceOutOfRange { symbol, valence } => {
                write!(f, "{} has {} valence electrons, expected 1-8", symbol, valence)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Ordered element table with lookup by symbol and atomic number.
pub struct ElementCatalog {
    /// Authored order (atomic number ascending).
    elements: Vec<Element>,
    by_symbol: HashMap<String, usize>,
    by_number: HashMap<u32, usize>,
}

impl ElementCatalog {
    /// Load the catalog from embedded JSON.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_json(ELEMENTS_JSON)
    }

    /// Parse and validate a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: CatalogJSON = serde_json::from_str(json)?;
        let mut by_symbol = HashMap::new();
        let mut by_number = HashMap::new();

        for (index, element) in raw.elements.iter().enumerate() {
            if !(1..=8).contains(&element.valence_electrons) {
                return Err(CatalogError::ValenceOutOfRange {
                    symbol: element.symbol.clone(),
                    valence: element.valence_electrons,
                });
            }
            if by_symbol.insert(element.symbol.clone(), index).is_some() {
                return Err(CatalogError::DuplicateSymbol(element.symbol.clone()));
            }
            if by_number.insert(element.atomic_number, index).is_some() {
                return Err(CatalogError::DuplicateAtomicNumber(element.atomic_number));
            }
        }

        log::debug!("element catalog loaded: {} elements", raw.elements.len());
        Ok(Self {
            elements: raw.elements,
            by_symbol,
            by_number,
        })
    }

    /// Get element by symbol (case-sensitive, e.g. "Na").
    pub fn lookup(&self, symbol: &str) -> Option<&Element> {
        self.by_symbol.get(symbol).map(|&i| &self.elements[i])
    }

    /// Get element by atomic number.
    pub fn get(&self, atomic_number: u32) -> Option<&Element> {
        self.by_number.get(&atomic_number).map(|&i| &self.elements[i])
    }

    /// All elements in authored order.
    pub fn all(&self) -> &[Element] {
        &self.elements
    }

    /// Elements whose symbol, English name, or Indonesian name contains `term`,
    /// ignoring case. An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Element> {
        let term = term.trim().to_lowercase();
        self.elements.iter().filter(|e| e.matches(&term)).collect()
    }

    /// Elements of one category, in authored order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.category == category)
    }

    /// Search restricted to one category, or across all when `category` is `None`.
    pub fn filter(&self, term: &str, category: Option<Category>) -> Vec<&Element> {
        match category {
            Some(category) => {
                let term = term.trim().to_lowercase();
                self.by_category(category).filter(|e| e.matches(&term)).collect()
            }
            None => self.search(term),
        }
    }

    /// Get number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
