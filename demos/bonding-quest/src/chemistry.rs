//! Pure chemistry logic - bond classification.
//!
//! No engine or rendering dependencies.

use serde::{Deserialize, Serialize};

use crate::elements::{Category, Element};

/// Electronegativity difference at or above which a metal/nonmetal pair is ionic.
pub const DEFAULT_IONIC_THRESHOLD: f64 = 1.7;

/// How two elements bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BondType {
    /// Electrons transferred from a metal to a nonmetal.
    Ionic,
    /// Electrons shared.
    Covalent,
    /// Electron sea between metal atoms.
    Metallic,
}

impl BondType {
    pub const ALL: [BondType; 3] = [BondType::Ionic, BondType::Covalent, BondType::Metallic];

    /// Translation key for the bond type label.
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::Ionic => "ionic",
            Self::Covalent => "covalent",
            Self::Metallic => "metallic",
        }
    }

    /// Stable numeric code for the event buffer.
    pub fn code(&self) -> u32 {
        match self {
            Self::Ionic => 0,
            Self::Covalent => 1,
            Self::Metallic => 2,
        }
    }
}

/// Absolute electronegativity difference between two elements.
pub fn electronegativity_difference(a: &Element, b: &Element) -> f64 {
    (a.electronegativity - b.electronegativity).abs()
}

/// Classification rules with a tunable ionic threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondRules {
    pub ionic_threshold: f64,
}

impl Default for BondRules {
    fn default() -> Self {
        Self {
            ionic_threshold: DEFAULT_IONIC_THRESHOLD,
        }
    }
}

impl BondRules {
    pub fn new(ionic_threshold: f64) -> Self {
        Self { ionic_threshold }
    }

    /// Classify the bond between two elements. Total and symmetric in its operands.
    pub fn classify(&self, a: &Element, b: &Element) -> BondType {
        match (a.category, b.category) {
            (Category::Metal, Category::Metal) => BondType::Metallic,
            (Category::Metal, Category::Nonmetal) | (Category::Nonmetal, Category::Metal) => {
                if electronegativity_difference(a, b) >= self.ionic_threshold {
                    BondType::Ionic
                } else {
                    BondType::Covalent
                }
            }
            // Nonmetal pairs, and anything involving a metalloid or noble gas
            _ => BondType::Covalent,
        }
    }
}

/// Classify with the default threshold.
pub fn classify(a: &Element, b: &Element) -> BondType {
    BondRules::default().classify(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ElementCatalog;

    fn catalog() -> ElementCatalog {
        ElementCatalog::load().unwrap()
    }

    fn pair(catalog: &ElementCatalog, a: &str, b: &str) -> BondType {
        classify(catalog.lookup(a).unwrap(), catalog.lookup(b).unwrap())
    }

    #[test]
    fn metal_metal_is_metallic() {
        let c = catalog();
        assert_eq!(pair(&c, "Na", "K"), BondType::Metallic);
        assert_eq!(pair(&c, "Fe", "Cu"), BondType::Metallic);
    }

    #[test]
    fn sodium_chlorine_is_ionic() {
        // |0.93 - 3.16| = 2.23
        let c = catalog();
        assert_eq!(pair(&c, "Na", "Cl"), BondType::Ionic);
        assert_eq!(pair(&c, "Cl", "Na"), BondType::Ionic);
    }

    #[test]
    fn small_difference_metal_nonmetal_is_covalent() {
        // Fe 1.83, O 3.44 -> 1.61
        let c = catalog();
        assert_eq!(pair(&c, "Fe", "O"), BondType::Covalent);
        // Be 1.57, H 2.2 -> 0.63
        assert_eq!(pair(&c, "Be", "H"), BondType::Covalent);
    }

    #[test]
    fn nonmetal_pairs_are_covalent() {
        let c = catalog();
        assert_eq!(pair(&c, "H", "O"), BondType::Covalent);
        assert_eq!(pair(&c, "C", "O"), BondType::Covalent);
    }

    #[test]
    fn metalloid_and_noble_gas_pairs_are_covalent() {
        let c = catalog();
        // Na + Si would be 0.97 apart, but metalloids never take the ionic path.
        assert_eq!(pair(&c, "K", "B"), BondType::Covalent);
        assert_eq!(pair(&c, "Na", "Ne"), BondType::Covalent);
        assert_eq!(pair(&c, "Ar", "Ar"), BondType::Covalent);
    }

    #[test]
    fn same_element_twice_is_legal() {
        let c = catalog();
        assert_eq!(pair(&c, "Cu", "Cu"), BondType::Metallic);
        assert_eq!(pair(&c, "O", "O"), BondType::Covalent);
    }

    #[test]
    fn threshold_is_inclusive() {
        let c = catalog();
        let na = c.lookup("Na").unwrap();
        let cl = c.lookup("Cl").unwrap();
        let diff = electronegativity_difference(na, cl);
        assert_eq!(BondRules::new(diff).classify(na, cl), BondType::Ionic);
        assert_eq!(BondRules::new(diff + 0.01).classify(na, cl), BondType::Covalent);
    }

    #[test]
    fn symmetric_and_total_over_catalog() {
        let c = catalog();
        let rules = BondRules::default();
        for a in c.all() {
            for b in c.all() {
                let ab = rules.classify(a, b);
                assert_eq!(ab, rules.classify(b, a), "{} + {}", a.symbol, b.symbol);
                assert_eq!(ab, rules.classify(a, b));
            }
        }
    }

    #[test]
    fn label_keys() {
        assert_eq!(BondType::Metallic.label_key(), "metallic");
        assert_eq!(serde_json::to_string(&BondType::Ionic).unwrap(), "\"ionic\"");
    }
}
