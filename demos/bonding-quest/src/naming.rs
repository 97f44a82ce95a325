//! Compound formula and naming.
//!
//! A curated table of well-known compounds wins over generic name
//! composition whenever the computed formula matches one of its keys exactly.

use serde::Serialize;
use std::fmt;

use crate::chemistry::{BondRules, BondType};
use crate::elements::Element;
use crate::locale::Language;

/// A compound formed from two elements. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Compound {
    pub formula: String,
    pub name: String,
    pub bond_type: BondType,
    pub description: &'static str,
}

/// Known compounds, keyed by exact formula.
struct CuratedName {
    formula: &'static str,
    en: &'static str,
    id: &'static str,
}

const CURATED_NAMES: [CuratedName; 10] = [
    CuratedName {
        formula: "NaCl",
        en: "Sodium Chloride",
        id: "Natrium Klorida",
    },
    CuratedName {
        formula: "H2O",
        en: "Water",
        id: "Air",
    },
    CuratedName {
        formula: "CO2",
        en: "Carbon Dioxide",
        id: "Karbon Dioksida",
    },
    CuratedName {
        formula: "NH3",
        en: "Ammonia",
        id: "Amonia",
    },
    CuratedName {
        formula: "CH4",
        en: "Methane",
        id: "Metana",
    },
    CuratedName {
        formula: "HCl",
        en: "Hydrogen Chloride",
        id: "Hidrogen Klorida",
    },
    CuratedName {
        formula: "CaO",
        en: "Calcium Oxide",
        id: "Kalsium Oksida",
    },
    CuratedName {
        formula: "MgO",
        en: "Magnesium Oxide",
        id: "Magnesium Oksida",
    },
    CuratedName {
        formula: "Al2O3",
        en: "Aluminum Oxide",
        id: "Aluminium Oksida",
    },
    CuratedName {
        formula: "Fe2O3",
        en: "Iron(III) Oxide",
        id: "Besi(III) Oksida",
    },
];

/// Curated name for an exact formula, if the compound is a known one.
pub fn curated_name(formula: &str, language: Language) -> Option<&'static str> {
    CURATED_NAMES
        .iter()
        .find(|c| c.formula == formula)
        .map(|c| match language {
            Language::En => c.en,
            Language::Id => c.id,
        })
}

/// Fixed explanation of a bond type.
pub fn bond_description(bond_type: BondType, language: Language) -> &'static str {
    match (bond_type, language) {
        (BondType::Ionic, Language::En) => {
            "Electrons are transferred from metal to nonmetal, creating charged ions that attract each other."
        }
        (BondType::Ionic, Language::Id) => {
            "Elektron ditransfer dari logam ke nonlogam, menciptakan ion bermuatan yang saling tarik-menarik."
        }
        (BondType::Covalent, Language::En) => {
            "Electrons are shared between atoms to achieve stable electron configurations."
        }
        (BondType::Covalent, Language::Id) => {
            "Elektron dibagi antara atom untuk mencapai konfigurasi elektron yang stabil."
        }
        (BondType::Metallic, Language::En) => {
            "Electrons form a 'sea' that moves freely between metal atoms, creating strong bonds."
        }
        (BondType::Metallic, Language::Id) => {
            "Elektron membentuk 'lautan' yang bergerak bebas antara atom logam, menciptakan ikatan yang kuat."
        }
    }
}

/// Charge balancing failed for an ionic pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// The metal's valence count yields no charge (8 valence electrons).
    ZeroMetalCharge { symbol: String },
    /// The nonmetal already has a full octet.
    ZeroNonmetalCharge { symbol: String },
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMetalCharge { symbol } => {
                write!(f, "metal {} carries no ionic charge", symbol)
            }
            Self::ZeroNonmetalCharge { symbol } => {
                write!(f, "nonmetal {} carries no ionic charge", symbol)
            }
        }
    }
}

impl std::error::Error for FormulaError {}

/// Ion charge of a metal: loses up to four electrons, otherwise gains to eight.
pub fn metal_charge(valence: u8) -> i32 {
    let valence = valence as i32;
    if valence <= 4 {
        valence
    } else {
        valence - 8
    }
}

/// Ion charge of a nonmetal: gains electrons up to eight.
pub fn nonmetal_charge(valence: u8) -> i32 {
    valence as i32 - 8
}

/// Charge-balanced formula for a metal/nonmetal pair, metal first.
///
/// Counts come from the cross product of the two charges, not their least
/// common multiple, so Mg + O balances to `Mg2O2`.
pub fn ionic_formula(metal: &Element, nonmetal: &Element) -> Result<String, FormulaError> {
    let metal_q = metal_charge(metal.valence_electrons);
    let nonmetal_q = nonmetal_charge(nonmetal.valence_electrons);
    if metal_q == 0 {
        return Err(FormulaError::ZeroMetalCharge { symbol: metal.symbol.clone() });
    }
    if nonmetal_q == 0 {
        return Err(FormulaError::ZeroNonmetalCharge { symbol: nonmetal.symbol.clone() });
    }

    let cross = (metal_q * nonmetal_q).abs();
    let metal_count = cross / metal_q.abs();
    let nonmetal_count = cross / nonmetal_q.abs();

    Ok(format!(
        "{}{}{}{}",
        metal.symbol,
        subscript(metal_count),
        nonmetal.symbol,
        subscript(nonmetal_count),
    ))
}

fn subscript(count: i32) -> String {
    if count > 1 {
        count.to_string()
    } else {
        String::new()
    }
}

impl BondRules {
    /// Formula of the compound formed by `a` and `b`.
    ///
    /// Covalent and metallic formulas are the two symbols concatenated in
    /// operand order, with no stoichiometry.
    pub fn formula(&self, a: &Element, b: &Element) -> String {
        self.formula_for(self.classify(a, b), a, b)
    }

    fn formula_for(&self, bond_type: BondType, a: &Element, b: &Element) -> String {
        match bond_type {
            BondType::Ionic => {
                let (metal, nonmetal) = if a.is_metal() { (a, b) } else { (b, a) };
                ionic_formula(metal, nonmetal).unwrap_or_else(|err| {
                    log::warn!("{}; using plain symbols", err);
                    format!("{}{}", a.symbol, b.symbol)
                })
            }
            BondType::Covalent | BondType::Metallic => format!("{}{}", a.symbol, b.symbol),
        }
    }

    /// Display name of the compound formed by `a` and `b`.
    pub fn compound_name(&self, a: &Element, b: &Element, language: Language) -> String {
        let bond_type = self.classify(a, b);
        let formula = self.formula_for(bond_type, a, b);
        name_for(bond_type, &formula, a, b, language)
    }

    /// Everything the results screen shows about the pair.
    pub fn compound(&self, a: &Element, b: &Element, language: Language) -> Compound {
        let bond_type = self.classify(a, b);
        let formula = self.formula_for(bond_type, a, b);
        let name = name_for(bond_type, &formula, a, b, language);
        Compound {
            formula,
            name,
            bond_type,
            description: bond_description(bond_type, language),
        }
    }
}

fn name_for(
    bond_type: BondType,
    formula: &str,
    a: &Element,
    b: &Element,
    language: Language,
) -> String {
    // Exact curated match takes priority over generic composition.
    if let Some(name) = curated_name(formula, language) {
        return name.to_string();
    }

    let first = a.display_name(language);
    let second = b.display_name(language);
    match (bond_type, language) {
        (BondType::Ionic, Language::En) => format!("{} {}ide", first, second),
        (BondType::Ionic, Language::Id) => format!("{} {}ida", first, second),
        _ => format!("{} {}", first, second),
    }
}

/// Formula with the default rules.
pub fn formula(a: &Element, b: &Element) -> String {
    BondRules::default().formula(a, b)
}

/// Compound name with the default rules.
pub fn compound_name(a: &Element, b: &Element, language: Language) -> String {
    BondRules::default().compound_name(a, b, language)
}
