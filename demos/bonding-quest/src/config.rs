use serde::Deserialize;
use std::fmt;

use crate::animation::PhaseTimings;
use crate::chemistry::{BondRules, DEFAULT_IONIC_THRESHOLD};
use crate::locale::Language;
use crate::session::Scoring;

/// Why a config was rejected.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    /// Phase offsets must satisfy bonding < complete < finish.
    TimingsOutOfOrder(PhaseTimings),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid config: {}", err),
            Self::TimingsOutOfOrder(t) => write!(
                f,
                "phase offsets out of order: bonding {} ms, complete {} ms, finish {} ms",
                t.bonding_at_ms, t.complete_at_ms, t.finish_at_ms
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::TimingsOutOfOrder(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Tunable game rules. Every field has a default, so a partial JSON
/// document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct QuestConfig {
    /// Electronegativity difference at which metal/nonmetal bonds turn ionic.
    pub ionic_threshold: f64,
    /// Score awarded per completed bond.
    pub points_per_bond: u32,
    /// Score needed per level.
    pub points_per_level: u32,
    /// Delay from animation start to the bonding phase.
    pub bonding_at_ms: u64,
    /// Delay from animation start to the complete phase.
    pub complete_at_ms: u64,
    /// Delay from animation start to the results screen.
    pub finish_at_ms: u64,
    pub default_language: Language,
}

impl Default for QuestConfig {
    fn default() -> Self {
        Self {
            ionic_threshold: DEFAULT_IONIC_THRESHOLD,
            points_per_bond: 100,
            points_per_level: 500,
            bonding_at_ms: 2000,
            complete_at_ms: 4000,
            finish_at_ms: 5500,
            default_language: Language::En,
        }
    }
}

impl QuestConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the rules that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timings = self.timings();
        if !timings.is_ordered() {
            return Err(ConfigError::TimingsOutOfOrder(timings));
        }
        Ok(())
    }

    pub fn bond_rules(&self) -> BondRules {
        BondRules::new(self.ionic_threshold)
    }

    pub fn scoring(&self) -> Scoring {
        Scoring {
            points_per_bond: self.points_per_bond,
            // Zero would make every level division undefined.
            points_per_level: self.points_per_level.max(1),
        }
    }

    pub fn timings(&self) -> PhaseTimings {
        PhaseTimings {
            bonding_at_ms: self.bonding_at_ms,
            complete_at_ms: self.complete_at_ms,
            finish_at_ms: self.finish_at_ms,
        }
    }
}
