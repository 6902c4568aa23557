//! Immutable rule catalog: research projects, manufacturing projects, and
//! the geoscape rules they hang off.
//!
//! Rules are loaded once per session (from JSON, by the embedding
//! application), validated, and never mutated afterwards. All cross-rule
//! relations are identifier strings resolved through [`Ruleset`] lookups;
//! nothing in the campaign ever holds a rule by position or address.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A research project definition.
///
/// `cost == 0` marks a fake/instant gate node: it never appears as a
/// player-facing task, but is auto-absorbed by the discovery cascade to
/// chain further unlocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResearch {
    /// Unique identifier, also the localization key.
    pub name: String,
    /// Research cost in scientist-days. Zero means instant gate node.
    pub cost: u32,
    /// All of these must be discovered before the project is offered.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Projects force-unlocked by this one, bypassing their own
    /// dependency lists.
    #[serde(default)]
    pub unlocks: Vec<String>,
    /// If set, a base must hold at least one item named like this
    /// project before it can start it.
    #[serde(default)]
    pub needs_item: bool,
}

impl RuleResearch {
    /// True for zero-cost gate nodes.
    pub fn is_gate(&self) -> bool {
        self.cost == 0
    }
}

/// A manufacturing project definition. Availability is gated by the
/// research project of the same name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleManufacture {
    pub name: String,
    pub category: String,
    /// Workshop space taken while in progress.
    pub workshop_space: u32,
    /// Engineer-hours per unit.
    pub hours: u32,
    /// Cost per unit in funds.
    pub cost: i64,
}

/// A funding country definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleCountry {
    pub name: String,
    pub funding_min: i64,
    pub funding_max: i64,
}

/// A geoscape region definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleRegion {
    pub name: String,
    /// Cost of placing a new base in this region.
    pub base_cost: i64,
}

/// A UFO type definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleUfo {
    pub name: String,
    pub size: String,
    pub damage_max: u32,
    pub speed_max: u32,
}

/// Catalog integrity faults. These are load-time errors; the ledgers
/// assume a validated catalog and do not recover from dangling edges at
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("research project {parent} references unknown project {missing}")]
    UnknownResearch { parent: String, missing: String },
}

/// The full immutable rule catalog, keyed by identifier.
///
/// Tables are `BTreeMap`s so catalog iteration (and therefore eligibility
/// output) is deterministic in key order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ruleset {
    #[serde(default)]
    countries: BTreeMap<String, RuleCountry>,
    #[serde(default)]
    regions: BTreeMap<String, RuleRegion>,
    #[serde(default)]
    ufos: BTreeMap<String, RuleUfo>,
    #[serde(default)]
    research_projects: BTreeMap<String, RuleResearch>,
    #[serde(default)]
    manufacture_projects: BTreeMap<String, RuleManufacture>,
}

impl Ruleset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_country(&mut self, rule: RuleCountry) {
        self.countries.insert(rule.name.clone(), rule);
    }

    pub fn add_region(&mut self, rule: RuleRegion) {
        self.regions.insert(rule.name.clone(), rule);
    }

    pub fn add_ufo(&mut self, rule: RuleUfo) {
        self.ufos.insert(rule.name.clone(), rule);
    }

    pub fn add_research(&mut self, rule: RuleResearch) {
        self.research_projects.insert(rule.name.clone(), rule);
    }

    pub fn add_manufacture(&mut self, rule: RuleManufacture) {
        self.manufacture_projects.insert(rule.name.clone(), rule);
    }

    pub fn country(&self, name: &str) -> Option<&RuleCountry> {
        self.countries.get(name)
    }

    pub fn region(&self, name: &str) -> Option<&RuleRegion> {
        self.regions.get(name)
    }

    pub fn ufo(&self, name: &str) -> Option<&RuleUfo> {
        self.ufos.get(name)
    }

    pub fn research(&self, name: &str) -> Option<&RuleResearch> {
        self.research_projects.get(name)
    }

    pub fn manufacture(&self, name: &str) -> Option<&RuleManufacture> {
        self.manufacture_projects.get(name)
    }

    /// All research projects, keyed by identifier.
    pub fn research_projects(&self) -> &BTreeMap<String, RuleResearch> {
        &self.research_projects
    }

    /// All manufacturing projects, keyed by identifier.
    pub fn manufacture_projects(&self) -> &BTreeMap<String, RuleManufacture> {
        &self.manufacture_projects
    }

    /// Check that every dependency and unlock edge resolves in the
    /// catalog. Cycles are not checked; the cascade must not assume the
    /// graph is acyclic.
    pub fn validate(&self) -> Result<(), RulesError> {
        for (name, rule) in &self.research_projects {
            for dep in rule.dependencies.iter().chain(rule.unlocks.iter()) {
                if !self.research_projects.contains_key(dep) {
                    return Err(RulesError::UnknownResearch {
                        parent: name.clone(),
                        missing: dep.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn research(name: &str, cost: u32, deps: &[&str], unlocks: &[&str]) -> RuleResearch {
        RuleResearch {
            name: name.to_string(),
            cost,
            dependencies: deps.iter().map(|s| s.to_string()).collect(),
            unlocks: unlocks.iter().map(|s| s.to_string()).collect(),
            needs_item: false,
        }
    }

    #[test]
    fn lookup_by_identifier() {
        let mut rules = Ruleset::new();
        rules.add_research(research("STR_LASER_WEAPONS", 50, &[], &[]));
        assert!(rules.research("STR_LASER_WEAPONS").is_some());
        assert!(rules.research("STR_PLASMA_WEAPONS").is_none());
    }

    #[test]
    fn validate_accepts_resolved_edges() {
        let mut rules = Ruleset::new();
        rules.add_research(research("STR_ALIEN_ALLOYS", 40, &[], &["STR_PERSONAL_ARMOR"]));
        rules.add_research(research("STR_PERSONAL_ARMOR", 30, &["STR_ALIEN_ALLOYS"], &[]));
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn validate_rejects_dangling_dependency() {
        let mut rules = Ruleset::new();
        rules.add_research(research("STR_PLASMA_RIFLE", 60, &["STR_PLASMA_PISTOL"], &[]));
        let err = rules.validate().unwrap_err();
        assert_eq!(
            err,
            RulesError::UnknownResearch {
                parent: "STR_PLASMA_RIFLE".to_string(),
                missing: "STR_PLASMA_PISTOL".to_string(),
            }
        );
    }

    #[test]
    fn validate_rejects_dangling_unlock() {
        let mut rules = Ruleset::new();
        rules.add_research(research("STR_ALIEN_ORIGINS", 300, &[], &["STR_NOWHERE"]));
        assert!(rules.validate().is_err());
    }

    #[test]
    fn catalog_iterates_in_key_order() {
        let mut rules = Ruleset::new();
        rules.add_research(research("STR_B", 1, &[], &[]));
        rules.add_research(research("STR_A", 1, &[], &[]));
        let names: Vec<&str> = rules
            .research_projects()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(names, vec!["STR_A", "STR_B"]);
    }

    #[test]
    fn ruleset_loads_from_json() {
        let json = r#"{
            "research_projects": {
                "STR_MEDI_KIT": { "name": "STR_MEDI_KIT", "cost": 20 }
            },
            "manufacture_projects": {
                "STR_MEDI_KIT": {
                    "name": "STR_MEDI_KIT", "category": "STR_EQUIPMENT",
                    "workshop_space": 4, "hours": 420, "cost": 28000
                }
            }
        }"#;
        let rules: Ruleset = serde_json::from_str(json).unwrap();
        assert!(rules.validate().is_ok());
        let medikit = rules.research("STR_MEDI_KIT").unwrap();
        assert_eq!(medikit.cost, 20);
        assert!(medikit.dependencies.is_empty());
        assert!(!medikit.needs_item);
        assert_eq!(rules.manufacture("STR_MEDI_KIT").unwrap().hours, 420);
    }
}
