//! Player bases and the in-progress work they own.
//!
//! A base owns its soldiers, its item stores, and its in-progress
//! research and manufacturing instances. At most one instance may exist
//! per rule at a base; the `start_*` helpers enforce this by lookup, not
//! by structure.

use serde::{Deserialize, Serialize};
use xenowar_logic::items::ItemContainer;
use xenowar_logic::personnel::Soldier;

/// An in-progress research instance at one base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchProject {
    /// Identifier of the research rule being worked.
    pub rule: String,
    pub assigned_scientists: u32,
    /// Scientist-days already spent.
    pub spent: u32,
}

/// An in-progress manufacturing instance at one base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    /// Identifier of the manufacturing rule being worked.
    pub rule: String,
    pub assigned_engineers: u32,
    pub spent_hours: u32,
    pub units_done: u32,
}

/// A player base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Base {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Monthly upkeep, subtracted from country funding each month.
    pub monthly_maintenance: i64,
    #[serde(default)]
    pub items: ItemContainer,
    #[serde(default)]
    pub soldiers: Vec<Soldier>,
    #[serde(default)]
    pub research: Vec<ResearchProject>,
    #[serde(default)]
    pub productions: Vec<Production>,
}

impl Base {
    pub fn new(name: &str, longitude: f64, latitude: f64) -> Self {
        Self {
            name: name.to_string(),
            longitude,
            latitude,
            monthly_maintenance: 0,
            items: ItemContainer::new(),
            soldiers: Vec::new(),
            research: Vec::new(),
            productions: Vec::new(),
        }
    }

    /// Whether a research instance for `rule` is running here.
    pub fn has_research(&self, rule: &str) -> bool {
        self.research.iter().any(|r| r.rule == rule)
    }

    /// Whether a manufacturing instance for `rule` is running here.
    pub fn has_production(&self, rule: &str) -> bool {
        self.productions.iter().any(|p| p.rule == rule)
    }

    /// Start a research instance. Returns false (and changes nothing)
    /// if one is already running for the rule.
    pub fn start_research(&mut self, rule: &str, assigned_scientists: u32) -> bool {
        if self.has_research(rule) {
            return false;
        }
        self.research.push(ResearchProject {
            rule: rule.to_string(),
            assigned_scientists,
            spent: 0,
        });
        true
    }

    /// Remove a finished or cancelled research instance.
    pub fn remove_research(&mut self, rule: &str) -> Option<ResearchProject> {
        let index = self.research.iter().position(|r| r.rule == rule)?;
        Some(self.research.remove(index))
    }

    /// Start a manufacturing instance. Returns false if one is already
    /// running for the rule.
    pub fn start_production(&mut self, rule: &str, assigned_engineers: u32) -> bool {
        if self.has_production(rule) {
            return false;
        }
        self.productions.push(Production {
            rule: rule.to_string(),
            assigned_engineers,
            spent_hours: 0,
            units_done: 0,
        });
        true
    }

    /// Remove a finished or cancelled manufacturing instance.
    pub fn remove_production(&mut self, rule: &str) -> Option<Production> {
        let index = self.productions.iter().position(|p| p.rule == rule)?;
        Some(self.productions.remove(index))
    }

    /// Identifiers of in-progress research, for eligibility queries.
    pub fn research_names(&self) -> Vec<String> {
        self.research.iter().map(|r| r.rule.clone()).collect()
    }

    /// Identifiers of in-progress manufacturing, for eligibility queries.
    pub fn production_names(&self) -> Vec<String> {
        self.productions.iter().map(|p| p.rule.clone()).collect()
    }
}
