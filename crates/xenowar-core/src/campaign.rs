//! Campaign state - the root of everything a campaign mutates.
//!
//! Owns the entity collections, the discovered-research set, the id
//! counters, and the session RNG. All research/production queries go
//! through here so the per-base views handed to the pure logic crate are
//! always built from the live state.

use std::collections::BTreeMap;

use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use xenowar_logic::personnel::{self, Soldier, UnitStats};
use xenowar_logic::research::{self, BaseResearchState, DiscoveredSet};
use xenowar_logic::rules::{RuleManufacture, RuleResearch, Ruleset};
use xenowar_logic::{production, rules};

use crate::entities::{Base, Country, Region, Ufo, Waypoint};
use crate::time::GameTime;

/// Campaign difficulty, chosen on the new-game screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Experienced,
    Veteran,
    Genius,
    Superhuman,
}

/// The full mutable campaign state.
///
/// Id counters are monotone: an id handed out is never reused, even
/// after the entity carrying it is destroyed.
#[derive(Debug, Clone)]
pub struct CampaignState {
    pub difficulty: Difficulty,
    pub funds: i64,
    pub time: GameTime,
    pub countries: Vec<Country>,
    pub regions: Vec<Region>,
    pub bases: Vec<Base>,
    pub ufos: Vec<Ufo>,
    pub craft_ids: BTreeMap<String, u32>,
    pub waypoints: Vec<Waypoint>,
    pub discovered: DiscoveredSet,
    pub(crate) ufo_id: u32,
    pub(crate) waypoint_id: u32,
    pub(crate) soldier_id: u32,
    /// Opaque tactical-combat blob, present only while an engagement is
    /// active. The campaign never looks inside it.
    pub battle: Option<serde_json::Value>,
    /// Opaque knowledge-base progress blob, always present.
    pub archive: serde_json::Value,
    rng: SmallRng,
    rng_seed: u64,
}

impl CampaignState {
    /// A fresh campaign at the starting date with a deterministic RNG.
    pub fn new(difficulty: Difficulty, rng_seed: u64) -> Self {
        Self {
            difficulty,
            funds: 0,
            time: GameTime::campaign_start(),
            countries: Vec::new(),
            regions: Vec::new(),
            bases: Vec::new(),
            ufos: Vec::new(),
            craft_ids: BTreeMap::new(),
            waypoints: Vec::new(),
            discovered: DiscoveredSet::new(),
            ufo_id: 1,
            waypoint_id: 1,
            soldier_id: 1,
            battle: None,
            archive: serde_json::Value::Object(serde_json::Map::new()),
            rng: SmallRng::seed_from_u64(rng_seed),
            rng_seed,
        }
    }

    /// A fresh campaign seeded from OS entropy.
    pub fn with_random_seed(difficulty: Difficulty) -> Self {
        Self::new(difficulty, OsRng.next_u64())
    }

    /// The session RNG. Scoped to the campaign so tests can seed it.
    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    // --- id allocators -------------------------------------------------

    /// Allocate the next UFO id.
    pub fn next_ufo_id(&mut self) -> u32 {
        let id = self.ufo_id;
        self.ufo_id += 1;
        id
    }

    /// Allocate the next waypoint id.
    pub fn next_waypoint_id(&mut self) -> u32 {
        let id = self.waypoint_id;
        self.waypoint_id += 1;
        id
    }

    /// Allocate the next soldier id.
    pub fn next_soldier_id(&mut self) -> u32 {
        let id = self.soldier_id;
        self.soldier_id += 1;
        id
    }

    /// Allocate the next id for a craft type.
    pub fn next_craft_id(&mut self, craft_type: &str) -> u32 {
        let counter = self.craft_ids.entry(craft_type.to_string()).or_insert(1);
        let id = *counter;
        *counter += 1;
        id
    }

    pub fn ufo_id(&self) -> u32 {
        self.ufo_id
    }

    pub fn waypoint_id(&self) -> u32 {
        self.waypoint_id
    }

    pub fn soldier_id(&self) -> u32 {
        self.soldier_id
    }

    // --- economy -------------------------------------------------------

    /// Total monthly funding across all countries.
    pub fn country_funding(&self) -> i64 {
        self.countries.iter().map(|c| c.funding).sum()
    }

    /// Total monthly maintenance across all bases.
    pub fn base_maintenance(&self) -> i64 {
        self.bases.iter().map(|b| b.monthly_maintenance).sum()
    }

    /// Apply the monthly funding cycle to the player's funds.
    pub fn monthly_funding(&mut self) {
        self.funds += self.country_funding() - self.base_maintenance();
    }

    // --- personnel -----------------------------------------------------

    /// Hire a soldier into a base, assigning the next unique id.
    /// Returns the id, or `None` for an unknown base index.
    pub fn hire_soldier(&mut self, base_index: usize, name: &str, stats: UnitStats) -> Option<u32> {
        if base_index >= self.bases.len() {
            return None;
        }
        let id = self.next_soldier_id();
        self.bases[base_index].soldiers.push(Soldier {
            id,
            name: name.to_string(),
            rank: personnel::SoldierRank::Rookie,
            stats,
            missions: 0,
            kills: 0,
        });
        Some(id)
    }

    /// Find a soldier anywhere in the campaign by unique id.
    pub fn soldier(&self, id: u32) -> Option<&Soldier> {
        self.bases
            .iter()
            .flat_map(|b| b.soldiers.iter())
            .find(|s| s.id == id)
    }

    /// Run the rank-capacity promotion pass over every base's soldiers.
    /// Returns whether anything changed, to gate a notification screen.
    pub fn handle_promotions(&mut self) -> bool {
        let mut soldiers: Vec<&mut Soldier> = self
            .bases
            .iter_mut()
            .flat_map(|b| b.soldiers.iter_mut())
            .collect();
        personnel::handle_promotions(&mut soldiers)
    }

    // --- research and production ---------------------------------------

    pub fn is_researched(&self, name: &str) -> bool {
        self.discovered.is_researched(name)
    }

    /// Research projects the given base may start right now.
    pub fn available_research<'a>(
        &self,
        rules: &'a Ruleset,
        base_index: usize,
    ) -> Vec<&'a RuleResearch> {
        let base = &self.bases[base_index];
        let in_progress = base.research_names();
        research::available_research(
            rules,
            &self.discovered,
            BaseResearchState {
                in_progress: &in_progress,
                items: &base.items,
            },
        )
    }

    /// Manufacturing projects the given base may start right now.
    pub fn available_productions<'a>(
        &self,
        rules: &'a Ruleset,
        base_index: usize,
    ) -> Vec<&'a RuleManufacture> {
        let base = &self.bases[base_index];
        let in_progress = base.production_names();
        production::available_productions(rules, &self.discovered, &in_progress)
    }

    /// Projects newly offerable at a base because `name` was completed.
    pub fn dependable_research<'a>(
        &self,
        rules: &'a Ruleset,
        name: &str,
        base_index: usize,
    ) -> Vec<&'a RuleResearch> {
        let base = &self.bases[base_index];
        let in_progress = base.research_names();
        research::dependable_research(
            rules,
            &self.discovered,
            name,
            BaseResearchState {
                in_progress: &in_progress,
                items: &base.items,
            },
        )
    }

    /// Record a completed research project, cascading zero-cost gate
    /// nodes across every base. Callers must not report the same
    /// completion twice.
    pub fn add_finished_research(&mut self, name: &str, rules: Option<&rules::Ruleset>) {
        let in_progress: Vec<Vec<String>> =
            self.bases.iter().map(|b| b.research_names()).collect();
        let states: Vec<BaseResearchState<'_>> = in_progress
            .iter()
            .zip(self.bases.iter())
            .map(|(names, base)| BaseResearchState {
                in_progress: names,
                items: &base.items,
            })
            .collect();
        research::add_finished_research(&mut self.discovered, name, rules, &states);
    }
}
