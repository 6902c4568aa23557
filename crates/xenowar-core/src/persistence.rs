//! Save/Load functionality for persisting campaign state.
//!
//! A save is a two-document JSON stream in one `<slot>.sav` file: the
//! first document is a lightweight summary (version tag and in-game
//! time) the save browser can read without a rule catalog; the second is
//! the full campaign state. Everything that references a catalog rule is
//! written as its identifier string and re-resolved on load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xenowar_logic::research::DiscoveredSet;
use xenowar_logic::rules::Ruleset;

use crate::campaign::{CampaignState, Difficulty};
use crate::entities::{Base, Country, Region, Ufo, Waypoint};
use crate::time::GameTime;

/// File extension for save slots, appended and stripped by the codec.
const SAVE_EXTENSION: &str = "sav";

/// Errors that can occur during save/load.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed save document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },
    #[error("save references unknown {kind} rule {name}")]
    UnknownRule { kind: &'static str, name: String },
}

/// The summary document: readable without a rule catalog, used to list
/// saves cheaply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSummary {
    pub version: String,
    pub time: GameTime,
}

/// The full-state document. Field order here is the emitted save order
/// and must not change.
#[derive(Debug, Serialize, Deserialize)]
struct SaveState {
    difficulty: Difficulty,
    funds: i64,
    countries: Vec<Country>,
    regions: Vec<Region>,
    bases: Vec<Base>,
    ufos: Vec<Ufo>,
    craft_ids: std::collections::BTreeMap<String, u32>,
    waypoints: Vec<Waypoint>,
    discovered: Vec<String>,
    ufo_id: u32,
    waypoint_id: u32,
    soldier_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    battle: Option<serde_json::Value>,
    archive: serde_json::Value,
}

/// Reads and writes campaign saves under a user-writable folder.
///
/// The version string is scoped here rather than held globally; a load
/// succeeds only when the saved tag matches it exactly.
#[derive(Debug, Clone)]
pub struct SaveCodec {
    dir: PathBuf,
    version: String,
}

impl SaveCodec {
    pub fn new(dir: impl Into<PathBuf>, version: &str) -> Self {
        Self {
            dir: dir.into(),
            version: version.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Full path of a save slot.
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", slot, SAVE_EXTENSION))
    }

    /// Write the campaign to a slot as a summary document followed by
    /// the full-state document.
    pub fn save(&self, state: &CampaignState, slot: &str) -> Result<(), SaveError> {
        let summary = SaveSummary {
            version: self.version.clone(),
            time: state.time.clone(),
        };
        let full = SaveState {
            difficulty: state.difficulty,
            funds: state.funds,
            countries: state.countries.clone(),
            regions: state.regions.clone(),
            bases: state.bases.clone(),
            ufos: state.ufos.clone(),
            craft_ids: state.craft_ids.clone(),
            waypoints: state.waypoints.clone(),
            discovered: state.discovered.iter().map(str::to_string).collect(),
            ufo_id: state.ufo_id,
            waypoint_id: state.waypoint_id,
            soldier_id: state.soldier_id,
            battle: state.battle.clone(),
            archive: state.archive.clone(),
        };

        let mut document = serde_json::to_string_pretty(&summary)?;
        document.push('\n');
        document.push_str(&serde_json::to_string_pretty(&full)?);
        document.push('\n');
        fs::write(self.slot_path(slot), document)?;
        Ok(())
    }

    /// Read only the summary document of a save file. Fails on a
    /// version tag that does not exactly match this codec's.
    pub fn read_summary(&self, path: &Path) -> Result<SaveSummary, SaveError> {
        let text = fs::read_to_string(path)?;
        let mut stream = serde_json::Deserializer::from_str(&text);
        let summary = SaveSummary::deserialize(&mut stream)?;
        if summary.version != self.version {
            return Err(SaveError::VersionMismatch {
                expected: self.version.clone(),
                found: summary.version,
            });
        }
        Ok(summary)
    }

    /// Load a slot, resolving every saved identifier against the rule
    /// catalog. The returned state is fully constructed before this
    /// returns; on any failure no partial state escapes.
    pub fn load(&self, slot: &str, rules: &Ruleset) -> Result<CampaignState, SaveError> {
        let text = fs::read_to_string(self.slot_path(slot))?;
        let mut stream = serde_json::Deserializer::from_str(&text);

        let summary = SaveSummary::deserialize(&mut stream)?;
        if summary.version != self.version {
            return Err(SaveError::VersionMismatch {
                expected: self.version.clone(),
                found: summary.version,
            });
        }

        let doc = SaveState::deserialize(&mut stream)?;
        resolve_rules(&doc, rules)?;

        let mut state = CampaignState::with_random_seed(doc.difficulty);
        state.funds = doc.funds;
        state.time = summary.time;
        state.countries = doc.countries;
        state.regions = doc.regions;
        state.bases = doc.bases;
        state.ufos = doc.ufos;
        state.craft_ids = doc.craft_ids;
        state.waypoints = doc.waypoints;
        state.discovered = doc.discovered.into_iter().collect::<DiscoveredSet>();
        state.battle = doc.battle;
        state.archive = doc.archive;

        // Counters must stay above every live id of their kind.
        let max_ufo = state.ufos.iter().map(|u| u.id).max().unwrap_or(0);
        let max_waypoint = state.waypoints.iter().map(|w| w.id).max().unwrap_or(0);
        let max_soldier = state
            .bases
            .iter()
            .flat_map(|b| b.soldiers.iter())
            .map(|s| s.id)
            .max()
            .unwrap_or(0);
        state.ufo_id = doc.ufo_id.max(max_ufo + 1);
        state.waypoint_id = doc.waypoint_id.max(max_waypoint + 1);
        state.soldier_id = doc.soldier_id.max(max_soldier + 1);

        Ok(state)
    }
}

/// Check that every rule identifier in the document resolves in the
/// catalog. Runs before any state is built.
fn resolve_rules(doc: &SaveState, rules: &Ruleset) -> Result<(), SaveError> {
    for country in &doc.countries {
        if rules.country(&country.rule).is_none() {
            return Err(unknown("country", &country.rule));
        }
    }
    for region in &doc.regions {
        if rules.region(&region.rule).is_none() {
            return Err(unknown("region", &region.rule));
        }
    }
    for ufo in &doc.ufos {
        if rules.ufo(&ufo.rule).is_none() {
            return Err(unknown("ufo", &ufo.rule));
        }
    }
    for name in &doc.discovered {
        if rules.research(name).is_none() {
            return Err(unknown("research", name));
        }
    }
    for base in &doc.bases {
        for project in &base.research {
            if rules.research(&project.rule).is_none() {
                return Err(unknown("research", &project.rule));
            }
        }
        for production in &base.productions {
            if rules.manufacture(&production.rule).is_none() {
                return Err(unknown("manufacture", &production.rule));
            }
        }
    }
    Ok(())
}

fn unknown(kind: &'static str, name: &str) -> SaveError {
    SaveError::UnknownRule {
        kind,
        name: name.to_string(),
    }
}
