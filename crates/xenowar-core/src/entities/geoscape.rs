//! Geoscape entities: funding countries, regions, UFOs, and waypoints.

use serde::{Deserialize, Serialize};

/// A funding country. `rule` names the catalog entry that bounds its
/// funding range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub rule: String,
    /// Current monthly funding.
    pub funding: i64,
}

impl Country {
    pub fn new(rule: &str, funding: i64) -> Self {
        Self {
            rule: rule.to_string(),
            funding,
        }
    }
}

/// A geoscape region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub rule: String,
}

impl Region {
    pub fn new(rule: &str) -> Self {
        Self {
            rule: rule.to_string(),
        }
    }
}

/// An active UFO. `id` comes from the campaign's monotone UFO counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ufo {
    pub id: u32,
    pub rule: String,
    pub damage: u32,
    pub altitude: u32,
    pub longitude: f64,
    pub latitude: f64,
}

/// A craft navigation waypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: u32,
    pub longitude: f64,
    pub latitude: f64,
}
