//! XenoWar Core - Campaign Engine
//!
//! Owns the mutable campaign: bases, geoscape entities, the discovered
//! research set, and the in-game clock, plus versioned save/load to
//! `.sav` files. The pure decision logic lives in `xenowar_logic`; this
//! crate holds the state and feeds it per-base views.
//!
//! # Example
//!
//! ```rust,no_run
//! use xenowar_core::prelude::*;
//! use xenowar_logic::rules::Ruleset;
//!
//! let rules = Ruleset::new();
//! let mut campaign = CampaignState::with_random_seed(Difficulty::Veteran);
//! campaign.bases.push(Base::new("Alpha", 0.0, 0.0));
//!
//! campaign.add_finished_research("STR_LASER_WEAPONS", Some(&rules));
//!
//! let codec = SaveCodec::new("saves", "0.9");
//! codec.save(&campaign, "slot1").unwrap();
//! ```

pub mod campaign;
pub mod entities;
pub mod listing;
pub mod persistence;
pub mod time;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::campaign::{CampaignState, Difficulty};
    pub use crate::entities::{Base, Country, Region, Ufo, Waypoint};
    pub use crate::listing::{Localization, SaveListRow};
    pub use crate::persistence::{SaveCodec, SaveError, SaveSummary};
    pub use crate::time::GameTime;
}
