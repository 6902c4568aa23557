//! Campaign entities owned by the campaign state.
//!
//! Every cross-reference to the rule catalog is an identifier string,
//! resolved through [`xenowar_logic::rules::Ruleset`] lookups at the
//! point of use; entities never hold rules by position or address.

mod base;
mod geoscape;

pub use base::{Base, Production, ResearchProject};
pub use geoscape::{Country, Region, Ufo, Waypoint};
