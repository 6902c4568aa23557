//! Manufacturing availability per base.
//!
//! Simpler than research: a manufacturing project is gated solely by the
//! research project sharing its identifier, and by the one-instance-per-
//! base rule. There is no gate-node cascade and no item-possession check.

use crate::research::DiscoveredSet;
use crate::rules::{RuleManufacture, Ruleset};

/// Manufacturing projects a base could start right now, in catalog key
/// order: the linked research is discovered and no instance of the
/// project is already running at the base.
pub fn available_productions<'a>(
    rules: &'a Ruleset,
    discovered: &DiscoveredSet,
    in_progress: &[String],
) -> Vec<&'a RuleManufacture> {
    rules
        .manufacture_projects()
        .values()
        .filter(|rule| discovered.contains(&rule.name))
        .filter(|rule| !in_progress.iter().any(|p| p == &rule.name))
        .collect()
}
