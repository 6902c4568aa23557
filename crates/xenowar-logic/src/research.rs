//! Research eligibility, the discovery cascade, and dependable-research
//! queries.
//!
//! The dependency graph lives in the [`Ruleset`]; this module answers three
//! questions against it:
//!
//! - which projects can a given base start right now
//!   ([`available_research`]),
//! - what happens when a project completes, including the transitive
//!   absorption of zero-cost gate nodes ([`add_finished_research`]),
//! - which projects became newly offerable because of a completion
//!   ([`dependable_research`]).
//!
//! The cascade is an explicit work queue processed to a fixed point: each
//! step snapshots its candidate list before appending to the discovered
//! set, so no iteration ever walks a set being mutated underneath it.

use serde::{Deserialize, Serialize};

use crate::items::ItemContainer;
use crate::rules::{RuleResearch, Ruleset};

/// Ordered set of globally discovered research identifiers.
///
/// Append-only except on load. `push` does not guard against duplicates:
/// callers are expected to check membership first (the cascade does), and
/// a duplicate entry merely reprocesses cascades rather than corrupting
/// state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscoveredSet {
    names: Vec<String>,
}

impl DiscoveredSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a discovered identifier. No membership check.
    pub fn push(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Whether a requirement is satisfied. The empty identifier means
    /// "no requirement" and is always satisfied.
    pub fn is_researched(&self, name: &str) -> bool {
        name.is_empty() || self.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<String> for DiscoveredSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// The slice of one base's state that research eligibility depends on.
#[derive(Debug, Clone, Copy)]
pub struct BaseResearchState<'a> {
    /// Identifiers of projects currently in progress at the base.
    pub in_progress: &'a [String],
    /// The base's item inventory, for `needs_item` gating.
    pub items: &'a ItemContainer,
}

/// Whether `rule`'s prerequisites are met: either it sits on an unlock
/// edge of something discovered (bypassing its dependency list entirely),
/// or every one of its dependencies is discovered.
pub fn is_research_available(
    rule: &RuleResearch,
    unlocked: &[&str],
    discovered: &DiscoveredSet,
) -> bool {
    if unlocked.contains(&rule.name.as_str()) {
        return true;
    }
    rule.dependencies.iter().all(|dep| discovered.contains(dep))
}

/// Projects a base is eligible to start right now, in catalog key order.
///
/// A candidate qualifies iff it is reachable (unlock edge or satisfied
/// dependencies), not already discovered, not already in progress at this
/// base, and (when `needs_item` is set) the base holds at least one
/// unit of the item named like the project.
pub fn available_research<'a>(
    rules: &'a Ruleset,
    discovered: &DiscoveredSet,
    base: BaseResearchState<'_>,
) -> Vec<&'a RuleResearch> {
    let unlocked: Vec<&str> = discovered
        .iter()
        .filter_map(|name| rules.research(name))
        .flat_map(|rule| rule.unlocks.iter().map(String::as_str))
        .collect();

    rules
        .research_projects()
        .values()
        .filter(|rule| is_research_available(rule, &unlocked, discovered))
        .filter(|rule| !discovered.contains(&rule.name))
        .filter(|rule| !base.in_progress.iter().any(|p| p == &rule.name))
        .filter(|rule| !rule.needs_item || base.items.quantity(&rule.name) > 0)
        .collect()
}

/// Record a completed research project and absorb every zero-cost gate
/// node that becomes reachable through it, across all bases.
///
/// The triggering identifier is appended unconditionally (callers must
/// not double-report a completion). Gate nodes found by the cascade are
/// membership-checked before insertion, so the discovered set grows by
/// exactly the triggering project plus the newly reachable gates.
///
/// Passing `None` for the ruleset records the discovery without
/// cascading.
pub fn add_finished_research(
    discovered: &mut DiscoveredSet,
    name: &str,
    rules: Option<&Ruleset>,
    bases: &[BaseResearchState<'_>],
) {
    discovered.push(name);
    let rules = match rules {
        Some(rules) => rules,
        None => return,
    };

    let mut queue: Vec<String> = vec![name.to_string()];
    while let Some(current) = queue.pop() {
        // Snapshot the gates reachable from `current` before touching
        // the discovered set.
        let mut gates: Vec<String> = Vec::new();
        for base in bases {
            for rule in dependable_research_basic(rules, discovered, &current, *base) {
                if rule.is_gate()
                    && !discovered.contains(&rule.name)
                    && !gates.iter().any(|g| g == &rule.name)
                {
                    gates.push(rule.name.clone());
                }
            }
        }
        for gate in gates {
            if !discovered.contains(&gate) {
                discovered.push(&gate);
                queue.push(gate);
            }
        }
    }
}

/// Projects that become newly offerable at `base` because `research` was
/// just completed: the direct cascade, plus the cascade re-triggered
/// through every already-discovered gate node whose dependency list names
/// `research` (a gate satisfied earlier may only now have its own
/// prerequisites completed).
pub fn dependable_research<'a>(
    rules: &'a Ruleset,
    discovered: &DiscoveredSet,
    research: &str,
    base: BaseResearchState<'_>,
) -> Vec<&'a RuleResearch> {
    let mut dependables = dependable_research_basic(rules, discovered, research, base);
    for name in discovered.iter() {
        let rule = match rules.research(name) {
            Some(rule) => rule,
            None => continue,
        };
        if rule.is_gate() && rule.dependencies.iter().any(|dep| dep == research) {
            for found in dependable_research_basic(rules, discovered, name, base) {
                if !dependables.iter().any(|d| d.name == found.name) {
                    dependables.push(found);
                }
            }
        }
    }
    dependables
}

/// The direct dependable query: eligible projects that depend on, or are
/// unlocked by, `research`, following chains of gate nodes transitively
/// but without re-triggering through previously discovered gates.
pub fn dependable_research_basic<'a>(
    rules: &'a Ruleset,
    discovered: &DiscoveredSet,
    research: &str,
    base: BaseResearchState<'_>,
) -> Vec<&'a RuleResearch> {
    let mut dependables = Vec::new();
    collect_dependables(rules, discovered, research, base, &mut dependables);
    dependables
}

fn collect_dependables<'a>(
    rules: &'a Ruleset,
    discovered: &DiscoveredSet,
    research: &str,
    base: BaseResearchState<'_>,
    out: &mut Vec<&'a RuleResearch>,
) {
    let possible = available_research(rules, discovered, base);
    for rule in possible {
        let depends = rule.dependencies.iter().any(|dep| dep == research);
        let unlocked_by = rule.unlocks.iter().any(|u| u == research);
        if !depends && !unlocked_by {
            continue;
        }
        if out.iter().any(|seen| seen.name == rule.name) {
            continue;
        }
        out.push(rule);
        if rule.is_gate() {
            collect_dependables(rules, discovered, &rule.name, base, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleResearch;

    fn research(name: &str, cost: u32, deps: &[&str], unlocks: &[&str]) -> RuleResearch {
        RuleResearch {
            name: name.to_string(),
            cost,
            dependencies: deps.iter().map(|s| s.to_string()).collect(),
            unlocks: unlocks.iter().map(|s| s.to_string()).collect(),
            needs_item: false,
        }
    }

    fn empty_base() -> (Vec<String>, ItemContainer) {
        (Vec::new(), ItemContainer::new())
    }

    fn names(rules: &[&RuleResearch]) -> Vec<String> {
        rules.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn project_with_no_dependencies_is_offered() {
        let mut rules = Ruleset::new();
        rules.add_research(research("STR_A", 5, &[], &[]));
        let discovered = DiscoveredSet::new();
        let (in_progress, items) = empty_base();
        let base = BaseResearchState {
            in_progress: &in_progress,
            items: &items,
        };
        assert_eq!(names(&available_research(&rules, &discovered, base)), ["STR_A"]);
    }

    #[test]
    fn discovered_projects_are_never_reoffered() {
        let mut rules = Ruleset::new();
        rules.add_research(research("STR_A", 5, &[], &[]));
        let mut discovered = DiscoveredSet::new();
        discovered.push("STR_A");
        let (in_progress, items) = empty_base();
        let base = BaseResearchState {
            in_progress: &in_progress,
            items: &items,
        };
        assert!(available_research(&rules, &discovered, base).is_empty());
    }

    #[test]
    fn in_progress_projects_are_excluded_per_base() {
        let mut rules = Ruleset::new();
        rules.add_research(research("STR_A", 5, &[], &[]));
        let discovered = DiscoveredSet::new();
        let in_progress = vec!["STR_A".to_string()];
        let items = ItemContainer::new();
        let busy = BaseResearchState {
            in_progress: &in_progress,
            items: &items,
        };
        assert!(available_research(&rules, &discovered, busy).is_empty());

        let idle_progress: Vec<String> = Vec::new();
        let idle = BaseResearchState {
            in_progress: &idle_progress,
            items: &items,
        };
        assert_eq!(names(&available_research(&rules, &discovered, idle)), ["STR_A"]);
    }

    #[test]
    fn unlock_edge_bypasses_dependency_list() {
        let mut rules = Ruleset::new();
        rules.add_research(research("STR_R", 5, &[], &["STR_P"]));
        rules.add_research(research("STR_P", 5, &["STR_UNSATISFIED"], &[]));
        rules.add_research(research("STR_UNSATISFIED", 5, &[], &[]));
        let mut discovered = DiscoveredSet::new();
        discovered.push("STR_R");
        let (in_progress, items) = empty_base();
        let base = BaseResearchState {
            in_progress: &in_progress,
            items: &items,
        };
        let offered = names(&available_research(&rules, &discovered, base));
        assert!(offered.contains(&"STR_P".to_string()));
    }

    #[test]
    fn item_gate_requires_one_unit() {
        let mut rules = Ruleset::new();
        let mut gated = research("STR_ALIEN_CORPSE", 10, &[], &[]);
        gated.needs_item = true;
        rules.add_research(gated);
        let discovered = DiscoveredSet::new();
        let in_progress: Vec<String> = Vec::new();

        let empty_items = ItemContainer::new();
        let without = BaseResearchState {
            in_progress: &in_progress,
            items: &empty_items,
        };
        assert!(available_research(&rules, &discovered, without).is_empty());

        let mut stocked = ItemContainer::new();
        stocked.add("STR_ALIEN_CORPSE", 1);
        let with = BaseResearchState {
            in_progress: &in_progress,
            items: &stocked,
        };
        assert_eq!(
            names(&available_research(&rules, &discovered, with)),
            ["STR_ALIEN_CORPSE"]
        );
    }

    #[test]
    fn cascade_absorbs_gate_and_exposes_downstream() {
        // A (cost 5) -> B (cost 0, deps [A]) -> C (cost 3, deps [B]).
        // Discovering A must auto-discover B and leave C eligible.
        let mut rules = Ruleset::new();
        rules.add_research(research("STR_A", 5, &[], &[]));
        rules.add_research(research("STR_B", 0, &["STR_A"], &[]));
        rules.add_research(research("STR_C", 3, &["STR_B"], &[]));
        let mut discovered = DiscoveredSet::new();
        let (in_progress, items) = empty_base();
        let base = BaseResearchState {
            in_progress: &in_progress,
            items: &items,
        };

        add_finished_research(&mut discovered, "STR_A", Some(&rules), &[base]);

        let found: Vec<&str> = discovered.iter().collect();
        assert_eq!(found, ["STR_A", "STR_B"]);
        assert_eq!(names(&available_research(&rules, &discovered, base)), ["STR_C"]);
    }

    #[test]
    fn cascade_follows_chains_of_gates() {
        let mut rules = Ruleset::new();
        rules.add_research(research("STR_A", 5, &[], &[]));
        rules.add_research(research("STR_G1", 0, &["STR_A"], &[]));
        rules.add_research(research("STR_G2", 0, &["STR_G1"], &[]));
        rules.add_research(research("STR_END", 8, &["STR_G2"], &[]));
        let mut discovered = DiscoveredSet::new();
        let (in_progress, items) = empty_base();
        let base = BaseResearchState {
            in_progress: &in_progress,
            items: &items,
        };

        add_finished_research(&mut discovered, "STR_A", Some(&rules), &[base]);

        assert_eq!(discovered.len(), 3);
        assert!(discovered.contains("STR_G1"));
        assert!(discovered.contains("STR_G2"));
        assert_eq!(
            names(&available_research(&rules, &discovered, base)),
            ["STR_END"]
        );
    }

    #[test]
    fn cascade_grows_by_exactly_trigger_plus_gates() {
        // Two bases see the same gate; it must still be discovered once.
        let mut rules = Ruleset::new();
        rules.add_research(research("STR_A", 5, &[], &[]));
        rules.add_research(research("STR_GATE", 0, &["STR_A"], &[]));
        rules.add_research(research("STR_COSTED", 7, &["STR_A"], &[]));
        let mut discovered = DiscoveredSet::new();
        let (progress_one, items_one) = empty_base();
        let (progress_two, items_two) = empty_base();
        let bases = [
            BaseResearchState {
                in_progress: &progress_one,
                items: &items_one,
            },
            BaseResearchState {
                in_progress: &progress_two,
                items: &items_two,
            },
        ];

        add_finished_research(&mut discovered, "STR_A", Some(&rules), &bases);

        let found: Vec<&str> = discovered.iter().collect();
        assert_eq!(found, ["STR_A", "STR_GATE"]);
    }

    #[test]
    fn gate_behind_item_requires_a_base_holding_it() {
        // The gate needs a recovered artifact; only a base that has one
        // lets the cascade absorb it.
        let mut rules = Ruleset::new();
        rules.add_research(research("STR_A", 5, &[], &[]));
        let mut gate = research("STR_GATE", 0, &["STR_A"], &[]);
        gate.needs_item = true;
        rules.add_research(gate);

        let in_progress: Vec<String> = Vec::new();
        let empty_items = ItemContainer::new();
        let mut stocked = ItemContainer::new();
        stocked.add("STR_GATE", 1);

        let mut without = DiscoveredSet::new();
        add_finished_research(
            &mut without,
            "STR_A",
            Some(&rules),
            &[BaseResearchState {
                in_progress: &in_progress,
                items: &empty_items,
            }],
        );
        assert!(!without.contains("STR_GATE"));

        let mut with = DiscoveredSet::new();
        add_finished_research(
            &mut with,
            "STR_A",
            Some(&rules),
            &[
                BaseResearchState {
                    in_progress: &in_progress,
                    items: &empty_items,
                },
                BaseResearchState {
                    in_progress: &in_progress,
                    items: &stocked,
                },
            ],
        );
        assert!(with.contains("STR_GATE"));
    }

    #[test]
    fn no_cascade_without_ruleset() {
        let mut discovered = DiscoveredSet::new();
        add_finished_research(&mut discovered, "STR_A", None, &[]);
        let found: Vec<&str> = discovered.iter().collect();
        assert_eq!(found, ["STR_A"]);
    }

    #[test]
    fn dependable_lists_direct_and_gate_chained_projects() {
        let mut rules = Ruleset::new();
        rules.add_research(research("STR_A", 5, &[], &[]));
        rules.add_research(research("STR_GATE", 0, &["STR_A"], &[]));
        rules.add_research(research("STR_DEEP", 9, &["STR_GATE"], &[]));
        rules.add_research(research("STR_DIRECT", 4, &["STR_A"], &[]));
        let mut discovered = DiscoveredSet::new();
        let (in_progress, items) = empty_base();
        let base = BaseResearchState {
            in_progress: &in_progress,
            items: &items,
        };

        // Completion is recorded first; the gate gets absorbed, then the
        // query reports what the completion made offerable.
        add_finished_research(&mut discovered, "STR_A", Some(&rules), &[base]);
        let found = names(&dependable_research(&rules, &discovered, "STR_A", base));
        assert!(found.contains(&"STR_DIRECT".to_string()));
        assert!(found.contains(&"STR_DEEP".to_string()));
        assert!(!found.contains(&"STR_GATE".to_string()));
    }

    #[test]
    fn dependable_retriggers_through_discovered_gates() {
        // STR_GATE was absorbed earlier (unlock edge) while STR_LATE was
        // still missing; completing STR_LATE must surface STR_BRANCH,
        // which depends on the gate rather than on STR_LATE itself.
        let mut rules = Ruleset::new();
        rules.add_research(research("STR_EARLY", 5, &[], &["STR_GATE"]));
        rules.add_research(research("STR_GATE", 0, &["STR_EARLY", "STR_LATE"], &[]));
        rules.add_research(research("STR_LATE", 6, &[], &[]));
        rules.add_research(research("STR_BRANCH", 7, &["STR_GATE"], &[]));
        let mut discovered = DiscoveredSet::new();
        discovered.push("STR_EARLY");
        discovered.push("STR_GATE");
        discovered.push("STR_LATE");
        let (in_progress, items) = empty_base();
        let base = BaseResearchState {
            in_progress: &in_progress,
            items: &items,
        };

        let found = names(&dependable_research(&rules, &discovered, "STR_LATE", base));
        assert!(found.contains(&"STR_BRANCH".to_string()));
    }

    #[test]
    fn is_researched_empty_identifier_is_satisfied() {
        let mut discovered = DiscoveredSet::new();
        assert!(discovered.is_researched(""));
        assert!(!discovered.is_researched("STR_A"));
        discovered.push("STR_A");
        assert!(discovered.is_researched("STR_A"));
    }

    #[test]
    fn push_does_not_guard_duplicates() {
        let mut discovered = DiscoveredSet::new();
        discovered.push("STR_A");
        discovered.push("STR_A");
        assert_eq!(discovered.len(), 2);
    }
}
