//! Soldier records, promotion scoring, and the rank-capacity pass.
//!
//! Promotions run as a single pass over every soldier across all bases,
//! from the highest rank transition down. Each tier has a capacity
//! expressed as a fraction of total personnel; when a tier has room, the
//! single highest-scoring soldier of the rank below moves up.

use serde::{Deserialize, Serialize};

/// Soldier ranks, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SoldierRank {
    Rookie,
    Squaddie,
    Sergeant,
    Captain,
    Colonel,
    Commander,
}

impl SoldierRank {
    /// The next rank up, or `None` at the top.
    pub fn next(self) -> Option<SoldierRank> {
        match self {
            SoldierRank::Rookie => Some(SoldierRank::Squaddie),
            SoldierRank::Squaddie => Some(SoldierRank::Sergeant),
            SoldierRank::Sergeant => Some(SoldierRank::Captain),
            SoldierRank::Captain => Some(SoldierRank::Colonel),
            SoldierRank::Colonel => Some(SoldierRank::Commander),
            SoldierRank::Commander => None,
        }
    }
}

/// A soldier's combat statistics.
///
/// Psionic stats are carried for save fidelity but excluded from the
/// promotion score by policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    pub tu: i32,
    pub stamina: i32,
    pub health: i32,
    pub bravery: i32,
    pub reactions: i32,
    pub firing: i32,
    pub throwing: i32,
    pub melee: i32,
    pub strength: i32,
    pub psi_strength: i32,
    pub psi_skill: i32,
}

/// A soldier. Owned by a base; `id` is unique campaign-wide and comes
/// from the campaign's monotone soldier counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Soldier {
    pub id: u32,
    pub name: String,
    pub rank: SoldierRank,
    pub stats: UnitStats,
    pub missions: u32,
    pub kills: u32,
}

impl Soldier {
    /// Move the soldier up one rank. No-op for a commander.
    pub fn promote(&mut self) {
        if let Some(next) = self.rank.next() {
            self.rank = next;
        }
    }
}

/// Promotion score: a fixed weighted combination of stats plus ten
/// points per mission and per kill.
pub fn promotion_score(soldier: &Soldier) -> i32 {
    let s = &soldier.stats;
    let v1 = 2 * s.health + 2 * s.stamina + 4 * s.reactions + 4 * s.bravery;
    let v2 = v1 + 3 * (s.tu + 2 * s.firing);
    let v3 = v2 + s.melee + s.throwing + s.strength;
    v3 + 10 * (soldier.missions + soldier.kills) as i32
}

/// Count soldiers at `rank` and find the index of the highest scorer.
fn inspect(soldiers: &[&mut Soldier], rank: SoldierRank) -> (usize, Option<usize>) {
    let mut filled = 0;
    let mut best: Option<usize> = None;
    let mut best_score = 0;
    for (index, soldier) in soldiers.iter().enumerate() {
        if soldier.rank != rank {
            continue;
        }
        filled += 1;
        let score = promotion_score(soldier);
        if score > best_score {
            best_score = score;
            best = Some(index);
        }
    }
    (filled, best)
}

/// Run the higher-rank promotion pass (not the rookie-to-squaddie ones,
/// which happen through mission experience).
///
/// Tier capacities, as fractions of total personnel: one commander,
/// one colonel per 23, one captain per 11, one sergeant per 5. Each
/// transition promotes at most one soldier per call. Returns whether any
/// promotion happened, so the caller can gate a notification.
pub fn handle_promotions(soldiers: &mut [&mut Soldier]) -> bool {
    let total = soldiers.len();
    let mut promoted = 0usize;

    // (rank to fill, rank drawn from, capacity)
    let transitions = [
        (SoldierRank::Commander, SoldierRank::Colonel, 1),
        (SoldierRank::Colonel, SoldierRank::Captain, total / 23),
        (SoldierRank::Captain, SoldierRank::Sergeant, total / 11),
        (SoldierRank::Sergeant, SoldierRank::Squaddie, total / 5),
    ];

    for (upper, lower, capacity) in transitions {
        let (filled, _) = inspect(soldiers, upper);
        let (candidates, best) = inspect(soldiers, lower);
        if filled < capacity && candidates > 0 {
            if let Some(index) = best {
                soldiers[index].promote();
                promoted += 1;
            }
        }
    }

    promoted > 0
}
