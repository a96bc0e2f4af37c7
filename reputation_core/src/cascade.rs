//! One-hop propagation of reputation changes to related factions.
//!
//! Helping a faction pleases its allies; harming a faction pleases its
//! enemies. Propagation is exactly one hop and one direction: a cascaded
//! change is never itself re-cascaded, helping an ally does not reach back to
//! the faction, and the other combinations (enemies on a gain, allies on a
//! loss) are deliberately untouched.

use faction_rules::{Faction, FactionGraph, FactionId};

/// Primary deltas shrink by this factor before any hop split.
pub const CASCADE_BASE_DIVISOR: i32 = 3;
/// Further reduction for the ally hop on a positive change.
pub const ALLY_HOP_DIVISOR: i32 = 2;
/// Further reduction for the enemy hop on a negative change.
pub const ENEMY_HOP_DIVISOR: i32 = 3;

/// Which relationship produced a cascade step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeHop {
    Ally,
    Enemy,
}

/// A planned secondary change to one related faction.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeStep {
    pub faction: FactionId,
    /// Signed bump before the target faction's own multiplier.
    pub delta: i32,
    pub hop: CascadeHop,
}

impl CascadeStep {
    /// Audit reason for this step, noting the originating faction.
    pub fn reason(&self, source: &Faction, primary_reason: &str) -> String {
        match self.hop {
            CascadeHop::Ally => format!("Allied with {}: {}", source.name, primary_reason),
            CascadeHop::Enemy => format!("Enemy of {}: {}", source.name, primary_reason),
        }
    }
}

/// Plan the secondary changes for a primary change of `actual_delta` against
/// `source`.
///
/// Pure: the ledger applies the returned steps itself and never re-enters
/// this function for them, which is what keeps cascades single-hop.
pub fn plan(graph: &FactionGraph, source: &Faction, actual_delta: i32) -> Vec<CascadeStep> {
    if actual_delta > 0 {
        let bump = actual_delta / CASCADE_BASE_DIVISOR / ALLY_HOP_DIVISOR;
        graph
            .allies_of(source.id.as_str())
            .map(|ally| CascadeStep {
                faction: ally.id.clone(),
                delta: bump,
                hop: CascadeHop::Ally,
            })
            .collect()
    } else if actual_delta < 0 {
        // Harming a faction is a small positive bump for its enemies.
        let bump = actual_delta.abs() / CASCADE_BASE_DIVISOR / ENEMY_HOP_DIVISOR;
        graph
            .enemies_of(source.id.as_str())
            .map(|enemy| CascadeStep {
                faction: enemy.id.clone(),
                delta: bump,
                hop: CascadeHop::Enemy,
            })
            .collect()
    } else {
        Vec::new()
    }
}
