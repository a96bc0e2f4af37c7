//! Bounded per-character reputation scores with audit history.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use tracing::{debug, warn};

use faction_rules::{
    Alignment, FactionGraph, FactionId, ReputationLevel, StartingReputation,
};

use crate::audit::{AuditLog, AuditRecord, AuditSubject};
use crate::cascade;

/// Faction standing bounds; writes saturate here rather than error.
pub const FACTION_REP_MIN: i32 = -150;
pub const FACTION_REP_MAX: i32 = 150;

/// Individual NPC standing bounds.
pub const INDIVIDUAL_REP_MIN: i32 = -100;
pub const INDIVIDUAL_REP_MAX: i32 = 100;

/// Standings at or past this magnitude show up as notable in summaries.
pub const NOTABLE_FACTION_SCORE: i32 = 50;
pub const NOTABLE_INDIVIDUAL_SCORE: i32 = 20;

/// Unique identifier for non-player characters (a content-defined slug).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NpcId(pub String);

impl NpcId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NpcId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NpcId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for NpcId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NpcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a faction reputation change.
///
/// An unknown faction is not an error, but callers that care (quest
/// tooling, content validation) can tell it apart from an applied change
/// instead of silently reading 0.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifyOutcome {
    /// The change was applied; carries the new score after clamping.
    Applied(i32),
    /// The faction is not in the registry; nothing was recorded.
    UnknownFaction,
}

impl ModifyOutcome {
    /// New score, reading the unknown-faction case as 0.
    pub fn value(self) -> i32 {
        match self {
            ModifyOutcome::Applied(value) => value,
            ModifyOutcome::UnknownFaction => 0,
        }
    }

    pub fn is_applied(self) -> bool {
        matches!(self, ModifyOutcome::Applied(_))
    }
}

/// One faction standing, resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactionStanding {
    pub faction: FactionId,
    pub name: String,
    pub score: i32,
    pub level: ReputationLevel,
}

/// Diagnostic report of where a character stands with everyone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReputationSummary {
    /// Every known faction, sorted by id.
    pub factions: Vec<FactionStanding>,
    /// Standings of at least [`NOTABLE_FACTION_SCORE`] magnitude.
    pub notable: Vec<FactionStanding>,
    /// NPC standings of at least [`NOTABLE_INDIVIDUAL_SCORE`] magnitude.
    pub individuals: Vec<(NpcId, i32)>,
}

/// Per-character bounded standing scores for factions and individual NPCs.
///
/// Unseen ids read as 0. Every write clamps, every write is audited, and
/// primary faction writes propagate one-hop cascades through the graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReputationLedger {
    factions: HashMap<FactionId, i32>,
    individuals: HashMap<NpcId, i32>,
    audit: AuditLog,
}

impl ReputationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger seeded for a newly created character of the given alignment.
    pub fn seeded(
        graph: &FactionGraph,
        seeds: &StartingReputation,
        alignment: Alignment,
    ) -> Self {
        let mut ledger = Self::default();
        ledger.reseed(graph, seeds, alignment);
        ledger
    }

    /// Reset the faction baseline to the alignment's starting table.
    ///
    /// Individual NPC standings and the audit window survive; those are
    /// personal history, not faction politics.
    pub fn reseed(
        &mut self,
        graph: &FactionGraph,
        seeds: &StartingReputation,
        alignment: Alignment,
    ) {
        self.factions.clear();
        for faction in graph.factions() {
            self.factions
                .insert(faction.id.clone(), seeds.seed(alignment, faction.id.as_str()));
        }
    }

    /// Current standing with a faction (0 for unseen ids).
    pub fn get(&self, faction: &str) -> i32 {
        self.factions.get(faction).copied().unwrap_or(0)
    }

    /// Standing classified on the nine-step scale.
    pub fn level(&self, faction: &str) -> ReputationLevel {
        ReputationLevel::from_score(self.get(faction))
    }

    /// Merchant price multiplier for a faction's shops.
    pub fn price_modifier(&self, faction: &str) -> f32 {
        self.level(faction).price_modifier()
    }

    /// Apply a primary reputation change and its one-hop cascades.
    ///
    /// The delta is scaled by the faction's action multiplier, clamped to
    /// the faction bounds, and audited; allies or enemies then receive their
    /// cascade bumps through the same clamp-and-audit path, but cascades are
    /// never propagated again.
    pub fn modify(
        &mut self,
        graph: &FactionGraph,
        faction: &str,
        delta: i32,
        reason: &str,
    ) -> ModifyOutcome {
        let Some(def) = graph.get(faction) else {
            warn!(faction, "reputation change for unknown faction ignored");
            return ModifyOutcome::UnknownFaction;
        };

        let actual = scale(delta, def.action_multiplier);
        let new_value = self.apply_faction_change(def.id.clone(), actual, reason.to_string());
        debug!(faction = %def.id, delta, actual, new_value, "faction reputation modified");

        for step in cascade::plan(graph, def, actual) {
            let Some(target) = graph.get(step.faction.as_str()) else {
                continue;
            };
            let cascaded = scale(step.delta, target.action_multiplier);
            self.apply_faction_change(step.faction.clone(), cascaded, step.reason(def, reason));
        }

        ModifyOutcome::Applied(new_value)
    }

    /// Current standing with an individual NPC (0 for unseen ids).
    pub fn get_individual(&self, npc: &str) -> i32 {
        self.individuals.get(npc).copied().unwrap_or(0)
    }

    /// Apply an individual NPC standing change.
    ///
    /// Individual standings take no multiplier and never cascade.
    pub fn modify_individual(&mut self, npc: &str, delta: i32, reason: &str) -> i32 {
        let id = NpcId::from(npc);
        let old = self.get_individual(npc);
        let new = (old + delta).clamp(INDIVIDUAL_REP_MIN, INDIVIDUAL_REP_MAX);
        self.individuals.insert(id.clone(), new);
        self.audit
            .record(AuditSubject::Npc(id), delta, old, new, reason);
        new
    }

    /// The audit window for diagnostics and persistence.
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    pub fn faction_scores(&self) -> &HashMap<FactionId, i32> {
        &self.factions
    }

    pub fn individual_scores(&self) -> &HashMap<NpcId, i32> {
        &self.individuals
    }

    /// Standing report across all known factions and notable NPCs.
    pub fn summary(&self, graph: &FactionGraph) -> ReputationSummary {
        let mut factions: Vec<FactionStanding> = self
            .factions
            .iter()
            .filter_map(|(id, score)| {
                let def = graph.get(id.as_str())?;
                Some(FactionStanding {
                    faction: id.clone(),
                    name: def.name.clone(),
                    score: *score,
                    level: ReputationLevel::from_score(*score),
                })
            })
            .collect();
        factions.sort_by(|a, b| a.faction.cmp(&b.faction));

        let notable = factions
            .iter()
            .filter(|standing| standing.score.abs() >= NOTABLE_FACTION_SCORE)
            .cloned()
            .collect();

        let mut individuals: Vec<(NpcId, i32)> = self
            .individuals
            .iter()
            .filter(|(_, score)| score.abs() >= NOTABLE_INDIVIDUAL_SCORE)
            .map(|(id, score)| (id.clone(), *score))
            .collect();
        individuals.sort();

        ReputationSummary {
            factions,
            notable,
            individuals,
        }
    }

    // Decayed scores bypass the clamp; they only ever move toward zero.
    pub(crate) fn apply_decay(&mut self, faction: &FactionId, new_value: i32, days: u32) {
        let old = self.get(faction.as_str());
        self.factions.insert(faction.clone(), new_value);
        self.audit.record(
            AuditSubject::Faction(faction.clone()),
            new_value - old,
            old,
            new_value,
            format!("Time decay ({days} days)"),
        );
    }

    // Shared write path for primary and cascaded faction changes.
    fn apply_faction_change(&mut self, id: FactionId, change: i32, reason: String) -> i32 {
        let old = self.factions.get(&id).copied().unwrap_or(0);
        let new = (old + change).clamp(FACTION_REP_MIN, FACTION_REP_MAX);
        self.factions.insert(id.clone(), new);
        self.audit
            .record(AuditSubject::Faction(id), change, old, new, reason);
        new
    }

    /// Rebuild a ledger from persisted data, backfilling factions the
    /// registry has gained since the save was written.
    pub(crate) fn restore(
        graph: &FactionGraph,
        factions: HashMap<FactionId, i32>,
        individuals: HashMap<NpcId, i32>,
        audit: Vec<AuditRecord>,
    ) -> Self {
        let mut ledger = Self {
            factions,
            individuals,
            audit: AuditLog::restore(audit),
        };
        for faction in graph.factions() {
            ledger.factions.entry(faction.id.clone()).or_insert(0);
        }
        ledger
    }
}

/// Apply a faction's action multiplier, rounding to the nearest point.
fn scale(delta: i32, multiplier: f32) -> i32 {
    (delta as f32 * multiplier).round() as i32
}
