//! Faction definitions and the static relationship graph.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;

use crate::alignment::Alignment;

/// Reaction bonus when a faction's tendency matches the character's alignment.
pub const SAME_ALIGNMENT_REACTION: i32 = 10;
/// Reaction penalty when tendency and alignment are directly opposed.
pub const OPPOSED_ALIGNMENT_REACTION: i32 = -10;

/// Unique identifier for factions (a config-defined slug such as `town_guards`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactionId(pub String);

impl FactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FactionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FactionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for FactionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Broad faction archetypes.
///
/// Descriptive only; reaction logic keys off alignment tendency and
/// reputation, never off the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FactionKind {
    Lawful,
    Chaotic,
    #[default]
    Neutral,
    Military,
    Magical,
    Religious,
    Criminal,
    Merchant,
}

/// A named collective affiliation with an alignment tendency and directed
/// relationships to other factions. Loaded once from configuration; never
/// mutated at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    pub name: String,
    #[serde(default)]
    pub kind: FactionKind,
    #[serde(default)]
    pub description: String,
    /// The moral leaning of the faction as a whole.
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub allies: Vec<FactionId>,
    #[serde(default)]
    pub enemies: Vec<FactionId>,
    #[serde(default)]
    pub neutral: Vec<FactionId>,
    /// Points of standing pulled back toward zero per elapsed day.
    #[serde(default)]
    pub decay_rate: f32,
    /// Multiplier applied to primary reputation changes against this faction.
    #[serde(default = "default_action_multiplier")]
    pub action_multiplier: f32,
}

fn default_action_multiplier() -> f32 {
    1.0
}

impl Faction {
    /// Create a faction with no relationships, no decay, and a 1.0 multiplier.
    pub fn new(
        id: impl Into<FactionId>,
        name: impl Into<String>,
        kind: FactionKind,
        alignment: Alignment,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            description: String::new(),
            alignment,
            allies: Vec::new(),
            enemies: Vec::new(),
            neutral: Vec::new(),
            decay_rate: 0.0,
            action_multiplier: 1.0,
        }
    }

    pub fn with_allies(mut self, allies: &[&str]) -> Self {
        self.allies = allies.iter().map(|id| FactionId::from(*id)).collect();
        self
    }

    pub fn with_enemies(mut self, enemies: &[&str]) -> Self {
        self.enemies = enemies.iter().map(|id| FactionId::from(*id)).collect();
        self
    }

    pub fn with_neutral(mut self, neutral: &[&str]) -> Self {
        self.neutral = neutral.iter().map(|id| FactionId::from(*id)).collect();
        self
    }

    pub fn with_decay_rate(mut self, decay_rate: f32) -> Self {
        self.decay_rate = decay_rate;
        self
    }

    pub fn with_action_multiplier(mut self, action_multiplier: f32) -> Self {
        self.action_multiplier = action_multiplier;
        self
    }

    /// Base reaction modifier from alignment compatibility alone: +10 when the
    /// tendency matches the character, 0 when either side is Neutral, -10 when
    /// they are directly opposed.
    pub fn base_reaction_to(&self, character_alignment: Alignment) -> i32 {
        if self.alignment == character_alignment {
            SAME_ALIGNMENT_REACTION
        } else if self.alignment == Alignment::Neutral
            || character_alignment == Alignment::Neutral
        {
            0
        } else {
            OPPOSED_ALIGNMENT_REACTION
        }
    }

    fn declared_relation(&self, other: &str) -> Option<Relation> {
        if self.allies.iter().any(|id| id.as_str() == other) {
            Some(Relation::Ally)
        } else if self.enemies.iter().any(|id| id.as_str() == other) {
            Some(Relation::Enemy)
        } else if self.neutral.iter().any(|id| id.as_str() == other) {
            Some(Relation::Neutral)
        } else {
            None
        }
    }
}

/// How two factions stand relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    Ally,
    Enemy,
    Neutral,
    /// Neither faction lists the other.
    Unrelated,
}

/// Read-only registry of all factions.
///
/// Constructed once at startup and shared (behind an `Arc`) by every
/// character's ledger; there is no write access after construction.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FactionGraph {
    factions: HashMap<FactionId, Faction>,
}

impl FactionGraph {
    /// Build the graph from faction definitions in one pass.
    ///
    /// Relationship lists may reference ids that never get defined; such ids
    /// are simply absent from lookups, never an error.
    pub fn new(factions: impl IntoIterator<Item = Faction>) -> Self {
        Self {
            factions: factions
                .into_iter()
                .map(|faction| (faction.id.clone(), faction))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Faction> {
        self.factions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factions.contains_key(id)
    }

    pub fn factions(&self) -> impl Iterator<Item = &Faction> {
        self.factions.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &FactionId> {
        self.factions.keys()
    }

    pub fn len(&self) -> usize {
        self.factions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factions.is_empty()
    }

    /// Alignment tendency of a faction, if it is known.
    pub fn tendency(&self, id: &str) -> Option<Alignment> {
        self.get(id).map(|faction| faction.alignment)
    }

    /// Alignment-compatibility reaction (+10/0/-10); 0 for unknown factions.
    pub fn base_alignment_reaction(&self, id: &str, character_alignment: Alignment) -> i32 {
        self.get(id)
            .map(|faction| faction.base_reaction_to(character_alignment))
            .unwrap_or(0)
    }

    /// Relationship between two factions as derived from their stored lists.
    ///
    /// The first faction's declaration wins; otherwise the second faction's
    /// declaration is consulted. `Unrelated` when neither lists the other.
    pub fn relationship(&self, a: &str, b: &str) -> Relation {
        let (Some(fa), Some(fb)) = (self.get(a), self.get(b)) else {
            return Relation::Unrelated;
        };
        fa.declared_relation(b)
            .or_else(|| fb.declared_relation(a))
            .unwrap_or(Relation::Unrelated)
    }

    /// Allies declared by `id`, filtered to factions known to the graph.
    pub fn allies_of(&self, id: &str) -> impl Iterator<Item = &Faction> {
        self.related_of(id, |faction| faction.allies.as_slice())
    }

    /// Enemies declared by `id`, filtered to factions known to the graph.
    pub fn enemies_of(&self, id: &str) -> impl Iterator<Item = &Faction> {
        self.related_of(id, |faction| faction.enemies.as_slice())
    }

    fn related_of<'a>(
        &'a self,
        id: &str,
        list: impl Fn(&'a Faction) -> &'a [FactionId] + 'a,
    ) -> impl Iterator<Item = &'a Faction> {
        self.get(id)
            .map(|faction| list(faction).iter())
            .into_iter()
            .flatten()
            .filter_map(|related| self.factions.get(related))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> FactionGraph {
        FactionGraph::new([
            Faction::new("town_guards", "Town Guard", FactionKind::Lawful, Alignment::Good)
                .with_allies(&["priests", "ghost_legion"])
                .with_enemies(&["thieves_guild"]),
            Faction::new(
                "thieves_guild",
                "Thieves Guild",
                FactionKind::Criminal,
                Alignment::Evil,
            )
            .with_enemies(&["town_guards"])
            .with_neutral(&["merchants"]),
            Faction::new("priests", "Temple of Light", FactionKind::Religious, Alignment::Good),
            Faction::new("merchants", "Merchant Guild", FactionKind::Merchant, Alignment::Neutral),
        ])
    }

    #[test]
    fn test_tendency_lookup() {
        let graph = sample_graph();
        assert_eq!(graph.tendency("town_guards"), Some(Alignment::Good));
        assert_eq!(graph.tendency("merchants"), Some(Alignment::Neutral));
        assert_eq!(graph.tendency("ghost_legion"), None);
    }

    #[test]
    fn test_base_alignment_reaction() {
        let graph = sample_graph();
        assert_eq!(graph.base_alignment_reaction("town_guards", Alignment::Good), 10);
        assert_eq!(graph.base_alignment_reaction("town_guards", Alignment::Evil), -10);
        assert_eq!(graph.base_alignment_reaction("town_guards", Alignment::Neutral), 0);
        assert_eq!(graph.base_alignment_reaction("merchants", Alignment::Evil), 0);
        // Unknown factions contribute nothing.
        assert_eq!(graph.base_alignment_reaction("ghost_legion", Alignment::Good), 0);
    }

    #[test]
    fn test_relationship_from_either_side() {
        let graph = sample_graph();
        assert_eq!(graph.relationship("town_guards", "priests"), Relation::Ally);
        // Priests declare nothing, but the guards list them as allies.
        assert_eq!(graph.relationship("priests", "town_guards"), Relation::Ally);
        assert_eq!(graph.relationship("town_guards", "thieves_guild"), Relation::Enemy);
        assert_eq!(graph.relationship("thieves_guild", "merchants"), Relation::Neutral);
        assert_eq!(graph.relationship("priests", "merchants"), Relation::Unrelated);
        assert_eq!(graph.relationship("priests", "ghost_legion"), Relation::Unrelated);
    }

    #[test]
    fn test_allies_of_skips_unknown_ids() {
        let graph = sample_graph();
        // "ghost_legion" is listed as an ally but never defined.
        let allies: Vec<&str> = graph
            .allies_of("town_guards")
            .map(|faction| faction.id.as_str())
            .collect();
        assert_eq!(allies, vec!["priests"]);
    }

    #[test]
    fn test_enemies_of_unknown_faction_is_empty() {
        let graph = sample_graph();
        assert_eq!(graph.enemies_of("ghost_legion").count(), 0);
    }
}
