//! TOML-backed world rules: faction definitions, drift tables, and
//! starting-reputation seeds.
//!
//! The engine consumes all of this as opaque configuration. A compiled-in
//! default rule set keeps the game playable when no rules file is shipped.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::alignment::{Alignment, AxisPoints};
use crate::faction::{Faction, FactionGraph, FactionId, FactionKind};

/// Errors raised while loading a world rules file.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse rules file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Table mapping action types to per-axis drift points.
///
/// Supplied by the quest/action pipeline; actions absent from the table are
/// no-ops, never errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriftTable {
    actions: HashMap<String, AxisPoints>,
}

impl DriftTable {
    pub fn get(&self, action: &str) -> Option<AxisPoints> {
        self.actions.get(action).copied()
    }

    pub fn set(&mut self, action: impl Into<String>, points: AxisPoints) {
        self.actions.insert(action.into(), points);
    }

    pub fn actions(&self) -> impl Iterator<Item = (&str, AxisPoints)> {
        self.actions.iter().map(|(name, points)| (name.as_str(), *points))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Alignment-keyed starting reputation seeds for newly created characters.
///
/// Factions absent from a table seed at 0. Seeds naming factions unknown to
/// the graph are ignored at seeding time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StartingReputation {
    pub good: HashMap<FactionId, i32>,
    pub neutral: HashMap<FactionId, i32>,
    pub evil: HashMap<FactionId, i32>,
}

impl StartingReputation {
    /// The seed table for one alignment.
    pub fn table(&self, alignment: Alignment) -> &HashMap<FactionId, i32> {
        match alignment {
            Alignment::Good => &self.good,
            Alignment::Neutral => &self.neutral,
            Alignment::Evil => &self.evil,
        }
    }

    /// Starting score for a faction under the given alignment (0 when unlisted).
    pub fn seed(&self, alignment: Alignment, faction: &str) -> i32 {
        self.table(alignment).get(faction).copied().unwrap_or(0)
    }
}

/// The complete static rule set: the faction graph plus the tables the engine
/// consumes as configuration.
///
/// Loaded once at startup and shared read-only (typically behind an `Arc`)
/// by every character.
#[derive(Debug, Clone)]
pub struct WorldRules {
    pub graph: FactionGraph,
    pub drift: DriftTable,
    pub starting_reputation: StartingReputation,
}

/// On-disk shape of a rules file: factions are keyed by id.
#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    factions: HashMap<String, FactionSpec>,
    #[serde(default)]
    drift: DriftTable,
    #[serde(default)]
    starting_reputation: StartingReputation,
}

#[derive(Debug, Deserialize)]
struct FactionSpec {
    name: String,
    #[serde(default)]
    kind: FactionKind,
    #[serde(default)]
    description: String,
    #[serde(default)]
    alignment: Alignment,
    #[serde(default)]
    allies: Vec<FactionId>,
    #[serde(default)]
    enemies: Vec<FactionId>,
    #[serde(default)]
    neutral: Vec<FactionId>,
    #[serde(default)]
    decay_rate: f32,
    #[serde(default = "spec_default_multiplier")]
    action_multiplier: f32,
}

fn spec_default_multiplier() -> f32 {
    1.0
}

impl FactionSpec {
    fn into_faction(self, id: FactionId) -> Faction {
        Faction {
            id,
            name: self.name,
            kind: self.kind,
            description: self.description,
            alignment: self.alignment,
            allies: self.allies,
            enemies: self.enemies,
            neutral: self.neutral,
            decay_rate: self.decay_rate,
            action_multiplier: self.action_multiplier,
        }
    }
}

impl WorldRules {
    /// Parse a rules file from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, RulesError> {
        let file: RulesFile = toml::from_str(raw)?;
        let factions = file
            .factions
            .into_iter()
            .map(|(id, spec)| spec.into_faction(FactionId::from(id)));
        Ok(Self {
            graph: FactionGraph::new(factions),
            drift: file.drift,
            starting_reputation: file.starting_reputation,
        })
    }

    /// Load a rules file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}

impl Default for WorldRules {
    /// Compiled-in rule set: the seven stock Rogue City factions, the stock
    /// drift actions, and alignment-keyed starting seeds.
    fn default() -> Self {
        let graph = FactionGraph::new([
            Faction::new("town_guards", "Town Guard", FactionKind::Lawful, Alignment::Good)
                .with_allies(&["priests", "nobles"])
                .with_enemies(&["thieves_guild"]),
            Faction::new("merchants", "Merchant Guild", FactionKind::Merchant, Alignment::Neutral)
                .with_neutral(&["thieves_guild", "town_guards", "priests"]),
            Faction::new("priests", "Temple of Light", FactionKind::Religious, Alignment::Good)
                .with_allies(&["town_guards"])
                .with_enemies(&["thieves_guild"]),
            Faction::new("thieves_guild", "Thieves Guild", FactionKind::Criminal, Alignment::Evil)
                .with_enemies(&["town_guards", "priests"])
                .with_neutral(&["merchants"]),
            Faction::new("scholars", "Academy of Learning", FactionKind::Magical, Alignment::Neutral),
            Faction::new("nobles", "Noble Houses", FactionKind::Neutral, Alignment::Neutral),
            Faction::new("common_folk", "Common Citizens", FactionKind::Neutral, Alignment::Neutral),
        ]);

        let mut drift = DriftTable::default();
        drift.set("help_innocent", AxisPoints::new(2, 0, -1));
        drift.set("kill_innocent", AxisPoints::new(-2, 0, 3));
        drift.set("donate_charity", AxisPoints::new(1, 1, 0));
        drift.set("steal_from_poor", AxisPoints::new(-1, 0, 2));
        drift.set("negotiate_peace", AxisPoints::new(1, 2, -1));
        drift.set("murder_for_gain", AxisPoints::new(-2, 0, 3));
        drift.set("protect_weak", AxisPoints::new(2, 1, 0));

        let starting_reputation = StartingReputation {
            good: [
                (FactionId::from("town_guards"), 15),
                (FactionId::from("priests"), 20),
                (FactionId::from("thieves_guild"), -15),
            ]
            .into(),
            neutral: HashMap::new(),
            evil: [
                (FactionId::from("thieves_guild"), 15),
                (FactionId::from("town_guards"), -15),
                (FactionId::from("priests"), -20),
            ]
            .into(),
        };

        Self {
            graph,
            drift,
            starting_reputation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RULES: &str = r#"
        [factions.town_guards]
        name = "Town Guard"
        kind = "lawful"
        alignment = "good"
        allies = ["priests"]
        enemies = ["thieves_guild"]
        decay_rate = 1.0

        [factions.priests]
        name = "Temple of Light"
        kind = "religious"
        alignment = "good"

        [factions.thieves_guild]
        name = "Thieves Guild"
        kind = "criminal"
        alignment = "evil"
        action_multiplier = 1.5

        [drift.kill_innocent]
        evil = 3
        good = -2

        [starting_reputation.good]
        town_guards = 15
        thieves_guild = -15
    "#;

    #[test]
    fn test_parse_rules_file() {
        let rules = WorldRules::from_toml_str(SAMPLE_RULES).unwrap();

        assert_eq!(rules.graph.len(), 3);
        let guards = rules.graph.get("town_guards").unwrap();
        assert_eq!(guards.name, "Town Guard");
        assert_eq!(guards.kind, FactionKind::Lawful);
        assert_eq!(guards.alignment, Alignment::Good);
        assert_eq!(guards.decay_rate, 1.0);
        assert_eq!(guards.action_multiplier, 1.0);

        let thieves = rules.graph.get("thieves_guild").unwrap();
        assert_eq!(thieves.action_multiplier, 1.5);

        let drift = rules.drift.get("kill_innocent").unwrap();
        assert_eq!(drift.evil, 3);
        assert_eq!(drift.good, -2);
        assert_eq!(drift.neutral, 0);

        assert_eq!(rules.starting_reputation.seed(Alignment::Good, "town_guards"), 15);
        assert_eq!(rules.starting_reputation.seed(Alignment::Good, "priests"), 0);
        assert_eq!(rules.starting_reputation.seed(Alignment::Evil, "town_guards"), 0);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = WorldRules::from_toml_str("factions = 12");
        assert!(matches!(result, Err(RulesError::Parse(_))));
    }

    #[test]
    fn test_default_rules_cover_stock_content() {
        let rules = WorldRules::default();

        assert_eq!(rules.graph.len(), 7);
        assert!(rules.graph.contains("town_guards"));
        assert!(rules.graph.contains("common_folk"));
        assert_eq!(
            rules.graph.relationship("town_guards", "thieves_guild"),
            crate::Relation::Enemy
        );

        assert_eq!(rules.drift.len(), 7);
        let kill = rules.drift.get("kill_innocent").unwrap();
        assert_eq!((kill.good, kill.evil), (-2, 3));

        assert_eq!(rules.starting_reputation.seed(Alignment::Good, "priests"), 20);
        assert_eq!(rules.starting_reputation.seed(Alignment::Evil, "priests"), -20);
        assert_eq!(rules.starting_reputation.seed(Alignment::Neutral, "priests"), 0);
    }
}
