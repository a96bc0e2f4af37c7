//! Persistable shape of a character's social state.
//!
//! The snapshot is the save-file contract: flat maps and plain strings so
//! hand-edited or version-skewed saves still load. Missing fields default,
//! unknown alignments fall back to Neutral, and the restore path tolerates
//! factions that have appeared or vanished since the save was written.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use faction_rules::{AxisPoints, FactionId};

use crate::audit::AuditRecord;
use crate::ledger::NpcId;
use crate::state::CharacterId;

/// Everything about a character's standing that must survive a save/load
/// cycle.
///
/// Produced by `CharacterStanding::snapshot` and consumed by
/// `CharacterStanding::restore`; the engine never reads one directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    /// Nil when the save predates character ids, so reloads stay deterministic.
    #[serde(default = "CharacterId::nil")]
    pub character: CharacterId,
    /// Alignment name; parsed leniently on restore.
    #[serde(default)]
    pub alignment: String,
    #[serde(default)]
    pub faction_reputation: HashMap<FactionId, i32>,
    #[serde(default)]
    pub individual_reputation: HashMap<NpcId, i32>,
    #[serde(default)]
    pub drift_points: AxisPoints,
    /// Past alignments, oldest first.
    #[serde(default)]
    pub history: Vec<String>,
    /// Trailing audit window at save time.
    #[serde(default)]
    pub audit_history: Vec<AuditRecord>,
}

impl Default for CharacterSnapshot {
    fn default() -> Self {
        Self {
            character: CharacterId::nil(),
            alignment: String::new(),
            faction_reputation: HashMap::new(),
            individual_reputation: HashMap::new(),
            drift_points: AxisPoints::default(),
            history: Vec::new(),
            audit_history: Vec::new(),
        }
    }
}

impl CharacterSnapshot {
    /// True when the snapshot carries no saved state at all: no alignment
    /// name, no scores, no history, no audit records.
    pub fn is_empty(&self) -> bool {
        self.alignment.is_empty()
            && self.faction_reputation.is_empty()
            && self.individual_reputation.is_empty()
            && self.history.is_empty()
            && self.audit_history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let snapshot: CharacterSnapshot =
            serde_json::from_str(r#"{"alignment": "good"}"#).unwrap();

        assert_eq!(snapshot.alignment, "good");
        assert!(snapshot.faction_reputation.is_empty());
        assert!(snapshot.history.is_empty());
        assert_eq!(snapshot.drift_points, AxisPoints::default());
    }

    #[test]
    fn test_empty_object_parses() {
        let snapshot: CharacterSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot.alignment, "");
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_missing_character_id_defaults_to_nil() {
        let first: CharacterSnapshot = serde_json::from_str("{}").unwrap();
        let second: CharacterSnapshot = serde_json::from_str("{}").unwrap();

        assert_eq!(first.character, CharacterId::nil());
        // Deterministic: the same save loads to the same id every time.
        assert_eq!(first.character, second.character);
    }

    #[test]
    fn test_any_saved_state_is_not_empty() {
        let snapshot: CharacterSnapshot =
            serde_json::from_str(r#"{"alignment": "evil"}"#).unwrap();
        assert!(!snapshot.is_empty());

        let snapshot: CharacterSnapshot =
            serde_json::from_str(r#"{"faction_reputation": {"town_guards": 5}}"#).unwrap();
        assert!(!snapshot.is_empty());
    }
}
