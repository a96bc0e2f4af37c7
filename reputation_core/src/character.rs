//! The composition root: one character's complete social standing.

use std::sync::Arc;
use tracing::{info, warn};

use faction_rules::{
    parse_alignment, Alignment, AxisPoints, Reaction, ReputationLevel, WorldRules,
};

use crate::decay;
use crate::ledger::{ModifyOutcome, ReputationLedger, ReputationSummary};
use crate::resolver::{self, NpcProfile};
use crate::snapshot::CharacterSnapshot;
use crate::state::{AlignmentState, CharacterId};

/// A character's alignment and reputation, bundled with the world rules they
/// are judged against.
///
/// This is the type game code holds, one per character. It owns the mutable
/// state; the shared [`WorldRules`] behind the `Arc` stay read-only, so many
/// characters can be standing against the same world at once (each from its
/// own owning task or thread).
#[derive(Debug, Clone)]
pub struct CharacterStanding {
    rules: Arc<WorldRules>,
    state: AlignmentState,
    ledger: ReputationLedger,
}

impl CharacterStanding {
    /// Standing for a freshly created character, with the faction baseline
    /// seeded from the alignment's starting table.
    pub fn new(rules: Arc<WorldRules>, character: CharacterId, alignment: Alignment) -> Self {
        let ledger =
            ReputationLedger::seeded(&rules.graph, &rules.starting_reputation, alignment);
        Self {
            rules,
            state: AlignmentState::new(character, alignment),
            ledger,
        }
    }

    pub fn character(&self) -> CharacterId {
        self.state.character()
    }

    pub fn alignment(&self) -> Alignment {
        self.state.alignment()
    }

    pub fn drift(&self) -> AxisPoints {
        self.state.drift()
    }

    pub fn alignment_history(&self) -> &[Alignment] {
        self.state.history()
    }

    pub fn rules(&self) -> &WorldRules {
        &self.rules
    }

    pub fn ledger(&self) -> &ReputationLedger {
        &self.ledger
    }

    /// Administrative alignment override.
    ///
    /// On an actual change the faction baseline is reseeded from the new
    /// alignment's starting table; individual standings and the audit window
    /// are untouched. Returns whether a change occurred.
    pub fn set_alignment(&mut self, new: Alignment) -> bool {
        if !self.state.set_alignment(new) {
            return false;
        }
        self.ledger
            .reseed(&self.rules.graph, &self.rules.starting_reputation, new);
        true
    }

    /// Record a morally weighted action, possibly shifting alignment.
    ///
    /// Drift transitions do not reseed the faction baseline; a character who
    /// slid into Evil keeps the reputation they earned on the way down.
    pub fn add_drift(&mut self, action: &str) -> bool {
        let transitioned = self.state.add_drift(&self.rules.drift, action);
        if transitioned {
            info!(
                character = %self.state.character(),
                alignment = %self.state.alignment(),
                action,
                "alignment shifted"
            );
        }
        transitioned
    }

    /// Apply a faction reputation change with its one-hop cascades.
    pub fn modify_reputation(&mut self, faction: &str, delta: i32, reason: &str) -> ModifyOutcome {
        self.ledger.modify(&self.rules.graph, faction, delta, reason)
    }

    pub fn reputation(&self, faction: &str) -> i32 {
        self.ledger.get(faction)
    }

    pub fn reputation_level(&self, faction: &str) -> ReputationLevel {
        self.ledger.level(faction)
    }

    pub fn price_modifier(&self, faction: &str) -> f32 {
        self.ledger.price_modifier(faction)
    }

    /// Apply a personal standing change with one NPC.
    pub fn modify_individual(&mut self, npc: &str, delta: i32, reason: &str) -> i32 {
        self.ledger.modify_individual(npc, delta, reason)
    }

    pub fn individual(&self, npc: &str) -> i32 {
        self.ledger.get_individual(npc)
    }

    /// How an NPC reacts to this character right now.
    pub fn reaction_to(&self, npc: &NpcProfile) -> Reaction {
        resolver::reaction_to(&self.rules.graph, self.alignment(), &self.ledger, npc)
    }

    /// Cost multiplier an NPC applies to services for this character.
    pub fn service_modifier(&self, npc: &NpcProfile) -> f32 {
        self.reaction_to(npc).service_modifier()
    }

    /// Pull decaying faction standings toward zero for elapsed game days.
    pub fn apply_time_decay(&mut self, days: u32) {
        decay::apply_time_decay(&mut self.ledger, &self.rules.graph, days);
    }

    /// Standing report across all factions and notable NPCs.
    pub fn summary(&self) -> ReputationSummary {
        self.ledger.summary(&self.rules.graph)
    }

    /// Capture the state that must survive a save/load cycle.
    pub fn snapshot(&self) -> CharacterSnapshot {
        CharacterSnapshot {
            character: self.state.character(),
            alignment: self.state.alignment().to_string(),
            faction_reputation: self.ledger.faction_scores().clone(),
            individual_reputation: self.ledger.individual_scores().clone(),
            drift_points: self.state.drift(),
            history: self
                .state
                .history()
                .iter()
                .map(|alignment| alignment.to_string())
                .collect(),
            audit_history: self.ledger.audit().to_vec(),
        }
    }

    /// Rebuild standing from a persisted snapshot.
    ///
    /// Lenient by policy: unrecognized alignment names fall back to Neutral,
    /// factions added to the rules since the save backfill at zero, and an
    /// empty snapshot yields the same state as a fresh Neutral character.
    pub fn restore(rules: Arc<WorldRules>, snapshot: CharacterSnapshot) -> Self {
        if snapshot.is_empty() {
            warn!(character = %snapshot.character, "empty character snapshot, starting fresh");
        }
        let alignment = parse_alignment(&snapshot.alignment);
        let history: Vec<Alignment> = snapshot
            .history
            .iter()
            .map(|name| parse_alignment(name))
            .collect();

        let state = AlignmentState::restore(
            snapshot.character,
            alignment,
            snapshot.drift_points,
            history,
        );
        let ledger = ReputationLedger::restore(
            &rules.graph,
            snapshot.faction_reputation,
            snapshot.individual_reputation,
            snapshot.audit_history,
        );
        Self {
            rules,
            state,
            ledger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> Arc<WorldRules> {
        Arc::new(WorldRules::default())
    }

    fn good_character(rules: &Arc<WorldRules>) -> CharacterStanding {
        CharacterStanding::new(Arc::clone(rules), CharacterId::new(), Alignment::Good)
    }

    #[test]
    fn test_creation_seeds_the_baseline() {
        let rules = world();
        let standing = good_character(&rules);

        assert_eq!(standing.reputation("town_guards"), 15);
        assert_eq!(standing.reputation("thieves_guild"), -15);
        assert_eq!(standing.reputation("merchants"), 0);
    }

    #[test]
    fn test_set_alignment_reseeds_factions_but_keeps_individuals() {
        let rules = world();
        let mut standing = good_character(&rules);
        standing.modify_individual("gareth", 30, "drinks together");

        assert!(standing.set_alignment(Alignment::Evil));
        assert_eq!(standing.reputation("thieves_guild"), 15);
        assert_eq!(standing.reputation("town_guards"), -15);
        assert_eq!(standing.individual("gareth"), 30);

        // Same alignment again changes nothing.
        let _ = standing.modify_reputation("town_guards", 40, "bribed the captain");
        assert!(!standing.set_alignment(Alignment::Evil));
        assert_eq!(standing.reputation("town_guards"), 25);
    }

    #[test]
    fn test_drift_transition_keeps_earned_reputation() {
        let rules = world();
        let mut standing = good_character(&rules);
        let _ = standing.modify_reputation("merchants", 40, "steady customer");

        for _ in 0..7 {
            standing.add_drift("kill_innocent");
        }
        assert_eq!(standing.alignment(), Alignment::Evil);
        assert_eq!(standing.reputation("merchants"), 40);
    }

    #[test]
    fn test_snapshot_round_trips_exactly() {
        let rules = world();
        let mut standing = good_character(&rules);
        let _ = standing.modify_reputation("town_guards", 30, "stopped a robbery");
        standing.modify_individual("gareth", 25, "drinks together");
        standing.add_drift("donate_charity");
        assert!(standing.set_alignment(Alignment::Neutral));

        let snapshot = standing.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: CharacterSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);

        let restored = CharacterStanding::restore(Arc::clone(&rules), parsed);
        assert_eq!(restored.character(), standing.character());
        assert_eq!(restored.alignment(), Alignment::Neutral);
        assert_eq!(restored.drift(), standing.drift());
        assert_eq!(
            restored.alignment_history(),
            &[Alignment::Good, Alignment::Neutral]
        );
        assert_eq!(restored.snapshot(), standing.snapshot());
    }

    #[test]
    fn test_restored_audit_window_resumes() {
        let rules = world();
        let mut standing = good_character(&rules);
        let _ = standing.modify_reputation("merchants", 10, "bought supplies");
        let last_seq = standing.ledger().audit().latest().unwrap().seq;

        let mut restored = CharacterStanding::restore(Arc::clone(&rules), standing.snapshot());
        let _ = restored.modify_reputation("merchants", 10, "bought more supplies");
        assert_eq!(restored.ledger().audit().latest().unwrap().seq, last_seq + 1);
    }

    #[test]
    fn test_garbage_alignment_restores_as_neutral() {
        let rules = world();
        let snapshot = CharacterSnapshot {
            alignment: "chaotic_hungry".to_string(),
            ..CharacterSnapshot::default()
        };

        let restored = CharacterStanding::restore(Arc::clone(&rules), snapshot);
        assert_eq!(restored.alignment(), Alignment::Neutral);
    }

    #[test]
    fn test_empty_snapshot_restores_as_fresh_state() {
        let rules = world();
        let restored = CharacterStanding::restore(Arc::clone(&rules), CharacterSnapshot::default());

        assert_eq!(restored.alignment(), Alignment::Neutral);
        assert_eq!(restored.alignment_history(), &[Alignment::Neutral]);
        // New factions backfill at zero rather than erroring.
        assert_eq!(restored.reputation("town_guards"), 0);
        assert!(restored.ledger().audit().is_empty());
    }

    #[test]
    fn test_empty_snapshot_restores_deterministically() {
        let rules = world();
        let first = CharacterStanding::restore(Arc::clone(&rules), CharacterSnapshot::default());
        let second = CharacterStanding::restore(Arc::clone(&rules), CharacterSnapshot::default());

        assert_eq!(first.character(), CharacterId::nil());
        assert_eq!(first.character(), second.character());
        assert_eq!(first.snapshot(), second.snapshot());
    }

    #[test]
    fn test_reaction_and_prices_compose() {
        let rules = world();
        let mut standing = good_character(&rules);
        let _ = standing.modify_reputation("merchants", 80, "funded a caravan");

        assert_eq!(standing.reputation_level("merchants"), ReputationLevel::Revered);
        assert_eq!(standing.price_modifier("merchants"), 0.7);

        let npc = NpcProfile::new("mira").with_faction("merchants");
        // Merchants lean Neutral: no alignment modifier, 80 / 10 caps the scale.
        assert_eq!(standing.reaction_to(&npc), Reaction::Devoted);
        assert_eq!(standing.service_modifier(&npc), 0.7);
    }
}
