//! NPC reaction resolution.
//!
//! Combines alignment compatibility, faction standing, and personal standing
//! into the seven-step [`Reaction`] scale NPC dialogue and services key off.

use serde::{Deserialize, Serialize};

use faction_rules::{Alignment, FactionGraph, FactionId, Reaction};

use crate::ledger::{NpcId, ReputationLedger};

/// Faction standing contributes one reaction step per this many points.
pub const FACTION_SCORE_STEP: i32 = 10;
/// Personal standing contributes one reaction step per this many points.
pub const INDIVIDUAL_SCORE_STEP: i32 = 20;

/// The static facts about an NPC that reaction resolution needs.
///
/// Content-defined; the engine never mutates a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcProfile {
    pub npc_id: NpcId,
    /// The faction whose politics color this NPC's view, if any.
    #[serde(default)]
    pub faction: Option<FactionId>,
    /// Innate disposition, in reaction steps (grumpy -1, cheerful +1).
    #[serde(default)]
    pub base_reaction: i32,
}

impl NpcProfile {
    pub fn new(npc_id: impl Into<NpcId>) -> Self {
        Self {
            npc_id: npc_id.into(),
            faction: None,
            base_reaction: 0,
        }
    }

    pub fn with_faction(mut self, faction: impl Into<FactionId>) -> Self {
        self.faction = Some(faction.into());
        self
    }

    pub fn with_base_reaction(mut self, base_reaction: i32) -> Self {
        self.base_reaction = base_reaction;
        self
    }
}

/// Resolve how an NPC reacts to a character right now.
///
/// The total is the NPC's innate disposition, plus the alignment
/// compatibility of the NPC's faction, plus one step per 10 points of
/// faction standing and one per 20 points of personal standing, clamped to
/// the reaction scale. Unaffiliated NPCs only bring their disposition and
/// personal standing. Division floors, so negative standings count against
/// the character at the same rate positive ones count for it.
pub fn reaction_to(
    graph: &FactionGraph,
    alignment: Alignment,
    ledger: &ReputationLedger,
    npc: &NpcProfile,
) -> Reaction {
    let mut total = npc.base_reaction;

    if let Some(faction) = &npc.faction {
        total += graph.base_alignment_reaction(faction.as_str(), alignment);
        total += ledger.get(faction.as_str()).div_euclid(FACTION_SCORE_STEP);
    }

    total += ledger
        .get_individual(npc.npc_id.as_str())
        .div_euclid(INDIVIDUAL_SCORE_STEP);

    Reaction::from_total(total)
}
