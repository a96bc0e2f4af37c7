//! Time decay: faction standings drift back toward neutral.

use tracing::debug;

use faction_rules::FactionGraph;

use crate::ledger::ReputationLedger;

/// Pull every decaying faction standing toward zero for `days` elapsed days.
///
/// Each faction with a positive decay rate loses `decay_rate * days` points
/// of magnitude, clamped so a standing can never cross zero. Driven by an
/// external world-tick; performs no timing of its own.
pub fn apply_time_decay(ledger: &mut ReputationLedger, graph: &FactionGraph, days: u32) {
    if days == 0 {
        return;
    }

    for faction in graph.factions() {
        if faction.decay_rate <= 0.0 {
            continue;
        }
        let current = ledger.get(faction.id.as_str());
        if current == 0 {
            continue;
        }

        let decay = faction.decay_rate * days as f32;
        let new = if current > 0 {
            (current as f32 - decay).max(0.0) as i32
        } else {
            (current as f32 + decay).min(0.0) as i32
        };

        if new != current {
            debug!(faction = %faction.id, current, new, days, "reputation decayed");
            ledger.apply_decay(&faction.id, new, days);
        }
    }
}
