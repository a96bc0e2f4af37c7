//! Per-character alignment state and drift accumulation.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use faction_rules::{Alignment, AxisPoints, DriftTable};

/// Unique identifier for player characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    /// Create a new random character ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Drift points needed on a non-current axis to trigger a transition.
pub const ALIGNMENT_SHIFT_THRESHOLD: i32 = 20;

/// Most past alignments retained in history.
pub const MAX_ALIGNMENT_HISTORY: usize = 64;

/// A character's current alignment plus the accumulated pressure nudging it
/// to change.
///
/// A three-state machine: edges exist only through [`add_drift`] (data
/// driven) and [`set_alignment`] (administrative override).
///
/// [`add_drift`]: AlignmentState::add_drift
/// [`set_alignment`]: AlignmentState::set_alignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentState {
    character: CharacterId,
    alignment: Alignment,
    drift: AxisPoints,
    history: Vec<Alignment>,
}

impl AlignmentState {
    /// State for a freshly created character.
    pub fn new(character: CharacterId, initial: Alignment) -> Self {
        Self {
            character,
            alignment: initial,
            drift: AxisPoints::default(),
            history: vec![initial],
        }
    }

    pub fn character(&self) -> CharacterId {
        self.character
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn drift(&self) -> AxisPoints {
        self.drift
    }

    /// Past alignments, oldest first, including the current one.
    pub fn history(&self) -> &[Alignment] {
        &self.history
    }

    /// Administrative override (character creation, scripted story events).
    ///
    /// Returns whether a change occurred. The caller owns reseeding the
    /// reputation baseline; see `CharacterStanding::set_alignment`.
    pub fn set_alignment(&mut self, new: Alignment) -> bool {
        if new == self.alignment {
            return false;
        }
        debug!(character = %self.character, from = %self.alignment, to = %new, "alignment override");
        self.alignment = new;
        self.push_history(new);
        true
    }

    /// Apply drift for an action type.
    ///
    /// Unknown actions are a no-op returning `false`. Returns `true` iff the
    /// accumulated drift triggered an alignment transition.
    pub fn add_drift(&mut self, table: &DriftTable, action: &str) -> bool {
        let Some(points) = table.get(action) else {
            return false;
        };
        self.drift.accumulate(points);
        self.check_transition()
    }

    // Axes are checked in the fixed order Good, Neutral, Evil; the first
    // non-current axis at or past the threshold wins. All three counters
    // reset on transition, not just the winning axis.
    fn check_transition(&mut self) -> bool {
        for axis in Alignment::AXES {
            if axis == self.alignment {
                continue;
            }
            if self.drift.get(axis) >= ALIGNMENT_SHIFT_THRESHOLD {
                debug!(
                    character = %self.character,
                    from = %self.alignment,
                    to = %axis,
                    "alignment transition from accumulated drift"
                );
                self.alignment = axis;
                self.push_history(axis);
                self.drift.reset();
                return true;
            }
        }
        false
    }

    fn push_history(&mut self, alignment: Alignment) {
        if self.history.len() == MAX_ALIGNMENT_HISTORY {
            self.history.remove(0);
        }
        self.history.push(alignment);
    }

    /// Rebuild state from persisted data.
    pub(crate) fn restore(
        character: CharacterId,
        alignment: Alignment,
        drift: AxisPoints,
        mut history: Vec<Alignment>,
    ) -> Self {
        if history.is_empty() {
            history.push(alignment);
        }
        if history.len() > MAX_ALIGNMENT_HISTORY {
            history.drain(..history.len() - MAX_ALIGNMENT_HISTORY);
        }
        Self {
            character,
            alignment,
            drift,
            history,
        }
    }
}
