//! Discrete reaction and standing scales derived from alignment and reputation.
//!
//! Two presentations of the same ordered idea at different granularity:
//! [`Reaction`] is the seven-step NPC-facing scale used by dialogue and
//! service pricing, [`ReputationLevel`] is the nine-step faction-facing
//! standing used by commerce and status displays.

use serde::{Deserialize, Serialize};

/// Seven-step NPC-facing reaction scale, -3 (Hostile) to +3 (Devoted).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Reaction {
    Hostile,
    Unfriendly,
    Distrustful,
    #[default]
    Neutral,
    Friendly,
    Helpful,
    Devoted,
}

impl Reaction {
    /// Clamp a raw reaction total into the scale.
    pub fn from_total(total: i32) -> Self {
        match total {
            i32::MIN..=-3 => Reaction::Hostile,
            -2 => Reaction::Unfriendly,
            -1 => Reaction::Distrustful,
            0 => Reaction::Neutral,
            1 => Reaction::Friendly,
            2 => Reaction::Helpful,
            _ => Reaction::Devoted,
        }
    }

    /// Position on the -3..=+3 scale.
    pub fn value(&self) -> i32 {
        match self {
            Reaction::Hostile => -3,
            Reaction::Unfriendly => -2,
            Reaction::Distrustful => -1,
            Reaction::Neutral => 0,
            Reaction::Friendly => 1,
            Reaction::Helpful => 2,
            Reaction::Devoted => 3,
        }
    }

    /// Price/service multiplier applied by merchants and service NPCs.
    pub fn service_modifier(&self) -> f32 {
        match self {
            Reaction::Hostile => 3.0,
            Reaction::Unfriendly => 1.5,
            Reaction::Distrustful => 1.2,
            Reaction::Neutral => 1.0,
            Reaction::Friendly => 0.9,
            Reaction::Helpful => 0.8,
            Reaction::Devoted => 0.7,
        }
    }
}

impl std::fmt::Display for Reaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Nine-step faction standing scale, Hated up to Legendary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum ReputationLevel {
    Hated,
    Despised,
    Disliked,
    Unfriendly,
    #[default]
    Neutral,
    Liked,
    Respected,
    Revered,
    Legendary,
}

impl ReputationLevel {
    /// Classify a raw faction score. Breakpoints are inclusive lower bounds.
    pub fn from_score(score: i32) -> Self {
        if score >= 100 {
            ReputationLevel::Legendary
        } else if score >= 75 {
            ReputationLevel::Revered
        } else if score >= 50 {
            ReputationLevel::Respected
        } else if score >= 25 {
            ReputationLevel::Liked
        } else if score >= -25 {
            ReputationLevel::Neutral
        } else if score >= -50 {
            ReputationLevel::Unfriendly
        } else if score >= -75 {
            ReputationLevel::Disliked
        } else if score >= -100 {
            ReputationLevel::Despised
        } else {
            ReputationLevel::Hated
        }
    }

    /// Price multiplier for merchant transactions at this standing.
    pub fn price_modifier(&self) -> f32 {
        match self {
            ReputationLevel::Legendary => 0.5,
            ReputationLevel::Revered => 0.7,
            ReputationLevel::Respected => 0.8,
            ReputationLevel::Liked => 0.9,
            ReputationLevel::Neutral => 1.0,
            ReputationLevel::Unfriendly => 1.2,
            ReputationLevel::Disliked => 1.5,
            ReputationLevel::Despised => 2.0,
            ReputationLevel::Hated => 3.0,
        }
    }
}

impl std::fmt::Display for ReputationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
