//! The three-alignment moral system (Good, Neutral, Evil).

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Coarse moral category for characters, factions, and NPCs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Good,
    #[default]
    Neutral,
    Evil,
}

impl Alignment {
    /// The three axes, in the fixed order drift transitions are checked in.
    pub const AXES: [Alignment; 3] = [Alignment::Good, Alignment::Neutral, Alignment::Evil];

    /// Lowercase axis name as used in config files and save data.
    pub fn name(&self) -> &'static str {
        match self {
            Alignment::Good => "good",
            Alignment::Neutral => "neutral",
            Alignment::Evil => "evil",
        }
    }

    /// Whether two alignments are directly opposed (Good vs Evil).
    pub fn is_opposed_to(&self, other: Alignment) -> bool {
        matches!(
            (self, other),
            (Alignment::Good, Alignment::Evil) | (Alignment::Evil, Alignment::Good)
        )
    }
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Alignment::Good => "Good",
            Alignment::Neutral => "Neutral",
            Alignment::Evil => "Evil",
        };
        write!(f, "{name}")
    }
}

/// Parse an alignment name leniently.
///
/// Total function: any unrecognized name falls back to Neutral so that save
/// data and config can never fail character load over an alignment string.
pub fn parse_alignment(name: &str) -> Alignment {
    match name.trim().to_ascii_lowercase().as_str() {
        "good" => Alignment::Good,
        "neutral" => Alignment::Neutral,
        "evil" => Alignment::Evil,
        other => {
            if !other.is_empty() {
                warn!(name = other, "unrecognized alignment name, using Neutral");
            }
            Alignment::Neutral
        }
    }
}

/// Signed points keyed by the three alignment axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisPoints {
    pub good: i32,
    pub neutral: i32,
    pub evil: i32,
}

impl AxisPoints {
    pub fn new(good: i32, neutral: i32, evil: i32) -> Self {
        Self { good, neutral, evil }
    }

    /// Points accumulated on a single axis.
    pub fn get(&self, axis: Alignment) -> i32 {
        match axis {
            Alignment::Good => self.good,
            Alignment::Neutral => self.neutral,
            Alignment::Evil => self.evil,
        }
    }

    /// Add points to a single axis.
    pub fn add(&mut self, axis: Alignment, points: i32) {
        match axis {
            Alignment::Good => self.good += points,
            Alignment::Neutral => self.neutral += points,
            Alignment::Evil => self.evil += points,
        }
    }

    /// Add another point set axis-by-axis.
    pub fn accumulate(&mut self, other: AxisPoints) {
        self.good += other.good;
        self.neutral += other.neutral;
        self.evil += other.evil;
    }

    /// Zero all three axes.
    pub fn reset(&mut self) {
        *self = AxisPoints::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alignment_known_names() {
        assert_eq!(parse_alignment("good"), Alignment::Good);
        assert_eq!(parse_alignment("Good"), Alignment::Good);
        assert_eq!(parse_alignment(" EVIL "), Alignment::Evil);
        assert_eq!(parse_alignment("neutral"), Alignment::Neutral);
    }

    #[test]
    fn test_parse_alignment_falls_back_to_neutral() {
        assert_eq!(parse_alignment("chaotic_stupid"), Alignment::Neutral);
        assert_eq!(parse_alignment(""), Alignment::Neutral);
    }

    #[test]
    fn test_opposed_alignments() {
        assert!(Alignment::Good.is_opposed_to(Alignment::Evil));
        assert!(Alignment::Evil.is_opposed_to(Alignment::Good));
        assert!(!Alignment::Good.is_opposed_to(Alignment::Neutral));
        assert!(!Alignment::Neutral.is_opposed_to(Alignment::Evil));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for axis in Alignment::AXES {
            assert_eq!(parse_alignment(&axis.to_string()), axis);
        }
    }

    #[test]
    fn test_axis_points_accumulate_and_reset() {
        let mut points = AxisPoints::default();
        points.add(Alignment::Evil, 3);
        points.accumulate(AxisPoints::new(-2, 0, 3));
        assert_eq!(points.get(Alignment::Evil), 6);
        assert_eq!(points.get(Alignment::Good), -2);

        points.reset();
        assert_eq!(points, AxisPoints::default());
    }
}
