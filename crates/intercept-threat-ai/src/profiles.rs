//! Pattern- and class-specific behavioral profiles.
//!
//! Consolidates the parameters the motion steering and the population
//! controller need per motion pattern and threat class.

use intercept_core::enums::{MotionPattern, Scenario, ThreatClass};
use rand::Rng;

/// Lateral deviation parameters for a non-straight motion pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternProfile {
    /// Lateral amplitude (or spiral radius).
    pub amplitude: f64,
    /// Angular frequency (rad/s of pattern time).
    pub frequency: f64,
    /// Weight of the lateral offset against the unit forward direction.
    pub blend: f64,
}

/// Get the deviation profile for a pattern. `None` for straight flight.
pub fn pattern_profile(pattern: MotionPattern) -> Option<PatternProfile> {
    match pattern {
        MotionPattern::Straight => None,
        MotionPattern::Curved => Some(PatternProfile {
            amplitude: 8.0,
            frequency: 1.0,
            blend: 0.1,
        }),
        MotionPattern::Zigzag => Some(PatternProfile {
            amplitude: 5.0,
            frequency: 2.0,
            blend: 0.15,
        }),
        MotionPattern::Spiral => Some(PatternProfile {
            amplitude: 3.0,
            frequency: 1.5,
            blend: 0.1,
        }),
    }
}

/// Behavioral profile for a threat class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProfile {
    /// Chance that a straight-flying spawn is switched to zigzag instead.
    pub erratic_chance: f64,
}

pub fn class_profile(class: ThreatClass) -> ClassProfile {
    match class {
        ThreatClass::Missile => ClassProfile {
            erratic_chance: 0.0,
        },
        ThreatClass::Drone => ClassProfile {
            erratic_chance: 0.5,
        },
    }
}

/// Pattern a scenario assigns before any class bias.
pub fn scenario_pattern(scenario: Scenario, custom: MotionPattern) -> MotionPattern {
    match scenario {
        Scenario::Single => MotionPattern::Straight,
        Scenario::Wave => MotionPattern::Curved,
        Scenario::Saturation => MotionPattern::Zigzag,
        Scenario::Custom => custom,
    }
}

/// Pick the motion pattern for a new spawn.
///
/// The erratic roll is only drawn for straight, non-custom spawns of a class
/// with a non-zero erratic chance, so other spawns consume no randomness here.
pub fn choose_pattern<R: Rng + ?Sized>(
    scenario: Scenario,
    class: ThreatClass,
    custom: MotionPattern,
    rng: &mut R,
) -> MotionPattern {
    let pattern = scenario_pattern(scenario, custom);
    let chance = class_profile(class).erratic_chance;
    if scenario != Scenario::Custom
        && pattern == MotionPattern::Straight
        && chance > 0.0
        && rng.gen_bool(chance)
    {
        return MotionPattern::Zigzag;
    }
    pattern
}
