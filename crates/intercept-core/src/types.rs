//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::ThreatPhase;

/// 3D position in simulation space (abstract units, Cartesian).
/// x = East, y = North, z = Up (altitude). The defended point sits at the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 3D velocity in simulation space (units/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation time tracking.
///
/// Unlike a fixed-rate tick counter, `elapsed_secs` advances by whatever
/// (already speed-scaled) delta the engine is stepped with.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of steps taken since start.
    pub tick: u64,
    /// Elapsed simulated time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Range to another position (3D distance).
    pub fn range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Horizontal range (ignoring altitude).
    pub fn horizontal_range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Distance from the origin.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Integrate one step of motion: `self += velocity * dt`.
    pub fn advance(&mut self, velocity: &Velocity, dt: f64) {
        self.x += velocity.x * dt;
        self.y += velocity.y * dt;
        self.z += velocity.z * dt;
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Speed magnitude.
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for Velocity {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl SimTime {
    /// Advance by one step of `dt` simulated seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// One value per engagement phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseTable<T> {
    pub tracing: T,
    pub warning: T,
    pub destroy: T,
}

impl<T> PhaseTable<T> {
    pub fn new(tracing: T, warning: T, destroy: T) -> Self {
        Self {
            tracing,
            warning,
            destroy,
        }
    }

    pub fn get(&self, phase: ThreatPhase) -> &T {
        match phase {
            ThreatPhase::Tracing => &self.tracing,
            ThreatPhase::Warning => &self.warning,
            ThreatPhase::Destroy => &self.destroy,
        }
    }

    pub fn get_mut(&mut self, phase: ThreatPhase) -> &mut T {
        match phase {
            ThreatPhase::Tracing => &mut self.tracing,
            ThreatPhase::Warning => &mut self.warning,
            ThreatPhase::Destroy => &mut self.destroy,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PhaseTable<U> {
        PhaseTable {
            tracing: f(&self.tracing),
            warning: f(&self.warning),
            destroy: f(&self.destroy),
        }
    }

    /// Iterate `(phase, value)` pairs in phase order.
    pub fn iter(&self) -> impl Iterator<Item = (ThreatPhase, &T)> {
        ThreatPhase::ALL.into_iter().map(move |phase| (phase, self.get(phase)))
    }
}
