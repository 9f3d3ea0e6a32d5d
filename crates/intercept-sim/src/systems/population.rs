//! Population system: keeps the live threat count at its target.
//!
//! Every spawn draws from its own generator so that two engines started with
//! the same seed see the same threats in the same order, no matter how their
//! engagements diverge.

use hecs::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use intercept_core::components::{Threat, ThreatStatus};
use intercept_core::config::{SimConfig, SpawnConfig};
use intercept_core::enums::*;
use intercept_core::events::SimEvent;
use intercept_core::types::Position;
use intercept_threat_ai::profiles::choose_pattern;

use crate::world_setup::{self, SpawnPlan};

/// User-adjustable spawn selection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnSelection {
    pub scenario: Scenario,
    pub class: ThreatClass,
    pub custom_pattern: MotionPattern,
}

/// Deterministic (when seeded) source of spawn plans.
#[derive(Debug, Clone)]
pub struct PopulationController {
    seed: Option<u64>,
    entropy: ChaCha8Rng,
    spawned: u32,
}

impl PopulationController {
    /// `None` draws every spawn seed from an entropy-seeded generator.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed,
            entropy: ChaCha8Rng::seed_from_u64(rand::random()),
            spawned: 0,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Plan for spawn `index`, reproducible for a seeded controller.
    pub fn plan_for(
        &mut self,
        index: u32,
        spawn: &SpawnConfig,
        default_speed: f64,
        selection: &SpawnSelection,
    ) -> SpawnPlan {
        let spawn_seed = match self.seed {
            Some(seed) => seed.wrapping_add(u64::from(index).wrapping_mul(spawn.seed_stride)),
            None => self.entropy.gen(),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(spawn_seed);
        plan_spawn(&mut rng, spawn, default_speed, selection)
    }

    /// Plan the next spawn and advance the index.
    pub fn next_plan(
        &mut self,
        spawn: &SpawnConfig,
        default_speed: f64,
        selection: &SpawnSelection,
    ) -> (u32, SpawnPlan) {
        let index = self.spawned;
        let plan = self.plan_for(index, spawn, default_speed, selection);
        self.spawned += 1;
        (index, plan)
    }
}

/// Draw a spawn on the ring around the defended point.
pub fn plan_spawn<R: Rng + ?Sized>(
    rng: &mut R,
    spawn: &SpawnConfig,
    default_speed: f64,
    selection: &SpawnSelection,
) -> SpawnPlan {
    let angle: f64 = rng.gen_range(0.0..std::f64::consts::TAU);
    let radius = uniform(rng, spawn.ring_min_radius, spawn.ring_max_radius);
    let height = uniform(rng, spawn.min_height, spawn.max_height);
    let position = Position::new(radius * angle.cos(), radius * angle.sin(), height);

    let aim_point = Position::new(
        uniform(rng, -spawn.aim_jitter, spawn.aim_jitter),
        uniform(rng, -spawn.aim_jitter, spawn.aim_jitter),
        0.0,
    );

    let speed = default_speed
        * match selection.class {
            ThreatClass::Missile => spawn.missile_speed_factor,
            ThreatClass::Drone => spawn.drone_speed_factor,
        };

    let pattern = choose_pattern(
        selection.scenario,
        selection.class,
        selection.custom_pattern,
        rng,
    );

    SpawnPlan {
        position,
        aim_point,
        speed,
        class: selection.class,
        pattern,
    }
}

/// `U[lo, hi)`, or `lo` for an empty interval.
fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Spawn `count` threats unconditionally (the initial batch).
pub fn spawn_batch(
    world: &mut World,
    controller: &mut PopulationController,
    config: &SimConfig,
    selection: &SpawnSelection,
    count: u32,
    events: &mut Vec<SimEvent>,
) -> u32 {
    for _ in 0..count {
        spawn_one(world, controller, config, selection, events);
    }
    count
}

/// Top the live threat count up to `target`. Returns the number spawned.
pub fn run(
    world: &mut World,
    controller: &mut PopulationController,
    config: &SimConfig,
    selection: &SpawnSelection,
    target: u32,
    events: &mut Vec<SimEvent>,
) -> u32 {
    let live = live_threat_count(world);
    let missing = target.saturating_sub(live);
    spawn_batch(world, controller, config, selection, missing, events)
}

/// Active, not-destroyed threats.
pub fn live_threat_count(world: &World) -> u32 {
    world
        .query::<(&Threat, &ThreatStatus)>()
        .iter()
        .filter(|(_, (_, status))| status.active && !status.destroyed)
        .count() as u32
}

fn spawn_one(
    world: &mut World,
    controller: &mut PopulationController,
    config: &SimConfig,
    selection: &SpawnSelection,
    events: &mut Vec<SimEvent>,
) {
    let (serial, plan) = controller.next_plan(&config.spawn, config.default_speed, selection);
    world_setup::spawn_threat(world, serial, &plan, config.trail_length);
    debug!(
        serial,
        class = ?plan.class,
        pattern = ?plan.pattern,
        x = plan.position.x,
        y = plan.position.y,
        z = plan.position.z,
        "threat spawned"
    );
    events.push(SimEvent::ThreatSpawned {
        serial,
        class: plan.class,
        pattern: plan.pattern,
        position: plan.position,
    });
}
