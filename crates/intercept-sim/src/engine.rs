//! Simulation engine: the core of the comparison.
//!
//! `SimulationEngine` owns the hecs ECS world, runs all systems, and produces
//! `StatisticsSnapshot`s. Completely headless, enabling deterministic testing.
//! One engine models one algorithm; a comparison runs two side by side with
//! the same seed.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use intercept_core::config::{ConfigError, PolicyConfig, SimConfig};
use intercept_core::constants::*;
use intercept_core::enums::*;
use intercept_core::events::SimEvent;
use intercept_core::state::{InterceptorView, StatisticsSnapshot, ThreatView};
use intercept_core::types::SimTime;

use crate::clock::{Clock, WallClock};
use crate::engagement::{ResponseLog, ScoreState};
use crate::systems;
use crate::systems::population::{PopulationController, SpawnSelection};
use crate::systems::snapshot::StatisticsInputs;
use crate::systems::telemetry::TelemetryState;

/// Salt separating the policy stream from the spawn stream.
const POLICY_RNG_SALT: u64 = 0x9E37_79B9_7F4A_7C15;
/// Salt for the telemetry stream. Telemetry never draws from the policy rng.
const TELEMETRY_RNG_SALT: u64 = 0xD1B5_4A32_D192_ED03;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: SimConfig,
    policy: PolicyConfig,
    clock: Box<dyn Clock>,
    time: SimTime,
    run_state: RunState,
    last_update: Option<f64>,

    simulation_speed: f64,
    max_concurrent_threats: u32,
    spawn_interval: f64,
    selection: SpawnSelection,

    population: PopulationController,
    rng: ChaCha8Rng,
    telemetry_rng: ChaCha8Rng,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,

    score: ScoreState,
    responses: ResponseLog,
    telemetry: TelemetryState,
}

impl SimulationEngine {
    /// Create an idle engine driven by the wall clock.
    pub fn new(config: SimConfig, policy: PolicyConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, policy, WallClock::new())
    }

    /// Create an idle engine driven by `clock`.
    pub fn with_clock(
        config: SimConfig,
        policy: PolicyConfig,
        clock: impl Clock + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        policy.validate()?;
        Ok(Self {
            world: World::new(),
            config,
            policy,
            clock: Box::new(clock),
            time: SimTime::default(),
            run_state: RunState::Idle,
            last_update: None,
            simulation_speed: 1.0,
            max_concurrent_threats: DEFAULT_MAX_CONCURRENT_THREATS,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            selection: SpawnSelection::default(),
            population: PopulationController::new(None),
            rng: ChaCha8Rng::seed_from_u64(rand::random()),
            telemetry_rng: ChaCha8Rng::seed_from_u64(rand::random()),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            score: ScoreState::default(),
            responses: ResponseLog::default(),
            telemetry: TelemetryState::default(),
        })
    }

    /// Clear all state and start a new run with an initial batch of threats.
    ///
    /// `threat_count` defaults to the configured default threat count. With a
    /// seed, every spawn is reproducible across engines.
    pub fn start(&mut self, threat_count: Option<u32>, seed: Option<u64>) {
        self.clear();
        self.population = PopulationController::new(seed);
        self.rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed ^ POLICY_RNG_SALT),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };
        self.telemetry_rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed ^ TELEMETRY_RNG_SALT),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };
        self.run_state = RunState::Running;
        self.last_update = Some(self.clock.now_secs());

        let count = threat_count.unwrap_or(self.config.default_threat_count);
        self.score.threats_spawned += systems::population::spawn_batch(
            &mut self.world,
            &mut self.population,
            &self.config,
            &self.selection,
            count,
            &mut self.events,
        );

        info!(
            algorithm = %self.policy.algorithm,
            threats = count,
            seed = ?seed,
            "simulation started"
        );
    }

    /// Freeze simulated time. No-op unless running.
    pub fn pause(&mut self) {
        if self.run_state == RunState::Running {
            self.run_state = RunState::Paused;
            info!(algorithm = %self.policy.algorithm, "simulation paused");
        }
    }

    /// Continue after `pause`. Time spent paused is not simulated.
    pub fn resume(&mut self) {
        if self.run_state == RunState::Paused {
            self.run_state = RunState::Running;
            self.last_update = Some(self.clock.now_secs());
            info!(algorithm = %self.policy.algorithm, "simulation resumed");
        }
    }

    /// Stop and clear everything. Knobs are kept.
    pub fn reset(&mut self) {
        self.clear();
        self.run_state = RunState::Idle;
        info!(algorithm = %self.policy.algorithm, "simulation reset");
    }

    /// Step by the wall-clock time since the last update, scaled by the
    /// simulation speed. No-op unless running.
    pub fn update(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }
        let now = self.clock.now_secs();
        let Some(last) = self.last_update.replace(now) else {
            return;
        };
        let dt = (now - last).max(0.0) * self.simulation_speed;
        self.advance(dt);
    }

    /// Step by exactly `dt` simulated seconds. No-op unless running.
    pub fn advance(&mut self, dt: f64) {
        if self.run_state != RunState::Running || !dt.is_finite() || dt < 0.0 {
            return;
        }
        self.time.advance(dt);
        self.run_systems(dt);
    }

    /// Aggregate statistics for the current state.
    pub fn statistics(&self) -> StatisticsSnapshot {
        systems::snapshot::build_statistics(
            &self.world,
            &StatisticsInputs {
                policy: &self.policy,
                time: &self.time,
                run_state: self.run_state,
                score: &self.score,
                responses: &self.responses,
                telemetry: &self.telemetry,
            },
        )
    }

    /// Live threats, in spawn order.
    pub fn threats(&self) -> Vec<ThreatView> {
        systems::snapshot::build_threats(&self.world)
    }

    /// Active interceptors.
    pub fn interceptors(&self) -> Vec<InterceptorView> {
        systems::snapshot::build_interceptors(&self.world, self.time.elapsed_secs)
    }

    /// Take the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Seed of the current run, if any.
    pub fn seed(&self) -> Option<u64> {
        self.population.seed()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    // --- Knobs ---

    pub fn simulation_speed(&self) -> f64 {
        self.simulation_speed
    }

    /// Clamped to `0..=MAX_SIMULATION_SPEED`.
    pub fn set_simulation_speed(&mut self, speed: f64) {
        self.simulation_speed = if speed.is_finite() {
            speed.clamp(0.0, MAX_SIMULATION_SPEED)
        } else {
            1.0
        };
    }

    pub fn max_concurrent_threats(&self) -> u32 {
        self.max_concurrent_threats
    }

    pub fn set_max_concurrent_threats(&mut self, count: u32) {
        self.max_concurrent_threats = count;
    }

    /// Advisory only: spawning tops up immediately regardless.
    pub fn spawn_interval(&self) -> f64 {
        self.spawn_interval
    }

    pub fn set_spawn_interval(&mut self, secs: f64) {
        self.spawn_interval = secs.max(0.0);
    }

    pub fn scenario(&self) -> Scenario {
        self.selection.scenario
    }

    pub fn set_scenario(&mut self, scenario: Scenario) {
        self.selection.scenario = scenario;
    }

    pub fn threat_class(&self) -> ThreatClass {
        self.selection.class
    }

    pub fn set_threat_class(&mut self, class: ThreatClass) {
        self.selection.class = class;
    }

    pub fn custom_pattern(&self) -> MotionPattern {
        self.selection.custom_pattern
    }

    pub fn set_custom_pattern(&mut self, pattern: MotionPattern) {
        self.selection.custom_pattern = pattern;
    }

    /// Spawn a straight-flying missile at an exact position (for tests needing
    /// fixed geometry). Returns its serial.
    #[cfg(test)]
    pub fn spawn_threat_at(
        &mut self,
        position: intercept_core::types::Position,
        aim_point: intercept_core::types::Position,
        speed: f64,
    ) -> u32 {
        let serial = 10_000 + self.score.threats_spawned;
        let plan = crate::world_setup::SpawnPlan {
            position,
            aim_point,
            speed,
            class: ThreatClass::Missile,
            pattern: MotionPattern::Straight,
        };
        crate::world_setup::spawn_threat(&mut self.world, serial, &plan, self.config.trail_length);
        self.score.threats_spawned += 1;
        serial
    }

    /// Drop every entity and aggregate.
    fn clear(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.last_update = None;
        self.despawn_buffer.clear();
        self.events.clear();
        self.score = ScoreState::default();
        self.responses = ResponseLog::default();
        systems::telemetry::reset(&mut self.telemetry);
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let now = self.time.elapsed_secs;

        // 1. Population top-up
        self.score.threats_spawned += systems::population::run(
            &mut self.world,
            &mut self.population,
            &self.config,
            &self.selection,
            self.max_concurrent_threats,
            &mut self.events,
        );
        // 2. Scan telemetry
        let live_threats = systems::population::live_threat_count(&self.world);
        systems::telemetry::scan(
            &mut self.telemetry,
            &self.policy,
            self.selection.scenario,
            self.selection.class,
            live_threats,
            now,
            self.config.scan_interval,
            &mut self.telemetry_rng,
        );
        // 3. Detection and phase transitions
        systems::tracker::run(
            &mut self.world,
            &self.config.ranges,
            now,
            &mut self.responses,
            &mut self.score,
            &mut self.events,
        );
        // 4. Threat motion
        systems::threat_motion::run(&mut self.world, &self.config, dt);
        // 5. Interceptor guidance, motion and kills
        systems::interceptor_flight::run(
            &mut self.world,
            self.config.ranges.success_threshold,
            dt,
            now,
            &mut self.events,
        );
        // 6. Accounting and removal
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            now,
            &mut self.score,
            &mut self.responses,
            &mut self.events,
        );
        // 7. Launch decisions
        let launches = systems::engagement_policy::run(
            &mut self.world,
            &self.policy,
            &self.config,
            &mut self.rng,
            now,
            &mut self.score,
            &mut self.responses,
            &mut self.events,
        );
        if launches > 0 {
            debug!(launches, tick = self.time.tick, "launch decisions taken");
        }
        // 8. CPU heuristic
        let live_threats = systems::population::live_threat_count(&self.world);
        let live_interceptors = self.interceptors_active();
        systems::telemetry::update_cpu(
            &mut self.telemetry,
            &self.policy,
            live_threats,
            live_interceptors,
            &mut self.telemetry_rng,
        );
    }

    fn interceptors_active(&self) -> u32 {
        self.world
            .query::<(
                &intercept_core::components::Interceptor,
                &intercept_core::components::InterceptorState,
            )>()
            .iter()
            .filter(|(_, (_, state))| state.active)
            .count() as u32
    }
}
