//! Simulation constants and tuning parameters.

/// Nominal update rate of a real-time driver (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick at the nominal rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Upper bound for the user-settable simulation speed multiplier.
pub const MAX_SIMULATION_SPEED: f64 = 10.0;

// --- Phase ranges (documented defaults) ---

pub const DEFAULT_TRACING_RANGE: f64 = 80.0;
pub const DEFAULT_WARNING_RANGE: f64 = 50.0;
pub const DEFAULT_DESTROY_RANGE: f64 = 30.0;

/// Radius around the defended point inside which an engaged threat is
/// forcibly destroyed (counted as a miss).
pub const DEFAULT_DEFENDED_RADIUS: f64 = 2.0;

// --- World bounds ---

/// Distance from the origin beyond which a threat has escaped.
pub const DEFAULT_ESCAPE_RADIUS: f64 = 1000.0;

/// Distance to its aim point at which a threat counts as arrived.
pub const DEFAULT_AIM_EPSILON: f64 = 1.0;

// --- Geometry guards ---

/// Below this distance to the aim point, patterned motion reverts to straight.
pub const PATTERN_MIN_AIM_DISTANCE: f64 = 0.1;

/// Minimum length of `forward x up` before falling back to the alternate axis.
pub const PERPENDICULAR_MIN_LENGTH: f64 = 0.1;

/// Interceptors closer than this to their target hold still.
pub const GUIDANCE_MIN_RANGE: f64 = 0.1;

/// Minimum closing speed for predictive (lead) guidance.
pub const GUIDANCE_MIN_CLOSING_SPEED: f64 = 0.1;

// --- Spawning (documented defaults) ---

pub const SPAWN_RING_MIN_RADIUS: f64 = 60.0;
pub const SPAWN_RING_MAX_RADIUS: f64 = 90.0;
pub const SPAWN_MIN_HEIGHT: f64 = 10.0;
pub const SPAWN_MAX_HEIGHT: f64 = 25.0;

/// Half-width of the square jitter applied to each threat's aim point.
pub const SPAWN_AIM_JITTER: f64 = 5.0;

pub const MISSILE_SPEED_FACTOR: f64 = 3.0;
pub const DRONE_SPEED_FACTOR: f64 = 2.0;

/// Seed offset between consecutive spawns: spawn `i` is seeded `seed + i * stride`.
pub const SPAWN_SEED_STRIDE: u64 = 1000;

pub const DEFAULT_MAX_CONCURRENT_THREATS: u32 = 10;

/// Legacy spawn interval (seconds). Advisory only.
pub const DEFAULT_SPAWN_INTERVAL: f64 = 3.0;

// --- Telemetry ---

/// Simulated seconds between scan-throughput recomputations.
pub const DEFAULT_SCAN_INTERVAL: f64 = 0.1;

/// CPU heuristic load factors per live entity.
pub const CPU_LOAD_PER_THREAT: f64 = 0.05;
pub const CPU_LOAD_PER_INTERCEPTOR: f64 = 0.02;

/// Absolute jitter (percentage points) added to the CPU heuristic.
pub const CPU_JITTER: f64 = 2.0;

pub const CPU_MIN_RUNNING: f64 = 10.0;
pub const CPU_MAX: f64 = 100.0;

/// Relative jitter applied to detections per scan.
pub const DETECTION_JITTER: f64 = 0.2;
