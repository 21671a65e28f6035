//! Moving Blocks - an arena dodge game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, movement, enemies, scoring)
//! - `platform`: Renderer / input seams implemented by the host
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate. The tick is never scaled by wall-clock time.
    pub const FPS: f32 = 30.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / FPS;

    pub const MAX_LIVES: i32 = 3;
    pub const MAX_ENEMIES: usize = 20;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 80.0;
    pub const PLAYER_SPEED: f32 = 1200.0; // units per second
    pub const PLAYER_ACCELERATION: f32 = 60.0;
    pub const PLAYER_DRAG: f32 = 1.2;
    /// Momentum multiplier applied on the axis that crossed an arena edge
    pub const BOUNCE_COEFFICIENT: f32 = -0.3;

    /// Enemy defaults (pool slot `i` is `ENEMY_BASE_SIZE + i * ENEMY_SIZE_STEP` wide)
    pub const ENEMY_BASE_SIZE: f32 = 60.0;
    pub const ENEMY_SIZE_STEP: f32 = 5.0;
    pub const ENEMY_MAX_SPEED: f32 = 300.0;
    pub const ENEMY_ACCELERATION: f32 = 100.0;
    /// Distance at which a seeking enemy counts as arrived
    pub const ARRIVAL_EPSILON: f32 = 3.0;
    /// Delay between `spawn` and the enemy joining collision checks
    pub const SPAWN_ACTIVATION_DELAY: f32 = 0.1;
    /// Enemies drop in from up to this far above the arena
    pub const SPAWN_HEIGHT_ABOVE: f32 = 200.0;

    /// Spawn cadence
    pub const INITIAL_SPAWN_DELAY: f32 = 3.0;
    pub const SPAWN_DELAY_MIN: f32 = 3.0;
    pub const SPAWN_DELAY_MAX: f32 = 6.0;
    /// Replacement spawn delay after an enemy is killed
    pub const ENEMY_RESPAWN_COOLDOWN: f32 = 10.0;

    /// Control point defaults
    pub const CONTROL_POINT_MIN_RADIUS: f32 = 60.0;
    pub const CONTROL_POINT_MIN_POINTS: f32 = 100.0;
    pub const CONTROL_POINT_MAX_POINTS: f32 = 200.0;
    pub const CONTROL_POINT_TRANSFER_RATE: f32 = 10.0; // points per second
    pub const CONTROL_POINT_RESPAWN_DELAY: f32 = 3.0;
}

/// Uniform sample in `[min, min + span)`, collapsing to `min` when the span is empty
#[inline]
pub fn sample_span<R: rand::Rng + ?Sized>(rng: &mut R, min: f32, span: f32) -> f32 {
    if span > 0.0 {
        min + rng.random::<f32>() * span
    } else {
        min
    }
}
