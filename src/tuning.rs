//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here. Defaults match the
//! shipped game; a JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value: {0}")]
    Invalid(String),
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fixed simulation rate (ticks per simulated second)
    pub fps: f32,
    pub arena_width: f32,
    pub arena_height: f32,
    pub max_lives: i32,

    // === Player ===
    pub player_size: f32,
    pub player_max_speed: f32,
    pub player_acceleration: f32,
    pub player_drag: f32,

    // === Enemies ===
    /// Pool size
    pub enemy_count: usize,
    /// Live enemy cap
    pub max_concurrent_enemies: usize,
    pub enemy_base_size: f32,
    /// Each pool slot is this much larger than the previous one
    pub enemy_size_step: f32,
    pub enemy_max_speed: f32,
    pub enemy_acceleration: f32,
    pub initial_spawn_delay: f32,
    pub spawn_delay_min: f32,
    pub spawn_delay_max: f32,
    pub enemy_respawn_cooldown: f32,

    // === Control point ===
    pub control_point_min_radius: f32,
    pub control_point_min_points: f32,
    pub control_point_max_points: f32,
    pub control_point_transfer_rate: f32,
    pub control_point_respawn_delay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fps: FPS,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            max_lives: MAX_LIVES,

            player_size: PLAYER_SIZE,
            player_max_speed: PLAYER_SPEED,
            player_acceleration: PLAYER_ACCELERATION,
            player_drag: PLAYER_DRAG,

            enemy_count: MAX_ENEMIES,
            max_concurrent_enemies: MAX_ENEMIES,
            enemy_base_size: ENEMY_BASE_SIZE,
            enemy_size_step: ENEMY_SIZE_STEP,
            enemy_max_speed: ENEMY_MAX_SPEED,
            enemy_acceleration: ENEMY_ACCELERATION,
            initial_spawn_delay: INITIAL_SPAWN_DELAY,
            spawn_delay_min: SPAWN_DELAY_MIN,
            spawn_delay_max: SPAWN_DELAY_MAX,
            enemy_respawn_cooldown: ENEMY_RESPAWN_COOLDOWN,

            control_point_min_radius: CONTROL_POINT_MIN_RADIUS,
            control_point_min_points: CONTROL_POINT_MIN_POINTS,
            control_point_max_points: CONTROL_POINT_MAX_POINTS,
            control_point_transfer_rate: CONTROL_POINT_TRANSFER_RATE,
            control_point_respawn_delay: CONTROL_POINT_RESPAWN_DELAY,
        }
    }
}

impl Tuning {
    /// Fixed timestep derived from `fps`
    pub fn dt(&self) -> f32 {
        1.0 / self.fps
    }

    /// Parse and validate a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path`, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with. Every float must be
    /// finite; NaN never passes a range check.
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(TuningError::Invalid(format!(
                "fps must be positive and finite, got {}",
                self.fps
            )));
        }
        if !(self.enemy_acceleration.is_finite() && self.enemy_acceleration > 0.0) {
            return Err(TuningError::Invalid(format!(
                "enemy_acceleration must be positive, got {}",
                self.enemy_acceleration
            )));
        }
        if self.max_lives < 1 {
            return Err(TuningError::Invalid("max_lives must be at least 1".into()));
        }
        if self.max_concurrent_enemies < 1 {
            return Err(TuningError::Invalid(
                "max_concurrent_enemies must be at least 1".into(),
            ));
        }

        let non_negative = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("player_size", self.player_size),
            ("player_max_speed", self.player_max_speed),
            ("player_acceleration", self.player_acceleration),
            ("player_drag", self.player_drag),
            ("enemy_base_size", self.enemy_base_size),
            ("enemy_size_step", self.enemy_size_step),
            ("enemy_max_speed", self.enemy_max_speed),
            ("initial_spawn_delay", self.initial_spawn_delay),
            ("spawn_delay_min", self.spawn_delay_min),
            ("spawn_delay_max", self.spawn_delay_max),
            ("enemy_respawn_cooldown", self.enemy_respawn_cooldown),
            ("control_point_min_radius", self.control_point_min_radius),
            ("control_point_min_points", self.control_point_min_points),
            ("control_point_max_points", self.control_point_max_points),
            ("control_point_transfer_rate", self.control_point_transfer_rate),
            ("control_point_respawn_delay", self.control_point_respawn_delay),
        ];
        if let Some((name, value)) = non_negative
            .into_iter()
            .find(|(_, v)| !(v.is_finite() && *v >= 0.0))
        {
            return Err(TuningError::Invalid(format!(
                "{name} must be finite and non-negative, got {value}"
            )));
        }

        if self.spawn_delay_min > self.spawn_delay_max {
            return Err(TuningError::Invalid(format!(
                "spawn_delay_min ({}) exceeds spawn_delay_max ({})",
                self.spawn_delay_min, self.spawn_delay_max
            )));
        }
        if self.control_point_min_points > self.control_point_max_points {
            return Err(TuningError::Invalid(format!(
                "control_point_min_points ({}) exceeds control_point_max_points ({})",
                self.control_point_min_points, self.control_point_max_points
            )));
        }
        Ok(())
    }
}
