//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (player, enemies by pool index, control point)
//! - No rendering or platform dependencies beyond the `platform` traits

pub mod control_point;
pub mod enemy;
pub mod enemy_manager;
pub mod entity;
pub mod game_manager;
pub mod geometry;
pub mod player;
pub mod state;
pub mod tick;

pub use control_point::{ControlPointState, DrainOutcome};
pub use enemy::{EnemyState, SeekPhase};
pub use enemy_manager::EnemyManager;
pub use entity::{Behavior, Entity};
pub use game_manager::{GameManager, GamePhase, ScheduledTask, Scheduler};
pub use geometry::{ArenaBounds, Rect, VectorExt};
pub use player::PlayerState;
pub use state::{GameEvent, SimulationContext};
pub use tick::{TickInput, tick};
