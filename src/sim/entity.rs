//! Shared entity record
//!
//! Every simulated object has a name, a collider and an active flag. The
//! behavior-specific fields live in a tagged `Behavior` variant and are
//! driven by the per-variant update functions in `player`, `enemy` and
//! `control_point`.

use glam::Vec2;

use super::control_point::ControlPointState;
use super::enemy::EnemyState;
use super::geometry::Rect;
use super::player::PlayerState;

/// Behavior-specific state attached to an entity
#[derive(Debug, Clone)]
pub enum Behavior {
    Player(PlayerState),
    Enemy(EnemyState),
    ControlPoint(ControlPointState),
}

/// A named block in the arena
#[derive(Debug, Clone)]
pub struct Entity {
    pub name: String,
    pub collider: Rect,
    pub is_active: bool,
    pub behavior: Behavior,
}

impl Entity {
    /// Create an active entity
    pub fn new(name: impl Into<String>, collider: Rect, behavior: Behavior) -> Self {
        Self {
            name: name.into(),
            collider,
            is_active: true,
            behavior,
        }
    }

    /// Teleport the collider center to `(x, y)`
    pub fn force_position(&mut self, x: f32, y: f32) {
        self.collider.set_position(x, y);
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.collider.center()
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Collider overlap test against another rect
    pub fn collides_with(&self, other: &Rect) -> bool {
        self.collider.overlaps(other)
    }

    pub fn as_player(&self) -> Option<&PlayerState> {
        match &self.behavior {
            Behavior::Player(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_enemy(&self) -> Option<&EnemyState> {
        match &self.behavior {
            Behavior::Enemy(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_enemy_mut(&mut self) -> Option<&mut EnemyState> {
        match &mut self.behavior {
            Behavior::Enemy(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_control_point(&self) -> Option<&ControlPointState> {
        match &self.behavior {
            Behavior::ControlPoint(state) => Some(state),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_position_refreshes_corner() {
        let mut e = Entity::new(
            "player",
            Rect::centered(0.0, 0.0, 80.0, 80.0),
            Behavior::Player(PlayerState::new(1200.0, 60.0, 1.2)),
        );
        e.force_position(100.0, 200.0);
        assert_eq!(e.center(), Vec2::new(100.0, 200.0));
        assert_eq!(e.collider.position(), Vec2::new(60.0, 160.0));
    }

    #[test]
    fn test_variant_accessors() {
        let e = Entity::new(
            "enemy 1",
            Rect::centered(0.0, 0.0, 60.0, 60.0),
            Behavior::Enemy(EnemyState::new(300.0, 100.0)),
        );
        assert!(e.as_enemy().is_some());
        assert!(e.as_player().is_none());
        assert!(e.as_control_point().is_none());
    }
}
