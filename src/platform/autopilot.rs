//! Demo autopilot
//!
//! Plays the game by "holding keys": heads for the control point and veers
//! away from the nearest active enemy when it gets close. Used by the
//! headless runner and for soak testing.

use glam::Vec2;

use super::{InputSource, Key, KeyState};
use crate::sim::{SimulationContext, VectorExt};

/// Minimum steering component before a key is held
const DEADZONE: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct Autopilot {
    keys: KeyState,
    /// Enemies closer than this (center to center) are avoided
    pub threat_radius: f32,
    /// Weight of fleeing relative to seeking the control point
    pub flee_weight: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            keys: KeyState::default(),
            threat_radius: 220.0,
            flee_weight: 2.0,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look at the arena and decide which keys to hold for the next tick
    pub fn observe(&mut self, ctx: &SimulationContext) {
        let player = ctx.player.center();
        let mut steer = Vec2::ZERO;

        if ctx.control_point.is_active {
            steer += (ctx.control_point.center() - player).normalized();
        }

        let nearest = ctx
            .enemies
            .enemies()
            .iter()
            .filter(|e| e.is_active)
            .map(|e| e.center())
            .min_by(|a, b| a.distance(player).total_cmp(&b.distance(player)));
        if let Some(enemy) = nearest {
            let away = player - enemy;
            if away.length() < self.threat_radius {
                steer += away.normalized() * self.flee_weight;
            }
        }

        let steer = steer.normalized();
        self.keys.set(Key::Left, steer.x < -DEADZONE);
        self.keys.set(Key::Right, steer.x > DEADZONE);
        self.keys.set(Key::Up, steer.y < -DEADZONE);
        self.keys.set(Key::Down, steer.y > DEADZONE);
    }
}

impl InputSource for Autopilot {
    fn direction(&self) -> Vec2 {
        self.keys.direction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn test_heads_for_control_point() {
        let mut ctx = SimulationContext::new(Tuning::default(), 8);
        ctx.control_point.force_position(1000.0, 360.0);
        ctx.player.force_position(200.0, 360.0);

        let mut pilot = Autopilot::new();
        pilot.observe(&ctx);
        assert_eq!(pilot.direction(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_flees_close_enemy() {
        let mut ctx = SimulationContext::new(Tuning::default(), 8);
        ctx.control_point.deactivate();
        ctx.player.force_position(600.0, 360.0);

        let enemy = ctx.enemies.get_mut(0).unwrap();
        enemy.force_position(600.0, 300.0);
        enemy.activate();

        let mut pilot = Autopilot::new();
        pilot.observe(&ctx);
        assert_eq!(pilot.direction(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_releases_keys_when_idle() {
        let mut ctx = SimulationContext::new(Tuning::default(), 8);
        ctx.control_point.deactivate();

        let mut pilot = Autopilot::new();
        pilot.observe(&ctx);
        assert_eq!(pilot.direction(), Vec2::ZERO);
    }
}
