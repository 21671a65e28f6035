//! Control point: a shrinking zone that pays out score
//!
//! While the player's center is inside the zone, points drain at
//! `transfer_rate` per second and the zone shrinks with them
//! (`radius = points + min_radius`). An empty zone deactivates until the
//! owner respawns it somewhere else with a fresh point pool.

use glam::Vec2;
use rand::Rng;

use super::entity::{Behavior, Entity};
use super::geometry::{ArenaBounds, Rect};
use crate::sample_span;

#[derive(Debug, Clone)]
pub struct ControlPointState {
    pub radius: f32,
    pub min_radius: f32,
    /// Points left in the current cycle
    pub points: f32,
    pub min_points: f32,
    pub max_points: f32,
    /// Points per second
    pub transfer_rate: f32,
}

impl ControlPointState {
    pub fn new(min_radius: f32, min_points: f32, max_points: f32, transfer_rate: f32) -> Self {
        Self {
            radius: min_radius,
            min_radius,
            points: 0.0,
            min_points,
            max_points,
            transfer_rate,
        }
    }
}

/// Result of one drain attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrainOutcome {
    /// Inactive or player out of range
    Untouched,
    /// Points moved to the player; zone still has some left
    Drained(f32),
    /// Final points moved; zone is now depleted and inactive
    Depleted(f32),
}

impl DrainOutcome {
    /// Score gained this tick
    pub fn amount(&self) -> f32 {
        match self {
            DrainOutcome::Untouched => 0.0,
            DrainOutcome::Drained(amount) | DrainOutcome::Depleted(amount) => *amount,
        }
    }
}

pub fn new_control_point(name: impl Into<String>, state: ControlPointState) -> Entity {
    let diameter = state.radius * 2.0;
    Entity::new(
        name,
        Rect::centered(0.0, 0.0, diameter, diameter),
        Behavior::ControlPoint(state),
    )
}

/// True if `point` lies strictly inside the zone of an active control point
pub fn in_range(control_point: &Entity, point: Vec2) -> bool {
    let Some(state) = control_point.as_control_point() else {
        return false;
    };
    control_point.is_active && (point - control_point.center()).length() < state.radius
}

/// Reset the point pool and resize the zone to match
pub fn fill(control_point: &mut Entity, points: f32) {
    let Behavior::ControlPoint(state) = &mut control_point.behavior else {
        return;
    };
    state.points = points.max(0.0);
    state.radius = state.points + state.min_radius;
    let diameter = state.radius * 2.0;
    control_point.collider.resize(diameter, diameter);
}

/// Drain one tick worth of points if `player_center` is in range
pub fn drain(control_point: &mut Entity, player_center: Vec2, dt: f32) -> DrainOutcome {
    if !in_range(control_point, player_center) {
        return DrainOutcome::Untouched;
    }
    let Behavior::ControlPoint(state) = &mut control_point.behavior else {
        return DrainOutcome::Untouched;
    };

    let amount = (state.transfer_rate * dt).min(state.points);
    state.points -= amount;
    state.radius = state.points + state.min_radius;
    let diameter = state.radius * 2.0;
    control_point.collider.resize(diameter, diameter);

    if state.points <= 0.0 {
        state.points = 0.0;
        control_point.is_active = false;
        DrainOutcome::Depleted(amount)
    } else {
        DrainOutcome::Drained(amount)
    }
}

/// Start a new cycle: whole-number point pool in `[min_points, max_points)`,
/// random center that keeps the zone inside the arena.
pub fn respawn<R: Rng + ?Sized>(control_point: &mut Entity, arena: ArenaBounds, rng: &mut R) {
    let Some(state) = control_point.as_control_point() else {
        return;
    };
    let points = sample_span(rng, state.min_points, state.max_points - state.min_points).trunc();
    fill(control_point, points);

    let Some(state) = control_point.as_control_point() else {
        return;
    };
    let radius = state.radius;
    let span = arena.extent() - Vec2::splat(radius * 2.0);
    let x = sample_span(rng, radius, span.x);
    let y = sample_span(rng, radius, span.y);
    control_point.force_position(x, y);
    control_point.activate();

    log::info!(
        "{} respawned at ({:.0}, {:.0}) with {} points",
        control_point.name,
        x,
        y,
        points
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn control_point() -> Entity {
        new_control_point("Control Point", ControlPointState::new(60.0, 100.0, 200.0, 10.0))
    }

    #[test]
    fn test_fill_sets_radius() {
        let mut cp = control_point();
        fill(&mut cp, 150.0);
        let state = cp.as_control_point().unwrap();
        assert_eq!(state.radius, 210.0);
        assert_eq!(cp.collider.size(), Vec2::splat(420.0));
    }

    #[test]
    fn test_out_of_range_is_untouched() {
        let mut cp = control_point();
        fill(&mut cp, 150.0);
        cp.force_position(500.0, 500.0);

        // Exactly on the radius does not count
        let outcome = drain(&mut cp, Vec2::new(710.0, 500.0), SIM_DT);
        assert_eq!(outcome, DrainOutcome::Untouched);
        assert_eq!(cp.as_control_point().unwrap().points, 150.0);
    }

    #[test]
    fn test_drain_shrinks_zone() {
        let mut cp = control_point();
        fill(&mut cp, 150.0);
        cp.force_position(500.0, 500.0);

        let outcome = drain(&mut cp, Vec2::new(500.0, 500.0), SIM_DT);
        let expected = 10.0 * SIM_DT;
        assert!((outcome.amount() - expected).abs() < 1e-6);

        let state = cp.as_control_point().unwrap();
        assert!((state.points - (150.0 - expected)).abs() < 1e-4);
        assert_eq!(state.radius, state.points + 60.0);
        assert_eq!(cp.collider.center(), Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_final_drain_depletes() {
        let mut cp = control_point();
        fill(&mut cp, 0.1);
        cp.force_position(500.0, 500.0);

        let outcome = drain(&mut cp, Vec2::new(500.0, 500.0), SIM_DT);
        assert!(matches!(outcome, DrainOutcome::Depleted(a) if (a - 0.1).abs() < 1e-6));
        assert!(!cp.is_active);
        assert_eq!(cp.as_control_point().unwrap().radius, 60.0);

        // Depleted zones pay nothing
        let outcome = drain(&mut cp, Vec2::new(500.0, 500.0), SIM_DT);
        assert_eq!(outcome, DrainOutcome::Untouched);
    }

    #[test]
    fn test_respawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        let arena = ArenaBounds::new(1280.0, 720.0);
        let mut cp = control_point();

        for _ in 0..100 {
            cp.deactivate();
            respawn(&mut cp, arena, &mut rng);
            assert!(cp.is_active);

            let state = cp.as_control_point().unwrap();
            assert!(state.points >= 100.0 && state.points < 200.0);
            assert_eq!(state.points.fract(), 0.0);
            assert!(state.radius >= 160.0 && state.radius <= 260.0);

            let c = cp.center();
            assert!(c.x >= state.radius && c.x <= 1280.0 - state.radius);
            assert!(c.y >= state.radius && c.y <= 720.0 - state.radius);
        }
    }
}
