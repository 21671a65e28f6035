//! Player movement
//!
//! The player has no discrete states: input accelerates a momentum vector,
//! drag bleeds it off when there is no input, and the arena edges bounce it
//! back. Momentum is a per-tick displacement, so its cap is `max_speed * dt`.

use glam::Vec2;

use super::geometry::{ArenaBounds, Rect, VectorExt};
use crate::consts::BOUNCE_COEFFICIENT;

/// Momentum-driven movement parameters
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub momentum: Vec2,
    /// Units per second
    pub max_speed: f32,
    /// Momentum gained per second of held input
    pub acceleration: f32,
    pub drag: f32,
}

impl PlayerState {
    pub fn new(max_speed: f32, acceleration: f32, drag: f32) -> Self {
        Self {
            momentum: Vec2::ZERO,
            max_speed,
            acceleration,
            drag,
        }
    }

    /// Fold one tick of input into the momentum and return it
    pub fn integrate(&mut self, direction: Vec2, dt: f32) -> Vec2 {
        if direction.length() > 0.0 {
            self.momentum += direction.normalized() * (self.acceleration * dt);
        } else if self.momentum.length() > self.drag * dt {
            let speed = self.momentum.length();
            self.momentum -= self.momentum.normalized() * (self.drag * speed * dt);
        } else {
            self.momentum = Vec2::ZERO;
        }

        self.momentum = self.momentum.clamped(self.max_speed * dt);
        self.momentum
    }
}

/// Advance the player by one tick
pub fn update_player(
    collider: &mut Rect,
    state: &mut PlayerState,
    direction: Vec2,
    arena: ArenaBounds,
    dt: f32,
) {
    let momentum = state.integrate(direction, dt);
    collider.translate(momentum);
    constrain_to_arena(collider, state, arena);
}

/// Bounce off and clamp to the arena edges.
///
/// The bounce test runs on the un-clamped collider; after clamping the
/// collider can only touch an edge, never cross it.
fn constrain_to_arena(collider: &mut Rect, state: &mut PlayerState, arena: ArenaBounds) {
    if collider.left() < 0.0 || collider.right() > arena.width {
        state.momentum.x *= BOUNCE_COEFFICIENT;
    }
    if collider.top() < 0.0 || collider.bottom() > arena.height {
        state.momentum.y *= BOUNCE_COEFFICIENT;
    }

    let clamped = arena.clamp_center(collider.center(), collider.half_size());
    if clamped != collider.center() {
        collider.set_center(clamped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn arena() -> ArenaBounds {
        ArenaBounds::new(800.0, 600.0)
    }

    #[test]
    fn test_input_accelerates() {
        let mut state = PlayerState::new(1200.0, 60.0, 1.2);
        // Diagonal input is normalized before scaling
        let m = state.integrate(Vec2::new(1.0, 1.0), SIM_DT);
        assert!((m.length() - 60.0 * SIM_DT).abs() < 1e-5);
        assert!((m.x - m.y).abs() < 1e-6);
    }

    #[test]
    fn test_momentum_is_capped() {
        let mut state = PlayerState::new(1200.0, 60.0, 1.2);
        for _ in 0..1000 {
            state.integrate(Vec2::new(1.0, 0.0), SIM_DT);
        }
        assert!((state.momentum.length() - 1200.0 * SIM_DT).abs() < 1e-3);
    }

    #[test]
    fn test_drag_slows_then_stops() {
        let mut state = PlayerState::new(1200.0, 60.0, 1.2);
        state.momentum = Vec2::new(10.0, 0.0);

        let m = state.integrate(Vec2::ZERO, SIM_DT);
        let expected = 10.0 - 1.2 * 10.0 * SIM_DT;
        assert!((m.x - expected).abs() < 1e-5);

        // Below the drag threshold momentum snaps to zero
        state.momentum = Vec2::new(0.01, 0.0);
        assert_eq!(state.integrate(Vec2::ZERO, SIM_DT), Vec2::ZERO);
    }

    #[test]
    fn test_bounce_off_right_edge() {
        let mut collider = Rect::centered(750.0, 300.0, 80.0, 80.0);
        let mut state = PlayerState::new(1200.0, 60.0, 0.0);
        state.momentum = Vec2::new(30.0, 0.0);

        update_player(&mut collider, &mut state, Vec2::ZERO, arena(), SIM_DT);

        assert!((state.momentum.x - (-0.3 * 30.0)).abs() < 1e-5);
        assert_eq!(collider.center().x, 760.0);
        assert_eq!(collider.right(), 800.0);
    }

    #[test]
    fn test_bounce_off_top_edge() {
        let mut collider = Rect::centered(400.0, 45.0, 80.0, 80.0);
        let mut state = PlayerState::new(1200.0, 60.0, 0.0);
        state.momentum = Vec2::new(0.0, -20.0);

        update_player(&mut collider, &mut state, Vec2::ZERO, arena(), SIM_DT);

        assert!((state.momentum.y - 6.0).abs() < 1e-5);
        assert_eq!(collider.center().y, 40.0);
        assert_eq!(collider.top(), 0.0);
    }

    #[test]
    fn test_resting_on_edge_does_not_bounce() {
        let mut collider = Rect::centered(760.0, 300.0, 80.0, 80.0);
        let mut state = PlayerState::new(1200.0, 60.0, 0.0);
        state.momentum = Vec2::new(0.0, 5.0);

        update_player(&mut collider, &mut state, Vec2::ZERO, arena(), SIM_DT);
        assert_eq!(state.momentum, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_shrunk_arena_reclamps() {
        let mut collider = Rect::centered(700.0, 500.0, 80.0, 80.0);
        let mut state = PlayerState::new(1200.0, 60.0, 1.2);

        update_player(&mut collider, &mut state, Vec2::ZERO, ArenaBounds::new(400.0, 300.0), SIM_DT);
        assert_eq!(collider.center(), Vec2::new(360.0, 260.0));
    }
}
