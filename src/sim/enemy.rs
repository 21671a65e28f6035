//! Enemy seek behavior
//!
//! Enemies wander between random targets with a trapezoidal speed profile:
//! accelerate, cruise once capped at `max_speed`, then brake when the
//! remaining distance drops below `2 * speed^2 / acceleration`.

use glam::Vec2;
use rand::Rng;

use super::entity::{Behavior, Entity};
use super::geometry::{ArenaBounds, Rect, VectorExt};
use crate::consts::ARRIVAL_EPSILON;
use crate::sample_span;

/// Seek state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekPhase {
    /// No target; one is picked on the next update
    Idle,
    /// Moving toward `target`
    Seeking,
}

#[derive(Debug, Clone)]
pub struct EnemyState {
    /// Current speed, `0..=max_speed`
    pub speed: f32,
    pub max_speed: f32,
    pub acceleration: f32,
    pub target: Vec2,
    pub phase: SeekPhase,
    /// Spawned but not yet participating in updates or collisions
    pub spawning: bool,
    /// Bumped on every spawn so a stale activation can be told apart
    pub spawn_generation: u32,
}

impl EnemyState {
    pub fn new(max_speed: f32, acceleration: f32) -> Self {
        Self {
            speed: 0.0,
            max_speed,
            acceleration,
            target: Vec2::ZERO,
            phase: SeekPhase::Idle,
            spawning: false,
            spawn_generation: 0,
        }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.phase == SeekPhase::Seeking
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
        self.phase = SeekPhase::Seeking;
    }

    /// Distance needed to brake from the current speed
    pub fn deceleration_distance(&self) -> f32 {
        if self.acceleration <= 0.0 {
            return 0.0;
        }
        2.0 * (self.speed * self.speed) / self.acceleration
    }
}

/// Create a pooled, inactive enemy entity
pub fn new_enemy(name: impl Into<String>, size: f32, max_speed: f32, acceleration: f32) -> Entity {
    let mut entity = Entity::new(
        name,
        Rect::centered(0.0, 0.0, size, size),
        Behavior::Enemy(EnemyState::new(max_speed, acceleration)),
    );
    entity.deactivate();
    entity
}

/// Advance one enemy by one tick
pub fn update_enemy<R: Rng + ?Sized>(
    enemy: &mut Entity,
    arena: ArenaBounds,
    rng: &mut R,
    dt: f32,
) {
    let Behavior::Enemy(state) = &mut enemy.behavior else {
        return;
    };
    match state.phase {
        SeekPhase::Seeking => seek(&mut enemy.collider, state, dt),
        SeekPhase::Idle => pick_destination(&enemy.collider, state, arena, rng),
    }
}

/// One step toward the target. Arrival (within `ARRIVAL_EPSILON`) drops back
/// to Idle without moving on that tick.
pub fn seek(collider: &mut Rect, state: &mut EnemyState, dt: f32) {
    let to_target = state.target - collider.center();
    let distance = to_target.length();

    let speed = if distance <= state.deceleration_distance() {
        state.speed - state.acceleration * dt
    } else {
        state.speed + state.acceleration * dt
    };
    state.speed = speed.min(state.max_speed).max(0.0);

    if distance <= ARRIVAL_EPSILON {
        state.phase = SeekPhase::Idle;
        return;
    }

    collider.translate(to_target.normalized() * (state.speed * dt));
}

/// Pick a random target inside the arena, padded by half the collider size
pub fn pick_destination<R: Rng + ?Sized>(
    collider: &Rect,
    state: &mut EnemyState,
    arena: ArenaBounds,
    rng: &mut R,
) {
    let half = collider.half_size();
    let span = arena.extent() - collider.size();
    let target = Vec2::new(
        sample_span(rng, half.x, span.x),
        sample_span(rng, half.y, span.y),
    );
    state.set_target(target);
}

/// Put an enemy at `(x, y)` and give it a target. It stays inactive until
/// `activate_spawned` runs with the returned generation.
pub fn spawn<R: Rng + ?Sized>(
    enemy: &mut Entity,
    x: f32,
    y: f32,
    arena: ArenaBounds,
    rng: &mut R,
) -> Option<u32> {
    enemy.force_position(x, y);
    let Behavior::Enemy(state) = &mut enemy.behavior else {
        return None;
    };
    state.phase = SeekPhase::Idle;
    state.spawning = true;
    state.spawn_generation = state.spawn_generation.wrapping_add(1);
    pick_destination(&enemy.collider, state, arena, rng);
    Some(state.spawn_generation)
}

/// Finish the pending spawn of `generation`. Returns false if that spawn was
/// cancelled or superseded by a newer one.
pub fn activate_spawned(enemy: &mut Entity, generation: u32) -> bool {
    let Some(state) = enemy.as_enemy_mut() else {
        return false;
    };
    if !state.spawning || state.spawn_generation != generation {
        return false;
    }
    state.spawning = false;
    enemy.activate();
    true
}

/// Take an enemy out of play and park it off-stage
pub fn despawn(enemy: &mut Entity) {
    enemy.deactivate();
    enemy.force_position(0.0, 0.0);
    if let Some(state) = enemy.as_enemy_mut() {
        state.spawning = false;
        state.speed = 0.0;
        state.phase = SeekPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn arena() -> ArenaBounds {
        ArenaBounds::new(800.0, 600.0)
    }

    #[test]
    fn test_deceleration_distance() {
        let mut state = EnemyState::new(300.0, 100.0);
        state.speed = 50.0;
        assert_eq!(state.deceleration_distance(), 50.0);
    }

    #[test]
    fn test_accelerates_when_far() {
        let mut collider = Rect::centered(0.0, 0.0, 60.0, 60.0);
        let mut state = EnemyState::new(300.0, 100.0);
        state.set_target(Vec2::new(500.0, 0.0));

        seek(&mut collider, &mut state, SIM_DT);
        assert!((state.speed - 100.0 * SIM_DT).abs() < 1e-5);
        assert!((collider.center().x - state.speed * SIM_DT).abs() < 1e-5);
        assert!(state.is_moving());
    }

    #[test]
    fn test_speed_caps_at_max() {
        let mut collider = Rect::centered(0.0, 0.0, 60.0, 60.0);
        let mut state = EnemyState::new(5.0, 100.0);
        state.set_target(Vec2::new(10_000.0, 0.0));
        for _ in 0..30 {
            seek(&mut collider, &mut state, SIM_DT);
        }
        assert_eq!(state.speed, 5.0);
    }

    #[test]
    fn test_brakes_inside_deceleration_distance() {
        let mut collider = Rect::centered(0.0, 0.0, 60.0, 60.0);
        let mut state = EnemyState::new(300.0, 100.0);
        state.speed = 100.0; // needs 200 units to stop
        state.set_target(Vec2::new(150.0, 0.0));

        seek(&mut collider, &mut state, SIM_DT);
        assert!((state.speed - (100.0 - 100.0 * SIM_DT)).abs() < 1e-4);
    }

    #[test]
    fn test_arrival_goes_idle_without_moving() {
        let mut collider = Rect::centered(100.0, 100.0, 60.0, 60.0);
        let mut state = EnemyState::new(300.0, 100.0);
        state.speed = 1.0;
        state.set_target(Vec2::new(102.0, 101.0));

        seek(&mut collider, &mut state, SIM_DT);
        assert!(!state.is_moving());
        assert_eq!(collider.center(), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_idle_picks_padded_target() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut enemy = new_enemy("enemy 1", 65.0, 300.0, 100.0);
        enemy.activate();

        for _ in 0..200 {
            enemy.as_enemy_mut().unwrap().phase = SeekPhase::Idle;
            let before = enemy.center();
            update_enemy(&mut enemy, arena(), &mut rng, SIM_DT);

            let state = enemy.as_enemy().unwrap();
            assert!(state.is_moving());
            assert_eq!(enemy.center(), before);
            assert!(state.target.x >= 32.5 && state.target.x <= 800.0 - 32.5);
            assert!(state.target.y >= 32.5 && state.target.y <= 600.0 - 32.5);
        }
    }

    #[test]
    fn test_reaches_target_eventually() {
        let mut collider = Rect::centered(100.0, 100.0, 60.0, 60.0);
        let mut state = EnemyState::new(300.0, 100.0);
        state.set_target(Vec2::new(400.0, 300.0));

        let mut ticks = 0;
        while state.is_moving() && ticks < 10_000 {
            seek(&mut collider, &mut state, SIM_DT);
            ticks += 1;
        }
        assert!(!state.is_moving());
        assert!((collider.center() - Vec2::new(400.0, 300.0)).length() <= ARRIVAL_EPSILON);
    }

    #[test]
    fn test_spawn_and_despawn_lifecycle() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = new_enemy("enemy 1", 60.0, 300.0, 100.0);

        let generation = spawn(&mut enemy, 250.0, -80.0, arena(), &mut rng).unwrap();
        assert!(!enemy.is_active);
        assert!(enemy.as_enemy().unwrap().spawning);
        assert!(enemy.as_enemy().unwrap().is_moving());
        assert_eq!(enemy.center(), Vec2::new(250.0, -80.0));

        assert!(activate_spawned(&mut enemy, generation));
        assert!(enemy.is_active);
        assert!(!activate_spawned(&mut enemy, generation));

        enemy.as_enemy_mut().unwrap().speed = 120.0;
        despawn(&mut enemy);
        assert!(!enemy.is_active);
        assert_eq!(enemy.center(), Vec2::ZERO);
        assert_eq!(enemy.as_enemy().unwrap().speed, 0.0);
    }

    #[test]
    fn test_superseded_spawn_ignores_old_activation() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = new_enemy("enemy 1", 60.0, 300.0, 100.0);

        let first = spawn(&mut enemy, 100.0, -50.0, arena(), &mut rng).unwrap();
        despawn(&mut enemy);
        let second = spawn(&mut enemy, 300.0, -50.0, arena(), &mut rng).unwrap();
        assert_ne!(first, second);

        assert!(!activate_spawned(&mut enemy, first));
        assert!(!enemy.is_active);
        assert!(activate_spawned(&mut enemy, second));
    }

    #[test]
    fn test_speed_stays_in_range() {
        // Negative acceleration can only come from a hand-built state
        let mut collider = Rect::centered(0.0, 0.0, 60.0, 60.0);
        let mut state = EnemyState::new(300.0, -100.0);
        state.set_target(Vec2::new(500.0, 0.0));
        for _ in 0..60 {
            seek(&mut collider, &mut state, SIM_DT);
            assert!((0.0..=300.0).contains(&state.speed));
        }
        assert_eq!(collider.center(), Vec2::ZERO);
    }
}
