//! Fixed-capacity enemy pool
//!
//! All enemies are allocated up front and recycled by toggling them in and
//! out of play. Spawns are staggered through the game scheduler; killed
//! enemies come back after a cooldown instead of on the same tick.

use rand::Rng;

use super::enemy::{self, new_enemy};
use super::entity::Entity;
use super::game_manager::{GameManager, ScheduledTask};
use super::geometry::{ArenaBounds, Rect};
use crate::consts::{SPAWN_ACTIVATION_DELAY, SPAWN_HEIGHT_ABOVE};
use crate::sample_span;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct EnemyManager {
    enemies: Vec<Entity>,
    /// Live enemy cap (active plus pending spawns)
    pub max_concurrent: usize,
    pub initial_delay: f32,
    pub delay_min: f32,
    pub delay_max: f32,
    /// Delay before a killed enemy's replacement spawn
    pub respawn_cooldown: f32,
}

impl EnemyManager {
    pub fn new(max_concurrent: usize, initial_delay: f32, delay_min: f32, delay_max: f32) -> Self {
        Self {
            enemies: Vec::new(),
            max_concurrent,
            initial_delay,
            delay_min,
            delay_max,
            respawn_cooldown: crate::consts::ENEMY_RESPAWN_COOLDOWN,
        }
    }

    /// Build the full pool described by `tuning`
    pub fn from_tuning(tuning: &Tuning) -> Self {
        let mut manager = Self::new(
            tuning.max_concurrent_enemies,
            tuning.initial_spawn_delay,
            tuning.spawn_delay_min,
            tuning.spawn_delay_max,
        );
        manager.respawn_cooldown = tuning.enemy_respawn_cooldown;

        for i in 0..tuning.enemy_count {
            let size = tuning.enemy_base_size + i as f32 * tuning.enemy_size_step;
            manager.add_enemy(new_enemy(
                format!("enemy {}", i + 1),
                size,
                tuning.enemy_max_speed,
                tuning.enemy_acceleration,
            ));
        }
        manager
    }

    /// Add an entity to the pool, out of play
    pub fn add_enemy(&mut self, mut enemy: Entity) {
        enemy.deactivate();
        self.enemies.push(enemy);
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.enemies.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.enemies.get_mut(index)
    }

    pub fn capacity(&self) -> usize {
        self.enemies.len()
    }

    pub fn active_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_active).count()
    }

    /// Active enemies plus those waiting to activate
    pub fn live_count(&self) -> usize {
        self.enemies.iter().filter(|e| is_live(e)).count()
    }

    /// Schedule the opening wave: one spawn after `initial_delay`, then one per
    /// remaining slot at cumulative random intervals in `[delay_min, delay_max)`.
    pub fn start<R: Rng + ?Sized>(&self, game: &mut GameManager, rng: &mut R) {
        if self.enemies.is_empty() {
            return;
        }

        let mut delay = self.initial_delay;
        game.add_scheduled_item(ScheduledTask::SpawnEnemy, delay);
        for _ in 1..self.enemies.len() {
            delay += sample_span(rng, self.delay_min, self.delay_max - self.delay_min);
            game.add_scheduled_item(ScheduledTask::SpawnEnemy, delay);
        }
        log::info!(
            "Spawner started: {} spawns over {:.1}s",
            self.enemies.len(),
            delay
        );
    }

    /// Bring the first free pool slot into play above the arena.
    /// Returns the slot index, or None (logged) when the pool or cap is full.
    pub fn spawn_enemy<R: Rng + ?Sized>(
        &mut self,
        arena: ArenaBounds,
        game: &mut GameManager,
        rng: &mut R,
    ) -> Option<usize> {
        if self.live_count() >= self.max_concurrent {
            log::warn!(
                "Cannot spawn enemy: {} live of {} allowed",
                self.live_count(),
                self.max_concurrent
            );
            return None;
        }
        let Some(index) = self.enemies.iter().position(|e| !is_live(e)) else {
            log::warn!("Cannot spawn enemy: no free pool slot");
            return None;
        };

        let x = sample_span(rng, 0.0, arena.width);
        let y = -sample_span(rng, 0.0, SPAWN_HEIGHT_ABOVE);
        let slot = &mut self.enemies[index];
        let generation = enemy::spawn(slot, x, y, arena, rng)?;
        game.add_scheduled_item(
            ScheduledTask::ActivateEnemy { index, generation },
            SPAWN_ACTIVATION_DELAY,
        );

        log::info!("Spawning {} at ({:.0}, {:.0})", slot.name, x, y);
        Some(index)
    }

    /// Finish a pending spawn. Activations for an earlier spawn of the
    /// same slot are ignored.
    pub fn activate(&mut self, index: usize, generation: u32) -> bool {
        self.enemies
            .get_mut(index)
            .is_some_and(|slot| enemy::activate_spawned(slot, generation))
    }

    /// Generation of the pending spawn in `index`, if there is one
    pub fn pending_generation(&self, index: usize) -> Option<u32> {
        self.enemies
            .get(index)
            .and_then(Entity::as_enemy)
            .filter(|state| state.spawning)
            .map(|state| state.spawn_generation)
    }

    /// Remove an enemy from play and schedule its replacement
    pub fn kill(&mut self, index: usize, game: &mut GameManager) -> bool {
        if index >= self.enemies.len() {
            log::warn!("Cannot kill enemy {}: pool has {} slots", index, self.capacity());
            return false;
        }
        let slot = &mut self.enemies[index];
        enemy::despawn(slot);
        game.add_scheduled_item(ScheduledTask::SpawnEnemy, self.respawn_cooldown);
        log::info!("Killed {}", slot.name);
        true
    }

    /// Advance every active enemy
    pub fn update<R: Rng + ?Sized>(&mut self, arena: ArenaBounds, rng: &mut R, dt: f32) {
        for slot in self.enemies.iter_mut().filter(|e| e.is_active) {
            enemy::update_enemy(slot, arena, rng, dt);
        }
    }

    /// Pool indices of active enemies overlapping `rect`
    pub fn colliding_with(&self, rect: &Rect) -> Vec<usize> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_active && e.collides_with(rect))
            .map(|(i, _)| i)
            .collect()
    }
}

fn is_live(enemy: &Entity) -> bool {
    enemy.is_active || enemy.as_enemy().is_some_and(|s| s.spawning)
}
