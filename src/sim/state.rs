//! Simulation context
//!
//! Everything one game session needs lives here: arena bounds, the player,
//! the enemy pool, the control point, the game manager (clock, scheduler,
//! lives, score) and the seeded RNG. No module-level globals.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::control_point::{self, ControlPointState, new_control_point};
use super::enemy_manager::EnemyManager;
use super::entity::{Behavior, Entity};
use super::game_manager::{GameManager, ScheduledTask};
use super::geometry::{ArenaBounds, Rect};
use super::player::PlayerState;
use crate::platform::Renderer;
use crate::tuning::Tuning;

/// Things that happened during a tick, for HUDs and hosts
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemySpawned { index: usize },
    /// A scheduled spawn found no free slot or hit the live cap
    SpawnRejected,
    EnemyKilled { index: usize },
    LifeLost { remaining: i32 },
    ControlPointDepleted,
    ControlPointRespawned { points: f32 },
    /// Raised exactly once per session
    GameOver { score: u64, elapsed: f64 },
    Message(String),
}

#[derive(Debug)]
pub struct SimulationContext {
    pub tuning: Tuning,
    pub arena: ArenaBounds,
    pub game: GameManager,
    pub player: Entity,
    pub enemies: EnemyManager,
    pub control_point: Entity,
    pub(super) rng: Pcg32,
    seed: u64,
    events: Vec<GameEvent>,
    started: bool,
}

impl SimulationContext {
    /// Set up a session. Enemies stay pooled until `start`.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let arena = ArenaBounds::new(tuning.arena_width, tuning.arena_height);

        let player = Entity::new(
            "player",
            Rect::centered(
                arena.width / 2.0,
                arena.height / 2.0,
                tuning.player_size,
                tuning.player_size,
            ),
            Behavior::Player(PlayerState::new(
                tuning.player_max_speed,
                tuning.player_acceleration,
                tuning.player_drag,
            )),
        );

        let mut control_point = new_control_point(
            "Control Point",
            ControlPointState::new(
                tuning.control_point_min_radius,
                tuning.control_point_min_points,
                tuning.control_point_max_points,
                tuning.control_point_transfer_rate,
            ),
        );
        control_point::respawn(&mut control_point, arena, &mut rng);

        Self {
            game: GameManager::new(tuning.max_lives),
            enemies: EnemyManager::from_tuning(&tuning),
            tuning,
            arena,
            player,
            control_point,
            rng,
            seed,
            events: Vec::new(),
            started: false,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Kick off the spawn schedule. Only the first call has any effect.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        log::info!("Game starting (seed {})", self.seed);
        self.enemies.start(&mut self.game, &mut self.rng);
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_over(&self) -> bool {
        self.game.is_over()
    }

    /// New arena size from the host; entities re-clamp on the next tick
    pub fn resize_arena(&mut self, width: f32, height: f32) {
        self.arena = ArenaBounds::new(width.max(0.0), height.max(0.0));
        log::debug!("Arena resized to {}x{}", self.arena.width, self.arena.height);
    }

    /// Queue a message event `delay` seconds from now
    pub fn schedule_message(&mut self, text: impl Into<String>, delay: f32) {
        self.game
            .add_scheduled_item(ScheduledTask::Message(text.into()), delay);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Player, enemies, then control point
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        std::iter::once(&self.player)
            .chain(self.enemies.enemies())
            .chain(std::iter::once(&self.control_point))
    }

    /// Hand every entity, active or not, to the renderer
    pub fn render(&self, renderer: &mut dyn Renderer) {
        for entity in self.entities() {
            renderer.draw(entity);
        }
    }

    /// Execute one task that came due on the scheduler
    pub(super) fn run_task(&mut self, task: ScheduledTask) {
        match task {
            ScheduledTask::SpawnEnemy => {
                match self
                    .enemies
                    .spawn_enemy(self.arena, &mut self.game, &mut self.rng)
                {
                    Some(index) => self.push_event(GameEvent::EnemySpawned { index }),
                    None => self.push_event(GameEvent::SpawnRejected),
                }
            }
            ScheduledTask::ActivateEnemy { index, generation } => {
                if !self.enemies.activate(index, generation) {
                    log::debug!("Stale activation of enemy {} skipped", index);
                }
            }
            ScheduledTask::RespawnControlPoint => {
                control_point::respawn(&mut self.control_point, self.arena, &mut self.rng);
                let points = self
                    .control_point
                    .as_control_point()
                    .map_or(0.0, |cp| cp.points);
                self.push_event(GameEvent::ControlPointRespawned { points });
            }
            ScheduledTask::Message(text) => {
                log::info!("[t={:.2}] {}", self.game.timer(), text);
                self.push_event(GameEvent::Message(text));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingRenderer {
        drawn: usize,
        visible: usize,
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, entity: &Entity) {
            self.drawn += 1;
            if entity.is_active {
                self.visible += 1;
            }
        }
    }

    #[test]
    fn test_new_session_layout() {
        let ctx = SimulationContext::new(Tuning::default(), 1);
        assert_eq!(ctx.player.center(), glam::Vec2::new(640.0, 360.0));
        assert!(ctx.control_point.is_active);
        assert_eq!(ctx.enemies.capacity(), 20);
        assert_eq!(ctx.enemies.active_count(), 0);
        assert_eq!(ctx.game.lives(), 3);
        assert!(ctx.game.scheduler().is_empty());
    }

    #[test]
    fn test_start_only_once() {
        let mut ctx = SimulationContext::new(Tuning::default(), 1);
        ctx.start();
        ctx.start();
        assert_eq!(ctx.game.scheduler().len(), 20);
    }

    #[test]
    fn test_render_visits_every_entity() {
        let ctx = SimulationContext::new(Tuning::default(), 1);
        let mut renderer = CountingRenderer::default();
        ctx.render(&mut renderer);
        assert_eq!(renderer.drawn, 22);
        assert_eq!(renderer.visible, 2);
    }

    #[test]
    fn test_message_task_emits_event() {
        let mut ctx = SimulationContext::new(Tuning::default(), 1);
        ctx.run_task(ScheduledTask::Message("scheduler test".into()));
        assert_eq!(
            ctx.drain_events(),
            vec![GameEvent::Message("scheduler test".into())]
        );
        assert!(ctx.events().is_empty());
    }
}
