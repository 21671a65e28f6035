//! Fixed timestep simulation tick
//!
//! `dt` is a fixed step chosen by the host (normally `Tuning::dt`). It is
//! never measured from wall-clock time, so a host that falls behind slows
//! the game down instead of taking larger steps.

use glam::Vec2;

use super::control_point::{self, DrainOutcome};
use super::entity::Behavior;
use super::game_manager::ScheduledTask;
use super::player::update_player;
use super::state::{GameEvent, SimulationContext};
use crate::platform::InputSource;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held direction, each component in {-1, 0, 1}
    pub direction: Vec2,
}

impl TickInput {
    pub fn new(direction: Vec2) -> Self {
        Self { direction }
    }

    /// Sample an input source once for this tick
    pub fn from_source(source: &dyn InputSource) -> Self {
        Self::new(source.direction())
    }
}

/// Advance the session by one fixed timestep
pub fn tick(ctx: &mut SimulationContext, input: &TickInput, dt: f32) {
    if ctx.is_over() {
        return;
    }

    // Clock and scheduled work
    for task in ctx.game.update(dt) {
        ctx.run_task(task);
    }

    // Player physics
    if let Behavior::Player(state) = &mut ctx.player.behavior {
        update_player(&mut ctx.player.collider, state, input.direction, ctx.arena, dt);
    }

    // Enemy seek
    ctx.enemies.update(ctx.arena, &mut ctx.rng, dt);

    // Control point payout
    let outcome = control_point::drain(&mut ctx.control_point, ctx.player.center(), dt);
    ctx.game.add_score(outcome.amount());
    if let DrainOutcome::Depleted(_) = outcome {
        log::info!("{} depleted", ctx.control_point.name);
        ctx.game.add_scheduled_item(
            ScheduledTask::RespawnControlPoint,
            ctx.tuning.control_point_respawn_delay,
        );
        ctx.push_event(GameEvent::ControlPointDepleted);
    }

    // Player vs enemy collisions
    for index in ctx.enemies.colliding_with(&ctx.player.collider) {
        let ended = ctx.game.lose_life();
        ctx.enemies.kill(index, &mut ctx.game);
        ctx.push_event(GameEvent::EnemyKilled { index });
        ctx.push_event(GameEvent::LifeLost {
            remaining: ctx.game.lives(),
        });

        if ended {
            ctx.push_event(GameEvent::GameOver {
                score: ctx.game.score_readout(),
                elapsed: ctx.game.timer(),
            });
            break;
        }
    }

    log::trace!(
        "t={:.3} player=({:.1}, {:.1}) enemies={} score={:.2}",
        ctx.game.timer(),
        ctx.player.center().x,
        ctx.player.center().y,
        ctx.enemies.active_count(),
        ctx.game.score()
    );
}
