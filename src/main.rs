//! Moving Blocks headless runner
//!
//! Plays a session with the autopilot at the fixed tick rate and prints a
//! JSON summary when the game ends or the time limit runs out.
//!
//! Usage: `moving-blocks [seed] [seconds] [tuning.json]`

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use moving_blocks::Tuning;
use moving_blocks::platform::{Autopilot, LogRenderer};
use moving_blocks::sim::{GameEvent, SimulationContext, TickInput, tick};

const DEFAULT_SECONDS: f32 = 120.0;

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    elapsed: f64,
    ticks: u64,
    score: u64,
    lives: i32,
    game_over: bool,
    enemies_spawned: u32,
    lives_lost: u32,
    control_points_depleted: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f32>().ok())
        .filter(|s| *s > 0.0)
        .unwrap_or(DEFAULT_SECONDS);
    let tuning = match args.next() {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };

    log::info!("Moving Blocks (headless) starting...");
    let dt = tuning.dt();
    let max_ticks = (seconds / dt).ceil() as u64;

    let mut ctx = SimulationContext::new(tuning, seed);
    ctx.schedule_message("scheduler test!", 10.0);
    ctx.start();

    let mut pilot = Autopilot::new();
    let mut renderer = LogRenderer::default();
    let mut summary = Summary {
        seed,
        elapsed: 0.0,
        ticks: 0,
        score: 0,
        lives: 0,
        game_over: false,
        enemies_spawned: 0,
        lives_lost: 0,
        control_points_depleted: 0,
    };

    while summary.ticks < max_ticks && !ctx.is_over() {
        pilot.observe(&ctx);
        let input = TickInput::from_source(&pilot);
        tick(&mut ctx, &input, dt);
        ctx.render(&mut renderer);
        summary.ticks += 1;

        for event in ctx.drain_events() {
            match &event {
                GameEvent::EnemySpawned { .. } => summary.enemies_spawned += 1,
                GameEvent::LifeLost { .. } => summary.lives_lost += 1,
                GameEvent::ControlPointDepleted => summary.control_points_depleted += 1,
                GameEvent::GameOver { score, elapsed } => {
                    log::info!("Game over! score {} after {:.1}s", score, elapsed);
                }
                _ => {}
            }
            log::debug!("{:?}", event);
        }
    }

    summary.elapsed = ctx.game.timer();
    summary.score = ctx.game.score_readout();
    summary.lives = ctx.game.lives();
    summary.game_over = ctx.is_over();
    log::info!("Rendered {} entity frames", renderer.drawn);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
