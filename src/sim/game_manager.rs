//! Lives, score, the simulation clock and the one-shot task scheduler
//!
//! Delayed work (enemy spawns, control point respawns) is queued as data
//! against the simulation clock rather than the host's wall clock, so a test
//! can fast-forward by ticking.

use crate::consts::MAX_LIVES;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    GameOver,
}

/// Deferred work executed by the simulation context
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduledTask {
    /// Try to bring one pooled enemy into play
    SpawnEnemy,
    /// Finish one particular spawn of the enemy at this pool index
    ActivateEnemy { index: usize, generation: u32 },
    /// Start a new control point cycle
    RespawnControlPoint,
    /// Emit a message event
    Message(String),
}

#[derive(Debug, Clone)]
struct ScheduledItem<T> {
    task: T,
    fire_at: f64,
    seq: u64,
}

/// Ordered set of one-shot tasks keyed by fire time
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    items: Vec<ScheduledItem<T>>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to fire once the clock reaches `fire_at`
    pub fn schedule_at(&mut self, task: T, fire_at: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.items.push(ScheduledItem { task, fire_at, seq });
    }

    /// Remove and return every task with `fire_at <= now`, earliest first.
    /// Tasks due at the same time keep their scheduling order.
    pub fn take_due(&mut self, now: f64) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| item.fire_at <= now);
        self.items = pending;

        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|item| item.task).collect()
    }

    /// Earliest pending fire time
    pub fn next_fire_time(&self) -> Option<f64> {
        self.items.iter().map(|item| item.fire_at).min_by(f64::total_cmp)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Owns the game-level state: lives, score, elapsed time and scheduling
#[derive(Debug, Clone)]
pub struct GameManager {
    lives: i32,
    score: f64,
    /// Whole-number score as last shown to the player
    score_readout: u64,
    /// Elapsed simulated seconds
    timer: f64,
    phase: GamePhase,
    scheduler: Scheduler<ScheduledTask>,
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new(MAX_LIVES)
    }
}

impl GameManager {
    pub fn new(lives: i32) -> Self {
        Self {
            lives,
            score: 0.0,
            score_readout: 0,
            timer: 0.0,
            phase: GamePhase::Playing,
            scheduler: Scheduler::new(),
        }
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn score_readout(&self) -> u64 {
        self.score_readout
    }

    pub fn timer(&self) -> f64 {
        self.timer
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn scheduler(&self) -> &Scheduler<ScheduledTask> {
        &self.scheduler
    }

    /// Advance the clock by `dt` and return the tasks that came due.
    /// The caller runs them; they have already left the scheduler.
    pub fn update(&mut self, dt: f32) -> Vec<ScheduledTask> {
        if self.is_over() {
            return Vec::new();
        }

        self.timer += f64::from(dt);
        let due = self.scheduler.take_due(self.timer);
        if !due.is_empty() {
            log::debug!("t={:.3}: {} scheduled task(s) due", self.timer, due.len());
        }

        self.refresh_score();
        due
    }

    /// Queue `task` to run `delay` seconds from now
    pub fn add_scheduled_item(&mut self, task: ScheduledTask, delay: f32) {
        let fire_at = self.timer + f64::from(delay);
        log::debug!("scheduling {:?} at t={:.3}", task, fire_at);
        self.scheduler.schedule_at(task, fire_at);
    }

    /// Score only ever goes up
    pub fn add_score(&mut self, delta: f32) {
        if delta > 0.0 {
            self.score += f64::from(delta);
        }
    }

    /// Lose one life. Returns true exactly once: on the call that ends the game.
    pub fn lose_life(&mut self) -> bool {
        if self.is_over() {
            return false;
        }

        self.lives -= 1;
        log::info!("Life lost, {} remaining", self.lives);
        if self.lives <= 0 {
            self.end_game();
            return true;
        }
        false
    }

    fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        self.refresh_score();
        log::info!(
            "Game over after {:.1}s with score {}",
            self.timer,
            self.score_readout
        );
    }

    fn refresh_score(&mut self) {
        self.score_readout = self.score.floor() as u64;
    }
}
