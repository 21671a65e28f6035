//! Platform abstraction layer
//!
//! The simulation never touches a display or a keyboard directly. Hosts
//! implement `Renderer` to show entities and feed an `InputSource` (usually a
//! `KeyState` they update from key events) into each tick.

pub mod autopilot;

use glam::Vec2;

use crate::sim::Entity;

pub use autopilot::Autopilot;

/// Draws (or hides) one entity. Must not fail.
pub trait Renderer {
    fn draw(&mut self, entity: &Entity);
}

/// Produces the held movement direction for the current tick
pub trait InputSource {
    /// Components in {-1, 0, 1}; diagonals are not normalized
    fn direction(&self) -> Vec2;
}

/// Movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Map a DOM-style key name (`ArrowUp`, `w`, ...) to a movement key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            _ => None,
        }
    }
}

/// Caller-owned set of held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Up => self.up = held,
            Key::Down => self.down = held,
            Key::Left => self.left = held,
            Key::Right => self.right = held,
        }
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Left => self.left,
            Key::Right => self.right,
        }
    }

    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

impl InputSource for KeyState {
    fn direction(&self) -> Vec2 {
        let mut direction = Vec2::ZERO;
        if self.up {
            direction.y -= 1.0;
        }
        if self.down {
            direction.y += 1.0;
        }
        if self.left {
            direction.x -= 1.0;
        }
        if self.right {
            direction.x += 1.0;
        }
        direction
    }
}

/// Renderer that writes entity rects to the `trace` log
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub drawn: u64,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, entity: &Entity) {
        self.drawn += 1;
        if entity.is_active {
            let pos = entity.collider.position();
            let size = entity.collider.size();
            log::trace!(
                "draw {} at ({:.1}, {:.1}) size {:.0}x{:.0}",
                entity.name,
                pos.x,
                pos.y,
                size.x,
                size.y
            );
        } else {
            log::trace!("hide {}", entity.name);
        }
    }
}
