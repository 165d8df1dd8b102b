//! Diamond Field
//!
//! The authoritative set of unclaimed diamonds. New diamonds are spawned
//! once per tick in proportion to demand: half as many as there are
//! clients waiting for a list, and none at all while nobody is waiting.

use std::sync::Arc;

use crate::core::position::Position;
use crate::core::rng::DeterministicRng;
use crate::game::diamond::{Color, Diamond, DiamondId};

/// Distance kept clear along the left, right and bottom edges.
pub const EDGE_MARGIN: i32 = 20;

/// Height of the reserved strip at the top of the canvas.
pub const TOP_STRIP: i32 = 150;

/// Immutable view of the field, shared by every waiter of one flush.
pub type FieldSnapshot = Arc<[Diamond]>;

/// Configuration for diamond spawning.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Colors to pick from
    pub palette: Vec<Color>,
    /// No spawning while the field holds more than this
    pub spawn_ceiling: usize,
}

/// The set of unclaimed diamonds plus the id allocator.
#[derive(Debug)]
pub struct DiamondField {
    diamonds: Vec<Diamond>,
    next_id: DiamondId,
    config: FieldConfig,
    rng: DeterministicRng,
}

impl DiamondField {
    /// Create an empty field.
    pub fn new(config: FieldConfig, rng: DeterministicRng) -> Self {
        Self {
            diamonds: Vec::new(),
            next_id: 1,
            config,
            rng,
        }
    }

    /// Number of diamonds a tick would spawn for `waiting` pending lists.
    pub fn spawn_count(&self, waiting: usize, spawning_enabled: bool) -> usize {
        if !spawning_enabled || self.diamonds.len() > self.config.spawn_ceiling {
            return 0;
        }
        waiting / 2
    }

    /// Spawn this tick's diamonds. Returns the newly created ones.
    pub fn try_spawn(&mut self, waiting: usize, spawning_enabled: bool) -> Vec<Diamond> {
        let count = self.spawn_count(waiting, spawning_enabled);

        let mut spawned = Vec::with_capacity(count);
        for _ in 0..count {
            let position = self.random_position();
            let color = self.rng.choose(&self.config.palette).cloned().unwrap_or_default();
            spawned.push(self.place(position, color));
        }
        spawned
    }

    /// Put a diamond at a given spot, allocating the next id.
    pub fn place(&mut self, position: Position, color: Color) -> Diamond {
        let diamond = Diamond::new(self.next_id, position, color);
        self.next_id += 1;
        self.diamonds.push(diamond.clone());
        diamond
    }

    /// Random spawn spot: x in [20, width-20), y in [150, height-20).
    fn random_position(&mut self) -> Position {
        let width = i32::try_from(self.config.canvas_width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.config.canvas_height).unwrap_or(i32::MAX);
        let x = self.rng.next_in(EDGE_MARGIN, width - EDGE_MARGIN);
        let y = self.rng.next_in(TOP_STRIP, height - EDGE_MARGIN);
        Position::new(x, y)
    }

    /// Look up a diamond without removing it.
    pub fn get(&self, id: DiamondId) -> Option<&Diamond> {
        self.diamonds.iter().find(|d| d.id == id)
    }

    /// Remove a diamond by id.
    ///
    /// The last diamond takes the removed one's slot, so the order of the
    /// remaining diamonds changes.
    pub fn claim(&mut self, id: DiamondId) -> Option<Diamond> {
        let idx = self.diamonds.iter().position(|d| d.id == id)?;
        Some(self.diamonds.swap_remove(idx))
    }

    /// Whether `id` was ever handed out by this field.
    pub fn was_issued(&self, id: DiamondId) -> bool {
        id < self.next_id
    }

    /// Id the next diamond will get.
    pub fn next_id(&self) -> DiamondId {
        self.next_id
    }

    /// Copy of the current field.
    pub fn snapshot(&self) -> FieldSnapshot {
        self.diamonds.as_slice().into()
    }

    /// Number of unclaimed diamonds.
    pub fn len(&self) -> usize {
        self.diamonds.len()
    }

    /// Whether the field is empty.
    pub fn is_empty(&self) -> bool {
        self.diamonds.is_empty()
    }

    /// Drop every diamond. Ids keep counting up from where they were.
    pub fn reset_all(&mut self) {
        self.diamonds.clear();
    }
}
