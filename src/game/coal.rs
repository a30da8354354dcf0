use rand::Rng;

use super::config::GameConfig;
use super::train::Position;

/// Pick a uniform cell in the margin-inset band of the grid.
///
/// The y coordinate is drawn on even rows (the visually staggered placement
/// grid) and then clamped into the band, so rows at the very top and bottom
/// collapse onto the margin row. Shared by coal and world power-up spawns.
pub fn random_item_cell(rng: &mut impl Rng, config: &GameConfig) -> Position {
    let margin = config.item_margin;
    let n = config.cell_count;
    let x = rng.gen_range(margin..=n - 1 - margin);
    let y = (rng.gen_range(0..n / 2) * 2).clamp(margin, n - 1 - margin);
    Position::new(x, y)
}

/// The set of coal pickups currently on the grid.
///
/// Spawning makes no attempt to avoid train bodies or existing coal; the
/// per-tick cleanup rule in collision resolution removes and replaces any
/// coal a train ends up covering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoalField {
    /// Active pickup cells, in spawn order
    pub positions: Vec<Position>,
}

impl CoalField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scatter `count` new pickups at random item cells
    pub fn spawn_random(&mut self, rng: &mut impl Rng, count: usize, config: &GameConfig) {
        for _ in 0..count {
            self.positions.push(random_item_cell(rng, config));
        }
    }

    /// Append pickups at the given cells verbatim (used to scatter a dead
    /// rival train's carts)
    pub fn spawn_at(&mut self, positions: impl IntoIterator<Item = Position>) {
        self.positions.extend(positions);
    }

    /// Remove every pickup
    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// If a pickup sits at `pos`, consume it and report a hit. At most one
    /// pickup is consumed per call.
    pub fn check_pickup(&mut self, pos: Position) -> bool {
        if let Some(i) = self.positions.iter().position(|&p| p == pos) {
            self.positions.remove(i);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
