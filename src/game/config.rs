use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Fog-of-war difficulty. Purely presentational: the simulation core never
/// reads it, only the renderer does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Difficulty {
    /// No fog
    Easy,
    /// Fog outside a generous radius around the train head
    Medium,
    /// Fog outside a tight radius
    Hard,
}

impl Difficulty {
    /// Visible radius around the player head, in cells. `None` disables fog.
    pub fn fog_radius(&self) -> Option<f32> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(6.0),
            Difficulty::Hard => Some(3.0),
        }
    }
}

/// Configuration for one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cells per side of the square world grid
    pub cell_count: i32,
    /// Initial number of train carts (head included)
    pub initial_train_length: usize,
    /// Inset from the grid border inside which coal and power-ups scatter
    pub item_margin: i32,
    /// Simulation tick cadence in milliseconds
    pub tick_interval_ms: u64,
    /// How long a collected power-up stays active
    pub power_up_duration_ms: u64,
    /// Delay between the rival train dying and respawning
    pub ai_respawn_delay_ms: u64,
    /// Minimum distance from every player cart when picking a rival spawn
    pub ai_safe_margin: i32,
    /// Fog-of-war setting consumed by the renderer
    pub difficulty: Difficulty,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_count: 40,
            initial_train_length: 3,
            item_margin: 3,
            tick_interval_ms: 150,
            power_up_duration_ms: 5000,
            ai_respawn_delay_ms: 5000,
            ai_safe_margin: 8,
            difficulty: Difficulty::Medium,
        }
    }
}

/// Smallest playable grid: below this the item band and the rival's
/// safe-spawn inset (margin 8, sampled on `margin + 2 ..= n - margin - 1`)
/// collapse into empty sampling ranges
pub const MIN_CELL_COUNT: i32 = 20;

impl GameConfig {
    /// Create a configuration with a custom grid size, clamped up to
    /// [`MIN_CELL_COUNT`]
    pub fn new(cell_count: i32) -> Self {
        Self {
            cell_count: cell_count.max(MIN_CELL_COUNT),
            ..Default::default()
        }
    }

    /// Small grid for tests
    pub fn small() -> Self {
        Self::new(20)
    }

    /// Whether a position lies inside the world grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.cell_count && y >= 0 && y < self.cell_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.cell_count, 40);
        assert_eq!(config.initial_train_length, 3);
        assert_eq!(config.item_margin, 3);
        assert_eq!(config.tick_interval_ms, 150);
    }

    #[test]
    fn test_bounds() {
        let config = GameConfig::small();
        assert!(config.in_bounds(0, 0));
        assert!(config.in_bounds(19, 19));
        assert!(!config.in_bounds(-1, 0));
        assert!(!config.in_bounds(20, 0));
        assert!(!config.in_bounds(0, 20));
    }

    #[test]
    fn test_grid_size_clamped_to_minimum() {
        assert_eq!(GameConfig::new(10).cell_count, MIN_CELL_COUNT);
        assert_eq!(GameConfig::new(-3).cell_count, MIN_CELL_COUNT);
        assert_eq!(GameConfig::new(40).cell_count, 40);
        // The smallest accepted grid keeps both sampling insets non-empty
        let config = GameConfig::new(MIN_CELL_COUNT);
        assert!(config.item_margin < config.cell_count - 1 - config.item_margin);
        assert!(config.ai_safe_margin + 2 <= config.cell_count - config.ai_safe_margin - 1);
    }

    #[test]
    fn test_fog_radius_by_difficulty() {
        assert_eq!(Difficulty::Easy.fog_radius(), None);
        assert!(Difficulty::Medium.fog_radius() > Difficulty::Hard.fog_radius());
    }
}
