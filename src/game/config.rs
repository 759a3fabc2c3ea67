use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::ConfigError;
use super::state::Cell;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: i32,
    /// Height of the game grid in cells
    pub grid_height: i32,
    /// Number of obstacles scattered on the grid
    pub obstacle_count: usize,
    /// Pending growth added when a snake eats food
    pub food_growth: usize,
    /// The enemy moves once every this many player ticks
    pub enemy_move_interval: u32,
    /// Number of recent enemy head positions kept for the trail
    pub enemy_trail_capacity: usize,
    /// Where the player snake starts each round
    pub player_spawn: Cell,
    /// Where an enemy snake appears, at round start and after being absorbed
    pub enemy_spawn: Cell,

    // Speed curve
    /// Ticks per second at score zero
    pub base_ticks_per_second: u32,
    /// One extra tick per second for every this many points
    pub points_per_speedup: u32,

    /// Random draws tried before placement falls back to a full scan
    pub max_placement_attempts: usize,
    /// Number of best scores kept on the score board
    pub high_score_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 30,
            obstacle_count: 5,
            food_growth: 2,
            enemy_move_interval: 3,
            enemy_trail_capacity: 30,
            player_spawn: Cell::new(10, 10),
            enemy_spawn: Cell::new(10, 10),
            base_ticks_per_second: 10,
            points_per_speedup: 5,
            max_placement_attempts: 1000,
            high_score_capacity: 5,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            player_spawn: Cell::new(2, 2),
            enemy_spawn: Cell::new(7, 7),
            ..Self::new(10, 10)
        }
    }

    /// Read a JSON configuration file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse game config")?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {:?}", path))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width <= 0 || self.grid_height <= 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        for (which, spawn) in [("player", self.player_spawn), ("enemy", self.enemy_spawn)] {
            if !self.in_bounds(spawn) {
                return Err(ConfigError::SpawnOutOfBounds {
                    which,
                    x: spawn.x,
                    y: spawn.y,
                });
            }
        }

        // Room for both snakes, the food and every obstacle
        let cells = self.cell_count();
        if self.obstacle_count + 3 > cells {
            return Err(ConfigError::TooManyObstacles {
                obstacles: self.obstacle_count,
                cells,
            });
        }

        if self.enemy_move_interval == 0 {
            return Err(ConfigError::Zero {
                field: "enemy_move_interval",
            });
        }
        if self.base_ticks_per_second == 0 {
            return Err(ConfigError::Zero {
                field: "base_ticks_per_second",
            });
        }
        if self.points_per_speedup == 0 {
            return Err(ConfigError::Zero {
                field: "points_per_speedup",
            });
        }

        Ok(())
    }

    /// Check if a cell lies on the grid
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.grid_width && cell.y >= 0 && cell.y < self.grid_height
    }

    pub fn cell_count(&self) -> usize {
        self.grid_width.max(0) as usize * self.grid_height.max(0) as usize
    }

    /// Tick rate for a given score: base rate plus one per `points_per_speedup` points
    pub fn ticks_per_second(&self, score: u32) -> u32 {
        self.base_ticks_per_second + score / self.points_per_speedup.max(1)
    }

    /// Wall-clock time between ticks at a given score
    pub fn tick_interval(&self, score: u32) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.ticks_per_second(score).max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 30);
        assert_eq!(config.obstacle_count, 5);
        assert_eq!(config.enemy_move_interval, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert!(GameConfig::small().validate().is_ok());
    }

    #[test]
    fn test_speed_curve() {
        let config = GameConfig::default();
        assert_eq!(config.ticks_per_second(0), 10);
        assert_eq!(config.ticks_per_second(4), 10);
        assert_eq!(config.ticks_per_second(5), 11);
        assert_eq!(config.ticks_per_second(23), 14);
        assert_eq!(config.tick_interval(0), Duration::from_millis(100));
    }

    #[test]
    fn test_bounds_checking() {
        let config = GameConfig::default();
        assert!(config.in_bounds(Cell::new(0, 0)));
        assert!(config.in_bounds(Cell::new(29, 29)));
        assert!(!config.in_bounds(Cell::new(-1, 0)));
        assert!(!config.in_bounds(Cell::new(30, 0)));
        assert!(!config.in_bounds(Cell::new(0, 30)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert_eq!(
            GameConfig::new(0, 5).validate(),
            Err(ConfigError::EmptyGrid { width: 0, height: 5 })
        );

        let config = GameConfig {
            player_spawn: Cell::new(40, 1),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpawnOutOfBounds { which: "player", x: 40, y: 1 })
        );

        let config = GameConfig {
            obstacle_count: 8,
            player_spawn: Cell::new(0, 0),
            enemy_spawn: Cell::new(0, 0),
            ..GameConfig::new(3, 3)
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManyObstacles { obstacles: 8, cells: 9 })
        );

        let config = GameConfig {
            enemy_move_interval: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Zero { field: "enemy_move_interval" })
        );
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "obstacle_count": 7, "player_spawn": {{ "x": 3, "y": 4 }} }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.obstacle_count, 7);
        assert_eq!(config.player_spawn, Cell::new(3, 4));
        assert_eq!(config.grid_width, 30);
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_width": -2 }}"#).unwrap();

        assert!(GameConfig::load(file.path()).is_err());
    }
}
