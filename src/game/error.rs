use thiserror::Error;

/// Problems with a [`GameConfig`](super::GameConfig)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: i32, height: i32 },
    #[error("{which} spawn ({x}, {y}) lies outside the grid")]
    SpawnOutOfBounds { which: &'static str, x: i32, y: i32 },
    #[error("{obstacles} obstacles cannot fit on a grid of {cells} cells")]
    TooManyObstacles { obstacles: usize, cells: usize },
    #[error("{field} must be non-zero")]
    Zero { field: &'static str },
}

/// Errors raised by the simulation core
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("grid saturated: needed {needed} free cells, found {free}")]
    GridSaturated { needed: usize, free: usize },
    #[error("invalid game configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
