//! Core game logic module for the arena snake game
//!
//! This module contains the simulation without any I/O or rendering
//! dependencies: the player and enemy snakes, food and obstacle placement,
//! the enemy's chase heuristic and the per-tick update.

pub mod action;
pub mod config;
pub mod enemy;
pub mod engine;
pub mod error;
pub mod placement;
pub mod state;
pub mod view;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use enemy::EnemyController;
pub use engine::{GameEngine, GameEvent, StepResult, TickOutcome};
pub use error::{ConfigError, GameError};
pub use placement::{Food, ObstacleField};
pub use state::{Cell, CollisionType, RoundState, RoundStatus, Snake};
pub use view::{FrameView, Segment, Tile};
