//! Snake Arena - a terminal snake game against a food-chasing enemy snake
//!
//! This library provides:
//! - Core simulation: snakes, food, obstacles, enemy chase, tick update (game module)
//! - Session statistics and the high-score board (metrics module)
//! - Key mapping (input module), sound cues (audio module)
//! - TUI rendering (render module) and the interactive front-end (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
