use std::collections::VecDeque;

use super::action::Direction;
use super::state::Cell;

/// Drives the enemy snake: a greedy chase towards the food, taken once every
/// `move_interval` player ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyController {
    move_interval: u32,
    phase: u32,
    trail: VecDeque<Cell>,
    trail_capacity: usize,
}

impl EnemyController {
    pub fn new(move_interval: u32, trail_capacity: usize) -> Self {
        Self {
            move_interval: move_interval.max(1),
            phase: 0,
            trail: VecDeque::with_capacity(trail_capacity),
            trail_capacity,
        }
    }

    /// Pick the next direction towards `target`
    ///
    /// Closes the horizontal gap first, then the vertical one. When the head
    /// already sits on the target the current direction is kept. Obstacles
    /// and bodies are not considered.
    pub fn chase(head: Cell, target: Cell, current: Direction) -> Direction {
        if head.x < target.x {
            Direction::Right
        } else if head.x > target.x {
            Direction::Left
        } else if head.y < target.y {
            Direction::Down
        } else if head.y > target.y {
            Direction::Up
        } else {
            current
        }
    }

    /// Count one player tick; true when the enemy moves on this tick
    pub fn tick(&mut self) -> bool {
        self.phase += 1;
        if self.phase >= self.move_interval {
            self.phase = 0;
            true
        } else {
            false
        }
    }

    /// Remember a head position, forgetting the oldest past capacity
    pub fn record(&mut self, head: Cell) {
        if self.trail_capacity == 0 {
            return;
        }
        if self.trail.len() == self.trail_capacity {
            self.trail.pop_front();
        }
        self.trail.push_back(head);
    }

    /// Recent enemy head positions, oldest first
    pub fn trail(&self) -> impl Iterator<Item = Cell> + '_ {
        self.trail.iter().copied()
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }
}
