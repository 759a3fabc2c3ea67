use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

use super::action::Direction;
use super::enemy::EnemyController;
use super::placement::{Food, ObstacleField};

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// A snake on the grid
///
/// The body is kept head first. Alongside it the snake keeps a count of how
/// many segments sit on each cell, so membership and self-collision checks
/// are O(1). Every change to `body` goes through `push_front`/`pop_back`,
/// which keep the two in step.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
    occupancy: HashMap<Cell, usize>,
    /// Current direction of movement
    pub direction: Direction,
    pending_growth: usize,
}

impl Snake {
    /// A fresh single-cell snake
    pub fn new(spawn: Cell, direction: Direction) -> Self {
        Self::with_body(spawn, std::iter::empty(), direction)
    }

    /// A snake with an explicit body: `head`, then `rest` towards the tail
    pub fn with_body(head: Cell, rest: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        let mut snake = Self {
            body: VecDeque::new(),
            occupancy: HashMap::new(),
            direction,
            pending_growth: 0,
        };
        snake.push_back(head);
        for cell in rest {
            snake.push_back(cell);
        }
        snake
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Body segments, head first
    pub fn body(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake never loses its last segment
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn pending_growth(&self) -> usize {
        self.pending_growth
    }

    /// True if any segment, head included, occupies `cell`
    pub fn contains(&self, cell: Cell) -> bool {
        self.occupancy.contains_key(&cell)
    }

    /// Turn towards `direction` unless it would reverse the snake onto its neck
    ///
    /// Returns whether the direction was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Step one cell forward, keeping the tail while growth is pending
    pub fn advance(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.push_front(new_head);

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.pop_back();
        }
    }

    /// Keep the tail for `amount` more moves
    pub fn grow(&mut self, amount: usize) {
        self.pending_growth += amount;
    }

    /// True if the head shares its cell with another segment
    pub fn collides_with_self(&self) -> bool {
        self.occupancy.get(&self.head()).copied().unwrap_or(0) > 1
    }

    /// Copy of the occupied cells, safe to hand to placement
    pub fn cells(&self) -> HashSet<Cell> {
        self.occupancy.keys().copied().collect()
    }

    fn push_front(&mut self, cell: Cell) {
        self.body.push_front(cell);
        *self.occupancy.entry(cell).or_insert(0) += 1;
    }

    fn push_back(&mut self, cell: Cell) {
        self.body.push_back(cell);
        *self.occupancy.entry(cell).or_insert(0) += 1;
    }

    fn pop_back(&mut self) {
        if let Some(tail) = self.body.pop_back() {
            match self.occupancy.get_mut(&tail) {
                Some(count) if *count > 1 => *count -= 1,
                _ => {
                    self.occupancy.remove(&tail);
                }
            }
        }
        debug_assert!(!self.body.is_empty());
    }
}

/// What ended the player's round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Ran into an enemy at least as long as itself
    EnemyBody,
    /// Bit its own body
    SelfCollision,
    /// Hit an obstacle
    Obstacle,
    /// Left the grid
    Wall,
    /// Filled the grid, leaving no cell for food
    BoardFull,
}

/// Which phase a round is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Playing,
    /// Terminal: the player died with this score
    RoundOver {
        final_score: u32,
        cause: CollisionType,
    },
}

/// Everything that lives for the duration of one round
#[derive(Debug, Clone)]
pub struct RoundState {
    pub player: Snake,
    pub enemy: Snake,
    pub food: Food,
    pub obstacles: ObstacleField,
    pub enemy_ai: EnemyController,
    pub score: u32,
    pub ticks: u32,
    pub status: RoundStatus,
}

impl RoundState {
    pub fn new(
        player: Snake,
        enemy: Snake,
        food: Food,
        obstacles: ObstacleField,
        enemy_ai: EnemyController,
    ) -> Self {
        Self {
            player,
            enemy,
            food,
            obstacles,
            enemy_ai,
            score: 0,
            ticks: 0,
            status: RoundStatus::Playing,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == RoundStatus::Playing
    }

    /// Cells covered by either snake
    pub fn snake_cells(&self) -> HashSet<Cell> {
        let mut cells = self.player.cells();
        cells.extend(self.enemy.cells());
        cells
    }
}
