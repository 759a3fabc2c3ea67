//! Random placement of food and obstacles on free cells
//!
//! Placement draws uniformly random cells and rejects occupied ones. After
//! `max_placement_attempts` rejected draws it falls back to scanning the grid
//! for every free cell and picking one of those, so a crowded grid never
//! loops forever. A grid with no free cell at all is reported as
//! [`GameError::GridSaturated`].

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use tracing::warn;

use super::config::GameConfig;
use super::error::GameError;
use super::state::Cell;

/// Pick a random in-bounds cell for which `is_taken` is false
pub fn sample_free_cell<R, F>(rng: &mut R, config: &GameConfig, is_taken: F) -> Result<Cell, GameError>
where
    R: Rng + ?Sized,
    F: Fn(Cell) -> bool,
{
    for _ in 0..config.max_placement_attempts {
        let cell = Cell::new(
            rng.gen_range(0..config.grid_width),
            rng.gen_range(0..config.grid_height),
        );
        if !is_taken(cell) {
            return Ok(cell);
        }
    }

    let free: Vec<Cell> = (0..config.grid_height)
        .flat_map(|y| (0..config.grid_width).map(move |x| Cell::new(x, y)))
        .filter(|cell| !is_taken(*cell))
        .collect();

    warn!(
        attempts = config.max_placement_attempts,
        free = free.len(),
        "rejection sampling exhausted, scanning for free cells"
    );

    free.choose(rng)
        .copied()
        .ok_or(GameError::GridSaturated { needed: 1, free: 0 })
}

/// The single food item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Cell,
}

impl Food {
    pub fn new(position: Cell) -> Self {
        Self { position }
    }

    /// Place food on a random cell outside `occupied`
    pub fn place_avoiding<R: Rng + ?Sized>(
        rng: &mut R,
        config: &GameConfig,
        occupied: &HashSet<Cell>,
    ) -> Result<Self, GameError> {
        let position = sample_free_cell(rng, config, |cell| occupied.contains(&cell))?;
        Ok(Self::new(position))
    }

    /// Replace the food with a fresh placement outside `occupied`
    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        config: &GameConfig,
        occupied: &HashSet<Cell>,
    ) -> Result<(), GameError> {
        *self = Self::place_avoiding(rng, config, occupied)?;
        Ok(())
    }
}

/// A fixed number of distinct obstacle cells
///
/// `cells` keeps placement order for drawing; `index` answers the per-tick
/// membership test. Both are only changed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObstacleField {
    cells: Vec<Cell>,
    index: HashSet<Cell>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// An obstacle field at fixed cells; duplicates are dropped
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut field = Self::new();
        for cell in cells {
            field.insert(cell);
        }
        field
    }

    /// Replace every obstacle with up to `count` fresh cells outside `occupied`
    ///
    /// A grid too crowded for `count` obstacles gets as many as fit.
    /// Returns how many were placed.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        config: &GameConfig,
        occupied: &HashSet<Cell>,
        count: usize,
    ) -> usize {
        self.clear();

        while self.cells.len() < count {
            let index = &self.index;
            match sample_free_cell(rng, config, |cell| {
                occupied.contains(&cell) || index.contains(&cell)
            }) {
                Ok(cell) => self.insert(cell),
                Err(_) => {
                    warn!(
                        wanted = count,
                        placed = self.cells.len(),
                        "no room for every obstacle"
                    );
                    break;
                }
            }
        }

        self.cells.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.index.contains(&cell)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn insert(&mut self, cell: Cell) {
        if self.index.insert(cell) {
            self.cells.push(cell);
        }
        debug_assert_eq!(self.cells.len(), self.index.len());
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.index.clear();
    }
}
