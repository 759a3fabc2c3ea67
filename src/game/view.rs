use std::collections::HashMap;

use super::state::{Cell, RoundState, RoundStatus, Snake};

/// What occupies a cell in a rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Trail,
    Obstacle,
    Food,
    EnemyBody,
    EnemyHead,
    PlayerBody,
    PlayerHead,
}

/// One snake segment as handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub cell: Cell,
    pub is_head: bool,
}

/// Read-only snapshot of a round, taken after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub grid_width: i32,
    pub grid_height: i32,
    pub player: Vec<Segment>,
    pub enemy: Vec<Segment>,
    pub enemy_trail: Vec<Cell>,
    pub food: Cell,
    pub obstacles: Vec<Cell>,
    pub score: u32,
    pub status: RoundStatus,
    tiles: HashMap<Cell, Tile>,
}

impl FrameView {
    pub fn capture(state: &RoundState, grid_width: i32, grid_height: i32) -> Self {
        let player = segments(&state.player);
        let enemy = segments(&state.enemy);
        let enemy_trail: Vec<Cell> = state.enemy_ai.trail().collect();
        let obstacles = state.obstacles.cells().to_vec();

        // Later layers draw over earlier ones
        let mut tiles = HashMap::new();
        tiles.extend(enemy_trail.iter().map(|cell| (*cell, Tile::Trail)));
        tiles.extend(obstacles.iter().map(|cell| (*cell, Tile::Obstacle)));
        tiles.insert(state.food.position, Tile::Food);
        for (snake, head, body) in [
            (&enemy, Tile::EnemyHead, Tile::EnemyBody),
            (&player, Tile::PlayerHead, Tile::PlayerBody),
        ] {
            // Body first so the head wins when it overlaps a segment
            for segment in snake.iter().rev() {
                tiles.insert(segment.cell, if segment.is_head { head } else { body });
            }
        }

        Self {
            grid_width,
            grid_height,
            player,
            enemy,
            enemy_trail,
            food: state.food.position,
            obstacles,
            score: state.score,
            status: state.status,
            tiles,
        }
    }

    pub fn tile_at(&self, cell: Cell) -> Tile {
        self.tiles.get(&cell).copied().unwrap_or(Tile::Empty)
    }
}

fn segments(snake: &Snake) -> Vec<Segment> {
    snake
        .body()
        .enumerate()
        .map(|(i, cell)| Segment { cell, is_head: i == 0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, EnemyController, Food, ObstacleField};

    fn sample_state() -> RoundState {
        let mut enemy_ai = EnemyController::new(3, 30);
        enemy_ai.record(Cell::new(8, 8));
        RoundState::new(
            Snake::with_body(Cell::new(2, 2), [Cell::new(1, 2)], Direction::Right),
            Snake::new(Cell::new(7, 7), Direction::Right),
            Food::new(Cell::new(5, 5)),
            ObstacleField::from_cells([Cell::new(0, 9), Cell::new(9, 0)]),
            enemy_ai,
        )
    }

    #[test]
    fn test_capture_copies_entities() {
        let view = FrameView::capture(&sample_state(), 10, 10);

        assert_eq!(view.player.len(), 2);
        assert!(view.player[0].is_head);
        assert!(!view.player[1].is_head);
        assert_eq!(view.enemy, vec![Segment { cell: Cell::new(7, 7), is_head: true }]);
        assert_eq!(view.food, Cell::new(5, 5));
        assert_eq!(view.obstacles, vec![Cell::new(0, 9), Cell::new(9, 0)]);
        assert_eq!(view.score, 0);
        assert_eq!(view.status, RoundStatus::Playing);
    }

    #[test]
    fn test_tiles() {
        let view = FrameView::capture(&sample_state(), 10, 10);

        assert_eq!(view.tile_at(Cell::new(2, 2)), Tile::PlayerHead);
        assert_eq!(view.tile_at(Cell::new(1, 2)), Tile::PlayerBody);
        assert_eq!(view.tile_at(Cell::new(7, 7)), Tile::EnemyHead);
        assert_eq!(view.tile_at(Cell::new(8, 8)), Tile::Trail);
        assert_eq!(view.tile_at(Cell::new(5, 5)), Tile::Food);
        assert_eq!(view.tile_at(Cell::new(0, 9)), Tile::Obstacle);
        assert_eq!(view.tile_at(Cell::new(4, 4)), Tile::Empty);
    }

    #[test]
    fn test_player_drawn_over_enemy() {
        let mut state = sample_state();
        state.enemy = Snake::new(Cell::new(2, 2), Direction::Left);

        let view = FrameView::capture(&state, 10, 10);
        assert_eq!(view.tile_at(Cell::new(2, 2)), Tile::PlayerHead);
    }
}
