use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    enemy::EnemyController,
    error::GameError,
    placement::{Food, ObstacleField},
    state::{CollisionType, RoundState, RoundStatus, Snake},
    view::FrameView,
};

/// Something that happened during a tick, for sound and display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The player ate the food
    FoodEaten,
    /// The enemy ate the food
    EnemyAteFood,
    /// The player swallowed a shorter enemy
    EnemyAbsorbed { gained: u32 },
    /// The player died
    RoundOver { final_score: u32 },
}

/// Whether the round goes on after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continuing,
    Ended {
        final_score: u32,
        cause: CollisionType,
    },
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub outcome: TickOutcome,
    /// Events in the order they happened
    pub events: Vec<GameEvent>,
}

impl StepResult {
    pub fn terminated(&self) -> bool {
        matches!(self.outcome, TickOutcome::Ended { .. })
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// An engine whose placements are reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh round: both snakes at their spawns, then food, then obstacles
    pub fn start_round(&mut self) -> Result<RoundState, GameError> {
        self.config.validate()?;

        let player = Snake::new(self.config.player_spawn, Direction::Right);
        let enemy = self.spawn_enemy();

        let mut occupied = player.cells();
        occupied.extend(enemy.cells());
        let food = Food::place_avoiding(&mut self.rng, &self.config, &occupied)?;

        occupied.insert(food.position);
        let mut obstacles = ObstacleField::new();
        obstacles.spawn(&mut self.rng, &self.config, &occupied, self.config.obstacle_count);

        let enemy_ai = EnemyController::new(
            self.config.enemy_move_interval,
            self.config.enemy_trail_capacity,
        );

        info!(
            width = self.config.grid_width,
            height = self.config.grid_height,
            obstacles = obstacles.len(),
            "round started"
        );

        Ok(RoundState::new(player, enemy, food, obstacles, enemy_ai))
    }

    /// Advance the round by one tick
    pub fn step(&mut self, state: &mut RoundState, action: Action) -> StepResult {
        if let RoundStatus::RoundOver { final_score, cause } = state.status {
            return StepResult {
                outcome: TickOutcome::Ended { final_score, cause },
                events: Vec::new(),
            };
        }

        let mut events = Vec::new();

        // Turning back onto the neck is ignored
        if let Action::Move(direction) = action {
            state.player.set_direction(direction);
        }

        state.player.advance();
        state.ticks += 1;

        if state.enemy_ai.tick() {
            let head = state.enemy.head();
            state.enemy.direction =
                EnemyController::chase(head, state.food.position, state.enemy.direction);
            state.enemy_ai.record(head);
            state.enemy.advance();
        }

        if state.player.head() == state.food.position {
            state.player.grow(self.config.food_growth);
            state.score += 1;
            events.push(GameEvent::FoodEaten);
            debug!(score = state.score, at = ?state.food.position, "player ate food");
            if !self.reshuffle(state) {
                return end_round(state, CollisionType::BoardFull, events);
            }
        }

        if state.enemy.head() == state.food.position {
            state.enemy.grow(self.config.food_growth);
            events.push(GameEvent::EnemyAteFood);
            debug!(at = ?state.food.position, "enemy ate food");
            if !self.reshuffle(state) {
                return end_round(state, CollisionType::BoardFull, events);
            }
        }

        if let Some(cause) = self.check_defeat(state) {
            return end_round(state, cause, events);
        }

        let head = state.player.head();
        if state.enemy.contains(head) && state.player.len() > state.enemy.len() {
            let gained = state.enemy.len();
            state.player.grow(gained);
            state.score += gained as u32;
            state.enemy = self.spawn_enemy();
            events.push(GameEvent::EnemyAbsorbed {
                gained: gained as u32,
            });
            debug!(gained, score = state.score, "player absorbed the enemy");
        }

        StepResult {
            outcome: TickOutcome::Continuing,
            events,
        }
    }

    /// Snapshot of the round for drawing
    pub fn frame(&self, state: &RoundState) -> FrameView {
        FrameView::capture(state, self.config.grid_width, self.config.grid_height)
    }

    /// First matching defeat, in priority order
    fn check_defeat(&self, state: &RoundState) -> Option<CollisionType> {
        let head = state.player.head();

        if state.enemy.contains(head) && state.enemy.len() >= state.player.len() {
            return Some(CollisionType::EnemyBody);
        }

        if state.player.collides_with_self() {
            return Some(CollisionType::SelfCollision);
        }

        if state.obstacles.contains(head) {
            return Some(CollisionType::Obstacle);
        }

        if !self.config.in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        None
    }

    /// Move the food, then lay out a new set of obstacles
    ///
    /// Returns false, leaving food and obstacles untouched, when the snakes
    /// cover every cell and there is nowhere left for food.
    fn reshuffle(&mut self, state: &mut RoundState) -> bool {
        let snakes = state.snake_cells();

        let mut occupied = snakes.clone();
        occupied.extend(state.obstacles.cells().iter().copied());
        // The old obstacles are about to move, so food may take their cells
        let food = match Food::place_avoiding(&mut self.rng, &self.config, &occupied)
            .or_else(|_| Food::place_avoiding(&mut self.rng, &self.config, &snakes))
        {
            Ok(food) => food,
            Err(err) => {
                warn!(%err, "no free cell for food");
                return false;
            }
        };

        let mut occupied = snakes;
        occupied.insert(food.position);
        let mut obstacles = ObstacleField::new();
        obstacles.spawn(&mut self.rng, &self.config, &occupied, self.config.obstacle_count);

        state.food = food;
        state.obstacles = obstacles;
        debug!(food = ?state.food.position, "food and obstacles reshuffled");
        true
    }

    fn spawn_enemy(&self) -> Snake {
        Snake::new(self.config.enemy_spawn, Direction::Right)
    }
}

/// Close the round with `cause` and report it
fn end_round(state: &mut RoundState, cause: CollisionType, mut events: Vec<GameEvent>) -> StepResult {
    let final_score = state.score;
    state.status = RoundStatus::RoundOver { final_score, cause };
    events.push(GameEvent::RoundOver { final_score });
    info!(final_score, ?cause, ticks = state.ticks, "round over");

    StepResult {
        outcome: TickOutcome::Ended { final_score, cause },
        events,
    }
}
