use super::{
    config::GameConfig,
    heading::Heading,
    state::{Cell, CollisionType, GameEnd, GameState, RunState, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IteratorRandom};
use tracing::{debug, info, trace};

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was not running; nothing changed
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the food, grew and scored
    Ate,
    /// The move was rejected and the game ended
    Collided(CollisionType),
    /// The snake grew onto the last free cell; no room is left for food
    BoardFilled,
}

impl TickOutcome {
    pub fn ended_game(&self) -> bool {
        matches!(self, TickOutcome::Collided(_) | TickOutcome::BoardFilled)
    }
}

/// The game engine that owns one game and applies all of its rules.
///
/// The random source is injected so tests can drive food placement from a
/// seeded generator.
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
    state: GameState,
}

impl GameEngine<StdRng> {
    /// Create an engine seeded from system entropy
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Lay out a fresh board without starting it; `tick` stays inert until `reset`
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let mut state = Self::initial_state(&config, &mut rng);
        state.run_state = RunState::NotStarted;
        Self { config, rng, state }
    }

    /// Resume from an arbitrary state, e.g. a hand-built board
    pub fn from_state(config: GameConfig, rng: R, state: GameState) -> Self {
        Self { config, rng, state }
    }

    /// Start a new game
    pub fn reset(&mut self) {
        self.state = Self::initial_state(&self.config, &mut self.rng);
        info!(
            grid_size = self.config.grid_size,
            food = ?self.state.food,
            "game started"
        );
    }

    /// Request a new heading for the next tick.
    ///
    /// Requests are checked against the committed heading, not the pending one,
    /// so several presses between two ticks can never add up to a reversal.
    /// Returns whether the request was kept.
    pub fn set_heading(&mut self, requested: Heading) -> bool {
        if self.state.heading.is_opposite(requested) {
            trace!(?requested, committed = ?self.state.heading, "reversal ignored");
            return false;
        }
        self.state.pending_heading = requested;
        true
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Idle;
        }

        self.state.heading = self.state.pending_heading;
        let new_head = self.state.snake.head().stepped(self.state.heading);

        if let Some(collision) = Self::check_collision(&self.state, new_head) {
            self.state.run_state = RunState::GameOver(GameEnd::Collision(collision));
            info!(?collision, score = self.state.score, "game over");
            return TickOutcome::Collided(collision);
        }

        let ate_food = self.state.food == Some(new_head);
        self.state.snake.advance(new_head, ate_food);
        self.state.steps += 1;

        if !ate_food {
            return TickOutcome::Moved;
        }

        self.state.score += self.config.food_score;
        self.state.food = Self::place_food(&self.state, &mut self.rng);
        debug!(score = self.state.score, food = ?self.state.food, "food eaten");

        if self.state.food.is_none() {
            self.state.run_state = RunState::GameOver(GameEnd::BoardFilled);
            info!(score = self.state.score, "board filled");
            return TickOutcome::BoardFilled;
        }
        TickOutcome::Ate
    }

    /// Switch between running and paused. Other states are left alone.
    pub fn toggle_pause(&mut self) -> RunState {
        self.state.run_state = match self.state.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            other => other,
        };
        info!(run_state = ?self.state.run_state, "pause toggled");
        self.state.run_state
    }

    fn initial_state(config: &GameConfig, rng: &mut R) -> GameState {
        let center = i32::try_from(config.grid_size / 2).unwrap_or(i32::MAX);
        let snake = Snake::new(
            Cell::new(center, center),
            Heading::Right,
            config.initial_snake_length,
        );
        let mut state = GameState::new(snake, None, Heading::Right, config.grid_size);
        state.food = Self::place_food(&state, rng);
        state
    }

    /// Check if moving the head onto `cell` ends the game.
    ///
    /// The whole current body counts, tail included, even though the tail
    /// would move out of the way on a non-growing step.
    fn check_collision(state: &GameState, cell: Cell) -> Option<CollisionType> {
        if !state.is_in_bounds(cell) {
            return Some(CollisionType::Wall);
        }
        if state.snake.occupies(cell) {
            return Some(CollisionType::SelfCollision);
        }
        None
    }

    /// Pick a free cell uniformly at random, or `None` if the snake covers the board
    fn place_food(state: &GameState, rng: &mut R) -> Option<Cell> {
        state.free_cells().choose(rng)
    }
}

impl<R> GameEngine<R> {
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::MAX_GRID_SIZE;
    use std::collections::HashSet;

    fn cells(engine: &GameEngine) -> Vec<Cell> {
        engine.state().snake.cells().collect()
    }

    fn started(config: GameConfig, seed: u64) -> GameEngine {
        let mut engine = GameEngine::seeded(config, seed);
        engine.reset();
        engine
    }

    fn engine_with(snake: Vec<Cell>, heading: Heading, food: Cell, grid_size: usize) -> GameEngine {
        let snake = Snake::from_cells(snake).unwrap();
        let state = GameState::new(snake, Some(food), heading, grid_size);
        GameEngine::from_state(
            GameConfig::new(grid_size),
            StdRng::seed_from_u64(7),
            state,
        )
    }

    #[test]
    fn test_new_engine_waits_for_start() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 1);
        assert_eq!(engine.run_state(), RunState::NotStarted);

        let before = engine.state().clone();
        assert_eq!(engine.tick(), TickOutcome::Idle);
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_reset() {
        let engine = started(GameConfig::default(), 1);
        let state = engine.state();

        assert_eq!(state.run_state, RunState::Running);
        assert_eq!(
            cells(&engine),
            vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]
        );
        assert_eq!(state.heading, Heading::Right);
        assert_eq!(state.pending_heading, Heading::Right);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);

        let food = state.food.unwrap();
        assert!(state.is_in_bounds(food));
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut engine = engine_with(
            vec![Cell::new(0, 5), Cell::new(1, 5)],
            Heading::Left,
            Cell::new(9, 9),
            10,
        );
        engine.state.score = 30;
        assert!(engine.tick().ended_game());

        engine.reset();
        assert_eq!(engine.run_state(), RunState::Running);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.state().snake.len(), 3);
    }

    #[test]
    fn test_reset_on_largest_board() {
        let config = GameConfig::new(MAX_GRID_SIZE);
        assert!(config.validate().is_ok());
        let engine = started(config, 1);
        let state = engine.state();

        let center = i32::try_from(MAX_GRID_SIZE / 2).unwrap();
        assert_eq!(state.snake.head(), Cell::new(center, center));
        assert!(state.snake.cells().all(|cell| state.is_in_bounds(cell)));
        assert!(state.is_in_bounds(state.food.unwrap()));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = started(GameConfig::default(), 1);
        engine.state.food = Some(Cell::new(0, 0));

        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(
            cells(&engine),
            vec![Cell::new(11, 10), Cell::new(10, 10), Cell::new(9, 10)]
        );
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.state().steps, 1);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = started(GameConfig::default(), 1);
        engine.state.food = Some(Cell::new(11, 10));

        assert_eq!(engine.tick(), TickOutcome::Ate);

        let state = engine.state();
        assert_eq!(state.snake.head(), Cell::new(11, 10));
        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), 4);
        let food = state.food.unwrap();
        assert!(!state.snake.occupies(food));
        assert!(state.is_in_bounds(food));
    }

    #[test]
    fn test_food_score_is_configurable() {
        let config = GameConfig {
            food_score: 3,
            ..Default::default()
        };
        let mut engine = started(config, 1);
        engine.state.food = Some(Cell::new(11, 10));
        engine.tick();
        assert_eq!(engine.score(), 3);
    }

    #[test]
    fn test_wall_collision_running_right() {
        let mut engine = started(GameConfig::default(), 1);
        engine.state.food = Some(Cell::new(0, 0));

        for _ in 0..9 {
            assert_eq!(engine.tick(), TickOutcome::Moved);
        }
        assert_eq!(engine.state().snake.head(), Cell::new(19, 10));

        let before = engine.state().clone();
        assert_eq!(engine.tick(), TickOutcome::Collided(CollisionType::Wall));
        assert_eq!(
            engine.run_state(),
            RunState::GameOver(GameEnd::Collision(CollisionType::Wall))
        );
        assert_eq!(engine.state().snake, before.snake);
        assert_eq!(engine.state().food, before.food);
    }

    #[test]
    fn test_wall_collision_leaving_left_edge() {
        let mut engine = engine_with(
            vec![Cell::new(0, 5), Cell::new(1, 5), Cell::new(2, 5)],
            Heading::Left,
            Cell::new(5, 5),
            10,
        );

        assert_eq!(engine.tick(), TickOutcome::Collided(CollisionType::Wall));
        assert_eq!(engine.state().snake.head(), Cell::new(0, 5));
        assert_eq!(engine.state().snake.len(), 3);
    }

    #[test]
    fn test_self_collision() {
        // Head at (5,5) came from (6,5); turning down runs into (5,6)
        let mut engine = engine_with(
            vec![
                Cell::new(5, 5),
                Cell::new(6, 5),
                Cell::new(6, 6),
                Cell::new(5, 6),
                Cell::new(4, 6),
            ],
            Heading::Left,
            Cell::new(8, 8),
            10,
        );
        engine.state.score = 20;

        assert!(engine.set_heading(Heading::Down));
        assert_eq!(
            engine.tick(),
            TickOutcome::Collided(CollisionType::SelfCollision)
        );
        assert_eq!(
            engine.run_state(),
            RunState::GameOver(GameEnd::Collision(CollisionType::SelfCollision))
        );
        assert_eq!(engine.score(), 20);
        assert_eq!(engine.state().snake.len(), 5);
    }

    #[test]
    fn test_moving_into_tail_collides() {
        let mut engine = engine_with(
            vec![
                Cell::new(5, 5),
                Cell::new(6, 5),
                Cell::new(6, 6),
                Cell::new(5, 6),
            ],
            Heading::Left,
            Cell::new(8, 8),
            10,
        );

        engine.set_heading(Heading::Down);
        assert_eq!(
            engine.tick(),
            TickOutcome::Collided(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_no_ticks_after_game_over() {
        let mut engine = engine_with(
            vec![Cell::new(0, 5), Cell::new(1, 5)],
            Heading::Left,
            Cell::new(5, 5),
            10,
        );
        engine.tick();
        let frozen = engine.state().clone();

        for _ in 0..5 {
            assert_eq!(engine.tick(), TickOutcome::Idle);
        }
        assert_eq!(engine.state(), &frozen);
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut engine = started(GameConfig::default(), 1);
        engine.state.food = Some(Cell::new(0, 0));

        assert!(!engine.set_heading(Heading::Left));
        engine.tick();

        assert_eq!(engine.state().heading, Heading::Right);
        assert_eq!(engine.state().snake.head(), Cell::new(11, 10));
    }

    #[test]
    fn test_quick_turns_cannot_chain_into_reversal() {
        let mut engine = started(GameConfig::default(), 1);
        engine.state.food = Some(Cell::new(0, 0));

        assert!(engine.set_heading(Heading::Up));
        assert!(!engine.set_heading(Heading::Left));
        engine.tick();

        assert_eq!(engine.state().heading, Heading::Up);
        assert_eq!(engine.state().snake.head(), Cell::new(10, 9));
    }

    #[test]
    fn test_last_valid_request_wins() {
        let mut engine = started(GameConfig::default(), 1);
        engine.state.food = Some(Cell::new(0, 0));

        engine.set_heading(Heading::Up);
        engine.set_heading(Heading::Left);
        engine.set_heading(Heading::Right);
        engine.tick();

        assert_eq!(engine.state().heading, Heading::Right);
        assert_eq!(engine.state().snake.head(), Cell::new(11, 10));
    }

    #[test]
    fn test_heading_requests_while_paused() {
        let mut engine = started(GameConfig::default(), 1);
        engine.state.food = Some(Cell::new(0, 0));

        assert_eq!(engine.toggle_pause(), RunState::Paused);
        engine.set_heading(Heading::Down);
        assert_eq!(engine.tick(), TickOutcome::Idle);
        assert_eq!(engine.state().snake.head(), Cell::new(10, 10));

        assert_eq!(engine.toggle_pause(), RunState::Running);
        engine.tick();
        assert_eq!(engine.state().snake.head(), Cell::new(10, 11));
    }

    #[test]
    fn test_pause_only_toggles_live_games() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 1);
        assert_eq!(engine.toggle_pause(), RunState::NotStarted);

        let mut engine = engine_with(
            vec![Cell::new(0, 0)],
            Heading::Up,
            Cell::new(1, 1),
            4,
        );
        engine.tick();
        assert!(engine.toggle_pause().is_over());
    }

    #[test]
    fn test_board_filled_ends_game() {
        // 2x2 board with one free cell, which holds the food
        let mut engine = engine_with(
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)],
            Heading::Left,
            Cell::new(0, 1),
            2,
        );

        engine.set_heading(Heading::Down);
        assert_eq!(engine.tick(), TickOutcome::BoardFilled);
        assert_eq!(engine.state().food, None);
        assert_eq!(engine.state().snake.len(), 4);
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.run_state(), RunState::GameOver(GameEnd::BoardFilled));
    }

    #[test]
    fn test_food_lands_on_last_free_cell() {
        // 3x3 board: after eating at (1,0) only (0,0) is left
        let mut body = vec![Cell::new(2, 0)];
        body.extend((0..3).flat_map(|x| [Cell::new(x, 1), Cell::new(x, 2)]));
        let mut engine = engine_with(body, Heading::Left, Cell::new(1, 0), 3);

        assert_eq!(engine.tick(), TickOutcome::Ate);
        assert_eq!(engine.state().food, Some(Cell::new(0, 0)));
    }

    #[test]
    fn test_seeded_engines_agree() {
        let mut a = started(GameConfig::default(), 42);
        let mut b = started(GameConfig::default(), 42);
        assert_eq!(a.state().food, b.state().food);

        a.reset();
        b.reset();
        assert_eq!(a.state().food, b.state().food);
    }

    #[test]
    fn test_invariants_hold_over_random_play() {
        let mut engine = started(GameConfig::small(), 9);
        let mut driver = StdRng::seed_from_u64(99);
        let mut games = 0;

        for _ in 0..5_000 {
            let requested = *Heading::ALL.iter().choose(&mut driver).unwrap();
            engine.set_heading(requested);

            let before = engine.state().clone();
            let outcome = engine.tick();
            let after = engine.state();

            assert!(after.score >= before.score);
            assert!(!before.heading.is_opposite(after.heading));

            match outcome {
                TickOutcome::Moved => assert_eq!(after.snake.len(), before.snake.len()),
                TickOutcome::Ate => {
                    assert_eq!(after.snake.len(), before.snake.len() + 1);
                    assert_eq!(before.food, Some(after.snake.head()));
                }
                TickOutcome::Collided(_) => {
                    assert_eq!(after.snake, before.snake);
                    assert_eq!(after.score, before.score);
                }
                TickOutcome::BoardFilled | TickOutcome::Idle => {}
            }

            if after.is_running() {
                let unique: HashSet<Cell> = after.snake.cells().collect();
                assert_eq!(unique.len(), after.snake.len());
                assert!(after.snake.cells().all(|cell| after.is_in_bounds(cell)));
                assert!(!after.snake.occupies(after.food.unwrap()));
            }

            if outcome.ended_game() {
                games += 1;
                engine.reset();
            }
        }

        assert!(games > 0);
    }
}
