use std::collections::VecDeque;

use super::heading::Heading;

/// A cell on the game grid.
///
/// Coordinates are signed so a head that has just left the board can still be
/// represented and rejected by the wall check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

    pub fn stepped(&self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake's body, head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Create a straight snake whose tail trails behind `head`, opposite to `heading`
    pub fn new(head: Cell, heading: Heading, length: usize) -> Self {
        let (dx, dy) = heading.opposite().delta();
        let length = i32::try_from(length.max(1)).unwrap_or(i32::MAX);
        let body = (0..length)
            .map(|i| head.moved_by(dx * i, dy * i))
            .collect();
        Self { body }
    }

    /// Build a snake from explicit cells, head first. Returns `None` for an empty list.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Segments from head to tail
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Whether any segment, head and tail included, sits on `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Push a new head; drop the tail unless the snake grows this step
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a snake built through the constructors
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// What the head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake hit one of its own segments
    SelfCollision,
}

/// Why a game stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Collision(CollisionType),
    /// The snake covers every cell; there is nowhere left for food
    BoardFilled,
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Paused,
    GameOver(GameEnd),
}

impl RunState {
    pub fn is_over(self) -> bool {
        matches!(self, RunState::GameOver(_))
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only once the snake covers the whole board
    pub food: Option<Cell>,
    /// Heading applied by the most recent tick
    pub heading: Heading,
    /// Heading the next tick will apply
    pub pending_heading: Heading,
    pub grid_size: usize,
    pub score: u32,
    pub steps: u32,
    pub run_state: RunState,
}

impl GameState {
    /// Create a running game state with both headings set to `heading`
    pub fn new(snake: Snake, food: Option<Cell>, heading: Heading, grid_size: usize) -> Self {
        Self {
            snake,
            food,
            heading,
            pending_heading: heading,
            grid_size,
            score: 0,
            steps: 0,
            run_state: RunState::Running,
        }
    }

    /// Grid size as a coordinate bound. Sizes past `i32::MAX` clamp to it;
    /// validated configurations stay far below.
    pub fn extent(&self) -> i32 {
        i32::try_from(self.grid_size).unwrap_or(i32::MAX)
    }

    /// Check if a cell is within the grid bounds
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        let size = self.extent();
        (0..size).contains(&cell.x) && (0..size).contains(&cell.y)
    }

    /// All on-grid cells not covered by the snake, row by row
    pub fn free_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let size = self.extent();
        (0..size)
            .flat_map(move |y| (0..size).map(move |x| Cell::new(x, y)))
            .filter(|cell| !self.snake.occupies(*cell))
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }
}
