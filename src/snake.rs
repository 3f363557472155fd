use std::{collections::VecDeque, fmt::Display, ops::Add, time::Duration};

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::GameSettings;

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }

    pub fn is_opposite(&self, other: Dir) -> bool {
        self.opposite() == other
    }

    /// Unit step on the grid; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Right => (1, 0),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let glyph = match self {
            Dir::Up => '^',
            Dir::Right => '>',
            Dir::Down => 'v',
            Dir::Left => '<',
        };
        write!(f, "{}", glyph)
    }
}

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

impl Add<Dir> for Cell {
    type Output = Self;
    fn add(self, rhs: Dir) -> Self::Output {
        let (dx, dy) = rhs.delta();
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Ordered body, head first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// All `len` cells share `at` until the snake has moved away from it.
    fn stacked(at: Cell, len: usize) -> Self {
        Snake {
            body: std::iter::repeat(at).take(len.max(1)).collect(),
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    fn hits_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|seg| *seg == head)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OverReason {
    HitWall,
    HitSelf,
    BoardFull,
}

impl Display for OverReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            OverReason::HitWall => "hit the wall",
            OverReason::HitSelf => "bit its own tail",
            OverReason::BoardFull => "filled the board",
        };
        write!(f, "{}", msg)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Running,
    Over(OverReason),
}

/// Everything one game owns. Rebuilt from scratch on restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    snake: Snake,
    food: Cell,
    heading: Dir,
    direction: Dir,
    elapsed: Duration,
    food_eaten: u32,
    status: Status,
}

impl GameState {
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    /// Direction the next tick will move in.
    pub fn direction(&self) -> Dir {
        self.direction
    }

    /// Direction of the last completed move.
    pub fn heading(&self) -> Dir {
        self.heading
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }

    pub fn food_eaten(&self) -> u32 {
        self.food_eaten
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, Status::Over(_))
    }

    pub fn over_reason(&self) -> Option<OverReason> {
        match self.status {
            Status::Over(reason) => Some(reason),
            Status::Running => None,
        }
    }
}

fn random_cell<R: Rng>(settings: &GameSettings, rng: &mut R) -> Cell {
    Cell::new(rng.gen_range(0..settings.width), rng.gen_range(0..settings.height))
}

pub struct SnakeGame<R = StdRng> {
    settings: GameSettings,
    rng: R,
    state: GameState,
}

impl SnakeGame<StdRng> {
    pub fn new(settings: GameSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }
}

impl<R: Rng> SnakeGame<R> {
    pub fn with_rng(settings: GameSettings, mut rng: R) -> Self {
        let state = Self::fresh_state(&settings, &mut rng);
        SnakeGame {
            settings,
            rng,
            state,
        }
    }

    fn fresh_state(settings: &GameSettings, rng: &mut R) -> GameState {
        let len = settings.effective_start_len();
        info!(
            "new game on {}x{} board, snake length {}",
            settings.width, settings.height, len
        );
        GameState {
            snake: Snake::stacked(settings.center(), len),
            food: random_cell(settings, rng),
            heading: Dir::Right,
            direction: Dir::Right,
            elapsed: Duration::ZERO,
            food_eaten: 0,
            status: Status::Running,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn restart(&mut self) {
        self.state = Self::fresh_state(&self.settings, &mut self.rng);
    }

    /// Last accepted call before a tick wins. The reverse of the pending
    /// direction, or of the last move (the neck), is ignored.
    pub fn set_direction(&mut self, dir: Dir) {
        if self.state.is_over()
            || dir.is_opposite(self.state.direction)
            || dir.is_opposite(self.state.heading)
        {
            return;
        }
        self.state.direction = dir;
    }

    pub fn advance_clock(&mut self, dt: Duration) {
        if !self.state.is_over() {
            self.state.elapsed += dt;
        }
    }

    pub fn tick(&mut self) {
        if self.state.is_over() {
            return;
        }
        let state = &mut self.state;
        state.heading = state.direction;

        let new_head = state.snake.head() + state.heading;
        state.snake.push_head(new_head);

        if new_head == state.food {
            state.food = random_cell(&self.settings, &mut self.rng);
            state.food_eaten += 1;
            debug!(
                "ate food at ({}, {}), length {}, next food at ({}, {})",
                new_head.x,
                new_head.y,
                state.snake.len(),
                state.food.x,
                state.food.y
            );
        } else {
            state.snake.pop_tail();
        }

        let reason = if !self.settings.contains(new_head) {
            Some(OverReason::HitWall)
        } else if state.snake.hits_itself() {
            Some(OverReason::HitSelf)
        } else if state.snake.len() == self.settings.cell_count() {
            Some(OverReason::BoardFull)
        } else {
            None
        };

        if let Some(reason) = reason {
            info!(
                "game over: snake {} after eating {} food",
                reason, state.food_eaten
            );
            state.status = Status::Over(reason);
        }
    }

    /// Replaces the body (head first) and heading. Ignored unless every cell
    /// is on the board.
    #[doc(hidden)]
    pub fn debug_set_snake(&mut self, cells: &[Cell], heading: Dir) {
        if cells.is_empty() || !cells.iter().all(|c| self.settings.contains(*c)) {
            return;
        }
        self.state.snake = Snake {
            body: cells.iter().copied().collect(),
        };
        self.state.heading = heading;
        self.state.direction = heading;
    }

    #[doc(hidden)]
    pub fn debug_set_food(&mut self, cell: Cell) {
        if self.settings.contains(cell) {
            self.state.food = cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposites_pair_up() {
        for dir in [Dir::Up, Dir::Right, Dir::Down, Dir::Left] {
            assert!(dir.is_opposite(dir.opposite()));
            assert!(!dir.is_opposite(dir));
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert!(!Dir::Up.is_opposite(Dir::Left));
    }

    #[test]
    fn cell_plus_dir_moves_one_step() {
        let c = Cell::new(3, 3);
        assert_eq!(c + Dir::Up, Cell::new(3, 2));
        assert_eq!(c + Dir::Right, Cell::new(4, 3));
        assert_eq!(c + Dir::Down, Cell::new(3, 4));
        assert_eq!(c + Dir::Left, Cell::new(2, 3));
    }

    #[test]
    fn stacked_snake_shares_one_cell() {
        let snake = Snake::stacked(Cell::new(1, 1), 4);
        assert_eq!(snake.len(), 4);
        assert!(snake.iter().all(|c| *c == Cell::new(1, 1)));
        assert_eq!(snake.body.back(), Some(&snake.head()));
    }

    #[test]
    fn pop_tail_keeps_head() {
        let mut snake = Snake::stacked(Cell::new(0, 0), 1);
        snake.pop_tail();
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn hits_itself_ignores_head() {
        let snake = Snake {
            body: [Cell::new(1, 1), Cell::new(2, 1), Cell::new(1, 1)]
                .into_iter()
                .collect(),
        };
        assert!(snake.hits_itself());
        let snake = Snake {
            body: [Cell::new(1, 1), Cell::new(2, 1)].into_iter().collect(),
        };
        assert!(!snake.hits_itself());
    }
}
