//! Single-player snake on a fixed 40x30 grid. The engine in [`snake`] is
//! driven by a [`scheduler::Scheduler`] and knows nothing about the terminal.

pub mod app;
pub mod config;
pub mod input;
pub mod render;
pub mod scheduler;
pub mod snake;

pub use config::GameSettings;
pub use snake::{Cell, Dir, GameState, OverReason, Snake, SnakeGame, Status};
