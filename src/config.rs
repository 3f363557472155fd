use std::time::Duration;

use crate::snake::Cell;

pub const GRID_WIDTH: i32 = 40;
pub const GRID_HEIGHT: i32 = 30;
pub const START_LEN: usize = 4;
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Terminal columns used to draw one grid cell, so tiles come out roughly square.
pub const TILE_COLS: usize = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GameSettings {
    pub width: i32,
    pub height: i32,
    pub start_len: usize,
    pub tick_interval: Duration,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            start_len: START_LEN,
            tick_interval: TICK_INTERVAL,
        }
    }
}

impl GameSettings {
    pub fn new(width: i32, height: i32, start_len: usize) -> Self {
        GameSettings {
            width: width.max(1),
            height: height.max(1),
            start_len,
            tick_interval: TICK_INTERVAL,
        }
    }

    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    /// Start lengths that could never fit on the board collapse to a single cell.
    pub fn effective_start_len(&self) -> usize {
        if self.start_len == 0 || self.start_len >= self.cell_count() {
            1
        } else {
            self.start_len
        }
    }
}
