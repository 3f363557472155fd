use std::io::Write;

use console::{style, Term};

use crate::{
    config::{GameSettings, TILE_COLS},
    snake::{Cell, GameState},
};

pub struct Renderer {
    term: Term,
    settings: GameSettings,
}

impl Renderer {
    /// Fails if the terminal cannot fit the bordered board plus the status line.
    pub fn new(term: Term, settings: GameSettings) -> anyhow::Result<Self> {
        let (rows, cols) = term.size();
        let (need_rows, need_cols) = Self::required_size(&settings);
        if (rows as usize) < need_rows || (cols as usize) < need_cols {
            anyhow::bail!(
                "terminal is {}x{}, need at least {}x{} to draw a {}x{} board",
                cols,
                rows,
                need_cols,
                need_rows,
                settings.width,
                settings.height
            );
        }
        Ok(Renderer { term, settings })
    }

    /// (rows, cols) for the border, the board and one status line.
    pub fn required_size(settings: &GameSettings) -> (usize, usize) {
        (
            settings.height as usize + 3,
            settings.width as usize * TILE_COLS + 2,
        )
    }

    fn board_cols(&self) -> usize {
        self.settings.width as usize * TILE_COLS
    }

    fn board_rows(&self) -> usize {
        self.settings.height as usize
    }

    fn draw_tile(&mut self, cell: Cell, tile: &str) -> anyhow::Result<()> {
        if !self.settings.contains(cell) {
            return Ok(());
        }
        self.term
            .move_cursor_to(cell.x as usize * TILE_COLS + 1, cell.y as usize + 1)?;
        self.term.write_all(tile.as_bytes())?;
        Ok(())
    }

    fn draw_border(&mut self) -> anyhow::Result<()> {
        let border_block = "█";
        let horizontal = border_block.repeat(self.board_cols() + 2);
        self.term.move_cursor_to(0, 0)?;
        self.term.write_all(horizontal.as_bytes())?;
        self.term.move_cursor_to(0, self.board_rows() + 1)?;
        self.term.write_all(horizontal.as_bytes())?;
        for row in 1..=self.board_rows() {
            self.term.move_cursor_to(0, row)?;
            self.term.write_all(border_block.as_bytes())?;
            self.term.move_cursor_to(self.board_cols() + 1, row)?;
            self.term.write_all(border_block.as_bytes())?;
        }
        Ok(())
    }

    fn draw_centered(&mut self, row: usize, text: &str, styled: String) -> anyhow::Result<()> {
        let col = (self.board_cols() + 2).saturating_sub(text.chars().count()) / 2;
        self.term.move_cursor_to(col, row)?;
        self.term.write_all(styled.as_bytes())?;
        Ok(())
    }

    pub fn draw(&mut self, state: &GameState) -> anyhow::Result<()> {
        self.term.clear_screen()?;
        self.draw_border()?;

        let food = format!("{}", style(" ".repeat(TILE_COLS)).on_red());
        self.draw_tile(state.food(), &food)?;

        let body = format!("{}", style(" ".repeat(TILE_COLS)).on_green());
        for cell in state.snake().iter().skip(1) {
            self.draw_tile(*cell, &body)?;
        }
        let head = format!(
            "{}",
            style(state.heading().to_string().repeat(TILE_COLS))
                .black()
                .on_green()
        );
        self.draw_tile(state.snake().head(), &head)?;

        self.term.move_cursor_to(0, self.board_rows() + 2)?;
        let status = format!(
            "{}  {}",
            style(format!("Time: {}", state.elapsed_secs())).blue(),
            style(format!("Food: {}", state.food_eaten())).blue()
        );
        self.term.write_all(status.as_bytes())?;

        if let Some(reason) = state.over_reason() {
            let mid = self.board_rows() / 2;
            let title = "Game Over";
            self.draw_centered(mid, title, format!("{}", style(title).red().bold()))?;
            let cause = format!("The snake {}", reason);
            self.draw_centered(mid + 1, &cause, cause.clone())?;
            let hint = "Press R to restart, Esc to quit";
            self.draw_centered(mid + 2, hint, hint.to_string())?;
        }

        self.term.flush()?;
        Ok(())
    }
}
