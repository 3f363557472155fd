use console::Term;
use tick_snake::{app::play, GameSettings};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let term = Term::stdout();
    term.clear_screen()?;
    term.hide_cursor()?;
    let result = play(term.clone(), GameSettings::default());
    term.show_cursor()?;
    term.write_line("")?;

    result
}
