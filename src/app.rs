use std::{
    ops::ControlFlow,
    sync::mpsc::{Receiver, TryRecvError},
};

use console::{Key, Term};
use log::warn;
use rand::Rng;

use crate::{
    config::GameSettings,
    input::{spawn_key_reader, UserInput},
    render::Renderer,
    scheduler::{FixedRate, Scheduler},
    snake::SnakeGame,
};

/// Applies every pending key press to `game`. Returns `Break` on quit or
/// when the key reader has gone away.
pub fn apply_inputs<R: Rng>(game: &mut SnakeGame<R>, keys: &Receiver<Key>) -> ControlFlow<()> {
    loop {
        match keys.try_recv() {
            Ok(key) => match UserInput::from(key) {
                UserInput::Move(dir) => game.set_direction(dir),
                UserInput::Restart if game.state().is_over() => game.restart(),
                UserInput::Quit => return ControlFlow::Break(()),
                UserInput::Restart | UserInput::Unknown => {}
            },
            Err(TryRecvError::Empty) => return ControlFlow::Continue(()),
            Err(TryRecvError::Disconnected) => {
                warn!("input channel closed, leaving game");
                return ControlFlow::Break(());
            }
        }
    }
}

pub fn play(term: Term, settings: GameSettings) -> anyhow::Result<()> {
    let mut renderer = Renderer::new(term.clone(), settings)?;
    let keys = spawn_key_reader(term);
    let mut game = SnakeGame::new(settings);
    renderer.draw(game.state())?;

    FixedRate.on_tick(settings.tick_interval, |dt| {
        game.advance_clock(dt);
        if apply_inputs(&mut game, &keys).is_break() {
            return Ok(ControlFlow::Break(()));
        }
        game.tick();
        renderer.draw(game.state())?;
        Ok(ControlFlow::Continue(()))
    })
}
