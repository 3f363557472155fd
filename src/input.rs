use std::{
    sync::mpsc::{channel, Receiver},
    thread,
};

use console::{Key, Term};
use log::warn;

use crate::snake::Dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInput {
    Unknown,
    Move(Dir),
    Restart,
    Quit,
}

impl From<Key> for UserInput {
    fn from(value: Key) -> Self {
        match value {
            Key::ArrowUp | Key::Char('w') | Key::Char('W') => Self::Move(Dir::Up),
            Key::ArrowRight | Key::Char('d') | Key::Char('D') => Self::Move(Dir::Right),
            Key::ArrowDown | Key::Char('s') | Key::Char('S') => Self::Move(Dir::Down),
            Key::ArrowLeft | Key::Char('a') | Key::Char('A') => Self::Move(Dir::Left),
            Key::Char('r') | Key::Char('R') => Self::Restart,
            Key::Escape | Key::Char('q') | Key::Char('Q') => Self::Quit,
            _ => Self::Unknown,
        }
    }
}

/// Forwards key presses from `term` on a background thread. The channel
/// disconnects when the terminal stops yielding keys.
pub fn spawn_key_reader(term: Term) -> Receiver<Key> {
    let (tx, rx) = channel();
    thread::spawn(move || loop {
        let key = match term.read_key() {
            Ok(key) => key,
            Err(e) => {
                warn!("key reader stopped: {}", e);
                break;
            }
        };
        if tx.send(key).is_err() {
            break;
        }
    });
    rx
}
