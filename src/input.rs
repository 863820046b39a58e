use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::direction::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Steer(Direction),
    TogglePause,
    Quit,
}

pub fn key_command(key: KeyEvent) -> Option<Command> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }
    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('p') => Command::TogglePause,
        KeyCode::Char('k') | KeyCode::Up => Command::Steer(Direction::Up),
        KeyCode::Char('j') | KeyCode::Down => Command::Steer(Direction::Down),
        KeyCode::Char('h') | KeyCode::Left => Command::Steer(Direction::Left),
        KeyCode::Char('l') | KeyCode::Right => Command::Steer(Direction::Right),
        _ => return None,
    };
    Some(command)
}

/// Maps a pointer offset from the player's centre to a step direction.
/// The horizontal axis wins only when strictly dominant.
pub fn direction_toward(dx: f32, dy: f32) -> Direction {
    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}
