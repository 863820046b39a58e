use std::fmt;

use crate::direction::Direction;
use crate::maze::{Maze, MazeError, Pos};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
    Player,
    Wanderer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Player => f.write_str("player"),
            Role::Wanderer => f.write_str("wanderer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid maze: {0}")]
    Maze(#[from] MazeError),
    #[error("{role} cannot start at ({}, {}): cell is not open", .pos.x, .pos.y)]
    BlockedStart { role: Role, pos: Pos },
}

/// Result of a single `step_once`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
    Moved,
    /// Facing a blocked cell; the direction is kept and retried next tick.
    Stalled,
    Idle,
}

/// A grid walker. Its position is always an open cell of the maze it was
/// built against.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Agent {
    role: Role,
    pos: Pos,
    dir: Direction,
}

impl Agent {
    pub fn new(role: Role, start: Pos, maze: &Maze) -> Result<Self, SimulationError> {
        if !maze.is_open_at(start) {
            return Err(SimulationError::BlockedStart { role, pos: start });
        }
        Ok(Self {
            role,
            pos: start,
            dir: Direction::Idle,
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn position(&self) -> Pos {
        self.pos
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn can_step_to(&self, dir: Direction, maze: &Maze) -> bool {
        let (nx, ny) = self.pos.offset(dir);
        maze.is_open(nx, ny)
    }

    /// Only looks one cell ahead. Returns whether the new direction was taken.
    pub fn request_direction(&mut self, dir: Direction, maze: &Maze) -> bool {
        if self.can_step_to(dir, maze) {
            self.dir = dir;
            true
        } else {
            false
        }
    }

    pub fn step_once(&mut self, maze: &Maze) -> Step {
        if self.dir.is_idle() {
            return Step::Idle;
        }
        if !self.can_step_to(self.dir, maze) {
            return Step::Stalled;
        }
        let (nx, ny) = self.pos.offset(self.dir);
        self.pos = Pos::new(nx as usize, ny as usize);
        Step::Moved
    }
}
