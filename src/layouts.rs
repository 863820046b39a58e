use std::fmt;

use crate::maze::{Maze, MazeError, Pos};

const CLASSIC: &str = "\
############################
############################
#............##............#
#.####.#####.##.#####.####.#
#.####.#####.##.#####.####.#
#.####.#####.##.#####.####.#
#..........................#
#####.###############.######
#####.###############.######
#..........................#
#.####.##############.####.#
#.####.##############.####.#
#..........................#
############.###############
############.###############
#..........................#
#.####.##############.####.#
#.####.##############.####.#
#..........................#
############################
############################
############################";

const SMALL: &str = "\
#####
#...#
#.#.#
#...#
#####";

/// Built-in boards with their start cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, clap::ValueEnum)]
pub enum Layout {
    #[default]
    Classic,
    Small,
}

impl Layout {
    pub fn maze(self) -> Result<Maze, MazeError> {
        match self {
            Layout::Classic => CLASSIC.parse(),
            Layout::Small => SMALL.parse(),
        }
    }

    pub fn player_start(self) -> Pos {
        match self {
            Layout::Classic => Pos::new(14, 15),
            Layout::Small => Pos::new(1, 1),
        }
    }

    pub fn wanderer_start(self) -> Pos {
        match self {
            Layout::Classic => Pos::new(14, 9),
            Layout::Small => Pos::new(3, 3),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Classic => f.write_str("classic"),
            Layout::Small => f.write_str("small"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_layouts_parse_with_open_starts() {
        for layout in [Layout::Classic, Layout::Small] {
            let maze = layout.maze().unwrap();
            assert!(maze.is_open_at(layout.player_start()), "{layout} player");
            assert!(maze.is_open_at(layout.wanderer_start()), "{layout} wanderer");
        }
    }

    #[test]
    fn classic_is_28_by_22() {
        let maze = Layout::Classic.maze().unwrap();
        assert_eq!(maze.columns(), 28);
        assert_eq!(maze.rows(), 22);
    }
}
