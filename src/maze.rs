use std::str::FromStr;

use crate::direction::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Wall,
    Open,
}

/// Grid address: `x` is the column, `y` the row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Signed target of one step, which may fall outside the grid.
    pub fn offset(self, dir: Direction) -> (isize, isize) {
        let (dx, dy) = dir.delta();
        (self.x as isize + dx, self.y as isize + dy)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("maze has no rows")]
    Empty,
    #[error("maze rows have no columns")]
    NoColumns,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown cell {ch:?} at column {x}, row {y}")]
    UnknownCell { ch: char, x: usize, y: usize },
}

/// Static rectangular grid. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    grid: Vec<Vec<Cell>>,
}

impl Maze {
    pub fn from_rows(grid: Vec<Vec<Cell>>) -> Result<Self, MazeError> {
        let height = grid.len();
        let width = grid.first().ok_or(MazeError::Empty)?.len();
        if width == 0 {
            return Err(MazeError::NoColumns);
        }
        if let Some((row, cells)) = grid.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(MazeError::Ragged {
                row,
                expected: width,
                found: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            grid,
        })
    }

    pub fn columns(&self) -> usize {
        self.width
    }

    pub fn rows(&self) -> usize {
        self.height
    }

    /// False for any address outside the grid.
    pub fn is_open(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return false;
        }
        self.grid[y][x] == Cell::Open
    }

    pub fn is_open_at(&self, pos: Pos) -> bool {
        self.cell(pos) == Some(Cell::Open)
    }

    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        self.grid.get(pos.y).and_then(|row| row.get(pos.x)).copied()
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.grid.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| **cell == Cell::Open)
                .map(move |(x, _)| Pos { x, y })
        })
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    /// `#` is a wall, `.` is open. One line per row; blank lines are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = Vec::new();
        for line in s.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let y = grid.len();
            let row = line
                .chars()
                .enumerate()
                .map(|(x, ch)| match ch {
                    '#' => Ok(Cell::Wall),
                    '.' => Ok(Cell::Open),
                    _ => Err(MazeError::UnknownCell { ch, x, y }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            grid.push(row);
        }
        Self::from_rows(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "\
#####
#...#
#.#.#
#...#
#####";

    #[test]
    fn parses_fixture_dimensions() {
        let maze: Maze = FIXTURE.parse().unwrap();
        assert_eq!(maze.columns(), 5);
        assert_eq!(maze.rows(), 5);
        assert_eq!(maze.open_cells().count(), 8);
        assert_eq!(maze.cell(Pos::new(2, 2)), Some(Cell::Wall));
        assert_eq!(maze.cell(Pos::new(1, 2)), Some(Cell::Open));
    }

    #[test]
    fn out_of_bounds_is_never_open() {
        let maze: Maze = FIXTURE.parse().unwrap();
        for y in -3..8isize {
            for x in -3..8isize {
                let inside = (0..5).contains(&x) && (0..5).contains(&y);
                if !inside {
                    assert!(!maze.is_open(x, y), "({x}, {y}) reported open");
                }
            }
        }
    }

    #[test]
    fn open_query_matches_cells() {
        let maze: Maze = FIXTURE.parse().unwrap();
        for y in 0..maze.rows() {
            for x in 0..maze.columns() {
                let pos = Pos::new(x, y);
                assert_eq!(
                    maze.is_open(x as isize, y as isize),
                    maze.cell(pos) == Some(Cell::Open)
                );
                assert_eq!(maze.is_open_at(pos), maze.is_open(x as isize, y as isize));
            }
        }
        assert_eq!(maze.cell(Pos::new(5, 0)), None);
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = "###\n#.\n###".parse::<Maze>().unwrap_err();
        assert_eq!(
            err,
            MazeError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn rejects_empty_and_unknown() {
        assert_eq!("".parse::<Maze>().unwrap_err(), MazeError::Empty);
        assert_eq!(Maze::from_rows(vec![vec![]]).unwrap_err(), MazeError::NoColumns);
        assert_eq!(
            "#x#".parse::<Maze>().unwrap_err(),
            MazeError::UnknownCell { ch: 'x', x: 1, y: 0 }
        );
    }
}
