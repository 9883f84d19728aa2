use std::fmt;

use crate::constants::{CELLS, N};

/// Chip color. Dark is shown as `X`, Light as `O`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    fn symbol(self) -> char {
        match self {
            Color::Light => 'O',
            Color::Dark => 'X',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Light => write!(f, "Light"),
            Color::Dark => write!(f, "Dark"),
        }
    }
}

/// A cell is either empty (`None`) or holds a chip.
pub type Cell = Option<Color>;

/// The 64-cell grid, row-major.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self { cells: [None; CELLS] }
    }

    /// Build a board from a row-major cell array.
    pub fn from_cells(cells: [Cell; CELLS]) -> Self {
        Self { cells }
    }

    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    pub fn set(&mut self, pos: usize, cell: Cell) {
        self.cells[pos] = cell;
    }

    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Number of chips of the given color.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(N) {
            for cell in row {
                let ch = cell.map_or('.', Color::symbol);
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// =============================================================================
// Ray Directions
// =============================================================================

/// One of the eight ray directions.
///
/// `can_step` answers whether a step from the given cell stays on the board
/// without wrapping around a row edge.
#[derive(Copy, Clone, Debug)]
pub struct Direction {
    pub name: &'static str,
    pub delta: isize,
    can_step: fn(usize) -> bool,
}

impl Direction {
    /// The neighbor of `pos` in this direction, if it is on the board.
    #[inline]
    pub fn step(&self, pos: usize) -> Option<usize> {
        if (self.can_step)(pos) {
            Some(pos.wrapping_add_signed(self.delta))
        } else {
            None
        }
    }

    /// Cells visited when walking from `from` (exclusive) to the board edge.
    pub fn ray(self, from: usize) -> impl Iterator<Item = usize> {
        std::iter::successors(self.step(from), move |&pos| self.step(pos))
    }
}

fn not_top(pos: usize) -> bool {
    pos >= N
}

fn not_bottom(pos: usize) -> bool {
    pos + N < CELLS
}

fn not_left(pos: usize) -> bool {
    pos % N != 0
}

fn not_right(pos: usize) -> bool {
    (pos + 1) % N != 0
}

fn not_top_right(pos: usize) -> bool {
    not_top(pos) && not_right(pos)
}

fn not_top_left(pos: usize) -> bool {
    not_top(pos) && not_left(pos)
}

fn not_bottom_right(pos: usize) -> bool {
    not_bottom(pos) && not_right(pos)
}

fn not_bottom_left(pos: usize) -> bool {
    not_bottom(pos) && not_left(pos)
}

/// Order: North, South, East, West, NE, NW, SE, SW
pub const DIRECTIONS: [Direction; 8] = [
    Direction {
        name: "N",
        delta: -(N as isize),
        can_step: not_top,
    },
    Direction {
        name: "S",
        delta: N as isize,
        can_step: not_bottom,
    },
    Direction {
        name: "E",
        delta: 1,
        can_step: not_right,
    },
    Direction {
        name: "W",
        delta: -1,
        can_step: not_left,
    },
    Direction {
        name: "NE",
        delta: -(N as isize) + 1,
        can_step: not_top_right,
    },
    Direction {
        name: "NW",
        delta: -(N as isize) - 1,
        can_step: not_top_left,
    },
    Direction {
        name: "SE",
        delta: N as isize + 1,
        can_step: not_bottom_right,
    },
    Direction {
        name: "SW",
        delta: N as isize - 1,
        can_step: not_bottom_left,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn direction(name: &str) -> Direction {
        *DIRECTIONS.iter().find(|d| d.name == name).unwrap()
    }

    #[test]
    fn test_rays_from_corner() {
        let east: Vec<_> = direction("E").ray(0).collect();
        assert_eq!(east, vec![1, 2, 3, 4, 5, 6, 7]);

        let south: Vec<_> = direction("S").ray(0).collect();
        assert_eq!(south, vec![8, 16, 24, 32, 40, 48, 56]);

        let se: Vec<_> = direction("SE").ray(0).collect();
        assert_eq!(se, vec![9, 18, 27, 36, 45, 54, 63]);

        assert_eq!(direction("N").ray(0).count(), 0);
        assert_eq!(direction("W").ray(0).count(), 0);
        assert_eq!(direction("NW").ray(0).count(), 0);
        assert_eq!(direction("NE").ray(0).count(), 0);
        assert_eq!(direction("SW").ray(0).count(), 0);
    }

    #[test]
    fn test_rays_do_not_wrap_rows() {
        // 7 is the last cell of the first row; stepping east must not reach 8.
        assert_eq!(direction("E").ray(7).count(), 0);
        assert_eq!(direction("W").ray(8).count(), 0);

        let sw: Vec<_> = direction("SW").ray(7).collect();
        assert_eq!(sw, vec![14, 21, 28, 35, 42, 49, 56]);

        let ne: Vec<_> = direction("NE").ray(56).collect();
        assert_eq!(ne, vec![49, 42, 35, 28, 21, 14, 7]);

        assert_eq!(direction("SE").ray(15).count(), 0);
        assert_eq!(direction("NW").ray(16).count(), 0);
    }

    #[test]
    fn test_every_ray_stays_on_board() {
        for dir in DIRECTIONS {
            for pos in 0..CELLS {
                let mut prev = pos;
                for next in dir.ray(pos) {
                    assert!(next < CELLS);
                    let (pr, pc) = ((prev / N) as isize, (prev % N) as isize);
                    let (nr, nc) = ((next / N) as isize, (next % N) as isize);
                    assert!((nr - pr).abs() <= 1 && (nc - pc).abs() <= 1, "{} from {pos}", dir.name);
                    prev = next;
                }
            }
        }
    }

    #[test]
    fn test_board_counts_and_display() {
        let mut board = Board::new();
        assert_eq!(board.empty_count(), CELLS);
        board.set(0, Some(Color::Dark));
        board.set(63, Some(Color::Light));
        assert_eq!(board.count(Color::Dark), 1);
        assert_eq!(board.count(Color::Light), 1);
        assert_eq!(board.empty_count(), CELLS - 2);
        assert!(!board.is_full());

        let text = board.to_string();
        assert!(text.starts_with("X . "));
        assert!(text.trim_end().ends_with('O'));
        assert_eq!(text.lines().count(), N);
    }
}
