//! Reversi game state, move legality, and capture resolution.
//!
//! A move is legal when, along at least one of the eight ray directions,
//! the placed chip sandwiches one or more opponent chips against one of the
//! mover's own chips. Applying a move flips every sandwiched chip on every
//! such ray independently.

use std::fmt;

use crate::board::{Board, Color, DIRECTIONS, Direction};
use crate::constants::CELLS;

/// A move is a cell index in `0..64`.
pub type Move = usize;

/// Error returned by the checked move entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Cell index outside the board
    OutOfRange(usize),
    /// Cell already holds a chip
    Occupied(Move),
    /// Placement would not capture anything
    NoCapture(Move),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfRange(pos) => write!(f, "cell {pos} is off the board (0-{})", CELLS - 1),
            MoveError::Occupied(pos) => write!(f, "cell {pos} is not empty"),
            MoveError::NoCapture(pos) => write!(f, "cell {pos} does not capture any chips"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Validate that a cell index is on the board.
pub fn check_move(pos: usize) -> Result<Move, MoveError> {
    if pos < CELLS {
        Ok(pos)
    } else {
        Err(MoveError::OutOfRange(pos))
    }
}

/// Final result of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    LightWins,
    DarkWins,
    Tie,
}

impl Outcome {
    /// Decide from final chip counts.
    pub fn from_counts(light: usize, dark: usize) -> Self {
        match light.cmp(&dark) {
            std::cmp::Ordering::Greater => Outcome::LightWins,
            std::cmp::Ordering::Less => Outcome::DarkWins,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::LightWins => Some(Color::Light),
            Outcome::DarkWins => Some(Color::Dark),
            Outcome::Tie => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(color) => write!(f, "{color} has won"),
            None => write!(f, "It's a tie"),
        }
    }
}

/// Board plus side to move.
///
/// Cheap to copy; rollouts always work on their own copy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub to_move: Color,
}

impl GameState {
    /// Standard opening. The first mover's chips sit on 27 and 36.
    pub fn new(first: Color) -> Self {
        let mut board = Board::new();
        board.set(27, Some(first));
        board.set(36, Some(first));
        board.set(28, Some(first.opponent()));
        board.set(35, Some(first.opponent()));
        Self {
            board,
            to_move: first,
        }
    }

    /// Arbitrary position, used for analysis and tests.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        Self { board, to_move }
    }

    /// Number of opponent chips sandwiched along `dir` if `pos` were played,
    /// or `None` if the ray does not capture.
    fn bracket(&self, pos: Move, dir: Direction) -> Option<usize> {
        let me = self.to_move;
        let mut seen = 0;
        for cell in dir.ray(pos) {
            match self.board.get(cell) {
                Some(c) if c == me => return (seen > 0).then_some(seen),
                Some(_) => seen += 1,
                None => return None,
            }
        }
        None
    }

    /// Whether the side to move may play at `pos`.
    pub fn is_legal(&self, pos: Move) -> bool {
        self.board.get(pos).is_none() && DIRECTIONS.iter().any(|&d| self.bracket(pos, d).is_some())
    }

    /// All legal moves for the side to move, ascending. Empty means pass.
    pub fn legal_moves(&self) -> Vec<Move> {
        (0..CELLS).filter(|&pos| self.is_legal(pos)).collect()
    }

    pub fn has_legal_move(&self) -> bool {
        (0..CELLS).any(|pos| self.is_legal(pos))
    }

    /// Place a chip for the side to move and resolve captures.
    ///
    /// Does nothing if `pos` is occupied. Each ray is resolved independently.
    /// Returns the number of chips flipped. The side to move is not changed.
    pub fn apply_move(&mut self, pos: Move) -> usize {
        if self.board.get(pos).is_some() {
            return 0;
        }
        let me = self.to_move;
        self.board.set(pos, Some(me));

        let mut flipped = 0;
        for dir in DIRECTIONS {
            if let Some(n) = self.bracket(pos, dir) {
                for cell in dir.ray(pos).take(n) {
                    self.board.set(cell, Some(me));
                }
                flipped += n;
            }
        }
        flipped
    }

    /// Hand the move to the other side.
    pub fn switch_side(&mut self) {
        self.to_move = self.to_move.opponent();
    }

    /// Checked move: validate range and legality, apply it, and switch side.
    pub fn play(&mut self, pos: usize) -> Result<usize, MoveError> {
        let pos = check_move(pos)?;
        if self.board.get(pos).is_some() {
            return Err(MoveError::Occupied(pos));
        }
        if !self.is_legal(pos) {
            return Err(MoveError::NoCapture(pos));
        }
        let flipped = self.apply_move(pos);
        self.switch_side();
        Ok(flipped)
    }

    /// `(light, dark)` chip counts.
    pub fn score(&self) -> (usize, usize) {
        (self.board.count(Color::Light), self.board.count(Color::Dark))
    }

    /// Decided outcome if the board is full or `forced_end` is set, else `None`.
    ///
    /// Callers set `forced_end` once they know neither side can move.
    pub fn check_terminal(&self, forced_end: bool) -> Option<Outcome> {
        let (light, dark) = self.score();
        if light + dark == CELLS || forced_end {
            Some(Outcome::from_counts(light, dark))
        } else {
            None
        }
    }

    /// Outcome if the game is over: full board, or neither side can move.
    pub fn game_over(&self) -> Option<Outcome> {
        if let Some(outcome) = self.check_terminal(false) {
            return Some(outcome);
        }
        let mut other = *self;
        other.switch_side();
        if !self.has_legal_move() && !other.has_legal_move() {
            return self.check_terminal(true);
        }
        None
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (light, dark) = self.score();
        write!(f, "{}", self.board)?;
        writeln!(f, "Light (O): {light}  Dark (X): {dark}  to move: {}", self.to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_layout() {
        let state = GameState::new(Color::Dark);
        assert_eq!(state.board.get(27), Some(Color::Dark));
        assert_eq!(state.board.get(36), Some(Color::Dark));
        assert_eq!(state.board.get(28), Some(Color::Light));
        assert_eq!(state.board.get(35), Some(Color::Light));
        assert_eq!(state.score(), (2, 2));
        assert_eq!(state.to_move, Color::Dark);
    }

    #[test]
    fn test_opening_moves_either_first_mover() {
        for first in [Color::Light, Color::Dark] {
            let state = GameState::new(first);
            assert_eq!(state.legal_moves(), vec![20, 29, 34, 43]);
        }
    }

    #[test]
    fn test_occupied_cell_is_never_legal() {
        let state = GameState::new(Color::Dark);
        for pos in [27, 28, 35, 36] {
            assert!(!state.is_legal(pos));
        }
    }

    #[test]
    fn test_apply_move_on_occupied_is_noop() {
        let mut state = GameState::new(Color::Dark);
        let before = state;
        assert_eq!(state.apply_move(28), 0);
        assert_eq!(state, before);
    }

    #[test]
    fn test_multi_ray_capture() {
        // Light chips on all four orthogonal neighbors of 27, each backed by Dark.
        let mut board = Board::new();
        for pos in [19, 26, 28, 35] {
            board.set(pos, Some(Color::Light));
        }
        for pos in [11, 25, 29, 43] {
            board.set(pos, Some(Color::Dark));
        }
        let mut state = GameState::from_board(board, Color::Dark);
        assert!(state.is_legal(27));
        let flipped = state.apply_move(27);
        assert_eq!(flipped, 4);
        for pos in [19, 26, 28, 35, 27] {
            assert_eq!(state.board.get(pos), Some(Color::Dark));
        }
        assert_eq!(state.score(), (0, 9));
    }

    #[test]
    fn test_play_rejects_bad_moves() {
        let mut state = GameState::new(Color::Dark);
        assert_eq!(state.play(64), Err(MoveError::OutOfRange(64)));
        assert_eq!(state.play(27), Err(MoveError::Occupied(27)));
        assert_eq!(state.play(0), Err(MoveError::NoCapture(0)));
        assert_eq!(state.play(34), Ok(1));
        assert_eq!(state.to_move, Color::Light);
    }

    #[test]
    fn test_check_terminal() {
        let state = GameState::new(Color::Dark);
        assert_eq!(state.check_terminal(false), None);
        assert_eq!(state.check_terminal(true), Some(Outcome::Tie));
        assert_eq!(state.game_over(), None);
    }

    #[test]
    fn test_outcome_from_counts() {
        assert_eq!(Outcome::from_counts(40, 24), Outcome::LightWins);
        assert_eq!(Outcome::from_counts(10, 54), Outcome::DarkWins);
        assert_eq!(Outcome::from_counts(32, 32), Outcome::Tie);
        assert_eq!(Outcome::Tie.winner(), None);
        assert_eq!(Outcome::DarkWins.to_string(), "Dark has won");
    }
}
