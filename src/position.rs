//! Othello position representation and move execution.
//!
//! This module provides the core game logic:
//! - Legal move generation under the flipping rule
//! - Move application (placement plus flips, then side-to-move toggle)
//! - Terminal detection and outcome scoring
//!
//! A `GameState` is only ever mutated through [`GameState::apply_move`] and
//! the caller-side [`GameState::pass_turn`]. Searches explore by copying.

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Color};
use crate::constants::{DARK_SYMBOL, DIRECTIONS, EMPTY_SYMBOL, LIGHT_SYMBOL, N};

/// A (row, column) placement, both 0-indexed from the top-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Parses `"row,col"`, optionally wrapped in parentheses.
impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseError::MoveFormat(s.to_string());
        let trimmed = s.trim();
        let inner = match trimmed.strip_prefix('(') {
            Some(rest) => rest.strip_suffix(')').ok_or_else(bad)?,
            None => trimmed,
        };
        let (row, col) = inner.split_once(',').ok_or_else(bad)?;
        let row = row.trim().parse::<usize>().map_err(|_| bad())?;
        let col = col.trim().parse::<usize>().map_err(|_| bad())?;
        Ok(Move { row, col })
    }
}

/// Reason a move was rejected. The position is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Coordinates fall outside the 8x8 board
    OutOfBounds,
    /// Cell already holds a piece
    Occupied,
    /// Placement would not flip any opposing piece
    NoFlips,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfBounds => write!(f, "Illegal move: off the board"),
            MoveError::Occupied => write!(f, "Illegal move: cell not empty"),
            MoveError::NoFlips => write!(f, "Illegal move: flips nothing"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Failure to read a move or a board diagram from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    MoveFormat(String),
    RowCount(usize),
    RowLength { row: usize, len: usize },
    Symbol { row: usize, col: usize, ch: char },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MoveFormat(s) => write!(f, "expected `row,col`, got {s:?}"),
            ParseError::RowCount(n) => write!(f, "expected {N} rows, got {n}"),
            ParseError::RowLength { row, len } => {
                write!(f, "row {row}: expected {N} cells, got {len}")
            }
            ParseError::Symbol { row, col, ch } => {
                write!(f, "row {row} col {col}: unknown symbol {ch:?}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Result of a game as reported by [`GameState::outcome`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    DarkWins,
    LightWins,
    Draw,
    /// The side to move still has legal moves
    Undetermined,
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::DarkWins => Some(Color::Dark),
            Outcome::LightWins => Some(Color::Light),
            Outcome::Draw | Outcome::Undetermined => None,
        }
    }

    /// +1 for a Dark win, -1 for a Light win, 0 otherwise.
    pub fn signed(self) -> i32 {
        match self {
            Outcome::DarkWins => 1,
            Outcome::LightWins => -1,
            Outcome::Draw | Outcome::Undetermined => 0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::DarkWins => write!(f, "Dark wins"),
            Outcome::LightWins => write!(f, "Light wins"),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::Undetermined => write!(f, "Undetermined"),
        }
    }
}

/// An Othello position: the grid plus the side to move.
///
/// Two states are equal iff their grids and side to move are identical.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    to_move: Color,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// The standard start position with Dark to move.
    pub fn new() -> Self {
        Self {
            board: Board::initial(),
            to_move: Color::Dark,
        }
    }

    /// Build a position from an 8-line diagram of `X` (Dark), `O` (Light)
    /// and `.` (empty). Whitespace inside a row is ignored.
    pub fn from_diagram(rows: &[&str], to_move: Color) -> Result<Self, ParseError> {
        if rows.len() != N {
            return Err(ParseError::RowCount(rows.len()));
        }
        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != N {
                return Err(ParseError::RowLength {
                    row,
                    len: cells.len(),
                });
            }
            for (col, &ch) in cells.iter().enumerate() {
                let cell = match ch {
                    DARK_SYMBOL => Some(Color::Dark),
                    LIGHT_SYMBOL => Some(Color::Light),
                    EMPTY_SYMBOL => None,
                    _ => return Err(ParseError::Symbol { row, col, ch }),
                };
                board.set(row, col, cell);
            }
        }
        Ok(Self { board, to_move })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Legal moves for the side to move, in row-major scan order.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.legal_moves_for(self.to_move)
    }

    /// Legal moves for `color`, regardless of whose turn it is.
    pub fn legal_moves_for(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..N {
            for col in 0..N {
                if self.board.get(row, col).is_none() && self.would_flip(row, col, color) {
                    moves.push(Move::new(row, col));
                }
            }
        }
        moves
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        (0..N).any(|row| {
            (0..N).any(|col| self.board.get(row, col).is_none() && self.would_flip(row, col, color))
        })
    }

    /// Place a piece for the side to move, flip every captured run and
    /// hand the turn to the opponent.
    ///
    /// # Errors
    /// - `OutOfBounds` - coordinates are off the board
    /// - `Occupied` - the cell is not empty
    /// - `NoFlips` - no direction captures anything
    pub fn apply_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if mv.row >= N || mv.col >= N {
            return Err(MoveError::OutOfBounds);
        }
        if self.board.get(mv.row, mv.col).is_some() {
            return Err(MoveError::Occupied);
        }

        let me = self.to_move;
        let mut flipped: Vec<(usize, usize)> = Vec::new();
        for &(dr, dc) in &DIRECTIONS {
            flipped.extend(self.captured_run(mv.row, mv.col, dr, dc, me));
        }
        if flipped.is_empty() {
            return Err(MoveError::NoFlips);
        }

        self.board.set(mv.row, mv.col, Some(me));
        for (r, c) in flipped {
            self.board.set(r, c, Some(me));
        }
        self.to_move = me.opponent();
        Ok(())
    }

    /// Hand the turn to the opponent without placing a piece.
    ///
    /// Only meaningful when the side to move has no legal moves; callers are
    /// responsible for checking that first.
    pub fn pass_turn(&mut self) {
        self.to_move = self.to_move.opponent();
    }

    /// True iff neither side has a legal move.
    pub fn is_terminal(&self) -> bool {
        !self.has_legal_move(self.to_move) && !self.has_legal_move(self.to_move.opponent())
    }

    /// Piece-count result once the side to move is out of moves.
    ///
    /// Reports `Undetermined` whenever the side to move still has a legal
    /// move. When only the side to move is stuck (a forced pass, not the end
    /// of the game) the counts are compared anyway.
    pub fn outcome(&self) -> Outcome {
        if self.has_legal_move(self.to_move) {
            return Outcome::Undetermined;
        }
        let dark = self.board.count(Color::Dark);
        let light = self.board.count(Color::Light);
        match dark.cmp(&light) {
            std::cmp::Ordering::Greater => Outcome::DarkWins,
            std::cmp::Ordering::Less => Outcome::LightWins,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn count(&self, color: Color) -> usize {
        self.board.count(color)
    }

    fn would_flip(&self, row: usize, col: usize, color: Color) -> bool {
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| !self.captured_run(row, col, dr, dc, color).is_empty())
    }

    /// Opponent pieces captured in one direction by `color` playing at
    /// (row, col): a non-empty opposing run closed by a `color` piece.
    /// Empty if the run hits an empty cell or the edge first.
    fn captured_run(
        &self,
        row: usize,
        col: usize,
        dr: isize,
        dc: isize,
        color: Color,
    ) -> Vec<(usize, usize)> {
        let opp = color.opponent();
        let mut run = Vec::new();
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;

        while in_bounds(r, c) {
            match self.board.get(r as usize, c as usize) {
                Some(p) if p == opp => run.push((r as usize, c as usize)),
                Some(_) => return run,
                None => break,
            }
            r += dr;
            c += dc;
        }
        run.clear();
        run
    }
}

#[inline]
fn in_bounds(r: isize, c: isize) -> bool {
    (0..N as isize).contains(&r) && (0..N as isize).contains(&c)
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{DARK_SYMBOL}: {}  {LIGHT_SYMBOL}: {}  to move: {}",
            self.count(Color::Dark),
            self.count(Color::Light),
            self.to_move
        )?;
        write!(f, "{}", self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_ROW: &str = "........";

    fn diagram(top: &str, bottom: &str, to_move: Color) -> GameState {
        let mut rows = [EMPTY_ROW; N];
        rows[0] = top;
        rows[N - 1] = bottom;
        GameState::from_diagram(&rows, to_move).unwrap()
    }

    #[test]
    fn test_start_moves() {
        let pos = GameState::new();
        assert_eq!(
            pos.legal_moves(),
            vec![Move::new(2, 3), Move::new(3, 2), Move::new(4, 5), Move::new(5, 4)]
        );
        assert_eq!(pos.to_move(), Color::Dark);
    }

    #[test]
    fn test_play_above_light_piece() {
        let mut pos = GameState::new();
        assert_eq!(pos.apply_move(Move::new(2, 3)), Ok(()));
        assert_eq!(pos.board().get(2, 3), Some(Color::Dark));
        assert_eq!(pos.board().get(3, 3), Some(Color::Dark));
        assert_eq!(pos.count(Color::Dark), 4);
        assert_eq!(pos.count(Color::Light), 1);
        assert_eq!(pos.to_move(), Color::Light);
    }

    #[test]
    fn test_occupied_rejected() {
        let mut pos = GameState::new();
        let before = pos;
        assert_eq!(pos.apply_move(Move::new(3, 3)), Err(MoveError::Occupied));
        assert_eq!(pos, before);
    }

    #[test]
    fn test_no_flip_rejected() {
        let mut pos = GameState::new();
        let before = pos;
        assert_eq!(pos.apply_move(Move::new(0, 0)), Err(MoveError::NoFlips));
        assert_eq!(pos.apply_move(Move::new(2, 2)), Err(MoveError::NoFlips));
        assert_eq!(pos, before);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut pos = GameState::new();
        assert_eq!(pos.apply_move(Move::new(8, 0)), Err(MoveError::OutOfBounds));
    }

    #[test]
    fn test_run_must_be_closed() {
        // Light run reaching the edge, and one stopped by an empty cell
        let pos = diagram("X.OOOOOO", "X.OO.X..", Color::Dark);
        assert!(pos.legal_moves().is_empty());
        assert!(pos.captured_run(0, 1, 0, 1, Color::Dark).is_empty());
        assert!(pos.captured_run(7, 1, 0, 1, Color::Dark).is_empty());
        assert!(pos.captured_run(7, 4, 0, -1, Color::Dark).is_empty());
    }

    #[test]
    fn test_flips_multiple_directions() {
        let rows = [
            "X.X.....",
            ".OO.....",
            "XO......",
            "........",
            "........",
            "........",
            "........",
            "........",
        ];
        let mut pos = GameState::from_diagram(&rows, Color::Dark).unwrap();
        // (2,2) closes runs to the north (1,2)->(0,2), west (2,1)->(2,0)
        // and north-west (1,1)->(0,0)
        pos.apply_move(Move::new(2, 2)).unwrap();
        assert_eq!(pos.count(Color::Light), 0);
        assert_eq!(pos.count(Color::Dark), 7);
    }

    #[test]
    fn test_single_side_stuck_is_not_terminal() {
        // Dark cannot move; Light can take (0,2)
        let pos = diagram("OX......", EMPTY_ROW, Color::Dark);
        assert!(pos.legal_moves().is_empty());
        assert_eq!(pos.legal_moves_for(Color::Light), vec![Move::new(0, 2)]);
        assert!(!pos.is_terminal());
    }

    #[test]
    fn test_outcome_compares_counts_when_side_to_move_is_stuck() {
        let pos = diagram("OX......", EMPTY_ROW, Color::Dark);
        assert_eq!(pos.outcome(), Outcome::Draw);
    }

    #[test]
    fn test_terminal_outcome() {
        let pos = diagram("XX......", "O.......", Color::Light);
        assert!(pos.is_terminal());
        assert_eq!(pos.outcome(), Outcome::DarkWins);

        let pos = diagram("X.......", "OO......", Color::Dark);
        assert!(pos.is_terminal());
        assert_eq!(pos.outcome(), Outcome::LightWins);
    }

    #[test]
    fn test_outcome_undetermined_at_start() {
        assert_eq!(GameState::new().outcome(), Outcome::Undetermined);
    }

    #[test]
    fn test_pass_turn() {
        let mut pos = diagram("OX......", EMPTY_ROW, Color::Dark);
        pos.pass_turn();
        assert_eq!(pos.to_move(), Color::Light);
        assert_eq!(pos.legal_moves(), vec![Move::new(0, 2)]);
    }

    #[test]
    fn test_parse_move() {
        assert_eq!("2,3".parse::<Move>(), Ok(Move::new(2, 3)));
        assert_eq!(" 4 , 5 ".parse::<Move>(), Ok(Move::new(4, 5)));
        assert_eq!("(0, 7)".parse::<Move>(), Ok(Move::new(0, 7)));
        assert!("2;3".parse::<Move>().is_err());
        assert!("a,b".parse::<Move>().is_err());
        assert!("((2,3".parse::<Move>().is_err());
        assert!("(2,3".parse::<Move>().is_err());
        assert!("(2,3))".parse::<Move>().is_err());
        assert!("2,3)".parse::<Move>().is_err());
    }

    #[test]
    fn test_from_diagram_errors() {
        assert_eq!(
            GameState::from_diagram(&[EMPTY_ROW; 3], Color::Dark),
            Err(ParseError::RowCount(3))
        );
        let mut rows = [EMPTY_ROW; N];
        rows[2] = "...";
        assert_eq!(
            GameState::from_diagram(&rows, Color::Dark),
            Err(ParseError::RowLength { row: 2, len: 3 })
        );
        rows[2] = "...Z....";
        assert_eq!(
            GameState::from_diagram(&rows, Color::Dark),
            Err(ParseError::Symbol { row: 2, col: 3, ch: 'Z' })
        );
    }
}
