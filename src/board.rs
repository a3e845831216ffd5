use std::fmt;

use crate::constants::{BOARDSIZE, DARK_SYMBOL, EMPTY_SYMBOL, LIGHT_SYMBOL, N};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Dark,
    Light,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Dark => Color::Light,
            Color::Light => Color::Dark,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Color::Dark => DARK_SYMBOL,
            Color::Light => LIGHT_SYMBOL,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Dark => write!(f, "Dark ({DARK_SYMBOL})"),
            Color::Light => write!(f, "Light ({LIGHT_SYMBOL})"),
        }
    }
}

/// Contents of a single cell: `None` is empty.
pub type Cell = Option<Color>;

/// An 8x8 Othello grid stored row-major.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; BOARDSIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [None; BOARDSIZE],
        }
    }

    /// The standard opening: Light on the main diagonal of the center
    /// square, Dark on the anti-diagonal.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        let mid = N / 2;
        board.set(mid - 1, mid - 1, Some(Color::Light));
        board.set(mid - 1, mid, Some(Color::Dark));
        board.set(mid, mid - 1, Some(Color::Dark));
        board.set(mid, mid, Some(Color::Light));
        board
    }

    #[inline]
    fn idx(row: usize, col: usize) -> usize {
        row * N + col
    }

    /// Cell contents, or `None` when off the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row >= N || col >= N {
            return None;
        }
        self.cells[Self::idx(row, col)]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[Self::idx(row, col)] = cell;
    }

    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..N {
            for col in 0..N {
                let ch = self.get(row, col).map_or(EMPTY_SYMBOL, Color::symbol);
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let board = Board::initial();
        assert_eq!(board.get(3, 3), Some(Color::Light));
        assert_eq!(board.get(3, 4), Some(Color::Dark));
        assert_eq!(board.get(4, 3), Some(Color::Dark));
        assert_eq!(board.get(4, 4), Some(Color::Light));
        assert_eq!(board.count(Color::Dark), 2);
        assert_eq!(board.count(Color::Light), 2);
        assert_eq!(board.empty_count(), BOARDSIZE - 4);
    }

    #[test]
    fn test_get_off_board() {
        let board = Board::initial();
        assert_eq!(board.get(N, 0), None);
        assert_eq!(board.get(0, N), None);
    }

    #[test]
    fn test_display() {
        let s = Board::initial().to_string();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), N);
        assert_eq!(lines[3], ". . . O X . . . ");
        assert_eq!(lines[4], ". . . X O . . . ");
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Color::Dark.opponent(), Color::Light);
        assert_eq!(Color::Light.opponent(), Color::Dark);
    }
}
