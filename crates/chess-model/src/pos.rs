//! Board coordinates.

use std::fmt;

/// A coordinate on the 8x8 board.
///
/// Both components are guaranteed to lie in 0..=7. The only way to
/// obtain a `Pos` is through the checked constructors, so board indexing
/// never needs bounds checks of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    row: u8,
    col: u8,
}

impl Pos {
    /// Board side length.
    pub const SIZE: u8 = 8;

    /// Creates a position, rejecting anything off the board.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < Self::SIZE && col < Self::SIZE {
            Some(Pos { row, col })
        } else {
            None
        }
    }

    /// Returns the row (0-7).
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0-7).
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Steps by a signed offset, returning `None` if the result would
    /// leave the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..Self::SIZE as i8).contains(&row) && (0..Self::SIZE as i8).contains(&col) {
            Pos::new(row as u8, col as u8)
        } else {
            None
        }
    }

    /// Iterates every square, row-major from (0, 0) to (7, 7).
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..Self::SIZE).flat_map(|row| (0..Self::SIZE).map(move |col| Pos { row, col }))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
