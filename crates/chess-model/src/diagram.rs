//! Textual board diagrams for fixtures and debug output.
//!
//! A diagram is eight `/`-separated rows listed from row 7 down to
//! row 0. Digits encode runs of empty squares; letters are piece codes,
//! uppercase for White. The initial setup reads:
//!
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`

use crate::{Board, Piece, PieceKind, Pos};
use std::fmt;
use thiserror::Error;

/// Errors produced when parsing a board diagram.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiagramError {
    #[error("expected 8 rows, got {0}")]
    RowCount(usize),

    #[error("row {row} does not describe exactly 8 squares")]
    RowWidth { row: u8 },

    #[error("unknown piece code '{0}'")]
    UnknownCode(char),
}

impl Board {
    /// The initial setup in diagram form.
    pub const START: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// Parses a diagram into a board.
    ///
    /// A parsed piece counts as unmoved only if the initial setup has a
    /// piece of the same kind and color on its square. Fixtures that
    /// need a moved king or rook reach that state by playing moves.
    pub fn from_diagram(diagram: &str) -> Result<Self, DiagramError> {
        let rows: Vec<&str> = diagram.trim().split('/').collect();
        if rows.len() != 8 {
            return Err(DiagramError::RowCount(rows.len()));
        }

        let reference = Board::initial();
        let mut board = Board::empty();
        for (i, text) in rows.iter().enumerate() {
            let row = 7 - i as u8;
            let mut col: u8 = 0;
            for c in text.chars() {
                if let Some(run) = c.to_digit(10) {
                    col = col.saturating_add(run as u8);
                    continue;
                }
                let (kind, color) =
                    PieceKind::from_code(c).ok_or(DiagramError::UnknownCode(c))?;
                let pos = Pos::new(row, col).ok_or(DiagramError::RowWidth { row })?;
                let mut piece = Piece::new(kind, color, pos);
                piece.has_moved = reference
                    .piece_at(pos)
                    .map_or(true, |start| start.kind != kind || start.color != color);
                board.place(pos, piece);
                col += 1;
            }
            if col != 8 {
                return Err(DiagramError::RowWidth { row });
            }
        }
        Ok(board)
    }

    /// Renders the board as a diagram.
    pub fn to_diagram(&self) -> String {
        let mut out = String::new();
        for row in (0..8u8).rev() {
            let mut empty = 0u8;
            for col in 0..8u8 {
                let occupant = Pos::new(row, col).and_then(|pos| self.piece_at(pos));
                match occupant {
                    Some(piece) => {
                        if empty > 0 {
                            out.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        out.push(piece.kind.code(piece.color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push((b'0' + empty) as char);
            }
            if row > 0 {
                out.push('/');
            }
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_diagram())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_diagram())
    }
}
