//! Piece identity.

use crate::{Color, Pos};

/// The six kinds of pieces. The set is closed; rule dispatch matches on
/// it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// All kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Diagram code for this kind with the given color (uppercase White).
    pub const fn code(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a diagram code into a kind and color.
    pub const fn from_code(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'r' => PieceKind::Rook,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A piece on the board.
///
/// `pos` mirrors the square the board holds the piece on; the board
/// mutators keep it in sync. `has_moved` feeds castling eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub pos: Pos,
    pub has_moved: bool,
}

impl Piece {
    /// Creates an unmoved piece.
    pub const fn new(kind: PieceKind, color: Color, pos: Pos) -> Self {
        Piece {
            kind,
            color,
            pos,
            has_moved: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for kind in PieceKind::ALL {
            for color in [Color::White, Color::Black] {
                let code = kind.code(color);
                assert_eq!(PieceKind::from_code(code), Some((kind, color)));
            }
        }
        assert_eq!(PieceKind::from_code('x'), None);
    }

    #[test]
    fn code_case_encodes_color() {
        assert_eq!(PieceKind::Pawn.code(Color::White), 'P');
        assert_eq!(PieceKind::Pawn.code(Color::Black), 'p');
        assert_eq!(PieceKind::Knight.code(Color::Black), 'n');
    }

    #[test]
    fn new_piece_is_unmoved() {
        let pos = Pos::new(0, 4).unwrap();
        let king = Piece::new(PieceKind::King, Color::White, pos);
        assert!(!king.has_moved);
        assert_eq!(king.pos, pos);
    }
}
