//! The 8x8 board container.

use crate::{Color, Piece, PieceKind, Pos};

/// Mailbox board: one optional piece per square.
///
/// The board is purely structural and enforces no chess rules. Callers
/// uphold the invariants that matter to the game: at most one piece per
/// square (guaranteed by the slot representation) and exactly one king
/// per color after setup.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard starting setup: White on rows 0-1, Black on rows 6-7,
    /// kings on column 4.
    pub fn initial() -> Self {
        use PieceKind::*;
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Board::empty();
        for pos in Pos::all() {
            let slot = match pos.row() {
                0 => Some((back[pos.col() as usize], Color::White)),
                1 => Some((Pawn, Color::White)),
                6 => Some((Pawn, Color::Black)),
                7 => Some((back[pos.col() as usize], Color::Black)),
                _ => None,
            };
            if let Some((kind, color)) = slot {
                board.place(pos, Piece::new(kind, color, pos));
            }
        }
        board
    }

    /// Returns the piece on `pos`, if any.
    #[inline]
    pub fn piece_at(&self, pos: Pos) -> Option<Piece> {
        self.squares[pos.row() as usize][pos.col() as usize]
    }

    /// Puts a piece on `pos`, re-stamping the piece's own `pos` field to
    /// match. Whatever occupied the square is overwritten.
    pub fn place(&mut self, pos: Pos, mut piece: Piece) {
        piece.pos = pos;
        self.squares[pos.row() as usize][pos.col() as usize] = Some(piece);
    }

    /// Empties `pos`, returning the piece that stood there.
    pub fn remove(&mut self, pos: Pos) -> Option<Piece> {
        self.squares[pos.row() as usize][pos.col() as usize].take()
    }

    /// Relocates whatever stands on `from` to `to`, leaving `from`
    /// empty. The destination slot is overwritten, so a capture is
    /// simply the disappearance of its previous occupant, which is
    /// returned. Does nothing if `from` is empty.
    pub fn move_piece(&mut self, from: Pos, to: Pos) -> Option<Piece> {
        match self.remove(from) {
            Some(piece) => {
                let displaced = self.piece_at(to);
                self.place(to, piece);
                displaced
            }
            None => None,
        }
    }

    /// Iterates all pieces on the board.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().filter_map(|slot| *slot)
    }

    /// Iterates all pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |piece| piece.color == color)
    }

    /// Finds the king of the given color. Absent only on malformed
    /// boards; callers that care degrade gracefully.
    pub fn find_king(&self, color: Color) -> Option<Piece> {
        self.pieces_of(color)
            .find(|piece| piece.kind == PieceKind::King)
    }
}
