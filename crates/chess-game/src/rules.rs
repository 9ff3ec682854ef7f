//! Per-kind movement rules.
//!
//! Each rule is a pure predicate over (piece, target, board) expressing
//! one kind's geometric movement and capture pattern. The rules know
//! nothing about check safety; filtering out self-check belongs to the
//! legality evaluator, which keeps each rule independently testable.

use chess_model::{Board, Piece, PieceKind, Pos};

/// Returns true if `piece`'s movement pattern accepts `target`.
///
/// The null move is always rejected. Castling is not part of the king
/// rule; the two-square move is offered and executed by the coordinator.
pub fn is_valid_move(piece: &Piece, target: Pos, board: &Board) -> bool {
    if target == piece.pos {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => pawn_rule(piece, target, board),
        PieceKind::Rook => rook_rule(piece, target, board),
        PieceKind::Knight => knight_rule(piece, target, board),
        PieceKind::Bishop => bishop_rule(piece, target, board),
        PieceKind::Queen => rook_rule(piece, target, board) || bishop_rule(piece, target, board),
        PieceKind::King => king_rule(piece, target, board),
    }
}

fn delta(piece: &Piece, target: Pos) -> (i8, i8) {
    (
        target.row() as i8 - piece.pos.row() as i8,
        target.col() as i8 - piece.pos.col() as i8,
    )
}

/// Destination test shared by every kind: empty or enemy-occupied.
fn empty_or_enemy(piece: &Piece, target: Pos, board: &Board) -> bool {
    match board.piece_at(target) {
        Some(occupant) => occupant.color != piece.color,
        None => true,
    }
}

/// True if every square strictly between `from` and `to` is empty.
/// Assumes the squares share a row, column, or diagonal.
fn path_clear(board: &Board, from: Pos, to: Pos) -> bool {
    let dr = (to.row() as i8 - from.row() as i8).signum();
    let dc = (to.col() as i8 - from.col() as i8).signum();
    let mut cursor = from.offset(dr, dc);
    while let Some(pos) = cursor {
        if pos == to {
            return true;
        }
        if board.piece_at(pos).is_some() {
            return false;
        }
        cursor = pos.offset(dr, dc);
    }
    true
}

fn pawn_rule(piece: &Piece, target: Pos, board: &Board) -> bool {
    let (dr, dc) = delta(piece, target);
    let dir = piece.color.pawn_direction();

    if dc == 0 {
        // Pushes land only on empty squares.
        if board.piece_at(target).is_some() {
            return false;
        }
        if dr == dir {
            return true;
        }
        // Double push from the starting row, intervening square empty.
        if dr == 2 * dir && piece.pos.row() == piece.color.pawn_row() {
            return piece
                .pos
                .offset(dir, 0)
                .map_or(false, |step| board.piece_at(step).is_none());
        }
        return false;
    }

    // Diagonal step captures only.
    dc.abs() == 1
        && dr == dir
        && matches!(board.piece_at(target), Some(occupant) if occupant.color != piece.color)
}

fn rook_rule(piece: &Piece, target: Pos, board: &Board) -> bool {
    let (dr, dc) = delta(piece, target);
    (dr == 0 || dc == 0)
        && path_clear(board, piece.pos, target)
        && empty_or_enemy(piece, target, board)
}

fn knight_rule(piece: &Piece, target: Pos, board: &Board) -> bool {
    let (dr, dc) = delta(piece, target);
    // Jumps: intervening pieces are irrelevant.
    matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1)) && empty_or_enemy(piece, target, board)
}

fn bishop_rule(piece: &Piece, target: Pos, board: &Board) -> bool {
    let (dr, dc) = delta(piece, target);
    dr != 0
        && dr.abs() == dc.abs()
        && path_clear(board, piece.pos, target)
        && empty_or_enemy(piece, target, board)
}

fn king_rule(piece: &Piece, target: Pos, board: &Board) -> bool {
    let (dr, dc) = delta(piece, target);
    dr.abs() <= 1 && dc.abs() <= 1 && empty_or_enemy(piece, target, board)
}
