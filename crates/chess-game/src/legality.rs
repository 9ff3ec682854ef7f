//! Legal-move evaluation: movement rules filtered by check safety.

use crate::check::is_king_in_check;
use crate::rules::is_valid_move;
use chess_model::{Board, Piece, Pos};

/// All squares `piece` can legally move to on `board`.
///
/// A square survives if the piece's movement rule accepts it and
/// replaying the move on a cloned board does not leave the mover's own
/// king in check. The live board and piece are never touched during
/// simulation; the clone carries its own copies, so there is no restore
/// path to get wrong.
pub fn legal_moves(board: &Board, piece: &Piece) -> Vec<Pos> {
    Pos::all()
        .filter(|&target| target != piece.pos)
        .filter(|&target| is_valid_move(piece, target, board))
        .filter(|&target| is_check_safe(board, piece, target))
        .collect()
}

/// Membership test against [`legal_moves`].
pub fn is_move_legal(board: &Board, piece: &Piece, target: Pos) -> bool {
    legal_moves(board, piece).contains(&target)
}

/// Replays the candidate on a clone and asks whether the mover's king
/// would stand in check. Capture is implicit: the clone's destination
/// slot is simply overwritten.
fn is_check_safe(board: &Board, piece: &Piece, target: Pos) -> bool {
    let mut sim = board.clone();
    sim.move_piece(piece.pos, target);
    !is_king_in_check(&sim, piece.color)
}
