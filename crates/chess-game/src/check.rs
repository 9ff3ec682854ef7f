//! Check and checkmate detection.

use crate::legality::legal_moves;
use crate::rules::is_valid_move;
use chess_model::{Board, Color, Pos};

/// True if `color`'s king is attacked on `board`.
///
/// This deliberately asks the raw movement rules rather than the
/// legality evaluator: legality depends on this query, and routing it
/// through the evaluator would recurse forever. A board without the
/// king answers false.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king) => is_square_under_attack(board, king.pos, color),
        None => false,
    }
}

/// True if any piece opposing `defender` has a rule-valid move onto
/// `pos`, irrespective of check safety.
pub fn is_square_under_attack(board: &Board, pos: Pos, defender: Color) -> bool {
    board
        .pieces_of(defender.opponent())
        .any(|attacker| is_valid_move(&attacker, pos, board))
}

/// True if `color` is in check and no piece of `color` has a legal move.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_king_in_check(board, color)
        && board
            .pieces_of(color)
            .all(|piece| legal_moves(board, &piece).is_empty())
}
