//! The turn coordinator.
//!
//! [`Game`] owns the board and all mutable game state and sequences
//! selection, move application (captures and castling included),
//! promotion suspension, check/checkmate notification, and turn
//! alternation. Presentation drives it through the operations below and
//! drains the event buffer after each call; cosmetic delays around a
//! turn switch are the caller's business, the switch itself is an
//! instantaneous state change.

use crate::check::{is_checkmate, is_king_in_check};
use crate::legality::legal_moves;
use chess_model::{Board, Color, Piece, PieceKind, Pos};
use thiserror::Error;

/// Rejection taxonomy for game operations.
///
/// None of these are fatal: a rejected input leaves no trace on the
/// state and the instance remains usable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates ({row}, {col}) are off the board")]
    OutOfRange { row: u8, col: u8 },

    #[error("square {0} holds no piece of the side to move")]
    InvalidSelection(Pos),

    #[error("{0} is not a legal target for the selected piece")]
    IllegalMove(Pos),

    #[error("a promotion is pending; resolve it first")]
    PromotionPending,

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("a pawn cannot be promoted to a {0}")]
    InvalidPromotion(PieceKind),

    #[error("the game is over")]
    GameOver,
}

/// State-change notifications, buffered on the instance and drained
/// with [`Game::take_events`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece was selected, or the selection was cleared.
    SelectionChanged(Option<Piece>),
    /// A selection was rejected (empty square or wrong color).
    InvalidSelection(Pos),
    /// The chosen piece has no legal move; selection was suppressed.
    NoLegalMoves(Piece),
    /// A move was executed on the board.
    MoveApplied {
        from: Pos,
        to: Pos,
        captured: Option<Piece>,
        castle: bool,
        promotion: bool,
    },
    /// The given color's king is now in check.
    Check(Color),
    /// Terminal: the winner's last move checkmated the opponent.
    Checkmate { winner: Color },
    /// A pawn reached the far rank; the game is suspended until
    /// [`Game::resolve_promotion`] is called.
    PromotionRequired(Piece),
    /// The side to move changed.
    TurnSwitched(Color),
}

/// A single two-player game.
///
/// All state lives on the instance; there are no globals. Operations
/// run synchronously to completion, so embedding the engine in a
/// concurrent host only requires serializing access to the instance.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current_turn: Color,
    selected: Option<Pos>,
    targets: Vec<Pos>,
    promotion_pending: Option<Pos>,
    winner: Option<Color>,
    events: Vec<GameEvent>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game with the standard starting setup, White to move.
    pub fn new() -> Self {
        Self::from_board(Board::initial(), Color::White)
    }

    /// Starts a game from a prepared board.
    pub fn from_board(board: Board, to_move: Color) -> Self {
        Game {
            board,
            current_turn: to_move,
            selected: None,
            targets: Vec::new(),
            promotion_pending: None,
            winner: None,
            events: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the piece on `pos`, if any.
    pub fn piece_at(&self, pos: Pos) -> Option<Piece> {
        self.board.piece_at(pos)
    }

    /// The side to move.
    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    /// The winning side once a checkmate has been delivered.
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// True once the game reached its terminal state.
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// The currently selected piece, if any.
    pub fn selected_piece(&self) -> Option<Piece> {
        self.selected.and_then(|pos| self.board.piece_at(pos))
    }

    /// Legal targets of the current selection.
    pub fn selected_targets(&self) -> &[Pos] {
        &self.targets
    }

    /// The pawn waiting for a promotion choice, if any.
    pub fn promotion_pending(&self) -> Option<Piece> {
        self.promotion_pending
            .and_then(|pos| self.board.piece_at(pos))
    }

    /// True if `color`'s king is in check.
    pub fn is_check(&self, color: Color) -> bool {
        is_king_in_check(&self.board, color)
    }

    /// True if `color` is checkmated.
    pub fn is_checkmate(&self, color: Color) -> bool {
        is_checkmate(&self.board, color)
    }

    /// Legal targets for the piece on `pos`, castling included when the
    /// coordinator would offer it. Empty for an empty square.
    pub fn legal_moves(&self, pos: Pos) -> Vec<Pos> {
        match self.board.piece_at(pos) {
            Some(piece) => self.targets_for(&piece),
            None => Vec::new(),
        }
    }

    /// Drains the buffered events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Rebuilds the game from scratch.
    pub fn reset(&mut self) {
        *self = Game::new();
    }

    /// Selects the piece on (`row`, `col`); see [`Game::select`].
    pub fn select_square(&mut self, row: u8, col: u8) -> Result<(), GameError> {
        let pos = Pos::new(row, col).ok_or(GameError::OutOfRange { row, col })?;
        self.select(pos)
    }

    /// Selects the piece on `pos` for the side to move.
    ///
    /// Selecting the already-selected piece deselects it. A piece with
    /// no legal move is signalled via [`GameEvent::NoLegalMoves`] and
    /// the previous selection, if any, stays in place.
    pub fn select(&mut self, pos: Pos) -> Result<(), GameError> {
        self.ensure_accepting()?;

        let piece = match self.board.piece_at(pos) {
            Some(piece) if piece.color == self.current_turn => piece,
            _ => {
                self.events.push(GameEvent::InvalidSelection(pos));
                return Err(GameError::InvalidSelection(pos));
            }
        };

        if self.selected == Some(pos) {
            self.clear_selection();
            return Ok(());
        }

        let targets = self.targets_for(&piece);
        if targets.is_empty() {
            self.events.push(GameEvent::NoLegalMoves(piece));
            return Ok(());
        }

        self.selected = Some(pos);
        self.targets = targets;
        self.events.push(GameEvent::SelectionChanged(Some(piece)));
        Ok(())
    }

    /// Attempts to move the selected piece to (`row`, `col`).
    pub fn attempt_move(&mut self, row: u8, col: u8) -> Result<(), GameError> {
        let pos = Pos::new(row, col).ok_or(GameError::OutOfRange { row, col })?;
        self.attempt_move_to(pos)
    }

    /// Attempts to move the selected piece to `target`.
    ///
    /// With nothing selected this is a defined no-op. An illegal target
    /// is rejected and the selection stays. On success the capture, any
    /// castling rook relocation, and the mover's relocation happen in
    /// one transaction; the sequence then either suspends for promotion
    /// or runs the check/checkmate/turn-switch tail.
    pub fn attempt_move_to(&mut self, target: Pos) -> Result<(), GameError> {
        self.ensure_accepting()?;

        let from = match self.selected {
            Some(from) => from,
            None => return Ok(()),
        };
        if !self.targets.contains(&target) {
            return Err(GameError::IllegalMove(target));
        }
        let piece = match self.board.piece_at(from) {
            Some(piece) => piece,
            None => {
                self.clear_selection();
                return Ok(());
            }
        };

        let castle = piece.kind == PieceKind::King
            && (target.col() as i8 - from.col() as i8).abs() == 2;
        if castle {
            self.move_castling_rook(from, target);
        }

        let captured = self.board.piece_at(target);
        self.board.remove(from);
        let mut moved = piece;
        moved.has_moved = true;
        self.board.place(target, moved);

        let promotion =
            moved.kind == PieceKind::Pawn && target.row() == moved.color.promotion_row();

        self.events.push(GameEvent::MoveApplied {
            from,
            to: target,
            captured,
            castle,
            promotion,
        });
        self.clear_selection();

        if promotion {
            self.promotion_pending = Some(target);
            if let Some(pawn) = self.board.piece_at(target) {
                self.events.push(GameEvent::PromotionRequired(pawn));
            }
            return Ok(());
        }

        self.finish_turn();
        Ok(())
    }

    /// Resolves a pending promotion by replacing the pawn's kind in
    /// place, then runs the deferred check/checkmate/turn-switch tail.
    pub fn resolve_promotion(&mut self, kind: PieceKind) -> Result<(), GameError> {
        if self.winner.is_some() {
            return Err(GameError::GameOver);
        }
        let pos = self.promotion_pending.ok_or(GameError::NoPromotionPending)?;
        if matches!(kind, PieceKind::Pawn | PieceKind::King) {
            return Err(GameError::InvalidPromotion(kind));
        }

        if let Some(mut piece) = self.board.remove(pos) {
            piece.kind = kind;
            self.board.place(pos, piece);
        }
        self.promotion_pending = None;
        self.finish_turn();
        Ok(())
    }

    /// Guard shared by the mutating entry points: terminal games and
    /// suspended promotions accept no selection or move input.
    fn ensure_accepting(&self) -> Result<(), GameError> {
        if self.winner.is_some() {
            return Err(GameError::GameOver);
        }
        if self.promotion_pending.is_some() {
            return Err(GameError::PromotionPending);
        }
        Ok(())
    }

    fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.targets.clear();
            self.events.push(GameEvent::SelectionChanged(None));
        }
    }

    /// Post-move tail shared by normal moves and resolved promotions:
    /// check notification, checkmate termination, turn alternation.
    fn finish_turn(&mut self) {
        let mover = self.current_turn;
        let opponent = mover.opponent();
        if is_king_in_check(&self.board, opponent) {
            self.events.push(GameEvent::Check(opponent));
            if is_checkmate(&self.board, opponent) {
                self.winner = Some(mover);
                self.events.push(GameEvent::Checkmate { winner: mover });
                return;
            }
        }
        self.current_turn = opponent;
        self.events.push(GameEvent::TurnSwitched(opponent));
    }

    /// The evaluator's legal set, extended with any castling squares
    /// the coordinator is willing to execute.
    fn targets_for(&self, piece: &Piece) -> Vec<Pos> {
        let mut targets = legal_moves(&self.board, piece);
        if piece.kind == PieceKind::King {
            for target in self.castle_targets(piece) {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
        targets
    }

    /// Two-square king destinations whose castling preconditions hold:
    /// king and corner rook both unmoved, squares between them empty.
    /// Whether the king crosses or lands on an attacked square is not
    /// checked (see `is_square_under_attack` for the missing piece).
    fn castle_targets(&self, king: &Piece) -> Vec<Pos> {
        let mut out = Vec::new();
        let row = king.pos.row();
        if king.has_moved || row != king.color.back_rank() {
            return out;
        }
        for (corner_col, king_to_col) in [(7u8, 6u8), (0u8, 2u8)] {
            let rook = Pos::new(row, corner_col).and_then(|pos| self.board.piece_at(pos));
            let eligible = matches!(
                rook,
                Some(rook)
                    if rook.kind == PieceKind::Rook
                        && rook.color == king.color
                        && !rook.has_moved
            );
            if !eligible {
                continue;
            }
            let between: &[u8] = if corner_col == 7 { &[5, 6] } else { &[1, 2, 3] };
            let clear = between.iter().all(|&col| {
                Pos::new(row, col).map_or(false, |pos| self.board.piece_at(pos).is_none())
            });
            if clear {
                if let Some(target) = Pos::new(row, king_to_col) {
                    out.push(target);
                }
            }
        }
        out
    }

    /// Relocates the rook half of a castling move. The corner rook was
    /// verified present when the target was offered.
    fn move_castling_rook(&mut self, from: Pos, target: Pos) {
        let kingside = target.col() > from.col();
        let corner_col = if kingside { 7 } else { 0 };
        let beside_col = if kingside {
            target.col() - 1
        } else {
            target.col() + 1
        };
        let corner = Pos::new(from.row(), corner_col);
        let beside = Pos::new(from.row(), beside_col);
        if let (Some(corner), Some(beside)) = (corner, beside) {
            if let Some(mut rook) = self.board.remove(corner) {
                rook.has_moved = true;
                self.board.place(beside, rook);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Pos {
        Pos::new(row, col).unwrap()
    }

    #[test]
    fn new_game_state() {
        let game = Game::new();
        assert_eq!(game.current_turn(), Color::White);
        assert!(game.winner().is_none());
        assert!(game.selected_piece().is_none());
        assert!(game.promotion_pending().is_none());
        assert!(!game.is_check(Color::White));
        assert!(!game.is_check(Color::Black));
    }

    #[test]
    fn selecting_the_opponent_is_rejected() {
        let mut game = Game::new();
        let err = game.select(pos(6, 0)).unwrap_err();
        assert_eq!(err, GameError::InvalidSelection(pos(6, 0)));
        assert!(game.selected_piece().is_none());
        assert_eq!(game.take_events(), vec![GameEvent::InvalidSelection(pos(6, 0))]);
    }

    #[test]
    fn selecting_an_empty_square_is_rejected() {
        let mut game = Game::new();
        assert!(matches!(
            game.select(pos(4, 4)),
            Err(GameError::InvalidSelection(_))
        ));
    }

    #[test]
    fn out_of_range_input_never_touches_the_board() {
        let mut game = Game::new();
        assert_eq!(
            game.select_square(8, 0),
            Err(GameError::OutOfRange { row: 8, col: 0 })
        );
        assert_eq!(
            game.attempt_move(0, 9),
            Err(GameError::OutOfRange { row: 0, col: 9 })
        );
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn a_simple_move_switches_the_turn() {
        let mut game = Game::new();
        game.select_square(1, 4).unwrap();
        game.attempt_move(3, 4).unwrap();
        assert_eq!(game.current_turn(), Color::Black);
        assert!(game.piece_at(pos(3, 4)).unwrap().has_moved);
        assert!(game.piece_at(pos(1, 4)).is_none());

        let events = game.take_events();
        assert_eq!(
            events.last(),
            Some(&GameEvent::TurnSwitched(Color::Black))
        );
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::MoveApplied {
                captured: None,
                castle: false,
                promotion: false,
                ..
            }
        )));
    }

    #[test]
    fn attempting_a_move_with_nothing_selected_is_a_no_op() {
        let mut game = Game::new();
        let before = game.board().clone();
        game.attempt_move(3, 4).unwrap();
        assert_eq!(*game.board(), before);
        assert_eq!(game.current_turn(), Color::White);
    }

    #[test]
    fn illegal_target_keeps_the_selection() {
        let mut game = Game::new();
        game.select_square(1, 4).unwrap();
        let err = game.attempt_move(5, 4).unwrap_err();
        assert_eq!(err, GameError::IllegalMove(pos(5, 4)));
        assert!(game.selected_piece().is_some());
        assert_eq!(game.current_turn(), Color::White);
    }

    #[test]
    fn selecting_another_piece_replaces_the_selection() {
        let mut game = Game::new();
        game.select_square(1, 4).unwrap();
        game.select_square(1, 3).unwrap();
        assert_eq!(game.selected_piece().unwrap().pos, pos(1, 3));
    }

    #[test]
    fn piece_without_moves_suppresses_selection() {
        let mut game = Game::new();
        // Rooks are boxed in at the start.
        game.select_square(0, 0).unwrap();
        assert!(game.selected_piece().is_none());
        assert!(matches!(
            game.take_events().as_slice(),
            [GameEvent::NoLegalMoves(piece)] if piece.kind == PieceKind::Rook
        ));
    }

    #[test]
    fn capture_removes_the_victim_in_the_same_transaction() {
        let mut game = Game::new();
        game.select_square(1, 4).unwrap();
        game.attempt_move(3, 4).unwrap();
        game.select_square(6, 3).unwrap();
        game.attempt_move(4, 3).unwrap();
        game.take_events();

        game.select_square(3, 4).unwrap();
        game.attempt_move(4, 3).unwrap();
        assert_eq!(game.board().pieces().count(), 31);
        let pawn = game.piece_at(pos(4, 3)).unwrap();
        assert_eq!(pawn.color, Color::White);

        let captured = game.take_events().into_iter().find_map(|e| match e {
            GameEvent::MoveApplied { captured, .. } => captured,
            _ => None,
        });
        assert_eq!(captured.unwrap().kind, PieceKind::Pawn);
        assert_eq!(captured.unwrap().color, Color::Black);
    }

    #[test]
    fn game_freezes_after_checkmate() {
        // White mates with the ladder: rook to the back rank.
        let board = Board::from_diagram("4k3/R7/1R6/8/8/8/8/4K3").unwrap();
        let mut game = Game::from_board(board, Color::White);
        game.select(pos(5, 1)).unwrap();
        game.attempt_move_to(pos(7, 1)).unwrap();

        assert_eq!(game.winner(), Some(Color::White));
        assert!(game.is_over());
        let events = game.take_events();
        assert!(events.contains(&GameEvent::Check(Color::Black)));
        assert_eq!(
            events.last(),
            Some(&GameEvent::Checkmate {
                winner: Color::White
            })
        );

        assert_eq!(game.select(pos(0, 4)), Err(GameError::GameOver));
        assert_eq!(game.attempt_move_to(pos(0, 3)), Err(GameError::GameOver));
        assert_eq!(
            game.resolve_promotion(PieceKind::Queen),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn check_is_announced_without_ending_the_game() {
        let board = Board::from_diagram("4k3/8/8/8/8/8/R7/4K3").unwrap();
        let mut game = Game::from_board(board, Color::White);
        game.select(pos(1, 0)).unwrap();
        game.attempt_move_to(pos(1, 4)).unwrap();

        assert!(game.winner().is_none());
        assert_eq!(game.current_turn(), Color::Black);
        let events = game.take_events();
        assert!(events.contains(&GameEvent::Check(Color::Black)));
        assert_eq!(events.last(), Some(&GameEvent::TurnSwitched(Color::Black)));
    }

    #[test]
    fn reset_rebuilds_from_scratch() {
        let mut game = Game::new();
        game.select_square(1, 4).unwrap();
        game.attempt_move(3, 4).unwrap();
        game.reset();
        assert_eq!(game.current_turn(), Color::White);
        assert_eq!(*game.board(), Board::initial());
        assert!(game.take_events().is_empty());
    }
}
