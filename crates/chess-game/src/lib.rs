//! Two-player chess rules engine.
//!
//! This crate provides:
//! - [`rules`] - per-kind movement predicates, pure and check-blind
//! - [`legality`] - the legal-move evaluator (rules filtered by
//!   simulated check safety)
//! - [`check`] - check, square-attack, and checkmate detection
//! - [`Game`] - the turn coordinator: selection, move application with
//!   captures and castling, promotion suspension, checkmate termination
//!
//! The engine is a pure synchronous library: every operation runs to
//! completion, the only suspension is the explicit promotion-pending
//! state, and presentation concerns (animation, timing, input capture)
//! live entirely with the caller, which drains the event buffer after
//! each operation.
//!
//! # Example
//!
//! ```
//! use chess_game::{Game, GameEvent};
//!
//! let mut game = Game::new();
//! // White: pawn on (1, 4) two squares forward.
//! game.select_square(1, 4).unwrap();
//! game.attempt_move(3, 4).unwrap();
//! let events = game.take_events();
//! assert!(matches!(events.last(), Some(GameEvent::TurnSwitched(_))));
//! ```

pub mod check;
mod game;
pub mod legality;
pub mod rules;

pub use check::{is_checkmate, is_king_in_check, is_square_under_attack};
pub use game::{Game, GameError, GameEvent};
pub use legality::{is_move_legal, legal_moves};
pub use rules::is_valid_move;
