//! Foundational types for the chess rules engine.
//!
//! This crate provides the data model shared by the rules crate:
//! - [`Color`], [`PieceKind`], and [`Piece`] for piece identity
//! - [`Pos`] for bounds-checked board coordinates
//! - [`Board`], the 8x8 mailbox container
//! - a textual diagram format for fixtures ([`Board::from_diagram`])
//!
//! Nothing here knows any chess rules; the board is purely structural
//! and its invariants (one piece per square, one king per color) are
//! upheld by the rules crate.

mod board;
mod color;
mod diagram;
mod piece;
mod pos;

pub use board::Board;
pub use color::Color;
pub use diagram::DiagramError;
pub use piece::{Piece, PieceKind};
pub use pos::Pos;
