//! Connect Four rules engine.
//!
//! Connect Four is a two-player connection game where players drop colored
//! discs into a 7-column, 6-row vertically suspended grid. The first player
//! to line up four discs horizontally, vertically or diagonally wins.
//!
//! This crate is the authoritative rule set: it validates and applies column
//! drops, enumerates legal moves, and detects wins and draws. Positions are
//! stored as one 49-bit bitboard per player (see [`position`] for the bit
//! layout), which makes four-in-a-row detection a handful of shift-and-mask
//! instructions.
//!
//! # Usage
//!
//! ```rust
//! use board::{GameSession, Outcome, Player};
//!
//! let mut session = GameSession::new();
//! session.play_many(&[1, 1, 2, 2, 3, 3]).unwrap();
//! let snapshot = session.play(4).unwrap();
//! assert_eq!(snapshot.outcome, Some(Outcome::Win(Player::Yellow)));
//! ```

pub mod error;
pub mod position;
pub mod session;

pub use error::GameError;
pub use position::{Column, Outcome, Player, Position, BOARD_SIZE, COLS, ROWS};
pub use session::{GameSession, Snapshot};

#[cfg(test)]
mod tests;
