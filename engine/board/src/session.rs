//! Stateful game session driving a [`Position`].
//!
//! A [`GameSession`] is the simulator interface the search engine runs
//! playouts through: it accepts moves one at a time or in a batch, reports
//! the history and outcome, and resets in O(1) without reallocating the
//! caller's handle. All failures are typed errors and leave the session
//! untouched.

use tracing::trace;

use crate::error::GameError;
use crate::position::{Column, Outcome, Position};

/// Non-mutating view of a session: the moves played and the result so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub history: Vec<Column>,
    pub outcome: Option<Outcome>,
}

/// A mutable Connect Four game in progress.
#[derive(Debug, Clone, Default)]
pub struct GameSession {
    position: Position,
}

impl GameSession {
    /// A session at the empty starting position.
    pub fn new() -> Self {
        Self {
            position: Position::new(),
        }
    }

    /// A session with `history` already played.
    ///
    /// Equivalent to [`GameSession::new`] followed by
    /// [`GameSession::play_many`].
    pub fn with_history(history: &[Column]) -> Result<Self, GameError> {
        let mut session = Self::new();
        session.play_many(history)?;
        Ok(session)
    }

    /// Drop a disc for the player to move.
    ///
    /// Fails with [`GameError::GameOver`] once the game has a result and
    /// [`GameError::IllegalMove`] for a full or out-of-range column.
    pub fn play(&mut self, column: Column) -> Result<Snapshot, GameError> {
        self.position.apply(column)?;
        trace!(
            column,
            plies = self.position.plies(),
            outcome = ?self.position.outcome(),
            "move applied"
        );
        Ok(self.look())
    }

    /// Apply a batch of moves atomically.
    ///
    /// The whole batch is staged first: if any move is illegal, or the game
    /// ends with later moves still supplied, the session is left unchanged
    /// and the call fails with [`GameError::InvalidGame`]. A batch whose
    /// final move ends the game is accepted.
    pub fn play_many(&mut self, columns: &[Column]) -> Result<Snapshot, GameError> {
        let mut staged = self.position.clone();
        for &column in columns {
            staged
                .apply(column)
                .map_err(|_| GameError::InvalidGame)?;
        }
        self.position = staged;
        Ok(self.look())
    }

    /// Playable columns in ascending order. Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Column> {
        self.position.legal_moves()
    }

    /// The current history and outcome.
    pub fn look(&self) -> Snapshot {
        Snapshot {
            history: self.position.history().to_vec(),
            outcome: self.position.outcome(),
        }
    }

    /// The underlying position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Return to the empty starting position, discarding all moves.
    pub fn reset(&mut self) {
        self.position = Position::new();
    }
}
