use thiserror::Error;

use crate::position::Column;

/// Errors reported by the rules engine and the game session.
///
/// The engine recovers nothing internally; every failure is handed back to
/// the caller and the prior state is preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The column is full or outside 0..7.
    #[error("illegal move: column {0} is full or out of range")]
    IllegalMove(Column),

    /// A move was submitted after the game reached a terminal result.
    #[error("the game is already over")]
    GameOver,

    /// A supplied history contains an illegal move, or reaches a terminal
    /// position with moves still left to apply.
    #[error("invalid game: history contains an illegal or post-terminal move")]
    InvalidGame,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            GameError::IllegalMove(7).to_string(),
            "illegal move: column 7 is full or out of range"
        );
        assert_eq!(GameError::GameOver.to_string(), "the game is already over");
        assert!(GameError::InvalidGame.to_string().starts_with("invalid game"));
    }
}
