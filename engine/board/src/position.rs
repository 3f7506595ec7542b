//! Bitboard position representation and the rules of Connect Four.
//!
//! # Bit layout
//!
//! Each player's discs live in a 49-bit board inside a `u64`. Column `c`
//! occupies bits `7*c .. 7*c + 6`, with row 0 at the bottom:
//!
//! ```text
//! Row 6: [ 6][13][20][27][34][41][48]  <- guard row, always empty
//! Row 5: [ 5][12][19][26][33][40][47]  <- top playable row
//! Row 4: [ 4][11][18][25][32][39][46]
//! Row 3: [ 3][10][17][24][31][38][45]
//! Row 2: [ 2][ 9][16][23][30][37][44]
//! Row 1: [ 1][ 8][15][22][29][36][43]
//! Row 0: [ 0][ 7][14][21][28][35][42]  <- bottom
//!         Col 0   1   2   3   4   5   6
//! ```
//!
//! The seventh bit of every column is a guard that stays zero in any valid
//! position; it keeps the shift-pair win tests from wrapping between
//! adjacent columns. A column whose height index has climbed into the guard
//! row is full.

use crate::error::GameError;

/// Board dimensions
pub const COLS: usize = 7;
pub const ROWS: usize = 6;
pub const BOARD_SIZE: usize = COLS * ROWS; // 42

/// A column index, 0 (leftmost) through 6.
pub type Column = u8;

/// Bits per column, guard row included.
const COLUMN_STRIDE: u8 = 7;

/// One bit per column, sitting in the guard row (bits 6, 13, ..., 48).
const GUARD_ROW: u64 = 0x0001_0204_0810_2040;

/// Shift offsets for the four winning directions around the 7-bit column
/// stride: vertical, horizontal, and the two diagonals.
const WIN_DIRECTIONS: [u32; 4] = [1, 7, 6, 8];

/// One of the two disc colors. Yellow always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Yellow,
    Red,
}

impl Player {
    /// The opposing color.
    pub fn other(self) -> Player {
        match self {
            Player::Yellow => Player::Red,
            Player::Red => Player::Yellow,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::Yellow => 0,
            Player::Red => 1,
        }
    }
}

/// Terminal result of a game. An in-progress game has no outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Player),
    Draw,
}

/// A Connect Four position.
///
/// Tracks one bitboard per player, the next free bit index of every column,
/// and the move history that produced the position. The outcome is cached
/// when a move ends the game; once set it is sticky and further moves are
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Player bitboards, indexed by [`Player::index`]. Always disjoint.
    boards: [u64; 2],
    /// Absolute bit index of the next free cell per column; starts at the
    /// column base `7*c` and reaches the guard row when the column is full.
    heights: [u8; COLS],
    /// Columns played so far, in order.
    history: Vec<Column>,
    /// Terminal result, if the game has ended.
    outcome: Option<Outcome>,
}

impl Position {
    /// The empty starting position.
    pub fn new() -> Self {
        let mut heights = [0u8; COLS];
        for (column, height) in heights.iter_mut().enumerate() {
            *height = column as u8 * COLUMN_STRIDE;
        }
        Self {
            boards: [0; 2],
            heights,
            history: Vec::with_capacity(BOARD_SIZE),
            outcome: None,
        }
    }

    /// Replay a move sequence from the empty position.
    pub fn from_history(history: &[Column]) -> Result<Self, GameError> {
        let mut position = Self::new();
        for &column in history {
            position.apply(column)?;
        }
        Ok(position)
    }

    /// The player who moves next: Yellow on even ply counts, Red on odd.
    pub fn to_move(&self) -> Player {
        if self.plies() % 2 == 0 {
            Player::Yellow
        } else {
            Player::Red
        }
    }

    /// Number of moves played.
    pub fn plies(&self) -> usize {
        self.history.len()
    }

    /// Columns played so far, in order.
    pub fn history(&self) -> &[Column] {
        &self.history
    }

    /// Terminal result, or `None` while the game is in progress.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The given player's bitboard.
    pub fn bitboard(&self, player: Player) -> u64 {
        self.boards[player.index()]
    }

    /// The disc at `(column, row)`, row 0 at the bottom.
    pub fn cell(&self, column: Column, row: usize) -> Option<Player> {
        let bit = 1u64 << (column as usize * COLUMN_STRIDE as usize + row);
        if self.boards[Player::Yellow.index()] & bit != 0 {
            Some(Player::Yellow)
        } else if self.boards[Player::Red.index()] & bit != 0 {
            Some(Player::Red)
        } else {
            None
        }
    }

    /// Whether dropping into `column` is currently allowed.
    pub fn is_legal(&self, column: Column) -> bool {
        self.outcome.is_none()
            && (column as usize) < COLS
            && (1u64 << self.heights[column as usize]) & GUARD_ROW == 0
    }

    /// Playable columns in ascending order. Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Column> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        (0..COLS as Column)
            .filter(|&column| (1u64 << self.heights[column as usize]) & GUARD_ROW == 0)
            .collect()
    }

    /// Drop a disc for the player to move.
    ///
    /// On success the move is recorded and the outcome recomputed: a win for
    /// the mover if the drop completes four in a row, a draw if it was the
    /// 42nd non-winning move. Fails with [`GameError::GameOver`] once the
    /// outcome is set and [`GameError::IllegalMove`] for a full or
    /// out-of-range column; the position is unchanged on failure.
    pub fn apply(&mut self, column: Column) -> Result<(), GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        if !self.is_legal(column) {
            return Err(GameError::IllegalMove(column));
        }

        let mover = self.to_move();
        let board = &mut self.boards[mover.index()];
        *board |= 1u64 << self.heights[column as usize];
        self.heights[column as usize] += 1;
        self.history.push(column);

        if connects_four(self.boards[mover.index()]) {
            self.outcome = Some(Outcome::Win(mover));
        } else if self.plies() == BOARD_SIZE {
            self.outcome = Some(Outcome::Draw);
        }
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// Shift-pair test for four in a row on a single player's bitboard.
///
/// For each direction offset `d`, `x = b & (b >> d)` marks every disc with a
/// same-color neighbor `d` bits away; `x & (x >> 2d)` is non-zero exactly
/// when two such pairs line up into four. The guard row keeps horizontal and
/// diagonal shifts from pairing cells across the column seam.
fn connects_four(board: u64) -> bool {
    WIN_DIRECTIONS.iter().any(|&direction| {
        let pairs = board & (board >> direction);
        pairs & (pairs >> (2 * direction)) != 0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position() {
        let position = Position::new();
        assert_eq!(position.to_move(), Player::Yellow);
        assert_eq!(position.plies(), 0);
        assert_eq!(position.outcome(), None);
        assert_eq!(position.legal_moves(), (0..7).collect::<Vec<_>>());
        assert_eq!(position.bitboard(Player::Yellow), 0);
        assert_eq!(position.bitboard(Player::Red), 0);
    }

    #[test]
    fn apply_sets_expected_bit() {
        let mut position = Position::new();
        position.apply(3).unwrap();

        // Column 3, row 0 is bit 21.
        assert_eq!(position.bitboard(Player::Yellow), 1u64 << 21);
        assert_eq!(position.cell(3, 0), Some(Player::Yellow));
        assert_eq!(position.to_move(), Player::Red);

        position.apply(3).unwrap();
        assert_eq!(position.bitboard(Player::Red), 1u64 << 22);
        assert_eq!(position.cell(3, 1), Some(Player::Red));
    }

    #[test]
    fn players_alternate() {
        let mut position = Position::new();
        for ply in 0..6 {
            let expected = if ply % 2 == 0 {
                Player::Yellow
            } else {
                Player::Red
            };
            assert_eq!(position.to_move(), expected);
            position.apply(ply as Column).unwrap();
        }
    }

    #[test]
    fn full_column_is_illegal() {
        let mut position = Position::new();
        for _ in 0..ROWS {
            position.apply(0).unwrap();
        }
        assert!(!position.is_legal(0));
        assert!(!position.legal_moves().contains(&0));

        let before = position.clone();
        assert_eq!(position.apply(0), Err(GameError::IllegalMove(0)));
        assert_eq!(position, before);
    }

    #[test]
    fn out_of_range_column_is_illegal() {
        let mut position = Position::new();
        assert_eq!(position.apply(7), Err(GameError::IllegalMove(7)));
        assert_eq!(position.apply(255), Err(GameError::IllegalMove(255)));
        assert_eq!(position.plies(), 0);
    }

    #[test]
    fn outcome_is_sticky() {
        let mut position = Position::new();
        // Yellow stacks column 0 to a vertical win.
        for column in [0, 1, 0, 1, 0, 1, 0] {
            position.apply(column).unwrap();
        }
        assert_eq!(position.outcome(), Some(Outcome::Win(Player::Yellow)));
        assert_eq!(position.legal_moves(), Vec::<Column>::new());

        let before = position.clone();
        assert_eq!(position.apply(2), Err(GameError::GameOver));
        assert_eq!(position, before);
    }

    #[test]
    fn winner_is_the_last_mover() {
        // Red wins even though Yellow is nominally to move afterwards.
        let mut position = Position::new();
        for column in [0, 6, 1, 6, 1, 6, 2, 6] {
            position.apply(column).unwrap();
        }
        assert_eq!(position.outcome(), Some(Outcome::Win(Player::Red)));
    }

    #[test]
    fn from_history_round_trips() {
        let mut position = Position::new();
        for column in [3, 3, 4, 2, 2, 4, 5] {
            position.apply(column).unwrap();
        }
        let replayed = Position::from_history(position.history()).unwrap();
        assert_eq!(replayed, position);
    }

    #[test]
    fn from_history_rejects_illegal_sequences() {
        assert_eq!(
            Position::from_history(&[0, 0, 0, 0, 0, 0, 0]),
            Err(GameError::IllegalMove(0))
        );
        assert_eq!(
            Position::from_history(&[0, 1, 0, 1, 0, 1, 0, 2]),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn guard_row_blocks_cross_column_pairs() {
        // Three discs at the top of column 0 and one at the bottom of
        // column 1 sit on adjacent bit indices but must not count as four.
        let board = (1u64 << 3) | (1u64 << 4) | (1u64 << 5) | (1u64 << 7);
        assert!(!connects_four(board));
    }

    #[test]
    fn connects_four_detects_each_direction() {
        // Vertical: bits 0..4 of column 2.
        let vertical = 0b1111u64 << 14;
        assert!(connects_four(vertical));

        // Horizontal: row 0 of columns 1..5.
        let horizontal = (1u64 << 7) | (1u64 << 14) | (1u64 << 21) | (1u64 << 28);
        assert!(connects_four(horizontal));

        // Rising diagonal: (0,0), (1,1), (2,2), (3,3).
        let rising = 1u64 | (1u64 << 8) | (1u64 << 16) | (1u64 << 24);
        assert!(connects_four(rising));

        // Falling diagonal: (0,3), (1,2), (2,1), (3,0).
        let falling = (1u64 << 3) | (1u64 << 9) | (1u64 << 15) | (1u64 << 21);
        assert!(connects_four(falling));

        assert!(!connects_four(0));
        assert!(!connects_four(0b111u64 << 14));
    }
}
