//! ANSI board rendering for the terminal.

use board::{Outcome, Player, Position, COLS, ROWS};

const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Render the board, top row first, with column labels 1..7 underneath.
///
/// Yellow discs are open circles, Red discs filled circles, empty cells
/// dots.
pub fn render(position: &Position) -> String {
    let mut out = String::new();
    for row in (0..ROWS).rev() {
        out.push(' ');
        for column in 0..COLS as u8 {
            match position.cell(column, row) {
                Some(Player::Yellow) => {
                    out.push_str(YELLOW);
                    out.push('○');
                    out.push_str(RESET);
                }
                Some(Player::Red) => {
                    out.push_str(RED);
                    out.push('●');
                    out.push_str(RESET);
                }
                None => out.push('·'),
            }
            out.push(' ');
        }
        out.push('\n');
    }
    out.push_str(" 1 2 3 4 5 6 7\n");
    out
}

/// One-line result announcement from the human's point of view.
pub fn outcome_banner(outcome: Outcome, human: Player) -> &'static str {
    match outcome {
        Outcome::Draw => "The board is full: a draw.",
        Outcome::Win(winner) if winner == human => "Four in a row: you win!",
        Outcome::Win(_) => "Four in a row: the engine wins.",
    }
}
