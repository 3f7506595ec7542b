//! Terminal front-end for human-vs-AI Connect Four.
//!
//! Drives one interactive game between the user and the search engine. The
//! board is re-rendered after every move; the engine answers within the
//! configured budget. Illegal input is reported and re-prompted, never
//! fatal.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, level_filters::LevelFilter};

use board::{Column, GameSession, Player};
use mcts::{Mcts, SearchBudget, SearchConfig};

mod ui;

/// Color the human plays. Yellow always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    Yellow,
    Red,
}

impl Side {
    fn player(self) -> Player {
        match self {
            Side::Yellow => Player::Yellow,
            Side::Red => Player::Red,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "connect4")]
#[command(about = "Play Connect Four against a Monte Carlo tree search")]
struct Cli {
    /// Search iterations per engine move (ignored when --time-ms is set)
    #[arg(long, default_value_t = 20_000)]
    iterations: u32,

    /// Wall-clock search budget per engine move, in milliseconds
    #[arg(long)]
    time_ms: Option<u64>,

    /// Seed for the engine's playout RNG (OS entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Color the human plays
    #[arg(long, value_enum, default_value = "yellow")]
    side: Side,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    fn validate(&self) -> Result<()> {
        if self.time_ms.is_none() && self.iterations == 0 {
            return Err(anyhow!("iterations must be greater than 0"));
        }
        if self.time_ms == Some(0) {
            return Err(anyhow!("time-ms must be greater than 0"));
        }
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }
        Ok(())
    }

    fn budget(&self) -> SearchBudget {
        match self.time_ms {
            Some(ms) => SearchBudget::Time(Duration::from_millis(ms)),
            None => SearchBudget::Iterations(self.iterations),
        }
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.validate()?;
    init_tracing(&cli.log_level);

    let mut config = SearchConfig::default().with_budget(cli.budget());
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let mut engine = Mcts::new(config)?;
    let human = cli.side.player();

    println!("Connect Four. You play {:?}; Yellow moves first.", human);

    let mut session = GameSession::new();
    print!("{}", ui::render(session.position()));

    loop {
        let column = if session.position().to_move() == human {
            match prompt_move(&session)? {
                Some(column) => column,
                None => {
                    println!("Goodbye.");
                    return Ok(());
                }
            }
        } else {
            let outcome = engine.search_detailed(&session.look().history)?;
            debug!(
                column = outcome.column,
                iterations = outcome.iterations,
                elapsed_ms = outcome.elapsed.as_millis() as u64,
                "engine move chosen"
            );
            println!("The engine drops in column {}.", outcome.column + 1);
            outcome.column
        };

        let snapshot = session.play(column)?;
        print!("{}", ui::render(session.position()));

        if let Some(outcome) = snapshot.outcome {
            println!("{}", ui::outcome_banner(outcome, human));
            return Ok(());
        }
    }
}

/// Ask the user for a column until the input is a playable one.
///
/// Returns `None` on quit or end of input.
fn prompt_move(session: &GameSession) -> Result<Option<Column>> {
    let stdin = io::stdin();
    loop {
        print!("Your move (1-7, q to quit): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }

        match input.parse::<u8>() {
            Ok(label @ 1..=7) => {
                let column = label - 1;
                if session.legal_moves().contains(&column) {
                    return Ok(Some(column));
                }
                println!("Column {label} is full.");
            }
            _ => println!("Please enter a column number between 1 and 7."),
        }
    }
}
