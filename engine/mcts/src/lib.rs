//! Monte Carlo Tree Search move engine for Connect Four.
//!
//! The engine grows a search tree over the `board` rules engine: each
//! iteration selects a promising line with UCT, expands a fresh leaf with
//! one child per legal move, plays the position out with uniform-random
//! moves, and backpropagates the result along the path. When the time or
//! iteration budget runs out it answers with the most-visited root child's
//! column.
//!
//! # Usage
//!
//! ```rust
//! use mcts::{Mcts, SearchConfig};
//!
//! let config = SearchConfig::default().with_iterations(500).with_seed(42);
//! let mut engine = Mcts::new(config).unwrap();
//!
//! let column = engine.search(&[3, 3, 4]).unwrap();
//! assert!(column < 7);
//! ```
//!
//! The tree and the game session are owned exclusively by the running
//! search call; nothing is shared or reused across calls, and a call runs
//! single-threaded from the first iteration to the returned column.

pub mod config;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{SearchBudget, SearchConfig};
pub use node::{NodeId, SearchNode};
pub use search::{run_search, Mcts, SearchError, SearchOutcome};
pub use tree::{SearchTree, TreeError};
