//! Monte Carlo tree search over the Connect Four rules engine.
//!
//! Each iteration runs the four classic phases against a [`SearchTree`] and
//! a [`GameSession`]:
//!
//! 1. **Reset and replay**: rewind the session and replay the root prefix.
//! 2. **Selection**: follow the UCT-best child through fully expanded
//!    nodes, mirroring every descent with a move on the session.
//! 3. **Expansion and playout**: attach one child per legal move to a fresh
//!    leaf, then descend unvisited children uniformly at random until the
//!    game ends, growing the tree along the playout path.
//! 4. **Backpropagation**: walk back to the root, crediting every node on
//!    the path with the playout result.
//!
//! The budget is checked between iterations; when it runs out the engine
//! answers with the most-visited root child's column.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use board::{Column, GameError, GameSession, Outcome, Player};

use crate::config::{SearchBudget, SearchConfig};
use crate::node::SearchNode;
use crate::tree::{SearchTree, TreeError};

/// Errors that can occur during a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The configured budget admits no iterations at all.
    #[error("search budget must be positive")]
    BudgetInvalid,

    /// The starting history is unplayable or already decided.
    #[error("game engine error: {0}")]
    Game(#[from] GameError),

    /// Focus navigation failed; indicates a bug in the search itself.
    #[error("tree navigation failed: {0}")]
    Tree(#[from] TreeError),
}

/// Result of a search, with the statistics behind the chosen move.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The chosen column.
    pub column: Column,

    /// Completed iterations.
    pub iterations: u32,

    /// Playouts recorded at the root (equals `iterations`).
    pub root_visits: u32,

    /// Visit count per root child, in legal-move order.
    pub child_visits: Vec<(Column, u32)>,

    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// The search engine. Holds the configuration and playout RNG; the tree and
/// session are created fresh for every call and dropped afterwards.
#[derive(Debug)]
pub struct Mcts {
    config: SearchConfig,
    rng: ChaCha20Rng,
}

impl Mcts {
    /// Create an engine, validating the configured budget.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        if !config.budget.is_positive() {
            return Err(SearchError::BudgetInvalid);
        }
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        Ok(Self { config, rng })
    }

    /// Search from the position reached by `history` and return the column
    /// to play.
    ///
    /// The history must be a legal move sequence leading to an undecided
    /// position; a decided one is rejected with [`GameError::GameOver`].
    pub fn search(&mut self, history: &[Column]) -> Result<Column, SearchError> {
        Ok(self.search_detailed(history)?.column)
    }

    /// Like [`Mcts::search`], but returns the full visit statistics.
    pub fn search_detailed(&mut self, history: &[Column]) -> Result<SearchOutcome, SearchError> {
        let started = Instant::now();

        let mut session = GameSession::with_history(history)?;
        if session.look().outcome.is_some() {
            return Err(SearchError::Game(GameError::GameOver));
        }

        let mut tree = SearchTree::new(history.to_vec());
        let mut iterations = 0u32;
        loop {
            self.run_iteration(&mut tree, &mut session)?;
            iterations += 1;
            if self.exhausted(started, iterations) {
                break;
            }
        }

        // The most-visited root child wins; on equal visits the earlier
        // column (lower index) is kept.
        let root = tree.get(tree.root());
        let mut best: Option<Column> = None;
        let mut best_visits = 0u32;
        let mut child_visits = Vec::with_capacity(root.children.len());
        for &child_id in &root.children {
            let child = tree.get(child_id);
            let action = child
                .action
                .expect("non-root nodes record their originating column");
            child_visits.push((action, child.visits));
            if best.is_none() || child.visits > best_visits {
                best = Some(action);
                best_visits = child.visits;
            }
        }
        let column = best.expect("a non-terminal root expands at least one child");

        let outcome = SearchOutcome {
            column,
            iterations,
            root_visits: root.visits,
            child_visits,
            elapsed: started.elapsed(),
        };
        debug!(
            column = outcome.column,
            iterations = outcome.iterations,
            root_visits = outcome.root_visits,
            nodes = tree.len(),
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "search complete"
        );
        Ok(outcome)
    }

    /// One full iteration: replay, select, expand and play out, backpropagate.
    fn run_iteration(
        &mut self,
        tree: &mut SearchTree,
        session: &mut GameSession,
    ) -> Result<(), SearchError> {
        debug_assert!(tree.at_root(), "iterations start at the root");

        // Phase 1: synchronize the session with the root position.
        session.reset();
        let root_history = tree.focus().history.clone();
        let mut outcome = session.play_many(&root_history)?.outcome;

        // Phase 2: follow UCT through fully expanded nodes. A terminal
        // session result ends the walk immediately.
        while outcome.is_none() && tree.focus().expanded {
            let index = self.select_child(tree);
            tree.down(index)?;
            let column = tree
                .focus()
                .action
                .expect("non-root nodes record their originating column");
            outcome = session.play(column)?.outcome;
        }

        // Phase 3: expand fresh leaves and descend unvisited children at
        // random until the game ends, growing the tree along the playout.
        while outcome.is_none() {
            let focus = tree.focus();
            if focus.visits == 0 && focus.children.is_empty() {
                let legal = session.legal_moves();
                tree.replace_children(&legal);
            }

            let unvisited: Vec<usize> = tree
                .focus()
                .children
                .iter()
                .enumerate()
                .filter(|&(_, &child)| tree.get(child).visits == 0)
                .map(|(index, _)| index)
                .collect();
            debug_assert!(
                !unvisited.is_empty(),
                "a non-terminal, non-expanded focus keeps an unvisited child"
            );

            let index = unvisited[self.rng.gen_range(0..unvisited.len())];
            tree.down(index)?;
            let column = tree
                .focus()
                .action
                .expect("non-root nodes record their originating column");
            outcome = session.play(column)?.outcome;
        }
        let outcome = outcome.expect("the playout loop only exits on a terminal result");

        // Phase 4: credit the path from the playout leaf back to the root.
        loop {
            let contribution = reward_for(tree.focus(), outcome);
            let fully_visited = tree.focus_fully_visited();
            tree.update_focus(|node| {
                node.visits += 1;
                node.reward += contribution;
                node.expanded = fully_visited;
            });
            if tree.at_root() {
                break;
            }
            tree.up();
        }

        trace!(nodes = tree.len(), ?outcome, "iteration complete");
        Ok(())
    }

    /// Index of the UCT-best child of the focus; the first child wins ties.
    fn select_child(&self, tree: &SearchTree) -> usize {
        let focus = tree.focus();
        let ln_parent = f64::from(focus.visits).ln();

        let mut best_index = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (index, &child) in focus.children.iter().enumerate() {
            let score = tree.get(child).uct_score(ln_parent);
            if score > best_score {
                best_index = index;
                best_score = score;
            }
        }
        best_index
    }

    fn exhausted(&self, started: Instant, iterations: u32) -> bool {
        match self.config.budget {
            SearchBudget::Iterations(limit) => iterations >= limit,
            SearchBudget::Time(limit) => started.elapsed() >= limit,
        }
    }
}

/// Reward credited to a node for a terminal playout result.
///
/// Nodes are credited from the perspective of the player who made the
/// node's last move: Yellow for odd move-prefix lengths, Red otherwise
/// (the empty prefix counts as Red's). Wins pay 1 to the winner's nodes and
/// 0 to the opponent's; draws pay 0.5 everywhere.
fn reward_for(node: &SearchNode, outcome: Outcome) -> f64 {
    let credited = if node.history.len() % 2 == 1 {
        Player::Yellow
    } else {
        Player::Red
    };
    match outcome {
        Outcome::Draw => 0.5,
        Outcome::Win(winner) if winner == credited => 1.0,
        Outcome::Win(_) => 0.0,
    }
}

/// Convenience function: one-off search with the given budget.
pub fn run_search(history: &[Column], budget: SearchBudget) -> Result<Column, SearchError> {
    Mcts::new(SearchConfig::default().with_budget(budget))?.search(history)
}
