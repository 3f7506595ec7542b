//! Search tree with arena storage and a focus cursor.
//!
//! Nodes live in a contiguous `Vec` and reference each other by [`NodeId`]
//! indices, which keeps traversal cache-friendly and makes structural
//! mutation at the focus O(1). The focus cursor walks the tree like a
//! zipper: `down` into a child by index, `up` to the parent, and mutate or
//! expand whatever is currently focused. Ascending never rebuilds anything,
//! so a `down` followed by `up` restores the tree exactly.

use thiserror::Error;

use board::Column;

use crate::node::{NodeId, SearchNode};

/// Errors from focus navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// `down` was asked to descend from a childless focus.
    #[error("the focused node has no children")]
    NoChildren,

    /// `down` was asked for a child index past the end of the child list.
    #[error("child index {index} is out of bounds for {children} children")]
    OutOfBounds { index: usize, children: usize },
}

/// Arena-backed search tree with a single focus cursor.
///
/// Created with just a root node; the search grows it by expanding the
/// focus. The tree lives for one search call and is dropped afterwards.
#[derive(Debug)]
pub struct SearchTree {
    /// Arena storing all nodes; the root is always index 0.
    nodes: Vec<SearchNode>,

    /// Currently focused node.
    focus: NodeId,
}

impl SearchTree {
    /// Create a tree whose root represents the position after `history`.
    /// The focus starts at the root.
    pub fn new(history: Vec<Column>) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(history)],
            focus: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Total number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// ID of the focused node.
    #[inline]
    pub fn focus_id(&self) -> NodeId {
        self.focus
    }

    /// The focused node.
    #[inline]
    pub fn focus(&self) -> &SearchNode {
        self.get(self.focus)
    }

    /// Whether the focus currently sits on the root.
    #[inline]
    pub fn at_root(&self) -> bool {
        self.focus == self.root()
    }

    /// Move the focus to the `index`-th child of the focused node.
    pub fn down(&mut self, index: usize) -> Result<NodeId, TreeError> {
        let children = &self.focus().children;
        if children.is_empty() {
            return Err(TreeError::NoChildren);
        }
        let child = *children.get(index).ok_or(TreeError::OutOfBounds {
            index,
            children: children.len(),
        })?;
        self.focus = child;
        Ok(child)
    }

    /// Move the focus to the parent of the focused node.
    ///
    /// Returns `None` at the root, which stays focused.
    pub fn up(&mut self) -> Option<NodeId> {
        let parent = self.focus().parent;
        if parent.is_none() {
            return None;
        }
        self.focus = parent;
        Some(parent)
    }

    /// Mutate the focused node's payload in place.
    pub fn update_focus(&mut self, update: impl FnOnce(&mut SearchNode)) {
        let focus = self.focus;
        update(self.get_mut(focus));
    }

    /// Attach one fresh child per column to the focused node, in order.
    ///
    /// Each child's move prefix is the focus's prefix extended by its
    /// column. Expansion is one-shot: the focus must still be childless.
    pub fn replace_children(&mut self, columns: &[Column]) {
        debug_assert!(
            self.focus().children.is_empty(),
            "a node is expanded at most once"
        );
        let parent = self.focus;
        let base = self.focus().history.clone();

        let mut children = Vec::with_capacity(columns.len());
        for &column in columns {
            let mut history = Vec::with_capacity(base.len() + 1);
            history.extend_from_slice(&base);
            history.push(column);

            let id = NodeId(self.nodes.len() as u32);
            self.nodes.push(SearchNode::new_child(parent, column, history));
            children.push(id);
        }
        self.get_mut(parent).children = children;
    }

    /// Whether the focused node has children and every one has been visited.
    pub fn focus_fully_visited(&self) -> bool {
        let focus = self.focus();
        !focus.children.is_empty()
            && focus
                .children
                .iter()
                .all(|&child| self.get(child).visits >= 1)
    }
}
