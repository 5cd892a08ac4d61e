//! The partial solution stack.

use excover_core::{DancingLinks, NodeId};

/// Element nodes of the rows chosen so far, in selection order.
///
/// The search pushes a node when it commits to that node's row and pops it
/// when it backtracks, so on success the stack holds exactly the solution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionStack {
    nodes: Vec<NodeId>,
}

impl SolutionStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty stack with room for `capacity` rows.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Pushes the node of a newly committed row.
    pub fn push(&mut self, node: NodeId) {
        self.nodes.push(node);
    }

    /// Removes and returns the most recently committed node.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.nodes.pop()
    }

    /// Returns the number of committed rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no row is committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the committed nodes, oldest first.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Maps the committed nodes to their matrix rows, oldest first.
    ///
    /// Nodes that are not element nodes of `links` are skipped.
    #[must_use]
    pub fn rows(&self, links: &DancingLinks) -> Vec<usize> {
        self.nodes
            .iter()
            .filter_map(|&node| links.row_of(node))
            .collect()
    }
}
