//! Change journal for structural tree mutations.
//!
//! Post-processors report every node they add or remove so that a walker can
//! keep auxiliary bookkeeping (such as incremental re-rendering) in sync with
//! the tree. The tracker carries no transactional guarantees.

use crate::arena::NodeId;

/// A single structural change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Change {
    /// A node was inserted; its children were already known.
    Added(NodeId),
    /// A node and its whole subtree were inserted.
    AddedWithChildren(NodeId),
    /// A node was removed; its children were handled separately.
    Removed(NodeId),
    /// A node and its whole subtree were removed.
    RemovedWithChildren(NodeId),
}

impl Change {
    /// Node the change refers to.
    #[must_use]
    pub fn node(self) -> NodeId {
        match self {
            Self::Added(id)
            | Self::AddedWithChildren(id)
            | Self::Removed(id)
            | Self::RemovedWithChildren(id) => id,
        }
    }
}

/// Receiver of structural change notifications.
pub trait NodeTracker {
    /// Record one change.
    fn record(&mut self, change: Change);

    fn node_added(&mut self, node: NodeId) {
        self.record(Change::Added(node));
    }

    fn node_added_with_children(&mut self, node: NodeId) {
        self.record(Change::AddedWithChildren(node));
    }

    fn node_removed(&mut self, node: NodeId) {
        self.record(Change::Removed(node));
    }

    fn node_removed_with_children(&mut self, node: NodeId) {
        self.record(Change::RemovedWithChildren(node));
    }
}

/// Tracker that keeps every change in order.
#[derive(Clone, Debug, Default)]
pub struct ChangeJournal {
    changes: Vec<Change>,
}

impl ChangeJournal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded changes in order.
    #[must_use]
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Drain all recorded changes.
    pub fn take(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.changes)
    }
}

impl NodeTracker for ChangeJournal {
    fn record(&mut self, change: Change) {
        tracing::trace!(?change, "Tree change");
        self.changes.push(change);
    }
}
