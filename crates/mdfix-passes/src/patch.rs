//! Structural patches returned by post-processors.
//!
//! A [`Patch`] is an ordered list of edits over existing nodes and nodes the
//! patch creates, together with the change notices to report. Post-processors
//! build patches from a shared borrow of the document; the walker applies
//! them afterwards in one step.

use mdfix_ast::{Change, Document, NodeId, NodeKind, NodeTracker, Span};

/// Node addressed by a patch: an existing node or one the patch creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Existing(NodeId),
    /// Index into the nodes created by the same patch.
    Created(usize),
}

impl From<NodeId> for Target {
    fn from(id: NodeId) -> Self {
        Self::Existing(id)
    }
}

/// A single structural edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    Append { parent: Target, child: Target },
    Prepend { parent: Target, child: Target },
    InsertBefore { anchor: Target, node: Target },
    Detach(Target),
    RemoveChildren(Target),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Notice {
    Added,
    AddedWithChildren,
    Removed,
    RemovedWithChildren,
}

impl Notice {
    fn change(self, id: NodeId) -> Change {
        match self {
            Self::Added => Change::Added(id),
            Self::AddedWithChildren => Change::AddedWithChildren(id),
            Self::Removed => Change::Removed(id),
            Self::RemovedWithChildren => Change::RemovedWithChildren(id),
        }
    }
}

/// Ordered structural edits plus the changes to report once applied.
#[derive(Clone, Debug, Default)]
pub struct Patch {
    created: Vec<(NodeKind, Span)>,
    edits: Vec<Edit>,
    notices: Vec<(Notice, Target)>,
}

impl Patch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a node to be allocated when the patch is applied.
    pub fn create(&mut self, kind: NodeKind, span: Span) -> Target {
        self.created.push((kind, span));
        Target::Created(self.created.len() - 1)
    }

    pub fn append(&mut self, parent: impl Into<Target>, child: impl Into<Target>) -> &mut Self {
        self.edits.push(Edit::Append {
            parent: parent.into(),
            child: child.into(),
        });
        self
    }

    pub fn prepend(&mut self, parent: impl Into<Target>, child: impl Into<Target>) -> &mut Self {
        self.edits.push(Edit::Prepend {
            parent: parent.into(),
            child: child.into(),
        });
        self
    }

    pub fn insert_before(
        &mut self,
        anchor: impl Into<Target>,
        node: impl Into<Target>,
    ) -> &mut Self {
        self.edits.push(Edit::InsertBefore {
            anchor: anchor.into(),
            node: node.into(),
        });
        self
    }

    pub fn detach(&mut self, node: impl Into<Target>) -> &mut Self {
        self.edits.push(Edit::Detach(node.into()));
        self
    }

    pub fn remove_children(&mut self, node: impl Into<Target>) -> &mut Self {
        self.edits.push(Edit::RemoveChildren(node.into()));
        self
    }

    pub fn node_added(&mut self, node: impl Into<Target>) -> &mut Self {
        self.notices.push((Notice::Added, node.into()));
        self
    }

    pub fn node_added_with_children(&mut self, node: impl Into<Target>) -> &mut Self {
        self.notices.push((Notice::AddedWithChildren, node.into()));
        self
    }

    pub fn node_removed(&mut self, node: impl Into<Target>) -> &mut Self {
        self.notices.push((Notice::Removed, node.into()));
        self
    }

    pub fn node_removed_with_children(&mut self, node: impl Into<Target>) -> &mut Self {
        self.notices.push((Notice::RemovedWithChildren, node.into()));
        self
    }

    /// Edits in application order.
    #[must_use]
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Apply all edits in order, then report the notices to `tracker`.
    ///
    /// Returns the ids of the created nodes, in creation order.
    ///
    /// # Panics
    ///
    /// Panics if an edit references a node the patch did not create, or if an
    /// edit would break the tree (moving the root, creating a cycle).
    pub fn apply<T: NodeTracker + ?Sized>(self, doc: &mut Document, tracker: &mut T) -> Vec<NodeId> {
        let created: Vec<NodeId> = self
            .created
            .into_iter()
            .map(|(kind, span)| doc.create(kind, span))
            .collect();
        let resolve = |target: Target| match target {
            Target::Existing(id) => id,
            Target::Created(index) => created[index],
        };

        for edit in self.edits {
            match edit {
                Edit::Append { parent, child } => doc.append_child(resolve(parent), resolve(child)),
                Edit::Prepend { parent, child } => {
                    doc.prepend_child(resolve(parent), resolve(child));
                }
                Edit::InsertBefore { anchor, node } => {
                    doc.insert_before(resolve(anchor), resolve(node));
                }
                Edit::Detach(node) => doc.detach(resolve(node)),
                Edit::RemoveChildren(node) => doc.remove_children(resolve(node)),
            }
        }

        for (notice, target) in self.notices {
            tracker.record(notice.change(resolve(target)));
        }

        created
    }
}
