//! Tree vertices and their per-run execution state.
//!
//! Nodes live in an arena owned by [`Tree`](crate::Tree) and refer to each
//! other through [`NodeId`]. The parent link is a plain index, so walking
//! upward never borrows the parent.

use std::fmt;

use crate::{NodeKind, Status};

/// Index of a node in its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in definition order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single vertex: static topology plus mutable execution state.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    running: bool,
    execution_complete: bool,
    child_cursor: usize,
    last_result: Status,
}

impl Node {
    pub(crate) fn new(name: String, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            name,
            kind,
            parent,
            children: Vec::new(),
            running: false,
            execution_complete: false,
            child_cursor: 0,
            last_result: Status::Running,
        }
    }

    pub(crate) fn add_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    #[inline]
    pub(crate) fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub(crate) fn is_complete(&self) -> bool {
        self.execution_complete
    }

    pub(crate) fn start_execution(&mut self) {
        self.running = true;
    }

    /// Ends this node's run: no longer running, complete, cursor rewound.
    pub(crate) fn end_execution(&mut self) {
        self.running = false;
        self.execution_complete = true;
        self.child_cursor = 0;
    }

    /// Prepares the node for the next full-tree run.
    pub(crate) fn reset_execution(&mut self) {
        self.execution_complete = false;
    }

    /// Child the cursor points at. `None` only for leaves.
    pub(crate) fn cursor_child(&self) -> Option<NodeId> {
        self.children.get(self.child_cursor).copied()
    }

    pub(crate) fn advance_cursor(&mut self) {
        self.child_cursor += 1;
        if self.child_cursor >= self.children.len() {
            self.child_cursor = 0;
        }
    }

    #[inline]
    pub(crate) fn last_result(&self) -> Status {
        self.last_result
    }

    pub(crate) fn set_last_result(&mut self, status: Status) {
        self.last_result = status;
    }
}

/// Read-only view of a node, for hosts and diagnostics.
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    id: NodeId,
    node: &'a Node,
}

impl<'a> NodeView<'a> {
    pub(crate) fn new(id: NodeId, node: &'a Node) -> Self {
        Self { id, node }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.node.name
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.node.parent
    }

    /// Children in execution order.
    pub fn children(&self) -> &'a [NodeId] {
        &self.node.children
    }

    /// `true` while the node is mid-execution across ticks.
    pub fn is_running(&self) -> bool {
        self.node.running
    }

    /// `true` once the node has finished within the current full-tree run.
    pub fn is_complete(&self) -> bool {
        self.node.execution_complete
    }

    /// Index of the next child a composite will select.
    pub fn child_cursor(&self) -> usize {
        self.node.child_cursor
    }

    /// Outcome last reported by this node's action. Always `Running` for
    /// non-leaf nodes.
    pub fn last_result(&self) -> Status {
        self.node.last_result
    }
}

impl fmt::Debug for NodeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("id", &self.id)
            .field("name", &self.node.name)
            .field("kind", &self.node.kind)
            .field("running", &self.node.running)
            .field("complete", &self.node.execution_complete)
            .field("cursor", &self.node.child_cursor)
            .field("last_result", &self.node.last_result)
            .finish()
    }
}
