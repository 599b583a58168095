//! Error types for tree construction and ticking.

use thiserror::Error;

use crate::NodeKind;

/// A malformed tree, rejected while building.
///
/// Construction is all-or-nothing: when any of these is returned, no tree
/// exists.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("tree has no node definitions")]
    Empty,

    #[error("node '{0}' is defined more than once")]
    DuplicateName(String),

    #[error("node '{node}' names parent '{parent}', which is not defined before it")]
    UnknownParent { node: String, parent: String },

    #[error("node '{second}' has no parent, but '{first}' is already the root")]
    MultipleRoots { first: String, second: String },

    #[error("no node without a parent was defined")]
    MissingRoot,

    #[error("leaf '{parent}' cannot have child '{child}'")]
    LeafWithChildren { parent: String, child: String },

    #[error("{kind} '{node}' has {found} children")]
    ChildCount {
        node: String,
        kind: NodeKind,
        found: usize,
    },

    #[error("leaf '{0}' has no bound action")]
    UnboundLeaf(String),

    #[error("{kind} '{node}' is not a leaf and cannot carry an action")]
    ActionOnComposite { node: String, kind: NodeKind },
}

/// A fatal condition hit during a tick.
///
/// None of these is retried; the tree refuses further ticks after one is
/// raised.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TickError {
    #[error("{kind} '{node}' has no parent but is not the root (previous node: '{previous}')")]
    BrokenLink {
        node: String,
        kind: NodeKind,
        previous: String,
    },

    #[error("leaf '{node}' reported {reports} outcomes in a single invocation")]
    LeafContract { node: String, reports: u32 },

    #[error("leaf '{node}' has no bound action")]
    UnboundLeaf { node: String },
}

/// Any error this crate produces.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("malformed tree: {0}")]
    Malformed(#[from] BuildError),

    #[error("tick failed: {0}")]
    Tick(#[from] TickError),
}
