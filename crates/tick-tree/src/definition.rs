//! Node definitions: the flat, ordered input a tree is built from.

use std::fmt;

use crate::{Action, LeafContext, NodeKind};

/// One entry of the ordered list an authoring layer hands to the builder.
///
/// A definition names its parent rather than holding it, so a parent must
/// appear earlier in the list than any of its children. Exactly one
/// definition has no parent: the root.
pub struct NodeDefinition<C> {
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<String>,
    pub(crate) action: Option<Box<dyn Action<C>>>,
}

impl<C> NodeDefinition<C> {
    /// Creates a definition without an action.
    ///
    /// Leaves created this way take their action from
    /// [`LeafBindings`](crate::LeafBindings) at build time.
    pub fn new(name: impl Into<String>, kind: NodeKind, parent: Option<&str>) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: parent.map(str::to_owned),
            action: None,
        }
    }

    /// Creates the parentless root definition.
    pub fn root(name: impl Into<String>, kind: NodeKind) -> Self {
        Self::new(name, kind, None)
    }

    /// Creates a leaf definition running `f`.
    pub fn leaf<F>(name: impl Into<String>, parent: &str, f: F) -> Self
    where
        F: FnMut(&mut C, &mut LeafContext<'_>) + Send + 'static,
    {
        Self::new(name, NodeKind::Leaf, Some(parent)).with_action(f)
    }

    /// Attaches an action to this definition.
    pub fn with_action<A>(mut self, action: A) -> Self
    where
        A: Action<C> + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Attaches an already boxed action.
    pub fn with_boxed_action(mut self, action: Box<dyn Action<C>>) -> Self {
        self.action = Some(action);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// `true` if an action is attached directly to this definition.
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }
}

impl<C> fmt::Debug for NodeDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeDefinition")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parent", &self.parent)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}
