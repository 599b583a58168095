//! Tree construction and validation.
//!
//! [`TreeBuilder`] turns an ordered list of [`NodeDefinition`]s into a
//! [`Tree`]. The free functions at the bottom of this module are shorthands
//! for the common definitions, so a tree can be written as a flat list:
//!
//! ```rust
//! use tick_tree::builder::{leaf, sequence};
//! use tick_tree::{NodeDefinition, NodeKind, TreeBuilder};
//!
//! let tree = TreeBuilder::<()>::from_definitions(vec![
//!     NodeDefinition::root("Root", NodeKind::Selector),
//!     sequence("Patrol", "Root"),
//!     leaf("Walk", "Patrol", |_, leaf| leaf.succeed()),
//! ])
//! .build()
//! .unwrap();
//! assert_eq!(tree.len(), 3);
//! ```

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::error::BuildError;
use crate::node::{Node, NodeId};
use crate::{Action, LeafBindings, LeafContext, NodeDefinition, NodeKind, Tree, TreeConfig};

/// Collects node definitions and builds a validated [`Tree`].
pub struct TreeBuilder<C> {
    definitions: Vec<NodeDefinition<C>>,
    bindings: LeafBindings<C>,
    config: TreeConfig,
}

impl<C> TreeBuilder<C> {
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
            bindings: LeafBindings::new(),
            config: TreeConfig::default(),
        }
    }

    /// Starts from definitions produced by an authoring layer.
    pub fn from_definitions(definitions: Vec<NodeDefinition<C>>) -> Self {
        Self {
            definitions,
            ..Self::new()
        }
    }

    /// Appends a definition.
    pub fn definition(mut self, definition: NodeDefinition<C>) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Appends the root definition.
    pub fn root(self, name: impl Into<String>, kind: NodeKind) -> Self {
        self.definition(NodeDefinition::root(name, kind))
    }

    /// Appends a non-root definition. Leaves added here are resolved against
    /// the bindings.
    pub fn child(self, name: impl Into<String>, kind: NodeKind, parent: &str) -> Self {
        self.definition(NodeDefinition::new(name, kind, Some(parent)))
    }

    /// Appends a leaf running `f`.
    pub fn leaf<F>(self, name: impl Into<String>, parent: &str, f: F) -> Self
    where
        F: FnMut(&mut C, &mut LeafContext<'_>) + Send + 'static,
    {
        self.definition(NodeDefinition::leaf(name, parent, f))
    }

    /// Appends a leaf running an [`Action`] implementation.
    pub fn leaf_action<A>(self, name: impl Into<String>, parent: &str, action: A) -> Self
    where
        A: Action<C> + 'static,
    {
        self.definition(NodeDefinition::new(name, NodeKind::Leaf, Some(parent)).with_action(action))
    }

    /// Supplies actions for leaves defined without one.
    pub fn with_bindings(mut self, bindings: LeafBindings<C>) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn with_config(mut self, config: TreeConfig) -> Self {
        self.config = config;
        self
    }

    /// Validates the definitions and builds the tree.
    ///
    /// Definitions are processed in order; each parent must already exist.
    /// Child order follows definition order.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] for an unresolved or duplicate name, a second
    /// root, a child count the node's kind does not allow, a leaf without an
    /// action, or an action on a non-leaf.
    pub fn build(self) -> Result<Tree<C>, BuildError> {
        let Self {
            definitions,
            mut bindings,
            config,
        } = self;

        if definitions.is_empty() {
            return Err(BuildError::Empty);
        }

        let mut nodes: Vec<Node> = Vec::with_capacity(definitions.len());
        let mut actions = Vec::with_capacity(definitions.len());
        let mut index: HashMap<String, NodeId> = HashMap::with_capacity(definitions.len());
        let mut root: Option<NodeId> = None;

        for definition in definitions {
            let NodeDefinition {
                name,
                kind,
                parent,
                action,
            } = definition;

            if index.contains_key(&name) {
                return Err(BuildError::DuplicateName(name));
            }
            let id = NodeId(nodes.len());

            let parent_id = match parent {
                Some(parent) => {
                    let Some(&parent_id) = index.get(&parent) else {
                        return Err(BuildError::UnknownParent { node: name, parent });
                    };
                    let parent_node: &mut Node = &mut nodes[parent_id.0];
                    if parent_node.kind.is_leaf() {
                        return Err(BuildError::LeafWithChildren { parent, child: name });
                    }
                    parent_node.add_child(id);
                    Some(parent_id)
                }
                None => {
                    if let Some(first) = root {
                        return Err(BuildError::MultipleRoots {
                            first: nodes[first.0].name.clone(),
                            second: name,
                        });
                    }
                    root = Some(id);
                    None
                }
            };

            let action = match (kind, action) {
                (NodeKind::Leaf, Some(action)) => {
                    if bindings.take(&name).is_some() {
                        debug!(leaf = %name, "inline action takes precedence over binding");
                    }
                    Some(action)
                }
                (NodeKind::Leaf, None) => match bindings.take(&name) {
                    Some(action) => Some(action),
                    None => return Err(BuildError::UnboundLeaf(name)),
                },
                (kind, Some(_)) => return Err(BuildError::ActionOnComposite { node: name, kind }),
                (_, None) => None,
            };

            trace!(node = %name, %kind, parent = ?parent_id, "node created");
            index.insert(name.clone(), id);
            nodes.push(Node::new(name, kind, parent_id));
            actions.push(action);
        }

        for node in &nodes {
            if !node.kind.arity().contains(&node.children.len()) {
                return Err(BuildError::ChildCount {
                    node: node.name.clone(),
                    kind: node.kind,
                    found: node.children.len(),
                });
            }
        }

        let root = root.ok_or(BuildError::MissingRoot)?;
        let root_name = &nodes[root.0].name;
        if *root_name != config.root_name {
            warn!(
                root = %root_name,
                expected = %config.root_name,
                "root node does not carry the reserved root name"
            );
        }

        for name in bindings.into_names() {
            warn!(leaf = %name, "binding does not match any leaf; dropped");
        }

        debug!(nodes = nodes.len(), root = %root_name, "behavior tree built");
        Ok(Tree::from_parts(nodes, actions, index, root, &config))
    }
}

impl<C> Default for TreeBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a selector definition under `parent`.
#[inline]
pub fn selector<C>(name: impl Into<String>, parent: &str) -> NodeDefinition<C> {
    NodeDefinition::new(name, NodeKind::Selector, Some(parent))
}

/// Creates a sequence definition under `parent`.
#[inline]
pub fn sequence<C>(name: impl Into<String>, parent: &str) -> NodeDefinition<C> {
    NodeDefinition::new(name, NodeKind::Sequence, Some(parent))
}

/// Creates an inverter definition under `parent`.
#[inline]
pub fn inverter<C>(name: impl Into<String>, parent: &str) -> NodeDefinition<C> {
    NodeDefinition::new(name, NodeKind::Inverter, Some(parent))
}

/// Creates a succeeder definition under `parent`.
#[inline]
pub fn succeeder<C>(name: impl Into<String>, parent: &str) -> NodeDefinition<C> {
    NodeDefinition::new(name, NodeKind::Succeeder, Some(parent))
}

/// Creates a leaf definition running `f` under `parent`.
///
/// Shorthand for [`NodeDefinition::leaf`].
#[inline]
pub fn leaf<C, F>(name: impl Into<String>, parent: &str, f: F) -> NodeDefinition<C>
where
    F: FnMut(&mut C, &mut LeafContext<'_>) + Send + 'static,
{
    NodeDefinition::leaf(name, parent, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(_: &mut (), leaf: &mut LeafContext<'_>) {
        leaf.succeed();
    }

    #[test]
    fn children_follow_definition_order() {
        let tree = TreeBuilder::<()>::new()
            .root("Root", NodeKind::Sequence)
            .leaf("A", "Root", ok)
            .leaf("B", "Root", ok)
            .leaf("C", "Root", ok)
            .build()
            .unwrap();

        let root = tree.root();
        let names: Vec<_> = root
            .children()
            .iter()
            .map(|id| tree.node_by_id(*id).unwrap().name())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(tree.node("B").unwrap().parent(), Some(root.id()));
    }

    #[test]
    fn parent_must_precede_child() {
        let err = TreeBuilder::<()>::new()
            .root("Root", NodeKind::Selector)
            .leaf("Early", "Later", ok)
            .child("Later", NodeKind::Sequence, "Root")
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            BuildError::UnknownParent {
                node: "Early".into(),
                parent: "Later".into(),
            }
        );
    }

    #[test]
    fn rejects_empty_and_duplicates() {
        assert_eq!(TreeBuilder::<()>::new().build().unwrap_err(), BuildError::Empty);

        let err = TreeBuilder::<()>::new()
            .root("Root", NodeKind::Selector)
            .leaf("Twin", "Root", ok)
            .leaf("Twin", "Root", ok)
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::DuplicateName("Twin".into()));
    }

    #[test]
    fn rejects_second_root() {
        let err = TreeBuilder::<()>::new()
            .root("Root", NodeKind::Selector)
            .leaf("A", "Root", ok)
            .root("Other", NodeKind::Sequence)
            .build()
            .unwrap_err();

        assert!(matches!(err, BuildError::MultipleRoots { ref first, ref second }
            if first == "Root" && second == "Other"));
    }

    #[test]
    fn enforces_child_counts() {
        let err = TreeBuilder::<()>::new()
            .root("Root", NodeKind::Selector)
            .child("Not", NodeKind::Inverter, "Root")
            .leaf("A", "Not", ok)
            .leaf("B", "Not", ok)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::ChildCount {
                node: "Not".into(),
                kind: NodeKind::Inverter,
                found: 2,
            }
        );

        let err = TreeBuilder::<()>::new()
            .root("Root", NodeKind::Selector)
            .child("Empty", NodeKind::Sequence, "Root")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::ChildCount { found: 0, .. }));

        let err = TreeBuilder::<()>::new()
            .root("Root", NodeKind::Selector)
            .leaf("A", "Root", ok)
            .leaf("B", "A", ok)
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::LeafWithChildren { .. }));
    }

    #[test]
    fn leaves_need_actions() {
        let err = TreeBuilder::<()>::new()
            .root("Root", NodeKind::Selector)
            .child("Orphan", NodeKind::Leaf, "Root")
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::UnboundLeaf("Orphan".into()));

        let tree = TreeBuilder::<()>::new()
            .root("Root", NodeKind::Selector)
            .child("Orphan", NodeKind::Leaf, "Root")
            .with_bindings(LeafBindings::new().bind("Orphan", ok))
            .build();
        assert!(tree.is_ok());
    }

    #[test]
    fn composites_reject_actions() {
        let err = TreeBuilder::<()>::new()
            .definition(NodeDefinition::root("Root", NodeKind::Selector).with_action(ok))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::ActionOnComposite {
                node: "Root".into(),
                kind: NodeKind::Selector,
            }
        );
    }

    #[test]
    fn any_root_name_is_accepted() {
        let tree = TreeBuilder::<()>::from_definitions(vec![
            NodeDefinition::root("Brain", NodeKind::Selector),
            leaf("Idle", "Brain", ok),
        ])
        .build()
        .unwrap();
        assert_eq!(tree.root().name(), "Brain");
    }
}
