//! Name-keyed leaf bindings.

use std::collections::HashMap;
use std::fmt;

use crate::{Action, LeafContext, NodeDefinition};

/// Maps leaf names to the actions they run.
///
/// Authoring layers that describe a tree without code (names, kinds,
/// parents) supply the behavior separately through this map; the builder
/// resolves every unbound leaf against it.
pub struct LeafBindings<C> {
    actions: HashMap<String, Box<dyn Action<C>>>,
}

impl<C> LeafBindings<C> {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Binds a closure to the leaf named `name`, replacing any previous binding.
    pub fn bind<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: FnMut(&mut C, &mut LeafContext<'_>) + Send + 'static,
    {
        self.insert(name, f);
        self
    }

    /// Binds an [`Action`] implementation to the leaf named `name`.
    pub fn bind_action<A>(mut self, name: impl Into<String>, action: A) -> Self
    where
        A: Action<C> + 'static,
    {
        self.insert(name, action);
        self
    }

    /// Inserts a binding, returning `true` if it replaced an existing one.
    pub fn insert<A>(&mut self, name: impl Into<String>, action: A) -> bool
    where
        A: Action<C> + 'static,
    {
        self.actions.insert(name.into(), Box::new(action)).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Names of leaves in `definitions` that have neither an inline action nor
    /// a binding here.
    pub fn unbound_leaves<'d>(&self, definitions: &'d [NodeDefinition<C>]) -> Vec<&'d str> {
        definitions
            .iter()
            .filter(|def| def.kind().is_leaf() && !def.has_action() && !self.contains(def.name()))
            .map(NodeDefinition::name)
            .collect()
    }

    pub(crate) fn take(&mut self, name: &str) -> Option<Box<dyn Action<C>>> {
        self.actions.remove(name)
    }

    /// Names of bindings that were never claimed by a leaf.
    pub(crate) fn into_names(self) -> impl Iterator<Item = String> {
        self.actions.into_keys()
    }
}

impl<C> Default for LeafBindings<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for LeafBindings<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.actions.keys().collect();
        names.sort();
        f.debug_struct("LeafBindings").field("leaves", &names).finish()
    }
}
