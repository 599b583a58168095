//! The tick engine.
//!
//! A [`Tree`] owns its nodes in an arena and advances them with
//! [`Tree::tick`], a single non-recursive loop that walks from the root to
//! one leaf, runs it, and climbs back up as far as the results allow.
//!
//! # Resumption
//!
//! No continuation is stored between ticks. When a leaf reports `Running`,
//! the tick returns immediately and every node on the path from the root to
//! that leaf stays flagged as running. The next tick starts at the root again
//! and, at each level, re-enters the running child directly, reaching the
//! suspended leaf in O(depth) steps without re-running completed siblings.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, error};

use crate::error::TickError;
use crate::node::{Node, NodeId, NodeView};
use crate::trace::{Observer, TraceEvent, TraceStep, Tracer};
use crate::{Action, LeafContext, NodeKind, Status, TreeConfig};

/// What the loop does after dispatching on the current node.
enum Step {
    /// Move into a child; the threaded result starts over.
    Descend(NodeId),
    /// End the current node and hand the result to its parent.
    Ascend,
    /// A leaf is still running; stop until the next tick.
    Suspend,
}

/// A built behavior tree, ready to be ticked.
///
/// Created by [`TreeBuilder`](crate::TreeBuilder). The type parameter `C` is
/// the context handed to every leaf action.
pub struct Tree<C> {
    nodes: Vec<Node>,
    actions: Vec<Option<Box<dyn Action<C>>>>,
    index: HashMap<String, NodeId>,
    root: NodeId,
    tracer: Tracer,
    last_run: Option<Status>,
    fault: Option<TickError>,
}

impl<C> Tree<C> {
    pub(crate) fn from_parts(
        nodes: Vec<Node>,
        actions: Vec<Option<Box<dyn Action<C>>>>,
        index: HashMap<String, NodeId>,
        root: NodeId,
        config: &TreeConfig,
    ) -> Self {
        Self {
            nodes,
            actions,
            index,
            root,
            tracer: Tracer::new(config.trace),
            last_run: None,
            fault: None,
        }
    }

    /// Advances the tree by one time step.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the root finished a full run during this call; every
    ///   node has been reset and the next tick starts a fresh run
    /// - `Ok(false)` if a leaf is still running; the next tick resumes it
    ///
    /// # Errors
    ///
    /// A [`TickError`] is fatal. It is returned again by every later call and
    /// no node state changes after it.
    pub fn tick(&mut self, ctx: &mut C) -> Result<bool, TickError> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }

        self.run(ctx).inspect_err(|err| {
            error!(error = %err, "behavior tree faulted");
            self.fault = Some(err.clone());
        })
    }

    fn run(&mut self, ctx: &mut C) -> Result<bool, TickError> {
        let mut current = self.root;
        let mut previous = self.root;
        let mut result = Status::Running;

        loop {
            let node = &mut self.nodes[current.0];
            if !node.is_running() {
                node.start_execution();
            }
            self.trace(current, TraceStep::Enter, result);

            let step = match self.nodes[current.0].kind {
                NodeKind::Leaf => self.step_leaf(current, ctx, &mut result)?,
                NodeKind::Selector => self.step_composite(current, result.is_success(), result),
                NodeKind::Sequence => self.step_composite(current, result.is_failure(), result),
                NodeKind::Inverter => {
                    self.step_decorator(current, &mut result, Status::invert, TraceStep::Inverted)
                }
                NodeKind::Succeeder => self.step_decorator(
                    current,
                    &mut result,
                    |_| Status::Success,
                    TraceStep::ForcedSuccess,
                ),
            };

            match step {
                Step::Suspend => return Ok(false),
                Step::Descend(child) => {
                    result = Status::Running;
                    previous = current;
                    current = child;
                }
                Step::Ascend => {
                    self.nodes[current.0].end_execution();
                    match self.nodes[current.0].parent {
                        Some(parent) => {
                            previous = current;
                            current = parent;
                        }
                        None if current == self.root => {
                            self.finish_run(result);
                            return Ok(true);
                        }
                        None => {
                            let node = &self.nodes[current.0];
                            return Err(TickError::BrokenLink {
                                node: node.name.clone(),
                                kind: node.kind,
                                previous: self.nodes[previous.0].name.clone(),
                            });
                        }
                    }
                }
            }
        }
    }

    /// Runs the leaf's action once.
    fn step_leaf(
        &mut self,
        id: NodeId,
        ctx: &mut C,
        result: &mut Status,
    ) -> Result<Step, TickError> {
        let node = &self.nodes[id.0];
        let Some(action) = self.actions[id.0].as_mut() else {
            return Err(TickError::UnboundLeaf {
                node: node.name.clone(),
            });
        };

        let mut leaf = LeafContext::new(&node.name, node.last_result());
        action.tick(ctx, &mut leaf);
        let (status, reports) = (leaf.status(), leaf.reports());

        if reports > 1 {
            return Err(TickError::LeafContract {
                node: node.name.clone(),
                reports,
            });
        }
        self.nodes[id.0].set_last_result(status);

        if status.is_done() {
            *result = status;
            self.trace(id, TraceStep::LeafCompleted, status);
            Ok(Step::Ascend)
        } else {
            self.trace(id, TraceStep::LeafSuspended, status);
            Ok(Step::Suspend)
        }
    }

    /// Shared logic for `Selector` and `Sequence`; they differ only in which
    /// outcome short-circuits.
    fn step_composite(&mut self, id: NodeId, short_circuit: bool, result: Status) -> Step {
        if short_circuit || self.all_children_complete(id) {
            self.trace(id, TraceStep::Completed, result);
            return Step::Ascend;
        }

        if let Some(child) = self.running_child(id) {
            self.trace(id, TraceStep::ResumeRunningChild, result);
            return Step::Descend(child);
        }

        let node = &mut self.nodes[id.0];
        let Some(child) = node.cursor_child() else {
            return Step::Ascend;
        };
        node.advance_cursor();
        self.trace(id, TraceStep::SelectNextChild, result);
        Step::Descend(child)
    }

    /// Shared logic for single-child decorators. `transform` is applied to
    /// the child's result once the child has completed.
    fn step_decorator(
        &mut self,
        id: NodeId,
        result: &mut Status,
        transform: fn(Status) -> Status,
        completed: TraceStep,
    ) -> Step {
        debug_assert_eq!(self.nodes[id.0].children.len(), 1);

        match self.nodes[id.0].children.first().copied() {
            Some(child) if !self.nodes[child.0].is_complete() => {
                self.trace(id, TraceStep::SelectChild, *result);
                Step::Descend(child)
            }
            _ => {
                *result = transform(*result);
                self.trace(id, completed, *result);
                Step::Ascend
            }
        }
    }

    fn finish_run(&mut self, result: Status) {
        for node in &mut self.nodes {
            node.reset_execution();
        }
        self.last_run = Some(result);
        self.trace(self.root, TraceStep::RunFinished, result);
        debug!(result = %result, "behavior tree run finished");
    }

    fn all_children_complete(&self, id: NodeId) -> bool {
        self.nodes[id.0]
            .children
            .iter()
            .all(|child| self.nodes[child.0].is_complete())
    }

    fn running_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].is_running())
    }

    fn trace(&mut self, id: NodeId, step: TraceStep, result: Status) {
        let node = &self.nodes[id.0];
        self.tracer.emit(TraceEvent {
            node: &node.name,
            kind: node.kind,
            step,
            result,
        });
    }

    /// The root node.
    pub fn root(&self) -> NodeView<'_> {
        NodeView::new(self.root, &self.nodes[self.root.0])
    }

    /// Looks a node up by name.
    pub fn node(&self, name: &str) -> Option<NodeView<'_>> {
        self.index.get(name).and_then(|id| self.node_by_id(*id))
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<NodeView<'_>> {
        self.nodes.get(id.0).map(|node| NodeView::new(id, node))
    }

    /// All nodes in definition order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeView<'_>> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| NodeView::new(NodeId(i), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a built tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `true` while a run is in progress across ticks.
    pub fn is_running(&self) -> bool {
        self.nodes[self.root.0].is_running()
    }

    /// The leaf the next tick will resume, if a leaf is suspended.
    pub fn active_leaf(&self) -> Option<NodeView<'_>> {
        self.nodes()
            .find(|node| node.kind().is_leaf() && node.is_running())
    }

    /// Result of the most recently finished full run.
    pub fn last_run(&self) -> Option<Status> {
        self.last_run
    }

    /// The error that stopped this tree, if any.
    pub fn fault(&self) -> Option<&TickError> {
        self.fault.as_ref()
    }

    /// Installs an observer for traversal steps. It only receives events
    /// while tracing is enabled.
    pub fn set_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&TraceEvent<'_>) + Send + 'static,
    {
        self.tracer.set_observer(observer);
    }

    /// Removes and returns the installed observer.
    pub fn clear_observer(&mut self) -> Option<Observer> {
        self.tracer.clear_observer()
    }

    pub fn set_tracing(&mut self, enabled: bool) {
        self.tracer.set_enabled(enabled);
    }

    pub fn is_tracing(&self) -> bool {
        self.tracer.is_enabled()
    }
}

impl<C> fmt::Debug for Tree<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.nodes[self.root.0].name)
            .field("nodes", &self.nodes.len())
            .field("last_run", &self.last_run)
            .field("fault", &self.fault)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TreeBuilder;

    /// Scripted outcomes per leaf, consumed one per invocation.
    #[derive(Default)]
    struct Script {
        calls: Vec<&'static str>,
    }

    fn scripted(
        name: &'static str,
        outcomes: Vec<Status>,
    ) -> impl FnMut(&mut Script, &mut LeafContext<'_>) + Send + 'static {
        let mut outcomes = outcomes.into_iter();
        move |ctx, leaf| {
            ctx.calls.push(name);
            match outcomes.next() {
                Some(Status::Running) | None => {}
                Some(status) => leaf.report(status),
            }
        }
    }

    #[test]
    fn suspended_leaf_keeps_ancestors_running() {
        let mut tree = TreeBuilder::new()
            .root("Root", NodeKind::Selector)
            .child("Patrol", NodeKind::Sequence, "Root")
            .leaf("Walk", "Patrol", scripted("Walk", vec![Status::Running, Status::Success]))
            .leaf("Look", "Patrol", scripted("Look", vec![Status::Success]))
            .build()
            .unwrap();
        let mut ctx = Script::default();

        assert_eq!(tree.tick(&mut ctx), Ok(false));
        assert!(tree.root().is_running());
        assert!(tree.node("Patrol").unwrap().is_running());
        assert_eq!(tree.active_leaf().unwrap().name(), "Walk");

        assert_eq!(tree.tick(&mut ctx), Ok(true));
        assert_eq!(ctx.calls, vec!["Walk", "Walk", "Look"]);
        assert_eq!(tree.last_run(), Some(Status::Success));
        assert!(tree.nodes().all(|n| !n.is_running() && !n.is_complete()));
    }

    #[test]
    fn sibling_outcome_does_not_leak_into_next_child() {
        // The failed first branch must not end the second sequence early.
        let mut tree = TreeBuilder::new()
            .root("Root", NodeKind::Selector)
            .child("First", NodeKind::Sequence, "Root")
            .leaf("A", "First", scripted("A", vec![Status::Failure]))
            .child("Second", NodeKind::Sequence, "Root")
            .leaf("B", "Second", scripted("B", vec![Status::Success]))
            .build()
            .unwrap();
        let mut ctx = Script::default();

        assert_eq!(tree.tick(&mut ctx), Ok(true));
        assert_eq!(ctx.calls, vec!["A", "B"]);
        assert_eq!(tree.last_run(), Some(Status::Success));
    }

    #[test]
    fn leaf_last_result_is_recorded() {
        let mut tree = TreeBuilder::new()
            .root("Root", NodeKind::Sequence)
            .leaf("Check", "Root", scripted("Check", vec![Status::Failure]))
            .build()
            .unwrap();

        tree.tick(&mut Script::default()).unwrap();
        assert_eq!(tree.node("Check").unwrap().last_result(), Status::Failure);
        assert_eq!(tree.last_run(), Some(Status::Failure));
    }

    #[test]
    fn double_report_faults_the_tree() {
        let mut tree = TreeBuilder::<()>::new()
            .root("Root", NodeKind::Selector)
            .leaf("Greedy", "Root", |_, leaf| {
                leaf.succeed();
                leaf.fail();
            })
            .build()
            .unwrap();

        let expected = TickError::LeafContract {
            node: "Greedy".into(),
            reports: 2,
        };
        assert_eq!(tree.tick(&mut ()), Err(expected.clone()));
        assert_eq!(tree.tick(&mut ()), Err(expected.clone()));
        assert_eq!(tree.fault(), Some(&expected));
    }

    #[test]
    fn observer_sees_redescent_path() {
        let mut tree = TreeBuilder::new()
            .root("Root", NodeKind::Selector)
            .child("Guard", NodeKind::Succeeder, "Root")
            .leaf("Wait", "Guard", scripted("Wait", vec![Status::Running, Status::Failure]))
            .with_config(TreeConfig::new().with_trace(true))
            .build()
            .unwrap();

        let steps = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&steps);
        tree.set_observer(move |e| sink.lock().unwrap().push((e.node.to_owned(), e.step)));

        let mut ctx = Script::default();
        tree.tick(&mut ctx).unwrap();
        steps.lock().unwrap().clear();
        tree.tick(&mut ctx).unwrap();

        let steps = steps.lock().unwrap();
        let expected = [
            ("Root", TraceStep::Enter),
            ("Root", TraceStep::ResumeRunningChild),
            ("Guard", TraceStep::Enter),
            ("Guard", TraceStep::SelectChild),
            ("Wait", TraceStep::Enter),
            ("Wait", TraceStep::LeafCompleted),
            ("Guard", TraceStep::Enter),
            ("Guard", TraceStep::ForcedSuccess),
            ("Root", TraceStep::Enter),
            ("Root", TraceStep::Completed),
            ("Root", TraceStep::RunFinished),
        ];
        let expected: Vec<_> = expected
            .iter()
            .map(|(name, step)| ((*name).to_owned(), *step))
            .collect();
        assert_eq!(*steps, expected);
    }

    #[test]
    fn cleared_observer_stops_receiving_events() {
        let mut tree = TreeBuilder::new()
            .root("Root", NodeKind::Sequence)
            .leaf("Step", "Root", scripted("Step", vec![Status::Success, Status::Success]))
            .build()
            .unwrap();
        assert!(!tree.is_tracing());
        tree.set_tracing(true);
        assert!(tree.is_tracing());

        let seen = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = std::sync::Arc::clone(&seen);
        tree.set_observer(move |_| {
            counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        });

        let mut ctx = Script::default();
        tree.tick(&mut ctx).unwrap();
        let after_first = seen.load(std::sync::atomic::Ordering::Relaxed);
        assert!(after_first > 0);

        assert!(tree.clear_observer().is_some());
        assert!(tree.clear_observer().is_none());
        tree.tick(&mut ctx).unwrap();
        assert_eq!(seen.load(std::sync::atomic::Ordering::Relaxed), after_first);
        assert_eq!(ctx.calls, vec!["Step", "Step"]);
    }
}
