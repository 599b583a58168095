//! Traversal trace events.
//!
//! Every step of a tick can be observed: which node the tick is on, what it
//! decided, and the result being threaded at that moment. Events go to
//! `tracing` and, when tracing is enabled in [`TreeConfig`](crate::TreeConfig),
//! to an observer installed with [`Tree::set_observer`](crate::Tree::set_observer).
//! Observers are pure listeners; nothing in the engine reads them back.

use crate::{NodeKind, Status};

/// What the tick did at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum TraceStep {
    /// The node became the current node.
    Enter,
    /// A leaf's action reported a final outcome.
    LeafCompleted,
    /// A leaf's action is still running; the tick suspends.
    LeafSuspended,
    /// A composite finished and hands its result to the parent.
    Completed,
    /// A composite resumes a child left running by an earlier tick.
    ResumeRunningChild,
    /// A composite selects the child under its cursor.
    SelectNextChild,
    /// A decorator descends into its only child.
    SelectChild,
    /// An inverter flipped the result.
    Inverted,
    /// A succeeder forced the result to success.
    ForcedSuccess,
    /// The root finished and every node was reset for the next run.
    RunFinished,
}

/// A single observed traversal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEvent<'a> {
    pub node: &'a str,
    pub kind: NodeKind,
    pub step: TraceStep,
    pub result: Status,
}

/// Callback receiving trace events.
pub type Observer = Box<dyn FnMut(&TraceEvent<'_>) + Send>;

/// Routes events to `tracing` and the optional observer.
pub(crate) struct Tracer {
    enabled: bool,
    observer: Option<Observer>,
}

impl Tracer {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            observer: None,
        }
    }

    pub(crate) fn set_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&TraceEvent<'_>) + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub(crate) fn clear_observer(&mut self) -> Option<Observer> {
        self.observer.take()
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub(crate) fn emit(&mut self, event: TraceEvent<'_>) {
        if !self.enabled {
            tracing::trace!(
                node = event.node,
                kind = %event.kind,
                step = %event.step,
                result = %event.result,
                "tree step"
            );
            return;
        }

        tracing::debug!(
            node = event.node,
            kind = %event.kind,
            step = %event.step,
            result = %event.result,
            "tree step"
        );

        if let Some(observer) = self.observer.as_mut() {
            observer(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn event(step: TraceStep) -> TraceEvent<'static> {
        TraceEvent {
            node: "Root",
            kind: NodeKind::Selector,
            step,
            result: Status::Running,
        }
    }

    #[test]
    fn observer_only_sees_enabled_events() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut tracer = Tracer::new(false);
        tracer.set_observer(move |e| sink.lock().unwrap().push(e.step));

        tracer.emit(event(TraceStep::Enter));
        tracer.set_enabled(true);
        tracer.emit(event(TraceStep::SelectNextChild));

        assert_eq!(*seen.lock().unwrap(), vec![TraceStep::SelectNextChild]);
    }

    #[test]
    fn steps_display_in_snake_case() {
        assert_eq!(TraceStep::ResumeRunningChild.to_string(), "resume_running_child");
    }
}
