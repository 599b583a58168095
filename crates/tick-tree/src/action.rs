//! Leaf actions.
//!
//! This module defines the [`Action`] trait, the externally supplied behavior
//! a leaf runs when the tick reaches it. Actions are generic over a context
//! type `C` (the host's blackboard) and report their outcome through a
//! [`LeafContext`] rather than a return value, so "did not report" reads
//! naturally as "still running".

use crate::Status;

/// Behavior bound to a leaf node.
pub trait Action<C>: Send {
    /// Runs one step of the leaf against the given context.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Mutable reference to the host context/blackboard.
    /// * `leaf` - Result sink for the invoking leaf. Call at most one of
    ///   [`LeafContext::succeed`], [`LeafContext::fail`] or
    ///   [`LeafContext::running`]; calling none means the leaf is still
    ///   running and will be invoked again next tick.
    fn tick(&mut self, ctx: &mut C, leaf: &mut LeafContext<'_>);
}

impl<C, F> Action<C> for F
where
    F: FnMut(&mut C, &mut LeafContext<'_>) + Send,
{
    #[inline]
    fn tick(&mut self, ctx: &mut C, leaf: &mut LeafContext<'_>) {
        self(ctx, leaf)
    }
}

/// Boxes a closure as an action.
///
/// Taking the `FnMut` bound directly lets closure parameters be inferred
/// without annotations.
pub fn action<C, F>(f: F) -> Box<dyn Action<C>>
where
    F: FnMut(&mut C, &mut LeafContext<'_>) + Send + 'static,
{
    Box::new(f)
}

/// The invoking leaf, as seen by its action.
#[derive(Debug)]
pub struct LeafContext<'a> {
    name: &'a str,
    previous: Status,
    reported: Option<Status>,
    reports: u32,
}

impl<'a> LeafContext<'a> {
    pub(crate) fn new(name: &'a str, previous: Status) -> Self {
        Self {
            name,
            previous,
            reported: None,
            reports: 0,
        }
    }

    /// Name of the leaf node.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Outcome reported by the previous invocation of this leaf.
    pub fn last_result(&self) -> Status {
        self.previous
    }

    /// Reports success.
    pub fn succeed(&mut self) {
        self.report(Status::Success);
    }

    /// Reports failure.
    pub fn fail(&mut self) {
        self.report(Status::Failure);
    }

    /// Explicitly reports that the leaf has not concluded yet.
    pub fn running(&mut self) {
        self.report(Status::Running);
    }

    /// Reports `status`.
    pub fn report(&mut self, status: Status) {
        self.reports += 1;
        self.reported = Some(status);
    }

    /// Outcome of this invocation; `Running` when nothing was reported.
    pub(crate) fn status(&self) -> Status {
        self.reported.unwrap_or(Status::Running)
    }

    pub(crate) fn reports(&self) -> u32 {
        self.reports
    }
}
