//! Shared helpers for tick-tree integration tests.

#![allow(dead_code, reason = "not every test binary uses every helper")]

use std::collections::VecDeque;
use std::sync::Once;

use tick_tree::{LeafContext, Status};

static INIT: Once = Once::new();

/// Installs a test-writer subscriber so `RUST_LOG=tick_tree=debug` shows
/// traversal steps (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Context shared by scripted leaves: records every invocation in order.
#[derive(Debug, Default)]
pub struct Blackboard {
    pub calls: Vec<&'static str>,
}

impl Blackboard {
    pub fn count(&self, name: &str) -> usize {
        self.calls.iter().filter(|c| **c == name).count()
    }

    pub fn take(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.calls)
    }
}

/// A leaf that plays back `outcomes`, one per invocation, and repeats the last
/// one once exhausted. `Running` means "report nothing".
pub fn script(
    name: &'static str,
    outcomes: &'static [Status],
) -> impl FnMut(&mut Blackboard, &mut LeafContext<'_>) + Send + 'static {
    let mut outcomes: VecDeque<Status> = outcomes.iter().copied().collect();
    move |board, leaf| {
        board.calls.push(name);
        let status = if outcomes.len() > 1 {
            outcomes.pop_front().unwrap_or(Status::Running)
        } else {
            outcomes.front().copied().unwrap_or(Status::Running)
        };
        if status.is_done() {
            leaf.report(status);
        }
    }
}

pub fn succeeds(name: &'static str) -> impl FnMut(&mut Blackboard, &mut LeafContext<'_>) + Send + 'static {
    script(name, &[Status::Success])
}

pub fn fails(name: &'static str) -> impl FnMut(&mut Blackboard, &mut LeafContext<'_>) + Send + 'static {
    script(name, &[Status::Failure])
}
