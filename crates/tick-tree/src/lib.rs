//! Resumable behavior tree engine.
//!
//! This library runs behavior trees whose leaves may take several ticks to
//! finish. Each call to [`Tree::tick`] walks the tree from the root to a
//! single leaf and either climbs back up with its result or suspends until the
//! next call, resuming at exactly the same leaf.
//!
//! - **Arena storage**: nodes are stored flat and linked by [`NodeId`]
//! - **No stored continuation**: the active path is rediscovered every tick
//!   from per-node `running` flags, in O(depth)
//! - **Tri-state status**: `Success`, `Failure`, or `Running`
//! - **Host-owned behavior**: leaves run [`Action`]s bound by name or inline
//!
//! # Architecture
//!
//! - [`TreeBuilder`]: validates ordered [`NodeDefinition`]s into a [`Tree`]
//! - [`Tree`]: owns the nodes and implements the tick loop
//! - [`NodeKind`]: `Leaf`, composites (`Selector`, `Sequence`), decorators
//!   (`Inverter`, `Succeeder`)
//! - [`LeafBindings`]: name-keyed actions for leaves defined without one
//! - [`trace`]: structured per-step events for diagnostics
//!
//! # Example
//!
//! ```rust
//! use tick_tree::{NodeKind, TreeBuilder};
//!
//! let mut tree = TreeBuilder::<u32>::new()
//!     .root("Root", NodeKind::Sequence)
//!     .leaf("Charge", "Root", |energy, leaf| {
//!         *energy += 1;
//!         if *energy >= 2 {
//!             leaf.succeed();
//!         }
//!     })
//!     .build()
//!     .unwrap();
//!
//! let mut energy = 0;
//! assert_eq!(tree.tick(&mut energy), Ok(false));
//! assert_eq!(tree.tick(&mut energy), Ok(true));
//! ```

pub mod action;
pub mod bindings;
pub mod builder;
pub mod config;
pub mod definition;
pub mod error;
pub mod kind;
pub mod node;
pub mod status;
pub mod trace;
pub mod tree;

// Re-export core types for ergonomic API
pub use action::{Action, LeafContext, action};
pub use bindings::LeafBindings;
pub use builder::TreeBuilder;
pub use config::{ROOT_NAME, TreeConfig};
pub use definition::NodeDefinition;
pub use error::{BuildError, TickError, TreeError};
pub use kind::NodeKind;
pub use node::{NodeId, NodeView};
pub use status::Status;
pub use trace::{TraceEvent, TraceStep};
pub use tree::Tree;
