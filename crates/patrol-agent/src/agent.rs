//! The patrolling agent: its blackboard, leaf actions and tree layout.
//!
//! ```text
//! Root (selector)
//! ├── Travel (sequence)
//! │   ├── NotArrived (inverter)
//! │   │   └── CheckIfArrived
//! │   └── MoveTowardsTarget        running until the waypoint is reached
//! └── Turnaround (sequence)
//!     ├── TryRest (succeeder)
//!     │   └── Rest                 running for `rest_frames` frames
//!     └── SwapTarget
//! ```

use std::fmt;
use std::str::FromStr;

use tick_tree::builder::{inverter, leaf, sequence, succeeder};
use tick_tree::{
    BuildError, LeafBindings, LeafContext, NodeDefinition, NodeKind, Status, Tree, TreeBuilder,
    TreeConfig,
};
use tracing::{debug, info};

use crate::config::PatrolConfig;

/// A position on the patrol plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Moves at most `step` toward `target`, never overshooting.
    pub fn move_towards(self, target: Point, step: f32) -> Point {
        let distance = self.distance(target);
        if distance <= step || distance == 0.0 {
            return target;
        }
        let ratio = step / distance;
        Point::new(
            self.x + (target.x - self.x) * ratio,
            self.y + (target.y - self.y) * ratio,
        )
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Parses `"x,y"`.
impl FromStr for Point {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected 'x,y', got '{s}'"))?;
        let x = x.trim().parse().map_err(|e| format!("bad x in '{s}': {e}"))?;
        let y = y.trim().parse().map_err(|e| format!("bad y in '{s}': {e}"))?;
        Ok(Point::new(x, y))
    }
}

/// Blackboard handed to every leaf.
#[derive(Debug, Clone)]
pub struct Agent {
    pub position: Point,
    waypoints: [Point; 2],
    target: usize,
    speed: f32,
    arrive_radius: f32,
}

impl Agent {
    /// Places the agent on the first waypoint, heading for the second.
    pub fn new(config: &PatrolConfig) -> Self {
        Self {
            position: config.waypoint_a,
            waypoints: [config.waypoint_a, config.waypoint_b],
            target: 1,
            speed: config.speed,
            arrive_radius: config.arrive_radius,
        }
    }

    pub fn target(&self) -> Point {
        self.waypoints[self.target]
    }

    pub fn arrived(&self) -> bool {
        self.position.distance(self.target()) <= self.arrive_radius
    }

    fn step(&mut self) {
        self.position = self.position.move_towards(self.target(), self.speed);
    }

    fn swap_target(&mut self) {
        self.target = 1 - self.target;
    }
}

/// Node layout as an authoring tool would export it: names, kinds, parents.
pub fn patrol_definitions() -> Vec<NodeDefinition<Agent>> {
    vec![
        NodeDefinition::root("Root", NodeKind::Selector),
        sequence("Travel", "Root"),
        inverter("NotArrived", "Travel"),
        NodeDefinition::new("CheckIfArrived", NodeKind::Leaf, Some("NotArrived")),
        NodeDefinition::new("MoveTowardsTarget", NodeKind::Leaf, Some("Travel")),
        sequence("Turnaround", "Root"),
        succeeder("TryRest", "Turnaround"),
        NodeDefinition::new("Rest", NodeKind::Leaf, Some("TryRest")),
        leaf("SwapTarget", "Turnaround", swap_target),
    ]
}

/// Actions for the leaves `patrol_definitions` leaves unbound.
pub fn patrol_bindings(config: &PatrolConfig) -> LeafBindings<Agent> {
    let rest_frames = config.rest_frames;
    let mut rested = 0;

    LeafBindings::new()
        .bind("CheckIfArrived", check_if_arrived)
        .bind("MoveTowardsTarget", move_towards_target)
        .bind("Rest", move |_agent: &mut Agent, leaf| {
            rested += 1;
            if rested >= rest_frames {
                rested = 0;
                leaf.succeed();
            }
        })
}

pub fn build_patrol_tree(
    config: &PatrolConfig,
    tree_config: TreeConfig,
) -> Result<Tree<Agent>, BuildError> {
    TreeBuilder::from_definitions(patrol_definitions())
        .with_bindings(patrol_bindings(config))
        .with_config(tree_config)
        .build()
}

fn check_if_arrived(agent: &mut Agent, leaf: &mut LeafContext<'_>) {
    leaf.report(Status::from(agent.arrived()));
}

fn move_towards_target(agent: &mut Agent, leaf: &mut LeafContext<'_>) {
    agent.step();
    debug!(position = %agent.position, target = %agent.target(), "moved");
    if agent.arrived() {
        leaf.succeed();
    }
}

fn swap_target(agent: &mut Agent, leaf: &mut LeafContext<'_>) {
    agent.swap_target();
    info!(target = %agent.target(), "turning around");
    leaf.succeed();
}
