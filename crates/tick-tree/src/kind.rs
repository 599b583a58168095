//! Node kinds and their child-count rules.

use std::ops::RangeInclusive;

/// The closed set of node kinds a tree is built from.
///
/// Kinds can be parsed from text (`"selector"`, `"Inverter"`, ...) so an
/// authoring layer may describe trees without depending on this enum directly.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NodeKind {
    /// Terminal node running an externally bound action.
    Leaf,
    /// Priority selector: succeeds on the first child success (OR).
    Selector,
    /// Sequence: fails on the first child failure (AND).
    Sequence,
    /// Decorator flipping its child's outcome (NOT).
    Inverter,
    /// Decorator reporting success whatever its child reports.
    Succeeder,
}

impl NodeKind {
    /// Allowed number of children for this kind.
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            NodeKind::Leaf => 0..=0,
            NodeKind::Selector | NodeKind::Sequence => 1..=usize::MAX,
            NodeKind::Inverter | NodeKind::Succeeder => 1..=1,
        }
    }

    /// Returns `true` for `Selector` and `Sequence`.
    #[inline]
    pub fn is_composite(self) -> bool {
        matches!(self, NodeKind::Selector | NodeKind::Sequence)
    }

    /// Returns `true` for `Inverter` and `Succeeder`.
    #[inline]
    pub fn is_decorator(self) -> bool {
        matches!(self, NodeKind::Inverter | NodeKind::Succeeder)
    }

    /// Returns `true` for `Leaf`.
    #[inline]
    pub fn is_leaf(self) -> bool {
        matches!(self, NodeKind::Leaf)
    }
}
