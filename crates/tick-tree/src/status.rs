//! Status reported by leaf actions and threaded through a tick.

/// The outcome of a leaf action, or of the subtree a tick just left.
///
/// # Resumable Semantics
///
/// Unlike a turn-based tree where every node finishes within one tick, a
/// leaf here may need several ticks to conclude:
/// - `Success` / `Failure` end the leaf and propagate to its parent
/// - `Running` suspends the whole tick; the same leaf is resumed next tick
///
/// `Running` also serves as the "unset" value: a tick starts with a
/// `Running` result, and a leaf that reports nothing is still running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Status {
    /// The node completed successfully.
    ///
    /// For conditions: the condition was met.
    /// For actions: the action finished without errors.
    Success,

    /// The node failed.
    ///
    /// For conditions: the condition was not met.
    /// For actions: the action could not be carried out.
    Failure,

    /// The node has not concluded yet.
    #[default]
    Running,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Returns `true` if the status is a final outcome (`Success` or `Failure`).
    #[inline]
    pub fn is_done(self) -> bool {
        !self.is_running()
    }

    /// Inverts the status: Success becomes Failure and vice versa.
    ///
    /// `Running` has no opposite and is returned unchanged.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            Status::Running => Status::Running,
        }
    }
}

impl From<bool> for Status {
    fn from(ok: bool) -> Self {
        if ok { Status::Success } else { Status::Failure }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_swaps_final_outcomes_only() {
        assert_eq!(Status::Success.invert(), Status::Failure);
        assert_eq!(Status::Failure.invert(), Status::Success);
        assert_eq!(Status::Running.invert(), Status::Running);
    }

    #[test]
    fn default_is_unset() {
        assert!(Status::default().is_running());
        assert!(!Status::default().is_done());
    }

    #[test]
    fn displays_in_snake_case() {
        assert_eq!(Status::Success.to_string(), "success");
        assert_eq!(Status::Running.as_ref(), "running");
    }

    #[test]
    fn converts_from_bool() {
        assert_eq!(Status::from(true), Status::Success);
        assert_eq!(Status::from(false), Status::Failure);
    }
}
