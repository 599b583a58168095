//! Tree configuration and loaders.
use std::env;

/// Default name of the root node.
pub const ROOT_NAME: &str = "Root";

/// Options applied when a tree is built.
#[derive(Clone, Debug)]
pub struct TreeConfig {
    /// Emit every traversal step as a DEBUG event and forward it to the
    /// installed observer.
    pub trace: bool,
    /// Name the root node is expected to carry.
    pub root_name: String,
}

impl TreeConfig {
    pub fn new() -> Self {
        Self {
            trace: false,
            root_name: ROOT_NAME.to_owned(),
        }
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TICK_TREE_TRACE` - Trace every traversal step (default: false)
    /// - `TICK_TREE_ROOT_NAME` - Expected root node name (default: `Root`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(trace) = read_env::<bool>("TICK_TREE_TRACE") {
            config.trace = trace;
        } else if env::var("TICK_TREE_TRACE").is_ok() {
            // Also accept just setting the variable as "true"
            config.trace = true;
        }

        if let Some(name) = env::var("TICK_TREE_ROOT_NAME")
            .ok()
            .filter(|name| !name.trim().is_empty())
        {
            config.root_name = name.trim().to_owned();
        }

        config
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
