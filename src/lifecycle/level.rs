//! Shutdown priority levels.

use std::fmt;

/// Priority group controlling shutdown order.
///
/// `High` is stopped first, `Low` last. Levels are ordinal keys only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Low,
    Mid,
    High,
}

impl Level {
    /// Fixed traversal order used at shutdown.
    pub const SHUTDOWN_ORDER: [Level; 3] = [Level::High, Level::Mid, Level::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Mid => "mid",
            Level::High => "high",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
