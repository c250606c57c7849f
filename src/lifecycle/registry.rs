//! Leveled, order-preserving store of started actions.

use std::collections::HashMap;
use std::sync::Arc;

use crate::lifecycle::action::Action;
use crate::lifecycle::level::Level;

/// Actions grouped by level.
///
/// The map is storage only. Traversal walks `order`, so shutdown never
/// depends on the map's iteration order.
pub struct Registry {
    levels: HashMap<Level, Vec<Arc<dyn Action>>>,
    order: [Level; 3],
}

impl Registry {
    pub fn new() -> Self {
        Self {
            levels: HashMap::new(),
            order: Level::SHUTDOWN_ORDER,
        }
    }

    /// Append an action to the end of its level. Duplicates are kept.
    pub fn add(&mut self, action: Arc<dyn Action>, level: Level) {
        self.levels.entry(level).or_default().push(action);
    }

    /// Every level in shutdown order, including empty ones.
    pub fn traversal(&self) -> Vec<(Level, &[Arc<dyn Action>])> {
        self.order
            .iter()
            .map(|level| {
                let actions = self.levels.get(level).map(Vec::as_slice).unwrap_or(&[]);
                (*level, actions)
            })
            .collect()
    }

    /// Actions registered under `level`, in registration order.
    pub fn actions(&self, level: Level) -> &[Arc<dyn Action>] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.levels.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
