/// Work counters accumulated by a [`UserGraph`](crate::UserGraph).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceMetrics {
    /// Users popped off a traversal frontier.
    pub node_visits: u64,
    /// Neighbor links inspected during traversal.
    pub edge_traversals: u64,
    /// Completed total infections.
    pub propagations: u64,
    /// Components reported by discovery.
    pub components_found: u64,
    /// Selection table cells allocated.
    pub selector_cells: u64,
}

impl PerformanceMetrics {
    /// Zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Human-readable multi-line summary.
    pub fn report(&self) -> String {
        format!(
            "=== Performance Metrics ===\n\
             Node Visits:          {}\n\
             Edge Traversals:      {}\n\
             Propagations:         {}\n\
             Components Found:     {}\n\
             Selector Cells:       {}",
            self.node_visits,
            self.edge_traversals,
            self.propagations,
            self.components_found,
            self.selector_cells,
        )
    }
}
