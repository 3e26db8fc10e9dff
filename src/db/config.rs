/// Frontier discipline used when walking a connected component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// Explicit stack; the most recently discovered user is expanded first.
    #[default]
    DepthFirst,
    /// Queue; users are expanded in discovery order.
    BreadthFirst,
}

/// Tuning knobs for a [`UserGraph`](crate::UserGraph).
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontier discipline for component walks.
    pub traversal: TraversalOrder,
    /// Clamp budgets above the population down to the population before
    /// building the selection table.
    pub clamp_budget: bool,
    /// Refuse to build a selection table with more cells than this.
    pub max_table_cells: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            traversal: TraversalOrder::DepthFirst,
            clamp_budget: true,
            max_table_cells: None,
        }
    }
}

impl Config {
    /// Default settings with breadth-first walks.
    pub fn breadth_first() -> Self {
        Self {
            traversal: TraversalOrder::BreadthFirst,
            ..Self::default()
        }
    }

    /// Default settings with a cap on selection table cells.
    pub fn bounded(max_table_cells: usize) -> Self {
        Self {
            max_table_cells: Some(max_table_cells),
            ..Self::default()
        }
    }
}
