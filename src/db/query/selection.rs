//! 0/1 subset-sum selection over component sizes.
//!
//! The selector fills a table where row `x` and column `m` record the largest
//! total reachable using only the first `x` sizes without exceeding `m`, along
//! with whether size `x` is part of that optimum. Ties favor inclusion. The
//! chosen subset is recovered by walking the table back from the last row at
//! the full budget.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{GraphError, Result};

/// How the selected total must relate to the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionMode {
    /// Largest total that does not exceed the budget.
    Maximize,
    /// Total equal to the budget, or an error.
    Exact,
}

/// Outcome of a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Zero-based positions of the chosen sizes, ascending.
    pub chosen: Vec<usize>,
    /// Sum of the chosen sizes.
    pub total: usize,
    /// Table cells evaluated to reach this answer.
    pub cells: usize,
}

/// Picks a subset of sizes under a budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsetSelector {
    max_cells: Option<usize>,
}

impl SubsetSelector {
    /// Selector without a table size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects tables with more than `max_cells` cells with
    /// [`GraphError::CapacityExceeded`].
    pub fn with_max_cells(max_cells: Option<usize>) -> Self {
        Self { max_cells }
    }

    /// Dispatches to [`select_max`](Self::select_max) or
    /// [`select_exact`](Self::select_exact).
    pub fn select(&self, sizes: &[usize], budget: usize, mode: SelectionMode) -> Result<Selection> {
        match mode {
            SelectionMode::Maximize => self.select_max(sizes, budget),
            SelectionMode::Exact => self.select_exact(sizes, budget),
        }
    }

    /// Largest-total subset whose sum does not exceed `budget`. Empty when
    /// nothing fits.
    pub fn select_max(&self, sizes: &[usize], budget: usize) -> Result<Selection> {
        if budget == 0 || sizes.is_empty() {
            return Ok(Selection::default());
        }
        let table = SelectionTable::build(sizes, budget, self.max_cells)?;
        let selection = table.reconstruct(sizes);
        debug!(
            components = sizes.len(),
            budget,
            total = selection.total,
            chosen = selection.chosen.len(),
            "selected components"
        );
        Ok(selection)
    }

    /// Subset summing to exactly `budget`. Fails with
    /// [`GraphError::UnreachableExactSum`] when no such subset exists.
    pub fn select_exact(&self, sizes: &[usize], budget: usize) -> Result<Selection> {
        let selection = self.select_max(sizes, budget)?;
        if selection.total != budget {
            warn!(
                budget,
                best = selection.total,
                "no component subset matches budget exactly"
            );
            return Err(GraphError::UnreachableExactSum {
                budget,
                best: selection.total,
            });
        }
        Ok(selection)
    }
}

struct SelectionTable {
    width: usize,
    budget: usize,
    best: usize,
    /// Row-major `(rows + 1) x (budget + 1)` inclusion flags.
    chosen: Vec<bool>,
}

impl SelectionTable {
    fn build(sizes: &[usize], budget: usize, max_cells: Option<usize>) -> Result<Self> {
        let width = budget
            .checked_add(1)
            .ok_or_else(|| GraphError::InvalidArgument(format!("budget {budget} is too large")))?;
        let cells = (sizes.len() + 1)
            .checked_mul(width)
            .ok_or_else(|| GraphError::InvalidArgument(format!("budget {budget} is too large")))?;
        if let Some(limit) = max_cells {
            if cells > limit {
                return Err(GraphError::CapacityExceeded { cells, limit });
            }
        }

        let mut chosen = vec![false; cells];
        // Only the previous row of sums is needed to fill the next one.
        let mut prev = vec![0usize; width];
        let mut row = vec![0usize; width];

        for (x, &size) in sizes.iter().enumerate() {
            let flags = &mut chosen[(x + 1) * width..(x + 2) * width];
            row[0] = 0;
            for m in 1..width {
                let exclude = prev[m];
                let include = (size <= m).then(|| size + prev[m - size]);
                match include {
                    Some(include) if include >= exclude => {
                        row[m] = include;
                        flags[m] = true;
                    }
                    _ => row[m] = exclude,
                }
            }
            std::mem::swap(&mut prev, &mut row);
        }

        Ok(Self {
            width,
            budget,
            best: prev[budget],
            chosen,
        })
    }

    fn reconstruct(&self, sizes: &[usize]) -> Selection {
        let mut m = self.budget;
        let mut picked = Vec::new();
        for x in (1..=sizes.len()).rev() {
            if self.chosen[x * self.width + m] {
                picked.push(x - 1);
                m -= sizes[x - 1];
            }
        }
        picked.reverse();
        debug_assert_eq!(self.budget - m, self.best);
        Selection {
            chosen: picked,
            total: self.best,
            cells: self.chosen.len(),
        }
    }
}
