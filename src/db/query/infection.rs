//! Budgeted rollouts over whole connected components.
//!
//! A limited infection never splits a component, so coaches and students
//! always end up on the same site version. Components are discovered fresh on
//! every call, a subset is chosen by [`SubsetSelector`], and only once the
//! selection is final is any version written.

use serde::Serialize;
use tracing::info;

use super::selection::{SelectionMode, SubsetSelector};
use crate::db::core::UserGraph;
use crate::error::{GraphError, Result};
use crate::model::{Component, SiteVersion};

/// Summary of a limited infection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfectionReport {
    /// Whether the budget was a ceiling or an exact target.
    pub mode: SelectionMode,
    /// Requested number of users.
    pub budget: usize,
    /// Version served to the selected components.
    pub version: SiteVersion,
    /// Components whose users now run `version`, in discovery order.
    pub selected: Vec<Component>,
    /// Users updated across all selected components.
    pub infected: usize,
}

impl InfectionReport {
    fn untouched(mode: SelectionMode, budget: usize, version: SiteVersion) -> Self {
        Self {
            mode,
            budget,
            version,
            selected: Vec::new(),
            infected: 0,
        }
    }

    /// Whether no component was selected.
    pub fn is_noop(&self) -> bool {
        self.selected.is_empty()
    }
}

impl UserGraph {
    /// Infects whole components totalling as many users as possible without
    /// exceeding `n`.
    pub fn limited_infection(&mut self, n: i64, version: SiteVersion) -> Result<InfectionReport> {
        self.infect_components(n, version, SelectionMode::Maximize)
    }

    /// Infects whole components totalling exactly `n` users.
    ///
    /// Fails with [`GraphError::UnreachableExactSum`] when no combination of
    /// components adds up to `n`; no version is changed in that case.
    pub fn perfect_limited_infection(
        &mut self,
        n: i64,
        version: SiteVersion,
    ) -> Result<InfectionReport> {
        self.infect_components(n, version, SelectionMode::Exact)
    }

    fn infect_components(
        &mut self,
        n: i64,
        version: SiteVersion,
        mode: SelectionMode,
    ) -> Result<InfectionReport> {
        let budget = usize::try_from(n).map_err(|_| {
            GraphError::InvalidArgument(format!("infection budget must be non-negative, got {n}"))
        })?;
        if self.is_empty() || budget == 0 {
            return Ok(InfectionReport::untouched(mode, budget, version));
        }

        let population = self.size();
        if mode == SelectionMode::Exact && self.config.clamp_budget && budget > population {
            return Err(GraphError::UnreachableExactSum {
                budget,
                best: population,
            });
        }
        let capacity = if self.config.clamp_budget {
            budget.min(population)
        } else {
            budget
        };

        let components = self.connected_components();
        let sizes: Vec<usize> = components.iter().map(|c| c.size).collect();
        let selector = SubsetSelector::with_max_cells(self.config.max_table_cells);
        let selection = selector.select(&sizes, capacity, mode)?;
        self.metrics.selector_cells += selection.cells as u64;

        let mut report = InfectionReport::untouched(mode, budget, version);
        for idx in selection.chosen {
            let component = components[idx];
            report.infected += self.total_infection(component.representative, version)?;
            report.selected.push(component);
        }

        info!(
            ?mode,
            budget,
            version,
            components = components.len(),
            selected = report.selected.len(),
            infected = report.infected,
            "limited infection complete"
        );
        Ok(report)
    }
}
