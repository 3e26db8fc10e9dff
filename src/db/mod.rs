//! The in-memory user graph, its configuration and its rollouts.

mod config;
mod core;
mod metrics;
pub mod query;


pub use config::{Config, TraversalOrder};
pub use self::core::UserGraph;
pub use metrics::PerformanceMetrics;
pub use query::infection::InfectionReport;
pub use query::selection::{Selection, SelectionMode, SubsetSelector};
