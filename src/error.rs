//! Error handling for Contagion operations.
//!
//! Every public API returns `Result<T, GraphError>`. Failures are reported
//! before the graph is mutated, so a returned error always means the user
//! versions are exactly as they were before the call.
//!
//! # Error Types
//!
//! - [`GraphError`] - Main error enum with variants for different failure modes
//! - [`Result`] - Result type alias for convenience
//!
//! # Error Handling Pattern
//!
//! ```rust
//! use contagion::{GraphError, Result, UserGraph};
//!
//! fn rollout(graph: &mut UserGraph) -> Result<()> {
//!     match graph.perfect_limited_infection(4, 10) {
//!         Ok(report) => println!("infected {} users", report.infected),
//!         Err(GraphError::UnreachableExactSum { best, .. }) => {
//!             graph.limited_infection(best as i64, 10)?;
//!         }
//!         Err(err) => return Err(err),
//!     }
//!     Ok(())
//! }
//! ```

use std::io;
use thiserror::Error;

/// Result type for Contagion operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur while building or infecting a user graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Invalid argument or operation.
    ///
    /// This occurs for various reasons:
    /// - A null node handle or a handle the graph never issued
    /// - A blank user label
    /// - A negative infection budget
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Requested user was not found.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// No combination of connected components sums exactly to the budget.
    ///
    /// `best` is the largest reachable total that does not exceed `budget`.
    #[error("no subset of components sums exactly to {budget} (closest is {best})")]
    UnreachableExactSum {
        /// Requested number of users.
        budget: usize,
        /// Largest achievable total not exceeding the budget.
        best: usize,
    },

    /// The selection table would exceed the configured cell limit.
    #[error("selection table of {cells} cells exceeds limit of {limit}")]
    CapacityExceeded {
        /// Cells the table would need.
        cells: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// I/O error while reading or writing a graph file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error decoding or encoding a graph file.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Serialization(err.to_string())
    }
}
