//! Contagion propagates a site version across a social graph of users.
//!
//! Users connected by coaching relationships form connected components, and a
//! rollout always covers whole components so related users see the same site.
//! [`UserGraph`] stores users and symmetric edges and exposes three rollouts:
//!
//! - [`UserGraph::total_infection`] floods one user's entire component.
//! - [`UserGraph::limited_infection`] picks components covering as many users
//!   as possible without exceeding a budget.
//! - [`UserGraph::perfect_limited_infection`] picks components covering
//!   exactly the budget, or fails without touching the graph.
//!
//! ```rust
//! use contagion::UserGraph;
//!
//! # fn main() -> contagion::Result<()> {
//! let mut graph = UserGraph::new();
//! let coach = graph.add_user("coach", 1)?;
//! let student = graph.add_user("student", 1)?;
//! let loner = graph.add_user("loner", 1)?;
//! graph.add_edge(coach, student)?;
//!
//! let report = graph.limited_infection(2, 2)?;
//! assert_eq!(report.infected, 2);
//! assert_eq!(graph.version(student)?, 2);
//! assert_eq!(graph.version(loner)?, 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;

pub use db::{
    Config, InfectionReport, PerformanceMetrics, Selection, SelectionMode, SubsetSelector,
    TraversalOrder, UserGraph,
};
pub use error::{GraphError, Result};
pub use model::{Component, NodeId, SiteVersion, User, NULL_NODE_ID};
