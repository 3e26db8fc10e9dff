use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use tracing::trace;

use crate::db::config::Config;
use crate::db::metrics::PerformanceMetrics;
use crate::error::{GraphError, Result};
use crate::model::{NodeId, SiteVersion, User};

// Tag 0 is reserved for the null handle.
static NEXT_GRAPH_TAG: AtomicU32 = AtomicU32::new(1);

/// An undirected graph of users.
///
/// Users live in an arena indexed by their handle, in insertion order, and
/// adjacency is stored as handle sets on each user. Edges are symmetric:
/// [`add_edge`](Self::add_edge) is the only way to create one and it writes
/// both endpoints.
///
/// Handles are scoped to the graph that issued them. Passing a handle from
/// another graph is rejected like any other non-member.
pub struct UserGraph {
    pub(crate) tag: u32,
    pub(crate) users: Vec<User>,
    pub(crate) label_index: HashMap<String, NodeId>,
    pub(crate) edge_count: usize,
    pub(crate) config: Config,
    /// Counters updated by traversal and selection.
    pub metrics: PerformanceMetrics,
}

impl std::fmt::Debug for UserGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserGraph")
            .field("tag", &self.tag)
            .field("users", &self.users.len())
            .field("edges", &self.edge_count)
            .field("config", &self.config)
            .finish()
    }
}

impl Default for UserGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl UserGraph {
    /// Creates an empty graph with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty graph with `config`.
    pub fn with_config(config: Config) -> Self {
        let tag = match NEXT_GRAPH_TAG.fetch_add(1, Ordering::Relaxed) {
            0 => NEXT_GRAPH_TAG.fetch_add(1, Ordering::Relaxed),
            tag => tag,
        };
        Self {
            tag,
            users: Vec::new(),
            label_index: HashMap::new(),
            edge_count: 0,
            config,
            metrics: PerformanceMetrics::new(),
        }
    }

    /// Configuration the graph was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of users in the graph.
    pub fn size(&self) -> usize {
        self.users.len()
    }

    /// Whether the graph has no users.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Number of distinct undirected edges, self-edges included.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Adds a user labelled `label` currently served `version`.
    ///
    /// Labels identify users: adding a label that is already present returns
    /// the existing handle and leaves that user's version alone.
    pub fn add_user(&mut self, label: impl Into<String>, version: SiteVersion) -> Result<NodeId> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(GraphError::InvalidArgument(
                "user label must not be empty".into(),
            ));
        }
        if let Some(&existing) = self.label_index.get(&label) {
            return Ok(existing);
        }

        let slot = u32::try_from(self.users.len() + 1)
            .map_err(|_| GraphError::InvalidArgument("graph is full".into()))?;
        let id = NodeId::new(self.tag, slot);
        trace!(user = %label, %id, version, "adding user");
        self.label_index.insert(label.clone(), id);
        self.users.push(User::new(id, label, version));
        Ok(id)
    }

    /// Links `u` and `v`. Self-edges and repeated edges are accepted and
    /// collapse into the existing neighbor sets.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<()> {
        let u_idx = self.member_index(u, "edge endpoint")?;
        let v_idx = self.member_index(v, "edge endpoint")?;

        let inserted = self.users[u_idx].neighbors.insert(v);
        self.users[v_idx].neighbors.insert(u);
        if inserted {
            self.edge_count += 1;
            trace!(%u, %v, "adding edge");
        }
        Ok(())
    }

    /// Whether `id` was issued by this graph.
    pub fn contains(&self, id: NodeId) -> bool {
        id.graph() == self.tag && id.slot() >= 1 && id.slot() as usize <= self.users.len()
    }

    /// The user behind `id`, or [`GraphError::NotFound`].
    pub fn user(&self, id: NodeId) -> Result<&User> {
        if !self.contains(id) {
            return Err(GraphError::NotFound("user"));
        }
        Ok(&self.users[Self::index_of(id)])
    }

    /// Current version of `id`.
    pub fn version(&self, id: NodeId) -> Result<SiteVersion> {
        self.user(id).map(|user| user.version)
    }

    /// Label `id` was added under.
    pub fn label(&self, id: NodeId) -> Result<&str> {
        self.user(id).map(|user| user.label.as_str())
    }

    /// Handle of the user labelled `label`, if any.
    pub fn lookup(&self, label: &str) -> Option<NodeId> {
        self.label_index.get(label).copied()
    }

    /// Neighbor handles of `id`, ordered by slot.
    pub fn neighbors(&self, id: NodeId) -> Result<Vec<NodeId>> {
        self.user(id).map(|user| user.neighbors().collect())
    }

    /// Users in insertion order.
    pub fn users(&self) -> impl Iterator<Item = &User> + '_ {
        self.users.iter()
    }

    /// Resolves `id` to its arena slot, rejecting the null handle and
    /// handles this graph never issued.
    pub(crate) fn member_index(&self, id: NodeId, role: &str) -> Result<usize> {
        if id.is_null() {
            return Err(GraphError::InvalidArgument(format!("{role} is a null user")));
        }
        if id.graph() != self.tag {
            return Err(GraphError::InvalidArgument(format!(
                "{role} {id} belongs to a different graph"
            )));
        }
        if !self.contains(id) {
            return Err(GraphError::InvalidArgument(format!(
                "{role} {id} is not a member of the graph"
            )));
        }
        Ok(Self::index_of(id))
    }

    pub(crate) fn index_of(id: NodeId) -> usize {
        (id.slot() - 1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::config::TraversalOrder;
    use crate::model::NULL_NODE_ID;

    #[test]
    fn add_user_assigns_sequential_handles() {
        let mut graph = UserGraph::new();
        let a = graph.add_user("a", 1).unwrap();
        let b = graph.add_user("b", 2).unwrap();
        assert_eq!((a.slot(), b.slot()), (1, 2));
        assert_eq!(graph.size(), 2);
        assert_eq!(graph.version(b).unwrap(), 2);
        assert_eq!(graph.label(a).unwrap(), "a");
    }

    #[test]
    fn add_user_is_idempotent_per_label() {
        let mut graph = UserGraph::new();
        let first = graph.add_user("a", 1).unwrap();
        let again = graph.add_user("a", 99).unwrap();
        assert_eq!(first, again);
        assert_eq!(graph.size(), 1);
        assert_eq!(graph.version(first).unwrap(), 1);
    }

    #[test]
    fn add_user_rejects_blank_label() {
        let mut graph = UserGraph::new();
        assert!(matches!(
            graph.add_user("  ", 1),
            Err(GraphError::InvalidArgument(_))
        ));
        assert!(graph.is_empty());
    }

    #[test]
    fn add_edge_is_symmetric() {
        let mut graph = UserGraph::new();
        let a = graph.add_user("a", 1).unwrap();
        let b = graph.add_user("b", 2).unwrap();
        graph.add_edge(a, b).unwrap();
        assert_eq!(graph.neighbors(a).unwrap(), vec![b]);
        assert_eq!(graph.neighbors(b).unwrap(), vec![a]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn duplicate_and_self_edges_are_tolerated() {
        let mut graph = UserGraph::new();
        let a = graph.add_user("a", 1).unwrap();
        let b = graph.add_user("b", 2).unwrap();
        graph.add_edge(a, b).unwrap();
        graph.add_edge(b, a).unwrap();
        graph.add_edge(a, a).unwrap();
        graph.add_edge(a, a).unwrap();
        assert_eq!(graph.neighbors(a).unwrap(), vec![a, b]);
        assert_eq!(graph.neighbors(b).unwrap(), vec![a]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn add_edge_rejects_null_and_foreign_handles() {
        let mut graph = UserGraph::new();
        let a = graph.add_user("a", 1).unwrap();
        assert!(matches!(
            graph.add_edge(a, NULL_NODE_ID),
            Err(GraphError::InvalidArgument(_))
        ));
        assert!(matches!(
            graph.add_edge(NodeId::new(graph.tag, 7), a),
            Err(GraphError::InvalidArgument(_))
        ));
        assert!(graph.neighbors(a).unwrap().is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn handles_from_another_graph_are_not_members() {
        let mut other = UserGraph::new();
        other.add_user("x", 0).unwrap();
        let foreign = other.add_user("y", 0).unwrap();

        let mut graph = UserGraph::new();
        let a = graph.add_user("a", 1).unwrap();
        let b = graph.add_user("b", 2).unwrap();
        assert_eq!(foreign.slot(), b.slot());
        assert_ne!(foreign, b);
        assert!(!graph.contains(foreign));

        let err = graph.add_edge(a, foreign).unwrap_err();
        assert!(err.to_string().contains("different graph"), "{err}");
        assert!(matches!(graph.user(foreign), Err(GraphError::NotFound("user"))));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn accessors_report_missing_users() {
        let graph = UserGraph::new();
        assert!(matches!(
            graph.user(NodeId::new(graph.tag, 1)),
            Err(GraphError::NotFound("user"))
        ));
        assert!(graph.lookup("nobody").is_none());
    }

    #[test]
    fn keeps_its_config() {
        let graph = UserGraph::with_config(Config::breadth_first());
        assert_eq!(graph.config().traversal, TraversalOrder::BreadthFirst);
        assert_eq!(UserGraph::new().config().traversal, TraversalOrder::DepthFirst);
    }
}
