//! Users, handles and components.

use std::collections::BTreeSet;

use serde::Serialize;

/// Handle issued by [`UserGraph`](crate::UserGraph) for one of its users.
///
/// A handle carries the tag of the graph that issued it, so a graph rejects
/// handles minted by any other graph instead of resolving them to one of its
/// own users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId {
    graph: u32,
    slot: u32,
}

impl NodeId {
    pub(crate) const fn new(graph: u32, slot: u32) -> Self {
        Self { graph, slot }
    }

    pub(crate) fn graph(self) -> u32 {
        self.graph
    }

    /// One-based position of the user in its graph's insertion order.
    pub fn slot(self) -> u32 {
        self.slot
    }

    /// Whether this is [`NULL_NODE_ID`].
    pub fn is_null(self) -> bool {
        self == NULL_NODE_ID
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.graph, self.slot)
    }
}

/// Site version a user is currently served.
pub type SiteVersion = i64;

/// The null handle. Never issued; rejected wherever a member is required.
pub const NULL_NODE_ID: NodeId = NodeId::new(0, 0);

/// A user in the social graph.
///
/// Neighbor links are only ever written through
/// [`UserGraph::add_edge`](crate::UserGraph::add_edge), which updates both
/// endpoints, so a user always appears in each of its neighbors' sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Handle of this user.
    pub id: NodeId,
    /// Unique label the user was added under.
    pub label: String,
    /// Site version the user is currently served.
    pub version: SiteVersion,
    pub(crate) neighbors: BTreeSet<NodeId>,
}

impl User {
    pub(crate) fn new(id: NodeId, label: String, version: SiteVersion) -> Self {
        Self {
            id,
            label,
            version,
            neighbors: BTreeSet::new(),
        }
    }

    /// Neighbor handles in insertion order of the neighbors.
    pub fn neighbors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors.iter().copied()
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

/// A connected component discovered by
/// [`UserGraph::connected_components`](crate::UserGraph::connected_components).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Component {
    /// One-based position in discovery order.
    pub index: usize,
    /// First user of the component reached while scanning the graph.
    pub representative: NodeId,
    /// Number of users in the component.
    pub size: usize,
}
