use std::collections::VecDeque;

use tracing::debug;

use super::user_graph::UserGraph;
use crate::db::config::TraversalOrder;
use crate::error::Result;
use crate::model::{NodeId, SiteVersion};

impl UserGraph {
    /// Serves `version` to every user reachable from `start`.
    ///
    /// Returns the number of users updated. Users outside the component of
    /// `start` keep their current version.
    pub fn total_infection(&mut self, start: NodeId, version: SiteVersion) -> Result<usize> {
        let start_idx = self.member_index(start, "start user")?;
        let mut visited = vec![false; self.users.len()];
        let reached = self.walk_component(start_idx, &mut visited);
        for &idx in &reached {
            self.users[idx].version = version;
        }
        self.metrics.propagations += 1;
        debug!(%start, version, reached = reached.len(), "propagated version");
        Ok(reached.len())
    }

    /// Handles of every user in the component of `start`, in visit order.
    pub fn reachable(&mut self, start: NodeId) -> Result<Vec<NodeId>> {
        let start_idx = self.member_index(start, "start user")?;
        let mut visited = vec![false; self.users.len()];
        Ok(self
            .walk_component(start_idx, &mut visited)
            .into_iter()
            .map(|idx| self.users[idx].id)
            .collect())
    }

    /// Visits every unvisited arena slot reachable from `start_idx`, marking
    /// each in `visited`. The frontier is explicit so large components never
    /// deepen the call stack.
    pub(crate) fn walk_component(&mut self, start_idx: usize, visited: &mut [bool]) -> Vec<usize> {
        let users = &self.users;
        let metrics = &mut self.metrics;
        let depth_first = self.config.traversal == TraversalOrder::DepthFirst;

        let mut frontier = VecDeque::new();
        let mut members = Vec::new();
        if visited[start_idx] {
            return members;
        }
        visited[start_idx] = true;
        frontier.push_back(start_idx);

        while let Some(idx) = if depth_first {
            frontier.pop_back()
        } else {
            frontier.pop_front()
        } {
            members.push(idx);
            metrics.node_visits += 1;
            for neighbor in users[idx].neighbors() {
                metrics.edge_traversals += 1;
                let next = Self::index_of(neighbor);
                if !visited[next] {
                    visited[next] = true;
                    frontier.push_back(next);
                }
            }
        }
        members
    }
}
