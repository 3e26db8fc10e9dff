use tracing::debug;

use super::user_graph::UserGraph;
use crate::model::Component;

impl UserGraph {
    /// Partitions the graph into connected components.
    ///
    /// Users are scanned in insertion order; each unvisited user starts a new
    /// component and becomes its representative. Components are numbered from
    /// one in that order, so the result is stable for a given sequence of
    /// `add_user`/`add_edge` calls. Nothing is cached between calls.
    pub fn connected_components(&mut self) -> Vec<Component> {
        let mut visited = vec![false; self.users.len()];
        let mut components = Vec::new();

        for idx in 0..self.users.len() {
            if visited[idx] {
                continue;
            }
            let size = self.walk_component(idx, &mut visited).len();
            components.push(Component {
                index: components.len() + 1,
                representative: self.users[idx].id,
                size,
            });
        }

        self.metrics.components_found += components.len() as u64;
        debug!(
            users = self.users.len(),
            components = components.len(),
            "discovered connected components"
        );
        components
    }
}
