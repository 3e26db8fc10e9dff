use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::{Config, UserGraph};
use crate::error::{GraphError, Result};
use crate::model::{NodeId, SiteVersion};

/// A user entry in a graph file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique user label.
    pub id: String,
    /// Site version the user is currently served.
    #[serde(default)]
    pub version: SiteVersion,
}

/// On-disk JSON shape of a user graph.
///
/// ```json
/// {"users": [{"id": "a", "version": 1}], "edges": [["a", "b"]]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphFile {
    /// Users in insertion order.
    #[serde(default)]
    pub users: Vec<UserRecord>,
    /// Undirected edges as label pairs.
    #[serde(default)]
    pub edges: Vec<(String, String)>,
}

/// Summary statistics from an import operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Distinct users added to the graph.
    pub users_imported: usize,
    /// Edge records applied, duplicates included.
    pub edges_imported: usize,
}

impl GraphFile {
    /// Captures the users and edges of `graph`. Each undirected edge is
    /// emitted once.
    pub fn from_graph(graph: &UserGraph) -> Result<Self> {
        let users = graph
            .users()
            .map(|user| UserRecord {
                id: user.label.clone(),
                version: user.version,
            })
            .collect();
        let mut edges = Vec::with_capacity(graph.edge_count());
        for user in graph.users() {
            for neighbor in user.neighbors().filter(|&n| n >= user.id) {
                let other = graph.label(neighbor)?;
                edges.push((user.label.clone(), other.to_string()));
            }
        }
        Ok(Self { users, edges })
    }

    /// Builds a graph from this description.
    ///
    /// User ids must be unique and edges may only name users listed in
    /// `users`.
    pub fn into_graph(self, config: Config) -> Result<(UserGraph, ImportSummary)> {
        let mut graph = UserGraph::with_config(config);
        for record in self.users {
            if graph.lookup(&record.id).is_some() {
                return Err(GraphError::InvalidArgument(format!(
                    "user '{}' is listed more than once",
                    record.id
                )));
            }
            graph.add_user(record.id, record.version)?;
        }
        let mut summary = ImportSummary {
            users_imported: graph.size(),
            edges_imported: 0,
        };
        for (u, v) in self.edges {
            let u_id = resolve(&graph, &u)?;
            let v_id = resolve(&graph, &v)?;
            graph.add_edge(u_id, v_id)?;
            summary.edges_imported += 1;
        }
        Ok((graph, summary))
    }
}

fn resolve(graph: &UserGraph, label: &str) -> Result<NodeId> {
    graph.lookup(label).ok_or_else(|| {
        GraphError::InvalidArgument(format!("edge references unknown user '{label}'"))
    })
}

/// Parses a JSON graph description.
pub fn parse_graph(json: &str, config: Config) -> Result<(UserGraph, ImportSummary)> {
    let file: GraphFile = serde_json::from_str(json)?;
    file.into_graph(config)
}

/// Reads and parses the JSON graph description at `path`.
pub fn run_import(path: &Path, config: Config) -> Result<(UserGraph, ImportSummary)> {
    let raw = fs::read_to_string(path)?;
    let (graph, summary) = parse_graph(&raw, config)?;
    debug!(
        path = %path.display(),
        users = summary.users_imported,
        edges = summary.edges_imported,
        "imported graph"
    );
    Ok((graph, summary))
}

/// Writes `graph` to `path` as pretty-printed JSON.
pub fn run_export(path: &Path, graph: &UserGraph) -> Result<()> {
    let json = serde_json::to_string_pretty(&GraphFile::from_graph(graph)?)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}
