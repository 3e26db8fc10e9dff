mod components;
mod traversal;
mod user_graph;

pub use user_graph::UserGraph;
