//! Route planning over the waypoint graph.

mod bfs;

pub use bfs::{find_path, route_length};
