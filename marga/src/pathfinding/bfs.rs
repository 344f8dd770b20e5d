//! Breadth-first route search over the waypoint graph.
//!
//! Edges are unweighted, so the result is shortest in edge count, not in
//! walking distance. Neighbors are expanded in insertion order, which makes
//! the result deterministic for a given construction order.

use log::{debug, trace};
use std::collections::{HashMap, VecDeque};

use crate::error::{Error, Result};
use crate::graph::{WaypointGraph, WaypointId};

/// Find a route from `start` to `destination`.
///
/// Returns `[start]` when both ids are equal.
///
/// # Errors
/// [`Error::NoPath`] if either id is missing from the graph or the two are
/// not connected.
pub fn find_path(
    graph: &WaypointGraph,
    start: WaypointId,
    destination: WaypointId,
) -> Result<Vec<WaypointId>> {
    let no_path = Error::NoPath { start, destination };

    if !graph.contains(start) || !graph.contains(destination) {
        debug!("[BFS] start or destination not in graph");
        return Err(no_path);
    }
    if start == destination {
        return Ok(vec![start]);
    }

    // Parent links double as the visited set
    let mut parents: HashMap<WaypointId, Option<WaypointId>> = HashMap::new();
    let mut queue = VecDeque::new();
    parents.insert(start, None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let Some(waypoint) = graph.get(current) else {
            continue;
        };

        for (neighbor, _) in waypoint.neighbors() {
            if parents.contains_key(&neighbor) || !graph.contains(neighbor) {
                continue;
            }
            parents.insert(neighbor, Some(current));

            if neighbor == destination {
                let path = reconstruct(&parents, destination);
                debug!(
                    "[BFS] found {} hop route after visiting {} waypoints",
                    path.len() - 1,
                    parents.len()
                );
                return Ok(path);
            }
            queue.push_back(neighbor);
        }
        trace!("[BFS] expanded {}, frontier {}", current, queue.len());
    }

    debug!("[BFS] destination unreachable ({} visited)", parents.len());
    Err(no_path)
}

/// Total planar walking distance of a route.
///
/// # Errors
/// [`Error::NotAdjacent`] if two consecutive entries have no direct edge.
pub fn route_length(graph: &WaypointGraph, path: &[WaypointId]) -> Result<f32> {
    path.windows(2).try_fold(0.0, |total: f32, pair| -> Result<f32> {
        let offset = graph.neighbor_offset(pair[0], pair[1])?;
        Ok(total + offset.planar_length())
    })
}

fn reconstruct(
    parents: &HashMap<WaypointId, Option<WaypointId>>,
    destination: WaypointId,
) -> Vec<WaypointId> {
    let mut path = vec![destination];
    let mut cursor = destination;
    while let Some(Some(parent)) = parents.get(&cursor) {
        path.push(*parent);
        cursor = *parent;
    }
    path.reverse();
    path
}
