use std::collections::{BTreeMap, HashSet};

use super::{Direction, Position, SlideEdge, SlideGraph, SlideNode};

/// Footprint of one slide on the layout plane, in layout units.
pub const SLIDE_WIDTH: f32 = 600.0;
pub const SLIDE_HEIGHT: f32 = 600.0;
/// Gap between adjacent slides.
pub const SLIDE_PADDING: f32 = 100.0;

const STEP_X: f32 = SLIDE_WIDTH + SLIDE_PADDING;
const STEP_Y: f32 = SLIDE_HEIGHT + SLIDE_PADDING;

/// Key for the slide at `index` in source order: a 1-based zero-padded
/// ordinal ("01", "02", …). Lexically sortable; past 99 the ordinal simply
/// grows a digit.
pub fn key_for(index: usize) -> String {
    format!("{:02}", index + 1)
}

impl SlideGraph {
    /// Build the linear chain graph for an ordered list of slide bodies.
    ///
    /// Each slide gets its ordinal key and left/right links to its source
    /// neighbors, then a depth-first pass from the first slide assigns
    /// every node exactly one position and records one edge per discovered
    /// adjacency. An empty list yields an empty graph with no start key.
    pub fn build(bodies: &[String]) -> SlideGraph {
        let mut nodes = BTreeMap::new();
        for (i, body) in bodies.iter().enumerate() {
            let key = key_for(i);
            let left = (i > 0).then(|| key_for(i - 1));
            let right = (i + 1 < bodies.len()).then(|| key_for(i + 1));
            nodes.insert(
                key.clone(),
                SlideNode {
                    key,
                    body: body.clone(),
                    left,
                    right,
                    up: None,
                    down: None,
                    position: Position::ORIGIN,
                },
            );
        }

        let start = (!bodies.is_empty()).then(|| key_for(0));
        let edges = place_nodes(&mut nodes, start.as_deref());

        SlideGraph {
            nodes,
            edges,
            start,
        }
    }
}

/// Walk the graph depth-first from the start key. A node's position and its
/// incoming edge are recorded the moment it is first discovered; the seen
/// set covers placed and queued keys alike, so no node is ever placed twice
/// even if a future builder introduces cycles.
fn place_nodes(nodes: &mut BTreeMap<String, SlideNode>, start: Option<&str>) -> Vec<SlideEdge> {
    let mut edges = Vec::new();
    let Some(start) = start else {
        return edges;
    };
    if !nodes.contains_key(start) {
        return edges;
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut stack: Vec<String> = Vec::new();
    seen.insert(start.to_string());
    stack.push(start.to_string());

    while let Some(key) = stack.pop() {
        let Some(node) = nodes.get(&key) else {
            continue;
        };
        let at = node.position;
        let neighbors: Vec<(Direction, String)> = Direction::ALL
            .iter()
            .filter_map(|&d| node.neighbor(d).map(|n| (d, n.to_string())))
            .collect();

        for (direction, next) in neighbors {
            if !seen.insert(next.clone()) {
                continue;
            }
            let Some(neighbor) = nodes.get_mut(&next) else {
                continue;
            };
            neighbor.position = at.stepped(direction, STEP_X, STEP_Y);
            edges.push(SlideEdge {
                from: key.clone(),
                to: next.clone(),
            });
            stack.push(next);
        }
    }

    edges
}
