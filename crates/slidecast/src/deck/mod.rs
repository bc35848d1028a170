use std::collections::BTreeMap;

pub mod builder;
pub mod source;

#[cfg(test)]
mod tests;

pub use builder::{SLIDE_HEIGHT, SLIDE_PADDING, SLIDE_WIDTH, key_for};
pub use source::{DeckMeta, DeckSource};

/// The four navigable directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in the order the layout pass expands neighbors.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Unit offset on the layout plane. Left/right move on x, up/down on y;
    /// y grows downward.
    pub fn unit(&self) -> (f32, f32) {
        match self {
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
        }
    }
}

/// A node's placement on the layout plane, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    /// The position one step away in `direction`, with the given per-axis
    /// step sizes.
    pub fn stepped(&self, direction: Direction, step_x: f32, step_y: f32) -> Position {
        let (ux, uy) = direction.unit();
        Position {
            x: self.x + ux * step_x,
            y: self.y + uy * step_y,
        }
    }
}

/// One navigable slide: an opaque body, up to four neighbor keys, and a
/// layout position. Immutable once its graph is built.
///
/// The default builder produces a left/right chain; up and down exist for
/// non-linear builders and stay empty today.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideNode {
    pub key: String,
    pub body: String,
    pub left: Option<String>,
    pub right: Option<String>,
    pub up: Option<String>,
    pub down: Option<String>,
    pub position: Position,
}

impl SlideNode {
    pub fn neighbor(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Left => self.left.as_deref(),
            Direction::Right => self.right.as_deref(),
            Direction::Up => self.up.as_deref(),
            Direction::Down => self.down.as_deref(),
        }
    }
}

/// A directed adjacency, recorded once when the layout pass first discovers
/// the target node. Used for rendering connections only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideEdge {
    pub from: String,
    pub to: String,
}

/// A built slide graph: keyed nodes, the start key, and the discovered edge
/// list. Rebuilt from scratch whenever the slide list changes.
#[derive(Debug, Clone, Default)]
pub struct SlideGraph {
    nodes: BTreeMap<String, SlideNode>,
    edges: Vec<SlideEdge>,
    start: Option<String>,
}

impl SlideGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Key of the first slide; `None` only for an empty graph.
    pub fn start_key(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn node(&self, key: &str) -> Option<&SlideNode> {
        self.nodes.get(key)
    }

    /// Nodes in key order.
    pub fn nodes(&self) -> impl Iterator<Item = &SlideNode> {
        self.nodes.values()
    }

    /// Edges in discovery order.
    pub fn edges(&self) -> &[SlideEdge] {
        &self.edges
    }

    pub fn neighbor_of(&self, key: &str, direction: Direction) -> Option<&str> {
        self.node(key).and_then(|n| n.neighbor(direction))
    }

    /// Bounding box of all node positions, as `(min, max)` corners. `None`
    /// for an empty graph.
    pub fn bounds(&self) -> Option<(Position, Position)> {
        let mut nodes = self.nodes.values();
        let first = nodes.next()?.position;
        let (mut min, mut max) = (first, first);
        for node in nodes {
            min.x = min.x.min(node.position.x);
            min.y = min.y.min(node.position.y);
            max.x = max.x.max(node.position.x);
            max.y = max.y.max(node.position.y);
        }
        Some((min, max))
    }
}
