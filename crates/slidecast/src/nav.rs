use crate::deck::{Direction, SlideGraph};

/// A navigation request, from keyboard, pointer, or the autoplay timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Step to the neighbor in a direction; a no-op at the graph boundary.
    Move(Direction),
    /// Jump to an arbitrary node, as from a pointer click.
    Select(String),
    /// Step right, wrapping to the start key at the end of the chain.
    Advance,
}

/// Request to center the viewport on a node. Idempotent: issuing it twice
/// for the same key is harmless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenterOn {
    pub key: String,
}

/// Owns the current slide key. Everything else submits intents and reads;
/// nothing outside this type writes the key.
///
/// The graph is passed into every call rather than stored, so each intent
/// is resolved against whatever graph is live at that moment.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: Option<String>,
}

impl Navigator {
    pub fn new(graph: &SlideGraph) -> Navigator {
        Navigator {
            current: graph.start_key().map(String::from),
        }
    }

    /// The effective current key: the stored key while the graph still has
    /// it, otherwise the graph's start key. `None` only for an empty graph.
    pub fn current_key<'a>(&'a self, graph: &'a SlideGraph) -> Option<&'a str> {
        match &self.current {
            Some(key) if graph.contains(key) => Some(key),
            _ => graph.start_key(),
        }
    }

    /// Apply one intent against the live graph.
    ///
    /// Returns the centering effect when the intent lands on a node, `None`
    /// for a boundary no-op or an empty graph. A stale stored key falls
    /// back to the start key before the intent applies; a `Select` of a key
    /// the graph no longer has recovers the same way.
    pub fn submit(&mut self, intent: Intent, graph: &SlideGraph) -> Option<CenterOn> {
        let current = self.current_key(graph)?.to_string();
        self.current = Some(current.clone());

        let destination = match intent {
            Intent::Move(direction) => graph.neighbor_of(&current, direction)?.to_string(),
            Intent::Select(key) => {
                if graph.contains(&key) {
                    key
                } else {
                    graph.start_key()?.to_string()
                }
            }
            Intent::Advance => match graph.neighbor_of(&current, Direction::Right) {
                Some(right) => right.to_string(),
                None => graph.start_key()?.to_string(),
            },
        };

        self.current = Some(destination.clone());
        Some(CenterOn { key: destination })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: usize) -> SlideGraph {
        let bodies: Vec<String> = (1..=n).map(|i| format!("Slide {i}")).collect();
        SlideGraph::build(&bodies)
    }

    fn center(key: &str) -> Option<CenterOn> {
        Some(CenterOn {
            key: key.to_string(),
        })
    }

    #[test]
    fn test_starts_at_start_key() {
        let graph = chain(3);
        let nav = Navigator::new(&graph);
        assert_eq!(nav.current_key(&graph), Some("01"));
    }

    #[test]
    fn test_right_walk_stops_at_boundary() {
        // 01 -> 02 -> 03, then a third right is a no-op.
        let graph = chain(3);
        let mut nav = Navigator::new(&graph);
        assert_eq!(nav.submit(Intent::Move(Direction::Right), &graph), center("02"));
        assert_eq!(nav.submit(Intent::Move(Direction::Right), &graph), center("03"));
        assert_eq!(nav.submit(Intent::Move(Direction::Right), &graph), None);
        assert_eq!(nav.current_key(&graph), Some("03"));
        assert_eq!(nav.submit(Intent::Move(Direction::Left), &graph), center("02"));
    }

    #[test]
    fn test_boundary_no_op_emits_no_effect() {
        let graph = chain(2);
        let mut nav = Navigator::new(&graph);
        assert_eq!(nav.submit(Intent::Move(Direction::Left), &graph), None);
        assert_eq!(nav.submit(Intent::Move(Direction::Up), &graph), None);
        assert_eq!(nav.submit(Intent::Move(Direction::Down), &graph), None);
        assert_eq!(nav.current_key(&graph), Some("01"));
    }

    #[test]
    fn test_select_jumps_non_locally() {
        let graph = chain(5);
        let mut nav = Navigator::new(&graph);
        assert_eq!(nav.submit(Intent::Select("04".into()), &graph), center("04"));
        assert_eq!(nav.current_key(&graph), Some("04"));
    }

    #[test]
    fn test_select_absent_key_recovers_to_start() {
        let graph = chain(2);
        let mut nav = Navigator::new(&graph);
        nav.submit(Intent::Select("02".into()), &graph);
        assert_eq!(nav.submit(Intent::Select("09".into()), &graph), center("01"));
        assert_eq!(nav.current_key(&graph), Some("01"));
    }

    #[test]
    fn test_advance_steps_right() {
        let graph = chain(3);
        let mut nav = Navigator::new(&graph);
        assert_eq!(nav.submit(Intent::Advance, &graph), center("02"));
        assert_eq!(nav.submit(Intent::Advance, &graph), center("03"));
    }

    #[test]
    fn test_advance_wraps_to_start_with_effect() {
        // At the end of the chain the advance wraps instead of stalling.
        let graph = chain(3);
        let mut nav = Navigator::new(&graph);
        nav.submit(Intent::Select("03".into()), &graph);
        assert_eq!(nav.submit(Intent::Advance, &graph), center("01"));
        assert_eq!(nav.current_key(&graph), Some("01"));
    }

    #[test]
    fn test_advance_on_single_node_wraps_in_place() {
        let graph = chain(1);
        let mut nav = Navigator::new(&graph);
        assert_eq!(nav.submit(Intent::Advance, &graph), center("01"));
        assert_eq!(nav.current_key(&graph), Some("01"));
    }

    #[test]
    fn test_stale_current_key_resolves_to_start() {
        // Key "07" survives from a larger graph; against the shrunken one
        // the effective key is the start, never a dangling reference.
        let old = chain(7);
        let mut nav = Navigator::new(&old);
        nav.submit(Intent::Select("07".into()), &old);

        let new = chain(2);
        assert_eq!(nav.current_key(&new), Some("01"));
        assert_eq!(nav.submit(Intent::Advance, &new), center("02"));
    }

    #[test]
    fn test_empty_graph_ignores_every_intent() {
        let graph = chain(0);
        let mut nav = Navigator::new(&graph);
        assert_eq!(nav.current_key(&graph), None);
        assert_eq!(nav.submit(Intent::Move(Direction::Right), &graph), None);
        assert_eq!(nav.submit(Intent::Advance, &graph), None);
        assert_eq!(nav.submit(Intent::Select("01".into()), &graph), None);
    }
}
