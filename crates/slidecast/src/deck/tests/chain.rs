use super::*;

#[test]
fn chain_has_n_nodes_and_n_minus_one_edges() {
    for n in 1..=8 {
        let graph = graph(n);
        assert_eq!(graph.len(), n);
        assert_eq!(graph.edges().len(), n - 1, "wrong edge count for n={n}");
    }
}

#[test]
fn keys_are_zero_padded_ordinals() {
    let graph = graph(10);
    let keys: Vec<&str> = graph.nodes().map(|n| n.key.as_str()).collect();
    assert_eq!(
        keys,
        ["01", "02", "03", "04", "05", "06", "07", "08", "09", "10"]
    );
}

#[test]
fn start_key_is_first_slide() {
    assert_eq!(graph(3).start_key(), Some("01"));
}

#[test]
fn left_and_right_are_mutually_inverse() {
    let graph = graph(5);
    for node in graph.nodes() {
        if let Some(right) = node.neighbor(Direction::Right) {
            assert_eq!(
                graph.neighbor_of(right, Direction::Left),
                Some(node.key.as_str()),
                "right neighbor of {} does not point back",
                node.key
            );
        }
        if let Some(left) = node.neighbor(Direction::Left) {
            assert_eq!(
                graph.neighbor_of(left, Direction::Right),
                Some(node.key.as_str()),
                "left neighbor of {} does not point back",
                node.key
            );
        }
    }
}

#[test]
fn interior_node_links_both_ways() {
    let graph = graph(3);
    let middle = graph.node("02").unwrap();
    assert_eq!(middle.left.as_deref(), Some("01"));
    assert_eq!(middle.right.as_deref(), Some("03"));
    assert!(middle.up.is_none());
    assert!(middle.down.is_none());
}

#[test]
fn endpoints_have_one_neighbor() {
    let graph = graph(3);
    let first = graph.node("01").unwrap();
    let last = graph.node("03").unwrap();
    assert!(first.left.is_none());
    assert_eq!(first.right.as_deref(), Some("02"));
    assert_eq!(last.left.as_deref(), Some("02"));
    assert!(last.right.is_none());
}

#[test]
fn single_node_has_no_neighbors() {
    let graph = graph(1);
    let only = graph.node("01").unwrap();
    assert!(only.left.is_none());
    assert!(only.right.is_none());
    assert!(only.up.is_none());
    assert!(only.down.is_none());
    assert!(graph.edges().is_empty());
}

#[test]
fn empty_input_yields_empty_graph() {
    let graph = SlideGraph::build(&[]);
    assert!(graph.is_empty());
    assert_eq!(graph.start_key(), None);
    assert!(graph.edges().is_empty());
    assert!(graph.bounds().is_none());
}

#[test]
fn bodies_kept_in_source_order() {
    let graph = graph(4);
    for (i, key) in ["01", "02", "03", "04"].iter().enumerate() {
        assert_eq!(graph.node(key).unwrap().body, format!("Slide {}", i + 1));
    }
}

#[test]
fn neighbor_keys_reference_existing_nodes() {
    let graph = graph(6);
    for node in graph.nodes() {
        for direction in Direction::ALL {
            if let Some(neighbor) = node.neighbor(direction) {
                assert!(
                    graph.contains(neighbor),
                    "{} points at missing node {neighbor}",
                    node.key
                );
            }
        }
    }
}

#[test]
fn direction_opposites_pair_up() {
    for direction in Direction::ALL {
        assert_eq!(direction.opposite().opposite(), direction);
    }
    assert_eq!(Direction::Left.opposite(), Direction::Right);
    assert_eq!(Direction::Up.opposite(), Direction::Down);
}
