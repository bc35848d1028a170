use super::*;

/// Build the same deck repeatedly and require byte-identical output: same
/// keys, same adjacency, same positions, same edge order.
fn assert_deterministic(bodies: &[String]) {
    let reference = SlideGraph::build(bodies);
    for run in 0..50 {
        let rebuilt = SlideGraph::build(bodies);
        assert_eq!(rebuilt.len(), reference.len(), "node count drifted (run {run})");
        assert_eq!(rebuilt.start_key(), reference.start_key());
        assert_eq!(rebuilt.edges(), reference.edges(), "edge list drifted (run {run})");
        for node in reference.nodes() {
            let other = rebuilt.node(&node.key).expect("node present in rebuild");
            assert_eq!(other, node, "node {} drifted (run {run})", node.key);
        }
    }
}

#[test]
fn chain_builds_identically_across_runs() {
    assert_deterministic(&bodies(12));
}

#[test]
fn single_node_is_deterministic() {
    assert_deterministic(&bodies(1));
}

#[test]
fn empty_deck_is_deterministic() {
    assert_deterministic(&bodies(0));
}

#[test]
fn builder_is_idempotent_over_its_input() {
    let input = bodies(5);
    let first = SlideGraph::build(&input);
    let second = SlideGraph::build(&input);
    assert_eq!(
        first.nodes().collect::<Vec<_>>(),
        second.nodes().collect::<Vec<_>>()
    );
    assert_eq!(first.edges(), second.edges());
    assert_eq!(first.start_key(), second.start_key());
}
