use super::*;

mod chain;
mod determinism;

/// Bodies "Slide 1" … "Slide n".
fn bodies(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("Slide {i}")).collect()
}

fn graph(n: usize) -> SlideGraph {
    SlideGraph::build(&bodies(n))
}

fn position_of(graph: &SlideGraph, key: &str) -> Position {
    graph
        .node(key)
        .unwrap_or_else(|| panic!("missing node {key}"))
        .position
}

/// One layout step on either axis.
fn step() -> f32 {
    SLIDE_WIDTH + SLIDE_PADDING
}
