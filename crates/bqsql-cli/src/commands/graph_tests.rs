use super::graph::DependencyGraph;

#[test]
fn dot_output_groups_edges_by_destination() {
    let graph: DependencyGraph = [("a", "x"), ("b", "a"), ("a", "y"), ("a", "x")]
        .into_iter()
        .collect();

    assert_eq!(graph.len(), 3);
    insta::assert_snapshot!(graph.to_dot(), @r#"
    digraph connections {
    "a" -> "x";
    "a" -> "y";
    "b" -> "a";
    }
    "#);
}

#[test]
fn empty_graph() {
    let graph = DependencyGraph::new();

    assert!(graph.is_empty());
    assert_eq!(graph.to_dot(), "digraph connections {\n}\n");
}

#[test]
fn minimise_drops_implied_edges() {
    let mut graph: DependencyGraph = [("c", "b"), ("b", "a"), ("c", "a"), ("d", "c"), ("d", "a")]
        .into_iter()
        .collect();

    graph.minimise();

    assert_eq!(
        graph.edges().collect::<Vec<_>>(),
        [("c", "b"), ("b", "a"), ("d", "c")]
    );
}

#[test]
fn minimise_keeps_independent_edges() {
    let mut graph: DependencyGraph = [("r", "x"), ("r", "y"), ("s", "x")].into_iter().collect();
    let before = graph.clone();

    graph.minimise();

    assert_eq!(graph, before);
}

#[test]
fn minimise_keeps_cycles_connected() {
    let mut graph: DependencyGraph = [("a", "b"), ("b", "c"), ("c", "a"), ("a", "c")]
        .into_iter()
        .collect();

    graph.minimise();

    assert_eq!(
        graph.edges().collect::<Vec<_>>(),
        [("a", "b"), ("b", "c"), ("c", "a")]
    );
}

#[test]
fn minimise_keeps_self_loops() {
    let mut graph: DependencyGraph = [("t", "t"), ("t", "s")].into_iter().collect();

    graph.minimise();

    assert_eq!(graph.len(), 2);
}

#[test]
fn names_with_quotes_are_escaped() {
    let graph: DependencyGraph = [("a\"b", "c")].into_iter().collect();

    assert_eq!(graph.to_dot(), "digraph connections {\n\"a\\\"b\" -> \"c\";\n}\n");
}

#[test]
fn only_quotes_and_backslashes_are_escaped() {
    let graph: DependencyGraph = [("ds.a\\b", "caf\u{e9}\u{1b}\n")].into_iter().collect();

    assert_eq!(
        graph.to_dot(),
        "digraph connections {\n\"ds.a\\\\b\" -> \"caf\u{e9}\u{1b}\n\";\n}\n"
    );
}
