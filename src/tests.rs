#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use petgraph::graph::UnGraph;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    use crate::{
        total_coloring, total_coloring_incremental, validate_coloring, Backend, ColorId,
        ColoringError, TotalColoring,
    };

    type ColorGraph = UnGraph<Option<ColorId>, Option<ColorId>>;

    fn complete_graph(n: usize) -> ColorGraph {
        let mut graph = ColorGraph::new_undirected();
        let nodes = (0..n).map(|_| graph.add_node(None)).collect_vec();
        for (&u, &v) in nodes.iter().tuple_combinations() {
            graph.add_edge(u, v, None);
        }
        graph
    }

    fn cycle_graph(n: usize) -> ColorGraph {
        let mut graph = ColorGraph::new_undirected();
        let nodes = (0..n).map(|_| graph.add_node(None)).collect_vec();
        for i in 0..n {
            graph.add_edge(nodes[i], nodes[(i + 1) % n], None);
        }
        graph
    }

    fn star_graph(leaves: usize) -> ColorGraph {
        let mut graph = ColorGraph::new_undirected();
        let center = graph.add_node(None);
        for _ in 0..leaves {
            let leaf = graph.add_node(None);
            graph.add_edge(center, leaf, None);
        }
        graph
    }

    fn complete_bipartite(a: usize, b: usize) -> ColorGraph {
        let mut graph = ColorGraph::new_undirected();
        let left = (0..a).map(|_| graph.add_node(None)).collect_vec();
        let right = (0..b).map(|_| graph.add_node(None)).collect_vec();
        for &u in &left {
            for &v in &right {
                graph.add_edge(u, v, None);
            }
        }
        graph
    }

    fn max_degree(graph: &ColorGraph) -> usize {
        graph
            .node_indices()
            .map(|v| graph.edges(v).count())
            .max()
            .unwrap_or(0)
    }

    /// Run one configuration and check the returned count plus every invariant a caller
    /// may rely on: the coloring validates, colors lie in `[0, count)`, and the count
    /// respects the `max_degree + 1` lower bound.
    fn solve_and_check(mut graph: ColorGraph, backend: Backend, incremental: bool, expected: usize) {
        let count = TotalColoring::new(backend)
            .incremental(incremental)
            .seed(99)
            .run(&mut graph)
            .unwrap();
        assert_eq!(count, expected, "{backend} incremental={incremental}");
        assert!(
            validate_coloring(&graph),
            "{backend} incremental={incremental} produced an invalid coloring"
        );
        assert!(count >= max_degree(&graph) + 1);
        for vertex in graph.node_indices() {
            assert!(graph[vertex].unwrap() < count);
        }
        for edge in graph.edge_indices() {
            assert!(graph[edge].unwrap() < count);
        }
    }

    /// Both backends and both modes must agree on the color count.
    fn sweep_all(make: impl Fn() -> ColorGraph, expected: usize) {
        for backend in Backend::iter() {
            for incremental in [false, true] {
                solve_and_check(make(), backend, incremental, expected);
            }
        }
    }

    #[test]
    fn triangle_needs_three() {
        sweep_all(|| complete_graph(3), 3);
    }

    #[test]
    fn complete_five_needs_five() {
        sweep_all(|| complete_graph(5), 5);
    }

    #[test]
    fn five_cycle_needs_four() {
        sweep_all(|| cycle_graph(5), 4);
    }

    #[test]
    fn fourteen_cycle_needs_four() {
        sweep_all(|| cycle_graph(14), 4);
    }

    #[test]
    fn star_with_four_leaves_needs_five() {
        sweep_all(|| star_graph(4), 5);
    }

    #[test]
    fn complete_bipartite_4_4_needs_six() {
        sweep_all(|| complete_bipartite(4, 4), 6);
    }

    #[test]
    fn star_with_fifty_leaves_needs_fifty_one() {
        sweep_all(|| star_graph(50), 51);
    }

    #[test]
    fn isolated_vertex_needs_one() {
        sweep_all(
            || {
                let mut graph = ColorGraph::new_undirected();
                graph.add_node(None);
                graph
            },
            1,
        );
    }

    #[test]
    fn empty_graph_is_degenerate_success() {
        for backend in Backend::iter() {
            let mut graph = ColorGraph::new_undirected();
            assert_eq!(total_coloring(&mut graph, backend).unwrap(), 0);
            assert_eq!(total_coloring_incremental(&mut graph, backend).unwrap(), 0);
        }
    }

    #[test]
    fn self_loop_is_rejected() {
        let mut graph = cycle_graph(3);
        let v = graph.node_indices().next().unwrap();
        graph.add_edge(v, v, None);
        for backend in Backend::iter() {
            assert!(matches!(
                total_coloring(&mut graph, backend),
                Err(ColoringError::SelfLoop(_))
            ));
        }
    }

    #[test]
    fn parallel_edges_are_rejected() {
        let mut graph = ColorGraph::new_undirected();
        let a = graph.add_node(None);
        let b = graph.add_node(None);
        graph.add_edge(a, b, None);
        graph.add_edge(b, a, None);
        assert!(matches!(
            total_coloring(&mut graph, Backend::Csp),
            Err(ColoringError::MultiEdge(_, _))
        ));
    }

    #[test]
    fn seeded_incremental_runs_reproduce() {
        let collect = |graph: &ColorGraph| {
            let vertices = graph.node_indices().map(|v| graph[v]).collect_vec();
            let edges = graph.edge_indices().map(|e| graph[e]).collect_vec();
            (vertices, edges)
        };

        let mut first = cycle_graph(9);
        let mut second = cycle_graph(9);
        let run = |graph: &mut ColorGraph| {
            TotalColoring::new(Backend::Csp)
                .incremental(true)
                .seed(7)
                .run(graph)
                .unwrap()
        };
        assert_eq!(run(&mut first), run(&mut second));
        assert_eq!(collect(&first), collect(&second));
    }

    #[test]
    fn validator_accepts_a_valid_triangle() {
        let mut graph = complete_graph(3);
        let vertices = graph.node_indices().collect_vec();
        let colors = [0, 1, 2];
        for (&v, &c) in vertices.iter().zip(colors.iter()) {
            graph[v] = Some(c);
        }
        // edge (u, v) takes the color neither endpoint holds
        let edges = graph.edge_indices().collect_vec();
        for &e in &edges {
            let (u, v) = graph.edge_endpoints(e).unwrap();
            let spare = (0..3)
                .find(|&c| Some(c) != graph[u] && Some(c) != graph[v])
                .unwrap();
            graph[e] = Some(spare);
        }
        assert!(validate_coloring(&graph));
        // pure: asking twice changes nothing
        assert!(validate_coloring(&graph));
    }

    #[test]
    fn validator_rejects_each_rule_violation() {
        let build = || {
            let mut graph = ColorGraph::new_undirected();
            let a = graph.add_node(Some(0));
            let b = graph.add_node(Some(1));
            let c = graph.add_node(Some(0));
            let ab = graph.add_edge(a, b, Some(2));
            let bc = graph.add_edge(b, c, Some(3));
            (graph, a, b, ab, bc)
        };

        // baseline is valid (a path, endpoints not adjacent)
        let (graph, ..) = build();
        assert!(validate_coloring(&graph));

        // adjacent vertices sharing a color
        let (mut graph, a, b, ..) = build();
        graph[a] = graph[b];
        assert!(!validate_coloring(&graph));

        // vertex matching its incident edge
        let (mut graph, a, _, ab, _) = build();
        graph[ab] = graph[a];
        assert!(!validate_coloring(&graph));

        // edges sharing a vertex with the same color
        let (mut graph, _, _, ab, bc) = build();
        graph[bc] = graph[ab];
        assert!(!validate_coloring(&graph));

        // incomplete assignment
        let (mut graph, a, ..) = build();
        graph[a] = None;
        assert!(!validate_coloring(&graph));

        // an uncolored vertex counts as incomplete even with no edges to expose it
        let (mut graph, ..) = build();
        graph.add_node(None);
        assert!(!validate_coloring(&graph));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Random small graphs: the returned count respects the lower bound and the
        /// written coloring always validates, in both modes.
        #[test]
        fn random_graphs_color_validly(n in 1usize..7, edge_bits in prop::collection::vec(any::<bool>(), 21)) {
            let mut graph = ColorGraph::new_undirected();
            let nodes = (0..n).map(|_| graph.add_node(None)).collect_vec();
            let mut bit = edge_bits.iter();
            for (&u, &v) in nodes.iter().tuple_combinations() {
                if *bit.next().unwrap() {
                    graph.add_edge(u, v, None);
                }
            }

            for incremental in [false, true] {
                let mut attempt = graph.clone();
                let count = TotalColoring::new(Backend::Sat)
                    .incremental(incremental)
                    .seed(5)
                    .run(&mut attempt)
                    .unwrap();
                prop_assert!(count >= max_degree(&attempt) + 1);
                prop_assert!(validate_coloring(&attempt));
            }
        }
    }
}
