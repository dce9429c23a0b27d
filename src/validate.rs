use itertools::Itertools;
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

use crate::color::Colored;

/// Check a colored graph against the three total-coloring rules: adjacent vertices differ,
/// a vertex differs from each incident edge, and edges sharing a vertex differ.
///
/// The whole assignment is inspected, including any fallback-filled elements. Returns
/// `false` (never panics) on any violation or on a vertex or edge missing a color. Pure,
/// so calling it twice on the same graph gives the same answer.
pub fn validate_coloring<N: Colored, E: Colored>(graph: &UnGraph<N, E>) -> bool {
    for edge in graph.edge_references() {
        let colors = [
            graph[edge.source()].color(),
            graph[edge.target()].color(),
            edge.weight().color(),
        ];
        let [Some(u), Some(v), Some(f)] = colors else {
            return false;
        };
        if u == v || u == f || v == f {
            return false;
        }
    }

    graph.node_indices().all(|vertex| {
        let incident = graph.edges(vertex).map(|edge| edge.weight().color()).collect_vec();
        graph[vertex].color().is_some()
            && incident.iter().all(Option::is_some)
            && incident.iter().all_unique()
    })
}
