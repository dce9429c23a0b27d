use std::collections::HashSet;

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use unordered_pair::UnorderedPair;

use crate::color::ColoringError;

/// Identifier of an element (a vertex or an edge) in the flat id space shared by both
/// constraint formulations.
pub(crate) type ElementId = usize;

/// The unified numbering of a graph's vertices and edges, plus the adjacency snapshot the
/// constraint models read instead of the graph itself.
///
/// Vertices occupy ids `[0, |V|)` and edges `[|V|, |V| + |E|)`, following the graph's
/// iteration order. An edge and its reverse resolve to the same id. Built once per search
/// and fixed for the search's lifetime.
pub(crate) struct ElementIndex {
    vertex_count: usize,
    edge_count: usize,
    max_degree: usize,
    /// Per vertex id, the element ids of its incident edges.
    incident: Vec<Vec<ElementId>>,
    /// Per vertex id, `(neighbor vertex id, connecting edge id)` pairs.
    adjacent: Vec<Vec<(ElementId, ElementId)>>,
}

impl ElementIndex {
    /// Number the graph's elements, rejecting self-loops and parallel edges before any
    /// encoding sees them.
    pub(crate) fn build<N, E>(graph: &UnGraph<N, E>) -> Result<Self, ColoringError> {
        let vertex_count = graph.node_count();

        let mut seen: HashSet<UnorderedPair<NodeIndex>> = HashSet::with_capacity(graph.edge_count());
        for edge in graph.edge_references() {
            let (u, v) = (edge.source(), edge.target());
            if u == v {
                return Err(ColoringError::SelfLoop(u.index()));
            }
            if !seen.insert(UnorderedPair(u, v)) {
                return Err(ColoringError::MultiEdge(u.index(), v.index()));
            }
        }

        let mut max_degree = 0;
        let mut incident = Vec::with_capacity(vertex_count);
        let mut adjacent = Vec::with_capacity(vertex_count);
        for vertex in graph.node_indices() {
            let mut edges_here = Vec::new();
            let mut neighbors_here = Vec::new();
            for edge in graph.edges(vertex) {
                let id = vertex_count + edge.id().index();
                let neighbor = if edge.source() == vertex { edge.target() } else { edge.source() };
                edges_here.push(id);
                neighbors_here.push((neighbor.index(), id));
            }
            max_degree = max_degree.max(edges_here.len());
            incident.push(edges_here);
            adjacent.push(neighbors_here);
        }

        Ok(Self {
            vertex_count,
            edge_count: graph.edge_count(),
            max_degree,
            incident,
            adjacent,
        })
    }

    pub(crate) fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub(crate) fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Total element count, `|V| + |E|`.
    pub(crate) fn len(&self) -> usize {
        self.vertex_count + self.edge_count
    }

    pub(crate) fn vertex_element(&self, vertex: NodeIndex) -> ElementId {
        vertex.index()
    }

    pub(crate) fn edge_element(&self, edge: EdgeIndex) -> ElementId {
        self.vertex_count + edge.index()
    }

    /// Element ids of the edges incident to a vertex.
    pub(crate) fn incident_edges(&self, vertex: ElementId) -> &[ElementId] {
        &self.incident[vertex]
    }

    /// `(neighbor vertex id, connecting edge id)` pairs for a vertex.
    pub(crate) fn adjacencies(&self, vertex: ElementId) -> &[(ElementId, ElementId)] {
        &self.adjacent[vertex]
    }
}
