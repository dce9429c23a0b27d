use petgraph::graph::UnGraph;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::color::{ColorId, Colored, ColoringError};
use crate::index::{ElementId, ElementIndex};
use crate::model::{Assignment, Backend, ConstraintModel};
use crate::validate::validate_coloring;

/// A configured total-coloring run.
///
/// ```
/// use chromate::{Backend, TotalColoring};
/// use petgraph::graph::UnGraph;
///
/// let mut triangle = UnGraph::<Option<usize>, Option<usize>>::new_undirected();
/// let a = triangle.add_node(None);
/// let b = triangle.add_node(None);
/// let c = triangle.add_node(None);
/// triangle.add_edge(a, b, None);
/// triangle.add_edge(b, c, None);
/// triangle.add_edge(a, c, None);
///
/// let colors = TotalColoring::new(Backend::Sat).run(&mut triangle).unwrap();
/// assert_eq!(colors, 3);
/// ```
pub struct TotalColoring {
    backend: Backend,
    incremental: bool,
    seed: Option<u64>,
}

impl TotalColoring {
    /// Start configuring a run with the given backend. Defaults to batch mode with an
    /// OS-entropy fallback generator.
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            incremental: false,
            seed: None,
        }
    }

    /// Build constraints chunk by chunk instead of all at once, revalidating every partial
    /// answer against the whole graph.
    pub fn incremental(mut self, incremental: bool) -> Self {
        self.incremental = incremental;
        self
    }

    /// Seed the fallback generator that colors elements the incremental path leaves
    /// unconstrained, making the run reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Search for the smallest workable color count, write the coloring onto the graph's
    /// node and edge weights, and return the count.
    ///
    /// Colors are consecutive integers in `[0, count)`. The count is never below
    /// `max_degree + 1`, the total-coloring lower bound. An empty graph is a degenerate
    /// success with count 0.
    pub fn run<N: Colored, E: Colored>(&self, graph: &mut UnGraph<N, E>) -> Result<usize, ColoringError> {
        if graph.node_count() == 0 {
            return Ok(0);
        }

        let index = ElementIndex::build(graph)?;
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };

        let vertices: Vec<ElementId> = (0..index.vertex_count()).collect();
        let mut colors = index.max_degree();
        loop {
            colors += 1;
            // |V| + |E| colors always suffice (give every element its own), so walking
            // past that means the encoding broke; fail rather than loop forever
            if colors > index.len() {
                return Err(ColoringError::SearchExhausted(index.len()));
            }

            let mut model = self.backend.instantiate(&index, colors);
            let solved = if self.incremental {
                attempt_incremental(&mut model, graph, &index, &vertices, colors, &mut rng)?
            } else {
                // batch mode: the whole constraint set in one chunk, one oracle call
                model.add_chunk(&vertices);
                match model.solve()? {
                    None => false,
                    Some(assignment) => {
                        apply_assignment(graph, &index, &assignment, colors, &mut rng);
                        true
                    }
                }
            };

            if solved {
                return Ok(colors);
            }
        }
    }
}

/// The incremental state machine: accumulate one chunk of vertices at a time and ask the
/// oracle after each. A satisfiable prefix plus fallback fill is only evidence that the
/// constraints seen so far are mutually satisfiable, so each partial answer must pass
/// global validation before the attempt succeeds. Exhausting the chunks without a
/// validated answer fails the attempt and the caller widens the palette.
fn attempt_incremental<M, N, E>(
    model: &mut M,
    graph: &mut UnGraph<N, E>,
    index: &ElementIndex,
    vertices: &[ElementId],
    colors: usize,
    rng: &mut ChaCha8Rng,
) -> Result<bool, ColoringError>
where
    M: ConstraintModel,
    N: Colored,
    E: Colored,
{
    let chunk_size = (index.vertex_count() / model.chunk_divisor()).max(1);
    for chunk in vertices.chunks(chunk_size) {
        model.add_chunk(chunk);
        if let Some(assignment) = model.solve()? {
            apply_assignment(graph, index, &assignment, colors, rng);
            if validate_coloring(graph) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Write a complete coloring onto the graph, drawing uniform fallback colors for elements
/// the oracle never constrained.
fn apply_assignment<N: Colored, E: Colored>(
    graph: &mut UnGraph<N, E>,
    index: &ElementIndex,
    assignment: &Assignment,
    colors: usize,
    rng: &mut ChaCha8Rng,
) {
    for vertex in graph.node_indices() {
        let color = fill(assignment[index.vertex_element(vertex)], colors, rng);
        graph[vertex].set_color(color);
    }
    for edge in graph.edge_indices() {
        let color = fill(assignment[index.edge_element(edge)], colors, rng);
        graph[edge].set_color(color);
    }
}

fn fill(assigned: Option<ColorId>, colors: usize, rng: &mut ChaCha8Rng) -> ColorId {
    assigned.unwrap_or_else(|| rng.random_range(0..colors))
}

/// Total-color `graph` with the full constraint set built up front, returning the color
/// count and writing colors onto the node and edge weights.
pub fn total_coloring<N: Colored, E: Colored>(
    graph: &mut UnGraph<N, E>,
    backend: Backend,
) -> Result<usize, ColoringError> {
    TotalColoring::new(backend).run(graph)
}

/// Total-color `graph` building the constraint set chunk by chunk, letting the oracle
/// commit to a vertex prefix before the rest of the graph is encoded.
pub fn total_coloring_incremental<N: Colored, E: Colored>(
    graph: &mut UnGraph<N, E>,
    backend: Backend,
) -> Result<usize, ColoringError> {
    TotalColoring::new(backend).incremental(true).run(graph)
}
