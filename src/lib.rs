#![warn(missing_docs)]

//! # `chromate`
//!
//! A solver for the [total coloring](https://en.wikipedia.org/wiki/Total_coloring) problem:
//! assign a color to every vertex *and* every edge of an undirected graph such that adjacent
//! vertices differ, every vertex differs from each of its incident edges, and edges sharing an
//! endpoint differ. The smallest workable palette size is the graph's total chromatic number;
//! `chromate` reaches it by iterative deepening from the `max_degree + 1` lower bound, returning
//! the first palette size that admits a coloring.
//!
//! Build a [`petgraph::graph::UnGraph`] whose node and edge weights implement [`Colored`]
//! (plain `Option<usize>` weights work out of the box), then call [`total_coloring`] or
//! [`total_coloring_incremental`], or configure a run through [`TotalColoring`]. The coloring
//! is written back onto the weights and the color count is returned.
//!
//! # Internals
//! Vertices and edges are folded into one flat element universe, so the three coloring rules
//! all become distinctness restrictions over element ids. Two interchangeable formulations
//! are provided, selected by [`Backend`]: a CSP rendition (all-different constraints handed
//! to a backtracking constraint engine) and a SAT rendition (one-hot Boolean clauses handed
//! to `varisat`).
//!
//! Besides the batch path, an incremental path grows the constraint set one chunk of
//! vertices at a time. The oracle may then commit to a coloring for a prefix of the graph
//! before the rest of the structure is even encoded; elements left unconstrained receive
//! uniform-random fallback colors, and every partial answer is revalidated against the whole
//! graph before being accepted. On many instances this converges well before the full
//! encoding is built.

pub use color::{ColorId, Colored, ColoringError};
pub use model::Backend;
pub use search::{total_coloring, total_coloring_incremental, TotalColoring};
pub use validate::validate_coloring;

mod tests;
pub(crate) mod color;
pub(crate) mod csp;
pub(crate) mod index;
pub(crate) mod logic;
pub(crate) mod model;
pub(crate) mod sat;
pub(crate) mod search;
pub(crate) mod validate;
