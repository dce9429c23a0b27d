use thiserror::Error;

/// A color in a total coloring. Colors handed out by the solver are consecutive integers in
/// `[0, count)` for the returned count.
pub type ColorId = usize;

/// Node and edge weights that can carry a color.
///
/// The search driver writes the final coloring back onto the graph through this trait.
/// `Option<ColorId>` implements it directly, so `UnGraph<Option<usize>, Option<usize>>`
/// needs no newtypes.
pub trait Colored {
    /// The currently attached color, if any.
    fn color(&self) -> Option<ColorId>;
    /// Attach a color, replacing any previous one.
    fn set_color(&mut self, color: ColorId);
}

impl Colored for Option<ColorId> {
    fn color(&self) -> Option<ColorId> {
        *self
    }

    fn set_color(&mut self, color: ColorId) {
        *self = Some(color);
    }
}

/// Reasons a coloring run may fail outright.
///
/// Infeasibility at a particular color count is *not* an error; the search driver recovers
/// from it by widening the palette and trying again.
#[derive(Debug, Error)]
pub enum ColoringError {
    /// The input graph has a self-loop, which no total coloring can satisfy.
    #[error("graph contains a self-loop at vertex {0}")]
    SelfLoop(usize),
    /// The input graph has parallel edges between one pair of vertices.
    #[error("graph contains parallel edges between vertices {0} and {1}")]
    MultiEdge(usize, usize),
    /// The SAT oracle produced a model assigning zero or multiple colors to some element.
    /// This violates the one-hot encoding contract and is never recovered from.
    #[error("SAT model assigns {positives} colors to element {element}")]
    Decode {
        /// Flat id of the element whose color block decoded inconsistently.
        element: usize,
        /// How many positive color literals the block held.
        positives: usize,
    },
    /// The SAT oracle reported an internal failure.
    #[error("SAT oracle failure: {0}")]
    Oracle(String),
    /// The deepening search walked past a palette of `|V| + |E|` colors, which always
    /// suffices. Only reachable through an encoding bug.
    #[error("no coloring found within {0} colors; the encoding is inconsistent")]
    SearchExhausted(usize),
}
