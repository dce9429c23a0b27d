use strum::{Display, EnumIter};

use crate::color::{ColorId, ColoringError};
use crate::csp::CspModel;
use crate::index::{ElementId, ElementIndex};
use crate::sat::SatModel;

/// A possibly partial coloring produced by one oracle call, indexed by element id.
/// `None` marks an element that no accumulated constraint has touched yet.
pub(crate) type Assignment = Vec<Option<ColorId>>;

/// The capability both constraint formulations expose to the search driver.
pub(crate) trait ConstraintModel {
    /// Divisor for the incremental chunk size; an empirical per-backend tuning knob, not a
    /// correctness requirement.
    fn chunk_divisor(&self) -> usize;

    /// Emit the constraints or clauses for the given vertices, accumulating onto everything
    /// emitted before. Never discards prior work within one candidate color count.
    fn add_chunk(&mut self, vertices: &[ElementId]);

    /// Ask the oracle for a coloring consistent with everything accumulated so far.
    /// `Ok(None)` means the accumulated set is infeasible at the current color count.
    fn solve(&mut self) -> Result<Option<Assignment>, ColoringError>;
}

/// Which formulation backs the search.
#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, Hash, PartialEq)]
pub enum Backend {
    /// All-different constraints solved by a backtracking constraint engine.
    Csp,
    /// One-hot Boolean clauses solved by `varisat`.
    Sat,
}

impl Backend {
    /// Instantiate a fresh model for one candidate color count. The instance owns its
    /// oracle exclusively until dropped; nothing outlives the attempt.
    pub(crate) fn instantiate<'a>(&self, index: &'a ElementIndex, colors: usize) -> ModelInstance<'a> {
        match self {
            Self::Csp => ModelInstance::Csp(CspModel::new(index, colors)),
            Self::Sat => ModelInstance::Sat(SatModel::new(index, colors)),
        }
    }
}

/// Closed dispatch over the two concrete models, keeping the search driver backend-agnostic.
pub(crate) enum ModelInstance<'a> {
    Csp(CspModel<'a>),
    Sat(SatModel<'a>),
}

impl ConstraintModel for ModelInstance<'_> {
    fn chunk_divisor(&self) -> usize {
        match self {
            Self::Csp(model) => model.chunk_divisor(),
            Self::Sat(model) => model.chunk_divisor(),
        }
    }

    fn add_chunk(&mut self, vertices: &[ElementId]) {
        match self {
            Self::Csp(model) => model.add_chunk(vertices),
            Self::Sat(model) => model.add_chunk(vertices),
        }
    }

    fn solve(&mut self) -> Result<Option<Assignment>, ColoringError> {
        match self {
            Self::Csp(model) => model.solve(),
            Self::Sat(model) => model.solve(),
        }
    }
}
