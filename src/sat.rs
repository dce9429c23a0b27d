use itertools::Itertools;
use varisat::{ExtendFormula, Lit, Solver, Var};

use crate::color::{ColorId, ColoringError};
use crate::index::{ElementId, ElementIndex};
use crate::logic::exactly_one;
use crate::model::{Assignment, ConstraintModel};

const CHUNK_DIVISOR: usize = 3;

/// The SAT formulation of total coloring over one-hot color variables.
///
/// Each (element, color) pair owns one variable. Clauses independent of chunking are
/// asserted at construction: every element holds exactly one color, and for every edge the
/// two endpoints and the edge itself are pairwise distinct. The chunked clauses add
/// pairwise distinctness between edges sharing a vertex.
///
/// The solver instance is created fresh per candidate color count, since the variable
/// scheme depends on it; clauses only ever accumulate within an attempt.
pub(crate) struct SatModel<'a> {
    index: &'a ElementIndex,
    colors: usize,
    solver: Solver<'static>,
}

impl<'a> SatModel<'a> {
    pub(crate) fn new(index: &'a ElementIndex, colors: usize) -> Self {
        let mut model = Self {
            index,
            colors,
            solver: Solver::new(),
        };
        model.add_base_clauses();
        model
    }

    /// The variable stating "this element has this color". Injective over the
    /// (element, color) product.
    fn var(&self, element: ElementId, color: ColorId) -> Var {
        Var::from_index(element * self.colors + color)
    }

    fn color_block(&self, element: ElementId) -> Vec<Var> {
        (0..self.colors).map(|color| self.var(element, color)).collect()
    }

    fn add_base_clauses(&mut self) {
        for element in 0..self.index.len() {
            for clause in exactly_one(&self.color_block(element)) {
                self.solver.add_clause(&clause);
            }
        }

        for vertex in 0..self.index.vertex_count() {
            for &(neighbor, edge) in self.index.adjacencies(vertex) {
                // visit each undirected edge once
                if neighbor < vertex {
                    continue;
                }
                for color in 0..self.colors {
                    let u = self.var(vertex, color).negative();
                    let v = self.var(neighbor, color).negative();
                    let f = self.var(edge, color).negative();
                    self.solver.add_clause(&[u, v]);
                    self.solver.add_clause(&[u, f]);
                    self.solver.add_clause(&[v, f]);
                }
            }
        }
    }

    /// Read each element's color block out of the model. Exactly one positive literal per
    /// block is guaranteed by the one-hot clauses; anything else is a contract violation.
    fn decode(&self, model: &[Lit]) -> Result<Assignment, ColoringError> {
        let mut assignment = Vec::with_capacity(self.index.len());
        for element in 0..self.index.len() {
            let positives = (0..self.colors)
                .filter(|&color| {
                    model
                        .get(self.var(element, color).index())
                        .is_some_and(|lit| lit.is_positive())
                })
                .collect_vec();
            match positives.as_slice() {
                &[color] => assignment.push(Some(color)),
                _ => {
                    return Err(ColoringError::Decode {
                        element,
                        positives: positives.len(),
                    })
                }
            }
        }
        Ok(assignment)
    }
}

impl ConstraintModel for SatModel<'_> {
    fn chunk_divisor(&self) -> usize {
        CHUNK_DIVISOR
    }

    fn add_chunk(&mut self, vertices: &[ElementId]) {
        for &vertex in vertices {
            for (&e1, &e2) in self.index.incident_edges(vertex).iter().tuple_combinations() {
                for color in 0..self.colors {
                    self.solver
                        .add_clause(&[self.var(e1, color).negative(), self.var(e2, color).negative()]);
                }
            }
        }
    }

    fn solve(&mut self) -> Result<Option<Assignment>, ColoringError> {
        let satisfiable = self
            .solver
            .solve()
            .map_err(|e| ColoringError::Oracle(e.to_string()))?;
        if !satisfiable {
            return Ok(None);
        }
        let model = self
            .solver
            .model()
            .ok_or_else(|| ColoringError::Oracle("satisfiable but no model produced".into()))?;
        self.decode(&model).map(Some)
    }
}
