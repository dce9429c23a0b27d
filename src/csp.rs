use std::collections::HashMap;

use crate::color::{ColorId, ColoringError};
use crate::index::{ElementId, ElementIndex};
use crate::model::{Assignment, ConstraintModel};

const CHUNK_DIVISOR: usize = 2;

/// The CSP formulation of total coloring: one all-different constraint per vertex star
/// (the vertex plus every incident edge, covering vertex-edge and edge-edge distinctness
/// in one stroke) and one per adjacency triple (both endpoints plus the connecting edge).
///
/// Triples are emitted once per directed adjacency, so each appears twice; all-different
/// is symmetric and the redundancy is tolerated.
pub(crate) struct CspModel<'a> {
    index: &'a ElementIndex,
    problem: AllDifferentProblem,
}

impl<'a> CspModel<'a> {
    pub(crate) fn new(index: &'a ElementIndex, colors: usize) -> Self {
        Self {
            index,
            problem: AllDifferentProblem::new(colors),
        }
    }
}

impl ConstraintModel for CspModel<'_> {
    fn chunk_divisor(&self) -> usize {
        CHUNK_DIVISOR
    }

    fn add_chunk(&mut self, vertices: &[ElementId]) {
        for &vertex in vertices {
            let mut star = self.index.incident_edges(vertex).to_vec();
            star.push(vertex);
            self.problem.add_all_different(star);

            for &(neighbor, edge) in self.index.adjacencies(vertex) {
                self.problem.add_all_different(vec![vertex, neighbor, edge]);
            }
        }
    }

    fn solve(&mut self) -> Result<Option<Assignment>, ColoringError> {
        Ok(self.problem.get_solution().map(|solution| {
            let mut assignment: Assignment = vec![None; self.index.len()];
            for (element, color) in solution {
                assignment[element] = Some(color);
            }
            assignment
        }))
    }
}

/// A finite-domain constraint problem restricted to all-different scopes, decided by
/// backtracking with minimum-remaining-values ordering and forward checking.
///
/// Stands in for an external constraint engine behind the one entry point such an engine
/// would offer. Only elements occurring in at least one scope participate in the search;
/// anything else is left to the caller's fallback fill.
struct AllDifferentProblem {
    domain_size: usize,
    scopes: Vec<Vec<ElementId>>,
}

impl AllDifferentProblem {
    fn new(domain_size: usize) -> Self {
        Self {
            domain_size,
            scopes: Vec::new(),
        }
    }

    fn add_all_different(&mut self, scope: Vec<ElementId>) {
        self.scopes.push(scope);
    }

    /// Search for one assignment satisfying every accumulated scope, or `None` if the
    /// scopes are unsatisfiable over this domain.
    fn get_solution(&self) -> Option<HashMap<ElementId, ColorId>> {
        // pigeonhole: a scope wider than the domain can never be all-different
        if self.scopes.iter().any(|scope| scope.len() > self.domain_size) {
            return None;
        }

        // dense-renumber the participating elements into search slots
        let mut elements: Vec<ElementId> = self.scopes.iter().flatten().copied().collect();
        elements.sort_unstable();
        elements.dedup();
        let slot_of: HashMap<ElementId, usize> =
            elements.iter().enumerate().map(|(slot, &element)| (element, slot)).collect();

        let scopes: Vec<Vec<usize>> = self
            .scopes
            .iter()
            .map(|scope| scope.iter().map(|element| slot_of[element]).collect())
            .collect();
        let mut scopes_of = vec![Vec::new(); elements.len()];
        for (constraint, scope) in scopes.iter().enumerate() {
            for &slot in scope {
                scopes_of[slot].push(constraint);
            }
        }

        let mut search = Search {
            scopes: &scopes,
            scopes_of: &scopes_of,
            domains: vec![vec![true; self.domain_size]; elements.len()],
            remaining: vec![self.domain_size; elements.len()],
            values: vec![None; elements.len()],
        };
        if !search.run() {
            return None;
        }

        Some(
            elements
                .into_iter()
                .enumerate()
                .filter_map(|(slot, element)| search.values[slot].map(|color| (element, color)))
                .collect(),
        )
    }
}

struct Search<'a> {
    scopes: &'a [Vec<usize>],
    /// Per slot, the constraints whose scope contains it.
    scopes_of: &'a [Vec<usize>],
    /// Per slot, which colors remain admissible.
    domains: Vec<Vec<bool>>,
    /// Per slot, how many colors remain admissible.
    remaining: Vec<usize>,
    values: Vec<Option<ColorId>>,
}

impl Search<'_> {
    fn run(&mut self) -> bool {
        // MRV: branch on the unassigned slot with the fewest live colors
        let Some(slot) = (0..self.values.len())
            .filter(|&slot| self.values[slot].is_none())
            .min_by_key(|&slot| self.remaining[slot])
        else {
            return true;
        };

        for color in 0..self.domains[slot].len() {
            if !self.domains[slot][color] {
                continue;
            }
            self.values[slot] = Some(color);
            if let Some(touched) = self.restrict_peers(slot, color) {
                if self.run() {
                    return true;
                }
                self.relax(&touched, color);
            }
            self.values[slot] = None;
        }
        false
    }

    /// Forward checking: remove `color` from every unassigned slot sharing a scope with
    /// `slot`. On a domain wipeout the removals are rolled back and `None` is returned.
    fn restrict_peers(&mut self, slot: usize, color: ColorId) -> Option<Vec<usize>> {
        let scopes = self.scopes;
        let scopes_of = self.scopes_of;

        let mut touched = Vec::new();
        for &constraint in &scopes_of[slot] {
            for &peer in &scopes[constraint] {
                if peer == slot || self.values[peer].is_some() || !self.domains[peer][color] {
                    continue;
                }
                self.domains[peer][color] = false;
                self.remaining[peer] -= 1;
                touched.push(peer);
                if self.remaining[peer] == 0 {
                    self.relax(&touched, color);
                    return None;
                }
            }
        }
        Some(touched)
    }

    fn relax(&mut self, touched: &[usize], color: ColorId) {
        for &peer in touched {
            self.domains[peer][color] = true;
            self.remaining[peer] += 1;
        }
    }
}
