use itertools::Itertools;
use varisat::{Lit, Var};

/// Pairwise encoding of "no two of `vars` are true"; (!A + !B) * (!A + !C) * ...
pub(crate) fn at_most_one(vars: &[Var]) -> impl Iterator<Item = Vec<Lit>> + '_ {
    vars.iter()
        .tuple_combinations()
        .map(|(a, b)| vec![a.negative(), b.negative()])
}

/// "Exactly one of `vars` is true": the pairwise exclusions plus one long positive clause,
/// A + B + C + ...
pub(crate) fn exactly_one(vars: &[Var]) -> Vec<Vec<Lit>> {
    let mut clauses = Vec::with_capacity(vars.len() * (vars.len() + 1) / 2 + 1);
    clauses.extend(at_most_one(vars));
    clauses.push(vars.iter().map(|v| v.positive()).collect_vec());
    clauses
}
