use crate::prop::{Formula, SpecializationMap, Variable};
use std::collections::{HashMap, HashSet};

/// Zero or more assumptions and a conclusion. Assumption order matters: it is
/// matched positionally against the justifications of a proof line.
#[derive(Hash, Eq, PartialEq, Clone)]
pub struct InferenceRule {
    pub assumptions: Vec<Formula>,
    pub conclusion: Formula,
}

/// Variable bindings collected while matching, borrowing from the candidate.
type Assignments<'a> = HashMap<Variable, &'a Formula>;

impl Formula {
    fn consistently_assign<'a>(
        &self,
        concrete: &'a Formula,
        var_assignments: &mut Assignments<'a>,
    ) -> bool {
        match (self, concrete) {
            (Self::Variable(v), x) => {
                if let Some(y) = var_assignments.get(v) {
                    *y == x
                } else {
                    var_assignments.insert(*v, x);
                    true
                }
            }
            (Self::Constant(x), Self::Constant(y)) => x == y,
            (Self::Not(x), Self::Not(y)) => x.consistently_assign(y, var_assignments),
            (Self::Binary(op_x, x1, x2), Self::Binary(op_y, y1, y2)) if op_x == op_y => {
                x1.consistently_assign(y1, var_assignments)
                    && x2.consistently_assign(y2, var_assignments)
            }
            _ => false,
        }
    }

    /// The minimal map `m` with `self.substitute_variables(m) == *specialization`,
    /// or `None` if there is none.
    pub fn specialization_map(&self, specialization: &Formula) -> Option<SpecializationMap> {
        let mut var_assignments = Assignments::default();
        self.consistently_assign(specialization, &mut var_assignments)
            .then(|| to_owned_map(var_assignments))
    }
}

fn to_owned_map(var_assignments: Assignments) -> SpecializationMap {
    var_assignments.into_iter().map(|(v, f)| (v, f.clone())).collect()
}

/// Key-wise union of two maps that agree on every shared key. `None` if they
/// disagree somewhere, or if either input is already `None`.
pub fn merge_specialization_maps(
    a: Option<SpecializationMap>,
    b: Option<SpecializationMap>,
) -> Option<SpecializationMap> {
    let (mut a, b) = (a?, b?);
    for (var, formula) in b {
        match a.get(&var) {
            Some(existing) if *existing != formula => return None,
            Some(_) => {}
            None => {
                a.insert(var, formula);
            }
        }
    }
    Some(a)
}

impl InferenceRule {
    pub fn new(assumptions: impl IntoIterator<Item = Formula>, conclusion: Formula) -> Self {
        Self { assumptions: assumptions.into_iter().collect(), conclusion }
    }
    /// A rule without assumptions.
    pub fn axiom(conclusion: Formula) -> Self {
        Self { assumptions: vec![], conclusion }
    }

    pub fn formulas(&self) -> impl Iterator<Item = &Formula> {
        self.assumptions.iter().chain(std::iter::once(&self.conclusion))
    }

    pub fn variables(&self) -> HashSet<Variable> {
        let mut buf = HashSet::default();
        for formula in self.formulas() {
            formula.visit_formulas(&mut |f| {
                if let Formula::Variable(v) = f {
                    buf.insert(*v);
                }
            });
        }
        buf
    }

    pub fn specialize(&self, map: &SpecializationMap) -> Self {
        Self {
            assumptions: self.assumptions.iter().map(|a| a.substitute_variables(map)).collect(),
            conclusion: self.conclusion.substitute_variables(map),
        }
    }

    /// The minimal map `m` with `self.specialize(m) == *specialization`, or
    /// `None` if `specialization` is not a specialization of `self`.
    pub fn specialization_map(&self, specialization: &Self) -> Option<SpecializationMap> {
        if self.assumptions.len() != specialization.assumptions.len() {
            return None;
        }
        // one assignment table across conclusion and all assumptions: a
        // variable bound differently in two places fails the whole match
        let mut var_assignments = Assignments::default();
        self.formulas()
            .zip(specialization.formulas())
            .all(|(general, concrete)| general.consistently_assign(concrete, &mut var_assignments))
            .then(|| to_owned_map(var_assignments))
    }

    pub fn is_specialization_of(&self, general: &Self) -> bool {
        general.specialization_map(self).is_some()
    }
}
