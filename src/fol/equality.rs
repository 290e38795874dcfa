//! Elimination of equality in favour of a relation `SAME` that is forced to
//! be an equivalence relation respected by every other relation.

use crate::{
    error::{Error, Result},
    fol::{
        ast::{Formula, Quantifier, Term},
        model::Model,
    },
    text::Text,
    util::VecSet,
};
use core::hash::Hash;
use std::collections::{HashMap, HashSet};
use tracing::debug;

pub const SAME: &str = "SAME";

fn same() -> Text {
    Text::from_str(SAME)
}

fn var(name: &str) -> Text {
    Text::from_str(name)
}

fn same_atom(a: Text, b: Text) -> Formula {
    Formula::Relation(same(), vec![Term::Variable(a), Term::Variable(b)])
}

fn replace_equalities(formula: &Formula) -> Formula {
    match formula {
        Formula::Equality(a, b) => Formula::Relation(same(), vec![a.clone(), b.clone()]),
        Formula::Relation(..) => formula.clone(),
        Formula::Not(f) => Formula::not(replace_equalities(f)),
        Formula::Binary(c, a, b) => Formula::binary(*c, replace_equalities(a), replace_equalities(b)),
        Formula::Quantified(q, v, f) => Formula::Quantified(*q, *v, Box::new(replace_equalities(f))),
    }
}

/// Reflexivity, symmetry and transitivity of `SAME`.
fn equivalence_axioms() -> [Formula; 3] {
    let (x, y, z) = (var("x"), var("y"), var("z"));
    let all = |vars: &[Text], f| Formula::quantify_all(Quantifier::Forall, vars, f);
    [
        all(&[x], same_atom(x, x)),
        all(&[x, y], Formula::implies(same_atom(x, y), same_atom(y, x))),
        all(
            &[x, y, z],
            Formula::implies(Formula::and(same_atom(x, y), same_atom(y, z)), same_atom(x, z)),
        ),
    ]
}

/// `∀x1..xn ∀y1..yn ((SAME(x1,y1)&...&SAME(xn,yn))->(R(x1..xn)->R(y1..yn)))`,
/// requires `arity > 0`.
fn congruence_axiom(relation: Text, arity: usize) -> Formula {
    let xs: Vec<Text> = (1..=arity).map(|i| var(&format!("x{i}"))).collect();
    let ys: Vec<Text> = (1..=arity).map(|i| var(&format!("y{i}"))).collect();
    let invocation = |vars: &[Text]| {
        Formula::Relation(relation, vars.iter().map(|&v| Term::Variable(v)).collect())
    };
    let premise = xs
        .iter()
        .zip(&ys)
        .rev()
        .map(|(&x, &y)| same_atom(x, y))
        .reduce(|conjunction, atom| Formula::and(atom, conjunction));
    let body = Formula::implies(invocation(&xs), invocation(&ys));
    let body = match premise {
        Some(premise) => Formula::implies(premise, body),
        None => body,
    };
    let mut bound = xs;
    bound.extend(ys);
    Formula::quantify_all(Quantifier::Forall, &bound, body)
}

/// Replaces every equality by `SAME`, and adds formulas making `SAME` an
/// equivalence relation that every relation of `formulas` respects.
pub fn replace_equality_with_same_in_formulas<'f>(
    formulas: impl IntoIterator<Item = &'f Formula>,
) -> Result<VecSet<Formula>> {
    let formulas: Vec<&Formula> = formulas.into_iter().collect();
    let mut relations = HashSet::<(Text, usize)>::default();
    for formula in &formulas {
        if let Some((function, _)) = formula.functions().into_iter().next() {
            return Err(Error::UnexpectedFunction { name: function.as_str().into() });
        }
        relations.extend(formula.relations());
    }
    if relations.iter().any(|&(r, _)| r == same()) {
        return Err(Error::RelationAlreadyPresent { name: SAME.into() });
    }

    let mut result: VecSet<Formula> = formulas.iter().map(|f| replace_equalities(f)).collect();
    result.extend(equivalence_axioms());
    let mut relations: Vec<_> = relations.into_iter().filter(|&(_, arity)| arity > 0).collect();
    relations.sort();
    result.extend(relations.into_iter().map(|(r, arity)| congruence_axiom(r, arity)));
    debug!(given = formulas.len(), produced = result.len(), "eliminated equality");
    Ok(result)
}

/// Interprets `SAME` as the identity relation on the universe.
pub fn add_same_as_equality_in_model<T: Clone + Hash + Eq>(model: &Model<T>) -> Result<Model<T>> {
    if model.relations.contains_key(&same()) {
        return Err(Error::RelationAlreadyPresent { name: SAME.into() });
    }
    let mut model = model.clone();
    let identity = model.universe.iter().map(|x| vec![x.clone(), x.clone()]).collect();
    model.relations.insert(same(), identity);
    Ok(model)
}

/// Collapses the universe into the classes of `SAME`, which must be an
/// equivalence relation respected by every other relation. Each class is
/// represented by its least element. The result has no `SAME`.
pub fn make_equality_as_same_in_model<T: Clone + Hash + Ord>(model: &Model<T>) -> Result<Model<T>> {
    if !model.functions.is_empty() {
        let names = model.functions.keys().map(|f| f.as_str().to_owned()).collect();
        return Err(Error::FunctionsPresent { names });
    }
    let same_tuples = model.relations.get(&same()).ok_or_else(|| Error::missing("relation", SAME))?;
    if let Some(found) = model.relation_arity(same()).filter(|&n| n != 2) {
        return Err(Error::ArityMismatch { name: SAME.into(), expected: 2, found });
    }

    let mut representative: HashMap<&T, &T> = model.universe.iter().map(|x| (x, x)).collect();
    for pair in same_tuples {
        let (x, y) = (&pair[0], &pair[1]);
        if let Some(r) = representative.get_mut(x) {
            if y < *r {
                *r = y;
            }
        }
    }
    let class_size = |r: &T| representative.values().filter(|&&s| s == r).count();

    // SAME is an equivalence iff it is exactly the kernel of `representative`
    let mut kernel_size = 0;
    for r in representative.values().copied().collect::<HashSet<_>>() {
        kernel_size += class_size(r).pow(2);
    }
    let consistent = same_tuples.iter().all(|pair| representative[&pair[0]] == representative[&pair[1]]);
    if !consistent || kernel_size != same_tuples.len() {
        return Err(Error::precondition("SAME is not an equivalence relation"));
    }

    let collapse = |tuple: &Vec<T>| tuple.iter().map(|x| representative[x].clone()).collect::<Vec<T>>();
    let mut relations = HashMap::default();
    for (&name, tuples) in &model.relations {
        if name == same() {
            continue;
        }
        let mut counts = HashMap::<Vec<T>, usize>::default();
        for tuple in tuples {
            *counts.entry(collapse(tuple)).or_default() += 1;
        }
        // respected iff each collapsed tuple stands for the full product of its classes
        let respected = counts.iter().all(|(collapsed, &count)| {
            Some(count) == collapsed.iter().try_fold(1usize, |acc, r| acc.checked_mul(class_size(r)))
        });
        if !respected {
            return Err(Error::precondition(format!("relation `{name}` does not respect SAME")));
        }
        relations.insert(name, counts.into_keys().collect());
    }

    let universe: HashSet<T> = representative.values().map(|&r| r.clone()).collect();
    Ok(Model {
        constants: model.constants.iter().map(|(&c, x)| (c, representative[x].clone())).collect(),
        universe,
        relations,
        functions: HashMap::default(),
    })
}
