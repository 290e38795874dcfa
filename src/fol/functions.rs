//! Syntactic elimination of function symbols: every function `f` becomes a
//! relation `F` holding `(f(x1..xn), x1..xn)`, in models and in formulas.

use crate::{
    error::{Error, Result},
    fol::{
        ast::{is_function_name, is_relation_name, Formula, Quantifier, Term},
        model::{tuple_count, Model},
    },
    text::{fresh_variable, is_fresh_shaped, Text},
    util::VecSet,
};
use core::hash::Hash;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

fn capitalize_first(name: &str, upper: bool) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if upper => c.to_ascii_uppercase().to_string() + chars.as_str(),
        Some(c) => c.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

pub fn function_name_to_relation_name(function: &str) -> Result<String> {
    if !is_function_name(function) {
        return Err(Error::invalid_name("function", function));
    }
    Ok(capitalize_first(function, true))
}

pub fn relation_name_to_function_name(relation: &str) -> Result<String> {
    if !is_relation_name(relation) {
        return Err(Error::invalid_name("relation", relation));
    }
    Ok(capitalize_first(relation, false))
}

/// Requires `function` to be a valid function name.
pub(crate) fn relation_for(function: Text) -> Text {
    Text::from_str(&capitalize_first(function.as_str(), true))
}

pub fn replace_functions_with_relations_in_model<T: Clone + Hash + Eq>(
    model: &Model<T>,
) -> Result<Model<T>> {
    let mut relations = model.relations.clone();
    for (&function, map) in &model.functions {
        let relation = relation_for(function);
        if relations.contains_key(&relation) {
            return Err(Error::NameCollision { name: relation.as_str().into() });
        }
        let graph = map
            .iter()
            .map(|(args, y)| std::iter::once(y.clone()).chain(args.iter().cloned()).collect())
            .collect();
        relations.insert(relation, graph);
    }
    Ok(Model {
        universe: model.universe.clone(),
        constants: model.constants.clone(),
        relations,
        functions: HashMap::default(),
    })
}

/// The inverse of [`replace_functions_with_relations_in_model`]. `Ok(None)` if
/// some relation standing for one of `original_functions` is not the graph of
/// a total function.
pub fn replace_relations_with_functions_in_model<T: Clone + Hash + Eq>(
    model: &Model<T>,
    original_functions: impl IntoIterator<Item = impl AsRef<str>>,
) -> Result<Option<Model<T>>> {
    if !model.functions.is_empty() {
        let names = model.functions.keys().map(|f| f.as_str().to_owned()).collect();
        return Err(Error::FunctionsPresent { names });
    }
    let mut relations = model.relations.clone();
    let mut functions = HashMap::default();
    for function in original_functions {
        let function = function.as_ref();
        let relation = Text::from_str(&function_name_to_relation_name(function)?);
        let graph = relations.remove(&relation).ok_or_else(|| Error::missing("relation", relation.as_str()))?;
        let Some(map) = function_from_graph(&graph, model.universe.len()) else {
            debug!(function, "relation is not the graph of a total function");
            return Ok(None);
        };
        functions.insert(Text::from_str(function), map);
    }
    Ok(Some(Model {
        universe: model.universe.clone(),
        constants: model.constants.clone(),
        relations,
        functions,
    }))
}

/// Reads tuples `(y, x1..xn)` as `f(x1..xn) = y`. `None` unless every argument
/// tuple has exactly one value.
fn function_from_graph<T: Clone + Hash + Eq>(
    graph: &HashSet<Vec<T>>,
    universe_size: usize,
) -> Option<HashMap<Vec<T>, T>> {
    let mut map = HashMap::<Vec<T>, T>::default();
    let mut arity = None;
    for tuple in graph {
        let (y, args) = tuple.split_first()?;
        if args.is_empty() || *arity.get_or_insert(args.len()) != args.len() {
            return None;
        }
        if map.insert(args.to_vec(), y.clone()).is_some() {
            // a second value for the same arguments
            return None;
        }
    }
    (tuple_count(universe_size, arity?) == Some(map.len())).then_some(map)
}

/// One step `var = function(args)` of a compiled term. Arguments are never
/// function invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    var: Text,
    function: Text,
    args: Vec<Term>,
}

impl Step {
    fn to_equality(&self) -> Formula {
        Formula::Equality(Term::Variable(self.var), Term::Function(self.function, self.args.clone()))
    }
    /// `E var[(F(var,args)&body)]`
    fn guard(self, body: Formula) -> Formula {
        let mut args = vec![Term::Variable(self.var)];
        args.extend(self.args);
        let invocation = Formula::Relation(relation_for(self.function), args);
        Formula::Quantified(Quantifier::Exists, self.var, Box::new(Formula::and(invocation, body)))
    }
}

/// Appends the steps computing `term` and returns the term standing for its value.
fn compile_into(term: &Term, steps: &mut Vec<Step>) -> Term {
    match term {
        Term::Function(function, args) => {
            let args = args.iter().map(|arg| compile_into(arg, steps)).collect();
            let var = fresh_variable();
            steps.push(Step { var, function: *function, args });
            Term::Variable(var)
        }
        _ => term.clone(),
    }
}

fn check_reserved(variables: impl IntoIterator<Item = Text>) -> Result<()> {
    match variables.into_iter().find(|v| is_fresh_shaped(v.as_str())) {
        Some(v) => Err(Error::ReservedVariable { name: v.as_str().into() }),
        None => Ok(()),
    }
}

/// Flattens a function invocation into single-invocation steps `z = f(x1..xn)`,
/// each `xi` a constant, a variable, or the left side of an earlier step. The
/// last step's variable holds the value of `term`.
pub fn compile_term(term: &Term) -> Result<Vec<Formula>> {
    if !term.is_function_invocation() {
        return Err(Error::NotAFunctionInvocation { term: term.to_string() });
    }
    check_reserved(term.variables())?;
    let mut steps = vec![];
    compile_into(term, &mut steps);
    Ok(steps.iter().map(Step::to_equality).collect())
}

fn check_collisions<'f>(formulas: impl IntoIterator<Item = &'f Formula> + Clone) -> Result<()> {
    let relations: HashSet<Text> =
        formulas.clone().into_iter().flat_map(Formula::relations).map(|(r, _)| r).collect();
    for (function, _) in formulas.into_iter().flat_map(Formula::functions) {
        let relation = relation_for(function);
        if relations.contains(&relation) {
            return Err(Error::NameCollision { name: relation.as_str().into() });
        }
    }
    Ok(())
}

/// Wraps `atom` in the guards binding each step's variable, innermost last, so
/// every step sees the variables of the steps before it.
fn guard_all(steps: Vec<Step>, atom: Formula) -> Formula {
    steps.into_iter().rev().fold(atom, |body, step| step.guard(body))
}

fn eliminate(formula: &Formula) -> Formula {
    let mut steps = vec![];
    match formula {
        Formula::Equality(a, b) => {
            let atom = Formula::Equality(compile_into(a, &mut steps), compile_into(b, &mut steps));
            guard_all(steps, atom)
        }
        Formula::Relation(r, args) => {
            let atom = Formula::Relation(*r, args.iter().map(|t| compile_into(t, &mut steps)).collect());
            guard_all(steps, atom)
        }
        Formula::Not(f) => Formula::not(eliminate(f)),
        Formula::Binary(c, a, b) => Formula::binary(*c, eliminate(a), eliminate(b)),
        Formula::Quantified(q, v, f) => Formula::Quantified(*q, *v, Box::new(eliminate(f))),
    }
}

/// A formula without function invocations that holds in a model iff `formula`
/// holds in the model with its functions replaced by relations.
pub fn replace_functions_with_relations_in_formula(formula: &Formula) -> Result<Formula> {
    check_collisions([formula])?;
    check_reserved(formula.variables())?;
    Ok(eliminate(formula))
}

/// `∀x1..xn ∃z F(z,x1..xn)` and `∀x1..xn ∀z ∀w ((F(z,x..)&F(w,x..))->z=w)`.
fn function_graph_axioms(function: Text, arity: usize) -> [Formula; 2] {
    let relation = relation_for(function);
    let xs: Vec<Text> = (0..arity).map(|_| fresh_variable()).collect();
    let (z, w) = (fresh_variable(), fresh_variable());
    let invocation = |y: Text| {
        let mut args = vec![Term::Variable(y)];
        args.extend(xs.iter().map(|&x| Term::Variable(x)));
        Formula::Relation(relation, args)
    };
    let total = Formula::quantify_all(
        Quantifier::Forall,
        &xs,
        Formula::Quantified(Quantifier::Exists, z, Box::new(invocation(z))),
    );
    let mut bound = xs.clone();
    bound.extend([z, w]);
    let single_valued = Formula::quantify_all(
        Quantifier::Forall,
        &bound,
        Formula::implies(
            Formula::and(invocation(z), invocation(w)),
            Formula::Equality(Term::Variable(z), Term::Variable(w)),
        ),
    );
    [total, single_valued]
}

/// Converts every formula, and adds two formulas per eliminated function that
/// force its relation to be the graph of a total function. Models of the
/// result correspond exactly to models of `formulas`.
pub fn replace_functions_with_relations_in_formulas<'f>(
    formulas: impl IntoIterator<Item = &'f Formula>,
) -> Result<VecSet<Formula>> {
    let formulas: Vec<&Formula> = formulas.into_iter().collect();
    check_collisions(formulas.iter().copied())?;
    for formula in &formulas {
        check_reserved(formula.variables())?;
    }

    let mut functions: Vec<(Text, usize)> =
        formulas.iter().flat_map(|f| f.functions()).collect::<HashSet<_>>().into_iter().collect();
    functions.sort();
    if let Some(w) = functions.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(Error::ArityMismatch { name: w[0].0.as_str().into(), expected: w[0].1, found: w[1].1 });
    }

    let mut result: VecSet<Formula> = formulas.iter().map(|f| eliminate(f)).collect();
    for (function, arity) in functions {
        trace!(%function, arity, "adding function graph axioms");
        result.extend(function_graph_axioms(function, arity));
    }
    debug!(given = formulas.len(), produced = result.len(), "eliminated functions");
    Ok(result)
}
