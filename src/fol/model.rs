use crate::{
    error::{Error, Result},
    fol::ast::{
        is_constant_name, is_function_name, is_relation_name, Connective, Formula, Quantifier,
        Term,
    },
    text::Text,
};
use core::hash::Hash;
use std::collections::{HashMap, HashSet};

/// A finite interpretation of constants, relations and functions over a
/// non-empty universe. Function interpretations are total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model<T: Hash + Eq> {
    pub(crate) universe: HashSet<T>,
    pub(crate) constants: HashMap<Text, T>,
    pub(crate) relations: HashMap<Text, HashSet<Vec<T>>>,
    pub(crate) functions: HashMap<Text, HashMap<Vec<T>, T>>,
}

/// Values for the free variables of a formula or term.
pub type Assignment<T> = HashMap<Text, T>;

fn named<V>(
    entries: impl IntoIterator<Item = (impl AsRef<str>, V)>,
    kind: &'static str,
    ok: fn(&str) -> bool,
) -> Result<HashMap<Text, V>> {
    entries
        .into_iter()
        .map(|(name, v)| {
            let name = name.as_ref();
            if ok(name) {
                Ok((Text::from_str(name), v))
            } else {
                Err(Error::invalid_name(kind, name))
            }
        })
        .collect()
}

/// `n` to the power of `k`, or `None` on overflow.
pub(crate) fn tuple_count(n: usize, k: usize) -> Option<usize> {
    n.checked_pow(u32::try_from(k).ok()?)
}

impl<T: Clone + Hash + Eq> Model<T> {
    pub fn new(
        universe: impl IntoIterator<Item = T>,
        constants: impl IntoIterator<Item = (impl AsRef<str>, T)>,
        relations: impl IntoIterator<Item = (impl AsRef<str>, HashSet<Vec<T>>)>,
        functions: impl IntoIterator<Item = (impl AsRef<str>, HashMap<Vec<T>, T>)>,
    ) -> Result<Self> {
        let model = Self {
            universe: universe.into_iter().collect(),
            constants: named(constants, "constant", is_constant_name)?,
            relations: named(relations, "relation", is_relation_name)?,
            functions: named(functions, "function", is_function_name)?,
        };
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.universe.is_empty() {
            return Err(Error::malformed("empty universe"));
        }
        let outside = |x: &T| !self.universe.contains(x);
        if self.constants.values().any(outside) {
            return Err(Error::malformed("constant interpreted outside the universe"));
        }
        for (name, tuples) in &self.relations {
            let arity = self.relation_arity(*name);
            for tuple in tuples {
                if Some(tuple.len()) != arity {
                    return Err(Error::malformed(format!("inconsistent arity for relation `{name}`")));
                }
                if tuple.iter().any(outside) {
                    return Err(Error::malformed(format!("`{name}` relates values outside the universe")));
                }
            }
        }
        for (name, map) in &self.functions {
            let arity = self.function_arity(*name).unwrap_or(0);
            if arity == 0 {
                return Err(Error::malformed(format!("function `{name}` takes no arguments")));
            }
            for (args, y) in map {
                if args.len() != arity {
                    return Err(Error::malformed(format!("inconsistent arity for function `{name}`")));
                }
                if args.iter().any(outside) || outside(y) {
                    return Err(Error::malformed(format!("`{name}` maps values outside the universe")));
                }
            }
            if tuple_count(self.universe.len(), arity) != Some(map.len()) {
                return Err(Error::malformed(format!("function `{name}` is not total")));
            }
        }
        Ok(())
    }

    pub fn universe(&self) -> &HashSet<T> {
        &self.universe
    }
    pub fn constant_interpretations(&self) -> &HashMap<Text, T> {
        &self.constants
    }
    pub fn relation_interpretations(&self) -> &HashMap<Text, HashSet<Vec<T>>> {
        &self.relations
    }
    pub fn function_interpretations(&self) -> &HashMap<Text, HashMap<Vec<T>, T>> {
        &self.functions
    }

    /// `None` if the relation is not interpreted, or interpreted as empty.
    pub fn relation_arity(&self, name: Text) -> Option<usize> {
        self.relations.get(&name)?.iter().next().map(Vec::len)
    }
    pub fn function_arity(&self, name: Text) -> Option<usize> {
        self.functions.get(&name)?.keys().next().map(Vec::len)
    }

    pub fn evaluate_term(&self, term: &Term, assignment: &Assignment<T>) -> Result<T> {
        match term {
            Term::Constant(c) => {
                self.constants.get(c).cloned().ok_or_else(|| Error::missing("constant", c.as_str()))
            }
            Term::Variable(v) => assignment
                .get(v)
                .cloned()
                .ok_or_else(|| Error::UnassignedVariable { name: v.as_str().into() }),
            Term::Function(f, args) => {
                let map = self.functions.get(f).ok_or_else(|| Error::missing("function", f.as_str()))?;
                let args =
                    args.iter().map(|a| self.evaluate_term(a, assignment)).collect::<Result<Vec<_>>>()?;
                match map.get(&args) {
                    Some(y) => Ok(y.clone()),
                    None => Err(Error::ArityMismatch {
                        name: f.as_str().into(),
                        expected: self.function_arity(*f).unwrap_or(0),
                        found: args.len(),
                    }),
                }
            }
        }
    }

    pub fn evaluate_formula(&self, formula: &Formula, assignment: &Assignment<T>) -> Result<bool> {
        match formula {
            Formula::Equality(a, b) => {
                Ok(self.evaluate_term(a, assignment)? == self.evaluate_term(b, assignment)?)
            }
            Formula::Relation(r, args) => {
                let tuples = self.relations.get(r).ok_or_else(|| Error::missing("relation", r.as_str()))?;
                if let Some(expected) = self.relation_arity(*r).filter(|&n| n != args.len()) {
                    return Err(Error::ArityMismatch {
                        name: r.as_str().into(),
                        expected,
                        found: args.len(),
                    });
                }
                let args =
                    args.iter().map(|a| self.evaluate_term(a, assignment)).collect::<Result<Vec<_>>>()?;
                Ok(tuples.contains(&args))
            }
            Formula::Not(f) => Ok(!self.evaluate_formula(f, assignment)?),
            Formula::Binary(c, a, b) => {
                let a = self.evaluate_formula(a, assignment)?;
                let b = self.evaluate_formula(b, assignment)?;
                Ok(match c {
                    Connective::And => a && b,
                    Connective::Or => a || b,
                    Connective::Implies => !a || b,
                })
            }
            Formula::Quantified(q, v, f) => {
                let mut inner = assignment.clone();
                let witness = matches!(q, Quantifier::Exists);
                for x in &self.universe {
                    inner.insert(*v, x.clone());
                    if self.evaluate_formula(f, &inner)? == witness {
                        return Ok(witness);
                    }
                }
                Ok(!witness)
            }
        }
    }

    /// Whether every formula holds under every assignment of its free variables.
    pub fn is_model_of<'f>(&self, formulas: impl IntoIterator<Item = &'f Formula>) -> Result<bool> {
        for formula in formulas {
            let mut free: Vec<Text> = formula.free_variables().into_iter().collect();
            free.sort();
            if !self.holds_for_all(formula, &free, &mut Assignment::default())? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn holds_for_all(&self, formula: &Formula, free: &[Text], assignment: &mut Assignment<T>) -> Result<bool> {
        let Some((v, rest)) = free.split_first() else {
            return self.evaluate_formula(formula, assignment);
        };
        for x in &self.universe {
            assignment.insert(*v, x.clone());
            if !self.holds_for_all(formula, rest, assignment)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
