use crate::{
    error::{Error, Result},
    text::Text,
};
use std::collections::HashSet;

#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone)]
pub enum Term {
    Constant(Text),
    Variable(Text),
    Function(Text, Vec<Term>),
}

#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone, Copy, Debug)]
pub enum Connective {
    And,
    Or,
    Implies,
}

#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone, Copy, Debug)]
pub enum Quantifier {
    Forall,
    Exists,
}

#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone)]
pub enum Formula {
    Equality(Term, Term),
    Relation(Text, Vec<Term>),
    Not(Box<Formula>),
    Binary(Connective, Box<Formula>, Box<Formula>),
    Quantified(Quantifier, Text, Box<Formula>),
}

fn starts_in(s: &str, range: core::ops::RangeInclusive<char>) -> bool {
    s.chars().next().is_some_and(|c| range.contains(&c)) && s.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn is_constant_name(s: &str) -> bool {
    s == "_" || starts_in(s, 'a'..='e') || starts_in(s, '0'..='9')
}
pub fn is_variable_name(s: &str) -> bool {
    starts_in(s, 'u'..='z')
}
pub fn is_function_name(s: &str) -> bool {
    starts_in(s, 'f'..='t')
}
pub fn is_relation_name(s: &str) -> bool {
    starts_in(s, 'F'..='T')
}

fn checked(name: &str, kind: &'static str, ok: fn(&str) -> bool) -> Result<Text> {
    if ok(name) {
        Ok(Text::from_str(name))
    } else {
        Err(Error::invalid_name(kind, name))
    }
}

impl Connective {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::And => "&",
            Self::Or => "|",
            Self::Implies => "->",
        }
    }
}

impl Quantifier {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Forall => "A",
            Self::Exists => "E",
        }
    }
}

impl Term {
    pub fn constant(name: &str) -> Result<Self> {
        checked(name, "constant", is_constant_name).map(Self::Constant)
    }
    pub fn variable(name: &str) -> Result<Self> {
        checked(name, "variable", is_variable_name).map(Self::Variable)
    }
    pub fn function(name: &str, args: Vec<Term>) -> Result<Self> {
        if args.is_empty() {
            return Err(Error::precondition(format!("function `{name}` needs arguments")));
        }
        checked(name, "function", is_function_name).map(|f| Self::Function(f, args))
    }

    pub fn visit_terms<'a: 'b, 'b>(&'a self, visitor: &'b mut impl FnMut(&'a Self)) {
        visitor(self);
        if let Self::Function(_, args) = self {
            for arg in args {
                arg.visit_terms(visitor)
            }
        }
    }

    pub fn is_function_invocation(&self) -> bool {
        matches!(self, Self::Function(..))
    }

    pub fn variables(&self) -> HashSet<Text> {
        let mut buf = HashSet::default();
        self.visit_terms(&mut |t| {
            if let Self::Variable(v) = t {
                buf.insert(*v);
            }
        });
        buf
    }

    pub fn functions(&self) -> HashSet<(Text, usize)> {
        let mut buf = HashSet::default();
        self.visit_terms(&mut |t| {
            if let Self::Function(f, args) = t {
                buf.insert((*f, args.len()));
            }
        });
        buf
    }
}

impl Formula {
    pub fn equality(a: Term, b: Term) -> Self {
        Self::Equality(a, b)
    }
    pub fn relation(name: &str, args: Vec<Term>) -> Result<Self> {
        checked(name, "relation", is_relation_name).map(|r| Self::Relation(r, args))
    }
    pub fn not(f: Formula) -> Self {
        Self::Not(Box::new(f))
    }
    pub fn binary(c: Connective, a: Formula, b: Formula) -> Self {
        Self::Binary(c, Box::new(a), Box::new(b))
    }
    pub fn and(a: Formula, b: Formula) -> Self {
        Self::binary(Connective::And, a, b)
    }
    pub fn implies(a: Formula, b: Formula) -> Self {
        Self::binary(Connective::Implies, a, b)
    }
    pub fn quantified(q: Quantifier, variable: &str, f: Formula) -> Result<Self> {
        checked(variable, "variable", is_variable_name).map(|v| Self::Quantified(q, v, Box::new(f)))
    }
    /// `Q v1[Q v2[... f]]` over `variables`, outermost first.
    pub(crate) fn quantify_all(q: Quantifier, variables: &[Text], f: Formula) -> Self {
        variables.iter().rev().fold(f, |f, v| Self::Quantified(q, *v, Box::new(f)))
    }

    pub fn visit_formulas<'a: 'b, 'b>(&'a self, visitor: &'b mut impl FnMut(&'a Self)) {
        visitor(self);
        match self {
            Self::Equality(..) | Self::Relation(..) => {}
            Self::Not(f) | Self::Quantified(_, _, f) => f.visit_formulas(visitor),
            Self::Binary(_, a, b) => {
                a.visit_formulas(visitor);
                b.visit_formulas(visitor);
            }
        }
    }

    /// Every variable name occurring anywhere, bound or free.
    pub fn variables(&self) -> HashSet<Text> {
        let mut buf = HashSet::default();
        self.visit_formulas(&mut |f| match f {
            Self::Equality(a, b) => {
                buf.extend(a.variables());
                buf.extend(b.variables());
            }
            Self::Relation(_, args) => buf.extend(args.iter().flat_map(Term::variables)),
            Self::Quantified(_, v, _) => {
                buf.insert(*v);
            }
            Self::Not(_) | Self::Binary(..) => {}
        });
        buf
    }

    pub fn free_variables(&self) -> HashSet<Text> {
        match self {
            Self::Equality(a, b) => &a.variables() | &b.variables(),
            Self::Relation(_, args) => args.iter().flat_map(Term::variables).collect(),
            Self::Not(f) => f.free_variables(),
            Self::Binary(_, a, b) => &a.free_variables() | &b.free_variables(),
            Self::Quantified(_, v, f) => {
                let mut buf = f.free_variables();
                buf.remove(v);
                buf
            }
        }
    }

    pub fn functions(&self) -> HashSet<(Text, usize)> {
        let mut buf = HashSet::default();
        self.visit_formulas(&mut |f| match f {
            Self::Equality(a, b) => {
                buf.extend(a.functions());
                buf.extend(b.functions());
            }
            Self::Relation(_, args) => buf.extend(args.iter().flat_map(Term::functions)),
            _ => {}
        });
        buf
    }

    pub fn relations(&self) -> HashSet<(Text, usize)> {
        let mut buf = HashSet::default();
        self.visit_formulas(&mut |f| {
            if let Self::Relation(r, args) = f {
                buf.insert((*r, args.len()));
            }
        });
        buf
    }
}
