use crate::{
    error::{Error, Result},
    text::Text,
};
use std::collections::{HashMap, HashSet};

/// A propositional variable name: a letter between `p` and `z`, followed by
/// zero or more digits. Only valid names can be constructed.
#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone, Copy)]
pub struct Variable(Text);

/// A simultaneous substitution of formulas for variables. Values are not
/// further substituted into each other.
pub type SpecializationMap = HashMap<Variable, Formula>;

#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone, Copy, Debug)]
pub enum BinaryOp {
    And,
    Or,
    Implies,
    Xor,
    Iff,
    Nand,
    Nor,
}

#[derive(Hash, PartialOrd, Ord, Eq, PartialEq, Clone)]
pub enum Formula {
    Constant(bool),
    Variable(Variable),
    Not(Box<Formula>),
    Binary(BinaryOp, Box<Formula>, Box<Formula>),
}

pub fn is_variable_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some('p'..='z')) && chars.all(|c| c.is_ascii_digit())
}

impl Variable {
    pub fn new(name: &str) -> Result<Self> {
        if is_variable_name(name) {
            Ok(Self(Text::from_str(name)))
        } else {
            Err(Error::invalid_name("propositional variable", name))
        }
    }
    /// For names already checked by the grammar, or literals in this crate.
    pub(crate) fn known(name: &str) -> Self {
        debug_assert!(is_variable_name(name));
        Self(Text::from_str(name))
    }
    pub fn name(&self) -> &'static str {
        self.0.as_str()
    }
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 7] = [
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::Implies,
        BinaryOp::Xor,
        BinaryOp::Iff,
        BinaryOp::Nand,
        BinaryOp::Nor,
    ];
    pub fn symbol(self) -> &'static str {
        match self {
            Self::And => "&",
            Self::Or => "|",
            Self::Implies => "->",
            Self::Xor => "+",
            Self::Iff => "<->",
            Self::Nand => "-&",
            Self::Nor => "-|",
        }
    }
    pub fn from_symbol(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == s)
    }
}

impl From<Variable> for Formula {
    fn from(v: Variable) -> Self {
        Formula::Variable(v)
    }
}

impl Formula {
    pub fn var(name: &str) -> Result<Self> {
        Variable::new(name).map(Self::Variable)
    }
    pub fn not(f: Formula) -> Self {
        Self::Not(Box::new(f))
    }
    pub fn binary(op: BinaryOp, a: Formula, b: Formula) -> Self {
        Self::Binary(op, Box::new(a), Box::new(b))
    }
    pub fn implies(a: Formula, b: Formula) -> Self {
        Self::binary(BinaryOp::Implies, a, b)
    }
    pub fn and(a: Formula, b: Formula) -> Self {
        Self::binary(BinaryOp::And, a, b)
    }
    pub fn or(a: Formula, b: Formula) -> Self {
        Self::binary(BinaryOp::Or, a, b)
    }

    pub fn visit_formulas<'a: 'b, 'b>(&'a self, visitor: &'b mut impl FnMut(&'a Self)) {
        visitor(self);
        match self {
            Self::Constant(_) | Self::Variable(_) => {}
            Self::Not(f) => f.visit_formulas(visitor),
            Self::Binary(_, a, b) => {
                a.visit_formulas(visitor);
                b.visit_formulas(visitor);
            }
        }
    }

    pub fn variables(&self) -> HashSet<Variable> {
        let mut buf = HashSet::default();
        self.visit_formulas(&mut |f| {
            if let Self::Variable(v) = f {
                buf.insert(*v);
            }
        });
        buf
    }

    /// Replaces every occurrence of each variable in `map`, all at once.
    /// Variables not in `map` are left untouched.
    pub fn substitute_variables(&self, map: &SpecializationMap) -> Self {
        match self {
            Self::Constant(c) => Self::Constant(*c),
            Self::Variable(v) => match map.get(v) {
                Some(replacement) => replacement.clone(),
                None => Self::Variable(*v),
            },
            Self::Not(f) => Self::not(f.substitute_variables(map)),
            Self::Binary(op, a, b) => {
                Self::binary(*op, a.substitute_variables(map), b.substitute_variables(map))
            }
        }
    }
}
