use crate::{fol, prop};
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

/// `Debug` prints the same text as `Display`.
macro_rules! debug_as_display {
    ($($t:ty),*) => {$(
        impl Debug for $t {
            fn fmt(&self, f: &mut Formatter) -> FmtResult {
                Display::fmt(self, f)
            }
        }
    )*};
}

debug_as_display!(
    prop::Variable,
    prop::Formula,
    prop::InferenceRule,
    prop::Line,
    fol::Term,
    fol::Formula
);

fn comma_separated<T: Display>(f: &mut Formatter, items: &[T], sep: &str) -> FmtResult {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for prop::Variable {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(self.name())
    }
}

impl Display for prop::Formula {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Constant(true) => write!(f, "T"),
            Self::Constant(false) => write!(f, "F"),
            Self::Variable(v) => write!(f, "{v}"),
            Self::Not(x) => write!(f, "~{x}"),
            Self::Binary(op, a, b) => write!(f, "({a}{}{b})", op.symbol()),
        }
    }
}

impl Display for prop::InferenceRule {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "[")?;
        comma_separated(f, &self.assumptions, ", ")?;
        write!(f, "] ==> {}", self.conclusion)
    }
}

impl Display for prop::Line {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Assumption(formula) => write!(f, "{formula}"),
            Self::Derivation { formula, rule, assumptions } => {
                write!(f, "{formula}    (Inference Rule {rule}")?;
                match assumptions.as_slice() {
                    [] => {}
                    [single] => write!(f, " on line {single}")?,
                    many => {
                        write!(f, " on lines ")?;
                        comma_separated(f, many, ",")?;
                    }
                }
                write!(f, ")")
            }
        }
    }
}

impl Display for prop::Proof {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        writeln!(f, "Proof of {} via inference rules:", self.statement)?;
        for rule in &self.rules {
            writeln!(f, "  {rule}")?;
        }
        writeln!(f, "Lines:")?;
        for (i, line) in self.lines.iter().enumerate() {
            writeln!(f, "{i:3}) {line}")?;
        }
        writeln!(f, "QED")
    }
}
impl Debug for prop::Proof {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.debug_struct("Proof")
            .field("statement", &self.statement)
            .field("rules", &self.rules)
            .field("lines", &self.lines)
            .finish()
    }
}

impl Display for fol::Term {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Constant(c) | Self::Variable(c) => write!(f, "{c}"),
            Self::Function(name, args) => {
                write!(f, "{name}(")?;
                comma_separated(f, args, ",")?;
                write!(f, ")")
            }
        }
    }
}

impl Display for fol::Formula {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Equality(a, b) => write!(f, "{a}={b}"),
            Self::Relation(name, args) => {
                write!(f, "{name}(")?;
                comma_separated(f, args, ",")?;
                write!(f, ")")
            }
            Self::Not(x) => write!(f, "~{x}"),
            Self::Binary(c, a, b) => write!(f, "({a}{}{b})", c.symbol()),
            Self::Quantified(q, v, x) => write!(f, "{}{v}[{x}]", q.symbol()),
        }
    }
}
