use crate::{
    error::{Error, Result},
    prop::{Formula, InferenceRule},
    util::VecSet,
};
use tracing::debug;

/// A proof line, justified either as an assumption of the proof's statement or
/// as an application of an allowed rule to strictly earlier lines.
#[derive(Hash, Eq, PartialEq, Clone)]
pub enum Line {
    Assumption(Formula),
    Derivation {
        formula: Formula,
        rule: InferenceRule,
        /// Indices of the lines supplying the rule's assumptions, in order.
        assumptions: Vec<usize>,
    },
}

/// A deductive proof. Validity is a checked property, not a construction
/// invariant: invalid proofs can be built and then examined.
#[derive(Clone, PartialEq, Eq)]
pub struct Proof {
    pub statement: InferenceRule,
    pub rules: VecSet<InferenceRule>,
    pub lines: Vec<Line>,
}

/// Why a single line fails to be justified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineFault {
    /// An assumption line whose formula is not among the statement's assumptions.
    NotAnAssumption,
    /// A justification index that does not point to a strictly earlier line.
    ForwardReference { justification: usize },
    /// The line's rule is not in the proof's allowed rules.
    RuleNotAllowed,
    /// The line and its justifications do not specialize the line's rule.
    NotASpecialization,
}

/// Why a whole proof fails to prove its statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofFault {
    Empty,
    InvalidLine { line: usize, fault: LineFault },
    WrongConclusion,
}

impl Line {
    pub fn assumption(formula: Formula) -> Self {
        Self::Assumption(formula)
    }
    pub fn derivation(
        formula: Formula,
        rule: InferenceRule,
        assumptions: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self::Derivation { formula, rule, assumptions: assumptions.into_iter().collect() }
    }
    pub fn formula(&self) -> &Formula {
        match self {
            Self::Assumption(formula) | Self::Derivation { formula, .. } => formula,
        }
    }
    pub fn rule(&self) -> Option<&InferenceRule> {
        match self {
            Self::Assumption(_) => None,
            Self::Derivation { rule, .. } => Some(rule),
        }
    }
    pub fn justifications(&self) -> &[usize] {
        match self {
            Self::Assumption(_) => &[],
            Self::Derivation { assumptions, .. } => assumptions,
        }
    }
    pub fn is_assumption(&self) -> bool {
        matches!(self, Self::Assumption(_))
    }
    pub fn with_formula(&self, formula: Formula) -> Self {
        match self {
            Self::Assumption(_) => Self::Assumption(formula),
            Self::Derivation { rule, assumptions, .. } => Self::Derivation {
                formula,
                rule: rule.clone(),
                assumptions: assumptions.clone(),
            },
        }
    }
}

impl Proof {
    pub fn new(
        statement: InferenceRule,
        rules: impl IntoIterator<Item = InferenceRule>,
        lines: impl IntoIterator<Item = Line>,
    ) -> Self {
        Self { statement, rules: rules.into_iter().collect(), lines: lines.into_iter().collect() }
    }

    fn check_line_index(&self, line: usize) -> Result<()> {
        if line < self.lines.len() {
            Ok(())
        } else {
            Err(Error::LineOutOfRange { line, len: self.lines.len() })
        }
    }

    /// The rule with the formulas of `line`'s justifications as assumptions
    /// (in order) and `line`'s formula as conclusion; `None` for assumption lines.
    pub fn rule_for_line(&self, line: usize) -> Result<Option<InferenceRule>> {
        self.check_line_index(line)?;
        let Line::Derivation { formula, assumptions, .. } = &self.lines[line] else {
            return Ok(None);
        };
        let assumptions = assumptions
            .iter()
            .map(|&j| {
                self.check_line_index(j)?;
                Ok(self.lines[j].formula().clone())
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(InferenceRule::new(assumptions, formula.clone())))
    }

    /// Requires `line < self.lines.len()`.
    fn line_fault(&self, line: usize) -> Option<LineFault> {
        match &self.lines[line] {
            Line::Assumption(formula) => {
                (!self.statement.assumptions.contains(formula)).then_some(LineFault::NotAnAssumption)
            }
            Line::Derivation { formula, rule, assumptions } => {
                if let Some(&justification) = assumptions.iter().find(|&&j| j >= line) {
                    return Some(LineFault::ForwardReference { justification });
                }
                if !self.rules.contains(rule) {
                    return Some(LineFault::RuleNotAllowed);
                }
                let used = InferenceRule::new(
                    assumptions.iter().map(|&j| self.lines[j].formula().clone()),
                    formula.clone(),
                );
                (!used.is_specialization_of(rule)).then_some(LineFault::NotASpecialization)
            }
        }
    }

    pub fn is_line_valid(&self, line: usize) -> Result<bool> {
        self.check_line_index(line)?;
        Ok(self.line_fault(line).is_none())
    }

    /// The first reason, in line order, why this proof does not prove its statement.
    pub fn check(&self) -> std::result::Result<(), ProofFault> {
        let Some(last) = self.lines.last() else {
            return Err(ProofFault::Empty);
        };
        for line in 0..self.lines.len() {
            if let Some(fault) = self.line_fault(line) {
                debug!(line, ?fault, statement = %self.statement, "invalid proof line");
                return Err(ProofFault::InvalidLine { line, fault });
            }
        }
        if *last.formula() != self.statement.conclusion {
            debug!(statement = %self.statement, last = %last.formula(), "proof concludes something else");
            return Err(ProofFault::WrongConclusion);
        }
        Ok(())
    }

    /// Every reason this proof does not prove its statement.
    pub fn diagnose(&self) -> Vec<ProofFault> {
        let Some(last) = self.lines.last() else {
            return vec![ProofFault::Empty];
        };
        let mut faults: Vec<_> = (0..self.lines.len())
            .filter_map(|line| Some(ProofFault::InvalidLine { line, fault: self.line_fault(line)? }))
            .collect();
        if *last.formula() != self.statement.conclusion {
            faults.push(ProofFault::WrongConclusion);
        }
        faults
    }

    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    pub(crate) fn ensure_valid(&self) -> Result<()> {
        self.check().map_err(|_| Error::invalid_proof(&self.statement))
    }

    /// Indices of the lines justified by exactly `rule`.
    pub fn lines_using<'a>(&'a self, rule: &'a InferenceRule) -> impl Iterator<Item = usize> + 'a {
        self.lines.iter().enumerate().filter_map(move |(i, line)| (line.rule() == Some(rule)).then_some(i))
    }
}
