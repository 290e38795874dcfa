//! The standard rules of the Hilbert system that the proof combinators in
//! [`deduction`](super::deduction) build on.

use crate::prop::{Formula, InferenceRule, Variable};

fn var(name: &'static str) -> Formula {
    Formula::Variable(Variable::known(name))
}

fn implies(a: Formula, b: Formula) -> Formula {
    Formula::implies(a, b)
}

/// Modus ponens: `[p, (p->q)] ==> q`.
pub fn mp() -> InferenceRule {
    InferenceRule::new([var("p"), implies(var("p"), var("q"))], var("q"))
}

/// `(p->p)`
pub fn i0() -> InferenceRule {
    InferenceRule::axiom(implies(var("p"), var("p")))
}

/// `(q->(p->q))`
pub fn i1() -> InferenceRule {
    InferenceRule::axiom(implies(var("q"), implies(var("p"), var("q"))))
}

/// `((p->(q->r))->((p->q)->(p->r)))`
pub fn d() -> InferenceRule {
    InferenceRule::axiom(implies(
        implies(var("p"), implies(var("q"), var("r"))),
        implies(implies(var("p"), var("q")), implies(var("p"), var("r"))),
    ))
}

/// `(~p->(p->q))`
pub fn i2() -> InferenceRule {
    InferenceRule::axiom(implies(Formula::not(var("p")), implies(var("p"), var("q"))))
}

/// `((~q->~p)->(p->q))`
pub fn n() -> InferenceRule {
    InferenceRule::axiom(implies(
        implies(Formula::not(var("q")), Formula::not(var("p"))),
        implies(var("p"), var("q")),
    ))
}
