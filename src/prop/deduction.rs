//! Proof combinators over the Hilbert system: corollaries, combining two
//! proofs, and the deduction theorem with its consequences.

use crate::{
    error::{Error, Result},
    prop::{axioms, inline::Renumbering, Formula, InferenceRule, Line, Proof, Variable},
};
use tracing::debug;

fn require(condition: bool, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::precondition(message()))
    }
}

/// `conditional` must be an assumption-free rule specializing to `formula`.
fn require_axiom_for(conditional: &InferenceRule, formula: &Formula) -> Result<()> {
    require(conditional.assumptions.is_empty(), || {
        format!("{conditional} has assumptions")
    })?;
    require(InferenceRule::axiom(formula.clone()).is_specialization_of(conditional), || {
        format!("{formula} is not a specialization of {conditional}")
    })
}

/// From a proof of `A ==> φ` and an axiom specializing to `(φ->ψ)`, proves
/// `A ==> ψ`.
pub fn prove_corollary(
    antecedent_proof: &Proof,
    consequent: &Formula,
    conditional: &InferenceRule,
) -> Result<Proof> {
    antecedent_proof.ensure_valid()?;
    let antecedent = &antecedent_proof.statement.conclusion;
    let implication = Formula::implies(antecedent.clone(), consequent.clone());
    require_axiom_for(conditional, &implication)?;

    let mut lines = antecedent_proof.lines.clone();
    let last = lines.len() - 1;
    lines.push(Line::derivation(implication, conditional.clone(), []));
    lines.push(Line::derivation(consequent.clone(), axioms::mp(), [last, last + 1]));

    let mut rules = antecedent_proof.rules.clone();
    rules.extend([axioms::mp(), conditional.clone()]);
    let statement =
        InferenceRule::new(antecedent_proof.statement.assumptions.clone(), consequent.clone());
    Ok(Proof { statement, rules, lines })
}

/// From proofs of `A ==> φ1` and `A ==> φ2` (same assumptions, same rules) and
/// an axiom specializing to `(φ1->(φ2->ψ))`, proves `A ==> ψ`.
pub fn combine_proofs(
    antecedent1_proof: &Proof,
    antecedent2_proof: &Proof,
    consequent: &Formula,
    double_conditional: &InferenceRule,
) -> Result<Proof> {
    antecedent1_proof.ensure_valid()?;
    antecedent2_proof.ensure_valid()?;
    require(
        antecedent1_proof.statement.assumptions == antecedent2_proof.statement.assumptions,
        || "proofs have different assumptions".into(),
    )?;
    require(antecedent1_proof.rules == antecedent2_proof.rules, || {
        "proofs have different rules".into()
    })?;
    let first = &antecedent1_proof.statement.conclusion;
    let second = &antecedent2_proof.statement.conclusion;
    let inner = Formula::implies(second.clone(), consequent.clone());
    let double = Formula::implies(first.clone(), inner.clone());
    require_axiom_for(double_conditional, &double)?;

    let mut lines = antecedent1_proof.lines.clone();
    let first_at = lines.len() - 1;
    let mut table = Renumbering::default();
    for line in &antecedent2_proof.lines {
        table.emit(&mut lines, line)?;
    }
    let second_at = lines.len() - 1;
    lines.push(Line::derivation(double, double_conditional.clone(), []));
    lines.push(Line::derivation(inner, axioms::mp(), [first_at, second_at + 1]));
    lines.push(Line::derivation(consequent.clone(), axioms::mp(), [second_at, second_at + 2]));

    let mut rules = antecedent1_proof.rules.clone();
    rules.extend([axioms::mp(), double_conditional.clone()]);
    let statement =
        InferenceRule::new(antecedent1_proof.statement.assumptions.clone(), consequent.clone());
    Ok(Proof { statement, rules, lines })
}

/// The deduction theorem. From a proof of `A ∪ {φ} ==> ψ`, where `φ` is the
/// last assumption and every rule is MP or has no assumptions, proves
/// `A ==> (φ->ψ)` via the same rules plus MP, I0, I1 and D.
pub fn remove_assumption(proof: &Proof) -> Result<Proof> {
    proof.ensure_valid()?;
    let Some((phi, remaining)) = proof.statement.assumptions.split_last() else {
        return Err(Error::precondition(format!("{} has no assumptions", proof.statement)));
    };
    let mp = axioms::mp();
    for rule in &proof.rules {
        require(*rule == mp || rule.assumptions.is_empty(), || {
            format!("{rule} is neither MP nor free of assumptions")
        })?;
    }

    let (i0, i1, d) = (axioms::i0(), axioms::i1(), axioms::d());
    let conditioned = |xi: &Formula| Formula::implies(phi.clone(), xi.clone());
    let mut lines: Vec<Line> = vec![];
    // index of the line proving `(φ->ξ)` for each original line `ξ`
    let mut table = Renumbering::default();
    for line in &proof.lines {
        let xi = line.formula();
        match line.justifications() {
            _ if xi == phi => {
                lines.push(Line::derivation(conditioned(xi), i0.clone(), []));
            }
            [] => {
                let at = lines.len();
                lines.push(line.clone());
                let weakening = Formula::implies(xi.clone(), conditioned(xi));
                lines.push(Line::derivation(weakening, i1.clone(), []));
                lines.push(Line::derivation(conditioned(xi), mp.clone(), [at, at + 1]));
            }
            // MP from `ξa` and `(ξa->ξ)`
            &[minor, major] => {
                let xa = proof.lines[minor].formula();
                let distribution = Formula::implies(
                    conditioned(proof.lines[major].formula()),
                    Formula::implies(conditioned(xa), conditioned(xi)),
                );
                let at = lines.len();
                lines.push(Line::derivation(distribution, d.clone(), []));
                lines.push(Line::derivation(
                    Formula::implies(conditioned(xa), conditioned(xi)),
                    mp.clone(),
                    [table.translate(major)?, at],
                ));
                lines.push(Line::derivation(
                    conditioned(xi),
                    mp.clone(),
                    [table.translate(minor)?, at + 1],
                ));
            }
            _ => return Err(Error::invalid_proof(&proof.statement)),
        }
        table.alias(lines.len() - 1);
    }

    let mut rules = proof.rules.clone();
    rules.extend([mp, i0, i1, d]);
    let statement = InferenceRule::new(remaining.to_vec(), conditioned(&proof.statement.conclusion));
    debug!(from = proof.lines.len(), to = lines.len(), "removed assumption");
    Ok(Proof { statement, rules, lines })
}

/// From proofs of `A ==> φ` and `A ==> ~φ`, proves `A ==> conclusion`.
pub fn prove_from_opposites(
    proof_of_affirmation: &Proof,
    proof_of_negation: &Proof,
    conclusion: &Formula,
) -> Result<Proof> {
    let affirmation = &proof_of_affirmation.statement.conclusion;
    require(
        proof_of_negation.statement.conclusion == Formula::not(affirmation.clone()),
        || format!("{} is not the negation of {affirmation}", proof_of_negation.statement.conclusion),
    )?;
    combine_proofs(proof_of_negation, proof_of_affirmation, conclusion, &axioms::i2())
}

/// From a proof of `A ∪ {~φ} ==> ~(p->p)`, where `~φ` is the last assumption
/// and every rule is MP or has no assumptions, proves `A ==> φ`.
pub fn prove_by_way_of_contradiction(proof: &Proof) -> Result<Proof> {
    let p = Formula::Variable(Variable::known("p"));
    let tautology = Formula::implies(p.clone(), p);
    require(proof.statement.conclusion == Formula::not(tautology.clone()), || {
        format!("{} does not conclude ~(p->p)", proof.statement)
    })?;
    let Some(Formula::Not(phi)) = proof.statement.assumptions.last() else {
        return Err(Error::precondition(format!(
            "the last assumption of {} is not a negation",
            proof.statement
        )));
    };
    let phi = phi.as_ref().clone();

    let conditional = remove_assumption(proof)?;
    let mut lines = conditional.lines.clone();
    let at = lines.len();
    let (mp, i0, n) = (axioms::mp(), axioms::i0(), axioms::n());
    lines.push(Line::derivation(
        Formula::implies(
            conditional.statement.conclusion.clone(),
            Formula::implies(tautology.clone(), phi.clone()),
        ),
        n.clone(),
        [],
    ));
    lines.push(Line::derivation(
        Formula::implies(tautology.clone(), phi.clone()),
        mp.clone(),
        [at - 1, at],
    ));
    lines.push(Line::derivation(tautology, i0.clone(), []));
    lines.push(Line::derivation(phi.clone(), mp.clone(), [at + 2, at + 1]));

    let mut rules = conditional.rules.clone();
    rules.extend([mp, i0, n]);
    let statement = InferenceRule::new(conditional.statement.assumptions.clone(), phi);
    Ok(Proof { statement, rules, lines })
}
