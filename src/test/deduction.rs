use super::{f, init_logging, rule};
use crate::{
    error::Error,
    prop::{
        axioms,
        deduction::{
            combine_proofs, prove_by_way_of_contradiction, prove_corollary, prove_from_opposites,
            remove_assumption,
        },
        Line, Proof,
    },
};

fn assumed(statement: &str, formula: &str) -> Proof {
    Proof::new(rule(statement), [], [Line::assumption(f(formula))])
}

#[test]
fn corollary() {
    let proof = prove_corollary(&assumed("[q] ==> q", "q"), &f("(p->q)"), &axioms::i1()).unwrap();
    assert!(proof.is_valid());
    assert_eq!(proof.statement, rule("[q] ==> (p->q)"));
    assert!(proof.rules.contains(&axioms::mp()));

    let wrong = prove_corollary(&assumed("[q] ==> q", "q"), &f("(p->r)"), &axioms::i1());
    assert!(matches!(wrong, Err(Error::Precondition { .. })));
    let not_axiom = prove_corollary(&assumed("[q] ==> q", "q"), &f("r"), &axioms::mp());
    assert!(matches!(not_axiom, Err(Error::Precondition { .. })));
}

#[test]
fn combined() {
    let introduction = rule("[] ==> (p->(q->(p&q)))");
    let first = assumed("[p, q] ==> p", "p");
    let second = assumed("[p, q] ==> q", "q");
    let proof = combine_proofs(&first, &second, &f("(p&q)"), &introduction).unwrap();
    assert!(proof.is_valid());
    assert_eq!(proof.statement, rule("[p, q] ==> (p&q)"));
    assert_eq!(proof.lines.len(), 5);

    let other = assumed("[q, p] ==> q", "q");
    let mismatch = combine_proofs(&first, &other, &f("(p&q)"), &introduction);
    assert!(matches!(mismatch, Err(Error::Precondition { .. })));
}

#[test]
fn deduction_theorem() {
    init_logging();
    let mp = axioms::mp();
    let proof = Proof::new(
        rule("[(p->q), p] ==> q"),
        [mp.clone()],
        [
            Line::assumption(f("p")),
            Line::assumption(f("(p->q)")),
            Line::derivation(f("q"), mp.clone(), [0, 1]),
        ],
    );
    assert!(proof.is_valid());
    let removed = remove_assumption(&proof).unwrap();
    assert!(removed.is_valid(), "{removed}");
    assert_eq!(removed.statement, rule("[(p->q)] ==> (p->q)"));
    assert_eq!(removed.lines.len(), 7);
    for r in [mp, axioms::i0(), axioms::i1(), axioms::d()] {
        assert!(removed.rules.contains(&r));
    }

    let without = assumed("[] ==> T", "T");
    assert!(matches!(remove_assumption(&without), Err(Error::InvalidProof { .. })));
    let nothing_to_remove = Proof::new(rule("[] ==> (p->p)"), [axioms::i0()], [Line::derivation(f("(p->p)"), axioms::i0(), [])]);
    assert!(matches!(remove_assumption(&nothing_to_remove), Err(Error::Precondition { .. })));

    let and = rule("[p, q] ==> (p&q)");
    let other_rule = Proof::new(
        rule("[p] ==> (p&p)"),
        [and.clone()],
        [Line::assumption(f("p")), Line::derivation(f("(p&p)"), and, [0, 0])],
    );
    assert!(other_rule.is_valid());
    assert!(matches!(remove_assumption(&other_rule), Err(Error::Precondition { .. })));
}

#[test]
fn opposites() {
    let affirmation = assumed("[p, ~p] ==> p", "p");
    let negation = assumed("[p, ~p] ==> ~p", "~p");
    let proof = prove_from_opposites(&affirmation, &negation, &f("(r|s)")).unwrap();
    assert!(proof.is_valid());
    assert_eq!(proof.statement, rule("[p, ~p] ==> (r|s)"));
    assert!(proof.rules.contains(&axioms::i2()));

    let unrelated = assumed("[p, ~p] ==> p", "p");
    assert!(matches!(prove_from_opposites(&affirmation, &unrelated, &f("r")), Err(Error::Precondition { .. })));
}

#[test]
fn contradiction() {
    let proof = assumed("[~(p->p), ~q] ==> ~(p->p)", "~(p->p)");
    let direct = prove_by_way_of_contradiction(&proof).unwrap();
    assert!(direct.is_valid(), "{direct}");
    assert_eq!(direct.statement, rule("[~(p->p)] ==> q"));
    assert!(direct.rules.contains(&axioms::n()));

    let no_contradiction = assumed("[~q] ==> ~q", "~q");
    assert!(matches!(prove_by_way_of_contradiction(&no_contradiction), Err(Error::Precondition { .. })));
}
