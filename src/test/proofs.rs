use super::{f, init_logging, rule};
use crate::{
    config::Config,
    error::Error,
    prop::{
        axioms, inline_proof, inline_proof_once, inline_proof_with, merge_specialization_maps,
        prove_specialization, Formula, InferenceRule, Line, LineFault, Proof, ProofFault,
        SpecializationMap, Variable,
    },
};

/// `[] ==> (p->p)` from MP, I1 and D.
fn self_implication() -> Proof {
    let (mp, i1, d) = (axioms::mp(), axioms::i1(), axioms::d());
    Proof::new(
        rule("[] ==> (p->p)"),
        [mp.clone(), i1.clone(), d.clone()],
        [
            Line::derivation(f("(p->((p->p)->p))"), i1.clone(), []),
            Line::derivation(f("((p->((p->p)->p))->((p->(p->p))->(p->p)))"), d, []),
            Line::derivation(f("((p->(p->p))->(p->p))"), mp.clone(), [0, 1]),
            Line::derivation(f("(p->(p->p))"), i1, []),
            Line::derivation(f("(p->p)"), mp, [3, 2]),
        ],
    )
}

fn map(entries: &[(&str, &str)]) -> SpecializationMap {
    entries.iter().map(|(v, x)| (Variable::new(v).unwrap(), f(x))).collect()
}

#[test]
fn formula_display() {
    for text in ["((p->q)&~r1)", "(T<->~F)", "((x-&y)-|(z+w))", "~~s"] {
        assert_eq!(f(text).to_string(), text);
    }
    assert_eq!(f(" ( p |  q ) ").to_string(), "(p|q)");
}

#[test]
fn parse_errors() {
    for bad in ["(p->q", "p q", "(p)", "a", ""] {
        assert!(matches!(Formula::parse(bad), Err(Error::Parse { .. })), "{bad}");
    }
    assert!(matches!(InferenceRule::parse("[p] => q"), Err(Error::Parse { .. })));
    assert!(matches!(Variable::new("a1"), Err(Error::InvalidName { .. })));
    assert!(matches!(Formula::var("p1x"), Err(Error::InvalidName { .. })));
}

#[test]
fn rule_display() {
    let r = rule("[p, (p->q)] ==> q");
    assert_eq!(r.to_string(), "[p, (p->q)] ==> q");
    assert_eq!(r, axioms::mp());
    assert_eq!(rule("[]==>T").to_string(), "[] ==> T");
}

#[test]
fn formula_specialization_map() {
    let general = f("((p->q)&p)");
    assert_eq!(general.specialization_map(&f("((x->~y)&x)")), Some(map(&[("p", "x"), ("q", "~y")])));
    assert_eq!(general.specialization_map(&f("((x->~y)&y)")), None);
    assert_eq!(general.specialization_map(&f("((x|~y)&x)")), None);
    assert_eq!(f("T").specialization_map(&f("T")), Some(map(&[])));
    assert_eq!(f("T").specialization_map(&f("F")), None);
}

#[test]
fn rule_specialization_map() {
    let mp = axioms::mp();
    let special = rule("[(x&y), ((x&y)->~z)] ==> ~z");
    assert_eq!(mp.specialization_map(&special), Some(map(&[("p", "(x&y)"), ("q", "~z")])));
    assert!(special.is_specialization_of(&mp));
    assert!(!mp.is_specialization_of(&special));
    // a variable bound differently in two assumptions
    assert_eq!(mp.specialization_map(&rule("[(x&y), (r->~z)] ==> ~z")), None);
    assert_eq!(mp.specialization_map(&rule("[(x&y)] ==> ~z")), None);
    assert_eq!(mp.specialize(&map(&[("p", "(x&y)"), ("q", "~z")])), special);
}

#[test]
fn merging_maps() {
    let a = map(&[("p", "q")]);
    let b = map(&[("p", "q"), ("r", "T")]);
    assert_eq!(merge_specialization_maps(Some(a.clone()), Some(b.clone())), Some(b.clone()));
    assert_eq!(merge_specialization_maps(Some(a.clone()), Some(map(&[("p", "r")]))), None);
    assert_eq!(merge_specialization_maps(None, Some(b)), None);
    assert_eq!(merge_specialization_maps(Some(a), None), None);
}

#[test]
fn valid_proof() {
    init_logging();
    let proof = self_implication();
    assert!(proof.is_valid());
    assert_eq!(proof.check(), Ok(()));
    assert!(proof.diagnose().is_empty());
    for line in 0..proof.lines.len() {
        assert_eq!(proof.is_line_valid(line), Ok(true));
    }
    assert_eq!(proof.rule_for_line(0), Ok(Some(rule("[] ==> (p->((p->p)->p))"))));
    assert_eq!(proof.rule_for_line(4), Ok(Some(rule("[(p->(p->p)), ((p->(p->p))->(p->p))] ==> (p->p)"))));
    assert_eq!(proof.rule_for_line(5), Err(Error::LineOutOfRange { line: 5, len: 5 }));
}

#[test]
fn rule_must_be_allowed() {
    let i0 = axioms::i0();
    let proof = Proof::new(rule("[] ==> (q->q)"), [i0.clone()], [Line::derivation(f("(q->q)"), i0, [])]);
    assert!(proof.is_valid());

    // the same axiom up to renaming is still a different rule
    let renamed = rule("[] ==> (r->r)");
    let proof = Proof::new(rule("[] ==> (q->q)"), [axioms::i0()], [Line::derivation(f("(q->q)"), renamed, [])]);
    assert!(!proof.is_valid());
    assert_eq!(proof.is_line_valid(0), Ok(false));
    assert_eq!(proof.check(), Err(ProofFault::InvalidLine { line: 0, fault: LineFault::RuleNotAllowed }));
}

#[test]
fn invalid_proofs() {
    let mp = axioms::mp();
    let empty = Proof::new(rule("[] ==> p"), [mp.clone()], []);
    assert_eq!(empty.check(), Err(ProofFault::Empty));
    assert_eq!(empty.diagnose(), vec![ProofFault::Empty]);

    let wrong = Proof::new(rule("[p, q] ==> q"), [], [Line::assumption(f("p"))]);
    assert_eq!(wrong.check(), Err(ProofFault::WrongConclusion));

    let unassumed = Proof::new(rule("[p] ==> q"), [], [Line::assumption(f("q"))]);
    assert_eq!(unassumed.check(), Err(ProofFault::InvalidLine { line: 0, fault: LineFault::NotAnAssumption }));

    let forward = Proof::new(
        rule("[p, (p->q)] ==> q"),
        [mp.clone()],
        [
            Line::derivation(f("q"), mp.clone(), [1, 2]),
            Line::assumption(f("p")),
            Line::assumption(f("(p->q)")),
        ],
    );
    assert_eq!(
        forward.diagnose(),
        vec![
            ProofFault::InvalidLine { line: 0, fault: LineFault::ForwardReference { justification: 1 } },
            ProofFault::WrongConclusion,
        ]
    );

    let swapped = Proof::new(
        rule("[p, (p->q)] ==> q"),
        [mp.clone()],
        [Line::assumption(f("p")), Line::assumption(f("(p->q)")), Line::derivation(f("q"), mp, [1, 0])],
    );
    assert_eq!(swapped.check(), Err(ProofFault::InvalidLine { line: 2, fault: LineFault::NotASpecialization }));
}

#[test]
fn proof_display() {
    let text = self_implication().to_string();
    assert!(text.starts_with("Proof of [] ==> (p->p) via inference rules:\n  [p, (p->q)] ==> q\n"));
    assert!(text.contains("\nLines:\n  0) (p->((p->p)->p))    (Inference Rule [] ==> (q->(p->q)))\n"));
    assert!(text.contains("\n  4) (p->p)    (Inference Rule [p, (p->q)] ==> q on lines 3,2)\n"));
    assert!(text.ends_with("QED\n"));
    let line = Line::derivation(f("q"), rule("[p] ==> q"), [7]);
    assert_eq!(line.to_string(), "q    (Inference Rule [p] ==> q on line 7)");
    assert_eq!(Line::assumption(f("~p")).to_string(), "~p");
}

#[test]
fn specialized_proof() {
    let proof = self_implication();
    let target = rule("[] ==> ((r&s)->(r&s))");
    let special = prove_specialization(&proof, &target).unwrap();
    assert!(special.is_valid());
    assert_eq!(special.statement, target);
    assert_eq!(special.rules, proof.rules);
    assert_eq!(special.lines.len(), proof.lines.len());

    let not_special = rule("[] ==> (p->q)");
    assert!(matches!(prove_specialization(&proof, &not_special), Err(Error::NotASpecialization { .. })));
}

/// `[] ==> ((q->q)&(r->r))`, using `[] ==> (p->p)` as a lemma.
fn lemma_user() -> Proof {
    let lemma = rule("[] ==> (p->p)");
    let and = rule("[p, q] ==> (p&q)");
    Proof::new(
        rule("[] ==> ((q->q)&(r->r))"),
        [lemma.clone(), and.clone()],
        [
            Line::derivation(f("(q->q)"), lemma.clone(), []),
            Line::derivation(f("(r->r)"), lemma, []),
            Line::derivation(f("((q->q)&(r->r))"), and, [0, 1]),
        ],
    )
}

#[test]
fn inline_every_usage() {
    init_logging();
    let main = lemma_user();
    let lemma = self_implication();
    assert!(main.is_valid());

    let once = inline_proof_once(&main, 1, &lemma).unwrap();
    assert!(once.is_valid());
    assert_eq!(once.lines.len(), 7);
    assert_eq!(once.lines_using(&lemma.statement).collect::<Vec<_>>(), vec![0]);
    assert!(once.rules.contains(&lemma.statement));

    let inlined = inline_proof(&main, &lemma).unwrap();
    assert!(inlined.is_valid());
    assert_eq!(inlined.statement, main.statement);
    assert_eq!(inlined.lines.len(), 11);
    assert_eq!(inlined.lines_using(&lemma.statement).count(), 0);
    assert!(!inlined.rules.contains(&lemma.statement));
    for r in [axioms::mp(), axioms::i1(), axioms::d(), rule("[p, q] ==> (p&q)")] {
        assert!(inlined.rules.contains(&r), "{r}");
    }
    assert_eq!(inlined.lines[10].justifications(), &[4, 9]);
}

#[test]
fn inline_lemma_ending_in_assumption() {
    let first = rule("[p, q] ==> p");
    let lemma = Proof::new(first.clone(), [], [Line::assumption(f("q")), Line::assumption(f("p"))]);
    assert!(lemma.is_valid());

    let and = rule("[p, q] ==> (p&q)");
    let main = Proof::new(
        rule("[r, s] ==> (r&s)"),
        [first.clone(), and.clone()],
        [
            Line::assumption(f("r")),
            Line::assumption(f("s")),
            Line::derivation(f("r"), first, [0, 1]),
            Line::derivation(f("(r&s)"), and.clone(), [2, 1]),
        ],
    );
    assert!(main.is_valid());
    let inlined = inline_proof(&main, &lemma).unwrap();
    assert!(inlined.is_valid());
    assert_eq!(
        inlined.lines,
        vec![Line::assumption(f("r")), Line::assumption(f("s")), Line::derivation(f("(r&s)"), and, [0, 1])]
    );
}

#[test]
fn inline_rejections() {
    let main = lemma_user();
    let lemma = self_implication();
    assert_eq!(inline_proof_once(&main, 3, &lemma), Err(Error::LineOutOfRange { line: 3, len: 3 }));
    assert!(matches!(inline_proof_once(&main, 2, &lemma), Err(Error::LemmaMismatch { line: 2, .. })));

    let with_assumption = Proof::new(rule("[q] ==> q"), [], [Line::assumption(f("q"))]);
    assert_eq!(inline_proof_once(&with_assumption, 0, &lemma), Err(Error::NotADerivation { line: 0 }));

    let circular = Proof::new(
        lemma.statement.clone(),
        [lemma.statement.clone()],
        [Line::derivation(f("(p->p)"), lemma.statement.clone(), [])],
    );
    assert!(circular.is_valid());
    assert!(matches!(inline_proof(&main, &circular), Err(Error::SelfReferentialLemma { .. })));

    let mut broken = main.clone();
    broken.lines.pop();
    assert!(matches!(inline_proof(&broken, &lemma), Err(Error::InvalidProof { .. })));
    let trusted = inline_proof_with(&broken, &lemma, &Config::TRUSTING).unwrap();
    assert_eq!(trusted.lines.len(), 10);
}
