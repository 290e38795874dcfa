//! Propositional logic: formulas, inference rules, and deductive proofs that
//! can be checked and rewritten.

pub mod axioms;
pub mod deduction;
mod formula;
mod inline;
pub mod parse;
mod proof;
mod rule;

pub use formula::{is_variable_name, BinaryOp, Formula, SpecializationMap, Variable};
pub use inline::{
    inline_proof, inline_proof_once, inline_proof_once_with, inline_proof_with,
    prove_specialization, prove_specialization_with,
};
pub use proof::{Line, LineFault, Proof, ProofFault};
pub use rule::{merge_specialization_maps, InferenceRule};
