//! Deductive proofs in propositional logic, and the elimination of functions
//! and equality from predicate-logic theories.
//!
//! [`prop`] checks proofs line by line against sets of inference rules and
//! rewrites them: specializing a proof, inlining the proof of a lemma, and
//! the deduction theorem. [`fol`] turns theories with function symbols and
//! equality into equivalent theories over relations only.

pub mod config;
mod debug;
pub mod error;
pub mod fol;
mod parse;
pub mod prop;
pub mod text;
pub mod util;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, Result};
