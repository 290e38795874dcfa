//! Predicate logic with functions and equality, finite models, and the
//! syntactic procedures that eliminate functions and equality.

mod ast;
pub mod equality;
pub mod functions;
mod model;
pub mod parse;

pub use ast::{
    is_constant_name, is_function_name, is_relation_name, is_variable_name, Connective, Formula,
    Quantifier, Term,
};
pub use model::{Assignment, Model};
