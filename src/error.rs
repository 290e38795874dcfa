//! Error types for checking and transforming proofs and theories

use thiserror::Error;

/// Result type for fallible operations of this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations reported by the public entry points.
///
/// Absence of a match (e.g. a rule that is not a specialization of another)
/// is never an `Error`; it is reported as `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("`{name}` is not a valid {kind} name")]
    InvalidName { kind: &'static str, name: String },

    #[error("failed to parse `{input}`: {message}")]
    Parse { input: String, message: String },

    #[error("line {line} is out of range for a proof of {len} lines")]
    LineOutOfRange { line: usize, len: usize },

    #[error("invalid proof of {statement}")]
    InvalidProof { statement: String },

    #[error("{candidate} is not a specialization of {general}")]
    NotASpecialization { general: String, candidate: String },

    #[error("line {line} is an assumption line, not a rule application")]
    NotADerivation { line: usize },

    #[error("line {line} is justified by {found}, not by the lemma {expected}")]
    LemmaMismatch { line: usize, found: String, expected: String },

    #[error("the proof of {lemma} uses the lemma itself")]
    SelfReferentialLemma { lemma: String },

    #[error("`{name}` is used both as a relation and for a function")]
    NameCollision { name: String },

    #[error("variable `{name}` clashes with the fresh variable names")]
    ReservedVariable { name: String },

    #[error("`{term}` is not a function invocation")]
    NotAFunctionInvocation { term: String },

    #[error("function `{name}` must be eliminated first")]
    UnexpectedFunction { name: String },

    #[error("relation `{name}` is already present")]
    RelationAlreadyPresent { name: String },

    #[error("no interpretation for {kind} `{name}`")]
    MissingInterpretation { kind: &'static str, name: String },

    #[error("model has interpretations for functions {names:?}")]
    FunctionsPresent { names: Vec<String> },

    #[error("arity mismatch for `{name}`: expected {expected}, found {found}")]
    ArityMismatch { name: String, expected: usize, found: usize },

    #[error("malformed model: {message}")]
    MalformedModel { message: String },

    #[error("free variable `{name}` has no assignment")]
    UnassignedVariable { name: String },

    #[error("precondition violated: {message}")]
    Precondition { message: String },
}

impl Error {
    pub fn invalid_name(kind: &'static str, name: impl Into<String>) -> Self {
        Error::InvalidName { kind, name: name.into() }
    }

    pub fn invalid_proof(statement: impl ToString) -> Self {
        Error::InvalidProof { statement: statement.to_string() }
    }

    pub fn not_a_specialization(general: impl ToString, candidate: impl ToString) -> Self {
        Error::NotASpecialization {
            general: general.to_string(),
            candidate: candidate.to_string(),
        }
    }

    pub fn missing(kind: &'static str, name: impl Into<String>) -> Self {
        Error::MissingInterpretation { kind, name: name.into() }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedModel { message: message.into() }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Error::Precondition { message: message.into() }
    }
}
