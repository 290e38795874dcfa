use crate::prop::{Formula, InferenceRule};

mod deduction;
mod proofs;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn f(s: &str) -> Formula {
    Formula::parse(s).unwrap()
}

fn rule(s: &str) -> InferenceRule {
    InferenceRule::parse(s).unwrap()
}
