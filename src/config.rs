#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Re-check validity of the input proofs at every transformation entry
    /// point. Checking is quadratic in proof length; callers that construct
    /// proofs they already know to be valid may turn it off.
    pub verify_inputs: bool,
}

impl Config {
    pub const DEFAULT: Config = Config { verify_inputs: true };
    pub const TRUSTING: Config = Config { verify_inputs: false };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
