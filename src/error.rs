use thiserror::Error;

/// Errors returned while building or sampling a clustering.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A combined prior-times-likelihood vector cannot be sampled from.
    #[error("invalid probability vector: {reason}")]
    InvalidProbabilityVector {
        /// What was wrong with the vector.
        reason: &'static str,
    },

    /// A sampler setting is out of range.
    #[error("invalid configuration {name}: {message}")]
    InvalidConfiguration {
        /// Setting name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A likelihood returned the wrong number of weights.
    #[error("likelihood contract violated: expected {expected} weights, found {found}")]
    ContractViolation {
        /// Number of current clusters plus one.
        expected: usize,
        /// Length actually returned.
        found: usize,
    },

    /// Misuse of the clustering mutation API.
    #[error("invalid allocation of item {item}: {message}")]
    InvalidAllocation {
        /// Item involved.
        item: usize,
        /// Human-readable explanation.
        message: &'static str,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
