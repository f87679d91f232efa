use thiserror::Error;

/// Errors reported by a k-means calculation.
///
/// All of them are input-validation failures, detected before the first iteration starts.
/// Reaching the iteration limit without convergence is not an error.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KMeansError {
    /// Fewer observations than requested clusters were supplied.
    #[error("too few observations for k ({observations} < {k})")]
    InsufficientObservations { observations: usize, k: usize },
    /// A parameter was out of its valid range (e.g. `k == 0` or `max_iter == 0`).
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}
