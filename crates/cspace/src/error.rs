//! Errors reported by the approximation engine.

use cspace_cas::CasError;
use thiserror::Error;

/// Errors that can occur while building or comparing approximations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApproxError {
    /// The functional and basis lists have different lengths.
    #[error("{functionals} functionals but {vectors} basis vectors")]
    LengthMismatch {
        /// Number of functionals supplied.
        functionals: usize,
        /// Number of basis vectors supplied.
        vectors: usize,
    },

    /// No functionals and no basis vectors.
    #[error("cannot approximate with an empty system")]
    EmptySystem,

    /// A sampling configuration with zero points.
    #[error("sampling needs at least one point")]
    NoSamplePoints,

    /// A failure inside the computer-algebra service.
    #[error(transparent)]
    Cas(#[from] CasError),
}
