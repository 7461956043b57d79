//! Failure modes of the reflectance computation.
//!
//! The computation is total over its valid input domain, so there are only two
//! ways for it to fail: a wavelength that is not strictly positive, or a
//! denominator that vanishes. The second cannot happen for refractive indices
//! of at least one and is only reachable with out-of-contract inputs.

use thiserror::Error;

/// Errors returned by the reflectance calculator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReflectanceError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Degenerate configuration: {0}")]
    DegenerateConfiguration(String),
}

impl ReflectanceError {
    /// A rejected wavelength at position `index` of the sweep.
    pub fn wavelength(index: usize, value: f64) -> Self {
        Self::InvalidArgument(format!(
            "wavelength at index {} must be positive and finite, got {}",
            index, value
        ))
    }
}
