//! Fresnel coefficients at normal incidence.
//!
//! At normal incidence the s and p polarizations coincide and the amplitude
//! reflection coefficient of an interface between two transparent media
//! reduces to a single real number. Its sign encodes the half-wave phase
//! flip on reflection from a denser medium.

use crate::error::ReflectanceError;


/// Computes the amplitude reflection coefficient going from medium `n_a` into medium `n_b`.
///
/// **Context**: Each face of the film reflects part of the incident wave. The
/// thin-film formula combines the two face coefficients `r01` and `r12`.
///
/// **How it Works**: Applies `(n_a - n_b) / (n_a + n_b)`. The denominator can only
/// vanish for indices outside the physical range, in which case the
/// configuration is reported as degenerate.
///
/// # Example
/// ```rust
/// let r01 = thinfilm::fresnel::refl(1.0, 1.38).unwrap();
/// assert!(r01 < 0.0);
/// ```
pub fn refl(n_a: f64, n_b: f64) -> Result<f64, ReflectanceError> {
    let sum = n_a + n_b;
    if sum == 0.0 {
        return Err(ReflectanceError::DegenerateConfiguration(format!(
            "refractive indices {} and {} sum to zero",
            n_a, n_b
        )));
    }
    Ok((n_a - n_b) / sum)
}

/// Intensity reflectance of a single bare interface.
pub fn interface_reflectance(n_a: f64, n_b: f64) -> Result<f64, ReflectanceError> {
    Ok(refl(n_a, n_b)?.powi(2))
}
