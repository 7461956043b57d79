//! Reflectance of a thin film across a set of wavelengths.
//!
//! Each wavelength is evaluated independently, so the sweep is an
//! element-wise map. Three entry points share the per-wavelength kernel in
//! [`OpticalStack::amplitude`]:
//! - [`compute`]: plain scalar parameters and a slice of wavelengths
//! - [`compute_array`]: an ndarray sweep, returning an ndarray
//! - [`compute_par`]: parallel map with rayon
//!
//! All three validate every wavelength before producing output, return
//! results in input order, and agree element for element.

use ndarray::Array1;
use rayon::prelude::*;

use crate::error::ReflectanceError;
use crate::stack::OpticalStack;


/// Computes the fractional reflectance of a thin film at each wavelength.
///
/// **Context**: This is the whole computational core. The incident medium `n0`,
/// film `n1` and substrate `n2` are real refractive indices, `thickness` is the
/// film thickness in metres and `wavelengths` are vacuum wavelengths in
/// metres.
///
/// **How it Works**: Checks that every wavelength is strictly positive, then maps
/// each one through the single-film interference amplitude and squares its
/// magnitude. The output has the same length and order as `wavelengths`.
///
/// # Example
/// ```rust
/// let r = thinfilm::reflectance::compute(1.0, 1.38, 1.52, 100e-9, &[550e-9]).unwrap();
/// assert!(r[0] < 0.04);
/// ```
pub fn compute(
    n0: f64,
    n1: f64,
    n2: f64,
    thickness: f64,
    wavelengths: &[f64],
) -> Result<Vec<f64>, ReflectanceError> {
    let stack = OpticalStack::new(n0, n1, n2, thickness);
    evaluate(&stack, wavelengths.iter())
}

/// Computes reflectance over an ndarray sweep.
pub fn compute_array(
    stack: &OpticalStack,
    wavelengths: &Array1<f64>,
) -> Result<Array1<f64>, ReflectanceError> {
    evaluate(stack, wavelengths.iter()).map(Array1::from)
}

/// Computes reflectance with the wavelengths split across the rayon thread pool.
pub fn compute_par(
    stack: &OpticalStack,
    wavelengths: &[f64],
) -> Result<Vec<f64>, ReflectanceError> {
    check_wavelengths(wavelengths.iter())?;
    wavelengths
        .par_iter()
        .enumerate()
        .map(|(i, &wavelength)| Ok(stack.amplitude_at(i, wavelength)?.norm_sqr()))
        .collect()
}

fn evaluate<'a>(
    stack: &OpticalStack,
    wavelengths: impl Iterator<Item = &'a f64> + Clone,
) -> Result<Vec<f64>, ReflectanceError> {
    check_wavelengths(wavelengths.clone())?;
    wavelengths
        .enumerate()
        .map(|(i, &wavelength)| Ok(stack.amplitude_at(i, wavelength)?.norm_sqr()))
        .collect()
}

fn check_wavelengths<'a>(wavelengths: impl Iterator<Item = &'a f64>) -> Result<(), ReflectanceError> {
    for (i, &wavelength) in wavelengths.enumerate() {
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return Err(ReflectanceError::wavelength(i, wavelength));
        }
    }
    Ok(())
}
