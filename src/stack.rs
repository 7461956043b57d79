//! Single thin film between an incident medium and a substrate.
//!
//! An [`OpticalStack`] holds the three refractive indices and the physical
//! film thickness. It evaluates the multiple-beam interference amplitude at
//! one wavelength; batched evaluation over a sweep lives in
//! [`crate::reflectance`].

use std::f64::consts::PI;
use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::ReflectanceError;
use crate::fresnel;

/// Nanometres to metres.
pub const NM: f64 = 1e-9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_at_reference_point() {
        let stack = OpticalStack::new(1.0, 1.38, 1.52, 100.0 * NM);
        let delta = stack.phase(550.0 * NM);
        assert!((delta - 1.5765083134377866).abs() < 1e-12);
    }

    #[test]
    fn coefficients() {
        let stack = OpticalStack::new(1.0, 1.38, 1.52, 0.0);
        assert!((stack.r01().unwrap() + 0.15966386554621845).abs() < 1e-15);
        assert!((stack.r12().unwrap() + 0.04827586206896556).abs() < 1e-15);
    }

    #[test]
    fn quarter_wave_film() {
        let design = 550.0 * NM;
        let (n0, n1, n2) = (1.0, 1.38, 1.52);
        let thickness = OpticalStack::new(n0, n1, n2, 0.0).quarter_wave_thickness(design);
        let stack = OpticalStack::new(n0, n1, n2, thickness);
        let expected = ((n0 * n2 - n1 * n1) / (n0 * n2 + n1 * n1)).powi(2);
        let r = stack.reflectance(design).unwrap();
        assert!((r - expected).abs() < 1e-12, "r: {}, expected: {}", r, expected);
    }

    #[test]
    fn ideal_index_cancels_reflection() {
        let n1 = OpticalStack::new(1.0, 1.0, 1.52, 0.0).ideal_film_index();
        let mut stack = OpticalStack::new(1.0, n1, 1.52, 0.0);
        stack.thickness = stack.quarter_wave_thickness(600.0 * NM);
        assert!(stack.reflectance(600.0 * NM).unwrap() < 1e-20);
    }

    #[test]
    fn bare_substrate() {
        let stack = OpticalStack::new(1.0, 1.38, 1.5, 100.0 * NM);
        assert!((stack.bare_substrate().unwrap() - 0.04).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_wavelength() {
        let stack = OpticalStack::new(1.0, 1.38, 1.52, 100.0 * NM);
        for bad in [0.0, -550.0 * NM, f64::NAN, f64::INFINITY] {
            let err = stack.reflectance(bad).unwrap_err();
            assert!(matches!(err, ReflectanceError::InvalidArgument(_)));
        }
    }

    #[test]
    fn validated_constructor() {
        assert!(OpticalStack::validated(1.0, 1.38, 1.52, 0.0).is_ok());
        assert!(OpticalStack::validated(0.9, 1.38, 1.52, 0.0).is_err());
        assert!(OpticalStack::validated(1.0, 1.38, 1.52, -1.0 * NM).is_err());
        assert!(OpticalStack::validated(1.0, f64::NAN, 1.52, 0.0).is_err());
    }

    #[test]
    fn degenerate_amplitude_denominator() {
        // r01 = -1 and r12 = 1 make 1 + r01 r12 vanish at zero phase
        let stack = OpticalStack::new(0.0, 1.0, 0.0, 0.0);
        let err = stack.reflectance(500.0 * NM).unwrap_err();
        assert!(matches!(err, ReflectanceError::DegenerateConfiguration(_)));
    }
}

/// Incident medium, film and substrate at normal incidence.
///
/// **Context**: The physical system is fully described by three real
/// refractive indices and one thickness. Indices are expected to be at least
/// one and the thickness non-negative; [`OpticalStack::new`] trusts the caller,
/// [`OpticalStack::validated`] checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticalStack {
    pub n0: f64,        // incident medium
    pub n1: f64,        // thin film
    pub n2: f64,        // substrate
    pub thickness: f64, // film thickness in metres
}

impl OpticalStack {
    pub fn new(n0: f64, n1: f64, n2: f64, thickness: f64) -> Self {
        Self {
            n0,
            n1,
            n2,
            thickness,
        }
    }

    /// Builds a stack with the film thickness given in nanometres.
    pub fn from_nm(n0: f64, n1: f64, n2: f64, thickness_nm: f64) -> Self {
        Self::new(n0, n1, n2, thickness_nm * NM)
    }

    /// Builds a stack after checking the physical constraints on its parameters.
    pub fn validated(n0: f64, n1: f64, n2: f64, thickness: f64) -> Result<Self, ReflectanceError> {
        for (name, n) in [("n0", n0), ("n1", n1), ("n2", n2)] {
            if !(n.is_finite() && n >= 1.0) {
                return Err(ReflectanceError::InvalidArgument(format!(
                    "refractive index {} must be at least 1, got {}",
                    name, n
                )));
            }
        }
        if !(thickness.is_finite() && thickness >= 0.0) {
            return Err(ReflectanceError::InvalidArgument(format!(
                "thickness must be non-negative, got {}",
                thickness
            )));
        }
        Ok(Self::new(n0, n1, n2, thickness))
    }

    /// Fresnel coefficient of the incident medium / film interface.
    pub fn r01(&self) -> Result<f64, ReflectanceError> {
        fresnel::refl(self.n0, self.n1)
    }

    /// Fresnel coefficient of the film / substrate interface.
    pub fn r12(&self) -> Result<f64, ReflectanceError> {
        fresnel::refl(self.n1, self.n2)
    }

    /// Phase accumulated by one pass through the film, in radians. Not wrapped.
    pub fn phase(&self, wavelength: f64) -> f64 {
        2.0 * PI * self.n1 * self.thickness / wavelength
    }

    /// Complex reflection amplitude of the film at `wavelength`.
    ///
    /// **How it Works**: Sums the multiply reflected partial waves in closed form,
    /// `r = (r01 + r12 e^{2iδ}) / (1 + r01 r12 e^{2iδ})`.
    pub fn amplitude(&self, wavelength: f64) -> Result<Complex64, ReflectanceError> {
        self.amplitude_at(0, wavelength)
    }

    /// Fractional reflectance `|r|^2` at `wavelength`.
    pub fn reflectance(&self, wavelength: f64) -> Result<f64, ReflectanceError> {
        Ok(self.amplitude(wavelength)?.norm_sqr())
    }

    /// Same as [`OpticalStack::amplitude`], reporting `index` as the sweep position on failure.
    pub(crate) fn amplitude_at(
        &self,
        index: usize,
        wavelength: f64,
    ) -> Result<Complex64, ReflectanceError> {
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return Err(ReflectanceError::wavelength(index, wavelength));
        }

        let r01 = self.r01()?;
        let r12 = self.r12()?;
        let round_trip = Complex64::cis(2.0 * self.phase(wavelength));

        let numerator = r01 + round_trip * r12;
        let denominator = 1.0 + round_trip * (r01 * r12);
        if denominator.norm_sqr() == 0.0 {
            return Err(ReflectanceError::DegenerateConfiguration(format!(
                "interference denominator vanishes at wavelength {}",
                wavelength
            )));
        }

        Ok(numerator / denominator)
    }

    /// Reflectance of the uncoated substrate, for comparison with the film.
    pub fn bare_substrate(&self) -> Result<f64, ReflectanceError> {
        fresnel::interface_reflectance(self.n0, self.n2)
    }

    /// Film thickness that minimises reflectance at `design_wavelength`.
    ///
    /// A quarter-wave layer makes the two face reflections leave in antiphase.
    /// The cancellation is complete only when `n1 = sqrt(n0 n2)`.
    pub fn quarter_wave_thickness(&self, design_wavelength: f64) -> f64 {
        design_wavelength / (4.0 * self.n1)
    }

    /// Film index giving zero reflectance for a quarter-wave layer.
    pub fn ideal_film_index(&self) -> f64 {
        (self.n0 * self.n2).sqrt()
    }
}

impl fmt::Display for OpticalStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OpticalStack:
  - Incident Medium Index (n0): {:.4}
  - Film Index (n1): {:.4}
  - Substrate Index (n2): {:.4}
  - Thickness: {:.2} nm",
            self.n0,
            self.n1,
            self.n2,
            self.thickness / NM,
        )
    }
}
