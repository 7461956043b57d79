//! Reflectance spectra paired with the wavelengths they were evaluated at.
//!
//! A [`Spectrum`] is what a plotting front end consumes: the sweep on one
//! axis and the fractional reflectance on the other. Display code works in
//! nanometres and percent, so conversions for both are provided here.
//!
//! # Summary quantities
//!
//! - [`Spectrum::minimum`]: wavelength of best anti-reflection
//! - [`Spectrum::maximum`]: wavelength of strongest reflection
//! - [`Spectrum::mean`]: average reflectance over the sweep

use std::fmt;

use ndarray::Array1;
use ndarray_stats::QuantileExt;

use crate::error::ReflectanceError;
use crate::reflectance;
use crate::stack::{OpticalStack, NM};
use crate::sweep::WavelengthSweep;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_spectrum() {
        let stack = OpticalStack::from_nm(1.0, 1.38, 1.52, 100.0);
        let spectrum = Spectrum::compute(stack, &WavelengthSweep::visible()).unwrap();
        assert_eq!(spectrum.len(), 500);

        // a 100 nm MgF2 layer on crown glass is a quarter wave near 552 nm
        let (wavelength, r) = spectrum.minimum().unwrap();
        assert!((wavelength / NM - 552.1042084168336).abs() < 1e-6);
        assert!((r - 0.012600792932405964).abs() < 1e-9);

        let mean = spectrum.mean().unwrap();
        assert!((mean - 0.014683313677696421).abs() < 1e-9);

        let (_, r_max) = spectrum.maximum().unwrap();
        assert!((r_max - 0.02227324249805459).abs() < 1e-9);
    }

    #[test]
    fn percent_units() {
        let stack = OpticalStack::from_nm(1.0, 1.38, 1.52, 100.0);
        let spectrum = Spectrum::compute(stack, &WavelengthSweep::from_nm(vec![550.0])).unwrap();
        let percent = spectrum.percent();
        assert!((percent[0] - 100.0 * spectrum.reflectance[0]).abs() < 1e-12);
        assert!((spectrum.wavelengths_nm()[0] - 550.0).abs() < 1e-9);
    }

    #[test]
    fn empty_spectrum() {
        let stack = OpticalStack::from_nm(1.0, 1.38, 1.52, 100.0);
        let spectrum = Spectrum::compute(stack, &WavelengthSweep::from_m(vec![])).unwrap();
        assert!(spectrum.is_empty());
        assert!(spectrum.minimum().is_none());
        assert!(spectrum.maximum().is_none());
        assert!(spectrum.mean().is_none());
    }

    #[test]
    fn pairs_follow_input_order() {
        let stack = OpticalStack::from_nm(1.0, 1.38, 1.52, 300.0);
        let sweep = WavelengthSweep::from_nm(vec![650.0, 420.0, 530.0]);
        let spectrum = Spectrum::compute(stack, &sweep).unwrap();
        let pairs: Vec<_> = spectrum.iter().collect();
        assert_eq!(pairs.len(), 3);
        for ((wavelength, r), expected) in pairs.iter().zip(sweep.wavelengths.iter()) {
            assert_eq!(wavelength, expected);
            assert_eq!(*r, stack.reflectance(*expected).unwrap());
        }
    }

    #[test]
    fn invalid_sweep() {
        let stack = OpticalStack::from_nm(1.0, 1.38, 1.52, 100.0);
        let result = Spectrum::compute(stack, &WavelengthSweep::from_nm(vec![500.0, -3.0]));
        assert!(result.is_err());
    }
}

/// Reflectance of one optical stack over a wavelength sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub stack: OpticalStack,
    pub wavelengths: Array1<f64>, // metres
    pub reflectance: Array1<f64>, // fraction in [0, 1]
}

impl Spectrum {
    /// Evaluates `stack` at every wavelength of `sweep`.
    pub fn compute(stack: OpticalStack, sweep: &WavelengthSweep) -> Result<Self, ReflectanceError> {
        let reflectance = reflectance::compute_array(&stack, &sweep.wavelengths)?;
        Ok(Self {
            stack,
            wavelengths: sweep.wavelengths.clone(),
            reflectance,
        })
    }

    /// Reflectance in percent, the unit shown on plots.
    pub fn percent(&self) -> Array1<f64> {
        &self.reflectance * 100.0
    }

    pub fn wavelengths_nm(&self) -> Array1<f64> {
        self.wavelengths.mapv(|x| x / NM)
    }

    /// Wavelength and value of the lowest reflectance.
    pub fn minimum(&self) -> Option<(f64, f64)> {
        let i = self.reflectance.argmin().ok()?;
        Some((self.wavelengths[i], self.reflectance[i]))
    }

    /// Wavelength and value of the highest reflectance.
    pub fn maximum(&self) -> Option<(f64, f64)> {
        let i = self.reflectance.argmax().ok()?;
        Some((self.wavelengths[i], self.reflectance[i]))
    }

    pub fn mean(&self) -> Option<f64> {
        self.reflectance.mean()
    }

    pub fn len(&self) -> usize {
        self.reflectance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reflectance.is_empty()
    }

    /// `(wavelength, reflectance)` pairs in sweep order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.wavelengths
            .iter()
            .copied()
            .zip(self.reflectance.iter().copied())
    }
}

impl fmt::Display for Spectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Spectrum:")?;
        writeln!(f, "  Points:           {}", self.len())?;
        if let (Some((w_min, r_min)), Some((w_max, r_max)), Some(mean)) =
            (self.minimum(), self.maximum(), self.mean())
        {
            writeln!(
                f,
                "  Minimum:          {:.4} % at {:.2} nm",
                r_min * 100.0,
                w_min / NM
            )?;
            writeln!(
                f,
                "  Maximum:          {:.4} % at {:.2} nm",
                r_max * 100.0,
                w_max / NM
            )?;
            writeln!(f, "  Mean:             {:.4} %", mean * 100.0)?;
        }
        Ok(())
    }
}
