//! Film thickness scans.
//!
//! This module evaluates the same stack over a range of film thicknesses,
//! one full spectrum per thickness. It mirrors sliding the thickness control
//! of an interactive front end through its whole range, and is used to find
//! the thickness with the lowest average reflectance over the sweep.
//!
//! The scan provides:
//! - Parallel evaluation of each thickness with rayon
//! - Progress tracking with indicatif
//! - Results kept in the same order as the requested thicknesses
//! - Selection of the best anti-reflection thickness

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;
use serde::Deserialize;

use crate::error::ReflectanceError;
use crate::settings::MAX_THICKNESS_NM;
use crate::spectrum::Spectrum;
use crate::stack::OpticalStack;
use crate::sweep::WavelengthSweep;

/// Most thicknesses a single scan may expand to.
pub const MAX_SCAN_STEPS: usize = 1_000_000;

/// Thickness range in nanometres, inclusive of both ends.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScanConfig {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 1000.0,
            step: 10.0,
        }
    }
}

impl ScanConfig {
    /// Expands the range into a list of thicknesses.
    pub fn thicknesses(&self) -> Result<Vec<f64>, ReflectanceError> {
        if !(self.step > 0.0 && self.step.is_finite()) {
            return Err(ReflectanceError::InvalidArgument(format!(
                "scan step must be positive, got {}",
                self.step
            )));
        }
        if !(self.start >= 0.0 && self.end >= self.start && self.end.is_finite()) {
            return Err(ReflectanceError::InvalidArgument(format!(
                "scan range {} to {} is not a non-negative increasing range",
                self.start, self.end
            )));
        }
        if self.end > MAX_THICKNESS_NM {
            return Err(ReflectanceError::InvalidArgument(format!(
                "scan end {} exceeds the maximum thickness of {} nm",
                self.end, MAX_THICKNESS_NM
            )));
        }
        // tolerate rounding so that the end point is included
        let num_steps = ((self.end - self.start) / self.step + 1e-9).floor();
        if num_steps >= MAX_SCAN_STEPS as f64 {
            return Err(ReflectanceError::InvalidArgument(format!(
                "scan step {} gives more than {} thicknesses",
                self.step, MAX_SCAN_STEPS
            )));
        }
        Ok((0..=num_steps as usize)
            .map(|i| self.start + i as f64 * self.step)
            .collect())
    }
}


/// One spectrum per film thickness.
///
/// **Context**: The anti-reflection performance of a film depends on its
/// thickness relative to the wavelength. Comparing spectra across thicknesses
/// shows where the reflection minimum moves and which thickness performs best
/// over the whole sweep.
///
/// **How it Works**: Builds one stack per thickness, evaluates each spectrum in
/// parallel with rayon and collects them in the order the thicknesses were
/// given.
#[derive(Debug, Clone, PartialEq)]
pub struct ThicknessScan {
    pub thicknesses_nm: Vec<f64>,
    pub spectra: Vec<Spectrum>,
}

impl ThicknessScan {
    /// Runs the scan for the given indices over `thicknesses_nm`.
    pub fn run(
        n0: f64,
        n1: f64,
        n2: f64,
        thicknesses_nm: &[f64],
        sweep: &WavelengthSweep,
    ) -> Result<Self, ReflectanceError> {
        let start = Instant::now();
        info!("Scanning {} film thicknesses...", thicknesses_nm.len());

        let pb = ProgressBar::new(thicknesses_nm.len() as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {bar:40.green/blue} {pos:>5}/{len:5} {msg} ETA: {eta_precise}",
        ) {
            pb.set_style(style.progress_chars("█▇▆▅▄▃▂▁"));
        }
        pb.set_message("thickness".to_string());

        let spectra = thicknesses_nm
            .par_iter()
            .map(|&thickness| {
                let stack = OpticalStack::from_nm(n0, n1, n2, thickness);
                let spectrum = Spectrum::compute(stack, sweep);
                pb.inc(1);
                spectrum
            })
            .collect::<Result<Vec<_>, _>>()?;

        pb.finish_and_clear();
        debug!("Thickness scan took {:.2?}", start.elapsed());

        Ok(Self {
            thicknesses_nm: thicknesses_nm.to_vec(),
            spectra,
        })
    }

    /// Thickness in nanometres with the lowest mean reflectance, and that mean.
    pub fn best(&self) -> Option<(f64, f64)> {
        self.thicknesses_nm
            .iter()
            .zip(self.spectra.iter())
            .filter_map(|(&thickness, spectrum)| spectrum.mean().map(|mean| (thickness, mean)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn len(&self) -> usize {
        self.spectra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spectra.is_empty()
    }
}
