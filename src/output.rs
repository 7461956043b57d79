use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;
use log::info;
use serde::Serialize;

use crate::scan::ThicknessScan;
use crate::spectrum::Spectrum;
use crate::stack::{OpticalStack, NM};


/// Serializable view of a spectrum in display units.
#[derive(Debug, Serialize)]
struct SpectrumRecord<'a> {
    stack: &'a OpticalStack,
    wavelengths_nm: Vec<f64>,
    reflectance: Vec<f64>,
    reflectance_percent: Vec<f64>,
}

impl<'a> From<&'a Spectrum> for SpectrumRecord<'a> {
    fn from(spectrum: &'a Spectrum) -> Self {
        Self {
            stack: &spectrum.stack,
            wavelengths_nm: spectrum.wavelengths_nm().to_vec(),
            reflectance: spectrum.reflectance.to_vec(),
            reflectance_percent: spectrum.percent().to_vec(),
        }
    }
}

/// Write the spectrum as `wavelength_nm reflectance_percent` rows
pub fn write_spectrum(spectrum: &Spectrum, directory: &Path) -> Result<PathBuf> {
    let path = output_path(directory, "reflectance_spectrum")?;
    let file = File::create(&path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);

    for (wavelength, r) in spectrum.iter() {
        writeln!(writer, "{} {}", wavelength / NM, r * 100.0)?;
    }
    writer.flush()?;

    info!("Wrote spectrum to {:?}", path);
    Ok(path)
}

/// Write the spectrum and its stack as JSON
pub fn write_spectrum_json(spectrum: &Spectrum, directory: &Path) -> Result<PathBuf> {
    let path = output_path(directory, "spectrum.json")?;
    let file = File::create(&path).with_context(|| format!("Failed to create {:?}", path))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, &SpectrumRecord::from(spectrum))?;

    info!("Wrote spectrum to {:?}", path);
    Ok(path)
}

/// Write one `thickness_nm mean_percent min_percent min_wavelength_nm` row per scanned thickness
pub fn write_scan(scan: &ThicknessScan, directory: &Path) -> Result<PathBuf> {
    let path = output_path(directory, "thickness_scan")?;
    let file = File::create(&path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);

    for (thickness, spectrum) in scan.thicknesses_nm.iter().zip(scan.spectra.iter()) {
        let (Some(mean), Some((w_min, r_min))) = (spectrum.mean(), spectrum.minimum()) else {
            continue;
        };
        let row = [*thickness, mean * 100.0, r_min * 100.0, w_min / NM];
        writeln!(writer, "{}", row.iter().join(" "))?;
    }
    writer.flush()?;

    info!("Wrote thickness scan to {:?}", path);
    Ok(path)
}

/// Console summary of a computed spectrum, with the quarter-wave tip.
pub fn summary(spectrum: &Spectrum, design_wavelength: f64) -> Result<String> {
    let stack = &spectrum.stack;
    let bare = stack.bare_substrate()?;
    let quarter_wave = stack.quarter_wave_thickness(design_wavelength);

    let mut text = format!("{}\n{}", stack, spectrum);
    text.push_str(&format!(
        "  Bare Substrate:   {:.4} %\n",
        bare * 100.0
    ));
    text.push_str(&format!(
        "  Quarter-wave thickness at {:.1} nm: {:.2} nm (ideal film index {:.4})\n",
        design_wavelength / NM,
        quarter_wave / NM,
        stack.ideal_film_index()
    ));
    Ok(text)
}

fn output_path(directory: &Path, name: &str) -> Result<PathBuf> {
    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create output directory {:?}", directory))?;
    Ok(directory.join(name))
}
