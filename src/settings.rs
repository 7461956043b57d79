use std::env;
use std::fmt;
use std::path::PathBuf;

use anyhow::{anyhow, ensure, Context, Result};
use clap::Parser;
use config::{Config, Environment, File};
use log::{debug, info};
#[cfg(feature = "python")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python")]
use pyo3::prelude::*;
use serde::Deserialize;

use crate::scan::ScanConfig;
use crate::spectrum::Spectrum;
use crate::stack::{OpticalStack, NM};
use crate::sweep::{SweepConfig, WavelengthSweep};

/// Largest film thickness accepted from configuration, in nanometres.
pub const MAX_THICKNESS_NM: f64 = 1000.0;
/// Default design wavelength for the quarter-wave tip, in nanometres.
pub const DEFAULT_DESIGN_WAVELENGTH_NM: f64 = 550.0;


/// Runtime configuration for the application.
///
/// Lengths are in nanometres here and converted to metres on the way into
/// the calculator.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub n0: f64,        // incident medium refractive index
    pub n1: f64,        // film refractive index
    pub n2: f64,        // substrate refractive index
    pub thickness: f64, // film thickness (nm)
    #[serde(default = "default_design_wavelength")]
    pub design_wavelength: f64,
    #[serde(default)]
    pub sweep: SweepConfig,
    #[serde(default)]
    pub scan: Option<ScanConfig>,
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

fn default_design_wavelength() -> f64 {
    DEFAULT_DESIGN_WAVELENGTH_NM
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

#[cfg(feature = "python")]
#[pymethods]
impl Settings {
    #[new]
    #[pyo3(signature = (n0, n1, n2, thickness, start = 400.0, end = 700.0, num_points = 500))]
    fn py_new(
        n0: f64,
        n1: f64,
        n2: f64,
        thickness: f64,
        start: f64,
        end: f64,
        num_points: usize,
    ) -> Self {
        Settings {
            n0,
            n1,
            n2,
            thickness,
            design_wavelength: DEFAULT_DESIGN_WAVELENGTH_NM,
            sweep: SweepConfig {
                start,
                end,
                num_points,
            },
            scan: None,
            directory: default_directory(),
        }
    }

    /// Set the film thickness in nanometres
    #[setter]
    fn set_thickness(&mut self, thickness: f64) {
        self.thickness = thickness;
    }

    /// Get the film thickness in nanometres
    #[getter]
    fn get_thickness(&self) -> f64 {
        self.thickness
    }

    /// Get the refractive indices as (n0, n1, n2)
    #[getter]
    fn get_indices(&self) -> (f64, f64, f64) {
        (self.n0, self.n1, self.n2)
    }

    /// Compute the reflectance spectrum, returning (wavelengths in nm, reflectance fractions)
    #[pyo3(name = "spectrum")]
    fn py_spectrum(&self) -> PyResult<(Vec<f64>, Vec<f64>)> {
        self.spectrum_nm()
            .map_err(|e| PyValueError::new_err(format!("{:#}", e)))
    }
}

impl Settings {
    pub fn stack(&self) -> OpticalStack {
        OpticalStack::from_nm(self.n0, self.n1, self.n2, self.thickness)
    }

    pub fn sweep(&self) -> Result<WavelengthSweep> {
        Ok(WavelengthSweep::try_from(&self.sweep)?)
    }

    pub fn design_wavelength_m(&self) -> f64 {
        self.design_wavelength * NM
    }

    /// Validate, then evaluate the configured stack over the configured sweep.
    pub fn spectrum(&self) -> Result<Spectrum> {
        validate_config(self)?;
        Ok(Spectrum::compute(self.stack(), &self.sweep()?)?)
    }

    /// The spectrum as plain (wavelength in nm, reflectance) columns.
    pub fn spectrum_nm(&self) -> Result<(Vec<f64>, Vec<f64>)> {
        let spectrum = self.spectrum()?;
        Ok((
            spectrum.wavelengths_nm().to_vec(),
            spectrum.reflectance.to_vec(),
        ))
    }
}

/// Load the bundled default configuration without reading the command line.
pub fn load_default_config() -> Result<Settings> {
    let root = retrieve_project_root()?;
    let default_config_file = root.join("config/default.toml");

    let settings = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .build()
        .context("Error loading configuration")?;

    let config: Settings = settings
        .try_deserialize()
        .context("Error deserializing configuration")?;

    validate_config(&config)?;

    Ok(config)
}

/// Load configuration from file and environment, then apply command line overrides.
pub fn load_config() -> Result<Settings> {
    load_config_with_args(&CliArgs::parse())
}

pub fn load_config_with_args(args: &CliArgs) -> Result<Settings> {
    let root = retrieve_project_root()?;

    let default_config_file = root.join("config/default.toml");
    let local_config = root.join("config/local.toml");

    let config_file = if local_config.exists() {
        info!("Using local configuration: {:?}", local_config);
        local_config
    } else {
        info!("Using default configuration: {:?}", default_config_file);
        default_config_file
    };

    let settings = Config::builder()
        .add_source(File::from(config_file).required(true))
        .add_source(
            Environment::with_prefix("thinfilm")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Error loading configuration")?;

    let mut config: Settings = settings
        .try_deserialize()
        .context("Error deserializing configuration")?;

    apply_args(&mut config, args);

    validate_config(&config)?;

    debug!("{:#?}", config);

    Ok(config)
}

fn apply_args(config: &mut Settings, args: &CliArgs) {
    if let Some(n0) = args.n0 {
        config.n0 = n0;
    }
    if let Some(n1) = args.n1 {
        config.n1 = n1;
    }
    if let Some(n2) = args.n2 {
        config.n2 = n2;
    }
    if let Some(thickness) = args.thickness {
        config.thickness = thickness;
    }
    if let Some(design) = args.design {
        config.design_wavelength = design;
    }
    if let Some(start) = args.start {
        config.sweep.start = start;
    }
    if let Some(end) = args.end {
        config.sweep.end = end;
    }
    if let Some(points) = args.points {
        config.sweep.num_points = points;
    }
    if let Some(dir) = &args.dir {
        config.directory = dir.clone();
    }

    if args.scan || args.scan_step.is_some() {
        let mut scan = config.scan.take().unwrap_or_default();
        if let Some(step) = args.scan_step {
            scan.step = step;
        }
        config.scan = Some(scan);
    }
}

/// Retrieve the project root directory.
/// This function tries to find the project root directory in different ways:
/// 1. If the CARGO_MANIFEST_DIR environment variable is set, use it.
/// 2. If the THINFILM_ROOT_DIR environment variable is set, use it.
/// 3. If the "config" subdirectory is found in the executable directory or any of its parents, use it.
fn retrieve_project_root() -> Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        return Ok(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var("THINFILM_ROOT_DIR") {
        return Ok(PathBuf::from(path));
    }

    let exe_path = env::current_exe().context("Failed to get current executable path")?;
    exe_path
        .ancestors()
        .skip(1)
        .find(|dir| dir.join("config").is_dir())
        .map(|dir| dir.to_path_buf())
        .ok_or_else(|| anyhow!("Could not find project root directory"))
}

fn validate_config(config: &Settings) -> Result<()> {
    for (name, n) in [("n0", config.n0), ("n1", config.n1), ("n2", config.n2)] {
        ensure!(
            n.is_finite() && n >= 1.0,
            "Refractive index {} must be at least 1, got {}",
            name,
            n
        );
    }
    ensure!(
        (0.0..=MAX_THICKNESS_NM).contains(&config.thickness),
        "Thickness must be between 0 and {} nm, got {}",
        MAX_THICKNESS_NM,
        config.thickness
    );
    ensure!(
        config.design_wavelength > 0.0,
        "Design wavelength must be greater than 0"
    );
    WavelengthSweep::try_from(&config.sweep).context("Invalid wavelength sweep")?;
    if let Some(scan) = &config.scan {
        scan.thicknesses().context("Invalid thickness scan")?;
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about = "thinfilm - Thin-film reflectance at normal incidence")]
pub struct CliArgs {
    /// Refractive index of the incident medium.
    #[arg(long)]
    n0: Option<f64>,

    /// Refractive index of the thin film.
    #[arg(long)]
    n1: Option<f64>,

    /// Refractive index of the substrate.
    #[arg(long)]
    n2: Option<f64>,

    /// Film thickness in nanometres.
    #[arg(short, long)]
    thickness: Option<f64>,

    /// Design wavelength in nanometres, used for the quarter-wave thickness.
    #[arg(long)]
    design: Option<f64>,

    /// First wavelength of the sweep in nanometres.
    #[arg(long)]
    start: Option<f64>,

    /// Last wavelength of the sweep in nanometres.
    #[arg(long)]
    end: Option<f64>,

    /// Number of evenly spaced wavelengths in the sweep.
    #[arg(long)]
    points: Option<usize>,

    /// Output directory for spectrum files.
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Also scan the film thickness over 0-1000 nm.
    #[arg(long)]
    scan: bool,

    /// Thickness step of the scan in nanometres. Implies --scan.
    #[arg(long)]
    scan_step: Option<f64>,
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Incident Medium Index: {:.4}
  - Film Index: {:.4}
  - Substrate Index: {:.4}
  - Thickness: {:.2} nm
  - Sweep: {:.1} - {:.1} nm ({} points)
  - Design Wavelength: {:.1} nm
  ",
            self.n0,
            self.n1,
            self.n2,
            self.thickness,
            self.sweep.start,
            self.sweep.end,
            self.sweep.num_points,
            self.design_wavelength,
        )
    }
}
