use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use thinfilm::{reflectance, settings::Settings, stack::OpticalStack};

/// Fractional reflectance of a thin film at each wavelength (all lengths in metres).
#[pyfunction]
fn compute_reflectance(
    n0: f64,
    n1: f64,
    n2: f64,
    thickness_m: f64,
    wavelengths_m: Vec<f64>,
) -> PyResult<Vec<f64>> {
    reflectance::compute(n0, n1, n2, thickness_m, &wavelengths_m)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Film thickness in metres giving minimum reflectance at the design wavelength.
#[pyfunction]
fn quarter_wave_thickness(n1: f64, design_wavelength_m: f64) -> f64 {
    OpticalStack::new(1.0, n1, 1.0, 0.0).quarter_wave_thickness(design_wavelength_m)
}

/// A Python module implemented in Rust.
#[pymodule]
fn _thinfilm_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(compute_reflectance, m)?)?;
    m.add_function(wrap_pyfunction!(quarter_wave_thickness, m)?)?;
    m.add_class::<Settings>()?;
    Ok(())
}
