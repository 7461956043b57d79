use std::{fs::File, io::BufReader, path::Path};

use thinfilm::{
    reflectance,
    scan::ThicknessScan,
    settings,
    spectrum::Spectrum,
    stack::{OpticalStack, NM},
    sweep::WavelengthSweep,
    ReflectanceError,
};

// Tolerance for comparing reflectance fractions
const TOL: f64 = 1e-10;

#[test]
fn default_config_reference() {
    let settings = settings::load_default_config().unwrap();
    assert_eq!(settings.n1, 1.38);
    assert_eq!(settings.sweep.num_points, 500);

    let (wavelengths_nm, reference) = load_reference("reference_spectrum_100nm").unwrap();
    let sweep = WavelengthSweep::from_nm(wavelengths_nm);
    let spectrum = Spectrum::compute(settings.stack(), &sweep).unwrap();
    compare_results(&spectrum.reflectance.to_vec(), &reference, TOL);
}

#[test]
fn thick_film_reference() {
    let mut settings = settings::load_default_config().unwrap();
    settings.thickness = 400.0;

    let (wavelengths_nm, reference) = load_reference("reference_spectrum_400nm").unwrap();
    let wavelengths: Vec<f64> = wavelengths_nm.iter().map(|w| w * NM).collect();
    let stack = settings.stack();
    let result =
        reflectance::compute(stack.n0, stack.n1, stack.n2, stack.thickness, &wavelengths).unwrap();
    compare_results(&result, &reference, TOL);
}

#[test]
fn default_sweep_stays_physical() {
    let settings = settings::load_default_config().unwrap();
    let sweep = settings.sweep().unwrap();
    for thickness in [0.0, 10.0, 100.0, 500.0, 1000.0] {
        let stack = OpticalStack::from_nm(settings.n0, settings.n1, settings.n2, thickness);
        let spectrum = Spectrum::compute(stack, &sweep).unwrap();
        assert_eq!(spectrum.len(), sweep.len());
        assert!(spectrum.reflectance.iter().all(|r| (0.0..=1.0).contains(r)));
    }
}

#[test]
fn coating_beats_bare_glass() {
    let settings = settings::load_default_config().unwrap();
    let stack = settings.stack();
    let spectrum = Spectrum::compute(stack, &settings.sweep().unwrap()).unwrap();
    let bare = stack.bare_substrate().unwrap();
    assert!(spectrum.maximum().unwrap().1 < bare);
}

#[test]
fn quarter_wave_scan_finds_minimum() {
    let sweep = WavelengthSweep::from_nm(vec![550.0]);
    let thicknesses: Vec<f64> = (0..=200).map(|t| t as f64).collect();
    let scan = ThicknessScan::run(1.0, 1.38, 1.52, &thicknesses, &sweep).unwrap();
    let (best, _) = scan.best().unwrap();
    let quarter_wave = OpticalStack::new(1.0, 1.38, 1.52, 0.0).quarter_wave_thickness(550.0 * NM);
    assert!((best - quarter_wave / NM).abs() <= 0.5, "best: {}", best);
}

#[test]
fn invalid_wavelength_is_rejected() {
    let err = reflectance::compute(1.0, 1.38, 1.52, 1e-7, &[4e-7, 5e-7, -6e-7]).unwrap_err();
    assert_eq!(err, ReflectanceError::wavelength(2, -6e-7));
}

fn load_reference(filename: &str) -> Result<(Vec<f64>, Vec<f64>), Box<dyn std::error::Error>> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("test_data")
        .join(filename);

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut wavelengths = Vec::new();
    let mut reflectance = Vec::new();

    for line in std::io::BufRead::lines(reader) {
        let line = line?;

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let row: Vec<f64> = line
            .split_whitespace()
            .filter_map(|s| s.parse::<f64>().ok())
            .collect();

        if row.len() == 2 {
            wavelengths.push(row[0]);
            reflectance.push(row[1]);
        }
    }

    Ok((wavelengths, reflectance))
}

fn compare_results(result: &[f64], reference: &[f64], tolerance: f64) {
    assert_eq!(result.len(), reference.len());
    for (a, b) in result.iter().zip(reference.iter()) {
        assert!((a - b).abs() < tolerance, "a: {}, b: {}", a, b);
    }
}
