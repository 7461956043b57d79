use anyhow::Result;
use log::info;
use thinfilm::output;
use thinfilm::scan::ThicknessScan;
use thinfilm::settings;
use thinfilm::spectrum::Spectrum;

fn main() -> Result<()> {
    env_logger::init();

    let settings = settings::load_config()?;
    println!("{}", settings);

    let sweep = settings.sweep()?;
    let spectrum = Spectrum::compute(settings.stack(), &sweep)?;
    println!("{}", output::summary(&spectrum, settings.design_wavelength_m())?);

    output::write_spectrum(&spectrum, &settings.directory)?;
    output::write_spectrum_json(&spectrum, &settings.directory)?;

    if let Some(scan_config) = &settings.scan {
        let thicknesses = scan_config.thicknesses()?;
        let scan = ThicknessScan::run(
            settings.n0,
            settings.n1,
            settings.n2,
            &thicknesses,
            &sweep,
        )?;
        if let Some((thickness, mean)) = scan.best() {
            println!(
                "Lowest mean reflectance: {:.4} % at {} nm",
                mean * 100.0,
                thickness
            );
        }
        output::write_scan(&scan, &settings.directory)?;
    }

    info!("Done");
    Ok(())
}
