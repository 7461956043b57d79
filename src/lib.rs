//! Thin-film reflectance at normal incidence.
//!
//! Computes the fraction of light reflected by a single transparent film
//! between an incident medium and a substrate, across a sweep of
//! wavelengths, from the closed-form multiple-beam interference formula.
//!
//! ```rust
//! use thinfilm::reflectance;
//!
//! let wavelengths = [450e-9, 550e-9, 650e-9];
//! let r = reflectance::compute(1.0, 1.38, 1.52, 100e-9, &wavelengths).unwrap();
//! assert_eq!(r.len(), wavelengths.len());
//! ```

pub mod error;
pub mod fresnel;
pub mod output;
pub mod reflectance;
pub mod scan;
pub mod settings;
pub mod spectrum;
pub mod stack;
pub mod sweep;

pub use error::ReflectanceError;
pub use reflectance::compute;
pub use spectrum::Spectrum;
pub use stack::OpticalStack;
pub use sweep::WavelengthSweep;
