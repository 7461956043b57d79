use ndarray::Array1;
use serde::Deserialize;

use crate::error::ReflectanceError;
use crate::stack::NM;

/// Lower edge of the visible sweep in nanometres.
pub const VISIBLE_START_NM: f64 = 400.0;
/// Upper edge of the visible sweep in nanometres.
pub const VISIBLE_END_NM: f64 = 700.0;
/// Number of wavelengths in the default sweep.
pub const VISIBLE_NUM_POINTS: usize = 500;


/// Evenly spaced sweep read from configuration, in nanometres.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SweepConfig {
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start: VISIBLE_START_NM,
            end: VISIBLE_END_NM,
            num_points: VISIBLE_NUM_POINTS,
        }
    }
}

/// Ordered vacuum wavelengths, in metres.
///
/// The sweep is usually increasing but nothing downstream relies on that:
/// reflectance is evaluated per element and returned in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct WavelengthSweep {
    pub wavelengths: Array1<f64>,
}

impl WavelengthSweep {
    /// The 400-700 nm, 500 point sweep used for visible light.
    pub fn visible() -> Self {
        Self {
            wavelengths: Array1::linspace(
                VISIBLE_START_NM * NM,
                VISIBLE_END_NM * NM,
                VISIBLE_NUM_POINTS,
            ),
        }
    }

    /// Evenly spaced sweep from `start` to `end` inclusive, both in nanometres.
    pub fn linspace_nm(start: f64, end: f64, num_points: usize) -> Result<Self, ReflectanceError> {
        if num_points == 0 {
            return Err(ReflectanceError::InvalidArgument(
                "sweep needs at least one point".to_string(),
            ));
        }
        if !(start > 0.0 && end.is_finite()) {
            return Err(ReflectanceError::InvalidArgument(format!(
                "sweep bounds must be positive, got {} to {}",
                start, end
            )));
        }
        if end < start {
            return Err(ReflectanceError::InvalidArgument(format!(
                "sweep end {} is below start {}",
                end, start
            )));
        }
        Ok(Self {
            wavelengths: Array1::linspace(start * NM, end * NM, num_points),
        })
    }

    /// Explicit list of wavelengths in nanometres.
    pub fn from_nm(values: Vec<f64>) -> Self {
        Self {
            wavelengths: Array1::from(values).mapv(|x| x * NM),
        }
    }

    /// Explicit list of wavelengths in metres.
    pub fn from_m(values: Vec<f64>) -> Self {
        Self {
            wavelengths: Array1::from(values),
        }
    }

    pub fn to_nm(&self) -> Array1<f64> {
        self.wavelengths.mapv(|x| x / NM)
    }

    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.wavelengths.to_vec()
    }
}

impl TryFrom<&SweepConfig> for WavelengthSweep {
    type Error = ReflectanceError;

    fn try_from(config: &SweepConfig) -> Result<Self, Self::Error> {
        Self::linspace_nm(config.start, config.end, config.num_points)
    }
}
