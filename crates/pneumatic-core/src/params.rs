//! Relaxation constants.
//!
//! The step has no notion of elapsed time: every coefficient is applied once
//! per call, so the apparent physical rate follows how often the caller steps.

use serde::{Deserialize, Serialize};

use crate::fixed::{Fixed64, f64_to_fixed64};

/// Errors reported by [`RelaxationParams::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamsError {
    #[error("diffusion coefficient {0} is outside (0, 1]")]
    DiffusionOutOfRange(Fixed64),
    #[error("supply pressure must be positive, got {0}")]
    NonPositiveSupply(Fixed64),
    #[error("cylinder full-stroke pressure must be positive, got {0}")]
    NonPositiveFullStroke(Fixed64),
}

/// Constants used by the relaxation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaxationParams {
    /// Fraction of a pressure difference transferred per step (`k`).
    pub diffusion: Fixed64,
    /// Pressure a compressor pushes its terminal toward.
    pub supply_pressure: Fixed64,
    /// Pressure at which a cylinder reports an expansion of exactly 1.
    pub cylinder_full_pressure: Fixed64,
    /// Residual mass above which a tube snapshot reports `pressurized`.
    /// Not used by the step itself.
    pub pressurized_threshold: Fixed64,
}

impl RelaxationParams {
    pub const DEFAULT_DIFFUSION: f64 = 0.3;
    pub const DEFAULT_SUPPLY_PRESSURE: f64 = 3.0;
    pub const DEFAULT_CYLINDER_FULL_PRESSURE: f64 = 1.5;
    pub const DEFAULT_PRESSURIZED_THRESHOLD: f64 = 0.5;

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.diffusion <= Fixed64::ZERO || self.diffusion > Fixed64::ONE {
            return Err(ParamsError::DiffusionOutOfRange(self.diffusion));
        }
        if self.supply_pressure <= Fixed64::ZERO {
            return Err(ParamsError::NonPositiveSupply(self.supply_pressure));
        }
        if self.cylinder_full_pressure <= Fixed64::ZERO {
            return Err(ParamsError::NonPositiveFullStroke(
                self.cylinder_full_pressure,
            ));
        }
        Ok(())
    }
}

impl Default for RelaxationParams {
    fn default() -> Self {
        Self {
            diffusion: f64_to_fixed64(Self::DEFAULT_DIFFUSION),
            supply_pressure: f64_to_fixed64(Self::DEFAULT_SUPPLY_PRESSURE),
            cylinder_full_pressure: f64_to_fixed64(Self::DEFAULT_CYLINDER_FULL_PRESSURE),
            pressurized_threshold: f64_to_fixed64(Self::DEFAULT_PRESSURIZED_THRESHOLD),
        }
    }
}
