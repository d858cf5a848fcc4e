//! Serde structs for network definition files.
//!
//! These describe the on-disk layout only. [`crate::build`] turns them into a
//! [`pneumatic_core::network::Network`].

use serde::Deserialize;

use pneumatic_core::endpoint::ATMOSPHERE;
use pneumatic_core::params::RelaxationParams;

// ===========================================================================
// Network file
// ===========================================================================

/// A whole network: constants, components in visit order, tubes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkData {
    #[serde(default)]
    pub params: ParamsData,
    #[serde(default)]
    pub components: Vec<ComponentData>,
    #[serde(default)]
    pub tubes: Vec<TubeData>,
}

// ===========================================================================
// Parameters
// ===========================================================================

/// Relaxation constants as plain floats. Missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParamsData {
    pub diffusion: f64,
    pub supply_pressure: f64,
    pub cylinder_full_pressure: f64,
    pub pressurized_threshold: f64,
}

impl Default for ParamsData {
    fn default() -> Self {
        Self {
            diffusion: RelaxationParams::DEFAULT_DIFFUSION,
            supply_pressure: RelaxationParams::DEFAULT_SUPPLY_PRESSURE,
            cylinder_full_pressure: RelaxationParams::DEFAULT_CYLINDER_FULL_PRESSURE,
            pressurized_threshold: RelaxationParams::DEFAULT_PRESSURIZED_THRESHOLD,
        }
    }
}

// ===========================================================================
// Components
// ===========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindData {
    Compressor,
    Button,
    Cylinder,
    Splitter,
}

/// One component. Gate states only apply to buttons.
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentData {
    pub id: String,
    pub kind: KindData,
    #[serde(default)]
    pub left_pressed: bool,
    #[serde(default)]
    pub right_pressed: bool,
}

// ===========================================================================
// Tubes
// ===========================================================================

/// One tube. Endpoints use the wire form: `"atmosphere"` or `"<id>/<n>"`.
#[derive(Debug, Clone, Deserialize)]
pub struct TubeData {
    pub name: String,
    #[serde(default = "atmosphere")]
    pub from: String,
    #[serde(default = "atmosphere")]
    pub to: String,
    #[serde(default)]
    pub residual_mass: f64,
}

fn atmosphere() -> String {
    ATMOSPHERE.to_string()
}

// ===========================================================================
// Tests
// ===========================================================================
