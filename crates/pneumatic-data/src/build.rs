//! Turn a parsed [`NetworkData`] into a live [`Network`].

use std::path::Path;

use pneumatic_core::component::{Component, Gate};
use pneumatic_core::endpoint::Endpoint;
use pneumatic_core::fixed::Fixed64;
use pneumatic_core::network::Network;
use pneumatic_core::params::RelaxationParams;
use pneumatic_core::tube::Tube;

use crate::loader::{DataLoadError, deserialize_file};
use crate::schema::{ComponentData, KindData, NetworkData, ParamsData, TubeData};

/// Load and build a network from a RON, TOML or JSON file.
pub fn load_network(path: &Path) -> Result<Network, DataLoadError> {
    let data: NetworkData = deserialize_file(path)?;
    let network = build_network(&data)?;
    log::info!(
        "loaded {}: {} components, {} tubes",
        path.display(),
        network.components().len(),
        network.tubes().len()
    );
    Ok(network)
}

/// Build a network. Components keep file order, which is their visit order.
pub fn build_network(data: &NetworkData) -> Result<Network, DataLoadError> {
    let params = build_params(&data.params)?;
    let mut network = Network::with_params(params)?;

    for component in &data.components {
        network.add_component(build_component(component))?;
    }
    for tube in &data.tubes {
        network.add_tube(build_tube(tube)?)?;
    }
    Ok(network)
}

fn to_fixed(field: impl FnOnce() -> String, value: f64) -> Result<Fixed64, DataLoadError> {
    Fixed64::checked_from_num(value).ok_or_else(|| DataLoadError::OutOfRange {
        field: field(),
        value,
    })
}

fn build_params(data: &ParamsData) -> Result<RelaxationParams, DataLoadError> {
    Ok(RelaxationParams {
        diffusion: to_fixed(|| "params.diffusion".into(), data.diffusion)?,
        supply_pressure: to_fixed(|| "params.supply_pressure".into(), data.supply_pressure)?,
        cylinder_full_pressure: to_fixed(
            || "params.cylinder_full_pressure".into(),
            data.cylinder_full_pressure,
        )?,
        pressurized_threshold: to_fixed(
            || "params.pressurized_threshold".into(),
            data.pressurized_threshold,
        )?,
    })
}

fn build_component(data: &ComponentData) -> Component {
    let id = data.id.as_str();
    match data.kind {
        KindData::Compressor => Component::compressor(id),
        KindData::Cylinder => Component::cylinder(id),
        KindData::Splitter => Component::splitter(id),
        KindData::Button => {
            let mut button = Component::button(id);
            button.set_gate(Gate::Left, data.left_pressed);
            button.set_gate(Gate::Right, data.right_pressed);
            button
        }
    }
}

fn build_tube(data: &TubeData) -> Result<Tube, DataLoadError> {
    let from = Endpoint::parse(&data.from);
    let to = Endpoint::parse(&data.to);
    for endpoint in [&from, &to] {
        if let Endpoint::Unresolved(text) = endpoint {
            log::warn!(
                "tube '{}': endpoint '{text}' is neither atmosphere nor a terminal and will never connect",
                data.name
            );
        }
    }
    let mass = to_fixed(
        || format!("tube '{}' residual_mass", data.name),
        data.residual_mass,
    )?;
    Ok(Tube::between(data.name.as_str(), from, to).with_residual_mass(mass))
}
