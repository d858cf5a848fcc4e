//! Shared test helpers for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::component::Component;
use crate::endpoint::Endpoint;
use crate::fixed::{Fixed64, fixed64_to_f64};
use crate::id::TubeId;
use crate::network::Network;
use crate::tube::{Tube, TubeArena};

// ===========================================================================
// Fixed-point helpers
// ===========================================================================

pub fn fixed(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// Assert a fixed-point value is within 1e-6 of an f64 expectation.
#[track_caller]
pub fn assert_close(actual: Fixed64, expected: f64) {
    let actual = fixed64_to_f64(actual);
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

// ===========================================================================
// Tube builders
// ===========================================================================

/// A tube from `component/terminal` to `other/other_terminal`, holding `mass`.
///
/// Neither end is atmosphere, so the tube survives the vent phase.
pub fn sealed_tube(
    name: &str,
    component: &str,
    terminal: u8,
    other: &str,
    other_terminal: u8,
    mass: f64,
) -> Tube {
    Tube::between(
        name,
        Endpoint::terminal(component, terminal),
        Endpoint::terminal(other, other_terminal),
    )
    .with_residual_mass(fixed(mass))
}

/// One single-terminal component with a sealed, empty tube on terminal 1.
///
/// The far end names a component that does not exist.
pub fn single_terminal(component: Component) -> (Vec<Component>, TubeArena, TubeId) {
    let mut tubes = TubeArena::with_key();
    let tube = tubes.insert(sealed_tube(
        "t",
        component.id.as_str(),
        1,
        "far end",
        1,
        0.0,
    ));
    (vec![component], tubes, tube)
}

// ===========================================================================
// Network builders
// ===========================================================================

/// A compressor feeding a splitter whose other two terminals drive
/// cylinders. All tubes sealed.
pub fn manifold() -> Network {
    let mut net = Network::new();
    for component in [
        Component::compressor("source"),
        Component::splitter("tee"),
        Component::cylinder("left"),
        Component::cylinder("right"),
    ] {
        net.add_component(component)
            .expect("manifold ids are unique");
    }
    for (name, from, to) in [
        ("feed", Endpoint::terminal("source", 1), Endpoint::terminal("tee", 1)),
        ("left line", Endpoint::terminal("tee", 2), Endpoint::terminal("left", 1)),
        ("right line", Endpoint::terminal("tee", 3), Endpoint::terminal("right", 1)),
    ] {
        net.add_tube(Tube::between(name, from, to))
            .expect("manifold tube names are unique");
    }
    net
}

/// `chains` independent compressor -> button -> splitter -> 2 cylinder
/// chains, all buttons pressed. Used by benchmarks.
pub fn build_chains(chains: usize) -> Network {
    let mut net = Network::new();
    for i in 0..chains {
        let source = format!("source {i}");
        let valve = format!("valve {i}");
        let tee = format!("tee {i}");
        let left = format!("left {i}");
        let right = format!("right {i}");

        net.add_component(Component::compressor(source.as_str())).expect("unique");
        let mut button = Component::button(valve.as_str());
        button.set_gate(crate::component::Gate::Left, true);
        net.add_component(button).expect("unique");
        net.add_component(Component::splitter(tee.as_str())).expect("unique");
        net.add_component(Component::cylinder(left.as_str())).expect("unique");
        net.add_component(Component::cylinder(right.as_str())).expect("unique");

        let wires = [
            (Endpoint::terminal(source.as_str(), 1), Endpoint::terminal(valve.as_str(), 1)),
            (Endpoint::terminal(valve.as_str(), 2), Endpoint::terminal(tee.as_str(), 1)),
            (Endpoint::terminal(tee.as_str(), 2), Endpoint::terminal(left.as_str(), 1)),
            (Endpoint::terminal(tee.as_str(), 3), Endpoint::terminal(right.as_str(), 1)),
            (Endpoint::terminal(valve.as_str(), 3), Endpoint::Atmosphere),
            (Endpoint::terminal(valve.as_str(), 4), Endpoint::Atmosphere),
        ];
        for (j, (from, to)) in wires.into_iter().enumerate() {
            net.add_tube(Tube::between(format!("tube {i}.{j}"), from, to))
                .expect("unique");
        }
    }
    net
}
