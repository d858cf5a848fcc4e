//! Pneumatic Core -- pressure relaxation for small networks of pneumatic
//! components joined by flexible tubes.
//!
//! The crate advances a network by discrete steps. Each step produces a
//! pressure per terminal and a wiring diagnostic per component. It is an
//! iterative proportional-relaxation approximation: no compressible-flow
//! model, no steady-state solve, no elapsed-time scaling.
//!
//! # Step Pipeline
//!
//! Each call to [`engine::step`] (or [`network::Network::step`]) runs:
//!
//! 1. **Vent** -- tubes with an atmosphere endpoint are reset to zero.
//! 2. **Relax** -- components are visited in order; each resolves its
//!    terminals through the [`resolver`], reads pressures through
//!    [`pressure::pressure_of`], and adds its kind-specific transfers into
//!    the tube arena.
//!
//! # Key Types
//!
//! - [`component::Component`] -- a compressor, button valve, cylinder or
//!   splitter with a fixed number of terminals.
//! - [`tube::Tube`] / [`tube::TubeArena`] -- tubes live in a slotmap arena and
//!   are addressed by [`id::TubeId`].
//! - [`endpoint::Endpoint`] -- `"atmosphere"` or `"<componentId>/<terminal>"`.
//! - [`network::Network`] -- owning session with rewiring, events, snapshots
//!   and a determinism hash.
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for deterministic math.

pub mod component;
pub mod endpoint;
pub mod engine;
pub mod event;
pub mod fixed;
pub mod id;
pub mod network;
pub mod params;
pub mod pressure;
pub mod query;
pub mod resolver;
pub mod sim;
pub mod tube;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
