//! Data-driven network definitions.
//!
//! A network file lists relaxation constants, components in visit order and
//! tubes with their endpoints. Files may be RON, TOML or JSON; the format is
//! picked from the extension.

pub mod build;
pub mod loader;
pub mod schema;

pub use build::{build_network, load_network};
pub use loader::{DataLoadError, Format};
pub use schema::NetworkData;
