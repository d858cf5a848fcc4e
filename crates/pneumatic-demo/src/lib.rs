//! Headless scene runner for pneumatic networks.
//!
//! A scene is a network file (RON, TOML or JSON). Running a scene loads it,
//! steps it a fixed number of ticks, and captures alert events, final
//! snapshots and the state hash. Every scene is run twice and the two hashes
//! must agree.

pub mod error;

use std::path::{Path, PathBuf};

use pneumatic_core::event::NetworkEvent;
use pneumatic_core::fixed::Ticks;
use pneumatic_core::network::Network;
use pneumatic_core::query::{ComponentSnapshot, TubeSnapshot};
use pneumatic_data::loader::detect_format;

pub use error::DemoError;

/// Ticks run per scene when none are given.
pub const DEFAULT_TICKS: Ticks = 100;

/// Outcome of running one scene.
#[derive(Debug, Clone)]
pub struct SceneReport {
    pub scene: String,
    pub ticks: Ticks,
    pub events: Vec<NetworkEvent>,
    pub components: Vec<ComponentSnapshot>,
    pub tubes: Vec<TubeSnapshot>,
    pub state_hash: u64,
}

impl SceneReport {
    /// Components whose alert is set after the last tick.
    pub fn alerting(&self) -> impl Iterator<Item = &ComponentSnapshot> {
        self.components.iter().filter(|c| c.alert.is_some())
    }
}

/// Directory holding the bundled scenes.
pub fn scenes_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("scenes")
}

/// Every scene file in `dir` with a supported extension, sorted by path.
pub fn bundled_scenes(dir: &Path) -> Result<Vec<PathBuf>, DemoError> {
    let mut scenes = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && detect_format(&path).is_ok() {
            scenes.push(path);
        }
    }
    scenes.sort();
    Ok(scenes)
}

fn load(path: &Path) -> Result<Network, DemoError> {
    if !path.exists() {
        return Err(DemoError::SceneNotFound {
            path: path.to_path_buf(),
        });
    }
    pneumatic_data::load_network(path).map_err(|source| DemoError::DataLoad {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a scene, run it for `ticks`, and check a second run hashes the same.
pub fn run_scene(path: &Path, ticks: Ticks) -> Result<SceneReport, DemoError> {
    let scene = path
        .file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());

    let mut first = load(path)?;
    let events = first.step_n(ticks);
    let state_hash = first.state_hash();

    let mut second = load(path)?;
    second.step_n(ticks);
    let replay_hash = second.state_hash();
    if state_hash != replay_hash {
        return Err(DemoError::Nondeterministic {
            scene,
            first: state_hash,
            second: replay_hash,
        });
    }
    log::debug!("scene '{scene}': {ticks} ticks, hash {state_hash:#018x}");

    Ok(SceneReport {
        scene,
        ticks,
        events,
        components: first.snapshot_components(),
        tubes: first.snapshot_tubes(),
        state_hash,
    })
}
