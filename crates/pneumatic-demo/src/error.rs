use std::path::PathBuf;

/// Errors that can occur in the headless runner.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// The scene file does not exist.
    #[error("scene '{}' not found", path.display())]
    SceneNotFound { path: PathBuf },

    /// Failed to load or build the network in a scene file.
    #[error("data load error in {}: {source}", path.display())]
    DataLoad {
        path: PathBuf,
        source: pneumatic_data::DataLoadError,
    },

    /// Two runs of the same scene ended in different states.
    #[error("scene '{scene}' is nondeterministic: {first:#018x} != {second:#018x}")]
    Nondeterministic { scene: String, first: u64, second: u64 },

    /// A command-line argument could not be understood.
    #[error("invalid argument '{arg}': {detail}")]
    InvalidArgument { arg: String, detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
