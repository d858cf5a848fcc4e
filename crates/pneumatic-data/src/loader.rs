//! Format detection and deserialization helpers.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use pneumatic_core::network::NetworkError;

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a network definition.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A numeric field cannot be represented in fixed point.
    #[error("{field} = {value} is out of range")]
    OutOfRange { field: String, value: f64 },

    /// Building the network failed (invalid constants, duplicate ids or
    /// tube names).
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Deserialize `content` in the given format. `path` is only used to label
/// parse errors.
pub fn deserialize_str<T: DeserializeOwned>(
    content: &str,
    format: Format,
    path: &Path,
) -> Result<T, DataLoadError> {
    let parse_error = |detail: String| DataLoadError::Parse {
        file: path.to_path_buf(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    deserialize_str(&content, format, path)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::fs;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        name: String,
        value: f64,
    }

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "pneumatic_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("desk.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("desk.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("desk.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_unsupported() {
        for name in ["desk.yaml", "desk"] {
            assert!(matches!(
                detect_format(Path::new(name)),
                Err(DataLoadError::UnsupportedFormat { .. })
            ));
        }
    }

    // -----------------------------------------------------------------------
    // deserialize_str
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_str_each_format() {
        let expected = Probe {
            name: "supply".to_string(),
            value: 0.5,
        };
        let path = Path::new("inline");
        let ron: Probe = deserialize_str(r#"(name: "supply", value: 0.5)"#, Format::Ron, path).unwrap();
        let toml: Probe = deserialize_str("name = \"supply\"\nvalue = 0.5\n", Format::Toml, path).unwrap();
        let json: Probe =
            deserialize_str(r#"{"name": "supply", "value": 0.5}"#, Format::Json, path).unwrap();
        assert_eq!(ron, expected);
        assert_eq!(toml, expected);
        assert_eq!(json, expected);
    }

    #[test]
    fn parse_error_names_the_file() {
        let result: Result<Probe, _> =
            deserialize_str("(name: ", Format::Ron, Path::new("broken.ron"));
        match result {
            Err(DataLoadError::Parse { file, .. }) => assert_eq!(file, PathBuf::from("broken.ron")),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // deserialize_file
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_file_reads_json() {
        let dir = make_test_dir("read_json");
        let path = dir.join("probe.json");
        fs::write(&path, r#"{"name": "work", "value": 1.5}"#).unwrap();

        let probe: Probe = deserialize_file(&path).unwrap();
        assert_eq!(probe.name, "work");

        cleanup(&dir);
    }

    #[test]
    fn deserialize_file_missing_is_io() {
        let dir = make_test_dir("missing");
        let result: Result<Probe, _> = deserialize_file(&dir.join("absent.ron"));
        assert!(matches!(result, Err(DataLoadError::Io(_))));
        cleanup(&dir);
    }

    #[test]
    fn deserialize_file_checks_extension_first() {
        let result: Result<Probe, _> = deserialize_file(Path::new("/nonexistent/probe.yaml"));
        assert!(matches!(result, Err(DataLoadError::UnsupportedFormat { .. })));
    }

    // -----------------------------------------------------------------------
    // Error display messages
    // -----------------------------------------------------------------------

    #[test]
    fn error_display_messages() {
        let e = DataLoadError::UnsupportedFormat {
            file: PathBuf::from("desk.yaml"),
        };
        assert!(format!("{e}").contains("desk.yaml"));

        let e = DataLoadError::OutOfRange {
            field: "tube 'supply' residual_mass".to_string(),
            value: f64::INFINITY,
        };
        assert!(format!("{e}").contains("supply"));

        let e: DataLoadError = NetworkError::DuplicateTube("supply".to_string()).into();
        assert!(format!("{e}").contains("supply"));
    }
}
