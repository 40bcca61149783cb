//! Shared JSON file loading used by the manifest and configuration readers.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;

/// Decoded JSON object with arbitrary values.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Errors that can occur while loading a JSON file from disk.
///
/// Sources are reference counted so a failed load can be memoized and handed out again.
#[derive(Debug, Clone)]
pub enum JsonError {
  /// The file does not exist.
  NotFound {
    /// Path that was requested.
    path: PathBuf,
  },
  /// The file exists but could not be read.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: Arc<std::io::Error>,
  },
  /// The file was read but its contents are not valid for the requested shape.
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: Arc<serde_json::Error>,
  },
}

impl JsonError {
  /// Returns `true` when the file was simply absent.
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound { .. })
  }

  /// Path of the file the error refers to.
  pub fn path(&self) -> &Path {
    match self {
      Self::NotFound { path } | Self::Io { path, .. } | Self::Parse { path, .. } => path,
    }
  }
}

impl std::fmt::Display for JsonError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::NotFound { path } => write!(f, "json file not found: {}", path.display()),
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Parse { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for JsonError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::NotFound { .. } => None,
      Self::Io { source, .. } => Some(source.as_ref()),
      Self::Parse { source, .. } => Some(source.as_ref()),
    }
  }
}

/// Read and decode the JSON file at `path`.
///
/// A missing file is reported as [`JsonError::NotFound`] so callers can pick their own
/// recovery policy.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, JsonError> {
  let path = path.as_ref();
  let contents = match fs::read_to_string(path) {
    Ok(contents) => contents,
    Err(err) if err.kind() == ErrorKind::NotFound => {
      return Err(JsonError::NotFound {
        path: path.to_path_buf(),
      });
    }
    Err(err) => {
      return Err(JsonError::Io {
        path: path.to_path_buf(),
        source: Arc::new(err),
      });
    }
  };

  serde_json::from_str(&contents).map_err(|err| JsonError::Parse {
    path: path.to_path_buf(),
    source: Arc::new(err),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn reports_missing_files_as_not_found() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join("absent.json");

    let err = load_json::<JsonMap>(&path).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.path(), path.as_path());
    assert!(err.to_string().contains("absent.json"));
  }

  #[test]
  fn decodes_objects() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join("data.json");
    fs::write(&path, r#"{"name": "theme", "nested": {"depth": 2}}"#).unwrap();

    let map: JsonMap = load_json(&path).expect("valid json should load");

    assert_eq!(map["name"], "theme");
    assert_eq!(map["nested"]["depth"], 2);
  }

  #[test]
  fn malformed_content_is_a_parse_error() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = load_json::<JsonMap>(&path).unwrap_err();

    assert!(matches!(err, JsonError::Parse { .. }));
    assert!(!err.is_not_found());
    assert!(std::error::Error::source(&err).is_some());
  }

  #[test]
  fn reading_a_directory_is_an_io_error() {
    let temp = tempdir().expect("failed to create temp dir");

    let err = load_json::<JsonMap>(temp.path()).unwrap_err();

    assert!(matches!(err, JsonError::Io { .. }));
  }
}
