//! Reader for the build manifest produced by the asset bundler.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::json::{JsonError, load_json};

/// Mapping of logical asset paths to the hashed filenames emitted by the build.
pub type ManifestEntries = BTreeMap<String, String>;

/// Reader for `<root>/dist/manifest.json`.
#[derive(Debug, Clone)]
pub struct Manifest {
  root: PathBuf,
}

impl Manifest {
  /// Create a reader rooted at the application directory.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Location of the manifest file.
  pub fn json_path(&self) -> PathBuf {
    self.root.join("dist").join("manifest.json")
  }

  /// Application root this reader was created with.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Read the manifest.
  ///
  /// A project that has not been built yet has no manifest, so a missing file yields an
  /// empty mapping. Unreadable or malformed files are still reported.
  pub fn load(&self) -> Result<ManifestEntries, JsonError> {
    match load_json(self.json_path()) {
      Ok(entries) => Ok(entries),
      Err(err) if err.is_not_found() => {
        debug!(path = %err.path().display(), "manifest missing, using empty mapping");
        Ok(ManifestEntries::new())
      }
      Err(err) => Err(err),
    }
  }
}
