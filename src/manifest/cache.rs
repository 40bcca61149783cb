//! Lazily loaded manifest shared by every lookup made through one resolver.

use std::cell::{Cell, OnceCell};
use std::path::PathBuf;

use tracing::debug;

use super::reader::{Manifest, ManifestEntries};
use crate::json::JsonError;

type ManifestLoader = Box<dyn FnOnce() -> Result<ManifestEntries, JsonError>>;

/// Memoized manifest with an injectable loader.
///
/// The loader runs on the first lookup and never again; its outcome, including a failure,
/// is kept for the lifetime of the cache.
pub struct ManifestCache {
  loader: Cell<Option<ManifestLoader>>,
  entries: OnceCell<Result<ManifestEntries, JsonError>>,
}

impl ManifestCache {
  /// Build a cache around an arbitrary loader.
  pub fn new(loader: impl FnOnce() -> Result<ManifestEntries, JsonError> + 'static) -> Self {
    Self {
      loader: Cell::new(Some(Box::new(loader))),
      entries: OnceCell::new(),
    }
  }

  /// Build a cache reading `<theme_root>/dist/manifest.json`.
  pub fn for_theme(theme_root: impl Into<PathBuf>) -> Self {
    let manifest = Manifest::new(theme_root);
    Self::new(move || manifest.load())
  }

  /// Cache that already holds the given entries.
  pub fn preloaded(entries: ManifestEntries) -> Self {
    Self {
      loader: Cell::new(None),
      entries: OnceCell::from(Ok(entries)),
    }
  }

  /// Manifest entries, loading them on first access.
  pub fn entries(&self) -> Result<&ManifestEntries, JsonError> {
    self
      .entries
      .get_or_init(|| match self.loader.take() {
        Some(loader) => {
          debug!("loading asset manifest");
          loader()
        }
        None => Ok(ManifestEntries::new()),
      })
      .as_ref()
      .map_err(Clone::clone)
  }

  /// Hashed output path for `logical`, or `logical` itself when the manifest has no entry.
  pub fn resolve(&self, logical: &str) -> Result<String, JsonError> {
    let entries = self.entries()?;
    Ok(
      entries
        .get(logical)
        .map_or_else(|| logical.to_string(), Clone::clone),
    )
  }

  /// Whether the loader has already run.
  pub fn is_loaded(&self) -> bool {
    self.entries.get().is_some()
  }
}

impl std::fmt::Debug for ManifestCache {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ManifestCache")
      .field("entries", &self.entries.get())
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use std::rc::Rc;
  use tempfile::tempdir;

  fn counting_cache(entries: ManifestEntries) -> (ManifestCache, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let cache = ManifestCache::new(move || {
      counter.set(counter.get() + 1);
      Ok(entries)
    });
    (cache, calls)
  }

  #[test]
  fn maps_known_entries_and_passes_through_unknown() {
    let entries = ManifestEntries::from([("app.js".to_string(), "app.a1b2c3.js".to_string())]);
    let (cache, _) = counting_cache(entries);

    assert_eq!(cache.resolve("app.js").unwrap(), "app.a1b2c3.js");
    assert_eq!(cache.resolve("missing.js").unwrap(), "missing.js");
  }

  #[test]
  fn loader_runs_at_most_once() {
    let (cache, calls) = counting_cache(ManifestEntries::new());
    assert!(!cache.is_loaded());
    assert_eq!(calls.get(), 0);

    cache.resolve("a.js").unwrap();
    cache.resolve("b.js").unwrap();
    cache.entries().unwrap();

    assert!(cache.is_loaded());
    assert_eq!(calls.get(), 1);
  }

  #[test]
  fn failed_load_is_memoized() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let cache = ManifestCache::new(move || {
      counter.set(counter.get() + 1);
      Err(JsonError::NotFound {
        path: PathBuf::from("manifest.json"),
      })
    });

    assert!(cache.resolve("app.js").is_err());
    assert!(cache.resolve("app.js").is_err());
    assert_eq!(calls.get(), 1);
  }

  #[test]
  fn preloaded_cache_skips_loading() {
    let cache = ManifestCache::preloaded(ManifestEntries::from([(
      "a.css".to_string(),
      "a.1.css".to_string(),
    )]));

    assert!(cache.is_loaded());
    assert_eq!(cache.resolve("a.css").unwrap(), "a.1.css");
  }

  #[test]
  fn theme_cache_reads_from_disk_once() {
    let temp = tempdir().expect("failed to create temp dir");
    let dist = temp.path().join("dist");
    fs::create_dir_all(&dist).unwrap();
    fs::write(dist.join("manifest.json"), r#"{"app.js": "app.v1.js"}"#).unwrap();

    let cache = ManifestCache::for_theme(temp.path());
    assert_eq!(cache.resolve("app.js").unwrap(), "app.v1.js");

    fs::write(dist.join("manifest.json"), r#"{"app.js": "app.v2.js"}"#).unwrap();
    assert_eq!(cache.resolve("app.js").unwrap(), "app.v1.js");
  }

  #[test]
  fn theme_cache_without_manifest_passes_through() {
    let temp = tempdir().expect("failed to create temp dir");

    let cache = ManifestCache::for_theme(temp.path());

    assert_eq!(cache.resolve("app.js").unwrap(), "app.js");
  }
}
