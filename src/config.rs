//! Application configuration loaded from `config.json` at the theme root.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::json::{JsonError, JsonMap, load_json};

const CONFIG_FILE: &str = "config.json";

/// Reader for the application configuration file.
#[derive(Debug, Clone)]
pub struct Config {
  root: PathBuf,
}

impl Config {
  /// Create a reader rooted at the application directory.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Location of the configuration file.
  pub fn json_path(&self) -> PathBuf {
    self.root.join(CONFIG_FILE)
  }

  /// Read the configuration.
  ///
  /// A missing file is an error here: the application cannot run without its configuration,
  /// so [`JsonError::NotFound`] is returned to the caller untouched.
  pub fn load(&self) -> Result<JsonMap, JsonError> {
    load_json(self.json_path())
  }

  /// Application root this reader was created with.
  pub fn root(&self) -> &Path {
    &self.root
  }
}

/// Look up a dotted key such as `assets.favicon` inside a loaded configuration.
pub fn lookup<'a>(config: &'a JsonMap, key: &str) -> Option<&'a Value> {
  let mut segments = key.split('.');
  let mut current = config.get(segments.next()?)?;
  for segment in segments {
    current = current.as_object()?.get(segment)?;
  }
  Some(current)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  #[test]
  fn resolves_config_next_to_root() {
    let config = Config::new("/srv/theme");
    assert_eq!(config.json_path(), Path::new("/srv/theme").join("config.json"));
  }

  #[test]
  fn missing_config_is_not_found() {
    let temp = tempdir().expect("failed to create temp dir");

    let err = Config::new(temp.path()).load().unwrap_err();

    assert!(err.is_not_found());
  }

  #[test]
  fn loads_arbitrary_values() {
    let temp = tempdir().expect("failed to create temp dir");
    fs::write(
      temp.path().join("config.json"),
      r#"{"name": "theme", "development": {"port": 3000, "hot": true}}"#,
    )
    .unwrap();

    let values = Config::new(temp.path()).load().expect("config should load");

    assert_eq!(values["name"], "theme");
    assert_eq!(lookup(&values, "development.port"), Some(&Value::from(3000)));
    assert_eq!(lookup(&values, "development.hot"), Some(&Value::Bool(true)));
  }

  #[test]
  fn malformed_config_propagates() {
    let temp = tempdir().expect("failed to create temp dir");
    fs::write(temp.path().join("config.json"), "[1, 2").unwrap();

    let err = Config::new(temp.path()).load().unwrap_err();

    assert!(matches!(err, JsonError::Parse { .. }));
  }

  #[test]
  fn lookup_stops_at_non_objects() {
    let map: JsonMap = serde_json::from_str(r#"{"a": {"b": 1}, "c": "text"}"#).unwrap();

    assert_eq!(lookup(&map, "a.b"), Some(&Value::from(1)));
    assert_eq!(lookup(&map, "a.b.c"), None);
    assert_eq!(lookup(&map, "c.d"), None);
    assert_eq!(lookup(&map, "missing"), None);
    assert!(lookup(&map, "a").is_some_and(Value::is_object));
  }
}
