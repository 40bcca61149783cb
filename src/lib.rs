#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod assets;
pub mod config;
pub mod host;
pub mod json;
pub mod manifest;

pub use assets::{AssetResolver, FileVersioner, ScriptOptions, StyleOptions};
pub use config::Config;
pub use host::{AssetRegistration, ThemeHost};
pub use json::{JsonError, JsonMap, load_json};
pub use manifest::{Manifest, ManifestCache, ManifestEntries};
