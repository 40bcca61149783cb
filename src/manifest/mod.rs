//! Build manifest support: reading `dist/manifest.json` and memoizing its lookups.

mod cache;
mod reader;

pub use cache::ManifestCache;
pub use reader::{Manifest, ManifestEntries};
