//! Host-facing asset helper that injects mtime versions into asset registrations.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::url::{add_query_arg, strip_theme_segment};
use super::version::FileVersioner;
use crate::host::{AssetRegistration, ThemeHost};
use crate::json::JsonError;
use crate::manifest::ManifestCache;

/// Filter hook that may rewrite the favicon URI before it is versioned.
pub const FAVICON_URI_FILTER: &str = "theme_favicon_uri";

const FAVICON_PATH: &str = "/dist/images/favicon.ico";

/// Optional arguments for [`AssetResolver::enqueue_style`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleOptions {
  /// Handles of stylesheets that must load first.
  pub dependencies: Vec<String>,
  /// Media the stylesheet applies to.
  pub media: String,
}

impl Default for StyleOptions {
  fn default() -> Self {
    Self {
      dependencies: Vec::new(),
      media: "all".into(),
    }
  }
}

/// Optional arguments for [`AssetResolver::enqueue_script`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOptions {
  /// Handles of scripts that must load first.
  pub dependencies: Vec<String>,
  /// Emit the script before the closing body tag instead of in the head.
  pub in_footer: bool,
}

/// Resolves theme asset URLs and registers assets with the host.
pub struct AssetResolver<H> {
  host: H,
  root: PathBuf,
  manifest: ManifestCache,
}

impl<H: ThemeHost> AssetResolver<H> {
  /// Create a resolver for a site whose home URL is served from `root` on disk.
  pub fn new(host: H, root: impl Into<PathBuf>, manifest: ManifestCache) -> Self {
    Self {
      host,
      root: root.into(),
      manifest,
    }
  }

  /// Host the resolver registers assets with.
  pub fn host(&self) -> &H {
    &self.host
  }

  /// Consume the resolver and hand back the host.
  pub fn into_host(self) -> H {
    self.host
  }

  /// Filesystem directory the home URL maps onto.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Manifest cache backing [`Self::bundle_path`].
  pub fn manifest(&self) -> &ManifestCache {
    &self.manifest
  }

  /// Version token for `src`: the backing file's mtime, or `None` when unresolvable.
  pub fn file_version(&self, src: &str) -> Option<u64> {
    let home_url = self.host.site_url("/");
    FileVersioner::new(&home_url, &self.root).generate(src)
  }

  /// Public URI of the theme root, skipping a nested `theme/` template directory.
  pub fn theme_uri(&self) -> String {
    strip_theme_segment(&self.host.template_directory_uri())
  }

  /// Theme-relative path of a built bundle, e.g. `/dist/app.a1b2c3.js` for `app.js`.
  ///
  /// Names missing from the manifest are returned unchanged under `/dist/`.
  pub fn bundle_path(&self, path: &str) -> Result<String, JsonError> {
    let resolved = self.manifest.resolve(path)?;
    Ok(format!("/dist/{resolved}"))
  }

  /// Register a stylesheet with a generated version.
  pub fn enqueue_style(&mut self, handle: &str, src: &str, options: StyleOptions) {
    let version = self.file_version(src);
    let registration = AssetRegistration {
      handle,
      src,
      dependencies: &options.dependencies,
      version,
    };
    self.host.enqueue_style(&registration, &options.media);
  }

  /// Register a script with a generated version.
  pub fn enqueue_script(&mut self, handle: &str, src: &str, options: ScriptOptions) {
    let version = self.file_version(src);
    let registration = AssetRegistration {
      handle,
      src,
      dependencies: &options.dependencies,
      version,
    };
    self.host.enqueue_script(&registration, options.in_footer);
  }

  /// Write a versioned `<link rel="shortcut icon">` tag to `out`.
  ///
  /// Nothing is written when the host already has a site icon configured or the favicon
  /// file does not exist. Returns whether a tag was written.
  pub fn add_favicon(&self, out: &mut impl Write) -> io::Result<bool> {
    if self.host.has_site_icon() {
      return Ok(false);
    }

    let default_uri = format!("{}{}", self.theme_uri(), FAVICON_PATH);
    let favicon_uri = self.host.apply_filters(FAVICON_URI_FILTER, default_uri);

    let Some(version) = self.file_version(&favicon_uri) else {
      debug!(uri = %favicon_uri, "favicon not found, skipping link tag");
      return Ok(false);
    };

    let href = add_query_arg(&favicon_uri, "ver", &version.to_string());
    writeln!(
      out,
      r#"<link rel="shortcut icon" href="{}" />"#,
      href.replace('"', "&quot;")
    )?;
    Ok(true)
  }
}

impl<H: std::fmt::Debug> std::fmt::Debug for AssetResolver<H> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AssetResolver")
      .field("host", &self.host)
      .field("root", &self.root)
      .field("manifest", &self.manifest)
      .finish()
  }
}
