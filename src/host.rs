//! Seam between the asset helpers and the web framework that renders the site.

/// Asset description handed to the host when registering a stylesheet or script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRegistration<'a> {
  /// Unique handle the host registers the asset under.
  pub handle: &'a str,
  /// Public URL of the asset.
  pub src: &'a str,
  /// Handles that must be emitted before this asset.
  pub dependencies: &'a [String],
  /// Cache-busting version, `None` when the asset is external or missing on disk.
  pub version: Option<u64>,
}

/// Capabilities the host framework exposes to the asset helpers.
pub trait ThemeHost {
  /// Absolute site URL for `path`, e.g. `site_url("/")` for the home URL.
  fn site_url(&self, path: &str) -> String;

  /// Public URL of the active theme directory.
  fn template_directory_uri(&self) -> String;

  /// Register a stylesheet for output on the given media.
  fn enqueue_style(&mut self, asset: &AssetRegistration<'_>, media: &str);

  /// Register a script, either in the document head or before the closing body tag.
  fn enqueue_script(&mut self, asset: &AssetRegistration<'_>, in_footer: bool);

  /// Whether the site owner configured a site icon through the host.
  fn has_site_icon(&self) -> bool {
    false
  }

  /// Let host extensions rewrite `value` for the named hook.
  fn apply_filters(&self, _hook: &str, value: String) -> String {
    value
  }
}
