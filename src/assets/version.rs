//! Modification-time based cache busting for local asset URLs.

use std::fs;
use std::path::{MAIN_SEPARATOR, MAIN_SEPARATOR_STR, Path, PathBuf};
use std::time::UNIX_EPOCH;

use tracing::{debug, trace};

use super::url::{home_prefix_len, remove_protocol};

/// Maps public URLs under the home URL onto files below a filesystem root.
#[derive(Debug, Clone)]
pub struct FileVersioner<'a> {
  home_url: String,
  root: &'a Path,
}

impl<'a> FileVersioner<'a> {
  /// Create a versioner for the site served from `root` at `home_url`.
  ///
  /// The scheme of `home_url` is ignored so `http`, `https` and protocol-relative asset
  /// URLs all resolve the same way.
  pub fn new(home_url: &str, root: &'a Path) -> Self {
    Self {
      home_url: remove_protocol(home_url),
      root,
    }
  }

  /// Filesystem path backing `src`, or `None` when `src` is not served from the home URL.
  pub fn local_path(&self, src: &str) -> Option<PathBuf> {
    let src = remove_protocol(src);
    let Some(prefix_len) = home_prefix_len(&src, &self.home_url) else {
      trace!(%src, "external asset url");
      return None;
    };

    let root = self.root_replacement();
    let pairs = [(&src[..prefix_len], root.as_str()), ("/", MAIN_SEPARATOR_STR)];
    Some(PathBuf::from(replace_ordered(&src, &pairs)))
  }

  /// Modification time of the file behind `src` in Unix seconds.
  ///
  /// External URLs and missing files yield `None`; the asset is then emitted unversioned.
  pub fn generate(&self, src: &str) -> Option<u64> {
    let path = self.local_path(src)?;
    let version = fs::metadata(&path)
      .and_then(|metadata| metadata.modified())
      .ok()?
      .duration_since(UNIX_EPOCH)
      .ok()?
      .as_secs();
    debug!(path = %path.display(), version, "computed asset version");
    Some(version)
  }

  // The root keeps a trailing separator exactly when the home URL has a trailing slash, so
  // the remainder of the URL joins without doubling or dropping a separator.
  fn root_replacement(&self) -> String {
    let root = self.root.to_string_lossy();
    let trimmed = root.trim_end_matches(['/', MAIN_SEPARATOR]);
    if self.home_url.ends_with('/') {
      format!("{trimmed}{MAIN_SEPARATOR}")
    } else {
      trimmed.to_string()
    }
  }
}

/// Replace every occurrence of each pattern in one left-to-right pass.
///
/// Pairs are tried in order at each position; replaced text is never rescanned.
fn replace_ordered(input: &str, pairs: &[(&str, &str)]) -> String {
  let mut result = String::with_capacity(input.len());
  let mut rest = input;

  loop {
    if let Some((pattern, replacement)) = pairs
      .iter()
      .find(|(pattern, _)| !pattern.is_empty() && rest.starts_with(*pattern))
    {
      result.push_str(replacement);
      rest = &rest[pattern.len()..];
      continue;
    }

    let mut chars = rest.chars();
    match chars.next() {
      Some(ch) => {
        result.push(ch);
        rest = chars.as_str();
      }
      None => break,
    }
  }

  result
}
