use std::sync::OnceLock;

use regex::Regex;

fn protocol_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"(?i)^(?:https?:)+").expect("invalid protocol regex"))
}

fn theme_segment_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"/theme/?$").expect("invalid theme segment regex"))
}

/// Strip a leading `http:` or `https:` scheme, leaving a protocol-relative URL.
pub fn remove_protocol(url: &str) -> String {
  protocol_pattern().replace(url, "").into_owned()
}

/// Byte length of the prefix of `url` that matches `home_url`, ignoring case.
///
/// Returns `None` when `url` does not start with the home URL. The home URL is quoted
/// before being compiled, so metacharacters such as `.` or `?` only match themselves.
pub fn home_prefix_len(url: &str, home_url: &str) -> Option<usize> {
  let pattern = Regex::new(&format!("(?i)^{}", regex::escape(home_url))).ok()?;
  pattern.find(url).map(|found| found.end())
}

/// Returns `true` unless `url` lives under `home_url`.
pub fn is_external_url(url: &str, home_url: &str) -> bool {
  home_prefix_len(url, home_url).is_none()
}

/// Drop a trailing `/theme` directory from a theme URI.
///
/// Themes that keep their templates in a nested `theme/` folder report that folder as the
/// template directory; assets live one level up.
pub fn strip_theme_segment(uri: &str) -> String {
  theme_segment_pattern().replace(uri, "").into_owned()
}

/// Set `key=value` in the query string of `uri`.
///
/// An existing parameter with the same key is replaced and any `#fragment` stays last.
pub fn add_query_arg(uri: &str, key: &str, value: &str) -> String {
  let (base, fragment) = match uri.split_once('#') {
    Some((base, fragment)) => (base, Some(fragment)),
    None => (uri, None),
  };
  let (path, query) = match base.split_once('?') {
    Some((path, query)) => (path, query),
    None => (base, ""),
  };

  let param = format!("{key}={value}");
  let mut pairs: Vec<&str> = query
    .split('&')
    .filter(|pair| !pair.is_empty())
    .filter(|pair| pair.split('=').next() != Some(key))
    .collect();
  pairs.push(&param);

  let mut result = format!("{path}?{}", pairs.join("&"));
  if let Some(fragment) = fragment {
    result.push('#');
    result.push_str(fragment);
  }
  result
}
