//! Asset URL helpers: protocol normalisation, local/external detection, mtime versioning and
//! the host-facing resolver that enqueues assets and renders the favicon tag.
//!
//! The pure URL transforms live apart from the filesystem lookups so each can be tested in
//! isolation; [`AssetResolver`] composes them with a [`crate::host::ThemeHost`] and the
//! manifest cache.

mod resolver;
mod url;
mod version;

pub use resolver::{AssetResolver, FAVICON_URI_FILTER, ScriptOptions, StyleOptions};
pub use url::{add_query_arg, home_prefix_len, is_external_url, remove_protocol, strip_theme_segment};
pub use version::FileVersioner;
