//! Command-line front end for inspecting theme asset versions, bundles and configuration.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use theme_assets::config::lookup;
use theme_assets::{
  AssetRegistration, AssetResolver, Config, Manifest, ManifestCache, ScriptOptions,
  StyleOptions, ThemeHost,
};

#[derive(Parser, Debug)]
#[command(name = "theme-assets", version, about)]
struct Cli {
  /// Theme root containing `config.json` and `dist/manifest.json`.
  #[arg(long, default_value = ".")]
  theme_dir: PathBuf,
  /// Directory the home URL is served from. Defaults to the theme root.
  #[arg(long)]
  abspath: Option<PathBuf>,
  /// Canonical site URL used to tell local assets from external ones.
  #[arg(long, default_value = "http://localhost/")]
  home_url: String,
  /// Public URL of the theme template directory. Defaults to `<home-url>/theme`.
  #[arg(long)]
  theme_uri: Option<String>,
  /// Behave as if the site already has an icon configured.
  #[arg(long)]
  site_icon: bool,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print the mtime version of an asset URL, or `none`.
  Version { src: String },
  /// Print the `/dist/` path of a logical bundle name.
  BundlePath { path: String },
  /// Register a stylesheet and print the registration.
  EnqueueStyle {
    handle: String,
    src: String,
    #[arg(long, value_delimiter = ',')]
    deps: Vec<String>,
    #[arg(long, default_value = "all")]
    media: String,
  },
  /// Register a script and print the registration.
  EnqueueScript {
    handle: String,
    src: String,
    #[arg(long, value_delimiter = ',')]
    deps: Vec<String>,
    #[arg(long)]
    in_footer: bool,
  },
  /// Print the favicon link tag when the favicon exists.
  Favicon,
  /// Print the build manifest.
  Manifest,
  /// Print the configuration, or a single dotted key from it.
  Config { key: Option<String> },
}

/// Host that prints every registration as a JSON line.
#[derive(Debug)]
struct ConsoleHost {
  home_url: String,
  theme_uri: String,
  site_icon: bool,
}

impl ConsoleHost {
  fn print(kind: &str, asset: &AssetRegistration<'_>, placement: serde_json::Value) {
    let line = json!({
      "kind": kind,
      "handle": asset.handle,
      "src": asset.src,
      "deps": asset.dependencies,
      "ver": asset.version,
      "placement": placement,
    });
    println!("{line}");
  }
}

impl ThemeHost for ConsoleHost {
  fn site_url(&self, path: &str) -> String {
    format!(
      "{}/{}",
      self.home_url.trim_end_matches('/'),
      path.trim_start_matches('/')
    )
  }

  fn template_directory_uri(&self) -> String {
    self.theme_uri.clone()
  }

  fn enqueue_style(&mut self, asset: &AssetRegistration<'_>, media: &str) {
    Self::print("style", asset, json!({ "media": media }));
  }

  fn enqueue_script(&mut self, asset: &AssetRegistration<'_>, in_footer: bool) {
    Self::print("script", asset, json!({ "in_footer": in_footer }));
  }

  fn has_site_icon(&self) -> bool {
    self.site_icon
  }
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

fn main() -> Result<()> {
  init_tracing();
  let cli = Cli::parse();

  let abspath = cli.abspath.clone().unwrap_or_else(|| cli.theme_dir.clone());
  let mut host = ConsoleHost {
    home_url: cli.home_url.clone(),
    theme_uri: String::new(),
    site_icon: cli.site_icon,
  };
  host.theme_uri = cli
    .theme_uri
    .clone()
    .unwrap_or_else(|| host.site_url("theme"));

  let mut resolver = AssetResolver::new(host, abspath, ManifestCache::for_theme(&cli.theme_dir));

  match cli.command {
    Command::Version { src } => match resolver.file_version(&src) {
      Some(version) => println!("{version}"),
      None => println!("none"),
    },
    Command::BundlePath { path } => {
      let bundle = resolver
        .bundle_path(&path)
        .context("failed to read the build manifest")?;
      println!("{bundle}");
    }
    Command::EnqueueStyle {
      handle,
      src,
      deps,
      media,
    } => resolver.enqueue_style(&handle, &src, StyleOptions {
      dependencies: deps,
      media,
    }),
    Command::EnqueueScript {
      handle,
      src,
      deps,
      in_footer,
    } => resolver.enqueue_script(&handle, &src, ScriptOptions {
      dependencies: deps,
      in_footer,
    }),
    Command::Favicon => {
      let mut stdout = io::stdout().lock();
      resolver
        .add_favicon(&mut stdout)
        .context("failed to write favicon tag")?;
    }
    Command::Manifest => {
      let entries = Manifest::new(&cli.theme_dir)
        .load()
        .context("failed to read the build manifest")?;
      println!("{}", serde_json::to_string_pretty(&entries)?);
    }
    Command::Config { key } => {
      let values = Config::new(&cli.theme_dir)
        .load()
        .context("failed to read the theme configuration")?;
      match key {
        Some(key) => {
          let value = lookup(&values, &key).ok_or_else(|| anyhow!("no config value at `{key}`"))?;
          println!("{}", serde_json::to_string_pretty(value)?);
        }
        None => println!("{}", serde_json::to_string_pretty(&values)?),
      }
    }
  }

  Ok(())
}
