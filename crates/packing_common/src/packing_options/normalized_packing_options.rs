use std::path::PathBuf;

use crate::{BaseMode, EntryGraph, PathConfig};

#[derive(Debug)]
pub struct NormalizedPackingOptions {
  // --- Input
  pub cwd: PathBuf,
  pub paths: PathConfig,
  pub page_extension: String,
  pub script_extension: String,
  pub page_glob: String,

  // --- Hot reload
  pub bootstrap_module: String,

  // --- Dll
  pub common_chunks: EntryGraph,
  pub asset_extensions: Vec<String>,

  // --- Environment
  pub node_env: Option<String>,
  pub cdn_root: Option<String>,
}

impl NormalizedPackingOptions {
  pub fn resolve(&self, relative: &str) -> PathBuf {
    self.cwd.join(relative)
  }

  /// Directory whose descendants are the page-definition files.
  pub fn pages_root(&self) -> PathBuf {
    self.resolve(&self.paths.templates).join("pages")
  }

  pub fn mock_pages_root(&self) -> PathBuf {
    self.resolve(&self.paths.mock_pages)
  }

  /// `NODE_ENV` when it was set, otherwise the name implied by the mode.
  pub fn node_env(&self, mode: BaseMode) -> &str {
    match &self.node_env {
      Some(env) => env,
      None if mode.is_build() => "production",
      None => "development",
    }
  }

  /// An unset CDN root substitutes as an empty domain.
  pub fn assets_domain(&self) -> &str {
    self.cdn_root.as_deref().unwrap_or_default()
  }
}
