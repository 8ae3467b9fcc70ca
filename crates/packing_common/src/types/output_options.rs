use std::path::PathBuf;

use serde::Serialize;

/// Placeholder the bundler substitutes with the first 8 characters of a chunk's content hash.
/// Downstream cache-busting tooling parses this exact token.
pub const CHUNK_HASH_TOKEN: &str = "[chunkhash:8]";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
  pub filename: String,
  pub chunk_filename: String,
  pub path: PathBuf,
  pub public_path: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub library: Option<String>,
}
