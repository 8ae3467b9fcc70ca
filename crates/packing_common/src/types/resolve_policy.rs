use std::path::PathBuf;

use packing_utils::indexmap::FxIndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvePolicy {
  pub alias: FxIndexMap<String, PathBuf>,
  pub modules_directories: Vec<String>,
  pub extensions: Vec<String>,
}
