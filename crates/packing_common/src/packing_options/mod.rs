pub mod mode_flags;
pub mod normalized_packing_options;
pub mod path_config;

use std::path::PathBuf;

use serde::Deserialize;

use crate::{EntryGraph, PathConfig};

/// Raw options as a project writes them. Every field is optional; unknown fields are ignored.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackingOptions {
  // --- Input
  pub cwd: Option<PathBuf>,
  pub paths: Option<PathConfig>,
  pub page_extension: Option<String>,
  pub script_extension: Option<String>,
  pub page_glob: Option<String>,

  // --- Hot reload
  pub bootstrap_module: Option<String>,

  // --- Dll
  pub common_chunks: Option<EntryGraph>,
  pub asset_extensions: Option<Vec<String>>,

  // --- Environment, falls back to `NODE_ENV` and `CDN_ROOT`
  pub node_env: Option<String>,
  pub cdn_root: Option<String>,
}

#[test]
fn test_deserialize_ignores_unknown_fields() {
  let options: PackingOptions = serde_json::from_str(
    r#"{
      "pageExtension": ".tpl",
      "paths": { "templates": "views" },
      "commonChunks": { "vendor": ["react", "react-dom"] },
      "somethingElse": 42
    }"#,
  )
  .unwrap();

  assert_eq!(options.page_extension.as_deref(), Some(".tpl"));
  let paths = options.paths.unwrap();
  assert_eq!(paths.templates, "views");
  assert_eq!(paths.dist, "prd");
  assert_eq!(options.common_chunks.unwrap().len(), 1);
  assert!(options.cwd.is_none());
}
