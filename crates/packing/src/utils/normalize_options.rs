use packing_common::{NormalizedPackingOptions, PackingOptions};

/// The process environment variables the derivation depends on, read once.
#[derive(Debug, Default, Clone)]
pub struct EnvSnapshot {
  pub node_env: Option<String>,
  pub cdn_root: Option<String>,
}

impl EnvSnapshot {
  pub fn from_process() -> Self {
    let read = |name: &str| std::env::var(name).ok().filter(|value| !value.is_empty());
    Self { node_env: read("NODE_ENV"), cdn_root: read("CDN_ROOT") }
  }
}

pub fn normalize_options(raw_options: PackingOptions) -> NormalizedPackingOptions {
  normalize_options_with_env(raw_options, EnvSnapshot::from_process())
}

/// Explicit option values win over the environment.
pub fn normalize_options_with_env(
  raw_options: PackingOptions,
  env: EnvSnapshot,
) -> NormalizedPackingOptions {
  let page_extension = raw_options.page_extension.unwrap_or_else(|| ".jade".to_string());
  let page_glob = raw_options.page_glob.unwrap_or_else(|| format!("**/*{page_extension}"));

  NormalizedPackingOptions {
    cwd: raw_options
      .cwd
      .unwrap_or_else(|| std::env::current_dir().expect("Failed to get current dir")),
    paths: raw_options.paths.unwrap_or_default(),
    page_extension,
    script_extension: raw_options.script_extension.unwrap_or_else(|| ".js".to_string()),
    page_glob,
    bootstrap_module: raw_options
      .bootstrap_module
      .unwrap_or_else(|| "webpack-hot-middleware/client".to_string()),
    common_chunks: raw_options.common_chunks.unwrap_or_default(),
    asset_extensions: raw_options.asset_extensions.unwrap_or_else(|| {
      ["jpg", "png", "gif", "svg", "woff", "woff2", "ttf", "eot"]
        .into_iter()
        .map(ToString::to_string)
        .collect()
    }),
    node_env: raw_options.node_env.or(env.node_env),
    cdn_root: raw_options.cdn_root.or(env.cdn_root),
  }
}

#[test]
fn test_defaults() {
  use packing_common::BaseMode;
  use std::path::PathBuf;

  let options = normalize_options_with_env(
    PackingOptions { cwd: Some(PathBuf::from("/project")), ..PackingOptions::default() },
    EnvSnapshot::default(),
  );

  assert_eq!(options.page_glob, "**/*.jade");
  assert_eq!(options.pages_root(), PathBuf::from("/project/src/templates/pages"));
  assert_eq!(options.mock_pages_root(), PathBuf::from("/project/mock/page"));
  assert_eq!(options.node_env(BaseMode::Dev), "development");
  assert_eq!(options.node_env(BaseMode::Build), "production");
  assert_eq!(options.assets_domain(), "");
  assert!(options.common_chunks.is_empty());
}

#[test]
fn test_explicit_options_win_over_env() {
  use packing_common::BaseMode;

  let env = EnvSnapshot {
    node_env: Some("staging".to_string()),
    cdn_root: Some("//cdn.example.com".to_string()),
  };

  let options = normalize_options_with_env(
    PackingOptions {
      cwd: Some("/project".into()),
      cdn_root: Some("//static.example.com".to_string()),
      page_extension: Some(".tpl".to_string()),
      ..PackingOptions::default()
    },
    env,
  );

  assert_eq!(options.node_env(BaseMode::Build), "staging");
  assert_eq!(options.assets_domain(), "//static.example.com");
  assert_eq!(options.page_glob, "**/*.tpl");
}
