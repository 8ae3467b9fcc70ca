use packing_common::{
  BaseMode, ModeFlags, NormalizedPackingOptions, PluginDirective, RenderDescriptor,
};
use packing_utils::indexmap::FxIndexMap;

/// Directives that turn a compilation into a deployable release.
pub fn build_plugins(
  options: &NormalizedPackingOptions,
  flags: &ModeFlags,
) -> Vec<PluginDirective> {
  let paths = &options.paths;
  let cwd = &options.cwd;

  vec![
    PluginDirective::Clean { paths: vec![paths.dist.clone()], root: cwd.clone() },
    PluginDirective::CopyAssets {
      context: paths.templates.clone(),
      from: "**/*".to_string(),
      to: cwd.join(&paths.dist).join("templates"),
    },
    PluginDirective::ExtractStylesheet {
      filename: format!("[name]{}.css", flags.chunk_hash_suffix()),
      all_chunks: true,
    },
    define_node_env("production"),
    PluginDirective::ReplaceHash {
      assets_domain: options.assets_domain().to_string(),
      cwd: options.resolve(&paths.templates),
      src: format!("**/*{}", options.page_extension),
      dest: options.resolve(&paths.templates_dist),
    },
    PluginDirective::Revision {
      cwd: options.resolve(&paths.assets),
      src: "**/*.{jpg,png}".to_string(),
      dest: options.resolve(&paths.assets_dist),
    },
  ]
}

/// One render directive per discovered page.
pub fn dev_plugins(pages: &[RenderDescriptor]) -> Vec<PluginDirective> {
  pages.iter().cloned().map(PluginDirective::RenderPage).collect()
}

pub fn base_plugins(
  mode: BaseMode,
  options: &NormalizedPackingOptions,
  flags: &ModeFlags,
  pages: &[RenderDescriptor],
) -> Vec<PluginDirective> {
  if mode.is_build() { build_plugins(options, flags) } else { dev_plugins(pages) }
}

pub fn optimization_plugins() -> Vec<PluginDirective> {
  vec![
    PluginDirective::Dedupe,
    PluginDirective::OccurrenceOrder,
    PluginDirective::Minify {
      compress_warnings: false,
      drop_debugger: true,
      drop_console: true,
      comments: "^!".to_string(),
    },
  ]
}

pub fn hot_reload_plugins() -> Vec<PluginDirective> {
  vec![PluginDirective::HotModuleReplacement]
}

/// `process.env.NODE_ENV` as a JS string literal.
pub fn define_node_env(node_env: &str) -> PluginDirective {
  let mut definitions = FxIndexMap::default();
  definitions.insert(
    "process.env.NODE_ENV".to_string(),
    serde_json::Value::String(node_env.to_string()).to_string(),
  );
  PluginDirective::DefineEnvironment { definitions }
}

#[test]
fn test_define_node_env_is_quoted() {
  let PluginDirective::DefineEnvironment { definitions } = define_node_env("production") else {
    unreachable!()
  };
  assert_eq!(definitions["process.env.NODE_ENV"], "\"production\"");
}
