use packing_common::{
  BaseMode, Devtool, NormalizedPackingOptions, OutputOptions, PluginChain, PluginDirective,
  ResolvePolicy, RuleList,
};
use packing_error::BuildResult;

use crate::{
  stages::{
    compose::check_chunk_references,
    select_rules::{define_node_env, dll_rules},
  },
  types::build_plan::BuildPlan,
};

const DLL_LIBRARY: &str = "[name]_[hash]";

/// Composes the plan that pre-bundles `common_chunks` into dll libraries and their manifests.
pub fn compose_dll(options: &NormalizedPackingOptions) -> BuildResult<BuildPlan> {
  let paths = &options.paths;
  let dll_dir = options.resolve(&paths.dll);

  let mut rules = RuleList::default();
  rules.extend(dll_rules(&paths.assets, &options.asset_extensions)?);

  let mut plugins = PluginChain::default();
  plugins
    .push(PluginDirective::Clean { paths: vec![paths.dll.clone()], root: options.cwd.clone() });
  plugins.push(PluginDirective::DllManifest {
    path: dll_dir.join("[name]-manifest.json"),
    name: DLL_LIBRARY.to_string(),
  });
  plugins.push(define_node_env(options.node_env(BaseMode::Build)));

  let entry = options.common_chunks.clone();
  check_chunk_references(&entry, &[], &plugins)?;

  tracing::info!(entries = entry.len(), "composed dll plan");

  Ok(BuildPlan {
    entry,
    output: OutputOptions {
      filename: "[name].js".to_string(),
      chunk_filename: "[name].js".to_string(),
      path: dll_dir,
      public_path: String::new(),
      library: Some(DLL_LIBRARY.to_string()),
    },
    module_rules: rules,
    resolve_policy: ResolvePolicy {
      modules_directories: vec![
        paths.src.clone(),
        paths.assets.clone(),
        "node_modules".to_string(),
      ],
      ..ResolvePolicy::default()
    },
    plugins,
    devtool: Devtool::Eval,
    context: options.cwd.clone(),
    progress: false,
  })
}

#[test]
fn test_compose_dll() {
  use packing_common::{EntryGraph, EntrySpec, PackingOptions};
  use std::path::Path;

  let mut common_chunks = EntryGraph::default();
  common_chunks.insert("vendor".to_string(), EntrySpec::from(vec!["react", "react-dom"]));
  let options = crate::normalize_options_with_env(
    PackingOptions {
      cwd: Some("/project".into()),
      common_chunks: Some(common_chunks),
      ..PackingOptions::default()
    },
    crate::EnvSnapshot::default(),
  );

  let plan = compose_dll(&options).unwrap();

  assert_eq!(plan.entry().keys().collect::<Vec<_>>(), vec!["vendor"]);
  assert_eq!(plan.output().path, Path::new("/project/dll"));
  assert_eq!(plan.output().library.as_deref(), Some("[name]_[hash]"));
  assert_eq!(plan.devtool(), Devtool::Eval);
  assert_eq!(plan.plugins().names(), vec!["clean", "dll-manifest", "define-environment"]);
  assert_eq!(plan.resolve_policy().modules_directories, vec!["src", "assets", "node_modules"]);

  let chain = plan.module_rules().transformers_for("styles/base.css");
  let chain = chain.iter().map(ToString::to_string).collect::<Vec<_>>();
  assert_eq!(chain, vec!["style", "css?importLoaders=2", "postcss"]);

  let json = plan.to_json().unwrap();
  assert_eq!(json["plugins"][2]["definitions"]["process.env.NODE_ENV"], "\"production\"");
}

#[test]
fn test_empty_common_chunks() {
  let options = crate::normalize_options_with_env(
    packing_common::PackingOptions { cwd: Some("/project".into()), ..Default::default() },
    crate::EnvSnapshot::default(),
  );

  let plan = compose_dll(&options).unwrap();

  assert!(plan.entry().is_empty());
}
