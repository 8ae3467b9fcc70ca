use itertools::Itertools;
use packing_common::{
  BaseMode, EntryGraph, ModeFlags, NormalizedPackingOptions, OutputOptions, PluginChain,
  RenderDescriptor, ResolvePolicy, RuleList,
};
use packing_error::{BuildResult, PackingError};
use packing_utils::indexmap::FxIndexMap;

use crate::types::build_plan::BuildPlan;

/// Merges the entry graph, rules and plugins with the output and resolve policy into a plan.
///
/// Rule and plugin internals are not checked. Every chunk a render descriptor or plugin directive
/// names must be a key of `entry`, otherwise every dangling reference is reported.
pub fn compose(
  entry: EntryGraph,
  render_descriptors: &[RenderDescriptor],
  rules: RuleList,
  plugins: PluginChain,
  flags: &ModeFlags,
  options: &NormalizedPackingOptions,
) -> BuildResult<BuildPlan> {
  let mode = BaseMode::from_flags(flags)?;
  check_chunk_references(&entry, render_descriptors, &plugins)?;

  let filename = format!("[name]{}.js", flags.chunk_hash_suffix());
  let output = OutputOptions {
    chunk_filename: filename.clone(),
    filename,
    path: options.resolve(&options.paths.dist).join("assets"),
    public_path: String::new(),
    library: None,
  };

  let mut alias = FxIndexMap::default();
  alias.insert(
    "env-alias".to_string(),
    options.resolve(&options.paths.src).join("config/env").join(options.node_env(mode)),
  );
  let resolve_policy = ResolvePolicy {
    alias,
    modules_directories: vec![options.paths.src.clone(), "node_modules".to_string()],
    extensions: ["", ".json", ".js", ".jsx"].into_iter().map(ToString::to_string).collect(),
  };

  tracing::info!(
    ?mode,
    entries = entry.len(),
    rules = rules.len(),
    plugins = plugins.len(),
    "composed build plan"
  );

  Ok(BuildPlan {
    entry,
    output,
    module_rules: rules,
    resolve_policy,
    plugins,
    devtool: flags.devtool(),
    context: options.cwd.clone(),
    progress: flags.progress,
  })
}

pub(crate) fn check_chunk_references(
  entry: &EntryGraph,
  render_descriptors: &[RenderDescriptor],
  plugins: &PluginChain,
) -> BuildResult<()> {
  let from_descriptors = render_descriptors.iter().flat_map(|descriptor| {
    descriptor.associated_chunks.iter().map(|chunk| ("render-page", chunk.as_str()))
  });
  let from_plugins = plugins
    .iter()
    .flat_map(|directive| directive.referenced_chunks().map(|chunk| (directive.name(), chunk)));

  let errors = from_descriptors
    .chain(from_plugins)
    .filter(|(_, chunk)| !entry.contains_key(*chunk))
    .unique()
    .map(|(directive, chunk)| PackingError::DanglingChunkReference {
      directive: directive.to_string(),
      chunk: chunk.to_string(),
    })
    .collect::<Vec<_>>();

  if errors.is_empty() { Ok(()) } else { Err(errors.into()) }
}

#[cfg(test)]
fn test_options() -> NormalizedPackingOptions {
  crate::normalize_options_with_env(
    packing_common::PackingOptions { cwd: Some("/project".into()), ..Default::default() },
    crate::EnvSnapshot::default(),
  )
}

#[cfg(test)]
fn render(key: &str) -> RenderDescriptor {
  RenderDescriptor::from(&packing_common::PageDescriptor {
    route_key: key.to_string(),
    template_path: format!("/project/src/templates/pages/{key}.jade").into(),
    entry_module_path: format!("./src/entries/{key}.js"),
    mock_data_path: format!("/project/mock/page/{key}.js").into(),
  })
}

#[test]
fn test_compose_output_and_resolve() {
  use packing_common::{Devtool, EntrySpec};
  use std::path::Path;

  let options = test_options();
  let mut entry = EntryGraph::default();
  entry.insert("home".to_string(), EntrySpec::from("./src/entries/home.js"));
  let flags = ModeFlags { long_term_caching: true, devtool: true, ..ModeFlags::default() };

  let plan = compose(
    entry,
    &[render("home")],
    RuleList::default(),
    PluginChain::default(),
    &flags,
    &options,
  )
  .unwrap();

  assert_eq!(plan.output().filename, "[name]-[chunkhash:8].js");
  assert_eq!(plan.output().chunk_filename, "[name]-[chunkhash:8].js");
  assert_eq!(plan.output().path, Path::new("/project/prd/assets"));
  assert_eq!(plan.output().public_path, "");
  assert_eq!(plan.devtool(), Devtool::InlineSourceMap);
  assert_eq!(plan.context(), Path::new("/project"));
  assert_eq!(
    plan.resolve_policy().alias["env-alias"],
    Path::new("/project/src/config/env/development")
  );
  assert_eq!(plan.resolve_policy().modules_directories, vec!["src", "node_modules"]);

  let json = plan.to_json().unwrap();
  for key in ["entry", "output", "moduleRules", "resolvePolicy", "plugins", "devtool", "context"] {
    assert!(json.get(key).is_some(), "missing `{key}`");
  }
  assert_eq!(json["devtool"], "inline-source-map");
}

#[test]
fn test_dangling_chunk_references_are_all_reported() {
  use packing_common::{EntrySpec, PluginDirective};

  let mut entry = EntryGraph::default();
  entry.insert("home".to_string(), EntrySpec::from("./src/entries/home.js"));
  let descriptors = [render("home"), render("about"), render("list/detail")];
  let mut plugins = PluginChain::default();
  plugins.extend(descriptors.iter().cloned().map(PluginDirective::RenderPage));

  let error = compose(
    entry,
    &descriptors,
    RuleList::default(),
    plugins,
    &ModeFlags::default(),
    &test_options(),
  )
  .unwrap_err();

  let chunks = error
    .packing_errors()
    .map(|error| match error {
      PackingError::DanglingChunkReference { chunk, .. } => chunk.as_str(),
      other => panic!("unexpected {other}"),
    })
    .collect::<Vec<_>>();
  assert_eq!(chunks, vec!["about", "list/detail"]);
}
