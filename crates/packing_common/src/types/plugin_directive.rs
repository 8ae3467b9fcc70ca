use std::path::PathBuf;

use packing_utils::indexmap::FxIndexMap;
use serde::Serialize;

use crate::RenderDescriptor;

/// Plugin families in execution order. A chain never holds a family after a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PluginFamily {
  Clean,
  CopyAssets,
  ExtractStylesheet,
  DllManifest,
  DefineEnvironment,
  ReplaceHash,
  Revision,
  RenderPage,
  Optimization,
  HotModuleReplacement,
}

/// Named configuration for one plugin of the external bundler. Its fields are not interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "plugin", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum PluginDirective {
  Clean { paths: Vec<String>, root: PathBuf },
  CopyAssets { context: String, from: String, to: PathBuf },
  ExtractStylesheet { filename: String, all_chunks: bool },
  DllManifest { path: PathBuf, name: String },
  DefineEnvironment { definitions: FxIndexMap<String, String> },
  ReplaceHash { assets_domain: String, cwd: PathBuf, src: String, dest: PathBuf },
  Revision { cwd: PathBuf, src: String, dest: PathBuf },
  RenderPage(RenderDescriptor),
  Dedupe,
  OccurrenceOrder,
  Minify { compress_warnings: bool, drop_debugger: bool, drop_console: bool, comments: String },
  HotModuleReplacement,
}

impl PluginDirective {
  pub fn family(&self) -> PluginFamily {
    match self {
      Self::Clean { .. } => PluginFamily::Clean,
      Self::CopyAssets { .. } => PluginFamily::CopyAssets,
      Self::ExtractStylesheet { .. } => PluginFamily::ExtractStylesheet,
      Self::DllManifest { .. } => PluginFamily::DllManifest,
      Self::DefineEnvironment { .. } => PluginFamily::DefineEnvironment,
      Self::ReplaceHash { .. } => PluginFamily::ReplaceHash,
      Self::Revision { .. } => PluginFamily::Revision,
      Self::RenderPage(_) => PluginFamily::RenderPage,
      Self::Dedupe | Self::OccurrenceOrder | Self::Minify { .. } => PluginFamily::Optimization,
      Self::HotModuleReplacement => PluginFamily::HotModuleReplacement,
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Self::Clean { .. } => "clean",
      Self::CopyAssets { .. } => "copy-assets",
      Self::ExtractStylesheet { .. } => "extract-stylesheet",
      Self::DllManifest { .. } => "dll-manifest",
      Self::DefineEnvironment { .. } => "define-environment",
      Self::ReplaceHash { .. } => "replace-hash",
      Self::Revision { .. } => "revision",
      Self::RenderPage(_) => "render-page",
      Self::Dedupe => "dedupe",
      Self::OccurrenceOrder => "occurrence-order",
      Self::Minify { .. } => "minify",
      Self::HotModuleReplacement => "hot-module-replacement",
    }
  }

  /// Route keys this directive expects to exist in the entry graph.
  pub fn referenced_chunks(&self) -> impl Iterator<Item = &str> {
    let chunks = match self {
      Self::RenderPage(descriptor) => Some(&descriptor.associated_chunks),
      _ => None,
    };
    chunks.into_iter().flatten().map(String::as_str)
  }
}

/// An ordered plugin list. Directives are kept sorted by [`PluginFamily`]; within one family
/// insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PluginChain(Vec<PluginDirective>);

impl PluginChain {
  pub fn push(&mut self, directive: PluginDirective) {
    let family = directive.family();
    let at = self.0.partition_point(|existing| existing.family() <= family);
    self.0.insert(at, directive);
  }

  pub fn iter(&self) -> std::slice::Iter<'_, PluginDirective> {
    self.0.iter()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn families(&self) -> impl Iterator<Item = PluginFamily> + '_ {
    self.0.iter().map(PluginDirective::family)
  }

  pub fn names(&self) -> Vec<&'static str> {
    self.0.iter().map(PluginDirective::name).collect()
  }
}

impl Extend<PluginDirective> for PluginChain {
  fn extend<T: IntoIterator<Item = PluginDirective>>(&mut self, iter: T) {
    iter.into_iter().for_each(|directive| self.push(directive));
  }
}

impl<'a> IntoIterator for &'a PluginChain {
  type Item = &'a PluginDirective;
  type IntoIter = std::slice::Iter<'a, PluginDirective>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

#[test]
fn test_push_sorts_by_family() {
  let mut chain = PluginChain::default();
  chain.push(PluginDirective::HotModuleReplacement);
  chain.push(PluginDirective::Dedupe);
  chain.push(PluginDirective::Clean { paths: vec!["prd".to_string()], root: PathBuf::from("/") });
  chain.push(PluginDirective::OccurrenceOrder);

  assert_eq!(chain.names(), vec!["clean", "dedupe", "occurrence-order", "hot-module-replacement"]);
}

#[test]
fn test_serialize_is_tagged() {
  let directive = PluginDirective::ExtractStylesheet {
    filename: "[name]-[chunkhash:8].css".to_string(),
    all_chunks: true,
  };
  assert_eq!(
    serde_json::to_value(&directive).unwrap(),
    serde_json::json!({
      "plugin": "extract-stylesheet",
      "filename": "[name]-[chunkhash:8].css",
      "allChunks": true
    })
  );
  assert_eq!(
    serde_json::to_value(PluginDirective::Dedupe).unwrap(),
    serde_json::json!({ "plugin": "dedupe" })
  );
}
