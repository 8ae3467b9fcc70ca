mod packing_options;
mod types;

pub use packing_options::{
  PackingOptions, mode_flags::ModeFlags, normalized_packing_options::NormalizedPackingOptions,
  path_config::PathConfig,
};

pub use crate::types::{
  base_mode::{BaseMode, RuleFamily},
  devtool::Devtool,
  entry_spec::{EntryGraph, EntrySpec},
  output_options::{CHUNK_HASH_TOKEN, OutputOptions},
  page_descriptor::PageDescriptor,
  plugin_directive::{PluginChain, PluginDirective, PluginFamily},
  render_descriptor::RenderDescriptor,
  resolve_policy::ResolvePolicy,
  transformation_rule::{RuleList, RuleStage, TransformationRule, Transformer},
};
