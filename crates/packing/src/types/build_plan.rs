use std::path::{Path, PathBuf};

use packing_common::{Devtool, EntryGraph, OutputOptions, PluginChain, ResolvePolicy, RuleList};
use serde::Serialize;

/// The fully resolved document handed to the external bundler.
///
/// A plan is only produced by a successful composition, which has already checked that every
/// chunk a plugin directive names is an entry. It exposes no way to change it afterwards.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildPlan {
  pub(crate) entry: EntryGraph,
  pub(crate) output: OutputOptions,
  pub(crate) module_rules: RuleList,
  pub(crate) resolve_policy: ResolvePolicy,
  pub(crate) plugins: PluginChain,
  pub(crate) devtool: Devtool,
  pub(crate) context: PathBuf,
  pub(crate) progress: bool,
}

impl BuildPlan {
  pub fn entry(&self) -> &EntryGraph {
    &self.entry
  }

  pub fn output(&self) -> &OutputOptions {
    &self.output
  }

  pub fn module_rules(&self) -> &RuleList {
    &self.module_rules
  }

  pub fn resolve_policy(&self) -> &ResolvePolicy {
    &self.resolve_policy
  }

  pub fn plugins(&self) -> &PluginChain {
    &self.plugins
  }

  pub fn devtool(&self) -> Devtool {
    self.devtool
  }

  pub fn context(&self) -> &Path {
    &self.context
  }

  pub fn progress(&self) -> bool {
    self.progress
  }

  pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(self)
  }
}
