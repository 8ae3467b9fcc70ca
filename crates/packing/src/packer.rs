use packing_common::{BaseMode, ModeFlags, NormalizedPackingOptions, PackingOptions};
use packing_error::BuildResult;
use packing_fs::{FileSystem, OsFileSystem};

use crate::{
  stages::{
    compose::compose,
    discover::{Discovery, discover},
    dll::compose_dll,
    inject_bootstrap::inject_bootstrap,
    select_rules::{RuleSet, RuleSetSelector},
  },
  types::build_plan::BuildPlan,
  utils::normalize_options::normalize_options,
};

/// Derives build plans for one project. Each call is a fresh, sequential pass over the pages
/// root; nothing is cached between calls.
pub struct Packer<F: FileSystem = OsFileSystem> {
  fs: F,
  options: NormalizedPackingOptions,
}

impl Packer {
  pub fn new(options: PackingOptions) -> Self {
    Self::with_file_system(normalize_options(options), OsFileSystem)
  }
}

impl<F: FileSystem> Packer<F> {
  pub fn with_file_system(options: NormalizedPackingOptions, fs: F) -> Self {
    Self { fs, options }
  }

  pub fn options(&self) -> &NormalizedPackingOptions {
    &self.options
  }

  pub fn file_system(&self) -> &F {
    &self.fs
  }

  pub fn discover(&self) -> BuildResult<Discovery> {
    discover(&self.fs, &self.options.pages_root(), &self.options.page_glob, &self.options)
  }

  pub fn plan(&self, flags: &ModeFlags) -> BuildResult<BuildPlan> {
    // Reject conflicting flags before touching the file system.
    BaseMode::from_flags(flags)?;

    let Discovery { entry, render_descriptors, .. } = self.discover()?;
    let entry =
      if flags.hot { inject_bootstrap(entry, &self.options.bootstrap_module) } else { entry };

    let RuleSet { rules, plugins } =
      RuleSetSelector::new(&self.options).select(flags, &render_descriptors)?;

    compose(entry, &render_descriptors, rules, plugins, flags, &self.options)
  }

  pub fn dll_plan(&self) -> BuildResult<BuildPlan> {
    compose_dll(&self.options)
  }
}
