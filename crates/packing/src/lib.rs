mod packer;
mod stages;
mod types;
mod utils;

pub use crate::{
  packer::Packer,
  stages::{
    compose::compose,
    discover::{Discovery, discover},
    dll::compose_dll,
    inject_bootstrap::{inject_bootstrap, inject_bootstrap_into},
    select_rules::{RuleSet, RuleSetSelector},
  },
  types::build_plan::BuildPlan,
  utils::normalize_options::{EnvSnapshot, normalize_options, normalize_options_with_env},
};
pub use packing_common::*;
pub use packing_error::{BuildError, BuildResult, PackingError};
pub use packing_fs::{FileSystem, OsFileSystem};
