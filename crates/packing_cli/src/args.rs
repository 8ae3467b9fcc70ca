use std::path::PathBuf;

use clap::Args;
use packing::ModeFlags;

#[derive(Args)]
pub struct InputArgs {
  #[clap(long)]
  pub cwd: Option<PathBuf>,

  /// JSON file holding project options.
  #[clap(long, short = 'c')]
  pub config: Option<PathBuf>,
}

#[derive(Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct ModeArgs {
  #[clap(long)]
  pub hot: bool,

  #[clap(long)]
  pub release: bool,

  #[clap(long)]
  pub long_term_caching: bool,

  #[clap(long)]
  pub build: bool,

  #[clap(long)]
  pub progress: bool,

  /// Inline source maps instead of emitting separate files.
  #[clap(long)]
  pub devtool: bool,

  #[clap(long, short = 'm')]
  pub minimize: bool,
}

impl From<ModeArgs> for ModeFlags {
  fn from(value: ModeArgs) -> Self {
    Self {
      hot: value.hot,
      release: value.release,
      long_term_caching: value.long_term_caching,
      build: value.build,
      progress: value.progress,
      devtool: value.devtool,
      minimize: value.minimize,
    }
  }
}

#[derive(Args)]
pub struct OutputArgs {
  /// Print the dll plan for `commonChunks` instead of the page plan.
  #[clap(long)]
  pub dll: bool,

  /// JSON document deep-merged over the printed plan.
  #[clap(long = "override")]
  pub override_file: Option<PathBuf>,

  #[clap(long)]
  pub pretty: bool,
}
