mod args;

use std::{path::Path, process::ExitCode, time::Instant};

use ansi_term::Colour;
use args::{InputArgs, ModeArgs, OutputArgs};
use clap::Parser;
use packing::{ModeFlags, Packer, PackingOptions};
use packing_utils::deep_merge::deep_merge;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  mode: ModeArgs,

  #[clap(flatten)]
  output: OutputArgs,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
  let content = std::fs::read_to_string(path)
    .map_err(|err| anyhow::anyhow!("Failed to read {}: {err}", path.display()))?;
  serde_json::from_str(&content)
    .map_err(|err| anyhow::anyhow!("Failed to parse {}: {err}", path.display()))
}

fn print_errors<'a>(errors: impl IntoIterator<Item = &'a anyhow::Error>) {
  for error in errors {
    eprintln!("{} {:#}", Colour::Red.paint("Error:"), error);
  }
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  let args = Commands::parse();

  let config = args.input.config.as_deref().map(read_json::<PackingOptions>).transpose();
  let mut options = match config {
    Ok(options) => options.unwrap_or_default(),
    Err(err) => {
      print_errors([&err]);
      return ExitCode::FAILURE;
    }
  };
  if args.input.cwd.is_some() {
    options.cwd = args.input.cwd;
  }

  let packer = Packer::new(options);
  let flags = ModeFlags::from(args.mode);

  let start = Instant::now();
  let result = if args.output.dll { packer.dll_plan() } else { packer.plan(&flags) };
  let plan = match result {
    Ok(plan) => plan,
    Err(errors) => {
      print_errors(errors.iter());
      return ExitCode::FAILURE;
    }
  };

  let rendered = plan.to_json().map_err(anyhow::Error::from).and_then(|mut document| {
    if let Some(path) = &args.output.override_file {
      deep_merge(&mut document, read_json(path)?);
    }
    let rendered = if args.output.pretty {
      serde_json::to_string_pretty(&document)?
    } else {
      serde_json::to_string(&document)?
    };
    Ok(rendered)
  });

  match rendered {
    Ok(rendered) => {
      println!("{rendered}");
      let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
      eprintln!(
        "{} Derived in {}",
        Colour::Green.paint("✔"),
        Colour::White.bold().paint(elapsed)
      );
      ExitCode::SUCCESS
    }
    Err(err) => {
      print_errors([&err]);
      ExitCode::FAILURE
    }
  }
}
