use serde::{Deserialize, Serialize};

use crate::{CHUNK_HASH_TOKEN, Devtool};

/// The per-invocation mode vector. Absent fields are `false`, which is the development-safe value.
#[allow(clippy::struct_excessive_bools)] // Using raw booleans is more clear in this case
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModeFlags {
  pub hot: bool,
  pub release: bool,
  pub long_term_caching: bool,
  pub build: bool,
  pub progress: bool,
  pub devtool: bool,
  pub minimize: bool,
}

impl ModeFlags {
  /// Suffix appended to `[name]` in emitted filenames.
  pub fn chunk_hash_suffix(&self) -> String {
    if self.long_term_caching { format!("-{CHUNK_HASH_TOKEN}") } else { String::new() }
  }

  pub fn devtool(&self) -> Devtool {
    if self.devtool { Devtool::InlineSourceMap } else { Devtool::SourceMap }
  }
}

#[test]
fn test_missing_and_unknown_fields() {
  let flags: ModeFlags = serde_json::from_str(r#"{ "build": true, "watch": true }"#).unwrap();
  assert_eq!(flags, ModeFlags { build: true, ..ModeFlags::default() });
}

#[test]
fn test_chunk_hash_suffix() {
  assert_eq!(ModeFlags::default().chunk_hash_suffix(), "");
  let flags = ModeFlags { long_term_caching: true, ..ModeFlags::default() };
  assert_eq!(flags.chunk_hash_suffix(), "-[chunkhash:8]");
}
