use std::{io, path::PathBuf};

/// Every failure aborts the whole derivation. There is no retry tier.
#[derive(Debug, thiserror::Error)]
pub enum PackingError {
  #[error(
    "Duplicate route key \"{key}\": \"{}\" and \"{}\" normalize to the same page",
    first.display(),
    second.display()
  )]
  DuplicateRouteKey { key: String, first: PathBuf, second: PathBuf },

  #[error("Plugin directive \"{directive}\" references chunk \"{chunk}\" which is not an entry")]
  DanglingChunkReference { directive: String, chunk: String },

  #[error("Conflicting mode flags: {reason}")]
  ConflictingModeFlags { reason: String },

  #[error("Template root \"{}\" is unreadable: {source}", path.display())]
  TemplateRootUnreadable {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

#[test]
fn test_messages_carry_the_offending_input() {
  let error = PackingError::DuplicateRouteKey {
    key: "home".to_string(),
    first: PathBuf::from("pages/home.jade"),
    second: PathBuf::from("pages/home.tpl"),
  };
  let message = error.to_string();
  assert!(message.contains("\"home\""));
  assert!(message.contains("pages/home.jade"));
  assert!(message.contains("pages/home.tpl"));

  let error = PackingError::TemplateRootUnreadable {
    path: PathBuf::from("/missing/pages"),
    source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
  };
  assert!(error.to_string().contains("/missing/pages"));
}
