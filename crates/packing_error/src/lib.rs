mod packing_error;

use std::ops::{Deref, DerefMut};

pub use crate::packing_error::PackingError;

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Iterates the diagnostics that are one of the known [`PackingError`] kinds.
  pub fn packing_errors(&self) -> impl Iterator<Item = &PackingError> {
    self.0.iter().filter_map(|error| error.downcast_ref::<PackingError>())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<PackingError> for BuildError {
  fn from(error: PackingError) -> Self {
    Self(vec![error.into()])
  }
}

impl From<Vec<PackingError>> for BuildError {
  fn from(errors: Vec<PackingError>) -> Self {
    Self(errors.into_iter().map(Into::into).collect())
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn test_packing_errors_skips_foreign_diagnostics() {
  let error = BuildError(vec![
    anyhow::anyhow!("something else"),
    PackingError::ConflictingModeFlags { reason: "build and hot".to_string() }.into(),
  ]);

  assert_eq!(error.len(), 2);
  let kinds = error.packing_errors().collect::<Vec<_>>();
  assert_eq!(kinds.len(), 1);
  assert!(matches!(kinds[0], PackingError::ConflictingModeFlags { .. }));
}
