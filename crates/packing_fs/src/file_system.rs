use std::{
  io,
  path::{Path, PathBuf},
};

/// The read-only slice of a file system that page discovery needs.
pub trait FileSystem: Send + Sync {
  /// Lists the direct children of `path`. Order is unspecified.
  fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

  fn is_dir(&self, path: &Path) -> bool;

  fn is_file(&self, path: &Path) -> bool;

  /// Whether `path` itself is a symbolic link, without following it.
  fn is_symlink(&self, path: &Path) -> bool;
}
