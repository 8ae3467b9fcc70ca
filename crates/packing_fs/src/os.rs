use std::{
  io,
  path::{Path, PathBuf},
};

use crate::file_system::FileSystem;

#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
    std::fs::read_dir(path)?.map(|entry| entry.map(|entry| entry.path())).collect()
  }

  fn is_dir(&self, path: &Path) -> bool {
    path.is_dir()
  }

  fn is_file(&self, path: &Path) -> bool {
    path.is_file()
  }

  fn is_symlink(&self, path: &Path) -> bool {
    path.is_symlink()
  }
}

#[test]
fn test_read_dir_lists_children() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::create_dir(dir.path().join("nested")).unwrap();
  std::fs::write(dir.path().join("a.jade"), "").unwrap();

  let mut children = OsFileSystem.read_dir(dir.path()).unwrap();
  children.sort();

  assert_eq!(children, vec![dir.path().join("a.jade"), dir.path().join("nested")]);
  assert!(OsFileSystem.is_dir(&children[1]));
  assert!(OsFileSystem.is_file(&children[0]));
  assert!(OsFileSystem.read_dir(&dir.path().join("missing")).is_err());
}

#[cfg(unix)]
#[test]
fn test_is_symlink_does_not_follow() {
  let dir = tempfile::tempdir().unwrap();
  let target = dir.path().join("pages");
  std::fs::create_dir(&target).unwrap();
  std::os::unix::fs::symlink(&target, dir.path().join("link")).unwrap();

  assert!(OsFileSystem.is_symlink(&dir.path().join("link")));
  assert!(OsFileSystem.is_dir(&dir.path().join("link")));
  assert!(!OsFileSystem.is_symlink(&target));
}
