use std::path::Path;

use sugar_path::SugarPath;

pub trait PathExt {
  /// Forward-slash rendering regardless of platform. Non-utf8 segments are replaced lossily.
  fn to_slash_string(&self) -> String;

  /// Slash path of `self` relative to `base`, or `None` when `self` is not under `base`.
  fn slash_relative_to(&self, base: &Path) -> Option<String>;

  /// Drops the final extension, keeping any directory components.
  fn without_extension(&self) -> String;
}

impl PathExt for Path {
  fn to_slash_string(&self) -> String {
    self.to_slash_lossy().into_owned()
  }

  fn slash_relative_to(&self, base: &Path) -> Option<String> {
    self.strip_prefix(base).ok().map(|relative| relative.to_slash_string())
  }

  fn without_extension(&self) -> String {
    self.with_extension("").to_slash_string()
  }
}

#[test]
fn test_slash_relative_to() {
  let root = Path::new("project").join("pages");
  let page = root.join("list").join("detail.jade");

  assert_eq!(page.slash_relative_to(&root).as_deref(), Some("list/detail.jade"));
  assert_eq!(Path::new("elsewhere").slash_relative_to(&root), None);
}

#[test]
fn test_without_extension() {
  assert_eq!(Path::new("list/detail.jade").without_extension(), "list/detail");
  assert_eq!(Path::new("home.tpl").without_extension(), "home");
  assert_eq!(Path::new("archive.tar.gz").without_extension(), "archive.tar");
}
