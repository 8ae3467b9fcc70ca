use serde::Deserialize;

/// Project-relative directory layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathConfig {
  pub src: String,
  pub assets: String,
  pub entries: String,
  /// Holds the `pages/` subtree that discovery scans.
  pub templates: String,
  pub mock_pages: String,
  pub dist: String,
  pub assets_dist: String,
  pub templates_dist: String,
  pub dll: String,
}

impl Default for PathConfig {
  fn default() -> Self {
    Self {
      src: "src".to_string(),
      assets: "assets".to_string(),
      entries: "src/entries".to_string(),
      templates: "src/templates".to_string(),
      mock_pages: "mock/page".to_string(),
      dist: "prd".to_string(),
      assets_dist: "prd/assets".to_string(),
      templates_dist: "prd/templates".to_string(),
      dll: "dll".to_string(),
    }
  }
}
