use std::path::PathBuf;

use packing_utils::indexmap::FxIndexSet;
use serde::Serialize;

use crate::PageDescriptor;

/// What the external templating plugin needs to render one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderDescriptor {
  pub output_filename: String,
  pub source_template: PathBuf,
  pub init_data: PathBuf,
  pub cache_disabled: bool,
  pub inject_assets: bool,
  pub associated_chunks: FxIndexSet<String>,
}

impl From<&PageDescriptor> for RenderDescriptor {
  fn from(page: &PageDescriptor) -> Self {
    Self {
      output_filename: format!("{}.html", page.route_key),
      source_template: page.template_path.clone(),
      init_data: page.mock_data_path.clone(),
      cache_disabled: true,
      inject_assets: false,
      associated_chunks: std::iter::once(page.route_key.clone()).collect(),
    }
  }
}
