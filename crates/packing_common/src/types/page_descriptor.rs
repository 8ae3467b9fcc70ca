use std::path::PathBuf;

/// One discovered page-definition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDescriptor {
  /// Slash path relative to the pages root with the page extension stripped.
  pub route_key: String,
  pub template_path: PathBuf,
  pub entry_module_path: String,
  pub mock_data_path: PathBuf,
}
