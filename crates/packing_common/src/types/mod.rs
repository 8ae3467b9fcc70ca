pub mod base_mode;
pub mod devtool;
pub mod entry_spec;
pub mod output_options;
pub mod page_descriptor;
pub mod plugin_directive;
pub mod render_descriptor;
pub mod resolve_policy;
pub mod transformation_rule;
