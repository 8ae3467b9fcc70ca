pub mod deep_merge;
pub mod indexmap;
pub mod path_ext;
