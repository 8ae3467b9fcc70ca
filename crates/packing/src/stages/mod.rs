pub mod compose;
pub mod discover;
pub mod dll;
pub mod inject_bootstrap;
pub mod select_rules;
