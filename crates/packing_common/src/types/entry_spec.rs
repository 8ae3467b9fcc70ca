use packing_utils::indexmap::FxIndexMap;
use serde::{Deserialize, Serialize};

/// Route key to the module(s) that make up that bundle.
pub type EntryGraph = FxIndexMap<String, EntrySpec>;

/// The three shapes an entry value may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntrySpec {
  Single(String),
  Sequence(Vec<String>),
  Mapping(FxIndexMap<String, EntrySpec>),
}

impl EntrySpec {
  /// Every module path, depth first, in declaration order.
  pub fn modules(&self) -> Vec<&str> {
    match self {
      Self::Single(module) => vec![module.as_str()],
      Self::Sequence(modules) => modules.iter().map(String::as_str).collect(),
      Self::Mapping(mapping) => mapping.values().flat_map(Self::modules).collect(),
    }
  }
}

impl From<&str> for EntrySpec {
  fn from(value: &str) -> Self {
    Self::Single(value.to_string())
  }
}

impl From<Vec<&str>> for EntrySpec {
  fn from(value: Vec<&str>) -> Self {
    Self::Sequence(value.into_iter().map(ToString::to_string).collect())
  }
}

#[test]
fn test_untagged_shapes() {
  let graph: EntryGraph = serde_json::from_str(
    r#"{ "main": "./a.js", "other": ["./b.js"], "nested": { "inner": "./c.js" } }"#,
  )
  .unwrap();

  assert_eq!(graph["main"], EntrySpec::from("./a.js"));
  assert_eq!(graph["other"], EntrySpec::from(vec!["./b.js"]));
  assert!(matches!(&graph["nested"], EntrySpec::Mapping(inner) if inner.contains_key("inner")));
  assert_eq!(graph["nested"].modules(), vec!["./c.js"]);

  let json = serde_json::to_string(&graph).unwrap();
  assert_eq!(json, r#"{"main":"./a.js","other":["./b.js"],"nested":{"inner":"./c.js"}}"#);
}
