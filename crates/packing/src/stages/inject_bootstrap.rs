use packing_common::{EntryGraph, EntrySpec};

/// Prepends `bootstrap` to every leaf of the graph so the live-reload client loads first.
///
/// Each value keeps its shape, except that a single module becomes a two-module sequence.
/// Mappings are rewritten key by key and never flattened.
///
/// The prepend is unconditional: applying this twice yields two copies of `bootstrap` at the
/// head of every sequence. Callers must apply it once per graph.
pub fn inject_bootstrap(entry: EntryGraph, bootstrap: &str) -> EntryGraph {
  entry.into_iter().map(|(key, spec)| (key, inject_bootstrap_into(spec, bootstrap))).collect()
}

pub fn inject_bootstrap_into(spec: EntrySpec, bootstrap: &str) -> EntrySpec {
  match spec {
    EntrySpec::Single(module) => EntrySpec::Sequence(vec![bootstrap.to_string(), module]),
    EntrySpec::Sequence(mut modules) => {
      modules.insert(0, bootstrap.to_string());
      EntrySpec::Sequence(modules)
    }
    EntrySpec::Mapping(mapping) => EntrySpec::Mapping(inject_bootstrap(mapping, bootstrap)),
  }
}

#[cfg(test)]
const CLIENT: &str = "webpack-hot-middleware/client";

#[cfg(test)]
fn graph(json: &str) -> EntryGraph {
  serde_json::from_str(json).unwrap()
}

#[test]
fn test_inject_bootstrap_by_shape() {
  let entry = graph(r#"{ "main": "./a.js", "other": ["./b.js"] }"#);

  let entry = inject_bootstrap(entry, CLIENT);

  let expected =
    format!(r#"{{ "main": ["{CLIENT}", "./a.js"], "other": ["{CLIENT}", "./b.js"] }}"#);
  assert_eq!(entry, graph(&expected));
}

#[test]
fn test_mapping_recurses_without_flattening() {
  let entry = graph(r#"{ "app": { "main": "./a.js", "deep": { "x": ["./x.js", "./y.js"] } } }"#);

  let entry = inject_bootstrap(entry, CLIENT);

  let EntrySpec::Mapping(app) = &entry["app"] else { panic!("`app` should stay a mapping") };
  assert_eq!(app.keys().collect::<Vec<_>>(), vec!["main", "deep"]);
  assert_eq!(app["main"], EntrySpec::from(vec![CLIENT, "./a.js"]));
  let EntrySpec::Mapping(deep) = &app["deep"] else { panic!("`deep` should stay a mapping") };
  assert_eq!(deep["x"], EntrySpec::from(vec![CLIENT, "./x.js", "./y.js"]));
}

#[test]
fn test_empty_sequence_gets_bootstrap() {
  let spec = inject_bootstrap_into(EntrySpec::Sequence(vec![]), CLIENT);
  assert_eq!(spec, EntrySpec::from(vec![CLIENT]));
}

#[test]
fn test_applying_twice_duplicates_bootstrap() {
  let entry = graph(r#"{ "main": "./a.js", "other": ["./b.js"] }"#);

  let entry = inject_bootstrap(inject_bootstrap(entry, CLIENT), CLIENT);

  assert_eq!(entry["main"], EntrySpec::from(vec![CLIENT, CLIENT, "./a.js"]));
  assert_eq!(entry["other"], EntrySpec::from(vec![CLIENT, CLIENT, "./b.js"]));
}
