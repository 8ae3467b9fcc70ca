use serde_json::Value;

/// Merges `overrides` into `target`.
///
/// Objects merge key by key, recursively. Any other value in `overrides`, arrays included,
/// replaces what `target` holds at that position.
pub fn deep_merge(target: &mut Value, overrides: Value) {
  match (target, overrides) {
    (Value::Object(target), Value::Object(overrides)) => {
      for (key, value) in overrides {
        match target.get_mut(&key) {
          Some(existing) => deep_merge(existing, value),
          None => {
            target.insert(key, value);
          }
        }
      }
    }
    (target, overrides) => *target = overrides,
  }
}

#[test]
fn test_deep_merge() {
  use serde_json::json;

  let mut plan = json!({
    "devtool": "source-map",
    "output": { "path": "/prd/assets", "publicPath": "" },
    "resolve": { "extensions": ["", ".js"] }
  });

  deep_merge(
    &mut plan,
    json!({
      "output": { "publicPath": "/assets/" },
      "resolve": { "extensions": [".ts"] },
      "stats": "minimal"
    }),
  );

  assert_eq!(
    plan,
    json!({
      "devtool": "source-map",
      "output": { "path": "/prd/assets", "publicPath": "/assets/" },
      "resolve": { "extensions": [".ts"] },
      "stats": "minimal"
    })
  );
}
