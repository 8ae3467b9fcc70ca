use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Devtool {
  InlineSourceMap,
  SourceMap,
  Eval,
}
