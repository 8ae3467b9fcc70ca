use std::fmt::Display;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Stages a rule may belong to, in the order their rules are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleStage {
  Base,
  Mode,
  Optimization,
  HotReload,
}

/// A named transformer reference plus its query string, e.g. `css?importLoaders=2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformer {
  pub name: String,
  pub query: Option<String>,
}

impl Transformer {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), query: None }
  }

  pub fn with_query(name: impl Into<String>, query: impl Into<String>) -> Self {
    Self { name: name.into(), query: Some(query.into()) }
  }
}

impl Display for Transformer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match &self.query {
      Some(query) => write!(f, "{}?{query}", self.name),
      None => write!(f, "{}", self.name),
    }
  }
}

impl Serialize for Transformer {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationRule {
  #[serde(skip)]
  pub stage: RuleStage,
  #[serde(serialize_with = "serialize_regex")]
  pub match_pattern: Regex,
  pub transformer_chain: Vec<Transformer>,
  #[serde(serialize_with = "serialize_optional_regex", skip_serializing_if = "Option::is_none")]
  pub exclusion_pattern: Option<Regex>,
}

impl TransformationRule {
  pub fn new(stage: RuleStage, match_pattern: &Regex, transformer_chain: Vec<Transformer>) -> Self {
    Self { stage, match_pattern: match_pattern.clone(), transformer_chain, exclusion_pattern: None }
  }

  #[must_use]
  pub fn exclude(mut self, exclusion_pattern: &Regex) -> Self {
    self.exclusion_pattern = Some(exclusion_pattern.clone());
    self
  }

  pub fn applies_to(&self, path: &str) -> bool {
    self.match_pattern.is_match(path)
      && !self.exclusion_pattern.as_ref().is_some_and(|exclusion| exclusion.is_match(path))
  }
}

fn serialize_regex<S: Serializer>(regex: &Regex, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(regex.as_str())
}

#[allow(clippy::ref_option)]
fn serialize_optional_regex<S: Serializer>(
  regex: &Option<Regex>,
  serializer: S,
) -> Result<S::Ok, S::Error> {
  match regex {
    Some(regex) => serializer.serialize_str(regex.as_str()),
    None => serializer.serialize_none(),
  }
}

/// Module rules kept in stage order. Rules within a stage keep their insertion order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RuleList(Vec<TransformationRule>);

impl RuleList {
  pub fn push(&mut self, rule: TransformationRule) {
    let at = self.0.partition_point(|existing| existing.stage <= rule.stage);
    self.0.insert(at, rule);
  }

  pub fn iter(&self) -> std::slice::Iter<'_, TransformationRule> {
    self.0.iter()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Every rule applies, not just the first match. The result is the concatenation of each
  /// applicable rule's chain in list order.
  pub fn transformers_for(&self, path: &str) -> Vec<&Transformer> {
    self
      .0
      .iter()
      .filter(|rule| rule.applies_to(path))
      .flat_map(|rule| &rule.transformer_chain)
      .collect()
  }
}

impl Extend<TransformationRule> for RuleList {
  fn extend<T: IntoIterator<Item = TransformationRule>>(&mut self, iter: T) {
    iter.into_iter().for_each(|rule| self.push(rule));
  }
}

impl<'a> IntoIterator for &'a RuleList {
  type Item = &'a TransformationRule;
  type IntoIter = std::slice::Iter<'a, TransformationRule>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

#[test]
fn test_push_keeps_stage_order() {
  let js = Regex::new(r"\.js$").unwrap();
  let mut rules = RuleList::default();
  rules.push(TransformationRule::new(RuleStage::Mode, &js, vec![Transformer::new("babel")]));
  rules.push(TransformationRule::new(RuleStage::Base, &js, vec![Transformer::new("first")]));
  rules.push(TransformationRule::new(RuleStage::Base, &js, vec![Transformer::new("second")]));

  let chain =
    rules.transformers_for("a.js").into_iter().map(|t| t.name.as_str()).collect::<Vec<_>>();
  assert_eq!(chain, vec!["first", "second", "babel"]);
}

#[test]
fn test_transformers_for_applies_every_match() {
  let less = Regex::new(r"\.less$").unwrap();
  let any_style = Regex::new(r"\.(less|scss)$").unwrap();
  let vendor = Regex::new("node_modules").unwrap();

  let mut rules = RuleList::default();
  rules.push(TransformationRule::new(
    RuleStage::Base,
    &any_style,
    vec![Transformer::with_query("css", "importLoaders=2")],
  ));
  rules.push(
    TransformationRule::new(RuleStage::Mode, &less, vec![Transformer::new("less")])
      .exclude(&vendor),
  );

  let chain = |path| {
    rules.transformers_for(path).into_iter().map(ToString::to_string).collect::<Vec<_>>()
  };
  assert_eq!(chain("src/a.less"), vec!["css?importLoaders=2", "less"]);
  assert_eq!(chain("node_modules/x/a.less"), vec!["css?importLoaders=2"]);
  assert!(chain("src/a.js").is_empty());
}

#[test]
fn test_serialize() {
  let js = Regex::new(r"\.js?$").unwrap();
  let rule = TransformationRule::new(RuleStage::Mode, &js, vec![Transformer::new("babel")])
    .exclude(&Regex::new("node_modules").unwrap());

  assert_eq!(
    serde_json::to_value(&rule).unwrap(),
    serde_json::json!({
      "matchPattern": r"\.js?$",
      "transformerChain": ["babel"],
      "exclusionPattern": "node_modules"
    })
  );
}
