use std::sync::LazyLock;

use packing_common::{RuleFamily, RuleStage, TransformationRule, Transformer};
use regex::Regex;

macro_rules! pattern {
  ($name:ident, $source:literal) => {
    static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($source).unwrap());
  };
}

pattern!(JSON_RE, r"\.json$");
pattern!(WOFF_RE, r"\.woff(\?v=\d+\.\d+\.\d+)?$");
pattern!(WOFF2_RE, r"\.woff2(\?v=\d+\.\d+\.\d+)?$");
pattern!(TTF_RE, r"\.ttf(\?v=\d+\.\d+\.\d+)?$");
pattern!(EOT_RE, r"\.eot(\?v=\d+\.\d+\.\d+)?$");
pattern!(SVG_RE, r"\.svg(\?v=\d+\.\d+\.\d+)?$");
pattern!(JPG_RE, r"\.jpg$");
pattern!(HTML_RE, r"\.html$");
pattern!(SCRIPT_RE, r"\.jsx?$");
pattern!(CSS_RE, r"(?i)\.css$");
pattern!(LESS_RE, r"\.less$");
pattern!(SCSS_RE, r"\.scss$");
pattern!(NODE_MODULES_RE, "node_modules");

const LOCAL_IDENT: &str = "importLoaders=2&localIdentName=[local]___[hash:base64:8]";
const AUTOPREFIXER: &str = "browsers=last 2 version";

fn url(limit: u32, mimetype: &str) -> Transformer {
  Transformer::with_query("url", format!("limit={limit}&mimetype={mimetype}"))
}

/// Rules shared by every mode: data, fonts, images and templates.
pub fn base_rules(page_extension: &str) -> anyhow::Result<Vec<TransformationRule>> {
  let page_re = Regex::new(&format!(r"{}$", regex::escape(page_extension)))?;
  let page_transformer = page_extension.trim_start_matches('.');

  let rule = |re: &Regex, chain| TransformationRule::new(RuleStage::Base, re, chain);
  Ok(vec![
    rule(&JSON_RE, vec![Transformer::new("json")]),
    rule(&WOFF_RE, vec![url(10_000, "application/font-woff")]),
    rule(&WOFF2_RE, vec![url(10_000, "application/font-woff")]),
    rule(&TTF_RE, vec![url(10_000, "application/octet-stream")]),
    rule(&EOT_RE, vec![Transformer::new("file")]),
    rule(&SVG_RE, vec![url(10_000, "image/svg+xml")]),
    rule(&JPG_RE, vec![Transformer::with_query("url", "name=[name]-[hash:8].[ext]&limit=10240")]),
    rule(&page_re, vec![Transformer::new(page_transformer)]),
    rule(&HTML_RE, vec![Transformer::new("html")]),
  ])
}

/// Script and stylesheet rules for the selected family.
///
/// Dev lints scripts and injects styles at runtime. Build strips `debug` calls and extracts
/// styles into a static sheet.
pub fn mode_rules(family: RuleFamily) -> Vec<TransformationRule> {
  let rule = |re: &Regex, chain| TransformationRule::new(RuleStage::Mode, re, chain);

  match family {
    RuleFamily::Dev => {
      let style = |preprocessor: &str| {
        vec![
          Transformer::new("style"),
          Transformer::with_query("css", LOCAL_IDENT),
          Transformer::with_query("autoprefixer", AUTOPREFIXER),
          Transformer::with_query(preprocessor, "outputStyle=expanded"),
        ]
      };
      vec![
        rule(&SCRIPT_RE, vec![Transformer::new("babel"), Transformer::new("eslint")])
          .exclude(&NODE_MODULES_RE),
        rule(&LESS_RE, style("less")),
        rule(&SCSS_RE, style("sass")),
      ]
    }
    RuleFamily::Build => {
      let style = |preprocessor: &str| {
        vec![
          Transformer::with_query("extract", "fallback=style"),
          Transformer::with_query("css", "importLoaders=2"),
          Transformer::with_query("autoprefixer", AUTOPREFIXER),
          Transformer::with_query(preprocessor, "outputStyle=expanded&sourceMapContents"),
        ]
      };
      vec![
        rule(
          &SCRIPT_RE,
          vec![Transformer::with_query("strip", "strip[]=debug"), Transformer::new("babel")],
        )
        .exclude(&NODE_MODULES_RE),
        rule(&LESS_RE, style("less")),
        rule(&SCSS_RE, style("sass")),
      ]
    }
  }
}

/// Rules for pre-bundling shared vendor chunks.
pub fn dll_rules(
  assets: &str,
  asset_extensions: &[String],
) -> anyhow::Result<Vec<TransformationRule>> {
  let alternatives = asset_extensions.iter().map(|ext| regex::escape(ext)).collect::<Vec<_>>();
  let assets_re = Regex::new(&format!(r"(?i)\.({})$", alternatives.join("|")))?;

  let rule = |re: &Regex, chain| TransformationRule::new(RuleStage::Base, re, chain);
  let style = |preprocessor: Option<&str>| {
    let mut chain = vec![
      Transformer::new("style"),
      Transformer::with_query("css", "importLoaders=2"),
      Transformer::new("postcss"),
    ];
    chain.extend(preprocessor.map(Transformer::new));
    chain
  };

  Ok(vec![
    rule(&SCRIPT_RE, vec![Transformer::new("babel"), Transformer::new("eslint")])
      .exclude(&NODE_MODULES_RE),
    rule(&CSS_RE, style(None)),
    rule(&LESS_RE, style(Some("less"))),
    rule(&SCSS_RE, style(Some("sass"))),
    rule(
      &assets_re,
      vec![Transformer::with_query(
        "file",
        format!("name=[path][name].[ext]&context={assets}&emitFile=false"),
      )],
    ),
  ])
}

#[test]
fn test_base_rules_follow_page_extension() {
  let rules = base_rules(".tpl").unwrap();
  let page = rules.iter().find(|rule| rule.applies_to("pages/home.tpl")).unwrap();
  assert_eq!(page.transformer_chain, vec![Transformer::new("tpl")]);
  assert!(!rules.iter().any(|rule| rule.applies_to("pages/home.jade")));
}

#[test]
fn test_font_rules_accept_version_suffix() {
  let rules = base_rules(".jade").unwrap();
  let chain = |path: &str| {
    rules
      .iter()
      .filter(|rule| rule.applies_to(path))
      .flat_map(|rule| rule.transformer_chain.iter().map(ToString::to_string))
      .collect::<Vec<_>>()
  };
  let woff = "url?limit=10000&mimetype=application/font-woff";
  assert_eq!(chain("fonts/icon.woff?v=4.7.0"), vec![woff]);
  assert_eq!(chain("fonts/icon.woff2"), vec![woff]);
  assert_eq!(chain("fonts/icon.eot?v=1.0.0"), vec!["file"]);
}

#[test]
fn test_script_rules_skip_node_modules() {
  for family in [RuleFamily::Dev, RuleFamily::Build] {
    let rules = mode_rules(family);
    assert!(rules.iter().any(|rule| rule.applies_to("src/entries/home.js")));
    assert!(!rules.iter().any(|rule| rule.applies_to("node_modules/react/index.js")));
  }
}

#[test]
fn test_dll_assets_rule_is_case_insensitive() {
  let rules = dll_rules("assets", &["jpg".to_string(), "png".to_string()]).unwrap();
  let assets = rules.last().unwrap();
  assert!(assets.applies_to("images/logo.PNG"));
  assert!(!assets.applies_to("images/logo.gif"));
  assert_eq!(
    assets.transformer_chain[0].to_string(),
    "file?name=[path][name].[ext]&context=assets&emitFile=false"
  );
}
